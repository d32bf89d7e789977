use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use roxmltree::Node;

use crate::activity::sample::{Sample, SampleSequence};
use crate::foundation::error::{OverlayError, OverlayResult};

/// Default namespace of Training Center Database v2 documents.
pub const TCX_NS: &str = "http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2";
/// Namespace of the `TPX` extension that carries per-trackpoint speed.
pub const ACTIVITY_EXT_NS: &str = "http://www.garmin.com/xmlschemas/ActivityExtension/v2";

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Read and parse a TCX file.
///
/// Any I/O failure is reported as [`OverlayError::MalformedDocument`]: the run cannot proceed
/// without a readable document.
pub fn read_tcx_file(path: impl AsRef<Path>) -> OverlayResult<SampleSequence> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path)
        .map_err(|e| OverlayError::malformed(format!("read '{}': {e}", path.display())))?;
    parse_tcx_str(&xml)
}

/// Extract every `Trackpoint` of a TCX document, in document order.
///
/// Trackpoints without a `Time` are dropped. Missing heart rate or speed leaves the attribute
/// unset; a field that is present but unparseable fails the whole document.
pub fn parse_tcx_str(xml: &str) -> OverlayResult<SampleSequence> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| OverlayError::malformed(format!("invalid xml: {e}")))?;

    let mut samples = Vec::new();
    let mut trackpoints = 0usize;
    for tp in doc
        .descendants()
        .filter(|n| n.has_tag_name((TCX_NS, "Trackpoint")))
    {
        let ordinal = trackpoints;
        trackpoints += 1;
        match read_trackpoint(tp, ordinal)? {
            Some(sample) => samples.push(sample),
            None => tracing::debug!(ordinal, "dropping trackpoint without Time"),
        }
    }

    tracing::info!(trackpoints, samples = samples.len(), "extracted trackpoints");
    Ok(SampleSequence::new(samples))
}

fn read_trackpoint(tp: Node<'_, '_>, ordinal: usize) -> OverlayResult<Option<Sample>> {
    let time = child(tp, TCX_NS, "Time")
        .map(|n| parse_field(n, ordinal, "Time", parse_timestamp))
        .transpose()?;

    let heart_rate = child(tp, TCX_NS, "HeartRateBpm")
        .and_then(|hr| child(hr, TCX_NS, "Value"))
        .map(|n| parse_field(n, ordinal, "HeartRateBpm/Value", |s| s.parse::<u32>().ok()))
        .transpose()?;

    let speed = speed_node(tp)
        .map(|n| parse_field(n, ordinal, "Extensions/TPX/Speed", parse_speed))
        .transpose()?;

    Ok(time.map(|timestamp| Sample {
        timestamp,
        heart_rate,
        speed,
    }))
}

// `Extensions` may sit at any depth below the trackpoint; `TPX/Speed` are direct children.
fn speed_node<'a, 'input>(tp: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    tp.descendants()
        .filter(|n| n.has_tag_name((TCX_NS, "Extensions")))
        .flat_map(|ext| ext.children())
        .filter(|n| n.has_tag_name((ACTIVITY_EXT_NS, "TPX")))
        .flat_map(|tpx| tpx.children())
        .find(|n| n.has_tag_name((ACTIVITY_EXT_NS, "Speed")))
}

fn child<'a, 'input>(node: Node<'a, 'input>, ns: &str, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name((ns, name)))
}

fn parse_field<T>(
    node: Node<'_, '_>,
    ordinal: usize,
    field: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> OverlayResult<T> {
    let text = node.text().unwrap_or("").trim();
    parse(text).ok_or_else(|| {
        OverlayError::malformed(format!(
            "trackpoint {ordinal}: invalid {field} value '{text}'"
        ))
    })
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc)))
        .ok()
}

fn parse_speed(s: &str) -> Option<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/activity/tcx.rs"]
mod tests;
