use chrono::{DateTime, Duration, TimeZone, Utc};

use super::*;
use crate::activity::sample::Sample;
use crate::foundation::core::{FrameIndex, FrameRate};
use crate::output::sink::InMemorySink;
use crate::render::FrameRGBA;

/// Encodes the text length into the width so tests can tell frames apart.
#[derive(Default)]
struct RecordingRenderer {
    texts: Vec<String>,
}

impl TextRenderer for RecordingRenderer {
    fn render_text(&mut self, text: &str) -> OverlayResult<FrameRGBA> {
        self.texts.push(text.to_string());
        let width = text.len() as u32;
        Ok(FrameRGBA {
            width,
            height: 1,
            data: vec![255; (width * 4) as usize],
            premultiplied: true,
        })
    }
}

fn t(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 5, 1, 10, 0, 0).unwrap() + Duration::seconds(secs)
}

#[test]
fn progress_is_capped_and_handles_zero_total() {
    assert_eq!(progress_percent(0, 0), 100);
    assert_eq!(progress_percent(5, 10), 50);
    assert_eq!(progress_percent(1, 3), 33);
    assert_eq!(progress_percent(20, 10), 100);
}

#[test]
fn run_interleaves_streams_per_segment() {
    let seq = SampleSequence::new(vec![
        Sample::at(t(0)).with_speed(1.0).with_heart_rate(100),
        Sample::at(t(2)).with_speed(1.0).with_heart_rate(100),
        Sample::at(t(3)).with_speed(1.0).with_heart_rate(100),
    ]);
    let config = OverlayConfig {
        speed_unit: crate::SpeedUnit::Ms,
        speed_rate: FrameRate(1),
        heart_rate_rate: FrameRate(1),
        font_size: 10,
    };

    let mut renderer = RecordingRenderer::default();
    let mut sink = InMemorySink::new();
    let mut progress = Vec::new();
    let stats = Synthesizer::new(config)
        .unwrap()
        .run(&seq, &mut renderer, &mut sink, |p| progress.push(p))
        .unwrap();

    let order: Vec<(StreamKind, u64)> = sink
        .frames()
        .iter()
        .map(|(s, idx, _)| (*s, idx.0))
        .collect();
    assert_eq!(
        order,
        vec![
            (StreamKind::Speed, 0),
            (StreamKind::Speed, 1),
            (StreamKind::HeartRate, 0),
            (StreamKind::HeartRate, 1),
            (StreamKind::Speed, 2),
            (StreamKind::HeartRate, 2),
        ]
    );
    assert_eq!(renderer.texts, vec!["1.0", "1.0", "100", "100", "1.0", "100"]);
    assert_eq!(progress, vec![0, 66, 100]);
    assert_eq!(stats.segments, 2);
    assert_eq!(stats.frames(StreamKind::Speed), 3);
    assert_eq!(stats.frames(StreamKind::HeartRate), 3);
    assert_eq!(stats.placeholder_frames, 0);
    assert!(sink.is_ended());
    assert_eq!(sink.streams(), &StreamKind::ALL);
}

#[test]
fn placeholders_are_counted_and_rendered_blank() {
    let seq = SampleSequence::new(vec![
        Sample::at(t(0)).with_heart_rate(80),
        Sample::at(t(4)).with_heart_rate(84).with_speed(2.0),
    ]);
    let mut renderer = RecordingRenderer::default();
    let mut sink = InMemorySink::new();
    let stats = Synthesizer::new(OverlayConfig::default())
        .unwrap()
        .run(&seq, &mut renderer, &mut sink, |_| {})
        .unwrap();

    assert_eq!(stats.speed_frames, 8);
    assert_eq!(stats.heart_rate_frames, 4);
    assert_eq!(stats.placeholder_frames, 8);

    let speed: Vec<_> = sink.stream_frames(StreamKind::Speed).collect();
    assert!(speed.iter().all(|(_, f)| f.width == 1));
    assert_eq!(speed.last().unwrap().0, FrameIndex(7));
}

#[test]
fn fewer_than_two_samples_still_begins_and_ends_sink() {
    let seq = SampleSequence::new(vec![Sample::at(t(0)).with_speed(3.0)]);
    let mut renderer = RecordingRenderer::default();
    let mut sink = InMemorySink::new();
    let stats = Synthesizer::new(OverlayConfig::default())
        .unwrap()
        .run(&seq, &mut renderer, &mut sink, |_| {})
        .unwrap();

    assert_eq!(stats, SynthStats::default());
    assert!(sink.frames().is_empty());
    assert!(sink.is_ended());
    assert!(renderer.texts.is_empty());
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let config = OverlayConfig {
        font_size: 0,
        ..OverlayConfig::default()
    };
    assert!(Synthesizer::new(config).is_err());
}
