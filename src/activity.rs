/// Samples and the ordered sequence extracted from one document.
pub mod sample;
/// Garmin Training Center (TCX v2) trackpoint extraction.
pub mod tcx;
