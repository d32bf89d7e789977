use super::*;

#[test]
fn frame_rate_zero_is_disabled() {
    assert!(FrameRate(0).is_disabled());
    assert!(!FrameRate(2).is_disabled());
    assert_eq!(FrameRate(0).frames_for_secs(3600), 0);
    assert_eq!(FrameRate(2).frames_for_secs(10), 20);
}

#[test]
fn frames_for_secs_saturates() {
    assert_eq!(FrameRate(u32::MAX).frames_for_secs(u64::MAX), u64::MAX);
}

#[test]
fn stream_names_match_output_layout() {
    assert_eq!(StreamKind::Speed.name(), "speed");
    assert_eq!(StreamKind::HeartRate.name(), "heart_rate");
    assert_eq!(
        StreamKind::HeartRate.frame_file_name(FrameIndex(42)),
        "heart_rate.42.png"
    );
    assert_eq!(StreamKind::Speed.to_string(), "speed");
}

#[test]
fn frame_rate_serializes_as_plain_integer() {
    let s = serde_json::to_string(&FrameRate(3)).unwrap();
    assert_eq!(s, "3");
    let r: FrameRate = serde_json::from_str("5").unwrap();
    assert_eq!(r, FrameRate(5));
}
