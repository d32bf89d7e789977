use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        OverlayError::malformed("x")
            .to_string()
            .contains("malformed document:")
    );
    assert!(
        OverlayError::invalid_config("x")
            .to_string()
            .contains("invalid configuration:")
    );
    assert!(
        OverlayError::render("x")
            .to_string()
            .contains("render error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = OverlayError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_context_converts_with_question_mark() {
    fn fails() -> OverlayResult<()> {
        use anyhow::Context as _;
        Err(std::io::Error::other("denied")).context("create 'speed'")?;
        Ok(())
    }

    let err = fails().unwrap_err();
    assert!(matches!(err, OverlayError::Other(_)));
    assert!(err.to_string().contains("create 'speed'"));
}
