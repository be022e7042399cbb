use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SplashError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SplashError::svg("x").to_string().contains("svg error:"));
    assert!(
        SplashError::config("x")
            .to_string()
            .contains("config error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SplashError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
