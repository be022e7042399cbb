/// Crate-wide result alias.
pub type SplashResult<T> = Result<T, SplashError>;

#[derive(thiserror::Error, Debug)]
/// Errors raised at the crate's outer surfaces (asset parsing, configuration).
///
/// The animation core itself never fails: missing geometry, empty zones, a missing dock
/// target and early teardown all degrade to "skip" or "fade out".
pub enum SplashError {
    /// Invalid user-provided values.
    #[error("validation error: {0}")]
    Validation(String),

    /// The illustration could not be parsed.
    #[error("svg error: {0}")]
    Svg(String),

    /// The configuration document could not be read or decoded.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SplashError {
    /// Build a [`SplashError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SplashError::Svg`] value.
    pub fn svg(msg: impl Into<String>) -> Self {
        Self::Svg(msg.into())
    }

    /// Build a [`SplashError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
