/// Crate-wide result alias.
pub type MorphResult<T> = Result<T, MorphError>;

/// Errors produced while building shape sets, driving tweens, rendering or encoding.
#[derive(thiserror::Error, Debug)]
pub enum MorphError {
    /// Malformed input: mismatched shape/color lists, unparseable outlines, bad sizes.
    #[error("validation error: {0}")]
    Validation(String),

    /// Tween or easing misuse (non-finite durations and the like).
    #[error("animation error: {0}")]
    Animation(String),

    /// Rasterization failures.
    #[error("render error: {0}")]
    Render(String),

    /// Video encoding failures (missing `ffmpeg`, broken pipe, non-zero exit).
    #[error("encode error: {0}")]
    Encode(String),

    /// JSON (de)serialization failures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphError {
    /// Build a [`MorphError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MorphError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`MorphError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MorphError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`MorphError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MorphError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}
