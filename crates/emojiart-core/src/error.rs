//! Error types for document and gesture operations.

use crate::emoji::EmojiId;
use thiserror::Error;

/// Errors raised by document mutations and drop resolution.
///
/// None of these escape a gesture: the canvas logs them and ends the
/// interaction without effect.
#[derive(Debug, Error)]
pub enum EmojiArtError {
    #[error("Unknown emoji: {0}")]
    UnknownEmoji(EmojiId),
    #[error("Emoji text is empty")]
    EmptyEmojiText,
    #[error("Invalid font size: {0}")]
    InvalidFontSize(f64),
    #[error("Invalid scale factor: {0}")]
    InvalidScale(f64),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported drop payload: {0}")]
    UnsupportedPayload(String),
    #[error("Image load failed: {0}")]
    ImageLoad(String),
    #[error("Degenerate image size: {width}x{height}")]
    DegenerateImage { width: f64, height: f64 },
    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for EmojiArt operations.
pub type Result<T> = std::result::Result<T, EmojiArtError>;
