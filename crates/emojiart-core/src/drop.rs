//! Drop payloads and their resolution into document mutations.

use crate::error::{EmojiArtError, Result};
use kurbo::Point;
use url::Url;

/// One item of an inbound drag-and-drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPayload {
    /// Reference to an external image.
    ImageUrl(String),
    /// Plain text, normally a single emoji from the palette.
    Text(String),
    /// A kind the editor does not accept.
    Unsupported { kind: String },
}

impl DropPayload {
    /// Classify a payload by its platform type identifier.
    pub fn from_type_identifier(kind: &str, data: impl Into<String>) -> Self {
        match kind {
            "public.image" | "public.url" | "public.file-url" | "text/uri-list" => {
                Self::ImageUrl(data.into())
            }
            "public.text" | "public.plain-text" | "public.utf8-plain-text" | "text/plain" => {
                Self::Text(data.into())
            }
            other => Self::Unsupported {
                kind: other.to_string(),
            },
        }
    }
}

/// What a drop resolves to, before anything is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum DropAction {
    /// Replace the document background.
    SetBackground(Url),
    /// Create one emoji per entry at the drop location (document space).
    AddEmojis { texts: Vec<String>, at: Point },
}

/// Parse the URL carried by an image payload.
pub fn parse_image_url(raw: &str) -> Result<Url> {
    Ok(Url::parse(raw.trim())?)
}

/// Resolve payloads dropped at a document point.
///
/// The first image URL that parses wins. Otherwise every non-blank text
/// becomes an emoji. Anything else is rejected.
pub fn resolve_drop(payloads: &[DropPayload], at: Point) -> Result<DropAction> {
    for payload in payloads {
        if let DropPayload::ImageUrl(raw) = payload {
            match parse_image_url(raw) {
                Ok(url) => return Ok(DropAction::SetBackground(url)),
                Err(e) => log::warn!("Ignoring unresolvable image URL {:?}: {}", raw, e),
            }
        }
    }

    let texts: Vec<String> = payloads
        .iter()
        .filter_map(|p| match p {
            DropPayload::Text(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            _ => None,
        })
        .collect();
    if !texts.is_empty() {
        return Ok(DropAction::AddEmojis { texts, at });
    }

    let kinds: Vec<&str> = payloads
        .iter()
        .map(|p| match p {
            DropPayload::ImageUrl(_) => "image-url",
            DropPayload::Text(_) => "text",
            DropPayload::Unsupported { kind } => kind.as_str(),
        })
        .collect();
    Err(EmojiArtError::UnsupportedPayload(kinds.join(", ")))
}
