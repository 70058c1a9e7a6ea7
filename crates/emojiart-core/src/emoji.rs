//! Emoji stickers placed on the canvas.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of an emoji. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmojiId(Uuid);

impl EmojiId {
    /// Generate a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EmojiId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EmojiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An emoji sticker in document space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emoji {
    pub(crate) id: EmojiId,
    /// The grapheme to draw.
    pub text: String,
    /// Center of the sticker in document coordinates.
    pub location: Point,
    /// Font size in document units (before canvas zoom).
    pub font_size: f64,
    /// Whether the sticker is part of the current selection.
    pub is_selected: bool,
}

impl Emoji {
    /// Create a new unselected emoji.
    pub fn new(text: impl Into<String>, location: Point, font_size: f64) -> Self {
        Self {
            id: EmojiId::new(),
            text: text.into(),
            location,
            font_size,
            is_selected: false,
        }
    }

    pub fn id(&self) -> EmojiId {
        self.id
    }

    /// Translate the sticker.
    pub fn translate(&mut self, delta: Vec2) {
        self.location += delta;
    }

    /// Multiply the font size by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.font_size *= factor;
    }
}
