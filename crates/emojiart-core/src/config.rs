//! Editor configuration.

use crate::error::Result;
use crate::trash::{TrashCanLayout, TrashZone};
use serde::{Deserialize, Serialize};

/// Default palette offered to drag from.
pub const DEFAULT_PALETTE: &str = "⭐️⛈🍎🌏🥨⚾️";

/// Font size given to dropped emoji.
pub const DEFAULT_EMOJI_SIZE: f64 = 40.0;

/// Tunables for the editor core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Emoji shown in the palette strip.
    pub palette: String,
    /// Font size for emoji created by a drop.
    pub default_emoji_size: f64,
    /// Delete region in document space.
    pub trash_zone: TrashZone,
    /// Where the trash can is drawn (screen space).
    pub trash_can: TrashCanLayout,
    /// Maximum gap between taps of a double-tap.
    pub double_tap_ms: u64,
    /// Maximum distance between taps of a double-tap, in screen pixels.
    pub double_tap_distance: f64,
    /// Movement, in screen pixels, before a press becomes a drag.
    pub drag_threshold: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_string(),
            default_emoji_size: DEFAULT_EMOJI_SIZE,
            trash_zone: TrashZone::default(),
            trash_can: TrashCanLayout::default(),
            double_tap_ms: 500,
            double_tap_distance: 5.0,
            drag_threshold: 3.0,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Split the palette into individual emoji.
    ///
    /// Variation selectors, skin-tone modifiers and zero-width joiners stay
    /// attached to the emoji they modify.
    pub fn palette_items(&self) -> Vec<String> {
        let mut items: Vec<String> = Vec::new();
        let mut join_next = false;
        for c in self.palette.chars() {
            if c.is_whitespace() {
                join_next = false;
                continue;
            }
            let modifier = matches!(c, '\u{FE0E}' | '\u{FE0F}' | '\u{1F3FB}'..='\u{1F3FF}');
            let zwj = c == '\u{200D}';
            match items.last_mut() {
                Some(last) if modifier || zwj || join_next => last.push(c),
                _ => items.push(c.to_string()),
            }
            join_next = zwj;
        }
        items
    }
}
