//! EmojiArt Core Library
//!
//! Platform-agnostic core of the EmojiArt canvas editor: coordinate
//! transforms, selection state, gesture routing, drop handling and
//! drag-to-trash detection. Rendering and windowing live in the host.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod document;
pub mod drop;
pub mod emoji;
pub mod error;
pub mod gesture;
pub mod input;
pub mod trash;

pub use camera::{Camera, ViewTransform, fit_to_viewport, to_document, to_screen};
pub use canvas::{Canvas, DisplayItem};
pub use config::{DEFAULT_EMOJI_SIZE, DEFAULT_PALETTE, EditorConfig};
pub use document::{BackgroundImage, EmojiArtDocument};
pub use drop::{DropAction, DropPayload, parse_image_url, resolve_drop};
pub use emoji::{Emoji, EmojiId};
pub use error::{EmojiArtError, Result};
pub use gesture::{GestureEvent, GestureKind, GestureSession};
pub use input::{GestureRecognizer, PointerEvent};
pub use trash::{TrashCanLayout, TrashDetector, TrashZone, TrashZoneState};
