//! Gesture events and the live gesture session.

use crate::emoji::EmojiId;
use kurbo::{Point, Vec2};

/// A recognized gesture event, in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    /// Single tap at a screen point.
    Tap { position: Point },
    /// Second tap of a double-tap, at a screen point.
    DoubleTap { position: Point },
    /// One-finger drag in progress; translation is cumulative from the start.
    DragChanged { translation: Vec2 },
    /// One-finger drag finished with its final translation.
    DragEnded { translation: Vec2 },
    /// Pinch in progress; scale is cumulative from the start.
    PinchChanged { scale: f64 },
    /// Pinch finished with its final scale.
    PinchEnded { scale: f64 },
    /// The platform interrupted the current gesture.
    Cancelled,
}

/// Broad gesture family, used to match updates against the live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Pinch,
}

/// The gesture currently in progress.
///
/// The variant is chosen when the gesture starts, from the selection at that
/// moment, and does not change until it ends or is cancelled.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureSession {
    #[default]
    Idle,
    /// Drag with nothing selected: pans the canvas.
    Pan { translation: Vec2 },
    /// Drag with a selection: moves the selected emoji.
    MoveSelection { ids: Vec<EmojiId>, translation: Vec2 },
    /// Pinch with nothing selected: zooms the canvas.
    ScaleCanvas { scale: f64 },
    /// Pinch with a selection: resizes the selected emoji.
    ScaleSelection { ids: Vec<EmojiId>, scale: f64 },
}

impl GestureSession {
    /// Pick the session for a new gesture.
    pub fn begin(kind: GestureKind, selection: Vec<EmojiId>) -> Self {
        match (kind, selection.is_empty()) {
            (GestureKind::Drag, true) => Self::Pan {
                translation: Vec2::ZERO,
            },
            (GestureKind::Drag, false) => Self::MoveSelection {
                ids: selection,
                translation: Vec2::ZERO,
            },
            (GestureKind::Pinch, true) => Self::ScaleCanvas { scale: 1.0 },
            (GestureKind::Pinch, false) => Self::ScaleSelection {
                ids: selection,
                scale: 1.0,
            },
        }
    }

    pub fn kind(&self) -> Option<GestureKind> {
        match self {
            Self::Idle => None,
            Self::Pan { .. } | Self::MoveSelection { .. } => Some(GestureKind::Drag),
            Self::ScaleCanvas { .. } | Self::ScaleSelection { .. } => Some(GestureKind::Pinch),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Live translation applied to `id`, if it is being moved.
    pub fn moving_offset(&self, id: EmojiId) -> Option<Vec2> {
        match self {
            Self::MoveSelection { ids, translation } if ids.contains(&id) => Some(*translation),
            _ => None,
        }
    }

    /// Live scale applied to `id`, if it is being resized.
    pub fn scaling_factor(&self, id: EmojiId) -> Option<f64> {
        match self {
            Self::ScaleSelection { ids, scale } if ids.contains(&id) => Some(*scale),
            _ => None,
        }
    }
}
