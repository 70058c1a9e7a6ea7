//! Drag-to-trash detection.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Delete region in document space: horizontally centered on the origin,
/// open towards the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrashZone {
    /// Half the horizontal extent of the zone.
    pub half_width: f64,
    /// Document y at which the zone begins.
    pub top: f64,
}

impl Default for TrashZone {
    fn default() -> Self {
        Self {
            half_width: 280.0,
            top: 350.0,
        }
    }
}

impl TrashZone {
    /// Check whether a document point lies inside the zone (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x.abs() <= self.half_width && point.y >= self.top
    }
}

/// Placement of the trash can icon in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrashCanLayout {
    /// Screen y of the icon center.
    pub y: f64,
    /// Icon edge length in pixels.
    pub size: f64,
}

impl Default for TrashCanLayout {
    fn default() -> Self {
        Self { y: 850.0, size: 80.0 }
    }
}

impl TrashCanLayout {
    /// Icon center for the given viewport.
    pub fn screen_position(&self, viewport: Size) -> Point {
        Point::new(viewport.width / 2.0, self.y)
    }
}

/// Visual state of the trash can, derived on every selection-drag tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrashZoneState {
    /// A release now would delete the selection.
    pub armed: bool,
    /// Icon opacity: visible only while a selection drag is live.
    pub opacity: f64,
}

impl TrashZoneState {
    /// The icon spins while armed.
    pub fn spinning(&self) -> bool {
        self.armed
    }
}

/// Tracks trash arming across a selection drag.
#[derive(Debug, Clone, Default)]
pub struct TrashDetector {
    zone: TrashZone,
    state: TrashZoneState,
    confirmations: u64,
}

impl TrashDetector {
    pub fn new(zone: TrashZone) -> Self {
        Self {
            zone,
            state: TrashZoneState::default(),
            confirmations: 0,
        }
    }

    /// Evaluate a single document position against the zone.
    pub fn evaluate(&self, position: Point) -> bool {
        self.zone.contains(position)
    }

    /// Re-derive state from the live positions of the dragged emoji, given
    /// in selection order.
    ///
    /// The most recently selected emoji decides: armed when the last
    /// position is inside the zone. Returns the armed flag.
    pub fn update<I>(&mut self, positions: I) -> bool
    where
        I: IntoIterator<Item = Point>,
    {
        let armed = positions
            .into_iter()
            .last()
            .is_some_and(|p| self.zone.contains(p));
        if armed != self.state.armed {
            log::debug!("Trash {}", if armed { "armed" } else { "disarmed" });
        }
        self.state = TrashZoneState { armed, opacity: 1.0 };
        armed
    }

    /// End the drag. Returns true, and records one confirmation, if the
    /// selection should be deleted.
    pub fn finish(&mut self) -> bool {
        let delete = self.state.armed;
        if delete {
            self.confirmations += 1;
        }
        self.reset();
        delete
    }

    /// Return to the inert state without confirming anything.
    pub fn reset(&mut self) {
        self.state = TrashZoneState::default();
    }

    pub fn state(&self) -> TrashZoneState {
        self.state
    }

    pub fn zone(&self) -> TrashZone {
        self.zone
    }

    /// Number of drag-to-trash deletions confirmed so far.
    pub fn confirmations(&self) -> u64 {
        self.confirmations
    }
}
