//! Pointer input recognition: raw pointer events in, gesture events out.

use crate::config::EditorConfig;
use crate::gesture::GestureEvent;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// The platform took the pointer away (e.g. a system gesture).
    Cancel,
    /// Incremental magnification, as reported by trackpads (0.1 = +10%).
    Pinch { delta: f64 },
    PinchEnd,
}

/// Tracks pointer state across events and turns it into [`GestureEvent`]s.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    drag_threshold: f64,
    double_tap_ms: u128,
    double_tap_distance: f64,
    /// Where the current press started.
    press_start: Option<Point>,
    /// Whether the current press has turned into a drag.
    dragging: bool,
    /// Latest drag translation.
    translation: Vec2,
    /// Accumulated pinch scale, while a pinch is live.
    pinch_scale: Option<f64>,
    /// Last tap, for double-tap detection.
    last_tap: Option<(Instant, Point)>,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl GestureRecognizer {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            drag_threshold: config.drag_threshold,
            double_tap_ms: u128::from(config.double_tap_ms),
            double_tap_distance: config.double_tap_distance,
            press_start: None,
            dragging: false,
            translation: Vec2::ZERO,
            pinch_scale: None,
            last_tap: None,
        }
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Vec<GestureEvent> {
        self.handle_pointer_event_at(event, Instant::now())
    }

    /// Process a pointer event that happened at `now`.
    pub fn handle_pointer_event_at(
        &mut self,
        event: PointerEvent,
        now: Instant,
    ) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        match event {
            PointerEvent::Down { position } => {
                if self.pinch_scale.is_none() {
                    self.press_start = Some(position);
                    self.dragging = false;
                    self.translation = Vec2::ZERO;
                }
            }
            PointerEvent::Move { position } => {
                if let Some(start) = self.press_start {
                    let translation = position - start;
                    if !self.dragging && translation.hypot() >= self.drag_threshold {
                        self.dragging = true;
                    }
                    if self.dragging {
                        self.translation = translation;
                        out.push(GestureEvent::DragChanged { translation });
                    }
                }
            }
            PointerEvent::Up { position } => {
                if let Some(start) = self.press_start.take() {
                    if self.dragging {
                        self.dragging = false;
                        self.last_tap = None;
                        out.push(GestureEvent::DragEnded {
                            translation: position - start,
                        });
                    } else {
                        out.push(self.tap(position, now));
                    }
                }
            }
            PointerEvent::Cancel => {
                if self.dragging || self.pinch_scale.is_some() {
                    out.push(GestureEvent::Cancelled);
                }
                self.reset();
            }
            PointerEvent::Pinch { delta } => {
                if self.dragging {
                    // A pinch takes over from a drag in progress.
                    out.push(GestureEvent::Cancelled);
                }
                self.press_start = None;
                self.dragging = false;
                let scale = self.pinch_scale.unwrap_or(1.0) * (1.0 + delta);
                if scale > 0.0 && scale.is_finite() {
                    self.pinch_scale = Some(scale);
                    out.push(GestureEvent::PinchChanged { scale });
                }
            }
            PointerEvent::PinchEnd => {
                if let Some(scale) = self.pinch_scale.take() {
                    out.push(GestureEvent::PinchEnded { scale });
                }
            }
        }
        out
    }

    fn tap(&mut self, position: Point, now: Instant) -> GestureEvent {
        if let Some((time, last)) = self.last_tap {
            let elapsed = now.saturating_duration_since(time).as_millis();
            let distance = (position - last).hypot();
            if elapsed < self.double_tap_ms && distance < self.double_tap_distance {
                // Reset to prevent a triple tap reading as another double tap
                self.last_tap = None;
                return GestureEvent::DoubleTap { position };
            }
        }
        self.last_tap = Some((now, position));
        GestureEvent::Tap { position }
    }

    /// Whether a drag or pinch is in progress.
    pub fn is_active(&self) -> bool {
        self.dragging || self.pinch_scale.is_some()
    }

    /// Latest translation of the live drag.
    pub fn drag_translation(&self) -> Option<Vec2> {
        self.dragging.then_some(self.translation)
    }

    fn reset(&mut self) {
        self.press_start = None;
        self.dragging = false;
        self.translation = Vec2::ZERO;
        self.pinch_scale = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
        }
    }

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_tap() {
        let mut input = GestureRecognizer::default();
        assert!(input.handle_pointer_event(down(10.0, 10.0)).is_empty());
        assert!(input.handle_pointer_event(mv(11.0, 10.0)).is_empty());
        let events = input.handle_pointer_event(up(11.0, 10.0));
        assert_eq!(
            events,
            vec![GestureEvent::Tap {
                position: Point::new(11.0, 10.0)
            }]
        );
    }

    #[test]
    fn test_drag_tracking() {
        let mut input = GestureRecognizer::default();
        input.handle_pointer_event(down(100.0, 100.0));
        let events = input.handle_pointer_event(mv(150.0, 120.0));
        assert_eq!(
            events,
            vec![GestureEvent::DragChanged {
                translation: Vec2::new(50.0, 20.0)
            }]
        );
        assert!(input.is_active());
        assert_eq!(input.drag_translation(), Some(Vec2::new(50.0, 20.0)));

        let events = input.handle_pointer_event(up(160.0, 120.0));
        assert_eq!(
            events,
            vec![GestureEvent::DragEnded {
                translation: Vec2::new(60.0, 20.0)
            }]
        );
        assert!(!input.is_active());
    }

    #[test]
    fn test_double_tap_detection() {
        let mut input = GestureRecognizer::default();
        let t0 = Instant::now();
        input.handle_pointer_event_at(down(100.0, 100.0), t0);
        let first = input.handle_pointer_event_at(up(100.0, 100.0), t0);
        assert!(matches!(first[0], GestureEvent::Tap { .. }));

        let t1 = t0 + Duration::from_millis(200);
        input.handle_pointer_event_at(down(101.0, 100.0), t1);
        let second = input.handle_pointer_event_at(up(101.0, 100.0), t1);
        assert_eq!(
            second,
            vec![GestureEvent::DoubleTap {
                position: Point::new(101.0, 100.0)
            }]
        );

        // A third tap starts over.
        let t2 = t1 + Duration::from_millis(100);
        input.handle_pointer_event_at(down(101.0, 100.0), t2);
        let third = input.handle_pointer_event_at(up(101.0, 100.0), t2);
        assert!(matches!(third[0], GestureEvent::Tap { .. }));
    }

    #[test]
    fn test_double_tap_too_slow_or_far() {
        let mut input = GestureRecognizer::default();
        let t0 = Instant::now();
        input.handle_pointer_event_at(down(100.0, 100.0), t0);
        input.handle_pointer_event_at(up(100.0, 100.0), t0);

        let late = t0 + Duration::from_millis(800);
        input.handle_pointer_event_at(down(100.0, 100.0), late);
        let events = input.handle_pointer_event_at(up(100.0, 100.0), late);
        assert!(matches!(events[0], GestureEvent::Tap { .. }));

        let soon = late + Duration::from_millis(50);
        input.handle_pointer_event_at(down(200.0, 200.0), soon);
        let events = input.handle_pointer_event_at(up(200.0, 200.0), soon);
        assert!(matches!(events[0], GestureEvent::Tap { .. }));
    }

    #[test]
    fn test_pinch_accumulates() {
        let mut input = GestureRecognizer::default();
        let events = input.handle_pointer_event(PointerEvent::Pinch { delta: 0.5 });
        assert_eq!(events, vec![GestureEvent::PinchChanged { scale: 1.5 }]);
        let events = input.handle_pointer_event(PointerEvent::Pinch { delta: 1.0 });
        assert_eq!(events, vec![GestureEvent::PinchChanged { scale: 3.0 }]);
        let events = input.handle_pointer_event(PointerEvent::PinchEnd);
        assert_eq!(events, vec![GestureEvent::PinchEnded { scale: 3.0 }]);
        assert!(input.handle_pointer_event(PointerEvent::PinchEnd).is_empty());
    }

    #[test]
    fn test_pinch_interrupts_drag() {
        let mut input = GestureRecognizer::default();
        input.handle_pointer_event(down(0.0, 0.0));
        input.handle_pointer_event(mv(20.0, 0.0));
        let events = input.handle_pointer_event(PointerEvent::Pinch { delta: 0.25 });
        assert_eq!(
            events,
            vec![
                GestureEvent::Cancelled,
                GestureEvent::PinchChanged { scale: 1.25 }
            ]
        );
        // The release of the old press no longer produces anything.
        assert!(input.handle_pointer_event(up(20.0, 0.0)).is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut input = GestureRecognizer::default();
        input.handle_pointer_event(down(0.0, 0.0));
        input.handle_pointer_event(mv(20.0, 0.0));
        assert_eq!(
            input.handle_pointer_event(PointerEvent::Cancel),
            vec![GestureEvent::Cancelled]
        );
        assert!(input.handle_pointer_event(up(20.0, 0.0)).is_empty());

        // Cancelling an idle recognizer emits nothing.
        assert!(input.handle_pointer_event(PointerEvent::Cancel).is_empty());
    }
}
