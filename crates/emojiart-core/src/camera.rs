//! Camera module for pan/zoom transforms.
//!
//! Document space has its origin at the center of the viewport at zero pan.
//! The free functions here are pure; [`Camera`] layers the steady/transient
//! gesture model on top of them.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Effective view transform for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Document-to-screen scale. Always > 0.
    pub zoom_scale: f64,
    /// Screen-space translation applied after centering.
    pub pan_offset: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom_scale: 1.0,
            pan_offset: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    /// Affine mapping document coordinates to screen coordinates.
    pub fn to_affine(&self, viewport: Size) -> Affine {
        Affine::translate(viewport_center(viewport) + self.pan_offset)
            * Affine::scale(self.zoom_scale)
    }
}

fn viewport_center(viewport: Size) -> Vec2 {
    Vec2::new(viewport.width / 2.0, viewport.height / 2.0)
}

/// Convert a document point to screen coordinates.
pub fn to_screen(point: Point, transform: &ViewTransform, viewport: Size) -> Point {
    let scaled = point.to_vec2() * transform.zoom_scale;
    (scaled + viewport_center(viewport) + transform.pan_offset).to_point()
}

/// Convert a screen point to document coordinates. Inverse of [`to_screen`].
pub fn to_document(point: Point, transform: &ViewTransform, viewport: Size) -> Point {
    let centered = point.to_vec2() - viewport_center(viewport) - transform.pan_offset;
    (centered / transform.zoom_scale).to_point()
}

/// Transform that shows the whole image inside the viewport, unpanned.
///
/// Returns `None` if either image dimension is not positive.
pub fn fit_to_viewport(image: Size, viewport: Size) -> Option<ViewTransform> {
    if !(image.width > 0.0 && image.height > 0.0) {
        return None;
    }
    let h_zoom = viewport.width / image.width;
    let v_zoom = viewport.height / image.height;
    let zoom_scale = h_zoom.min(v_zoom);
    if !(zoom_scale > 0.0 && zoom_scale.is_finite()) {
        return None;
    }
    Some(ViewTransform {
        zoom_scale,
        pan_offset: Vec2::ZERO,
    })
}

/// Camera holding the committed view state plus any in-gesture delta.
///
/// Pan is stored in document units and multiplied by the effective zoom on
/// the way out, so zooming keeps the same document point under the center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Committed zoom.
    pub zoom: f64,
    /// Committed pan, in document units.
    pub pan: Vec2,
    #[serde(skip, default = "unit_scale")]
    gesture_zoom: f64,
    #[serde(skip)]
    gesture_pan: Vec2,
}

fn unit_scale() -> f64 {
    1.0
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            gesture_zoom: 1.0,
            gesture_pan: Vec2::ZERO,
        }
    }
}

impl Camera {
    /// Create a camera at zoom 1.0 with no pan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective zoom: committed times in-gesture scale.
    pub fn zoom_scale(&self) -> f64 {
        self.zoom * self.gesture_zoom
    }

    /// The view transform to render and hit-test with.
    pub fn transform(&self) -> ViewTransform {
        let zoom_scale = self.zoom_scale();
        ViewTransform {
            zoom_scale,
            pan_offset: (self.pan + self.gesture_pan) * zoom_scale,
        }
    }

    /// Convert a screen point to document coordinates.
    pub fn screen_to_document(&self, point: Point, viewport: Size) -> Point {
        to_document(point, &self.transform(), viewport)
    }

    /// Convert a document point to screen coordinates.
    pub fn document_to_screen(&self, point: Point, viewport: Size) -> Point {
        to_screen(point, &self.transform(), viewport)
    }

    /// Set the live pinch scale. Ignores non-positive or non-finite values.
    pub fn update_zoom(&mut self, scale: f64) {
        if scale > 0.0 && scale.is_finite() {
            self.gesture_zoom = scale;
        }
    }

    /// Fold a finished pinch into the committed zoom.
    pub fn commit_zoom(&mut self, scale: f64) {
        if scale > 0.0 && scale.is_finite() {
            self.zoom *= scale;
        }
        self.gesture_zoom = 1.0;
    }

    /// Set the live drag translation (screen pixels). Pans by
    /// `translation / zoom` so the canvas tracks the finger at any zoom.
    pub fn update_pan(&mut self, translation: Vec2) {
        self.gesture_pan = translation / self.zoom_scale();
    }

    /// Fold a finished drag into the committed pan.
    pub fn commit_pan(&mut self, translation: Vec2) {
        self.pan += translation / self.zoom_scale();
        self.gesture_pan = Vec2::ZERO;
    }

    /// Drop any in-gesture delta, leaving committed state untouched.
    pub fn cancel_gesture(&mut self) {
        self.gesture_zoom = 1.0;
        self.gesture_pan = Vec2::ZERO;
    }

    /// Whether a gesture delta is currently applied.
    pub fn in_gesture(&self) -> bool {
        self.gesture_zoom != 1.0 || self.gesture_pan != Vec2::ZERO
    }

    /// Replace the committed state so the image fills the viewport.
    ///
    /// Returns false, leaving the camera unchanged, for degenerate sizes.
    pub fn fit(&mut self, image: Size, viewport: Size) -> bool {
        match fit_to_viewport(image, viewport) {
            Some(fitted) => {
                self.zoom = fitted.zoom_scale;
                self.pan = Vec2::ZERO;
                self.cancel_gesture();
                true
            }
            None => false,
        }
    }

    /// Reset camera to zoom 1.0 and no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
