//! Canvas state and the gesture reducer.

use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::document::EmojiArtDocument;
use crate::drop::{DropAction, DropPayload, resolve_drop};
use crate::emoji::{Emoji, EmojiId};
use crate::error::EmojiArtError;
use crate::gesture::{GestureEvent, GestureKind, GestureSession};
use crate::trash::{TrashDetector, TrashZoneState};
use kurbo::{Affine, Point, Rect, Size, Vec2};

/// An emoji as it should be drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem<'a> {
    pub id: EmojiId,
    pub text: &'a str,
    /// Center in screen coordinates.
    pub position: Point,
    /// Font size in screen pixels.
    pub size: f64,
    pub selected: bool,
}

/// The editor: document, view transform, and the gesture in progress.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being edited.
    pub document: EmojiArtDocument,
    /// Camera for view transform.
    pub camera: Camera,
    /// Viewport size.
    pub viewport_size: Size,
    /// Editor tunables.
    pub config: EditorConfig,
    trash: TrashDetector,
    session: GestureSession,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create a canvas with custom settings.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            document: EmojiArtDocument::new(),
            camera: Camera::new(),
            viewport_size: Size::new(800.0, 600.0),
            trash: TrashDetector::new(config.trash_zone),
            config,
            session: GestureSession::Idle,
        }
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: EmojiArtDocument) -> Self {
        Self {
            document,
            ..Self::new()
        }
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
    }

    /// Called when the view appears: drops any selection left over from a
    /// previous session so gestures start out routed to the canvas.
    pub fn on_appear(&mut self) {
        let cleared = self.document.deselect_all();
        if cleared > 0 {
            log::debug!("Cleared {} stale selections on appear", cleared);
        }
    }

    /// The gesture currently in progress.
    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    /// Trash can state for rendering.
    pub fn trash_state(&self) -> TrashZoneState {
        self.trash.state()
    }

    /// Number of drag-to-trash deletions so far.
    pub fn trash_confirmations(&self) -> u64 {
        self.trash.confirmations()
    }

    /// Feed one recognized gesture event into the canvas.
    pub fn handle_gesture(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Tap { position } => self.tap(position),
            GestureEvent::DoubleTap { position } => self.double_tap(position),
            GestureEvent::DragChanged { translation } => self.drag_changed(translation),
            GestureEvent::DragEnded { translation } => self.drag_ended(translation),
            GestureEvent::PinchChanged { scale } => self.pinch_changed(scale),
            GestureEvent::PinchEnded { scale } => self.pinch_ended(scale),
            GestureEvent::Cancelled => self.cancel_gesture(),
        }
    }

    /// Tap on a sticker toggles it; tap on empty canvas clears the selection.
    pub fn tap(&mut self, position: Point) {
        match self.emoji_at(position) {
            Some(id) => {
                if let Err(e) = self.document.toggle_selection(id) {
                    log::warn!("Tap on vanished emoji: {}", e);
                }
            }
            None => {
                self.document.deselect_all();
            }
        }
    }

    /// Double tap on empty canvas refits the background; on a sticker it is
    /// just another tap.
    pub fn double_tap(&mut self, position: Point) {
        if self.emoji_at(position).is_some() {
            self.tap(position);
        } else {
            self.zoom_to_fit();
        }
    }

    /// Fit the loaded background image to the viewport.
    pub fn zoom_to_fit(&mut self) {
        let Some(image) = self.document.background_image() else {
            log::debug!("Zoom to fit: no background image");
            return;
        };
        if !self.camera.fit(image.size, self.viewport_size) {
            let err = EmojiArtError::DegenerateImage {
                width: image.size.width,
                height: image.size.height,
            };
            log::warn!("Zoom to fit skipped: {}", err);
        }
    }

    /// Begin a session of `kind` if idle. Returns false if a different
    /// gesture is already live.
    fn enter(&mut self, kind: GestureKind) -> bool {
        match self.session.kind() {
            None => {
                self.session = GestureSession::begin(kind, self.document.selected_ids());
                log::debug!("Gesture started: {:?}", self.session);
                true
            }
            Some(live) if live == kind => true,
            Some(live) => {
                log::debug!("Ignoring {:?} event during {:?} gesture", kind, live);
                false
            }
        }
    }

    fn drag_changed(&mut self, translation: Vec2) {
        if !self.enter(GestureKind::Drag) {
            return;
        }
        match &mut self.session {
            GestureSession::Pan { translation: live } => {
                *live = translation;
                self.camera.update_pan(translation);
            }
            GestureSession::MoveSelection {
                ids,
                translation: live,
            } => {
                *live = translation;
                // Selection order: the last selected emoji decides arming.
                let positions: Vec<Point> = ids
                    .iter()
                    .filter_map(|id| self.document.emoji(*id))
                    .map(|e| e.location + translation)
                    .collect();
                self.trash.update(positions);
            }
            _ => {}
        }
    }

    fn drag_ended(&mut self, translation: Vec2) {
        if !self.enter(GestureKind::Drag) {
            return;
        }
        match std::mem::take(&mut self.session) {
            GestureSession::Pan { .. } => self.camera.commit_pan(translation),
            GestureSession::MoveSelection { ids, .. } => {
                // Raw screen translation, not divided by zoom.
                self.document.move_emojis(&ids, translation);
                let positions: Vec<Point> = ids
                    .iter()
                    .filter_map(|id| self.document.emoji(*id))
                    .map(|e| e.location)
                    .collect();
                self.trash.update(positions);
                if self.trash.finish() {
                    let removed = self.document.remove_emojis(&ids);
                    self.document.deselect_all();
                    log::info!("Trashed {} emoji", removed);
                }
            }
            other => self.session = other,
        }
    }

    fn pinch_changed(&mut self, scale: f64) {
        if !(scale > 0.0 && scale.is_finite()) {
            log::warn!("Ignoring invalid pinch scale {}", scale);
            return;
        }
        if !self.enter(GestureKind::Pinch) {
            return;
        }
        match &mut self.session {
            GestureSession::ScaleCanvas { scale: live } => {
                *live = scale;
                self.camera.update_zoom(scale);
            }
            GestureSession::ScaleSelection { scale: live, .. } => *live = scale,
            _ => {}
        }
    }

    fn pinch_ended(&mut self, scale: f64) {
        if !(scale > 0.0 && scale.is_finite()) {
            log::warn!("Pinch ended with invalid scale {}, cancelling", scale);
            if self.session.kind() == Some(GestureKind::Pinch) {
                self.cancel_gesture();
            }
            return;
        }
        if !self.enter(GestureKind::Pinch) {
            return;
        }
        match std::mem::take(&mut self.session) {
            GestureSession::ScaleCanvas { .. } => self.camera.commit_zoom(scale),
            GestureSession::ScaleSelection { ids, .. } => {
                for id in ids {
                    if let Err(e) = self.document.scale_emoji(id, scale) {
                        log::debug!("Skipping emoji during scale: {}", e);
                    }
                }
            }
            other => self.session = other,
        }
    }

    /// Drop any in-gesture delta; committed state is left untouched.
    pub fn cancel_gesture(&mut self) {
        if !self.session.is_idle() {
            log::debug!("Gesture cancelled: {:?}", self.session);
        }
        self.session = GestureSession::Idle;
        self.camera.cancel_gesture();
        self.trash.reset();
    }

    /// Handle payloads dropped at a screen point.
    ///
    /// Returns true if the drop was accepted. Nothing is mutated otherwise.
    pub fn handle_drop(&mut self, payloads: &[DropPayload], screen_point: Point) -> bool {
        let at = self
            .camera
            .screen_to_document(screen_point, self.viewport_size);
        match resolve_drop(payloads, at) {
            Ok(DropAction::SetBackground(url)) => {
                self.document.set_background_url(url);
                true
            }
            Ok(DropAction::AddEmojis { texts, at }) => {
                let size = self.config.default_emoji_size;
                let mut added = false;
                for text in &texts {
                    match self.document.add_emoji(text, at, size) {
                        Ok(_) => added = true,
                        Err(e) => log::warn!("Drop of {:?} rejected: {}", text, e),
                    }
                }
                added
            }
            Err(e) => {
                log::warn!("Drop rejected: {}", e);
                false
            }
        }
    }

    /// Topmost emoji under a screen point.
    pub fn emoji_at(&self, screen_point: Point) -> Option<EmojiId> {
        self.document
            .emojis()
            .rev()
            .find(|e| self.screen_bounds(e).contains(screen_point))
            .map(Emoji::id)
    }

    fn screen_bounds(&self, emoji: &Emoji) -> Rect {
        let size = self.live_font_size(emoji) * self.camera.zoom_scale();
        let center = self
            .camera
            .document_to_screen(self.live_location(emoji), self.viewport_size);
        Rect::from_center_size(center, (size, size))
    }

    fn live_location(&self, emoji: &Emoji) -> Point {
        emoji.location + self.session.moving_offset(emoji.id()).unwrap_or(Vec2::ZERO)
    }

    fn live_font_size(&self, emoji: &Emoji) -> f64 {
        emoji.font_size * self.session.scaling_factor(emoji.id()).unwrap_or(1.0)
    }

    /// Where an emoji is drawn, in screen coordinates.
    pub fn emoji_screen_position(&self, id: EmojiId) -> Option<Point> {
        let emoji = self.document.emoji(id)?;
        Some(
            self.camera
                .document_to_screen(self.live_location(emoji), self.viewport_size),
        )
    }

    /// Font size an emoji is drawn at, in screen pixels.
    pub fn emoji_display_size(&self, id: EmojiId) -> Option<f64> {
        let emoji = self.document.emoji(id)?;
        Some(self.live_font_size(emoji) * self.camera.zoom_scale())
    }

    /// Everything to draw this frame, back to front.
    pub fn display_items(&self) -> Vec<DisplayItem<'_>> {
        let zoom = self.camera.zoom_scale();
        self.document
            .emojis()
            .map(|e| DisplayItem {
                id: e.id(),
                text: &e.text,
                position: self
                    .camera
                    .document_to_screen(self.live_location(e), self.viewport_size),
                size: self.live_font_size(e) * zoom,
                selected: e.is_selected,
            })
            .collect()
    }

    /// Transform for drawing the background image, centered on the
    /// document origin. `None` until an image has loaded.
    pub fn background_transform(&self) -> Option<Affine> {
        let image = self.document.background_image()?;
        let view = self.camera.transform().to_affine(self.viewport_size);
        Some(view * Affine::translate((-image.size.width / 2.0, -image.size.height / 2.0)))
    }

    /// Screen position of the trash can icon.
    pub fn trash_can_position(&self) -> Point {
        self.config.trash_can.screen_position(self.viewport_size)
    }
}
