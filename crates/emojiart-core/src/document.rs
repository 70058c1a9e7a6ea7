//! The EmojiArt document: emoji stickers plus a background image.

use crate::emoji::{Emoji, EmojiId};
use crate::error::{EmojiArtError, Result};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// A loaded background image, as reported by the host's image loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundImage {
    /// URL the image was fetched from.
    pub url: Url,
    /// Pixel size of the image.
    pub size: Size,
}

/// A document containing emoji and an optional background.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmojiArtDocument {
    /// All emoji, keyed by ID.
    emojis: HashMap<EmojiId, Emoji>,
    /// Draw order (back to front).
    order: Vec<EmojiId>,
    /// Selected ids in the order they were selected.
    #[serde(default)]
    selection: Vec<EmojiId>,
    /// Background the user dropped, possibly still loading.
    background_url: Option<Url>,
    /// Background image once the loader has delivered it.
    #[serde(skip)]
    background_image: Option<BackgroundImage>,
}

impl EmojiArtDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an emoji and return its id.
    pub fn add_emoji(&mut self, text: &str, at: Point, size: f64) -> Result<EmojiId> {
        let text = text.trim();
        if text.is_empty() {
            return Err(EmojiArtError::EmptyEmojiText);
        }
        if !(size > 0.0 && size.is_finite()) {
            return Err(EmojiArtError::InvalidFontSize(size));
        }
        let emoji = Emoji::new(text, at, size);
        let id = emoji.id();
        self.order.push(id);
        self.emojis.insert(id, emoji);
        log::debug!("Added emoji {} at ({:.1}, {:.1})", id, at.x, at.y);
        Ok(id)
    }

    /// Get an emoji by ID.
    pub fn emoji(&self, id: EmojiId) -> Option<&Emoji> {
        self.emojis.get(&id)
    }

    /// Emoji in draw order (back to front).
    pub fn emojis(&self) -> impl DoubleEndedIterator<Item = &Emoji> {
        self.order.iter().filter_map(|id| self.emojis.get(id))
    }

    /// Ids of the selected emoji, in the order they were selected.
    pub fn selected_ids(&self) -> Vec<EmojiId> {
        self.selection.clone()
    }

    /// Most recently selected emoji, if any.
    pub fn last_selected(&self) -> Option<EmojiId> {
        self.selection.last().copied()
    }

    /// Check whether any emoji is selected.
    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Mark an emoji as selected.
    pub fn select_emoji(&mut self, id: EmojiId) -> Result<()> {
        let emoji = self
            .emojis
            .get_mut(&id)
            .ok_or(EmojiArtError::UnknownEmoji(id))?;
        if !emoji.is_selected {
            emoji.is_selected = true;
            self.selection.push(id);
        }
        Ok(())
    }

    /// Clear an emoji's selection flag.
    pub fn deselect_emoji(&mut self, id: EmojiId) -> Result<()> {
        self.emoji_mut(id)?.is_selected = false;
        self.selection.retain(|&s| s != id);
        Ok(())
    }

    /// Flip an emoji's selection flag and return the new value.
    pub fn toggle_selection(&mut self, id: EmojiId) -> Result<bool> {
        if self.emoji_mut(id)?.is_selected {
            self.deselect_emoji(id)?;
            Ok(false)
        } else {
            self.select_emoji(id)?;
            Ok(true)
        }
    }

    /// Deselect every emoji. Returns how many were selected.
    pub fn deselect_all(&mut self) -> usize {
        let mut count = 0;
        for emoji in self.emojis.values_mut().filter(|e| e.is_selected) {
            emoji.is_selected = false;
            count += 1;
        }
        self.selection.clear();
        count
    }

    /// Move each listed emoji by `delta`. Unknown ids are skipped.
    /// Returns how many emoji moved.
    pub fn move_emojis(&mut self, ids: &[EmojiId], delta: Vec2) -> usize {
        let mut moved = 0;
        for id in ids {
            match self.emojis.get_mut(id) {
                Some(emoji) => {
                    emoji.translate(delta);
                    moved += 1;
                }
                None => log::debug!("move_emojis: skipping unknown emoji {}", id),
            }
        }
        moved
    }

    /// Multiply an emoji's font size by `factor`.
    pub fn scale_emoji(&mut self, id: EmojiId, factor: f64) -> Result<()> {
        if !(factor > 0.0 && factor.is_finite()) {
            return Err(EmojiArtError::InvalidScale(factor));
        }
        self.emoji_mut(id)?.scale(factor);
        Ok(())
    }

    /// Remove each listed emoji. Unknown ids are skipped.
    /// Returns how many emoji were removed.
    pub fn remove_emojis(&mut self, ids: &[EmojiId]) -> usize {
        let mut removed = 0;
        for id in ids {
            if self.emojis.remove(id).is_some() {
                removed += 1;
            } else {
                log::debug!("remove_emojis: skipping unknown emoji {}", id);
            }
        }
        if removed > 0 {
            self.order.retain(|id| self.emojis.contains_key(id));
            self.selection.retain(|id| self.emojis.contains_key(id));
        }
        removed
    }

    /// Set the background URL. Any previously loaded image is dropped until
    /// the loader reports the new one.
    pub fn set_background_url(&mut self, url: Url) {
        log::info!("Background set to {}", url);
        self.background_url = Some(url);
        self.background_image = None;
    }

    /// Background URL, if one has been dropped.
    pub fn background_url(&self) -> Option<&Url> {
        self.background_url.as_ref()
    }

    /// Loaded background image, if any.
    pub fn background_image(&self) -> Option<&BackgroundImage> {
        self.background_image.as_ref()
    }

    /// Consume a load completion from the image loader.
    ///
    /// Completions for a URL that is no longer current are ignored. Returns
    /// true if the document's background image changed.
    pub fn background_image_loaded(&mut self, url: &Url, result: Result<Size>) -> bool {
        if self.background_url.as_ref() != Some(url) {
            log::debug!("Ignoring stale background load for {}", url);
            return false;
        }
        match result {
            Ok(size) => {
                log::info!("Background loaded: {}x{}", size.width, size.height);
                self.background_image = Some(BackgroundImage {
                    url: url.clone(),
                    size,
                });
                true
            }
            Err(e) => {
                log::warn!("Failed to load background {}: {}", url, e);
                self.background_image.take().is_some()
            }
        }
    }

    /// Check if the document has no emoji.
    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }

    /// Get the number of emoji.
    pub fn len(&self) -> usize {
        self.emojis.len()
    }

    fn emoji_mut(&mut self, id: EmojiId) -> Result<&mut Emoji> {
        self.emojis
            .get_mut(&id)
            .ok_or(EmojiArtError::UnknownEmoji(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(n: usize) -> (EmojiArtDocument, Vec<EmojiId>) {
        let mut doc = EmojiArtDocument::new();
        let ids = (0..n)
            .map(|i| {
                doc.add_emoji("😀", Point::new(i as f64 * 10.0, 0.0), 40.0)
                    .unwrap()
            })
            .collect();
        (doc, ids)
    }

    #[test]
    fn test_add_emoji() {
        let mut doc = EmojiArtDocument::new();
        let id = doc.add_emoji("🍎", Point::new(1.0, 2.0), 40.0).unwrap();
        let emoji = doc.emoji(id).unwrap();
        assert_eq!(emoji.text, "🍎");
        assert_eq!(emoji.location, Point::new(1.0, 2.0));
        assert!(!emoji.is_selected);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_add_emoji_rejects_bad_input() {
        let mut doc = EmojiArtDocument::new();
        assert!(matches!(
            doc.add_emoji("  ", Point::ZERO, 40.0),
            Err(EmojiArtError::EmptyEmojiText)
        ));
        assert!(matches!(
            doc.add_emoji("🍎", Point::ZERO, 0.0),
            Err(EmojiArtError::InvalidFontSize(_))
        ));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_draw_order_preserved() {
        let (doc, ids) = doc_with(3);
        let ordered: Vec<_> = doc.emojis().map(Emoji::id).collect();
        assert_eq!(ordered, ids);
    }

    #[test]
    fn test_toggle_selection_twice_is_identity() {
        let (mut doc, ids) = doc_with(1);
        assert!(doc.toggle_selection(ids[0]).unwrap());
        assert!(!doc.toggle_selection(ids[0]).unwrap());
        assert!(!doc.emoji(ids[0]).unwrap().is_selected);
    }

    #[test]
    fn test_selected_ids_in_selection_order() {
        let (mut doc, ids) = doc_with(3);
        doc.select_emoji(ids[2]).unwrap();
        doc.select_emoji(ids[0]).unwrap();
        // Selecting again does not move it to the end.
        doc.select_emoji(ids[2]).unwrap();
        assert_eq!(doc.selected_ids(), vec![ids[2], ids[0]]);
        assert_eq!(doc.last_selected(), Some(ids[0]));
        assert!(doc.has_selection());

        doc.toggle_selection(ids[2]).unwrap();
        doc.toggle_selection(ids[2]).unwrap();
        assert_eq!(doc.selected_ids(), vec![ids[0], ids[2]]);

        assert_eq!(doc.deselect_all(), 2);
        assert!(!doc.has_selection());
        assert!(doc.selected_ids().is_empty());
    }

    #[test]
    fn test_remove_drops_from_selection() {
        let (mut doc, ids) = doc_with(2);
        doc.select_emoji(ids[0]).unwrap();
        doc.select_emoji(ids[1]).unwrap();
        doc.remove_emojis(&[ids[1]]);
        assert_eq!(doc.selected_ids(), vec![ids[0]]);
        assert_eq!(doc.last_selected(), Some(ids[0]));
    }

    #[test]
    fn test_select_unknown_emoji() {
        let mut doc = EmojiArtDocument::new();
        let missing = EmojiId::new();
        assert!(matches!(
            doc.select_emoji(missing),
            Err(EmojiArtError::UnknownEmoji(id)) if id == missing
        ));
    }

    #[test]
    fn test_move_skips_unknown_ids() {
        let (mut doc, ids) = doc_with(2);
        let batch = [ids[0], EmojiId::new(), ids[1]];
        assert_eq!(doc.move_emojis(&batch, Vec2::new(5.0, 5.0)), 2);
        assert_eq!(doc.emoji(ids[0]).unwrap().location, Point::new(5.0, 5.0));
        assert_eq!(doc.emoji(ids[1]).unwrap().location, Point::new(15.0, 5.0));
    }

    #[test]
    fn test_scale_emoji() {
        let (mut doc, ids) = doc_with(1);
        doc.scale_emoji(ids[0], 2.0).unwrap();
        assert!((doc.emoji(ids[0]).unwrap().font_size - 80.0).abs() < f64::EPSILON);
        assert!(doc.scale_emoji(ids[0], 0.0).is_err());
        assert!(doc.scale_emoji(EmojiId::new(), 2.0).is_err());
    }

    #[test]
    fn test_remove_skips_unknown_ids() {
        let (mut doc, ids) = doc_with(3);
        let batch = [ids[1], EmojiId::new()];
        assert_eq!(doc.remove_emojis(&batch), 1);
        assert_eq!(doc.len(), 2);
        let ordered: Vec<_> = doc.emojis().map(Emoji::id).collect();
        assert_eq!(ordered, vec![ids[0], ids[2]]);

        // Removing again is a no-op.
        assert_eq!(doc.remove_emojis(&batch), 0);
    }

    #[test]
    fn test_background_load() {
        let mut doc = EmojiArtDocument::new();
        let url = Url::parse("https://example.com/bg.jpg").unwrap();
        doc.set_background_url(url.clone());
        assert!(doc.background_image().is_none());

        assert!(doc.background_image_loaded(&url, Ok(Size::new(200.0, 100.0))));
        assert_eq!(doc.background_image().unwrap().size, Size::new(200.0, 100.0));
    }

    #[test]
    fn test_stale_background_load_ignored() {
        let mut doc = EmojiArtDocument::new();
        let old = Url::parse("https://example.com/old.jpg").unwrap();
        let new = Url::parse("https://example.com/new.jpg").unwrap();
        doc.set_background_url(old.clone());
        doc.set_background_url(new.clone());

        assert!(!doc.background_image_loaded(&old, Ok(Size::new(10.0, 10.0))));
        assert!(doc.background_image().is_none());
        assert_eq!(doc.background_url(), Some(&new));
    }

    #[test]
    fn test_failed_background_load() {
        let mut doc = EmojiArtDocument::new();
        let url = Url::parse("https://example.com/bg.jpg").unwrap();
        doc.set_background_url(url.clone());
        let failed = doc.background_image_loaded(
            &url,
            Err(EmojiArtError::ImageLoad("404".to_string())),
        );
        assert!(!failed);
        assert!(doc.background_image().is_none());
    }
}
