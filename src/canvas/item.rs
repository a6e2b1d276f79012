use image::RgbaImage;

use crate::geometry::{CanvasSize, LayerRect};

const TEXT_BAND_TOP: i32 = 10;
const TEXT_BAND_HEIGHT: u32 = 60;
const IMAGE_AREA_TOP: u32 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemKind {
    Text,
    Image,
    Filter,
}

impl ItemKind {
    pub const ALL: [Self; 3] = [Self::Text, Self::Image, Self::Filter];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Filter => "filter",
        }
    }

    /// Fixed placement of each kind inside a canvas of `size`.
    pub fn layout(self, size: CanvasSize) -> LayerRect {
        match self {
            Self::Text => LayerRect::new(0, TEXT_BAND_TOP, size.width, TEXT_BAND_HEIGHT),
            Self::Image => LayerRect::new(
                0,
                IMAGE_AREA_TOP as i32,
                size.width,
                size.height.saturating_sub(IMAGE_AREA_TOP),
            ),
            Self::Filter => size.bounds(),
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemPayload {
    Text(String),
    Bitmap(RgbaImage),
}

impl ItemPayload {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bitmap(_) => None,
        }
    }

    pub fn as_bitmap(&self) -> Option<&RgbaImage> {
        match self {
            Self::Bitmap(bitmap) => Some(bitmap),
            Self::Text(_) => None,
        }
    }
}

impl From<String> for ItemPayload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ItemPayload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<RgbaImage> for ItemPayload {
    fn from(bitmap: RgbaImage) -> Self {
        Self::Bitmap(bitmap)
    }
}

/// A positioned foreground element. Items are replaced wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualItem {
    kind: ItemKind,
    rect: LayerRect,
    payload: ItemPayload,
    order: u64,
}

impl VisualItem {
    pub(super) fn new(kind: ItemKind, rect: LayerRect, payload: ItemPayload, order: u64) -> Self {
        Self {
            kind,
            rect,
            payload,
            order,
        }
    }

    pub const fn kind(&self) -> ItemKind {
        self.kind
    }

    pub const fn rect(&self) -> LayerRect {
        self.rect
    }

    pub fn payload(&self) -> &ItemPayload {
        &self.payload
    }

    /// Paint order; higher values paint on top.
    pub const fn order(&self) -> u64 {
        self.order
    }

    pub(super) fn relayout(&mut self, size: CanvasSize) {
        self.rect = self.kind.layout(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_places_text_band_above_image_area() {
        let size = CanvasSize::new(400, 600);
        assert_eq!(ItemKind::Text.layout(size), LayerRect::new(0, 10, 400, 60));
        assert_eq!(ItemKind::Image.layout(size), LayerRect::new(0, 80, 400, 520));
        assert_eq!(ItemKind::Filter.layout(size), LayerRect::new(0, 0, 400, 600));
    }

    #[test]
    fn image_area_collapses_on_short_canvas() {
        let rect = ItemKind::Image.layout(CanvasSize::new(120, 50));
        assert_eq!(rect.height, 0);
        assert!(rect.is_empty());
    }

    #[test]
    fn kind_names_are_stable() {
        let names: Vec<_> = ItemKind::ALL.iter().map(|kind| kind.to_string()).collect();
        assert_eq!(names, ["text", "image", "filter"]);
    }
}
