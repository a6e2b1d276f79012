//! Layered canvas model: a background fill plus at most one foreground item per kind.

mod filter;
mod item;
mod render;
mod text;

use std::collections::BTreeMap;

use image::RgbaImage;
use thiserror::Error;

use crate::geometry::{CanvasSize, Color};

pub use filter::noir;
pub use item::{ItemKind, ItemPayload, VisualItem};
pub use text::{load_font, TextPainter, DEFAULT_TEXT_SIZE};

const BYTES_PER_PIXEL: u64 = 4;
/// Upper bound on one RGBA rendering surface.
const MAX_SURFACE_BYTES: u64 = 256 * 1024 * 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("cannot rasterize an empty canvas ({width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("failed to allocate a {width}x{height} rendering surface")]
    SurfaceUnavailable { width: u32, height: u32 },
    #[error("grayscale filter produced no output")]
    EmptyFilterOutput,
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Clone)]
pub struct CanvasModel {
    size: CanvasSize,
    background: Color,
    items: BTreeMap<ItemKind, VisualItem>,
    next_order: u64,
    text_painter: TextPainter,
}

impl CanvasModel {
    pub fn new(size: CanvasSize) -> Self {
        Self::with_text_painter(size, TextPainter::default())
    }

    pub fn with_text_painter(size: CanvasSize, text_painter: TextPainter) -> Self {
        Self {
            size,
            background: Color::WHITE,
            items: BTreeMap::new(),
            next_order: 0,
            text_painter,
        }
    }

    pub const fn size(&self) -> CanvasSize {
        self.size
    }

    pub const fn background_color(&self) -> Color {
        self.background
    }

    pub fn set_background_color(&mut self, color: Color) {
        tracing::debug!(rgb = ?color.rgb(), "set canvas background");
        self.background = color;
    }

    /// Re-lays out every item for the new size.
    pub fn resize(&mut self, size: CanvasSize) {
        self.size = size;
        for item in self.items.values_mut() {
            item.relayout(size);
        }
    }

    /// Replaces any item of `kind` with a freshly laid-out one painted on top.
    pub fn upsert_item(&mut self, kind: ItemKind, payload: impl Into<ItemPayload>) -> &VisualItem {
        let replaced = self.items.remove(&kind).is_some();
        let order = self.next_order;
        self.next_order = self.next_order.saturating_add(1);
        let item = VisualItem::new(kind, kind.layout(self.size), payload.into(), order);
        tracing::debug!(%kind, order, replaced, rect = ?item.rect(), "upsert canvas item");
        self.items.entry(kind).or_insert(item)
    }

    pub fn remove_item(&mut self, kind: ItemKind) -> bool {
        let removed = self.items.remove(&kind).is_some();
        if removed {
            tracing::debug!(%kind, "removed canvas item");
        }
        removed
    }

    pub fn item(&self, kind: ItemKind) -> Option<&VisualItem> {
        self.items.get(&kind)
    }

    pub fn contains(&self, kind: ItemKind) -> bool {
        self.items.contains_key(&kind)
    }

    /// Items in paint order, bottom first.
    pub fn items(&self) -> Vec<&VisualItem> {
        let mut items: Vec<_> = self.items.values().collect();
        items.sort_by_key(|item| item.order());
        items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn rasterize(&self) -> RenderResult<RgbaImage> {
        let CanvasSize { width, height } = self.size;
        if self.size.is_empty() {
            return Err(RenderError::EmptyCanvas { width, height });
        }

        let mut surface = allocate_surface(self.size, self.background)?;
        for item in self.items() {
            render::paint_item(&mut surface, item, &self.text_painter);
        }
        Ok(surface)
    }

    /// Flattens the canvas, converts it to noir and stacks the result as the filter item.
    pub fn apply_grayscale_filter(&mut self) -> RenderResult<()> {
        let flattened = self.rasterize()?;
        let filtered = noir(&flattened).ok_or(RenderError::EmptyFilterOutput)?;
        self.upsert_item(ItemKind::Filter, filtered);
        Ok(())
    }
}

/// Allocates a background-filled surface without aborting on exhaustion.
fn allocate_surface(size: CanvasSize, fill: Color) -> RenderResult<RgbaImage> {
    let CanvasSize { width, height } = size;
    let unavailable = || RenderError::SurfaceUnavailable { width, height };

    let bytes = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
        .filter(|bytes| *bytes <= MAX_SURFACE_BYTES)
        .ok_or_else(unavailable)?;
    let len = usize::try_from(bytes).map_err(|_| unavailable())?;

    let mut raw = Vec::new();
    if let Err(err) = raw.try_reserve_exact(len) {
        tracing::warn!(width, height, %err, "rendering surface allocation failed");
        return Err(unavailable());
    }
    let fill = fill.to_rgba().0;
    for _ in 0..len / fill.len() {
        raw.extend_from_slice(&fill);
    }

    RgbaImage::from_raw(width, height, raw).ok_or_else(unavailable)
}
