use image::{imageops, RgbaImage};

use super::item::{ItemPayload, VisualItem};
use super::text::TextPainter;
use crate::geometry::LayerRect;

/// Scales `bitmap` to fit inside `rect` keeping its aspect ratio, centered.
pub(super) fn paint_aspect_fit(target: &mut RgbaImage, rect: LayerRect, bitmap: &RgbaImage) {
    let Some((x, y, width, height)) = aspect_fit_rect(rect, bitmap.width(), bitmap.height())
    else {
        return;
    };

    if width == bitmap.width() && height == bitmap.height() {
        imageops::overlay(target, bitmap, i64::from(x), i64::from(y));
        return;
    }

    let scaled = imageops::resize(bitmap, width, height, imageops::FilterType::Triangle);
    imageops::overlay(target, &scaled, i64::from(x), i64::from(y));
}

pub(super) fn aspect_fit_rect(
    rect: LayerRect,
    source_width: u32,
    source_height: u32,
) -> Option<(i32, i32, u32, u32)> {
    if rect.is_empty() || source_width == 0 || source_height == 0 {
        return None;
    }

    let scale = (f64::from(rect.width) / f64::from(source_width))
        .min(f64::from(rect.height) / f64::from(source_height));
    let width = ((f64::from(source_width) * scale).round() as u32).clamp(1, rect.width);
    let height = ((f64::from(source_height) * scale).round() as u32).clamp(1, rect.height);
    let x = rect.x + i32::try_from((rect.width - width) / 2).ok()?;
    let y = rect.y + i32::try_from((rect.height - height) / 2).ok()?;
    Some((x, y, width, height))
}

pub(super) fn paint_item(target: &mut RgbaImage, item: &VisualItem, text_painter: &TextPainter) {
    match item.payload() {
        ItemPayload::Text(text) => {
            text_painter.paint(target, item.rect(), text);
        }
        ItemPayload::Bitmap(bitmap) => paint_aspect_fit(target, item.rect(), bitmap),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn aspect_fit_letterboxes_wide_source() {
        let fitted = aspect_fit_rect(LayerRect::new(0, 80, 400, 520), 800, 400);
        assert_eq!(fitted, Some((0, 240, 400, 200)));
    }

    #[test]
    fn aspect_fit_pillarboxes_tall_source() {
        let fitted = aspect_fit_rect(LayerRect::new(0, 0, 100, 100), 50, 100);
        assert_eq!(fitted, Some((25, 0, 50, 100)));
    }

    #[test]
    fn aspect_fit_rejects_empty_inputs() {
        assert_eq!(aspect_fit_rect(LayerRect::new(0, 0, 0, 10), 10, 10), None);
        assert_eq!(aspect_fit_rect(LayerRect::new(0, 0, 10, 10), 0, 10), None);
    }

    #[test]
    fn paint_aspect_fit_only_touches_fitted_area() {
        let mut target = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        let source = RgbaImage::from_pixel(10, 5, Rgba([0, 0, 255, 255]));

        paint_aspect_fit(&mut target, LayerRect::new(0, 0, 10, 10), &source);

        assert_eq!(target.get_pixel(5, 0).0, [255, 255, 255, 255]);
        assert_eq!(target.get_pixel(5, 5).0, [0, 0, 255, 255]);
        assert_eq!(target.get_pixel(5, 9).0, [255, 255, 255, 255]);
    }
}
