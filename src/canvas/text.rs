use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontArc, Point, PxScale, ScaleFont};
use image::RgbaImage;

use crate::geometry::{Color, LayerRect};

pub const DEFAULT_TEXT_SIZE: f32 = 36.0;

const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
];

/// Loads the caption font, preferring `preferred` over the system candidates.
pub fn load_font(preferred: Option<&Path>) -> Option<FontArc> {
    let candidates = preferred
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_FONT_CANDIDATES.iter().map(|path| PathBuf::from(*path)));

    for path in candidates {
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::trace!(?path, %err, "font candidate unavailable");
                continue;
            }
        };
        match FontArc::try_from_vec(bytes) {
            Ok(font) => {
                tracing::debug!(?path, "loaded caption font");
                return Some(font);
            }
            Err(err) => tracing::warn!(?path, %err, "font file could not be parsed"),
        }
    }

    tracing::warn!("no caption font available; text layers will not be painted");
    None
}

/// Paints single-line captions centered horizontally at the top of their rect.
#[derive(Clone)]
pub struct TextPainter {
    font: Option<FontArc>,
    size: f32,
    color: Color,
}

impl std::fmt::Debug for TextPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPainter")
            .field("has_font", &self.font.is_some())
            .field("size", &self.size)
            .field("color", &self.color)
            .finish()
    }
}

impl Default for TextPainter {
    fn default() -> Self {
        Self::new(None, DEFAULT_TEXT_SIZE)
    }
}

impl TextPainter {
    pub fn new(font: Option<FontArc>, size: f32) -> Self {
        Self {
            font,
            size: if size > 0.0 { size } else { DEFAULT_TEXT_SIZE },
            color: Color::BLACK,
        }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Returns whether any glyph coverage was written. Lines are stacked from the
    /// top of `rect`; control characters are not drawn.
    pub fn paint(&self, target: &mut RgbaImage, rect: LayerRect, text: &str) -> bool {
        let Some(font) = self.font.as_ref() else {
            tracing::warn!(chars = text.chars().count(), "skipping caption without a font");
            return false;
        };
        let Some(clip) = rect.clip_to(target.width(), target.height()) else {
            return false;
        };

        let scale = PxScale::from(self.size);
        let scaled = font.as_scaled(scale);
        let line_height = scaled.height() + scaled.line_gap();
        let mut baseline = rect.y as f32 + scaled.ascent();
        let mut painted = false;

        for line in text.lines() {
            let line_width = line_advance(font, scale, line);
            let origin_x = rect.x as f32 + (rect.width as f32 - line_width) / 2.0;
            let origin = point(origin_x, baseline);
            painted |= self.paint_line(font, scale, target, clip, origin, line);
            baseline += line_height;
        }

        painted
    }

    fn paint_line(
        &self,
        font: &FontArc,
        scale: PxScale,
        target: &mut RgbaImage,
        clip: LayerRect,
        origin: Point,
        line: &str,
    ) -> bool {
        let scaled = font.as_scaled(scale);
        let clip_right = i64::from(clip.x) + i64::from(clip.width);
        let clip_bottom = i64::from(clip.y) + i64::from(clip.height);
        let (r, g, b) = self.color.rgb();
        let mut painted = false;
        let mut caret = origin.x;
        let mut previous = None;

        for ch in line.chars().filter(|ch| !ch.is_control()) {
            let id = font.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, origin.y));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + i64::from(gx);
                let py = bounds.min.y as i64 + i64::from(gy);
                if px < i64::from(clip.x) || py < i64::from(clip.y) {
                    return;
                }
                if px >= clip_right || py >= clip_bottom || coverage <= 0.0 {
                    return;
                }
                let pixel = target.get_pixel_mut(px as u32, py as u32);
                let alpha = coverage.min(1.0);
                pixel.0[0] = blend_channel(pixel.0[0], r, alpha);
                pixel.0[1] = blend_channel(pixel.0[1], g, alpha);
                pixel.0[2] = blend_channel(pixel.0[2], b, alpha);
                pixel.0[3] = 255;
                painted = true;
            });
        }

        painted
    }
}

fn line_advance(font: &FontArc, scale: PxScale, line: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0;
    let mut previous = None;
    for ch in line.chars().filter(|ch| !ch.is_control()) {
        let id = font.glyph_id(ch);
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }
    width
}

fn blend_channel(base: u8, ink: u8, alpha: f32) -> u8 {
    let mixed = f32::from(base) * (1.0 - alpha) + f32::from(ink) * alpha;
    mixed.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn painter_without_font_leaves_target_untouched() {
        let painter = TextPainter::new(None, 24.0);
        let mut target = RgbaImage::from_pixel(40, 20, image::Rgba([255, 255, 255, 255]));
        let before = target.clone();

        assert!(!painter.paint(&mut target, LayerRect::new(0, 0, 40, 20), "Hi"));
        assert_eq!(target, before);
    }

    #[test]
    fn painter_falls_back_to_default_size() {
        assert_eq!(TextPainter::new(None, 0.0).size(), DEFAULT_TEXT_SIZE);
        assert_eq!(TextPainter::new(None, -3.0).size(), DEFAULT_TEXT_SIZE);
    }

    #[test]
    fn blend_channel_interpolates_between_base_and_ink() {
        assert_eq!(blend_channel(255, 0, 0.0), 255);
        assert_eq!(blend_channel(255, 0, 1.0), 0);
        assert_eq!(blend_channel(200, 0, 0.5), 100);
    }

    #[test]
    fn load_font_falls_through_missing_preferred_path() {
        let missing = Path::new("/nonexistent/macro-image/font.ttf");
        assert_eq!(
            load_font(Some(missing)).is_some(),
            load_font(None).is_some()
        );
    }

    fn dark_rows(painter: &TextPainter, text: &str) -> Vec<u32> {
        let mut target = RgbaImage::from_pixel(200, 80, image::Rgba([255, 255, 255, 255]));
        painter.paint(&mut target, LayerRect::new(0, 10, 200, 60), text);
        target
            .enumerate_pixels()
            .filter(|(_, _, pixel)| pixel.0[0] < 128)
            .map(|(_, y, _)| y)
            .collect()
    }

    #[test]
    fn control_characters_are_not_drawn() {
        let Some(font) = load_font(None) else {
            return;
        };
        let painter = TextPainter::new(Some(font), 24.0);
        let mut plain = RgbaImage::from_pixel(200, 60, image::Rgba([255, 255, 255, 255]));
        let mut tabbed = plain.clone();

        painter.paint(&mut plain, LayerRect::new(0, 0, 200, 60), "Hi");
        painter.paint(&mut tabbed, LayerRect::new(0, 0, 200, 60), "H\ti");
        assert_eq!(plain, tabbed);
    }

    #[test]
    fn newline_starts_a_lower_line() {
        let Some(font) = load_font(None) else {
            return;
        };
        let painter = TextPainter::new(Some(font), 16.0);

        let single = dark_rows(&painter, "A");
        let double = dark_rows(&painter, "A\nB");
        let single_bottom = single.iter().copied().max().expect("caption should paint");
        let double_bottom = double.iter().copied().max().expect("caption should paint");
        assert!(double_bottom > single_bottom + 5);
        assert!(double.iter().all(|y| (10..70).contains(y)));
    }
}
