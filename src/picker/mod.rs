use std::path::{Path, PathBuf};

use image::RgbaImage;

/// Source of user-picked photos. `None` means the user picked nothing.
pub trait ImagePicker {
    fn pick(&mut self) -> Option<RgbaImage>;
}

/// Yields the image at a fixed path once, then reports no selection.
#[derive(Debug, Clone, Default)]
pub struct PathImagePicker {
    path: Option<PathBuf>,
}

impl PathImagePicker {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl ImagePicker for PathImagePicker {
    fn pick(&mut self) -> Option<RgbaImage> {
        let path = self.path.take()?;
        decode_picked_image(&path)
    }
}

pub fn decode_picked_image(path: &Path) -> Option<RgbaImage> {
    match image::open(path) {
        Ok(decoded) => {
            let rgba = decoded.to_rgba8();
            tracing::debug!(?path, width = rgba.width(), height = rgba.height(), "picked image");
            Some(rgba)
        }
        Err(err) => {
            tracing::warn!(?path, %err, "failed to decode picked image");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn picker_without_path_yields_nothing() {
        let mut picker = PathImagePicker::default();
        assert!(picker.pick().is_none());
    }

    #[test]
    fn picker_with_unreadable_path_yields_nothing() {
        let mut picker =
            PathImagePicker::new(Some(PathBuf::from("/nonexistent/macro-image/photo.png")));
        assert!(picker.pick().is_none());
    }

    #[test]
    fn picker_decodes_file_once() {
        let path = std::env::temp_dir().join(format!(
            "macro-image-picker-{}.png",
            std::process::id()
        ));
        let source = RgbaImage::from_pixel(3, 5, Rgba([10, 20, 30, 255]));
        source.save(&path).expect("fixture should save");

        let mut picker = PathImagePicker::new(Some(path.clone()));
        assert_eq!(picker.pick(), Some(source));
        assert!(picker.pick().is_none());

        let _ = std::fs::remove_file(&path);
    }
}
