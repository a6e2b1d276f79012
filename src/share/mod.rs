//! Share targets that receive the flattened canvas.

use std::fs;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

const WL_COPY_COMMAND: &str = "wl-copy";
const MIME_IMAGE_PNG: &str = "image/png";
const SHARE_FILE_PREFIX: &str = "macro_";

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("failed to encode png: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to create share directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to run {command}: {source}")]
    CommandIo {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("{command} exited with non-zero status: {status}")]
    CommandFailed { command: String, status: String },
}

pub type ShareResult<T> = std::result::Result<T, ShareError>;

/// Where a shared image ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareReceipt {
    File(PathBuf),
    Clipboard,
}

impl std::fmt::Display for ShareReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Clipboard => f.write_str("clipboard"),
        }
    }
}

pub trait ShareTarget {
    fn share(&self, image: &RgbaImage) -> ShareResult<ShareReceipt>;
}

impl<T: ShareTarget + ?Sized> ShareTarget for Box<T> {
    fn share(&self, image: &RgbaImage) -> ShareResult<ShareReceipt> {
        (**self).share(image)
    }
}

pub fn encode_png(image: &RgbaImage) -> ShareResult<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

fn write_png(image: &RgbaImage, path: &Path) -> ShareResult<()> {
    let bytes = encode_png(image)?;
    fs::write(path, bytes).map_err(|source| ShareError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes each shared image to a new timestamped file in a directory.
#[derive(Debug, Clone)]
pub struct DirectoryShareTarget {
    dir: PathBuf,
}

impl DirectoryShareTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn allocate_target_path(&self) -> PathBuf {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();

        let mut suffix = 0_u32;
        loop {
            let name = if suffix == 0 {
                format!("{SHARE_FILE_PREFIX}{millis}.png")
            } else {
                format!("{SHARE_FILE_PREFIX}{millis}_{suffix}.png")
            };
            let path = self.dir.join(name);
            if !path.exists() {
                return path;
            }
            suffix = suffix.saturating_add(1);
        }
    }
}

impl ShareTarget for DirectoryShareTarget {
    fn share(&self, image: &RgbaImage) -> ShareResult<ShareReceipt> {
        fs::create_dir_all(&self.dir).map_err(|source| ShareError::CreateDirectory {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.allocate_target_path();
        write_png(image, &path)?;
        tracing::info!(?path, "shared image to directory");
        Ok(ShareReceipt::File(path))
    }
}

/// Writes the shared image to one fixed path, overwriting it.
#[derive(Debug, Clone)]
pub struct FileShareTarget {
    path: PathBuf,
}

impl FileShareTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ShareTarget for FileShareTarget {
    fn share(&self, image: &RgbaImage) -> ShareResult<ShareReceipt> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ShareError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        write_png(image, &self.path)?;
        tracing::info!(path = ?self.path, "shared image to file");
        Ok(ShareReceipt::File(self.path.clone()))
    }
}

/// Hands the PNG bytes to the Wayland clipboard through `wl-copy`.
#[derive(Debug, Default)]
pub struct WlCopyShareTarget;

impl ShareTarget for WlCopyShareTarget {
    fn share(&self, image: &RgbaImage) -> ShareResult<ShareReceipt> {
        let bytes = encode_png(image)?;
        let command_io = |source| ShareError::CommandIo {
            command: WL_COPY_COMMAND.to_string(),
            source,
        };

        let mut child = Command::new(WL_COPY_COMMAND)
            .args(["--type", MIME_IMAGE_PNG])
            .stdin(Stdio::piped())
            .spawn()
            .map_err(command_io)?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&bytes).map_err(command_io)?;
        }
        let status = child.wait().map_err(command_io)?;

        if status.success() {
            tracing::info!(bytes = bytes.len(), "shared image to clipboard");
            Ok(ShareReceipt::Clipboard)
        } else {
            Err(ShareError::CommandFailed {
                command: WL_COPY_COMMAND.to_string(),
                status: status.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir().join(format!("macro-image-{name}-{}-{nanos}", std::process::id()))
    }

    #[test]
    fn encode_png_produces_png_signature() {
        let bytes = encode_png(&RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255])))
            .expect("png should encode");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn directory_target_writes_distinct_decodable_files() {
        let dir = scratch_dir("dir-share");
        let target = DirectoryShareTarget::new(&dir);
        let source = RgbaImage::from_pixel(4, 3, Rgba([200, 10, 10, 255]));

        let first = target.share(&source).expect("first share should succeed");
        let second = target.share(&source).expect("second share should succeed");
        assert_ne!(first, second);

        let ShareReceipt::File(path) = first else {
            panic!("directory target should report a file");
        };
        assert!(path.starts_with(&dir));
        let decoded = image::open(&path).expect("shared png should decode").to_rgba8();
        assert_eq!(decoded, source);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_target_creates_parent_directories() {
        let dir = scratch_dir("file-share");
        let path = dir.join("nested").join("out.png");
        let target = FileShareTarget::new(&path);

        let receipt = target
            .share(&RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])))
            .expect("file share should succeed");
        assert_eq!(receipt, ShareReceipt::File(path.clone()));
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
