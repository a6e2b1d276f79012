//! Host wiring: resolves configuration and collaborators, then drives one editing session.

use std::path::PathBuf;

use crate::alert::{AlertPresenter, BackgroundChoice, LogAlerts, NotifyAlerts};
use crate::canvas::{load_font, CanvasModel, TextPainter};
use crate::config::{load_app_config, AppConfig};
use crate::editor::MacroEditor;
use crate::error::AppResult;
use crate::geometry::CanvasSize;
use crate::picker::PathImagePicker;
use crate::share::{
    DirectoryShareTarget, FileShareTarget, ShareReceipt, ShareTarget, WlCopyShareTarget,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareDestination {
    /// Timestamped file in the configured share directory.
    Directory(PathBuf),
    File(PathBuf),
    Clipboard,
}

impl ShareDestination {
    fn into_target(self) -> Box<dyn ShareTarget> {
        match self {
            Self::Directory(dir) => Box::new(DirectoryShareTarget::new(dir)),
            Self::File(path) => Box::new(FileShareTarget::new(path)),
            Self::Clipboard => Box::new(WlCopyShareTarget),
        }
    }
}

/// One scripted session: each set field corresponds to a user action, applied in UI order.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub font: Option<PathBuf>,
    pub background: Option<BackgroundChoice>,
    pub text: Option<String>,
    pub image: Option<PathBuf>,
    pub filter: bool,
    pub output: Option<PathBuf>,
    pub clipboard: bool,
    pub notify: bool,
}

impl RunOptions {
    fn canvas_size(&self, config: &AppConfig) -> CanvasSize {
        CanvasSize::new(
            self.width.unwrap_or(config.canvas_width),
            self.height.unwrap_or(config.canvas_height),
        )
    }

    fn share_destination(&self, config: &AppConfig) -> ShareDestination {
        if self.clipboard {
            return ShareDestination::Clipboard;
        }
        match self.output.as_ref() {
            Some(path) => ShareDestination::File(path.clone()),
            None => ShareDestination::Directory(config.resolved_share_dir()),
        }
    }
}

pub fn run_session(options: RunOptions) -> AppResult<Option<ShareReceipt>> {
    let config = load_app_config();
    run_session_with(options, &config)
}

pub fn run_session_with(
    options: RunOptions,
    config: &AppConfig,
) -> AppResult<Option<ShareReceipt>> {
    let size = options.canvas_size(config);
    tracing::info!(width = size.width, height = size.height, "open canvas");

    let font_path = options.font.as_deref().or(config.font_path.as_deref());
    let painter = TextPainter::new(load_font(font_path), config.text_size);
    // The requested background answers the palette sheet.
    let sheet_answer = options
        .background
        .and_then(|choice| BackgroundChoice::ALL.iter().position(|entry| *entry == choice));
    let alerts: Box<dyn AlertPresenter> = if options.notify {
        Box::new(NotifyAlerts::with_preset(sheet_answer))
    } else {
        Box::new(LogAlerts::with_preset(sheet_answer))
    };
    let mut editor = MacroEditor::new(
        CanvasModel::with_text_painter(size, painter),
        PathImagePicker::new(options.image.clone()),
        options.share_destination(config).into_target(),
        alerts,
    );

    if options.background.is_some() {
        editor.choose_background_color()?;
    }
    if let Some(text) = options.text.as_deref() {
        editor.add_text(text)?;
    }
    if options.image.is_some() && !editor.pick_image()? {
        tracing::warn!(path = ?options.image, "no image added");
    }
    if options.filter {
        editor.toggle_filter()?;
    }

    Ok(editor.share()?)
}
