//! Orchestrates user actions against one canvas and its collaborators.

use image::RgbaImage;
use thiserror::Error;

use crate::alert::{AlertPresenter, BackgroundChoice, BACKGROUND_SHEET_TITLE, EMPTY_TEXT_TITLE};
use crate::canvas::{CanvasModel, ItemKind};
use crate::picker::ImagePicker;
use crate::share::{ShareError, ShareReceipt, ShareTarget};
use crate::state::{EditorMode, EditorSession, SessionEvent, StateError};

const APPLY_FILTER_LABEL: &str = "Apply Filter";
const REMOVE_FILTER_LABEL: &str = "Remove Filter";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    ChangeBackground,
    AddImage,
    AddText,
    ToggleFilter,
    Share,
}

impl EditorAction {
    /// Content edits are locked while the filter preview is shown.
    pub const fn enabled_in(self, mode: EditorMode) -> bool {
        match self {
            Self::ChangeBackground | Self::AddImage | Self::AddText => mode.allows_content_edits(),
            Self::ToggleFilter | Self::Share => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorControls {
    pub change_background: bool,
    pub add_image: bool,
    pub add_text: bool,
    pub toggle_filter: bool,
    pub share: bool,
    pub filter_label: &'static str,
}

impl EditorControls {
    pub const fn for_mode(mode: EditorMode) -> Self {
        Self {
            change_background: EditorAction::ChangeBackground.enabled_in(mode),
            add_image: EditorAction::AddImage.enabled_in(mode),
            add_text: EditorAction::AddText.enabled_in(mode),
            toggle_filter: EditorAction::ToggleFilter.enabled_in(mode),
            share: EditorAction::Share.enabled_in(mode),
            filter_label: if mode.filter_applied() {
                REMOVE_FILTER_LABEL
            } else {
                APPLY_FILTER_LABEL
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("text is empty")]
    EmptyText,
    #[error("{action:?} is disabled while the filter preview is applied")]
    Locked { action: EditorAction },
    #[error(transparent)]
    State(#[from] StateError),
    #[error("share failed: {0}")]
    Share(#[from] ShareError),
}

pub type EditorResult<T> = std::result::Result<T, EditorError>;

pub struct MacroEditor<P, S, A> {
    canvas: CanvasModel,
    session: EditorSession,
    picker: P,
    share_target: S,
    alerts: A,
}

impl<P, S, A> MacroEditor<P, S, A>
where
    P: ImagePicker,
    S: ShareTarget,
    A: AlertPresenter,
{
    pub fn new(canvas: CanvasModel, picker: P, share_target: S, alerts: A) -> Self {
        Self {
            canvas,
            session: EditorSession::new(),
            picker,
            share_target,
            alerts,
        }
    }

    pub fn canvas(&self) -> &CanvasModel {
        &self.canvas
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn mode(&self) -> EditorMode {
        self.session.mode()
    }

    pub fn controls(&self) -> EditorControls {
        EditorControls::for_mode(self.session.mode())
    }

    fn ensure_enabled(&self, action: EditorAction) -> EditorResult<()> {
        if action.enabled_in(self.session.mode()) {
            return Ok(());
        }
        tracing::debug!(?action, mode = ?self.session.mode(), "rejecting locked action");
        Err(EditorError::Locked { action })
    }

    /// Applies the noir preview or removes it, flipping the session mode.
    pub fn toggle_filter(&mut self) -> EditorResult<EditorMode> {
        let event = self.session.toggle_event();
        match event {
            SessionEvent::ApplyFilter => {
                if let Err(err) = self.canvas.apply_grayscale_filter() {
                    tracing::debug!(%err, "grayscale filter skipped");
                }
            }
            SessionEvent::RemoveFilter => {
                self.canvas.remove_item(ItemKind::Filter);
            }
        }

        let mode = self.session.transition(event)?;
        tracing::info!(?mode, "toggled filter");
        Ok(mode)
    }

    pub fn add_text(&mut self, text: &str) -> EditorResult<()> {
        self.ensure_enabled(EditorAction::AddText)?;
        if text.trim().is_empty() {
            self.alerts.acknowledge(EMPTY_TEXT_TITLE);
            return Err(EditorError::EmptyText);
        }

        self.canvas.upsert_item(ItemKind::Text, text);
        Ok(())
    }

    pub fn add_image(&mut self, bitmap: RgbaImage) -> EditorResult<()> {
        self.ensure_enabled(EditorAction::AddImage)?;
        self.canvas.upsert_item(ItemKind::Image, bitmap);
        Ok(())
    }

    /// Returns whether the picker produced an image.
    pub fn pick_image(&mut self) -> EditorResult<bool> {
        self.ensure_enabled(EditorAction::AddImage)?;
        let Some(bitmap) = self.picker.pick() else {
            tracing::debug!("image picker returned no selection");
            return Ok(false);
        };
        self.add_image(bitmap)?;
        Ok(true)
    }

    pub fn change_background_color(&mut self, choice: BackgroundChoice) -> EditorResult<()> {
        self.ensure_enabled(EditorAction::ChangeBackground)?;
        tracing::info!(choice = choice.label(), "change background color");
        self.canvas.set_background_color(choice.color());
        Ok(())
    }

    /// Shows the palette sheet; dismissal leaves the canvas unchanged.
    pub fn choose_background_color(&mut self) -> EditorResult<Option<BackgroundChoice>> {
        self.ensure_enabled(EditorAction::ChangeBackground)?;
        let labels = BackgroundChoice::labels();
        let choice = self
            .alerts
            .choose(BACKGROUND_SHEET_TITLE, &labels)
            .and_then(|index| BackgroundChoice::ALL.get(index).copied());

        if let Some(choice) = choice {
            self.change_background_color(choice)?;
        }
        Ok(choice)
    }

    /// `Ok(None)` when the canvas could not be rasterized; nothing is shared then.
    pub fn share(&self) -> EditorResult<Option<ShareReceipt>> {
        let bitmap = match self.canvas.rasterize() {
            Ok(bitmap) => bitmap,
            Err(err) => {
                tracing::debug!(%err, "share skipped");
                return Ok(None);
            }
        };

        let receipt = self.share_target.share(&bitmap)?;
        tracing::info!(%receipt, "shared canvas");
        Ok(Some(receipt))
    }
}
