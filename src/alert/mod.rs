//! Alert and action-sheet presenters plus the background color palette.

use std::str::FromStr;

use crate::geometry::Color;

pub const EMPTY_TEXT_TITLE: &str = "Please add text";
pub const BACKGROUND_SHEET_TITLE: &str = "Please choose color";
const APP_ALERT_SUMMARY: &str = "Macro Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundChoice {
    Red,
    Gray,
    Yellow,
    White,
}

impl BackgroundChoice {
    pub const ALL: [Self; 4] = [Self::Red, Self::Gray, Self::Yellow, Self::White];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Gray => "Gray",
            Self::Yellow => "Yellow",
            Self::White => "White",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Red => Color::RED,
            Self::Gray => Color::GRAY,
            Self::Yellow => Color::YELLOW,
            Self::White => Color::WHITE,
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|choice| choice.label()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown background color {0:?}; expected one of red, gray, yellow, white")]
pub struct UnknownBackground(pub String);

impl FromStr for BackgroundChoice {
    type Err = UnknownBackground;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|choice| choice.label().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownBackground(value.to_string()))
    }
}

/// Presents blocking acknowledgments and labeled choice sheets.
pub trait AlertPresenter {
    fn acknowledge(&mut self, title: &str);

    /// Index into `options`, or `None` when dismissed.
    fn choose(&mut self, title: &str, options: &[&str]) -> Option<usize>;
}

impl<T: AlertPresenter + ?Sized> AlertPresenter for Box<T> {
    fn acknowledge(&mut self, title: &str) {
        (**self).acknowledge(title);
    }

    fn choose(&mut self, title: &str, options: &[&str]) -> Option<usize> {
        (**self).choose(title, options)
    }
}

/// Headless presenter: logs alerts and answers sheets with a preset choice.
#[derive(Debug, Clone, Default)]
pub struct LogAlerts {
    preset: Option<usize>,
}

impl LogAlerts {
    pub const fn with_preset(preset: Option<usize>) -> Self {
        Self { preset }
    }
}

impl AlertPresenter for LogAlerts {
    fn acknowledge(&mut self, title: &str) {
        tracing::warn!(title, "alert");
    }

    fn choose(&mut self, title: &str, options: &[&str]) -> Option<usize> {
        let choice = self.preset.filter(|index| *index < options.len());
        tracing::info!(title, ?options, ?choice, "action sheet");
        choice
    }
}

/// Surfaces alerts as desktop notifications.
#[derive(Debug, Clone, Default)]
pub struct NotifyAlerts {
    fallback: LogAlerts,
}

impl NotifyAlerts {
    pub const fn with_preset(preset: Option<usize>) -> Self {
        Self {
            fallback: LogAlerts::with_preset(preset),
        }
    }
}

impl AlertPresenter for NotifyAlerts {
    fn acknowledge(&mut self, title: &str) {
        crate::notification::send(APP_ALERT_SUMMARY, title);
    }

    fn choose(&mut self, title: &str, options: &[&str]) -> Option<usize> {
        self.fallback.choose(title, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_choice_parses_case_insensitively() {
        assert_eq!("red".parse(), Ok(BackgroundChoice::Red));
        assert_eq!(" GRAY ".parse(), Ok(BackgroundChoice::Gray));
        assert_eq!("Yellow".parse(), Ok(BackgroundChoice::Yellow));
        assert!("blue".parse::<BackgroundChoice>().is_err());
    }

    #[test]
    fn palette_maps_labels_to_colors() {
        assert_eq!(BackgroundChoice::labels(), ["Red", "Gray", "Yellow", "White"]);
        assert_eq!(BackgroundChoice::Gray.color(), Color::new(128, 128, 128));
        assert_eq!(BackgroundChoice::White.color(), Color::WHITE);
    }

    #[test]
    fn log_alerts_ignore_out_of_range_preset() {
        let mut alerts = LogAlerts::with_preset(Some(7));
        assert_eq!(alerts.choose("title", &["a", "b"]), None);

        let mut alerts = LogAlerts::with_preset(Some(1));
        assert_eq!(alerts.choose("title", &["a", "b"]), Some(1));
    }
}
