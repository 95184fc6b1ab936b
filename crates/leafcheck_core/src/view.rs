//! Derived UI state.
//!
//! Nothing here is stored independently: [`UiState`] is recomputed from the
//! controller's selected file, submission phase, drag flag and result panel.

use crate::ui_constants::{drop_zone, result};

/// Border framing of the drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    /// No file staged
    Dashed,
    /// A file is staged
    Solid,
}

impl BorderStyle {
    /// CSS `border-style` value.
    pub fn as_css(&self) -> &'static str {
        match self {
            BorderStyle::Dashed => "dashed",
            BorderStyle::Solid => "solid",
        }
    }
}

/// Visual mode of the drop zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropZoneView {
    pub border: BorderStyle,
    /// A drag is hovering the zone
    pub highlighted: bool,
    pub placeholder: &'static str,
    pub placeholder_visible: bool,
}

/// What the result regions currently show.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultPanel {
    /// Nothing submitted yet; the page's own markup is left alone
    #[default]
    Untouched,
    /// Request in flight
    Pending,
    /// A prediction, already formatted for display
    Predicted {
        label: String,
        confidence: String,
        remedy: String,
        alternatives: Vec<String>,
    },
    /// The server answered with a non-2xx status
    Rejected { message: String },
    /// The request or the response body failed
    Failed { message: String },
}

/// Text for the label, confidence and remedy regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub label: String,
    pub confidence: String,
    pub remedy: String,
    pub alternatives: Vec<String>,
}

impl ResultPanel {
    /// Region text, or `None` while the regions have never been written.
    ///
    /// Failures leave the confidence region at its pending placeholder.
    pub fn view(&self) -> Option<ResultView> {
        let pending = |label: &str, remedy: &str| ResultView {
            label: label.to_string(),
            confidence: result::PENDING.to_string(),
            remedy: remedy.to_string(),
            alternatives: Vec::new(),
        };

        match self {
            ResultPanel::Untouched => None,
            ResultPanel::Pending => Some(pending(result::PENDING, result::REMEDY_PENDING)),
            ResultPanel::Predicted {
                label,
                confidence,
                remedy,
                alternatives,
            } => Some(ResultView {
                label: label.clone(),
                confidence: confidence.clone(),
                remedy: remedy.clone(),
                alternatives: alternatives.clone(),
            }),
            ResultPanel::Rejected { message } => Some(pending(result::ERROR_LABEL, message)),
            ResultPanel::Failed { message } => Some(pending(result::FAILED_LABEL, message)),
        }
    }
}

/// Complete UI state for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub submit_enabled: bool,
    pub submit_caption: &'static str,
    /// Empty when no file is staged
    pub file_name: String,
    /// Preview image source; `None` hides the preview
    pub preview_src: Option<String>,
    pub drop_zone: DropZoneView,
    pub results: Option<ResultView>,
}

impl DropZoneView {
    pub(crate) fn new(has_file: bool, drag_over: bool) -> Self {
        Self {
            border: if has_file {
                BorderStyle::Solid
            } else {
                BorderStyle::Dashed
            },
            highlighted: drag_over,
            placeholder: if drag_over {
                drop_zone::DRAG_OVER_TEXT
            } else {
                drop_zone::IDLE_TEXT
            },
            placeholder_visible: !has_file,
        }
    }
}
