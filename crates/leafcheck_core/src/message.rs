//! Messages into the controller and commands out of it.
//!
//! The shell turns browser events into [`Message`]s. The controller answers
//! with [`Command`]s for effects it cannot perform itself.

use crate::intake::SelectedFile;
use crate::prediction::{HttpReply, PredictError};

/// Events that update the controller.
#[derive(Debug)]
pub enum Message<F> {
    /// The file picker changed; `None` when the selection was emptied
    FileSelected(Option<SelectedFile<F>>),
    /// A drag entered the drop zone
    DragEntered,
    /// A drag left the drop zone
    DragLeft,
    /// Files were dropped; only the first is kept
    Dropped(Option<SelectedFile<F>>),
    /// The user pressed submit
    SubmitRequested,
    /// The outstanding request resolved or rejected
    PredictionCompleted(Result<HttpReply, PredictError>),
}

/// Side effects requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<F> {
    /// Show a blocking notice to the user
    Alert(String),
    /// Post the file to the prediction endpoint
    SendPrediction(PredictRequest<F>),
    /// Release a preview URL that is no longer displayed
    ReleasePreview(String),
}

/// Everything the shell needs to issue the multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictRequest<F> {
    pub endpoint: String,
    pub field_name: String,
    pub file: F,
    pub file_name: String,
}
