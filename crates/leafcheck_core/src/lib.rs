//! leafcheck_core - platform-independent core of the LeafCheck upload page
//!
//! The page lets a user pick or drop a leaf photo, previews it, posts it to a
//! prediction endpoint and shows the predicted condition with its confidence and
//! remedies. This crate holds all of that behavior without touching the DOM:
//! the browser shell feeds [`Message`]s in, runs the returned [`Command`]s and
//! renders [`UiState`].

pub mod confidence;
pub mod config;
pub mod controller;
pub mod intake;
pub mod label;
pub mod message;
pub mod prediction;
pub mod ui_constants;
pub mod view;

pub use confidence::{format_percent, ConfidencePolicy};
pub use config::{AppConfig, ConfigError, LogLevel};
pub use controller::{SubmitPhase, UploadPredictController};
pub use intake::{is_image_filename, SelectedFile};
pub use label::format_label;
pub use message::{Command, Message, PredictRequest};
pub use prediction::{HttpReply, PredictError, PredictionResult, Remedies, Verdict};
pub use view::{BorderStyle, DropZoneView, ResultView, UiState};
