//! UI constants for the upload/predict page.
//!
//! Centralizes the user-visible strings and style values the controller
//! produces, so the shell never hardcodes them.

/// Submit button captions.
pub mod button {
    /// Idle caption
    pub const PREDICT: &str = "Predict";
    /// Caption while a request is in flight
    pub const PREDICTING: &str = "Predicting...";
}

/// Drop zone placeholder text and framing.
pub mod drop_zone {
    /// Placeholder when nothing is being dragged
    pub const IDLE_TEXT: &str = "Drag and drop an image here";
    /// Placeholder while a drag hovers the zone
    pub const DRAG_OVER_TEXT: &str = "Release to drop file";
    /// CSS class toggled while a drag hovers the zone
    pub const DRAG_OVER_CLASS: &str = "drag-over";
}

/// Result region text.
pub mod result {
    /// Shown in every region while a request is in flight
    pub const PENDING: &str = "...";
    /// Remedy region while a request is in flight
    pub const REMEDY_PENDING: &str = "Remedy: ...";
    /// Label after a non-2xx reply
    pub const ERROR_LABEL: &str = "Error";
    /// Label after a transport or parse failure
    pub const FAILED_LABEL: &str = "Failed";
    /// Remedy text for a non-2xx reply without an error message
    pub const UNKNOWN_ERROR: &str = "Unknown error";
    /// Remedy text when the prediction carries no remedy record
    pub const NO_REMEDY: &str = "No remedy found.";
}

/// Notices shown as browser alerts.
pub mod notice {
    /// Submit pressed with no file selected
    pub const SELECT_IMAGE_FIRST: &str = "Please select an image first.";
}
