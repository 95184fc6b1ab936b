//! The upload/predict controller.
//!
//! An Elm-style state machine: [`UploadPredictController::update`] applies one
//! [`Message`] and returns the [`Command`]s the shell must run, and
//! [`UploadPredictController::view`] derives the UI state.
//!
//! Submission cycles `Idle -> Submitting -> Idle`. The phase is held explicitly,
//! so at most one request is ever outstanding no matter what the DOM does.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::confidence::format_percent;
use crate::config::AppConfig;
use crate::intake::{is_image_filename, SelectedFile};
use crate::label::format_label;
use crate::message::{Command, Message, PredictRequest};
use crate::prediction::{HttpReply, PredictError, PredictionResult, Verdict};
use crate::ui_constants::{button, notice, result};
use crate::view::{DropZoneView, ResultPanel, UiState};

#[cfg(test)]
mod tests;

/// Whether a prediction request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

impl SubmitPhase {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmitPhase::Submitting)
    }
}

/// Owns the staged file, the submission phase and the displayed result.
///
/// `F` is the shell's file handle. `R` supplies the randomness for the
/// confidence display policy.
#[derive(Debug)]
pub struct UploadPredictController<F, R = StdRng> {
    config: AppConfig,
    rng: R,
    selected: Option<SelectedFile<F>>,
    phase: SubmitPhase,
    drag_over: bool,
    panel: ResultPanel,
}

impl<F: Clone> UploadPredictController<F, StdRng> {
    /// Create a controller with an entropy-seeded random source.
    pub fn new(config: AppConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<F: Clone, R: Rng> UploadPredictController<F, R> {
    pub fn with_rng(config: AppConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            selected: None,
            phase: SubmitPhase::Idle,
            drag_over: false,
            panel: ResultPanel::Untouched,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn selected(&self) -> Option<&SelectedFile<F>> {
        self.selected.as_ref()
    }

    /// Apply one message and return the effects to run.
    pub fn update(&mut self, message: Message<F>) -> Vec<Command<F>> {
        match message {
            Message::FileSelected(file) => self.select_file(file),
            Message::DragEntered => {
                self.drag_entered();
                Vec::new()
            }
            Message::DragLeft => {
                self.drag_left();
                Vec::new()
            }
            Message::Dropped(file) => self.dropped(file),
            Message::SubmitRequested => self.submit(),
            Message::PredictionCompleted(outcome) => {
                self.complete(outcome);
                Vec::new()
            }
        }
    }

    /// Stage a file, or clear the slot with `None`.
    ///
    /// The previous file's preview URL is handed back for release.
    pub fn select_file(&mut self, file: Option<SelectedFile<F>>) -> Vec<Command<F>> {
        let mut commands = Vec::new();
        if let Some(previous) = self.selected.take() {
            commands.push(Command::ReleasePreview(previous.into_preview_url()));
        }

        match file {
            Some(file) => {
                if !is_image_filename(file.name()) {
                    log::warn!(
                        "📂 {} does not look like an image, keeping it anyway",
                        file.name()
                    );
                }
                log::info!("📂 Selected {}", file.name());
                self.selected = Some(file);
            }
            None => {
                log::debug!("📂 Selection cleared");
            }
        }
        commands
    }

    pub fn drag_entered(&mut self) {
        log::trace!("Drag entered drop zone");
        self.drag_over = true;
    }

    pub fn drag_left(&mut self) {
        log::trace!("Drag left drop zone");
        self.drag_over = false;
    }

    /// A drop ends the drag and goes through the same intake as the picker.
    pub fn dropped(&mut self, file: Option<SelectedFile<F>>) -> Vec<Command<F>> {
        self.drag_over = false;
        log::debug!("📥 Drop received ({})", if file.is_some() { "1 file" } else { "empty" });
        self.select_file(file)
    }

    /// Start a submission if a file is staged and none is in flight.
    pub fn submit(&mut self) -> Vec<Command<F>> {
        if self.phase.is_in_flight() {
            log::debug!("Submit ignored: a prediction is already in flight");
            return Vec::new();
        }

        let Some(selected) = &self.selected else {
            log::info!("Submit without a selected file");
            return vec![Command::Alert(notice::SELECT_IMAGE_FIRST.to_string())];
        };

        let request = PredictRequest {
            endpoint: self.config.endpoint.clone(),
            field_name: self.config.field_name.clone(),
            file: selected.handle().clone(),
            file_name: selected.name().to_string(),
        };

        log::info!("🌿 Submitting {} to {}", request.file_name, request.endpoint);
        self.phase = SubmitPhase::Submitting;
        self.panel = ResultPanel::Pending;
        vec![Command::SendPrediction(request)]
    }

    /// Settle the outstanding request and render its outcome.
    pub fn complete(&mut self, outcome: Result<HttpReply, PredictError>) {
        if !self.phase.is_in_flight() {
            log::warn!("Ignoring prediction completion with no request in flight");
            return;
        }
        self.phase = SubmitPhase::Idle;

        self.panel = match outcome.and_then(|reply| reply.interpret()) {
            Ok(Verdict::Predicted(prediction)) => self.render_prediction(&prediction),
            Ok(Verdict::Rejected { status, message }) => {
                log::warn!("Prediction rejected with status {}: {:?}", status, message);
                ResultPanel::Rejected {
                    message: message.unwrap_or_else(|| result::UNKNOWN_ERROR.to_string()),
                }
            }
            Err(e) => {
                log::error!("Prediction failed: {}", e);
                ResultPanel::Failed {
                    message: e.to_string(),
                }
            }
        };
    }

    fn render_prediction(&mut self, prediction: &PredictionResult) -> ResultPanel {
        let policy = self.config.confidence;
        let shown = policy.display_value(prediction.confidence, &mut self.rng);
        if policy.substitutes(prediction.confidence) {
            log::debug!(
                "Confidence {:.4} at or below {}, displaying {:.4}",
                prediction.confidence,
                policy.threshold,
                shown
            );
        }

        let label = format_label(&prediction.label);
        let confidence = format_percent(shown);
        log::info!("✅ Predicted {} ({})", label, confidence);

        ResultPanel::Predicted {
            label,
            confidence,
            remedy: prediction
                .remedies
                .as_ref()
                .map_or_else(|| result::NO_REMEDY.to_string(), |r| r.display_text()),
            alternatives: prediction
                .alternatives()
                .map(|ranked| {
                    format!(
                        "{} ({})",
                        format_label(&ranked.label),
                        format_percent(ranked.confidence)
                    )
                })
                .collect(),
        }
    }

    /// Derive the full UI state.
    pub fn view(&self) -> UiState {
        let in_flight = self.phase.is_in_flight();
        UiState {
            submit_enabled: self.selected.is_some() && !in_flight,
            submit_caption: if in_flight {
                button::PREDICTING
            } else {
                button::PREDICT
            },
            file_name: self
                .selected
                .as_ref()
                .map(|f| f.name().to_string())
                .unwrap_or_default(),
            preview_src: self.selected.as_ref().map(|f| f.preview_url().to_string()),
            drop_zone: DropZoneView::new(self.selected.is_some(), self.drag_over),
            results: self.panel.view(),
        }
    }
}
