//! Flow tests for the upload/predict controller.
//!
//! Files are plain `&'static str` handles and the random source is seeded, so
//! every flow is deterministic.

mod submit_tests;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::UploadPredictController;
use crate::config::AppConfig;
use crate::intake::SelectedFile;
use crate::message::{Command, Message};
use crate::prediction::HttpReply;

type TestController = UploadPredictController<&'static str, StdRng>;

fn controller() -> TestController {
    UploadPredictController::with_rng(AppConfig::default(), StdRng::seed_from_u64(0x1eaf))
}

fn leaf(name: &'static str, preview: &'static str) -> SelectedFile<&'static str> {
    SelectedFile::new(name, name, preview)
}

/// Stage a file and submit it, returning the controller mid-flight.
fn submitted() -> TestController {
    let mut app = controller();
    app.update(Message::FileSelected(Some(leaf("grape.jpg", "blob:1"))));
    let commands = app.update(Message::SubmitRequested);
    assert!(matches!(commands.as_slice(), [Command::SendPrediction(_)]));
    app
}

fn reply(status: u16, body: &str) -> Message<&'static str> {
    Message::PredictionCompleted(Ok(HttpReply::new(status, body)))
}
