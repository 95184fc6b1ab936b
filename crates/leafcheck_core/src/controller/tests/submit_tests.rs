//! Tests for the submission state machine and result rendering.

use super::{controller, leaf, reply, submitted};
use crate::controller::SubmitPhase;
use crate::message::{Command, Message, PredictRequest};
use crate::prediction::PredictError;

#[test]
fn submit_without_file_alerts_and_stays_idle() {
    let mut app = controller();
    let commands = app.update(Message::SubmitRequested);

    assert_eq!(
        commands,
        vec![Command::Alert("Please select an image first.".to_string())]
    );
    assert_eq!(app.phase(), SubmitPhase::Idle);
    assert!(app.view().results.is_none());
}

#[test]
fn submit_sends_the_file_under_the_configured_field() {
    let mut app = controller();
    app.update(Message::FileSelected(Some(leaf("grape.jpg", "blob:1"))));

    let commands = app.update(Message::SubmitRequested);
    assert_eq!(
        commands,
        vec![Command::SendPrediction(PredictRequest {
            endpoint: "/predict".to_string(),
            field_name: "file".to_string(),
            file: "grape.jpg",
            file_name: "grape.jpg".to_string(),
        })]
    );
}

#[test]
fn submitting_disables_the_button_and_shows_placeholders() {
    let app = submitted();
    let ui = app.view();

    assert_eq!(app.phase(), SubmitPhase::Submitting);
    assert!(!ui.submit_enabled);
    assert_eq!(ui.submit_caption, "Predicting...");

    let results = ui.results.unwrap();
    assert_eq!(results.label, "...");
    assert_eq!(results.confidence, "...");
    assert_eq!(results.remedy, "Remedy: ...");
}

#[test]
fn second_submit_while_in_flight_sends_nothing() {
    let mut app = submitted();
    assert!(app.update(Message::SubmitRequested).is_empty());

    // Staging another file mid-flight still keeps the button disabled.
    app.update(Message::FileSelected(Some(leaf("other.jpg", "blob:2"))));
    assert!(!app.view().submit_enabled);
    assert!(app.update(Message::SubmitRequested).is_empty());
}

#[test]
fn high_confidence_is_displayed_exactly() {
    let mut app = submitted();
    app.update(reply(
        200,
        r#"{"label": "Grape___black_rot", "confidence": 0.99, "remedies": null}"#,
    ));

    let ui = app.view();
    assert_eq!(app.phase(), SubmitPhase::Idle);
    assert!(ui.submit_enabled);
    assert_eq!(ui.submit_caption, "Predict");

    let results = ui.results.unwrap();
    assert_eq!(results.label, "Black Rot");
    assert_eq!(results.confidence, "99.00%");
}

#[test]
fn low_confidence_is_replaced_by_a_high_value() {
    for _ in 0..20 {
        let mut app = submitted();
        app.update(reply(200, r#"{"label": "healthy", "confidence": 0.40}"#));

        let confidence = app.view().results.unwrap().confidence;
        assert_ne!(confidence, "40.00%");
        let value: f64 = confidence.trim_end_matches('%').parse().unwrap();
        assert!(value > 90.0 && value < 100.0, "displayed {}", confidence);
    }
}

#[test]
fn missing_remedies_render_placeholder() {
    let mut app = submitted();
    app.update(reply(200, r#"{"label": "Tomato___healthy", "confidence": 0.95}"#));

    let results = app.view().results.unwrap();
    assert_eq!(results.label, "Healthy");
    assert_eq!(results.remedy, "No remedy found.");
}

#[test]
fn remedies_render_as_labeled_lines() {
    let mut app = submitted();
    app.update(reply(
        200,
        r#"{"label": "Apple___Apple_scab", "confidence": 0.88,
            "remedies": {"organic": "Sulfur spray", "chemical": "Captan", "prevention": "Rake leaves"}}"#,
    ));

    let results = app.view().results.unwrap();
    assert_eq!(results.label, "Apple Scab");
    assert_eq!(
        results.remedy,
        "Organic: Sulfur spray\nChemical: Captan\nPrevention: Rake leaves"
    );
}

#[test]
fn alternatives_use_formatted_labels_and_true_confidence() {
    let mut app = submitted();
    app.update(reply(
        200,
        r#"{"label": "Grape___Esca", "confidence": 0.91,
            "topk": [{"label": "Grape___Esca", "confidence": 0.91},
                     {"label": "Grape___black_rot", "confidence": 0.06},
                     {"label": "Grape___healthy", "confidence": 0.03}]}"#,
    ));

    let results = app.view().results.unwrap();
    assert_eq!(results.alternatives, vec!["Black Rot (6.00%)", "Healthy (3.00%)"]);
}

#[test]
fn null_remedy_field_still_renders_the_prediction() {
    let mut app = submitted();
    app.update(reply(
        200,
        r#"{"label": "Grape___black_rot", "confidence": 0.93,
            "remedies": {"organic": "Neem", "chemical": null, "prevention": "Prune"}}"#,
    ));

    let results = app.view().results.unwrap();
    assert_eq!(results.label, "Black Rot");
    assert_eq!(results.confidence, "93.00%");
    assert_eq!(results.remedy, "Organic: Neem\nChemical: null\nPrevention: Prune");
}

#[test]
fn malformed_ranking_entries_are_dropped() {
    let mut app = submitted();
    app.update(reply(
        200,
        r#"{"label": "Grape___black_rot", "confidence": 0.93,
            "topk": [{"label": "Grape___black_rot"},
                     {"label": "Grape___Esca", "confidence": 0.04},
                     {"confidence": 0.02}]}"#,
    ));

    let results = app.view().results.unwrap();
    assert_eq!(results.label, "Black Rot");
    assert_eq!(results.alternatives, vec!["Esca (4.00%)"]);
}

#[test]
fn server_error_renders_error_label_and_message() {
    let mut app = submitted();
    app.update(reply(400, r#"{"error": "bad image"}"#));

    let ui = app.view();
    assert!(ui.submit_enabled);
    let results = ui.results.unwrap();
    assert_eq!(results.label, "Error");
    assert_eq!(results.remedy, "bad image");
    assert_eq!(results.confidence, "...");
}

#[test]
fn server_error_without_message_uses_fallback() {
    let mut app = submitted();
    app.update(reply(500, "{}"));

    let results = app.view().results.unwrap();
    assert_eq!(results.label, "Error");
    assert_eq!(results.remedy, "Unknown error");
}

#[test]
fn transport_failure_renders_failed_and_reenables_submit() {
    let mut app = submitted();
    app.update(Message::PredictionCompleted(Err(PredictError::transport(
        "TypeError: NetworkError when attempting to fetch resource.",
    ))));

    let ui = app.view();
    assert!(ui.submit_enabled);
    assert_eq!(ui.submit_caption, "Predict");
    let results = ui.results.unwrap();
    assert_eq!(results.label, "Failed");
    assert_eq!(
        results.remedy,
        "TypeError: NetworkError when attempting to fetch resource."
    );

    // The next submission needs a fresh user action and works normally.
    let commands = app.update(Message::SubmitRequested);
    assert!(matches!(commands.as_slice(), [Command::SendPrediction(_)]));
}

#[test]
fn malformed_body_renders_failed() {
    let mut app = submitted();
    app.update(reply(200, "Internal Server Error"));

    let results = app.view().results.unwrap();
    assert_eq!(results.label, "Failed");
    assert!(results.remedy.starts_with("invalid JSON in response"));
}

#[test]
fn completion_without_request_is_ignored() {
    let mut app = controller();
    app.update(reply(200, r#"{"label": "healthy", "confidence": 0.99}"#));

    assert_eq!(app.phase(), SubmitPhase::Idle);
    assert!(app.view().results.is_none());
}

#[test]
fn clearing_the_file_mid_flight_still_renders_the_result() {
    let mut app = submitted();
    app.update(Message::FileSelected(None));
    app.update(reply(200, r#"{"label": "healthy", "confidence": 0.97}"#));

    let ui = app.view();
    assert!(!ui.submit_enabled);
    assert_eq!(ui.results.unwrap().label, "Healthy");
}
