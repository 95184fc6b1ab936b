//! Prediction endpoint response types and their interpretation.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Remedy advice attached to a predicted condition.
///
/// Non-string field values are kept in their JSON text form (`null` shows as
/// `"null"`) rather than rejecting the whole prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remedies {
    #[serde(default, deserialize_with = "lenient_text")]
    pub organic: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub chemical: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub prevention: String,
}

impl Remedies {
    /// The three fields as labeled lines.
    pub fn display_text(&self) -> String {
        format!(
            "Organic: {}\nChemical: {}\nPrevention: {}",
            self.organic, self.chemical, self.prevention
        )
    }
}

/// One entry of the server's top-k ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLabel {
    pub label: String,
    pub confidence: f64,
}

/// Successful response of the prediction endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Raw label, `"<Category>___<condition>"`
    pub label: String,
    /// Probability of the label, in [0,1]
    pub confidence: f64,
    /// Absent when the server sent none or sent something unusable
    #[serde(default, deserialize_with = "lenient_remedies")]
    pub remedies: Option<Remedies>,
    /// Well-formed entries only; malformed ones are dropped
    #[serde(default, rename = "topk", deserialize_with = "lenient_ranking")]
    pub top_k: Option<Vec<RankedLabel>>,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        other => other.to_string(),
    })
}

fn lenient_remedies<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Remedies>, D::Error> {
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match serde_json::from_value(value) {
        Ok(remedies) => Ok(Some(remedies)),
        Err(e) => {
            log::warn!("Ignoring malformed remedies: {}", e);
            Ok(None)
        }
    }
}

fn lenient_ranking<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<RankedLabel>>, D::Error> {
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let entries = match value {
        Value::Array(entries) => entries,
        other => {
            log::warn!("Ignoring topk that is not a list: {}", other);
            return Ok(None);
        }
    };

    let ranked = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<RankedLabel>(entry) {
            Ok(ranked) => Some(ranked),
            Err(e) => {
                log::warn!("Dropping malformed topk entry: {}", e);
                None
            }
        })
        .collect();
    Ok(Some(ranked))
}

impl PredictionResult {
    /// Ranked alternatives other than the top label.
    pub fn alternatives(&self) -> impl Iterator<Item = &RankedLabel> {
        self.top_k
            .iter()
            .flatten()
            .filter(move |ranked| ranked.label != self.label)
    }
}

/// Raw HTTP completion as seen by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// What the server said, once the body has been parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// 2xx with a usable prediction
    Predicted(PredictionResult),
    /// Non-2xx; `message` is the body's `error` field when present
    Rejected { status: u16, message: Option<String> },
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body and classify the reply.
    ///
    /// A body that is not JSON is an error regardless of status, and so is a
    /// 2xx body without `label` and `confidence`.
    pub fn interpret(&self) -> Result<Verdict, PredictError> {
        let value: Value = serde_json::from_str(&self.body).map_err(PredictError::InvalidJson)?;

        if self.is_success() {
            let result = serde_json::from_value(value).map_err(PredictError::UnexpectedBody)?;
            return Ok(Verdict::Predicted(result));
        }

        let message = value
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(Verdict::Rejected {
            status: self.status,
            message,
        })
    }
}

/// Why a prediction round trip produced no verdict.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The request itself failed (network, CORS, aborted...)
    #[error("{0}")]
    Transport(String),

    /// The response body is not JSON
    #[error("invalid JSON in response: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The response body is JSON but not a prediction
    #[error("unexpected response body: {0}")]
    UnexpectedBody(#[source] serde_json::Error),
}

impl PredictError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_is_parsed() {
        let reply = HttpReply::new(
            200,
            r#"{"label": "Grape___black_rot", "confidence": 0.93,
                "remedies": {"organic": "Neem", "chemical": "Mancozeb", "prevention": "Prune"},
                "topk": [{"label": "Grape___black_rot", "confidence": 0.93},
                         {"label": "Grape___Esca", "confidence": 0.05}]}"#,
        );
        let Verdict::Predicted(result) = reply.interpret().unwrap() else {
            panic!("expected a prediction");
        };
        assert_eq!(result.label, "Grape___black_rot");
        assert_eq!(result.confidence, 0.93);
        assert_eq!(
            result.remedies.as_ref().map(Remedies::display_text).as_deref(),
            Some("Organic: Neem\nChemical: Mancozeb\nPrevention: Prune")
        );
        let alternatives: Vec<_> = result.alternatives().map(|r| r.label.as_str()).collect();
        assert_eq!(alternatives, vec!["Grape___Esca"]);
    }

    #[test]
    fn null_remedies_and_missing_topk_are_absent() {
        let reply = HttpReply::new(
            200,
            r#"{"label": "healthy", "confidence": 1.0, "remedies": null}"#,
        );
        let Verdict::Predicted(result) = reply.interpret().unwrap() else {
            panic!("expected a prediction");
        };
        assert!(result.remedies.is_none());
        assert_eq!(result.alternatives().count(), 0);
    }

    #[test]
    fn odd_optional_parts_do_not_reject_the_prediction() {
        let reply = HttpReply::new(
            200,
            r#"{"label": "healthy", "confidence": 0.8,
                "remedies": {"organic": 3, "chemical": null},
                "topk": [{"label": "healthy"}, "junk",
                         {"label": "Grape___Esca", "confidence": 0.1}]}"#,
        );
        let Verdict::Predicted(result) = reply.interpret().unwrap() else {
            panic!("expected a prediction");
        };
        let remedies = result.remedies.as_ref().unwrap();
        assert_eq!(remedies.organic, "3");
        assert_eq!(remedies.chemical, "null");
        assert_eq!(remedies.prevention, "");
        assert_eq!(result.top_k.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn unusable_remedies_and_topk_shapes_are_absent() {
        let reply = HttpReply::new(
            200,
            r#"{"label": "healthy", "confidence": 0.8, "remedies": "spray", "topk": 4}"#,
        );
        let Verdict::Predicted(result) = reply.interpret().unwrap() else {
            panic!("expected a prediction");
        };
        assert!(result.remedies.is_none());
        assert!(result.top_k.is_none());
    }

    #[test]
    fn error_status_carries_server_message() {
        let reply = HttpReply::new(400, r#"{"error": "bad image"}"#);
        assert_eq!(
            reply.interpret().unwrap(),
            Verdict::Rejected {
                status: 400,
                message: Some("bad image".to_string())
            }
        );
    }

    #[test]
    fn error_status_without_message() {
        for body in [r#"{}"#, r#"{"error": ""}"#, r#"{"error": 5}"#, "[]"] {
            let reply = HttpReply::new(500, body);
            assert_eq!(
                reply.interpret().unwrap(),
                Verdict::Rejected {
                    status: 500,
                    message: None
                }
            );
        }
    }

    #[test]
    fn non_json_body_is_an_error_for_any_status() {
        assert!(matches!(
            HttpReply::new(200, "<html>").interpret(),
            Err(PredictError::InvalidJson(_))
        ));
        assert!(matches!(
            HttpReply::new(502, "Bad Gateway").interpret(),
            Err(PredictError::InvalidJson(_))
        ));
    }

    #[test]
    fn success_without_label_is_an_error() {
        let err = HttpReply::new(200, r#"{"confidence": 0.5}"#)
            .interpret()
            .unwrap_err();
        assert!(matches!(err, PredictError::UnexpectedBody(_)));
        assert!(err.to_string().contains("label"));
    }

    #[test]
    fn transport_error_displays_raw_text() {
        let err = PredictError::transport("TypeError: Failed to fetch");
        assert_eq!(err.to_string(), "TypeError: Failed to fetch");
    }
}
