//! HTTP client for a remote entity-model inference service.
//!
//! The model itself is an external capability: this client posts
//! `{text, labels, threshold}` to a GLiNER-style endpoint and decodes the
//! detected spans. Any transport or decode problem surfaces as a model
//! error, fatal to the current page only.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HarvestError, Result};
use crate::traits::model::EntityModel;
use crate::types::entity::RawEntitySpan;

#[derive(Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
    labels: &'a [&'a str],
    threshold: f32,
}

#[derive(Deserialize)]
struct PredictedSpan {
    text: String,
    label: String,
    #[serde(default)]
    score: f32,
}

/// Entity model backed by an HTTP inference endpoint.
pub struct RemoteModel {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteModel {
    /// Point the client at a prediction endpoint, e.g.
    /// `http://localhost:8080/predict`.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| HarvestError::Model(Box::new(e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl EntityModel for RemoteModel {
    async fn predict_entities(
        &self,
        text: &str,
        labels: &[&str],
        threshold: f32,
    ) -> Result<Vec<RawEntitySpan>> {
        let request = PredictRequest {
            text,
            labels,
            threshold,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| HarvestError::Model(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Model(
                format!("model endpoint returned HTTP {status}").into(),
            ));
        }

        let spans: Vec<PredictedSpan> = response
            .json()
            .await
            .map_err(|e| HarvestError::Model(Box::new(e)))?;

        debug!(spans = spans.len(), text_len = text.len(), "model call done");
        Ok(spans
            .into_iter()
            .map(|s| RawEntitySpan {
                text: s.text,
                label: s.label,
                score: s.score,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_the_wire_shape() {
        let request = PredictRequest {
            text: "Gemayel moved to Paris.",
            labels: &["Person", "City"],
            threshold: 0.5,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["text"], "Gemayel moved to Paris.");
        assert_eq!(json["labels"][1], "City");
        assert_eq!(json["threshold"], 0.5);
    }

    #[test]
    fn spans_decode_with_optional_score() {
        let json = r#"[{"text": "Paris", "label": "City", "score": 0.91},
                       {"text": "Gemayel", "label": "Person"}]"#;
        let spans: Vec<PredictedSpan> = serde_json::from_str(json).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].score, 0.91);
        assert_eq!(spans[1].score, 0.0);
    }
}
