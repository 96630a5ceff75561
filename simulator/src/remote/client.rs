//! HTTP client for the external image classification service.

use crate::workflow::config::ClassifierConfig;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use wastecore::ClassifierResponse;

/// Failure talking to the classifier. The store is never touched on error.
#[derive(thiserror::Error, Debug)]
pub enum ClassifierError {
    #[error("classifier unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("classifier returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed classifier response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingStatus {
    #[serde(alias = "isTraining")]
    pub is_training: bool,
    pub progress: f64,
    pub message: String,
}

impl Default for TrainingStatus {
    fn default() -> Self {
        Self {
            is_training: false,
            progress: 0.0,
            message: "Failed to get training status".into(),
        }
    }
}

const TRAINING_STARTED: &str = "Training started successfully";
const TRAINING_FAILED: &str = "Failed to start model training. Please try again.";

/// One labelled image submitted for training.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSample {
    pub label: String,
    pub image: Vec<u8>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrainingItem<'a> {
    image_data: String,
    label: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrainingRequest<'a> {
    training_data: Vec<TrainingItem<'a>>,
}

/// Outcome of a training submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReply {
    pub success: bool,
    pub message: String,
}

pub struct ClassifierClient {
    http: reqwest::Client,
    base_url: String,
}

impl ClassifierClient {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(ClassifierError::Transport)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends `image` base64-encoded to `POST /api/classify`.
    pub async fn classify(&self, image: &[u8]) -> Result<ClassifierResponse, ClassifierError> {
        let response = self
            .http
            .post(self.url("/api/classify"))
            .json(&json!({ "image": STANDARD.encode(image) }))
            .send()
            .await
            .map_err(ClassifierError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let result = response
            .json::<ClassifierResponse>()
            .await
            .map_err(ClassifierError::Decode)?;
        info!(
            "classifier returned {} ({}, {:.1}%)",
            result.waste_type, result.category, result.accuracy
        );
        Ok(result)
    }

    pub async fn check_availability(&self) -> bool {
        match self.http.get(self.url("/api/health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                warn!("classifier health check failed: {}", err);
                false
            }
        }
    }

    /// Submits labelled images to `POST /api/train`. Any failure degrades to
    /// an unsuccessful reply.
    pub async fn train_model(&self, samples: &[TrainingSample]) -> TrainingReply {
        let request = TrainingRequest {
            training_data: samples
                .iter()
                .map(|sample| TrainingItem {
                    image_data: STANDARD.encode(&sample.image),
                    label: &sample.label,
                })
                .collect(),
        };
        let sent = self
            .http
            .post(self.url("/api/train"))
            .json(&request)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match sent {
            Ok(response) => {
                let message = response
                    .json::<Value>()
                    .await
                    .ok()
                    .and_then(|body| body.get("message")?.as_str().map(str::to_string))
                    .unwrap_or_else(|| TRAINING_STARTED.to_string());
                info!("training submitted with {} samples: {}", samples.len(), message);
                TrainingReply {
                    success: true,
                    message,
                }
            }
            Err(err) => {
                warn!("training request failed: {}", err);
                TrainingReply {
                    success: false,
                    message: TRAINING_FAILED.to_string(),
                }
            }
        }
    }

    /// Current training job state; a neutral status when unreachable.
    pub async fn training_status(&self) -> TrainingStatus {
        let response = match self.http.get(self.url("/api/training-status")).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("training status request failed: {}", err);
                return TrainingStatus::default();
            }
        };
        response
            .json::<TrainingStatus>()
            .await
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp::http::StatusCode;
    use warp::{Filter, Rejection, Reply};

    fn unreachable_client() -> ClassifierClient {
        ClassifierClient::new(&ClassifierConfig {
            base_url: "http://127.0.0.1:1/".into(),
            timeout_secs: 1,
        })
        .unwrap()
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = unreachable_client();
        assert_eq!(client.url("/api/health"), "http://127.0.0.1:1/api/health");
    }

    #[test]
    fn training_status_accepts_server_fields() {
        let status: TrainingStatus = serde_json::from_str(
            r#"{"is_training": true, "progress": 40, "status": "training", "message": "Epoch 2/5"}"#,
        )
        .unwrap();
        assert!(status.is_training);
        assert_eq!(status.progress, 40.0);
        assert_eq!(status.message, "Epoch 2/5");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let client = unreachable_client();
        let err = client.classify(b"jpeg bytes").await.unwrap_err();
        assert!(matches!(err, ClassifierError::Transport(_)));
        assert!(!client.check_availability().await);
        assert!(!client.training_status().await.is_training);
    }

    fn stub_client<R: Reply + 'static>(
        filter: impl Filter<Extract = (R,), Error = Rejection> + Clone + Send + Sync + 'static,
    ) -> ClassifierClient {
        let (addr, server) = warp::serve(filter).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        ClassifierClient::new(&ClassifierConfig {
            base_url: format!("http://{}", addr),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn server_error_is_a_status_error() {
        let client = stub_client(warp::path!("api" / "classify").map(|| {
            warp::reply::with_status("model offline", StatusCode::INTERNAL_SERVER_ERROR)
        }));
        match client.classify(b"jpeg bytes").await.unwrap_err() {
            ClassifierError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "model offline");
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let client = stub_client(warp::path!("api" / "classify").map(|| "<html>oops</html>"));
        let err = client.classify(b"jpeg bytes").await.unwrap_err();
        assert!(matches!(err, ClassifierError::Decode(_)));
    }

    #[tokio::test]
    async fn classify_sends_base64_and_parses_response() {
        let client = stub_client(
            warp::path!("api" / "classify")
                .and(warp::body::json())
                .map(|body: Value| {
                    let echoed = body["image"].as_str().unwrap_or_default().to_string();
                    warp::reply::json(&json!({
                        "category": "Recyclable",
                        "accuracy": 93.5,
                        "wasteType": echoed,
                        "details": { "recyclable": true, "biodegradable": false }
                    }))
                }),
        );
        let response = client.classify(b"abc").await.unwrap();
        assert_eq!(response.waste_type, "YWJj");
        assert_eq!(response.accuracy, 93.5);
        assert!(response.details.recyclable);
    }

    #[tokio::test]
    async fn train_model_reports_server_message() {
        let client = stub_client(
            warp::path!("api" / "train")
                .and(warp::body::json())
                .map(|body: Value| {
                    let items = body["trainingData"].as_array().cloned().unwrap_or_default();
                    let first = &items[0];
                    warp::reply::json(&json!({
                        "message": format!(
                            "queued {} images, first {} {}",
                            items.len(),
                            first["label"].as_str().unwrap_or_default(),
                            first["imageData"].as_str().unwrap_or_default()
                        )
                    }))
                }),
        );
        let samples = vec![
            TrainingSample {
                label: "Recyclable".into(),
                image: b"abc".to_vec(),
            },
            TrainingSample {
                label: "Biodegradable".into(),
                image: b"peel".to_vec(),
            },
        ];
        let reply = client.train_model(&samples).await;
        assert!(reply.success);
        assert_eq!(reply.message, "queued 2 images, first Recyclable YWJj");
    }

    #[tokio::test]
    async fn train_model_defaults_message_when_body_has_none() {
        let client = stub_client(warp::path!("api" / "train").map(|| warp::reply::json(&json!({}))));
        let reply = client.train_model(&[]).await;
        assert!(reply.success);
        assert_eq!(reply.message, TRAINING_STARTED);
    }

    #[tokio::test]
    async fn rejected_or_unreachable_training_degrades() {
        let busy = stub_client(warp::path!("api" / "train").map(|| {
            warp::reply::with_status(
                warp::reply::json(&json!({ "error": "Model is already being trained" })),
                StatusCode::BAD_REQUEST,
            )
        }));
        let reply = busy.train_model(&[]).await;
        assert!(!reply.success);
        assert_eq!(reply.message, TRAINING_FAILED);

        let sample = TrainingSample {
            label: "Recyclable".into(),
            image: vec![1, 2, 3],
        };
        let reply = unreachable_client().train_model(&[sample]).await;
        assert_eq!(
            reply,
            TrainingReply {
                success: false,
                message: TRAINING_FAILED.into(),
            }
        );
    }
}
