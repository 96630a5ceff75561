use crate::bridge::model::{ClassifyRequest, DashboardResponse};
use crate::remote::ClassifierClient;
use crate::workflow::runner::Runner;
use anyhow::Context;
use chrono::Utc;
use log::{error, info, warn};
use serde_json::json;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use wastecore::telemetry::MetricsRecorder;
use wastecore::{ClassificationRecord, ClassifierResponse, SharedStore};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::{self, Json, WithStatus};
use warp::{Filter, Rejection, Reply};

/// Everything the HTTP handlers share.
#[derive(Clone)]
pub struct BridgeState {
    pub store: SharedStore,
    pub runner: Arc<Runner>,
    pub classifier: Arc<ClassifierClient>,
    pub metrics: Arc<MetricsRecorder>,
}

impl BridgeState {
    pub fn new(store: SharedStore, runner: Arc<Runner>, classifier: Arc<ClassifierClient>) -> Self {
        Self {
            store,
            runner,
            classifier,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    fn dashboard(&self) -> DashboardResponse {
        DashboardResponse {
            view: self.store.with(|store| store.dashboard()),
            bridge: self.metrics.snapshot(),
        }
    }

    /// Writes the snapshot on the blocking pool, off the request threads.
    async fn persist(&self) {
        let runner = self.runner.clone();
        let store = self.store.clone();
        match tokio::task::spawn_blocking(move || runner.persist(&store)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!("snapshot not saved: {:#}", err),
            Err(err) => warn!("snapshot task failed: {}", err),
        }
    }

    async fn accept(&self, record: ClassificationRecord) -> WithStatus<Json> {
        self.store.with(|store| store.add_classification(record.clone()));
        self.metrics.record_classified();
        self.persist().await;
        reply::with_status(reply::json(&record), StatusCode::OK)
    }

    async fn classify(&self, request: ClassifyRequest) -> WithStatus<Json> {
        let record = self.runner.classify_label(&self.store, &request.label);
        self.metrics.record_classified();
        self.persist().await;
        reply::with_status(reply::json(&record), StatusCode::OK)
    }

    async fn ingest(&self, response: ClassifierResponse) -> WithStatus<Json> {
        self.accept(response.into_record(None, Utc::now())).await
    }

    async fn upload(&self, image: Bytes) -> WithStatus<Json> {
        match self.classifier.classify(&image).await {
            Ok(response) => self.ingest(response).await,
            Err(err) => {
                error!("upload classification failed: {}", err);
                self.metrics.record_failure();
                reply::with_status(
                    reply::json(&json!({ "status": "error", "error": err.to_string() })),
                    StatusCode::BAD_GATEWAY,
                )
            }
        }
    }

    fn refresh(&self) -> WithStatus<Json> {
        let status = self.store.with(|store| {
            store.refresh_system_status();
            store.system_health().status
        });
        reply::with_status(
            reply::json(&json!({ "status": "ok", "health": status })),
            StatusCode::OK,
        )
    }

    async fn clear(&self) -> WithStatus<Json> {
        self.store.with(|store| store.clear_data());
        self.persist().await;
        reply::with_status(reply::json(&json!({ "status": "ok" })), StatusCode::OK)
    }

    fn export_csv(&self) -> impl Reply {
        self.metrics.record_export();
        let csv = self.store.with(|store| store.export_csv());
        reply::with_header(
            reply::with_header(csv, "content-type", "text/csv; charset=utf-8"),
            "content-disposition",
            "attachment; filename=\"waste-classifications.csv\"",
        )
    }

    fn export_report(&self) -> impl Reply {
        self.metrics.record_export();
        reply::html(self.store.with(|store| store.report_document(Utc::now())))
    }
}

pub fn routes(
    state: BridgeState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let state_filter = warp::any().map(move || state.clone());

    let dashboard = warp::path("dashboard")
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter.clone())
        .map(|state: BridgeState| reply::json(&state.dashboard()));

    let classify = warp::path("classify")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(|request: ClassifyRequest, state: BridgeState| async move {
            Ok::<_, Rejection>(state.classify(request).await)
        });

    let ingest = warp::path("ingest")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(|response: ClassifierResponse, state: BridgeState| async move {
            Ok::<_, Rejection>(state.ingest(response).await)
        });

    let upload = warp::path("upload")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::bytes())
        .and(state_filter.clone())
        .and_then(|image: Bytes, state: BridgeState| async move {
            Ok::<_, Rejection>(state.upload(image).await)
        });

    let refresh = warp::path("refresh")
        .and(warp::path::end())
        .and(warp::post())
        .and(state_filter.clone())
        .map(|state: BridgeState| state.refresh());

    let clear = warp::path("clear")
        .and(warp::path::end())
        .and(warp::post())
        .and(state_filter.clone())
        .and_then(|state: BridgeState| async move { Ok::<_, Rejection>(state.clear().await) });

    let export_csv = warp::path!("export" / "csv")
        .and(warp::get())
        .and(state_filter.clone())
        .map(|state: BridgeState| state.export_csv());

    let export_report = warp::path!("export" / "report")
        .and(warp::get())
        .and(state_filter)
        .map(|state: BridgeState| state.export_report());

    dashboard
        .or(classify)
        .or(ingest)
        .or(upload)
        .or(refresh)
        .or(clear)
        .or(export_csv)
        .or(export_report)
}

/// Recomputes system status every `period` until the task is dropped.
pub async fn refresh_loop(store: SharedStore, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        store.with(|store| store.refresh_system_status());
    }
}

pub async fn serve<F>(state: BridgeState, addr: SocketAddr, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (bound, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .with_context(|| format!("binding dashboard bridge to {}", addr))?;
    info!("dashboard bridge listening on http://{}", bound);
    server.await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::{ClassifierConfig, DashboardConfig};
    use serde_json::Value;
    use tempfile::{tempdir, TempDir};

    fn state() -> (TempDir, BridgeState) {
        let dir = tempdir().unwrap();
        let mut cfg = DashboardConfig::from_args(4, 17, None);
        cfg.snapshot_dir = dir.path().join("state");
        cfg.export_dir = dir.path().join("exports");
        cfg.classifier = ClassifierConfig {
            base_url: "http://127.0.0.1:1".into(),
            timeout_secs: 1,
        };
        let runner = Runner::new(cfg.clone());
        let store = runner.open_store(false).unwrap();
        let classifier = ClassifierClient::new(&cfg.classifier).unwrap();
        let state = BridgeState::new(store, Arc::new(runner), Arc::new(classifier));
        (dir, state)
    }

    fn body_json(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn dashboard_reports_seed_state() {
        let (_dir, state) = state();
        let api = routes(state);
        let response = warp::test::request()
            .method("GET")
            .path("/dashboard")
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response.body());
        assert_eq!(body["stats"]["totalClassified"], 358);
        assert_eq!(body["wasteTrends"].as_array().unwrap().len(), 14);
        assert_eq!(body["bridge"]["classified"], 0);
    }

    #[tokio::test]
    async fn classify_adds_record_and_persists() {
        let (dir, state) = state();
        let api = routes(state.clone());
        let response = warp::test::request()
            .method("POST")
            .path("/classify")
            .json(&json!({ "label": "plastic-bottle.jpg" }))
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let record = body_json(response.body());
        assert_eq!(record["category"], "Recyclable");

        let head = state.store.with(|store| store.live_feed()[0].id.clone());
        assert_eq!(record["id"], head.as_str());
        let saved =
            std::fs::read_to_string(dir.path().join("state").join("wasteData.json")).unwrap();
        assert!(saved.contains(record["id"].as_str().unwrap()));
        assert_eq!(state.metrics.snapshot().classified, 1);
    }

    #[tokio::test]
    async fn ingest_accepts_classifier_payload() {
        let (_dir, state) = state();
        let api = routes(state.clone());
        let response = warp::test::request()
            .method("POST")
            .path("/ingest")
            .json(&json!({
                "category": "Biodegradable",
                "accuracy": 91.5,
                "wasteType": "organic",
                "details": { "recyclable": false, "biodegradable": true, "hazardous": false }
            }))
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let stats = state.store.with(|store| *store.stats());
        assert_eq!(stats.biodegradable, 113);
    }

    #[tokio::test]
    async fn failed_upload_leaves_store_untouched() {
        let (_dir, state) = state();
        let api = routes(state.clone());
        let response = warp::test::request()
            .method("POST")
            .path("/upload")
            .body("not really an image")
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(state.store.with(|store| store.records().len()), 7);
        assert_eq!(state.metrics.snapshot().classifier_failures, 1);
    }

    #[tokio::test]
    async fn clear_and_export_routes() {
        let (_dir, state) = state();
        let api = routes(state.clone());
        state.runner.classify_label(&state.store, "cup.png");

        let response = warp::test::request()
            .method("POST")
            .path("/clear")
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = warp::test::request()
            .method("GET")
            .path("/export/csv")
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "text/csv; charset=utf-8"
        );
        let csv = String::from_utf8(response.body().to_vec()).unwrap();
        assert_eq!(csv.lines().count(), 8);

        let response = warp::test::request()
            .method("GET")
            .path("/export/report")
            .reply(&api)
            .await;
        let html = String::from_utf8(response.body().to_vec()).unwrap();
        assert!(html.contains("Total items: 7"));
        assert_eq!(state.metrics.snapshot().exports, 2);
    }

    #[tokio::test]
    async fn refresh_reports_health() {
        let (_dir, state) = state();
        let api = routes(state);
        let response = warp::test::request()
            .method("POST")
            .path("/refresh")
            .reply(&api)
            .await;
        let body = body_json(response.body());
        assert_eq!(body["health"], "Healthy");
    }
}
