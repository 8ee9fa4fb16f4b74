//! Axum web server exposing the sentiment pipeline as a JSON API with a
//! small single-page dashboard.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use sentiment_core::{
    extract_topics, render_report, render_spoken_summary, AnalysisError, AnalysisRequest,
    SentimentPipeline,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Shared application state. The pipeline only takes `&self`, so one
/// instance serves every request handler concurrently.
struct AppState {
    pipeline: SentimentPipeline,
}

#[derive(Deserialize)]
struct AnalyzeBody {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Deserialize)]
struct ReportBody {
    subject: String,
    #[serde(flatten)]
    input: AnalyzeBody,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let pipeline = match SentimentPipeline::new() {
        Ok(pipeline) => pipeline,
        Err(err) => {
            error!("failed to initialize pipeline: {err}");
            std::process::exit(1);
        }
    };
    let state = Arc::new(AppState { pipeline });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/analyze", post(analyze_handler))
        .route("/report", post(report_handler))
        .layer(cors)
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind("0.0.0.0:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind 0.0.0.0:3000: {err}");
            std::process::exit(1);
        }
    };
    info!("sentiment server listening on http://localhost:3000");
    if let Err(err) = axum::serve(listener, app).await {
        error!("server error: {err}");
    }
}

/// Serves the dashboard page.
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Runs a full analysis and returns the raw result as JSON.
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeBody>,
) -> impl IntoResponse {
    let request = match build_request(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let state = Arc::clone(&state);
    match run_analysis(state, request).await {
        Ok(result) => Json(serde_json::to_value(&*result).unwrap_or_default()).into_response(),
        Err(err) => error_response(err),
    }
}

/// Runs an analysis and renders the Markdown report plus the spoken
/// summary handed to audio synthesis.
async fn report_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReportBody>,
) -> impl IntoResponse {
    if body.subject.trim().is_empty() {
        return error_response(AnalysisError::InvalidRequest(
            "subject must not be empty".into(),
        ));
    }
    let request = match build_request(&body.input) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let state = Arc::clone(&state);
    let result = match run_analysis(state, request).await {
        Ok(result) => result,
        Err(err) => return error_response(err),
    };

    let document_text: String = result
        .sentence_scores
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let topics = extract_topics(&document_text, 5);
    let subject = body.subject.trim();

    Json(serde_json::json!({
        "report": render_report(subject, &result, &topics),
        "spoken_summary": render_spoken_summary(subject, &result),
        "topics": topics,
        "result": &*result,
    }))
    .into_response()
}

/// Translates the loosely-typed JSON body into a pipeline request,
/// rejecting ambiguous or empty input up front.
fn build_request(body: &AnalyzeBody) -> Result<AnalysisRequest, axum::response::Response> {
    let request = match (&body.text, &body.url) {
        (Some(_), Some(_)) => {
            return Err(error_response(AnalysisError::InvalidRequest(
                "provide either 'text' or 'url', not both".into(),
            )))
        }
        (None, None) => {
            return Err(error_response(AnalysisError::InvalidRequest(
                "provide 'text' or 'url'".into(),
            )))
        }
        (Some(text), None) => AnalysisRequest::text(text),
        (None, Some(url)) => AnalysisRequest::url(url),
    };
    Ok(match &body.language {
        Some(language) => request.with_language(language),
        None => request,
    })
}

/// Runs the synchronous pipeline on the blocking thread pool so network
/// fetches never stall the async runtime.
async fn run_analysis(
    state: Arc<AppState>,
    request: AnalysisRequest,
) -> Result<Arc<sentiment_core::AnalysisResult>, AnalysisError> {
    tokio::task::spawn_blocking(move || state.pipeline.analyze(&request))
        .await
        .map_err(|err| AnalysisError::Internal(format!("analysis task panicked: {err}")))?
}

fn error_response(err: AnalysisError) -> axum::response::Response {
    let status = match &err {
        AnalysisError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        AnalysisError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisError::Fetch { .. } => StatusCode::BAD_GATEWAY,
        AnalysisError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error!("request failed: {err}");
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}
