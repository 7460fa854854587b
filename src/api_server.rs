// Axum API Server Module
//
// Purpose: REST surface for the study front-end: recipe search per test
// group, recipe details, explanations, participant registration and the
// choice log export.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::EngineConfig;
use crate::data::{Catalog, PreparationReport};
use crate::experiment::{ChoiceLog, ChoiceRecord, ChoiceSource, Participant, RecipeView, TestGroup};
use crate::explanation::{
    Explanation, ExplanationGenerator, ExplanationProvider, ExplanationService, MarkdownFormatter,
};
use crate::scorer::SustainabilityScorer;
use crate::search::SearchEngine;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub report: Arc<PreparationReport>,
    pub search: Arc<SearchEngine>,
    pub explanations: Arc<ExplanationService>,
    pub participants: Arc<RwLock<FxHashMap<String, Participant>>>,
    pub choices: Arc<Mutex<ChoiceLog>>,
}

impl AppState {
    /// Load the catalog (or the fixture fallback) and build all services
    pub fn new(config: EngineConfig, catalog_path: Option<&FsPath>) -> Self {
        tracing::info!("Preparing recipe catalog...");
        let scorer = SustainabilityScorer::new(config.scoring.clone());
        let (catalog, report) = Catalog::load_or_fallback(catalog_path, &scorer);
        tracing::info!(
            "Catalog ready: {} recipes (degraded: {})",
            catalog.len(),
            catalog.is_degraded()
        );

        Self::from_catalog(config, catalog, report, None)
    }

    pub fn from_catalog(
        config: EngineConfig,
        catalog: Catalog,
        report: PreparationReport,
        provider: Option<Arc<dyn ExplanationProvider>>,
    ) -> Self {
        let generator = ExplanationGenerator::new(config.scoring.clone());
        let mut service = ExplanationService::new(generator, config.explanation.clone());
        if let Some(provider) = provider {
            tracing::info!("Explanation provider '{}' attached", provider.provider_name());
            service = service.with_provider(provider);
        }

        Self {
            catalog: Arc::new(catalog),
            report: Arc::new(report),
            search: Arc::new(SearchEngine::new(config.search)),
            explanations: Arc::new(service),
            participants: Arc::new(RwLock::new(FxHashMap::default())),
            choices: Arc::new(Mutex::new(ChoiceLog::new())),
        }
    }

    /// Registered participant's group, else the group their id hashes to,
    /// else an explicit `group` parameter
    async fn resolve_group(
        &self,
        participant: Option<&str>,
        group: Option<&str>,
    ) -> Result<TestGroup, AppError> {
        if let Some(id) = participant.map(str::trim).filter(|id| !id.is_empty()) {
            if let Some(p) = self.participants.read().await.get(id) {
                return Ok(p.test_group);
            }
            return Ok(TestGroup::assign(id));
        }

        match group {
            Some(g) => TestGroup::parse(g)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown test group '{}'", g))),
            None => Err(AppError::BadRequest(
                "Either 'participant' or 'group' is required".to_string(),
            )),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Recipe endpoints
        .route("/api/search", get(search_recipes))
        .route("/api/recipes/:id", get(get_recipe))
        .route("/api/recipes/:id/explanation", get(explain_recipe))

        // Experiment endpoints
        .route("/api/participants", post(register_participant))
        .route("/api/choices", post(record_choice))
        .route("/api/choices/export", get(export_choices))

        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub participant: Option<String>,
    pub group: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GroupParams {
    pub participant: Option<String>,
    pub group: Option<String>,
    /// "json" (default) or "markdown"
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResultView {
    pub rank: usize,
    #[serde(flatten)]
    pub recipe: RecipeView,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub group: TestGroup,
    pub count: usize,
    pub results: Vec<SearchResultView>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub participant_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceRequest {
    pub participant_id: String,
    pub recipe_id: u64,
    pub rank: usize,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub decision_time_seconds: f64,
    pub source: ChoiceSource,
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": if state.catalog.is_degraded() { "degraded" } else { "healthy" },
        "recipes": state.catalog.len(),
        "dropped_records": state.report.dropped.len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// GET /api/search?q=marha,hagyma&participant=p-17
async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let group = state
        .resolve_group(params.participant.as_deref(), params.group.as_deref())
        .await?;
    let query = params.q.unwrap_or_default();

    tracing::info!("Search '{}' for group {}", query, group);

    let catalog = state.catalog.clone();
    let engine = state.search.clone();
    let task_query = query.clone();

    // CPU-bound work: run in blocking thread pool
    let results = tokio::task::spawn_blocking(move || {
        let mut rng = StdRng::from_entropy();
        engine
            .search(catalog.recipes(), &task_query, group, &mut rng)
            .into_iter()
            .map(|hit| SearchResultView {
                rank: hit.rank,
                recipe: RecipeView::for_group(hit.recipe, group),
            })
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(SearchResponse {
        query,
        group,
        count: results.len(),
        results,
    }))
}

/// GET /api/recipes/:id?group=B
async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(params): Query<GroupParams>,
) -> Result<Json<RecipeView>, AppError> {
    let group = state
        .resolve_group(params.participant.as_deref(), params.group.as_deref())
        .await?;
    let recipe = state
        .catalog
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", id)))?;

    Ok(Json(RecipeView::for_group(recipe, group)))
}

/// GET /api/recipes/:id/explanation?group=C[&format=markdown]
///
/// Only groups that see explanations may request one.
async fn explain_recipe(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(params): Query<GroupParams>,
) -> Result<Response, AppError> {
    let group = state
        .resolve_group(params.participant.as_deref(), params.group.as_deref())
        .await?;
    if !group.shows_explanations() {
        return Err(AppError::Forbidden(format!(
            "Explanations are not shown to group {}",
            group
        )));
    }

    let recipe = state
        .catalog
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", id)))?;

    let explanation: Explanation = state.explanations.explain(recipe).await;

    match params.format.as_deref() {
        Some("markdown") | Some("md") => Ok((
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            MarkdownFormatter::format(&explanation),
        )
            .into_response()),
        _ => Ok(Json(explanation).into_response()),
    }
}

/// POST /api/participants - register, or start a new session for a returning id
async fn register_participant(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Participant>), AppError> {
    let id = payload.participant_id.trim().to_string();
    let mut participants = state.participants.write().await;

    if let Some(existing) = participants.get_mut(&id) {
        existing.start_session();
        tracing::info!("Participant {} returned (session {})", id, existing.session_count);
        return Ok((StatusCode::OK, Json(existing.clone())));
    }

    let participant =
        Participant::register(&id).map_err(|e| AppError::BadRequest(e.to_string()))?;
    tracing::info!("Participant {} registered in group {}", id, participant.test_group);
    participants.insert(id, participant.clone());

    Ok((StatusCode::CREATED, Json(participant)))
}

/// POST /api/choices
async fn record_choice(
    State(state): State<AppState>,
    Json(payload): Json<ChoiceRequest>,
) -> Result<(StatusCode, Json<ChoiceRecord>), AppError> {
    if payload.rank == 0 {
        return Err(AppError::BadRequest("rank is 1-based".to_string()));
    }

    let participant = state
        .participants
        .read()
        .await
        .get(payload.participant_id.trim())
        .cloned()
        .ok_or_else(|| {
            AppError::NotFound(format!("Participant {} not registered", payload.participant_id))
        })?;

    let recipe = state
        .catalog
        .get(payload.recipe_id)
        .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", payload.recipe_id)))?;

    let record = ChoiceRecord::new(
        &participant,
        recipe,
        payload.rank,
        &payload.query,
        payload.decision_time_seconds,
        payload.source,
    );
    state.choices.lock().await.record(record.clone());

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/choices/export - CSV of every recorded choice
async fn export_choices(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let csv = state
        .choices
        .lock()
        .await
        .to_csv()
        .map_err(|e| AppError::Internal(format!("CSV export failed: {:#}", e)))?;
    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
