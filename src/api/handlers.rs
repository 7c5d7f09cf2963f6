use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::models::*,
    catalog::{CatalogController, FuzzySearch, Recipe, RecipeStore},
    config::site::SiteConfig,
    Error, Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecipeStore>,
    pub engine: Arc<FuzzySearch>,
    pub site: Arc<SiteConfig>,
    pub settings: crate::config::Settings,
}

impl AppState {
    pub fn new(store: RecipeStore, site: SiteConfig, settings: crate::config::Settings) -> Self {
        let engine = FuzzySearch::from_config(&settings.search);
        Self {
            store: Arc::new(store),
            engine: Arc::new(engine),
            site: Arc::new(site),
            settings,
        }
    }
}

/// GET /api/recipes - Search and page through the catalog
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<CatalogResponse>> {
    debug!("Catalog request: {:?}", params);

    let page_size = params
        .limit
        .unwrap_or(state.settings.pagination.page_size)
        .min(state.settings.pagination.api_max_page_size);
    if page_size == 0 {
        return Err(Error::Validation("limit must be at least 1".to_string()));
    }

    let view = CatalogController::browse(
        &state.store,
        &state.engine,
        page_size,
        &params.s,
        params.page,
    );

    Ok(Json(CatalogResponse::from_view(&view, page_size)))
}

/// GET /api/recipes/:id - Get recipe details
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>> {
    debug!("Get recipe request: {}", id);

    let recipe = state
        .store
        .get(&id)
        .ok_or_else(|| Error::NotFound(format!("Recipe {id} not found")))?;

    Ok(Json(recipe.clone()))
}

/// GET /api/stats - Get catalog statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>> {
    debug!("Get stats request");

    Ok(Json(Stats {
        total_recipes: state.store.len(),
        page_size: state.settings.pagination.page_size,
        search_threshold: state.engine.threshold(),
    }))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    // An empty store is still servable: the catalog shows "not found"
    let recipe_store = if state.store.is_empty() { "empty" } else { "ok" };

    Ok(Json(ReadinessResponse {
        ready: true,
        recipe_store: recipe_store.to_string(),
    }))
}
