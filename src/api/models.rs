use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntry, CatalogView, MatchedField, PageLink, Recipe};

/// Catalog request parameters
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogParams {
    /// Search term, same key the web UI puts in its URLs
    #[serde(default)]
    pub s: String,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Catalog response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub query: String,
    pub page_items: Vec<RecipeCard>,
    pub pagination: Pagination,
}

/// Recipe card for catalog results
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCard {
    pub id: String,
    pub name: String,
    pub image: String,
    pub summary: Option<String>,
    pub prep_time: Option<String>,
    /// 1.0 for a perfect match; absent when no query was applied
    pub score: Option<f64>,
    pub matched: Option<MatchedField>,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_results: usize,
    pub page_number_list: Vec<PageLink>,
}

/// System statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_recipes: usize,
    pub page_size: usize,
    pub search_threshold: f64,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub recipe_store: String,
}

impl From<&CatalogEntry<'_>> for RecipeCard {
    fn from(entry: &CatalogEntry<'_>) -> Self {
        let recipe: &Recipe = entry.recipe;
        RecipeCard {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            summary: recipe.summary().map(str::to_string),
            prep_time: recipe.prep_time.clone(),
            score: entry.field.map(|_| 1.0 - entry.distance),
            matched: entry.field,
        }
    }
}

impl CatalogResponse {
    pub fn from_view(view: &CatalogView<'_>, page_size: usize) -> Self {
        CatalogResponse {
            query: view.query.clone(),
            page_items: view.page_items.iter().map(RecipeCard::from).collect(),
            pagination: Pagination {
                current_page: view.current_page,
                page_size,
                total_pages: view.total_pages,
                total_results: view.total_results,
                page_number_list: view.page_numbers.clone(),
            },
        }
    }
}
