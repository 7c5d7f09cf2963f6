use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Deserializer};

use crate::{
    api::handlers::AppState,
    catalog::{CatalogController, CatalogEntry, CatalogView, PageLink, Recipe},
    config::site::{AboutContent, HeroContent},
    error::Error,
    Result,
};

const FALLBACK_SUMMARY: &str = "Resep lengkap tersedia di detail.";
const FALLBACK_PREP_TIME: &str = "15–20 Min";

/// Deserialize optional string, treating empty strings as None
fn deserialize_optional_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => Ok(Some(s.to_string())),
    }
}

/// Deserialize an optional page number, ignoring values that are not numbers
fn deserialize_optional_page<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.and_then(|s| s.trim().parse().ok()))
}

fn render<T: Template>(template: &T) -> Result<Html<String>> {
    template
        .render()
        .map(Html)
        .map_err(|e| Error::Internal(format!("Template render failed: {e}")))
}

/// Link to a catalog page, keeping the search term in `s`
fn catalog_href(query: &str, page: usize) -> String {
    if query.is_empty() {
        format!("/recipes?page={page}")
    } else {
        format!("/recipes?s={}&page={page}", urlencoding::encode(query))
    }
}

#[derive(Clone)]
#[allow(dead_code)] // Fields are used by Askama templates
struct RecipeCardData {
    id: String,
    name: String,
    image: String,
    summary: String,
    prep_time: String,
}

impl From<&Recipe> for RecipeCardData {
    fn from(recipe: &Recipe) -> Self {
        RecipeCardData {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            summary: recipe.summary().unwrap_or(FALLBACK_SUMMARY).to_string(),
            prep_time: recipe
                .prep_time
                .clone()
                .unwrap_or_else(|| FALLBACK_PREP_TIME.to_string()),
        }
    }
}

impl From<&CatalogEntry<'_>> for RecipeCardData {
    fn from(entry: &CatalogEntry<'_>) -> Self {
        RecipeCardData::from(entry.recipe)
    }
}

#[derive(Clone)]
#[allow(dead_code)] // Fields are used by Askama templates
struct PageLinkData {
    label: String,
    href: String,
    is_current: bool,
    is_ellipsis: bool,
}

fn page_links(view: &CatalogView<'_>) -> Vec<PageLinkData> {
    view.page_numbers
        .iter()
        .map(|link| match link {
            PageLink::Page(number) => PageLinkData {
                label: number.to_string(),
                href: catalog_href(&view.query, *number),
                is_current: *number == view.current_page,
                is_ellipsis: false,
            },
            PageLink::Ellipsis => PageLinkData {
                label: "...".to_string(),
                href: String::new(),
                is_current: false,
                is_ellipsis: true,
            },
        })
        .collect()
}

/// Landing page template
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    site_name: String,
    hero: HeroContent,
    about: AboutContent,
    featured: Vec<RecipeCardData>,
}

/// GET / - Landing page
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let featured = state
        .store
        .records()
        .iter()
        .take(state.site.hero.featured_count)
        .map(RecipeCardData::from)
        .collect();

    let template = IndexTemplate {
        site_name: state.site.name.clone(),
        hero: state.site.hero.clone(),
        about: state.site.about.clone(),
        featured,
    };

    render(&template)
}

/// About page template
#[derive(Template)]
#[template(path = "about.html")]
struct AboutTemplate {
    site_name: String,
    about: AboutContent,
}

/// GET /about - About page
pub async fn about_page(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let template = AboutTemplate {
        site_name: state.site.name.clone(),
        about: state.site.about.clone(),
    };
    render(&template)
}

/// Catalog page template
#[derive(Template)]
#[template(path = "recipes.html")]
struct RecipesTemplate {
    site_name: String,
    query: String,
    results: Vec<RecipeCardData>,
    total_results: usize,
    range_start: usize,
    range_end: usize,
    page_links: Vec<PageLinkData>,
    has_previous: bool,
    has_next: bool,
    previous_href: String,
    next_href: String,
}

#[derive(Deserialize)]
pub struct CatalogPageParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    s: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_page")]
    page: Option<usize>,
}

/// GET /recipes - Searchable, paginated catalog
pub async fn recipes_page(
    State(state): State<AppState>,
    Query(params): Query<CatalogPageParams>,
) -> Result<impl IntoResponse> {
    let view = CatalogController::browse(
        &state.store,
        &state.engine,
        state.settings.pagination.page_size,
        params.s.as_deref().unwrap_or_default(),
        params.page,
    );

    let template = RecipesTemplate {
        site_name: state.site.name.clone(),
        query: view.query.clone(),
        results: view.page_items.iter().map(RecipeCardData::from).collect(),
        total_results: view.total_results,
        range_start: view.start_index + 1,
        range_end: view.end_index,
        page_links: page_links(&view),
        has_previous: view.has_previous,
        has_next: view.has_next,
        previous_href: catalog_href(&view.query, view.current_page.saturating_sub(1).max(1)),
        next_href: catalog_href(&view.query, view.current_page + 1),
    };

    render(&template)
}

/// Recipe detail page template
#[derive(Template)]
#[template(path = "recipe.html")]
struct RecipeTemplate {
    site_name: String,
    recipe: RecipeData,
    schema_json: String,
}

#[derive(Clone)]
#[allow(dead_code)] // Fields are used by Askama templates
struct RecipeData {
    id: String,
    name: String,
    image: String,
    ingredients: Vec<String>,
    steps: Vec<String>,
    prep_time: String,
    cook_time: String,
    servings: String,
    difficulty: String,
}

impl From<&Recipe> for RecipeData {
    fn from(recipe: &Recipe) -> Self {
        RecipeData {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            ingredients: recipe.ingredient_list().to_vec(),
            steps: recipe.steps().into_iter().map(str::to_string).collect(),
            prep_time: recipe.prep_time.clone().unwrap_or_default(),
            cook_time: recipe.cook_time.clone().unwrap_or_default(),
            servings: recipe.servings.map(|s| s.to_string()).unwrap_or_default(),
            difficulty: recipe.difficulty.clone().unwrap_or_default(),
        }
    }
}

/// GET /recipe/:id - Recipe detail page
pub async fn recipe_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let Some(recipe) = state.store.get(&id) else {
        return not_found_page(&state.site.name);
    };

    let page_url = state
        .settings
        .server
        .external_url
        .as_deref()
        .map(|base| format!("{}/recipe/{}", base.trim_end_matches('/'), recipe.id));
    let schema = super::schema::recipe_to_schema_json(recipe, page_url.as_deref());
    let schema_json = serde_json::to_string_pretty(&schema)
        .unwrap_or_else(|_| "{}".to_string())
        // keep the JSON from closing the surrounding <script> element
        .replace("</", "<\\/");

    let template = RecipeTemplate {
        site_name: state.site.name.clone(),
        recipe: RecipeData::from(recipe),
        schema_json,
    };

    Ok(render(&template)?.into_response())
}

/// Not found page template
#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    site_name: String,
}

fn not_found_page(site_name: &str) -> Result<Response> {
    let template = NotFoundTemplate {
        site_name: site_name.to_string(),
    };
    Ok((StatusCode::NOT_FOUND, render(&template)?).into_response())
}

/// Fallback for unknown paths
pub async fn not_found(State(state): State<AppState>) -> Result<Response> {
    not_found_page(&state.site.name)
}
