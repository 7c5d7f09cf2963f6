use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

#[cfg(not(test))]
use {
    axum::extract::ConnectInfo,
    std::net::{IpAddr, SocketAddr},
    std::sync::Arc,
    tower_governor::{governor::GovernorConfigBuilder, key_extractor::KeyExtractor, GovernorLayer},
    tracing::warn,
};

use crate::api::handlers::{self as api_handlers, AppState};
use crate::config::Settings;
use crate::web::handlers as web_handlers;

/// Create the router with all endpoints (API + Web UI)
#[cfg_attr(test, allow(unused_variables))]
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    // Public API routes - read-only, no authentication required
    #[cfg_attr(test, allow(unused_mut))]
    let mut api_routes = Router::new()
        .route("/recipes", get(api_handlers::list_recipes))
        .route("/recipes/:id", get(api_handlers::get_recipe))
        .route("/stats", get(api_handlers::get_stats))
        .with_state(state.clone());

    // Rate limiting is keyed on the peer address from ConnectInfo, so the
    // server must be started with `into_make_service_with_connect_info`.
    // Requests without it (e.g. behind a proxy) share the localhost bucket.
    #[cfg(not(test))]
    {
        #[derive(Clone, Copy, Debug)]
        struct FallbackIpKeyExtractor;

        impl KeyExtractor for FallbackIpKeyExtractor {
            type Key = IpAddr;

            fn extract<B>(
                &self,
                req: &axum::http::Request<B>,
            ) -> Result<Self::Key, tower_governor::GovernorError> {
                if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
                    return Ok(addr.ip());
                }

                Ok(IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)))
            }
        }

        match GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_second(settings.server.api_rate_limit)
            .burst_size((settings.server.api_rate_limit as u32).saturating_mul(2))
            .finish()
        {
            Some(config) => {
                api_routes = api_routes.layer(GovernorLayer {
                    config: Arc::new(config),
                });
            }
            None => warn!("Invalid rate limit configuration, API rate limiting disabled"),
        }
    }

    let api_routes = api_routes;

    // Web UI routes
    let web_routes = Router::new()
        .route("/", get(web_handlers::index))
        .route("/about", get(web_handlers::about_page))
        .route("/recipes", get(web_handlers::recipes_page))
        .route("/recipe/:id", get(web_handlers::recipe_detail))
        .fallback(web_handlers::not_found)
        .with_state(state.clone());

    // Health check routes
    let health_routes = Router::new()
        .route("/health", get(api_handlers::health_check))
        .route("/ready", get(api_handlers::readiness_check))
        .with_state(state.clone());

    // Static file serving (recipe images, stylesheet)
    let static_routes = Router::new().nest_service(
        "/static",
        ServeDir::new(&settings.server.static_dir),
    );

    // Main router with middleware
    Router::new()
        .merge(web_routes)
        .merge(health_routes)
        .merge(static_routes)
        .nest("/api", api_routes)
        .layer(RequestBodyLimitLayer::new(
            settings.pagination.max_request_body_size,
        ))
        .layer(
            // CORS - allow all origins for the read-only public API
            CorsLayer::new()
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(
                "default-src 'self'; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'; img-src 'self' data: https:; font-src 'self' data:; object-src 'none'; base-uri 'self'",
            ),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecipeStore;
    use crate::config::site::SiteConfig;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn create_test_app() -> Router {
        let settings = crate::config::test_settings();
        let state = AppState::new(RecipeStore::bundled(), SiteConfig::default(), settings);
        create_router(state.clone(), &state.settings)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_routes_exist() {
        let (status, body) = get(create_test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("ok"));

        let (status, _) = get(create_test_app(), "/api/stats").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_catalog_first_page() {
        let (status, body) = get(create_test_app(), "/api/recipes").await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["pageItems"].as_array().unwrap().len(), 8);
        assert_eq!(json["pagination"]["currentPage"], 1);
        assert_eq!(json["pagination"]["totalPages"], 3);
        assert_eq!(
            json["pagination"]["pageNumberList"],
            serde_json::json!([1, 2, 3])
        );
        assert!(json["pageItems"][0]["score"].is_null());
    }

    #[tokio::test]
    async fn test_api_fuzzy_search() {
        let (status, body) = get(create_test_app(), "/api/recipes?s=nasi%20gorng").await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["query"], "nasi gorng");
        assert_eq!(json["pageItems"][0]["id"], "nasi-goreng");
        assert_eq!(json["pageItems"][0]["matched"]["field"], "name");
    }

    #[tokio::test]
    async fn test_api_page_is_clamped() {
        let (status, body) = get(create_test_app(), "/api/recipes?page=99").await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["pagination"]["currentPage"], 3);
        assert!(!json["pageItems"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_api_recipe_not_found() {
        let (status, body) = get(create_test_app(), "/api/recipes/does-not-exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("error"));

        let (status, body) = get(create_test_app(), "/api/recipes/rawon").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"cookTime\""));
    }

    #[tokio::test]
    async fn test_api_zero_limit_rejected() {
        let (status, _) = get(create_test_app(), "/api/recipes?limit=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_web_pages_render() {
        let (status, body) = get(create_test_app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Dari Ladang Lokal"));

        let (status, body) = get(create_test_app(), "/about").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Dukung Petani Lokal"));

        let (status, body) = get(create_test_app(), "/recipes?s=soto").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Soto Ayam"));

        let (status, body) = get(create_test_app(), "/recipe/rendang-sapi").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Rendang Sapi"));
        assert!(body.contains("application/ld+json"));
    }

    #[tokio::test]
    async fn test_web_not_found_paths() {
        let (status, body) = get(create_test_app(), "/recipes?s=qwxzvbnmpl").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Resep tidak ditemukan"));

        let (status, body) = get(create_test_app(), "/recipe/does-not-exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Resep tidak ditemukan"));

        let (status, _) = get(create_test_app(), "/no/such/page").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
