//! HTTP surface for the UI layer.
//!
//! Three core routes (`GET /profile`, `POST /profile`, `POST /generate`)
//! plus `GET /health` and `GET /modules`. All responses are JSON; the
//! status contract is 401 for unresolvable identity, 400 for validation
//! failures, 500 with a generic message (detail logged) for store and
//! generation failures.

use crate::backend;
use crate::config::{AppConfig, DEFAULT_BIND};
use anyhow::Result;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use brandbrief_application::{GenerateUseCase, ProfileUseCase};
use brandbrief_core::BriefError;
use brandbrief_core::identity::IdentityResolver;
use brandbrief_core::module::ModuleRegistry;
use brandbrief_core::profile::Profile;
use brandbrief_infrastructure::{DirProfileStore, TokenFileIdentityResolver};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

pub struct AppState {
    pub profiles: ProfileUseCase,
    pub generate: GenerateUseCase,
}

/// Builds the router over shared application state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/profile", get(get_profile).post(post_profile))
        .route("/generate", post(post_generate))
        .route("/modules", get(get_modules))
        .with_state(state)
}

/// Binds and serves the HTTP API.
pub async fn run(
    bind: Option<&str>,
    base_dir: Option<&Path>,
    auth_token: Option<&str>,
    model: Option<&str>,
) -> Result<()> {
    let config = AppConfig::load(base_dir)?;
    let bind = bind
        .map(str::to_string)
        .or(config.bind)
        .unwrap_or_else(|| DEFAULT_BIND.to_string());

    let store = Arc::new(DirProfileStore::new(base_dir).await?);
    let identity: Arc<dyn IdentityResolver> = match auth_token {
        // One inline token mapped to the local user, for single-user serving.
        Some(token) => Arc::new(TokenFileIdentityResolver::from_tokens(HashMap::from([(
            token.to_string(),
            "local".to_string(),
        )]))),
        None => Arc::new(TokenFileIdentityResolver::new(base_dir)?),
    };
    let generator = backend::build_generator(model.or(config.model.as_deref()));

    let state = Arc::new(AppState {
        profiles: ProfileUseCase::new(identity.clone(), store.clone()),
        generate: GenerateUseCase::new(identity, store, generator),
    });

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("Serving profile API: http://{local_addr}/profile");
    tracing::info!("Generate endpoint: http://{local_addr}/generate");
    tracing::info!("Health endpoint: http://{local_addr}/health");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Maps an application error to its HTTP response.
///
/// Store and generation details never reach the client; they are logged and
/// replaced with a generic message.
fn error_response(err: BriefError) -> Response {
    let (status, message) = match &err {
        BriefError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        BriefError::Validation { .. } | BriefError::UnknownModule { .. } => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        BriefError::Store(detail) => {
            tracing::error!("profile store failure: {detail}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The profile store is unavailable. Please try again.".to_string(),
            )
        }
        BriefError::Generation(detail) => {
            tracing::error!("generation failure: {detail}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Generation failed. Please try again.".to_string(),
            )
        }
        other => {
            tracing::error!("unexpected failure: {other}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };
    (status, Json(json!({ "error": message }))).into_response()
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_profile(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    match state.profiles.fetch_stored(bearer_token(&headers)).await {
        Ok(Some(profile)) => (StatusCode::OK, Json(profile)).into_response(),
        Ok(None) => (StatusCode::OK, Json(Value::Null)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn post_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(profile): Json<Profile>,
) -> Response {
    match state.profiles.save(bearer_token(&headers), &profile).await {
        Ok(persisted) => (StatusCode::OK, Json(persisted)).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    #[serde(rename = "moduleId", default)]
    module_id: Option<String>,
    #[serde(default)]
    input: Value,
}

async fn post_generate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<GenerateRequest>,
) -> Response {
    let result = state
        .generate
        .generate(
            bearer_token(&headers),
            body.module_id.as_deref(),
            &body.input,
        )
        .await;
    match result {
        Ok(text) => (StatusCode::OK, Json(json!({ "result": text }))).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_modules() -> Json<Value> {
    Json(json!(ModuleRegistry::global().infos()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandbrief_interaction::PlaceholderGenerator;
    use tempfile::TempDir;

    const TOKEN: &str = "s3cr3t";

    async fn state(temp: &TempDir) -> Arc<AppState> {
        let store = Arc::new(DirProfileStore::new(Some(temp.path())).await.unwrap());
        let identity: Arc<dyn IdentityResolver> =
            Arc::new(TokenFileIdentityResolver::from_tokens(HashMap::from([(
                TOKEN.to_string(),
                "user-1".to_string(),
            )])));
        Arc::new(AppState {
            profiles: ProfileUseCase::new(identity.clone(), store.clone()),
            generate: GenerateUseCase::new(identity, store, Arc::new(PlaceholderGenerator)),
        })
    }

    fn auth_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, format!("Bearer {TOKEN}").parse().unwrap());
        headers
    }

    fn usable_profile() -> Profile {
        let mut profile = Profile::default();
        profile.business_name = "Acme".to_string();
        profile.short_description = "Handmade candles".to_string();
        profile.industry = "retail".to_string();
        profile
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_unauthenticated_get_profile_is_401() {
        let temp = TempDir::new().unwrap();
        let state = state(&temp).await;

        let response = get_profile(State(state), HeaderMap::new()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn test_unauthenticated_post_profile_is_401() {
        let temp = TempDir::new().unwrap();
        let state = state(&temp).await;

        let response =
            post_profile(State(state), HeaderMap::new(), Json(Profile::default())).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unauthenticated_generate_is_401() {
        let temp = TempDir::new().unwrap();
        let state = state(&temp).await;

        let body = GenerateRequest {
            module_id: Some("reply-assistant".to_string()),
            input: json!({}),
        };
        let response = post_generate(State(state), HeaderMap::new(), Json(body)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_get_profile_without_record_is_null() {
        let temp = TempDir::new().unwrap();
        let state = state(&temp).await;

        let response = get_profile(State(state), auth_headers()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, Value::Null);
    }

    #[tokio::test]
    async fn test_post_then_get_profile_round_trips() {
        let temp = TempDir::new().unwrap();
        let state = state(&temp).await;

        let response = post_profile(
            State(state.clone()),
            auth_headers(),
            Json(usable_profile()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["businessName"], "Acme");

        let response = get_profile(State(state), auth_headers()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["businessName"], "Acme");
    }

    #[tokio::test]
    async fn test_generate_with_missing_module_id_is_400() {
        let temp = TempDir::new().unwrap();
        let state = state(&temp).await;

        let body = GenerateRequest {
            module_id: None,
            input: json!({}),
        };
        let response = post_generate(State(state), auth_headers(), Json(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value = body_json(response).await;
        assert!(value["error"].as_str().unwrap().contains("moduleId"));
    }

    #[tokio::test]
    async fn test_generate_with_unknown_module_is_400() {
        let temp = TempDir::new().unwrap();
        let state = state(&temp).await;

        let body = GenerateRequest {
            module_id: Some("not-a-real-module".to_string()),
            input: json!({}),
        };
        let response = post_generate(State(state), auth_headers(), Json(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value = body_json(response).await;
        assert!(value["error"].as_str().unwrap().contains("not-a-real-module"));
    }

    #[tokio::test]
    async fn test_generate_with_missing_input_names_the_field() {
        let temp = TempDir::new().unwrap();
        let state = state(&temp).await;
        post_profile(
            State(state.clone()),
            auth_headers(),
            Json(usable_profile()),
        )
        .await;

        let body = GenerateRequest {
            module_id: Some("reply-assistant".to_string()),
            input: json!({}),
        };
        let response = post_generate(State(state), auth_headers(), Json(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value = body_json(response).await;
        assert!(value["error"].as_str().unwrap().contains("customerMessage"));
    }

    #[tokio::test]
    async fn test_generate_round_trip() {
        let temp = TempDir::new().unwrap();
        let state = state(&temp).await;
        post_profile(
            State(state.clone()),
            auth_headers(),
            Json(usable_profile()),
        )
        .await;

        let body = GenerateRequest {
            module_id: Some("reply-assistant".to_string()),
            input: json!({ "customerMessage": "Do you ship to Pune?" }),
        };
        let response = post_generate(State(state), auth_headers(), Json(body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert!(value["result"].as_str().unwrap().contains("placeholder"));
    }

    #[tokio::test]
    async fn test_generate_without_profile_is_400() {
        let temp = TempDir::new().unwrap();
        let state = state(&temp).await;

        let body = GenerateRequest {
            module_id: Some("website-content".to_string()),
            input: json!({}),
        };
        let response = post_generate(State(state), auth_headers(), Json(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value = body_json(response).await;
        assert!(
            value["error"]
                .as_str()
                .unwrap()
                .contains("business profile")
        );
    }

    #[tokio::test]
    async fn test_health_and_modules() {
        let response = health().await;
        assert_eq!(response.0["status"], "ok");

        let modules = get_modules().await;
        assert_eq!(modules.0.as_array().unwrap().len(), 8);
    }
}
