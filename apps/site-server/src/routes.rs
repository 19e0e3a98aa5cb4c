//! HTTP handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::Uri,
    response::{Html, Redirect},
    routing::get,
    Json, Router,
};
use lead_form::{FormFields, LeadSubmission, FORM_NAME, SUCCESS_PARAM};
use serde::Serialize;
use site_content::{CityDocument, ContentLibrary};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::SiteConfig;
use crate::error::ServerError;
use crate::pages;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    fn library(&self) -> ContentLibrary {
        self.config.library()
    }
}

pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.assets_dir);

    Router::new()
        .route("/", get(handle_home).post(handle_lead))
        .route("/cities/:slug", get(handle_city).post(handle_lead))
        .route("/cities/:slug/", get(handle_city).post(handle_lead))
        .route("/forms", get(handle_form_registration))
        .route("/health", get(handle_health))
        .nest_service("/pkg", assets)
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Every city that loads; a broken file is logged and left off the list
/// instead of taking the home page down with it
pub fn listed_cities(library: &ContentLibrary) -> Result<Vec<CityDocument>, ServerError> {
    let cities = library
        .slugs()?
        .iter()
        .filter_map(|slug| match library.load(slug) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("Skipping city '{}': {}", slug, e);
                None
            }
        })
        .collect();
    Ok(cities)
}

pub async fn handle_home(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let cities = listed_cities(&state.library())?;
    Ok(Html(pages::home_page(&cities)))
}

pub async fn handle_city(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, ServerError> {
    let library = state.library();
    let page = library.render(&slug)?;
    let cities = listed_cities(&library)?;
    Ok(Html(pages::city_page(&page, &cities)))
}

/// Local stand-in for the static-form backend
///
/// Accepts the urlencoded POST a page makes to its own path and answers the
/// way the hosted backend does: a redirect back with `?success=true`.
pub async fn handle_lead(uri: Uri, body: String) -> Result<Redirect, ServerError> {
    let fields = FormFields::parse_urlencoded(&body);
    let lead = LeadSubmission::from_fields(&fields);

    if !lead.is_registered_form() {
        return Err(ServerError::InvalidForm(format!(
            "unknown form '{}', expected '{}'",
            lead.form_name, FORM_NAME
        )));
    }

    if lead.is_spam() {
        warn!("Dropping honeypot submission posted to {}", uri.path());
    } else {
        info!(
            city = %lead.city,
            state = %lead.state,
            name = %lead.name,
            phone = %lead.phone,
            email = %lead.email,
            has_message = lead.message.is_some(),
            "Lead received"
        );
    }

    Ok(Redirect::to(&format!("{}?{}=true", uri.path(), SUCCESS_PARAM)))
}

pub async fn handle_form_registration() -> Html<String> {
    Html(pages::form_registration_page())
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn handle_not_found(uri: Uri) -> ServerError {
    ServerError::NotFound(uri.path().to_string())
}
