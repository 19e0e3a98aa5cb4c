//! Error types for the site server

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use site_content::ContentError;
use thiserror::Error;

use crate::pages;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("Invalid form submission: {0}")]
    InvalidForm(String),

    #[error("Content error: {0}")]
    Content(ContentError),
}

impl From<ContentError> for ServerError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::NotFound(slug) => ServerError::NotFound(slug),
            other => ServerError::Content(other),
        }
    }
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            ServerError::Content(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ServerError::NotFound(_) => pages::not_found_page(),
            ServerError::InvalidForm(msg) => pages::error_page(status, msg),
            ServerError::Content(err) => {
                tracing::error!("Failed to render page: {}", err);
                // Content errors carry filesystem paths; keep them in the log
                pages::error_page(status, "This page could not be rendered.")
            }
        };

        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_city_maps_to_404() {
        let err = ServerError::from(ContentError::NotFound("atlantis".to_string()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_broken_content_maps_to_500() {
        let err = ServerError::from(ContentError::FrontMatter {
            slug: "oakville".to_string(),
            message: "bad yaml".to_string(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ServerError::from(ContentError::Io {
            path: PathBuf::from("content/cities"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_form_is_bad_request() {
        assert_eq!(
            ServerError::InvalidForm("unknown form".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
