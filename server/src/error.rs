use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::context;
use thiserror::Error;
use tracing::error;

use crate::templates;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::MalformedPayload => (StatusCode::BAD_REQUEST, self.to_string()),
            _ => {
                error!("{self}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
        };

        let page = templates::render(
            "error.html",
            context! {
                title => "Error",
                status => status.as_u16(),
                message => message,
            },
        );

        match page {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, message).into_response(),
        }
    }
}
