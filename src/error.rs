use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{
    i18n::{Label, Locale},
    models::{Notice, NoticeLevel},
};

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    /// A user action that was refused; state was left untouched
    #[error("Rejected: {0}")]
    Rejected(Rejection, Notice),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Reasons a user action is refused before or instead of mutating state
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("input is empty")]
    EmptyInput,

    #[error("book already in favorites: {0}")]
    AlreadyAdded(String),

    #[error("no book matches: {0}")]
    BookNotFound(String),

    #[error("favorite set is empty")]
    NoFavorites,

    #[error("strategy requires at least one relation")]
    NoRelations,

    #[error("clearing favorites requires confirmation")]
    NotConfirmed,

    #[error("book lookup failed")]
    AddFailed,

    #[error("recommendation failed: {0}")]
    RecommendFailed(String),
}

impl Rejection {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Rejection::AddFailed | Rejection::RecommendFailed(_) => NoticeLevel::Error,
            Rejection::NotConfirmed => NoticeLevel::Info,
            _ => NoticeLevel::Warning,
        }
    }

    /// Localized notice shown to the user
    pub fn notice(&self, locale: Locale) -> Notice {
        let message = match self {
            Rejection::EmptyInput => locale.label(Label::InputBook).to_string(),
            Rejection::AlreadyAdded(_) => locale.label(Label::BookExists).to_string(),
            Rejection::BookNotFound(_) => locale.label(Label::BookNotFound).to_string(),
            Rejection::NoFavorites => locale.label(Label::SelectBook).to_string(),
            Rejection::NoRelations => locale.label(Label::SelectRelation).to_string(),
            Rejection::NotConfirmed => locale.label(Label::ConfirmClear).to_string(),
            Rejection::AddFailed => locale.label(Label::AddFailed).to_string(),
            Rejection::RecommendFailed(_) => locale.label(Label::RecommendFailed).to_string(),
        };
        Notice::new(self.level(), message)
    }

    pub fn into_error(self, locale: Locale) -> AppError {
        let notice = self.notice(locale);
        AppError::Rejected(self, notice)
    }

    fn status(&self) -> StatusCode {
        match self {
            Rejection::EmptyInput | Rejection::NoFavorites | Rejection::NoRelations => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Rejection::AlreadyAdded(_) => StatusCode::CONFLICT,
            Rejection::BookNotFound(_) => StatusCode::NOT_FOUND,
            Rejection::NotConfirmed => StatusCode::PRECONDITION_REQUIRED,
            Rejection::AddFailed | Rejection::RecommendFailed(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Rejected(rejection, notice) => (
                rejection.status(),
                json!({ "error": rejection.to_string(), "notice": notice }),
            ),
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, json!({ "error": msg })),
            AppError::HttpClient(_) => {
                (StatusCode::BAD_GATEWAY, json!({ "error": self.to_string() }))
            }
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
