//! Presentation models handed to the UI layer
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{BookHit, BookId, FavoriteBook, Relation, Strategy};
use crate::i18n::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Transient user-facing message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub book_id: BookId,
    pub book_name: String,
    pub rating: Option<f64>,
    pub rating_text: String,
}

impl Suggestion {
    pub fn from_hit(hit: BookHit, locale: Locale) -> Self {
        // the service reports unrated books as 0
        let rating = hit.rating.filter(|r| *r > 0.0);
        Suggestion {
            book_id: hit.book_id,
            book_name: hit.book_name,
            rating,
            rating_text: locale.rating_text(rating),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SuggestionState {
    #[default]
    Hidden,
    Shown { suggestions: Vec<Suggestion> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordChip {
    pub word: String,
    /// Aggregated weight as a rounded percentage of 1.0
    pub weight_percent: i64,
    pub selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum KeywordPanel {
    /// No favorites, nothing to show
    #[default]
    Hidden,
    Loading,
    Ready { chips: Vec<KeywordChip> },
    /// Aggregation finished with no keywords at all
    Empty { message: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationCard {
    /// 1-based position in the server's list
    pub rank: usize,
    pub book_name: String,
    /// `score * 100` with one decimal place
    pub score_percent: String,
    pub rating: Option<f64>,
    pub rating_text: String,
    /// Omitted when the server gave no reasons
    pub reasons: Option<Vec<String>>,
    pub detail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultsBody {
    NoResults { message: String },
    Cards { cards: Vec<RecommendationCard> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub subtitle: String,
    pub body: ResultsBody,
}

impl ResultsView {
    pub fn is_empty(&self) -> bool {
        matches!(self.body, ResultsBody::NoResults { .. })
    }

    pub fn len(&self) -> usize {
        match &self.body {
            ResultsBody::NoResults { .. } => 0,
            ResultsBody::Cards { cards } => cards.len(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResultsPanel {
    #[default]
    Hidden,
    Loading,
    Ready { view: ResultsView },
    Failed { message: String },
}

/// Display-ready aggregate counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    pub books: String,
    pub authors: String,
    pub publishers: String,
    pub relations: String,
}

/// Everything the UI needs to draw the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub favorites: Vec<FavoriteBook>,
    pub can_recommend: bool,
    pub keywords: KeywordPanel,
    pub strategy: Strategy,
    pub relations: Vec<Relation>,
    /// False when the current strategy ignores relations
    pub relations_enabled: bool,
    pub suggestions: SuggestionState,
    pub results: ResultsPanel,
}
