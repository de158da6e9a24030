use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

use crate::error::{AppError, AppResult};

pub mod strategy;
pub mod view;

pub use strategy::{Relation, Strategy};
pub use view::{
    KeywordChip, KeywordPanel, Notice, NoticeLevel, RecommendationCard, ResultsBody, ResultsPanel,
    ResultsView, SessionView, StatsView, Suggestion, SuggestionState,
};

/// Identifier the remote service assigns to a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub u64);

impl Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A member of the favorite set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteBook {
    pub name: String,
    pub id: BookId,
}

/// One word of the aggregated keyword vocabulary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordEntry {
    pub word: String,
    /// Sum of the weights every contributing book gave this word
    pub weight: f64,
    /// Number of favorite books that contributed the word
    pub source_count: u32,
}

// ============================================================================
// Remote Service Types
// ============================================================================

/// Response envelope every remote endpoint wraps its payload in
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the payload, treating `success: false` or a missing payload as a failed call
    pub fn into_data(self) -> AppResult<T> {
        if !self.success {
            return Err(AppError::ExternalApi(
                self.message
                    .unwrap_or_else(|| "Remote service reported a failure".to_string()),
            ));
        }
        self.data.ok_or_else(|| {
            AppError::ExternalApi("Remote service response is missing its payload".to_string())
        })
    }
}

/// Reads a scraped rating that may arrive as a number, a numeric string, `null` or `""`
///
/// Anything that does not parse to a finite number becomes `None`.
fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRating {
        Number(f64),
        Text(String),
        Other(serde_json::Value),
    }

    let rating = match Option::<RawRating>::deserialize(deserializer)? {
        Some(RawRating::Number(n)) => Some(n),
        Some(RawRating::Text(text)) => text.trim().parse::<f64>().ok(),
        Some(RawRating::Other(_)) | None => None,
    };
    Ok(rating.filter(|r| r.is_finite()))
}

/// A search hit returned by `/api/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookHit {
    pub book_id: BookId,
    pub book_name: String,
    #[serde(default)]
    pub book_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub results: Vec<BookHit>,
}

/// A (word, weight) pair from `/api/book/{id}/keywords`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordWeight {
    pub word: String,
    pub weight: f64,
}

impl KeywordWeight {
    pub fn new(word: impl Into<String>, weight: f64) -> Self {
        Self {
            word: word.into(),
            weight,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordsData {
    #[serde(default)]
    pub keywords: Vec<KeywordWeight>,
}

/// Body posted to `/api/recommend`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub favorite_books: Vec<String>,
    pub top_k: usize,
    pub strategy: Strategy,
    /// Present only for strategies that use relations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relations: Option<Vec<Relation>>,
    /// Absent means "use every keyword"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_keywords: Option<Vec<String>>,
}

/// A ranked recommendation; rank is its position in the returned list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub book_name: String,
    /// Match score in [0, 1]
    pub score: f64,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub book_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendData {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// Aggregate counts from `/api/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub books: u64,
    pub authors: u64,
    pub publishers: u64,
    #[serde(default)]
    pub translators: Option<u64>,
    #[serde(default)]
    pub series: Option<u64>,
    #[serde(default)]
    pub total_entities: Option<u64>,
    pub total_relations: u64,
}
