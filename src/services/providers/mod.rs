/// Remote book service abstraction
///
/// The recommendation backend exposes search, per-book keywords, recommendation and
/// statistics endpoints. The session only talks to it through this trait so the
/// transport can be swapped or mocked.
use crate::{
    error::AppResult,
    models::{BookHit, BookId, KeywordWeight, Recommendation, RecommendationRequest, Stats},
};

pub mod http;

pub use http::HttpBookService;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BookService: Send + Sync {
    /// Search books by name
    ///
    /// Results come back in the server's ranking order, at most `limit` of them.
    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<BookHit>>;

    /// Fetch the keyword-weight vector of one book
    async fn keywords_of(&self, book_id: BookId) -> AppResult<Vec<KeywordWeight>>;

    /// Request a ranked recommendation list
    async fn recommend(&self, request: &RecommendationRequest) -> AppResult<Vec<Recommendation>>;

    /// Aggregate catalogue counts
    async fn stats(&self) -> AppResult<Stats>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
