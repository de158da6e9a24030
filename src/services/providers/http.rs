/// HTTP provider for the book recommendation backend
///
/// Every endpoint answers with a `{ success, data, message }` envelope. A `success: false`
/// body is a failed call whatever the HTTP status, and a body that is not an envelope is
/// reported with the status that came with it.
///
/// API Flow:
/// 1. Search: GET /api/search?q=&limit= → ranked hits with book IDs
/// 2. Keywords: GET /api/book/{id}/keywords → (word, weight) pairs
/// 3. Recommend: POST /api/recommend → ranked recommendations
/// 4. Stats: GET /api/stats → catalogue counts
use std::time::Duration;

use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{
        ApiEnvelope, BookHit, BookId, KeywordWeight, KeywordsData, RecommendData, Recommendation,
        RecommendationRequest, SearchData, Stats,
    },
    services::providers::BookService,
};

#[derive(Clone)]
pub struct HttpBookService {
    http_client: HttpClient,
    api_url: String,
}

impl HttpBookService {
    /// Creates a provider whose every call is bounded by `timeout`
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        let api_url = api_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            api_url,
        })
    }

    /// Decodes an envelope from any response, successful status or not
    async fn read_envelope<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<ApiEnvelope<T>>(&body) {
            Ok(envelope) => envelope.into_data(),
            Err(e) if status.is_success() => {
                tracing::error!(
                    error = %e,
                    response = %body,
                    "Failed to deserialize book service response"
                );
                Err(AppError::ExternalApi(format!(
                    "Failed to parse book service response: {}",
                    e
                )))
            }
            Err(_) => Err(AppError::ExternalApi(format!(
                "Book service returned status {}: {}",
                status, body
            ))),
        }
    }
}

#[async_trait::async_trait]
impl BookService for HttpBookService {
    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<BookHit>> {
        let url = format!("{}/api/search", self.api_url);
        let limit = limit.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query), ("limit", limit.as_str())])
            .send()
            .await?;

        let data: SearchData = Self::read_envelope(response).await?;

        tracing::debug!(
            query = %query,
            results = data.results.len(),
            provider = self.name(),
            "Book search completed"
        );

        Ok(data.results)
    }

    async fn keywords_of(&self, book_id: BookId) -> AppResult<Vec<KeywordWeight>> {
        let url = format!("{}/api/book/{}/keywords", self.api_url, book_id);

        let response = self.http_client.get(&url).send().await?;
        let data: KeywordsData = Self::read_envelope(response).await?;

        tracing::debug!(
            book_id = %book_id,
            keywords = data.keywords.len(),
            provider = self.name(),
            "Keywords fetched"
        );

        Ok(data.keywords)
    }

    async fn recommend(&self, request: &RecommendationRequest) -> AppResult<Vec<Recommendation>> {
        let url = format!("{}/api/recommend", self.api_url);

        let response = self.http_client.post(&url).json(request).send().await?;
        let data: RecommendData = Self::read_envelope(response).await?;

        tracing::info!(
            favorites = request.favorite_books.len(),
            strategy = ?request.strategy,
            recommendations = data.recommendations.len(),
            provider = self.name(),
            "Recommendations fetched"
        );

        Ok(data.recommendations)
    }

    async fn stats(&self) -> AppResult<Stats> {
        let url = format!("{}/api/stats", self.api_url);

        let response = self.http_client.get(&url).send().await?;
        Self::read_envelope(response).await
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Strategy;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn provider_for(server: &MockServer) -> HttpBookService {
        HttpBookService::new(server.uri(), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_query_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .and(query_param("q", "三体"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "query": "三体",
                    "results": [
                        {"book_id": 1, "book_name": "三体", "rating": 8.8},
                        {"book_id": 2, "book_name": "三体II：黑暗森林", "rating": 9.1}
                    ],
                    "total": 2
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let hits = provider_for(&server).await.search("三体", 10).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].book_name, "三体II：黑暗森林");
        assert_eq!(hits[1].book_id, BookId(2));
    }

    #[tokio::test]
    async fn test_keywords_failure_envelope_on_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/book/99/keywords"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "message": "书籍不存在"
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .await
            .keywords_of(BookId(99))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ExternalApi(ref msg) if msg == "书籍不存在"));
    }

    #[tokio::test]
    async fn test_non_envelope_error_body_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = provider_for(&server).await.stats().await.unwrap_err();
        match err {
            AppError::ExternalApi(msg) => assert!(msg.contains("503"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_recommend_posts_request_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/recommend"))
            .and(body_json(json!({
                "favorite_books": ["Dune"],
                "top_k": 20,
                "strategy": "mixed",
                "relations": ["author"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "recommendations": [
                        {"book_name": "Dune Messiah", "score": 0.93, "rating": 8.1,
                         "reasons": ["Same author"], "book_url": "https://example.org/b/2"}
                    ],
                    "total": 1
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = RecommendationRequest {
            favorite_books: vec!["Dune".to_string()],
            top_k: 20,
            strategy: Strategy::Mixed,
            relations: Some(vec![crate::models::Relation::Author]),
            selected_keywords: None,
        };
        let recs = provider_for(&server)
            .await
            .recommend(&request)
            .await
            .unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].reasons, vec!["Same author".to_string()]);
    }

    #[tokio::test]
    async fn test_timeout_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "data": {}}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let provider = HttpBookService::new(server.uri(), Duration::from_millis(50)).unwrap();
        let err = provider.stats().await.unwrap_err();
        assert!(matches!(err, AppError::HttpClient(ref e) if e.is_timeout()));
    }
}
