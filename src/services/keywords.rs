use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{FavoriteBook, KeywordChip, KeywordEntry, KeywordWeight},
    services::providers::BookService,
};

/// Maximum number of aggregated keywords kept for display and selection
pub const KEYWORD_LIMIT: usize = 50;

/// Merges per-book keyword vectors into one ranked list
///
/// Weights of a word are summed across books and `source_count` counts the vectors that
/// contained it. The result is sorted by descending weight, ties keeping first-encountered
/// order, and cut to [`KEYWORD_LIMIT`].
pub fn merge_keywords<I>(vectors: I) -> Vec<KeywordEntry>
where
    I: IntoIterator<Item = Vec<KeywordWeight>>,
{
    let mut entries: Vec<KeywordEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for vector in vectors {
        for KeywordWeight { word, weight } in vector {
            match index.get(&word) {
                Some(&i) => {
                    entries[i].weight += weight;
                    entries[i].source_count += 1;
                }
                None => {
                    index.insert(word.clone(), entries.len());
                    entries.push(KeywordEntry {
                        word,
                        weight,
                        source_count: 1,
                    });
                }
            }
        }
    }

    // sort_by is stable, so equal weights stay in merge order
    entries.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    entries.truncate(KEYWORD_LIMIT);
    entries
}

/// Fetches keyword vectors for every favorite and merges them
///
/// Fetches run in parallel but are merged in favorite-set order, so the outcome does not
/// depend on completion order. A failed book is skipped; only when every fetch fails is
/// the aggregation an error.
pub async fn aggregate(
    provider: Arc<dyn BookService>,
    books: Vec<FavoriteBook>,
) -> AppResult<Vec<KeywordEntry>> {
    if books.is_empty() {
        return Ok(Vec::new());
    }

    let mut tasks = Vec::new();
    for book in books {
        let provider = provider.clone();
        let task = tokio::spawn(async move {
            let result = provider.keywords_of(book.id).await;
            (book, result)
        });
        tasks.push(task);
    }

    let mut vectors = Vec::new();
    let mut error_count = 0usize;

    for task in tasks {
        match task.await {
            Ok((_, Ok(keywords))) => vectors.push(keywords),
            Ok((book, Err(e))) => {
                tracing::warn!(
                    book = %book.name,
                    book_id = %book.id,
                    error = %e,
                    "Keyword fetch failed for book"
                );
                error_count += 1;
            }
            Err(e) => {
                tracing::error!(error = %e, "Task join error");
                error_count += 1;
            }
        }
    }

    if vectors.is_empty() && error_count > 0 {
        tracing::error!(error_count, "Keyword fetch failed for every favorite");
        return Err(AppError::ExternalApi(
            "Failed to fetch any keyword data".to_string(),
        ));
    }

    if error_count > 0 {
        tracing::warn!(
            success_count = vectors.len(),
            error_count,
            "Partial keyword fetch failure"
        );
    }

    Ok(merge_keywords(vectors))
}

/// Words the user picked from the aggregated keyword list
#[derive(Debug, Clone, Default)]
pub struct KeywordSelection {
    words: HashSet<String>,
}

impl KeywordSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `word`
    pub fn toggle(&mut self, word: &str) {
        if !self.words.remove(word) {
            self.words.insert(word.to_string());
        }
    }

    pub fn select_all(&mut self, entries: &[KeywordEntry]) {
        self.words = entries.iter().map(|e| e.word.clone()).collect();
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Drops selected words that are no longer in `entries`
    pub fn retain_present(&mut self, entries: &[KeywordEntry]) {
        let present: HashSet<&str> = entries.iter().map(|e| e.word.as_str()).collect();
        self.words.retain(|w| present.contains(w.as_str()));
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Selected words in the ranking order of `entries`
    pub fn ordered(&self, entries: &[KeywordEntry]) -> Vec<String> {
        entries
            .iter()
            .filter(|e| self.words.contains(&e.word))
            .map(|e| e.word.clone())
            .collect()
    }
}

/// Display chips for the aggregated keywords
pub fn chips(entries: &[KeywordEntry], selection: &KeywordSelection) -> Vec<KeywordChip> {
    entries
        .iter()
        .map(|e| KeywordChip {
            word: e.word.clone(),
            weight_percent: (e.weight * 100.0).round() as i64,
            selected: selection.contains(&e.word),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookId;
    use crate::services::providers::MockBookService;

    fn kw(word: &str, weight: f64) -> KeywordWeight {
        KeywordWeight::new(word, weight)
    }

    fn book(name: &str, id: u64) -> FavoriteBook {
        FavoriteBook {
            name: name.to_string(),
            id: BookId(id),
        }
    }

    #[test]
    fn test_merge_sums_weights_and_counts_sources() {
        let merged = merge_keywords(vec![
            vec![kw("love", 0.3), kw("war", 0.2)],
            vec![kw("love", 0.5)],
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].word, "love");
        assert!((merged[0].weight - 0.8).abs() < 1e-9);
        assert_eq!(merged[0].source_count, 2);
        assert_eq!(merged[1].word, "war");
        assert_eq!(merged[1].source_count, 1);
    }

    #[test]
    fn test_merge_is_commutative() {
        let a = vec![kw("space", 0.4), kw("physics", 0.25), kw("war", 0.1)];
        let b = vec![kw("war", 0.3), kw("space", 0.2), kw("family", 0.05)];

        let ab = merge_keywords(vec![a.clone(), b.clone()]);
        let ba = merge_keywords(vec![b, a]);

        let weights = |entries: &[KeywordEntry]| -> HashMap<String, (i64, u32)> {
            entries
                .iter()
                .map(|e| (e.word.clone(), ((e.weight * 1e9).round() as i64, e.source_count)))
                .collect()
        };
        assert_eq!(weights(&ab), weights(&ba));
    }

    #[test]
    fn test_merge_ties_keep_first_encountered_order() {
        let merged = merge_keywords(vec![
            vec![kw("b", 0.5), kw("a", 0.5)],
            vec![kw("c", 0.5)],
        ]);
        let words: Vec<&str> = merged.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_merge_truncates_to_top_fifty() {
        let vector: Vec<KeywordWeight> = (0..80)
            .map(|i| kw(&format!("w{}", i), i as f64 / 100.0))
            .collect();

        let merged = merge_keywords(vec![vector]);
        assert_eq!(merged.len(), KEYWORD_LIMIT);
        assert_eq!(merged[0].word, "w79");
        assert_eq!(merged[49].word, "w30");
        assert!(merged.windows(2).all(|w| w[0].weight >= w[1].weight));
    }

    #[test]
    fn test_selection_toggle_and_retain() {
        let entries = merge_keywords(vec![vec![kw("love", 0.3), kw("war", 0.2)]]);
        let mut selection = KeywordSelection::new();

        selection.toggle("love");
        selection.toggle("war");
        selection.toggle("war");
        assert!(selection.contains("love"));
        assert!(!selection.contains("war"));

        selection.select_all(&entries);
        assert_eq!(selection.ordered(&entries), vec!["love", "war"]);

        let shrunk = merge_keywords(vec![vec![kw("war", 0.2)]]);
        selection.retain_present(&shrunk);
        assert_eq!(selection.len(), 1);
        assert!(!selection.contains("love"));

        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_chips_show_rounded_percent_and_selection() {
        let entries = merge_keywords(vec![vec![kw("love", 0.456), kw("war", 0.004)]]);
        let mut selection = KeywordSelection::new();
        selection.toggle("war");

        let chips = chips(&entries, &selection);
        assert_eq!(chips[0].weight_percent, 46);
        assert!(!chips[0].selected);
        assert_eq!(chips[1].weight_percent, 0);
        assert!(chips[1].selected);
    }

    #[tokio::test]
    async fn test_aggregate_skips_failed_books() {
        let mut mock = MockBookService::new();
        mock.expect_keywords_of().returning(|id| match id.0 {
            1 => Ok(vec![kw("love", 0.3)]),
            2 => Err(AppError::ExternalApi("书籍不存在".to_string())),
            _ => Ok(vec![kw("love", 0.5), kw("sea", 0.1)]),
        });

        let merged = aggregate(
            Arc::new(mock),
            vec![book("A", 1), book("B", 2), book("C", 3)],
        )
        .await
        .unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].source_count, 2);
        assert!((merged[0].weight - 0.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_aggregate_total_failure_is_an_error() {
        let mut mock = MockBookService::new();
        mock.expect_keywords_of()
            .times(2)
            .returning(|_| Err(AppError::ExternalApi("down".to_string())));

        let result = aggregate(Arc::new(mock), vec![book("A", 1), book("B", 2)]).await;
        tokio_test::assert_err!(result);
    }

    #[tokio::test]
    async fn test_aggregate_empty_set_makes_no_calls() {
        let mock = MockBookService::new();
        let merged = aggregate(Arc::new(mock), Vec::new()).await.unwrap();
        assert!(merged.is_empty());
    }
}
