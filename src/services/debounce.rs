use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::{
    i18n::Locale,
    models::{Suggestion, SuggestionState},
    services::providers::BookService,
};

/// Quiet period after the last keystroke before a search is issued
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Maximum number of suggestions requested per search
pub const SUGGESTION_LIMIT: usize = 10;

/// Turns raw keystrokes into at most one search per quiet period
///
/// Each input takes a new token. A scheduled search only fires if its token is still the
/// latest when the delay elapses, and its response is only published if the token is still
/// the latest when it arrives. Superseded network calls are left to finish but ignored.
pub struct SearchDebouncer {
    provider: Arc<dyn BookService>,
    locale: Locale,
    delay: Duration,
    latest: Arc<AtomicU64>,
    suggestions: Arc<watch::Sender<SuggestionState>>,
}

impl SearchDebouncer {
    pub fn new(provider: Arc<dyn BookService>, locale: Locale) -> Self {
        Self::with_delay(provider, locale, DEBOUNCE_DELAY)
    }

    pub fn with_delay(provider: Arc<dyn BookService>, locale: Locale, delay: Duration) -> Self {
        let (suggestions, _) = watch::channel(SuggestionState::Hidden);
        Self {
            provider,
            locale,
            delay,
            latest: Arc::new(AtomicU64::new(0)),
            suggestions: Arc::new(suggestions),
        }
    }

    pub fn current(&self) -> SuggestionState {
        self.suggestions.borrow().clone()
    }

    /// Handles one keystroke worth of input
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_input(&self, raw: &str) {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let query = raw.trim().to_string();

        if query.is_empty() {
            self.suggestions.send_replace(SuggestionState::Hidden);
            return;
        }

        let provider = self.provider.clone();
        let latest = self.latest.clone();
        let suggestions = self.suggestions.clone();
        let locale = self.locale;
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) != token {
                return;
            }

            let result = provider.search(&query, SUGGESTION_LIMIT).await;

            if latest.load(Ordering::SeqCst) != token {
                tracing::debug!(query = %query, "Discarding superseded search response");
                return;
            }

            let state = match result {
                Ok(hits) if !hits.is_empty() => SuggestionState::Shown {
                    suggestions: hits
                        .into_iter()
                        .map(|hit| Suggestion::from_hit(hit, locale))
                        .collect(),
                },
                Ok(_) => SuggestionState::Hidden,
                Err(e) => {
                    tracing::warn!(query = %query, error = %e, "Suggestion search failed");
                    SuggestionState::Hidden
                }
            };
            suggestions.send_replace(state);
        });
    }

    /// Cancels any pending search and hides suggestions
    pub fn dismiss(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        self.suggestions.send_replace(SuggestionState::Hidden);
    }
}
