//! The controller that owns every piece of client state
//!
//! All mutations go through [`Session`]; the UI layer only sends actions and reads
//! [`SessionView`] snapshots back.
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult, Rejection},
    i18n::{Label, Locale},
    models::{
        FavoriteBook, KeywordEntry, KeywordPanel, Notice, Relation, ResultsPanel, SessionView,
        StatsView, Strategy, SuggestionState,
    },
    services::{
        debounce::SearchDebouncer,
        favorites::FavoriteSet,
        keywords::{self, KeywordSelection},
        providers::BookService,
        renderer, request_builder,
        strategy::StrategySelector,
    },
};

/// Candidates requested when resolving a typed name to a book ID
const RESOLVE_LIMIT: usize = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum KeywordStatus {
    #[default]
    Hidden,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Default)]
struct SessionState {
    favorites: FavoriteSet,
    keywords: Vec<KeywordEntry>,
    keyword_status: KeywordStatus,
    selection: KeywordSelection,
    selector: StrategySelector,
    results: ResultsPanel,
    /// Bumped when results are hidden or a new request starts
    results_epoch: u64,
}

pub struct Session {
    provider: Arc<dyn BookService>,
    locale: Locale,
    debouncer: SearchDebouncer,
    state: RwLock<SessionState>,
}

impl Session {
    pub fn new(provider: Arc<dyn BookService>, locale: Locale) -> Self {
        Self::with_debouncer(provider.clone(), locale, SearchDebouncer::new(provider, locale))
    }

    pub fn with_debouncer(
        provider: Arc<dyn BookService>,
        locale: Locale,
        debouncer: SearchDebouncer,
    ) -> Self {
        Self {
            provider,
            locale,
            debouncer,
            state: RwLock::new(SessionState::default()),
        }
    }

    fn reject(&self, rejection: Rejection) -> AppError {
        rejection.into_error(self.locale)
    }

    // ------------------------------------------------------------------
    // Search suggestions
    // ------------------------------------------------------------------

    pub fn on_input(&self, raw: &str) {
        self.debouncer.on_input(raw);
    }

    pub fn suggestions(&self) -> SuggestionState {
        self.debouncer.current()
    }

    // ------------------------------------------------------------------
    // Favorite set
    // ------------------------------------------------------------------

    /// Resolves `raw` to a book and appends it to the favorites
    pub async fn add_favorite(&self, raw: &str) -> AppResult<Notice> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(self.reject(Rejection::EmptyInput));
        }
        if self.state.read().await.favorites.contains(name) {
            return Err(self.reject(Rejection::AlreadyAdded(name.to_string())));
        }

        let hits = self
            .provider
            .search(name, RESOLVE_LIMIT)
            .await
            .map_err(|e| {
                tracing::error!(book = %name, error = %e, "Book lookup failed");
                self.reject(Rejection::AddFailed)
            })?;
        let Some(hit) = hits.into_iter().next() else {
            return Err(self.reject(Rejection::BookNotFound(name.to_string())));
        };

        let (version, books) = {
            let mut state = self.state.write().await;
            // the set may have changed while the lookup was in flight
            if !state.favorites.insert(name.to_string(), hit.book_id) {
                return Err(self.reject(Rejection::AlreadyAdded(name.to_string())));
            }
            state.keyword_status = KeywordStatus::Loading;
            (state.favorites.version(), state.favorites.books().to_vec())
        };

        tracing::info!(book = %name, book_id = %hit.book_id, "Favorite added");
        self.debouncer.dismiss();
        self.refresh_keywords(version, books).await;

        Ok(Notice::success(self.locale.with_title(Label::BookAdded, name)))
    }

    /// Removes a favorite by name; `None` when it was not a member
    pub async fn remove_favorite(&self, name: &str) -> Option<Notice> {
        let (version, books) = {
            let mut state = self.state.write().await;
            if !state.favorites.remove(name) {
                return None;
            }
            if !state.favorites.is_empty() {
                state.keyword_status = KeywordStatus::Loading;
            }
            (state.favorites.version(), state.favorites.books().to_vec())
        };

        tracing::info!(book = %name, "Favorite removed");
        self.refresh_keywords(version, books).await;

        Some(Notice::info(self.locale.with_title(Label::BookRemoved, name)))
    }

    /// Empties the favorites and everything derived from them
    ///
    /// A no-op on an empty set; otherwise the caller must pass the user's confirmation.
    pub async fn clear_favorites(&self, confirmed: bool) -> AppResult<Option<Notice>> {
        let mut state = self.state.write().await;
        if state.favorites.is_empty() {
            return Ok(None);
        }
        if !confirmed {
            return Err(self.reject(Rejection::NotConfirmed));
        }

        state.favorites.clear();
        state.keywords.clear();
        state.selection.clear();
        state.keyword_status = KeywordStatus::Hidden;
        state.results = ResultsPanel::Hidden;
        state.results_epoch += 1;

        tracing::info!("Favorites cleared");
        Ok(Some(Notice::info(self.locale.label(Label::Cleared))))
    }

    /// Recomputes the keyword list for the favorite set at `version`
    ///
    /// The outcome is dropped if the set changed while keywords were being fetched.
    async fn refresh_keywords(&self, version: u64, books: Vec<FavoriteBook>) {
        let outcome = if books.is_empty() {
            None
        } else {
            Some(keywords::aggregate(self.provider.clone(), books).await)
        };

        let mut state = self.state.write().await;
        if state.favorites.version() != version {
            tracing::debug!(
                computed_for = version,
                current = state.favorites.version(),
                "Discarding stale keyword aggregation"
            );
            return;
        }

        match outcome {
            None => {
                state.keywords.clear();
                state.selection.clear();
                state.keyword_status = KeywordStatus::Hidden;
            }
            Some(Ok(entries)) => {
                state.selection.retain_present(&entries);
                tracing::info!(
                    keywords = entries.len(),
                    selected = state.selection.len(),
                    "Keywords aggregated"
                );
                state.keywords = entries;
                state.keyword_status = KeywordStatus::Ready;
            }
            Some(Err(e)) => {
                tracing::error!(error = %e, "Keyword aggregation failed");
                state.keywords.clear();
                state.selection.clear();
                state.keyword_status = KeywordStatus::Failed;
            }
        }
    }

    // ------------------------------------------------------------------
    // Keyword selection
    // ------------------------------------------------------------------

    /// Flips selection of a displayed keyword; unknown words are ignored
    pub async fn toggle_keyword(&self, word: &str) -> bool {
        let mut state = self.state.write().await;
        if !state.keywords.iter().any(|e| e.word == word) {
            return false;
        }
        state.selection.toggle(word);
        true
    }

    pub async fn select_all_keywords(&self) -> Notice {
        let mut state = self.state.write().await;
        let SessionState {
            keywords,
            selection,
            ..
        } = &mut *state;
        selection.select_all(keywords);
        Notice::info(self.locale.label(Label::KeywordsSelected))
    }

    pub async fn clear_keyword_selection(&self) -> Notice {
        self.state.write().await.selection.clear();
        Notice::info(self.locale.label(Label::KeywordsCleared))
    }

    // ------------------------------------------------------------------
    // Strategy and relations
    // ------------------------------------------------------------------

    pub async fn set_strategy(&self, strategy: Strategy) {
        self.state.write().await.selector.set_strategy(strategy);
    }

    pub async fn set_relations(&self, relations: Vec<Relation>) {
        self.state.write().await.selector.set_relations(relations);
    }

    pub async fn toggle_relation(&self, relation: Relation) {
        self.state.write().await.selector.toggle_relation(relation);
    }

    // ------------------------------------------------------------------
    // Recommendations
    // ------------------------------------------------------------------

    /// Builds a request from the current state, sends it once and renders the answer
    ///
    /// Returns `None` when the answer arrived after the results were hidden or a newer
    /// request started, in which case it is dropped.
    pub async fn recommend(&self) -> AppResult<Option<Notice>> {
        let (request, epoch) = {
            let mut state = self.state.write().await;
            let request = request_builder::build_request(
                &state.favorites,
                &state.selector,
                &state.keywords,
                &state.selection,
            )
            .map_err(|rejection| self.reject(rejection))?;

            state.results_epoch += 1;
            state.results = ResultsPanel::Loading;
            (request, state.results_epoch)
        };

        tracing::info!(
            favorites = request.favorite_books.len(),
            strategy = ?request.strategy,
            relations = ?request.relations,
            selected_keywords = request.selected_keywords.as_ref().map_or(0, Vec::len),
            "Requesting recommendations"
        );

        let outcome = self.provider.recommend(&request).await;

        let mut state = self.state.write().await;
        if state.results_epoch != epoch {
            tracing::debug!(epoch, "Discarding superseded recommendation response");
            return Ok(None);
        }

        match outcome {
            Ok(recommendations) => {
                let view = renderer::render_results(
                    &recommendations,
                    request.strategy,
                    request.relations.as_deref(),
                    self.locale,
                );
                let count = view.len();
                state.results = ResultsPanel::Ready { view };

                Ok(Some(Notice::success(format!(
                    "{} {} {}",
                    self.locale.label(Label::RecommendSuccess),
                    count,
                    self.locale.label(Label::RecommendBooks)
                ))))
            }
            Err(e) => {
                tracing::error!(error = %e, "Recommendation request failed");
                let message = match &e {
                    AppError::ExternalApi(msg) => msg.clone(),
                    _ => self.locale.label(Label::RecommendFailed).to_string(),
                };
                state.results = ResultsPanel::Failed { message };
                Err(self.reject(Rejection::RecommendFailed(e.to_string())))
            }
        }
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub async fn stats(&self) -> AppResult<StatsView> {
        let stats = self.provider.stats().await?;
        Ok(renderer::render_stats(&stats, self.locale))
    }

    pub async fn view(&self) -> SessionView {
        let state = self.state.read().await;

        let keywords = match state.keyword_status {
            KeywordStatus::Hidden => KeywordPanel::Hidden,
            KeywordStatus::Loading => KeywordPanel::Loading,
            KeywordStatus::Failed => KeywordPanel::Failed {
                message: self.locale.label(Label::KeywordsFailed).to_string(),
            },
            KeywordStatus::Ready if state.keywords.is_empty() => KeywordPanel::Empty {
                message: self.locale.label(Label::KeywordsEmpty).to_string(),
            },
            KeywordStatus::Ready => KeywordPanel::Ready {
                chips: keywords::chips(&state.keywords, &state.selection),
            },
        };

        SessionView {
            favorites: state.favorites.books().to_vec(),
            can_recommend: !state.favorites.is_empty(),
            keywords,
            strategy: state.selector.strategy(),
            relations: state.selector.relations().to_vec(),
            relations_enabled: state.selector.relations_enabled(),
            suggestions: self.debouncer.current(),
            results: state.results.clone(),
        }
    }
}
