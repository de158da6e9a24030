use crate::{
    error::Rejection,
    models::{KeywordEntry, RecommendationRequest},
    services::{favorites::FavoriteSet, keywords::KeywordSelection, strategy::StrategySelector},
};

/// Number of recommendations requested
pub const TOP_K: usize = 20;

/// Builds a recommendation request from the current selections
///
/// Preconditions are checked in order: a non-empty favorite set, then a non-empty relation
/// set for strategies that use relations. `relations` is only sent for those strategies
/// and `selected_keywords` only when the user picked at least one word.
pub fn build_request(
    favorites: &FavoriteSet,
    selector: &StrategySelector,
    keywords: &[KeywordEntry],
    selection: &KeywordSelection,
) -> Result<RecommendationRequest, Rejection> {
    if favorites.is_empty() {
        return Err(Rejection::NoFavorites);
    }

    let relations = match selector.effective_relations() {
        Some([]) => return Err(Rejection::NoRelations),
        Some(relations) => Some(relations.to_vec()),
        None => None,
    };

    let selected_keywords = if selection.is_empty() {
        None
    } else {
        Some(selection.ordered(keywords))
    };

    Ok(RecommendationRequest {
        favorite_books: favorites.names(),
        top_k: TOP_K,
        strategy: selector.strategy(),
        relations,
        selected_keywords,
    })
}
