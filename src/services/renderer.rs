use crate::{
    i18n::{Label, Locale},
    models::{
        RecommendationCard, Recommendation, Relation, ResultsBody, ResultsView, Stats, StatsView,
        Strategy,
    },
};

/// Maps a recommendation list to its presentation
///
/// The server's order is the ranking; cards are numbered from 1 in that order and never
/// re-sorted. `relations` is the set the request was sent with, if any.
pub fn render_results(
    recommendations: &[Recommendation],
    strategy: Strategy,
    relations: Option<&[Relation]>,
    locale: Locale,
) -> ResultsView {
    let subtitle = subtitle(strategy, relations, locale);

    if recommendations.is_empty() {
        return ResultsView {
            subtitle,
            body: ResultsBody::NoResults {
                message: locale.label(Label::NoResults).to_string(),
            },
        };
    }

    let cards = recommendations
        .iter()
        .enumerate()
        .map(|(index, rec)| RecommendationCard {
            rank: index + 1,
            book_name: rec.book_name.clone(),
            score_percent: format!("{:.1}", rec.score * 100.0),
            rating: rec.rating.filter(|r| *r > 0.0),
            rating_text: locale.rating_text(rec.rating),
            reasons: (!rec.reasons.is_empty()).then(|| rec.reasons.clone()),
            detail_url: rec.book_url.clone().filter(|url| !url.is_empty()),
        })
        .collect();

    ResultsView {
        subtitle,
        body: ResultsBody::Cards { cards },
    }
}

fn subtitle(strategy: Strategy, relations: Option<&[Relation]>, locale: Locale) -> String {
    let mut text = format!(
        "{} ({})",
        locale.label(Label::ResultsSubtitle),
        locale.strategy_name(strategy)
    );

    if let Some(relations) = relations.filter(|r| !r.is_empty()) {
        let names: Vec<&str> = relations.iter().map(|r| locale.relation_name(*r)).collect();
        text.push_str(" - ");
        text.push_str(&names.join(locale.list_separator()));
    }

    text
}

/// Formats a catalogue count for display
///
/// Chinese output abbreviates counts of ten thousand and up with 万.
pub fn format_count(count: u64, locale: Locale) -> String {
    match locale {
        Locale::Zh if count >= 10_000 => format!("{:.1}万", count as f64 / 10_000.0),
        _ => group_thousands(count),
    }
}

fn group_thousands(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn render_stats(stats: &Stats, locale: Locale) -> StatsView {
    StatsView {
        books: format_count(stats.books, locale),
        authors: format_count(stats.authors, locale),
        publishers: format_count(stats.publishers, locale),
        relations: format_count(stats.total_relations, locale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, score: f64) -> Recommendation {
        Recommendation {
            book_name: name.to_string(),
            score,
            rating: None,
            reasons: Vec::new(),
            book_url: None,
        }
    }

    #[test]
    fn test_empty_list_renders_no_results() {
        let view = render_results(&[], Strategy::KeywordOnly, None, Locale::En);
        assert!(view.is_empty());
        assert_eq!(
            view.body,
            ResultsBody::NoResults {
                message: "No suitable recommendations found".to_string()
            }
        );
    }

    #[test]
    fn test_cards_keep_server_order() {
        let recs = vec![rec("Low first", 0.2), rec("High second", 0.95)];
        let view = render_results(&recs, Strategy::KeywordOnly, None, Locale::En);

        let ResultsBody::Cards { cards } = view.body else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].rank, 1);
        assert_eq!(cards[0].book_name, "Low first");
        assert_eq!(cards[1].rank, 2);
        assert_eq!(cards[1].score_percent, "95.0");
    }

    #[test]
    fn test_card_optional_parts() {
        let mut full = rec("球状闪电", 0.8768);
        full.rating = Some(8.6);
        full.reasons = vec!["同一作者：刘慈欣".to_string()];
        full.book_url = Some("https://book.douban.com/subject/1/".to_string());
        let mut bare = rec("无名", 0.5);
        bare.rating = Some(0.0);
        bare.book_url = Some(String::new());

        let view = render_results(&[full, bare], Strategy::Mixed, None, Locale::Zh);
        let ResultsBody::Cards { cards } = view.body else {
            panic!("expected cards");
        };

        assert_eq!(cards[0].score_percent, "87.7");
        assert_eq!(cards[0].rating, Some(8.6));
        assert_eq!(cards[0].rating_text, "8.6");
        assert_eq!(cards[0].reasons.as_deref(), Some(&["同一作者：刘慈欣".to_string()][..]));
        assert!(cards[0].detail_url.is_some());

        assert_eq!(cards[1].rating, None);
        assert_eq!(cards[1].rating_text, "暂无评分");
        assert_eq!(cards[1].reasons, None);
        assert_eq!(cards[1].detail_url, None);
    }

    #[test]
    fn test_subtitle_lists_relations_in_pick_order() {
        let relations = [Relation::Publisher, Relation::Author];
        let view = render_results(&[], Strategy::KgOnly, Some(&relations[..]), Locale::En);
        assert_eq!(
            view.subtitle,
            "Based on your reading preferences, we have selected the following books \
             (Knowledge Graph) - Publisher, Author"
        );

        let view = render_results(&[], Strategy::Mixed, Some(&relations[..]), Locale::Zh);
        assert!(view.subtitle.ends_with("(混合推荐) - 出版社、作者"));
    }

    #[test]
    fn test_subtitle_without_relations() {
        let view = render_results(&[], Strategy::KeywordOnly, None, Locale::En);
        assert!(view.subtitle.ends_with("(Content Similarity)"));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(9_999, Locale::Zh), "9,999");
        assert_eq!(format_count(123_456, Locale::Zh), "12.3万");
        assert_eq!(format_count(123_456, Locale::En), "123,456");
        assert_eq!(format_count(7, Locale::En), "7");
        assert_eq!(format_count(1_000_000, Locale::En), "1,000,000");
    }
}
