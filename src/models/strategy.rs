use serde::{Deserialize, Serialize};

/// Recommendation algorithm variant requested from the remote service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Knowledge-graph relations combined with comment keywords
    #[default]
    Mixed,
    /// Knowledge-graph relations only
    KgOnly,
    /// Comment keyword similarity only
    KeywordOnly,
}

impl Strategy {
    /// Whether requests with this strategy must carry a non-empty relation set
    pub fn uses_relations(self) -> bool {
        matches!(self, Strategy::Mixed | Strategy::KgOnly)
    }
}

/// Knowledge-graph edge type usable to constrain graph-based strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Series,
    Author,
    Translator,
    Publisher,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_serialization() {
        assert_eq!(serde_json::to_string(&Strategy::Mixed).unwrap(), "\"mixed\"");
        assert_eq!(serde_json::to_string(&Strategy::KgOnly).unwrap(), "\"kg_only\"");
        assert_eq!(
            serde_json::to_string(&Strategy::KeywordOnly).unwrap(),
            "\"keyword_only\""
        );
    }

    #[test]
    fn test_uses_relations() {
        assert!(Strategy::Mixed.uses_relations());
        assert!(Strategy::KgOnly.uses_relations());
        assert!(!Strategy::KeywordOnly.uses_relations());
    }

    #[test]
    fn test_relation_rejects_unknown_value() {
        let parsed: Result<Relation, _> = serde_json::from_str("\"editor\"");
        assert!(parsed.is_err());
        let author: Relation = serde_json::from_str("\"author\"").unwrap();
        assert_eq!(author, Relation::Author);
    }
}
