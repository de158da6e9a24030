use crate::models::{Relation, Strategy};

/// Chosen recommendation strategy and relation types
///
/// Relations are kept in the order the user picked them. They survive a switch to a
/// strategy that ignores them but are not reported as effective until the strategy uses
/// relations again.
#[derive(Debug, Clone, Default)]
pub struct StrategySelector {
    strategy: Strategy,
    relations: Vec<Relation>,
}

impl StrategySelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    /// Replaces the relation set, dropping repeats but keeping first-pick order
    pub fn set_relations(&mut self, relations: impl IntoIterator<Item = Relation>) {
        self.relations.clear();
        for relation in relations {
            if !self.relations.contains(&relation) {
                self.relations.push(relation);
            }
        }
    }

    pub fn toggle_relation(&mut self, relation: Relation) {
        match self.relations.iter().position(|r| *r == relation) {
            Some(index) => {
                self.relations.remove(index);
            }
            None => self.relations.push(relation),
        }
    }

    /// Relations as currently checked, whether or not the strategy uses them
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn relations_enabled(&self) -> bool {
        self.strategy.uses_relations()
    }

    /// Relations a request would use; `None` when the strategy ignores them
    pub fn effective_relations(&self) -> Option<&[Relation]> {
        self.relations_enabled().then_some(self.relations.as_slice())
    }
}
