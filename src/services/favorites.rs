use crate::models::{BookId, FavoriteBook};

/// Ordered, duplicate-free set of favorite books
///
/// Every mutation bumps `version`, so work computed against an older snapshot can be
/// recognized as stale when it completes.
#[derive(Debug, Clone, Default)]
pub struct FavoriteSet {
    books: Vec<FavoriteBook>,
    version: u64,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.books.iter().any(|b| b.name == name)
    }

    /// Appends a book; returns false if the name is already present
    pub fn insert(&mut self, name: String, id: BookId) -> bool {
        if self.contains(&name) {
            return false;
        }
        self.books.push(FavoriteBook { name, id });
        self.version += 1;
        true
    }

    /// Removes a book by name; returns false if it was absent
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(index) = self.books.iter().position(|b| b.name == name) else {
            return false;
        };
        self.books.remove(index);
        self.version += 1;
        true
    }

    pub fn clear(&mut self) {
        self.books.clear();
        self.version += 1;
    }

    pub fn books(&self) -> &[FavoriteBook] {
        &self.books
    }

    /// Names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.books.iter().map(|b| b.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(names: &[&str]) -> FavoriteSet {
        let mut set = FavoriteSet::new();
        for (i, name) in names.iter().enumerate() {
            set.insert(name.to_string(), BookId(i as u64 + 1));
        }
        set
    }

    #[test]
    fn test_insert_preserves_order() {
        let set = set_of(&["活着", "三体", "百年孤独"]);
        assert_eq!(set.names(), vec!["活着", "三体", "百年孤独"]);
        assert_eq!(set.books()[1].id, BookId(2));
    }

    #[test]
    fn test_duplicate_insert_is_refused() {
        let mut set = set_of(&["Dune"]);
        let version = set.version();

        assert!(!set.insert("Dune".to_string(), BookId(42)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.books()[0].id, BookId(1));
        assert_eq!(set.version(), version);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut set = set_of(&["Dune"]);
        assert!(set.insert("dune".to_string(), BookId(9)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut set = set_of(&["A", "B", "C", "D"]);
        assert!(set.remove("B"));
        assert!(!set.remove("B"));
        assert_eq!(set.names(), vec!["A", "C", "D"]);
    }

    #[test]
    fn test_mixed_sequence_never_duplicates() {
        let mut set = FavoriteSet::new();
        let ops: &[(&str, bool)] = &[
            ("A", true),
            ("B", true),
            ("A", true),
            ("C", true),
            ("B", false),
            ("B", true),
            ("A", false),
            ("C", true),
        ];
        for (i, (name, add)) in ops.iter().enumerate() {
            if *add {
                set.insert(name.to_string(), BookId(i as u64));
            } else {
                set.remove(name);
            }
        }
        assert_eq!(set.names(), vec!["C", "B"]);
    }

    #[test]
    fn test_every_mutation_bumps_version() {
        let mut set = FavoriteSet::new();
        assert_eq!(set.version(), 0);
        set.insert("A".to_string(), BookId(1));
        set.remove("A");
        set.clear();
        assert_eq!(set.version(), 3);
    }
}
