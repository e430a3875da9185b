//! Linear back/forward history of visited folder paths.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: Vec<String>,
    index: usize,
}

impl NavigationHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    /// Drops every entry after the current one, then appends `path` and makes it current.
    pub fn push(&mut self, path: impl Into<String>) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(path.into());
        self.index = self.entries.len() - 1;
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Steps back and returns the new current entry.
    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.index -= 1;
        self.current()
    }

    /// Steps forward and returns the new current entry.
    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.index += 1;
        self.current()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn push_after_back_discards_forward_entries() {
        let mut history = NavigationHistory::new("A");
        history.push("B");
        history.push("C");
        assert_eq!(history.back(), Some("B"));
        assert_eq!(history.back(), Some("A"));

        history.push("D");

        assert_eq!(history.entries(), ["A", "D"]);
        assert_eq!(history.index(), 1);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn back_and_forward_stop_at_the_ends() {
        let mut history = NavigationHistory::new("A");
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), None);

        history.push("B");
        assert_eq!(history.back(), Some("A"));
        assert_eq!(history.forward(), Some("B"));
        assert_eq!(history.forward(), None);
        assert_eq!(history.current(), Some("B"));
    }

    #[test]
    fn empty_history_accepts_a_first_push() {
        let mut history = NavigationHistory::default();
        assert_eq!(history.current(), None);
        history.push("C:");
        assert_eq!(history.entries(), ["C:"]);
        assert_eq!(history.index(), 0);
    }
}
