use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// The program store: statement text by line number, plus the ascending
/// index of line numbers that execution cursors point into.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    source: BTreeMap<u16, String>,
    index: Vec<u16>,
}

impl Listing {
    pub fn clear(&mut self) {
        self.source.clear();
        self.index.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn insert(&mut self, line_number: u16, text: String) -> Option<String> {
        let prev = self.source.insert(line_number, text);
        if prev.is_none() {
            self.reindex();
        }
        prev
    }

    pub fn remove(&mut self, line_number: u16) -> Option<String> {
        let prev = self.source.remove(&line_number);
        if prev.is_some() {
            self.reindex();
        }
        prev
    }

    fn reindex(&mut self) {
        self.index = self.source.keys().copied().collect();
    }

    /// Cursor position of a line number.
    pub fn position(&self, line_number: u16) -> Option<usize> {
        self.index.binary_search(&line_number).ok()
    }

    /// The line a cursor points at.
    pub fn line(&self, cursor: usize) -> Option<(u16, &str)> {
        let line_number = *self.index.get(cursor)?;
        let text = self.source.get(&line_number)?;
        Some((line_number, text.as_str()))
    }

    /// Listing text, `"<number> <text>"` per line, ascending.
    pub fn lines(&self, range: RangeInclusive<u16>) -> impl Iterator<Item = String> + '_ {
        self.source
            .range(range)
            .map(|(line_number, text)| format!("{} {}", line_number, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_order() {
        let mut l = Listing::default();
        l.insert(30, "END".to_string());
        l.insert(10, "PRINT 1".to_string());
        l.insert(20, "PRINT 2".to_string());
        assert_eq!(l.position(10), Some(0));
        assert_eq!(l.position(30), Some(2));
        assert_eq!(l.position(15), None);
        assert_eq!(l.line(1), Some((20, "PRINT 2")));
        assert_eq!(l.line(3), None);
        l.remove(20);
        assert_eq!(l.position(30), Some(1));
    }

    #[test]
    fn test_replace_keeps_index() {
        let mut l = Listing::default();
        l.insert(10, "A=1".to_string());
        assert_eq!(l.insert(10, "A=2".to_string()), Some("A=1".to_string()));
        assert_eq!(l.len(), 1);
        let text: Vec<String> = l.lines(0..=u16::max_value()).collect();
        assert_eq!(text, vec!["10 A=2".to_string()]);
    }
}
