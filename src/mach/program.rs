use crate::lang::ast::Statement;
use crate::lang::Number;

/// The stored program: statements ordered by unique, ascending line
/// number. Owned and mutated only by the engine.
#[derive(Debug, Default)]
pub struct Program {
    lines: Vec<(Number, Statement)>,
}

impl Program {
    /// Replace line `number` in place, or insert it in order.
    pub fn insert(&mut self, number: Number, statement: Statement) {
        match self.lines.binary_search_by_key(&number, |(n, _)| *n) {
            Ok(i) => self.lines[i].1 = statement,
            Err(i) => self.lines.insert(i, (number, statement)),
        }
    }

    /// No-op when the line is absent.
    pub fn delete(&mut self, number: Number) {
        if let Ok(i) = self.lines.binary_search_by_key(&number, |(n, _)| *n) {
            self.lines.remove(i);
        }
    }

    pub fn index_of(&self, number: Number) -> Option<usize> {
        self.lines.binary_search_by_key(&number, |(n, _)| *n).ok()
    }

    pub fn get(&self, index: usize) -> Option<&(Number, Statement)> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Canonical text of every line in the inclusive range. Reparsing
    /// a rendered line reproduces an equivalent statement.
    pub fn render(&self, from: Number, to: Number) -> Vec<String> {
        self.lines
            .iter()
            .filter(|(number, _)| from <= *number && *number <= to)
            .map(|(number, statement)| format!("{} {}", number, statement))
            .collect()
    }

    /// Canonical text of the whole program, one line per statement.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (number, statement) in &self.lines {
            text.push_str(&format!("{} {}\n", number, statement));
        }
        text
    }
}
