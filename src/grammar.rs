//! Parallel string rewriting for deterministic, context-free L-Systems.
//!
//! Every symbol of the current string is replaced simultaneously in each pass.
//! Symbols introduced by a replacement are only expanded in the *next* pass,
//! and symbols without a rule (constants such as `+`, `-`, `[`, `]`) are copied
//! through unchanged.

use crate::error::ConfigError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Separator between the predecessor symbol and its replacement in a rule line.
pub const RULE_SEPARATOR: &str = "->";

/// A set of production rules, one replacement string per predecessor symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionRules {
    rules: HashMap<char, String>,
}

impl ProductionRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule, returning the replacement it overwrote, if any.
    ///
    /// A repeated predecessor replaces the earlier definition (last one wins).
    pub fn insert(&mut self, symbol: char, replacement: impl Into<String>) -> Option<String> {
        self.rules.insert(symbol, replacement.into())
    }

    /// Returns the replacement for `symbol`, or `None` if it is a constant.
    pub fn get(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.rules.iter().map(|(&k, v)| (k, v.as_str()))
    }

    /// Parses a single `X->replacement` line.
    ///
    /// The line is split on the first `->` only, so replacements may contain
    /// further `-` or `>` characters. `line_no` is used for error reporting.
    pub fn parse_line(text: &str, line_no: usize) -> Result<(char, String), ConfigError> {
        let (lhs, rhs) =
            text.split_once(RULE_SEPARATOR)
                .ok_or_else(|| ConfigError::MissingSeparator {
                    line: line_no,
                    text: text.to_string(),
                })?;

        let mut chars = lhs.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Ok((symbol, rhs.to_string())),
            _ => Err(ConfigError::InvalidSymbol {
                line: line_no,
                lhs: lhs.to_string(),
            }),
        }
    }

    /// Builds a rule set from rule lines, numbering them from `first_line`.
    ///
    /// Blank lines are skipped. Duplicated predecessors are logged and the
    /// later definition is kept.
    pub fn from_lines<'a, I>(lines: I, first_line: usize) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rules = Self::new();
        for (offset, text) in lines.into_iter().enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            let line_no = first_line + offset;
            let (symbol, replacement) = Self::parse_line(text, line_no)?;
            if let Some(previous) = rules.insert(symbol, replacement) {
                warn!("line {line_no}: rule for '{symbol}' redefined (was \"{previous}\")");
            }
        }
        Ok(rules)
    }
}

impl FromIterator<(char, String)> for ProductionRules {
    fn from_iter<T: IntoIterator<Item = (char, String)>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(char, &'a str)> for ProductionRules {
    fn from_iter<T: IntoIterator<Item = (char, &'a str)>>(iter: T) -> Self {
        iter.into_iter().map(|(k, v)| (k, v.to_string())).collect()
    }
}

/// Performs a single parallel rewrite pass over `current`.
pub fn rewrite_pass(current: &str, rules: &ProductionRules) -> String {
    // Size the output exactly so each pass is one allocation.
    let capacity = current
        .chars()
        .map(|c| rules.get(c).map_or(c.len_utf8(), str::len))
        .sum();

    let mut next = String::with_capacity(capacity);
    for symbol in current.chars() {
        match rules.get(symbol) {
            Some(replacement) => next.push_str(replacement),
            None => next.push(symbol),
        }
    }
    next
}

/// Rewrites `axiom` for exactly `iterations` parallel passes.
///
/// `iterations == 0` returns the axiom unchanged. Symbols without a rule are
/// treated as constants; an empty rule set leaves any axiom untouched.
pub fn rewrite(iterations: usize, axiom: &str, rules: &ProductionRules) -> String {
    let mut current = axiom.to_string();
    for pass in 0..iterations {
        if rules.is_empty() {
            break;
        }
        current = rewrite_pass(&current, rules);
        debug!("rewrite pass {}: {} symbols", pass + 1, current.chars().count());
    }
    current
}

/// Predicts the symbol count of `rewrite(iterations, axiom, rules)` without
/// building the string. Saturates at `u64::MAX`.
pub fn expanded_len(iterations: usize, axiom: &str, rules: &ProductionRules) -> u64 {
    // counts[c] = number of occurrences of symbol c in the current generation
    let mut counts: HashMap<char, u64> = HashMap::new();
    for c in axiom.chars() {
        *counts.entry(c).or_default() += 1;
    }

    for _ in 0..iterations {
        let mut next: HashMap<char, u64> = HashMap::with_capacity(counts.len());
        for (&symbol, &count) in &counts {
            match rules.get(symbol) {
                Some(replacement) => {
                    for c in replacement.chars() {
                        let slot = next.entry(c).or_default();
                        *slot = slot.saturating_add(count);
                    }
                }
                None => {
                    let slot = next.entry(symbol).or_default();
                    *slot = slot.saturating_add(count);
                }
            }
        }
        counts = next;
    }

    counts.values().fold(0u64, |acc, &n| acc.saturating_add(n))
}

/// An axiom together with its production rules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LSystem {
    pub axiom: String,
    pub rules: ProductionRules,
}

impl LSystem {
    pub fn new(axiom: impl Into<String>, rules: ProductionRules) -> Self {
        Self {
            axiom: axiom.into(),
            rules,
        }
    }

    /// The command string after `iterations` passes.
    pub fn generate(&self, iterations: usize) -> String {
        rewrite(iterations, &self.axiom, &self.rules)
    }

    /// Successive generations, starting with the axiom itself.
    ///
    /// The iterator never ends; bound it with `take` or `nth`.
    pub fn generations(&self) -> Generations<'_> {
        Generations {
            rules: &self.rules,
            next: Some(self.axiom.clone()),
        }
    }
}

/// Iterator returned by [`LSystem::generations`].
pub struct Generations<'a> {
    rules: &'a ProductionRules,
    next: Option<String>,
}

impl Iterator for Generations<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = Some(rewrite_pass(&current, self.rules));
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(char, &str)]) -> ProductionRules {
        pairs.iter().copied().collect()
    }

    #[test]
    fn quadratic_koch_first_pass() {
        let r = rules(&[('F', "FF-F")]);
        assert_eq!(rewrite(1, "F-F-F-F", &r), "FF-F-FF-F-FF-F-FF-F");
    }

    #[test]
    fn introduced_symbols_wait_for_next_pass() {
        let r = rules(&[('A', "AB"), ('B', "A")]);
        assert_eq!(rewrite(1, "A", &r), "AB");
        assert_eq!(rewrite(2, "A", &r), "ABA");
        assert_eq!(rewrite(3, "A", &r), "ABAAB");
    }

    #[test]
    fn empty_replacement_erases_symbol() {
        let r = rules(&[('X', "")]);
        assert_eq!(rewrite(1, "FXF", &r), "FF");
    }

    #[test]
    fn parse_line_splits_on_first_separator_only() {
        let (symbol, replacement) = ProductionRules::parse_line("F->F->F", 5).unwrap();
        assert_eq!(symbol, 'F');
        assert_eq!(replacement, "F->F");
    }

    #[test]
    fn parse_line_accepts_empty_replacement() {
        let (symbol, replacement) = ProductionRules::parse_line("X->", 1).unwrap();
        assert_eq!(symbol, 'X');
        assert!(replacement.is_empty());
    }

    #[test]
    fn parse_line_rejects_missing_separator() {
        let err = ProductionRules::parse_line("F=FF", 7).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSeparator { line: 7, .. }));
    }

    #[test]
    fn parse_line_rejects_multi_symbol_predecessor() {
        let err = ProductionRules::parse_line("FF->F", 3).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSymbol { line: 3, .. }));
        let err = ProductionRules::parse_line("->F", 3).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSymbol { .. }));
    }

    #[test]
    fn duplicate_rule_last_wins() {
        let r = ProductionRules::from_lines(["F->F+F", "", "F->FF"], 5).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.get('F'), Some("FF"));
    }

    #[test]
    fn generations_start_at_axiom() {
        let system = LSystem::new("F", rules(&[('F', "F+F")]));
        let gens: Vec<String> = system.generations().take(3).collect();
        assert_eq!(gens, vec!["F", "F+F", "F+F+F+F"]);
    }

    #[test]
    fn expanded_len_matches_materialized_length() {
        let r = rules(&[('X', "F+[[X]-X]-F[-FX]+X"), ('F', "FF")]);
        for n in 0..5 {
            assert_eq!(
                expanded_len(n, "X", &r),
                rewrite(n, "X", &r).chars().count() as u64
            );
        }
    }
}
