//! Merge rules and the merge-application primitive.
//!
//! The order of the merge table is part of the learned model: encoding
//! replays rules in exactly the order training produced them.

use serde::{Deserialize, Serialize};

use crate::symbols::Pair;

/// On-disk shape of a rule: `[[left, right], merged]`.
type RawMergeRule = ([String; 2], String);

/// A single merge rule: (left, right) → merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawMergeRule", into = "RawMergeRule")]
pub struct MergeRule {
    pub left: String,
    pub right: String,
    pub merged: String,
}

impl MergeRule {
    /// Build the rule fusing `left` and `right`.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        let left = left.into();
        let right = right.into();
        let merged = format!("{left}{right}");
        Self {
            left,
            right,
            merged,
        }
    }

    /// Whether `merged` is exactly `left` followed by `right`.
    pub fn is_consistent(&self) -> bool {
        !self.left.is_empty()
            && !self.right.is_empty()
            && self.merged.len() == self.left.len() + self.right.len()
            && self.merged.starts_with(&self.left)
            && self.merged.ends_with(&self.right)
    }
}

impl From<RawMergeRule> for MergeRule {
    fn from(([left, right], merged): RawMergeRule) -> Self {
        Self {
            left,
            right,
            merged,
        }
    }
}

impl From<MergeRule> for RawMergeRule {
    fn from(rule: MergeRule) -> Self {
        ([rule.left, rule.right], rule.merged)
    }
}

/// Merge rules in learned order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergeTable {
    rules: Vec<MergeRule>,
}

impl MergeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule, returning its rank (0 = learned first).
    pub fn push(&mut self, rule: MergeRule) -> usize {
        self.rules.push(rule);
        self.rules.len() - 1
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, rank: usize) -> Option<&MergeRule> {
        self.rules.get(rank)
    }

    pub fn rules(&self) -> &[MergeRule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MergeRule> {
        self.rules.iter()
    }
}

impl From<Vec<MergeRule>> for MergeTable {
    fn from(rules: Vec<MergeRule>) -> Self {
        Self { rules }
    }
}

impl<'a> IntoIterator for &'a MergeTable {
    type Item = &'a MergeRule;
    type IntoIter = std::slice::Iter<'a, MergeRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Replace every occurrence of `pair` in `symbols` with `merged`.
///
/// Scans left to right without overlap: with pair `(a, a)`, `a a a` becomes
/// `aa a`.
pub(crate) fn merge_pair(symbols: &mut Vec<u32>, (left, right): Pair, merged: u32) {
    let len = symbols.len();
    if len < 2 {
        return;
    }

    let mut read = 0;
    let mut write = 0;
    while read < len {
        if read + 1 < len && symbols[read] == left && symbols[read + 1] == right {
            symbols[write] = merged;
            read += 2;
        } else {
            symbols[write] = symbols[read];
            read += 1;
        }
        write += 1;
    }
    symbols.truncate(write);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_concatenates() {
        let rule = MergeRule::new("Ġ", "t");
        assert_eq!(rule.merged, "Ġt");
        assert!(rule.is_consistent());
    }

    #[test]
    fn test_inconsistent_rule() {
        let rule = MergeRule {
            left: "a".into(),
            right: "b".into(),
            merged: "ba".into(),
        };
        assert!(!rule.is_consistent());

        let empty = MergeRule {
            left: String::new(),
            right: "b".into(),
            merged: "b".into(),
        };
        assert!(!empty.is_consistent());
    }

    #[test]
    fn test_rule_json_shape() {
        let rule = MergeRule::new("Ġ", "t");
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"[["Ġ","t"],"Ġt"]"#);

        let loaded: MergeRule = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, rule);
    }

    #[test]
    fn test_rule_json_rejects_wrong_arity() {
        assert!(serde_json::from_str::<MergeRule>(r#"[["a","b","c"],"abc"]"#).is_err());
        assert!(serde_json::from_str::<MergeRule>(r#"[["a"],"a"]"#).is_err());
        assert!(serde_json::from_str::<MergeRule>(r#"[["a","b"]]"#).is_err());
    }

    #[test]
    fn test_table_keeps_order() {
        let mut table = MergeTable::new();
        assert_eq!(table.push(MergeRule::new("a", "a")), 0);
        assert_eq!(table.push(MergeRule::new("a", "b")), 1);
        let merged: Vec<&str> = table.iter().map(|r| r.merged.as_str()).collect();
        assert_eq!(merged, vec!["aa", "ab"]);
        assert_eq!(table.get(1).map(|r| r.left.as_str()), Some("a"));
    }

    #[test]
    fn test_merge_pair_non_overlapping() {
        let mut symbols = vec![1, 1, 1];
        merge_pair(&mut symbols, (1, 1), 9);
        assert_eq!(symbols, vec![9, 1]);

        let mut symbols = vec![1, 1, 1, 1];
        merge_pair(&mut symbols, (1, 1), 9);
        assert_eq!(symbols, vec![9, 9]);
    }

    #[test]
    fn test_merge_pair_every_occurrence() {
        let mut symbols = vec![1, 2, 3, 1, 2];
        merge_pair(&mut symbols, (1, 2), 7);
        assert_eq!(symbols, vec![7, 3, 7]);
    }

    #[test]
    fn test_merge_pair_short_input() {
        let mut symbols = vec![1];
        merge_pair(&mut symbols, (1, 1), 9);
        assert_eq!(symbols, vec![1]);

        let mut symbols: Vec<u32> = Vec::new();
        merge_pair(&mut symbols, (1, 1), 9);
        assert!(symbols.is_empty());
    }
}
