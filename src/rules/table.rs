use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A literal token and what it becomes in the generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubstitutionRule {
    pub pattern: String,
    pub replacement: String,
}

impl SubstitutionRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Ordered rules active in one zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<SubstitutionRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<SubstitutionRule>) -> Self {
        Self { rules }
    }

    /// Replace the first occurrence of every rule's pattern in `line`.
    ///
    /// All rules look at the original line, so no rule ever matches text
    /// produced by another. A match overlapping one further left is dropped.
    /// Borrowed when nothing was replaced.
    pub fn apply<'l>(&self, line: &'l str) -> Cow<'l, str> {
        let mut hits: Vec<(usize, usize, &str)> = self
            .rules
            .iter()
            .filter(|r| !r.pattern.is_empty())
            .filter_map(|r| {
                line.find(&r.pattern)
                    .map(|at| (at, at + r.pattern.len(), r.replacement.as_str()))
            })
            .collect();

        if hits.is_empty() {
            return Cow::Borrowed(line);
        }
        hits.sort_by_key(|&(start, _, _)| start);

        let mut out = String::with_capacity(line.len() + 16 * hits.len());
        let mut cursor = 0usize;
        for (start, end, replacement) in hits {
            if start < cursor {
                continue;
            }
            out.push_str(&line[cursor..start]);
            out.push_str(replacement);
            cursor = end;
        }
        out.push_str(&line[cursor..]);
        Cow::Owned(out)
    }
}
