//! Substitution rules retargeting the skeleton's placeholders

use crate::error::Result;
use crate::naming::case::{pascal_case, snake_case};
use crate::naming::ProjectNamespace;
use regex::bytes::{Captures, Regex};
use std::borrow::Cow;

/// Placeholder namespace and identifiers embedded in the skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline {
    /// Fully-qualified sample namespace, e.g. `Acme\SyliusExamplePlugin`
    pub namespace: &'static str,
    /// Flattened sample identifier, e.g. `AcmeSyliusExamplePlugin`
    pub identifier: &'static str,
    /// Sample identifier without the suffix word, e.g. `AcmeSyliusExample`
    pub short_identifier: &'static str,
}

/// A single literal search/replace pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionRule {
    pub search: String,
    pub replace: String,
}

impl SubstitutionRule {
    pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replace: replace.into(),
        }
    }
}

/// An ordered set of rules applied together in one pass
///
/// Longer search tokens win over shorter tokens they contain, and text
/// produced by one rule is never matched again by another rule.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<SubstitutionRule>,
    matcher: Option<Regex>,
}

impl RuleSet {
    /// Build a rule set; empty and repeated search tokens are dropped (first wins)
    pub fn new(rules: Vec<SubstitutionRule>) -> Result<Self> {
        let mut kept: Vec<SubstitutionRule> = Vec::with_capacity(rules.len());
        for rule in rules {
            if !rule.search.is_empty() && !kept.iter().any(|k| k.search == rule.search) {
                kept.push(rule);
            }
        }

        if kept.is_empty() {
            return Ok(Self {
                rules: kept,
                matcher: None,
            });
        }

        let mut by_length: Vec<&str> = kept.iter().map(|r| r.search.as_str()).collect();
        by_length.sort_by_key(|search| std::cmp::Reverse(search.len()));
        let pattern = by_length
            .iter()
            .map(|search| regex::escape(search))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            rules: kept,
            matcher: Some(Regex::new(&pattern)?),
        })
    }

    /// The four rules retargeting a skeleton at `namespace`
    pub fn plan(
        baseline: &Baseline,
        namespace: &ProjectNamespace,
        separator: &str,
        suffix_word: &str,
    ) -> Result<Self> {
        let folder = namespace.folder_name();
        let plain = namespace.plain_name(suffix_word);

        Self::new(vec![
            SubstitutionRule::new(baseline.namespace, namespace.qualified(separator)),
            SubstitutionRule::new(pascal_case(baseline.identifier), folder.clone()),
            SubstitutionRule::new(
                snake_case(baseline.short_identifier).trim_start_matches('_'),
                snake_case(&plain).trim_start_matches('_'),
            ),
            SubstitutionRule::new(baseline.identifier.to_lowercase(), folder.to_lowercase()),
        ])
    }

    /// The class-token rule used by the source rename pass
    pub fn rename_rule(
        baseline: &Baseline,
        namespace: &ProjectNamespace,
        suffix_word: &str,
    ) -> SubstitutionRule {
        SubstitutionRule::new(baseline.short_identifier, namespace.plain_name(suffix_word))
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    /// Apply every rule in a single left-to-right pass
    pub fn apply<'a>(&self, haystack: &'a [u8]) -> Cow<'a, [u8]> {
        let Some(matcher) = &self.matcher else {
            return Cow::Borrowed(haystack);
        };

        matcher.replace_all(haystack, |caps: &Captures<'_>| {
            let matched = &caps[0];
            self.rules
                .iter()
                .find(|rule| rule.search.as_bytes() == matched)
                .map_or_else(|| matched.to_vec(), |rule| rule.replace.as_bytes().to_vec())
        })
    }
}
