//! Ordered `(matcher, resolver)` tables.
//!
//! A [`RuleSet`] answers "which declarations does this token produce" by
//! trying an exact-token index first and then every pattern rule in declared
//! order. A resolver that returns `None`, or an empty entry list, passes the
//! token on to the next rule.

use crate::config::PresetOptions;
use crate::theme::Theme;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Ordered `(property, value)` declarations.
pub type CssEntries = Vec<(String, String)>;

pub struct RuleContext<'a> {
    pub theme: &'a Theme,
    pub options: &'a PresetOptions,
}

/// Capture groups of a matched token; missing groups read as empty.
pub struct Groups<'t> {
    groups: Vec<Option<&'t str>>,
}

impl<'t> Groups<'t> {
    fn from_captures(captures: &Captures<'t>) -> Self {
        Self {
            groups: captures
                .iter()
                .map(|group| group.map(|found| found.as_str()))
                .collect(),
        }
    }

    fn whole(token: &'t str) -> Self {
        Self {
            groups: vec![Some(token)],
        }
    }

    pub fn at(&self, idx: usize) -> &'t str {
        self.get(idx).unwrap_or_default()
    }

    pub fn get(&self, idx: usize) -> Option<&'t str> {
        self.groups.get(idx).copied().flatten()
    }

    /// The group when it matched something.
    pub fn non_empty(&self, idx: usize) -> Option<&'t str> {
        self.get(idx).filter(|group| !group.is_empty())
    }
}

pub type Resolver =
    Box<dyn Fn(&Groups<'_>, &RuleContext<'_>) -> Option<CssEntries> + Send + Sync>;

/// Plain-function resolver, shared by rules generated from one template.
pub type ResolveFn = fn(&Groups<'_>, &RuleContext<'_>) -> Option<CssEntries>;

pub enum Matcher {
    Static(&'static str),
    Pattern(Regex),
}

pub struct Rule {
    pub matcher: Matcher,
    resolver: Resolver,
    pub autocomplete: Vec<&'static str>,
}

impl Rule {
    /// An exact token with constant declarations.
    pub fn fixed(token: &'static str, declarations: &[(&str, &str)]) -> Self {
        let entries = entries(declarations);
        Self {
            matcher: Matcher::Static(token),
            resolver: Box::new(move |_: &Groups<'_>, _: &RuleContext<'_>| Some(entries.clone())),
            autocomplete: Vec::new(),
        }
    }

    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression. Rule tables are
    /// literal and built once, so this is a programming error.
    pub fn pattern<F>(pattern: &str, resolver: F) -> Self
    where
        F: Fn(&Groups<'_>, &RuleContext<'_>) -> Option<CssEntries> + Send + Sync + 'static,
    {
        let regex = Regex::new(pattern)
            .unwrap_or_else(|err| panic!("rule pattern {pattern:?} does not compile: {err}"));
        Self {
            matcher: Matcher::Pattern(regex),
            resolver: Box::new(resolver),
            autocomplete: Vec::new(),
        }
    }

    pub fn autocomplete(mut self, hints: &[&'static str]) -> Self {
        self.autocomplete.extend_from_slice(hints);
        self
    }

    fn apply(&self, groups: &Groups<'_>, context: &RuleContext<'_>) -> Option<CssEntries> {
        (self.resolver)(groups, context).filter(|entries| !entries.is_empty())
    }
}

pub struct RuleSet {
    rules: Vec<Rule>,
    static_index: HashMap<&'static str, usize>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        let mut static_index = HashMap::new();
        for (idx, rule) in rules.iter().enumerate() {
            if let Matcher::Static(token) = rule.matcher {
                static_index.entry(token).or_insert(idx);
            }
        }
        Self {
            rules,
            static_index,
        }
    }

    /// Resolves `token` and returns the winning rule's index with its
    /// declarations.
    pub fn resolve(&self, token: &str, context: &RuleContext<'_>) -> Option<(usize, CssEntries)> {
        if let Some(&idx) = self.static_index.get(token) {
            if let Some(entries) = self.rules[idx].apply(&Groups::whole(token), context) {
                return Some((idx, entries));
            }
        }

        self.rules.iter().enumerate().find_map(|(idx, rule)| {
            let Matcher::Pattern(regex) = &rule.matcher else {
                return None;
            };
            let captures = regex.captures(token)?;
            rule.apply(&Groups::from_captures(&captures), context)
                .map(|entries| (idx, entries))
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn autocomplete(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules
            .iter()
            .flat_map(|rule| rule.autocomplete.iter().copied())
    }
}

pub fn entries(declarations: &[(&str, &str)]) -> CssEntries {
    declarations
        .iter()
        .map(|(property, value)| (property.to_string(), value.to_string()))
        .collect()
}

/// A single declaration, or no match when `value` is missing.
pub fn declaration(property: &str, value: Option<String>) -> Option<CssEntries> {
    value.map(|value| vec![(property.to_string(), value)])
}

/// Folds repeated properties into their first position, keeping the last
/// value.
pub fn merge_entries(entries: CssEntries) -> CssEntries {
    let mut merged: CssEntries = Vec::with_capacity(entries.len());
    for (property, value) in entries {
        match merged.iter_mut().find(|(existing, _)| *existing == property) {
            Some(slot) => slot.1 = value,
            None => merged.push((property, value)),
        }
    }
    merged
}
