//! Base custom properties emitted ahead of the utilities.

use crate::config::DEFAULT_VARIABLE_PREFIX;
use crate::rule::{entries, merge_entries, CssEntries};
use crate::rules::ring::{ring_base, VAR_EMPTY};
use crate::theme::Theme;

pub const PREFLIGHT_LAYER: &str = "preflights";

type CssGetter = fn(&Theme) -> Option<String>;

#[derive(Debug, Clone)]
pub struct Preflight {
    pub layer: &'static str,
    getter: CssGetter,
    variable_prefix: Option<String>,
}

impl Preflight {
    pub fn get_css(&self, theme: &Theme) -> Option<String> {
        let css = (self.getter)(theme)?;
        Some(match &self.variable_prefix {
            Some(prefix) => css.replace("--un-", &format!("--{}", prefix)),
            None => css,
        })
    }
}

fn box_shadow_base() -> CssEntries {
    entries(&[
        ("--un-ring-offset-shadow", "0 0 rgb(0 0 0 / 0)"),
        ("--un-ring-shadow", "0 0 rgb(0 0 0 / 0)"),
        ("--un-shadow-inset", VAR_EMPTY),
        ("--un-shadow", "0 0 rgb(0 0 0 / 0)"),
    ])
}

/// Declarations every element starts from.
pub fn preflight_base() -> CssEntries {
    let mut base = box_shadow_base();
    base.extend(ring_base());
    merge_entries(base)
}

fn base_css(theme: &Theme) -> Option<String> {
    if theme.preflight_root.is_empty() {
        return None;
    }
    let body: String = preflight_base()
        .iter()
        .map(|(property, value)| format!("{}:{};", property, value))
        .collect();
    Some(
        theme
            .preflight_root
            .iter()
            .map(|root| format!("{}{{{}}}", root, body))
            .collect(),
    )
}

pub fn preflights() -> Vec<Preflight> {
    vec![Preflight {
        layer: PREFLIGHT_LAYER,
        getter: base_css,
        variable_prefix: None,
    }]
}

/// Points preflight custom properties at `variable_prefix`.
pub fn normalize_preflights(preflights: Vec<Preflight>, variable_prefix: &str) -> Vec<Preflight> {
    if variable_prefix == DEFAULT_VARIABLE_PREFIX {
        return preflights;
    }
    preflights
        .into_iter()
        .map(|preflight| Preflight {
            variable_prefix: Some(variable_prefix.to_string()),
            ..preflight
        })
        .collect()
}
