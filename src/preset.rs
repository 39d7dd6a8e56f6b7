//! The assembled preset: theme, rules, variants, postprocessors, preflights
//! and token extractor for one set of options.

use crate::config::{Config, PresetOptions};
use crate::postprocess::{postprocessors, Postprocessor};
use crate::preflight::{normalize_preflights, preflights, Preflight};
use crate::rule::{RuleContext, RuleSet};
use crate::rules::rules;
use crate::scanner::Extractor;
use crate::theme::{Theme, ThemeOverrides};
use crate::variants::{variants, Variant};
use std::sync::LazyLock;

pub const PRESET_NAME: &str = "mpcss";

static RULES: LazyLock<RuleSet> = LazyLock::new(|| RuleSet::new(rules()));

pub struct Preset {
    pub name: &'static str,
    pub options: PresetOptions,
    pub theme: Theme,
    pub rules: &'static RuleSet,
    pub variants: Vec<Variant>,
    /// Utility prefixes; empty means unprefixed.
    pub prefixes: Vec<String>,
    pub postprocessors: Vec<Postprocessor>,
    pub preflights: Vec<Preflight>,
    pub extractor: Extractor,
}

impl Preset {
    pub fn context(&self) -> RuleContext<'_> {
        RuleContext {
            theme: &self.theme,
            options: &self.options,
        }
    }

    /// Strips a configured utility prefix. Without prefixes every token
    /// passes unchanged.
    pub fn strip_prefix<'t>(&self, utility: &'t str) -> Option<&'t str> {
        if self.prefixes.is_empty() {
            return Some(utility);
        }
        self.prefixes
            .iter()
            .find_map(|prefix| utility.strip_prefix(prefix.as_str()))
            .filter(|rest| !rest.is_empty())
    }
}

pub fn preset_mp(options: PresetOptions) -> Preset {
    preset_with_theme(options, &ThemeOverrides::default())
}

pub fn from_config(config: &Config) -> Preset {
    preset_with_theme(config.options.clone(), &config.theme)
}

fn preset_with_theme(options: PresetOptions, overrides: &ThemeOverrides) -> Preset {
    let preflights = if options.preflight {
        normalize_preflights(preflights(), &options.variable_prefix)
    } else {
        Vec::new()
    };
    let extractor = if options.arbitrary_variants {
        Extractor::ArbitraryVariants
    } else {
        Extractor::Default
    };
    Preset {
        name: PRESET_NAME,
        theme: Theme::merged(overrides),
        rules: &RULES,
        variants: variants(&options),
        prefixes: options
            .prefix
            .as_ref()
            .map(|prefix| prefix.as_slice().to_vec())
            .unwrap_or_default(),
        postprocessors: postprocessors(&options),
        preflights,
        extractor,
        options,
    }
}
