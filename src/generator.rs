//! Turns utility tokens into a style sheet.
//!
//! Each token is peeled of its variants, matched against the preset's rule
//! table, rewritten by the variant bodies and postprocessors, and rendered
//! under its transformed selector and wrapping at-rules. Rules are sorted by
//! layer, parent at-rules, rule position and selector; neighbours with an
//! identical body share one block.

use crate::postprocess::postprocess;
use crate::preflight::PREFLIGHT_LAYER;
use crate::preset::Preset;
use crate::rule::{merge_entries, CssEntries, RuleContext};
use crate::selector::escape_selector;
use crate::variants::VariantHandler;
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use tracing::{debug, info};

pub const DEFAULT_LAYER: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub minify: bool,
    pub preflights: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            minify: false,
            preflights: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub css: CssOutput,
    /// Tokens that produced a rule.
    pub class_count: usize,
    pub unmatched: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssOutput(String);

impl CssOutput {
    pub fn new(css: String) -> Self {
        Self(css)
    }
}

impl Deref for CssOutput {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for CssOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<String> for CssOutput {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<CssOutput> for String {
    fn from(value: CssOutput) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct RuleSortKey {
    layer_order: i32,
    layer: String,
    parents: Vec<String>,
    rule_index: usize,
    variant_count: usize,
    selector: String,
}

#[derive(Debug, Clone)]
struct GeneratedRule {
    key: RuleSortKey,
    body: CssEntries,
}

fn layer_order(layer: &str) -> i32 {
    match layer {
        PREFLIGHT_LAYER => -100,
        "shortcuts" => -10,
        _ => 0,
    }
}

/// Splits leading variants off `token`, outermost first.
pub fn parse_variants<'t>(
    token: &'t str,
    preset: &Preset,
    context: &RuleContext<'_>,
) -> (&'t str, Vec<VariantHandler>) {
    let mut processed = token;
    let mut handlers = Vec::new();
    let mut applied = vec![false; preset.variants.len()];

    'scan: loop {
        for (idx, variant) in preset.variants.iter().enumerate() {
            if applied[idx] && !variant.multi_pass {
                continue;
            }
            if let Some((rest, handler)) = variant.try_match(processed, context) {
                processed = rest;
                handlers.push(handler);
                applied[idx] = true;
                continue 'scan;
            }
        }
        break;
    }

    (processed, handlers)
}

fn generate_rule(token: &str, preset: &Preset, context: &RuleContext<'_>) -> Option<GeneratedRule> {
    let (utility, handlers) = parse_variants(token, preset, context);
    let utility = preset.strip_prefix(utility)?;
    let (rule_index, mut body) = preset.rules.resolve(utility, context)?;

    for transform in handlers.iter().filter_map(|handler| handler.body) {
        body = transform.apply(body)?;
    }
    let body = postprocess(merge_entries(body), &preset.postprocessors);

    let mut selector = format!(".{}", escape_selector(token));
    for transform in handlers.iter().filter_map(|handler| handler.selector.as_ref()) {
        selector = transform.apply(&selector);
    }
    let parents = handlers
        .iter()
        .filter_map(|handler| handler.parent.clone())
        .collect();
    let layer = handlers
        .iter()
        .rev()
        .find_map(|handler| handler.layer.clone())
        .unwrap_or_else(|| DEFAULT_LAYER.to_string());

    debug!(token, rule = rule_index, "matched");
    Some(GeneratedRule {
        key: RuleSortKey {
            layer_order: layer_order(&layer),
            layer,
            parents,
            rule_index,
            variant_count: handlers.len(),
            selector,
        },
        body,
    })
}

pub fn generate(tokens: &[String], preset: &Preset, config: &GeneratorConfig) -> GenerationResult {
    let context = preset.context();
    let mut seen = HashSet::new();
    let mut rules = Vec::new();
    let mut unmatched = Vec::new();

    for token in tokens {
        if !seen.insert(token.as_str()) {
            continue;
        }
        match generate_rule(token, preset, &context) {
            Some(rule) => rules.push(rule),
            None => {
                debug!(token = token.as_str(), "no rule matched");
                unmatched.push(token.clone());
            }
        }
    }
    let class_count = rules.len();

    rules.sort_by(|left, right| left.key.cmp(&right.key));
    let rules = merge_selectors(rules);

    let mut layers: Vec<(String, Vec<String>)> = Vec::new();
    if config.preflights {
        let preflight_css: String = preset
            .preflights
            .iter()
            .filter_map(|preflight| preflight.get_css(&preset.theme))
            .collect();
        if !preflight_css.is_empty() {
            layers.push((PREFLIGHT_LAYER.to_string(), vec![preflight_css]));
        }
    }
    for rule in rules {
        let css = render_rule(&rule, config.minify);
        match layers.last_mut() {
            Some((layer, blocks)) if *layer == rule.key.layer => blocks.push(css),
            _ => layers.push((rule.key.layer.clone(), vec![css])),
        }
    }

    let css = if config.minify {
        layers
            .into_iter()
            .flat_map(|(_, blocks)| blocks)
            .collect::<Vec<_>>()
            .join("")
    } else {
        layers
            .into_iter()
            .map(|(layer, blocks)| format!("/* layer: {} */\n{}", layer, blocks.join("\n")))
            .collect::<Vec<_>>()
            .join("\n")
    };

    info!(
        tokens = tokens.len(),
        rules = class_count,
        unmatched = unmatched.len(),
        "generated css"
    );
    GenerationResult {
        css: CssOutput::new(css),
        class_count,
        unmatched,
    }
}

// Sorted neighbours sharing layer, parents and body collapse into one
// selector list.
fn merge_selectors(rules: Vec<GeneratedRule>) -> Vec<GeneratedRule> {
    let mut merged: Vec<GeneratedRule> = Vec::with_capacity(rules.len());
    for rule in rules {
        match merged.last_mut() {
            Some(previous)
                if previous.key.layer == rule.key.layer
                    && previous.key.parents == rule.key.parents
                    && previous.body == rule.body =>
            {
                previous.key.selector.push(',');
                previous.key.selector.push_str(&rule.key.selector);
            }
            _ => merged.push(rule),
        }
    }
    merged
}

fn render_rule(rule: &GeneratedRule, minify: bool) -> String {
    let mut css = declaration_block(&rule.key.selector, &rule.body, minify);
    for parent in rule.key.parents.iter().rev() {
        css = wrap_rule(parent, &css, minify);
    }
    css
}

fn declaration_block(selector: &str, body: &CssEntries, minify: bool) -> String {
    if minify {
        let declarations = body
            .iter()
            .map(|(property, value)| format!("{}:{}", property, value))
            .collect::<Vec<_>>()
            .join(";");
        return format!("{}{{{}}}", selector, declarations);
    }
    let lines = body
        .iter()
        .map(|(property, value)| format!("  {}: {};", property, value))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{} {{\n{}\n}}", selector, lines)
}

fn wrap_rule(parent: &str, rule: &str, minify: bool) -> String {
    if minify {
        format!("{}{{{}}}", parent.trim(), rule)
    } else {
        format!("{} {{\n{}\n}}", parent.trim(), indent_css_block(rule, 2))
    }
}

fn indent_css_block(css: &str, spaces: usize) -> String {
    let padding = " ".repeat(spaces);
    css.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", padding, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DarkMode, DarkStrategy, Prefix, PresetOptions, Unit};
    use crate::preset::preset_mp;
    use pretty_assertions::assert_eq;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|token| token.to_string()).collect()
    }

    fn build(list: &[&str], options: PresetOptions) -> GenerationResult {
        let config = GeneratorConfig {
            minify: true,
            preflights: false,
        };
        generate(&tokens(list), &preset_mp(options), &config)
    }

    #[test]
    fn renders_minified_rules_in_rpx() {
        let result = build(&["p-4"], PresetOptions::default());
        assert_eq!(&*result.css, ".p-4{padding:8rpx}");
        assert_eq!(result.class_count, 1);
    }

    #[test]
    fn unknown_tokens_are_reported_not_rendered() {
        let result = build(&["p-4", "wobble", "<view"], PresetOptions::default());
        assert_eq!(result.unmatched, tokens(&["wobble", "<view"]));
        assert_eq!(&*result.css, ".p-4{padding:8rpx}");
    }

    #[test]
    fn rules_follow_declaration_order_not_input_order() {
        let result = build(&["m-2", "p-2"], PresetOptions::default());
        assert_eq!(&*result.css, ".p-2{padding:4rpx}.m-2{margin:4rpx}");
    }

    #[test]
    fn pseudo_and_dark_variants_transform_the_selector() {
        let result = build(&["dark:hover:c-red-500"], PresetOptions::default());
        assert_eq!(
            &*result.css,
            ".dark .dark\\:hover\\:c-red-500:hover{--un-text-opacity:1;color:rgb(239 68 68 / var(--un-text-opacity))}"
        );
    }

    #[test]
    fn media_dark_mode_wraps_in_at_rule() {
        let options = PresetOptions {
            dark: DarkMode::Strategy(DarkStrategy::Media),
            ..PresetOptions::default()
        };
        let result = build(&["dark:p-1"], options);
        assert_eq!(
            &*result.css,
            "@media (prefers-color-scheme: dark){.dark\\:p-1{padding:2rpx}}"
        );
    }

    #[test]
    fn negative_and_important_rewrite_values() {
        let result = build(&["-m-2", "!p-1"], PresetOptions::default());
        assert_eq!(
            &*result.css,
            ".\\!p-1{padding:2rpx !important}.-m-2{margin:-4rpx}"
        );
    }

    #[test]
    fn negative_without_a_number_does_not_match() {
        let result = build(&["-c-red-500"], PresetOptions::default());
        assert_eq!(result.class_count, 0);
    }

    #[test]
    fn identical_bodies_share_a_block() {
        let result = build(&["flex-inline", "inline-flex"], PresetOptions::default());
        assert_eq!(&*result.css, ".inline-flex,.flex-inline{display:inline-flex}");
    }

    #[test]
    fn arbitrary_variant_selector_template() {
        let result = build(&["[&>*]:m-1"], PresetOptions::default());
        assert_eq!(&*result.css, ".\\[\\&\\>\\*\\]\\:m-1>*{margin:2rpx}");
    }

    #[test]
    fn utility_prefix_is_required_when_configured() {
        let options = PresetOptions {
            prefix: Some(Prefix::One("u-".to_string())),
            ..PresetOptions::default()
        };
        let result = build(&["u-p-1", "p-1", "hover:u-m-1"], options);
        assert_eq!(result.unmatched, tokens(&["p-1"]));
        assert_eq!(
            &*result.css,
            ".u-p-1{padding:2rpx}.hover\\:u-m-1:hover{margin:2rpx}"
        );
    }

    #[test]
    fn vw_unit_and_variable_prefix() {
        let options = PresetOptions {
            unit: Unit::Vw,
            variable_prefix: "mp-".to_string(),
            ..PresetOptions::default()
        };
        let result = build(&["p-4", "op-50"], options);
        assert_eq!(&*result.css, ".p-4{padding:0.2666666667vw}.op-50{opacity:0.5}");

        let options = PresetOptions {
            variable_prefix: "mp-".to_string(),
            ..PresetOptions::default()
        };
        let result = build(&["c-red-500"], options);
        assert_eq!(
            &*result.css,
            ".c-red-500{--mp-text-opacity:1;color:rgb(239 68 68 / var(--mp-text-opacity))}"
        );
    }

    #[test]
    fn internal_layer_groups_after_default() {
        let result = build(&["uno-layer-utils:p-1", "m-1"], PresetOptions::default());
        assert_eq!(
            &*result.css,
            ".m-1{margin:2rpx}.uno-layer-utils\\:p-1{padding:2rpx}"
        );
    }

    #[test]
    fn pretty_output_has_layer_comments_and_preflights() {
        let config = GeneratorConfig::default();
        let result = generate(
            &tokens(&["supports-[display:grid]:p-1"]),
            &preset_mp(PresetOptions::default()),
            &config,
        );
        let css = result.css.to_string();
        assert!(css.starts_with("/* layer: preflights */\n*,::before,::after{"));
        assert!(css.ends_with(
            "/* layer: default */\n@supports (display:grid) {\n  .supports-\\[display\\:grid\\]\\:p-1 {\n    padding: 2rpx;\n  }\n}"
        ));
    }
}
