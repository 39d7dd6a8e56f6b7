use super::direction_patterns;
use crate::color::{color_opacity_to_string, color_to_string, has_parseable_color, is_css_math_fn, opaque_color_to_string, parse_color, ColorSource, ParsedColor};
use crate::direction::{corner_suffixes, direction_suffixes};
use crate::rule::{merge_entries, CssEntries, Groups, ResolveFn, Rule, RuleContext};
use crate::theme::Theme;
use crate::values::{bracket, cssvar, first, fraction, global, percent, px, rem, GLOBAL_KEYWORDS};

/// All sides, axis, physical side, logical axis, logical side.
const SIDES: [&str; 5] = ["", "[xy]", "[rltbse]", "block|inline", "[bi][se]"];

/// All corners, side, physical corner, logical side, logical corner.
const CORNERS: [&str; 5] = ["", "[rltbse]", "[rltb]{2}", "[bise][se]", "[bi][se]-[bi][se]"];

pub const BORDER_STYLES: [&str; 10] = [
    "solid", "dashed", "dotted", "double", "hidden", "none", "groove", "ridge", "inset", "outset",
];

pub fn borders() -> Vec<Rule> {
    let mut rules = Vec::new();
    rules.extend(family("^b{dir}(?:-(.+))?$", &SIDES, true, handle_border, &["b-<directions>"]));
    rules.extend(family(
        "^b-{dir}(?:width|size)-(.+)$",
        &SIDES,
        false,
        handle_border_size,
        &["b-<num>", "b-<directions>-<num>"],
    ));
    rules.extend(family(
        "^b-{dir}(?:color-)?(.+)$",
        &SIDES,
        false,
        handle_border_color,
        &["b-$colors", "b-<directions>-$colors"],
    ));
    rules.extend(family("^b-{dir}op-?(.+)$", &SIDES, false, handle_border_opacity, &["b-op-<percent>"]));
    rules.extend(family(
        "^(?:border-|b-)?rd{dir}(?:-(.+))?$",
        &CORNERS,
        true,
        handle_rounded,
        &["b-rd", "b-rd-<num>", "rd", "rd-<num>"],
    ));
    rules.extend(family(
        "^b-{dir}(?:style-)?(.+)$",
        &SIDES,
        false,
        handle_border_style,
        &["b-style", "b-<directions>-style"],
    ));
    rules
}

// One resolver over the five side grammars; hints go on the first pattern.
fn family(
    template: &str,
    sides: &[&str],
    leading: bool,
    resolver: ResolveFn,
    hints: &[&'static str],
) -> Vec<Rule> {
    direction_patterns(template, sides, leading)
        .iter()
        .enumerate()
        .map(|(idx, pattern)| {
            let rule = Rule::pattern(pattern, resolver);
            if idx == 0 {
                rule.autocomplete(hints)
            } else {
                rule
            }
        })
        .collect()
}

fn handle_border(groups: &Groups<'_>, context: &RuleContext<'_>) -> Option<CssEntries> {
    handle_border_size(groups, context)
}

fn handle_border_size(groups: &Groups<'_>, context: &RuleContext<'_>) -> Option<CssEntries> {
    let size = groups.non_empty(2);
    let value = context
        .theme
        .line_width
        .get(size.unwrap_or("DEFAULT"))
        .cloned()
        .or_else(|| first(size.unwrap_or("1"), &[bracket, cssvar, global, px]))?;
    let suffixes = direction_suffixes(groups.at(1))?;
    Some(
        suffixes
            .iter()
            .map(|suffix| (format!("border{}-width", suffix), value.clone()))
            .collect(),
    )
}

fn handle_border_color(groups: &Groups<'_>, context: &RuleContext<'_>) -> Option<CssEntries> {
    let body = groups.at(2);
    let suffixes = direction_suffixes(groups.at(1))?;
    if !has_parseable_color(body, context.theme) {
        return None;
    }
    let mut entries = Vec::new();
    for suffix in suffixes {
        entries.extend(border_color(suffix, body, context.theme)?);
    }
    Some(merge_entries(entries))
}

/// Color declarations for one side. A math-function body is taken as the
/// border width instead.
pub fn border_color(direction: &str, body: &str, theme: &Theme) -> Option<CssEntries> {
    let ParsedColor { source, alpha, .. } = parse_color(body, theme)?;
    let color_property = format!("border{}-color", direction);

    let entries = match source {
        ColorSource::Css(color) => match alpha {
            Some(alpha) => vec![(color_property, color_to_string(&color, Some(&alpha)))],
            None if direction.is_empty() => vec![
                ("--un-border-opacity".to_string(), color_opacity_to_string(&color)),
                (
                    color_property,
                    color_to_string(&color, Some("var(--un-border-opacity)")),
                ),
            ],
            None => {
                let variable = format!("--un-border{}-opacity", direction);
                let value = color_to_string(&color, Some(&format!("var({})", variable)));
                vec![
                    ("--un-border-opacity".to_string(), color_opacity_to_string(&color)),
                    (variable, "var(--un-border-opacity)".to_string()),
                    (color_property, value),
                ]
            }
        },
        ColorSource::Opaque(color) if is_css_math_fn(&color) => {
            vec![("border-width".to_string(), color)]
        }
        ColorSource::Opaque(color) => {
            vec![(color_property, opaque_color_to_string(&color, alpha.as_deref()))]
        }
    };
    Some(entries)
}

fn handle_border_opacity(groups: &Groups<'_>, _: &RuleContext<'_>) -> Option<CssEntries> {
    let value = first(groups.at(2), &[bracket, percent, cssvar])?;
    let suffixes = direction_suffixes(groups.at(1))?;
    Some(
        suffixes
            .iter()
            .map(|suffix| (format!("--un-border{}-opacity", suffix), value.clone()))
            .collect(),
    )
}

fn handle_rounded(groups: &Groups<'_>, context: &RuleContext<'_>) -> Option<CssEntries> {
    let size = groups.non_empty(2);
    let value = context
        .theme
        .border_radius
        .get(size.unwrap_or("DEFAULT"))
        .filter(|value| !value.is_empty())
        .cloned()
        .or_else(|| first(size.unwrap_or("1"), &[bracket, cssvar, global, fraction, rem]))?;
    let suffixes = corner_suffixes(groups.at(1))?;
    Some(
        suffixes
            .iter()
            .map(|suffix| (format!("border{}-radius", suffix), value.clone()))
            .collect(),
    )
}

fn handle_border_style(groups: &Groups<'_>, _: &RuleContext<'_>) -> Option<CssEntries> {
    let style = groups.at(2);
    if !BORDER_STYLES.contains(&style) && !GLOBAL_KEYWORDS.contains(&style) {
        return None;
    }
    let suffixes = direction_suffixes(groups.at(1))?;
    Some(
        suffixes
            .iter()
            .map(|suffix| (format!("border{}-style", suffix), style.to_string()))
            .collect(),
    )
}
