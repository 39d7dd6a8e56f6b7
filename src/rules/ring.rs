use crate::color::resolve_color;
use crate::rule::{declaration, entries, CssEntries, Rule};
use crate::values::{bracket, cssvar, first, percent, px};

/// Ring custom properties every element starts from; emitted by the
/// preflight.
pub fn ring_base() -> CssEntries {
    entries(&[
        ("--un-ring-inset", VAR_EMPTY),
        ("--un-ring-offset-width", "0px"),
        ("--un-ring-offset-color", "#fff"),
        ("--un-ring-width", "0px"),
        ("--un-ring-color", "rgb(147 197 253 / 0.5)"),
        ("--un-shadow", "0 0 rgb(0 0 0 / 0)"),
    ])
}

/// Whitespace value that keeps a `var()` reference valid while empty.
pub const VAR_EMPTY: &str = " ";

const RING_OFFSET_SHADOW: &str =
    "var(--un-ring-inset) 0 0 0 var(--un-ring-offset-width) var(--un-ring-offset-color)";
const RING_SHADOW: &str = "var(--un-ring-inset) 0 0 0 calc(var(--un-ring-width) + var(--un-ring-offset-width)) var(--un-ring-color)";
const RING_BOX_SHADOW: &str = "var(--un-ring-offset-shadow), var(--un-ring-shadow), var(--un-shadow)";

pub fn rings() -> Vec<Rule> {
    vec![
        // size
        Rule::pattern(r"^ring(?:-(.+))?$", |groups, context| {
            let width = groups.non_empty(1);
            let value = context
                .theme
                .ring_width
                .get(width.unwrap_or("DEFAULT"))
                .cloned()
                .or_else(|| px(width.unwrap_or("1")))?;
            Some(vec![
                ("--un-ring-width".to_string(), value),
                ("--un-ring-offset-shadow".to_string(), RING_OFFSET_SHADOW.to_string()),
                ("--un-ring-shadow".to_string(), RING_SHADOW.to_string()),
                ("box-shadow".to_string(), RING_BOX_SHADOW.to_string()),
            ])
        })
        .autocomplete(&["ring-$ringWidth"]),
        Rule::pattern(r"^ring-(?:width-|size-)(.+)$", |groups, context| {
            let width = groups.at(1);
            let value = context
                .theme
                .line_width
                .get(width)
                .cloned()
                .or_else(|| first(width, &[bracket, cssvar, px]));
            declaration("--un-ring-width", value)
        })
        .autocomplete(&["ring-(width|size)-$lineWidth"]),
        // offset size
        Rule::fixed("ring-offset", &[("--un-ring-offset-width", "1px")]),
        Rule::pattern(r"^ring-offset-(?:width-|size-)?(.+)$", |groups, context| {
            let width = groups.at(1);
            let value = context
                .theme
                .line_width
                .get(width)
                .cloned()
                .or_else(|| first(width, &[bracket, cssvar, px]));
            declaration("--un-ring-offset-width", value)
        })
        .autocomplete(&["ring-offset-(width|size)-$lineWidth"]),
        // colors
        Rule::pattern(r"^ring-(.+)$", |groups, context| {
            resolve_color(groups.at(1), context.theme, "--un-ring-color", "ring")
        })
        .autocomplete(&["ring-$colors"]),
        Rule::pattern(r"^ring-op?(.+)$", |groups, _| {
            declaration("--un-ring-opacity", first(groups.at(1), &[bracket, percent, cssvar]))
        })
        .autocomplete(&["ring-op<percent>"]),
        // offset color
        Rule::pattern(r"^ring-offset-(.+)$", |groups, context| {
            resolve_color(
                groups.at(1),
                context.theme,
                "--un-ring-offset-color",
                "ring-offset",
            )
        })
        .autocomplete(&["ring-offset-$colors"]),
        Rule::pattern(r"^ring-offset-op(.+)$", |groups, _| {
            declaration(
                "--un-ring-offset-opacity",
                first(groups.at(1), &[bracket, percent, cssvar]),
            )
        })
        .autocomplete(&["ring-offset-op<percent>"]),
        // style
        Rule::fixed("ring-inset", &[("--un-ring-inset", "inset")]),
    ]
}
