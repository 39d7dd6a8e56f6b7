use crate::color::{colorable_shadows, resolve_color};
use crate::rule::{declaration, CssEntries, Rule};
use crate::theme::{FontSize, Scale, Theme};
use crate::values::{bracket, bracket_of_length, cssvar, first, fraction, global, number, percent, px, rem};

fn themed_or_rem(scale: &Scale, key: &str) -> Option<String> {
    scale
        .get(key)
        .filter(|value| !value.is_empty())
        .cloned()
        .or_else(|| first(key, &[bracket, cssvar, global, rem]))
}

fn font_size_entries(size: &FontSize, theme: &Theme) -> CssEntries {
    let mut entries = vec![("font-size".to_string(), size.size().to_string())];
    match size {
        FontSize::WithProperties(_, properties) => {
            entries.extend(
                properties
                    .iter()
                    .map(|(property, value)| (property.clone(), value.clone())),
            );
        }
        FontSize::WithLetterSpacing(_, _, tracking) => {
            entries.push(("line-height".to_string(), "1".to_string()));
            if let Some(spacing) = themed_or_rem(&theme.letter_spacing, tracking) {
                entries.push(("letter-spacing".to_string(), spacing));
            }
        }
        FontSize::Size(_) | FontSize::WithLineHeight(_, _) => {
            entries.push(("line-height".to_string(), "1".to_string()));
        }
    }
    entries
}

pub fn fonts() -> Vec<Rule> {
    vec![
        // size
        Rule::pattern(r"^text-(.+)$", |groups, context| {
            let size = groups.at(1);
            match context.theme.font_size.get(size) {
                Some(themed) if !themed.size().is_empty() => {
                    Some(font_size_entries(themed, context.theme))
                }
                _ => declaration("font-size", first(size, &[bracket_of_length, rem])),
            }
        })
        .autocomplete(&["text-$fontSize"]),
        Rule::pattern(r"^(?:text|font)-size-(.+)$", |groups, context| {
            let size = groups.at(1);
            let value = context
                .theme
                .font_size
                .get(size)
                .map(|themed| themed.size().to_string())
                .or_else(|| first(size, &[bracket, cssvar, global, rem]));
            declaration("font-size", value)
        })
        .autocomplete(&["text-size-$fontSize"]),
        // weights
        Rule::pattern(r"^fw-?([^-]+)$", |groups, context| {
            let weight = groups.at(1);
            let value = context
                .theme
                .font_weight
                .get(weight)
                .filter(|value| !value.is_empty())
                .cloned()
                .or_else(|| first(weight, &[bracket, global, number]));
            declaration("font-weight", value)
        })
        .autocomplete(&["(fw)-(100|200|300|400|500|600|700|800|900)", "(fw)-$fontWeight"]),
        // leadings
        Rule::pattern(r"^(?:font-)?lh-(.+)$", |groups, context| {
            declaration("line-height", themed_or_rem(&context.theme.line_height, groups.at(1)))
        })
        .autocomplete(&["(lh)-$lineHeight"]),
        // synthesis
        Rule::fixed("font-synthesis-weight", &[("font-synthesis", "weight")]),
        Rule::fixed("font-synthesis-style", &[("font-synthesis", "style")]),
        Rule::fixed("font-synthesis-small-caps", &[("font-synthesis", "small-caps")]),
        Rule::fixed("font-synthesis-none", &[("font-synthesis", "none")]),
        Rule::pattern(r"^font-synthesis-(.+)$", |groups, _| {
            declaration("font-synthesis", first(groups.at(1), &[bracket, cssvar, global]))
        }),
        // tracking
        Rule::pattern(r"^(?:font-)?tracking-(.+)$", |groups, context| {
            declaration(
                "letter-spacing",
                themed_or_rem(&context.theme.letter_spacing, groups.at(1)),
            )
        })
        .autocomplete(&["tracking-$letterSpacing"]),
        Rule::pattern(r"^(?:font-)?word-spacing-(.+)$", |groups, context| {
            declaration(
                "word-spacing",
                themed_or_rem(&context.theme.word_spacing, groups.at(1)),
            )
        })
        .autocomplete(&["word-spacing-$wordSpacing"]),
        // family
        Rule::pattern(r"^font-(.+)$", |groups, context| {
            let family = groups.at(1);
            let value = context
                .theme
                .font_family
                .get(family)
                .filter(|value| !value.is_empty())
                .cloned()
                .or_else(|| first(family, &[bracket, cssvar, global]));
            declaration("font-family", value)
        })
        .autocomplete(&["font-$fontFamily"]),
    ]
}

pub fn tab_sizes() -> Vec<Rule> {
    vec![Rule::pattern(r"^tab(?:-(.+))?$", |groups, _| {
        let size = groups.non_empty(1).unwrap_or("4");
        let value = first(size, &[bracket, cssvar, global, number])?;
        Some(vec![
            ("-moz-tab-size".to_string(), value.clone()),
            ("-o-tab-size".to_string(), value.clone()),
            ("tab-size".to_string(), value),
        ])
    })]
}

pub fn text_indents() -> Vec<Rule> {
    vec![Rule::pattern(r"^indent(?:-(.+))?$", |groups, context| {
        let indent = groups.non_empty(1);
        let value = context
            .theme
            .text_indent
            .get(indent.unwrap_or("DEFAULT"))
            .filter(|value| !value.is_empty())
            .cloned()
            .or_else(|| first(indent?, &[bracket, cssvar, global, fraction, rem]));
        declaration("text-indent", value)
    })
    .autocomplete(&["indent-$textIndent"])]
}

pub fn text_strokes() -> Vec<Rule> {
    vec![
        // widths
        Rule::pattern(r"^text-stroke(?:-(.+))?$", |groups, context| {
            let width = groups.non_empty(1);
            let value = context
                .theme
                .text_stroke_width
                .get(width.unwrap_or("DEFAULT"))
                .filter(|value| !value.is_empty())
                .cloned()
                .or_else(|| first(width?, &[bracket, cssvar, px]));
            declaration("-webkit-text-stroke-width", value)
        })
        .autocomplete(&["text-stroke-$textStrokeWidth"]),
        // colors
        Rule::pattern(r"^text-stroke-(.+)$", |groups, context| {
            resolve_color(
                groups.at(1),
                context.theme,
                "-webkit-text-stroke-color",
                "text-stroke",
            )
        })
        .autocomplete(&["text-stroke-$colors"]),
        Rule::pattern(r"^text-stroke-op-?(.+)$", |groups, _| {
            declaration(
                "--un-text-stroke-opacity",
                first(groups.at(1), &[bracket, percent, cssvar]),
            )
        })
        .autocomplete(&["text-stroke-op-<percent>"]),
    ]
}

pub fn text_shadows() -> Vec<Rule> {
    vec![
        Rule::pattern(r"^text-shadow(?:-(.+))?$", |groups, context| {
            let name = groups.non_empty(1);
            match context.theme.text_shadow.get(name.unwrap_or("DEFAULT")) {
                Some(shadow) => Some(vec![
                    (
                        "--un-text-shadow".to_string(),
                        colorable_shadows(&shadow.layers(), "--un-text-shadow-color").join(","),
                    ),
                    ("text-shadow".to_string(), "var(--un-text-shadow)".to_string()),
                ]),
                None => declaration("text-shadow", first(name?, &[bracket, cssvar, global])),
            }
        })
        .autocomplete(&["text-shadow-$textShadow"]),
        // colors
        Rule::pattern(r"^text-shadow-color-(.+)$", |groups, context| {
            resolve_color(
                groups.at(1),
                context.theme,
                "--un-text-shadow-color",
                "text-shadow",
            )
        })
        .autocomplete(&["text-shadow-color-$colors"]),
        Rule::pattern(r"^text-shadow-color-op-?(.+)$", |groups, _| {
            declaration(
                "--un-text-shadow-opacity",
                first(groups.at(1), &[bracket, percent, cssvar]),
            )
        })
        .autocomplete(&["text-shadow-color-op-<percent>"]),
    ]
}
