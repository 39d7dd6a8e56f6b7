//! Color parsing and the shared color resolvers.
//!
//! A color body such as `red-500/50`, `[#0000ff]`, `hex-abc` or `$brand`
//! resolves to a [`ParsedColor`]. Structured colors ([`CssColor`]) can be
//! re-rendered with a different alpha, which is what the
//! `--un-<group>-opacity` indirection relies on; anything else is carried
//! as an opaque string.

use crate::rule::CssEntries;
use crate::theme::{ColorRef, Theme};
use crate::values::{bracket, bracket_of_color, bracket_type_hint, cssvar, first, number_with_unit, percent};
use regex::Regex;
use std::sync::LazyLock;

/// Function names rendered in the space-separated `fn(a b c / alpha)` form.
const CSS_COLOR_FUNCTIONS: [&str; 9] = [
    "hsl", "hsla", "hwb", "lab", "lch", "oklab", "oklch", "rgb", "rgba",
];

const ALPHA_PLACEHOLDERS: [&str; 2] = ["%alpha", "<alpha-value>"];

static HEX_BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#([\da-f]+)$").expect("hex color pattern compiles"));

static HEX_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[\da-fA-F]+$").expect("hex token pattern compiles"));

static HEX_PREFIXED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^hex-([\da-fA-F]+)$").expect("hex prefix pattern compiles"));

static COMMA_FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(rgb|rgba|hsl|hsla)\((.+)\)$").expect("comma color pattern compiles")
});

static SPACE_FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(hsl|hsla|hwb|lab|lch|oklab|oklch|rgb|rgba)\((.+)\)$")
        .expect("space color pattern compiles")
});

static COLOR_FUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^color\((.+)\)$").expect("color() pattern compiles"));

static LETTER_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([0-9])").expect("letter-digit pattern compiles"));

static CSS_MATH_FN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(calc|clamp|min|max)\s*\((.+)\)(.*)").expect("math function pattern compiles")
});

/// A color whose channels are known, so its alpha can be replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssColor {
    pub kind: String,
    pub components: Vec<String>,
    pub alpha: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSource {
    Css(CssColor),
    Opaque(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedColor {
    pub source: ColorSource,
    /// Explicit alpha from the `/50` (or `:50`) modifier.
    pub alpha: Option<String>,
    pub name: String,
    pub no: String,
    pub opacity: String,
}

/// Splits `raw` at the first separator that sits outside `open`/`close`.
/// A separator at either end, or an unbalanced close, rejects the input.
pub(crate) fn split_component<'a>(
    raw: &'a str,
    open: char,
    close: char,
    separators: &[char],
) -> Option<(&'a str, &'a str)> {
    if raw.is_empty() || separators.is_empty() {
        return None;
    }
    let mut depth = 0i32;
    for (idx, ch) in raw.char_indices() {
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth < 0 {
                return None;
            }
        } else if depth == 0 && separators.contains(&ch) {
            let width = ch.len_utf8();
            if idx == 0 || idx + width == raw.len() {
                return None;
            }
            return Some((&raw[..idx], &raw[idx + width..]));
        }
    }
    Some((raw, ""))
}

/// Repeated [`split_component`] over parentheses, at most `limit` parts.
pub(crate) fn split_components<'a>(
    raw: &'a str,
    separators: &[char],
    limit: usize,
) -> Option<Vec<&'a str>> {
    let mut parts = Vec::new();
    let mut rest = raw;
    while !rest.is_empty() {
        if parts.len() == limit {
            return None;
        }
        let (part, tail) = split_component(rest, '(', ')', separators)?;
        parts.push(part);
        rest = tail;
    }
    (!parts.is_empty()).then_some(parts)
}

struct RawColor {
    kind: String,
    components: Vec<String>,
    alpha: Option<String>,
}

enum CommaParse {
    Color(RawColor),
    Invalid,
    NotApplicable,
}

/// Parses hex, `rebeccapurple` and the `rgb()`/`hsl()`/… function forms.
pub fn parse_css_color(raw: &str) -> Option<CssColor> {
    let RawColor {
        kind,
        components,
        alpha,
    } = parse_raw_color(raw)?;
    let kind = kind.to_ascii_lowercase();
    if components.is_empty() {
        return None;
    }
    if matches!(kind.as_str(), "rgba" | "hsla") && alpha.is_none() {
        return None;
    }
    if CSS_COLOR_FUNCTIONS.contains(&kind.as_str()) && ![1, 3].contains(&components.len()) {
        return None;
    }
    Some(CssColor {
        kind,
        components: components
            .into_iter()
            .map(|component| component.trim().to_string())
            .collect(),
        alpha: alpha.map(|alpha| alpha.trim().to_string()),
    })
}

fn parse_raw_color(raw: &str) -> Option<RawColor> {
    if raw.is_empty() {
        return None;
    }
    if let Some(color) = parse_hex_color(raw) {
        return Some(color);
    }
    if raw == "rebeccapurple" {
        return Some(RawColor {
            kind: "rgb".to_string(),
            components: vec!["102".to_string(), "51".to_string(), "153".to_string()],
            alpha: Some("1".to_string()),
        });
    }
    match parse_comma_function(raw) {
        CommaParse::Color(color) => return Some(color),
        CommaParse::Invalid => return None,
        CommaParse::NotApplicable => {}
    }
    parse_space_function(raw).or_else(|| parse_color_function(raw))
}

fn parse_hex_color(raw: &str) -> Option<RawColor> {
    let body = HEX_BODY_RE.captures(raw)?.get(1)?.as_str();
    let channel_alpha = |value: u32| crate::values::format_number((value as f64 / 255.0 * 100.0).round() / 100.0);
    let (channels, alpha) = match body.len() {
        3 | 4 => {
            let digits = body
                .chars()
                .map(|ch| ch.to_digit(16).map(|n| (n << 4) | n))
                .collect::<Option<Vec<_>>>()?;
            let alpha = digits.get(3).map(|value| channel_alpha(*value));
            (digits[..3].to_vec(), alpha)
        }
        6 | 8 => {
            let value = u32::from_str_radix(body, 16).ok()?;
            if body.len() == 6 {
                (vec![(value >> 16) & 0xff, (value >> 8) & 0xff, value & 0xff], None)
            } else {
                (
                    vec![(value >> 24) & 0xff, (value >> 16) & 0xff, (value >> 8) & 0xff],
                    Some(channel_alpha(value & 0xff)),
                )
            }
        }
        _ => return None,
    };
    Some(RawColor {
        kind: "rgb".to_string(),
        components: channels.into_iter().map(|n| n.to_string()).collect(),
        alpha,
    })
}

fn parse_comma_function(raw: &str) -> CommaParse {
    let Some(captures) = COMMA_FUNCTION_RE.captures(raw) else {
        return CommaParse::NotApplicable;
    };
    let kind = captures[1].to_string();
    let Some(parts) = split_components(&captures[2], &[','], 5) else {
        return CommaParse::NotApplicable;
    };
    match parts.len() {
        3 | 4 => CommaParse::Color(RawColor {
            kind,
            components: parts[..3].iter().map(|part| part.to_string()).collect(),
            alpha: parts.get(3).map(|alpha| alpha.to_string()),
        }),
        1 => CommaParse::NotApplicable,
        _ => CommaParse::Invalid,
    }
}

fn parse_space_function(raw: &str) -> Option<RawColor> {
    let captures = SPACE_FUNCTION_RE.captures(raw)?;
    parse_space_values(&format!("{} {}", &captures[1], &captures[2]))
}

fn parse_color_function(raw: &str) -> Option<RawColor> {
    let captures = COLOR_FUNCTION_RE.captures(raw)?;
    parse_space_values(&captures[1])
}

// The first space-separated component is the color kind.
fn parse_space_values(raw: &str) -> Option<RawColor> {
    let mut components = split_components(raw, &[' '], 10)?
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let mut alpha = None;

    let total = components.len();
    if total >= 2 && components[total - 2] == "/" {
        alpha = Some(components[total - 1].clone());
        components.truncate(total - 2);
    } else {
        if total >= 2
            && (components[total - 2].ends_with('/') || components[total - 1].starts_with('/'))
        {
            let joined = components.split_off(total - 2).join(" ");
            components.push(joined);
        }
        let last = components.last()?.clone();
        let mut with_alpha = split_components(&last, &['/'], 2)?;
        if with_alpha.len() > 1 && with_alpha.last() != Some(&"") {
            alpha = with_alpha.pop().map(str::to_string);
            if let Some(slot) = components.last_mut() {
                *slot = with_alpha.join("/");
            }
        }
    }

    if components.is_empty() {
        return None;
    }
    let kind = components.remove(0);
    Some(RawColor {
        kind,
        components,
        alpha,
    })
}

/// Renders a structured color, replacing its alpha when `alpha` is given.
pub fn color_to_string(color: &CssColor, alpha: Option<&str>) -> String {
    let alpha = alpha.or(color.alpha.as_deref());
    let kind = color.kind.to_ascii_lowercase();
    if matches!(kind.as_str(), "hsla" | "rgba") {
        return match alpha {
            Some(alpha) => format!("{}({}, {})", kind, color.components.join(", "), alpha),
            None => format!("{}({})", kind, color.components.join(", ")),
        };
    }
    let alpha = alpha.map(|alpha| format!(" / {}", alpha)).unwrap_or_default();
    if CSS_COLOR_FUNCTIONS.contains(&kind.as_str()) {
        format!("{}({}{})", kind, color.components.join(" "), alpha)
    } else {
        format!("color({} {}{})", kind, color.components.join(" "), alpha)
    }
}

/// Fills the `<alpha-value>` placeholder of an opaque color.
pub fn opaque_color_to_string(color: &str, alpha: Option<&str>) -> String {
    color.replacen("<alpha-value>", alpha.unwrap_or("1"), 1)
}

pub fn color_opacity_to_string(color: &CssColor) -> String {
    match color.alpha.as_deref() {
        None => "1".to_string(),
        Some(alpha) if ALPHA_PLACEHOLDERS.contains(&alpha) => "1".to_string(),
        Some(alpha) => alpha.to_string(),
    }
}

/// Splits `body` into the value and its `/` or `:` modifier. A bracket type
/// hint other than `kind` rejects the body.
pub fn split_shorthand<'a>(body: &'a str, kind: &str) -> Option<(&'a str, &'a str)> {
    let (front, rest) = split_component(body, '[', ']', &['/', ':'])?;
    match bracket_type_hint(front) {
        Some(hint) if hint != kind => None,
        _ => Some((front, rest)),
    }
}

pub fn parse_color(body: &str, theme: &Theme) -> Option<ParsedColor> {
    let (main, opacity) = split_shorthand(body, "color")?;
    let hyphenated = LETTER_DIGIT_RE.replace_all(main, "$1-$2");
    let segments = hyphenated.split('-').collect::<Vec<_>>();
    let name = segments.first().copied().unwrap_or_default();
    if name.is_empty() {
        return None;
    }

    let bracketed = bracket_of_color(main);
    let bracket_or_main = bracketed.as_deref().unwrap_or(main);
    if number_with_unit(bracket_or_main).is_some() {
        return None;
    }

    let mut color = if HEX_TOKEN_RE.is_match(bracket_or_main) {
        Some(bracket_or_main.to_string())
    } else if let Some(captures) = HEX_PREFIXED_RE.captures(bracket_or_main) {
        Some(format!("#{}", &captures[1]))
    } else if main.starts_with('$') {
        cssvar(main)
    } else {
        None
    };
    color = color.or(bracketed);

    if color.is_none() {
        if let Some(ColorRef::Value(value)) = theme.color(&[main]) {
            color = Some(value.to_string());
        }
    }

    let mut no = "DEFAULT";
    if color.is_none() {
        let (scale, rest) = segments.split_last()?;
        let data = if !scale.is_empty() && scale.chars().all(|ch| ch.is_ascii_digit()) {
            no = *scale;
            theme
                .color(rest)
                .filter(|data| matches!(data, ColorRef::Palette(_)))
        } else {
            let mut data = theme.color(&segments);
            if data.is_none() && segments.len() <= 2 {
                if let Some(shade) = segments.get(1) {
                    no = *shade;
                }
                data = theme.color(&[name]);
            }
            data
        };
        color = match data {
            Some(ColorRef::Value(value)) => Some(value.to_string()),
            Some(ColorRef::Palette(palette)) => match palette.get(no).map(|shade| shade.as_ref()) {
                Some(ColorRef::Value(value)) => Some(value.to_string()),
                _ => None,
            },
            None => None,
        };
    }

    let color = color.filter(|color| !color.is_empty())?;
    let source = match parse_css_color(&color) {
        Some(css) => ColorSource::Css(css),
        None => ColorSource::Opaque(color),
    };

    Some(ParsedColor {
        source,
        alpha: first(opacity, &[bracket, cssvar, percent]),
        name: name.to_string(),
        no: no.to_string(),
        opacity: opacity.to_string(),
    })
}

pub fn has_parseable_color(body: &str, theme: &Theme) -> bool {
    parse_color(body, theme).is_some()
}

/// Resolves `body` into `property`, routing a structured color without an
/// explicit alpha through `--un-<var_name>-opacity`.
pub fn resolve_color(body: &str, theme: &Theme, property: &str, var_name: &str) -> Option<CssEntries> {
    let ParsedColor { source, alpha, .. } = parse_color(body, theme)?;
    let entries = match source {
        ColorSource::Css(color) => match alpha {
            Some(alpha) => vec![(property.to_string(), color_to_string(&color, Some(&alpha)))],
            None => {
                let variable = format!("--un-{}-opacity", var_name);
                let value = color_to_string(&color, Some(&format!("var({})", variable)));
                vec![
                    (variable, color_opacity_to_string(&color)),
                    (property.to_string(), value),
                ]
            }
        },
        ColorSource::Opaque(color) => vec![(
            property.to_string(),
            opaque_color_to_string(&color, alpha.as_deref()),
        )],
    };
    Some(entries)
}

pub fn is_css_math_fn(value: &str) -> bool {
    CSS_MATH_FN_RE.is_match(value)
}

/// True for bodies that read as a length (`2px`, `[calc(1rem+2px)]`).
pub fn is_size(raw: &str) -> bool {
    let inner = raw
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(raw);
    is_css_math_fn(inner) || number_with_unit(inner).is_some()
}

/// Rewrites each shadow layer so its color is read from `color_var`, keeping
/// the original color as the fallback. Layers that do not parse are returned
/// unchanged.
pub fn colorable_shadows(layers: &[&str], color_var: &str) -> Vec<String> {
    let mut colored = Vec::with_capacity(layers.len());
    for layer in layers {
        let Some(mut components) = split_components(layer, &[' '], 6).filter(|parts| parts.len() >= 3) else {
            return layers.iter().map(|layer| layer.to_string()).collect();
        };

        let inset = match components.iter().position(|part| *part == "inset") {
            Some(pos) => {
                components.remove(pos);
                true
            }
            None => false,
        };

        let mut fallback = String::new();
        let leading = components.first().and_then(|part| parse_css_color(part));
        if let Some(color) = leading {
            components.remove(0);
            fallback = format!(", {}", color_to_string(&color, None));
        } else if let Some(last) = components.last().copied() {
            if parse_css_color(last).is_some() || is_css_math_fn(last) {
                components.pop();
                if let Some(color) = parse_css_color(last) {
                    fallback = format!(", {}", color_to_string(&color, None));
                }
            }
        }

        colored.push(format!(
            "{}{} var({}{})",
            if inset { "inset " } else { "" },
            components.join(" "),
            color_var,
            fallback
        ));
    }
    colored
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entries(pairs: &[(&str, &str)]) -> CssEntries {
        pairs
            .iter()
            .map(|(property, value)| (property.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn parses_hex_colors() {
        let color = parse_css_color("#ef4444").expect("hex parses");
        assert_eq!(color.kind, "rgb");
        assert_eq!(color.components, vec!["239", "68", "68"]);
        assert_eq!(color.alpha, None);

        let short = parse_css_color("#fff8").expect("short hex parses");
        assert_eq!(short.components, vec!["255", "255", "255"]);
        assert_eq!(short.alpha.as_deref(), Some("0.53"));

        assert_eq!(parse_css_color("#12345"), None);
        assert_eq!(parse_css_color("red"), None);
    }

    #[test]
    fn parses_function_colors() {
        let comma = parse_css_color("rgba(1, 2, 3, 0.4)").expect("rgba parses");
        assert_eq!(color_to_string(&comma, None), "rgba(1, 2, 3, 0.4)");

        let space = parse_css_color("hsl(10 20% 30% / 0.5)").expect("hsl parses");
        assert_eq!(space.components, vec!["10", "20%", "30%"]);
        assert_eq!(space.alpha.as_deref(), Some("0.5"));

        let tight = parse_css_color("rgb(1 2 3/0.5)").expect("tight alpha parses");
        assert_eq!(tight.alpha.as_deref(), Some("0.5"));

        let display_p3 = parse_css_color("color(display-p3 1 0 0)").expect("color() parses");
        assert_eq!(color_to_string(&display_p3, Some("0.2")), "color(display-p3 1 0 0 / 0.2)");

        assert_eq!(parse_css_color("rgba(1 2 3)"), None);
        assert_eq!(parse_css_color("rgb(1, 2)"), None);
    }

    #[test]
    fn renders_with_alpha_override() {
        let color = parse_css_color("#ef4444").expect("hex parses");
        assert_eq!(color_to_string(&color, Some("0.5")), "rgb(239 68 68 / 0.5)");
        assert_eq!(color_to_string(&color, None), "rgb(239 68 68)");
        assert_eq!(color_opacity_to_string(&color), "1");
    }

    #[test]
    fn shorthand_splits_outside_brackets() {
        assert_eq!(split_shorthand("red-500/50", "color"), Some(("red-500", "50")));
        assert_eq!(split_shorthand("[rgb(1_2_3/0.5)]", "color"), Some(("[rgb(1_2_3/0.5)]", "")));
        assert_eq!(split_shorthand("[color:red]:20", "color"), Some(("[color:red]", "20")));
        assert_eq!(split_shorthand("[length:2px]", "color"), None);
        assert_eq!(split_shorthand("red/", "color"), None);
    }

    #[test]
    fn resolves_theme_colors() {
        let theme = Theme::default();
        let parsed = parse_color("red-500/50", &theme).expect("red-500 resolves");
        assert_eq!(parsed.alpha.as_deref(), Some("0.5"));
        assert_eq!(parsed.no, "500");
        assert!(matches!(parsed.source, ColorSource::Css(_)));

        let compact = parse_color("red5", &theme).expect("red5 resolves");
        assert_eq!(compact.no, "5");

        let bare = parse_color("blue", &theme).expect("palette default resolves");
        assert_eq!(
            bare.source,
            ColorSource::Css(parse_css_color("#60a5fa").expect("hex parses"))
        );

        assert_eq!(parse_color("t-red-500", &theme), None);
        assert_eq!(parse_color("2px", &theme), None);
        assert_eq!(parse_color("nope", &theme), None);
    }

    #[test]
    fn accepts_direct_colors() {
        let theme = Theme::default();
        assert!(matches!(
            parse_color("hex-abc", &theme).map(|parsed| parsed.source),
            Some(ColorSource::Css(_))
        ));
        assert_eq!(
            parse_color("$brand", &theme).map(|parsed| parsed.source),
            Some(ColorSource::Opaque("var(--brand)".to_string()))
        );
        assert_eq!(
            parse_color("current", &theme).map(|parsed| parsed.source),
            Some(ColorSource::Opaque("currentColor".to_string()))
        );
        assert_eq!(
            parse_color("[calc(1px+2px)]", &theme).map(|parsed| parsed.source),
            Some(ColorSource::Opaque("calc(1px + 2px)".to_string()))
        );
    }

    #[test]
    fn color_resolver_branches() {
        let theme = Theme::default();
        assert_eq!(
            resolve_color("red-500", &theme, "color", "text"),
            Some(entries(&[
                ("--un-text-opacity", "1"),
                ("color", "rgb(239 68 68 / var(--un-text-opacity))"),
            ]))
        );
        assert_eq!(
            resolve_color("red-500/[.3]", &theme, "color", "text"),
            Some(entries(&[("color", "rgb(239 68 68 / .3)")]))
        );
        assert_eq!(
            resolve_color("transparent", &theme, "color", "text"),
            Some(entries(&[("color", "transparent")]))
        );
        assert_eq!(resolve_color("huh", &theme, "color", "text"), None);
    }

    #[test]
    fn size_detection() {
        assert!(is_size("2px"));
        assert!(is_size("[calc(1rem+2px)]"));
        assert!(!is_size("red-500"));
        assert!(is_css_math_fn("min(1px,2px)"));
        assert!(!is_css_math_fn("var(--x)"));
    }

    #[test]
    fn shadows_take_a_color_variable() {
        assert_eq!(
            colorable_shadows(&["0 0 1px rgb(0 0 0 / 0.2)", "inset 1px 1px #fff"], "--un-text-shadow-color"),
            vec![
                "0 0 1px var(--un-text-shadow-color, rgb(0 0 0 / 0.2))".to_string(),
                "inset 1px 1px var(--un-text-shadow-color, rgb(255 255 255))".to_string(),
            ]
        );
        assert_eq!(
            colorable_shadows(&["none"], "--un-text-shadow-color"),
            vec!["none".to_string()]
        );
    }
}
