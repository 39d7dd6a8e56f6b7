//! Parsers for the raw value fragment of a utility token.
//!
//! Every parser takes the fragment as written in the class name and returns
//! the CSS value it stands for, or `None` when the fragment is not of that
//! shape. Parsers are chained with [`first`], which returns the first hit:
//!
//! ```
//! use mpcss::values::{bracket, cssvar, first, px};
//!
//! assert_eq!(first("2", &[bracket, cssvar, px]), Some("2px".to_string()));
//! assert_eq!(first("[3em]", &[bracket, cssvar, px]), Some("3em".to_string()));
//! ```

use crate::selector::escape_selector;
use regex::Regex;
use std::sync::LazyLock;

pub const GLOBAL_KEYWORDS: [&str; 5] = ["inherit", "initial", "revert", "revert-layer", "unset"];

pub type Handler = fn(&str) -> Option<String>;

static NUMBER_WITH_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(-?\d*(?:\.\d+)?)(px|pt|pc|%|r?(?:em|ex|lh|cap|ch|ic)|(?:[sld]?v|cq)(?:[whib]|min|max)|in|cm|mm|rpx)?$",
    )
    .expect("number-with-unit pattern compiles")
});

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?\d*(?:\.\d+)?)$").expect("number pattern compiles"));

static UNIT_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(px|[sld]?v[wh])$").expect("unit pattern compiles"));

static BRACKET_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\[(color|image|length|size|position|quoted|string):")
        .expect("bracket type pattern compiles")
});

static CSS_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\$[^\s'"`;{}]"#).expect("css variable pattern compiles"));

static LEADING_FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("float pattern compiles")
});

/// Returns the first parser result for `value`.
pub fn first(value: &str, handlers: &[Handler]) -> Option<String> {
    handlers.iter().find_map(|handler| handler(value))
}

/// Formats a number the way generated CSS expects: shortest form, ten
/// fractional digits at most, no negative zero.
pub fn round(value: f64) -> String {
    let fixed = format!("{:.10}", value);
    let rounded = fixed.parse::<f64>().unwrap_or(value);
    format_number(rounded)
}

pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Lenient leading-number parse: `"1px"` is `1`, `"px"` is nothing.
pub(crate) fn parse_leading_float(raw: &str) -> Option<f64> {
    let found = LEADING_FLOAT_RE.find(raw)?;
    found.as_str().trim().parse::<f64>().ok()
}

fn unit_only(raw: &str) -> Option<String> {
    if !UNIT_ONLY_RE.is_match(raw) {
        return None;
    }
    let amount = if raw.eq_ignore_ascii_case("px") { 1 } else { 100 };
    Some(format!("{}{}", amount, raw))
}

fn split_number_with_unit(raw: &str) -> Option<(f64, Option<String>)> {
    let captures = NUMBER_WITH_UNIT_RE.captures(raw)?;
    let number = captures.get(1)?.as_str().parse::<f64>().ok()?;
    let unit = captures.get(2).map(|unit| unit.as_str().to_string());
    Some((number, unit))
}

pub fn number_with_unit(raw: &str) -> Option<String> {
    let (number, unit) = split_number_with_unit(raw)?;
    let unit = unit?;
    Some(format!("{}{}", round(number), unit))
}

pub fn auto(raw: &str) -> Option<String> {
    matches!(raw, "auto" | "a").then(|| "auto".to_string())
}

/// Bare numbers are quarter-rem steps: `4` is `1rem`.
pub fn rem(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    if let Some(value) = unit_only(raw) {
        return Some(value);
    }
    let (number, unit) = split_number_with_unit(raw)?;
    if number == 0.0 {
        return Some("0".to_string());
    }
    match unit {
        Some(unit) => Some(format!("{}{}", round(number), unit)),
        None => Some(format!("{}rem", round(number / 4.0))),
    }
}

pub fn px(raw: &str) -> Option<String> {
    if let Some(value) = unit_only(raw) {
        return Some(value);
    }
    let (number, unit) = split_number_with_unit(raw)?;
    match unit {
        Some(unit) => Some(format!("{}{}", round(number), unit)),
        None => Some(format!("{}px", round(number))),
    }
}

pub fn number(raw: &str) -> Option<String> {
    if !NUMBER_RE.is_match(raw) {
        return None;
    }
    raw.parse::<f64>().ok().map(round)
}

pub fn percent(raw: &str) -> Option<String> {
    let raw = raw.strip_suffix('%').unwrap_or(raw);
    if !NUMBER_RE.is_match(raw) {
        return None;
    }
    raw.parse::<f64>().ok().map(|value| round(value / 100.0))
}

pub fn fraction(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    if raw == "full" {
        return Some("100%".to_string());
    }
    let mut parts = raw.split('/');
    let left = parse_leading_float(parts.next()?)?;
    let right = parse_leading_float(parts.next()?)?;
    let value = left / right;
    if value.is_nan() {
        return None;
    }
    if value == 0.0 {
        return Some("0".to_string());
    }
    Some(format!("{}%", round(value * 100.0)))
}

pub fn global(raw: &str) -> Option<String> {
    GLOBAL_KEYWORDS
        .contains(&raw)
        .then(|| raw.to_string())
}

/// `$name` or `$name,fallback` as a custom property reference.
pub fn cssvar(raw: &str) -> Option<String> {
    if !CSS_VAR_RE.is_match(raw) {
        return None;
    }
    let body = &raw[1..];
    let (name, fallback) = match body.split_once(',') {
        Some((name, fallback)) => (name, Some(fallback)),
        None => (body, None),
    };
    match fallback {
        Some(fallback) if !fallback.is_empty() => {
            Some(format!("var(--{}, {})", escape_selector(name), fallback))
        }
        _ => Some(format!("var(--{})", escape_selector(name))),
    }
}

pub fn bracket(raw: &str) -> Option<String> {
    bracket_with_type(raw, None)
}

pub fn bracket_of_color(raw: &str) -> Option<String> {
    bracket_with_type(raw, Some("color"))
}

pub fn bracket_of_length(raw: &str) -> Option<String> {
    bracket_with_type(raw, Some("length"))
}

/// Returns the type hint of a bracket value (`[length:2px]` is `length`).
pub fn bracket_type_hint(raw: &str) -> Option<&str> {
    BRACKET_TYPE_RE
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map(|hint| hint.as_str())
}

fn bracket_with_type(raw: &str, required: Option<&str>) -> Option<String> {
    if !(raw.starts_with('[') && raw.ends_with(']')) || raw.len() < 2 {
        return None;
    }

    let mut hinted = None;
    let base = match BRACKET_TYPE_RE.find(raw) {
        None => &raw[1..raw.len() - 1],
        Some(prefix) => {
            let hint = bracket_type_hint(raw)?;
            match required {
                None => hinted = Some(hint.to_ascii_lowercase()),
                Some(required) if required.eq_ignore_ascii_case(hint) => {}
                Some(_) => return None,
            }
            raw.get(prefix.end()..raw.len() - 1)?
        }
    };

    if base.is_empty() || base == "=\"\"" {
        return None;
    }

    let base = if base.starts_with("--") {
        format!("var({})", base)
    } else {
        base.to_string()
    };

    let mut depth = 0i32;
    for ch in base.chars() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }

    match hinted.as_deref() {
        Some("string") => Some(underscores_to_spaces(&base)),
        Some("quoted") => {
            let spaced = underscores_to_spaces(&base);
            let quoted = spaced.replace('\\', "\\\\").replace('"', "\\\"");
            Some(format!("\"{}\"", quoted))
        }
        _ => Some(normalize_arbitrary_value(&base)),
    }
}

fn underscores_to_spaces(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'_') => {
                chars.next();
                out.push('_');
            }
            '_' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

/// Turns `_` into spaces (except inside `url()` and when escaped) and spaces
/// out the operators of math functions.
pub(crate) fn normalize_arbitrary_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut idx = 0usize;
    let mut paren_depth = 0usize;
    let mut url_depth: Option<usize> = None;

    while idx < raw.len() {
        if url_depth.is_none() && starts_with_url_function(raw, idx) {
            out.push_str("url(");
            idx += "url(".len();
            paren_depth += 1;
            url_depth = Some(paren_depth);
            continue;
        }

        let Some(ch) = raw[idx..].chars().next() else {
            break;
        };
        let size = ch.len_utf8();

        if ch == '\\' {
            let next_idx = idx + size;
            if let Some(next) = raw[next_idx..].chars().next() {
                if next == '_' && url_depth.is_none() {
                    out.push('_');
                } else {
                    out.push('\\');
                    out.push(next);
                }
                idx = next_idx + next.len_utf8();
                continue;
            }
            out.push('\\');
            idx += size;
            continue;
        }

        match ch {
            '(' => paren_depth += 1,
            ')' => {
                if url_depth == Some(paren_depth) {
                    url_depth = None;
                }
                paren_depth = paren_depth.saturating_sub(1);
            }
            _ => {}
        }

        if ch == '_' && url_depth.is_none() {
            out.push(' ');
        } else {
            out.push(ch);
        }
        idx += size;
    }

    space_math_operators(&out)
}

fn starts_with_url_function(raw: &str, idx: usize) -> bool {
    raw[idx..]
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("url("))
}

const MATH_FUNCTIONS: [&str; 4] = ["calc(", "clamp(", "max(", "min("];

fn space_math_operators(value: &str) -> String {
    let Some(start) = MATH_FUNCTIONS
        .iter()
        .filter_map(|name| value.find(name))
        .min()
    else {
        return value.to_string();
    };

    let mut out = String::with_capacity(value.len() + 8);
    out.push_str(&value[..start]);
    let mut chars = value[start..].chars().peekable();

    while let Some(ch) = chars.next() {
        let binary = matches!(ch, '+' | '-' | '*' | '/')
            && !out.ends_with(char::is_whitespace)
            && ends_with_operand(&out);
        if binary {
            out.push(' ');
            out.push(ch);
            out.push(' ');
            while matches!(chars.peek(), Some(next) if next.is_whitespace()) {
                chars.next();
            }
            continue;
        }
        out.push(ch);
    }

    out
}

// A number with optional unit (`2`, `-1.5rem`, `100%`) or a closing paren.
fn ends_with_operand(out: &str) -> bool {
    if out.ends_with(')') {
        return true;
    }
    let without_unit = match out.strip_suffix('%') {
        Some(rest) => rest,
        None => out.trim_end_matches(|ch: char| ch.is_ascii_lowercase()),
    };
    if !without_unit.ends_with(|ch: char| ch.is_ascii_digit()) {
        return false;
    }
    let before_number = without_unit.trim_end_matches(|ch: char| ch.is_ascii_digit() || ch == '.');
    let before_sign = before_number.strip_suffix('-').unwrap_or(before_number);
    !before_sign.ends_with(|ch: char| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

/// Walks a `[`-opened segment at the start of `raw` and returns the index
/// just past its matching `]`.
pub(crate) fn matching_bracket_end(raw: &str) -> Option<usize> {
    if !raw.starts_with('[') {
        return None;
    }
    let mut depth = 0usize;
    for (idx, ch) in raw.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx + 1);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rem_uses_quarter_steps() {
        assert_eq!(rem("4"), Some("1rem".to_string()));
        assert_eq!(rem("1.5"), Some("0.375rem".to_string()));
        assert_eq!(rem("-2"), Some("-0.5rem".to_string()));
        assert_eq!(rem("0"), Some("0".to_string()));
        assert_eq!(rem("3em"), Some("3em".to_string()));
        assert_eq!(rem("px"), Some("1px".to_string()));
        assert_eq!(rem("red"), None);
        assert_eq!(rem(""), None);
    }

    #[test]
    fn px_defaults_to_pixels() {
        assert_eq!(px("2"), Some("2px".to_string()));
        assert_eq!(px("0.5rem"), Some("0.5rem".to_string()));
        assert_eq!(px("vw"), Some("100vw".to_string()));
        assert_eq!(px("red-500"), None);
    }

    #[test]
    fn number_with_unit_requires_unit() {
        assert_eq!(number_with_unit("2px"), Some("2px".to_string()));
        assert_eq!(number_with_unit("2"), None);
        assert_eq!(number_with_unit("3rpx"), Some("3rpx".to_string()));
    }

    #[test]
    fn percent_and_number() {
        assert_eq!(percent("50"), Some("0.5".to_string()));
        assert_eq!(percent("35%"), Some("0.35".to_string()));
        assert_eq!(percent("x"), None);
        assert_eq!(number("3"), Some("3".to_string()));
        assert_eq!(number("0.25"), Some("0.25".to_string()));
        assert_eq!(number("3px"), None);
        assert_eq!(number(""), None);
    }

    #[test]
    fn fraction_parses_ratios() {
        assert_eq!(fraction("1/2"), Some("50%".to_string()));
        assert_eq!(fraction("1/3"), Some("33.3333333333%".to_string()));
        assert_eq!(fraction("full"), Some("100%".to_string()));
        assert_eq!(fraction("0/4"), Some("0".to_string()));
        assert_eq!(fraction("2"), None);
        assert_eq!(fraction("basis-4"), None);
    }

    #[test]
    fn cssvar_references() {
        assert_eq!(cssvar("$gap"), Some("var(--gap)".to_string()));
        assert_eq!(cssvar("$gap,4px"), Some("var(--gap, 4px)".to_string()));
        assert_eq!(cssvar("gap"), None);
    }

    #[test]
    fn global_keywords_pass_through() {
        assert_eq!(global("inherit"), Some("inherit".to_string()));
        assert_eq!(global("revert-layer"), Some("revert-layer".to_string()));
        assert_eq!(global("solid"), None);
    }

    #[test]
    fn bracket_values() {
        assert_eq!(bracket("[3px]"), Some("3px".to_string()));
        assert_eq!(bracket("[--brand]"), Some("var(--brand)".to_string()));
        assert_eq!(bracket("[1px_solid_red]"), Some("1px solid red".to_string()));
        assert_eq!(bracket("[a\\_b]"), Some("a_b".to_string()));
        assert_eq!(
            bracket("[url(/a_b.png)]"),
            Some("url(/a_b.png)".to_string())
        );
        assert_eq!(bracket("[]"), None);
        assert_eq!(bracket("[a]]"), None);
        assert_eq!(bracket("3px"), None);
    }

    #[test]
    fn bracket_type_hints() {
        assert_eq!(bracket_of_length("[length:2px]"), Some("2px".to_string()));
        assert_eq!(bracket_of_length("[color:red]"), None);
        assert_eq!(bracket_of_color("[color:red]"), Some("red".to_string()));
        assert_eq!(bracket_of_color("[#fff]"), Some("#fff".to_string()));
        assert_eq!(bracket("[string:a_b]"), Some("a b".to_string()));
        assert_eq!(bracket("[quoted:a_b]"), Some("\"a b\"".to_string()));
    }

    #[test]
    fn math_functions_get_spaced_operators() {
        assert_eq!(
            bracket("[calc(100%-10px)]"),
            Some("calc(100% - 10px)".to_string())
        );
        assert_eq!(
            bracket("[calc(var(--a-b)+1rem)]"),
            Some("calc(var(--a-b) + 1rem)".to_string())
        );
        assert_eq!(
            bracket("[calc(1px_+_2px)]"),
            Some("calc(1px + 2px)".to_string())
        );
        assert_eq!(
            bracket("[calc(-1px*2)]"),
            Some("calc(-1px * 2)".to_string())
        );
    }

    #[test]
    fn chained_handlers_take_first_hit() {
        assert_eq!(first("inherit", &[bracket, cssvar, global, px]), Some("inherit".to_string()));
        assert_eq!(first("nope", &[bracket, cssvar, global, px]), None);
    }

    #[test]
    fn rounding_trims_noise() {
        assert_eq!(round(0.1 + 0.2), "0.3");
        assert_eq!(round(-0.0), "0");
        assert_eq!(round(12.0), "12");
    }

    #[test]
    fn bracket_end_is_balanced() {
        assert_eq!(matching_bracket_end("[&[open]]:p-2"), Some(9));
        assert_eq!(matching_bracket_end("[unclosed"), None);
        assert_eq!(matching_bracket_end("p-2"), None);
    }
}
