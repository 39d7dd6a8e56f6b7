//! Expansion tables for abbreviated side and corner tokens.
//!
//! The returned slices are ordered, so every rule that fans a value out over
//! several longhands emits them in the same order on every run. The empty
//! token stands for every side (or corner) at once and maps to the empty
//! suffix, i.e. the unsuffixed shorthand property.

pub const DIRECTION_TOKENS: [&str; 15] = [
    "", "x", "y", "l", "r", "t", "b", "s", "e", "block", "inline", "bs", "be", "is", "ie",
];

pub const CORNER_TOKENS: [&str; 31] = [
    "", "t", "r", "b", "l", "tl", "lt", "tr", "rt", "bl", "lb", "br", "rb", "bs", "be", "s",
    "is", "e", "ie", "ss", "bs-is", "is-bs", "se", "bs-ie", "ie-bs", "es", "be-is", "is-be",
    "ee", "be-ie", "ie-be",
];

/// Side suffixes for a direction token, e.g. `x` is `-left`, `-right`.
pub fn direction_suffixes(token: &str) -> Option<&'static [&'static str]> {
    let suffixes: &'static [&'static str] = match token {
        "" => &[""],
        "l" => &["-left"],
        "r" => &["-right"],
        "t" => &["-top"],
        "b" => &["-bottom"],
        "s" => &["-inline-start"],
        "e" => &["-inline-end"],
        "x" => &["-left", "-right"],
        "y" => &["-top", "-bottom"],
        "block" => &["-block-start", "-block-end"],
        "inline" => &["-inline-start", "-inline-end"],
        "bs" => &["-block-start"],
        "be" => &["-block-end"],
        "is" => &["-inline-start"],
        "ie" => &["-inline-end"],
        _ => return None,
    };
    Some(suffixes)
}

/// Radius suffixes for a corner token. Two-letter physical codes and the
/// compound logical codes name exactly one corner.
pub fn corner_suffixes(token: &str) -> Option<&'static [&'static str]> {
    let suffixes: &'static [&'static str] = match token {
        "" => &[""],
        "t" => &["-top-left", "-top-right"],
        "r" => &["-top-right", "-bottom-right"],
        "b" => &["-bottom-left", "-bottom-right"],
        "l" => &["-top-left", "-bottom-left"],
        "tl" | "lt" => &["-top-left"],
        "tr" | "rt" => &["-top-right"],
        "bl" | "lb" => &["-bottom-left"],
        "br" | "rb" => &["-bottom-right"],
        "bs" => &["-start-start", "-start-end"],
        "be" => &["-end-start", "-end-end"],
        "s" | "is" => &["-end-start", "-start-start"],
        "e" | "ie" => &["-start-end", "-end-end"],
        "ss" | "bs-is" | "is-bs" => &["-start-start"],
        "se" | "bs-ie" | "ie-bs" => &["-start-end"],
        "es" | "be-is" | "is-be" => &["-end-start"],
        "ee" | "be-ie" | "ie-be" => &["-end-end"],
        _ => return None,
    };
    Some(suffixes)
}
