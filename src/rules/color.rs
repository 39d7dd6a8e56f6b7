use crate::color::{is_size, resolve_color};
use crate::rule::{declaration, Rule};
use crate::values::{cssvar, first, percent, GLOBAL_KEYWORDS};

/// `op-50`, `op10`
pub fn opacity() -> Vec<Rule> {
    vec![Rule::pattern(r"^op-?(.+)$", |groups, _| {
        declaration("opacity", first(groups.at(1), &[percent, cssvar]))
    })]
}

/// `c-red`, `c-red5`, `c-red-300/50`
pub fn text_colors() -> Vec<Rule> {
    vec![
        Rule::pattern(r"^c-(.+)$", |groups, context| {
            resolve_color(groups.at(1), context.theme, "color", "text")
        })
        .autocomplete(&["c-$colors"]),
        // A global keyword that is not a palette name.
        Rule::pattern(r"^c-(.+)$", |groups, _| {
            let value = groups.at(1);
            GLOBAL_KEYWORDS
                .contains(&value)
                .then(|| vec![("color".to_string(), value.to_string())])
        })
        .autocomplete(&["c-(inherit|initial|revert|revert-layer|unset)"]),
        Rule::pattern(r"^c-op-?(.+)$", |groups, _| {
            declaration("--un-text-opacity", first(groups.at(1), &[percent, cssvar]))
        })
        .autocomplete(&["c-op-<percent>"]),
    ]
}

pub fn bg_colors() -> Vec<Rule> {
    vec![
        Rule::pattern(r"^bg-(.+)$", |groups, context| {
            let body = groups.at(1);
            if is_size(body) {
                return None;
            }
            resolve_color(body, context.theme, "background-color", "bg")
        })
        .autocomplete(&["bg-$colors"]),
        Rule::pattern(r"^bg-op-?(.+)$", |groups, _| {
            declaration("--un-bg-opacity", first(groups.at(1), &[percent, cssvar]))
        })
        .autocomplete(&["bg-op-<percent>"]),
    ]
}

pub fn color_scheme() -> Vec<Rule> {
    vec![Rule::pattern(r"^color-scheme-(\w+)$", |groups, _| {
        declaration("color-scheme", Some(groups.at(1).to_string()))
    })]
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{entries, resolve};
    use pretty_assertions::assert_eq;

    #[test]
    fn text_color_with_opacity_variable() {
        assert_eq!(
            resolve("c-red-500"),
            entries(&[
                ("--un-text-opacity", "1"),
                ("color", "rgb(239 68 68 / var(--un-text-opacity))"),
            ])
        );
        assert_eq!(resolve("c-red5/20"), entries(&[("color", "rgb(239 68 68 / 0.2)")]));
        assert_eq!(resolve("c-inherit"), entries(&[("color", "inherit")]));
        assert_eq!(resolve("c-initial"), entries(&[("color", "initial")]));
        assert_eq!(resolve("c-op-35"), entries(&[("--un-text-opacity", "0.35")]));
    }

    #[test]
    fn background_rejects_sizes() {
        assert_eq!(resolve("bg-[#ff0000]/[var(--a)]"), entries(&[("background-color", "rgb(255 0 0 / var(--a))")]));
        assert_eq!(resolve("bg-[2px]"), None);
        assert_eq!(resolve("bg-op-10"), entries(&[("--un-bg-opacity", "0.1")]));
    }

    #[test]
    fn opacity_and_scheme() {
        assert_eq!(resolve("op-50"), entries(&[("opacity", "0.5")]));
        assert_eq!(resolve("op10"), entries(&[("opacity", "0.1")]));
        assert_eq!(resolve("op-$fade"), entries(&[("opacity", "var(--fade)")]));
        assert_eq!(resolve("color-scheme-dark"), entries(&[("color-scheme", "dark")]));
    }
}
