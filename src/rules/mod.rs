//! Utility rule tables, in dispatch order.

pub mod border;
pub mod color;
pub mod flex;
pub mod ring;
pub mod spacing;
pub mod svg;
pub mod typography;

use crate::direction::direction_suffixes;
use crate::rule::{CssEntries, Rule};
use crate::theme::Theme;
use crate::values::{auto, bracket, cssvar, first, fraction, global, rem};

/// Every rule of the preset. Families are tried in this order and each
/// family keeps its own declared order.
pub fn rules() -> Vec<Rule> {
    [
        spacing::paddings(),
        spacing::margins(),
        border::borders(),
        color::opacity(),
        color::bg_colors(),
        color::color_scheme(),
        svg::svg_utilities(),
        flex::flex(),
        ring::rings(),
        typography::fonts(),
        typography::tab_sizes(),
        typography::text_indents(),
        typography::text_strokes(),
        typography::text_shadows(),
        color::text_colors(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Spacing value for `property` fanned out over the sides of `direction`.
pub fn direction_size(
    property: &str,
    direction: &str,
    size: Option<&str>,
    theme: &Theme,
) -> Option<CssEntries> {
    let suffixes = direction_suffixes(direction)?;
    let value = theme
        .spacing
        .get(size.unwrap_or("DEFAULT"))
        .cloned()
        .or_else(|| first(size?, &[bracket, cssvar, global, auto, fraction, rem]))?;
    Some(
        suffixes
            .iter()
            .map(|suffix| (format!("{}{}", property, suffix), value.clone()))
            .collect(),
    )
}

/// Substitutes each side grammar into `template` at `{dir}`. The all-sides
/// form is an empty capture group; the others are joined with a dash on the
/// side `leading` selects.
pub(crate) fn direction_patterns(template: &str, sides: &[&str], leading: bool) -> Vec<String> {
    sides
        .iter()
        .map(|side| {
            let group = match (side.is_empty(), leading) {
                (true, _) => "()".to_string(),
                (false, true) => format!("-({})", side),
                (false, false) => format!("({})-", side),
            };
            template.replace("{dir}", &group)
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn direction_size_prefers_theme_spacing() {
        let mut theme = Theme::default();
        theme.spacing.insert("4".to_string(), "2rem".to_string());
        assert_eq!(
            direction_size("padding", "x", Some("4"), &theme),
            Some(crate::rule::entries(&[
                ("padding-left", "2rem"),
                ("padding-right", "2rem"),
            ]))
        );
        assert_eq!(
            direction_size("margin", "t", None, &theme),
            Some(crate::rule::entries(&[("margin-top", "1rem")]))
        );
    }

    #[test]
    fn direction_size_rejects_unknown_sides() {
        let theme = Theme::default();
        assert_eq!(direction_size("padding", "q", Some("4"), &theme), None);
        assert_eq!(direction_size("padding", "", Some("wide"), &theme), None);
    }

    #[test]
    fn rule_table_carries_autocomplete_hints() {
        let set = crate::rule::RuleSet::new(rules());
        let hints: Vec<&str> = set.autocomplete().collect();
        assert!(hints.contains(&"c-$colors"));
    }

    #[test]
    fn templates_expand_side_grammars() {
        assert_eq!(
            direction_patterns("^b{dir}(?:-(.+))?$", &["", "[xy]"], true),
            vec!["^b()(?:-(.+))?$".to_string(), "^b-([xy])(?:-(.+))?$".to_string()]
        );
        assert_eq!(
            direction_patterns("^b-{dir}op-?(.+)$", &["", "[xy]"], false),
            vec!["^b-()op-?(.+)$".to_string(), "^b-([xy])-op-?(.+)$".to_string()]
        );
    }
}
