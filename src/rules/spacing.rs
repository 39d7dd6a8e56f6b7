use super::direction_size;
use crate::direction::direction_suffixes;
use crate::rule::{Groups, Rule, RuleContext};

pub fn paddings() -> Vec<Rule> {
    spacing_rules("p", "padding")
}

pub fn margins() -> Vec<Rule> {
    spacing_rules("m", "margin")
}

fn spacing_rules(short: &str, property: &'static str) -> Vec<Rule> {
    let resolve = move |groups: &Groups<'_>, context: &RuleContext<'_>| {
        direction_size(property, groups.at(1), groups.non_empty(2), context.theme)
    };

    vec![
        Rule::pattern(&format!(r"^{short}()-(-?.+)$"), resolve)
            .autocomplete(&["(m|p)<num>", "(m|p)-<num>"]),
        Rule::pattern(&format!(r"^{short}-xy()()$"), resolve).autocomplete(&["(m|p)-(xy)"]),
        Rule::pattern(&format!(r"^{short}([xy])(?:-(-?.+))?$"), resolve),
        Rule::pattern(&format!(r"^{short}([rltbse])(?:-(-?.+))?$"), resolve)
            .autocomplete(&["(m|p)<directions>-<num>"]),
        Rule::pattern(&format!(r"^{short}-(block|inline)(?:-(-?.+))?$"), resolve)
            .autocomplete(&["(m|p)-(block|inline)-<num>"]),
        Rule::pattern(&format!(r"^{short}-([bi][se])(?:-(-?.+))?$"), resolve)
            .autocomplete(&["(m|p)-(bs|be|is|ie)-<num>"]),
        Rule::pattern(&format!(r"^{short}([rltb])-safe(?:-(-?.+))?$"), move |groups, context| {
            safe_area(resolve(groups, context)?, groups.at(1))
        })
        .autocomplete(&["(m|p)<directions>-safe-<num>"]),
    ]
}

// Offsets each resolved value by the device safe-area inset of that side.
fn safe_area(entries: crate::rule::CssEntries, direction: &str) -> Option<crate::rule::CssEntries> {
    let inset = direction_suffixes(direction)?.first()?;
    Some(
        entries
            .into_iter()
            .map(|(property, value)| {
                (
                    property,
                    format!("calc(env(safe-area-inset{}) + {})", inset, value),
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{entries, resolve, resolve_with};
    use crate::theme::Theme;
    use pretty_assertions::assert_eq;

    #[test]
    fn padding_reads_spacing_scale() {
        let mut theme = Theme::default();
        theme.spacing.insert("4".to_string(), "1.25rem".to_string());
        assert_eq!(resolve_with("p-4", &theme), entries(&[("padding", "1.25rem")]));
    }

    #[test]
    fn padding_falls_back_to_quarter_rem() {
        assert_eq!(resolve("p-4"), entries(&[("padding", "1rem")]));
        assert_eq!(
            resolve("px-2"),
            entries(&[("padding-left", "0.5rem"), ("padding-right", "0.5rem")])
        );
        assert_eq!(resolve("pt"), entries(&[("padding-top", "1rem")]));
        assert_eq!(resolve("p-xy"), entries(&[("padding", "1rem")]));
    }

    #[test]
    fn logical_and_arbitrary_sides() {
        assert_eq!(
            resolve("p-block-[3px]"),
            entries(&[("padding-block-start", "3px"), ("padding-block-end", "3px")])
        );
        assert_eq!(resolve("m-is-1/2"), entries(&[("margin-inline-start", "50%")]));
        assert_eq!(resolve("ms-auto"), entries(&[("margin-inline-start", "auto")]));
    }

    #[test]
    fn negative_values_pass_through() {
        assert_eq!(resolve("m--2"), entries(&[("margin", "-0.5rem")]));
        assert_eq!(resolve("p--2"), entries(&[("padding", "-0.5rem")]));
    }

    #[test]
    fn safe_area_wraps_values() {
        assert_eq!(
            resolve("pb-safe"),
            entries(&[("padding-bottom", "calc(env(safe-area-inset-bottom) + 1rem)")])
        );
        assert_eq!(
            resolve("mt-safe-2"),
            entries(&[("margin-top", "calc(env(safe-area-inset-top) + 0.5rem)")])
        );
        assert_eq!(resolve("px-safe"), None);
    }

    #[test]
    fn unknown_values_do_not_match() {
        assert_eq!(resolve("p-wide"), None);
        assert_eq!(resolve("pq-2"), None);
    }
}
