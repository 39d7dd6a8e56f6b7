use crate::rule::{declaration, Rule};
use crate::values::{auto, cssvar, first, fraction, number, rem};

pub fn flex() -> Vec<Rule> {
    vec![
        // display
        Rule::fixed("flex", &[("display", "flex")]),
        Rule::fixed("inline-flex", &[("display", "inline-flex")]),
        Rule::fixed("flex-inline", &[("display", "inline-flex")]),
        // flex
        Rule::pattern(r"^flex-(.*)$", |groups, _| {
            declaration("flex", first(groups.at(1), &[cssvar, fraction]))
        }),
        Rule::fixed("flex-1", &[("flex", "1 1 0%")]),
        Rule::fixed("flex-auto", &[("flex", "1 1 auto")]),
        Rule::fixed("flex-initial", &[("flex", "0 1 auto")]),
        Rule::fixed("flex-none", &[("flex", "none")]),
        // shrink/grow/basis
        Rule::pattern(r"^(?:flex-)?shrink(?:-(.*))?$", |groups, _| {
            let value = first(groups.at(1), &[cssvar, number]).unwrap_or_else(|| "1".to_string());
            declaration("flex-shrink", Some(value))
        })
        .autocomplete(&["flex-shrink-<num>", "shrink-<num>"]),
        Rule::pattern(r"^(?:flex-)?grow(?:-(.*))?$", |groups, _| {
            let value = first(groups.at(1), &[cssvar, number]).unwrap_or_else(|| "1".to_string());
            declaration("flex-grow", Some(value))
        })
        .autocomplete(&["flex-grow-<num>", "grow-<num>"]),
        Rule::pattern(r"^(?:flex-)?basis-(.+)$", |groups, context| {
            let size = groups.at(1);
            let value = context
                .theme
                .spacing
                .get(size)
                .cloned()
                .or_else(|| first(size, &[cssvar, auto, fraction, rem]));
            declaration("flex-basis", value)
        })
        .autocomplete(&["flex-basis-$spacing", "basis-$spacing"]),
        // directions
        Rule::fixed("flex-row", &[("flex-direction", "row")]),
        Rule::fixed("flex-row-reverse", &[("flex-direction", "row-reverse")]),
        Rule::fixed("flex-col", &[("flex-direction", "column")]),
        Rule::fixed("flex-col-reverse", &[("flex-direction", "column-reverse")]),
        // wraps
        Rule::fixed("flex-wrap", &[("flex-wrap", "wrap")]),
        Rule::fixed("flex-wrap-reverse", &[("flex-wrap", "wrap-reverse")]),
        Rule::fixed("flex-nowrap", &[("flex-wrap", "nowrap")]),
    ]
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{entries, resolve};
    use pretty_assertions::assert_eq;

    #[test]
    fn display_and_presets() {
        assert_eq!(resolve("flex"), entries(&[("display", "flex")]));
        assert_eq!(resolve("flex-inline"), entries(&[("display", "inline-flex")]));
        assert_eq!(resolve("flex-1"), entries(&[("flex", "1 1 0%")]));
        assert_eq!(resolve("flex-none"), entries(&[("flex", "none")]));
        assert_eq!(resolve("flex-col-reverse"), entries(&[("flex-direction", "column-reverse")]));
        assert_eq!(resolve("flex-nowrap"), entries(&[("flex-wrap", "nowrap")]));
    }

    #[test]
    fn flex_values() {
        assert_eq!(resolve("flex-1/3"), entries(&[("flex", "33.3333333333%")]));
        assert_eq!(resolve("flex-$grow"), entries(&[("flex", "var(--grow)")]));
        assert_eq!(resolve("flex-sideways"), None);
    }

    #[test]
    fn shrink_and_grow_default_to_one() {
        assert_eq!(resolve("shrink"), entries(&[("flex-shrink", "1")]));
        assert_eq!(resolve("flex-shrink-0"), entries(&[("flex-shrink", "0")]));
        assert_eq!(resolve("grow"), entries(&[("flex-grow", "1")]));
        assert_eq!(resolve("flex-grow-2"), entries(&[("flex-grow", "2")]));
    }

    #[test]
    fn basis_reads_spacing_then_values() {
        assert_eq!(resolve("basis-1/2"), entries(&[("flex-basis", "50%")]));
        assert_eq!(resolve("flex-basis-4"), entries(&[("flex-basis", "1rem")]));
        assert_eq!(resolve("basis-auto"), entries(&[("flex-basis", "auto")]));
        assert_eq!(resolve("basis-xl"), entries(&[("flex-basis", "1.25rem")]));
    }
}
