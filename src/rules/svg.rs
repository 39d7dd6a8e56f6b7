use crate::color::resolve_color;
use crate::rule::{declaration, Rule};
use crate::values::{cssvar, first, fraction, number, number_with_unit, percent, px};

pub fn svg_utilities() -> Vec<Rule> {
    vec![
        // fills
        Rule::pattern(r"^fill-(.+)$", |groups, context| {
            resolve_color(groups.at(1), context.theme, "fill", "fill")
        })
        .autocomplete(&["fill-$colors"]),
        Rule::pattern(r"^fill-op-?(.+)$", |groups, _| {
            declaration("--un-fill-opacity", first(groups.at(1), &[percent, cssvar]))
        })
        .autocomplete(&["fill-op-<percent>"]),
        Rule::fixed("fill-none", &[("fill", "none")]),
        // stroke size
        Rule::pattern(r"^stroke-(?:width-|size-)?(.+)$", |groups, context| {
            let size = groups.at(1);
            let value = context
                .theme
                .line_width
                .get(size)
                .cloned()
                .or_else(|| first(size, &[cssvar, fraction, px, number]));
            declaration("stroke-width", value)
        })
        .autocomplete(&["stroke-width-$lineWidth", "stroke-size-$lineWidth"]),
        // stroke dash
        Rule::pattern(r"^stroke-dash-(.+)$", |groups, _| {
            declaration("stroke-dasharray", first(groups.at(1), &[cssvar, number]))
        })
        .autocomplete(&["stroke-dash-<num>"]),
        Rule::pattern(r"^stroke-offset-(.+)$", |groups, context| {
            let offset = groups.at(1);
            let value = context
                .theme
                .line_width
                .get(offset)
                .cloned()
                .or_else(|| first(offset, &[cssvar, px, number_with_unit]));
            declaration("stroke-dashoffset", value)
        })
        .autocomplete(&["stroke-offset-$lineWidth"]),
        // stroke colors
        Rule::pattern(r"^stroke-(.+)$", |groups, context| {
            resolve_color(groups.at(1), context.theme, "stroke", "stroke")
        })
        .autocomplete(&["stroke-$colors"]),
        Rule::pattern(r"^stroke-op-?(.+)$", |groups, _| {
            declaration("--un-stroke-opacity", first(groups.at(1), &[percent, cssvar]))
        })
        .autocomplete(&["stroke-op-<percent>"]),
        // line cap
        Rule::fixed("stroke-cap-square", &[("stroke-linecap", "square")]),
        Rule::fixed("stroke-cap-round", &[("stroke-linecap", "round")]),
        Rule::fixed("stroke-cap-auto", &[("stroke-linecap", "butt")]),
        // line join
        Rule::fixed("stroke-join-arcs", &[("stroke-linejoin", "arcs")]),
        Rule::fixed("stroke-join-bevel", &[("stroke-linejoin", "bevel")]),
        Rule::fixed("stroke-join-clip", &[("stroke-linejoin", "miter-clip")]),
        Rule::fixed("stroke-join-round", &[("stroke-linejoin", "round")]),
        Rule::fixed("stroke-join-auto", &[("stroke-linejoin", "miter")]),
        Rule::fixed("stroke-none", &[("stroke", "none")]),
    ]
}
