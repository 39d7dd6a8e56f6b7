//! Variant prefixes (`hover:`, `dark:`, `!`, `[&>*]:`, …).
//!
//! A variant recognises a leading (or, for `!`, trailing) piece of a token,
//! returns the remaining token and a [`VariantHandler`] describing how the
//! generated rule changes: a selector transform, a wrapping at-rule, an
//! internal layer, or a rewrite of the declarations themselves.

use crate::config::{DarkMode, DarkStrategy, PresetOptions};
use crate::rule::{CssEntries, RuleContext};
use crate::values::{bracket, matching_bracket_end};
use regex::Regex;
use std::sync::LazyLock;

static NEGATABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d|-px|-full").expect("negatable pattern compiles"));

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9.]+(?:[a-z]+|%)?").expect("number pattern compiles"));

static NEGATE_IGNORED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"opacity|color|flex").expect("ignored property pattern compiles"));

const PSEUDO_CLASSES: [(&str, &str); 36] = [
    ("active", "active"),
    ("checked", "checked"),
    ("default", "default"),
    ("disabled", "disabled"),
    ("empty", "empty"),
    ("enabled", "enabled"),
    ("first-of-type", "first-of-type"),
    ("first", "first-child"),
    ("focus-visible", "focus-visible"),
    ("focus-within", "focus-within"),
    ("focus", "focus"),
    ("hover", "hover"),
    ("in-range", "in-range"),
    ("indeterminate", "indeterminate"),
    ("invalid", "invalid"),
    ("last-of-type", "last-of-type"),
    ("last", "last-child"),
    ("link", "link"),
    ("only-child", "only-child"),
    ("only-of-type", "only-of-type"),
    ("only", "only-child"),
    ("optional", "optional"),
    ("out-of-range", "out-of-range"),
    ("placeholder-shown", "placeholder-shown"),
    ("read-only", "read-only"),
    ("read-write", "read-write"),
    ("required", "required"),
    ("root", "root"),
    ("target", "target"),
    ("valid", "valid"),
    ("visited", "visited"),
    ("even-of-type", "nth-of-type(even)"),
    ("even", "nth-child(even)"),
    ("odd-of-type", "nth-of-type(odd)"),
    ("odd", "nth-child(odd)"),
    ("any-link", "any-link"),
];

const PSEUDO_ELEMENTS: [(&str, &str); 9] = [
    ("placeholder", "::placeholder"),
    ("before", "::before"),
    ("after", "::after"),
    ("first-letter", "::first-letter"),
    ("first-line", "::first-line"),
    ("selection", "::selection"),
    ("marker", "::marker"),
    ("file", "::file-selector-button"),
    ("backdrop", "::backdrop"),
];

const PSEUDO_FUNCTIONS: [&str; 4] = ["not", "is", "where", "has"];

/// How a matched variant rewrites the CSS selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorTransform {
    Replace(String),
    Prefix(String),
    Suffix(String),
    /// `&` stands for the incoming selector.
    Template(String),
}

impl SelectorTransform {
    pub fn apply(&self, selector: &str) -> String {
        match self {
            Self::Replace(replacement) => replacement.clone(),
            Self::Prefix(prefix) => format!("{}{}", prefix, selector),
            Self::Suffix(suffix) => format!("{}{}", selector, suffix),
            Self::Template(template) => template.replace('&', selector),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyTransform {
    Negative,
    Important,
}

impl BodyTransform {
    /// Rewrites declarations; `None` means the variant does not apply to
    /// this body.
    pub fn apply(self, entries: CssEntries) -> Option<CssEntries> {
        match self {
            Self::Negative => negate(entries),
            Self::Important => Some(
                entries
                    .into_iter()
                    .map(|(property, value)| {
                        if value.is_empty() || value.ends_with("!important") {
                            (property, value)
                        } else {
                            (property, format!("{} !important", value))
                        }
                    })
                    .collect(),
            ),
        }
    }
}

fn negate(entries: CssEntries) -> Option<CssEntries> {
    let mut changed = false;
    let negated = entries
        .into_iter()
        .map(|(property, value)| {
            if value.is_empty() || value == "0" || NEGATE_IGNORED_RE.is_match(&property) {
                return (property, value);
            }
            if crate::color::is_css_math_fn(&value) {
                changed = true;
                return (property, format!("calc({} * -1)", value));
            }
            if NUMBER_RE.is_match(&value) {
                changed = true;
                let value = NUMBER_RE.replacen(&value, 1, "-$0").into_owned();
                return (property, value);
            }
            (property, value)
        })
        .collect();
    changed.then_some(negated)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantHandler {
    pub selector: Option<SelectorTransform>,
    /// At-rule wrapping the generated rule.
    pub parent: Option<String>,
    /// Internal output layer.
    pub layer: Option<String>,
    pub body: Option<BodyTransform>,
}

impl VariantHandler {
    fn selector(transform: SelectorTransform) -> Self {
        Self {
            selector: Some(transform),
            ..Self::default()
        }
    }

    fn parent(parent: String) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    fn body(body: BodyTransform) -> Self {
        Self {
            body: Some(body),
            ..Self::default()
        }
    }
}

pub type VariantFn =
    for<'t> fn(&'t str, &RuleContext<'_>) -> Option<(&'t str, VariantHandler)>;

pub struct Variant {
    pub name: &'static str,
    /// May match again after itself on the same token.
    pub multi_pass: bool,
    matcher: VariantFn,
}

impl Variant {
    fn new(name: &'static str, matcher: VariantFn) -> Self {
        Self {
            name,
            multi_pass: false,
            matcher,
        }
    }

    fn multi_pass(mut self) -> Self {
        self.multi_pass = true;
        self
    }

    pub fn try_match<'t>(
        &self,
        token: &'t str,
        context: &RuleContext<'_>,
    ) -> Option<(&'t str, VariantHandler)> {
        (self.matcher)(token, context).filter(|(rest, _)| !rest.is_empty())
    }
}

/// Ordered variant list for `options`.
pub fn variants(options: &PresetOptions) -> Vec<Variant> {
    let mut variants = vec![
        Variant::new("css-layer", variant_css_layer),
        Variant::new("selector", variant_selector),
        Variant::new("layer", variant_internal_layer),
        Variant::new("negative", variant_negative),
        Variant::new("important", variant_important),
        Variant::new("supports", variant_supports).multi_pass(),
        Variant::new("combinator", variant_combinators),
        Variant::new("pseudo", variant_pseudo_classes_and_elements).multi_pass(),
        Variant::new("pseudo-function", variant_pseudo_class_functions).multi_pass(),
    ];
    variants.push(if options.attributify_pseudo {
        Variant::new("tagged-pseudo", variant_tagged_pseudo_attributes)
    } else {
        Variant::new("tagged-pseudo", variant_tagged_pseudo_classes)
    });
    variants.push(Variant::new("part", variant_part_classes));
    variants.push(match options.dark {
        DarkMode::Strategy(DarkStrategy::Media) => Variant::new("dark", variant_color_scheme_media),
        DarkMode::Strategy(DarkStrategy::Class) | DarkMode::Selectors(_) => {
            Variant::new("dark", variant_color_scheme_class)
        }
    });
    variants.push(Variant::new("media-dark", variant_color_scheme_forced_media));
    variants.extend([
        Variant::new("direction", variant_language_directions),
        Variant::new("scope", variant_scope),
        Variant::new("container", variant_container_query),
        Variant::new("arbitrary", variant_arbitrary),
    ]);
    variants
}

/// Splits `prefix<param>:<rest>`, where `param` may be a bracketed value
/// containing `:`.
fn parameter<'t>(prefix: &str, token: &'t str) -> Option<(&'t str, &'t str)> {
    let body = token.strip_prefix(prefix)?;
    let end = if body.starts_with('[') {
        matching_bracket_end(body)?
    } else {
        body.find(':')?
    };
    let rest = body[end..].strip_prefix(':')?;
    if end == 0 {
        return None;
    }
    Some((&body[..end], rest))
}

fn variant_css_layer<'t>(token: &'t str, _: &RuleContext<'_>) -> Option<(&'t str, VariantHandler)> {
    let (name, rest) = parameter("layer-", token)?;
    let name = bracket(name).unwrap_or_else(|| name.to_string());
    Some((rest, VariantHandler::parent(format!("@layer {}", name))))
}

fn variant_selector<'t>(token: &'t str, _: &RuleContext<'_>) -> Option<(&'t str, VariantHandler)> {
    let (raw, rest) = parameter("selector-", token)?;
    let selector = bracket(raw)?;
    Some((rest, VariantHandler::selector(SelectorTransform::Replace(selector))))
}

fn variant_internal_layer<'t>(token: &'t str, _: &RuleContext<'_>) -> Option<(&'t str, VariantHandler)> {
    let (raw, rest) = parameter("uno-layer-", token)?;
    let layer = bracket(raw).unwrap_or_else(|| raw.to_string());
    Some((
        rest,
        VariantHandler {
            layer: Some(layer),
            ..VariantHandler::default()
        },
    ))
}

fn variant_negative<'t>(token: &'t str, _: &RuleContext<'_>) -> Option<(&'t str, VariantHandler)> {
    let rest = token.strip_prefix('-')?;
    if !NEGATABLE_RE.is_match(token) {
        return None;
    }
    Some((rest, VariantHandler::body(BodyTransform::Negative)))
}

fn variant_important<'t>(token: &'t str, _: &RuleContext<'_>) -> Option<(&'t str, VariantHandler)> {
    let rest = token
        .strip_prefix("important:")
        .or_else(|| token.strip_prefix('!'))
        .or_else(|| token.strip_suffix('!'))?;
    Some((rest, VariantHandler::body(BodyTransform::Important)))
}

fn variant_supports<'t>(token: &'t str, _: &RuleContext<'_>) -> Option<(&'t str, VariantHandler)> {
    let (raw, rest) = parameter("supports-", token)?;
    let condition = match bracket(raw) {
        Some(condition) => condition,
        None => format!("{}: var(--un)", raw),
    };
    let condition = if condition.starts_with('(') && condition.ends_with(')') {
        condition
    } else {
        format!("({})", condition)
    };
    Some((rest, VariantHandler::parent(format!("@supports {}", condition))))
}

fn variant_combinators<'t>(token: &'t str, _: &RuleContext<'_>) -> Option<(&'t str, VariantHandler)> {
    const COMBINATORS: [(&str, &str); 5] = [
        ("all:", " *"),
        ("children:", ">*"),
        ("next:", "+*"),
        ("sibling:", "+*"),
        ("siblings:", "~*"),
    ];
    COMBINATORS.iter().find_map(|(prefix, combinator)| {
        let rest = token.strip_prefix(prefix)?;
        Some((
            rest,
            VariantHandler::selector(SelectorTransform::Suffix(combinator.to_string())),
        ))
    })
}

/// `:hover`, `:first-child`, `::before` for a pseudo name.
fn pseudo_selector(name: &str) -> Option<String> {
    if let Some((_, element)) = PSEUDO_ELEMENTS.iter().find(|(key, _)| *key == name) {
        return Some(element.to_string());
    }
    PSEUDO_CLASSES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, class)| format!(":{}", class))
}

fn variant_pseudo_classes_and_elements<'t>(
    token: &'t str,
    _: &RuleContext<'_>,
) -> Option<(&'t str, VariantHandler)> {
    let (name, rest) = token.split_once(':')?;
    let pseudo = pseudo_selector(name)?;
    Some((rest, VariantHandler::selector(SelectorTransform::Suffix(pseudo))))
}

fn variant_pseudo_class_functions<'t>(
    token: &'t str,
    _: &RuleContext<'_>,
) -> Option<(&'t str, VariantHandler)> {
    let (head, rest) = token.split_once(':')?;
    let (function, name) = head.split_once('-')?;
    if !PSEUDO_FUNCTIONS.contains(&function) {
        return None;
    }
    let pseudo = pseudo_selector(name).filter(|pseudo| !pseudo.starts_with("::"))?;
    Some((
        rest,
        VariantHandler::selector(SelectorTransform::Suffix(format!(":{}({})", function, pseudo))),
    ))
}

const TAGS: [(&str, &str); 4] = [("group", " "), ("peer", "~"), ("parent", ">"), ("previous", "+")];

fn tagged_pseudo<'t>(token: &'t str, attribute: bool) -> Option<(&'t str, VariantHandler)> {
    let (head, rest) = token.split_once(':')?;
    let (tag, name) = head.split_once('-')?;
    let (_, combinator) = TAGS.iter().find(|(candidate, _)| *candidate == tag)?;
    let pseudo = pseudo_selector(name).filter(|pseudo| !pseudo.starts_with("::"))?;
    let subject = if attribute {
        format!("[{}=\"\"]", tag)
    } else {
        format!(".{}", tag)
    };
    Some((
        rest,
        VariantHandler::selector(SelectorTransform::Prefix(format!(
            "{}{}{}",
            subject, pseudo, combinator
        ))),
    ))
}

fn variant_tagged_pseudo_classes<'t>(
    token: &'t str,
    _: &RuleContext<'_>,
) -> Option<(&'t str, VariantHandler)> {
    tagged_pseudo(token, false)
}

fn variant_tagged_pseudo_attributes<'t>(
    token: &'t str,
    _: &RuleContext<'_>,
) -> Option<(&'t str, VariantHandler)> {
    tagged_pseudo(token, true)
}

fn variant_part_classes<'t>(token: &'t str, _: &RuleContext<'_>) -> Option<(&'t str, VariantHandler)> {
    let (raw, rest) = parameter("part-", token)?;
    let part = bracket(raw)?;
    Some((
        rest,
        VariantHandler::selector(SelectorTransform::Suffix(format!("::part({})", part))),
    ))
}

fn scheme_media(scheme: &str) -> String {
    format!("@media (prefers-color-scheme: {})", scheme)
}

fn variant_color_scheme_class<'t>(
    token: &'t str,
    context: &RuleContext<'_>,
) -> Option<(&'t str, VariantHandler)> {
    let (scheme, rest) = token.split_once(':')?;
    let selector = match (&context.options.dark, scheme) {
        (DarkMode::Selectors(selectors), "dark") => selectors.dark.clone(),
        (DarkMode::Selectors(selectors), "light") => selectors.light.clone(),
        (_, "dark") => ".dark".to_string(),
        (_, "light") => ".light".to_string(),
        _ => return None,
    };
    Some((
        rest,
        VariantHandler::selector(SelectorTransform::Prefix(format!("{} ", selector))),
    ))
}

fn variant_color_scheme_media<'t>(
    token: &'t str,
    _: &RuleContext<'_>,
) -> Option<(&'t str, VariantHandler)> {
    let (scheme, rest) = token.split_once(':')?;
    matches!(scheme, "dark" | "light").then(|| (rest, VariantHandler::parent(scheme_media(scheme))))
}

// `@dark:` and `@light:` use the media query whatever the strategy.
fn variant_color_scheme_forced_media<'t>(
    token: &'t str,
    context: &RuleContext<'_>,
) -> Option<(&'t str, VariantHandler)> {
    variant_color_scheme_media(token.strip_prefix('@')?, context)
}

fn variant_language_directions<'t>(
    token: &'t str,
    _: &RuleContext<'_>,
) -> Option<(&'t str, VariantHandler)> {
    let (direction, rest) = token.split_once(':')?;
    if !matches!(direction, "rtl" | "ltr") {
        return None;
    }
    Some((
        rest,
        VariantHandler::selector(SelectorTransform::Prefix(format!("[dir=\"{}\"] ", direction))),
    ))
}

fn variant_scope<'t>(token: &'t str, _: &RuleContext<'_>) -> Option<(&'t str, VariantHandler)> {
    let (raw, rest) = parameter("scope-", token)?;
    let scope = bracket(raw)?;
    Some((
        rest,
        VariantHandler::selector(SelectorTransform::Prefix(format!("{} ", scope))),
    ))
}

fn variant_container_query<'t>(
    token: &'t str,
    context: &RuleContext<'_>,
) -> Option<(&'t str, VariantHandler)> {
    let (raw, rest) = parameter("@", token)?;
    let width = match bracket(raw) {
        Some(width) => width,
        None => context.theme.container.get(raw)?.clone(),
    };
    Some((
        rest,
        VariantHandler::parent(format!("@container (min-width: {})", width)),
    ))
}

fn variant_arbitrary<'t>(token: &'t str, _: &RuleContext<'_>) -> Option<(&'t str, VariantHandler)> {
    let end = matching_bracket_end(token)?;
    let rest = token[end..].strip_prefix(':')?;
    let variant = bracket(&token[..end])?;
    let handler = if variant.starts_with('@') {
        VariantHandler::parent(variant)
    } else if variant.contains('&') {
        VariantHandler::selector(SelectorTransform::Template(variant))
    } else {
        VariantHandler::selector(SelectorTransform::Suffix(variant))
    };
    Some((rest, handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DarkSelectors;
    use crate::theme::Theme;
    use pretty_assertions::assert_eq;

    fn first_match<'t>(token: &'t str, options: &PresetOptions) -> Option<(&'static str, &'t str, VariantHandler)> {
        let theme = Theme::default();
        let context = RuleContext {
            theme: &theme,
            options,
        };
        variants(options).iter().find_map(|variant| {
            variant
                .try_match(token, &context)
                .map(|(rest, handler)| (variant.name, rest, handler))
        })
    }

    fn suffix(value: &str) -> Option<SelectorTransform> {
        Some(SelectorTransform::Suffix(value.to_string()))
    }

    #[test]
    fn pseudo_classes_and_elements() {
        let options = PresetOptions::default();
        let (name, rest, handler) = first_match("hover:c-red", &options).expect("hover matches");
        assert_eq!((name, rest), ("pseudo", "c-red"));
        assert_eq!(handler.selector, suffix(":hover"));

        let (_, _, handler) = first_match("first:p-2", &options).expect("first matches");
        assert_eq!(handler.selector, suffix(":first-child"));

        let (_, _, handler) = first_match("before:p-2", &options).expect("before matches");
        assert_eq!(handler.selector, suffix("::before"));

        let (_, _, handler) = first_match("not-first:p-2", &options).expect("not- matches");
        assert_eq!(handler.selector, suffix(":not(:first-child)"));

        assert!(first_match("wobble:p-2", &options).is_none());
        assert!(first_match("p-2", &options).is_none());
    }

    #[test]
    fn tagged_pseudo_respects_attributify() {
        let options = PresetOptions::default();
        let (_, _, handler) = first_match("group-hover:c-red", &options).expect("group matches");
        assert_eq!(
            handler.selector,
            Some(SelectorTransform::Prefix(".group:hover ".to_string()))
        );

        let options = PresetOptions {
            attributify_pseudo: true,
            ..PresetOptions::default()
        };
        let (_, _, handler) = first_match("peer-focus:c-red", &options).expect("peer matches");
        assert_eq!(
            handler.selector,
            Some(SelectorTransform::Prefix("[peer=\"\"]:focus~".to_string()))
        );
    }

    #[test]
    fn dark_mode_strategies() {
        let options = PresetOptions::default();
        let (_, _, handler) = first_match("dark:c-red", &options).expect("dark matches");
        assert_eq!(handler.selector, Some(SelectorTransform::Prefix(".dark ".to_string())));

        let options = PresetOptions {
            dark: DarkMode::Strategy(DarkStrategy::Media),
            ..PresetOptions::default()
        };
        let (_, _, handler) = first_match("light:c-red", &options).expect("light matches");
        assert_eq!(handler.parent.as_deref(), Some("@media (prefers-color-scheme: light)"));

        let options = PresetOptions {
            dark: DarkMode::Selectors(DarkSelectors {
                light: ".day".to_string(),
                dark: ".night".to_string(),
            }),
            ..PresetOptions::default()
        };
        let (_, _, handler) = first_match("dark:c-red", &options).expect("dark matches");
        assert_eq!(handler.selector, Some(SelectorTransform::Prefix(".night ".to_string())));

        let (_, _, handler) = first_match("@dark:c-red", &options).expect("@dark matches");
        assert_eq!(handler.parent.as_deref(), Some("@media (prefers-color-scheme: dark)"));
    }

    #[test]
    fn important_prefix_and_suffix() {
        let options = PresetOptions::default();
        for token in ["!p-2", "p-2!", "important:p-2"] {
            let (name, rest, handler) = first_match(token, &options).expect("important matches");
            assert_eq!((name, rest), ("important", "p-2"));
            assert_eq!(handler.body, Some(BodyTransform::Important));
        }
    }

    #[test]
    fn negative_needs_a_number() {
        let options = PresetOptions::default();
        let (name, rest, _) = first_match("-m-2", &options).expect("negative matches");
        assert_eq!((name, rest), ("negative", "m-2"));
        assert!(first_match("-m-auto", &options).is_none());
    }

    #[test]
    fn negation_skips_colors_and_zero() {
        let negated = BodyTransform::Negative.apply(crate::rule::entries(&[
            ("margin-top", "0.5rem"),
            ("--un-text-opacity", "1"),
            ("padding", "0"),
        ]));
        assert_eq!(
            negated,
            Some(crate::rule::entries(&[
                ("margin-top", "-0.5rem"),
                ("--un-text-opacity", "1"),
                ("padding", "0"),
            ]))
        );
        assert_eq!(
            BodyTransform::Negative.apply(crate::rule::entries(&[("margin", "calc(1px + 2px)")])),
            Some(crate::rule::entries(&[("margin", "calc(calc(1px + 2px) * -1)")]))
        );
        assert_eq!(
            BodyTransform::Negative.apply(crate::rule::entries(&[("color", "red")])),
            None
        );
    }

    #[test]
    fn bracketed_parameters() {
        let options = PresetOptions::default();
        let (name, rest, handler) =
            first_match("supports-[display:grid]:flex", &options).expect("supports matches");
        assert_eq!((name, rest), ("supports", "flex"));
        assert_eq!(handler.parent.as_deref(), Some("@supports (display:grid)"));

        let (_, _, handler) = first_match("supports-gap:flex", &options).expect("supports matches");
        assert_eq!(handler.parent.as_deref(), Some("@supports (gap: var(--un))"));

        let (_, _, handler) =
            first_match("selector-[.card_>_a]:c-red", &options).expect("selector matches");
        assert_eq!(handler.selector, Some(SelectorTransform::Replace(".card > a".to_string())));

        let (_, _, handler) = first_match("scope-[.app]:p-2", &options).expect("scope matches");
        assert_eq!(handler.selector, Some(SelectorTransform::Prefix(".app ".to_string())));

        let (_, _, handler) = first_match("part-[label]:p-2", &options).expect("part matches");
        assert_eq!(handler.selector, suffix("::part(label)"));
    }

    #[test]
    fn layers_and_containers() {
        let options = PresetOptions::default();
        let (_, rest, handler) = first_match("layer-base:p-2", &options).expect("layer matches");
        assert_eq!(rest, "p-2");
        assert_eq!(handler.parent.as_deref(), Some("@layer base"));

        let (_, _, handler) = first_match("uno-layer-utils:p-2", &options).expect("uno-layer matches");
        assert_eq!(handler.layer.as_deref(), Some("utils"));

        let (_, _, handler) = first_match("@md:p-2", &options).expect("container matches");
        assert_eq!(handler.parent.as_deref(), Some("@container (min-width: 28rem)"));

        let (_, _, handler) = first_match("@[30rem]:p-2", &options).expect("container matches");
        assert_eq!(handler.parent.as_deref(), Some("@container (min-width: 30rem)"));

        assert!(first_match("@huge:p-2", &options).is_none());
    }

    #[test]
    fn arbitrary_variants() {
        let options = PresetOptions::default();
        let (name, rest, handler) = first_match("[&>*]:m-1", &options).expect("arbitrary matches");
        assert_eq!((name, rest), ("arbitrary", "m-1"));
        assert_eq!(handler.selector, Some(SelectorTransform::Template("&>*".to_string())));
        assert_eq!(
            handler.selector.map(|selector| selector.apply(".x")),
            Some(".x>*".to_string())
        );

        let (_, rest, handler) = first_match("[&[open]]:p-2", &options).expect("arbitrary matches");
        assert_eq!(rest, "p-2");
        assert_eq!(handler.selector, Some(SelectorTransform::Template("&[open]".to_string())));

        let (_, _, handler) =
            first_match("[@media(min-width:300px)]:p-2", &options).expect("arbitrary matches");
        assert_eq!(handler.parent.as_deref(), Some("@media(min-width:300px)"));
    }

    #[test]
    fn combinators_and_directions() {
        let options = PresetOptions::default();
        let (_, _, handler) = first_match("children:p-2", &options).expect("children matches");
        assert_eq!(handler.selector, suffix(">*"));
        let (_, _, handler) = first_match("rtl:p-2", &options).expect("rtl matches");
        assert_eq!(handler.selector, Some(SelectorTransform::Prefix("[dir=\"rtl\"] ".to_string())));
    }
}
