//! Theme scales consumed by the rule resolvers.
//!
//! A [`Theme`] is built once per preset from the defaults below merged with
//! a [`ThemeOverrides`] read from configuration, and is never mutated by
//! rules afterwards.

use serde::Deserialize;
use std::collections::BTreeMap;

pub type Scale = BTreeMap<String, String>;

/// A palette entry: either a concrete color or a nested set of shades.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Value(String),
    Palette(BTreeMap<String, ColorValue>),
}

/// A borrowed step of a palette walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRef<'a> {
    Value(&'a str),
    Palette(&'a BTreeMap<String, ColorValue>),
}

/// `font-size` scale entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FontSize {
    Size(String),
    WithLineHeight(String, String),
    WithProperties(String, BTreeMap<String, String>),
    WithLetterSpacing(String, String, String),
}

impl FontSize {
    pub fn size(&self) -> &str {
        match self {
            Self::Size(size)
            | Self::WithLineHeight(size, _)
            | Self::WithProperties(size, _)
            | Self::WithLetterSpacing(size, _, _) => size,
        }
    }
}

/// One shadow or a list of comma-joined layers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Shadow {
    Single(String),
    Layers(Vec<String>),
}

impl Shadow {
    pub fn layers(&self) -> Vec<&str> {
        match self {
            Self::Single(shadow) => vec![shadow.as_str()],
            Self::Layers(layers) => layers.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub colors: BTreeMap<String, ColorValue>,
    pub spacing: Scale,
    pub line_width: Scale,
    pub border_radius: Scale,
    pub font_size: BTreeMap<String, FontSize>,
    pub font_weight: Scale,
    pub font_family: Scale,
    pub line_height: Scale,
    pub letter_spacing: Scale,
    pub word_spacing: Scale,
    pub text_indent: Scale,
    pub text_shadow: BTreeMap<String, Shadow>,
    pub text_stroke_width: Scale,
    pub ring_width: Scale,
    pub container: Scale,
    pub preflight_root: Vec<String>,
}

/// Partial theme read from configuration; every present key replaces or
/// extends the default scale of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    pub colors: BTreeMap<String, ColorValue>,
    pub spacing: Scale,
    pub line_width: Scale,
    pub border_radius: Scale,
    pub font_size: BTreeMap<String, FontSize>,
    pub font_weight: Scale,
    pub font_family: Scale,
    pub line_height: Scale,
    pub letter_spacing: Scale,
    pub word_spacing: Scale,
    pub text_indent: Scale,
    pub text_shadow: BTreeMap<String, Shadow>,
    pub text_stroke_width: Scale,
    pub ring_width: Scale,
    pub container: Scale,
    pub preflight_root: Option<Vec<String>>,
}

impl Theme {
    pub fn merged(overrides: &ThemeOverrides) -> Self {
        let mut theme = Self::default();
        for (name, value) in &overrides.colors {
            merge_color(&mut theme.colors, name, value);
        }
        theme.spacing.extend(overrides.spacing.clone());
        theme.line_width.extend(overrides.line_width.clone());
        theme.border_radius.extend(overrides.border_radius.clone());
        theme.font_size.extend(overrides.font_size.clone());
        theme.font_weight.extend(overrides.font_weight.clone());
        theme.font_family.extend(overrides.font_family.clone());
        theme.line_height.extend(overrides.line_height.clone());
        theme.letter_spacing.extend(overrides.letter_spacing.clone());
        theme.word_spacing.extend(overrides.word_spacing.clone());
        theme.text_indent.extend(overrides.text_indent.clone());
        theme.text_shadow.extend(overrides.text_shadow.clone());
        theme.text_stroke_width.extend(overrides.text_stroke_width.clone());
        theme.ring_width.extend(overrides.ring_width.clone());
        theme.container.extend(overrides.container.clone());
        if let Some(roots) = &overrides.preflight_root {
            theme.preflight_root = roots.clone();
        }
        theme
    }

    /// Walks the palette along `path`. At each level the joined remainder
    /// (`light-blue`, or its camel-cased `lightBlue`) wins over descending
    /// one segment. An empty path yields the palette root.
    pub fn color(&self, path: &[&str]) -> Option<ColorRef<'_>> {
        let mut current = ColorRef::Palette(&self.colors);
        for (idx, segment) in path.iter().enumerate() {
            let ColorRef::Palette(palette) = current else {
                return None;
            };
            let rest = &path[idx..];
            if rest.len() > 1 {
                let joined = rest.join("-");
                if let Some(found) = palette
                    .get(&joined)
                    .or_else(|| palette.get(&camel_case(&joined)))
                {
                    return Some(found.as_ref());
                }
            }
            current = palette.get(*segment)?.as_ref();
        }
        Some(current)
    }
}

impl ColorValue {
    pub fn as_ref(&self) -> ColorRef<'_> {
        match self {
            Self::Value(value) => ColorRef::Value(value),
            Self::Palette(palette) => ColorRef::Palette(palette),
        }
    }
}

fn camel_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut upper = false;
    for ch in raw.chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn merge_color(colors: &mut BTreeMap<String, ColorValue>, name: &str, value: &ColorValue) {
    match (colors.get_mut(name), value) {
        (Some(ColorValue::Palette(existing)), ColorValue::Palette(shades)) => {
            for (shade, color) in shades {
                existing.insert(shade.clone(), color.clone());
            }
            add_shade_aliases(existing);
        }
        _ => {
            let mut value = value.clone();
            if let ColorValue::Palette(shades) = &mut value {
                add_shade_aliases(shades);
            }
            colors.insert(name.to_string(), value);
        }
    }
}

/// `DEFAULT` falls back to shade 400 and every hundred-step shade is also
/// reachable by its short form (`500` as `5`).
fn add_shade_aliases(shades: &mut BTreeMap<String, ColorValue>) {
    if !shades.contains_key("DEFAULT") {
        if let Some(default) = shades.get("400").cloned() {
            shades.insert("DEFAULT".to_string(), default);
        }
    }
    let aliases = shades
        .iter()
        .filter_map(|(key, value)| {
            let number = key.parse::<u32>().ok()?;
            (number % 100 == 0 && number > 0).then(|| ((number / 100).to_string(), value.clone()))
        })
        .collect::<Vec<_>>();
    for (alias, value) in aliases {
        shades.entry(alias).or_insert(value);
    }
}

const SHADES: [&str; 11] = [
    "50", "100", "200", "300", "400", "500", "600", "700", "800", "900", "950",
];

const PALETTES: [(&str, [&str; 11]); 22] = [
    ("slate", ["#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b", "#475569", "#334155", "#1e293b", "#0f172a", "#020617"]),
    ("gray", ["#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280", "#4b5563", "#374151", "#1f2937", "#111827", "#030712"]),
    ("zinc", ["#fafafa", "#f4f4f5", "#e4e4e7", "#d4d4d8", "#a1a1aa", "#71717a", "#52525b", "#3f3f46", "#27272a", "#18181b", "#09090b"]),
    ("neutral", ["#fafafa", "#f5f5f5", "#e5e5e5", "#d4d4d4", "#a3a3a3", "#737373", "#525252", "#404040", "#262626", "#171717", "#0a0a0a"]),
    ("stone", ["#fafaf9", "#f5f5f4", "#e7e5e4", "#d6d3d1", "#a8a29e", "#78716c", "#57534e", "#44403c", "#292524", "#1c1917", "#0c0a09"]),
    ("red", ["#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626", "#b91c1c", "#991b1b", "#7f1d1d", "#450a0a"]),
    ("orange", ["#fff7ed", "#ffedd5", "#fed7aa", "#fdba74", "#fb923c", "#f97316", "#ea580c", "#c2410c", "#9a3412", "#7c2d12", "#431407"]),
    ("amber", ["#fffbeb", "#fef3c7", "#fde68a", "#fcd34d", "#fbbf24", "#f59e0b", "#d97706", "#b45309", "#92400e", "#78350f", "#451a03"]),
    ("yellow", ["#fefce8", "#fef9c3", "#fef08a", "#fde047", "#facc15", "#eab308", "#ca8a04", "#a16207", "#854d0e", "#713f12", "#422006"]),
    ("lime", ["#f7fee7", "#ecfccb", "#d9f99d", "#bef264", "#a3e635", "#84cc16", "#65a30d", "#4d7c0f", "#3f6212", "#365314", "#1a2e05"]),
    ("green", ["#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a", "#15803d", "#166534", "#14532d", "#052e16"]),
    ("emerald", ["#ecfdf5", "#d1fae5", "#a7f3d0", "#6ee7b7", "#34d399", "#10b981", "#059669", "#047857", "#065f46", "#064e3b", "#022c22"]),
    ("teal", ["#f0fdfa", "#ccfbf1", "#99f6e4", "#5eead4", "#2dd4bf", "#14b8a6", "#0d9488", "#0f766e", "#115e59", "#134e4a", "#042f2e"]),
    ("cyan", ["#ecfeff", "#cffafe", "#a5f3fc", "#67e8f9", "#22d3ee", "#06b6d4", "#0891b2", "#0e7490", "#155e75", "#164e63", "#083344"]),
    ("sky", ["#f0f9ff", "#e0f2fe", "#bae6fd", "#7dd3fc", "#38bdf8", "#0ea5e9", "#0284c7", "#0369a1", "#075985", "#0c4a6e", "#082f49"]),
    ("blue", ["#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8", "#1e40af", "#1e3a8a", "#172554"]),
    ("indigo", ["#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#4f46e5", "#4338ca", "#3730a3", "#312e81", "#1e1b4b"]),
    ("violet", ["#f5f3ff", "#ede9fe", "#ddd6fe", "#c4b5fd", "#a78bfa", "#8b5cf6", "#7c3aed", "#6d28d9", "#5b21b6", "#4c1d95", "#2e1065"]),
    ("purple", ["#faf5ff", "#f3e8ff", "#e9d5ff", "#d8b4fe", "#c084fc", "#a855f7", "#9333ea", "#7e22ce", "#6b21a8", "#581c87", "#3b0764"]),
    ("fuchsia", ["#fdf4ff", "#fae8ff", "#f5d0fe", "#f0abfc", "#e879f9", "#d946ef", "#c026d3", "#a21caf", "#86198f", "#701a75", "#4a044e"]),
    ("pink", ["#fdf2f8", "#fce7f3", "#fbcfe8", "#f9a8d4", "#f472b6", "#ec4899", "#db2777", "#be185d", "#9d174d", "#831843", "#500724"]),
    ("rose", ["#fff1f2", "#ffe4e6", "#fecdd3", "#fda4af", "#fb7185", "#f43f5e", "#e11d48", "#be123c", "#9f1239", "#881337", "#4c0519"]),
];

fn scale(pairs: &[(&str, &str)]) -> Scale {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn default_colors() -> BTreeMap<String, ColorValue> {
    let mut colors = BTreeMap::new();
    for (name, value) in [
        ("inherit", "inherit"),
        ("current", "currentColor"),
        ("transparent", "transparent"),
        ("black", "#000"),
        ("white", "#fff"),
    ] {
        colors.insert(name.to_string(), ColorValue::Value(value.to_string()));
    }
    for (name, hexes) in PALETTES {
        let mut shades = SHADES
            .iter()
            .zip(hexes)
            .map(|(shade, hex)| (shade.to_string(), ColorValue::Value(hex.to_string())))
            .collect::<BTreeMap<_, _>>();
        add_shade_aliases(&mut shades);
        colors.insert(name.to_string(), ColorValue::Palette(shades));
    }
    colors
}

fn default_font_sizes() -> BTreeMap<String, FontSize> {
    [
        ("xs", "0.75rem", "1rem"),
        ("sm", "0.875rem", "1.25rem"),
        ("base", "1rem", "1.5rem"),
        ("lg", "1.125rem", "1.75rem"),
        ("xl", "1.25rem", "1.75rem"),
        ("2xl", "1.5rem", "2rem"),
        ("3xl", "1.875rem", "2.25rem"),
        ("4xl", "2.25rem", "2.5rem"),
        ("5xl", "3rem", "1"),
        ("6xl", "3.75rem", "1"),
        ("7xl", "4.5rem", "1"),
        ("8xl", "6rem", "1"),
        ("9xl", "8rem", "1"),
    ]
    .into_iter()
    .map(|(name, size, height)| {
        (
            name.to_string(),
            FontSize::WithLineHeight(size.to_string(), height.to_string()),
        )
    })
    .collect()
}

fn default_text_shadows() -> BTreeMap<String, Shadow> {
    let layers = |items: &[&str]| Shadow::Layers(items.iter().map(|s| s.to_string()).collect());
    let mut shadows = BTreeMap::new();
    shadows.insert(
        "DEFAULT".to_string(),
        layers(&["0 0 1px rgb(0 0 0 / 0.2)", "0 0 1px rgb(1 0 5 / 0.1)"]),
    );
    shadows.insert(
        "none".to_string(),
        Shadow::Single("0 0 rgb(0 0 0 / 0)".to_string()),
    );
    shadows.insert(
        "sm".to_string(),
        Shadow::Single("1px 1px 3px rgb(36 37 47 / 0.25)".to_string()),
    );
    shadows.insert(
        "md".to_string(),
        layers(&["0 1px 2px rgb(30 29 39 / 0.19)", "1px 2px 4px rgb(54 64 147 / 0.18)"]),
    );
    shadows.insert(
        "lg".to_string(),
        layers(&["3px 3px 6px rgb(0 0 0 / 0.26)", "0 0 5px rgb(15 3 86 / 0.22)"]),
    );
    shadows.insert(
        "xl".to_string(),
        layers(&["1px 1px 3px rgb(0 0 0 / 0.29)", "2px 4px 7px rgb(73 64 125 / 0.35)"]),
    );
    shadows
}

const TRACKING: [(&str, &str); 6] = [
    ("tighter", "-0.05em"),
    ("tight", "-0.025em"),
    ("normal", "0em"),
    ("wide", "0.025em"),
    ("wider", "0.05em"),
    ("widest", "0.1em"),
];

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            spacing: scale(&[
                ("DEFAULT", "1rem"),
                ("none", "0"),
                ("xs", "0.75rem"),
                ("sm", "0.875rem"),
                ("lg", "1.125rem"),
                ("xl", "1.25rem"),
                ("2xl", "1.5rem"),
                ("3xl", "1.875rem"),
                ("4xl", "2.25rem"),
                ("5xl", "3rem"),
                ("6xl", "3.75rem"),
                ("7xl", "4.5rem"),
                ("8xl", "6rem"),
                ("9xl", "8rem"),
            ]),
            line_width: scale(&[("DEFAULT", "1px"), ("none", "0")]),
            border_radius: scale(&[
                ("DEFAULT", "0.25rem"),
                ("none", "0"),
                ("sm", "0.125rem"),
                ("md", "0.375rem"),
                ("lg", "0.5rem"),
                ("xl", "0.75rem"),
                ("2xl", "1rem"),
                ("3xl", "1.5rem"),
                ("full", "9999px"),
            ]),
            font_size: default_font_sizes(),
            font_weight: scale(&[
                ("thin", "100"),
                ("extralight", "200"),
                ("light", "300"),
                ("normal", "400"),
                ("medium", "500"),
                ("semibold", "600"),
                ("bold", "700"),
                ("extrabold", "800"),
                ("black", "900"),
            ]),
            font_family: scale(&[
                ("sans", "ui-sans-serif,system-ui,-apple-system,BlinkMacSystemFont,\"Segoe UI\",Roboto,\"Helvetica Neue\",Arial,\"Noto Sans\",sans-serif,\"Apple Color Emoji\",\"Segoe UI Emoji\",\"Segoe UI Symbol\",\"Noto Color Emoji\""),
                ("serif", "ui-serif,Georgia,Cambria,\"Times New Roman\",Times,serif"),
                ("mono", "ui-monospace,SFMono-Regular,Menlo,Monaco,Consolas,\"Liberation Mono\",\"Courier New\",monospace"),
            ]),
            line_height: scale(&[
                ("none", "1"),
                ("tight", "1.25"),
                ("snug", "1.375"),
                ("normal", "1.5"),
                ("relaxed", "1.625"),
                ("loose", "2"),
            ]),
            letter_spacing: scale(&TRACKING),
            word_spacing: scale(&TRACKING),
            text_indent: scale(&[
                ("DEFAULT", "1.5rem"),
                ("xs", "0.5rem"),
                ("sm", "1rem"),
                ("md", "1.5rem"),
                ("lg", "2rem"),
                ("xl", "2.5rem"),
                ("2xl", "3rem"),
                ("3xl", "4rem"),
            ]),
            text_shadow: default_text_shadows(),
            text_stroke_width: scale(&[
                ("DEFAULT", "1.5rem"),
                ("none", "0"),
                ("sm", "thin"),
                ("md", "medium"),
                ("lg", "thick"),
            ]),
            ring_width: scale(&[("DEFAULT", "3px"), ("none", "0")]),
            container: scale(&[
                ("xs", "20rem"),
                ("sm", "24rem"),
                ("md", "28rem"),
                ("lg", "32rem"),
                ("xl", "36rem"),
                ("2xl", "42rem"),
                ("3xl", "48rem"),
                ("4xl", "56rem"),
                ("5xl", "64rem"),
                ("6xl", "72rem"),
                ("7xl", "80rem"),
                ("prose", "65ch"),
            ]),
            preflight_root: vec!["*,::before,::after".to_string(), "::backdrop".to_string()],
        }
    }
}
