//! Declaration rewrites applied after rule resolution.

use crate::config::{PresetOptions, Unit, DEFAULT_VARIABLE_PREFIX};
use crate::rule::CssEntries;
use crate::values::{format_number, round};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static REM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(-?[.\d]+)rem").expect("rem pattern compiles"));

const VW_BASE: f64 = 375.0;
const RPX_PER_REM: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Postprocessor {
    /// Rewrites `--un-` custom properties to another prefix.
    VariablePrefix(String),
    /// Converts `rem` lengths.
    Unit(Unit),
}

impl Postprocessor {
    pub fn apply(&self, entries: &mut CssEntries) {
        match self {
            Self::VariablePrefix(prefix) => {
                let reference = format!("var(--{}", prefix);
                for (property, value) in entries.iter_mut() {
                    if let Some(rest) = property.strip_prefix("--un-") {
                        *property = format!("--{}{}", prefix, rest);
                    }
                    if value.contains("var(--un-") {
                        *value = value.replace("var(--un-", &reference);
                    }
                }
            }
            Self::Unit(unit) => {
                for (_, value) in entries.iter_mut() {
                    if value.contains("rem") {
                        *value = convert_rem(value, *unit);
                    }
                }
            }
        }
    }
}

fn convert_rem(value: &str, unit: Unit) -> String {
    REM_RE
        .replace_all(value, |caps: &Captures<'_>| {
            let Ok(number) = caps[1].parse::<f64>() else {
                return caps[0].to_string();
            };
            match unit {
                Unit::Rpx => format!("{}rpx", format_number(number * RPX_PER_REM)),
                Unit::Vw => format!("{}vw", round(number * 100.0 / VW_BASE)),
            }
        })
        .into_owned()
}

/// Active postprocessors for `options`, in application order.
pub fn postprocessors(options: &PresetOptions) -> Vec<Postprocessor> {
    let mut processors = Vec::with_capacity(2);
    if options.variable_prefix != DEFAULT_VARIABLE_PREFIX {
        processors.push(Postprocessor::VariablePrefix(
            options.variable_prefix.clone(),
        ));
    }
    processors.push(Postprocessor::Unit(options.unit));
    processors
}

pub fn postprocess(mut entries: CssEntries, processors: &[Postprocessor]) -> CssEntries {
    for processor in processors {
        processor.apply(&mut entries);
    }
    entries
}
