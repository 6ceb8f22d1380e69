//! Typed parameter schema.
//!
//! Each effect declares its parameters as a list of [`ParamSpec`]s. A UI can
//! build controls straight from the schema; the registry uses it to validate
//! and default-fill incoming [`ParamSet`](super::ParamSet)s.

use serde::Serialize;

use super::ParamValue;
use crate::color::Rgb;

/// One entry of a choice parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl ChoiceOption {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

/// Kind, bounds and default of a parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParamKind {
    /// Numeric slider.
    Range {
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    },
    /// Boolean switch.
    Toggle { default: bool },
    /// Hex color (`#rrggbb`).
    Color { default: &'static str },
    /// Free text.
    Text {
        default: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<&'static str>,
    },
    /// One value out of a fixed, ordered list.
    Choice {
        options: &'static [ChoiceOption],
        default: &'static str,
    },
}

/// Declaration of a single effect parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: ParamKind,
}

/// Why a parameter value or declaration was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SpecViolation {
    WrongKind {
        expected: &'static str,
        found: &'static str,
    },
    UnknownChoice(String),
    NotFinite,
}

impl std::fmt::Display for SpecViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecViolation::WrongKind { expected, found } => {
                write!(f, "expected {expected}, got {found}")
            }
            SpecViolation::UnknownChoice(v) => write!(f, "'{v}' is not one of the listed options"),
            SpecViolation::NotFinite => write!(f, "number must be finite"),
        }
    }
}

impl ParamSpec {
    pub const fn range(
        id: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    ) -> Self {
        Self {
            id,
            label,
            kind: ParamKind::Range {
                min,
                max,
                step,
                default,
            },
        }
    }

    pub const fn toggle(id: &'static str, label: &'static str, default: bool) -> Self {
        Self {
            id,
            label,
            kind: ParamKind::Toggle { default },
        }
    }

    pub const fn color(id: &'static str, label: &'static str, default: &'static str) -> Self {
        Self {
            id,
            label,
            kind: ParamKind::Color { default },
        }
    }

    pub const fn text(
        id: &'static str,
        label: &'static str,
        default: &'static str,
        placeholder: Option<&'static str>,
    ) -> Self {
        Self {
            id,
            label,
            kind: ParamKind::Text {
                default,
                placeholder,
            },
        }
    }

    pub const fn choice(
        id: &'static str,
        label: &'static str,
        options: &'static [ChoiceOption],
        default: &'static str,
    ) -> Self {
        Self {
            id,
            label,
            kind: ParamKind::Choice { options, default },
        }
    }

    /// The declared default as a value.
    pub fn default_value(&self) -> ParamValue {
        match &self.kind {
            ParamKind::Range { default, .. } => ParamValue::Number(*default),
            ParamKind::Toggle { default } => ParamValue::Bool(*default),
            ParamKind::Color { default } => ParamValue::Text(default.to_string()),
            ParamKind::Text { default, .. } => ParamValue::Text(default.to_string()),
            ParamKind::Choice { default, .. } => ParamValue::Text(default.to_string()),
        }
    }

    /// Default color for color parameters, black for anything else or when
    /// the declared default does not parse.
    pub fn default_color(&self) -> Rgb {
        match &self.kind {
            ParamKind::Color { default } => Rgb::from_hex_or(default, Rgb::BLACK),
            _ => Rgb::BLACK,
        }
    }

    fn expected_kind(&self) -> &'static str {
        match &self.kind {
            ParamKind::Range { .. } => "number",
            ParamKind::Toggle { .. } => "boolean",
            ParamKind::Color { .. } => "color",
            ParamKind::Text { .. } => "text",
            ParamKind::Choice { .. } => "choice",
        }
    }

    /// Interpret a raw string (a `key=value` argument) as this parameter's
    /// kind.
    ///
    /// Colors, text and choices keep the string untouched, so `000000` stays
    /// a color and `01` stays text. Numbers and booleans that do not parse
    /// are kept as text and rejected by [`resolve`](Self::resolve).
    ///
    /// ```
    /// use pixfx_engine::{ParamSpec, ParamValue};
    ///
    /// let ink = ParamSpec::color("ink", "Ink", "#000000");
    /// assert_eq!(ink.parse("102030"), ParamValue::Text("102030".into()));
    ///
    /// let size = ParamSpec::range("size", "Size", 1.0, 10.0, 1.0, 4.0);
    /// assert_eq!(size.parse(" 6 "), ParamValue::Number(6.0));
    /// ```
    pub fn parse(&self, raw: &str) -> ParamValue {
        match &self.kind {
            ParamKind::Range { .. } | ParamKind::Toggle { .. } => ParamValue::parse_loose(raw),
            ParamKind::Color { .. } | ParamKind::Text { .. } | ParamKind::Choice { .. } => {
                ParamValue::Text(raw.to_string())
            }
        }
    }

    /// Check a supplied value against this spec, or fall back to the default.
    ///
    /// Numbers outside `[min, max]` are clamped. Numbers given for colors or
    /// text are taken as their decimal text (`dotColor: 102030` in YAML).
    /// Malformed colors are kept as-is: the effect substitutes the default
    /// when it reads them.
    pub(crate) fn resolve(&self, value: Option<&ParamValue>) -> Result<ParamValue, SpecViolation> {
        let Some(value) = value else {
            return Ok(self.default_value());
        };
        let wrong_kind = || SpecViolation::WrongKind {
            expected: self.expected_kind(),
            found: value.kind_name(),
        };

        match (&self.kind, value) {
            (ParamKind::Range { min, max, .. }, ParamValue::Number(n)) => {
                if !n.is_finite() {
                    return Err(SpecViolation::NotFinite);
                }
                Ok(ParamValue::Number(n.clamp(*min, *max)))
            }
            (ParamKind::Toggle { .. }, ParamValue::Bool(b)) => Ok(ParamValue::Bool(*b)),
            (ParamKind::Color { .. } | ParamKind::Text { .. }, ParamValue::Text(s)) => {
                Ok(ParamValue::Text(s.clone()))
            }
            (ParamKind::Color { .. } | ParamKind::Text { .. }, ParamValue::Number(n)) => {
                if !n.is_finite() {
                    return Err(SpecViolation::NotFinite);
                }
                Ok(ParamValue::Text(n.to_string()))
            }
            (ParamKind::Choice { options, .. }, ParamValue::Text(s)) => {
                if options.iter().any(|o| o.value == s) {
                    Ok(ParamValue::Text(s.clone()))
                } else {
                    Err(SpecViolation::UnknownChoice(s.clone()))
                }
            }
            _ => Err(wrong_kind()),
        }
    }

    /// Check the declaration itself: bounds ordered, default in range,
    /// choice default listed, color default parseable.
    pub fn validate(&self) -> Result<(), String> {
        match &self.kind {
            ParamKind::Range {
                min,
                max,
                step,
                default,
            } => {
                if !(min <= max) {
                    return Err(format!("min {min} exceeds max {max}"));
                }
                if !(*step > 0.0) {
                    return Err(format!("step {step} must be positive"));
                }
                if !(min <= default && default <= max) {
                    return Err(format!("default {default} outside [{min}, {max}]"));
                }
            }
            ParamKind::Color { default } => {
                if Rgb::from_hex(default).is_none() {
                    return Err(format!("default color '{default}' is not #rrggbb"));
                }
            }
            ParamKind::Choice { options, default } => {
                if options.is_empty() {
                    return Err("choice has no options".to_string());
                }
                if !options.iter().any(|o| o.value == *default) {
                    return Err(format!("default '{default}' is not a listed option"));
                }
            }
            ParamKind::Toggle { .. } | ParamKind::Text { .. } => {}
        }
        Ok(())
    }
}
