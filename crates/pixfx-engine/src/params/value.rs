//! Parameter values and parameter sets supplied per invocation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single parameter value.
///
/// Colors and choices travel as [`ParamValue::Text`]; the schema decides how
/// the text is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ParamValue {
    /// Interpret a loosely typed string, e.g. from a `key=value` argument.
    ///
    /// `true`/`false` become booleans, anything that parses as a finite
    /// number becomes a number, everything else stays text.
    ///
    /// ```
    /// use pixfx_engine::ParamValue;
    ///
    /// assert_eq!(ParamValue::parse_loose("true"), ParamValue::Bool(true));
    /// assert_eq!(ParamValue::parse_loose("0.5"), ParamValue::Number(0.5));
    /// assert_eq!(ParamValue::parse_loose("#ff0000"), ParamValue::Text("#ff0000".into()));
    /// ```
    pub fn parse_loose(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed {
            "true" => return ParamValue::Bool(true),
            "false" => return ParamValue::Bool(false),
            _ => {}
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => ParamValue::Number(n),
            _ => ParamValue::Text(s.to_string()),
        }
    }

    /// Short name of the value's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "boolean",
            ParamValue::Number(_) => "number",
            ParamValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Number(v as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

/// Parameter id → value mapping for one invocation.
///
/// Keys missing from the set are filled in from the effect's defaults when
/// the registry resolves it.
///
/// ```
/// use pixfx_engine::ParamSet;
///
/// let params = ParamSet::new().with("blockSize", 12).with("invert", true);
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, id: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(id, value);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(id.into(), value.into());
    }

    pub fn get(&self, id: &str) -> Option<&ParamValue> {
        self.values.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: ParamSet) {
        self.values.extend(other.values);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, ParamValue)> for ParamSet {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_loose() {
        assert_eq!(ParamValue::parse_loose("false"), ParamValue::Bool(false));
        assert_eq!(ParamValue::parse_loose(" 12 "), ParamValue::Number(12.0));
        assert_eq!(ParamValue::parse_loose("-3.5"), ParamValue::Number(-3.5));
        assert_eq!(ParamValue::parse_loose("NaN"), ParamValue::Text("NaN".into()));
        assert_eq!(
            ParamValue::parse_loose(" .:-=+*#%@"),
            ParamValue::Text(" .:-=+*#%@".into())
        );
    }

    #[test]
    fn test_param_set_json() {
        let params: ParamSet =
            serde_json::from_str(r##"{"blockSize": 8, "invert": true, "dotColor": "#fff000"}"##)
                .unwrap();
        assert_eq!(params.get("blockSize"), Some(&ParamValue::Number(8.0)));
        assert_eq!(params.get("invert"), Some(&ParamValue::Bool(true)));
        assert_eq!(
            params.get("dotColor"),
            Some(&ParamValue::Text("#fff000".into()))
        );
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = ParamSet::new().with("a", 1).with("b", 2);
        base.merge(ParamSet::new().with("b", 3).with("c", "x"));
        assert_eq!(base.get("a"), Some(&ParamValue::Number(1.0)));
        assert_eq!(base.get("b"), Some(&ParamValue::Number(3.0)));
        assert_eq!(base.get("c"), Some(&ParamValue::Text("x".into())));
    }
}
