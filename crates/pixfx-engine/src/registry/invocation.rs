//! A resolved, ready-to-run effect invocation.

use std::collections::BTreeMap;

use super::EffectDefinition;
use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::error::EffectError;
use crate::params::{ParamSet, ParamValue, SpecViolation};

/// Source buffer plus a parameter set that has been checked against the
/// effect's schema. Every declared parameter is present and well-typed.
#[derive(Debug)]
pub struct Invocation<'a> {
    effect: &'a EffectDefinition,
    source: &'a PixelBuffer,
    values: BTreeMap<&'static str, ParamValue>,
}

impl<'a> Invocation<'a> {
    /// Validate `params` against `effect.params`, filling in defaults.
    ///
    /// Keys that the effect does not declare are ignored.
    pub fn resolve(
        effect: &'a EffectDefinition,
        source: &'a PixelBuffer,
        params: &ParamSet,
    ) -> Result<Self, EffectError> {
        let mut values = BTreeMap::new();
        for spec in effect.params {
            let value = spec
                .resolve(params.get(spec.id))
                .map_err(|violation: SpecViolation| EffectError::InvalidParam {
                    effect: effect.id.to_string(),
                    param: spec.id.to_string(),
                    reason: violation.to_string(),
                })?;
            values.insert(spec.id, value);
        }

        for (key, _) in params.iter() {
            if !values.contains_key(key) {
                tracing::debug!(effect = effect.id, param = key, "Ignoring undeclared parameter");
            }
        }

        Ok(Self {
            effect,
            source,
            values,
        })
    }

    pub fn effect(&self) -> &EffectDefinition {
        self.effect
    }

    pub fn source(&self) -> &PixelBuffer {
        self.source
    }

    pub fn width(&self) -> u32 {
        self.source.width()
    }

    pub fn height(&self) -> u32 {
        self.source.height()
    }

    fn value(&self, id: &str) -> Result<&ParamValue, EffectError> {
        self.values
            .get(id)
            .ok_or_else(|| EffectError::UndeclaredParam {
                effect: self.effect.id.to_string(),
                param: id.to_string(),
            })
    }

    fn mismatch(&self, id: &str, expected: &str, found: &ParamValue) -> EffectError {
        EffectError::InvalidParam {
            effect: self.effect.id.to_string(),
            param: id.to_string(),
            reason: format!("expected {expected}, got {}", found.kind_name()),
        }
    }

    pub fn number(&self, id: &str) -> Result<f64, EffectError> {
        match self.value(id)? {
            ParamValue::Number(n) => Ok(*n),
            other => Err(self.mismatch(id, "number", other)),
        }
    }

    /// A numeric parameter used as a pixel size: rounded, at least 1.
    pub fn size(&self, id: &str) -> Result<u32, EffectError> {
        Ok(self.number(id)?.round().max(1.0) as u32)
    }

    pub fn flag(&self, id: &str) -> Result<bool, EffectError> {
        match self.value(id)? {
            ParamValue::Bool(b) => Ok(*b),
            other => Err(self.mismatch(id, "boolean", other)),
        }
    }

    pub fn text(&self, id: &str) -> Result<&str, EffectError> {
        match self.value(id)? {
            ParamValue::Text(s) => Ok(s),
            other => Err(self.mismatch(id, "text", other)),
        }
    }

    /// Selected value of a choice parameter.
    pub fn choice(&self, id: &str) -> Result<&str, EffectError> {
        self.text(id)
    }

    /// A color parameter. Malformed hex falls back to the declared default.
    pub fn color(&self, id: &str) -> Result<Rgb, EffectError> {
        let hex = self.text(id)?;
        if let Some(color) = Rgb::from_hex(hex) {
            return Ok(color);
        }
        let fallback = self
            .effect
            .params
            .iter()
            .find(|spec| spec.id == id)
            .map(|spec| spec.default_color())
            .unwrap_or(Rgb::BLACK);
        tracing::debug!(
            effect = self.effect.id,
            param = id,
            value = hex,
            fallback = %fallback,
            "Malformed color, using default"
        );
        Ok(fallback)
    }
}
