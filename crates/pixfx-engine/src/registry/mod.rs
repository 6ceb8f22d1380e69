//! Effect registry: the catalog of available effects.
//!
//! An [`EffectDefinition`] ties an id to display metadata, a parameter
//! schema and a processing routine. Routines share one signature, so the
//! registry dispatches through a plain function pointer.
//!
//! # Example
//!
//! ```
//! use pixfx_engine::surface::SoftSurface;
//! use pixfx_engine::{catalog, ParamSet, PixelBuffer};
//!
//! let source = PixelBuffer::filled(8, 8, [200, 30, 30, 255]).unwrap();
//! let mut surface = SoftSurface::new(8, 8);
//! let out = catalog()
//!     .process("pixelate", &source, &ParamSet::new().with("blockSize", 4), &mut surface)
//!     .unwrap();
//! assert_eq!(out.as_bytes().len(), 8 * 8 * 4);
//! ```

mod invocation;

pub use invocation::Invocation;

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;
use std::time::Instant;

use serde::Serialize;

use crate::buffer::PixelBuffer;
use crate::error::EffectError;
use crate::params::{ParamSet, ParamSpec};
use crate::surface::Surface;

/// Uniform signature of every effect routine.
///
/// The routine either hands a finished buffer to
/// [`Surface::put_pixels`] or draws primitives onto the surface, which the
/// registry has already reset to the source geometry.
pub type Routine = fn(&Invocation<'_>, &mut dyn Surface) -> Result<(), EffectError>;

/// One entry of the catalog. Immutable once registered.
#[derive(Clone, Copy, Serialize)]
pub struct EffectDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    #[serde(skip)]
    pub routine: Routine,
}

impl fmt::Debug for EffectDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectDefinition")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("params", &self.params.len())
            .finish()
    }
}

impl EffectDefinition {
    /// Look up a parameter declaration by id.
    pub fn param(&self, id: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.id == id)
    }

    /// Check the schema: unique parameter ids and valid declarations.
    pub fn validate(&self) -> Result<(), EffectError> {
        let invalid = |reason: String| EffectError::InvalidDefinition {
            effect: self.id.to_string(),
            reason,
        };
        if self.id.is_empty() {
            return Err(invalid("empty id".to_string()));
        }
        let mut seen = HashSet::new();
        for spec in self.params {
            if !seen.insert(spec.id) {
                return Err(invalid(format!("duplicate parameter '{}'", spec.id)));
            }
            spec.validate()
                .map_err(|reason| invalid(format!("parameter '{}': {reason}", spec.id)))?;
        }
        Ok(())
    }

    /// Run this effect on `source`, drawing onto `surface`.
    pub fn apply(
        &self,
        source: &PixelBuffer,
        params: &ParamSet,
        surface: &mut dyn Surface,
    ) -> Result<PixelBuffer, EffectError> {
        let invocation = Invocation::resolve(self, source, params)?;
        let start = Instant::now();

        surface.reset(source.width(), source.height());
        (self.routine)(&invocation, surface)?;
        let output = surface.snapshot();

        tracing::debug!(
            effect = self.id,
            width = source.width(),
            height = source.height(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Applied effect"
        );
        Ok(output)
    }
}

/// Ordered collection of effect definitions with unique ids.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    effects: Vec<EffectDefinition>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in effects, in display order.
    pub fn builtin() -> Self {
        Self {
            effects: vec![
                crate::effects::PIXELATE,
                crate::effects::DUOTONE,
                crate::dither::DITHER,
                crate::dither::DITHER_BW,
                crate::effects::HALFTONE,
                crate::effects::HALFTONE_CMYK,
                crate::effects::ASCII,
                crate::effects::GRAYSCALE,
                crate::effects::THRESHOLD,
                crate::effects::NEON,
                crate::effects::CRT,
            ],
        }
    }

    /// Add a definition after validating it.
    pub fn register(&mut self, effect: EffectDefinition) -> Result<(), EffectError> {
        if self.lookup(effect.id).is_some() {
            return Err(EffectError::DuplicateEffect(effect.id.to_string()));
        }
        effect.validate()?;
        self.effects.push(effect);
        Ok(())
    }

    pub fn lookup(&self, id: &str) -> Option<&EffectDefinition> {
        self.effects.iter().find(|e| e.id == id)
    }

    /// All definitions in registration order.
    pub fn list(&self) -> &[EffectDefinition] {
        &self.effects
    }

    /// Resolve `id` and run it. Unknown ids are an error, never a fallback.
    pub fn process(
        &self,
        id: &str,
        source: &PixelBuffer,
        params: &ParamSet,
        surface: &mut dyn Surface,
    ) -> Result<PixelBuffer, EffectError> {
        let effect = self
            .lookup(id)
            .ok_or_else(|| EffectError::UnknownEffect(id.to_string()))?;
        effect.apply(source, params, surface)
    }
}

/// The process-wide built-in catalog, created on first use.
pub fn catalog() -> &'static Registry {
    static CATALOG: OnceLock<Registry> = OnceLock::new();
    CATALOG.get_or_init(Registry::builtin)
}
