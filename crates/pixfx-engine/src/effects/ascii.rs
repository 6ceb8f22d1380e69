//! ASCII art: one glyph per block, picked by block brightness.

use super::blocks::{average_brightness, blocks};
use crate::error::EffectError;
use crate::params::ParamSpec;
use crate::registry::{EffectDefinition, Invocation};
use crate::surface::{Font, Paint, Surface};

/// Symbols from darkest to brightest.
pub const DEFAULT_SYMBOLS: &str = " .:-=+*#%@";

pub const ASCII: EffectDefinition = EffectDefinition {
    id: "ascii",
    name: "ASCII Art",
    description: "Block brightness rendered as text symbols",
    params: &[
        ParamSpec::range("blockSize", "Cell size", 4.0, 32.0, 1.0, 10.0),
        ParamSpec::text("symbols", "Symbols (dark to bright)", DEFAULT_SYMBOLS, None),
        ParamSpec::range("steps", "Brightness steps", 2.0, 64.0, 1.0, 10.0),
        ParamSpec::color("textColor", "Text color", "#00ff66"),
        ParamSpec::color("backgroundColor", "Background", "#000000"),
        ParamSpec::toggle("bold", "Bold", false),
    ],
    routine: run,
};

/// Index of the symbol for `brightness` (0..=255) quantized to `steps`
/// levels, clamped to the last of `len` symbols. `len` must be non-zero.
pub fn symbol_index(brightness: f64, steps: u32, len: usize) -> usize {
    let step = (brightness * steps as f64 / 256.0).floor().max(0.0) as usize;
    step.min(len.saturating_sub(1))
}

fn run(inv: &Invocation<'_>, surface: &mut dyn Surface) -> Result<(), EffectError> {
    let size = inv.size("blockSize")?;
    let steps = inv.size("steps")?;
    let symbols: Vec<char> = inv.text("symbols")?.chars().collect();
    let font = Font {
        size: size as f32,
        bold: inv.flag("bold")?,
    };
    let paint = Paint::solid(inv.color("textColor")?);
    let source = inv.source();

    surface.fill(inv.color("backgroundColor")?);
    if symbols.is_empty() {
        return Ok(());
    }

    let mut glyph = [0u8; 4];
    for block in blocks(source.width(), source.height(), size) {
        let brightness = average_brightness(source, &block);
        let symbol = symbols[symbol_index(brightness, steps, symbols.len())];
        if symbol.is_whitespace() {
            continue;
        }
        let (cx, cy) = block.center();
        surface.fill_glyph(symbol.encode_utf8(&mut glyph), cx, cy, &font, &paint);
    }
    Ok(())
}
