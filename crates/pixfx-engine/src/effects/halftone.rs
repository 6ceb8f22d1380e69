//! Halftone screens: monochrome shapes and CMYK dot separation.
//!
//! Each block is reduced to one value (brightness, or CMYK of the average
//! color) and drawn as shapes whose size follows that value. Shapes are
//! centered on the clipped block.

use super::blocks::{average_brightness, average_color, blocks};
use crate::color::{Cmyk, Rgb};
use crate::error::EffectError;
use crate::params::{ChoiceOption, ParamSpec};
use crate::registry::{EffectDefinition, Invocation};
use crate::surface::{BlendMode, Paint, Rect, Surface};

const SHAPES: &[ChoiceOption] = &[
    ChoiceOption::new("squares", "Squares"),
    ChoiceOption::new("circles", "Circles"),
    ChoiceOption::new("lines", "Lines"),
];

const DIRECTIONS: &[ChoiceOption] = &[
    ChoiceOption::new("vertical", "Vertical"),
    ChoiceOption::new("horizontal", "Horizontal"),
];

pub const HALFTONE: EffectDefinition = EffectDefinition {
    id: "halftone",
    name: "Halftone",
    description: "Squares, circles or bars sized by block brightness",
    params: &[
        ParamSpec::choice("shape", "Shape", SHAPES, "circles"),
        ParamSpec::range("blockSize", "Cell size", 4.0, 64.0, 1.0, 10.0),
        ParamSpec::choice("direction", "Line direction", DIRECTIONS, "vertical"),
        ParamSpec::toggle("invert", "Invert", false),
        ParamSpec::color("dotColor", "Dot color", "#000000"),
        ParamSpec::color("backgroundColor", "Background", "#ffffff"),
    ],
    routine: run_halftone,
};

pub const HALFTONE_CMYK: EffectDefinition = EffectDefinition {
    id: "halftone-cmyk",
    name: "Color Halftone",
    description: "Offset cyan, magenta, yellow and black dots per block",
    params: &[
        ParamSpec::range("blockSize", "Cell size", 4.0, 64.0, 1.0, 12.0),
        ParamSpec::color("backgroundColor", "Paper", "#ffffff"),
    ],
    routine: run_cmyk,
};

/// Shape drawn per halftone cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Squares,
    Circles,
    VerticalLines,
    HorizontalLines,
}

impl Shape {
    fn from_params(shape: &str, direction: &str) -> Self {
        match (shape, direction) {
            ("squares", _) => Shape::Squares,
            ("lines", "horizontal") => Shape::HorizontalLines,
            ("lines", _) => Shape::VerticalLines,
            _ => Shape::Circles,
        }
    }
}

fn run_halftone(inv: &Invocation<'_>, surface: &mut dyn Surface) -> Result<(), EffectError> {
    let shape = Shape::from_params(inv.choice("shape")?, inv.choice("direction")?);
    let size = inv.size("blockSize")?;
    let invert = inv.flag("invert")?;
    let paint = Paint::solid(inv.color("dotColor")?);
    let source = inv.source();

    surface.fill(inv.color("backgroundColor")?);

    let s = size as f32;
    for block in blocks(source.width(), source.height(), size) {
        let mut ratio = (average_brightness(source, &block) / 255.0) as f32;
        if invert {
            ratio = 1.0 - ratio;
        }
        if ratio <= 0.0 {
            continue;
        }
        let (cx, cy) = block.center();
        match shape {
            Shape::Squares => {
                let side = s * ratio;
                surface.fill_rect(Rect::centered(cx, cy, side, side), &paint);
            }
            Shape::Circles => surface.fill_circle(cx, cy, s / 2.0 * ratio, &paint),
            Shape::VerticalLines => {
                let thickness = s * ratio;
                let rect = Rect::new(
                    cx - thickness / 2.0,
                    block.y as f32,
                    thickness,
                    block.height as f32,
                );
                surface.fill_rect(rect, &paint);
            }
            Shape::HorizontalLines => {
                let thickness = s * ratio;
                let rect = Rect::new(
                    block.x as f32,
                    cy - thickness / 2.0,
                    block.width as f32,
                    thickness,
                );
                surface.fill_rect(rect, &paint);
            }
        }
    }
    Ok(())
}

/// One ink dot of a CMYK cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub ink: Rgb,
}

pub const CYAN: Rgb = Rgb::new(0, 255, 255);
pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
pub const YELLOW: Rgb = Rgb::new(255, 255, 0);

/// The four ink dots for a cell of size `size` centered on `(cx, cy)`.
///
/// Dots sit on the cell diagonals at 0.2 × size from the center: cyan
/// top-left, magenta top-right, yellow bottom-left, black bottom-right.
pub fn cmyk_dots(cx: f32, cy: f32, size: f32, ink: Cmyk) -> [Dot; 4] {
    let d = size * 0.2;
    let half = size / 2.0;
    let cover = (1.0 - ink.k) as f32;
    let dot = |dx: f32, dy: f32, amount: f32, color: Rgb| Dot {
        cx: cx + dx,
        cy: cy + dy,
        radius: half * amount,
        ink: color,
    };
    [
        dot(-d, -d, ink.c as f32 * cover, CYAN),
        dot(d, -d, ink.m as f32 * cover, MAGENTA),
        dot(-d, d, ink.y as f32 * cover, YELLOW),
        dot(d, d, ink.k as f32, Rgb::BLACK),
    ]
}

fn run_cmyk(inv: &Invocation<'_>, surface: &mut dyn Surface) -> Result<(), EffectError> {
    let size = inv.size("blockSize")?;
    let source = inv.source();

    surface.fill(inv.color("backgroundColor")?);

    for block in blocks(source.width(), source.height(), size) {
        let ink = Cmyk::from(average_color(source, &block));
        let (cx, cy) = block.center();
        for dot in cmyk_dots(cx, cy, size as f32, ink) {
            if dot.radius > 0.0 {
                let paint = Paint::solid(dot.ink).blend(BlendMode::Darken);
                surface.fill_circle(dot.cx, dot.cy, dot.radius, &paint);
            }
        }
    }
    Ok(())
}
