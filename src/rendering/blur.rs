//! Separable box blur on RGBA8 pixel data.
//!
//! Three box passes approximate a gaussian. Used for shape shadows and the
//! presentation glow; the data is blurred as stored (premultiplied in a
//! tiny-skia pixmap), which keeps transparent edges from bleeding color.

/// Box radius whose three-pass blur approximates a gaussian of `sigma`.
///
/// Three passes of radius `r` have variance `r * (r + 1)`.
pub fn box_radius_for_sigma(sigma: f32) -> u32 {
    if sigma <= 0.0 {
        return 0;
    }
    (((1.0 + 4.0 * sigma * sigma).sqrt() - 1.0) / 2.0).round() as u32
}

/// Box radius for a canvas-style `blur` value (sigma = blur / 2).
pub fn radius_for_shadow(blur: f32) -> u32 {
    box_radius_for_sigma(blur / 2.0)
}

/// Three box passes of `radius` over all four channels.
pub fn gaussian_approx(data: &mut [u8], width: u32, height: u32, radius: u32) {
    for _ in 0..3 {
        box_blur(data, width, height, radius);
    }
}

/// One box blur pass: horizontal then vertical sliding window, edges
/// clamped.
pub fn box_blur(data: &mut [u8], width: u32, height: u32, radius: u32) {
    if radius == 0 || width == 0 || height == 0 {
        return;
    }
    debug_assert_eq!(data.len(), width as usize * height as usize * 4);

    let mut temp = vec![0u8; data.len()];
    let w = width as usize;
    let h = height as usize;

    // Horizontal pass: data -> temp
    for y in 0..h {
        let row = y * w;
        blur_line(data, &mut temp, w, radius, |i| (row + i) * 4);
    }

    // Vertical pass: temp -> data
    for x in 0..w {
        blur_line(&temp, data, h, radius, |i| (i * w + x) * 4);
    }
}

/// Blur `len` pixels along one line. `index(i)` maps the position on the
/// line to a byte offset.
fn blur_line(
    src: &[u8],
    dst: &mut [u8],
    len: usize,
    radius: u32,
    index: impl Fn(usize) -> usize,
) {
    let r = radius as i64;
    let last = len as i64 - 1;
    let div = (2 * radius + 1) as u32;
    let at = |i: i64| index(i.clamp(0, last) as usize);

    let mut sum = [0u32; 4];
    for i in -r..=r {
        let idx = at(i);
        for c in 0..4 {
            sum[c] += src[idx + c] as u32;
        }
    }

    for i in 0..len as i64 {
        let out = index(i as usize);
        for c in 0..4 {
            dst[out + c] = (sum[c] / div) as u8;
        }
        let leave = at(i - r);
        let enter = at(i + r + 1);
        for c in 0..4 {
            sum[c] = sum[c] - src[leave + c] as u32 + src[enter + c] as u32;
        }
    }
}
