//! Domain regression tests for pixfx-engine.
//!
//! Each test pins down a behavior callers rely on across the whole catalog,
//! and says what breaks if it fails.

#[cfg(test)]
mod domain_tests {
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::buffer::PixelBuffer;
    use crate::effects::blocks::{average_color, blocks};
    use crate::error::EffectError;
    use crate::params::{ParamSet, ParamValue};
    use crate::registry::catalog;
    use crate::surface::SoftSurface;
    use crate::{process, Rgb};

    fn random_buffer(width: u32, height: u32, seed: u64) -> PixelBuffer {
        let mut rng = StdRng::seed_from_u64(seed);
        let data = (0..width * height * 4).map(|_| rng.gen::<u8>()).collect();
        PixelBuffer::from_rgba(width, height, data).unwrap()
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// If this breaks, an effect returned a buffer of a different size than
    /// its input, and callers writing it back to the same canvas would
    /// corrupt or panic. Odd sizes make sure clipped blocks are covered.
    #[test]
    fn test_every_effect_preserves_geometry() {
        let source = random_buffer(37, 23, 1);
        for effect in catalog().list() {
            let out = process(effect.id, &source, &ParamSet::new())
                .unwrap_or_else(|e| panic!("{} failed: {e}", effect.id));
            assert_eq!(
                (out.width(), out.height(), out.as_bytes().len()),
                (37, 23, 37 * 23 * 4),
                "{} changed geometry",
                effect.id
            );
        }
    }

    /// If this breaks, an effect mutated its input instead of producing a
    /// new buffer, and the caller lost its original.
    #[test]
    fn test_source_is_never_modified() {
        let source = random_buffer(16, 16, 2);
        let copy = source.clone();
        for effect in catalog().list() {
            process(effect.id, &source, &ParamSet::new()).unwrap();
        }
        assert_eq!(source, copy);
    }

    /// If this breaks, a 1x1 image hit an edge case (width - 1 underflow,
    /// zero-size block) in one of the effects.
    #[test]
    fn test_single_pixel_image() {
        let source = PixelBuffer::filled(1, 1, [90, 180, 30, 255]).unwrap();
        for effect in catalog().list() {
            let out = process(effect.id, &source, &ParamSet::new()).unwrap();
            assert_eq!(out.as_bytes().len(), 4, "{}", effect.id);
        }
    }

    // ========================================================================
    // Block averaging
    // ========================================================================

    /// If this breaks, trailing blocks averaged over pixels outside the
    /// image (reading zeros or the next row), darkening the right and
    /// bottom edges.
    #[test]
    fn test_partial_blocks_average_in_bounds_only() {
        // 5x1 white, block size 4: second block holds a single white pixel
        let source = PixelBuffer::filled(5, 1, [255, 255, 255, 255]).unwrap();
        let all: Vec<_> = blocks(5, 1, 4).collect();
        assert_eq!(all.len(), 2);
        assert_eq!(average_color(&source, &all[1]), Rgb::WHITE);

        let out = process("pixelate", &source, &ParamSet::new().with("blockSize", 4)).unwrap();
        assert_eq!(out.pixel(4, 0), [255, 255, 255, 255]);
    }

    // ========================================================================
    // Thresholds
    // ========================================================================

    /// If this breaks, the threshold comparison stopped being strict or
    /// luminance lost exactness for gray input: 128 gray at level 128 must
    /// be black.
    #[test]
    fn test_mid_gray_threshold_scenario() {
        let source = PixelBuffer::filled(4, 4, [128, 128, 128, 200]).unwrap();
        let out = process("threshold", &source, &ParamSet::new().with("level", 128)).unwrap();
        assert!(out.pixels().all(|p| p == [0, 0, 0, 200]));

        let out = process("threshold", &source, &ParamSet::new().with("level", 127)).unwrap();
        assert!(out.pixels().all(|p| p == [255, 255, 255, 200]));
    }

    // ========================================================================
    // Dithering
    // ========================================================================

    /// If this breaks, palette dithering wrote colors outside the palette
    /// or touched alpha.
    #[test]
    fn test_palette_dither_only_palette_colors() {
        let source = random_buffer(50, 50, 3);
        let out = process("dither", &source, &ParamSet::new().with("palette", "cga")).unwrap();
        let palette = crate::named_palette("cga").unwrap();
        for (src, dst) in source.pixels().zip(out.pixels()) {
            assert!(palette.colors().contains(&Rgb::new(dst[0], dst[1], dst[2])));
            assert_eq!(src[3], dst[3]);
        }
    }

    /// If this breaks, two-color dithering used colors other than the two
    /// requested ones.
    #[test]
    fn test_two_tone_uses_requested_colors() {
        let source = random_buffer(24, 24, 4);
        let params = ParamSet::new()
            .with("darkColor", "#102030")
            .with("lightColor", "f0e0d0");
        let out = process("dither-bw", &source, &params).unwrap();
        for p in out.pixels() {
            let rgb = [p[0], p[1], p[2]];
            assert!(rgb == [0x10, 0x20, 0x30] || rgb == [0xf0, 0xe0, 0xd0], "{rgb:?}");
        }
    }

    // ========================================================================
    // CRT
    // ========================================================================

    /// If this breaks, the CRT displacement moved pixels or altered colors
    /// with all distortion turned off.
    #[test]
    fn test_crt_identity_without_distortion() {
        let mut source = random_buffer(20, 9, 5);
        for p in source.pixels_mut() {
            p[3] = 255;
        }
        let params = ParamSet::new()
            .with("amplitude", 0)
            .with("aberration", 0)
            .with("scanlineOpacity", 0.0)
            .with("glow", 0);
        assert_eq!(process("crt", &source, &params).unwrap(), source);
    }

    // ========================================================================
    // Parameter resolution
    // ========================================================================

    /// If this breaks, missing parameters were no longer filled from the
    /// declared defaults.
    #[test]
    fn test_missing_params_backfilled() {
        let source = random_buffer(12, 12, 6);
        let defaults: ParamSet = catalog()
            .lookup("halftone")
            .unwrap()
            .params
            .iter()
            .map(|spec| (spec.id.to_string(), spec.default_value()))
            .collect();
        assert_eq!(
            process("halftone", &source, &ParamSet::new()).unwrap(),
            process("halftone", &source, &defaults).unwrap()
        );
    }

    /// If this breaks, out-of-range numbers stopped being clamped to the
    /// declared bounds.
    #[test]
    fn test_out_of_range_numbers_clamped() {
        let source = random_buffer(70, 70, 7);
        assert_eq!(
            process("pixelate", &source, &ParamSet::new().with("blockSize", 1000)).unwrap(),
            process("pixelate", &source, &ParamSet::new().with("blockSize", 64)).unwrap()
        );
        assert_eq!(
            process("pixelate", &source, &ParamSet::new().with("blockSize", -3)).unwrap(),
            process("pixelate", &source, &ParamSet::new().with("blockSize", 2)).unwrap()
        );
    }

    /// If this breaks, a value of the wrong kind was silently coerced
    /// instead of being rejected.
    #[test]
    fn test_wrong_kind_rejected() {
        let source = random_buffer(4, 4, 8);
        let err = process("crt", &source, &ParamSet::new().with("scanlines", 1)).unwrap_err();
        assert!(matches!(err, EffectError::InvalidParam { ref param, .. } if param == "scanlines"));

        let err = process("dither", &source, &ParamSet::new().with("palette", "vga")).unwrap_err();
        assert!(matches!(err, EffectError::InvalidParam { ref param, .. } if param == "palette"));

        let err = process(
            "threshold",
            &source,
            &ParamSet::new().with("level", ParamValue::Number(f64::NAN)),
        )
        .unwrap_err();
        assert!(matches!(err, EffectError::InvalidParam { .. }));
    }

    /// If this breaks, a malformed color aborted the effect instead of
    /// falling back to the declared default.
    #[test]
    fn test_malformed_color_falls_back_to_default() {
        let source = PixelBuffer::filled(4, 4, [0, 0, 0, 255]).unwrap();
        let out = process(
            "dither-bw",
            &source,
            &ParamSet::new().with("darkColor", "not-a-color"),
        )
        .unwrap();
        assert!(out.pixels().all(|p| p == [0, 0, 0, 255]));
    }

    /// If this breaks, a `#`-less color made of digits (as YAML or a
    /// loosely parsed argument delivers it) was rejected as a number.
    #[test]
    fn test_digit_only_color_accepted() {
        let source = PixelBuffer::filled(4, 4, [0, 0, 0, 255]).unwrap();
        let out = process(
            "dither-bw",
            &source,
            &ParamSet::new().with("darkColor", ParamValue::Number(102030.0)),
        )
        .unwrap();
        assert!(out.pixels().all(|p| p == [0x10, 0x20, 0x30, 255]));
    }

    /// If this breaks, unknown keys started failing invocations.
    #[test]
    fn test_undeclared_keys_ignored() {
        let source = random_buffer(8, 8, 9);
        let params = ParamSet::new().with("level", 100).with("colour", "red");
        assert_eq!(
            process("threshold", &source, &params).unwrap(),
            process("threshold", &source, &ParamSet::new().with("level", 100)).unwrap()
        );
    }

    /// If this breaks, an unknown id fell back to some other effect.
    #[test]
    fn test_unknown_id_is_an_error() {
        let source = random_buffer(2, 2, 10);
        let mut surface = SoftSurface::new(2, 2);
        assert_eq!(
            catalog().process("sharpen", &source, &ParamSet::new(), &mut surface),
            Err(EffectError::UnknownEffect("sharpen".to_string()))
        );
    }

    /// If this breaks, the same invocation produced different output on
    /// repeated runs.
    #[test]
    fn test_effects_are_deterministic() {
        let source = random_buffer(19, 11, 11);
        for effect in catalog().list() {
            assert_eq!(
                process(effect.id, &source, &ParamSet::new()).unwrap(),
                process(effect.id, &source, &ParamSet::new()).unwrap(),
                "{}",
                effect.id
            );
        }
    }
}
