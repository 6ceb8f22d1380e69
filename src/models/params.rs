//! Parameter sets from files and `key=value` arguments.

use std::path::Path;

use pixfx_engine::{EffectDefinition, ParamSet, ParamValue};

use crate::error::RenderError;

/// Read a parameter set from a YAML or JSON file. `.json` files are parsed
/// as JSON, everything else as YAML.
pub fn load_params_file(path: &Path) -> Result<ParamSet, RenderError> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let params: ParamSet = if is_json {
        serde_json::from_str(&content).map_err(|e| RenderError::Params(e.to_string()))?
    } else {
        serde_yaml::from_str(&content).map_err(|e| RenderError::Params(e.to_string()))?
    };
    tracing::debug!(path = %path.display(), count = params.len(), "Loaded params file");
    Ok(params)
}

/// Parse a `key=value` argument for `effect`.
///
/// Declared parameters are parsed as their declared kind, so `dotColor=000000`
/// stays a color. Undeclared keys become a boolean, a number, or text,
/// whichever fits first.
pub fn parse_param_arg(
    effect: &EffectDefinition,
    arg: &str,
) -> Result<(String, ParamValue), RenderError> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| RenderError::Params(format!("expected key=value, got '{arg}'")))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(RenderError::Params(format!("empty parameter name in '{arg}'")));
    }
    let value = match effect.param(key) {
        Some(spec) => spec.parse(value),
        None => ParamValue::parse_loose(value),
    };
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfx_engine::{catalog, PixelBuffer};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn effect(id: &str) -> &'static EffectDefinition {
        catalog().lookup(id).unwrap()
    }

    #[test]
    fn test_parse_param_arg() {
        let halftone = effect("halftone");
        assert_eq!(
            parse_param_arg(halftone, "blockSize=12").unwrap(),
            ("blockSize".to_string(), ParamValue::Number(12.0))
        );
        assert_eq!(
            parse_param_arg(halftone, "invert=true").unwrap(),
            ("invert".to_string(), ParamValue::Bool(true))
        );
        assert_eq!(
            parse_param_arg(halftone, "dotColor=#ff0000").unwrap(),
            ("dotColor".to_string(), ParamValue::Text("#ff0000".to_string()))
        );
        // only the first '=' splits
        assert_eq!(
            parse_param_arg(effect("ascii"), "symbols= .=#").unwrap(),
            ("symbols".to_string(), ParamValue::Text(" .=#".to_string()))
        );
    }

    #[test]
    fn test_parse_param_arg_keeps_digit_strings() {
        assert_eq!(
            parse_param_arg(effect("dither-bw"), "darkColor=000000").unwrap(),
            ("darkColor".to_string(), ParamValue::Text("000000".to_string()))
        );
        assert_eq!(
            parse_param_arg(effect("ascii"), "symbols=01").unwrap(),
            ("symbols".to_string(), ParamValue::Text("01".to_string()))
        );
        // undeclared keys fall back to loose parsing
        assert_eq!(
            parse_param_arg(effect("ascii"), "zoom=2").unwrap(),
            ("zoom".to_string(), ParamValue::Number(2.0))
        );
    }

    #[test]
    fn test_digit_only_color_applies() {
        let definition = effect("dither-bw");
        let params: ParamSet = ["darkColor=102030", "lightColor=f0e0d0"]
            .iter()
            .map(|arg| parse_param_arg(definition, arg))
            .collect::<Result<_, _>>()
            .unwrap();
        let source = PixelBuffer::filled(4, 4, [0, 0, 0, 255]).unwrap();

        let out = pixfx_engine::process("dither-bw", &source, &params).unwrap();
        assert!(out.pixels().all(|p| p == [0x10, 0x20, 0x30, 255]));
    }

    #[test]
    fn test_parse_param_arg_errors() {
        let pixelate = effect("pixelate");
        assert!(matches!(
            parse_param_arg(pixelate, "blockSize"),
            Err(RenderError::Params(_))
        ));
        assert!(matches!(
            parse_param_arg(pixelate, "=3"),
            Err(RenderError::Params(_))
        ));
    }

    #[test]
    fn test_load_yaml_params() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "blockSize: 16\ninvert: true\ndotColor: '#112233'").unwrap();

        let params = load_params_file(file.path()).unwrap();
        assert_eq!(params.get("blockSize"), Some(&ParamValue::Number(16.0)));
        assert_eq!(params.get("invert"), Some(&ParamValue::Bool(true)));
        assert_eq!(
            params.get("dotColor"),
            Some(&ParamValue::Text("#112233".to_string()))
        );
    }

    #[test]
    fn test_load_json_params() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"palette": "cga", "strength": 0.5}}"#).unwrap();

        let params = load_params_file(file.path()).unwrap();
        assert_eq!(params.get("strength"), Some(&ParamValue::Number(0.5)));
    }

    #[test]
    fn test_yaml_digit_only_color_applies() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "darkColor: 102030").unwrap();

        let params = load_params_file(file.path()).unwrap();
        assert_eq!(params.get("darkColor"), Some(&ParamValue::Number(102030.0)));

        let source = PixelBuffer::filled(2, 2, [0, 0, 0, 255]).unwrap();
        let out = pixfx_engine::process("dither-bw", &source, &params).unwrap();
        assert!(out.pixels().all(|p| p == [0x10, 0x20, 0x30, 255]));
    }

    #[test]
    fn test_load_invalid_params_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, "[1, 2").unwrap();
        assert!(matches!(
            load_params_file(file.path()),
            Err(RenderError::Params(_))
        ));
    }
}
