use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Directory with extra font files for ASCII glyph rendering
    #[serde(default)]
    pub fonts_dir: Option<PathBuf>,

    /// Also load the fonts installed on the system
    #[serde(default = "default_true")]
    pub system_fonts: bool,

    /// Font family used for text glyphs
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Effect applied when the CLI is not given one
    #[serde(default = "default_effect")]
    pub default_effect: String,

    /// Re-compress written PNGs with oxipng
    #[serde(default)]
    pub optimize_png: bool,
}

fn default_true() -> bool {
    true
}

fn default_font_family() -> String {
    "monospace".to_string()
}

fn default_effect() -> String {
    "pixelate".to_string()
}

impl AppConfig {
    /// Load configuration from `path`.
    ///
    /// Without a path the defaults are used. A file that cannot be read or
    /// parsed is logged and also falls back to the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        path = %path.display(),
                        font_family = %config.font_family,
                        default_effect = %config.default_effect,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fonts_dir: None,
            system_fonts: true,
            font_family: default_font_family(),
            default_effect: default_effect(),
            optimize_png: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.fonts_dir, None);
        assert!(config.system_fonts);
        assert_eq!(config.font_family, "monospace");
        assert_eq!(config.default_effect, "pixelate");
        assert!(!config.optimize_png);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
fonts_dir: /usr/share/fonts/truetype/dejavu
system_fonts: false
font_family: DejaVu Sans Mono
default_effect: crt
optimize_png: true
"#;

        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(
            config.fonts_dir,
            Some(PathBuf::from("/usr/share/fonts/truetype/dejavu"))
        );
        assert!(!config.system_fonts);
        assert_eq!(config.font_family, "DejaVu Sans Mono");
        assert_eq!(config.default_effect, "crt");
        assert!(config.optimize_png);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("default_effect: ascii\n").unwrap();

        assert_eq!(config.default_effect, "ascii");
        assert!(config.system_fonts);
        assert_eq!(config.font_family, "monospace");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<AppConfig, _> = serde_yaml::from_str("screens: {}\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(AppConfig::load(None), AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "font_family: Courier").unwrap();

        let config = AppConfig::load(Some(file.path()));
        assert_eq!(config.font_family, "Courier");
    }

    #[test]
    fn test_load_falls_back_on_errors() {
        let missing = AppConfig::load(Some(Path::new("/nonexistent/pixfx.yaml")));
        assert_eq!(missing, AppConfig::default());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "system_fonts: [not, a, bool]").unwrap();
        assert_eq!(AppConfig::load(Some(file.path())), AppConfig::default());
    }
}
