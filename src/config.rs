use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::command::DEFAULT_HISTORY_LIMIT;
use crate::error::ConfigError;
use crate::text_box::{TextBoxTemplate, MAX_FONT_SIZE};

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "TEXT_CANVAS_CONFIG";

/// Fixed name of the exported image
pub const DEFAULT_EXPORT_FILE_NAME: &str = "editable_canvas.png";

/// Editor settings. Every field has a default, so a config file only needs
/// the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Directory the exported image is written to
    pub export_dir: PathBuf,
    pub export_file_name: String,
    /// Maximum number of undo steps
    pub history_limit: usize,
    /// Field values for newly added text boxes
    pub text_box: TextBoxTemplate,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600.0,
            canvas_height: 400.0,
            export_dir: PathBuf::from("."),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_owned(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            text_box: TextBoxTemplate::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load from the first CLI argument or `TEXT_CANVAS_CONFIG`, falling
    /// back to defaults when neither is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::args_os()
            .nth(1)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR))
            .map(PathBuf::from);

        match path {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(&self.export_file_name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.canvas_width >= 1.0 && self.canvas_height >= 1.0) {
            return Err(ConfigError::Invalid {
                field: "canvas_width/canvas_height",
                reason: format!("{}x{} is not a usable size", self.canvas_width, self.canvas_height),
            });
        }
        if self.export_file_name.is_empty() {
            return Err(ConfigError::Invalid {
                field: "export_file_name",
                reason: "must not be empty".to_owned(),
            });
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "history_limit",
                reason: "must keep at least one undo step".to_owned(),
            });
        }
        if !(1..=MAX_FONT_SIZE).contains(&self.text_box.font_size) {
            return Err(ConfigError::Invalid {
                field: "text_box.font_size",
                reason: format!("{} is outside 1..={}", self.text_box.font_size, MAX_FONT_SIZE),
            });
        }
        Ok(())
    }
}

/// Serde adapter storing a `Color32` as a `#rrggbb` / `#rrggbbaa` string.
pub(crate) mod hex_color {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color32::from_hex(&hex).map_err(|err| serde::de::Error::custom(format!("invalid color {hex:?}: {err:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, Pos2};

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = EditorConfig::from_json_str(r#"{ "canvas_width": 400 }"#).unwrap();
        assert_eq!(config.canvas_width, 400.0);
        assert_eq!(config.canvas_height, 400.0);
        assert_eq!(config.export_file_name, "editable_canvas.png");
        assert_eq!(config.text_box, TextBoxTemplate::default());
    }

    #[test]
    fn test_text_box_template_from_json() {
        let json = r##"{
            "text_box": {
                "text": "Hello",
                "color": "#ff0000",
                "font": "Courier New",
                "position": { "x": 10.0, "y": 30.0 }
            }
        }"##;
        let config = EditorConfig::from_json_str(json).unwrap();

        assert_eq!(config.text_box.text, "Hello");
        assert_eq!(config.text_box.color, Color32::from_rgb(255, 0, 0));
        assert_eq!(config.text_box.font, crate::text_box::FontFace::CourierNew);
        assert_eq!(config.text_box.position, Pos2::new(10.0, 30.0));
        assert_eq!(config.text_box.font_size, 20);
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let result = EditorConfig::from_json_str(r#"{ "text_box": { "color": "red" } }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_font_size_is_rejected() {
        let result = EditorConfig::from_json_str(r#"{ "text_box": { "font_size": 0 } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_zero_history_limit_is_rejected() {
        let result = EditorConfig::from_json_str(r#"{ "history_limit": 0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid { field: "history_limit", .. })));

        let config = EditorConfig::from_json_str(r#"{ "history_limit": 1 }"#).unwrap();
        assert_eq!(config.history_limit, 1);
    }

    #[test]
    fn test_export_path_joins_dir_and_name() {
        let config = EditorConfig {
            export_dir: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(config.export_path(), Path::new("out").join("editable_canvas.png"));
    }
}
