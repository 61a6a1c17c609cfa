//! `formtext.toml` loading.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::FormError;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "formtext.toml";

/// Layout measurements in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    pub first_top: u32,
    pub row_step: u32,
    pub form_width: u32,
    pub editor_left: u32,
    pub editor_width: u32,
    pub control_height: u32,
    pub label_left: u32,
    pub label_width: u32,
    pub child_width: u32,
    pub child_height: u32,
    pub child_gap: u32,
    pub section_margin: u32,
    pub child_section_margin: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            first_top: 200,
            row_step: 400,
            form_width: 11500,
            editor_left: 2500,
            editor_width: 3000,
            control_height: 315,
            label_left: 500,
            label_width: 1800,
            child_width: 10000,
            child_height: 4000,
            child_gap: 200,
            section_margin: 500,
            child_section_margin: 4500,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), FormError> {
        let sizes = [
            ("row_step", self.row_step),
            ("form_width", self.form_width),
            ("editor_width", self.editor_width),
            ("control_height", self.control_height),
            ("label_width", self.label_width),
            ("child_width", self.child_width),
            ("child_height", self.child_height),
        ];
        for (key, value) in sizes {
            if value == 0 {
                return Err(FormError::InvalidConfig(
                    format!("layout.{key} must be greater than zero").into(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormsConfig {
    pub layout: LayoutConfig,
    pub output_dir: Option<PathBuf>,
}

impl FormsConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| FormError::io(path, err))?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Loads `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let path = path.as_ref();
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_contents(text: &str) -> Result<Self, FormError> {
        Self::parse(text, CONFIG_FILE_NAME)
    }

    fn parse(text: &str, origin: &str) -> Result<Self, FormError> {
        let raw: FormsToml = toml::from_str(text)
            .map_err(|err| FormError::InvalidConfig(format!("{origin}: {err}").into()))?;
        raw.into_config()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FormsToml {
    layout: LayoutSection,
    output: OutputSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct LayoutSection {
    first_top: u32,
    row_step: u32,
    form_width: u32,
    editor_left: u32,
    editor_width: u32,
    control_height: u32,
    label_left: u32,
    label_width: u32,
    child_width: u32,
    child_height: u32,
    child_gap: u32,
    section_margin: u32,
    child_section_margin: u32,
}

impl Default for LayoutSection {
    fn default() -> Self {
        let layout = LayoutConfig::default();
        Self {
            first_top: layout.first_top,
            row_step: layout.row_step,
            form_width: layout.form_width,
            editor_left: layout.editor_left,
            editor_width: layout.editor_width,
            control_height: layout.control_height,
            label_left: layout.label_left,
            label_width: layout.label_width,
            child_width: layout.child_width,
            child_height: layout.child_height,
            child_gap: layout.child_gap,
            section_margin: layout.section_margin,
            child_section_margin: layout.child_section_margin,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputSection {
    dir: Option<PathBuf>,
}

impl FormsToml {
    fn into_config(self) -> Result<FormsConfig, FormError> {
        let section = self.layout;
        let layout = LayoutConfig {
            first_top: section.first_top,
            row_step: section.row_step,
            form_width: section.form_width,
            editor_left: section.editor_left,
            editor_width: section.editor_width,
            control_height: section.control_height,
            label_left: section.label_left,
            label_width: section.label_width,
            child_width: section.child_width,
            child_height: section.child_height,
            child_gap: section.child_gap,
            section_margin: section.section_margin,
            child_section_margin: section.child_section_margin,
        };
        layout.validate()?;
        let output_dir = match self.output.dir {
            Some(dir) if dir.as_os_str().is_empty() => {
                return Err(FormError::InvalidConfig("output.dir must not be empty".into()))
            }
            other => other,
        };
        Ok(FormsConfig { layout, output_dir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(FormsConfig::from_contents("").unwrap(), FormsConfig::default());
    }

    #[test]
    fn partial_layout_keeps_other_defaults() {
        let config = FormsConfig::from_contents(
            "[layout]\nrow_step = 500\n\n[output]\ndir = \"forms\"\n",
        )
        .unwrap();
        assert_eq!(config.layout.row_step, 500);
        assert_eq!(config.layout.first_top, 200);
        assert_eq!(config.output_dir, Some(PathBuf::from("forms")));
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let err = FormsConfig::from_contents("[layout]\nrow_step = 0\n").unwrap_err();
        assert!(err.to_string().contains("layout.row_step"));
        assert!(FormsConfig::from_contents("[layout]\nchild_height = 0\n").is_err());
        assert!(FormsConfig::from_contents("[layout]\nfirst_top = 0\n").is_ok());
    }

    #[test]
    fn unreadable_syntax_is_invalid_config() {
        assert!(matches!(
            FormsConfig::from_contents("[layout\n"),
            Err(FormError::InvalidConfig(_))
        ));
    }

    #[test]
    fn explicit_path_errors_name_that_path() {
        let missing = std::env::temp_dir().join("formtext-config-missing-explicit.toml");
        let err = FormsConfig::load(&missing).unwrap_err();
        assert!(matches!(&err, FormError::Io { path, .. } if *path == missing));

        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        let broken = std::env::temp_dir().join(format!("formtext-other-{stamp}.toml"));
        std::fs::write(&broken, "[layout\n").unwrap();
        let err = FormsConfig::load(&broken).unwrap_err();
        std::fs::remove_file(&broken).ok();
        assert!(err.to_string().contains(&format!("formtext-other-{stamp}.toml")));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("formtext-config-does-not-exist.toml");
        assert_eq!(
            FormsConfig::load_or_default(path).unwrap(),
            FormsConfig::default()
        );
    }
}
