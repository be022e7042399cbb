use std::path::Path;

use anyhow::Context as _;

use crate::{
    dock::transition::DockSettings,
    foundation::error::{SplashError, SplashResult},
    shapes::classify::ClassifyRules,
    timeline::{choreograph::ChoreographySettings, scene::Palette},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Every illustration-specific constant of a splash run.
///
/// All fields are optional in JSON; missing ones take the defaults tuned for the
/// shipped brand illustration.
pub struct SplashConfig {
    /// Filtering and zoning.
    pub rules: ClassifyRules,
    /// Role-tagging and paint colors.
    pub palette: Palette,
    /// Stage timing.
    pub choreography: ChoreographySettings,
    /// Closing transition.
    pub dock: DockSettings,
}

impl SplashConfig {
    /// Validate every section.
    pub fn validate(&self) -> SplashResult<()> {
        self.rules.validate()?;
        self.choreography.validate()?;
        self.dock.validate()?;
        if self.palette.ink.same_rgb(self.palette.negative_space) {
            return Err(SplashError::validation(
                "palette.ink and palette.negative_space must differ",
            ));
        }
        Ok(())
    }

    /// Decode and validate a JSON document.
    pub fn from_json_str(s: &str) -> SplashResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| SplashError::config(format!("{e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, decode and validate a JSON file.
    pub fn load(path: &Path) -> SplashResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
