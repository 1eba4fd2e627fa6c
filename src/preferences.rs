//! Device preferences persisted as a small JSON file next to the database.

use std::path::{Path, PathBuf};

use recipebook_user::Session;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub locale: String,
    #[serde(default)]
    pub theme: Theme,
    /// Signed-in user, kept until logout.
    #[serde(default)]
    pub session: Option<Session>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            locale: "en".to_owned(),
            theme: Theme::default(),
            session: None,
        }
    }
}

pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Stored preferences, or the defaults when nothing was saved yet.
    pub async fn load(&self) -> anyhow::Result<Preferences> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Preferences::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, preferences: &Preferences) -> anyhow::Result<()> {
        let bytes = serde_json::to_vec_pretty(preferences)?;
        tokio::fs::write(&self.path, bytes).await?;

        tracing::debug!(path = %self.path.display(), "preferences saved");

        Ok(())
    }
}
