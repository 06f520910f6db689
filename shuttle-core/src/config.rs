//! Factory presets: named automation strings per effect, loaded from TOML.
//!
//! The effect author ships a factory preset file (usually via `include_str!`);
//! a user file at `<config dir>/shuttle/presets.toml` can add presets or
//! override factory ones by name.
//!
//! ```toml
//! [effects.Amplify]
//! "Quiet" = 'Gain="-6.0" Mode="Slow"'
//! "Loud" = 'Gain="12.0"'
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::captured::{Effect, EffectParameterMethods};
use crate::command_parameters::{CommandParameters, ParseError};

#[derive(Deserialize, Default)]
struct PresetFile {
    #[serde(default)]
    effects: BTreeMap<String, BTreeMap<String, String>>,
}

/// Factory presets merged with the user's overrides.
#[derive(Debug, Clone, Default)]
pub struct PresetLibrary {
    effects: BTreeMap<String, BTreeMap<String, String>>,
}

impl PresetLibrary {
    /// Parse factory presets, then merge the user file if one exists.
    pub fn load(factory: &str) -> Result<Self, PresetError> {
        Self::load_with_user_file(factory, user_presets_path().as_deref())
    }

    /// Like [`load`](Self::load) with an explicit user file location.
    ///
    /// A missing user file is fine. An unreadable or malformed one is logged
    /// and ignored so a bad edit never hides the factory presets.
    pub fn load_with_user_file(factory: &str, user: Option<&Path>) -> Result<Self, PresetError> {
        let mut library = Self::from_toml(factory)?;

        if let Some(path) = user {
            if path.exists() {
                match std::fs::read_to_string(path) {
                    Ok(contents) => match toml::from_str::<PresetFile>(&contents) {
                        Ok(user) => library.merge(user.effects),
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed presets {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read presets {}: {}", path.display(), e)
                    }
                }
            }
        }

        Ok(library)
    }

    pub fn from_toml(text: &str) -> Result<Self, PresetError> {
        let file: PresetFile = toml::from_str(text).map_err(|e| PresetError::Toml(e.to_string()))?;
        Ok(Self {
            effects: file.effects,
        })
    }

    fn merge(&mut self, user: BTreeMap<String, BTreeMap<String, String>>) {
        for (effect, presets) in user {
            self.effects.entry(effect).or_default().extend(presets);
        }
    }

    /// Preset names for one effect, sorted.
    pub fn preset_names(&self, effect: &str) -> Vec<&str> {
        self.effects
            .get(effect)
            .map(|presets| presets.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn preset(&self, effect: &str, name: &str) -> Option<&str> {
        self.effects
            .get(effect)
            .and_then(|presets| presets.get(name))
            .map(String::as_str)
    }

    /// Look up a preset and set it on `instance`.
    ///
    /// Like any set, a rejected preset may leave leading parameters assigned.
    pub fn apply_preset<E, M>(
        &self,
        methods: &M,
        instance: &mut E,
        effect: &str,
        name: &str,
    ) -> Result<(), PresetError>
    where
        E: Effect,
        M: EffectParameterMethods<E> + ?Sized,
    {
        let text = self
            .preset(effect, name)
            .ok_or_else(|| PresetError::UnknownPreset {
                effect: effect.to_string(),
                name: name.to_string(),
            })?;
        let parms = CommandParameters::parse(text)?;
        if methods.set(instance, &parms) {
            Ok(())
        } else {
            Err(PresetError::Rejected {
                effect: effect.to_string(),
                name: name.to_string(),
            })
        }
    }
}

fn user_presets_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("shuttle").join("presets.toml"))
}

/// Error type for preset loading and application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    Toml(String),
    UnknownPreset { effect: String, name: String },
    Parse(ParseError),
    Rejected { effect: String, name: String },
}

impl From<ParseError> for PresetError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml(e) => write!(f, "invalid preset file: {}", e),
            Self::UnknownPreset { effect, name } => write!(f, "{} has no preset {:?}", effect, name),
            Self::Parse(e) => write!(f, "malformed preset: {}", e),
            Self::Rejected { effect, name } => {
                write!(f, "{} rejected preset {:?}", effect, name)
            }
        }
    }
}

impl std::error::Error for PresetError {}
