//! Saved servers: `$XDG_CONFIG_HOME/pchealth/profiles.json`
//! (fallback `~/.config/pchealth/profiles.json`), mapping a name to a server URL and
//! the panels to hide for it.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, io, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ServerProfile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hide: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ServerProfile>,
    #[serde(default)]
    pub version: u32,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("pchealth")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pchealth")
    }
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

/// A missing or unreadable file is an empty profile set.
pub fn load_profiles() -> ProfilesFile {
    match fs::read_to_string(profiles_path()) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            tracing::warn!("ignoring corrupt profiles file: {e}");
            ProfilesFile::default()
        }),
        Err(_) => ProfilesFile::default(),
    }
}

pub fn save_profiles(p: &ProfilesFile) -> io::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p).map_err(io::Error::other)?;
    fs::write(path, data)
}

#[derive(Debug, PartialEq, Eq)]
pub enum Resolved {
    /// URL came from the command line.
    Direct(ServerProfile),
    /// URL came from a saved profile.
    Loaded(ServerProfile),
    /// Only a profile name that is not saved yet.
    UnknownProfile(String),
    /// Nothing given; offer the saved names.
    Choose(Vec<String>),
    /// Nothing given and nothing saved.
    Nothing,
}

pub struct ProfileRequest {
    pub profile_name: Option<String>,
    pub url: Option<String>,
    pub hide: Vec<String>,
}

impl ProfileRequest {
    pub fn resolve(self, pf: &ProfilesFile) -> Resolved {
        match (self.url, self.profile_name) {
            (Some(url), _) => Resolved::Direct(ServerProfile {
                url,
                hide: self.hide,
            }),
            (None, Some(name)) => match pf.profiles.get(&name) {
                Some(entry) => {
                    let mut entry = entry.clone();
                    // command line --hide wins over the saved list
                    if !self.hide.is_empty() {
                        entry.hide = self.hide;
                    }
                    Resolved::Loaded(entry)
                }
                None => Resolved::UnknownProfile(name),
            },
            (None, None) if pf.profiles.is_empty() => Resolved::Nothing,
            (None, None) => Resolved::Choose(pf.profiles.keys().cloned().collect()),
        }
    }
}
