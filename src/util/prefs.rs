use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
struct PreferenceData {
    flags: BTreeMap<String, i32>,
}

/// Named integer flags that survive level reloads and, when file-backed, process restarts.
///
/// Unset keys read as 0. Every [`set`](Preferences::set) on a file-backed store rewrites the
/// file immediately.
#[derive(Default, Debug, Clone)]
pub struct Preferences {
    path: Option<PathBuf>,
    data: PreferenceData,
}

impl Preferences {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the store at `path`. A missing file is an empty store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let bytes = fs::read(&path)
                .with_context(|| format!("could not read preferences from {}", path.display()))?;
            bincode::deserialize::<PreferenceData>(&bytes)
                .with_context(|| format!("corrupt preferences file {}", path.display()))?
        } else {
            PreferenceData::default()
        };
        info!(
            "loaded preferences from {}: [{}]",
            path.display(),
            data.flags.iter().map(|(k, v)| format!("{k}={v}")).join(", ")
        );
        Ok(Self { path: Some(path), data })
    }

    pub fn get(&self, key: &str) -> i32 {
        self.data.flags.get(key).copied().unwrap_or(0)
    }

    pub fn set(&mut self, key: &str, value: i32) -> Result<()> {
        self.data.flags.insert(key.to_string(), value);
        self.save()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        let bytes = bincode::serialize(&self.data).context("could not encode preferences")?;
        fs::write(path, bytes)
            .with_context(|| format!("could not write preferences to {}", path.display()))
    }
}
