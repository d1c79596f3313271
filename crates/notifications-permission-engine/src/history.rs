//! Memory of earlier prompts across app launches.
//!
//! Android does not tell a first denial apart from a repeated one, and it
//! reports "never asked" and "permanently denied" the same way. The flow
//! records what it saw here so later requests can tell them apart.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Failed to read history file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse history file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Store of earlier prompt outcomes.
pub trait PromptHistory {
    /// Whether a system prompt has been denied before.
    fn denied_before(&self) -> bool;

    /// Remember that the system prompt was denied.
    fn record_denial(&self);

    /// Whether Android has ever asked for a rationale for this permission.
    fn rationale_needed_before(&self) -> bool;

    /// Remember that `shouldShowRequestPermissionRationale` returned true.
    fn record_rationale_needed(&self);
}

/// Permanent denial as far as Android lets an app tell.
///
/// `shouldShowRequestPermissionRationale` is false both before the first
/// prompt and after the user blocked the prompt. Once it has been true, a
/// later false can only mean the latter. A true answer is recorded in
/// `history`.
pub fn derive_permanent_denial<H>(should_show_rationale: bool, history: &H) -> bool
where
    H: PromptHistory + ?Sized,
{
    if should_show_rationale {
        history.record_rationale_needed();
        return false;
    }
    history.rationale_needed_before()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HistoryState {
    #[serde(default)]
    denied_before: bool,
    #[serde(default)]
    rationale_needed_before: bool,
}

/// History kept for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    state: Mutex<HistoryState>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, HistoryState> {
        // Recover from poisoned mutex (another thread panicked while holding lock)
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PromptHistory for MemoryHistory {
    fn denied_before(&self) -> bool {
        self.state().denied_before
    }

    fn record_denial(&self) {
        self.state().denied_before = true;
    }

    fn rationale_needed_before(&self) -> bool {
        self.state().rationale_needed_before
    }

    fn record_rationale_needed(&self) {
        self.state().rationale_needed_before = true;
    }
}

/// History persisted as a small TOML file.
#[derive(Debug)]
pub struct FileHistory {
    path: PathBuf,
    state: Mutex<HistoryState>,
}

impl FileHistory {
    /// Open the history at `path`. A missing file is an empty history.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, HistoryError> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| HistoryError::Read {
                path: path.clone(),
                source,
            })?;
            toml::from_str(&content).map_err(|source| HistoryError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            HistoryState::default()
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn state(&self) -> HistoryState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Apply `change` and write the file if anything changed.
    fn update(&self, change: impl FnOnce(&mut HistoryState)) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let before = *state;
        change(&mut state);
        if *state == before {
            return;
        }
        if let Err(e) = self.save(*state) {
            log::warn!(
                "Failed to persist permission history to {}: {e}",
                self.path.display()
            );
        }
    }

    fn save(&self, state: HistoryState) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&state)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PromptHistory for FileHistory {
    fn denied_before(&self) -> bool {
        self.state().denied_before
    }

    fn record_denial(&self) {
        self.update(|state| state.denied_before = true);
    }

    fn rationale_needed_before(&self) -> bool {
        self.state().rationale_needed_before
    }

    fn record_rationale_needed(&self) {
        self.update(|state| state.rationale_needed_before = true);
    }
}

impl<T: PromptHistory + ?Sized> PromptHistory for &T {
    fn denied_before(&self) -> bool {
        (**self).denied_before()
    }

    fn record_denial(&self) {
        (**self).record_denial()
    }

    fn rationale_needed_before(&self) -> bool {
        (**self).rationale_needed_before()
    }

    fn record_rationale_needed(&self) {
        (**self).record_rationale_needed()
    }
}
