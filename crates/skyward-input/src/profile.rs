//! Binding profiles and their persistence.
//!
//! A [`BindingProfile`] is a name-keyed snapshot of a [`BindingTable`]:
//!
//! ```json
//! {
//!   "contexts": {
//!     "gameplay": {
//!       "actions": {
//!         "thrust_forward": [
//!           { "device": "gamepad", "control": { "axis": "right_trigger" } },
//!           { "device": "keyboard", "key": "KeyW" }
//!         ]
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Stores implement [`BindingStore`]; the service only talks to the trait.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::binding::Binding;
use crate::binding_table::BindingTable;
use crate::context::InputContext;
use crate::error::{Error, Result};

/// Bindings of one context, keyed by action name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextProfile {
    #[serde(default)]
    pub actions: BTreeMap<String, Vec<Binding>>,
}

/// Serializable snapshot of a whole binding table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingProfile {
    #[serde(default)]
    pub contexts: BTreeMap<String, ContextProfile>,
}

/// Outcome of [`BindingProfile::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Bindings written into the table.
    pub bound: usize,
    /// Bindings refused because their list was full.
    pub dropped: usize,
    /// Context or action names that were not recognized.
    pub unknown: usize,
}

impl BindingProfile {
    /// Capture every non-empty binding list of `table`.
    #[must_use]
    pub fn from_table(table: &BindingTable) -> Self {
        let mut contexts = BTreeMap::new();
        for context in InputContext::ALL {
            let actions: BTreeMap<String, Vec<Binding>> = table
                .context_lists(context)
                .filter(|(_, list)| !list.is_empty())
                .map(|(action, list)| (action.name().to_owned(), list.iter().collect()))
                .collect();
            if !actions.is_empty() {
                contexts.insert(context.name().to_owned(), ContextProfile { actions });
            }
        }
        Self { contexts }
    }

    /// Replace the contents of `table` with this profile.
    ///
    /// Unknown context and action names are skipped with a warning. Bindings
    /// past a list's capacity are dropped.
    pub fn apply(&self, table: &mut BindingTable) -> ApplyReport {
        let mut report = ApplyReport::default();
        table.clear_all();

        for (context_name, context_profile) in &self.contexts {
            let Some(context) = InputContext::from_name(context_name) else {
                warn!(context = %context_name, "Unknown context in binding profile, skipping");
                report.unknown += 1;
                continue;
            };
            for (action_name, bindings) in &context_profile.actions {
                let Some(action) = Action::from_name(action_name) else {
                    warn!(action = %action_name, %context, "Unknown action in binding profile, skipping");
                    report.unknown += 1;
                    continue;
                };
                for binding in bindings {
                    if table.bind(action, context, *binding).is_ok() {
                        report.bound += 1;
                    } else {
                        report.dropped += 1;
                    }
                }
            }
        }

        debug!(?report, "Applied binding profile");
        report
    }

    /// Total number of bindings in the profile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contexts
            .values()
            .flat_map(|c| c.actions.values())
            .map(Vec::len)
            .sum()
    }

    /// Returns `true` if the profile holds no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a profile from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the profile as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Persistence collaborator for named binding profiles.
pub trait BindingStore {
    /// Store `profile` under `name`, replacing any previous one.
    fn save(&mut self, name: &str, profile: &BindingProfile) -> Result<()>;

    /// Fetch the profile stored under `name`.
    ///
    /// Returns [`Error::ProfileNotFound`] if there is none.
    fn load(&self, name: &str) -> Result<BindingProfile>;
}

/// Profiles kept in memory for the lifetime of the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBindingStore {
    profiles: HashMap<String, BindingProfile>,
}

impl MemoryBindingStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a profile named `name` is stored.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Number of stored profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` if no profile is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl BindingStore for MemoryBindingStore {
    fn save(&mut self, name: &str, profile: &BindingProfile) -> Result<()> {
        self.profiles.insert(name.to_owned(), profile.clone());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<BindingProfile> {
        self.profiles
            .get(name)
            .cloned()
            .ok_or_else(|| Error::ProfileNotFound(name.to_owned()))
    }
}

/// One pretty-printed JSON file per profile, `<root>/<name>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Store profiles under `root`. The directory is created on first save.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the profiles.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing the profile `name`.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !name.starts_with('.');
        if !valid {
            return Err(Error::InvalidProfileName(name.to_owned()));
        }
        Ok(self.root.join(format!("{name}.json")))
    }
}

impl BindingStore for JsonFileStore {
    fn save(&mut self, name: &str, profile: &BindingProfile) -> Result<()> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.root)?;

        let json = serde_json::to_vec_pretty(profile)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &path)?;

        info!(profile = name, path = %path.display(), "Saved binding profile");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<BindingProfile> {
        let path = self.path_for(name)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::ProfileNotFound(name.to_owned()));
            }
            Err(err) => return Err(err.into()),
        };
        let profile: BindingProfile = serde_json::from_slice(&bytes)?;
        info!(profile = name, path = %path.display(), "Loaded binding profile");
        Ok(profile)
    }
}
