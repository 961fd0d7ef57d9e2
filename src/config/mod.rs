pub mod loader;

use std::collections::BTreeMap;
use std::path::PathBuf;

pub use loader::{config_path, load, load_from, save, save_to};
use serde::{Deserialize, Serialize};

use crate::command::CustomCommand;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Directory commands run in when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
    #[serde(default)]
    pub aliases: BTreeMap<String, CustomCommand>,
}

impl AppConfig {
    pub fn alias(&self, name: &str) -> Option<&CustomCommand> {
        self.aliases.get(name)
    }

    /// Insert or replace an alias, returning the previous definition.
    pub fn set_alias(&mut self, name: impl Into<String>, command: CustomCommand) -> Option<CustomCommand> {
        self.aliases.insert(name.into(), command)
    }

    pub fn remove_alias(&mut self, name: &str) -> Option<CustomCommand> {
        self.aliases.remove(name)
    }
}
