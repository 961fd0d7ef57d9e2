use serde::{Deserialize, Serialize};

use crate::command::ShellCommand;

/// A free-form command declared as plain data.
///
/// Also the shape of an alias in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCommand {
    pub program: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_arguments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
}

impl CustomCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            default_arguments: Vec::new(),
            success_message: None,
        }
    }

    #[must_use]
    pub fn default_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_arguments = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }
}

impl ShellCommand for CustomCommand {
    fn program(&self) -> &str {
        &self.program
    }

    fn default_arguments(&self) -> Vec<String> {
        self.default_arguments.clone()
    }

    fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let command = CustomCommand::new("cargo")
            .default_args(["build", "--release"])
            .with_success_message("Built");

        assert_eq!(ShellCommand::program(&command), "cargo");
        assert_eq!(ShellCommand::default_arguments(&command), ["build", "--release"]);
        assert_eq!(ShellCommand::success_message(&command), Some("Built"));
    }

    #[test]
    fn test_deserialize_with_optional_fields_missing() {
        let command: CustomCommand = toml::from_str(r#"program = "make""#).unwrap();
        assert_eq!(command, CustomCommand::new("make"));
    }
}
