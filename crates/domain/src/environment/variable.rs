//! Collection and folder variables

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Declared type of a variable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    /// Free text
    #[default]
    String,
    /// `true` / `false`
    Boolean,
    /// Untyped
    Any,
    /// Numeric
    Number,
}

impl VariableType {
    /// Returns the interchange name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Any => "any",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariableType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "text" => Ok(Self::String),
            "boolean" => Ok(Self::Boolean),
            "any" => Ok(Self::Any),
            "number" => Ok(Self::Number),
            other => Err(DomainError::UnknownVariableType(other.to_string())),
        }
    }
}

/// A variable attached to a collection or folder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Variable {
    /// Name referenced as `{{key}}`
    pub key: String,
    /// Value, kept as text whatever the declared type
    #[serde(default)]
    pub value: String,
    /// Declared type
    #[serde(default)]
    pub var_type: VariableType,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the variable was generated by the tool rather than the user
    #[serde(default)]
    pub system: bool,
    /// Whether the variable is ignored during resolution
    #[serde(default)]
    pub disabled: bool,
}

impl Variable {
    /// Creates an enabled string variable.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Sets the declared type.
    #[must_use]
    pub const fn typed(mut self, var_type: VariableType) -> Self {
        self.var_type = var_type;
        self
    }

    /// Returns whether the variable takes part in resolution.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !self.disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_variable_type_parse() {
        assert_eq!("Boolean".parse::<VariableType>(), Ok(VariableType::Boolean));
        assert_eq!("text".parse::<VariableType>(), Ok(VariableType::String));
        assert!("date".parse::<VariableType>().is_err());
    }

    #[test]
    fn test_new_variable_defaults() {
        let var = Variable::new("base_url", "https://api.example.com");
        assert_eq!(var.var_type, VariableType::String);
        assert!(var.is_enabled());
        assert!(!var.system);
        assert_eq!(var.name, None);
    }
}
