//! Authorization configuration types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Authorization scheme of a collection, folder or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// Defer to the closest ancestor that has an auth of its own
    #[default]
    Inherit,
    /// Explicitly no authorization
    NoAuth,
    /// HTTP Basic
    Basic,
    /// Bearer token
    Bearer,
    /// API key in a header or query parameter
    ApiKey,
    /// `OAuth` 1.0
    OAuth1,
    /// `OAuth` 2.0
    OAuth2,
    /// HTTP Digest
    Digest,
    /// Hawk
    Hawk,
    /// NTLM
    Ntlm,
    /// AWS signature v4
    AwsV4,
    /// Akamai `EdgeGrid`
    EdgeGrid,
    /// JWT bearer
    Jwt,
    /// Atlassian ASAP
    Asap,
}

impl AuthType {
    /// Returns the scheme name used in the interchange format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inherit => "inherit",
            Self::NoAuth => "noauth",
            Self::Basic => "basic",
            Self::Bearer => "bearer",
            Self::ApiKey => "apikey",
            Self::OAuth1 => "oauth1",
            Self::OAuth2 => "oauth2",
            Self::Digest => "digest",
            Self::Hawk => "hawk",
            Self::Ntlm => "ntlm",
            Self::AwsV4 => "awsv4",
            Self::EdgeGrid => "edgegrid",
            Self::Jwt => "jwt",
            Self::Asap => "asap",
        }
    }

    /// Returns whether requests under this auth send credentials.
    #[must_use]
    pub const fn is_configured(self) -> bool {
        !matches!(self, Self::Inherit | Self::NoAuth)
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let ty = match s.to_ascii_lowercase().as_str() {
            "inherit" => Self::Inherit,
            "noauth" => Self::NoAuth,
            "basic" => Self::Basic,
            "bearer" => Self::Bearer,
            "apikey" => Self::ApiKey,
            "oauth1" => Self::OAuth1,
            "oauth2" => Self::OAuth2,
            "digest" => Self::Digest,
            "hawk" => Self::Hawk,
            "ntlm" => Self::Ntlm,
            "awsv4" => Self::AwsV4,
            "edgegrid" => Self::EdgeGrid,
            "jwt" => Self::Jwt,
            "asap" => Self::Asap,
            other => return Err(DomainError::UnknownAuthType(other.to_string())),
        };
        Ok(ty)
    }
}

/// One scheme-specific setting, e.g. `username` for basic auth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthAttribute {
    /// Attribute name
    pub key: String,
    /// Attribute value, may contain `{{variables}}`
    pub value: String,
    /// Declared value type (`string`, `boolean`, `number`, `any`)
    #[serde(default = "default_attr_type")]
    pub attr_type: String,
}

fn default_attr_type() -> String {
    "string".to_string()
}

impl AuthAttribute {
    /// Creates a string-typed attribute.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            attr_type: default_attr_type(),
        }
    }
}

/// Authorization settings: a scheme plus its ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Auth {
    /// Scheme
    pub auth_type: AuthType,
    /// Scheme-specific attributes, in document order
    #[serde(default)]
    pub attributes: Vec<AuthAttribute>,
}

impl Auth {
    /// Creates an auth of the given type with no attributes.
    #[must_use]
    pub const fn new(auth_type: AuthType) -> Self {
        Self {
            auth_type,
            attributes: Vec::new(),
        }
    }

    /// Creates an `inherit` auth.
    #[must_use]
    pub const fn inherit() -> Self {
        Self::new(AuthType::Inherit)
    }

    /// Creates a `noauth` auth.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(AuthType::NoAuth)
    }

    /// Creates a basic auth.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(AuthType::Basic)
            .with("username", username)
            .with("password", password)
    }

    /// Creates a bearer token auth.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::new(AuthType::Bearer).with("token", token)
    }

    /// Adds or replaces an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets an attribute, replacing the value of an existing key in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.key == key) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(AuthAttribute::new(key, value)),
        }
    }

    /// Returns the value of attribute `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    /// Returns true for `inherit`.
    #[must_use]
    pub const fn is_inherit(&self) -> bool {
        matches!(self.auth_type, AuthType::Inherit)
    }
}
