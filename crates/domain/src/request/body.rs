//! HTTP Request body types

use serde::{Deserialize, Serialize};

/// Language of a raw body, used for editor highlighting and the
/// `Content-Type` default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RawLanguage {
    /// Plain text
    #[default]
    Text,
    /// JSON document
    Json,
    /// XML document
    Xml,
}

impl RawLanguage {
    /// Maps an interchange language tag: `json`, `xml`, anything else is text.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "xml" => Self::Xml,
            _ => Self::Text,
        }
    }

    /// Returns the interchange language tag.
    #[must_use]
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    /// Infers the language from a `Content-Type` value.
    ///
    /// `application/json`, `application/problem+json` and friends are JSON;
    /// `*/xml` and `+xml` suffixes are XML; unparsable values are text.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Self {
        let Ok(parsed) = content_type.trim().parse::<mime::Mime>() else {
            return Self::Text;
        };
        if names_subtype(&parsed, mime::JSON) {
            Self::Json
        } else if names_subtype(&parsed, mime::XML) {
            Self::Xml
        } else {
            Self::Text
        }
    }

    /// Returns the default `Content-Type` for bodies of this language.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Json => "application/json",
            Self::Xml => "application/xml",
        }
    }
}

fn names_subtype(parsed: &mime::Mime, name: mime::Name<'_>) -> bool {
    parsed.subtype() == name || parsed.suffix() == Some(name)
}

/// A url-encoded form parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormParam {
    /// Parameter name
    pub key: String,
    /// Parameter value
    pub value: String,
    /// Whether the parameter is sent
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl FormParam {
    /// Creates an enabled parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }
}

/// A field in a multipart form-data body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormDataField {
    /// Text field.
    Text {
        /// Field name.
        key: String,
        /// Field value.
        value: String,
        /// Whether the field is sent.
        #[serde(default = "default_enabled")]
        enabled: bool,
    },
    /// File field.
    File {
        /// Field name.
        key: String,
        /// Path of the file to upload.
        src: String,
        /// Whether the field is sent.
        #[serde(default = "default_enabled")]
        enabled: bool,
    },
}

impl FormDataField {
    /// Creates an enabled text field.
    #[must_use]
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates an enabled file field.
    #[must_use]
    pub fn file(key: impl Into<String>, src: impl Into<String>) -> Self {
        Self::File {
            key: key.into(),
            src: src.into(),
            enabled: true,
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Text { key, .. } | Self::File { key, .. } => key,
        }
    }

    /// Returns whether the field is sent.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        match self {
            Self::Text { enabled, .. } | Self::File { enabled, .. } => *enabled,
        }
    }
}

/// Request body, discriminated by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// Multipart form data
    FormData {
        /// Form fields, text or file
        fields: Vec<FormDataField>,
    },
    /// Form URL encoded body
    UrlEncoded {
        /// Form parameters
        fields: Vec<FormParam>,
    },
    /// Raw text body
    Raw {
        /// Body text, stored verbatim
        content: String,
        /// Language tag
        language: RawLanguage,
    },
    /// Body read from a file
    File {
        /// Path of the file, if one was chosen
        src: Option<String>,
    },
}

impl RequestBody {
    /// Creates a raw JSON body.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self::Raw {
            content: content.into(),
            language: RawLanguage::Json,
        }
    }

    /// Creates a raw plain text body.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Raw {
            content: content.into(),
            language: RawLanguage::Text,
        }
    }

    /// Returns the interchange `mode` name, or `None` for an empty body.
    #[must_use]
    pub const fn mode(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::FormData { .. } => Some("formdata"),
            Self::UrlEncoded { .. } => Some("urlencoded"),
            Self::Raw { .. } => Some("raw"),
            Self::File { .. } => Some("file"),
        }
    }

    /// Returns whether there is no body.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the content type a request with this body should default to.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None | Self::File { .. } => None,
            Self::FormData { .. } => Some("multipart/form-data"),
            Self::UrlEncoded { .. } => Some("application/x-www-form-urlencoded"),
            Self::Raw { language, .. } => Some(language.content_type()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_language_from_tag() {
        assert_eq!(RawLanguage::from_tag("json"), RawLanguage::Json);
        assert_eq!(RawLanguage::from_tag("XML"), RawLanguage::Xml);
        assert_eq!(RawLanguage::from_tag("javascript"), RawLanguage::Text);
    }

    #[test]
    fn test_language_from_content_type() {
        assert_eq!(
            RawLanguage::from_content_type("application/json; charset=utf-8"),
            RawLanguage::Json
        );
        assert_eq!(
            RawLanguage::from_content_type("application/problem+json"),
            RawLanguage::Json
        );
        assert_eq!(RawLanguage::from_content_type("text/xml"), RawLanguage::Xml);
        assert_eq!(
            RawLanguage::from_content_type("application/atom+xml"),
            RawLanguage::Xml
        );
        assert_eq!(RawLanguage::from_content_type("text/html"), RawLanguage::Text);
        assert_eq!(RawLanguage::from_content_type("not a mime"), RawLanguage::Text);
    }

    #[test]
    fn test_json_body() {
        let body = RequestBody::json(r#"{"key": "value"}"#);
        assert_eq!(body.content_type(), Some("application/json"));
        assert_eq!(body.mode(), Some("raw"));
    }

    #[test]
    fn test_empty_body() {
        let body = RequestBody::default();
        assert!(body.is_none());
        assert_eq!(body.mode(), None);
        assert_eq!(body.content_type(), None);
    }

    #[test]
    fn test_form_data_field_accessors() {
        let text = FormDataField::text("username", "john");
        let file = FormDataField::file("avatar", "uploads/avatar.png");
        assert_eq!(text.key(), "username");
        assert_eq!(file.key(), "avatar");
        assert!(file.is_enabled());
    }
}
