//! Wire types to domain model.

use std::str::FromStr;

use quire_domain::{
    Auth, AuthAttribute, AuthType, Collection, DomainError, FormDataField, FormParam, Header,
    Headers, HttpMethod, Item, QueryArg, RawLanguage, Request, RequestBody, SchemaVersion,
    Variable, VariableType,
};
use serde_json::Value;
use tracing::{debug, warn};

use super::schema::{
    WireBody, WireCollection, WireFormDataParam, WireItem, WireRequest, WireRequestForm, WireUrl,
    WireVariable,
};
use super::InterchangeError;
use super::url::reassemble;

/// Converts a decoded document into a [`Collection`].
///
/// Fails when folders nest deeper than `max_depth`; nothing is dropped.
pub fn collection(
    wire: WireCollection,
    max_depth: usize,
) -> Result<Collection, InterchangeError> {
    let WireCollection {
        info,
        item,
        auth,
        variable,
    } = wire;

    Ok(Collection {
        name: info.name,
        postman_id: info.postman_id,
        schema: info
            .schema
            .as_deref()
            .map(SchemaVersion::from_url)
            .unwrap_or_default(),
        // Absent top-level auth defers to nothing rather than staying unset.
        auth: auth.as_ref().and_then(auth_from).unwrap_or_else(Auth::inherit),
        variables: variables(variable),
        items: items(item, 1, max_depth)?,
    })
}

fn items(
    wire: Vec<WireItem>,
    depth: usize,
    max_depth: usize,
) -> Result<Vec<Item>, InterchangeError> {
    if depth > max_depth && !wire.is_empty() {
        warn!(depth, max_depth, "Collection nests deeper than the depth limit");
        return Err(InterchangeError::TooDeep { max: max_depth });
    }
    let mut parsed = Vec::with_capacity(wire.len());
    for entry in wire {
        parsed.extend(item(entry, depth, max_depth)?);
    }
    Ok(parsed)
}

fn item(wire: WireItem, depth: usize, max_depth: usize) -> Result<Option<Item>, InterchangeError> {
    let WireItem {
        name,
        item: children,
        request,
        auth,
        variable,
    } = wire;

    let mut parsed = match (request, children) {
        (Some(form), _) => {
            let (request, request_auth) = self::request(form);
            let mut parsed = Item::request(name, request);
            // Request-level auth wins over an item-level block.
            parsed.auth = request_auth.or_else(|| auth.as_ref().and_then(auth_from));
            parsed
        }
        (None, Some(children)) => {
            let mut parsed = Item::folder(name, items(children, depth + 1, max_depth)?);
            parsed.auth = auth.as_ref().and_then(auth_from);
            parsed
        }
        (None, None) => {
            warn!(name = %name, "Skipping item that is neither a folder nor a request");
            return Ok(None);
        }
    };
    parsed.variables = variables(variable);
    Ok(Some(parsed))
}

fn request(form: WireRequestForm) -> (Request, Option<Auth>) {
    match form {
        WireRequestForm::Url(url) => (Request::get(url), None),
        WireRequestForm::Full(wire) => {
            let WireRequest {
                auth,
                method,
                header,
                body,
                url,
            } = wire;

            let mut headers = Headers::new();
            for h in header {
                headers.add(Header {
                    key: h.key,
                    value: h.value,
                    enabled: !h.disabled,
                });
            }

            let mut request = Request {
                method: HttpMethod::parse_or_default(method.as_deref()),
                headers,
                ..Request::default()
            };
            request.body = body.map_or(RequestBody::None, |b| self::body(b, &request.headers));
            apply_url(&mut request, url);

            (request, auth.as_ref().and_then(auth_from))
        }
    }
}

/// Sets the raw URL, then appends disabled query parameters the raw string
/// cannot carry.
fn apply_url(request: &mut Request, url: Option<WireUrl>) {
    match url {
        None => {}
        Some(WireUrl::Raw(raw)) => request.set_url(raw),
        Some(WireUrl::Parts(parts)) => {
            let raw = parts.raw.clone().unwrap_or_else(|| {
                reassemble(
                    parts.protocol.as_deref(),
                    &parts.host,
                    parts.port.as_deref(),
                    &parts.path,
                    parts
                        .query
                        .iter()
                        .filter(|q| !q.disabled)
                        .filter_map(|q| Some((q.key.as_deref()?, q.value.as_deref()))),
                    parts.hash.as_deref(),
                )
            });
            request.set_url(raw);
            request.query_args.extend(
                parts
                    .query
                    .into_iter()
                    .filter(|q| q.disabled)
                    .filter_map(|q| Some(QueryArg::disabled(q.key?, q.value.unwrap_or_default()))),
            );
        }
    }
}

/// Picks the body kind from `mode`, falling back to whichever payload is
/// present.
fn body(wire: WireBody, headers: &Headers) -> RequestBody {
    let mode = wire.mode.clone().or_else(|| {
        [
            ("raw", wire.raw.is_some()),
            ("urlencoded", wire.urlencoded.is_some()),
            ("formdata", wire.formdata.is_some()),
            ("file", wire.file.is_some()),
        ]
        .into_iter()
        .find_map(|(mode, present)| present.then(|| mode.to_string()))
    });
    let Some(mode) = mode else {
        return RequestBody::None;
    };

    match mode.as_str() {
        "raw" => {
            let language = wire
                .options
                .and_then(|o| o.raw)
                .and_then(|r| r.language)
                .map(|tag| RawLanguage::from_tag(&tag))
                .or_else(|| headers.content_type().map(RawLanguage::from_content_type))
                .unwrap_or_default();
            RequestBody::Raw {
                content: wire.raw.unwrap_or_default(),
                language,
            }
        }
        "urlencoded" => RequestBody::UrlEncoded {
            fields: wire
                .urlencoded
                .unwrap_or_default()
                .into_iter()
                .map(|p| FormParam {
                    key: p.key,
                    value: p.value,
                    enabled: !p.disabled,
                })
                .collect(),
        },
        "formdata" => RequestBody::FormData {
            fields: wire
                .formdata
                .unwrap_or_default()
                .into_iter()
                .map(form_data_field)
                .collect(),
        },
        "file" => RequestBody::File {
            src: wire.file.and_then(|f| f.src),
        },
        other => {
            let err = DomainError::UnknownBodyMode(other.to_string());
            warn!(error = %err, "Body left empty");
            RequestBody::None
        }
    }
}

fn form_data_field(param: WireFormDataParam) -> FormDataField {
    let enabled = !param.disabled;
    if param.kind.as_deref() == Some("file") {
        let src = match param.src {
            Some(Value::String(src)) => src,
            Some(Value::Array(paths)) => paths
                .into_iter()
                .find_map(|p| match p {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .unwrap_or_default(),
            _ => String::new(),
        };
        FormDataField::File {
            key: param.key,
            src,
            enabled,
        }
    } else {
        FormDataField::Text {
            key: param.key,
            value: param.value.unwrap_or_default(),
            enabled,
        }
    }
}

/// Reads an auth block.
///
/// The v2.1 array form yields attributes; the v2.0 object form keeps only the
/// type. `null` and unknown types read as no auth block at all.
pub fn auth_from(value: &Value) -> Option<Auth> {
    let object = match value {
        Value::Null => return None,
        Value::Object(object) => object,
        other => {
            warn!(auth = %other, "Ignoring auth block that is not an object");
            return None;
        }
    };
    let Some(type_name) = object.get("type").and_then(Value::as_str) else {
        warn!("Ignoring auth block without a type");
        return None;
    };
    let auth_type = match AuthType::from_str(type_name) {
        Ok(auth_type) => auth_type,
        Err(err) => {
            warn!(error = %err, "Ignoring auth block");
            return None;
        }
    };

    let mut auth = Auth::new(auth_type);
    match object.get(type_name) {
        Some(Value::Array(entries)) => {
            auth.attributes = entries.iter().filter_map(auth_attribute).collect();
        }
        Some(Value::Object(_)) => {
            debug!(auth_type = %auth_type, "Auth attributes in object form are not extracted");
        }
        _ => {}
    }
    Some(auth)
}

fn auth_attribute(entry: &Value) -> Option<AuthAttribute> {
    let Some(key) = entry.get("key").and_then(Value::as_str) else {
        warn!(entry = %entry, "Skipping auth attribute without a key");
        return None;
    };
    let value = entry.get("value").unwrap_or(&Value::Null);
    let attr_type = entry
        .get("type")
        .and_then(Value::as_str)
        .map_or_else(|| json_kind(value).to_string(), ToString::to_string);

    Some(AuthAttribute {
        key: key.to_string(),
        value: value_text(value),
        attr_type,
    })
}

fn variables(wire: Vec<WireVariable>) -> Vec<Variable> {
    wire.into_iter().map(variable).collect()
}

fn variable(wire: WireVariable) -> Variable {
    let var_type = match wire.kind.as_deref() {
        None => VariableType::default(),
        Some(kind) => VariableType::from_str(kind).unwrap_or_else(|err| {
            warn!(key = %wire.key, error = %err, "Treating variable as string");
            VariableType::default()
        }),
    };
    Variable {
        value: value_text(&wire.value),
        key: wire.key,
        var_type,
        name: wire.name,
        system: wire.system,
        disabled: wire.disabled,
    }
}

/// Text form of a JSON scalar; structured values keep their JSON text.
fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::Null | Value::String(_) => "string",
        Value::Array(_) | Value::Object(_) => "any",
    }
}
