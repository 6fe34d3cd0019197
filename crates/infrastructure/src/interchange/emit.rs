//! Domain model to wire types.

use quire_domain::{
    Auth, Collection, FormDataField, Item, ItemKind, Request, RequestBody,
    SchemaVersion, Variable, VariableType,
};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use super::schema::{
    WireBody, WireBodyOptions, WireCollection, WireFileBody, WireFormDataParam, WireFormParam,
    WireHeader, WireInfo, WireItem, WireQueryParam, WireRawOptions, WireRequest, WireRequestForm,
    WireUrl, WireUrlParts, WireVariable,
};
use super::url::decompose;

/// Converts a [`Collection`] into its v2.1 document.
///
/// A collection without an id gets a fresh one.
pub fn collection(collection: &Collection) -> WireCollection {
    let postman_id = collection
        .postman_id
        .clone()
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    WireCollection {
        info: WireInfo {
            postman_id: Some(postman_id),
            name: collection.name.clone(),
            schema: Some(SchemaVersion::V2_1.url().to_string()),
        },
        item: collection.items.iter().map(item).collect(),
        auth: collection
            .auth
            .auth_type
            .is_configured()
            .then(|| auth(&collection.auth)),
        variable: variables(&collection.variables),
    }
}

fn item(item: &Item) -> WireItem {
    let mut wire = WireItem {
        name: item.name.clone(),
        variable: variables(&item.variables),
        ..WireItem::default()
    };
    // Inherit is the implicit default and is left out.
    let explicit_auth = item
        .auth
        .as_ref()
        .filter(|a| !a.is_inherit())
        .map(auth);

    match &item.kind {
        ItemKind::Folder(children) => {
            wire.item = Some(children.iter().map(self::item).collect());
            wire.auth = explicit_auth;
        }
        ItemKind::Request(request) => {
            let mut wire_request = self::request(request);
            wire_request.auth = explicit_auth;
            wire.request = Some(WireRequestForm::Full(wire_request));
        }
    }
    wire
}

fn request(request: &Request) -> WireRequest {
    WireRequest {
        auth: None,
        method: Some(request.method.as_str().to_string()),
        header: request
            .headers
            .all()
            .iter()
            .map(|h| WireHeader {
                key: h.key.clone(),
                value: h.value.clone(),
                disabled: !h.enabled,
            })
            .collect(),
        body: body(&request.body),
        url: Some(url(request)),
    }
}

fn body(body: &RequestBody) -> Option<WireBody> {
    let mut wire = WireBody {
        mode: body.mode().map(ToString::to_string),
        ..WireBody::default()
    };
    match body {
        RequestBody::None => return None,
        RequestBody::Raw { content, language } => {
            wire.raw = Some(content.clone());
            wire.options = Some(WireBodyOptions {
                raw: Some(WireRawOptions {
                    language: Some(language.as_tag().to_string()),
                }),
            });
        }
        RequestBody::UrlEncoded { fields } => {
            wire.urlencoded = Some(
                fields
                    .iter()
                    .map(|f| WireFormParam {
                        key: f.key.clone(),
                        value: f.value.clone(),
                        disabled: !f.enabled,
                    })
                    .collect(),
            );
        }
        RequestBody::FormData { fields } => {
            wire.formdata = Some(fields.iter().map(form_data_field).collect());
        }
        RequestBody::File { src } => {
            wire.file = Some(WireFileBody { src: src.clone() });
        }
    }
    Some(wire)
}

fn form_data_field(field: &FormDataField) -> WireFormDataParam {
    match field {
        FormDataField::Text {
            key,
            value,
            enabled,
        } => WireFormDataParam {
            key: key.clone(),
            value: Some(value.clone()),
            src: None,
            kind: Some("text".to_string()),
            disabled: !enabled,
        },
        FormDataField::File { key, src, enabled } => WireFormDataParam {
            key: key.clone(),
            value: None,
            src: Some(Value::String(src.clone())),
            kind: Some("file".to_string()),
            disabled: !enabled,
        },
    }
}

/// Builds the `url` object from the raw URL, keeping disabled arguments as
/// disabled query entries.
fn url(request: &Request) -> WireUrl {
    let parts = decompose(&request.url);
    let mut query: Vec<WireQueryParam> = parts
        .query
        .iter()
        .map(|(key, value)| WireQueryParam {
            key: Some((*key).to_string()),
            value: Some((*value).to_string()),
            disabled: false,
        })
        .collect();
    query.extend(
        request
            .query_args
            .iter()
            .filter(|arg| !arg.enabled)
            .map(|arg| WireQueryParam {
                key: Some(arg.key.clone()),
                value: Some(arg.value.clone()),
                disabled: true,
            }),
    );

    WireUrl::Parts(WireUrlParts {
        raw: Some(request.url.clone()),
        protocol: parts.protocol.map(ToString::to_string),
        host: parts.host.iter().map(ToString::to_string).collect(),
        port: parts.port.map(ToString::to_string),
        path: parts.path.iter().map(ToString::to_string).collect(),
        query,
        hash: parts.hash.map(ToString::to_string),
    })
}

/// Writes `{type, <type>: [{key, value, type}]}`.
///
/// Inherit and no-auth carry no attribute list.
pub fn auth(auth: &Auth) -> Value {
    let type_name = auth.auth_type.as_str();
    let mut object = Map::new();
    object.insert("type".to_string(), Value::from(type_name));
    if auth.auth_type.is_configured() {
        let attributes = auth
            .attributes
            .iter()
            .map(|a| {
                json!({
                    "key": a.key,
                    "value": typed_value(&a.value, &a.attr_type),
                    "type": a.attr_type,
                })
            })
            .collect();
        object.insert(type_name.to_string(), Value::Array(attributes));
    }
    Value::Object(object)
}

fn variables(variables: &[Variable]) -> Vec<WireVariable> {
    variables
        .iter()
        .map(|v| WireVariable {
            key: v.key.clone(),
            value: typed_value(&v.value, v.var_type.as_str()),
            kind: (v.var_type != VariableType::String).then(|| v.var_type.as_str().to_string()),
            name: v.name.clone(),
            system: v.system,
            disabled: v.disabled,
        })
        .collect()
}

/// Emits booleans and numbers as JSON scalars when the text parses as one.
fn typed_value(text: &str, kind: &str) -> Value {
    let parsed = match kind {
        "boolean" => text.parse::<bool>().ok().map(Value::Bool),
        "number" => serde_json::from_str::<serde_json::Number>(text)
            .ok()
            .map(Value::Number),
        _ => None,
    };
    parsed.unwrap_or_else(|| Value::from(text))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quire_domain::{AuthAttribute, AuthType, FormParam, QueryArg};

    #[test]
    fn test_info_gets_schema_and_generated_id() {
        let wire = collection(&Collection::new("Demo"));
        assert_eq!(wire.info.name, "Demo");
        assert_eq!(
            wire.info.schema.as_deref(),
            Some(SchemaVersion::V2_1.url())
        );
        assert!(Uuid::parse_str(wire.info.postman_id.as_deref().unwrap()).is_ok());
        assert!(wire.auth.is_none());
    }

    #[test]
    fn test_existing_id_is_kept() {
        let mut source = Collection::new("Demo");
        source.postman_id = Some("abc".to_string());
        assert_eq!(collection(&source).info.postman_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_top_level_auth_only_when_configured() {
        let mut source = Collection::new("Demo");
        source.auth = Auth::none();
        assert!(collection(&source).auth.is_none());

        source.auth = Auth::bearer("t");
        assert_eq!(
            collection(&source).auth,
            Some(json!({"type": "bearer", "bearer": [{"key": "token", "value": "t", "type": "string"}]}))
        );
    }

    #[test]
    fn test_typed_auth_attributes() {
        let mut auth = Auth::new(AuthType::Jwt);
        auth.attributes.push(AuthAttribute {
            key: "isSecretBase64Encoded".to_string(),
            value: "false".to_string(),
            attr_type: "boolean".to_string(),
        });
        assert_eq!(
            self::auth(&auth),
            json!({"type": "jwt", "jwt": [{"key": "isSecretBase64Encoded", "value": false, "type": "boolean"}]})
        );
    }

    #[test]
    fn test_request_auth_goes_inside_request() {
        let item = Item::request("r", Request::get("http://h")).with_auth(Auth::none());
        let wire = self::item(&item);
        assert!(wire.auth.is_none());
        let Some(WireRequestForm::Full(request)) = wire.request else {
            unreachable!("request items emit the full form");
        };
        assert_eq!(request.auth, Some(json!({"type": "noauth"})));
    }

    #[test]
    fn test_inherit_item_auth_is_omitted() {
        let folder = Item::folder("f", Vec::new()).with_auth(Auth::inherit());
        assert!(self::item(&folder).auth.is_none());
    }

    #[test]
    fn test_raw_body_carries_language_option() {
        let body = body(&RequestBody::json("{\"k\":1}")).unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"mode": "raw", "raw": "{\"k\":1}", "options": {"raw": {"language": "json"}}})
        );
        assert!(self::body(&RequestBody::None).is_none());
    }

    #[test]
    fn test_urlencoded_and_formdata_bodies() {
        let encoded = body(&RequestBody::UrlEncoded {
            fields: vec![FormParam::new("a", "1")],
        })
        .unwrap();
        assert_eq!(
            serde_json::to_value(&encoded).unwrap(),
            json!({"mode": "urlencoded", "urlencoded": [{"key": "a", "value": "1"}]})
        );

        let form = body(&RequestBody::FormData {
            fields: vec![
                FormDataField::text("t", "v"),
                FormDataField::file("f", "/x.bin"),
            ],
        })
        .unwrap();
        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            json!({"mode": "formdata", "formdata": [
                {"key": "t", "value": "v", "type": "text"},
                {"key": "f", "src": "/x.bin", "type": "file"}
            ]})
        );
    }

    #[test]
    fn test_url_object_is_decomposed() {
        let mut request = Request::get("https://api.example.com/a?x=1");
        request.query_args.push(QueryArg::disabled("y", "2"));
        assert_eq!(
            serde_json::to_value(url(&request)).unwrap(),
            json!({
                "raw": "https://api.example.com/a?x=1",
                "protocol": "https",
                "host": ["api", "example", "com"],
                "path": ["a"],
                "query": [
                    {"key": "x", "value": "1"},
                    {"key": "y", "value": "2", "disabled": true}
                ]
            })
        );
    }

    #[test]
    fn test_variable_types_round_to_json() {
        let wire = variables(&[
            Variable::new("s", "text"),
            Variable::new("n", "12").typed(VariableType::Number),
            Variable::new("b", "maybe").typed(VariableType::Boolean),
        ]);
        assert_eq!(wire[0].value, json!("text"));
        assert!(wire[0].kind.is_none());
        assert_eq!(wire[1].value, json!(12));
        assert_eq!(wire[2].value, json!("maybe"));
        assert_eq!(wire[2].kind.as_deref(), Some("boolean"));
    }
}
