//! Converts a Postman collection to the normalized endpoint catalog

use super::types::{auth_requirement, Item, KeyValue, PostmanCollection, RequestObject};
use crate::lenient::description_text;
use api_playground_common::{
    DocumentMetadata, EndpointDescriptor, HttpMethod, NormalizedDocument, ParamLocation,
    ParameterDescriptor, ParseOptions, SourceType, PLACEHOLDER_BASE_URL,
};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Convert Postman collection to NormalizedDocument
pub fn convert_postman_to_document(
    collection: &PostmanCollection,
    options: &ParseOptions,
) -> NormalizedDocument {
    let root = Scope {
        folder: None,
        requires_auth: auth_requirement(collection.auth.as_ref()).unwrap_or(false),
    };

    let traversal = walk_items(&collection.item, &root, options, Traversal::default());
    if traversal.truncated {
        warn!(
            max_endpoints = options.max_endpoints,
            "endpoint limit reached, returning partial Postman catalog"
        );
    }

    // A declared variable always wins; otherwise the first absolute URL seen
    let base_url = collection
        .base_url_variable()
        .map(str::to_string)
        .or(traversal.first_origin)
        .unwrap_or_else(|| PLACEHOLDER_BASE_URL.to_string());

    debug!(
        base_url = %base_url,
        endpoints = traversal.endpoints.len(),
        "extracted Postman collection"
    );

    NormalizedDocument {
        base_url,
        endpoints: traversal.endpoints,
        metadata: DocumentMetadata {
            title: collection.info.name.clone(),
            version: collection.info.version.clone(),
            description: collection.info.description.as_ref().and_then(description_text),
            source_type: SourceType::Postman,
        },
    }
}

/// Inherited settings for a subtree
struct Scope<'a> {
    /// Nearest enclosing folder name
    folder: Option<&'a str>,
    requires_auth: bool,
}

/// Accumulated traversal state, threaded through the recursion by value
#[derive(Default)]
struct Traversal {
    endpoints: Vec<EndpointDescriptor>,
    first_origin: Option<String>,
    truncated: bool,
}

/// Depth-first, pre-order walk over the item tree
fn walk_items(
    items: &[Value],
    scope: &Scope<'_>,
    options: &ParseOptions,
    mut acc: Traversal,
) -> Traversal {
    for raw in items {
        if acc.endpoints.len() >= options.max_endpoints {
            acc.truncated = true;
            return acc;
        }

        let item: Item = match serde_json::from_value(raw.clone()) {
            Ok(item) => item,
            Err(e) => {
                warn!(error = %e, "skipping undecodable Postman item");
                continue;
            }
        };

        let item_auth = auth_requirement(item.auth.as_ref()).unwrap_or(scope.requires_auth);

        if let Some(children) = &item.item {
            let child_scope = Scope {
                folder: item.name.as_deref().or(scope.folder),
                requires_auth: item_auth,
            };
            acc = walk_items(children, &child_scope, options, acc);
            if acc.truncated {
                return acc;
            }
            continue;
        }

        let Some(request) = &item.request else {
            continue;
        };

        if let Some((endpoint, origin)) = convert_request(&item, request, scope, item_auth) {
            if acc.first_origin.is_none() {
                acc.first_origin = origin;
            }
            acc.endpoints.push(endpoint);
        }
    }

    acc
}

/// Build one endpoint from a request leaf, with the URL's origin if it parsed
fn convert_request(
    item: &Item,
    request: &Value,
    scope: &Scope<'_>,
    inherited_auth: bool,
) -> Option<(EndpointDescriptor, Option<String>)> {
    let request: RequestObject = match request {
        Value::String(url) => RequestObject {
            url: Some(Value::String(url.clone())),
            ..Default::default()
        },
        other => serde_json::from_value(other.clone()).ok()?,
    };

    let method = match request.method.as_deref().map(str::trim) {
        None | Some("") => HttpMethod::Get,
        Some(raw) => match raw.parse::<HttpMethod>() {
            Ok(method) => method,
            Err(_) => {
                warn!(method = raw, "skipping request with unsupported method");
                return None;
            }
        },
    };

    let Some(raw_url) = request.url.as_ref().and_then(url_text) else {
        warn!(name = ?item.name, "skipping request without a URL");
        return None;
    };

    let (path, origin) = match Url::parse(&raw_url) {
        Ok(url) => {
            let origin = url.origin();
            let origin = origin.is_tuple().then(|| origin.ascii_serialization());
            (url.path().to_string(), origin)
        }
        Err(_) => (raw_url, None),
    };

    let mut parameters: Vec<ParameterDescriptor> = request
        .header
        .iter()
        .filter_map(|h| key_value_parameter(h, ParamLocation::Header))
        .collect();
    parameters.extend(
        query_entries(request.url.as_ref())
            .iter()
            .filter_map(|q| key_value_parameter(q, ParamLocation::Query)),
    );

    let description = request
        .description
        .as_ref()
        .and_then(description_text)
        .or_else(|| item.description.as_ref().and_then(description_text));

    let responses = (!item.response.is_empty()).then(|| Value::Array(item.response.clone()));

    let endpoint = EndpointDescriptor {
        method,
        path,
        summary: item.name.clone(),
        description,
        parameters,
        request_body: request.body.clone(),
        responses,
        operation_id: None,
        tags: scope.folder.map(|f| vec![f.to_string()]).unwrap_or_default(),
        requires_auth: auth_requirement(request.auth.as_ref()).unwrap_or(inherited_auth),
    };

    Some((endpoint, origin))
}

/// URL text from a raw string or a structured URL object's `raw`
fn url_text(url: &Value) -> Option<String> {
    match url {
        Value::String(raw) => Some(raw.clone()),
        Value::Object(map) => map.get("raw").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Query entries of a structured URL object
fn query_entries(url: Option<&Value>) -> Vec<KeyValue> {
    url.and_then(|u| u.get("query"))
        .and_then(|q| serde_json::from_value(q.clone()).ok())
        .unwrap_or_default()
}

fn key_value_parameter(entry: &KeyValue, location: ParamLocation) -> Option<ParameterDescriptor> {
    if entry.disabled {
        return None;
    }

    Some(ParameterDescriptor {
        name: entry.key.clone().filter(|k| !k.is_empty())?,
        location,
        required: false,
        param_type: Some("string".to_string()),
        description: entry.description.as_ref().and_then(description_text),
        schema: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn convert(value: Value, options: &ParseOptions) -> NormalizedDocument {
        let collection: PostmanCollection = serde_json::from_value(value).unwrap();
        convert_postman_to_document(&collection, options)
    }

    #[test]
    fn test_bare_string_request_defaults_to_get() {
        let doc = convert(
            json!({
                "info": {"_postman_id": "1"},
                "item": [{"name": "Ping", "request": "https://api.demo.test/ping"}]
            }),
            &ParseOptions::default(),
        );

        assert_eq!(doc.endpoints[0].method, HttpMethod::Get);
        assert_eq!(doc.endpoints[0].path, "/ping");
        assert_eq!(doc.base_url, "https://api.demo.test");
    }

    #[test]
    fn test_unparseable_url_is_kept_verbatim() {
        let doc = convert(
            json!({
                "info": {"_postman_id": "1"},
                "item": [{
                    "name": "Templated",
                    "request": {"method": "post", "url": {"raw": "{{host}}/orders"}}
                }]
            }),
            &ParseOptions::default(),
        );

        assert_eq!(doc.endpoints[0].method, HttpMethod::Post);
        assert_eq!(doc.endpoints[0].path, "{{host}}/orders");
        assert_eq!(doc.base_url, PLACEHOLDER_BASE_URL);
    }

    #[test]
    fn test_first_origin_wins() {
        let doc = convert(
            json!({
                "info": {"_postman_id": "1"},
                "item": [
                    {"name": "a", "request": "https://first.test/a"},
                    {"name": "b", "request": "https://second.test/b"}
                ]
            }),
            &ParseOptions::default(),
        );

        assert_eq!(doc.base_url, "https://first.test");
    }

    #[test]
    fn test_variable_beats_discovered_origin() {
        let doc = convert(
            json!({
                "info": {"_postman_id": "1"},
                "variable": [{"key": "baseUrl", "value": "https://declared.test/v1"}],
                "item": [{"name": "a", "request": "https://other.test/a"}]
            }),
            &ParseOptions::default(),
        );

        assert_eq!(doc.base_url, "https://declared.test/v1");
    }

    #[test]
    fn test_disabled_headers_and_query_are_dropped() {
        let doc = convert(
            json!({
                "info": {"_postman_id": "1"},
                "item": [{
                    "name": "Search",
                    "request": {
                        "method": "GET",
                        "header": [
                            {"key": "Accept", "value": "application/json"},
                            {"key": "X-Debug", "value": "1", "disabled": true}
                        ],
                        "url": {
                            "raw": "https://api.demo.test/search?q=x&page=2",
                            "query": [
                                {"key": "q", "value": "x", "description": "terms"},
                                {"key": "page", "value": "2", "disabled": true}
                            ]
                        }
                    }
                }]
            }),
            &ParseOptions::default(),
        );

        let params = &doc.endpoints[0].parameters;
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "Accept");
        assert_eq!(params[0].location, ParamLocation::Header);
        assert_eq!(params[1].name, "q");
        assert_eq!(params[1].location, ParamLocation::Query);
        assert_eq!(params[1].description.as_deref(), Some("terms"));
        assert!(params.iter().all(|p| !p.required));
        assert!(params
            .iter()
            .all(|p| p.param_type.as_deref() == Some("string")));
    }

    #[test]
    fn test_auth_inheritance() {
        let doc = convert(
            json!({
                "info": {"_postman_id": "1"},
                "auth": {"type": "bearer"},
                "item": [
                    {"name": "inherits", "request": "https://x.test/a"},
                    {
                        "name": "Public",
                        "auth": {"type": "noauth"},
                        "item": [
                            {"name": "open", "request": "https://x.test/b"},
                            {
                                "name": "own",
                                "request": {"url": "https://x.test/c", "auth": {"type": "apikey"}}
                            }
                        ]
                    }
                ]
            }),
            &ParseOptions::default(),
        );

        let auth: Vec<bool> = doc.endpoints.iter().map(|e| e.requires_auth).collect();
        assert_eq!(auth, vec![true, false, true]);
    }

    #[test]
    fn test_description_falls_back_to_item() {
        let doc = convert(
            json!({
                "info": {"_postman_id": "1"},
                "item": [
                    {
                        "name": "a",
                        "description": "item level",
                        "request": {"url": "https://x.test/a", "description": "request level"}
                    },
                    {
                        "name": "b",
                        "description": {"content": "item only"},
                        "request": {"url": "https://x.test/b"}
                    }
                ]
            }),
            &ParseOptions::default(),
        );

        assert_eq!(doc.endpoints[0].description.as_deref(), Some("request level"));
        assert_eq!(doc.endpoints[1].description.as_deref(), Some("item only"));
    }
}
