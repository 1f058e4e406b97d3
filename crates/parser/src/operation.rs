//! Operation handling shared by the OpenAPI and Swagger extractors
//!
//! The `info`, path item and operation shapes are identical in both formats
//! and are decoded by the same types here.
//!
//! Both formats describe operations the same way for our purposes: a
//! parameter list (possibly `$ref`-erenced), tags, a deprecation flag and an
//! optional security requirement that may override the document default.

use crate::lenient::{description_text, lenient, lenient_string};
use api_playground_common::{HttpMethod, ParamLocation, ParameterDescriptor};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Parameter as written in the source document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawParameter {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(rename = "in", deserialize_with = "lenient_string")]
    pub location: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub required: bool,

    /// Direct type (Swagger 2.0 non-body parameters)
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub param_type: Option<String>,

    pub description: Option<Value>,

    pub schema: Option<Value>,

    #[serde(rename = "$ref", deserialize_with = "lenient_string")]
    pub ref_path: Option<String>,
}

impl RawParameter {
    /// Declared type, falling back to the nested schema's type
    pub fn declared_type(&self) -> Option<String> {
        self.param_type.clone().or_else(|| {
            self.schema
                .as_ref()
                .and_then(|s| s.get("type"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
    }

    fn key(&self) -> Option<(&str, &str)> {
        Some((self.name.as_deref()?, self.location.as_deref()?))
    }
}

/// API information
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Info {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub version: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

/// Operations and shared parameters for one path
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathItem {
    #[serde(deserialize_with = "lenient")]
    pub get: Option<Operation>,

    #[serde(deserialize_with = "lenient")]
    pub post: Option<Operation>,

    #[serde(deserialize_with = "lenient")]
    pub put: Option<Operation>,

    #[serde(deserialize_with = "lenient")]
    pub patch: Option<Operation>,

    #[serde(deserialize_with = "lenient")]
    pub delete: Option<Operation>,

    #[serde(deserialize_with = "lenient")]
    pub head: Option<Operation>,

    #[serde(deserialize_with = "lenient")]
    pub options: Option<Operation>,

    /// Parameters shared by every operation on this path
    #[serde(deserialize_with = "lenient")]
    pub parameters: Vec<Value>,
}

impl PathItem {
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
        }
    }
}

/// HTTP operation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Operation {
    #[serde(rename = "operationId", deserialize_with = "lenient_string")]
    pub operation_id: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub summary: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub tags: Vec<String>,

    #[serde(deserialize_with = "lenient")]
    pub deprecated: bool,

    #[serde(deserialize_with = "lenient")]
    pub parameters: Vec<Value>,

    /// OpenAPI 3.x only; Swagger 2.0 carries bodies as `in: body` parameters
    #[serde(rename = "requestBody")]
    pub request_body: Option<Value>,

    pub responses: Option<Value>,

    /// `None` inherits the document default; `Some(vec![])` opts out
    #[serde(deserialize_with = "lenient")]
    pub security: Option<Vec<Value>>,
}

/// Resolves `$ref` parameters against a document's reusable parameter table
pub struct ParameterResolver<'a> {
    prefix: &'static str,
    table: Option<&'a Map<String, Value>>,
}

impl<'a> ParameterResolver<'a> {
    /// `prefix` is the JSON pointer prefix of the table, e.g. `#/parameters/`
    pub fn new(prefix: &'static str, table: Option<&'a Map<String, Value>>) -> Self {
        Self { prefix, table }
    }

    /// Decode a raw parameter value, following at most one level of `$ref`
    pub fn resolve(&self, value: &Value) -> Option<RawParameter> {
        let raw: RawParameter = serde_json::from_value(value.clone()).ok()?;
        let Some(ref_path) = raw.ref_path.as_deref() else {
            return Some(raw);
        };

        let target = ref_path
            .strip_prefix(self.prefix)
            .and_then(|name| self.table?.get(name));

        match target {
            Some(target) => serde_json::from_value(target.clone()).ok(),
            None => {
                warn!(reference = ref_path, "skipping unresolvable parameter reference");
                None
            }
        }
    }

    /// Effective parameters of an operation
    ///
    /// Path-level parameters come first, minus any the operation redeclares
    /// with the same name and location; operation parameters follow in
    /// declaration order.
    pub fn effective_parameters(
        &self,
        path_level: &[Value],
        operation_level: &[Value],
    ) -> Vec<ParameterDescriptor> {
        let operation: Vec<RawParameter> = operation_level
            .iter()
            .filter_map(|v| self.resolve(v))
            .collect();

        let inherited: Vec<RawParameter> = path_level
            .iter()
            .filter_map(|v| self.resolve(v))
            .filter(|p| {
                let key = p.key();
                !operation.iter().any(|op| key.is_some() && op.key() == key)
            })
            .collect();

        inherited
            .into_iter()
            .chain(operation)
            .filter_map(to_descriptor)
            .collect()
    }
}

/// Convert a decoded parameter, dropping ones without a name or a known location
pub fn to_descriptor(raw: RawParameter) -> Option<ParameterDescriptor> {
    let param_type = raw.declared_type();
    let name = raw.name?;
    let location = raw.location.as_deref().and_then(ParamLocation::from_source)?;

    Some(ParameterDescriptor {
        name,
        location,
        required: raw.required,
        param_type,
        description: raw.description.as_ref().and_then(description_text),
        schema: raw.schema,
    })
}

/// Whether an operation needs credentials
///
/// An operation-level requirement, when present, replaces the document
/// default entirely; an explicit empty list therefore opts out.
pub fn requires_auth(operation: Option<&[Value]>, document: Option<&[Value]>) -> bool {
    match operation {
        Some(requirements) => !requirements.is_empty(),
        None => document.is_some_and(|requirements| !requirements.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_item_method_lookup() {
        let item: PathItem = serde_json::from_value(json!({
            "get": {"summary": "read"},
            "head": {"summary": "peek"}
        }))
        .unwrap();

        assert!(item.operation(HttpMethod::Get).is_some());
        assert!(item.operation(HttpMethod::Head).is_some());
        assert!(item.operation(HttpMethod::Post).is_none());
    }

    #[test]
    fn test_explicit_empty_security_is_kept() {
        let op: Operation = serde_json::from_value(json!({"security": []})).unwrap();
        assert_eq!(op.security, Some(vec![]));

        let op: Operation = serde_json::from_value(json!({})).unwrap();
        assert_eq!(op.security, None);
    }

    #[test]
    fn test_requires_auth_override_rules() {
        let global = vec![json!({"api_key": []})];
        assert!(!requires_auth(None, None));
        assert!(requires_auth(None, Some(&global)));
        assert!(!requires_auth(Some(&[]), Some(&global)));
        assert!(requires_auth(Some(&[json!({})]), None));
    }

    #[test]
    fn test_resolve_reference() {
        let table = json!({
            "limit": {"name": "limit", "in": "query", "type": "integer"}
        });
        let resolver = ParameterResolver::new("#/parameters/", table.as_object());

        let param = resolver
            .resolve(&json!({"$ref": "#/parameters/limit"}))
            .unwrap();
        assert_eq!(param.name.as_deref(), Some("limit"));

        assert!(resolver
            .resolve(&json!({"$ref": "#/parameters/missing"}))
            .is_none());
    }

    #[test]
    fn test_operation_parameters_override_path_parameters() {
        let resolver = ParameterResolver::new("#/components/parameters/", None);
        let path_level = vec![
            json!({"name": "id", "in": "path", "required": true, "description": "inherited"}),
            json!({"name": "trace", "in": "header"}),
        ];
        let op_level = vec![json!({
            "name": "id", "in": "path", "required": true, "description": "override",
            "schema": {"type": "string"}
        })];

        let params = resolver.effective_parameters(&path_level, &op_level);
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "trace");
        assert_eq!(params[1].name, "id");
        assert_eq!(params[1].description.as_deref(), Some("override"));
        assert_eq!(params[1].param_type.as_deref(), Some("string"));
    }

    #[test]
    fn test_parameters_without_name_or_location_are_dropped() {
        let resolver = ParameterResolver::new("#/parameters/", None);
        let params = resolver.effective_parameters(
            &[],
            &[
                json!({"in": "query"}),
                json!({"name": "x", "in": "matrix"}),
                json!("not an object"),
                json!({"name": "ok", "in": "query"}),
            ],
        );
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "ok");
        assert!(!params[0].required);
    }
}
