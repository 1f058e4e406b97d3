//! Template loading and filters

use api_playground_common::{EndpointDescriptor, PlaygroundError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

/// Name of the prompt fragment template
pub const CONTEXT_TEMPLATE: &str = "context.txt";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("endpoint_line", endpoint_line_filter);

    tera.add_raw_template(CONTEXT_TEMPLATE, include_str!("../templates/context.txt.tera"))
        .map_err(|e| {
            PlaygroundError::Template(format!("Failed to load {} template: {}", CONTEXT_TEMPLATE, e))
        })?;

    Ok(tera)
}

/// `METHOD path[ - summary][ (requires: a, b)]`
///
/// Only required parameters are listed.
pub fn endpoint_line(endpoint: &EndpointDescriptor) -> String {
    let mut line = format!("{} {}", endpoint.method, endpoint.path);

    if let Some(summary) = endpoint.summary.as_deref().map(str::trim) {
        if !summary.is_empty() {
            line.push_str(" - ");
            line.push_str(summary);
        }
    }

    let required = endpoint.required_parameter_names();
    if !required.is_empty() {
        line.push_str(&format!(" (requires: {})", required.join(", ")));
    }

    line
}

/// Filter rendering a serialized endpoint as one catalog line
fn endpoint_line_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let endpoint: EndpointDescriptor = serde_json::from_value(value.clone())
        .map_err(|e| tera::Error::msg(format!("endpoint_line filter expects an endpoint: {}", e)))?;

    Ok(Value::String(endpoint_line(&endpoint)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_playground_common::{HttpMethod, ParamLocation, ParameterDescriptor};

    fn param(name: &str, required: bool) -> ParameterDescriptor {
        ParameterDescriptor {
            name: name.to_string(),
            location: ParamLocation::Query,
            required,
            param_type: None,
            description: None,
            schema: None,
        }
    }

    #[test]
    fn test_endpoint_line_variants() {
        let mut endpoint = EndpointDescriptor::new(HttpMethod::Get, "/users");
        assert_eq!(endpoint_line(&endpoint), "GET /users");

        endpoint.summary = Some("List users".to_string());
        assert_eq!(endpoint_line(&endpoint), "GET /users - List users");

        endpoint.parameters = vec![param("org", true), param("page", false), param("team", true)];
        assert_eq!(
            endpoint_line(&endpoint),
            "GET /users - List users (requires: org, team)"
        );

        endpoint.summary = Some("   ".to_string());
        assert_eq!(endpoint_line(&endpoint), "GET /users (requires: org, team)");
    }

    #[test]
    fn test_filter_rejects_non_endpoints() {
        let result = endpoint_line_filter(&Value::String("nope".into()), &HashMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_templates_load() {
        let tera = load_templates().unwrap();
        assert!(tera.get_template_names().any(|n| n == CONTEXT_TEMPLATE));
    }
}
