//! Converts an OpenAPI spec to the normalized endpoint catalog

use super::types::{OpenApiSpec, PathItem};
use crate::operation::{requires_auth, ParameterResolver};
use api_playground_common::{
    DocumentMetadata, EndpointDescriptor, HttpMethod, NormalizedDocument, ParseOptions,
    SourceType, PLACEHOLDER_BASE_URL,
};
use tracing::{debug, warn};

const PARAMETER_REF_PREFIX: &str = "#/components/parameters/";

/// Convert OpenAPI spec to NormalizedDocument
pub fn convert_openapi_to_document(
    spec: &OpenApiSpec,
    options: &ParseOptions,
) -> NormalizedDocument {
    let base_url = spec
        .servers
        .first()
        .and_then(|server| server.resolved_url())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| PLACEHOLDER_BASE_URL.to_string());

    let endpoints = extract_endpoints(spec, options);
    debug!(
        base_url = %base_url,
        endpoints = endpoints.len(),
        "extracted OpenAPI document"
    );

    NormalizedDocument {
        base_url,
        endpoints,
        metadata: DocumentMetadata {
            title: spec.info.title.clone(),
            version: spec.info.version.clone(),
            description: spec.info.description.clone(),
            source_type: SourceType::OpenApi,
        },
    }
}

/// Walk path items in document order and emit admitted operations
fn extract_endpoints(spec: &OpenApiSpec, options: &ParseOptions) -> Vec<EndpointDescriptor> {
    let resolver = ParameterResolver::new(PARAMETER_REF_PREFIX, Some(&spec.components.parameters));
    let mut endpoints = Vec::new();

    for (path, raw_item) in &spec.paths {
        let item: PathItem = match serde_json::from_value(raw_item.clone()) {
            Ok(item) => item,
            Err(e) => {
                warn!(path = %path, error = %e, "skipping undecodable path item");
                continue;
            }
        };

        for method in HttpMethod::ALL {
            let Some(operation) = item.operation(method) else {
                continue;
            };

            if !options.admits(operation.deprecated, &operation.tags) {
                continue;
            }

            if endpoints.len() >= options.max_endpoints {
                warn!(
                    max_endpoints = options.max_endpoints,
                    "endpoint limit reached, returning partial OpenAPI catalog"
                );
                return endpoints;
            }

            endpoints.push(EndpointDescriptor {
                method,
                path: path.clone(),
                summary: operation.summary.clone(),
                description: operation.description.clone(),
                parameters: resolver.effective_parameters(&item.parameters, &operation.parameters),
                request_body: operation.request_body.clone(),
                responses: operation.responses.clone(),
                operation_id: operation.operation_id.clone(),
                tags: operation.tags.clone(),
                requires_auth: requires_auth(
                    operation.security.as_deref(),
                    spec.security.as_deref(),
                ),
            });
        }
    }

    endpoints
}
