//! Converts a Swagger 2.0 spec to the normalized endpoint catalog

use super::types::{PathItem, SwaggerSpec};
use crate::operation::{requires_auth, ParameterResolver};
use api_playground_common::{
    DocumentMetadata, EndpointDescriptor, HttpMethod, NormalizedDocument, ParamLocation,
    ParseOptions, SourceType,
};
use tracing::{debug, warn};

const PARAMETER_REF_PREFIX: &str = "#/parameters/";

/// Convert Swagger spec to NormalizedDocument
pub fn convert_swagger_to_document(
    spec: &SwaggerSpec,
    options: &ParseOptions,
) -> NormalizedDocument {
    let base_url = spec.base_url();
    let endpoints = extract_endpoints(spec, options);
    debug!(
        base_url = %base_url,
        endpoints = endpoints.len(),
        "extracted Swagger document"
    );

    NormalizedDocument {
        base_url,
        endpoints,
        metadata: DocumentMetadata {
            title: spec.info.title.clone(),
            version: spec.info.version.clone(),
            description: spec.info.description.clone(),
            source_type: SourceType::Swagger,
        },
    }
}

fn extract_endpoints(spec: &SwaggerSpec, options: &ParseOptions) -> Vec<EndpointDescriptor> {
    let resolver = ParameterResolver::new(PARAMETER_REF_PREFIX, Some(&spec.parameters));
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
                    "endpoint limit reached, returning partial Swagger catalog"
                );
                return endpoints;
            }

            let parameters = resolver.effective_parameters(&item.parameters, &operation.parameters);

            // Swagger carries the body schema on an `in: body` parameter
            let request_body = parameters
                .iter()
                .find(|p| p.location == ParamLocation::Body && p.schema.is_some())
                .and_then(|p| p.schema.clone());

            endpoints.push(EndpointDescriptor {
                method,
                path: path.clone(),
                summary: operation.summary.clone(),
                description: operation.description.clone(),
                parameters,
                request_body,
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
