//! Integration test for the free-text extractor

use api_playground_common::{HttpMethod, ParseOptions, SourceType};
use api_playground_parser::{detect_format, parse_str, DocumentFormat, RawDocument};

const DOCS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Acme Reference</title></head>
<body>
  <p>All requests go to https://api.acme.test/v1 over TLS.</p>
  <h2>Users</h2>
  <pre>GET /v1/users</pre>
  <pre>POST /v1/users</pre>
  <pre>DELETE /v1/users/{id}.</pre>
  <p>Invoices live under <code>/api/v2/invoices</code>; see /v1/users again.</p>
  <link href="/static/site.css">
</body>
</html>"#;

#[test]
fn test_documentation_page() {
    assert_eq!(detect_format(RawDocument::Text(DOCS_PAGE)), DocumentFormat::Html);

    let doc = parse_str(DOCS_PAGE, &ParseOptions::default()).unwrap();

    assert_eq!(doc.base_url, "https://api.acme.test");
    assert_eq!(doc.metadata.title.as_deref(), Some("Acme Reference"));
    assert_eq!(doc.metadata.source_type, SourceType::Html);

    let found: Vec<(HttpMethod, &str)> = doc
        .endpoints
        .iter()
        .map(|e| (e.method, e.path.as_str()))
        .collect();

    assert_eq!(found[0], (HttpMethod::Get, "/v1/users"));
    assert_eq!(found[1], (HttpMethod::Post, "/v1/users"));
    assert_eq!(found[2], (HttpMethod::Delete, "/v1/users/{id}"));
    assert!(found.contains(&(HttpMethod::Get, "/api/v2/invoices")));
    assert!(
        !found.iter().any(|(_, p)| p.starts_with("/static")),
        "asset paths are not endpoints: {:?}",
        found
    );
}

#[test]
fn test_repeated_method_and_path_are_all_kept() {
    let text = "<pre>GET /users</pre> <p>Paginate with</p> <pre>GET /users</pre>";

    let doc = parse_str(text, &ParseOptions::default()).unwrap();
    let found: Vec<(HttpMethod, &str)> = doc
        .endpoints
        .iter()
        .map(|e| (e.method, e.path.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![(HttpMethod::Get, "/users"), (HttpMethod::Get, "/users")]
    );
}

#[test]
fn test_plain_text_without_endpoints() {
    let doc = parse_str("Nothing to see here.", &ParseOptions::default()).unwrap();
    assert!(doc.endpoints.is_empty());
    assert_eq!(doc.base_url, "https://api.example.com");
}

#[test]
fn test_arbitrary_text_never_fails() {
    let inputs = [
        "",
        "{",
        "<<<>>>",
        "GET",
        "GET /",
        "\u{0000}\u{FFFF} /ä/ö",
        "https://",
        "title: not an api",
    ];

    for input in inputs {
        let result = parse_str(input, &ParseOptions::default());
        assert!(result.is_ok(), "input {:?} failed: {:?}", input, result);
        assert!(result.unwrap().endpoints.len() <= 50);
    }
}
