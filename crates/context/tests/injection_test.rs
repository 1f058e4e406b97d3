//! End-to-end: documentation text to prompt fragment

use api_playground_common::{ContextSource, InjectionSettings, ParseOptions};
use api_playground_context::{
    estimate_tokens, format_for_prompt_injection, is_too_large_for_injection,
    save_and_activate, trim_to_endpoint_limit, ApiContext, ContextFormatter, ContextStore,
    MemoryContextStore,
};
use api_playground_parser::RawDocument;

const USERS_API: &str = r##"{
    "openapi": "3.0.0",
    "info": {"title": "Users", "version": "1.0", "description": "Manage users and teams"},
    "servers": [{"url": "https://api.x.com"}],
    "paths": {
        "/users": {
            "get": {"summary": "List users", "tags": ["users"]},
            "post": {
                "summary": "Create user",
                "tags": ["users"],
                "parameters": [
                    {"name": "X-Org", "in": "header", "required": true},
                    {"name": "dryRun", "in": "query"}
                ]
            }
        },
        "/users/{id}": {
            "parameters": [{"name": "id", "in": "path", "required": true}],
            "delete": {"security": [{}], "tags": ["users"]}
        },
        "/health": {"get": {"summary": "Liveness"}},
        "/teams": {"get": {"summary": "List teams", "tags": ["teams"]}}
    }
}"##;

fn users_context() -> ApiContext {
    ApiContext::from_documentation(
        "Users API",
        ContextSource::Url("https://docs.x.com/openapi.json".to_string()),
        RawDocument::Text(USERS_API),
        &ParseOptions::default(),
    )
    .unwrap()
}

#[test]
fn test_prompt_fragment() {
    let text = format_for_prompt_injection(&users_context()).unwrap();

    let expected = "\
API Context: Users API
Base URL: https://api.x.com
Description: Manage users and teams

users:
- GET /users - List users
- POST /users - Create user (requires: X-Org)
- DELETE /users/{id} (requires: id)

General:
- GET /health - Liveness

teams:
- GET /teams - List teams
";
    assert_eq!(text, expected);
}

#[test]
fn test_large_context_is_too_large() {
    let mut ctx = users_context();
    ctx.document.metadata.description = Some("d".repeat(1000));

    let text = format_for_prompt_injection(&ctx).unwrap();
    assert!(text.chars().count() >= 1000);
    assert!(estimate_tokens(&text) >= 250);

    assert!(is_too_large_for_injection(&ctx, 10).unwrap());
    assert!(!is_too_large_for_injection(&ctx, 2000).unwrap());
}

#[test]
fn test_token_estimate_scales_linearly() {
    let short = estimate_tokens(&"a".repeat(400));
    let long = estimate_tokens(&"a".repeat(4000));
    assert_eq!(short, 100);
    assert_eq!(long, 10 * short);
}

#[test]
fn test_budget_trims_endpoints() {
    let ctx = users_context();
    let formatter = ContextFormatter::new(InjectionSettings {
        max_tokens: 20,
        trim_to: 2,
        ..Default::default()
    })
    .unwrap();

    assert!(formatter.is_too_large(&ctx, 20).unwrap());

    let text = formatter.format_within_budget(&ctx).unwrap();
    assert!(text.contains("- GET /users - List users"));
    assert!(text.contains("- POST /users"));
    assert!(!text.contains("/teams"));

    let trimmed = trim_to_endpoint_limit(&ctx.document, 2);
    assert_eq!(trimmed.endpoints[..], ctx.document.endpoints[..2]);
}

#[test]
fn test_redaction_toggle() {
    let mut ctx = users_context();
    ctx.document.metadata.description = Some("Send Authorization: Bearer abc.def.ghi".to_string());

    let redacted = format_for_prompt_injection(&ctx).unwrap();
    assert!(redacted.contains("Bearer [REDACTED]"));
    assert!(!redacted.contains("abc.def.ghi"));

    let raw = ContextFormatter::new(InjectionSettings {
        redact: false,
        ..Default::default()
    })
    .unwrap()
    .format(&ctx)
    .unwrap();
    assert!(raw.contains("abc.def.ghi"));
}

#[test]
fn test_auth_wording_in_summaries_is_kept() {
    let ctx = ApiContext::from_documentation(
        "Auth API",
        ContextSource::File("auth.json".to_string()),
        RawDocument::Text(
            r#"{
                "openapi": "3.0.0",
                "servers": [{"url": "https://auth.x.com"}],
                "paths": {
                    "/session": {"post": {"summary": "Exchange credentials for a bearer token"}},
                    "/reset": {"post": {"summary": "Reset password: sends an email"}}
                }
            }"#,
        ),
        &ParseOptions::default(),
    )
    .unwrap();

    let text = format_for_prompt_injection(&ctx).unwrap();
    assert!(text.contains("- POST /session - Exchange credentials for a bearer token\n"));
    assert!(text.contains("- POST /reset - Reset password: sends an email\n"));
    assert!(!text.contains("[REDACTED]"), "{text}");
}

#[test]
fn test_invalid_documentation_never_becomes_a_context() {
    let result = ApiContext::from_documentation(
        "Empty",
        ContextSource::File("empty.json".to_string()),
        RawDocument::Text(r#"{"openapi": "3.0.0", "paths": {}}"#),
        &ParseOptions::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_store_round_trip() {
    let mut store = MemoryContextStore::new();
    let ctx = users_context();
    let id = save_and_activate(&mut store, ctx.clone()).unwrap();

    assert_eq!(store.get_active(), Some(ctx));
    assert_eq!(store.get_all().len(), 1);
    assert!(store.delete(&id));
    assert!(store.get_active().is_none());
}
