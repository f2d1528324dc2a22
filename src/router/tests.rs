use http::Method;

use super::pattern::{join_prefix, PathPattern};
use super::{MatchedBy, Route, RouteError};
use crate::dispatcher::{HandlerRequest, HandlerResponse};

fn noop(_req: HandlerRequest, _resp: &mut HandlerResponse) {}

fn get(path: &str) -> HandlerRequest {
    HandlerRequest::new(Method::GET, path)
}

#[test]
fn test_literal_template_matches_only_itself() {
    let p = PathPattern::compile("/route/articles").unwrap();
    assert!(p.is_match("/route/articles"));
    assert!(!p.is_match("/route/articles/"));
    assert!(!p.is_match("/prefix/route/articles"));
    assert!(!p.is_match("/route/article"));
    assert!(p.variables().is_empty());
}

#[test]
fn test_root_path() {
    let p = PathPattern::compile("/").unwrap();
    assert!(p.is_match("/"));
    assert!(!p.is_match(""));
    assert!(!p.is_match("/x"));
}

#[test]
fn test_compiled_source_is_anchored() {
    let p = PathPattern::compile(r"/articles/{id:\d*}/detail/").unwrap();
    assert_eq!(p.as_str(), r"\A/articles/(?P<id>\d*)/detail/\z");
}

#[test]
fn test_default_variable_pattern() {
    let p = PathPattern::compile("/users/{name}").unwrap();
    assert_eq!(p.as_str(), r"\A/users/(?P<name>\w*)\z");
    let caps = p.captures("/users/joe").unwrap();
    assert_eq!(caps[0].0.as_ref(), "name");
    assert_eq!(caps[0].1, "joe");
    assert!(!p.is_match("/users/joe/"));
    assert!(p.is_match("/users/"));
}

#[test]
fn test_regex_constrained_variable() {
    let p = PathPattern::compile(r"/articles/{id:\d*}").unwrap();
    assert_eq!(p.captures("/articles/21").unwrap()[0].1, "21");
    assert!(!p.is_match("/articles/21/"));
    assert!(!p.is_match("/articles/abc"));
}

#[test]
fn test_nested_quantifier_in_clause() {
    let p = PathPattern::compile(r"/codes/{code:[A-Z]{2}\d{1,3}}").unwrap();
    assert!(p.is_match("/codes/AB12"));
    assert!(!p.is_match("/codes/AB1234"));
}

#[test]
fn test_clause_keeps_colons_after_first() {
    let p = PathPattern::compile("/t/{stamp:\\d+:\\d+}").unwrap();
    assert_eq!(p.captures("/t/12:30").unwrap()[0].1, "12:30");
}

#[test]
fn test_empty_clause_uses_default() {
    let p = PathPattern::compile("/a/{id:}").unwrap();
    assert_eq!(p.as_str(), r"\A/a/(?P<id>\w*)\z");
}

#[test]
fn test_identical_token_text_replaced_positionally() {
    let p = PathPattern::compile(r"/{a:\d+}/{b:\d+}").unwrap();
    let caps = p.captures("/1/22").unwrap();
    assert_eq!(caps.len(), 2);
    assert_eq!((caps[0].0.as_ref(), caps[0].1.as_str()), ("a", "1"));
    assert_eq!((caps[1].0.as_ref(), caps[1].1.as_str()), ("b", "22"));
}

#[test]
fn test_duplicate_variable_rejected() {
    let err = PathPattern::compile("/{id}/x/{id}").unwrap_err();
    assert!(matches!(err, RouteError::DuplicateVariable { ref name, .. } if name == "id"));
}

#[test]
fn test_invalid_variable_name_rejected() {
    assert!(matches!(
        PathPattern::compile("/{}/x"),
        Err(RouteError::InvalidVariableName { .. })
    ));
    assert!(matches!(
        PathPattern::compile("/{9lives}"),
        Err(RouteError::InvalidVariableName { .. })
    ));
}

#[test]
fn test_invalid_regex_clause_rejected() {
    let err = PathPattern::compile("/{id:[0-9}").unwrap_err();
    assert!(matches!(err, RouteError::InvalidPattern { .. }), "{err}");
}

#[test]
fn test_unescaped_literals_keep_regex_meaning() {
    let p = PathPattern::compile("/file.txt").unwrap();
    assert!(p.is_match("/file.txt"));
    assert!(p.is_match("/fileXtxt"));
}

#[test]
fn test_prefix_pattern_is_unanchored() {
    let p = PathPattern::compile_prefix("/assets/css/").unwrap();
    assert!(p.is_match("/assets/css/site.css"));
    assert!(p.is_match("/mirror/assets/css/"));
    assert!(!p.is_match("/assets/js/app.js"));
}

#[test]
fn test_join_prefix() {
    assert_eq!(join_prefix("/route/article/", "/css/"), "/route/article/css/");
    assert_eq!(join_prefix("/route/article/", "images/"), "/route/article/images/");
    assert_eq!(join_prefix("/assets/", "/assets/css/"), "/assets/css/");
    assert_eq!(join_prefix("/a//", "//b"), "/a/b");
    // Rooted only on whole segments
    assert_eq!(join_prefix("/a", "/ab/"), "/a/ab/");
    assert_eq!(join_prefix("/a", "/a/b/"), "/a/b/");
    assert_eq!(join_prefix("/a", "/a"), "/a");
}

#[test]
fn test_route_matches_pattern_and_extracts() {
    let route = Route::builder("/route/articles/{name}")
        .method("get")
        .handler(noop)
        .build()
        .unwrap();
    let m = route.matches(&get("/route/articles/joe")).unwrap();
    assert_eq!(m.matched_by, MatchedBy::Pattern);
    assert_eq!(m.get_path_param("name"), Some("joe"));
    assert_eq!(route.methods(), &[Method::GET]);
}

#[test]
fn test_route_method_filter() {
    let route = Route::builder("/route/articles/")
        .method("GET")
        .handler(noop)
        .build()
        .unwrap();
    let post = HandlerRequest::new(Method::POST, "/route/articles/");
    assert!(route.matches(&post).is_none());
    assert!(route.matches(&get("/route/articles/")).is_some());
}

#[test]
fn test_route_without_methods_accepts_any() {
    let route = Route::builder("/any").handler(noop).build().unwrap();
    for m in [Method::GET, Method::POST, Method::DELETE, Method::PATCH] {
        assert!(route.matches(&HandlerRequest::new(m, "/any")).is_some());
    }
}

#[test]
fn test_route_header_requirements() {
    let route = Route::builder("/route/articles/")
        .method("GET")
        .header("Accept", "application/json")
        .handler(noop)
        .build()
        .unwrap();

    let json = get("/route/articles/").with_header("accept", "application/json");
    let html = get("/route/articles/").with_header("Accept", "application/html");
    let missing = get("/route/articles/");

    assert!(route.matches(&json).is_some());
    assert!(route.matches(&html).is_none());
    assert!(route.matches(&missing).is_none());
}

#[test]
fn test_missing_header_fails_even_if_pattern_accepts_empty() {
    let route = Route::builder("/x")
        .header("X-Trace", ".*")
        .handler(noop)
        .build()
        .unwrap();
    assert!(route.matches(&get("/x")).is_none());
    assert!(route.matches(&get("/x").with_header("x-trace", "")).is_some());
}

#[test]
fn test_first_header_requirement_wins() {
    let route = Route::builder("/x")
        .header("Accept", "json")
        .header("accept", "html")
        .handler(noop)
        .build()
        .unwrap();
    assert!(route
        .matches(&get("/x").with_header("Accept", "application/json"))
        .is_some());
    assert!(route
        .matches(&get("/x").with_header("Accept", "text/html"))
        .is_none());
}

#[test]
fn test_prefix_match_has_no_variables() {
    let route = Route::builder("/route/article/")
        .path_prefix("/css/")
        .path_prefix("/images/")
        .method("GET")
        .handler(noop)
        .build()
        .unwrap();
    let m = route
        .matches(&get("/route/article/images/logo.png"))
        .unwrap();
    assert_eq!(m.matched_by, MatchedBy::Prefix(1));
    assert!(m.path_params.is_empty());
    assert_eq!(
        route.prefix_patterns(),
        vec!["/route/article/css/", "/route/article/images/"]
    );
}

#[test]
fn test_build_errors() {
    assert!(matches!(
        Route::builder("/x").build(),
        Err(RouteError::MissingHandler { .. })
    ));
    assert!(matches!(
        Route::builder("/x").method("GET, OPTIONS").handler(noop).build(),
        Err(RouteError::InvalidMethod { .. })
    ));
    assert!(matches!(
        Route::builder("/x").header("Bad Header", "x").handler(noop).build(),
        Err(RouteError::InvalidHeaderName { .. })
    ));
    assert!(matches!(
        Route::builder("/x").header("Accept", "(").handler(noop).build(),
        Err(RouteError::InvalidHeaderPattern { .. })
    ));
    assert!(matches!(
        Route::builder("/x").path_prefix("{bad name}").handler(noop).build(),
        Err(RouteError::InvalidVariableName { .. })
    ));
}

#[test]
fn test_repeated_methods_collapse() {
    let route = Route::builder("/x")
        .method("GET")
        .method("get")
        .method(Method::POST)
        .handler(noop)
        .build()
        .unwrap();
    assert_eq!(route.methods(), &[Method::GET, Method::POST]);
}
