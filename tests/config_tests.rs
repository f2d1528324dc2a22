use http::Method;
use webroute::config::{ConfigError, RouteTable};
use webroute::dispatcher::HandlerRequest;
use webroute::registry::HandlerRegistry;
use webroute::router::RouteError;

mod common;
use common::handlers::labelled;
use common::temp_files::create_temp_yaml;

const TABLE: &str = r#"
routes:
  - path: /route/articles/
    name: articles_json
    methods: [GET]
    headers:
      Accept: application/json
    handler: articles
  - path: '/route/articles/{id:\d*}/detail/'
    name: article_detail
    methods: [get]
    handler: detail
  - path: /route/article/
    prefixes: [/css/, /images/]
    handler: assets
  - path: /route/{anything}/
    handler: fallback
"#;

fn registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry
        .register("articles", labelled("articles"))
        .register("detail", labelled("detail"))
        .register("assets", labelled("assets"))
        .register("fallback", labelled("fallback"));
    registry
}

#[test]
fn test_load_and_build_from_file() {
    let file = create_temp_yaml(TABLE);
    let table = RouteTable::load(file.path()).unwrap();
    assert_eq!(table.routes.len(), 4);

    let router = table.build_router(&registry()).unwrap();
    assert_eq!(router.route_count(), 4);

    let names: Vec<&str> = router.routes().map(|r| r.name()).collect();
    assert_eq!(
        names,
        vec!["articles_json", "article_detail", "/route/article/", "/route/{anything}/"]
    );
}

#[test]
fn test_file_order_is_precedence() {
    let router = RouteTable::from_yaml_str(TABLE)
        .unwrap()
        .build_router(&registry())
        .unwrap();

    // Both the first and the last entry accept this request
    let json = HandlerRequest::new(Method::GET, "/route/articles/")
        .with_header("accept", "application/json");
    assert_eq!(router.handle(json).body, "articles|");

    let plain = HandlerRequest::new(Method::GET, "/route/articles/");
    assert_eq!(router.handle(plain).body, "fallback|anything=articles");

    let detail = HandlerRequest::new(Method::GET, "/route/articles/9/detail/");
    assert_eq!(router.handle(detail).body, "detail|id=9");

    let css = HandlerRequest::new(Method::GET, "/route/article/css/site.css");
    assert_eq!(router.handle(css).body, "assets|");
}

#[test]
fn test_unknown_handler() {
    let table = RouteTable::from_yaml_str("routes:\n  - path: /x\n    handler: nobody\n").unwrap();
    let err = table.build_router(&registry()).unwrap_err();
    match err {
        ConfigError::UnknownHandler { route, handler } => {
            assert_eq!(route, "/x");
            assert_eq!(handler, "nobody");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_route_reports_entry() {
    let yaml = "routes:\n  - path: '/x/{id:[0-9}'\n    name: broken\n    handler: detail\n";
    let err = RouteTable::from_yaml_str(yaml)
        .unwrap()
        .build_router(&registry())
        .unwrap_err();
    match err {
        ConfigError::Route { route, source } => {
            assert_eq!(route, "broken");
            assert!(matches!(source, RouteError::InvalidPattern { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_method_in_table() {
    let yaml = "routes:\n  - path: /x\n    methods: ['GET, OPTIONS']\n    handler: detail\n";
    let err = RouteTable::from_yaml_str(yaml)
        .unwrap()
        .build_router(&registry())
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Route {
            source: RouteError::InvalidMethod { .. },
            ..
        }
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RouteTable::load(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn test_malformed_yaml() {
    let err = RouteTable::from_yaml_str("routes: [").unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}

#[test]
fn test_empty_document_has_no_routes() {
    let table = RouteTable::from_yaml_str("{}").unwrap();
    assert!(table.routes.is_empty());
    assert_eq!(table.build_router(&registry()).unwrap().route_count(), 0);
}
