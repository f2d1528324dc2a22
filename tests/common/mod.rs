#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;

    use tempfile::NamedTempFile;

    /// Write `content` to a temporary `.yaml` file that is removed on drop.
    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("webroute_test_")
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}

pub mod tracing_util {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::EnvFilter;

    /// Thread-local subscriber so routing logs show up in `cargo test -- --nocapture`.
    pub struct TestTracing {
        _guard: tracing::subscriber::DefaultGuard,
    }

    impl TestTracing {
        pub fn init() -> Self {
            let subscriber = tracing_subscriber::registry()
                .with(EnvFilter::new("webroute=debug"))
                .with(tracing_subscriber::fmt::layer().with_test_writer());
            Self {
                _guard: tracing::subscriber::set_default(subscriber),
            }
        }
    }
}

pub mod handlers {
    use webroute::dispatcher::{HandlerRequest, HandlerResponse};

    /// Answers with the route label and every query pair, `k=v` joined by `&`.
    pub fn labelled(label: &'static str) -> impl Fn(HandlerRequest, &mut HandlerResponse) + Send + Sync {
        move |req: HandlerRequest, resp: &mut HandlerResponse| {
            let params: Vec<String> = req
                .query_params
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            resp.status = 200;
            resp.body = format!("{label}|{}", params.join("&"));
        }
    }
}
