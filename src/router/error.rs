use thiserror::Error;

/// Route construction failures.
///
/// All of these surface from [`RouteBuilder::build`](super::RouteBuilder::build)
/// while the routing table is being assembled. None can occur while a request
/// is being matched.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid variable name '{name}' in path template '{template}'")]
    InvalidVariableName { template: String, name: String },

    #[error("variable '{name}' appears more than once in path template '{template}'")]
    DuplicateVariable { template: String, name: String },

    #[error("path template '{template}' compiles to an invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        template: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid method token '{method}'")]
    InvalidMethod { method: String },

    #[error("invalid header name '{header}'")]
    InvalidHeaderName { header: String },

    #[error("invalid pattern '{pattern}' for header '{header}': {source}")]
    InvalidHeaderPattern {
        header: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("route '{template}' has no handler")]
    MissingHandler { template: String },
}
