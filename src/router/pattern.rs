//! Path template compilation.
//!
//! A path template is literal text plus zero or more variable tokens:
//!
//! - `{name}` captures `\w*` (word characters, possibly none)
//! - `{name:regex}` captures `regex`, inserted verbatim
//!
//! The template `/articles/{id:\d*}/detail/` compiles to
//! `\A/articles/(?P<id>\d*)/detail/\z`.
//!
//! Literal text is **not** escaped: a `.` or `+` in a template keeps its
//! regex meaning. Templates are trusted route-table input.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::RouteError;
use crate::dispatcher::ParamVec;

const START_OF_STRING: &str = r"\A";
const END_OF_STRING: &str = r"\z";
const DEFAULT_VARIABLE_PATTERN: &str = r"\w*";

/// `{name}` or `{name:clause}`; the clause may hold one level of `{m,n}`.
#[allow(clippy::expect_used)]
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([^{}:]*)(?::((?:[^{}]|\{[^{}]*\})*))?\}").expect("token regex is valid")
});

#[allow(clippy::expect_used)]
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A[A-Za-z_][A-Za-z0-9_]*\z").expect("name regex is valid"));

/// A compiled path template.
#[derive(Clone)]
pub struct PathPattern {
    template: String,
    regex: Regex,
    variables: Vec<Arc<str>>,
}

impl PathPattern {
    /// Compile `template` into a pattern that must match the whole path.
    pub fn compile(template: &str) -> Result<Self, RouteError> {
        let body = expand_template(template)?;
        Self::from_source(template, format!("{START_OF_STRING}{body}{END_OF_STRING}"))
    }

    /// Compile `template` without anchors, for containment matching.
    pub fn compile_prefix(template: &str) -> Result<Self, RouteError> {
        let body = expand_template(template)?;
        Self::from_source(template, body)
    }

    fn from_source(template: &str, source: String) -> Result<Self, RouteError> {
        let regex = Regex::new(&source).map_err(|e| RouteError::InvalidPattern {
            template: template.to_string(),
            pattern: source.clone(),
            source: e,
        })?;
        let variables: Vec<Arc<str>> = regex.capture_names().flatten().map(Arc::from).collect();
        Ok(Self {
            template: template.to_string(),
            regex,
            variables,
        })
    }

    /// The template this pattern was compiled from.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The regex source, including anchors when present.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Names of every capture group, in pattern order.
    #[must_use]
    pub fn variables(&self) -> &[Arc<str>] {
        &self.variables
    }

    #[inline]
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` and return each named capture in pattern order.
    ///
    /// A group that did not take part in the match yields an empty value.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<ParamVec> {
        let caps = self.regex.captures(path)?;
        Some(
            self.variables
                .iter()
                .map(|name| {
                    let value = caps.name(name).map(|m| m.as_str()).unwrap_or_default();
                    (Arc::clone(name), value.to_string())
                })
                .collect(),
        )
    }
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathPattern")
            .field("template", &self.template)
            .field("pattern", &self.regex.as_str())
            .finish()
    }
}

/// Replace each variable token with a named group.
///
/// Tokens are substituted by position during one left-to-right scan, so two
/// tokens with identical text are each replaced exactly once. A variable name
/// used twice in one template is rejected.
fn expand_template(template: &str) -> Result<String, RouteError> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut seen: Vec<&str> = Vec::new();
    let mut last = 0;

    for caps in TOKEN_RE.captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();

        if !NAME_RE.is_match(name) {
            return Err(RouteError::InvalidVariableName {
                template: template.to_string(),
                name: name.to_string(),
            });
        }
        if seen.contains(&name) {
            return Err(RouteError::DuplicateVariable {
                template: template.to_string(),
                name: name.to_string(),
            });
        }
        seen.push(name);

        let clause = caps
            .get(2)
            .map(|m| m.as_str())
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_VARIABLE_PATTERN);

        out.push_str(&template[last..whole.start()]);
        out.push_str("(?P<");
        out.push_str(name);
        out.push('>');
        out.push_str(clause);
        out.push(')');
        last = whole.end();
    }

    out.push_str(&template[last..]);
    Ok(out)
}

/// Resolve a prefix against a route's template.
///
/// A prefix that already starts with the template, ending on a segment
/// boundary, is taken as written; anything else is appended to the template.
/// Doubled slashes are collapsed either way, so `/articles/` + `/css/` gives
/// `/articles/css/` and `/a` + `/ab/` gives `/a/ab/`.
#[must_use]
pub fn join_prefix(root: &str, prefix: &str) -> String {
    let rooted = prefix.strip_prefix(root).is_some_and(|rest| {
        root.ends_with('/') || rest.is_empty() || rest.starts_with('/')
    });
    let mut joined = if rooted {
        prefix.to_string()
    } else {
        format!("{root}{prefix}")
    };
    while joined.contains("//") {
        joined = joined.replace("//", "/");
    }
    joined
}
