//! Error types for route registration, matching and stack traversal.

use thiserror::Error;

/// Errors raised by the navigation core.
///
/// `InvalidTemplate` and `DuplicateRoute` only occur while registering
/// destinations and indicate a configuration defect. `NoMatchingRoute` and
/// `CannotPopRoot` are runtime failures that leave the back stack untouched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("invalid route template `{template}`: {source}")]
    InvalidTemplate {
        template: String,
        #[source]
        source: TemplateError,
    },
    #[error("route template `{template}` is ambiguous with already registered `{existing}`")]
    DuplicateRoute { template: String, existing: String },
    #[error("no registered route matches `{path}`")]
    NoMatchingRoute { path: String },
    #[error("cannot pop the root entry of the back stack")]
    CannotPopRoot,
}

impl NavError {
    /// Whether this error can only be produced while setting up destinations.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTemplate { .. } | Self::DuplicateRoute { .. }
        )
    }
}

/// Reasons a route template string fails to parse.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template is empty")]
    Empty,
    #[error("segment {index} is empty")]
    EmptySegment { index: usize },
    #[error("placeholder at segment {index} has no name")]
    EmptyPlaceholder { index: usize },
    #[error("segment `{segment}` mixes braces with literal text")]
    Malformed { segment: String },
    #[error("placeholder `{name}` appears more than once")]
    DuplicatePlaceholder { name: String },
}

/// Errors produced when reading or filling route parameters.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("missing route parameter `{name}`")]
    Missing { name: String },
    #[error("invalid value `{value}` for route parameter `{name}`: {reason}")]
    Invalid {
        name: String,
        value: String,
        reason: String,
    },
}
