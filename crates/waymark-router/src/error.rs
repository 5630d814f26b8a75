//! Error types for route factories and resolution.
//!
//! A path that matches no factory is *not* an error: resolution returns
//! `None` for that case. The errors below describe authoring mistakes
//! (bad patterns, inconsistent hooks, duplicate types) and failures of
//! external collaborators (location, name lookups, configuration).

use thiserror::Error;

/// Error raised by a segment while parsing captures or rendering a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
	/// Failed to parse a captured value.
	#[error("Failed to parse parameter '{param}' value '{raw_value}' as {param_type}: {reason}")]
	ParseError {
		/// Name of the parameter that failed to parse.
		param: String,
		/// Expected type name.
		param_type: &'static str,
		/// Raw string value that failed to parse.
		raw_value: String,
		/// Error message from parsing.
		reason: String,
	},
	/// The pattern did not capture a group the segment expects.
	#[error("Missing capture: {0}")]
	MissingCapture(String),
	/// A parameter required to render a path is absent.
	#[error("Missing parameter: {0}")]
	MissingParameter(String),
	/// A parameter is present but has the wrong shape.
	#[error("Invalid parameter '{param}': {message}")]
	InvalidParameter {
		/// Parameter name.
		param: String,
		/// What was wrong with it.
		message: String,
	},
}

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
	/// A composed matcher failed to compile.
	#[error("Invalid route pattern '{pattern}': {message}")]
	InvalidPattern {
		/// The composed pattern source.
		pattern: String,
		/// Compiler message.
		message: String,
	},
	/// Two factories given to one resolver share a discriminator.
	#[error("Duplicate route type: {0}")]
	DuplicateRouteType(String),
	/// No factory is registered for a discriminator.
	#[error("Unknown route type: {0}")]
	UnknownRouteType(String),
	/// The location refused a navigation request.
	#[error("Navigation failed: {0}")]
	NavigationFailed(String),
	/// A display-name lookup failed.
	#[error("Name lookup failed: {0}")]
	NameLookup(String),
	/// A route table could not be loaded.
	#[error("Configuration error: {0}")]
	Config(String),
	/// Rendering or parsing a path failed.
	#[error("Path error: {0}")]
	Path(#[from] PathError),
}

/// Result type alias for router operations.
pub type RouteResult<T> = Result<T, RouteError>;
