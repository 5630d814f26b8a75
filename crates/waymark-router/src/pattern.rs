//! Path pattern compilation and matching.
//!
//! Route segments describe their portion of a path with a small
//! Django-style syntax. A factory concatenates the fragments of its whole
//! ancestor chain and compiles the result once into a [`PathPattern`].

use crate::error::{RouteError, RouteResult};
use crate::params::Captures;
use std::collections::HashMap;

/// Maximum allowed length for a composed pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a composed pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// How a placeholder captures its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
	/// One path segment, no `/`.
	Segment,
	/// An optionally signed run of digits.
	Integer,
	/// The rest of the path, `/` included.
	Wildcard,
}

impl Capture {
	fn regex(self) -> &'static str {
		match self {
			Self::Segment => "[^/]+",
			Self::Integer => "-?[0-9]+",
			Self::Wildcard => ".*",
		}
	}
}

/// A compiled path pattern, anchored at the end of the path.
///
/// Pattern syntax:
/// - `/settings` - literal text, matched exactly
/// - `/bundles/{bundle_id}` - captures one path segment (excludes `/`)
/// - `/pages/{page:int}` - captures an optionally signed integer
/// - `/files/{path:*}` - captures the rest of the path (includes `/`)
///
/// The match must run to the end of the path but may start anywhere in it:
/// `/settings` matches `/x/settings` but not `/settings/extra`, and the
/// empty pattern matches every path. Listing a general pattern before a
/// specific one therefore shadows the specific one.
///
/// Capture names must be unique across the whole composed pattern. A
/// duplicate name is rejected at compile time.
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The original pattern string.
	pattern: String,
	/// Compiled regex pattern.
	regex: regex::Regex,
	/// Parameter names in order.
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a pattern string.
	///
	/// # Errors
	///
	/// Returns [`RouteError::InvalidPattern`] if:
	/// - the pattern exceeds 1024 bytes or 32 path segments
	/// - a placeholder is unclosed, unnamed or uses an unknown converter
	/// - two placeholders share a name
	/// - the generated regex fails to compile
	pub fn new(pattern: &str) -> RouteResult<Self> {
		let invalid = |message: String| RouteError::InvalidPattern {
			pattern: pattern.to_string(),
			message,
		};

		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(invalid(format!(
				"pattern length {} exceeds maximum allowed length of {} bytes",
				pattern.len(),
				MAX_PATTERN_LENGTH
			)));
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(invalid(format!(
				"pattern has {} path segments, exceeding maximum of {}",
				segment_count, MAX_PATH_SEGMENTS
			)));
		}

		let (regex_str, param_names) = Self::compile_pattern(pattern).map_err(invalid)?;

		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| invalid(format!("failed to compile pattern regex: {}", e)))?;

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
			param_names,
		})
	}

	/// Translates the pattern syntax into an end-anchored regex.
	fn compile_pattern(pattern: &str) -> Result<(String, Vec<String>), String> {
		let mut regex_str = String::new();
		let mut param_names: Vec<String> = Vec::new();
		let mut literal = String::new();
		let mut chars = pattern.chars();

		while let Some(c) = chars.next() {
			if c != '{' {
				literal.push(c);
				continue;
			}

			regex_str.push_str(&regex::escape(&literal));
			literal.clear();

			let mut body = String::new();
			let mut closed = false;
			for next in chars.by_ref() {
				if next == '}' {
					closed = true;
					break;
				}
				body.push(next);
			}
			if !closed {
				return Err(format!("unclosed placeholder '{{{}'", body));
			}

			let (name, capture) = match body.split_once(':') {
				None => (body.as_str(), Capture::Segment),
				Some((name, "int")) => (name, Capture::Integer),
				Some((name, "*")) => (name, Capture::Wildcard),
				Some((_, converter)) => {
					return Err(format!("unknown converter '{}'", converter));
				}
			};

			if name.is_empty() {
				return Err("placeholder without a name".to_string());
			}
			if param_names.iter().any(|existing| existing == name) {
				return Err(format!("duplicate capture name '{}'", name));
			}

			regex_str.push_str(&format!("(?P<{}>{})", name, capture.regex()));
			param_names.push(name.to_string());
		}

		regex_str.push_str(&regex::escape(&literal));
		regex_str.push('$');
		Ok((regex_str, param_names))
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Matches a path, returning every named capture on success.
	///
	/// The leftmost match ending at the end of `path` wins.
	pub fn matches(&self, path: &str) -> Option<Captures> {
		self.regex.captures(path).map(|caps| {
			let values: HashMap<String, String> = self
				.param_names
				.iter()
				.filter_map(|name| {
					caps.name(name)
						.map(|m| (name.clone(), m.as_str().to_string()))
				})
				.collect();
			Captures::new(values)
		})
	}

	/// Checks if this pattern would match the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Returns whether this pattern has no placeholders.
	pub fn is_exact(&self) -> bool {
		self.param_names.is_empty()
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}
