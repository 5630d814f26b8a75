//! Raw captures and parsed route parameters.
//!
//! Matching a composed pattern yields [`Captures`]: the raw string value of
//! every named group in the whole ancestor chain. Each segment parses its own
//! groups into [`Params`], a JSON object map that the factory then merges
//! across levels.

use crate::error::PathError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;

/// Named captures from a single match of a composed pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
	values: HashMap<String, String>,
}

impl Captures {
	/// Creates captures from a name/value map.
	pub fn new(values: HashMap<String, String>) -> Self {
		Self { values }
	}

	/// Returns the raw value captured for `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.values.get(name).map(String::as_str)
	}

	/// Returns the raw value captured for `name`, or an error if the group
	/// was not part of the match.
	pub fn require(&self, name: &str) -> Result<&str, PathError> {
		self.get(name)
			.ok_or_else(|| PathError::MissingCapture(name.to_string()))
	}

	/// Parses the value captured for `name` with [`FromStr`].
	pub fn parse<T>(&self, name: &str) -> Result<T, PathError>
	where
		T: FromStr,
		T::Err: std::fmt::Display,
	{
		let raw = self.require(name)?;
		raw.parse::<T>().map_err(|e| PathError::ParseError {
			param: name.to_string(),
			param_type: std::any::type_name::<T>(),
			raw_value: raw.to_string(),
			reason: e.to_string(),
		})
	}

	/// Returns the number of captured groups.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns whether nothing was captured.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Captures {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self::new(
			iter.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}

/// Parsed parameters of a route.
///
/// A JSON object keyed by parameter name. Routes compare by value, so two
/// `Params` with the same entries are interchangeable regardless of how they
/// were built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
	/// Creates empty params.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(key, value);
		self
	}

	/// Inserts a value, returning the previous one.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(key.into(), value.into())
	}

	/// Returns the value for `key`.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// Returns the value for `key` if it is a string.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(Value::as_str)
	}

	/// Returns the value for `key` if it is an integer.
	pub fn get_i64(&self, key: &str) -> Option<i64> {
		self.get(key).and_then(Value::as_i64)
	}

	/// Returns the value for `key` if it is a boolean.
	pub fn get_bool(&self, key: &str) -> Option<bool> {
		self.get(key).and_then(Value::as_bool)
	}

	/// Returns whether `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns whether there are no entries.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over the entries in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.0.iter()
	}

	/// Layers `self` over `inherited`.
	///
	/// Keys present in both keep the value from `self`.
	pub fn merged_over(self, inherited: Params) -> Params {
		let mut merged = inherited.0;
		merged.extend(self.0);
		Params(merged)
	}

	/// Builds params from any value serializing to a JSON object.
	pub fn from_serialize<S: Serialize>(value: &S) -> Result<Self, PathError> {
		match serde_json::to_value(value) {
			Ok(Value::Object(map)) => Ok(Self(map)),
			Ok(other) => Err(PathError::InvalidParameter {
				param: "<root>".to_string(),
				message: format!("expected an object, got {}", other),
			}),
			Err(e) => Err(PathError::InvalidParameter {
				param: "<root>".to_string(),
				message: e.to_string(),
			}),
		}
	}

	/// Deserializes the params into a caller-defined type.
	pub fn deserialize<P: DeserializeOwned>(&self) -> Result<P, PathError> {
		serde_json::from_value(Value::Object(self.0.clone())).map_err(|e| {
			PathError::InvalidParameter {
				param: "<root>".to_string(),
				message: e.to_string(),
			}
		})
	}
}

impl From<Map<String, Value>> for Params {
	fn from(map: Map<String, Value>) -> Self {
		Self(map)
	}
}

/// How a single parameter is parsed from and rendered into a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
	/// Any non-empty segment, kept as a string.
	Str,
	/// A signed 64-bit integer.
	Integer,
	/// `true` or `false`.
	Boolean,
	/// One of a fixed set of strings.
	OneOf(Vec<String>),
}

impl ParamKind {
	/// Returns the pattern placeholder capturing a parameter of this kind.
	pub fn placeholder(&self, name: &str) -> String {
		match self {
			Self::Integer => format!("{{{}:int}}", name),
			_ => format!("{{{}}}", name),
		}
	}

	fn type_name(&self) -> &'static str {
		match self {
			Self::Str => "string",
			Self::Integer => "integer",
			Self::Boolean => "boolean",
			Self::OneOf(_) => "enum",
		}
	}

	/// Parses a raw captured value.
	pub fn parse(&self, name: &str, raw: &str) -> Result<Value, PathError> {
		let parse_error = |reason: String| PathError::ParseError {
			param: name.to_string(),
			param_type: self.type_name(),
			raw_value: raw.to_string(),
			reason,
		};

		match self {
			Self::Str => Ok(Value::String(raw.to_string())),
			Self::Integer => raw
				.parse::<i64>()
				.map(Value::from)
				.map_err(|e| parse_error(e.to_string())),
			Self::Boolean => raw
				.parse::<bool>()
				.map(Value::Bool)
				.map_err(|e| parse_error(e.to_string())),
			Self::OneOf(values) => {
				if values.iter().any(|v| v == raw) {
					Ok(Value::String(raw.to_string()))
				} else {
					Err(parse_error(format!("expected one of {:?}", values)))
				}
			}
		}
	}

	/// Renders a parsed value back into its path form.
	pub fn render(&self, name: &str, value: &Value) -> Result<String, PathError> {
		let invalid = || PathError::InvalidParameter {
			param: name.to_string(),
			message: format!("expected {}, got {}", self.type_name(), value),
		};

		match (self, value) {
			(Self::Str, Value::String(s)) if !s.is_empty() && !s.contains('/') => Ok(s.clone()),
			(Self::Integer, Value::Number(n)) => n.as_i64().map(|i| i.to_string()).ok_or_else(invalid),
			(Self::Boolean, Value::Bool(b)) => Ok(b.to_string()),
			(Self::OneOf(values), Value::String(s))
				if values.contains(s) && !s.is_empty() && !s.contains('/') =>
			{
				Ok(s.clone())
			}
			_ => Err(invalid()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_captures_parse() {
		let captures: Captures = [("id", "42"), ("slug", "hello")].into_iter().collect();

		assert_eq!(captures.parse::<i64>("id"), Ok(42));
		assert_eq!(captures.get("slug"), Some("hello"));
		assert!(matches!(
			captures.parse::<i64>("slug"),
			Err(PathError::ParseError { .. })
		));
		assert_eq!(
			captures.require("missing"),
			Err(PathError::MissingCapture("missing".to_string()))
		);
	}

	#[rstest]
	fn test_merged_over_prefers_own_keys() {
		let own = Params::new().with("tab", "details").with("id", 2);
		let inherited = Params::new().with("id", 1).with("org", "acme");

		let merged = own.merged_over(inherited);

		assert_eq!(merged.get_i64("id"), Some(2));
		assert_eq!(merged.get_str("org"), Some("acme"));
		assert_eq!(merged.get_str("tab"), Some("details"));
		assert_eq!(merged.len(), 3);
	}

	#[rstest]
	fn test_serialize_round_trip() {
		#[derive(Debug, PartialEq, Serialize, Deserialize)]
		struct BundleParams {
			bundle_id: String,
			revision: i64,
		}

		let typed = BundleParams {
			bundle_id: "com.example".to_string(),
			revision: 3,
		};
		let params = Params::from_serialize(&typed).unwrap();
		assert_eq!(params.get_str("bundle_id"), Some("com.example"));
		assert_eq!(params.deserialize::<BundleParams>().unwrap(), typed);
	}

	#[rstest]
	fn test_from_serialize_rejects_non_objects() {
		assert!(Params::from_serialize(&42).is_err());
	}

	#[rstest]
	#[case(ParamKind::Str, "abc", json!("abc"))]
	#[case(ParamKind::Integer, "-7", json!(-7))]
	#[case(ParamKind::Boolean, "true", json!(true))]
	#[case(ParamKind::OneOf(vec!["list".into(), "grid".into()]), "grid", json!("grid"))]
	fn test_param_kind_parse_and_render(
		#[case] kind: ParamKind,
		#[case] raw: &str,
		#[case] expected: Value,
	) {
		let parsed = kind.parse("p", raw).unwrap();
		assert_eq!(parsed, expected);
		assert_eq!(kind.render("p", &parsed).unwrap(), raw);
	}

	#[rstest]
	#[case(ParamKind::Integer, "seven")]
	#[case(ParamKind::Boolean, "yes")]
	#[case(ParamKind::OneOf(vec!["list".into()]), "grid")]
	fn test_param_kind_parse_failures(#[case] kind: ParamKind, #[case] raw: &str) {
		assert!(matches!(
			kind.parse("p", raw),
			Err(PathError::ParseError { .. })
		));
	}

	#[rstest]
	fn test_param_kind_render_rejects_wrong_shape() {
		assert!(ParamKind::Integer.render("p", &json!("1")).is_err());
		assert!(ParamKind::Str.render("p", &json!("a/b")).is_err());
		assert!(ParamKind::Str.render("p", &json!("")).is_err());
	}

	#[rstest]
	#[case("a/b")]
	#[case("")]
	fn test_one_of_rejects_unmatchable_values(#[case] value: &str) {
		// Even when listed, these could never be captured back by `{name}`.
		let kind = ParamKind::OneOf(vec!["ok".into(), value.to_string()]);
		assert!(matches!(
			kind.render("mode", &json!(value)),
			Err(PathError::InvalidParameter { .. })
		));
		assert_eq!(kind.render("mode", &json!("ok")).unwrap(), "ok");
	}

	#[rstest]
	fn test_placeholders() {
		assert_eq!(ParamKind::Integer.placeholder("page"), "{page:int}");
		assert_eq!(ParamKind::Str.placeholder("bundle_id"), "{bundle_id}");
	}
}
