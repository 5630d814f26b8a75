//! Concrete route segments.
//!
//! - [`StaticSegment`]: a fixed fragment without parameters, such as a
//!   settings page.
//! - [`ParamSegment`]: a literal prefix followed by one typed parameter,
//!   such as `/bundles/{bundle_id}`. Display names can be resolved through
//!   a [`NameLookup`].

use crate::error::{PathError, RouteResult};
use crate::factory::{RouteFactory, RouteSegment, RouteType};
use crate::params::{Captures, ParamKind, Params};
use async_trait::async_trait;
use std::borrow::Cow;
use std::sync::Arc;

/// A fixed fragment with no parameters and a fixed display name.
///
/// The fragment is literal text and must not contain `{` or `}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSegment {
	fragment: String,
	name: String,
}

impl StaticSegment {
	/// Creates a static segment.
	pub fn new(fragment: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			fragment: fragment.into(),
			name: name.into(),
		}
	}

	/// Returns the literal fragment.
	pub fn fragment(&self) -> &str {
		&self.fragment
	}
}

#[async_trait]
impl RouteSegment for StaticSegment {
	fn relative_matcher(&self) -> Cow<'_, str> {
		Cow::Borrowed(&self.fragment)
	}

	fn relative_match_params(&self, _captures: &Captures) -> Result<Params, PathError> {
		Ok(Params::new())
	}

	fn relative_path(&self, _params: &Params) -> Result<String, PathError> {
		Ok(self.fragment.clone())
	}

	async fn name(&self, _params: &Params) -> RouteResult<String> {
		Ok(self.name.clone())
	}
}

impl<T: RouteType> RouteFactory<T> {
	/// Root factory for a static fragment.
	///
	/// ```
	/// use waymark_router::{Params, RouteFactory};
	///
	/// let settings = RouteFactory::simple("SETTINGS", "/settings", "Settings");
	/// assert_eq!(settings.path(&Params::new()).unwrap(), "/settings");
	/// ```
	pub fn simple(route_type: T, fragment: impl Into<String>, name: impl Into<String>) -> Self {
		Self::new(route_type, StaticSegment::new(fragment, name))
	}

	/// Static factory nested under `parent`.
	pub fn simple_child(
		parent: &Arc<RouteFactory<T>>,
		route_type: T,
		fragment: impl Into<String>,
		name: impl Into<String>,
	) -> Self {
		Self::with_parent(parent, route_type, StaticSegment::new(fragment, name))
	}
}

/// Resolves display names for parameter values, e.g. a bundle title for a
/// bundle id.
#[async_trait]
pub trait NameLookup: Send + Sync {
	/// Returns the display name for `value` of parameter `param`.
	///
	/// # Errors
	///
	/// Returns [`RouteError::NameLookup`](crate::RouteError::NameLookup) when
	/// the entity cannot be resolved.
	async fn lookup(&self, param: &str, value: &str) -> RouteResult<String>;
}

/// A literal prefix followed by one typed parameter.
#[derive(Clone)]
pub struct ParamSegment {
	prefix: String,
	param: String,
	kind: ParamKind,
	label: Option<String>,
	lookup: Option<Arc<dyn NameLookup>>,
}

impl std::fmt::Debug for ParamSegment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ParamSegment")
			.field("prefix", &self.prefix)
			.field("param", &self.param)
			.field("kind", &self.kind)
			.field("label", &self.label)
			.field("has_lookup", &self.lookup.is_some())
			.finish()
	}
}

impl ParamSegment {
	/// Creates a segment matching `prefix` followed by one `kind` value
	/// stored under `param`.
	pub fn new(prefix: impl Into<String>, param: impl Into<String>, kind: ParamKind) -> Self {
		Self {
			prefix: prefix.into(),
			param: param.into(),
			kind,
			label: None,
			lookup: None,
		}
	}

	/// Prefixes the fallback display name, e.g. `"Bundle com.example"`.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Resolves display names through `lookup` instead of the raw value.
	pub fn with_lookup(mut self, lookup: Arc<dyn NameLookup>) -> Self {
		self.lookup = Some(lookup);
		self
	}

	/// Returns the parameter name.
	pub fn param(&self) -> &str {
		&self.param
	}

	fn render_value(&self, params: &Params) -> Result<String, PathError> {
		let value = params
			.get(&self.param)
			.ok_or_else(|| PathError::MissingParameter(self.param.clone()))?;
		self.kind.render(&self.param, value)
	}
}

#[async_trait]
impl RouteSegment for ParamSegment {
	fn relative_matcher(&self) -> Cow<'_, str> {
		Cow::Owned(format!(
			"{}{}",
			self.prefix,
			self.kind.placeholder(&self.param)
		))
	}

	fn relative_match_params(&self, captures: &Captures) -> Result<Params, PathError> {
		let raw = captures.require(&self.param)?;
		let value = self.kind.parse(&self.param, raw)?;
		Ok(Params::new().with(self.param.clone(), value))
	}

	fn relative_path(&self, params: &Params) -> Result<String, PathError> {
		Ok(format!("{}{}", self.prefix, self.render_value(params)?))
	}

	async fn name(&self, params: &Params) -> RouteResult<String> {
		let value = self.render_value(params)?;
		if let Some(lookup) = &self.lookup {
			return lookup.lookup(&self.param, &value).await;
		}
		Ok(match &self.label {
			Some(label) => format!("{} {}", label, value),
			None => value,
		})
	}
}
