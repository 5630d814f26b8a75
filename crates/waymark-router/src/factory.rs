//! Hierarchical route factories.
//!
//! A [`RouteFactory`] is one level of a routing hierarchy. It owns a
//! [`RouteSegment`] describing *only* its own portion of a path, plus an
//! optional shared parent. All composition (full matchers, full paths,
//! merged parameters, cascades) is implemented once here, walking the parent
//! chain root first.
//!
//! ```text
//! HOME ("")  <-  BUNDLES ("/bundles")  <-  BUNDLE ("/{bundle_id}")
//!
//! BUNDLE.matcher()        == "/bundles/{bundle_id}"
//! BUNDLE.cascade_paths()  == ["", "/bundles", "/bundles/com.example"]
//! ```

use crate::error::{PathError, RouteResult};
use crate::params::{Captures, Params};
use crate::pattern::PathPattern;
use crate::route::Route;
use async_trait::async_trait;
use futures::future::{BoxFuture, try_join_all};
use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Bounds required of a route discriminator.
pub trait RouteType: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> RouteType for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// The four hooks a concrete route level supplies.
///
/// Every hook is scoped to this level only and must never include ancestor
/// fragments. `relative_match_params` and `relative_path` must round-trip:
/// parsing the captures of a rendered fragment yields the params it was
/// rendered from.
#[async_trait]
pub trait RouteSegment: Send + Sync + Debug {
	/// Pattern fragment recognising this level's portion of a path.
	fn relative_matcher(&self) -> Cow<'_, str>;

	/// Extracts and parses this level's params from the captures of the
	/// whole composed pattern.
	///
	/// # Errors
	///
	/// A [`PathError`] here means the path does not belong to this route.
	fn relative_match_params(&self, captures: &Captures) -> Result<Params, PathError>;

	/// Renders this level's literal path fragment.
	///
	/// # Errors
	///
	/// Returns a [`PathError`] when `params` lacks or mistypes a value this
	/// level needs.
	fn relative_path(&self, params: &Params) -> Result<String, PathError>;

	/// Resolves this level's display name.
	async fn name(&self, params: &Params) -> RouteResult<String>;
}

/// One node of a route hierarchy.
pub struct RouteFactory<T> {
	route_type: T,
	parent: Option<Arc<RouteFactory<T>>>,
	segment: Box<dyn RouteSegment>,
}

impl<T: Debug> Debug for RouteFactory<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteFactory")
			.field("route_type", &self.route_type)
			.field("segment", &self.segment)
			.field("parent", &self.parent.as_ref().map(|parent| &parent.route_type))
			.finish()
	}
}

impl<T: RouteType> RouteFactory<T> {
	/// Creates a root factory.
	pub fn new<S>(route_type: T, segment: S) -> Self
	where
		S: RouteSegment + 'static,
	{
		Self {
			route_type,
			parent: None,
			segment: Box::new(segment),
		}
	}

	/// Creates a factory nested under `parent`.
	///
	/// The parent is shared, never mutated, and holds no reference back to
	/// its children.
	pub fn with_parent<S>(parent: &Arc<RouteFactory<T>>, route_type: T, segment: S) -> Self
	where
		S: RouteSegment + 'static,
	{
		Self {
			route_type,
			parent: Some(Arc::clone(parent)),
			segment: Box::new(segment),
		}
	}

	/// Returns the discriminator.
	pub fn route_type(&self) -> &T {
		&self.route_type
	}

	/// Returns the parent factory, if any.
	pub fn parent(&self) -> Option<&Arc<RouteFactory<T>>> {
		self.parent.as_ref()
	}

	/// Returns this level's hooks.
	pub fn segment(&self) -> &dyn RouteSegment {
		self.segment.as_ref()
	}

	/// Number of ancestors above this factory.
	pub fn depth(&self) -> usize {
		self.parent.as_ref().map_or(0, |parent| parent.depth() + 1)
	}

	/// Returns the chain from the root down to `self`.
	pub fn ancestry(&self) -> Vec<&RouteFactory<T>> {
		let mut chain = Vec::with_capacity(self.depth() + 1);
		let mut current = Some(self);
		while let Some(factory) = current {
			chain.push(factory);
			current = factory.parent.as_deref();
		}
		chain.reverse();
		chain
	}

	/// Returns the full pattern source: ancestor fragments first.
	pub fn matcher(&self) -> String {
		let relative = self.segment.relative_matcher();
		match &self.parent {
			Some(parent) => {
				let mut matcher = parent.matcher();
				matcher.push_str(&relative);
				matcher
			}
			None => relative.into_owned(),
		}
	}

	/// Compiles [`matcher`](Self::matcher) into a pattern anchored at the end
	/// of the path.
	///
	/// # Errors
	///
	/// Returns [`RouteError::InvalidPattern`](crate::RouteError::InvalidPattern)
	/// for a malformed composed pattern, including capture names reused
	/// between levels.
	pub fn compile_matcher(&self) -> RouteResult<PathPattern> {
		PathPattern::new(&self.matcher())
	}

	/// Renders the full path for `params`: ancestor fragments first.
	pub fn path(&self, params: &Params) -> RouteResult<String> {
		let relative = self.segment.relative_path(params)?;
		match &self.parent {
			Some(parent) => {
				let mut path = parent.path(params)?;
				path.push_str(&relative);
				Ok(path)
			}
			None => Ok(relative),
		}
	}

	/// Parses the params of every level from one set of captures.
	///
	/// This level's keys take precedence over keys inherited from ancestors.
	pub fn match_params(&self, captures: &Captures) -> Result<Params, PathError> {
		let own = self.segment.relative_match_params(captures)?;
		match &self.parent {
			Some(parent) => Ok(own.merged_over(parent.match_params(captures)?)),
			None => Ok(own),
		}
	}

	/// Builds a route for `params`.
	pub fn create(&self, params: Params) -> RouteResult<Route<T>> {
		let path = self.path(&params)?;
		Ok(Route::new(self.route_type.clone(), path, params))
	}

	/// Parses `path` into a route of this type.
	///
	/// Returns `Ok(None)` when the path does not belong to this factory.
	///
	/// # Errors
	///
	/// Only authoring errors are reported: a composed pattern that does not
	/// compile, or hooks that cannot re-render what they parsed.
	pub fn create_from_path(&self, path: &str) -> RouteResult<Option<Route<T>>> {
		let pattern = self.compile_matcher()?;
		self.create_from_match(&pattern, path)
	}

	/// Matches `path` against an already compiled copy of this factory's
	/// matcher.
	pub(crate) fn create_from_match(
		&self,
		pattern: &PathPattern,
		path: &str,
	) -> RouteResult<Option<Route<T>>> {
		let Some(captures) = pattern.matches(path) else {
			return Ok(None);
		};

		match self.match_params(&captures) {
			Ok(params) => self.create(params).map(Some),
			Err(err) => {
				tracing::debug!(
					route_type = ?self.route_type,
					path,
					"path matched pattern but params were rejected: {}",
					err
				);
				Ok(None)
			}
		}
	}

	/// Display name of this level alone.
	pub async fn name(&self, params: &Params) -> RouteResult<String> {
		self.segment.name(params).await
	}

	/// One name lookup per level, root first, `self` last.
	///
	/// The futures are independent; awaiting them in any order or
	/// concurrently yields the same list. Use
	/// [`cascade_names_all`](Self::cascade_names_all) to await them together.
	pub fn cascade_names<'a>(
		&'a self,
		params: &'a Params,
	) -> Vec<BoxFuture<'a, RouteResult<String>>> {
		self.ancestry()
			.into_iter()
			.map(|factory| factory.segment.name(params))
			.collect()
	}

	/// Awaits every [`cascade_names`](Self::cascade_names) future
	/// concurrently, keeping root-first order.
	pub async fn cascade_names_all(&self, params: &Params) -> RouteResult<Vec<String>> {
		try_join_all(self.cascade_names(params)).await
	}

	/// Full path of every level, root first.
	///
	/// Each entry extends the previous one: `["/a", "/a/b", "/a/b/c"]`.
	pub fn cascade_paths(&self, params: &Params) -> RouteResult<Vec<String>> {
		self.ancestry()
			.into_iter()
			.map(|factory| factory.path(params))
			.collect()
	}
}

/// A factory paired with its compiled matcher.
///
/// Compiling once and scanning many times keeps per-call resolution free of
/// authoring errors.
#[derive(Debug, Clone)]
pub struct CompiledFactory<T> {
	factory: Arc<RouteFactory<T>>,
	pattern: PathPattern,
}

impl<T: RouteType> CompiledFactory<T> {
	/// Compiles the factory's full matcher.
	pub fn new(factory: Arc<RouteFactory<T>>) -> RouteResult<Self> {
		let pattern = factory.compile_matcher()?;
		Ok(Self { factory, pattern })
	}

	/// Returns the factory.
	pub fn factory(&self) -> &Arc<RouteFactory<T>> {
		&self.factory
	}

	/// Returns the compiled matcher.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Parses `path` with the precompiled matcher.
	pub fn create_from_path(&self, path: &str) -> RouteResult<Option<Route<T>>> {
		self.factory.create_from_match(&self.pattern, path)
	}
}
