//! First-match resolution over an ordered factory collection.

use crate::error::{RouteError, RouteResult};
use crate::factory::{CompiledFactory, RouteFactory, RouteType};
use crate::route::Route;
use std::collections::HashMap;
use std::sync::Arc;

/// Supplies the factories an application recognises, most specific first.
///
/// Only the factories a path can resolve *to* need listing; their ancestors
/// take part in matching through the parent chain. The order is not
/// validated: a general pattern listed before a specific one shadows it.
pub trait RouteFactoryService<T>: Send + Sync {
	/// Returns the factories in priority order.
	fn route_factories(&self) -> Vec<Arc<RouteFactory<T>>>;
}

impl<T: RouteType> RouteFactoryService<T> for Vec<Arc<RouteFactory<T>>> {
	fn route_factories(&self) -> Vec<Arc<RouteFactory<T>>> {
		self.clone()
	}
}

impl<T: RouteType> RouteFactoryService<T> for [Arc<RouteFactory<T>>] {
	fn route_factories(&self) -> Vec<Arc<RouteFactory<T>>> {
		self.to_vec()
	}
}

/// Returns the first route any factory produces for `path`, in slice order.
///
/// This is a pure function of its inputs and never fails: a factory whose
/// hooks cannot re-render what they parsed is logged and skipped.
pub fn resolve<T: RouteType>(path: &str, factories: &[CompiledFactory<T>]) -> Option<Route<T>> {
	for compiled in factories {
		tracing::trace!(
			route_type = ?compiled.factory().route_type(),
			pattern = %compiled.pattern(),
			path,
			"trying route factory"
		);
		match compiled.create_from_path(path) {
			Ok(Some(route)) => return Some(route),
			Ok(None) => {}
			Err(err) => {
				tracing::warn!(
					route_type = ?compiled.factory().route_type(),
					path,
					"route factory failed to build a matched route: {}",
					err
				);
			}
		}
	}
	None
}

/// Compiled factories in priority order plus a type index.
///
/// Built once; read-only afterwards.
#[derive(Debug)]
pub struct FactoryIndex<T> {
	compiled: Vec<CompiledFactory<T>>,
	by_type: HashMap<T, usize>,
}

impl<T: RouteType> FactoryIndex<T> {
	/// Compiles and indexes the factories of `service`.
	///
	/// # Errors
	///
	/// - [`RouteError::DuplicateRouteType`] if two factories share a type
	/// - [`RouteError::InvalidPattern`] if a matcher fails to compile
	pub fn build<S>(service: &S) -> RouteResult<Self>
	where
		S: RouteFactoryService<T> + ?Sized,
	{
		let factories = service.route_factories();
		let mut compiled = Vec::with_capacity(factories.len());
		let mut by_type = HashMap::with_capacity(factories.len());

		for factory in factories {
			let route_type = factory.route_type().clone();
			if by_type.contains_key(&route_type) {
				return Err(RouteError::DuplicateRouteType(format!("{:?}", route_type)));
			}
			by_type.insert(route_type, compiled.len());
			compiled.push(CompiledFactory::new(factory)?);
		}

		tracing::debug!(factories = compiled.len(), "route factories compiled");
		Ok(Self { compiled, by_type })
	}

	/// First-match resolution of `path`.
	pub fn resolve(&self, path: &str) -> Option<Route<T>> {
		resolve(path, &self.compiled)
	}

	/// Looks up an explicitly registered factory by type.
	pub fn get(&self, route_type: &T) -> Option<&CompiledFactory<T>> {
		self.by_type
			.get(route_type)
			.map(|&index| &self.compiled[index])
	}

	/// Iterates the factories in priority order.
	pub fn iter(&self) -> impl Iterator<Item = &Arc<RouteFactory<T>>> {
		self.compiled.iter().map(CompiledFactory::factory)
	}

	/// Returns the number of registered factories.
	pub fn len(&self) -> usize {
		self.compiled.len()
	}

	/// Returns whether no factory is registered.
	pub fn is_empty(&self) -> bool {
		self.compiled.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::PathError;
	use crate::factory::RouteSegment;
	use crate::params::{Captures, ParamKind, Params};
	use crate::segments::ParamSegment;
	use async_trait::async_trait;
	use rstest::rstest;
	use std::borrow::Cow;

	/// Parses `/items` but can never render it back.
	#[derive(Debug)]
	struct UnrenderableSegment;

	#[async_trait]
	impl RouteSegment for UnrenderableSegment {
		fn relative_matcher(&self) -> Cow<'_, str> {
			Cow::Borrowed("/items")
		}

		fn relative_match_params(&self, _captures: &Captures) -> Result<Params, PathError> {
			Ok(Params::new())
		}

		fn relative_path(&self, _params: &Params) -> Result<String, PathError> {
			Err(PathError::MissingParameter("item_id".to_string()))
		}

		async fn name(&self, _params: &Params) -> RouteResult<String> {
			Ok("Items".to_string())
		}
	}

	fn factories() -> Vec<Arc<RouteFactory<&'static str>>> {
		let home = Arc::new(RouteFactory::simple("HOME", "", "Home"));
		factories_under(&home)
	}

	fn factories_under(
		home: &Arc<RouteFactory<&'static str>>,
	) -> Vec<Arc<RouteFactory<&'static str>>> {
		let bundles = Arc::new(RouteFactory::simple_child(home, "BUNDLES", "/bundles", "Bundles"));
		let new_bundle = Arc::new(RouteFactory::simple_child(&bundles, "NEW_BUNDLE", "/new", "New"));
		let bundle = Arc::new(RouteFactory::with_parent(
			&bundles,
			"BUNDLE",
			ParamSegment::new("/", "bundle_id", ParamKind::Str),
		));
		vec![new_bundle, bundle, bundles]
	}

	#[rstest]
	fn test_first_match_wins() {
		let index = FactoryIndex::build(&factories()).unwrap();

		// Both NEW_BUNDLE and BUNDLE match; NEW_BUNDLE is listed first.
		let route = index.resolve("/bundles/new").unwrap();
		assert_eq!(route.route_type(), &"NEW_BUNDLE");

		let route = index.resolve("/bundles/com.example").unwrap();
		assert_eq!(route.route_type(), &"BUNDLE");
		assert_eq!(route.params().get_str("bundle_id"), Some("com.example"));
	}

	#[rstest]
	fn test_order_reversed_shadows_specific_route() {
		let mut reversed = factories();
		reversed.swap(0, 1);
		let index = FactoryIndex::build(&reversed).unwrap();

		let route = index.resolve("/bundles/new").unwrap();
		assert_eq!(route.route_type(), &"BUNDLE");
		assert_eq!(route.params(), &Params::new().with("bundle_id", "new"));
	}

	#[rstest]
	#[case("/nowhere")]
	#[case("")]
	#[case("/bundles/a/b")]
	fn test_no_match_is_none(#[case] path: &str) {
		let index = FactoryIndex::build(&factories()).unwrap();
		assert_eq!(index.resolve(path), None);
	}

	#[rstest]
	fn test_unrenderable_factory_is_skipped() {
		let broken = Arc::new(RouteFactory::new("BROKEN", UnrenderableSegment));
		let items = Arc::new(RouteFactory::simple("ITEMS", "/items", "Items"));
		let index = FactoryIndex::build(&vec![broken.clone(), items]).unwrap();

		assert!(broken.create_from_path("/items").is_err());
		let route = index.resolve("/items").unwrap();
		assert_eq!(route.route_type(), &"ITEMS");
		assert_eq!(route.path(), "/items");
	}

	#[rstest]
	fn test_empty_root_listed_first_shadows_everything() {
		let home = Arc::new(RouteFactory::simple("HOME", "", "Home"));
		let mut factories = vec![Arc::clone(&home)];
		factories.extend(factories_under(&home));
		let index = FactoryIndex::build(&factories).unwrap();

		for path in ["", "/bundles", "/bundles/new", "/nowhere"] {
			assert_eq!(index.resolve(path).unwrap().route_type(), &"HOME");
		}
	}

	#[rstest]
	fn test_type_index_ignores_unlisted_ancestors() {
		let index = FactoryIndex::build(&factories()).unwrap();

		assert!(index.get(&"BUNDLE").is_some());
		assert!(index.get(&"BUNDLES").is_some());
		// HOME is only reachable as an ancestor.
		assert!(index.get(&"HOME").is_none());
		assert_eq!(index.len(), 3);
	}

	#[rstest]
	fn test_duplicate_types_are_rejected() {
		let mut duplicated = factories();
		duplicated.push(Arc::new(RouteFactory::simple("BUNDLE", "/other", "Other")));

		let err = FactoryIndex::build(&duplicated).unwrap_err();
		assert_eq!(err, RouteError::DuplicateRouteType("\"BUNDLE\"".to_string()));
	}

	#[rstest]
	fn test_invalid_matcher_fails_at_build() {
		let broken = vec![Arc::new(RouteFactory::simple("BROKEN", "/a/{oops", "Broken"))];
		assert!(matches!(
			FactoryIndex::build(&broken),
			Err(RouteError::InvalidPattern { .. })
		));
	}

	#[rstest]
	fn test_iter_preserves_declared_order() {
		let index = FactoryIndex::build(&factories()).unwrap();
		let types: Vec<_> = index.iter().map(|f| *f.route_type()).collect();
		assert_eq!(types, vec!["NEW_BUNDLE", "BUNDLE", "BUNDLES"]);
	}
}
