//! Immutable, value-passing navigation.

use crate::error::RouteResult;
use crate::factory::{RouteFactory, RouteType};
use crate::location::Location;
use crate::params::Params;
use crate::resolve::{FactoryIndex, RouteFactoryService};
use crate::route::Route;
use std::sync::Arc;

/// A side-effect-free alternative to [`RouteService`](crate::RouteService).
///
/// A navigator holds the ordered factories and an optional pending
/// destination. Navigating returns a *new* navigator; the original is left
/// untouched. Nothing reaches the location until [`commit`](Self::commit)
/// is called.
///
/// Unlike the service, the navigator keeps no memo: every query reads the
/// location path afresh.
#[derive(Clone)]
pub struct RouteNavigator<T: RouteType> {
	index: Arc<FactoryIndex<T>>,
	location: Arc<dyn Location>,
	destination: Option<Route<T>>,
}

impl<T: RouteType> std::fmt::Debug for RouteNavigator<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteNavigator")
			.field("factories", &self.index.len())
			.field("destination", &self.destination)
			.finish()
	}
}

impl<T: RouteType> RouteNavigator<T> {
	/// Compiles the factories of `service` and reads paths from `location`.
	///
	/// # Errors
	///
	/// Same as [`FactoryIndex::build`].
	pub fn new<S>(location: Arc<dyn Location>, service: &S) -> RouteResult<Self>
	where
		S: RouteFactoryService<T> + ?Sized,
	{
		Ok(Self {
			index: Arc::new(FactoryIndex::build(service)?),
			location,
			destination: None,
		})
	}

	/// First-match resolution of the current location path.
	pub fn current_match(&self) -> Option<Route<T>> {
		self.index.resolve(&self.location.path())
	}

	/// Matches the current path against `factory` alone, skipping the scan
	/// over every registered factory.
	///
	/// A registered factory reuses its compiled matcher; any other factory
	/// (an ancestor, say) is compiled for this call.
	///
	/// # Errors
	///
	/// Only authoring errors of an unregistered `factory` are reported.
	pub fn route(&self, factory: &RouteFactory<T>) -> RouteResult<Option<Route<T>>> {
		let path = self.location.path();
		match self.index.get(factory.route_type()) {
			Some(compiled) if std::ptr::eq(compiled.factory().as_ref(), factory) => {
				compiled.create_from_path(&path)
			}
			_ => factory.create_from_path(&path),
		}
	}

	/// Returns a navigator whose destination is `factory` with `params`.
	///
	/// # Errors
	///
	/// Returns [`RouteError::Path`](crate::RouteError::Path) if `params`
	/// cannot be rendered.
	pub fn go_to(&self, factory: &RouteFactory<T>, params: Params) -> RouteResult<Self> {
		let destination = factory.create(params)?;
		Ok(Self {
			index: Arc::clone(&self.index),
			location: Arc::clone(&self.location),
			destination: Some(destination),
		})
	}

	/// Returns the pending destination, if any.
	pub fn destination(&self) -> Option<&Route<T>> {
		self.destination.as_ref()
	}

	/// Pushes the pending destination to the location.
	///
	/// Returns `false` when there is no destination.
	pub fn commit(&self) -> RouteResult<bool> {
		match &self.destination {
			Some(route) => {
				tracing::debug!(
					route_type = ?route.route_type(),
					path = route.path(),
					"committing navigator destination"
				);
				self.location.go_to(route.path())?;
				Ok(true)
			}
			None => Ok(false),
		}
	}

	/// Iterates the registered factories in priority order.
	pub fn factories(&self) -> impl Iterator<Item = &Arc<RouteFactory<T>>> {
		self.index.iter()
	}
}
