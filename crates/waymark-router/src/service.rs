//! The live binding between the current location and the active route.

use crate::error::{RouteError, RouteResult};
use crate::factory::{RouteFactory, RouteType};
use crate::listeners::{ListenerId, Listeners};
use crate::location::Location;
use crate::params::Params;
use crate::resolve::{FactoryIndex, RouteFactoryService};
use crate::route::Route;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Emitted to service listeners after the location changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChange<T> {
	/// The new location path.
	pub path: String,
	/// The route resolved for `path`, if any.
	pub route: Option<Route<T>>,
}

struct ServiceInner<T> {
	location: Arc<dyn Location>,
	index: FactoryIndex<T>,
	listeners: Listeners<RouteChange<T>>,
	/// Last `(path, route)` resolution.
	memo: Mutex<Option<(String, Option<Route<T>>)>>,
}

impl<T: RouteType> ServiceInner<T> {
	fn resolve_path(&self, path: &str) -> Option<Route<T>> {
		let mut memo = self.memo.lock();
		if let Some((cached_path, cached_route)) = memo.as_ref() {
			if cached_path == path {
				return cached_route.clone();
			}
		}

		let route = self.index.resolve(path);
		*memo = Some((path.to_string(), route.clone()));
		route
	}

	fn on_location_change(&self, path: &str) {
		let route = self.resolve_path(path);
		tracing::debug!(
			path,
			route_type = ?route.as_ref().map(Route::route_type),
			"route changed"
		);
		self.listeners.emit(&RouteChange {
			path: path.to_string(),
			route,
		});
	}
}

/// Resolves the current location against an ordered set of factories.
///
/// Resolution is first match in declared order, not best match. The service
/// subscribes to the location for its whole lifetime and re-emits each
/// change as a [`RouteChange`], so consumers never depend on the concrete
/// location mechanism.
///
/// ```
/// use std::sync::Arc;
/// use waymark_router::{MemoryLocation, Params, RouteFactory, RouteService};
///
/// let home = Arc::new(RouteFactory::simple("HOME", "", "Home"));
/// let settings = Arc::new(RouteFactory::simple_child(&home, "SETTINGS", "/settings", "Settings"));
///
/// let location = Arc::new(MemoryLocation::new("/settings"));
/// let service = RouteService::new(location, &vec![settings, home]).unwrap();
///
/// assert_eq!(service.route().unwrap().route_type(), &"SETTINGS");
/// service.navigate(&"HOME", Params::new()).unwrap();
/// assert_eq!(service.path(), "");
/// ```
pub struct RouteService<T: RouteType> {
	inner: Arc<ServiceInner<T>>,
	subscription: ListenerId,
}

impl<T: RouteType> std::fmt::Debug for RouteService<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteService")
			.field("factories", &self.inner.index.len())
			.field("listeners", &self.inner.listeners.len())
			.finish()
	}
}

impl<T: RouteType> RouteService<T> {
	/// Compiles the factories of `service` and binds to `location`.
	///
	/// # Errors
	///
	/// - [`RouteError::DuplicateRouteType`] if two factories share a type
	/// - [`RouteError::InvalidPattern`] if a matcher fails to compile
	pub fn new<S>(location: Arc<dyn Location>, service: &S) -> RouteResult<Self>
	where
		S: RouteFactoryService<T> + ?Sized,
	{
		let index = FactoryIndex::build(service)?;
		let inner = Arc::new(ServiceInner {
			location: Arc::clone(&location),
			index,
			listeners: Listeners::new(),
			memo: Mutex::new(None),
		});

		let weak: Weak<ServiceInner<T>> = Arc::downgrade(&inner);
		let subscription = location.subscribe(Arc::new(move |path: &str| {
			if let Some(inner) = weak.upgrade() {
				inner.on_location_change(path);
			}
		}));

		Ok(Self {
			inner,
			subscription,
		})
	}

	/// Returns the current location path.
	pub fn path(&self) -> String {
		self.inner.location.path()
	}

	/// Resolves the current location. `None` means no route is configured
	/// for the path.
	pub fn route(&self) -> Option<Route<T>> {
		let path = self.inner.location.path();
		self.inner.resolve_path(&path)
	}

	/// Looks up an explicitly registered factory by type.
	///
	/// Ancestors reached only through a parent chain are not indexed.
	pub fn route_factory(&self, route_type: &T) -> Option<&Arc<RouteFactory<T>>> {
		self.inner.index.get(route_type).map(|compiled| compiled.factory())
	}

	/// Iterates the registered factories in priority order.
	pub fn factories(&self) -> impl Iterator<Item = &Arc<RouteFactory<T>>> {
		self.inner.index.iter()
	}

	/// Navigates the location to `route`.
	pub fn go_to(&self, route: &Route<T>) -> RouteResult<()> {
		tracing::debug!(route_type = ?route.route_type(), path = route.path(), "navigating");
		self.inner.location.go_to(route.path())
	}

	/// Builds a route of `route_type` from `params` and navigates to it.
	///
	/// # Errors
	///
	/// - [`RouteError::UnknownRouteType`] if no such factory is registered
	/// - [`RouteError::Path`] if `params` cannot be rendered
	pub fn navigate(&self, route_type: &T, params: Params) -> RouteResult<Route<T>> {
		let factory = self
			.route_factory(route_type)
			.ok_or_else(|| RouteError::UnknownRouteType(format!("{:?}", route_type)))?;
		let route = factory.create(params)?;
		self.go_to(&route)?;
		Ok(route)
	}

	/// Registers a listener for route changes.
	pub fn subscribe<F>(&self, listener: F) -> ListenerId
	where
		F: Fn(&RouteChange<T>) + Send + Sync + 'static,
	{
		self.inner.listeners.connect(listener)
	}

	/// Removes a route change listener.
	pub fn unsubscribe(&self, id: ListenerId) -> bool {
		self.inner.listeners.disconnect(id)
	}

	/// Returns the location the service is bound to.
	pub fn location(&self) -> &Arc<dyn Location> {
		&self.inner.location
	}
}

impl<T: RouteType> Drop for RouteService<T> {
	fn drop(&mut self) {
		if !self.inner.location.unsubscribe(self.subscription) {
			tracing::warn!("route service location subscription was already removed");
		}
	}
}
