//! The location abstraction the router reads from and navigates through.
//!
//! In a browser the location is backed by the History API; elsewhere
//! [`MemoryLocation`] keeps the current path in process. The router treats
//! whatever [`Location::path`] returns as the single string to match and
//! never parses query strings or fragments itself.

use crate::error::RouteResult;
use crate::listeners::{ListenerId, Listeners};
use parking_lot::RwLock;
use std::sync::Arc;

/// Callback invoked with the new path after the location changes.
pub type PathListener = Arc<dyn Fn(&str) + Send + Sync>;

/// Current navigable path plus a change notification.
pub trait Location: Send + Sync {
	/// Returns the current path.
	fn path(&self) -> String;

	/// Navigates to `path`.
	///
	/// # Errors
	///
	/// Returns [`RouteError::NavigationFailed`](crate::RouteError::NavigationFailed)
	/// when the environment refuses the navigation.
	fn go_to(&self, path: &str) -> RouteResult<()>;

	/// Registers a listener for path changes.
	fn subscribe(&self, listener: PathListener) -> ListenerId;

	/// Removes a listener. Returns `false` if it was not registered.
	fn unsubscribe(&self, id: ListenerId) -> bool;
}

/// In-process [`Location`].
///
/// Navigating to the current path again is a no-op and notifies nobody.
#[derive(Debug)]
pub struct MemoryLocation {
	path: RwLock<String>,
	listeners: Listeners<str>,
}

impl Default for MemoryLocation {
	fn default() -> Self {
		Self::new("/")
	}
}

impl MemoryLocation {
	/// Creates a location positioned at `initial`.
	pub fn new(initial: impl Into<String>) -> Self {
		Self {
			path: RwLock::new(initial.into()),
			listeners: Listeners::new(),
		}
	}

	/// Returns the number of subscribed listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}
}

impl Location for MemoryLocation {
	fn path(&self) -> String {
		self.path.read().clone()
	}

	fn go_to(&self, path: &str) -> RouteResult<()> {
		{
			let mut current = self.path.write();
			if *current == path {
				return Ok(());
			}
			*current = path.to_string();
		}

		let notified = self.listeners.emit(path);
		tracing::debug!(path, notified, "location changed");
		Ok(())
	}

	fn subscribe(&self, listener: PathListener) -> ListenerId {
		self.listeners.connect_shared(listener)
	}

	fn unsubscribe(&self, id: ListenerId) -> bool {
		self.listeners.disconnect(id)
	}
}
