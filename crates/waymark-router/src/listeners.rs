//! Listener registry for change notifications.

use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Handle returned when connecting a listener, used to disconnect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Shared listener callback.
pub type ListenerFn<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// An ordered set of callbacks receiving `&E`.
///
/// Listeners run in connection order. Emitting snapshots the set first, so
/// a listener may connect or disconnect listeners (itself included) without
/// deadlocking; such changes apply from the next emission.
pub struct Listeners<E: ?Sized> {
	next_id: AtomicU64,
	entries: RwLock<Vec<(ListenerId, ListenerFn<E>)>>,
}

impl<E: ?Sized> std::fmt::Debug for Listeners<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Listeners")
			.field("count", &self.len())
			.finish()
	}
}

impl<E: ?Sized> Default for Listeners<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E: ?Sized> Listeners<E> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			next_id: AtomicU64::new(0),
			entries: RwLock::new(Vec::new()),
		}
	}

	/// Connects a listener.
	pub fn connect<F>(&self, listener: F) -> ListenerId
	where
		F: Fn(&E) + Send + Sync + 'static,
	{
		self.connect_shared(Arc::new(listener))
	}

	/// Connects an already shared listener.
	pub fn connect_shared(&self, listener: ListenerFn<E>) -> ListenerId {
		let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
		self.entries.write().push((id, listener));
		id
	}

	/// Disconnects a listener. Returns `false` if it was not connected.
	pub fn disconnect(&self, id: ListenerId) -> bool {
		let mut entries = self.entries.write();
		let before = entries.len();
		entries.retain(|(existing, _)| *existing != id);
		entries.len() != before
	}

	/// Calls every listener with `event`, returning how many ran.
	pub fn emit(&self, event: &E) -> usize {
		let snapshot: Vec<ListenerFn<E>> = self
			.entries
			.read()
			.iter()
			.map(|(_, listener)| Arc::clone(listener))
			.collect();

		for listener in &snapshot {
			listener(event);
		}
		snapshot.len()
	}

	/// Returns the number of connected listeners.
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	/// Returns whether no listener is connected.
	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}
}
