//! Typed change notification.
//!
//! State objects and the collection notify their dependents through
//! [`Subscribers<E>`]: explicit, typed callback registration with synchronous,
//! in-order delivery. A mutation first settles the new state, then emits; a
//! receiver observing an event always sees fully-updated state.

use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

type Receiver<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Handle returned by [`Subscribers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// A registry of typed event receivers.
///
/// Receivers are invoked synchronously, in registration order. The receiver
/// list is snapshotted before dispatch, so a receiver may subscribe or
/// unsubscribe re-entrantly; such changes take effect from the next emit.
pub struct Subscribers<E> {
	receivers: Arc<RwLock<Vec<(u64, Receiver<E>)>>>,
	next_id: Arc<AtomicU64>,
}

impl<E> Subscribers<E> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			receivers: Arc::new(RwLock::new(Vec::new())),
			next_id: Arc::new(AtomicU64::new(1)),
		}
	}

	/// Registers a receiver and returns its subscription handle.
	pub fn subscribe<F>(&self, receiver: F) -> Subscription
	where
		F: Fn(&E) + Send + Sync + 'static,
	{
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		self.receivers.write().push((id, Arc::new(receiver)));
		Subscription(id)
	}

	/// Removes a receiver. Unknown handles are ignored.
	pub fn unsubscribe(&self, subscription: Subscription) {
		self.receivers.write().retain(|(id, _)| *id != subscription.0);
	}

	/// Number of registered receivers.
	pub fn len(&self) -> usize {
		self.receivers.read().len()
	}

	/// Returns true when no receivers are registered.
	pub fn is_empty(&self) -> bool {
		self.receivers.read().is_empty()
	}

	/// Delivers `event` to every receiver, in registration order.
	pub fn emit(&self, event: &E) {
		// Snapshot outside the lock so receivers can re-enter the registry.
		let snapshot: Vec<Receiver<E>> = self
			.receivers
			.read()
			.iter()
			.map(|(_, r)| Arc::clone(r))
			.collect();
		for receiver in snapshot {
			receiver(event);
		}
	}
}

impl<E> Clone for Subscribers<E> {
	fn clone(&self) -> Self {
		Self {
			receivers: Arc::clone(&self.receivers),
			next_id: Arc::clone(&self.next_id),
		}
	}
}

impl<E> Default for Subscribers<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E> std::fmt::Debug for Subscribers<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Subscribers")
			.field("receivers", &self.len())
			.finish()
	}
}
