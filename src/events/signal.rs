//! Typed publish/subscribe primitive.
//!
//! A [`Signal`] holds an ordered list of [`Listener`]s and calls each one when
//! [`Signal::dispatch`] runs. It is the building block for state behaviors
//! ([`Behaviors`](crate::resources::behaviors::Behaviors)), tile enter/exit
//! events ([`TileEvents`](crate::resources::tileevents::TileEvents)) and
//! [`ObservableValue`](crate::events::observable::ObservableValue).
//!
//! # Identity
//!
//! Closures have no identity of their own, so a handler is wrapped in a
//! [`Listener`], a cheap shared handle. Clones of one `Listener` compare equal;
//! two listeners built from identical closures do not. Keep a clone around if
//! you intend to [`remove`](Signal::remove) it later.
//!
//! # Reentrancy
//!
//! Listeners receive `&mut World` and may add or remove listeners on the very
//! signal that is dispatching. Dispatch iterates over a snapshot taken when it
//! starts, so such changes only apply to later dispatches.
//!
//! # Example
//!
//! ```ignore
//! let signal: Signal<u32> = Signal::new();
//! let listener = Listener::new(|_world, value| println!("got {value}"));
//! signal.add(&listener);
//! signal.dispatch(&mut world, 7);
//! signal.remove(&listener);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bevy_ecs::prelude::World;
use smallvec::SmallVec;

type HandlerFn<T> = dyn Fn(&mut World, T) + Send + Sync;

/// Shared handle to a signal handler.
///
/// Equality is pointer identity of the wrapped closure.
pub struct Listener<T> {
    handler: Arc<HandlerFn<T>>,
}

impl<T> Listener<T> {
    /// Wrap a closure as a listener.
    pub fn new(handler: impl Fn(&mut World, T) + Send + Sync + 'static) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Invoke the wrapped handler.
    pub fn call(&self, world: &mut World, value: T) {
        (self.handler)(world, value);
    }
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T> PartialEq for Listener<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<T> Eq for Listener<T> {}

impl<T> fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Arc::as_ptr(&self.handler).cast::<()>())
            .finish()
    }
}

type ListenerList<T> = SmallVec<[Listener<T>; 4]>;

/// Ordered listener list with duplicate suppression.
///
/// All methods take `&self`; the list is guarded by a mutex that is released
/// before any listener runs.
pub struct Signal<T> {
    listeners: Mutex<ListenerList<T>>,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Signal<T> {
    /// Create a signal with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(SmallVec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListenerList<T>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe `listener`. Does nothing if it is already subscribed.
    pub fn add(&self, listener: &Listener<T>) {
        let mut listeners = self.lock();
        if !listeners.contains(listener) {
            listeners.push(listener.clone());
        }
    }

    /// Unsubscribe `listener`. Does nothing if it is not subscribed.
    pub fn remove(&self, listener: &Listener<T>) {
        let mut listeners = self.lock();
        if let Some(index) = listeners.iter().position(|l| l == listener) {
            listeners.remove(index);
        }
    }

    /// Returns `true` if `listener` is currently subscribed.
    pub fn contains(&self, listener: &Listener<T>) -> bool {
        self.lock().contains(listener)
    }

    /// Returns `true` if at least one listener is subscribed.
    pub fn has_listeners(&self) -> bool {
        !self.lock().is_empty()
    }

    /// Number of subscribed listeners.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no listener is subscribed.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every listener.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl<T: Clone> Signal<T> {
    /// Call every listener, in subscription order, with a clone of `value`.
    ///
    /// The listener list is snapshotted first; subscriptions changed by a
    /// listener take effect on the next dispatch.
    pub fn dispatch(&self, world: &mut World, value: T) {
        let snapshot: ListenerList<T> = self.lock().clone();
        for listener in &snapshot {
            listener.call(world, value.clone());
        }
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.len())
            .finish()
    }
}
