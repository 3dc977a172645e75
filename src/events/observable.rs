//! Observable values.
//!
//! An [`ObservableValue`] wraps a value and fires its
//! [`on_change`](ObservableValue::on_change) [`Signal`] whenever a write
//! actually changes it. HUD items bind to observables through
//! [`crate::systems::hud`] to keep their text in sync.
//!
//! The handle is cheap to clone; every clone refers to the same value and the
//! same signal.
//!
//! # Example
//!
//! ```ignore
//! let score = ObservableValue::new(0);
//! score.on_change().add(&Listener::new(|_world, v| info!("score is now {v}")));
//! score.change_by(&mut world, 10); // fires with 10
//! score.set(&mut world, 10);       // same value, nothing fires
//! ```

use std::fmt;
use std::ops::Add;
use std::sync::{Arc, Mutex, PoisonError};

use bevy_ecs::prelude::World;

use crate::events::signal::{Listener, Signal};

struct Inner<T> {
    value: Mutex<T>,
    on_change: Signal<T>,
}

/// Shared value with a change signal.
pub struct ObservableValue<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for ObservableValue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq> ObservableValue<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: Mutex::new(initial),
                on_change: Signal::new(),
            }),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.inner
            .value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Store `value` and notify listeners if it differs from the current one.
    ///
    /// The value is stored before listeners run, so a listener calling
    /// [`get`](Self::get) sees the new value.
    pub fn set(&self, world: &mut World, value: T) {
        {
            let mut current = self
                .inner
                .value
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if *current == value {
                return;
            }
            *current = value.clone();
        }
        if self.inner.on_change.has_listeners() {
            self.inner.on_change.dispatch(world, value);
        }
    }

    /// The change signal. Listeners receive the new value.
    pub fn on_change(&self) -> &Signal<T> {
        &self.inner.on_change
    }

    /// Shorthand for `on_change().add(listener)`.
    pub fn subscribe(&self, listener: &Listener<T>) {
        self.inner.on_change.add(listener);
    }

    /// Returns `true` if both handles refer to the same observable.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> ObservableValue<T>
where
    T: Clone + PartialEq + Add<Output = T>,
{
    /// Add `amount` to the current value.
    pub fn change_by(&self, world: &mut World, amount: T) {
        let next = self.get() + amount;
        self.set(world, next);
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.inner.value.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("ObservableValue")
            .field("value", &*value)
            .field("on_change", &self.inner.on_change)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_value_roundtrip() {
        let mut world = World::new();
        let name = ObservableValue::new(String::from("Initial"));
        assert_eq!(name.get(), "Initial");
        name.set(&mut world, "Updated".to_string());
        assert_eq!(name.get(), "Updated");
    }

    #[test]
    fn test_change_by_adds() {
        let mut world = World::new();
        let lives = ObservableValue::new(10);
        lives.change_by(&mut world, 5);
        assert_eq!(lives.get(), 15);
        lives.change_by(&mut world, -20);
        assert_eq!(lives.get(), -5);
    }

    #[test]
    fn test_change_fires_with_new_value() {
        let mut world = World::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let score = ObservableValue::new(0);
        {
            let seen = Arc::clone(&seen);
            score.subscribe(&Listener::new(move |_world: &mut World, v: i32| {
                seen.lock().unwrap().push(v);
            }));
        }

        score.set(&mut world, 42);
        assert_eq!(*seen.lock().unwrap(), vec![42]);
    }

    #[test]
    fn test_equal_write_does_not_fire() {
        let mut world = World::new();
        let fired = Arc::new(Mutex::new(0));
        let score = ObservableValue::new(7);
        {
            let fired = Arc::clone(&fired);
            score.subscribe(&Listener::new(move |_world: &mut World, _v: i32| {
                *fired.lock().unwrap() += 1;
            }));
        }

        score.set(&mut world, 7);
        score.change_by(&mut world, 0);
        assert_eq!(*fired.lock().unwrap(), 0);
    }

    #[test]
    fn test_listener_reads_stored_value() {
        let mut world = World::new();
        let score = ObservableValue::new(1.0f32);
        let observed = Arc::new(Mutex::new(None));
        {
            let handle = score.clone();
            let observed = Arc::clone(&observed);
            score.subscribe(&Listener::new(move |_world: &mut World, _v: f32| {
                *observed.lock().unwrap() = Some(handle.get());
            }));
        }
        score.set(&mut world, 2.5);
        assert_eq!(*observed.lock().unwrap(), Some(2.5));
    }

    #[test]
    fn test_clones_share_state() {
        let mut world = World::new();
        let a = ObservableValue::new(3u32);
        let b = a.clone();
        b.set(&mut world, 4);
        assert_eq!(a.get(), 4);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&ObservableValue::new(4u32)));
    }
}
