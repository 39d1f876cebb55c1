// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable view instances.

use core::fmt;

/// Source of recyclable view instances.
///
/// The grid acquires an instance for each new identity, calls
/// [`InstancePool::activate`] on it, and releases it when its identity leaves
/// the item set.
pub trait InstancePool {
    /// The pooled view type.
    type Instance;

    /// Take an instance, reusing an idle one when possible.
    fn acquire(&mut self) -> Self::Instance;

    /// Return an instance to the pool.
    fn release(&mut self, instance: Self::Instance);

    /// Prepare an acquired instance for display.
    fn activate(&mut self, _instance: &mut Self::Instance) {}
}

/// A stack of idle instances backed by a factory.
///
/// The reset hook, if any, runs on every released instance before it becomes
/// idle.
pub struct VecPool<V> {
    idle: Vec<V>,
    factory: Box<dyn FnMut() -> V>,
    reset: Option<Box<dyn FnMut(&mut V)>>,
    created: usize,
}

impl<V> fmt::Debug for VecPool<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecPool")
            .field("idle", &self.idle.len())
            .field("created", &self.created)
            .finish_non_exhaustive()
    }
}

impl<V> VecPool<V> {
    /// An empty pool creating instances with `factory`.
    pub fn new(factory: impl FnMut() -> V + 'static) -> Self {
        Self {
            idle: Vec::new(),
            factory: Box::new(factory),
            reset: None,
            created: 0,
        }
    }

    /// Run `reset` on every instance as it is released.
    #[must_use]
    pub fn with_reset(mut self, reset: impl FnMut(&mut V) + 'static) -> Self {
        self.reset = Some(Box::new(reset));
        self
    }

    /// Number of idle instances.
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Number of instances the factory has produced.
    pub fn created_count(&self) -> usize {
        self.created
    }
}

impl<V> InstancePool for VecPool<V> {
    type Instance = V;

    fn acquire(&mut self) -> V {
        if let Some(instance) = self.idle.pop() {
            return instance;
        }
        self.created += 1;
        (self.factory)()
    }

    fn release(&mut self, mut instance: V) {
        if let Some(reset) = &mut self.reset {
            reset(&mut instance);
        }
        self.idle.push(instance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_released_instances() {
        let mut next = 0;
        let mut pool = VecPool::new(move || {
            next += 1;
            next
        });
        let a = pool.acquire();
        let b = pool.acquire();
        assert_eq!((a, b), (1, 2));
        pool.release(a);
        assert_eq!(pool.idle_count(), 1);
        assert_eq!(pool.acquire(), 1);
        assert_eq!(pool.created_count(), 2);
    }

    #[test]
    fn reset_hook_runs_on_release() {
        let mut pool = VecPool::new(|| vec![0_u8; 4]).with_reset(Vec::clear);
        let mut buf = pool.acquire();
        buf.push(9);
        pool.release(buf);
        assert!(pool.acquire().is_empty());
    }
}
