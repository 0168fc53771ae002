//! Capped object pool.
//!
//! [`ObjectPool<T>`] keeps released values on a stack and hands them back out
//! before building new ones. `max_size` bounds the number of live values the
//! pool has built: once that many exist and none are idle,
//! [`ObjectPool::try_take`] returns `None` until something is given back.
//!
//! Optional hooks run on every value handed out and every value returned.
//! [`ObjectPool::activating`] wires them to [`Activatable::set_enabled`] so
//! pooled components are switched on when taken and off when released.
//!
//! # Usage
//!
//! ```ignore
//! let mut bullets = ObjectPool::new(64, || Bullet::default());
//! bullets.prewarm(16);
//! if let Some(b) = bullets.try_take() {
//!     // ...
//!     bullets.give_back(b);
//! }
//! ```

use bevy_ecs::prelude::Resource;

use crate::components::activatable::Activatable;

type Hook<T> = Box<dyn Fn(&mut T) + Send + Sync>;

/// Stack of reusable values with a cap on live instances.
#[derive(Resource)]
pub struct ObjectPool<T: Send + Sync + 'static> {
    items: Vec<T>,
    max_size: usize,
    factory: Box<dyn Fn() -> T + Send + Sync>,
    on_get: Option<Hook<T>>,
    on_release: Option<Hook<T>>,
    created: usize,
}

impl<T: Send + Sync + 'static> ObjectPool<T> {
    /// Create an empty pool that builds at most `max_size` live values.
    pub fn new(max_size: usize, factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            items: Vec::with_capacity(max_size),
            max_size,
            factory: Box::new(factory),
            on_get: None,
            on_release: None,
            created: 0,
        }
    }

    /// Run `hook` on every value handed out by [`ObjectPool::try_take`].
    pub fn with_on_get(mut self, hook: impl Fn(&mut T) + Send + Sync + 'static) -> Self {
        self.on_get = Some(Box::new(hook));
        self
    }

    /// Run `hook` on every value passed to [`ObjectPool::give_back`].
    pub fn with_on_release(mut self, hook: impl Fn(&mut T) + Send + Sync + 'static) -> Self {
        self.on_release = Some(Box::new(hook));
        self
    }

    /// Fill the pool with up to `count` fresh values, never past `max_size`.
    pub fn prewarm(&mut self, count: usize) {
        let target = count.min(self.max_size);
        while self.items.len() < target && self.created < self.max_size {
            let item = (self.factory)();
            self.created += 1;
            self.items.push(item);
        }
    }

    /// Pop an idle value, or build one while under `max_size`.
    ///
    /// Returns `None` when the pool is exhausted.
    pub fn try_take(&mut self) -> Option<T> {
        let mut item = match self.items.pop() {
            Some(item) => item,
            None if self.created < self.max_size => {
                self.created += 1;
                (self.factory)()
            }
            None => return None,
        };
        if let Some(hook) = &self.on_get {
            hook(&mut item);
        }
        Some(item)
    }

    /// Return a value. Returns `false` if the pool was full and the value dropped.
    pub fn give_back(&mut self, mut item: T) -> bool {
        if let Some(hook) = &self.on_release {
            hook(&mut item);
        }
        // Only values built elsewhere can overflow: pool-built ones always fit.
        if self.items.len() >= self.max_size {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Number of idle values.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Live values built by the factory: idle ones plus those handed out.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Drop every idle value, freeing room for new ones.
    pub fn clear(&mut self) {
        self.created = self.created.saturating_sub(self.items.len());
        self.items.clear();
    }
}

impl<T: Activatable + Send + Sync + 'static> ObjectPool<T> {
    /// Pool whose values are enabled when taken and disabled when given back.
    pub fn activating(max_size: usize, factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self::new(max_size, factory)
            .with_on_get(|item: &mut T| item.set_enabled(true))
            .with_on_release(|item: &mut T| item.set_enabled(false))
    }
}
