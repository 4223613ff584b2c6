use core::{
    fmt::{self, Debug, Display, Formatter},
    sync::atomic::{AtomicU64, Ordering},
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, debug_span};

use crate::{
    config::Config,
    errors::ResolveErrorKind,
    instantiator::{boxed_factory, boxed_singleton_factory, instance, BoxedCloneProducer, Factory, Injectable},
    lock::LockedContainer,
    registry::Registry,
    scope::ScopeGuard,
    tag::{Tag, TagInfo},
};

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContainerId(u64);

impl ContainerId {
    #[inline]
    #[must_use]
    fn next() -> Self {
        Self(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for ContainerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// IoC container: a binding table from tags to producers and the scope in which tags are resolved.
///
/// Clones are handles to the same container.
#[derive(Clone)]
pub struct Container {
    pub(crate) inner: Arc<ContainerInner>,
}

pub(crate) struct ContainerInner {
    pub(crate) id: ContainerId,
    pub(crate) registry: Mutex<Registry>,
}

impl Default for Container {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.inner.id)
            .field("bindings", &self.inner.registry.lock().len())
            .finish()
    }
}

impl Container {
    /// Creates container with an empty binding table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        let id = ContainerId::next();
        debug!(container = id.get(), "Container created");

        Self {
            inner: Arc::new(ContainerInner {
                id,
                registry: Mutex::new(Registry::new()),
            }),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> ContainerId {
        self.inner.id
    }

    /// Registers a factory, it's called on each resolution of the tag
    ///
    /// # Warning
    /// Don't capture the container itself (or its [`LockedContainer`]) in the factory:
    /// the binding table owns the factory, so the container would never be freed.
    /// Tags read inside the factory are already resolved against this container.
    #[inline]
    pub fn register_factory<F>(&self, tag: &Tag<F::Provides>, factory: F) -> &Self
    where
        F: Factory + Send + Sync,
    {
        self.bind(tag.info(), boxed_factory(factory));
        self
    }

    /// Registers a factory in singleton mode.
    /// It's called lazily on the first resolution of the tag and the value is reused for all next resolutions.
    ///
    /// # Notes
    /// If the factory fails, nothing is cached and the next resolution calls it again
    #[inline]
    pub fn register_factory_singleton<F>(&self, tag: &Tag<F::Provides>, factory: F) -> &Self
    where
        F: Factory + Send + Sync,
        F::Provides: Clone + Send,
    {
        self.bind(tag.info(), boxed_singleton_factory(factory));
        self
    }

    /// Registers a factory in singleton or transient mode depending on [`Config::cache_provides`]
    #[inline]
    pub fn register_factory_with_config<F>(&self, tag: &Tag<F::Provides>, factory: F, config: Config) -> &Self
    where
        F: Factory + Send + Sync,
        F::Provides: Clone + Send,
    {
        if config.cache_provides {
            self.register_factory_singleton(tag, factory)
        } else {
            self.register_factory(tag, factory)
        }
    }

    /// Registers [`Injectable`] type, it's constructed on each resolution of the tag
    #[inline]
    pub fn register_class<T: Injectable>(&self, tag: &Tag<T>) -> &Self {
        self.register_factory(tag, T::construct)
    }

    /// Registers [`Injectable`] type in singleton mode, it's constructed once and reused for all resolutions of the tag
    #[inline]
    pub fn register_class_singleton<T>(&self, tag: &Tag<T>) -> &Self
    where
        T: Injectable + Clone + Send,
    {
        self.register_factory_singleton(tag, T::construct)
    }

    /// Registers a value created outside the container, each resolution returns its clone.
    /// Use [`Arc`] to share the same instance.
    #[inline]
    pub fn register_instance<T>(&self, tag: &Tag<T>, value: T) -> &Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.register_factory(tag, instance(value))
    }

    /// Resolves the value registered for the tag, including all dependencies the factory resolves
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::Unregistered`] if the tag or one of the required dependencies isn't registered
    /// - Returns [`ResolveErrorKind::Factory`] if the factory or a factory of its dependencies fails
    #[inline]
    pub fn resolve<T: 'static>(&self, tag: &Tag<T>) -> Result<T, ResolveErrorKind> {
        self.scope(|| tag.resolve_required())
    }

    /// Calls the function with the container active, so tags read inside it are resolved against the container
    ///
    /// # Errors
    /// Returns errors of the function as is
    #[inline]
    pub fn resolve_factory<T, E>(&self, factory: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        self.scope(factory)
    }

    /// Returns `true` if the tag has a registration in the container
    #[inline]
    #[must_use]
    pub fn is_registered<T: 'static>(&self, tag: &Tag<T>) -> bool {
        self.inner.registry.lock().contains(&tag.info().id)
    }

    /// Creates a view of the container with resolve methods only
    #[inline]
    #[must_use]
    pub fn lock(&self) -> LockedContainer {
        LockedContainer::new(self.clone())
    }
}

impl Container {
    #[inline]
    pub(crate) fn scope<R>(&self, action: impl FnOnce() -> R) -> R {
        let _guard = ScopeGuard::enter(self.clone());
        action()
    }

    pub(crate) fn bind(&self, tag: TagInfo, producer: BoxedCloneProducer) {
        let span = debug_span!("register", tag = tag.id.get(), provides = tag.short_type_name(), container = self.inner.id.get());
        let _guard = span.enter();

        let replaced = self.inner.registry.lock().insert(tag.id, producer);
        if replaced.is_some() {
            debug!("Replaced previous registration");
        } else {
            debug!("Registered");
        }
    }
}

/// Creates a new IoC container
#[inline]
#[must_use]
pub fn spawn_container() -> Container {
    Container::new()
}
