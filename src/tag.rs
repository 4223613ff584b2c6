use core::{
    any::{type_name, TypeId},
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
    marker::PhantomData,
    sync::atomic::{AtomicU64, Ordering},
};
use tracing::{debug, error, info_span};

use crate::{
    container::Container,
    errors::{ResolveErrorKind, ScopeErrorKind},
    instantiator::{boxed_factory, Factory},
    scope,
    service::Service as _,
};

static NEXT_TAG_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagId(u64);

impl TagId {
    #[inline]
    #[must_use]
    pub(crate) fn next() -> Self {
        Self(NEXT_TAG_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for TagId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagInfo {
    pub id: TagId,
    pub type_name: &'static str,
}

impl TagInfo {
    #[inline]
    #[must_use]
    fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TagId::next(),
            type_name: type_name::<T>(),
        }
    }

    #[inline]
    #[must_use]
    pub fn short_type_name(&self) -> &'static str {
        self.type_name.rsplit_once("::").map_or(self.type_name, |(_, name)| name)
    }
}

impl Display for TagInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.type_name)
    }
}

/// Opaque handle of an injectable slot of type `T`.
///
/// A tag holds no value, it's a key of container bindings and the entry point of resolution.
/// Copies of a tag refer to the same slot, separately created tags never do.
///
/// The accessors ([`Tag::resolve_required`], [`Tag::resolve_optional`], [`Tag::resolve_or`]) and [`Tag::register`]
/// work against the active container, i.e. only inside [`Container::resolve`] or [`Container::resolve_factory`]
/// (factories are called inside them too).
pub struct Tag<T> {
    info: TagInfo,
    _provides: PhantomData<fn() -> T>,
}

impl<T> Clone for Tag<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Tag<T> {}

impl<T> PartialEq for Tag<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.info.id == other.info.id
    }
}

impl<T> Eq for Tag<T> {}

impl<T> Hash for Tag<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.info.id.hash(state);
    }
}

impl<T> Debug for Tag<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("id", &self.info.id)
            .field("provides", &self.info.type_name)
            .finish()
    }
}

impl<T: 'static> Default for Tag<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Tag<T> {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            info: TagInfo::of::<T>(),
            _provides: PhantomData,
        }
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> TagId {
        self.info.id
    }

    #[inline]
    #[must_use]
    pub const fn info(&self) -> TagInfo {
        self.info
    }

    /// Registers a transient factory for this tag in the active container.
    /// A previous registration of the tag in the container is replaced.
    ///
    /// # Errors
    /// - Returns [`ScopeErrorKind::NoActiveContainer`] if it's called outside of a container scope
    pub fn register<F>(&self, factory: F) -> Result<(), ScopeErrorKind>
    where
        F: Factory<Provides = T> + Send + Sync,
    {
        let container = scope::current()?;
        container.bind(self.info, boxed_factory(factory));
        Ok(())
    }

    /// Resolves the value registered for this tag in the active container
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::Scope`] if it's called outside of a container scope
    /// - Returns [`ResolveErrorKind::Unregistered`] if the active container has no registration for the tag
    /// - Returns errors of the registered factory
    pub fn resolve_required(&self) -> Result<T, ResolveErrorKind> {
        let container = scope::current()?;
        match self.produce(&container)? {
            Some(dependency) => Ok(dependency),
            None => {
                let err = ResolveErrorKind::Unregistered {
                    tag: self.info,
                    container: container.id(),
                };
                error!("{}", err);
                Err(err)
            }
        }
    }

    /// Resolves the value registered for this tag in the active container, or `None` if there is no registration.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::Scope`] if it's called outside of a container scope
    /// - Returns errors of the registered factory
    pub fn resolve_optional(&self) -> Result<Option<T>, ResolveErrorKind> {
        let container = scope::current()?;
        self.produce(&container)
    }

    /// Resolves the value registered for this tag in the active container, or `default` if there is no registration.
    ///
    /// # Warning
    /// `default` is used only for a missing registration, a registered value is returned as is whatever it is
    /// (`0`, `false` and empty strings included).
    ///
    /// # Errors
    /// Same as [`Tag::resolve_optional`]
    #[inline]
    pub fn resolve_or(&self, default: T) -> Result<T, ResolveErrorKind> {
        self.resolve_optional().map(|dependency| dependency.unwrap_or(default))
    }

    /// Same as [`Tag::resolve_or`], but the default is computed only when it's needed
    ///
    /// # Errors
    /// Same as [`Tag::resolve_optional`]
    #[inline]
    pub fn resolve_or_else(&self, default: impl FnOnce() -> T) -> Result<T, ResolveErrorKind> {
        self.resolve_optional().map(|dependency| dependency.unwrap_or_else(default))
    }

    fn produce(&self, container: &Container) -> Result<Option<T>, ResolveErrorKind> {
        let span = info_span!(
            "resolve",
            tag = self.info.id.get(),
            provides = self.info.short_type_name(),
            container = container.id().get()
        );
        let _guard = span.enter();

        let producer = container.inner.registry.lock().get(&self.info.id);
        let Some(mut producer) = producer else {
            debug!("No producer registered");
            return Ok(None);
        };

        match producer.call() {
            Ok(dependency) => match dependency.downcast::<T>() {
                Ok(dependency) => {
                    debug!("Resolved");
                    Ok(Some(*dependency))
                }
                Err(incorrect_type) => {
                    let err = ResolveErrorKind::IncorrectType {
                        expected: TypeId::of::<T>(),
                        actual: (*incorrect_type).type_id(),
                    };
                    error!("{}", err);
                    Err(err)
                }
            },
            Err(err) => {
                let err = ResolveErrorKind::from(err);
                error!("{}", err);
                Err(err)
            }
        }
    }
}

/// Creates a new tag for a container to register and resolve a value or a factory.
///
/// The type is either provided with generics (`injecd::<Type>()`) or inferred from usage.
#[inline]
#[must_use]
pub fn injecd<T: 'static>() -> Tag<T> {
    Tag::new()
}

/// Creates a new tag with the type of the passed value, `injecd_of(&dummy)` is short for `injecd::<TypeOfDummy>()`
#[inline]
#[must_use]
pub fn injecd_of<T: 'static>(_dummy: &T) -> Tag<T> {
    Tag::new()
}

/// Creates a new tag with the type provided by the passed factory, `injecd_return(&factory)` is short for
/// `injecd::<<Factory as injecd::Factory>::Provides>()`
#[inline]
#[must_use]
pub fn injecd_return<F: Factory>(_factory: &F) -> Tag<F::Provides> {
    Tag::new()
}
