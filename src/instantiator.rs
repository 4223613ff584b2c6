use core::any::Any;
use std::sync::Arc;
use tracing::debug;

use crate::{
    cache::SingletonCache,
    errors::{InstantiateErrorKind, InstantiatorResult},
    service::{service_fn, BoxCloneService},
};

/// Zero-argument producer of a tag value.
///
/// Implemented for every `FnMut() -> Result<T, E> + Clone` closure, where `E` converts into [`InstantiateErrorKind`].
/// Inside the closure other tags can be read with [`crate::Tag::resolve_required`] and friends,
/// they are resolved against the container which runs the factory.
pub trait Factory: Clone + 'static {
    type Provides: 'static;
    type Error: Into<InstantiateErrorKind>;

    fn instantiate(&mut self) -> Result<Self::Provides, Self::Error>;
}

impl<F, Response, Err> Factory for F
where
    F: FnMut() -> Result<Response, Err> + Clone + 'static,
    Response: 'static,
    Err: Into<InstantiateErrorKind>,
{
    type Provides = Response;
    type Error = Err;

    #[inline]
    fn instantiate(&mut self) -> Result<Self::Provides, Self::Error> {
        self()
    }
}

/// Type which can construct itself, reading its dependencies from tags of the active container.
///
/// # Examples
/// ```rust
/// use injecd::{injecd, spawn_container, Injectable, InstantiatorResult, Tag};
/// use std::sync::LazyLock;
///
/// static URL: LazyLock<Tag<&'static str>> = LazyLock::new(injecd);
/// static CLIENT: LazyLock<Tag<Client>> = LazyLock::new(injecd);
///
/// struct Client {
///     url: &'static str,
/// }
///
/// impl Injectable for Client {
///     fn construct() -> InstantiatorResult<Self> {
///         Ok(Self { url: URL.resolve_required()? })
///     }
/// }
///
/// let container = spawn_container();
/// container.register_instance(&URL, "localhost").register_class(&CLIENT);
///
/// assert_eq!(container.resolve(&CLIENT).unwrap().url, "localhost");
/// ```
pub trait Injectable: Sized + 'static {
    fn construct() -> InstantiatorResult<Self>;
}

impl<T: Injectable> Injectable for Arc<T> {
    #[inline]
    fn construct() -> InstantiatorResult<Self> {
        T::construct().map(Arc::new)
    }
}

impl<T: Injectable> Injectable for Box<T> {
    #[inline]
    fn construct() -> InstantiatorResult<Self> {
        T::construct().map(Box::new)
    }
}

/// Wrapper to create a factory that just returns passed value.
/// It can be used when the value was created outside the container.
#[inline]
#[must_use]
pub const fn instance<T: Clone + 'static>(val: T) -> impl Factory<Provides = T, Error = InstantiateErrorKind> {
    move || Ok(val.clone())
}

pub(crate) type BoxedCloneProducer = BoxCloneService<Box<dyn Any>, InstantiateErrorKind>;

#[must_use]
pub(crate) fn boxed_factory<F>(factory: F) -> BoxedCloneProducer
where
    F: Factory + Send + Sync,
{
    BoxCloneService(Box::new(service_fn(move || {
        let dependency = factory.clone().instantiate().map_err(Into::into)?;

        debug!("Produced");

        Ok(Box::new(dependency) as _)
    })))
}

#[must_use]
pub(crate) fn boxed_singleton_factory<F>(factory: F) -> BoxedCloneProducer
where
    F: Factory + Send + Sync,
    F::Provides: Clone + Send,
{
    let cache = SingletonCache::new();

    BoxCloneService(Box::new(service_fn(move || {
        let (dependency, produced) = cache.get_or_try_init(|| factory.clone().instantiate().map_err(Into::<InstantiateErrorKind>::into))?;

        if produced {
            debug!("Produced and cached");
        } else {
            debug!("Found in singleton cache");
        }

        Ok(Box::new(dependency) as _)
    })))
}
