use crate::{
    container::{Container, ContainerId},
    errors::ResolveErrorKind,
    tag::Tag,
};

/// View of a [`Container`] with resolve methods only.
///
/// Registrations made through the original container after locking are still visible here.
///
/// ```compile_fail
/// let locked = injecd::spawn_container().lock();
/// locked.register_instance(&injecd::injecd::<u8>(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct LockedContainer {
    container: Container,
}

impl LockedContainer {
    #[inline]
    #[must_use]
    pub(crate) const fn new(container: Container) -> Self {
        Self { container }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> ContainerId {
        self.container.id()
    }

    /// See [`Container::resolve`]
    ///
    /// # Errors
    /// Same as [`Container::resolve`]
    #[inline]
    pub fn resolve<T: 'static>(&self, tag: &Tag<T>) -> Result<T, ResolveErrorKind> {
        self.container.resolve(tag)
    }

    /// See [`Container::resolve_factory`]
    ///
    /// # Errors
    /// Returns errors of the function as is
    #[inline]
    pub fn resolve_factory<T, E>(&self, factory: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        self.container.resolve_factory(factory)
    }
}

impl From<Container> for LockedContainer {
    #[inline]
    fn from(container: Container) -> Self {
        Self::new(container)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use tracing_test::traced_test;

    use crate::{injecd, spawn_container, InstantiateErrorKind, LockedContainer, ResolveErrorKind};

    #[test]
    #[traced_test]
    fn test_resolves_as_container() {
        let value = injecd::<Arc<u8>>();
        let doubled = injecd::<u8>();

        let container = spawn_container();
        container
            .register_instance(&value, Arc::new(21))
            .register_factory(&doubled, move || Ok::<_, InstantiateErrorKind>(*value.resolve_required()? * 2));
        let locked = container.lock();

        assert_eq!(locked.id(), container.id());
        assert!(Arc::ptr_eq(&locked.resolve(&value).unwrap(), &container.resolve(&value).unwrap()));
        assert_eq!(locked.resolve(&doubled).unwrap(), 42);
        assert_eq!(
            locked.resolve_factory(|| Ok::<_, ResolveErrorKind>(doubled.resolve_required()? + 1)).unwrap(),
            43
        );
    }

    #[test]
    #[traced_test]
    fn test_sees_later_registrations() {
        let tag = injecd::<&str>();

        let container = spawn_container();
        let locked = LockedContainer::from(container.clone());
        assert!(locked.resolve(&tag).unwrap_err().is_unregistered());

        container.register_instance(&tag, "late");
        assert_eq!(locked.resolve(&tag).unwrap(), "late");
    }
}
