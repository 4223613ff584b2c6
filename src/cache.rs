use parking_lot::Mutex;
use std::sync::Arc;

/// Memoized value of a singleton registration.
///
/// The lock of the value is held while the factory runs, so concurrent first resolutions call the factory once.
/// Other tags resolved inside the factory use their own caches.
pub(crate) struct SingletonCache<T> {
    value: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for SingletonCache<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}

impl<T: Clone> SingletonCache<T> {
    #[inline]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            value: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the cached value and `false`, or caches the result of `init` and returns it with `true`.
    /// Nothing is cached if `init` fails.
    pub(crate) fn get_or_try_init<E>(&self, init: impl FnOnce() -> Result<T, E>) -> Result<(T, bool), E> {
        let mut guard = self.value.lock();
        if let Some(value) = guard.as_ref() {
            return Ok((value.clone(), false));
        }

        let value = init()?;
        Ok((guard.insert(value).clone(), true))
    }
}
