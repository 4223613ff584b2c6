use core::{cell::RefCell, mem};

use crate::{container::Container, errors::ScopeErrorKind};

thread_local! {
    // Container which bindings are visible to tag accessors on this thread.
    static ACTIVE: RefCell<Option<Container>> = const { RefCell::new(None) };
}

/// Makes a container active for the current thread until it's dropped.
///
/// The previously active container (if any) is restored on drop, also on unwind,
/// so entering the scope of the active container again is a no-op for the outer scope.
#[must_use = "the container is active only while the guard is alive"]
pub(crate) struct ScopeGuard {
    previous: Option<Container>,
}

impl ScopeGuard {
    #[inline]
    pub(crate) fn enter(container: Container) -> Self {
        let previous = ACTIVE.with(|active| active.borrow_mut().replace(container));
        Self { previous }
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        // The replaced handle is dropped after the borrow is released, its drop may run user code
        let replaced = ACTIVE.try_with(|active| mem::replace(&mut *active.borrow_mut(), previous));
        drop(replaced);
    }
}

/// Returns the active container of the current thread
///
/// # Errors
/// - Returns [`ScopeErrorKind::NoActiveContainer`] if there is no active container
pub(crate) fn current() -> Result<Container, ScopeErrorKind> {
    ACTIVE
        .with(|active| active.borrow().clone())
        .ok_or(ScopeErrorKind::NoActiveContainer)
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::{current, ScopeGuard};
    use crate::{spawn_container, ScopeErrorKind};

    #[test]
    fn test_inactive_by_default() {
        assert!(matches!(current(), Err(ScopeErrorKind::NoActiveContainer)));
    }

    #[test]
    fn test_guard_restores_previous() {
        let outer = spawn_container();
        let inner = spawn_container();

        {
            let _outer_guard = ScopeGuard::enter(outer.clone());
            assert_eq!(current().unwrap().id(), outer.id());
            {
                let _inner_guard = ScopeGuard::enter(inner.clone());
                assert_eq!(current().unwrap().id(), inner.id());
            }
            assert_eq!(current().unwrap().id(), outer.id());
            {
                let _same_guard = ScopeGuard::enter(outer.clone());
                assert_eq!(current().unwrap().id(), outer.id());
            }
            assert_eq!(current().unwrap().id(), outer.id());
        }
        assert!(current().is_err());
    }

    #[test]
    fn test_guard_restores_on_unwind() {
        let container = spawn_container();

        let result = catch_unwind(AssertUnwindSafe(|| {
            let _guard = ScopeGuard::enter(container.clone());
            panic!("producer failed");
        }));

        assert!(result.is_err());
        assert!(current().is_err());
    }

    #[test]
    fn test_thread_local() {
        let container = spawn_container();
        let _guard = ScopeGuard::enter(container);

        std::thread::spawn(|| assert!(current().is_err())).join().unwrap();
        assert!(current().is_ok());
    }
}
