use core::any::TypeId;

use super::{instantiate::InstantiateErrorKind, scope::ScopeErrorKind};
use crate::{container::ContainerId, tag::TagInfo};

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error(transparent)]
    Scope(#[from] ScopeErrorKind),
    #[error("Tried to resolve an unregistered tag {tag} in container {container}")]
    Unregistered { tag: TagInfo, container: ContainerId },
    #[error("Incorrect producer provides type. Actual: {actual:?}, expected: {expected:?}")]
    IncorrectType { expected: TypeId, actual: TypeId },
    #[error(transparent)]
    Factory(anyhow::Error),
}

impl ResolveErrorKind {
    #[inline]
    #[must_use]
    pub const fn is_unregistered(&self) -> bool {
        matches!(self, Self::Unregistered { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_scope(&self) -> bool {
        matches!(self, Self::Scope(_))
    }
}

impl From<InstantiateErrorKind> for ResolveErrorKind {
    fn from(err: InstantiateErrorKind) -> Self {
        match err {
            InstantiateErrorKind::Resolve(err) => *err,
            // A nested resolve error converted into `anyhow::Error` by the factory itself
            InstantiateErrorKind::Custom(err) => err.downcast::<Self>().unwrap_or_else(Self::Factory),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::{InstantiateErrorKind, ResolveErrorKind, ScopeErrorKind};

    #[test]
    fn test_nested_resolve_error_unwrapped() {
        let nested = InstantiateErrorKind::from(ResolveErrorKind::Scope(ScopeErrorKind::NoActiveContainer));

        assert!(matches!(
            ResolveErrorKind::from(nested),
            ResolveErrorKind::Scope(ScopeErrorKind::NoActiveContainer)
        ));
    }

    #[test]
    fn test_nested_resolve_error_unwrapped_from_anyhow() {
        let nested = InstantiateErrorKind::from(anyhow::Error::from(ResolveErrorKind::Scope(ScopeErrorKind::NoActiveContainer)));

        assert!(matches!(
            ResolveErrorKind::from(nested),
            ResolveErrorKind::Scope(ScopeErrorKind::NoActiveContainer)
        ));
    }

    #[test]
    fn test_custom_error_kept() {
        let err = ResolveErrorKind::from(InstantiateErrorKind::from(anyhow!("database is down")));

        assert!(matches!(&err, ResolveErrorKind::Factory(_)));
        assert_eq!(err.to_string(), "database is down");
    }
}
