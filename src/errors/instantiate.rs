use super::resolve::ResolveErrorKind;

/// Error of a factory.
///
/// A failed nested resolution (`tag.resolve_required()?` inside a factory) is kept as [`InstantiateErrorKind::Resolve`]
/// and unwrapped again when it leaves the outer resolution, so the caller sees the original [`ResolveErrorKind`].
#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error(transparent)]
    Resolve(Box<ResolveErrorKind>),
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}

impl From<ResolveErrorKind> for InstantiateErrorKind {
    #[inline]
    fn from(err: ResolveErrorKind) -> Self {
        Self::Resolve(Box::new(err))
    }
}
