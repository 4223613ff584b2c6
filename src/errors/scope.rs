#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeErrorKind {
    #[error("Container action outside of container scope. Use `Container::resolve` or `Container::resolve_factory` to enter it")]
    NoActiveContainer,
}
