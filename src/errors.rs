mod instantiate;
mod resolve;
mod scope;

pub use instantiate::InstantiateErrorKind;
pub use resolve::ResolveErrorKind;
pub use scope::ScopeErrorKind;

/// Result type of a [`crate::Factory`]
pub type InstantiatorResult<T, Err = InstantiateErrorKind> = Result<T, Err>;
