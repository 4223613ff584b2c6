pub(crate) mod cache;
pub(crate) mod config;
pub(crate) mod container;
pub(crate) mod errors;
pub(crate) mod instantiator;
pub(crate) mod lock;
pub(crate) mod registry;
pub(crate) mod scope;
pub(crate) mod service;
pub(crate) mod tag;

pub use config::Config;
pub use container::{spawn_container, Container, ContainerId};
pub use errors::{InstantiateErrorKind, InstantiatorResult, ResolveErrorKind, ScopeErrorKind};
pub use instantiator::{instance, Factory, Injectable};
pub use lock::LockedContainer;
pub use tag::{injecd, injecd_of, injecd_return, Tag, TagId, TagInfo};
