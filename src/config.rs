/// Config for a registration
/// ## Fields
/// - `cache_provides`:
///   If `true`, the value provided by the factory is cached on first resolution and cloned for every next one
///   (singleton registration). If `false`, the factory is called on every resolution (transient registration).
///
///   Only the final result is cached, dependencies resolved inside the factory follow their own registrations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub cache_provides: bool,
}

impl Config {
    #[inline]
    #[must_use]
    pub const fn transient() -> Self {
        Self { cache_provides: false }
    }

    #[inline]
    #[must_use]
    pub const fn singleton() -> Self {
        Self { cache_provides: true }
    }
}
