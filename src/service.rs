/// Zero-argument callable unit behind every registered producer.
pub(crate) trait Service {
    type Response;
    type Error;

    fn call(&mut self) -> Result<Self::Response, Self::Error>;
}

#[inline]
#[must_use]
pub(crate) const fn service_fn<T>(f: T) -> ServiceFn<T> {
    ServiceFn { f }
}

#[derive(Clone)]
pub(crate) struct ServiceFn<T> {
    f: T,
}

impl<F, Response, Error> Service for ServiceFn<F>
where
    F: FnMut() -> Result<Response, Error>,
{
    type Response = Response;
    type Error = Error;

    #[inline]
    fn call(&mut self) -> Result<Self::Response, Self::Error> {
        (self.f)()
    }
}

pub(crate) struct BoxCloneService<Response, Error>(pub(crate) Box<dyn CloneService<Response = Response, Error = Error> + Send + Sync>);

pub(crate) trait CloneService: Service {
    #[must_use]
    fn clone_box(&self) -> Box<dyn CloneService<Response = Self::Response, Error = Self::Error> + Send + Sync>;
}

impl<T> CloneService for T
where
    T: Service + Clone + Send + Sync + 'static,
{
    #[inline]
    fn clone_box(&self) -> Box<dyn CloneService<Response = T::Response, Error = T::Error> + Send + Sync> {
        Box::new(self.clone())
    }
}

impl<Response, Error> Clone for BoxCloneService<Response, Error> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone_box())
    }
}

impl<Response, Error> Service for BoxCloneService<Response, Error> {
    type Response = Response;
    type Error = Error;

    #[inline]
    fn call(&mut self) -> Result<Self::Response, Self::Error> {
        self.0.call()
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::{service_fn, BoxCloneService, Service as _};

    #[test]
    fn test_service() {
        let mut counter = 0u8;
        let mut service = service_fn(move || {
            counter += 1;
            Ok::<_, Infallible>(counter)
        });

        assert_eq!(service.call().unwrap(), 1);
        assert_eq!(service.call().unwrap(), 2);
    }

    #[test]
    fn test_boxed_clone_keeps_state_per_clone() {
        let mut counter = 0u8;
        let mut service = BoxCloneService(Box::new(service_fn(move || {
            counter += 1;
            Ok::<_, Infallible>(counter)
        })));

        assert_eq!(service.call().unwrap(), 1);

        let mut cloned = service.clone();
        assert_eq!(cloned.call().unwrap(), 2);
        assert_eq!(service.call().unwrap(), 2);
    }
}
