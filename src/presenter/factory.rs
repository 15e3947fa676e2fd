//! Presenter construction capability.

/// Produces a new presenter each time it is asked.
///
/// Dependencies are captured when the factory is built. There is no error
/// path: a factory that cannot build its presenter is a programming error and
/// is allowed to panic.
pub trait PresenterFactory<P>: Send + Sync {
    fn create(&self) -> P;
}

impl<P, F> PresenterFactory<P> for F
where
    F: Fn() -> P + Send + Sync,
{
    fn create(&self) -> P {
        self()
    }
}

/// Factory as handed out by feature modules.
pub type BoxedPresenterFactory<P> = Box<dyn PresenterFactory<P>>;
