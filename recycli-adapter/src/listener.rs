/// Follows one identity's view as it enters and leaves the viewport.
pub trait AttachListener: Send + Sync {
    fn on_attached(&self);
    fn on_detached(&self);
}

/// `(on_attached, on_detached)`.
impl<A, D> AttachListener for (A, D)
where
    A: Fn() + Send + Sync,
    D: Fn() + Send + Sync,
{
    fn on_attached(&self) {
        (self.0)()
    }

    fn on_detached(&self) {
        (self.1)()
    }
}

/// Fires the first time an identity's view is attached during an adapter's lifetime.
pub trait FirstAppearanceListener<I>: Send + Sync {
    fn on_first_appearance(&self, item: &I);
}

impl<I, F: Fn(&I) + Send + Sync> FirstAppearanceListener<I> for F {
    fn on_first_appearance(&self, item: &I) {
        self(item)
    }
}
