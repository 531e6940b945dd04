mod bus;
mod events;

pub use bus::EventBus;
pub use events::{ConfigEvent, StorageEvent};

/// Receiver of events published on an [`EventBus`].
///
/// Any `Fn(&E)` closure is a handler. Handlers run synchronously on the
/// thread that emits and may emit further events.
pub trait EventHandler<E> {
    fn handle_event(&self, event: &E);
}

impl<E, F> EventHandler<E> for F
where
    F: Fn(&E),
{
    fn handle_event(&self, event: &E) {
        self(event)
    }
}
