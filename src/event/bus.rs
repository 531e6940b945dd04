use std::cell::RefCell;
use std::rc::Rc;

use crate::event::EventHandler;

/// A simple event bus for broadcasting events to registered handlers
pub struct EventBus<E> {
    handlers: RefCell<Vec<Rc<dyn EventHandler<E>>>>,
}

impl<E> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: impl EventHandler<E> + 'static) {
        self.handlers.borrow_mut().push(Rc::new(handler));
    }

    /// Emit an event to all registered handlers.
    ///
    /// The handler list is snapshotted first, so a handler may subscribe or
    /// emit again without invalidating the iteration.
    pub fn emit(&self, event: E) {
        let handlers: Vec<_> = self.handlers.borrow().iter().cloned().collect();
        for handler in handlers {
            handler.handle_event(&event);
        }
    }
}
