pub mod pointer;
pub mod resize;

pub use pointer::observe_pointer;
pub use resize::observe_resize;

use gloo::events::EventListener;
use hero_core::Binding;

/// Registered DOM listener; releasing it removes the listener.
pub struct Observer {
    event: &'static str,
    listener: Option<EventListener>,
}

impl Observer {
    pub(crate) fn new(event: &'static str, listener: EventListener) -> Self {
        Self {
            event,
            listener: Some(listener),
        }
    }
}

impl Binding for Observer {
    fn release(&mut self) {
        if self.listener.take().is_some() {
            log::debug!("[events] removed {} listener", self.event);
        }
    }
}
