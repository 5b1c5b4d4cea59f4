use super::Observer;
use crate::SharedSurface;
use gloo::events::EventListener;
use std::rc::Rc;
use web_sys as web;

pub fn observe_resize(surface: &SharedSurface, window: &web::Window) -> Observer {
    let weak = Rc::downgrade(surface);
    let listener = EventListener::new(window, "resize", move |_| {
        let Some(surface) = weak.upgrade() else {
            return;
        };
        if let Ok(mut s) = surface.try_borrow_mut() {
            s.refresh_viewport();
        };
    });
    Observer::new("resize", listener)
}
