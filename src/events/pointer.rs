use super::Observer;
use crate::SharedSurface;
use gloo::events::EventListener;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer moves anywhere on the page drive the parallax, not just moves
/// over the canvas.
pub fn observe_pointer(surface: &SharedSurface, document: &web::Document) -> Observer {
    let weak = Rc::downgrade(surface);
    let listener = EventListener::new(document, "pointermove", move |event| {
        let Some(ev) = event.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let Some(surface) = weak.upgrade() else {
            return;
        };
        if let Ok(mut s) = surface.try_borrow_mut() {
            s.pointer_moved(ev.client_x() as f64, ev.client_y() as f64);
        };
    });
    Observer::new("pointermove", listener)
}
