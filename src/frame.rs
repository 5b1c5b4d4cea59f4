use crate::host::WebHost;
use crate::SharedSurface;
use gloo::render::{request_animation_frame, AnimationFrame};
use hero_core::{Binding, FrameToken, RenderSurface};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type FrameSlot = RefCell<Option<AnimationFrame>>;

/// Display-refresh loop for one render surface.
///
/// Each tick re-requests the next one only while the frame token is live.
/// Releasing the loop drops the pending request, which cancels it.
pub struct FrameLoop {
    slot: Rc<FrameSlot>,
}

impl Binding for FrameLoop {
    fn release(&mut self) {
        if self.slot.borrow_mut().take().is_some() {
            log::debug!("[frame] pending frame cancelled");
        }
    }
}

pub fn start_loop(surface: &SharedSurface) -> FrameLoop {
    let token = surface.borrow().frame_token();
    let slot = Rc::new(FrameSlot::new(None));
    schedule(Rc::downgrade(surface), Rc::downgrade(&slot), token);
    FrameLoop { slot }
}

fn schedule(
    surface: Weak<RefCell<RenderSurface<WebHost>>>,
    slot: Weak<FrameSlot>,
    token: FrameToken,
) {
    if token.is_cancelled() {
        return;
    }
    let Some(slot_rc) = slot.upgrade() else {
        return;
    };
    let next_slot = slot.clone();
    let handle = request_animation_frame(move |_timestamp| {
        if let Some(s) = next_slot.upgrade() {
            s.borrow_mut().take();
        }
        if token.is_cancelled() {
            return;
        }
        let Some(surface_rc) = surface.upgrade() else {
            return;
        };
        let result = surface_rc.borrow_mut().tick(js_sys::Date::now());
        if let Err(e) = result {
            log::error!("[frame] render error: {}", e);
        }
        schedule(surface, next_slot, token);
    });
    *slot_rc.borrow_mut() = Some(handle);
}
