#![cfg(target_arch = "wasm32")]
use hero_core::{DrawSurface, RenderSurface, SceneConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod host;
mod render;

use host::WebHost;

pub(crate) type SharedSurface = Rc<RefCell<RenderSurface<WebHost>>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-canvas loaded");
    Ok(())
}

/// Animated particle background bound to one host container.
///
/// The page creates one per mount and calls [`HeroCanvas::unmount`] when the
/// hero section goes away. Nothing is thrown to the page: if no GPU context
/// can be acquired the container just gets the fallback background class.
#[wasm_bindgen]
pub struct HeroCanvas {
    surface: SharedSurface,
}

#[wasm_bindgen]
impl HeroCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(container: web::HtmlElement) -> HeroCanvas {
        let mut render_surface =
            RenderSurface::new(WebHost::new(container), SceneConfig::default());
        let options = render_surface.begin_mount();
        let surface = Rc::new(RefCell::new(render_surface));

        if let Some(options) = options {
            let weak = Rc::downgrade(&surface);
            spawn_local(async move {
                let acquired = render::GpuSurface::new(&options).await;
                match weak.upgrade() {
                    Some(surface) => {
                        let live = surface.borrow_mut().finish_mount(acquired);
                        if live {
                            wire_live(&surface);
                        }
                    }
                    // Handle dropped before the context arrived.
                    None => {
                        if let Ok(mut late) = acquired {
                            late.release();
                        }
                    }
                }
            });
        }
        HeroCanvas { surface }
    }

    /// Stops the loop, removes listeners and the canvas, releases GPU
    /// resources. Safe to call at any stage, including mid-acquisition.
    pub fn unmount(&self) {
        self.surface.borrow_mut().unmount();
    }

    #[wasm_bindgen(getter)]
    pub fn live(&self) -> bool {
        self.surface.borrow().is_live()
    }
}

fn wire_live(surface: &SharedSurface) {
    let (Some(window), Some(document)) = (web::window(), dom::window_document()) else {
        log::warn!("[mount] no window/document; running without observers");
        return;
    };
    let pointer = events::observe_pointer(surface, &document);
    let resize = events::observe_resize(surface, &window);
    let frames = frame::start_loop(surface);

    let mut s = surface.borrow_mut();
    s.bind(Box::new(pointer));
    s.bind(Box::new(resize));
    s.bind(Box::new(frames));
}
