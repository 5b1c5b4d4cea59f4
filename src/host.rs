use crate::dom;
use crate::render::GpuSurface;
use hero_core::constants::FALLBACK_CLASS;
use hero_core::{Host, SurfaceError, Viewport};
use web_sys as web;

/// Page element the hero canvas is mounted into.
pub struct WebHost {
    container: web::HtmlElement,
}

impl WebHost {
    pub fn new(container: web::HtmlElement) -> Self {
        Self { container }
    }
}

impl Host for WebHost {
    type Surface = GpuSurface;

    fn viewport(&self) -> Viewport {
        web::window().map(|w| dom::viewport(&w)).unwrap_or_default()
    }

    fn attach(&mut self, surface: &GpuSurface) -> Result<(), SurfaceError> {
        if !self.container.is_connected() {
            return Err(SurfaceError::Attachment(
                "host container is not in the document".into(),
            ));
        }
        self.container
            .append_child(surface.canvas())
            .map(|_| ())
            .map_err(|e| SurfaceError::Attachment(format!("{:?}", e)))
    }

    fn detach(&mut self, surface: &GpuSurface) {
        let canvas: &web::Node = surface.canvas();
        if self.container.contains(Some(canvas)) {
            _ = self.container.remove_child(canvas);
        }
    }

    fn apply_fallback(&mut self) {
        _ = self.container.class_list().add_1(FALLBACK_CLASS);
    }
}
