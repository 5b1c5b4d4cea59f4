// Recording host and surface for driving the render lifecycle off-browser.

#![allow(dead_code)]

use hero_core::constants::FALLBACK_CLASS;
use hero_core::{
    Binding, BufferSize, DrawSurface, FrameToken, FrameView, Host, ParticleField, RenderSurface,
    SceneConfig, SurfaceError, SurfaceOptions, Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Attach,
    Detach,
    Fallback,
    LoadField(usize),
    Resize(BufferSize),
    Draw {
        positions_dirty: bool,
    },
    Release,
    BindingReleased {
        name: &'static str,
        token_cancelled: bool,
    },
}

pub type Journal = Rc<RefCell<Vec<Event>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn count(journal: &Journal, pred: impl Fn(&Event) -> bool) -> usize {
    journal.borrow().iter().filter(|e| pred(e)).count()
}

pub struct MockSurface {
    journal: Journal,
    pub size: BufferSize,
    pub fail_load: bool,
    pub fail_draw: bool,
    released: bool,
}

impl MockSurface {
    pub fn new(journal: &Journal, viewport: &Viewport) -> Self {
        Self {
            journal: journal.clone(),
            size: viewport.buffer_size(),
            fail_load: false,
            fail_draw: false,
            released: false,
        }
    }
}

impl DrawSurface for MockSurface {
    fn load_field(&mut self, field: &ParticleField) -> Result<(), SurfaceError> {
        if self.released {
            return Err(SurfaceError::Released);
        }
        if self.fail_load {
            return Err(SurfaceError::ContextCreation("vertex buffer".into()));
        }
        self.journal
            .borrow_mut()
            .push(Event::LoadField(field.len()));
        Ok(())
    }

    fn resize(&mut self, viewport: &Viewport) {
        let size = viewport.buffer_size();
        if size != self.size {
            self.size = size;
            self.journal.borrow_mut().push(Event::Resize(size));
        }
    }

    fn draw(&mut self, frame: &FrameView<'_>) -> Result<(), SurfaceError> {
        if self.released {
            return Err(SurfaceError::Released);
        }
        if self.fail_draw {
            return Err(SurfaceError::Draw("device lost".into()));
        }
        self.journal.borrow_mut().push(Event::Draw {
            positions_dirty: frame.positions_dirty,
        });
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.journal.borrow_mut().push(Event::Release);
    }
}

pub struct MockHost {
    journal: Journal,
    pub viewport: Viewport,
    pub children: usize,
    pub classes: Vec<String>,
    pub fail_attach: bool,
}

impl MockHost {
    pub fn new(journal: &Journal, viewport: Viewport) -> Self {
        Self {
            journal: journal.clone(),
            viewport,
            children: 0,
            classes: Vec::new(),
            fail_attach: false,
        }
    }
}

impl Host for MockHost {
    type Surface = MockSurface;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn attach(&mut self, _surface: &MockSurface) -> Result<(), SurfaceError> {
        if self.fail_attach {
            return Err(SurfaceError::Attachment("container detached".into()));
        }
        self.children += 1;
        self.journal.borrow_mut().push(Event::Attach);
        Ok(())
    }

    fn detach(&mut self, _surface: &MockSurface) {
        self.children = self.children.saturating_sub(1);
        self.journal.borrow_mut().push(Event::Detach);
    }

    fn apply_fallback(&mut self) {
        self.classes.push(FALLBACK_CLASS.to_string());
        self.journal.borrow_mut().push(Event::Fallback);
    }
}

pub struct MockBinding {
    name: &'static str,
    journal: Journal,
    token: FrameToken,
}

impl MockBinding {
    pub fn boxed(name: &'static str, journal: &Journal, token: FrameToken) -> Box<dyn Binding> {
        Box::new(Self {
            name,
            journal: journal.clone(),
            token,
        })
    }
}

impl Binding for MockBinding {
    fn release(&mut self) {
        self.journal.borrow_mut().push(Event::BindingReleased {
            name: self.name,
            token_cancelled: self.token.is_cancelled(),
        });
    }
}

pub const SEED: u64 = 0x5eed;

pub fn desktop() -> Viewport {
    Viewport::new(1280.0, 720.0, 1.0)
}

pub fn acquire_ok(
    journal: &Journal,
) -> impl FnOnce(&SurfaceOptions) -> Result<MockSurface, SurfaceError> {
    let journal = journal.clone();
    move |options: &SurfaceOptions| Ok(MockSurface::new(&journal, &options.viewport))
}

pub fn surface_with(config: SceneConfig, viewport: Viewport) -> (RenderSurface<MockHost>, Journal) {
    let journal = journal();
    let host = MockHost::new(&journal, viewport);
    (RenderSurface::with_seed(host, config, SEED), journal)
}

/// A surface already mounted and live on a 1280x720 viewport.
pub fn live_surface() -> (RenderSurface<MockHost>, Journal) {
    let (mut surface, journal) = surface_with(SceneConfig::default(), desktop());
    assert!(surface.mount(acquire_ok(&journal)));
    (surface, journal)
}
