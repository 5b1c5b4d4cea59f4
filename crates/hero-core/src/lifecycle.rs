//! Render surface lifecycle.
//!
//! A [`RenderSurface`] moves through
//! `Uninitialized → Acquiring → Live → Disposing → Disposed` exactly once.
//! The platform side supplies a [`Host`] (the container the drawable is
//! attached to) and a [`DrawSurface`] (the graphics context and its
//! buffers). Event observers and the frame loop are registered as
//! [`Binding`]s so that teardown can release them in a fixed order: cancel
//! the [`FrameToken`], release bindings, detach, release GPU resources.

use crate::config::{MaterialConfig, SceneConfig};
use crate::error::SurfaceError;
use crate::field::ParticleField;
use crate::frame::{FrameUpdater, FrameView, Scene};
use crate::pointer::{PointerOffset, PointerTracker};
use crate::state::{Camera, Viewport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Acquiring,
    Live,
    Disposing,
    Disposed,
}

/// Parameters for creating the graphics context.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceOptions {
    pub viewport: Viewport,
    pub alpha: bool,
    pub antialias: bool,
    pub material: MaterialConfig,
}

/// Graphics context, drawable buffer and geometry owned by one mount.
pub trait DrawSurface {
    /// Upload the generated dataset (positions and fixed colors).
    fn load_field(&mut self, field: &ParticleField) -> Result<(), SurfaceError>;
    /// Match the backing buffer to `viewport`; a no-op when the size is unchanged.
    fn resize(&mut self, viewport: &Viewport);
    fn draw(&mut self, frame: &FrameView<'_>) -> Result<(), SurfaceError>;
    fn release(&mut self);
}

/// The container a drawable is attached to.
pub trait Host {
    type Surface: DrawSurface;

    fn viewport(&self) -> Viewport;
    fn attach(&mut self, surface: &Self::Surface) -> Result<(), SurfaceError>;
    fn detach(&mut self, surface: &Self::Surface);
    /// Switch the container to its static background.
    fn apply_fallback(&mut self);
}

/// A registration (event observer, scheduled frame) whose lifetime is tied
/// to the `Live` state.
pub trait Binding {
    fn release(&mut self);
}

/// Shared cancellation flag for the frame loop. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct FrameToken(Rc<Cell<bool>>);

impl FrameToken {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

struct LiveParts<S> {
    surface: S,
    scene: Scene,
    pointer: PointerTracker,
    viewport: Viewport,
}

pub struct RenderSurface<H: Host> {
    host: H,
    config: SceneConfig,
    updater: FrameUpdater,
    rng: StdRng,
    state: LifecycleState,
    token: FrameToken,
    live: Option<LiveParts<H::Surface>>,
    bindings: Vec<Box<dyn Binding>>,
}

impl<H: Host> RenderSurface<H> {
    pub fn new(host: H, config: SceneConfig) -> Self {
        Self::with_rng(host, config, StdRng::from_entropy())
    }

    pub fn with_seed(host: H, config: SceneConfig, seed: u64) -> Self {
        Self::with_rng(host, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(host: H, config: SceneConfig, rng: StdRng) -> Self {
        let updater = FrameUpdater::new(config.motion.clone());
        Self {
            host,
            config,
            updater,
            rng,
            state: LifecycleState::Uninitialized,
            token: FrameToken::default(),
            live: None,
            bindings: Vec::new(),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.state == LifecycleState::Live
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn frame_token(&self) -> FrameToken {
        self.token.clone()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.live.as_ref().map(|l| &l.scene)
    }

    pub fn surface(&self) -> Option<&H::Surface> {
        self.live.as_ref().map(|l| &l.surface)
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.live.as_ref().map(|l| l.viewport)
    }

    pub fn pointer_offset(&self) -> Option<PointerOffset> {
        self.live.as_ref().map(|l| l.pointer.offset())
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// `Uninitialized → Acquiring`. Returns the context parameters, or `None`
    /// if this instance was already mounted.
    pub fn begin_mount(&mut self) -> Option<SurfaceOptions> {
        if self.state != LifecycleState::Uninitialized {
            log::warn!("[surface] mount ignored in state {:?}", self.state);
            return None;
        }
        self.state = LifecycleState::Acquiring;
        let viewport = self.host.viewport();
        log::debug!(
            "[surface] acquiring {}x{} @{}x",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio()
        );
        Some(SurfaceOptions {
            viewport,
            alpha: true,
            antialias: true,
            material: self.config.material.clone(),
        })
    }

    /// Completes acquisition with the created context (or its failure).
    ///
    /// Returns `true` when the surface went `Live`; the caller then registers
    /// observers and the frame loop through [`RenderSurface::bind`]. Any
    /// failure applies the host fallback and ends in `Disposed`. A surface
    /// that arrives after [`RenderSurface::unmount`] is released unattached.
    pub fn finish_mount(&mut self, acquired: Result<H::Surface, SurfaceError>) -> bool {
        if self.state != LifecycleState::Acquiring {
            if let Ok(mut late) = acquired {
                late.release();
            }
            log::debug!(
                "[surface] acquisition finished in state {:?}; dropped",
                self.state
            );
            return false;
        }
        match self.go_live(acquired) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[surface] using static background: {e}");
                self.token.cancel();
                self.host.apply_fallback();
                self.state = LifecycleState::Disposed;
                false
            }
        }
    }

    /// Synchronous acquisition for hosts that can create a context in place.
    pub fn mount<F>(&mut self, acquire: F) -> bool
    where
        F: FnOnce(&SurfaceOptions) -> Result<H::Surface, SurfaceError>,
    {
        match self.begin_mount() {
            Some(options) => {
                let acquired = acquire(&options);
                self.finish_mount(acquired)
            }
            None => false,
        }
    }

    fn go_live(&mut self, acquired: Result<H::Surface, SurfaceError>) -> Result<(), SurfaceError> {
        let mut surface = acquired?;
        if let Err(e) = self.host.attach(&surface) {
            surface.release();
            return Err(e);
        }

        let mut field = ParticleField::generate(&self.config.field, &mut self.rng);
        if let Err(e) = surface.load_field(&field) {
            self.host.detach(&surface);
            surface.release();
            return Err(e);
        }
        field.take_dirty();

        let viewport = self.host.viewport();
        surface.resize(&viewport);
        let camera = Camera::new(&self.config.camera, viewport.aspect());
        let pointer = PointerTracker::new(&viewport, self.config.pointer_scale);
        log::info!(
            "[surface] live: {} particles, {}x{} buffer",
            field.len(),
            viewport.buffer_size().width,
            viewport.buffer_size().height
        );
        self.live = Some(LiveParts {
            surface,
            scene: Scene::new(field, camera),
            pointer,
            viewport,
        });
        self.state = LifecycleState::Live;
        Ok(())
    }

    /// Hands a registration to the lifecycle. Outside `Live` it is released
    /// immediately and `false` is returned.
    pub fn bind(&mut self, mut binding: Box<dyn Binding>) -> bool {
        if self.state != LifecycleState::Live {
            binding.release();
            return false;
        }
        self.bindings.push(binding);
        true
    }

    /// Tears the instance down. Safe in any state; later calls are no-ops.
    pub fn unmount(&mut self) {
        match self.state {
            LifecycleState::Disposing | LifecycleState::Disposed => return,
            LifecycleState::Uninitialized | LifecycleState::Acquiring => {
                self.token.cancel();
                self.state = LifecycleState::Disposed;
                log::debug!("[surface] unmounted before going live");
                return;
            }
            LifecycleState::Live => {}
        }

        self.state = LifecycleState::Disposing;
        // No tick may run past this point.
        self.token.cancel();
        for mut binding in self.bindings.drain(..) {
            binding.release();
        }
        if let Some(mut live) = self.live.take() {
            self.host.detach(&live.surface);
            live.surface.release();
        }
        self.state = LifecycleState::Disposed;
        log::info!("[surface] disposed");
    }

    fn live_mut(&mut self) -> Option<&mut LiveParts<H::Surface>> {
        if self.state != LifecycleState::Live || self.token.is_cancelled() {
            return None;
        }
        self.live.as_mut()
    }

    /// Advances one frame and issues one draw.
    ///
    /// Returns `Ok(false)` without touching anything when the surface is not
    /// `Live` or the frame token was cancelled.
    pub fn tick(&mut self, wall_clock_ms: f64) -> Result<bool, SurfaceError> {
        if self.state != LifecycleState::Live || self.token.is_cancelled() {
            return Ok(false);
        }
        let Some(live) = self.live.as_mut() else {
            return Ok(false);
        };
        self.updater
            .advance(&mut live.scene, live.pointer.offset(), wall_clock_ms);
        let positions_dirty = live.scene.field.take_dirty();
        live.surface.draw(&FrameView::new(&live.scene, positions_dirty))?;
        Ok(true)
    }

    pub fn pointer_moved(&mut self, client_x: f64, client_y: f64) {
        if let Some(live) = self.live_mut() {
            live.pointer.on_pointer_move(client_x, client_y);
        }
    }

    /// Viewport binding: aspect, projection and backing buffer follow
    /// `viewport`. The pointer center stays where it was at mount.
    pub fn resize(&mut self, viewport: Viewport) {
        let Some(live) = self.live_mut() else {
            return;
        };
        live.viewport = viewport;
        live.scene.camera.aspect = viewport.aspect();
        live.scene.camera.update_projection();
        live.surface.resize(&viewport);
    }

    /// Re-reads the viewport from the host.
    pub fn refresh_viewport(&mut self) {
        let viewport = self.host.viewport();
        self.resize(viewport);
    }
}

impl<H: Host> Drop for RenderSurface<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
