use thiserror::Error;

/// Failures the render surface can observe.
///
/// Acquisition failures (`ContextCreation`, `Attachment`) never leave the
/// lifecycle: they switch the host container to its fallback background.
/// `Draw` is reported per frame and is not recovered. `Released` is returned
/// by a surface asked to load or draw after its resources were freed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("graphics context creation failed: {0}")]
    ContextCreation(String),
    #[error("surface attachment failed: {0}")]
    Attachment(String),
    #[error("draw failed: {0}")]
    Draw(String),
    #[error("surface resources already released")]
    Released,
}
