pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod frame;
pub mod lifecycle;
pub mod pointer;
pub mod state;
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");

pub use config::*;
pub use error::*;
pub use field::*;
pub use frame::*;
pub use lifecycle::*;
pub use pointer::*;
pub use state::*;
