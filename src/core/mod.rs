pub mod camera;
pub mod constants;
pub mod error;
pub mod frame_loop;
pub mod inertia;
pub mod mapper;
pub mod media;
pub mod pointer;
pub mod scene;
pub mod smoothing;
pub mod tween;

pub use camera::*;
pub use error::*;
pub use frame_loop::*;
pub use inertia::*;
pub use mapper::*;
pub use media::*;
pub use pointer::*;
pub use scene::*;
pub use smoothing::*;
pub use tween::*;

// Shaders bundled as string constants
pub static MEDIA_WGSL: &str = include_str!("../../shaders/media.wgsl");
