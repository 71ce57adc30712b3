mod pointer;
mod window;

pub use pointer::*;
pub use window::*;
