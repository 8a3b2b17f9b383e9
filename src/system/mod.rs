pub mod ids;
pub mod surface;

pub use surface::{ControlEvent, ControlSurface, MemorySurface};
