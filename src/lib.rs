pub mod render;
pub mod simulation;

pub use render::{Canvas, DrawCommand, DrawList, ImageKind, InputEvent, InputSource, Rgb, SystemClock, WallClock};
pub use simulation::*;
