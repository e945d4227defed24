pub mod pointer;
pub mod queue;

pub use pointer::{Drag, PointerGesture};
pub use queue::{InputEvent, InputQueue, PointerButton};
