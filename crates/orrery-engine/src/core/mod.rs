pub mod animator;
pub mod lifecycle;
pub mod scene;
pub mod session;
pub mod time;
