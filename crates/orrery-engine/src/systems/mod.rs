pub mod picking;
pub mod render;
pub mod sdf_render;
#[cfg(feature = "vectors")]
pub mod vector;
