pub mod camera;
pub mod sdf_instance;
pub mod traits;

pub use camera::{OrbitCamera, Projection, Ray};
pub use sdf_instance::{SDFBuffer, SDFInstance};
pub use traits::{FrameData, FrameHandle, RenderHost, SelectionMarker};
