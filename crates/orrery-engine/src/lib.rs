pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod input;
pub mod layout;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{
    AnimationConfig, CameraConfig, GuideConfig, LayoutConfig, OrreryConfig, StarConfig, TickMode,
    ViewMode, VisualBudget,
};
pub use api::error::OrreryError;
pub use api::types::{format_measurement, DetailRecord, EntityId, OrreryEvent, SoundEvent};
pub use assets::catalog::{OrbitingBody, PlanetDetail, StarSystem};
pub use assets::registry::{DetailCatalog, StarCatalog};
pub use components::entity::{BodyKind, Entity};
pub use components::mesh::{MeshComponent, SDFColor, SDFShape};
pub use core::animator::{orbit_point, OrbitalAnimator};
pub use core::lifecycle::Orrery;
pub use core::scene::Scene;
pub use core::session::OrrerySession;
pub use core::time::{FixedTimestep, TickClock};
pub use input::{InputEvent, InputQueue, PointerButton, PointerGesture};
pub use layout::{Layout, LayoutEntry};
pub use renderer::{
    FrameData, FrameHandle, OrbitCamera, Projection, Ray, RenderHost, SDFBuffer, SDFInstance,
    SelectionMarker,
};
pub use systems::picking::{pick, PickTarget};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorColor, VectorState, VectorVertex};
