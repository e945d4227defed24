//! Pointer-to-body resolution by ray casting.

use glam::{Vec2, Vec3};

use crate::renderer::camera::{OrbitCamera, Ray};

/// A pickable sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickTarget {
    /// Layout index of the body.
    pub entry: usize,
    pub center: Vec3,
    /// World radius.
    pub radius: f32,
}

/// The body under a viewport pixel, nearest to the camera.
pub fn pick(
    camera: &OrbitCamera,
    screen: Vec2,
    targets: impl IntoIterator<Item = PickTarget>,
) -> Option<usize> {
    pick_ray(&camera.ray(screen), targets)
}

/// The target with the smallest hit distance along `ray`.
pub fn pick_ray(ray: &Ray, targets: impl IntoIterator<Item = PickTarget>) -> Option<usize> {
    targets
        .into_iter()
        .filter_map(|t| ray.intersect_sphere(t.center, t.radius).map(|dist| (t.entry, dist)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(entry, _)| entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::CameraConfig;

    fn target(entry: usize, center: Vec3, radius: f32) -> PickTarget {
        PickTarget { entry, center, radius }
    }

    #[test]
    fn nearest_of_overlapping_wins() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 20.0),
            dir: Vec3::NEG_Z,
        };
        let targets = [
            target(0, Vec3::new(0.0, 0.0, -5.0), 1.0),
            target(1, Vec3::new(0.0, 0.0, 5.0), 1.0),
            target(2, Vec3::new(4.0, 0.0, 8.0), 1.0),
        ];
        assert_eq!(pick_ray(&ray, targets), Some(1));
    }

    #[test]
    fn empty_space_picks_nothing() {
        let camera = OrbitCamera::new(&CameraConfig::default(), 800.0, 600.0);
        let targets = [target(0, Vec3::new(10.0, 0.0, 0.0), 0.5)];
        assert_eq!(pick(&camera, Vec2::new(400.0, 300.0), targets), None);
        assert_eq!(pick(&camera, Vec2::new(400.0, 300.0), []), None);
    }

    #[test]
    fn projected_center_picks_body() {
        let camera = OrbitCamera::new(&CameraConfig::default(), 800.0, 600.0);
        let center = Vec3::new(10.0, 0.0, 0.0);
        let screen = camera.project(center).unwrap().screen;
        assert_eq!(pick(&camera, screen, [target(3, center, 0.5)]), Some(3));
    }
}
