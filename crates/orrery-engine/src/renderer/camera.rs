use glam::{Mat4, Vec2, Vec3};

use crate::api::config::{CameraConfig, ViewMode};

/// Screen-space projection of a world point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Viewport pixels, origin top-left.
    pub screen: Vec2,
    /// Distance in front of the camera along the view axis (larger = farther).
    pub depth: f32,
    /// Pixels per world unit at that depth.
    pub scale: f32,
}

/// A world-space ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub dir: Vec3,
}

impl Ray {
    /// Distance along the ray to the first hit on a sphere, if any.
    /// Rays starting inside the sphere report the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let near = -b - sqrt_disc;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + sqrt_disc;
        (far >= 0.0).then_some(far)
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pose {
    azimuth: f32,
    elevation: f32,
    distance: f32,
    target: Vec3,
}

impl Pose {
    fn approach(&mut self, goal: &Pose, t: f32) {
        self.azimuth += (goal.azimuth - self.azimuth) * t;
        self.elevation += (goal.elevation - self.elevation) * t;
        self.distance += (goal.distance - self.distance) * t;
        self.target = self.target.lerp(goal.target, t);
    }
}

/// Damped orbit camera around the star.
///
/// User input moves the goal pose; [`OrbitCamera::update`] eases the
/// presented pose toward it. Projection and picking always use the presented
/// pose, so what is clicked is what is on screen.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    mode: ViewMode,
    fov_y: f32,
    near: f32,
    far: f32,
    min_distance: f32,
    max_distance: f32,
    damping: f32,
    home: Pose,
    current: Pose,
    goal: Pose,
    viewport: Vec2,
}

impl OrbitCamera {
    const ORBIT_SENSITIVITY: f32 = 0.008;
    const ZOOM_SENSITIVITY: f32 = 0.001;
    const MAX_ELEVATION: f32 = 1.4; // ~80 degrees

    pub fn new(config: &CameraConfig, width: f32, height: f32) -> Self {
        let min_distance = config.min_distance.max(config.near * 2.0);
        let max_distance = config.max_distance.max(min_distance);
        let home = Pose {
            azimuth: 0.0,
            elevation: config
                .elevation_degrees
                .to_radians()
                .clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION),
            distance: config.distance.clamp(min_distance, max_distance),
            target: Vec3::ZERO,
        };
        Self {
            mode: config.view,
            fov_y: config.fov_y_degrees.clamp(1.0, 170.0).to_radians(),
            near: config.near,
            far: config.far,
            min_distance,
            max_distance,
            damping: config.damping,
            home,
            current: home,
            goal: home,
            viewport: Vec2::new(width.max(1.0), height.max(1.0)),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Update viewport dimensions (pixels).
    pub fn resize(&mut self, width: f32, height: f32) {
        if width.is_finite() && height.is_finite() {
            self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
        }
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    /// Rotate by a screen drag (pixels). The flat view pans instead.
    pub fn orbit(&mut self, delta: Vec2) {
        match self.mode {
            ViewMode::Orbit => {
                self.goal.azimuth -= delta.x * Self::ORBIT_SENSITIVITY;
                self.goal.elevation = (self.goal.elevation + delta.y * Self::ORBIT_SENSITIVITY)
                    .clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
            }
            ViewMode::Flat => self.pan(delta),
        }
    }

    /// Zoom by a wheel delta; positive moves away.
    pub fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.goal.distance = (self.goal.distance * (delta * Self::ZOOM_SENSITIVITY).exp())
            .clamp(self.min_distance, self.max_distance);
    }

    /// Slide the target so the scene follows a screen drag (pixels).
    pub fn pan(&mut self, delta: Vec2) {
        let (right, up) = self.screen_axes(&self.current);
        let world_per_pixel = self.world_per_pixel(self.goal.distance);
        self.goal.target += (up * delta.y - right * delta.x) * world_per_pixel;
    }

    /// Ease toward the home pose.
    pub fn reset(&mut self) {
        self.goal = self.home;
    }

    /// Jump the presented pose to the goal.
    pub fn settle(&mut self) {
        self.current = self.goal;
    }

    /// Advance damping by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let t = if self.damping <= 0.0 || self.damping >= 1.0 {
            1.0
        } else {
            1.0 - (1.0 - self.damping).powf(dt.max(0.0) * 60.0)
        };
        self.current.approach(&self.goal, t);
    }

    pub fn azimuth(&self) -> f32 {
        self.current.azimuth
    }

    pub fn elevation(&self) -> f32 {
        self.current.elevation
    }

    pub fn distance(&self) -> f32 {
        self.current.distance
    }

    pub fn target(&self) -> Vec3 {
        self.current.target
    }

    /// Camera position in world space.
    pub fn eye(&self) -> Vec3 {
        self.eye_of(&self.current)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.current.target, self.up())
    }

    pub fn projection_matrix(&self) -> Mat4 {
        match self.mode {
            ViewMode::Orbit => Mat4::perspective_rh(self.fov_y, self.aspect(), self.near, self.far),
            ViewMode::Flat => {
                let half_h = self.flat_half_height(self.current.distance);
                let half_w = half_h * self.aspect();
                Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.near, self.far)
            }
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to the viewport. `None` when it is behind the camera.
    pub fn project(&self, world: Vec3) -> Option<Projection> {
        let view = self.view_matrix().transform_point3(world);
        let depth = -view.z;
        if depth <= self.near {
            return None;
        }
        let clip = self.projection_matrix() * view.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        Some(Projection {
            screen: self.ndc_to_screen(ndc.truncate()),
            depth,
            scale: 1.0 / self.world_per_pixel(depth),
        })
    }

    /// Ray from the camera through a viewport pixel.
    pub fn ray(&self, screen: Vec2) -> Ray {
        let ndc = self.screen_to_ndc(screen);
        let inv = self.view_projection().inverse();
        let near = inv.project_point3(ndc.extend(0.0));
        let far = inv.project_point3(ndc.extend(1.0));
        Ray {
            origin: near,
            dir: (far - near).normalize_or_zero(),
        }
    }

    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.viewport.x * 2.0 - 1.0,
            1.0 - screen.y / self.viewport.y * 2.0,
        )
    }

    pub fn ndc_to_screen(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        )
    }

    fn up(&self) -> Vec3 {
        match self.mode {
            ViewMode::Orbit => Vec3::Y,
            ViewMode::Flat => Vec3::NEG_Z,
        }
    }

    fn eye_of(&self, pose: &Pose) -> Vec3 {
        let offset = match self.mode {
            ViewMode::Orbit => {
                let (sin_el, cos_el) = pose.elevation.sin_cos();
                let (sin_az, cos_az) = pose.azimuth.sin_cos();
                Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az) * pose.distance
            }
            ViewMode::Flat => Vec3::Y * pose.distance,
        };
        pose.target + offset
    }

    /// World-space directions of screen right and screen up.
    fn screen_axes(&self, pose: &Pose) -> (Vec3, Vec3) {
        let forward = (pose.target - self.eye_of(pose)).normalize_or_zero();
        let right = forward.cross(self.up()).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }

    fn flat_half_height(&self, distance: f32) -> f32 {
        distance * (self.fov_y * 0.5).tan()
    }

    /// World units covered by one pixel at `depth`.
    fn world_per_pixel(&self, depth: f32) -> f32 {
        let half_h = match self.mode {
            ViewMode::Orbit => depth * (self.fov_y * 0.5).tan(),
            ViewMode::Flat => self.flat_half_height(self.current.distance),
        };
        2.0 * half_h / self.viewport.y
    }
}
