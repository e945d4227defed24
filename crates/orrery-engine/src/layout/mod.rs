//! Static layout of a star system: which bodies are placed, where their
//! orbits sit, how large they render, and what color they get.
//!
//! Built once per mounted session and never patched.

pub mod normalize;
pub mod scale;

use std::collections::HashSet;

use crate::api::config::{AnimationConfig, LayoutConfig};
use crate::api::types::DetailRecord;
use crate::assets::catalog::{OrbitingBody, PlanetDetail, StarSystem};
use crate::assets::registry::DetailCatalog;
use crate::components::mesh::SDFColor;

pub use normalize::{normalize, normalize_distance, visual_size, NormalizedBody};
pub use scale::{palette_color, placement_angle, scale_factor};

/// Derived placement of one body.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEntry {
    pub name: String,
    /// Index into [`StarSystem::bodies`].
    pub body_index: usize,
    /// Orbit radius in world units.
    pub orbit_radius: f32,
    /// Visual size (at least the configured floor).
    pub size: f32,
    /// Sphere radius in world units.
    pub world_radius: f32,
    /// Static angle around the star, radians.
    pub placement: f32,
    pub color: SDFColor,
    /// Normalized period.
    pub period: f64,
    /// Raw distance from the star.
    pub distance: f64,
    /// Record handed out when this body is picked.
    pub record: DetailRecord,
}

/// The full set of layout entries for one session.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    entries: Vec<LayoutEntry>,
    scale_factor: Option<f64>,
    budget: f32,
}

impl Layout {
    /// Normalize, filter, and scale every body of `system`.
    ///
    /// The scale factor spans every body with a usable distance, listed or
    /// not, so the farthest known orbit always sits at the budget. Bodies
    /// without a detail record or without a usable distance get no entry.
    /// Missing details are warned about once per body name.
    pub fn build(
        system: &StarSystem,
        details: &DetailCatalog,
        layout: &LayoutConfig,
        animation: &AnimationConfig,
        budget: f32,
    ) -> Self {
        let Some(factor) = scale_factor(
            system.bodies.iter().filter_map(|b| normalize_distance(b.distance)),
            budget,
        ) else {
            log::info!(
                "{}: no valid orbit among {} bodies, star only",
                system.name,
                system.bodies.len()
            );
            return Self {
                entries: Vec::new(),
                scale_factor: None,
                budget,
            };
        };

        let mut warned: HashSet<&str> = HashSet::new();
        let mut placeable: Vec<(usize, &OrbitingBody, &PlanetDetail, NormalizedBody)> = Vec::new();

        for (body_index, body) in system.bodies.iter().enumerate() {
            let Some(detail) = details.get(&body.name) else {
                if warned.insert(body.name.as_str()) {
                    log::warn!(
                        "{}: no detail record for '{}', body not rendered",
                        system.name,
                        body.name
                    );
                }
                continue;
            };
            let Some(normalized) = normalize(
                body,
                detail,
                animation.default_period,
                layout.min_body_size,
                layout.body_size_log_scale,
            ) else {
                log::debug!("{}: '{}' has no distance, skipped", system.name, body.name);
                continue;
            };
            placeable.push((body_index, body, detail, normalized));
        }

        let count = placeable.len();
        let entries = placeable
            .into_iter()
            .enumerate()
            .map(|(index, (body_index, body, detail, n))| LayoutEntry {
                name: body.name.clone(),
                body_index,
                orbit_radius: (n.distance * factor) as f32,
                size: n.size,
                world_radius: n.size * layout.size_to_world,
                placement: placement_angle(index, count),
                color: palette_color(index, &layout.palette),
                period: n.period,
                distance: n.distance,
                record: detail_record(body, detail),
            })
            .collect();

        Self {
            entries,
            scale_factor: Some(factor),
            budget,
        }
    }

    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&LayoutEntry> {
        self.entries.get(index)
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// `None` for the star-only case.
    pub fn scale_factor(&self) -> Option<f64> {
        self.scale_factor
    }

    pub fn budget(&self) -> f32 {
        self.budget
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn detail_record(body: &OrbitingBody, detail: &PlanetDetail) -> DetailRecord {
    DetailRecord {
        name: body.name.clone(),
        radius: detail.radius,
        period: detail.period,
        distance: body.distance,
        planet_type: detail.planet_type.clone(),
        detection_method: detail.detection_method.clone(),
        surface_temperature: detail.surface_temperature.clone(),
        age: detail.age.clone(),
        esi: detail.esi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    fn build(system: &StarSystem, details: &DetailCatalog) -> Layout {
        Layout::build(
            system,
            details,
            &LayoutConfig::default(),
            &AnimationConfig::default(),
            10.0,
        )
    }

    fn details_for(names: &[&str]) -> DetailCatalog {
        names.iter().map(|n| PlanetDetail::new(*n).with_radius(1.0)).collect()
    }

    #[test]
    fn outermost_orbit_fills_budget() {
        let system = StarSystem::new("S")
            .with_body(OrbitingBody::new("a").with_distance(0.5))
            .with_body(OrbitingBody::new("b").with_distance(2.0));
        let layout = build(&system, &details_for(&["a", "b"]));
        assert_eq!(layout.len(), 2);
        assert_relative_eq!(layout.entries()[1].orbit_radius, 10.0);
        assert_relative_eq!(layout.entries()[0].orbit_radius, 2.5);
    }

    #[test]
    fn body_without_distance_gets_no_entry() {
        let system = StarSystem::new("S")
            .with_body(OrbitingBody::new("a"))
            .with_body(OrbitingBody::new("b").with_distance(1.0));
        let layout = build(&system, &details_for(&["a", "b"]));
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.entries()[0].name, "b");
        assert_eq!(layout.entries()[0].body_index, 1);
        assert!(layout.position_of("a").is_none());
    }

    #[test]
    fn body_without_detail_is_excluded_but_still_scales() {
        let system = StarSystem::new("S")
            .with_body(OrbitingBody::new("known").with_distance(1.0))
            .with_body(OrbitingBody::new("unknown").with_distance(3.0));
        let layout = build(&system, &details_for(&["known"]));
        assert_eq!(layout.len(), 1);
        assert!(layout.position_of("unknown").is_none());
        let factor = layout.scale_factor().unwrap();
        assert_relative_eq!(factor, 10.0 / 3.0);
        assert_relative_eq!(factor * 3.0, 10.0);
        assert_relative_eq!(layout.entries()[0].orbit_radius, 10.0 / 3.0);
    }

    #[test]
    fn no_details_keeps_scale_but_places_nothing() {
        let system = StarSystem::new("S").with_body(OrbitingBody::new("x").with_distance(2.0));
        let layout = build(&system, &DetailCatalog::new());
        assert!(layout.is_empty());
        assert_relative_eq!(layout.scale_factor().unwrap(), 5.0);
    }

    #[test]
    fn all_zero_distances_is_star_only() {
        let system = StarSystem::new("S")
            .with_body(OrbitingBody::new("a").with_distance(0.0))
            .with_body(OrbitingBody::new("b").with_distance(0.0));
        let layout = build(&system, &details_for(&["a", "b"]));
        assert!(layout.is_empty());
        assert_eq!(layout.scale_factor(), None);
    }

    #[test]
    fn zero_bodies_is_star_only() {
        let layout = build(&StarSystem::new("Lonely"), &DetailCatalog::new());
        assert!(layout.is_empty());
    }

    #[test]
    fn equal_distances_share_radius_opposite_placement() {
        let system = StarSystem::new("S")
            .with_body(OrbitingBody::new("a").with_distance(1.0))
            .with_body(OrbitingBody::new("b").with_distance(1.0));
        let layout = build(&system, &details_for(&["a", "b"]));
        let (a, b) = (&layout.entries()[0], &layout.entries()[1]);
        assert_eq!(a.orbit_radius, b.orbit_radius);
        assert_relative_eq!(b.placement - a.placement, PI);
    }

    #[test]
    fn record_mixes_body_distance_and_detail_values() {
        let system = StarSystem::new("Proxima Cen").with_body(
            OrbitingBody::new("Proxima Cen b")
                .with_distance(0.0485)
                .with_period(11.19),
        );
        let mut detail = PlanetDetail::new("Proxima Cen b")
            .with_radius(1.07)
            .with_period(11.186);
        detail.age = Some("4.85 Gyr".into());
        let details = DetailCatalog::new().with(detail);
        let layout = build(&system, &details);
        let record = &layout.entries()[0].record;
        assert_eq!(record.age.as_deref(), Some("4.85 Gyr"));
        assert_eq!(record.distance, Some(0.0485));
        assert_eq!(record.radius, Some(1.07));
        assert_eq!(record.period, Some(11.186));
        assert_eq!(layout.entries()[0].period, 11.19);
    }

    #[test]
    fn colors_follow_placement_index() {
        let config = LayoutConfig::default();
        let mut system = StarSystem::new("S");
        for i in 0..7 {
            system = system.with_body(OrbitingBody::new(format!("p{i}")).with_distance(1.0 + i as f64));
        }
        let names: Vec<String> = (0..7).map(|i| format!("p{i}")).collect();
        let details: DetailCatalog = names.iter().map(|n| PlanetDetail::new(n.as_str())).collect();
        let layout = build(&system, &details);
        assert_eq!(layout.entries()[5].color, SDFColor::from_array(config.palette[0]));
        assert_eq!(layout.entries()[6].color, SDFColor::from_array(config.palette[1]));
    }
}
