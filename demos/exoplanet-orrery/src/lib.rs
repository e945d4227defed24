use wasm_bindgen::prelude::*;

pub const SYSTEMS_JSON: &str = include_str!("../data/systems.json");
pub const PLANETS_JSON: &str = include_str!("../data/planets.json");

orrery_web::export_orrery!(
    "exoplanet-orrery",
    systems = SYSTEMS_JSON,
    details = PLANETS_JSON,
);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec2;
    use orrery_engine::{DetailCatalog, OrreryConfig, OrrerySession, StarCatalog};

    fn session(name: &str) -> OrrerySession {
        let systems = StarCatalog::from_json(SYSTEMS_JSON).unwrap();
        let details = DetailCatalog::from_json(PLANETS_JSON).unwrap();
        OrrerySession::new(
            systems.get(name).unwrap(),
            &details,
            OrreryConfig::default(),
            Vec2::new(800.0, 600.0),
        )
    }

    #[test]
    fn bundled_catalogs_parse() {
        let systems = StarCatalog::from_json(SYSTEMS_JSON).unwrap();
        assert!(systems.names().contains(&"TRAPPIST-1"));
        let details = DetailCatalog::from_json(PLANETS_JSON).unwrap();
        assert!(details.get("Proxima Cen b").is_some());
    }

    #[test]
    fn trappist_places_only_detailed_planets() {
        let session = session("TRAPPIST-1");
        let names: Vec<&str> = session
            .layout()
            .entries()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["TRAPPIST-1 d", "TRAPPIST-1 e", "TRAPPIST-1 f", "TRAPPIST-1 g"]
        );
        // TRAPPIST-1 h has no detail record but still sets the scale
        let layout = session.layout();
        let factor = layout.scale_factor().unwrap();
        assert_relative_eq!((0.0619 * factor) as f32, layout.budget(), max_relative = 1e-5);
        let outer = layout.entries().last().unwrap();
        assert_relative_eq!(
            outer.orbit_radius,
            layout.budget() * 0.0469 / 0.0619,
            max_relative = 1e-5
        );
    }

    #[test]
    fn planet_without_distance_is_left_out() {
        let session = session("GJ 1061");
        assert_eq!(session.layout().len(), 1);
        assert!(session.layout().position_of("GJ 1061 d").is_none());
    }
}
