use serde::{Deserialize, Serialize};

use crate::api::error::OrreryError;

/// A host star and the bodies known to orbit it.
///
/// Field aliases accept the exoplanet catalog export's own key names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub name: String,
    /// Solar radii.
    #[serde(default)]
    pub radius: Option<f64>,
    /// Solar masses.
    #[serde(default, alias = "starMass")]
    pub mass: Option<f64>,
    /// Iteration order only; carries no meaning.
    #[serde(default, alias = "allExo")]
    pub bodies: Vec<OrbitingBody>,
}

impl StarSystem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_body(mut self, body: OrbitingBody) -> Self {
        self.bodies.push(body);
        self
    }

    /// Parse a single system from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, OrreryError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A body as listed under its host star. Every measurement may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitingBody {
    /// Unique within the system; joins to [`PlanetDetail::name`].
    pub name: String,
    /// AU.
    #[serde(default, alias = "dist_from_star")]
    pub distance: Option<f64>,
    /// Days.
    #[serde(default)]
    pub period: Option<f64>,
    /// Earth radii.
    #[serde(default)]
    pub radius: Option<f64>,
}

impl OrbitingBody {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn with_period(mut self, period: f64) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }
}

/// Per-planet detail from the separate detail catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetDetail {
    pub name: String,
    /// Earth radii.
    #[serde(default)]
    pub radius: Option<f64>,
    /// Earth masses.
    #[serde(default)]
    pub mass: Option<f64>,
    /// Days.
    #[serde(default)]
    pub period: Option<f64>,
    /// AU.
    #[serde(default, alias = "edistance")]
    pub distance: Option<f64>,
    #[serde(default, alias = "type")]
    pub planet_type: Option<String>,
    #[serde(default)]
    pub detection_method: Option<String>,
    #[serde(default, alias = "Tsurf")]
    pub surface_temperature: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default, alias = "ESI")]
    pub esi: Option<f64>,
}

impl PlanetDetail {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_period(mut self, period: f64) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_catalog_export_names() {
        let json = r#"{
            "name": "Proxima Cen",
            "radius": 0.14,
            "starMass": 0.12,
            "allExo": [
                { "name": "Proxima Cen b", "radius": 1.07, "period": 11.19,
                  "home_star": "Proxima Cen", "dist_from_star": 0.0485 }
            ]
        }"#;
        let system = StarSystem::from_json(json).unwrap();
        assert_eq!(system.name, "Proxima Cen");
        assert_eq!(system.mass, Some(0.12));
        assert_eq!(system.bodies.len(), 1);
        assert_eq!(system.bodies[0].distance, Some(0.0485));
        assert_eq!(system.bodies[0].period, Some(11.19));
    }

    #[test]
    fn missing_and_null_measurements_are_absent() {
        let json = r#"{
            "name": "Sparse",
            "bodies": [
                { "name": "a" },
                { "name": "b", "distance": null, "period": null }
            ]
        }"#;
        let system = StarSystem::from_json(json).unwrap();
        assert!(system.radius.is_none());
        assert!(system.bodies.iter().all(|b| b.distance.is_none() && b.period.is_none()));
    }

    #[test]
    fn detail_accepts_export_aliases() {
        let json = r#"{ "name": "K2-18 b", "type": "Super Earth", "ESI": 0.73, "Tsurf": "265" }"#;
        let detail: PlanetDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.planet_type.as_deref(), Some("Super Earth"));
        assert_eq!(detail.esi, Some(0.73));
        assert_eq!(detail.surface_temperature.as_deref(), Some("265"));
    }
}
