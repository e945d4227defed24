use serde::Serialize;

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// A sound cue emitted by the orrery.
/// The numeric value maps to a host-defined sound in the page's sound manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

impl SoundEvent {
    /// A body was picked.
    pub const SELECT: Self = Self(1);
    /// The user left the orrery view.
    pub const EXIT: Self = Self(2);
}

/// Detail record handed to the external detail panel when a body is picked.
///
/// `radius` and `period` come from the detail catalog, `distance` from the
/// star system's own body list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord {
    pub name: String,
    /// Earth radii.
    pub radius: Option<f64>,
    /// Days.
    pub period: Option<f64>,
    /// AU from the host star.
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planet_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_temperature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub esi: Option<f64>,
}

impl DetailRecord {
    /// Panel lines in display order: name, radius, period, distance.
    pub fn display_lines(&self) -> [String; 4] {
        [
            self.name.clone(),
            format!("Radius: {} Earth radii", format_measurement(self.radius, 3)),
            format!("Period: {} days", format_measurement(self.period, 3)),
            format!("Distance from star: {} AU", format_measurement(self.distance, 3)),
        ]
    }
}

/// Fixed-decimal formatting with thousands separators.
/// Absent or non-finite values format as an empty string.
pub fn format_measurement(value: Option<f64>, places: usize) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return String::new(),
    };

    let fixed = format!("{:.*}", places, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Events flowing from the orrery to its collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum OrreryEvent {
    /// A body was picked. Re-picking the same body emits this again.
    Selected(DetailRecord),
    /// The previous selection was cleared (background click, close, or navigation).
    SelectionCleared,
    /// The user asked to leave the view.
    CloseRequested,
}
