use std::f32::consts::TAU;

use crate::components::mesh::SDFColor;

/// `budget / max(distance)`, or `None` when no distance is a positive
/// finite number (the star-only case).
pub fn scale_factor(distances: impl IntoIterator<Item = f64>, budget: f32) -> Option<f64> {
    let max = distances
        .into_iter()
        .filter(|d| d.is_finite())
        .fold(0.0_f64, f64::max);
    if max > 0.0 && budget.is_finite() && budget > 0.0 {
        Some(budget as f64 / max)
    } else {
        None
    }
}

/// Static placement angle of body `index` out of `count`, evenly spaced.
pub fn placement_angle(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    index as f32 / count as f32 * TAU
}

/// Deterministic color by stable index. An empty palette yields white.
pub fn palette_color(index: usize, palette: &[[f32; 3]]) -> SDFColor {
    if palette.is_empty() {
        return SDFColor::WHITE;
    }
    SDFColor::from_array(palette[index % palette.len()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn factor_maps_max_to_budget() {
        let factor = scale_factor([0.5, 2.0, 1.0], 10.0).unwrap();
        assert_relative_eq!(factor * 2.0, 10.0);
    }

    #[test]
    fn degenerate_inputs_have_no_scale() {
        assert_eq!(scale_factor([], 10.0), None);
        assert_eq!(scale_factor([0.0, 0.0], 10.0), None);
        assert_eq!(scale_factor([f64::NAN], 10.0), None);
        assert_eq!(scale_factor([1.0], 0.0), None);
    }

    #[test]
    fn placement_spacing() {
        assert_eq!(placement_angle(0, 2), 0.0);
        assert_relative_eq!(placement_angle(1, 2), PI);
        assert_relative_eq!(placement_angle(3, 4), 1.5 * PI);
        assert_eq!(placement_angle(0, 0), 0.0);
    }

    #[test]
    fn palette_wraps() {
        let palette = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert_eq!(palette_color(0, &palette), SDFColor::new(1.0, 0.0, 0.0));
        assert_eq!(palette_color(3, &palette), SDFColor::new(0.0, 1.0, 0.0));
        assert_eq!(palette_color(7, &[]), SDFColor::WHITE);
    }
}
