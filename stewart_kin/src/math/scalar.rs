pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees.to_radians()
}

pub fn rad_to_deg(radians: f32) -> f32 {
    radians.to_degrees()
}

/// Compresses `value` smoothly toward the `[min, max]` range instead of
/// cutting it off. Values inside `[min + margin, max - margin]` pass through
/// unchanged; values beyond are squeezed exponentially so the output
/// approaches but never crosses the hard limits. Returns the adjusted value
/// and whether any compression was applied.
pub fn soft_clamp(value: f32, min: f32, max: f32, margin: f32) -> (f32, bool) {
    if value > max - margin {
        let excess = value - (max - margin);
        let squeezed = (max - margin) + margin * (1.0 - (-excess / margin).exp());
        (squeezed, true)
    } else if value < min + margin {
        let excess = (min + margin) - value;
        let squeezed = (min + margin) - margin * (1.0 - (-excess / margin).exp());
        (squeezed, true)
    } else {
        (value, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f32 = 190.027;
    const MAX: f32 = 301.348;
    const MARGIN: f32 = 5.0;

    #[test]
    fn values_inside_the_margin_band_pass_through() {
        assert_eq!(soft_clamp(250.0, MIN, MAX, MARGIN), (250.0, false));
        assert_eq!(soft_clamp(195.5, MIN, MAX, MARGIN), (195.5, false));
    }

    #[test]
    fn values_near_the_limits_are_squeezed() {
        let (value, clamped) = soft_clamp(297.0, MIN, MAX, MARGIN);
        assert!(clamped);
        assert!((value - 296.959279).abs() < 1e-3);

        let (value, clamped) = soft_clamp(193.0, MIN, MAX, MARGIN);
        assert!(clamped);
        assert!((value - 193.360550).abs() < 1e-3);
    }

    #[test]
    fn output_never_crosses_the_hard_limits() {
        let (at_max, _) = soft_clamp(MAX, MIN, MAX, MARGIN);
        assert!((at_max - 299.508603).abs() < 1e-3);

        let (beyond, _) = soft_clamp(310.0, MIN, MAX, MARGIN);
        assert!((beyond - 301.022034).abs() < 1e-3);
        assert!(beyond < MAX);

        let (below, _) = soft_clamp(179.665, MIN, MAX, MARGIN);
        assert!((below - 190.258549).abs() < 1e-3);
        assert!(below > MIN);
    }

    #[test]
    fn degree_radian_conversions_round_trip() {
        let angle = 123.456f32;
        assert!((rad_to_deg(deg_to_rad(angle)) - angle).abs() < 1e-3);
        assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
    }
}
