use std::f64::consts::PI;

pub(crate) mod dms {
    /// Degrees per quarter turn
    pub const QD: i32 = 90;
    /// Degrees per half turn
    pub const HD: i32 = 2 * QD;
    /// Degrees of longitude per UTM zone
    pub const ZONE_WIDTH: i32 = 6;
    /// Degrees of latitude per band (the northernmost band is 12)
    pub const BAND_HEIGHT: i32 = 8;
}

/// Angle conversions spelled out as `deg * (pi / 180)` and `180 * (rad / pi)`.
/// `f64::to_degrees` multiplies by a precomputed `180 / pi`, which rounds
/// differently in the last bit.
pub(crate) trait GeoMath {
    fn deg_to_rad(&self) -> Self;
    fn rad_to_deg(&self) -> Self;
}

impl GeoMath for f64 {
    #[inline]
    fn deg_to_rad(&self) -> f64 {
        *self * (PI / 180.0)
    }

    #[inline]
    fn rad_to_deg(&self) -> f64 {
        180.0 * (*self / PI)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn angle_conversions() {
        assert_abs_diff_eq!(180_f64.deg_to_rad(), PI);
        assert_abs_diff_eq!(PI.rad_to_deg(), 180.0);
        assert_abs_diff_eq!((-45_f64).deg_to_rad().rad_to_deg(), -45.0, epsilon = 1e-12);
    }
}
