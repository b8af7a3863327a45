use lazy_static::lazy_static;

use crate::{latlon::LatLon, utility::GeoMath, constants::{WGS84_A, ECC_SQUARED, UTM_K0}};

lazy_static! {
    static ref UTM: TransverseMercator = TransverseMercator::new(WGS84_A, ECC_SQUARED, UTM_K0);
}

/// Ellipsoidal transverse mercator using the truncated power series found
/// in USGS Professional Paper 1395 (Snyder). Accurate to well under a meter
/// inside a UTM zone, but no iterative refinement is done.
pub(crate) struct TransverseMercator {
    a: f64,
    k0: f64,
    /// First eccentricity squared
    e2: f64,
    /// Second eccentricity squared
    ep2: f64,
    /// Used by the footpoint latitude series
    e1: f64,
    // Meridional arc: M = a * (m0*phi - m2*sin(2phi) + m4*sin(4phi) - m6*sin(6phi))
    m0: f64,
    m2: f64,
    m4: f64,
    m6: f64,
}

impl TransverseMercator {
    fn new(a: f64, e2: f64, k0: f64) -> TransverseMercator {
        let ep2 = e2 / (1. - e2);
        let e1 = (1. - (1. - e2).sqrt()) / (1. + (1. - e2).sqrt());

        Self {
            a,
            k0,
            e2,
            ep2,
            e1,
            m0: 1. - e2 / 4. - 3. * e2 * e2 / 64. - 5. * e2 * e2 * e2 / 256.,
            m2: 3. * e2 / 8. + 3. * e2 * e2 / 32. + 45. * e2 * e2 * e2 / 1024.,
            m4: 15. * e2 * e2 / 256. + 45. * e2 * e2 * e2 / 1024.,
            m6: 35. * e2 * e2 * e2 / 3072.,
        }
    }

    /// The WGS84 projection with the UTM scale factor.
    pub fn utm() -> &'static TransverseMercator {
        &UTM
    }

    fn meridional_arc(&self, phi: f64) -> f64 {
        self.a * (
            self.m0 * phi
            - self.m2 * (2. * phi).sin()
            + self.m4 * (4. * phi).sin()
            - self.m6 * (6. * phi).sin()
        )
    }

    /// Projects a point onto the plane of the zone centered on `lon0`. The
    /// returned `(x, y)` carry no false easting or northing.
    #[allow(clippy::many_single_char_names)]
    pub fn from_latlon(&self, lon0: f64, lat: f64, lon: f64) -> (f64, f64) {
        let phi = lat.deg_to_rad();
        let lambda = lon.deg_to_rad();
        let lambda0 = lon0.deg_to_rad();

        let n = self.a / (1. - self.e2 * phi.sin() * phi.sin()).sqrt();
        let t = phi.tan() * phi.tan();
        let c = self.ep2 * phi.cos() * phi.cos();
        let a = phi.cos() * (lambda - lambda0);
        let m = self.meridional_arc(phi);

        let x = self.k0 * n * (
            a
            + (1. - t + c) * a.powi(3) / 6.
            + (5. - 18. * t + t * t + 72. * c - 58. * self.ep2) * a.powi(5) / 120.
        );

        let y = self.k0 * (
            m + n * phi.tan() * (
                a * a / 2.
                + (5. - t + 9. * c + 4. * c * c) * a.powi(4) / 24.
                + (61. - 58. * t + t * t + 600. * c - 330. * self.ep2) * a.powi(6) / 720.
            )
        );

        (x, y)
    }

    /// Inverse of [`TransverseMercator::from_latlon`]. `x` and `y` must already
    /// have the false easting and northing removed.
    #[allow(clippy::many_single_char_names)]
    pub fn to_latlon(&self, lon0: f64, x: f64, y: f64) -> LatLon {
        let e1 = self.e1;

        let m = y / self.k0;
        let mu = m / (self.a * self.m0);

        // Footpoint latitude
        let phi1 = mu
            + (3. * e1 / 2. - 27. * e1.powi(3) / 32.) * (2. * mu).sin()
            + (21. * e1 * e1 / 16. - 55. * e1.powi(4) / 32.) * (4. * mu).sin()
            + (151. * e1.powi(3) / 96.) * (6. * mu).sin();

        let sin_phi1 = phi1.sin();
        let n1 = self.a / (1. - self.e2 * sin_phi1 * sin_phi1).sqrt();
        let t1 = phi1.tan() * phi1.tan();
        let c1 = self.ep2 * phi1.cos() * phi1.cos();
        let r1 = self.a * (1. - self.e2) / (1. - self.e2 * sin_phi1 * sin_phi1).powf(1.5);
        let d = x / (n1 * self.k0);

        let lat = phi1 - (n1 * phi1.tan() / r1) * (
            d * d / 2.
            - (5. + 3. * t1 + 10. * c1 - 4. * c1 * c1 - 9. * self.ep2) * d.powi(4) / 24.
            + (61. + 90. * t1 + 298. * c1 + 45. * t1 * t1 - 252. * self.ep2 - 3. * c1 * c1) * d.powi(6) / 720.
        );

        let lon = (
            d
            - (1. + 2. * t1 + c1) * d.powi(3) / 6.
            + (5. - 2. * c1 + 28. * t1 - 3. * c1 * c1 + 8. * self.ep2 + 24. * t1 * t1) * d.powi(5) / 120.
        ) / phi1.cos();

        LatLon::new(lat.rad_to_deg(), lon0 + lon.rad_to_deg())
    }
}
