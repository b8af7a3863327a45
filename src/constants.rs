// Semi-major axis a
pub(crate) const WGS84_A: f64 = 6_378_137.;
// Eccentricity squared, as used by the series expansions
pub(crate) const ECC_SQUARED: f64 = 0.006_694_38;

// UTM central scale factor
pub(crate) const UTM_K0: f64 = 9996.0 / 10_000.;

pub(crate) const FALSE_EASTING: f64 = 500_000.;
// Added to northings in the southern hemisphere
pub(crate) const FALSE_NORTHING: f64 = 10_000_000.;

/// Side of an MGRS 100km square, in meters
pub(crate) const TILE: i64 = 100_000;
/// Northing after which the MGRS row letters repeat
pub(crate) const ROW_CYCLE: f64 = 2_000_000.;
