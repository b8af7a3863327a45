use std::fmt::Display;

use crate::{Error, utm::Utm, mgrs::Mgrs, utility::dms};

/// Mean radius of Earth in meters
///
/// <https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius>
const EARTH_MEAN_RADIUS_M: f64 = 6371.0088 * 1000.0;

/// Representation of a WGS84 Latitude/Longitude point. Can be converted
/// to/from [`Utm`] and [`Mgrs`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub(crate) latitude: f64,
    #[cfg_attr(feature = "serde", serde(alias = "lon"))]
    pub(crate) longitude: f64,
}

pub(crate) fn check_range(lat: f64, lon: f64) -> Result<(), Error> {
    let qd = f64::from(dms::QD);
    let hd = f64::from(dms::HD);

    if !(-qd..=qd).contains(&lat) {
        Err(Error::OutOfRangeLatitude(lat))
    } else if !(-hd..=hd).contains(&lon) {
        Err(Error::OutOfRangeLongitude(lon))
    } else {
        Ok(())
    }
}

impl LatLon {
    /// Internal-only constructor that doesn't check the bounds of lat/lon
    pub(crate) fn new(lat: f64, lon: f64) -> LatLon {
        Self {
            latitude: lat,
            longitude: lon,
        }
    }

    /// Tries to create a latitude/longitude point from a lat/lon pair. First checks if the
    /// values are valid:
    /// * Latitude must be in range [-90,90]
    /// * Longitude must be in range [-180,180]
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRangeLatitude`] or [`Error::OutOfRangeLongitude`]
    /// if either value is invalid.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmref::LatLon;
    ///
    /// let coord = LatLon::create(51.95, 7.53);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.latitude(), 51.95);
    /// assert_eq!(coord.longitude(), 7.53);
    ///
    /// let invalid_coord_lat = LatLon::create(100.0, 0.0);
    /// assert!(invalid_coord_lat.is_err());
    ///
    /// let invalid_coord_lon = LatLon::create(0.0, -200.0);
    /// assert!(invalid_coord_lon.is_err());
    /// ```
    pub fn create(lat: f64, lon: f64) -> Result<LatLon, Error> {
        check_range(lat, lon)?;
        Ok(LatLon::new(lat, lon))
    }

    /// Returns the latitude value.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude value.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns whether the current point is in the northern hemisphere.
    ///
    /// # Example
    ///
    /// ```
    /// use utmref::LatLon;
    ///
    /// let coord = LatLon::create(40.748333, -73.985278).unwrap();
    /// assert!(coord.is_north());
    ///
    /// let coord = LatLon::create(-40.748333, -73.985278).unwrap();
    /// assert!(!coord.is_north());
    /// ```
    pub fn is_north(&self) -> bool {
        self.latitude.is_sign_positive()
    }

    /// Returns the distance in meters between two [`LatLon`] points
    /// using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
    /// Uses the [mean radius of the Earth](https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius)
    /// in the calculation: `6371.0088`
    pub fn haversine(&self, other: &LatLon) -> f64 {
        let lat1_r = self.latitude.to_radians();
        let lat2_r = other.latitude.to_radians();

        2.0 * EARTH_MEAN_RADIUS_M * (
            ((other.latitude - self.latitude).to_radians() / 2.0).sin().powi(2) +
            lat1_r.cos() * lat2_r.cos() *
            ((other.longitude - self.longitude).to_radians() / 2.0).sin().powi(2)
        ).sqrt().asin()
    }

    /// Converts from [`Utm`] to [`LatLon`]. See [`Utm::to_latlon`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoneNumber`] if the zone is outside `[1, 60]`.
    pub fn from_utm(value: &Utm) -> Result<LatLon, Error> {
        value.to_latlon()
    }

    /// Converts from [`LatLon`] to [`Utm`]. See [`Utm::from_latlon`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPolarLatitude`] south of 80°S or north of 84°N.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmref::LatLon;
    ///
    /// let coord = LatLon::create(51.95, 7.53).unwrap();
    /// let utm = coord.to_utm().unwrap();
    ///
    /// assert_eq!(utm.zone(), 32);
    /// assert_eq!(utm.band(), 'U');
    /// assert_eq!(utm.easting(), 398973.0);
    /// assert_eq!(utm.northing(), 5756497.0);
    /// ```
    pub fn to_utm(&self) -> Result<Utm, Error> {
        Utm::from_latlon(self)
    }

    /// Converts from [`Mgrs`] to [`LatLon`], also returning the precision of
    /// the grid reference in meters. See [`Mgrs::to_latlon`].
    ///
    /// # Errors
    ///
    /// Returns an error if the grid reference can't be decoded.
    pub fn from_mgrs(value: &Mgrs) -> Result<(LatLon, u32), Error> {
        value.to_latlon()
    }

    /// Converts from [`LatLon`] to [`Mgrs`]. `precision` is the side of the
    /// grid square in meters: one of `1`, `10`, `100`, `1000` or `10000`.
    /// Any other value is treated as `1`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRangeLatitude`] or [`Error::OutOfRangeLongitude`] for
    /// values outside the globe and [`Error::UnsupportedPolarLatitude`] south of
    /// 80°S or north of 84°N.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmref::LatLon;
    ///
    /// let coord = LatLon::create(-19.887495, -43.932663).unwrap();
    ///
    /// let converted = coord.to_mgrs(1).unwrap();
    ///
    /// assert_eq!(converted.to_string(), "23KPU1173300614");
    /// ```
    pub fn to_mgrs(&self, precision: u32) -> Result<Mgrs, Error> {
        Mgrs::from_latlon(self, precision)
    }
}

impl TryFrom<Utm> for LatLon {
    type Error = Error;

    fn try_from(value: Utm) -> Result<Self, Self::Error> {
        value.to_latlon()
    }
}

impl TryFrom<Mgrs> for LatLon {
    type Error = Error;

    fn try_from(value: Mgrs) -> Result<Self, Self::Error> {
        value.to_latlon().map(|(coord, _)| coord)
    }
}

impl Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let lat = buf.format(self.latitude);
        let mut buf = ryu::Buffer::new();
        let lon = buf.format(self.longitude);
        write!(
            f,
            "{lat} {lon}",
        )
    }
}
