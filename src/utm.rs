use std::fmt::Display;

use tracing::{debug, trace};

use crate::{
    constants::{FALSE_EASTING, FALSE_NORTHING},
    latlon::{check_range, LatLon},
    mgrs::{self, Mgrs},
    projections::transverse_mercator::TransverseMercator,
    utility::dms,
    Error, ThisOrThat,
};

pub(crate) const MINUTMZONE: i32 = 1;
pub(crate) const MAXUTMZONE: i32 = 60;

/// Southern limit of UTM coverage
pub(crate) const MIN_LATITUDE: f64 = -80.;
/// Northern limit of UTM coverage
pub(crate) const MAX_LATITUDE: f64 = 84.;

/// Latitude band letters from 80°S to 84°N, 8° each except for `X` (12°).
pub(crate) const LATBAND: &str = "CDEFGHJKLMNPQRSTUVWX";

/// Representation of a WGS84
/// [UTM](https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system)
/// point: zone number, latitude band letter and whole-meter easting/northing.
/// Southern hemisphere northings include the 10,000,000m false northing.
///
/// The band letter is only used to tell the hemispheres apart when
/// converting back to latitude/longitude: any letter below `N` is taken as
/// southern. A letter that disagrees with the real hemisphere of the point
/// gives a result on the wrong side of the equator rather than an error.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Utm {
    pub(crate) zone: i32,
    #[cfg_attr(feature = "serde", serde(alias = "zone_letter", alias = "letter"))]
    pub(crate) band: char,
    pub(crate) easting: f64,
    pub(crate) northing: f64,
}

impl Utm {
    /// Internal-only constructor that doesn't check the coordinate
    pub(crate) fn new(zone: i32, band: char, easting: f64, northing: f64) -> Utm {
        Self {
            zone,
            band,
            easting,
            northing,
        }
    }

    /// Tries to create a UTM point from its constituent parts. Lowercase
    /// band letters are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoneNumber`] if the zone is outside the range `[1, 60]`.
    /// Returns [`Error::InvalidZoneLetter`] if the band isn't one of `CDEFGHJKLMNPQRSTUVWX`.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmref::Utm;
    ///
    /// let coord = Utm::create(23, 'k', 611733.0, 7800614.0);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.zone(), 23);
    /// assert_eq!(coord.band(), 'K');
    /// assert!(!coord.is_north());
    ///
    /// let invalid_zone = Utm::create(61, 'K', 611733.0, 7800614.0);
    /// assert!(invalid_zone.is_err());
    ///
    /// let invalid_band = Utm::create(23, 'Y', 611733.0, 7800614.0);
    /// assert!(invalid_band.is_err());
    /// ```
    pub fn create(zone: i32, band: char, easting: f64, northing: f64) -> Result<Utm, Error> {
        check_zone(zone)?;

        let band = band.to_ascii_uppercase();
        if !LATBAND.contains(band) {
            return Err(Error::InvalidZoneLetter(band));
        }

        Ok(Utm::new(zone, band, easting, northing))
    }

    /// Returns the UTM zone.
    pub fn zone(&self) -> i32 {
        self.zone
    }

    /// Returns the latitude band letter.
    pub fn band(&self) -> char {
        self.band
    }

    /// Returns whether the band letter designates the northern hemisphere.
    pub fn is_north(&self) -> bool {
        self.band >= 'N'
    }

    /// Returns the UTM easting.
    pub fn easting(&self) -> f64 {
        self.easting
    }

    /// Returns the UTM northing.
    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// Longitude of the zone's central meridian, in degrees.
    ///
    /// ```
    /// use utmref::Utm;
    ///
    /// let coord = Utm::create(32, 'U', 398973.0, 5756497.0).unwrap();
    /// assert_eq!(coord.central_meridian(), 9.0);
    /// ```
    pub fn central_meridian(&self) -> f64 {
        central_meridian(self.zone)
    }

    /// Converts from [`LatLon`] to [`Utm`]. Easting and northing are
    /// truncated to whole meters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPolarLatitude`] south of 80°S or north of 84°N.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmref::{LatLon, Utm};
    ///
    /// let coord = LatLon::create(-19.887495, -43.932663).unwrap();
    /// let converted = Utm::from_latlon(&coord).unwrap();
    ///
    /// assert_eq!(converted.to_string(), "23K 611733 7800614");
    /// ```
    pub fn from_latlon(value: &LatLon) -> Result<Utm, Error> {
        let (lat, lon) = (value.latitude, value.longitude);
        check_range(lat, lon)?;

        let band = latitude_band(lat).ok_or(Error::UnsupportedPolarLatitude(lat))?;
        let zone = standard_zone(lat, lon);

        trace!(lat, lon, zone, %band, "projecting to UTM");

        let (x, y) = TransverseMercator::utm().from_latlon(central_meridian(zone), lat, lon);

        let easting = x + FALSE_EASTING;
        let northing = y + (lat < 0.).ternary(FALSE_NORTHING, 0.);

        Ok(Utm::new(zone, band, easting.trunc(), northing.trunc()))
    }

    /// Converts from [`Utm`] to [`LatLon`]. The hemisphere comes from the band
    /// letter alone, see [`Utm`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoneNumber`] if the zone is outside `[1, 60]`.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmref::Utm;
    ///
    /// let coord = Utm::create(23, 'K', 611733.0, 7800614.0).unwrap();
    /// let converted = coord.to_latlon().unwrap();
    ///
    /// assert!((converted.latitude() - -19.887498).abs() < 1e-6);
    /// assert!((converted.longitude() - -43.932664).abs() < 1e-6);
    /// ```
    pub fn to_latlon(&self) -> Result<LatLon, Error> {
        // Deserialized values never went through `create`
        check_zone(self.zone)?;

        trace!(zone = self.zone, band = %self.band, easting = self.easting, northing = self.northing, "inverse projecting UTM");

        let x = self.easting - FALSE_EASTING;
        let y = self.northing - self.is_north().ternary(0., FALSE_NORTHING);

        Ok(TransverseMercator::utm().to_latlon(central_meridian(self.zone), x, y))
    }

    /// Converts from [`Mgrs`] to [`Utm`], also returning the precision of the
    /// grid reference in meters. See [`Mgrs::to_utm`].
    ///
    /// # Errors
    ///
    /// Returns an error if the grid reference can't be decoded.
    pub fn from_mgrs(value: &Mgrs) -> Result<(Utm, u32), Error> {
        value.to_utm()
    }

    /// Converts from [`Utm`] to [`Mgrs`]. `precision` is the side of the grid
    /// square in meters: one of `1`, `10`, `100`, `1000` or `10000`. Any other
    /// value is treated as `1`.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmref::Utm;
    ///
    /// let coord = Utm::create(31, 'U', 700373.0, 5704554.0).unwrap();
    ///
    /// assert_eq!(coord.to_mgrs(1).as_str(), "31UGT0037304554");
    /// assert_eq!(coord.to_mgrs(1000).as_str(), "31UGT0004");
    /// ```
    pub fn to_mgrs(&self, precision: u32) -> Mgrs {
        mgrs::encode(self, precision)
    }
}

impl TryFrom<LatLon> for Utm {
    type Error = Error;

    fn try_from(value: LatLon) -> Result<Self, Self::Error> {
        Utm::from_latlon(&value)
    }
}

impl TryFrom<Mgrs> for Utm {
    type Error = Error;

    fn try_from(value: Mgrs) -> Result<Self, Self::Error> {
        value.to_utm().map(|(coord, _)| coord)
    }
}

pub(crate) fn check_zone(zone: i32) -> Result<(), Error> {
    if (MINUTMZONE..=MAXUTMZONE).contains(&zone) {
        Ok(())
    } else {
        Err(Error::InvalidZoneNumber(zone))
    }
}

pub(crate) fn central_meridian(zone: i32) -> f64 {
    f64::from(dms::ZONE_WIDTH * zone - dms::HD - dms::ZONE_WIDTH / 2)
}

/// Band letter for a latitude, `None` outside of `[-80, 84]`.
pub(crate) fn latitude_band(lat: f64) -> Option<char> {
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&lat) {
        return None;
    }

    // 84 is the top edge of X, which is 12° tall
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let idx = (((lat - MIN_LATITUDE) / f64::from(dms::BAND_HEIGHT)).floor() as usize).min(LATBAND.len() - 1);

    LATBAND.chars().nth(idx)
}

/// Zone number for a point, including the Norway and Svalbard exceptions.
/// Latitude and longitude must already be in range.
pub(crate) fn standard_zone(lat: f64, lon: f64) -> i32 {
    // 180° belongs to zone 60, not a 61st zone
    #[allow(clippy::cast_possible_truncation)]
    let default_zone = if lon >= f64::from(dms::HD) {
        MAXUTMZONE
    } else {
        ((lon + f64::from(dms::HD)) / f64::from(dms::ZONE_WIDTH)).floor() as i32 + 1
    };

    let zone = if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        // The Norway exception
        32
    } else if (72.0..84.0).contains(&lat) {
        // The Svalbard exception
        match lon {
            lon if (0.0..9.0).contains(&lon) => 31,
            lon if (9.0..21.0).contains(&lon) => 33,
            lon if (21.0..33.0).contains(&lon) => 35,
            lon if (33.0..42.0).contains(&lon) => 37,
            _ => default_zone,
        }
    } else {
        default_zone
    };

    if zone != default_zone {
        debug!(lat, lon, default_zone, zone, "zone exception applied");
    }

    zone
}

impl Display for Utm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} {:.0} {:.0}",
            self.zone,
            self.band,
            self.easting,
            self.northing
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_zones() {
        assert_eq!(standard_zone(0., -180.), 1);
        assert_eq!(standard_zone(0., -174.), 2);
        assert_eq!(standard_zone(51.95, 7.53), 32);
        assert_eq!(standard_zone(0., 179.99), 60);
        assert_eq!(standard_zone(0., 180.), 60);
    }

    #[test]
    fn norway_exception() {
        assert_eq!(standard_zone(60., 4.), 32);
        assert_eq!(standard_zone(56., 3.), 32);
        // Outside the exception's edges
        assert_eq!(standard_zone(64., 4.), 31);
        assert_eq!(standard_zone(60., 2.99), 31);
        assert_eq!(standard_zone(60., 12.), 33);
    }

    #[test]
    fn svalbard_exception() {
        assert_eq!(standard_zone(75., 8.), 31);
        assert_eq!(standard_zone(75., 9.), 33);
        assert_eq!(standard_zone(75., 20.9), 33);
        assert_eq!(standard_zone(75., 21.), 35);
        assert_eq!(standard_zone(75., 34.), 37);
        assert_eq!(standard_zone(75., 42.), 38);
        assert_eq!(standard_zone(75., -1.), 30);
        assert_eq!(standard_zone(71.9, 8.), 32);
    }

    #[test]
    fn band_letters() {
        assert_eq!(latitude_band(-80.), Some('C'));
        assert_eq!(latitude_band(-72.1), Some('C'));
        assert_eq!(latitude_band(-8.), Some('M'));
        assert_eq!(latitude_band(-0.0001), Some('M'));
        assert_eq!(latitude_band(0.), Some('N'));
        assert_eq!(latitude_band(51.95), Some('U'));
        assert_eq!(latitude_band(72.), Some('X'));
        assert_eq!(latitude_band(84.), Some('X'));
        assert_eq!(latitude_band(84.0001), None);
        assert_eq!(latitude_band(-80.0001), None);
    }

    #[test]
    fn central_meridians() {
        assert!((central_meridian(1) - -177.).abs() < f64::EPSILON);
        assert!((central_meridian(32) - 9.).abs() < f64::EPSILON);
        assert!((central_meridian(60) - 177.).abs() < f64::EPSILON);
    }
}
