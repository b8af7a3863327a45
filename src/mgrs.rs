use std::{fmt::Display, str::FromStr};

use num::Integer;
use tracing::{debug, trace};

use crate::{
    alphabet::{set_for_zone, Alphabet},
    constants::{ROW_CYCLE, TILE},
    latlon::LatLon,
    utm::{check_zone, Utm, LATBAND},
    Error,
};

/// Most digits allowed in each of the easting and northing groups (1m)
pub const MAX_PRECISION: u32 = 5;
/// Number of rows before the row letters repeat
const UTM_ROW_PERIOD: i64 = 20;

// Smallest northing inside each latitude band, in LATBAND order. Southern
// bands include the false northing.
const MIN_NORTHING: [f64; 20] = [
    1_100_000., // C
    2_000_000., // D
    2_800_000., // E
    3_700_000., // F
    4_600_000., // G
    5_500_000., // H
    6_400_000., // J
    7_300_000., // K
    8_200_000., // L
    9_100_000., // M
    0.,         // N
    800_000.,   // P
    1_700_000., // Q
    2_600_000., // R
    3_500_000., // S
    4_400_000., // T
    5_300_000., // U
    6_200_000., // V
    7_000_000., // W
    7_900_000., // X
];

/// An [MGRS](https://en.wikipedia.org/wiki/Military_Grid_Reference_System)
/// (UTMREF) grid reference such as `32ULC989564`: zone number, band letter,
/// two 100km square letters, then equally long easting and northing digit
/// groups.
///
/// The value is kept as given and only checked when decoded, so building one
/// from a string never fails. Use [`str::parse`] to validate eagerly.
///
/// Decoding gives the south west corner of the square the reference
/// describes, not its center.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Mgrs(String);

impl Mgrs {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Side of the square described by the reference, in meters.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid reference can't be decoded.
    ///
    /// ```
    /// use utmref::Mgrs;
    ///
    /// assert_eq!(Mgrs::from("32ULC9856").precision().unwrap(), 1000);
    /// assert_eq!(Mgrs::from("32ULC").precision().unwrap(), 100_000);
    /// ```
    pub fn precision(&self) -> Result<u32, Error> {
        self.to_utm().map(|(_, precision)| precision)
    }

    /// Converts from [`LatLon`] to [`Mgrs`]. See [`LatLon::to_mgrs`].
    ///
    /// # Errors
    ///
    /// Returns an error if the point is off the globe or in a polar region.
    pub fn from_latlon(value: &LatLon, precision: u32) -> Result<Mgrs, Error> {
        Ok(encode(&value.to_utm()?, precision))
    }

    /// Converts from [`Mgrs`] to [`LatLon`] by way of [`Mgrs::to_utm`], also
    /// returning the precision in meters.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Mgrs::to_utm`].
    ///
    /// # Usage
    ///
    /// ```
    /// use utmref::Mgrs;
    ///
    /// let (coord, precision) = Mgrs::from("11SPA7234911844").to_latlon().unwrap();
    ///
    /// assert!((coord.latitude() - 36.23612346).abs() < 1e-8);
    /// assert!((coord.longitude() - -115.08209766).abs() < 1e-8);
    /// assert_eq!(precision, 1);
    /// ```
    pub fn to_latlon(&self) -> Result<(LatLon, u32), Error> {
        let (utm, precision) = self.to_utm()?;
        Ok((utm.to_latlon()?, precision))
    }

    /// Converts from [`Utm`] to [`Mgrs`]. See [`Utm::to_mgrs`].
    pub fn from_utm(value: &Utm, precision: u32) -> Mgrs {
        encode(value, precision)
    }

    /// Decodes the grid reference into the south west corner of the square
    /// it describes, also returning the side of that square in meters.
    /// Lowercase input is accepted.
    ///
    /// # Errors
    ///
    /// * [`Error::MalformedGridReference`] if the string is empty, doesn't
    ///   start with one or two zone digits followed by three letters, or the
    ///   remaining digits are uneven, non-numeric or more than 5 per group.
    /// * [`Error::InvalidZoneNumber`] if the zone is outside `[1, 60]`.
    /// * [`Error::InvalidZoneLetter`] if the band letter is `A`, `B`, `Y`, `Z`,
    ///   `I` or `O`.
    /// * [`Error::UnresolvableGridLetter`] if a 100km square letter doesn't
    ///   belong to the letter set of the zone.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmref::Mgrs;
    ///
    /// let (utm, precision) = Mgrs::from("32ULC989564").to_utm().unwrap();
    ///
    /// assert_eq!(utm.zone(), 32);
    /// assert_eq!(utm.band(), 'U');
    /// assert_eq!(utm.easting(), 398900.0);
    /// assert_eq!(utm.northing(), 5756400.0);
    /// assert_eq!(precision, 100);
    ///
    /// assert!(Mgrs::from("").to_utm().is_err());
    /// assert!(Mgrs::from("32ULC9897356497CORRUPT").to_utm().is_err());
    /// ```
    pub fn to_utm(&self) -> Result<(Utm, u32), Error> {
        decode(&self.0)
    }
}

impl From<&str> for Mgrs {
    fn from(value: &str) -> Self {
        Mgrs(value.to_string())
    }
}

impl From<String> for Mgrs {
    fn from(value: String) -> Self {
        Mgrs(value)
    }
}

impl From<Mgrs> for String {
    fn from(value: Mgrs) -> Self {
        value.0
    }
}

impl AsRef<str> for Mgrs {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Mgrs {
    type Err = Error;

    /// Parses and validates a grid reference, normalizing it to uppercase.
    ///
    /// ```
    /// use utmref::Mgrs;
    ///
    /// let mgrs: Mgrs = "32ulc989564".parse().unwrap();
    /// assert_eq!(mgrs.as_str(), "32ULC989564");
    ///
    /// assert!("32ULC98956".parse::<Mgrs>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)?;
        Ok(Mgrs(s.to_ascii_uppercase()))
    }
}

impl Display for Mgrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of digits per group for a precision in meters. Unknown precisions
/// fall back to 1m.
fn precision_digits(precision: u32) -> u32 {
    match precision {
        10 => 4,
        100 => 3,
        1000 => 2,
        10_000 => 1,
        _ => MAX_PRECISION,
    }
}

/// Two letter identifier of the 100km square holding the point.
fn square_id(zone: i32, easting: i64, northing: i64) -> (char, char) {
    let set = set_for_zone(zone);
    let column = easting.div_floor(&TILE);
    let row = northing.div_floor(&TILE).mod_floor(&UTM_ROW_PERIOD);

    // Columns are numbered from 1
    (Alphabet::Column.letter(set, column - 1), Alphabet::Row.letter(set, row))
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn encode(utm: &Utm, precision: u32) -> Mgrs {
    let digits = precision_digits(precision);
    let easting = utm.easting.trunc() as i64;
    let northing = utm.northing.trunc() as i64;

    let (column, row) = square_id(utm.zone, easting, northing);

    // Drop the least significant digits, never round
    let scale = 10_i64.pow(MAX_PRECISION - digits);
    let x = easting.mod_floor(&TILE) / scale;
    let y = northing.mod_floor(&TILE) / scale;

    let width = digits as usize;
    let mgrs = format!("{}{}{column}{row}{x:0width$}{y:0width$}", utm.zone, utm.band);

    trace!(zone = utm.zone, band = %utm.band, easting, northing, precision, %mgrs, "encoded MGRS");

    Mgrs(mgrs)
}

/// The pieces of a grid reference, before any letter is resolved.
struct GridReference<'a> {
    zone: i32,
    band: char,
    column: char,
    row: char,
    easting: &'a [u8],
    northing: &'a [u8],
}

fn malformed(mgrs: &str, reason: &str) -> Error {
    debug!(mgrs, reason, "rejected MGRS string");
    Error::MalformedGridReference {
        mgrs: mgrs.to_string(),
        reason: reason.to_string(),
    }
}

fn parse<'a>(mgrs: &str, value: &'a [u8]) -> Result<GridReference<'a>, Error> {
    if value.is_empty() {
        return Err(malformed(mgrs, "empty string"));
    }

    // At most two zone digits before the band letter
    let p = value
        .iter()
        .take(3)
        .position(u8::is_ascii_uppercase)
        .ok_or_else(|| malformed(mgrs, "expected 1 or 2 zone digits followed by a band letter"))?;

    if p == 0 {
        return Err(malformed(mgrs, "missing zone number"));
    }

    if !value[..p].iter().all(u8::is_ascii_digit) {
        return Err(malformed(mgrs, "zone number is not numeric"));
    }

    let zone = digits_value(&value[..p]);
    check_zone(zone).map_err(|e| {
        debug!(mgrs, zone, "rejected MGRS zone");
        e
    })?;

    if value.len() < p + 3 {
        return Err(malformed(mgrs, "too short, expected a band letter and two 100km square letters"));
    }

    let band = char::from(value[p]);
    if !LATBAND.contains(band) {
        debug!(mgrs, %band, "rejected MGRS band letter");
        return Err(Error::InvalidZoneLetter(band));
    }

    let column = char::from(value[p + 1]);
    let row = char::from(value[p + 2]);

    let rest = &value[p + 3..];
    if rest.len() % 2 != 0 {
        return Err(malformed(mgrs, "uneven number of digits"));
    }

    let sep = rest.len() / 2;
    if sep > MAX_PRECISION as usize {
        return Err(malformed(mgrs, "more than 5 digits per easting/northing group"));
    }

    if !rest.iter().all(u8::is_ascii_digit) {
        return Err(malformed(mgrs, "encountered a non-digit in the easting/northing groups"));
    }

    Ok(GridReference {
        zone,
        band,
        column,
        row,
        easting: &rest[..sep],
        northing: &rest[sep..],
    })
}

/// Value of a run of ASCII digits. Callers check the digits and bound the
/// length, so this can't overflow.
fn digits_value<T: From<u8> + Integer + Copy>(digits: &[u8]) -> T {
    let ten = T::from(10);
    digits
        .iter()
        .fold(T::zero(), |acc, d| acc * ten + T::from(d - b'0'))
}

fn decode(mgrs: &str) -> Result<(Utm, u32), Error> {
    let value = mgrs.to_ascii_uppercase();
    let GridReference { zone, band, column, row, easting, northing } = parse(mgrs, value.as_bytes())?;

    let set = set_for_zone(zone);
    let unresolved = |letter: char| {
        debug!(mgrs, %letter, zone, set, "100km square letter not in letter set");
        Error::UnresolvableGridLetter { letter, zone }
    };

    let col_idx = Alphabet::Column.steps_to(set, column).ok_or_else(|| unresolved(column))?;
    let row_idx = Alphabet::Row.steps_to(set, row).ok_or_else(|| unresolved(row))?;

    #[allow(clippy::cast_precision_loss)]
    let east100k = (col_idx + 1) as f64 * TILE as f64;
    #[allow(clippy::cast_precision_loss)]
    let mut north100k = row_idx as f64 * TILE as f64;

    // The row letters repeat every 2000km, so bring the northing up into
    // the band. Every band starts below 10000km, which bounds the loop.
    let min_northing = LATBAND
        .find(band)
        .map(|i| MIN_NORTHING[i])
        .ok_or(Error::InvalidZoneLetter(band))?;

    let mut cycles = 0;
    while north100k < min_northing {
        north100k += ROW_CYCLE;
        cycles += 1;
    }

    if cycles > 0 {
        debug!(mgrs, %band, cycles, north100k, "northing moved up into band");
    }

    #[allow(clippy::cast_possible_truncation)]
    let sep = easting.len() as u32;
    let precision = 100_000 / 10_u32.pow(sep);

    let x = east100k + f64::from(digits_value::<u32>(easting) * precision);
    let y = north100k + f64::from(digits_value::<u32>(northing) * precision);

    trace!(mgrs, zone, %band, easting = x, northing = y, precision, "decoded MGRS");

    Ok((Utm::new(zone, band, x, y), precision))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_digit_counts() {
        assert_eq!(precision_digits(1), 5);
        assert_eq!(precision_digits(10), 4);
        assert_eq!(precision_digits(100), 3);
        assert_eq!(precision_digits(1000), 2);
        assert_eq!(precision_digits(10_000), 1);
        assert_eq!(precision_digits(0), 5);
        assert_eq!(precision_digits(5), 5);
        assert_eq!(precision_digits(100_000), 5);
    }

    #[test]
    fn square_ids() {
        assert_eq!(square_id(32, 398_973, 5_756_497), ('L', 'C'));
        assert_eq!(square_id(23, 611_733, 7_800_614), ('P', 'U'));
        assert_eq!(square_id(31, 700_373, 5_704_554), ('G', 'T'));
        assert_eq!(square_id(18, 593_345, 4_507_672), ('W', 'L'));
    }

    #[test]
    fn digit_groups() {
        assert_eq!(digits_value::<u32>(b""), 0);
        assert_eq!(digits_value::<u32>(b"00373"), 373);
        assert_eq!(digits_value::<i32>(b"32"), 32);
    }

    #[test]
    fn parse_splits_groups() {
        let value = b"32ULC989564";
        let parsed = parse("32ULC989564", value).unwrap();
        assert_eq!(parsed.zone, 32);
        assert_eq!(parsed.band, 'U');
        assert_eq!(parsed.column, 'L');
        assert_eq!(parsed.row, 'C');
        assert_eq!(parsed.easting, b"989");
        assert_eq!(parsed.northing, b"564");
    }

    #[test]
    fn northing_band_correction() {
        // Rows in set 2 (zone 32) start at F, so A is 1500km up the cycle.
        // Band U starts at 5300km, two cycles are added
        let (utm, precision) = decode("32UMA").unwrap();
        assert!((utm.easting() - 400_000.).abs() < f64::EPSILON);
        assert!((utm.northing() - 5_500_000.).abs() < f64::EPSILON);
        assert_eq!(precision, 100_000);

        // Band N starts at the equator, nothing to add
        let (utm, _) = decode("31NAA").unwrap();
        assert!(utm.northing().abs() < f64::EPSILON);
    }

    #[test]
    fn min_northing_table_covers_every_band() {
        assert_eq!(MIN_NORTHING.len(), LATBAND.len());
        for w in MIN_NORTHING[..10].windows(2).chain(MIN_NORTHING[10..].windows(2)) {
            assert!(w[0] < w[1]);
        }
    }
}
