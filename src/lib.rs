#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

//! Conversions between WGS84 latitude/longitude ([`LatLon`]), UTM
//! ([`Utm`]) and MGRS/UTMREF grid references ([`Mgrs`]).
//!
//! Every conversion is a pure function of its input:
//!
//! | From     | To       | Method                  |
//! |----------|----------|-------------------------|
//! | `LatLon` | `Utm`    | [`LatLon::to_utm`]      |
//! | `LatLon` | `Mgrs`   | [`LatLon::to_mgrs`]     |
//! | `Utm`    | `LatLon` | [`Utm::to_latlon`]      |
//! | `Utm`    | `Mgrs`   | [`Utm::to_mgrs`]        |
//! | `Mgrs`   | `Utm`    | [`Mgrs::to_utm`]        |
//! | `Mgrs`   | `LatLon` | [`Mgrs::to_latlon`]     |
//!
//! Polar regions (south of 80°S and north of 84°N) are not supported.
//!
//! ```
//! use utmref::{LatLon, Mgrs};
//!
//! let coord = LatLon::create(51.95, 7.53).unwrap();
//! assert_eq!(coord.to_mgrs(100).unwrap().as_str(), "32ULC989564");
//!
//! let (utm, precision) = Mgrs::from("32ULC989564").to_utm().unwrap();
//! assert_eq!(utm.to_string(), "32U 398900 5756400");
//! assert_eq!(precision, 100);
//! ```

use thiserror::Error;

pub mod latlon;
pub mod mgrs;
pub mod utm;

pub use latlon::LatLon;
pub use mgrs::Mgrs;
pub use utm::Utm;

pub(crate) mod projections {
    pub mod transverse_mercator;
}

pub(crate) mod alphabet;
pub(crate) mod constants;
pub(crate) mod utility;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Latitude {0} outside of valid range [-90, 90]")]
    OutOfRangeLatitude(f64),
    #[error("Longitude {0} outside of valid range [-180, 180]")]
    OutOfRangeLongitude(f64),
    #[error("Latitude {0} is in a polar region (below 80°S or above 84°N), which is not supported")]
    UnsupportedPolarLatitude(f64),
    #[error("Zone {0} not in [1, 60]")]
    InvalidZoneNumber(i32),
    #[error("Zone letter {0:?} is not a UTM latitude band")]
    InvalidZoneLetter(char),
    #[error("MGRS string {mgrs:?} is invalid: {reason}")]
    MalformedGridReference {
        mgrs: String,
        reason: String,
    },
    #[error("100km square letter {letter:?} not found in the letter set for zone {zone}")]
    UnresolvableGridLetter {
        letter: char,
        zone: i32,
    },
}

trait ThisOrThat {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T;
}

impl ThisOrThat for bool {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T {
        if *self { r#true } else { r#false }
    }
}
