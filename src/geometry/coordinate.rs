use std::fmt;

#[cfg(any(test, feature = "random"))]
use std::ops::RangeInclusive;

#[cfg(feature = "random")]
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// 緯度・経度・高度で表される WGS-84 上の地理座標。
///
/// 緯度・経度は度、高度は楕円体高でメートル単位。
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinate")
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("altitude", &self.altitude)
            .finish()
    }
}

impl Coordinate {
    /// 緯度・経度・高度から [`Coordinate`] を生成する。
    ///
    /// 緯度が `-90.0..=90.0`、経度が `-180.0..=180.0` の範囲外（NaN を含む）の場合はエラーになる。
    ///
    /// # Examples
    /// ```
    /// # use globe_measure::Coordinate;
    /// let c = Coordinate::new(35.68, 139.76, 40.0).unwrap();
    /// assert_eq!(c.as_latitude(), 35.68);
    /// assert_eq!(c.as_longitude(), 139.76);
    /// assert_eq!(c.as_altitude(), 40.0);
    ///
    /// assert!(Coordinate::new(91.0, 0.0, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Result<Coordinate, Error> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::LatitudeOutOfRange { latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::LongitudeOutOfRange { longitude });
        }
        Ok(Coordinate {
            latitude,
            longitude,
            altitude,
        })
    }

    /// 経度・緯度の順で受け取り、高度 0 の [`Coordinate`] を生成する。
    pub fn from_lon_lat(longitude: f64, latitude: f64) -> Result<Coordinate, Error> {
        Coordinate::new(latitude, longitude, 0.0)
    }

    pub fn as_latitude(&self) -> f64 {
        self.latitude
    }

    pub fn as_longitude(&self) -> f64 {
        self.longitude
    }

    pub fn as_altitude(&self) -> f64 {
        self.altitude
    }

    /// 高度だけを差し替えた座標を返す。
    pub fn with_altitude(self, altitude: f64) -> Coordinate {
        Coordinate { altitude, ..self }
    }

    /// 指定した範囲内でランダムな [`Coordinate`] を生成する。
    #[cfg(feature = "random")]
    pub fn random_within_using<R: Rng + ?Sized>(
        rng: &mut R,
        latitude: RangeInclusive<f64>,
        longitude: RangeInclusive<f64>,
    ) -> Coordinate {
        let latitude = rng.random_range(latitude).clamp(-90.0, 90.0);
        let longitude = rng.random_range(longitude).clamp(-180.0, 180.0);
        Coordinate {
            latitude,
            longitude,
            altitude: 0.0,
        }
    }

    /// テスト用に、指定範囲内の [`Coordinate`] を生成する Strategy。
    #[cfg(test)]
    pub fn arb_within(
        latitude: RangeInclusive<f64>,
        longitude: RangeInclusive<f64>,
    ) -> impl proptest::strategy::Strategy<Value = Coordinate> {
        use proptest::strategy::Strategy;

        (latitude, longitude).prop_map(|(latitude, longitude)| Coordinate {
            latitude,
            longitude,
            altitude: 0.0,
        })
    }
}

impl AsRef<Coordinate> for Coordinate {
    fn as_ref(&self) -> &Coordinate {
        self
    }
}
