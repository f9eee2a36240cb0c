use std::{fmt, ops::Sub};

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    geometry::{
        constants::{WGS84_A, WGS84_B, WGS84_E2, WGS84_F},
        coordinate::Coordinate,
    },
};

/// 地心直交座標系（ECEF: Earth-Centered, Earth-Fixed）における座標を表す。
///
/// 原点は地球の重心にあり、
/// * X 軸は赤道面上で本初子午線方向
/// * Y 軸は赤道面上で東経 90 度方向
/// * Z 軸は北極方向
///
/// 単位はすべてメートル。ホストの描画エンジンがピックした位置はこの型で受け取る。
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ecef {
    x: f64,
    y: f64,
    z: f64,
}

impl fmt::Debug for Ecef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ecef")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .finish()
    }
}

impl Ecef {
    /// 指定された XYZ 成分から [`Ecef`] を生成する。
    ///
    /// # Examples
    /// ```
    /// # use globe_measure::Ecef;
    /// let ecef = Ecef::new(10.0, 20.0, 30.0);
    ///
    /// assert_eq!(ecef.as_x(), 10.0);
    /// assert_eq!(ecef.as_y(), 20.0);
    /// assert_eq!(ecef.as_z(), 30.0);
    /// ```
    pub fn new(x: f64, y: f64, z: f64) -> Ecef {
        Ecef { x, y, z }
    }

    pub fn as_x(&self) -> f64 {
        self.x
    }

    pub fn as_y(&self) -> f64 {
        self.y
    }

    pub fn as_z(&self) -> f64 {
        self.z
    }

    /// 他の [`Ecef`] 座標との直線距離をメートル単位で返す。
    ///
    /// # Examples
    /// ```
    /// # use globe_measure::Ecef;
    /// let a = Ecef::new(0.0, 0.0, 0.0);
    /// let b = Ecef::new(3.0, 4.0, 0.0);
    ///
    /// assert_eq!(a.distance(&b), 5.0);
    /// ```
    pub fn distance(&self, other: &Ecef) -> f64 {
        (*self - *other).norm_squared().sqrt()
    }

    // 原点からの距離の2乗を取得する。
    pub fn norm_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
}

impl From<Coordinate> for Ecef {
    /// 地理座標（緯度・経度・高度）から地心直交座標系（ECEF）への変換。
    fn from(value: Coordinate) -> Self {
        let lat = value.as_latitude().to_radians();
        let lon = value.as_longitude().to_radians();
        let h = value.as_altitude();

        let sin_lat = lat.sin();
        let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();

        Ecef {
            x: (n + h) * lat.cos() * lon.cos(),
            y: (n + h) * lat.cos() * lon.sin(),
            z: (n * (1.0 - WGS84_E2) + h) * sin_lat,
        }
    }
}

impl TryFrom<Ecef> for Coordinate {
    type Error = Error;
    /// 地心直交座標系（ECEF）から地理座標（緯度・経度・高度）への変換。
    fn try_from(value: Ecef) -> Result<Self, Self::Error> {
        let x = value.x;
        let y = value.y;
        let z = value.z;

        if !value.norm_squared().is_finite() || value.norm_squared() < 1.0 {
            return Err(Error::DegenerateEcef { x, y, z });
        }

        let lon = y.atan2(x);
        let p = (x * x + y * y).sqrt();

        // 極軸上では反復が発散するので直接求める
        if p < 1e-9 {
            let lat = if z >= 0.0 { 90.0 } else { -90.0 };
            return Coordinate::new(lat, 0.0, z.abs() - WGS84_B);
        }

        // 緯度の初期値（Bowring）
        let mut lat = (z / p).atan2(1.0 - WGS84_F);
        let mut h = 0.0;

        for _ in 0..10 {
            let sin_lat = lat.sin();
            let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
            h = p / lat.cos() - n;

            let new_lat = (z + WGS84_E2 * n * sin_lat).atan2(p);

            if (new_lat - lat).abs() < 1e-12 {
                lat = new_lat;
                break;
            }
            lat = new_lat;
        }

        Coordinate::new(lat.to_degrees(), lon.to_degrees(), h)
    }
}

impl Sub for Ecef {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}
