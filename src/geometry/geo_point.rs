use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    geometry::{coordinate::Coordinate, ecef::Ecef},
};

/// 計測でピックされた1点。
///
/// 地理座標に加えて、描画に使う地心直交座標を保持することがある。
/// 一度ピックされた点は変更しない。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    coordinate: Coordinate,
    position: Option<Ecef>,
}

impl GeoPoint {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            position: None,
        }
    }

    /// 経度・緯度・高度（度・度・メートル）から生成する。
    pub fn from_degrees(longitude: f64, latitude: f64, height: f64) -> Result<Self, Error> {
        Ok(Self::new(Coordinate::new(latitude, longitude, height)?))
    }

    /// ホストがピックした ECEF 座標から生成する。元の ECEF 座標は描画用にそのまま保持する。
    pub fn from_ecef(position: Ecef) -> Result<Self, Error> {
        let coordinate = Coordinate::try_from(position)?;
        Ok(Self {
            coordinate,
            position: Some(position),
        })
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn longitude(&self) -> f64 {
        self.coordinate.as_longitude()
    }

    pub fn latitude(&self) -> f64 {
        self.coordinate.as_latitude()
    }

    pub fn height(&self) -> f64 {
        self.coordinate.as_altitude()
    }

    /// 描画用の ECEF 座標。ピック時の座標が無ければ地理座標から計算する。
    pub fn position(&self) -> Ecef {
        self.position.unwrap_or_else(|| self.coordinate.into())
    }
}

impl AsRef<Coordinate> for GeoPoint {
    fn as_ref(&self) -> &Coordinate {
        &self.coordinate
    }
}

impl From<Coordinate> for GeoPoint {
    fn from(value: Coordinate) -> Self {
        GeoPoint::new(value)
    }
}
