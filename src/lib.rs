/// 発生し得るすべてのエラーを`enum` 型として定義・集約。
mod error;

/// 緯度経度・地心直交座標などの地理空間座標。
mod geometry;

/// 方位角・測地線距離・球面過剰による面積。
mod geodesy;

/// 計測結果の単位付き文字列化。
mod format;

/// 計測ツールの設定。
mod config;

/// 計測セッションの状態機械と、種類ごとの集計方針。
mod session;

/// ホストの描画エンジンに求める機能のTrait定義。
mod host;

/// セッションとホストを結ぶ対話ツール。
mod tool;

/// 計測ツールを1つずつ動かす作業台。
mod workbench;

pub use crate::config::{MeasureConfig, UnitLabels};
pub use error::Error;
pub use format::{MeasurementResult, hover_text};
pub use geodesy::{
    area::{correct_spherical_excess, interior_angle_sum, polygon_area, polygon_area_with_radius},
    bearing::{angle_at_vertex, bearing},
    distance::{surface_distance, total_distance},
};
pub use geometry::{
    constants::{EARTH_RADIUS, WGS84_A, WGS84_B, WGS84_E2, WGS84_F},
    coordinate::Coordinate,
    ecef::Ecef,
    geo_point::GeoPoint,
};
pub use host::{
    EntityHandle, Host, Label, Scene, ScreenPosition, StatusDisplay, SurfacePicker, TerrainKind,
};
pub use session::{
    Area, AreaSession, Distance, DistanceSession, Height, HeightSession, Measure, MeasureKind,
    Measurement, Session, SessionState, Step,
};
pub use tool::{MeasureTool, PointerEvent};
pub use workbench::Workbench;
