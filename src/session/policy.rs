use crate::{
    config::MeasureConfig,
    geodesy::{area::polygon_area_with_radius, distance::total_distance},
    geometry::geo_point::GeoPoint,
    session::MeasureKind,
};

/// 計測の種類ごとの、確定点の集計と確定の方針。
///
/// 点の取得手順（確定・プレビュー・終了）はすべての種類で共通で、
/// 違いはこのトレイトの実装だけにある。
pub trait Measure {
    const KIND: MeasureKind;

    /// 確定点がこの数に達したら終了の合図を待たずに確定する。
    const AUTO_FINALIZE_AT: Option<usize> = None;

    /// 確定済みの点列から現在の計測値を求める。
    fn evaluate(points: &[GeoPoint], config: &MeasureConfig) -> f64;
}

/// 折れ線の総延長。
#[derive(Debug, Clone, Copy, Default)]
pub struct Distance;

impl Measure for Distance {
    const KIND: MeasureKind = MeasureKind::Distance;

    fn evaluate(points: &[GeoPoint], _config: &MeasureConfig) -> f64 {
        total_distance(points)
    }
}

/// 多角形の面積。3点未満でも計算し、0 になる。
#[derive(Debug, Clone, Copy, Default)]
pub struct Area;

impl Measure for Area {
    const KIND: MeasureKind = MeasureKind::Area;

    fn evaluate(points: &[GeoPoint], config: &MeasureConfig) -> f64 {
        polygon_area_with_radius(points, config.earth_radius())
    }
}

/// 2点の高さの差（2点目 − 1点目）。
#[derive(Debug, Clone, Copy, Default)]
pub struct Height;

impl Measure for Height {
    const KIND: MeasureKind = MeasureKind::Height;
    const AUTO_FINALIZE_AT: Option<usize> = Some(2);

    fn evaluate(points: &[GeoPoint], _config: &MeasureConfig) -> f64 {
        match points {
            [first, second, ..] => second.height() - first.height(),
            _ => 0.0,
        }
    }
}
