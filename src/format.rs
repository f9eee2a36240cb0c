//! 計測結果の文字列化。
//!
//! 閾値を超えると単位を一段上げる（m → km、m² → km²）。閾値ちょうどは切り替えない。

use serde::{Deserialize, Serialize};

use crate::{
    config::{METERS_PER_KILOMETER, MeasureConfig, SQUARE_METERS_PER_SQUARE_KILOMETER},
    geometry::geo_point::GeoPoint,
    session::MeasureKind,
};

/// 計測値と、その種類。
///
/// 値は距離・高さならメートル、面積なら平方メートル。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    kind: MeasureKind,
    value: f64,
}

impl MeasurementResult {
    pub fn new(kind: MeasureKind, value: f64) -> Self {
        Self { kind, value }
    }

    pub fn kind(&self) -> MeasureKind {
        self.kind
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// 単位付きの値。例: `1.11千米`、`250.00平方米`。
    pub fn text(&self, config: &MeasureConfig) -> String {
        let labels = config.labels();
        let decimals = config.decimals();
        match self.kind {
            MeasureKind::Distance | MeasureKind::Height => {
                if self.value.abs() > config.length_threshold() {
                    format!(
                        "{:.decimals$}{}",
                        self.value / METERS_PER_KILOMETER,
                        labels.kilometer
                    )
                } else {
                    format!("{:.decimals$}{}", self.value, labels.meter)
                }
            }
            MeasureKind::Area => {
                if self.value > config.area_threshold() {
                    format!(
                        "{:.decimals$}{}",
                        self.value / SQUARE_METERS_PER_SQUARE_KILOMETER,
                        labels.square_kilometer
                    )
                } else {
                    format!("{:.decimals$}{}", self.value, labels.square_meter)
                }
            }
        }
    }

    /// 確定ラベルの文字列。見出しと単位付きの値をつなげる。
    pub fn label(&self, config: &MeasureConfig) -> String {
        let labels = config.labels();
        let prefix = match self.kind {
            MeasureKind::Distance => &labels.distance_prefix,
            MeasureKind::Area => &labels.area_prefix,
            MeasureKind::Height => &labels.height_prefix,
        };
        format!("{}{}", prefix, self.text(config))
    }
}

/// ポインタ移動中に表示する `経度,緯度,高度,ヒント` の文字列。
pub fn hover_text(point: &GeoPoint, hint: &str) -> String {
    format!(
        "{:.2},{:.2},{:.2},{}",
        point.longitude(),
        point.latitude(),
        point.height(),
        hint
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnitLabels;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(MeasureKind::Distance, 0.0, "0.00米")]
    #[case(MeasureKind::Distance, 999.5, "999.50米")]
    #[case(MeasureKind::Distance, 1000.0, "1000.00米")]
    #[case(MeasureKind::Distance, 1106.0, "1.11千米")]
    #[case(MeasureKind::Area, 1e6, "1000000.00平方米")]
    #[case(MeasureKind::Area, 2_500_000.0, "2.50平方千米")]
    #[case(MeasureKind::Height, 25.0, "25.00米")]
    #[case(MeasureKind::Height, -1500.0, "-1.50千米")]
    fn test_text_switches_unit_above_threshold(
        #[case] kind: MeasureKind,
        #[case] value: f64,
        #[case] expected: &str,
    ) {
        let config = MeasureConfig::default();
        assert_eq!(MeasurementResult::new(kind, value).text(&config), expected);
    }

    #[rstest]
    #[case(MeasureKind::Distance, 1106.0, "长度：1.11千米")]
    #[case(MeasureKind::Area, 250.0, "面积:250.00平方米")]
    #[case(MeasureKind::Height, 25.0, "高度：25.00米")]
    fn test_label_prefix(#[case] kind: MeasureKind, #[case] value: f64, #[case] expected: &str) {
        let config = MeasureConfig::default();
        assert_eq!(MeasurementResult::new(kind, value).label(&config), expected);
    }

    #[rstest]
    #[case(MeasureKind::Distance, 500.0, "0.50千米")]
    #[case(MeasureKind::Height, 50.0, "50.00米")]
    #[case(MeasureKind::Area, 250_000.0, "0.25平方千米")]
    fn test_lowered_thresholds_keep_unit_scale(
        #[case] kind: MeasureKind,
        #[case] value: f64,
        #[case] expected: &str,
    ) {
        let config = MeasureConfig::default().with_thresholds(100.0, 1e5);
        assert_eq!(MeasurementResult::new(kind, value).text(&config), expected);
    }

    #[test]
    fn test_english_labels() {
        let config = MeasureConfig::default().with_labels(UnitLabels::english());
        let result = MeasurementResult::new(MeasureKind::Area, 3_000_000.0);
        assert_eq!(result.label(&config), "Area: 3.00km²");
    }

    #[test]
    fn test_hover_text() {
        let point = GeoPoint::from_degrees(116.391, 39.907, 43.256).unwrap();
        assert_eq!(hover_text(&point, "hint"), "116.39,39.91,43.26,hint");
    }
}
