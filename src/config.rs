use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::{error::Error, geometry::constants::EARTH_RADIUS};

/// 1キロメートルあたりのメートル。
pub(crate) const METERS_PER_KILOMETER: f64 = 1000.0;

/// 1平方キロメートルあたりの平方メートル。
pub(crate) const SQUARE_METERS_PER_SQUARE_KILOMETER: f64 = 1e6;

/// 計測ツール全体の設定。
///
/// すべての項目に既定値があり、設定ファイルでは変更したい項目だけを書けばよい。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    earth_radius: f64,
    length_threshold: f64,
    area_threshold: f64,
    decimals: usize,
    label_offset: (f64, f64),
    status_offset: (f64, f64),
    labels: UnitLabels,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            earth_radius: EARTH_RADIUS,
            length_threshold: METERS_PER_KILOMETER,
            area_threshold: SQUARE_METERS_PER_SQUARE_KILOMETER,
            decimals: 2,
            label_offset: (0.0, -40.0),
            status_offset: (10.0, 20.0),
            labels: UnitLabels::default(),
        }
    }
}

impl MeasureConfig {
    /// 設定を読み込む。
    ///
    /// `name` のファイル（必須）、`{name}_local` のファイル（任意）、
    /// `MEASURE_` で始まる環境変数の順に重ねる。
    pub fn load(name: &str) -> Result<Self, Error> {
        let config = Config::builder()
            .add_source(File::with_name(name).required(true))
            .add_source(File::with_name(&format!("{name}_local")).required(false))
            .add_source(
                Environment::with_prefix("MEASURE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// 面積計算に使う球の半径（メートル）。
    pub fn earth_radius(&self) -> f64 {
        self.earth_radius
    }

    /// これを超えるとメートルからキロメートル表記に切り替える。
    pub fn length_threshold(&self) -> f64 {
        self.length_threshold
    }

    /// これを超えると平方メートルから平方キロメートル表記に切り替える。
    pub fn area_threshold(&self) -> f64 {
        self.area_threshold
    }

    pub fn decimals(&self) -> usize {
        self.decimals
    }

    /// 確定ラベルの画面上のずれ（ピクセル）。
    pub fn label_offset(&self) -> (f64, f64) {
        self.label_offset
    }

    /// ポインタ位置からのステータス表示のずれ（ピクセル）。
    pub fn status_offset(&self) -> (f64, f64) {
        self.status_offset
    }

    pub fn labels(&self) -> &UnitLabels {
        &self.labels
    }

    pub fn with_labels(mut self, labels: UnitLabels) -> Self {
        self.labels = labels;
        self
    }

    /// 単位を切り替える閾値を変える。換算の倍率は変わらない。
    pub fn with_thresholds(mut self, length: f64, area: f64) -> Self {
        self.length_threshold = length;
        self.area_threshold = area;
        self
    }

    pub fn with_earth_radius(mut self, earth_radius: f64) -> Self {
        self.earth_radius = earth_radius;
        self
    }
}

/// 単位や見出しに使う文字列。
///
/// 既定値は中国語表記。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UnitLabels {
    pub meter: String,
    pub kilometer: String,
    pub square_meter: String,
    pub square_kilometer: String,
    pub distance_prefix: String,
    pub area_prefix: String,
    pub height_prefix: String,
    pub draw_hint: String,
    pub height_hint: String,
}

impl Default for UnitLabels {
    fn default() -> Self {
        Self {
            meter: "米".to_string(),
            kilometer: "千米".to_string(),
            square_meter: "平方米".to_string(),
            square_kilometer: "平方千米".to_string(),
            distance_prefix: "长度：".to_string(),
            area_prefix: "面积:".to_string(),
            height_prefix: "高度：".to_string(),
            draw_hint: "单击绘制，双击结束".to_string(),
            height_hint: "单击两点测量高度".to_string(),
        }
    }
}

impl UnitLabels {
    pub fn english() -> Self {
        Self {
            meter: "m".to_string(),
            kilometer: "km".to_string(),
            square_meter: "m²".to_string(),
            square_kilometer: "km²".to_string(),
            distance_prefix: "Length: ".to_string(),
            area_prefix: "Area: ".to_string(),
            height_prefix: "Height: ".to_string(),
            draw_hint: "click to draw, double-click to finish".to_string(),
            height_hint: "click two points to measure height".to_string(),
        }
    }
}
