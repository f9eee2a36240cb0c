//! ホスト側の描画エンジン（地球儀ビューア）に求める機能のTrait定義。
//!
//! ピック・描画・ステータス表示の3つに分けてあり、計測ロジックはこれらを通してだけホストに触れる。

use serde::{Deserialize, Serialize};

use crate::geometry::{ecef::Ecef, geo_point::GeoPoint};

#[cfg(test)]
pub(crate) mod mock;

/// 画面上のピクセル座標。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

impl ScreenPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `(dx, dy)` だけずらした位置を返す。
    pub fn offset(self, (dx, dy): (f64, f64)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// ホストのシーンに追加したエンティティの識別子。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(pub u64);

/// 地表に置くラベル。上端を基準に、`pixel_offset` だけずらして表示する。
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub pixel_offset: (f64, f64),
}

/// 地形の種類。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainKind {
    /// 起伏の無い WGS-84 楕円体
    Ellipsoid,
}

/// 画面座標から地表の点を求める。
pub trait SurfacePicker {
    /// 描画済みのジオメトリを優先し、無ければ地球楕円体との交点を返す。
    /// どちらとも交わらなければ `None`。
    fn pick_surface_point(&self, position: ScreenPosition) -> Option<Ecef>;
}

/// シーンへの描画。
pub trait Scene {
    fn draw_line(&mut self, points: &[GeoPoint]) -> EntityHandle;
    fn draw_polygon(&mut self, points: &[GeoPoint]) -> EntityHandle;
    fn draw_label(&mut self, at: &GeoPoint, label: &Label) -> EntityHandle;
    fn remove(&mut self, handle: EntityHandle);
    fn remove_all(&mut self);
    fn set_terrain_provider(&mut self, terrain: TerrainKind);
}

/// ポインタ付近に出すステータス表示（ツールチップ）。
pub trait StatusDisplay {
    fn show(&mut self, text: &str, at: ScreenPosition);
    fn hide(&mut self);
}

/// 計測ツールが必要とするホストの機能一式。
pub trait Host: SurfacePicker + Scene + StatusDisplay {}

impl<T: SurfacePicker + Scene + StatusDisplay> Host for T {}
