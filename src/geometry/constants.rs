/// WGS-84 楕円体の長半径（赤道半径）。単位はメートル。
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS-84 楕円体の扁平率。
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// WGS-84 楕円体の短半径（極半径）。単位はメートル。
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

/// WGS-84 楕円体の第一離心率の2乗。
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

/// 面積計算で地球を球とみなすときの半径。
///
/// 楕円体の長半径をそのまま用いるため、面積は真の楕円体面積ではなく球面近似になる。
pub const EARTH_RADIUS: f64 = WGS84_A;
