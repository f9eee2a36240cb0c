//! 楕円体・球面上の測地計算。
//!
//! すべて副作用のない関数で、角度は度、長さはメートル、面積は平方メートルで扱う。

/// 方位角と頂点での折れ角。
pub mod bearing;

/// 楕円体上の測地線距離と折れ線の総延長。
pub mod distance;

/// 球面過剰による多角形の面積。
pub mod area;
