use std::f64::consts::PI;

use crate::geometry::coordinate::Coordinate;

/// `from` から `to` へ向かう測地線の初期方位角を度で返す。範囲は `[0, 360)`。
///
/// 北を 0、東を 90 とする。同一点どうしでは `atan2(0, 0)` により 0 になる。
///
/// # Examples
/// ```
/// # use globe_measure::{Coordinate, bearing};
/// let origin = Coordinate::from_lon_lat(0.0, 0.0).unwrap();
/// let east = Coordinate::from_lon_lat(1.0, 0.0).unwrap();
/// assert!((bearing(&origin, &east) - 90.0).abs() < 1e-9);
/// ```
pub fn bearing(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.as_latitude().to_radians();
    let lon1 = from.as_longitude().to_radians();
    let lat2 = to.as_latitude().to_radians();
    let lon2 = to.as_longitude().to_radians();

    let mut angle = -((lon1 - lon2).sin() * lat2.cos())
        .atan2(lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * (lon1 - lon2).cos());
    if angle < 0.0 {
        angle += PI * 2.0;
    }
    normalize_degrees(angle.to_degrees())
}

/// `[0, 360)` に収める。負の微小値に 360 を足すと丸めで 360 ちょうどになるので 0 に寄せる。
fn normalize_degrees(degrees: f64) -> f64 {
    let degrees = degrees.rem_euclid(360.0);
    if degrees >= 360.0 { 0.0 } else { degrees }
}

/// `p2` を頂点とした `p1`→`p2`→`p3` の折れ角を度で返す。範囲は `[0, 360)`。
///
/// `bearing(p2→p1) − bearing(p2→p3)` を負なら 360 足して正規化する。
/// 時計回りに辿ると内角、反時計回りでは外角になる。
pub fn angle_at_vertex(p1: &Coordinate, p2: &Coordinate, p3: &Coordinate) -> f64 {
    let bearing21 = bearing(p2, p1);
    let bearing23 = bearing(p2, p3);
    normalize_degrees(bearing21 - bearing23)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn lon_lat(lon: f64, lat: f64) -> Coordinate {
        Coordinate::from_lon_lat(lon, lat).unwrap()
    }

    #[rstest]
    #[case(0.0, 1.0, 0.0)]
    #[case(1.0, 0.0, 90.0)]
    #[case(0.0, -1.0, 180.0)]
    #[case(-1.0, 0.0, 270.0)]
    fn test_cardinal_bearings(#[case] lon: f64, #[case] lat: f64, #[case] expected: f64) {
        let b = bearing(&lon_lat(0.0, 0.0), &lon_lat(lon, lat));
        assert!((b - expected).abs() < 1e-9, "bearing {b}, expected {expected}");
    }

    #[test]
    fn test_identical_points_bearing_zero() {
        let p = lon_lat(116.39, 39.9);
        assert_eq!(bearing(&p, &p), 0.0);
    }

    #[test]
    fn test_tiny_negative_bearing_stays_below_360() {
        // 真北からごくわずかに西へずれた方向
        let origin = lon_lat(0.0, 0.0);
        let north = lon_lat(0.0, 1.0);
        let almost_north = lon_lat(-1e-16, 1.0);

        let b = bearing(&origin, &almost_north);
        assert!((0.0..360.0).contains(&b), "bearing {b}");

        let angle = angle_at_vertex(&north, &origin, &almost_north);
        assert!((0.0..360.0).contains(&angle), "angle {angle}");
    }

    #[rstest]
    #[case(-1e-14, 0.0)]
    #[case(360.0, 0.0)]
    #[case(-90.0, 270.0)]
    #[case(450.0, 90.0)]
    fn test_normalize_degrees(#[case] input: f64, #[case] expected: f64) {
        assert!((normalize_degrees(input) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_angle_clockwise_square_is_interior() {
        // 時計回り: 原点 → 北 → 北東 → 東
        let a = lon_lat(0.0, 0.0);
        let d = lon_lat(0.0, 0.01);
        let c = lon_lat(0.01, 0.01);
        let angle = angle_at_vertex(&a, &d, &c);
        assert!((angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_angle_counter_clockwise_square_is_exterior() {
        let a = lon_lat(0.0, 0.0);
        let b = lon_lat(0.01, 0.0);
        let c = lon_lat(0.01, 0.01);
        let angle = angle_at_vertex(&a, &b, &c);
        assert!((angle - 270.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn random_test_bearing_reciprocal(
            a in Coordinate::arb_within(-60.0..=60.0, -170.0..=170.0),
            dlon in -0.5f64..=0.5,
            dlat in -0.5f64..=0.5,
        ) {
            // 同一点は除外
            prop_assume!(dlon.abs() + dlat.abs() > 1e-3);
            let b = lon_lat(a.as_longitude() + dlon, a.as_latitude() + dlat);

            let forward = bearing(&a, &b);
            let backward = bearing(&b, &a);
            prop_assert!((0.0..=360.0).contains(&forward));
            prop_assert!((0.0..=360.0).contains(&backward));

            // 子午線収束の分だけずれるので 1 度まで許容する
            let diff = (forward - backward).rem_euclid(360.0);
            prop_assert!((diff - 180.0).abs() < 1.0, "forward {} backward {}", forward, backward);
        }
    }
}
