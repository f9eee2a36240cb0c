use crate::geodesy::bearing::angle_at_vertex;
use crate::geometry::{constants::EARTH_RADIUS, coordinate::Coordinate};

/// 球面過剰がこれを超える場合は向きが逆とみなし、角度の総和を反転する。
const REFLECT_ABOVE: f64 = 420.0;

/// 球面過剰がこれと [`REFLECT_ABOVE`] の間にある場合は 360 度との差を取る。
const WRAP_ABOVE: f64 = 300.0;

/// 多角形の各頂点の折れ角の総和を度で返す。
///
/// 頂点 `i` に対して `(i, i+1, i+2)` を巡回的に取り、`i+1` を頂点とした角を足し合わせる。
/// 始点をずらしても同じ角の集合を足すことになるため、総和は巡回シフトに対して不変になる。
pub fn interior_angle_sum<P>(points: &[P]) -> f64
where
    P: AsRef<Coordinate>,
{
    let n = points.len();
    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            let k = (i + 2) % n;
            angle_at_vertex(points[i].as_ref(), points[j].as_ref(), points[k].as_ref())
        })
        .sum()
}

/// 角度の総和 `total_angle`（度）と頂点数 `n` から、補正済みの球面過剰を度で返す。
///
/// * 球面過剰が 420 度を超える場合: 総和を `n×360 − total_angle` に反転して計算し直す
/// * 300 度より大きく 420 度未満の場合: `|360 − 球面過剰|`
/// * それ以外: そのまま
///
/// 境界値ちょうど（300, 420）は補正しない。
pub fn correct_spherical_excess(total_angle: f64, n: usize) -> f64 {
    let planar_total_angle = (n as f64 - 2.0) * 180.0;
    let spherical_excess = total_angle - planar_total_angle;

    if spherical_excess > REFLECT_ABOVE {
        let reflected = n as f64 * 360.0 - total_angle;
        reflected - planar_total_angle
    } else if spherical_excess > WRAP_ABOVE && spherical_excess < REFLECT_ABOVE {
        (360.0 - spherical_excess).abs()
    } else {
        spherical_excess
    }
}

/// 閉じた多角形（最後の頂点は最初の頂点につながる）の面積を平方メートルで返す。
///
/// 地球を半径 [`EARTH_RADIUS`] の球とみなし、球面過剰から求める。頂点が3つ未満なら 0。
pub fn polygon_area<P>(points: &[P]) -> f64
where
    P: AsRef<Coordinate>,
{
    polygon_area_with_radius(points, EARTH_RADIUS)
}

/// [`polygon_area`] の球の半径を指定できる版。
pub fn polygon_area_with_radius<P>(points: &[P], radius: f64) -> f64
where
    P: AsRef<Coordinate>,
{
    if points.len() < 3 {
        return 0.0;
    }

    let total_angle = interior_angle_sum(points);
    let spherical_excess = correct_spherical_excess(total_angle, points.len());
    spherical_excess.to_radians() * radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn lon_lat(lon: f64, lat: f64) -> Coordinate {
        Coordinate::from_lon_lat(lon, lat).unwrap()
    }

    /// 赤道付近の一辺 0.01 度の正方形（反時計回り）。
    fn small_square() -> Vec<Coordinate> {
        vec![
            lon_lat(0.0, 0.0),
            lon_lat(0.01, 0.0),
            lon_lat(0.01, 0.01),
            lon_lat(0.0, 0.01),
        ]
    }

    #[test]
    fn test_fewer_than_three_points_is_zero() {
        assert_eq!(polygon_area::<Coordinate>(&[]), 0.0);
        assert_eq!(polygon_area(&[lon_lat(0.0, 0.0)]), 0.0);
        assert_eq!(polygon_area(&[lon_lat(0.0, 0.0), lon_lat(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn test_small_square_matches_flat_area() {
        let side = (0.01f64).to_radians() * EARTH_RADIUS;
        let area = polygon_area(&small_square());
        assert!(
            (area - side * side).abs() / (side * side) < 1e-3,
            "area {area}, expected about {}",
            side * side
        );
    }

    #[test]
    fn test_clockwise_square_takes_unreflected_branch() {
        let mut square = small_square();
        square.reverse();
        let side = (0.01f64).to_radians() * EARTH_RADIUS;

        let total = interior_angle_sum(&square);
        assert!((total - 360.0).abs() < 1e-3);
        let area = polygon_area(&square);
        assert!((area - side * side).abs() / (side * side) < 1e-3);
    }

    #[test]
    fn test_counter_clockwise_square_reflects() {
        // 反時計回りでは外角の総和になり、球面過剰は 420 度を超える
        let total = interior_angle_sum(&small_square());
        assert!((total - 1080.0).abs() < 1e-3);
    }

    #[rstest]
    // 300 以下: そのまま
    #[case(4, 500.0, 140.0)]
    #[case(4, 660.0, 300.0)]
    // (300, 420): |360 − excess|
    #[case(4, 700.0, 20.0)]
    #[case(4, 750.0, 30.0)]
    // 420 ちょうどは補正しない
    #[case(4, 780.0, 420.0)]
    // 420 超: 反転してから計算し直す
    #[case(4, 1100.0, -20.0)]
    #[case(3, 900.0, 0.0)]
    fn test_spherical_excess_bands(
        #[case] n: usize,
        #[case] total_angle: f64,
        #[case] expected: f64,
    ) {
        let excess = correct_spherical_excess(total_angle, n);
        assert!((excess - expected).abs() < 1e-9, "excess {excess}, expected {expected}");
    }

    #[test]
    fn test_window_uses_next_two_vertices() {
        // 頂点 i に対して (i, i+1, i+2) を取るので、最初に評価される角は 2 番目の頂点の角
        let points = small_square();
        let first = angle_at_vertex(&points[0], &points[1], &points[2]);
        let last = angle_at_vertex(&points[3], &points[0], &points[1]);
        let middle: f64 = (1..3)
            .map(|i| angle_at_vertex(&points[i], &points[i + 1], &points[(i + 2) % 4]))
            .sum();
        assert!((interior_angle_sum(&points) - (first + middle + last)).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn random_test_cyclic_rotation_invariance(
            origin in Coordinate::arb_within(-50.0..=50.0, -150.0..=150.0),
            size in 0.01f64..=1.0,
            shift in 0usize..5,
        ) {
            let lon = origin.as_longitude();
            let lat = origin.as_latitude();
            // 凸五角形
            let polygon = vec![
                lon_lat(lon, lat),
                lon_lat(lon + size, lat),
                lon_lat(lon + 1.5 * size, lat + 0.8 * size),
                lon_lat(lon + 0.5 * size, lat + 1.5 * size),
                lon_lat(lon - 0.5 * size, lat + 0.8 * size),
            ];
            let mut rotated = polygon.clone();
            rotated.rotate_left(shift);

            let area = polygon_area(&polygon);
            let rotated_area = polygon_area(&rotated);
            prop_assert!(area > 0.0);
            prop_assert!((area - rotated_area).abs() <= area * 1e-6);
        }
    }
}
