use tracing::warn;

use crate::geometry::{
    constants::{WGS84_A, WGS84_B, WGS84_F},
    coordinate::Coordinate,
};

/// Vincenty 法の反復回数の上限。対蹠点付近では収束しないため打ち切る。
const MAX_ITERATIONS: usize = 200;

/// 反復の収束判定（ラジアン）。
const CONVERGENCE: f64 = 1e-12;

/// WGS-84 楕円体上の2点間の測地線距離（地表面距離）をメートルで返す。
///
/// Vincenty の逆解法で計算する。高度は無視し、楕円体面上の距離を求める。
/// 同一点の場合は 0 を返す。対蹠点付近で反復が収束しない場合は警告を出し、最後の反復値で計算する。
pub fn surface_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let l = (to.as_longitude() - from.as_longitude()).to_radians();
    let u1 = ((1.0 - WGS84_F) * from.as_latitude().to_radians().tan()).atan();
    let u2 = ((1.0 - WGS84_F) * to.as_latitude().to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut sin_sigma = 0.0;
    let mut cos_sigma = 1.0;
    let mut sigma = 0.0;
    let mut cos_sq_alpha = 1.0;
    let mut cos_2sigma_m = 0.0;
    let mut converged = false;

    for _ in 0..MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            // 同一点
            return 0.0;
        }
        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);

        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // 赤道上の線では cos²α = 0
        cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };

        let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if (lambda - previous).abs() < CONVERGENCE {
            converged = true;
            break;
        }
    }
    if !converged {
        warn!(?from, ?to, "geodesic distance did not converge near antipodal points");
    }

    let u_sq = cos_sq_alpha * (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);
    let a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = b
        * sin_sigma
        * (cos_2sigma_m
            + b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                    - b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma.powi(2))
                        * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

    WGS84_B * a * (sigma - delta_sigma)
}

/// 点列を順に結んだ折れ線の総延長をメートルで返す。
///
/// 各区間の距離を1メートル単位に丸めてから合計する（合計してから丸めるのとは結果が異なる）。
/// 点が1つ以下なら 0 を返す。
///
/// # Examples
/// ```
/// # use globe_measure::{Coordinate, total_distance};
/// assert_eq!(total_distance::<Coordinate>(&[]), 0.0);
///
/// let p = Coordinate::from_lon_lat(0.0, 0.0).unwrap();
/// assert_eq!(total_distance(&[p, p]), 0.0);
/// ```
pub fn total_distance<P>(points: &[P]) -> f64
where
    P: AsRef<Coordinate>,
{
    points
        .windows(2)
        .map(|pair| surface_distance(pair[0].as_ref(), pair[1].as_ref()).round())
        .sum()
}
