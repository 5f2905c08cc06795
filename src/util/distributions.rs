use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::CtsurvErr;
use crate::util::error::NormalDistErr;

/// Standard normal CDF, Phi(z)
pub fn std_normal_cdf(z: f64) -> f64 {
    Normal::standard().cdf(z)
}

/// Standard normal quantile, Phi^-1(p), for p in (0, 1)
pub fn std_normal_quantile(p: f64) -> Result<f64, CtsurvErr> {
    if !(p > 0.0 && p < 1.0) {
        return Err(NormalDistErr::QuantileOutOfBounds(p).into());
    }
    Ok(Normal::standard().inverse_cdf(p))
}

/// Upper tail of the chi-square distribution with one degree of freedom,
/// i.e. 1 - F(x). Equals 1 exactly at x <= 0.
pub fn chi_square_1df_sf(x: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    // chi2_1 is the square of a standard normal, so both tails count
    2.0 * Normal::standard().sf(x.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn standard_normal_cdf_values() {
        assert_abs_diff_eq!(std_normal_cdf(0.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(std_normal_cdf(1.959964), 0.975, epsilon = 1e-6);
        assert_abs_diff_eq!(std_normal_cdf(-1.0) + std_normal_cdf(1.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn std_normal_quantile_err() {
        if let Err(e) = std_normal_quantile(1.1) {
            assert_eq!(
                String::from(
                    "while evaluating normal distribution: arguments to \
                    quantile function should be in (0, 1); got 1.1"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }

    #[test]
    fn std_normal_quantile_value() {
        assert!((std_normal_quantile(0.975).unwrap() - 1.96).abs() < 0.0001);
        assert!((std_normal_quantile(0.007384489).unwrap() - -2.437995).abs() < 0.0001);
    }

    #[test]
    fn std_normal_quantile_symmetric() {
        assert_abs_diff_eq!(
            std_normal_quantile(0.975).unwrap(),
            -std_normal_quantile(0.025).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn chi_square_tail() {
        assert_eq!(chi_square_1df_sf(0.0), 1.0);
        // 3.841459 is the 95th percentile of chi2_1
        assert_abs_diff_eq!(chi_square_1df_sf(3.841459), 0.05, epsilon = 1e-6);
    }

    #[test]
    fn chi_square_tail_matches_statrs_chi_squared() {
        let chi2 = statrs::distribution::ChiSquared::new(1.0).unwrap();
        for x in [0.0793031, 0.5, 2.0, 6.63] {
            assert_abs_diff_eq!(chi_square_1df_sf(x), chi2.sf(x), epsilon = 1e-9);
        }
    }
}
