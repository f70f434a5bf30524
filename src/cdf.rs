//! Scaled-integer CDF construction and the `cdf_build` convenience helper.

use crate::errors::ArithCodeError;

/// Builds a real-valued CDF from a histogram over `symbols`.
///
/// The alphabet is taken to be `0..=max(symbols)`; `nsym` is returned
/// alongside the CDF so callers don't have to re-derive it. Grounded on the
/// reference `cdf_build`: count, divide each bin by `N`, prefix-sum.
pub fn cdf_build(symbols: &[u32]) -> (Vec<f32>, usize) {
    let nsym = symbols.iter().copied().max().map_or(0, |m| m as usize + 1);
    let mut hist = vec![0u64; nsym];
    for &s in symbols {
        hist[s as usize] += 1;
    }
    let total = symbols.len() as f64;
    let mut cdf = Vec::with_capacity(nsym + 1);
    cdf.push(0.0f32);
    let mut acc = 0.0f64;
    for &count in &hist {
        acc += if total > 0.0 { count as f64 / total } else { 0.0 };
        cdf.push(acc as f32);
    }
    if let Some(last) = cdf.last_mut() {
        *last = 1.0;
    }
    (cdf, nsym)
}

/// Checks that `cdf` has the shape of a valid cumulative distribution:
/// length `>= 2`, starts at 0, non-decreasing, ends at 1 (within tolerance).
/// Returns the real alphabet size (`cdf.len() - 1`) on success.
fn validate_user_cdf(cdf: &[f32]) -> Result<usize, ArithCodeError> {
    if cdf.len() < 2 {
        return Err(ArithCodeError::InvalidCdf {
            reason: "CDF must have at least 2 entries",
        });
    }
    if cdf[0] != 0.0 {
        return Err(ArithCodeError::InvalidCdf {
            reason: "CDF must start at 0.0",
        });
    }
    for w in cdf.windows(2) {
        if w[1] < w[0] {
            return Err(ArithCodeError::InvalidCdf {
                reason: "CDF must be non-decreasing",
            });
        }
    }
    if (cdf[cdf.len() - 1] - 1.0).abs() > 1e-4 {
        return Err(ArithCodeError::InvalidCdf {
            reason: "CDF must end at 1.0",
        });
    }
    let nsym = cdf.len() - 1;
    if nsym == 0 {
        return Err(ArithCodeError::EmptyAlphabet);
    }
    Ok(nsym)
}

/// Quantizes a user-supplied real CDF into the internal integer CDF used by
/// [`crate::encoder`]/[`crate::decoder`].
///
/// The returned vector has `nsym + 1` entries (the real alphabet plus the
/// implicit end-of-message symbol): entry `i` is the scaled lower bound of
/// symbol `i`. The last entry, `scale`, doubles as the lower bound of the
/// EOM symbol (whose upper bound is always `1 << shift`, so it never needs
/// to be stored) and as the upper bound of the last real symbol - the same
/// truncating multiply naturally produces both, since the user's own CDF
/// already ends at 1.0.
///
/// Grounded on `ac.c`'s `init_common`: `scale = (1 << shift) - D`, then each
/// entry is `scale * cdf[i]`, truncated (not rounded) exactly as the C
/// reference's multiply-then-cast does.
pub(crate) fn build_scaled_cdf(cdf: &[f32], shift: u32, d: u64) -> Result<Vec<u64>, ArithCodeError> {
    validate_user_cdf(cdf)?;
    let scale = (1u64 << shift) - d;
    let scaled: Vec<u64> = cdf
        .iter()
        .map(|&p| (scale as f64 * p as f64) as u64)
        .collect();
    for w in scaled.windows(2) {
        debug_assert!(
            w[1] > w[0],
            "adjacent CDF entries scaled to the same integer: symbol probability too small for this output width"
        );
    }
    Ok(scaled)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cdf_build_matches_histogram() {
        let symbols = [0u32, 0, 1, 2, 2, 2];
        let (cdf, nsym) = cdf_build(&symbols);
        assert_eq!(nsym, 3);
        assert_eq!(cdf.len(), 4);
        assert_eq!(cdf[0], 0.0);
        assert!((cdf[1] - 2.0 / 6.0).abs() < 1e-6);
        assert!((cdf[2] - 3.0 / 6.0).abs() < 1e-6);
        assert_eq!(cdf[3], 1.0);
    }

    #[test]
    fn build_scaled_cdf_ends_at_scale() {
        let cdf = vec![0.0f32, 0.2, 0.7, 0.9, 1.0];
        let shift = 32;
        let d = 256u64;
        let scaled = build_scaled_cdf(&cdf, shift, d).unwrap();
        let scale = (1u64 << shift) - d;
        assert_eq!(*scaled.last().unwrap(), scale);
        assert_eq!(scaled[0], 0);
        assert!(scaled.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn rejects_non_monotone_cdf() {
        let cdf = vec![0.0f32, 0.5, 0.3, 1.0];
        assert!(matches!(
            build_scaled_cdf(&cdf, 32, 256).unwrap_err(),
            ArithCodeError::InvalidCdf { .. }
        ));
    }

    #[test]
    fn rejects_cdf_not_ending_at_one() {
        let cdf = vec![0.0f32, 0.5, 0.9];
        assert!(matches!(
            build_scaled_cdf(&cdf, 32, 256).unwrap_err(),
            ArithCodeError::InvalidCdf { .. }
        ));
    }

    #[test]
    fn rejects_cdf_not_starting_at_zero() {
        let cdf = vec![0.1f32, 0.5, 1.0];
        assert!(matches!(
            build_scaled_cdf(&cdf, 32, 256).unwrap_err(),
            ArithCodeError::InvalidCdf { .. }
        ));
    }
}
