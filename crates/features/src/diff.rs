//! Differences against the previous present observation.

use keeling_stats::pct_change;

/// Absolute and percentage change of each element against its predecessor.
///
/// Both vectors are `None` at index 0. Missing calendar days are not
/// considered: the predecessor is the previous element of the slice.
/// Percentage change is `None` when the predecessor is zero.
pub fn differences(values: &[f64]) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let mut diff = Vec::with_capacity(values.len());
    let mut pct = Vec::with_capacity(values.len());

    if !values.is_empty() {
        diff.push(None);
        pct.push(None);
    }
    for w in values.windows(2) {
        diff.push(Some(w[1] - w[0]));
        pct.push(pct_change(w[0], w[1]));
    }

    (diff, pct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_is_none() {
        let (d, p) = differences(&[400.0, 404.0]);
        assert_eq!(d[0], None);
        assert_eq!(p[0], None);
        assert_relative_eq!(d[1].unwrap(), 4.0);
        assert_relative_eq!(p[1].unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_predecessor_gives_no_pct() {
        let (d, p) = differences(&[0.0, 1.0]);
        assert_eq!(d[1], Some(1.0));
        assert_eq!(p[1], None);
    }

    #[test]
    fn empty_input() {
        let (d, p) = differences(&[]);
        assert!(d.is_empty());
        assert!(p.is_empty());
    }
}
