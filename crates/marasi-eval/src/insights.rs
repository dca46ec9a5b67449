//! Ranked factor-pair insights derived from a correlation matrix.
//!
//! The dashboard's "key insights" view wants a short list of the most
//! strongly related factor pairs with a human-readable label. Ranking is
//! over all pairs `i < j` in column declaration order (ties keep that
//! order rather than depending on string ordering), defined coefficients
//! only, sorted descending by absolute value. How many to show (top five
//! in current usage) is the caller's slice, not baked in here.

use crate::corr::CorrelationMatrix;
use marasi_traits::stats::round_to;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strength classification of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    /// |r| > 0.7
    Strong,
    /// |r| <= 0.7
    Moderate,
}

impl Strength {
    /// The display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
        }
    }
}

/// Direction of a correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// r >= 0
    Positive,
    /// r < 0
    Negative,
}

impl Direction {
    /// The display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

/// An unordered pair of factor columns with their correlation coefficient.
///
/// `left` is the earlier-declared column. The `Display` implementation
/// renders the narrative phrasing used by the insights view, e.g.
/// `Strong negative correlation: -0.82`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorPair {
    /// The earlier-declared column.
    pub left: String,
    /// The later-declared column.
    pub right: String,
    /// The unrounded correlation coefficient.
    pub r: f64,
}

impl FactorPair {
    /// Strength label: "Strong" when |r| > 0.7, "Moderate" otherwise.
    #[must_use]
    pub fn strength(&self) -> Strength {
        if self.r.abs() > 0.7 {
            Strength::Strong
        } else {
            Strength::Moderate
        }
    }

    /// Direction label from the coefficient's sign.
    #[must_use]
    pub fn direction(&self) -> Direction {
        if self.r < 0.0 {
            Direction::Negative
        } else {
            Direction::Positive
        }
    }
}

impl fmt::Display for FactorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} correlation: {:.2}",
            self.strength().as_str(),
            self.direction().as_str(),
            round_to(self.r, 2)
        )
    }
}

/// Ranks all defined factor pairs by absolute correlation strength.
///
/// Pairs are generated for `i < j` in declaration order, filtered to
/// defined coefficients, then stable-sorted descending by |r| so ties keep
/// declaration order. Callers take the top-k slice they need.
///
/// # Example
///
/// ```rust,ignore
/// use marasi_eval::rank_pairs;
///
/// let ranked = rank_pairs(&matrix);
/// for pair in ranked.iter().take(5) {
///     println!("{} vs {}: {pair}", pair.left, pair.right);
/// }
/// ```
#[must_use]
pub fn rank_pairs(matrix: &CorrelationMatrix) -> Vec<FactorPair> {
    let names = matrix.names();
    let mut pairs = Vec::new();
    for i in 0..names.len() {
        for j in (i + 1)..names.len() {
            if let Some(r) = matrix.get(i, j) {
                pairs.push(FactorPair {
                    left: names[i].clone(),
                    right: names[j].clone(),
                    r,
                });
            }
        }
    }
    pairs.sort_by(|a, b| {
        b.r.abs()
            .partial_cmp(&a.r.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corr::correlate;
    use marasi_align::{ResampledSeries, unify};
    use marasi_traits::Quarter;
    use std::collections::BTreeMap;

    fn series(name: &str, values: &[f64]) -> ResampledSeries {
        let mut map = BTreeMap::new();
        let mut current = Quarter::new(2020, 1).unwrap();
        for v in values {
            map.insert(current, *v);
            current = current.next();
        }
        ResampledSeries::from_values(name, map)
    }

    #[test]
    fn test_labels() {
        let pair = FactorPair {
            left: "rentals_Average_Rent".to_string(),
            right: "cpi_Value".to_string(),
            r: -0.82,
        };
        assert_eq!(pair.strength(), Strength::Strong);
        assert_eq!(pair.direction(), Direction::Negative);
        assert_eq!(pair.to_string(), "Strong negative correlation: -0.82");
    }

    #[test]
    fn test_moderate_positive_label() {
        let pair = FactorPair {
            left: "a".to_string(),
            right: "b".to_string(),
            r: 0.444_9,
        };
        assert_eq!(pair.strength(), Strength::Moderate);
        assert_eq!(pair.to_string(), "Moderate positive correlation: 0.44");
    }

    #[test]
    fn test_strength_boundary() {
        // Exactly 0.7 is Moderate; the Strong band is strictly above it.
        let at = FactorPair {
            left: "a".into(),
            right: "b".into(),
            r: 0.7,
        };
        assert_eq!(at.strength(), Strength::Moderate);
        let above = FactorPair {
            left: "a".into(),
            right: "b".into(),
            r: 0.71,
        };
        assert_eq!(above.strength(), Strength::Strong);
    }

    #[test]
    fn test_rank_pairs_sorted_by_absolute_value() {
        let t = unify(&[
            series("a", &[1.0, 2.0, 3.0, 4.0]),
            series("b", &[4.0, 3.0, 2.0, 1.0]), // r(a,b) = -1
            series("c", &[1.0, 3.0, 2.0, 5.0]), // weaker vs a
        ])
        .unwrap();
        let matrix = correlate(&t).unwrap();
        let ranked = rank_pairs(&matrix);

        assert_eq!(ranked.len(), 3);
        // |r| descending; the perfect +/-1 pairs come first.
        assert!(ranked[0].r.abs() >= ranked[1].r.abs());
        assert!(ranked[1].r.abs() >= ranked[2].r.abs());
        // left is always the earlier-declared column.
        for pair in &ranked {
            let names = matrix.names();
            let li = names.iter().position(|n| *n == pair.left).unwrap();
            let ri = names.iter().position(|n| *n == pair.right).unwrap();
            assert!(li < ri);
        }
    }

    #[test]
    fn test_rank_pairs_skips_undefined() {
        let t = unify(&[
            series("flat", &[2.0, 2.0, 2.0]),
            series("vary", &[1.0, 2.0, 3.0]),
        ])
        .unwrap();
        let matrix = correlate(&t).unwrap();
        // flat/vary is undefined (zero variance on one side).
        assert!(rank_pairs(&matrix).is_empty());
    }

    #[test]
    fn test_top_k_is_a_caller_slice() {
        let t = unify(&[
            series("a", &[1.0, 2.0, 3.0, 4.0]),
            series("b", &[2.0, 4.0, 6.0, 8.0]),
            series("c", &[4.0, 3.0, 2.0, 1.0]),
        ])
        .unwrap();
        let ranked = rank_pairs(&correlate(&t).unwrap());
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked.iter().take(2).count(), 2);
    }
}
