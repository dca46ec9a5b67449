//! Pairwise-complete Pearson correlation over a unified table.
//!
//! Each column pair is correlated using only the quarters where both
//! columns have a value (pairwise-complete observations, not listwise: a
//! gap in an unrelated column never removes a quarter from another pair's
//! computation). Pairs with fewer than two overlapping observations, or
//! with zero variance on either side, get an explicitly undefined cell
//! rather than a silent zero.

use marasi_align::UnifiedTable;
use marasi_traits::{Result, stats::round_to};
use ndarray::Array2;

/// Minimum overlapping non-missing observations for a defined coefficient.
pub const MIN_OVERLAP: usize = 2;

/// A square, symmetric correlation matrix over named columns.
///
/// Storage is an `ndarray` matrix with NaN marking undefined cells; the
/// accessors translate that to `Option<f64>` so callers never mistake
/// "undefined" for a real coefficient. The unrounded matrix is the
/// internal contract; [`CorrelationMatrix::rounded`] produces a
/// reporting-only copy.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    names: Vec<String>,
    values: Array2<f64>,
}

impl CorrelationMatrix {
    /// Column names, in the unified table's declaration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns (the matrix is `size x size`).
    #[must_use]
    pub fn size(&self) -> usize {
        self.names.len()
    }

    /// The coefficient at (row, column), or `None` when undefined.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let v = self.values[(row, col)];
        if v.is_nan() { None } else { Some(v) }
    }

    /// The coefficient for a pair of column names, or `None` when either
    /// name is unknown or the cell is undefined.
    #[must_use]
    pub fn by_name(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == a)?;
        let j = self.names.iter().position(|n| n == b)?;
        self.get(i, j)
    }

    /// A reporting copy with every defined coefficient rounded to
    /// `digits` decimal places. Undefined cells stay undefined.
    #[must_use]
    pub fn rounded(&self, digits: u32) -> Self {
        Self {
            names: self.names.clone(),
            values: self.values.mapv(|v| {
                if v.is_nan() { v } else { round_to(v, digits) }
            }),
        }
    }

    /// The matrix as rows of `Option<f64>`, for heatmap rendering and
    /// serialization.
    #[must_use]
    pub fn to_grid(&self) -> Vec<Vec<Option<f64>>> {
        (0..self.size())
            .map(|i| (0..self.size()).map(|j| self.get(i, j)).collect())
            .collect()
    }
}

/// Computes the pairwise correlation matrix over a unified table.
///
/// # Errors
///
/// Returns an error only when a column read fails; sparse data never
/// fails, it produces undefined cells.
///
/// # Example
///
/// ```rust,ignore
/// use marasi_eval::correlate;
///
/// let matrix = correlate(&table)?;
/// let r = matrix.by_name("rentals_Average_Rent", "gdp_Value");
/// ```
pub fn correlate(table: &UnifiedTable) -> Result<CorrelationMatrix> {
    let names: Vec<String> = table.columns().to_vec();
    let columns: Vec<Vec<Option<f64>>> = names
        .iter()
        .map(|name| table.values(name))
        .collect::<Result<_>>()?;

    let n = names.len();
    let mut values = Array2::from_elem((n, n), f64::NAN);
    for i in 0..n {
        for j in i..n {
            let r = pairwise_pearson(&columns[i], &columns[j]);
            values[(i, j)] = r;
            values[(j, i)] = r;
        }
    }

    Ok(CorrelationMatrix { names, values })
}

/// Pearson correlation over the observations where both columns are
/// present. NaN when fewer than [`MIN_OVERLAP`] observations overlap or
/// either side has zero variance; exactly 1 when the overlapping values
/// are identical (which also covers a column against itself and constant
/// identical series).
pub(crate) fn pairwise_pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .collect();

    if pairs.len() < MIN_OVERLAP {
        return f64::NAN;
    }
    if pairs.iter().all(|(x, y)| x == y) {
        return 1.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}
