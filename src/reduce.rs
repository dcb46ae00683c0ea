//! Aggregation functions that collapse a window partition into one row.

/// A reduction from a non-empty set of numeric rows to a single row
///
/// The engine treats the reducer as opaque: it is never called on an empty
/// partition (empty buckets become missing cells instead), and its output
/// width is checked against the source column count after every call.
/// Implemented by the built-in aggregations below and by any closure of the
/// matching shape:
///
/// ```
/// use tigertail::Reducer;
///
/// // keep only the first row of each bucket
/// let first = |rows: &[&[f64]]| rows[0].to_vec();
/// let rows: &[&[f64]] = &[&[1.0, 2.0], &[3.0, 4.0]];
/// assert_eq!(first.reduce(rows), vec![1.0, 2.0]);
/// ```
pub trait Reducer: Send + Sync {
    /// Reduce the rows of one partition to a single row
    fn reduce(&self, rows: &[&[f64]]) -> Vec<f64>;
}

impl<F> Reducer for F
where
    F: Fn(&[&[f64]]) -> Vec<f64> + Send + Sync,
{
    fn reduce(&self, rows: &[&[f64]]) -> Vec<f64> {
        self(rows)
    }
}

fn columnwise<F>(rows: &[&[f64]], fold: F) -> Vec<f64>
where
    F: Fn(&mut dyn Iterator<Item = f64>) -> f64,
{
    let width = rows.first().map(|row| row.len()).unwrap_or(0);
    (0..width)
        .map(|col| fold(&mut rows.iter().map(|row| row[col])))
        .collect()
}

/// Column-wise sum
pub struct Sum;

impl Reducer for Sum {
    fn reduce(&self, rows: &[&[f64]]) -> Vec<f64> {
        columnwise(rows, |values| values.sum())
    }
}

/// Column-wise arithmetic mean
pub struct Mean;

impl Reducer for Mean {
    fn reduce(&self, rows: &[&[f64]]) -> Vec<f64> {
        let count = rows.len() as f64;
        columnwise(rows, |values| values.sum::<f64>() / count)
    }
}

/// Column-wise minimum
pub struct Min;

impl Reducer for Min {
    fn reduce(&self, rows: &[&[f64]]) -> Vec<f64> {
        columnwise(rows, |values| values.fold(f64::INFINITY, f64::min))
    }
}

/// Column-wise maximum
pub struct Max;

impl Reducer for Max {
    fn reduce(&self, rows: &[&[f64]]) -> Vec<f64> {
        columnwise(rows, |values| values.fold(f64::NEG_INFINITY, f64::max))
    }
}
