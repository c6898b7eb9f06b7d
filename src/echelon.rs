//! Reduction of a matrix to row-echelon form by Gaussian elimination.
//!
//! The reduction works on a [SubMatrixMut], a window `m[row_offset.., col_offset..]`
//! into the matrix that is being reduced. Every step either eliminates the first column
//! of the window below its pivot and shrinks the window by one row and one column,
//! or skips a column that has no pivot. No entries are copied.
//!
//! For example:
//!
//! ```
//! use echelon::matrix::Matrix;
//!
//! let mut m = Matrix::from_f64_rows(vec![vec![0., 1.], vec![1., 0.]]).unwrap();
//! m.row_echelon();
//! assert_eq!(m.to_f64_rows(), vec![vec![1., 0.], vec![0., 1.]]);
//! ```

use std::{env, fmt::Display};

use tracing::{debug, instrument, trace};

use crate::{
    matrix::{Matrix, MatrixError},
    rings::{Field, Ring},
};

pub const PIVOT_TOLERANCE_VAR: &str = "ECHELON_PIVOT_TOLERANCE";
pub const RECORD_STEPS_VAR: &str = "ECHELON_RECORD_STEPS";

/// Options for [Matrix::row_echelon_with].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ReductionOptions {
    /// Entries with an absolute value at or below the tolerance are not used as pivots.
    /// The default of `0` only rejects exact zeros. Exact fields ignore this value.
    pub pivot_tolerance: f64,
    /// Record every elementary row operation.
    pub record_steps: bool,
}

impl Default for ReductionOptions {
    fn default() -> Self {
        ReductionOptions {
            pivot_tolerance: 0.,
            record_steps: false,
        }
    }
}

impl ReductionOptions {
    pub fn with_tolerance(pivot_tolerance: f64) -> ReductionOptions {
        ReductionOptions {
            pivot_tolerance,
            ..Default::default()
        }
    }

    /// Read the options from the environment variables `ECHELON_PIVOT_TOLERANCE`
    /// and `ECHELON_RECORD_STEPS`. Unset variables keep their default value.
    pub fn from_env() -> Result<ReductionOptions, MatrixError> {
        ReductionOptions::from_vars(
            env::var(PIVOT_TOLERANCE_VAR).ok().as_deref(),
            env::var(RECORD_STEPS_VAR).ok().as_deref(),
        )
    }

    fn from_vars(
        tolerance: Option<&str>,
        record_steps: Option<&str>,
    ) -> Result<ReductionOptions, MatrixError> {
        let mut opts = ReductionOptions::default();

        if let Some(t) = tolerance {
            match t.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0. => opts.pivot_tolerance = v,
                _ => {
                    return Err(MatrixError::InvalidOption {
                        name: PIVOT_TOLERANCE_VAR.to_owned(),
                        value: t.to_owned(),
                    })
                }
            }
        }

        if let Some(r) = record_steps {
            opts.record_steps = match r.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(MatrixError::InvalidOption {
                        name: RECORD_STEPS_VAR.to_owned(),
                        value: r.to_owned(),
                    })
                }
            };
        }

        Ok(opts)
    }
}

/// An elementary row operation performed during the reduction.
/// Row and column indices refer to the whole matrix and start at 0.
#[derive(Clone, Debug, PartialEq)]
pub enum ReductionStep<F: Ring> {
    /// Rows `first` and `second` were exchanged to move a non-zero pivot into row `first`.
    Swap { first: u32, second: u32 },
    /// `factor` times row `pivot` was subtracted from row `target`.
    Subtract {
        target: u32,
        pivot: u32,
        factor: F::Element,
    },
    /// Column `column` had no pivot in the remaining rows.
    SkipColumn { column: u32 },
}

impl<F: Ring> Display for ReductionStep<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReductionStep::Swap { first, second } => {
                write!(f, "swap R{} with R{}", second + 1, first + 1)
            }
            ReductionStep::Subtract {
                target,
                pivot,
                factor,
            } => write!(f, "R{} - {} * R{}", target + 1, factor, pivot + 1),
            ReductionStep::SkipColumn { column } => write!(f, "skip C{}", column + 1),
        }
    }
}

/// A mutable view of the lower-right block `m[row_offset.., col_offset..]` of a matrix.
/// All indices taken by its methods are relative to the view.
pub struct SubMatrixMut<'a, F: Ring> {
    matrix: &'a mut Matrix<F>,
    row_offset: u32,
    col_offset: u32,
}

impl<'a, F: Ring> SubMatrixMut<'a, F> {
    /// Create a view that starts at row `row_offset` and column `col_offset`.
    /// Offsets past the end of the matrix yield an empty view.
    pub fn new(matrix: &'a mut Matrix<F>, row_offset: u32, col_offset: u32) -> Self {
        SubMatrixMut {
            row_offset: row_offset.min(matrix.nrows),
            col_offset: col_offset.min(matrix.ncols),
            matrix,
        }
    }

    /// The position of the top-left entry of the view in the matrix.
    pub fn offset(&self) -> (u32, u32) {
        (self.row_offset, self.col_offset)
    }

    pub fn nrows(&self) -> u32 {
        self.matrix.nrows - self.row_offset
    }

    pub fn ncols(&self) -> u32 {
        self.matrix.ncols - self.col_offset
    }

    pub fn is_empty(&self) -> bool {
        self.nrows() == 0 || self.ncols() == 0
    }

    pub fn get(&self, row: u32, col: u32) -> &F::Element {
        assert!(row < self.nrows() && col < self.ncols());
        &self.matrix[(self.row_offset + row, self.col_offset + col)]
    }

    /// Exchange rows `i` and `j` of the view. The full rows of the matrix are exchanged,
    /// including the entries to the left of the view.
    pub fn swap_rows(&mut self, i: u32, j: u32) {
        self.matrix.swap_rows(self.row_offset + i, self.row_offset + j);
    }

    /// Drop the first row and the first column of the view.
    pub fn narrow(self) -> Self {
        let (r, c) = (self.row_offset + 1, self.col_offset + 1);
        SubMatrixMut::new(self.matrix, r, c)
    }

    /// Drop the first column of the view, keeping all rows.
    pub fn skip_column(self) -> Self {
        let (r, c) = (self.row_offset, self.col_offset + 1);
        SubMatrixMut::new(self.matrix, r, c)
    }

    /// Find the first row whose entry in the first column is not zero according to `is_zero`.
    pub fn first_pivot_row(&self, is_zero: impl Fn(&F::Element) -> bool) -> Option<u32> {
        (0..self.nrows()).find(|&r| !is_zero(self.get(r, 0)))
    }
}

impl<'a, F: Field> SubMatrixMut<'a, F> {
    /// Subtract multiples of the first row from all other rows,
    /// such that the first column is zero below the pivot.
    /// The pivot, the first entry of the view, must not be zero.
    pub fn eliminate_column(&mut self) {
        self.eliminate_column_logged(None);
    }

    fn eliminate_column_logged(&mut self, mut steps: Option<&mut Vec<ReductionStep<F>>>) {
        if self.nrows() < 2 || self.ncols() == 0 {
            return;
        }

        let field = self.matrix.field;
        let (pr, pc) = (self.row_offset, self.col_offset);
        let pivot = self.matrix[(pr, pc)].clone();
        debug_assert!(!F::is_zero(&pivot), "Pivot at ({},{}) is zero", pr, pc);

        for k in pr + 1..self.matrix.nrows {
            if F::is_zero(&self.matrix[(k, pc)]) {
                continue;
            }

            let factor = field.div(&self.matrix[(k, pc)], &pivot);
            self.matrix[(k, pc)] = F::zero();
            for l in pc + 1..self.matrix.ncols {
                let mut e = std::mem::replace(&mut self.matrix[(k, l)], F::zero());
                field.sub_mul_assign(&mut e, &self.matrix[(pr, l)], &factor);
                self.matrix[(k, l)] = e;
            }

            trace!("R{} - {} * R{}", k + 1, factor, pr + 1);
            if let Some(s) = steps.as_deref_mut() {
                s.push(ReductionStep::Subtract {
                    target: k,
                    pivot: pr,
                    factor,
                });
            }
        }
    }
}

/// Reduce the matrix behind `view` to row-echelon form.
/// An entry is only used as a pivot if `is_zero` returns false for it.
fn reduce<F: Field>(
    mut view: SubMatrixMut<'_, F>,
    is_zero: impl Fn(&F::Element) -> bool,
    mut steps: Option<&mut Vec<ReductionStep<F>>>,
) {
    loop {
        if view.is_empty() || view.nrows() == 1 {
            return;
        }

        if is_zero(view.get(0, 0)) {
            match view.first_pivot_row(&is_zero) {
                Some(k) => {
                    let (r, _) = view.offset();
                    debug!("Swap R{} with R{}", r + 1, r + k + 1);
                    view.swap_rows(0, k);
                    if let Some(s) = steps.as_deref_mut() {
                        s.push(ReductionStep::Swap {
                            first: r,
                            second: r + k,
                        });
                    }
                }
                None => {
                    let (_, c) = view.offset();
                    debug!("No pivot in column {}", c + 1);
                    if let Some(s) = steps.as_deref_mut() {
                        s.push(ReductionStep::SkipColumn { column: c });
                    }
                    view = view.skip_column();
                    continue;
                }
            }
        }

        view.eliminate_column_logged(steps.as_deref_mut());
        view = view.narrow();
    }
}

impl<F: Field> Matrix<F> {
    /// Bring the matrix into row-echelon form in-place using Gaussian elimination.
    /// Rows are only swapped when the pivot is exactly zero.
    #[instrument(level = "debug", skip_all, fields(nrows = self.nrows, ncols = self.ncols))]
    pub fn row_echelon(&mut self) {
        reduce(SubMatrixMut::new(self, 0, 0), |e| F::is_zero(e), None);
    }

    /// Bring the matrix into row-echelon form in-place and return the elementary
    /// row operations that were performed, in order.
    #[instrument(level = "debug", skip_all, fields(nrows = self.nrows, ncols = self.ncols))]
    pub fn row_echelon_logged(&mut self) -> Vec<ReductionStep<F>> {
        let mut steps = vec![];
        reduce(SubMatrixMut::new(self, 0, 0), |e| F::is_zero(e), Some(&mut steps));
        steps
    }

    /// Bring the matrix into row-echelon form in-place with custom options.
    /// The returned list of row operations is empty unless `opts.record_steps` is set.
    #[instrument(level = "debug", skip_all, fields(nrows = self.nrows, ncols = self.ncols, tolerance = opts.pivot_tolerance))]
    pub fn row_echelon_with(&mut self, opts: &ReductionOptions) -> Vec<ReductionStep<F>> {
        let field = self.field;
        let tolerance = opts.pivot_tolerance;
        let mut steps = vec![];
        reduce(
            SubMatrixMut::new(self, 0, 0),
            |e| field.is_negligible(e, tolerance),
            if opts.record_steps {
                Some(&mut steps)
            } else {
                None
            },
        );
        steps
    }

    /// Subtract multiples of the first row from all other rows, such that the first
    /// column is zero below the first entry. The first entry must not be zero.
    pub fn eliminate_column(&mut self) {
        SubMatrixMut::new(self, 0, 0).eliminate_column();
    }
}
