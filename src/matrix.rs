//! A dense, row-major matrix over a [Ring].

use std::{
    fmt::Display,
    ops::{Index, IndexMut},
};

use smallvec::SmallVec;

use crate::{
    printer::MatrixPrinter,
    rings::{float::FloatField, Field, Ring},
};

/// A matrix with entries that are elements of a ring `F`.
/// Matrices with up to 25 entries are stored inline.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<F: Ring> {
    pub(crate) data: SmallVec<[F::Element; 25]>,
    pub(crate) nrows: u32,
    pub(crate) ncols: u32,
    pub(crate) field: F,
}

/// Errors that can occur when constructing or configuring matrix operations.
#[derive(Clone, Debug, PartialEq)]
pub enum MatrixError {
    ShapeMismatch {
        len: usize,
        nrows: u32,
        ncols: u32,
    },
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },
    NonFiniteEntry {
        row: u32,
        col: u32,
    },
    InvalidOption {
        name: String,
        value: String,
    },
}

impl Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::ShapeMismatch { len, nrows, ncols } => write!(
                f,
                "Data length does not match matrix dimensions: {} vs ({},{})",
                len, nrows, ncols
            ),
            MatrixError::NotRectangular {
                row,
                expected,
                found,
            } => write!(
                f,
                "Matrix is not rectangular: row {} has {} entries instead of {}",
                row, found, expected
            ),
            MatrixError::NonFiniteEntry { row, col } => {
                write!(f, "Entry ({},{}) is not a finite number", row, col)
            }
            MatrixError::InvalidOption { name, value } => {
                write!(f, "Invalid value '{}' for option {}", value, name)
            }
        }
    }
}

impl std::error::Error for MatrixError {}

impl<F: Ring> Matrix<F> {
    /// Create a new zeroed matrix with `nrows` rows and `ncols` columns.
    pub fn new(nrows: u32, ncols: u32, field: F) -> Matrix<F> {
        Matrix {
            data: (0..nrows as usize * ncols as usize)
                .map(|_| F::zero())
                .collect(),
            nrows,
            ncols,
            field,
        }
    }

    /// Create a new square matrix with `nrows` rows and ones on the main diagonal and zeroes elsewhere.
    pub fn identity(nrows: u32, field: F) -> Matrix<F> {
        let mut m = Matrix::new(nrows, nrows, field);
        for i in 0..nrows {
            m[(i, i)] = field.one();
        }
        m
    }

    /// Convert a linear, row-major representation of a matrix to a `Matrix`.
    pub fn from_linear(
        data: Vec<F::Element>,
        nrows: u32,
        ncols: u32,
        field: F,
    ) -> Result<Matrix<F>, MatrixError> {
        if data.len() != nrows as usize * ncols as usize {
            return Err(MatrixError::ShapeMismatch {
                len: data.len(),
                nrows,
                ncols,
            });
        }

        let m = Matrix {
            data: data.into_iter().collect(),
            nrows,
            ncols,
            field,
        };
        m.check_finite()?;
        Ok(m)
    }

    /// Create a new matrix from a 2-dimensional vector of scalars.
    /// Every row must have the same length.
    pub fn from_nested_vec(
        matrix: Vec<Vec<F::Element>>,
        field: F,
    ) -> Result<Matrix<F>, MatrixError> {
        let nrows = matrix.len();
        let cols = matrix.first().map(|r| r.len()).unwrap_or(0);

        let mut data = SmallVec::with_capacity(nrows * cols);
        for (row, d) in matrix.into_iter().enumerate() {
            if d.len() != cols {
                return Err(MatrixError::NotRectangular {
                    row,
                    expected: cols,
                    found: d.len(),
                });
            }

            data.extend(d);
        }

        let m = Matrix {
            data,
            nrows: nrows as u32,
            ncols: cols as u32,
            field,
        };
        m.check_finite()?;
        Ok(m)
    }

    fn check_finite(&self) -> Result<(), MatrixError> {
        match self.data.iter().position(|e| !F::is_finite(e)) {
            Some(i) => Err(MatrixError::NonFiniteEntry {
                row: (i / self.ncols as usize) as u32,
                col: (i % self.ncols as usize) as u32,
            }),
            None => Ok(()),
        }
    }

    /// Return the number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows as usize
    }

    /// Return the number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols as usize
    }

    /// Return the field of the matrix entries.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Get the `i`th row of the matrix.
    pub fn row(&self, i: u32) -> &[F::Element] {
        &self[i]
    }

    /// Return an iterator over the rows of the matrix.
    /// Matrices without columns yield empty rows.
    pub fn row_iter(&self) -> impl Iterator<Item = &[F::Element]> + '_ {
        (0..self.nrows).map(move |i| self.row(i))
    }

    /// Return true iff every entry in the matrix is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|e| F::is_zero(e))
    }

    /// Apply a function `f` to each entry of the matrix.
    pub fn map<G: Ring>(&self, f: impl Fn(&F::Element) -> G::Element, field: G) -> Matrix<G> {
        Matrix {
            data: self.data.iter().map(f).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field,
        }
    }

    /// Exchange rows `i` and `j` in place. Panics if either index is out of bounds.
    pub fn swap_rows(&mut self, i: u32, j: u32) {
        assert!(
            i < self.nrows && j < self.nrows,
            "Row index out of bounds: ({},{}) for a matrix with {} rows",
            i,
            j,
            self.nrows
        );

        if i == j {
            return;
        }

        for l in 0..self.ncols {
            self.data
                .swap((self.ncols * i + l) as usize, (self.ncols * j + l) as usize);
        }
    }

    /// Get the column of the first non-zero entry of `row`, if any.
    pub fn leading_column(&self, row: u32) -> Option<u32> {
        self[row]
            .iter()
            .position(|e| !F::is_zero(e))
            .map(|c| c as u32)
    }

    /// Return true iff the matrix is in row-echelon form: the leading entry of every
    /// non-zero row is strictly to the right of the one above it, and zero rows
    /// only appear below all non-zero rows.
    pub fn is_row_echelon(&self) -> bool {
        self.is_row_echelon_by(|e| F::is_zero(e))
    }

    fn is_row_echelon_by(&self, is_zero: impl Fn(&F::Element) -> bool) -> bool {
        let mut prev: Option<usize> = None;
        let mut seen_zero_row = false;
        for r in self.row_iter() {
            match r.iter().position(|e| !is_zero(e)) {
                Some(c) => {
                    if seen_zero_row || prev.map(|p| c <= p).unwrap_or(false) {
                        return false;
                    }
                    prev = Some(c);
                }
                None => seen_zero_row = true,
            }
        }

        true
    }
}

impl<F: Field> Matrix<F> {
    /// Return true iff the matrix is in row-echelon form when entries that are
    /// negligible with respect to `tolerance` are treated as zero.
    pub fn is_row_echelon_within(&self, tolerance: f64) -> bool {
        let field = self.field;
        self.is_row_echelon_by(|e| field.is_negligible(e, tolerance))
    }
}

impl Matrix<FloatField> {
    /// Create a floating-point matrix from its rows.
    /// Ragged rows and non-finite entries are rejected.
    pub fn from_f64_rows(rows: Vec<Vec<f64>>) -> Result<Matrix<FloatField>, MatrixError> {
        Matrix::from_nested_vec(rows, FloatField::new())
    }

    /// Copy the entries into nested vectors, one per row.
    pub fn to_f64_rows(&self) -> Vec<Vec<f64>> {
        self.row_iter().map(|r| r.to_vec()).collect()
    }
}

impl<F: Ring> Index<u32> for Matrix<F> {
    type Output = [F::Element];

    /// Get the `index`th row of the matrix.
    #[inline]
    fn index(&self, index: u32) -> &Self::Output {
        let start = index as usize * self.ncols as usize;
        &self.data[start..start + self.ncols as usize]
    }
}

impl<F: Ring> Index<(u32, u32)> for Matrix<F> {
    type Output = F::Element;

    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index(&self, index: (u32, u32)) -> &Self::Output {
        &self.data[(index.0 * self.ncols + index.1) as usize]
    }
}

impl<F: Ring> IndexMut<(u32, u32)> for Matrix<F> {
    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index_mut(&mut self, index: (u32, u32)) -> &mut F::Element {
        &mut self.data[(index.0 * self.ncols + index.1) as usize]
    }
}

impl<F: Ring> Display for Matrix<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        MatrixPrinter::new(self).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::rational::{Rational, RationalField};

    #[test]
    fn construction() {
        let a = Matrix::from_linear(vec![1., 2., 3., 4., 5., 6.], 2, 3, FloatField::new()).unwrap();
        assert_eq!(a.nrows(), 2);
        assert_eq!(a.ncols(), 3);
        assert_eq!(a[(1, 0)], 4.);
        assert_eq!(&a[1], &[4., 5., 6.]);
        assert_eq!(a.to_f64_rows(), vec![vec![1., 2., 3.], vec![4., 5., 6.]]);

        let b = Matrix::from_f64_rows(vec![vec![1., 2., 3.], vec![4., 5., 6.]]).unwrap();
        assert_eq!(a, b);

        let id = Matrix::identity(2, RationalField::new());
        assert_eq!(
            id.data.to_vec(),
            vec![
                Rational::from(1),
                Rational::from(0),
                Rational::from(0),
                Rational::from(1)
            ]
        );
    }

    #[test]
    fn empty_shapes() {
        let a = Matrix::from_f64_rows(vec![]).unwrap();
        assert_eq!((a.nrows(), a.ncols()), (0, 0));

        let b = Matrix::from_f64_rows(vec![vec![], vec![]]).unwrap();
        assert_eq!((b.nrows(), b.ncols()), (2, 0));
        assert_eq!(b.row_iter().count(), 2);
        assert!(b.is_zero());
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            Matrix::from_f64_rows(vec![vec![1., 2.], vec![3.]]),
            Err(MatrixError::NotRectangular {
                row: 1,
                expected: 2,
                found: 1
            })
        );

        assert_eq!(
            Matrix::from_linear(vec![1., 2., 3.], 2, 2, FloatField::new()),
            Err(MatrixError::ShapeMismatch {
                len: 3,
                nrows: 2,
                ncols: 2
            })
        );

        assert_eq!(
            Matrix::from_f64_rows(vec![vec![1., 2.], vec![f64::NAN, 4.]]),
            Err(MatrixError::NonFiniteEntry { row: 1, col: 0 })
        );
        assert!(Matrix::from_f64_rows(vec![vec![f64::INFINITY]]).is_err());
    }

    #[test]
    fn swap_rows() {
        let mut a = Matrix::from_f64_rows(vec![vec![1., 2.], vec![3., 4.], vec![5., 6.]]).unwrap();
        a.swap_rows(0, 2);
        assert_eq!(a.to_f64_rows(), vec![vec![5., 6.], vec![3., 4.], vec![1., 2.]]);

        a.swap_rows(1, 1);
        assert_eq!(&a[1], &[3., 4.]);
    }

    #[test]
    #[should_panic]
    fn swap_rows_out_of_bounds() {
        let mut a = Matrix::new(2, 2, FloatField::new());
        a.swap_rows(0, 2);
    }

    #[test]
    fn echelon_check() {
        let a = Matrix::from_f64_rows(vec![vec![0., 2., 1.], vec![0., 0., 3.], vec![0., 0., 0.]]).unwrap();
        assert!(a.is_row_echelon());
        assert_eq!(a.leading_column(0), Some(1));
        assert_eq!(a.leading_column(2), None);

        let b = Matrix::from_f64_rows(vec![vec![0., 0.], vec![1., 0.]]).unwrap();
        assert!(!b.is_row_echelon());

        let c = Matrix::from_f64_rows(vec![vec![1., 1.], vec![2., 0.]]).unwrap();
        assert!(!c.is_row_echelon());

        let d = Matrix::from_f64_rows(vec![vec![1., 1.], vec![1e-17, 2.]]).unwrap();
        assert!(!d.is_row_echelon());
        assert!(d.is_row_echelon_within(1e-12));
    }

    #[test]
    fn map() {
        let a = Matrix::from_linear(
            vec![Rational::new(1, 2), Rational::new(-3, 4)],
            1,
            2,
            RationalField::new(),
        )
        .unwrap();
        let b = a.map(|e| f64::from(e), FloatField::new());
        assert_eq!(b.to_f64_rows(), vec![vec![0.5, -0.75]]);
    }
}
