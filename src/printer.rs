//! Printing of matrices with customizable options.

use std::fmt::{self, Write};

use colored::Colorize;

use crate::{matrix::Matrix, rings::Ring};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PrintMode {
    /// Nested braces on a single line, e.g. `{{1,2},{3,4}}`.
    #[default]
    Compact,
    /// One row per line with right-aligned columns.
    Grid,
}

/// Options that control how matrix entries are printed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PrintOptions {
    /// The number of digits after the decimal point for floating-point entries.
    pub precision: Option<usize>,
    pub mode: PrintMode,
    /// Print the leading entry of every row in bold.
    pub highlight_pivots: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            precision: None,
            mode: PrintMode::Compact,
            highlight_pivots: false,
        }
    }
}

impl PrintOptions {
    /// Options for multi-line output with highlighted pivots.
    pub fn grid() -> PrintOptions {
        PrintOptions {
            mode: PrintMode::Grid,
            highlight_pivots: true,
            ..Default::default()
        }
    }
}

/// A printer for a [Matrix] that can be used in a [format!] macro.
pub struct MatrixPrinter<'a, F: Ring> {
    pub matrix: &'a Matrix<F>,
    pub opts: PrintOptions,
}

impl<'a, F: Ring> MatrixPrinter<'a, F> {
    pub fn new(matrix: &'a Matrix<F>) -> MatrixPrinter<'a, F> {
        MatrixPrinter {
            matrix,
            opts: PrintOptions::default(),
        }
    }

    pub fn new_with_options(matrix: &'a Matrix<F>, opts: PrintOptions) -> MatrixPrinter<'a, F> {
        MatrixPrinter { matrix, opts }
    }

    fn fmt_compact(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.matrix.field();
        f.write_char('{')?;
        for (ri, r) in self.matrix.row_iter().enumerate() {
            f.write_char('{')?;
            for (ci, c) in r.iter().enumerate() {
                if ci > 0 {
                    f.write_char(',')?;
                }
                if self.opts.highlight_pivots
                    && self.matrix.leading_column(ri as u32) == Some(ci as u32)
                {
                    let mut s = String::new();
                    field.format(c, &self.opts, &mut s)?;
                    f.write_fmt(format_args!("{}", s.bold()))?;
                } else {
                    field.format(c, &self.opts, f)?;
                }
            }
            f.write_char('}')?;
            if ri + 1 < self.matrix.nrows() {
                f.write_char(',')?;
            }
        }
        f.write_char('}')
    }

    fn fmt_grid(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.matrix.field();
        let ncols = self.matrix.ncols();

        let mut cells = Vec::with_capacity(self.matrix.nrows());
        let mut widths = vec![0; ncols];
        for r in self.matrix.row_iter() {
            let mut row = Vec::with_capacity(ncols);
            for (ci, c) in r.iter().enumerate() {
                let mut s = String::new();
                field.format(c, &self.opts, &mut s)?;
                widths[ci] = widths[ci].max(s.chars().count());
                row.push(s);
            }
            cells.push(row);
        }

        if cells.is_empty() {
            return f.write_str("[]");
        }

        for (ri, row) in cells.iter().enumerate() {
            if ri > 0 {
                f.write_char('\n')?;
            }

            let lead = self.matrix.leading_column(ri as u32).map(|c| c as usize);
            f.write_char('[')?;
            for (ci, s) in row.iter().enumerate() {
                if ci > 0 {
                    f.write_str("  ")?;
                }
                for _ in s.chars().count()..widths[ci] {
                    f.write_char(' ')?;
                }
                if self.opts.highlight_pivots && lead == Some(ci) {
                    f.write_fmt(format_args!("{}", s.as_str().bold()))?;
                } else {
                    f.write_str(s)?;
                }
            }
            f.write_char(']')?;
        }

        Ok(())
    }
}

impl<'a, F: Ring> fmt::Display for MatrixPrinter<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opts.mode {
            PrintMode::Compact => self.fmt_compact(f),
            PrintMode::Grid => self.fmt_grid(f),
        }
    }
}
