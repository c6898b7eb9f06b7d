use std::process::ExitCode;

use echelon::{
    matrix::{Matrix, MatrixError},
    printer::{MatrixPrinter, PrintOptions},
    rings::{
        rational::{Rational, RationalField},
        Field,
    },
    ReductionOptions,
};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Copy column `from` into column `to`, which makes the matrix rank deficient.
fn copy_column<F: Field>(m: &mut Matrix<F>, from: u32, to: u32) {
    for r in 0..m.nrows() as u32 {
        m[(r, to)] = m[(r, from)].clone();
    }
}

fn reduce_and_print<F: Field>(m: &mut Matrix<F>, opts: &ReductionOptions, print_opts: PrintOptions) {
    println!("Before:\n{}\n", MatrixPrinter::new_with_options(m, print_opts));

    for step in m.row_echelon_with(opts) {
        println!("  {}", step);
    }

    println!("After:\n{}\n", MatrixPrinter::new_with_options(m, print_opts));
}

fn run() -> Result<(), MatrixError> {
    let opts = ReductionOptions::from_env()?;

    let mut m = Matrix::from_f64_rows(vec![
        vec![1., 2., 3.],
        vec![4., 5., 6.],
        vec![7., 8., 9.],
    ])?;
    copy_column(&mut m, 0, 1);
    reduce_and_print(
        &mut m,
        &opts,
        PrintOptions {
            precision: Some(1),
            ..PrintOptions::grid()
        },
    );

    let mut q = Matrix::from_nested_vec(
        (0..3i64)
            .map(|r| (1..=3i64).map(|c| Rational::from(3 * r + c)).collect())
            .collect(),
        RationalField::new(),
    )?;
    copy_column(&mut q, 0, 1);
    reduce_and_print(&mut q, &opts, PrintOptions::grid());

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("ECHELON_LOG"))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
