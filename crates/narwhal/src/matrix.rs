//! Dense row-major matrix holding graph-theoretical distances.
//!
//! Each row belongs to a pivot node and each column to a graph node, so `m[(r, c)]` is the
//! shortest-path distance from pivot `r` to node `c`. The same type also stores the derived
//! pivot-by-pivot covariance matrix.

use std::fmt;

use nalgebra::DMatrix;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
    centered: bool,
}

impl Matrix {
    /// A zero-filled `rows x columns` matrix.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            data: vec![0.0; rows * columns],
            centered: false,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_centered(&self) -> bool {
        self.centered
    }

    fn offset(&self, row: usize, column: usize) -> Result<usize> {
        if row >= self.rows || column >= self.columns {
            return Err(Error::IndexOutOfRange {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(row * self.columns + column)
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(Error::InvalidRow {
                row,
                rows: self.rows,
            });
        }
        Ok(())
    }

    pub fn get(&self, row: usize, column: usize) -> Result<f64> {
        let idx = self.offset(row, column)?;
        Ok(self.data[idx])
    }

    pub fn set(&mut self, row: usize, column: usize, value: f64) -> Result<()> {
        let idx = self.offset(row, column)?;
        self.data[idx] = value;
        Ok(())
    }

    pub fn row(&self, row: usize) -> Result<&[f64]> {
        self.check_row(row)?;
        let start = row * self.columns;
        Ok(&self.data[start..start + self.columns])
    }

    fn row_mut(&mut self, row: usize) -> Result<&mut [f64]> {
        self.check_row(row)?;
        let start = row * self.columns;
        Ok(&mut self.data[start..start + self.columns])
    }

    /// Arithmetic mean of a row. A matrix without columns has a `NaN` mean.
    pub fn row_mean(&self, row: usize) -> Result<f64> {
        let values = self.row(row)?;
        let sum: f64 = values.iter().sum();
        Ok(sum / (self.columns as f64))
    }

    /// Adds `delta` to every element of `row`.
    pub fn translate_row(&mut self, row: usize, delta: f64) -> Result<()> {
        for v in self.row_mut(row)? {
            *v += delta;
        }
        Ok(())
    }

    /// Subtracts each row's mean from that row.
    ///
    /// Only the first call mutates; the matrix remembers it is centered.
    pub fn center(&mut self) -> Result<&mut Self> {
        if self.centered {
            return Ok(self);
        }
        if self.columns > 0 {
            for row in 0..self.rows {
                let mean = self.row_mean(row)?;
                self.translate_row(row, -mean)?;
            }
        }
        self.centered = true;
        Ok(self)
    }

    /// `sum_row m[row, column] * vector[row]`: projects a column onto a vector in row space.
    pub fn project_column(&self, column: usize, vector: &[f64]) -> Result<f64> {
        if vector.len() != self.rows {
            return Err(Error::DimensionMismatch {
                expected: self.rows,
                actual: vector.len(),
            });
        }
        if column >= self.columns {
            return Err(Error::IndexOutOfRange {
                row: 0,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        let mut sum = 0.0;
        for (row, &x) in vector.iter().enumerate() {
            sum += self.data[row * self.columns + column] * x;
        }
        Ok(sum)
    }

    /// Euclidean distance between two columns.
    pub fn column_distance(&self, a: usize, b: usize) -> Result<f64> {
        let mut sum = 0.0;
        for row in 0..self.rows {
            let delta = self.get(row, a)? - self.get(row, b)?;
            sum += delta * delta;
        }
        Ok(sum.sqrt())
    }

    /// The `rows x rows` Gram matrix `M * M^T`.
    pub fn covariance(&self) -> Matrix {
        let n = self.rows;
        let mut out = Matrix::new(n, n);
        for i in 0..n {
            let a = &self.data[i * self.columns..(i + 1) * self.columns];
            for j in i..n {
                let b = &self.data[j * self.columns..(j + 1) * self.columns];
                let sum: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
                out.data[i * n + j] = sum;
                out.data[j * n + i] = sum;
            }
        }
        out
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.columns == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.columns).map(<[f64]>::to_vec).collect()
    }

    pub fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.rows, self.columns, &self.data)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            let start = row * self.columns;
            for (i, v) in self.data[start..start + self.columns].iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{v:.2}")?;
            }
        }
        Ok(())
    }
}
