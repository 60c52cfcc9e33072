/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Dense square cost matrices.
//!
//! A [`Matrix`] holds the cost `C(i, j)` of assigning worker `i` to
//! task `j`. It can be built directly from data or evaluated from a
//! cost function.
//!
//! # Example
//!
//! ```
//! use rs_assignment::Matrix;
//!
//! let workers = ["alice", "bob", "carol"];
//! let tasks = [3, 5, 4];
//! let m = Matrix::from_pairs(&workers, &tasks, |_, _, w: &&str, t: &usize| w.len() * t).unwrap();
//!
//! assert_eq!(m.size(), 3);
//! assert_eq!(m[(0, 1)], 25);
//! assert_eq!(m.row(1), &[9, 15, 12]);
//! assert_eq!(m.cost_of(&[0, 1, 2]), 15 + 15 + 20);
//! ```

use crate::num::traits::NumAssign;

use std::error;
use std::fmt;
use std::ops::{Index, IndexMut};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Error when building a matrix from caller supplied data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The data does not describe a square matrix.
    Shape { rows: usize, columns: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        match self {
            Error::Shape { rows, columns } => {
                write!(fmt, "cost matrix must be square, got {} rows and {} columns", rows, columns)
            }
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// A dense `n x n` cost matrix stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(try_from = "RawMatrix<W>"))]
pub struct Matrix<W> {
    n: usize,
    data: Vec<W>,
}

/// Unchecked matrix data, validated on deserialization.
#[cfg(feature = "serialize")]
#[derive(Deserialize)]
struct RawMatrix<W> {
    n: usize,
    data: Vec<W>,
}

#[cfg(feature = "serialize")]
impl<W> std::convert::TryFrom<RawMatrix<W>> for Matrix<W> {
    type Error = Error;

    fn try_from(raw: RawMatrix<W>) -> Result<Self> {
        Matrix::from_vec(raw.n, raw.data)
    }
}

impl<W> Matrix<W> {
    /// Create a matrix with `C(i, j) = cost(i, j)`.
    pub fn from_fn<F>(n: usize, mut cost: F) -> Self
    where
        F: FnMut(usize, usize) -> W,
    {
        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                data.push(cost(i, j));
            }
        }
        Matrix { n, data }
    }

    /// Create a matrix from a fallible cost function.
    ///
    /// The first error returned by `cost` is passed through unchanged.
    pub fn try_from_fn<F, E>(n: usize, mut cost: F) -> std::result::Result<Self, E>
    where
        F: FnMut(usize, usize) -> std::result::Result<W, E>,
    {
        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                data.push(cost(i, j)?);
            }
        }
        Ok(Matrix { n, data })
    }

    /// Create a matrix from a list of workers and a list of tasks.
    ///
    /// The entry `(i, j)` is `cost(i, j, &workers[i], &tasks[j])`. Both
    /// lists must have the same length.
    pub fn from_pairs<A, B, F>(workers: &[A], tasks: &[B], mut cost: F) -> Result<Self>
    where
        F: FnMut(usize, usize, &A, &B) -> W,
    {
        if workers.len() != tasks.len() {
            return Err(Error::Shape {
                rows: workers.len(),
                columns: tasks.len(),
            });
        }
        Ok(Matrix::from_fn(workers.len(), |i, j| cost(i, j, &workers[i], &tasks[j])))
    }

    /// Create a matrix from `n * n` values in row-major order.
    pub fn from_vec(n: usize, data: Vec<W>) -> Result<Self> {
        if data.len() != n * n {
            return Err(Error::Shape {
                rows: n,
                columns: if n == 0 { data.len() } else { data.len() / n },
            });
        }
        Ok(Matrix { n, data })
    }

    /// Create a matrix from a list of rows.
    pub fn from_rows(rows: Vec<Vec<W>>) -> Result<Self> {
        let n = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != n) {
            return Err(Error::Shape {
                rows: n,
                columns: row.len(),
            });
        }
        Ok(Matrix {
            n,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Return the number of rows (and columns).
    pub fn size(&self) -> usize {
        self.n
    }

    /// Return `true` if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Return row `i`.
    pub fn row(&self, i: usize) -> &[W] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Return an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[W]> + '_ {
        // `chunks` panics on a chunk size of 0
        self.data.chunks(self.n.max(1))
    }

    /// Return the row-major entries.
    pub fn as_slice(&self) -> &[W] {
        &self.data
    }

    /// Consume the matrix and return its row-major entries.
    pub fn into_vec(self) -> Vec<W> {
        self.data
    }
}

impl<W> Matrix<W>
where
    W: Copy,
{
    /// Return the entry `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> W {
        self[(i, j)]
    }
}

impl<W> Matrix<W>
where
    W: NumAssign + Ord + Copy,
{
    /// Return the total cost of `assignment`, where `assignment[i]` is
    /// the column assigned to row `i`.
    pub fn cost_of(&self, assignment: &[usize]) -> W {
        assert_eq!(assignment.len(), self.n, "Assignment must have one entry per row");
        let mut total = W::zero();
        for (i, &j) in assignment.iter().enumerate() {
            total += self[(i, j)];
        }
        total
    }

    /// Return the smallest entry of row `i`.
    pub fn min_in_row(&self, i: usize) -> W {
        self.row(i).iter().copied().min().unwrap_or_else(W::zero)
    }

    /// Subtract `value` from all entries of row `i`.
    pub fn sub_from_row(&mut self, i: usize, value: W) {
        let n = self.n;
        for c in &mut self.data[i * n..(i + 1) * n] {
            *c -= value;
        }
    }
}

impl<W> Index<(usize, usize)> for Matrix<W> {
    type Output = W;

    fn index(&self, (i, j): (usize, usize)) -> &W {
        debug_assert!(i < self.n && j < self.n, "Invalid matrix position ({},{})", i, j);
        &self.data[i * self.n + j]
    }
}

impl<W> IndexMut<(usize, usize)> for Matrix<W> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut W {
        debug_assert!(i < self.n && j < self.n, "Invalid matrix position ({},{})", i, j);
        &mut self.data[i * self.n + j]
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, Matrix};

    #[test]
    fn test_from_fn() {
        let m = Matrix::from_fn(3, |i, j| 10 * i + j);
        assert_eq!(m.size(), 3);
        assert_eq!(m.as_slice(), &[0, 1, 2, 10, 11, 12, 20, 21, 22]);
        assert_eq!(m.get(2, 1), 21);
        assert_eq!(m.rows().collect::<Vec<_>>(), vec![&[0, 1, 2][..], &[10, 11, 12], &[20, 21, 22]]);
    }

    #[test]
    fn test_try_from_fn() {
        let m = Matrix::try_from_fn(2, |i, j| if i + j < 3 { Ok(i + j) } else { Err("too large") });
        assert_eq!(m.unwrap().into_vec(), vec![0, 1, 1, 2]);

        let m = Matrix::try_from_fn(3, |i, j| if i + j < 3 { Ok(i + j) } else { Err((i, j)) });
        assert_eq!(m, Err((1, 2)));
    }

    #[test]
    fn test_shape_errors() {
        assert_eq!(
            Matrix::from_vec(2, vec![1, 2, 3]),
            Err(Error::Shape { rows: 2, columns: 1 })
        );
        assert_eq!(
            Matrix::from_rows(vec![vec![1, 2], vec![3]]),
            Err(Error::Shape { rows: 2, columns: 1 })
        );
        assert_eq!(
            Matrix::from_pairs(&[1, 2], &[1], |_, _, &a: &u32, &b: &u32| a + b),
            Err(Error::Shape { rows: 2, columns: 1 })
        );
        assert_eq!(
            format!("{}", Error::Shape { rows: 2, columns: 1 }),
            "cost matrix must be square, got 2 rows and 1 columns"
        );
    }

    #[test]
    fn test_empty() {
        let m = Matrix::<u32>::from_rows(vec![]).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.rows().count(), 0);
        assert_eq!(m.cost_of(&[]), 0);
    }

    #[test]
    fn test_row_reduction() {
        let mut m = Matrix::from_rows(vec![vec![4u32, 2, 7], vec![3, 3, 9], vec![8, 5, 6]]).unwrap();
        assert_eq!(m.min_in_row(0), 2);
        assert_eq!(m.min_in_row(2), 5);

        m.sub_from_row(0, 2);
        assert_eq!(m.row(0), &[2, 0, 5]);
        m.sub_from_row(2, 5);
        assert_eq!(m.as_slice(), &[2, 0, 5, 3, 3, 9, 3, 0, 1]);

        m[(1, 1)] = 0;
        assert_eq!(m.cost_of(&[2, 1, 0]), 8);
    }

    #[cfg(feature = "serialize")]
    mod serialize {
        use crate::Matrix;
        use serde_json;

        #[test]
        fn test_serde() {
            let m = Matrix::from_fn(3, |i, j| (i * j) as u32);
            let serialized = serde_json::to_string(&m).unwrap();
            let m2: Matrix<u32> = serde_json::from_str(&serialized).unwrap();
            assert_eq!(m, m2);

            assert!(serde_json::from_str::<Matrix<u32>>(r#"{"n":2,"data":[1,2,3]}"#).is_err());
        }
    }
}
