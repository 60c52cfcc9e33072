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

//! Minimum cost assignment.
//!
//! Given `n` workers, `n` tasks and the cost `C(i, j)` of assigning
//! worker `i` to task `j`, find a bijection between workers and tasks
//! of minimal total cost.
//!
//! The functions in this module return the assignment as a vector
//! `a` such that worker `i` is assigned to task `a[i]`.
//!
//! # Example
//!
//! ```
//! use rs_assignment::assignment::solve_minimum_cost_assignment_by;
//!
//! let a = solve_minimum_cost_assignment_by(4, |i, j| (i + 1) * (j + 1));
//! assert_eq!(a, vec![3, 2, 1, 0]);
//! ```

mod marks;
pub mod munkres;
pub use self::munkres::Problem;

use crate::matrix::Matrix;
use crate::num::traits::{Bounded, NumAssign};

/// The steps of the Hungarian method.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Row reduction
    One,
    /// Initial greedy matching
    Two,
    /// Cover columns of the matching, test for optimality
    Three,
    /// Prime uncovered zeros
    Four,
    /// Augment the matching
    Five,
    /// Shift the matrix by the smallest uncovered entry
    Six,
    /// The problem has been solved
    Done,
}

/// Solve the assignment problem for a cost matrix.
///
/// # Example
///
/// ```
/// use rs_assignment::assignment::solve_minimum_cost_assignment;
/// use rs_assignment::Matrix;
///
/// let costs = Matrix::from_rows(vec![
///     vec![8, 4, 7],
///     vec![5, 2, 3],
///     vec![9, 4, 8],
/// ]).unwrap();
/// let a = solve_minimum_cost_assignment(costs.clone());
/// assert_eq!(a, vec![0, 2, 1]);
/// assert_eq!(costs.cost_of(&a), 15);
/// ```
pub fn solve_minimum_cost_assignment<W>(costs: Matrix<W>) -> Vec<usize>
where
    W: NumAssign + Ord + Copy + Bounded,
{
    match costs.size() {
        0 => vec![],
        1 => vec![0],
        n => {
            let mut assignment = vec![0; n];
            Problem::new(costs).solve(&mut assignment);
            assignment
        }
    }
}

/// Solve the assignment problem for `n` workers with costs given by a function.
pub fn solve_minimum_cost_assignment_by<W, F>(n: usize, cost: F) -> Vec<usize>
where
    W: NumAssign + Ord + Copy + Bounded,
    F: FnMut(usize, usize) -> W,
{
    solve_minimum_cost_assignment(Matrix::from_fn(n, cost))
}

/// Solve the assignment problem with a fallible cost function.
///
/// The first error returned by `cost` is returned unchanged.
pub fn try_solve_minimum_cost_assignment_by<W, F, E>(n: usize, cost: F) -> Result<Vec<usize>, E>
where
    W: NumAssign + Ord + Copy + Bounded,
    F: FnMut(usize, usize) -> Result<W, E>,
{
    Ok(solve_minimum_cost_assignment(Matrix::try_from_fn(n, cost)?))
}

/// Solve the assignment problem between a list of workers and a list of tasks.
///
/// The cost of assigning worker `i` to task `j` is
/// `cost(i, j, &workers[i], &tasks[j])`.
///
/// # Panics
///
/// Panics if `workers` and `tasks` have different lengths.
///
/// # Example
///
/// ```
/// use rs_assignment::assignment::solve_minimum_cost_assignment_between;
///
/// let workers = [(0, 0), (5, 5), (9, 0)];
/// let tasks = [(8, 1), (1, 1), (4, 6)];
/// let a = solve_minimum_cost_assignment_between(&workers, &tasks, |_, _, w: &(i32, i32), t: &(i32, i32)| {
///     (w.0 - t.0).abs() + (w.1 - t.1).abs()
/// });
/// assert_eq!(a, vec![1, 2, 0]);
/// ```
pub fn solve_minimum_cost_assignment_between<A, B, W, F>(workers: &[A], tasks: &[B], cost: F) -> Vec<usize>
where
    W: NumAssign + Ord + Copy + Bounded,
    F: FnMut(usize, usize, &A, &B) -> W,
{
    assert_eq!(
        workers.len(),
        tasks.len(),
        "Number of workers and number of tasks must be equal"
    );
    match Matrix::from_pairs(workers, tasks, cost) {
        Ok(costs) => solve_minimum_cost_assignment(costs),
        Err(err) => unreachable!("{}", err),
    }
}
