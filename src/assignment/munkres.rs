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

//! The Hungarian method in the six-step formulation of Munkres.
//!
//! The algorithm works on a reduced copy of the cost matrix and
//! maintains a partial matching of zero entries (the *stars*). Each
//! call of [`Problem::step`] executes one of the six steps:
//!
//! 1. subtract the row minimum from every row,
//! 2. greedily star zeros,
//! 3. cover the columns of all stars, stop if all columns are covered,
//! 4. prime uncovered zeros until one without a star in its row is found,
//! 5. augment the matching along the alternating prime/star path,
//! 6. shift the matrix by the smallest uncovered entry.
//!
//! # Example
//!
//! ```
//! use rs_assignment::assignment::{Phase, Problem};
//! use rs_assignment::Matrix;
//!
//! let costs = Matrix::from_rows(vec![
//!     vec![4, 1, 3],
//!     vec![2, 0, 5],
//!     vec![3, 2, 2],
//! ]).unwrap();
//!
//! let mut problem = Problem::new(costs.clone());
//! assert_eq!(problem.phase(), Phase::One);
//! assert!(!problem.step());
//! assert_eq!(problem.matrix().row(0), &[3, 0, 2]);
//!
//! let mut assignment = vec![0; 3];
//! problem.solve(&mut assignment);
//! assert_eq!(problem.phase(), Phase::Done);
//! assert_eq!(assignment, vec![1, 0, 2]);
//! assert_eq!(costs.cost_of(&assignment), 5);
//! ```

use super::marks::{Cover, Primes, Stars};
use super::Phase;
use crate::matrix::Matrix;
use crate::num::traits::{Bounded, NumAssign};

use log::{debug, trace};

/// An instance of the assignment problem.
///
/// The problem takes ownership of the cost matrix and reduces it in
/// place while solving.
pub struct Problem<W> {
    costs: Matrix<W>,
    stars: Stars,
    primes: Primes,
    cover: Cover,
    /// The uncovered prime without a star in its row found in step 4.
    seed: (usize, usize),
    phase: Phase,
    nsteps: usize,
}

impl<W> Problem<W>
where
    W: NumAssign + Ord + Copy + Bounded,
{
    /// Create a new problem for the given cost matrix.
    ///
    /// The entry `(i, j)` of `costs` is the cost of assigning worker `i`
    /// to task `j`. The matrix must not be empty.
    pub fn new(costs: Matrix<W>) -> Self {
        let n = costs.size();
        assert!(n > 0, "Assignment problem must have at least one worker");
        debug!("New assignment problem with {} workers", n);
        Problem {
            costs,
            stars: Stars::new(n),
            primes: Primes::new(n),
            cover: Cover::new(n),
            seed: (0, 0),
            phase: Phase::One,
            nsteps: 0,
        }
    }

    /// Return the number of workers (and tasks).
    pub fn size(&self) -> usize {
        self.costs.size()
    }

    /// Return the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Return the number of executed steps.
    pub fn num_steps(&self) -> usize {
        self.nsteps
    }

    /// Return the current (reduced) cost matrix.
    pub fn matrix(&self) -> &Matrix<W> {
        &self.costs
    }

    /// Return `true` if `(i, j)` is a starred zero.
    pub fn is_starred(&self, i: usize, j: usize) -> bool {
        self.stars.contains(i, j)
    }

    /// Return `true` if `(i, j)` is a primed zero.
    pub fn is_primed(&self, i: usize, j: usize) -> bool {
        self.primes.contains(i, j)
    }

    pub fn is_row_covered(&self, i: usize) -> bool {
        self.cover.is_row_covered(i)
    }

    pub fn is_column_covered(&self, j: usize) -> bool {
        self.cover.is_column_covered(j)
    }

    /// Return the number of covered columns.
    pub fn num_covered_columns(&self) -> usize {
        self.cover.num_columns()
    }

    /// Execute one step of the algorithm.
    ///
    /// Returns `true` iff the problem has been solved. Once solved,
    /// further calls do nothing.
    pub fn step(&mut self) -> bool {
        let next = match self.phase {
            Phase::One => self.reduce_rows(),
            Phase::Two => self.star_zeros(),
            Phase::Three => self.cover_starred_columns(),
            Phase::Four => self.prime_zeros(),
            Phase::Five => self.augment(),
            Phase::Six => self.shift(),
            Phase::Done => return true,
        };
        trace!("Step {}: {:?} -> {:?}", self.nsteps, self.phase, next);
        self.phase = next;
        self.nsteps += 1;

        if self.phase == Phase::Done {
            debug!(
                "Solved assignment problem with {} workers in {} steps",
                self.size(),
                self.nsteps
            );
            true
        } else {
            false
        }
    }

    /// Solve the problem and write the optimal assignment to `assignment`.
    ///
    /// After return `assignment[i]` is the task assigned to worker `i`.
    pub fn solve(&mut self, assignment: &mut [usize]) {
        assert_eq!(
            assignment.len(),
            self.size(),
            "Assignment buffer must have one entry per worker"
        );
        while !self.step() {}
        for (a, j) in assignment.iter_mut().zip(self.stars.rows()) {
            *a = j.unwrap_or_else(|| unreachable!("Unassigned worker in solved problem"));
        }
    }

    /// Return the optimal assignment if the problem has been solved.
    pub fn assignment(&self) -> Option<Vec<usize>> {
        if self.phase != Phase::Done {
            return None;
        }
        self.stars.rows().collect()
    }

    fn reduce_rows(&mut self) -> Phase {
        for i in 0..self.size() {
            let m = self.costs.min_in_row(i);
            self.costs.sub_from_row(i, m);
        }
        Phase::Two
    }

    fn star_zeros(&mut self) -> Phase {
        let n = self.size();
        for i in 0..n {
            let zero = (0..n).find(|&j| self.stars.in_column(j).is_none() && self.costs[(i, j)].is_zero());
            if let Some(j) = zero {
                self.stars.insert(i, j);
            }
        }
        trace!("Initial matching has {} of {} pairs", self.stars.len(), n);
        Phase::Three
    }

    fn cover_starred_columns(&mut self) -> Phase {
        let n = self.size();
        for j in 0..n {
            if self.stars.in_column(j).is_some() {
                self.cover.cover_column(j);
            }
        }
        if self.cover.num_columns() == n {
            Phase::Done
        } else {
            Phase::Four
        }
    }

    fn prime_zeros(&mut self) -> Phase {
        while let Some((i, j)) = self.find_uncovered_zero() {
            self.primes.insert(i, j);
            match self.stars.in_row(i) {
                Some(k) => {
                    self.cover.cover_row(i);
                    self.cover.uncover_column(k);
                }
                None => {
                    self.seed = (i, j);
                    return Phase::Five;
                }
            }
        }
        Phase::Six
    }

    fn augment(&mut self) -> Phase {
        // The path alternates between primes (even positions) and
        // stars (odd positions).
        let (mut i, mut j) = self.seed;
        let mut path = vec![(i, j)];
        while let Some(r) = self.stars.in_column(j) {
            i = r;
            path.push((i, j));
            j = match self.primes.in_row(i) {
                Some(c) => c,
                None => unreachable!("Starred row {} without prime on augmenting path", i),
            };
            path.push((i, j));
        }
        trace!("Augmenting along path of length {}", path.len());

        for &(i, j) in path.iter().skip(1).step_by(2) {
            self.stars.remove(i, j);
        }
        for &(i, j) in path.iter().step_by(2) {
            self.stars.insert(i, j);
        }

        self.primes.clear();
        self.cover.clear();
        Phase::Three
    }

    fn shift(&mut self) -> Phase {
        let m = match self.min_uncovered() {
            Some(m) => m,
            None => panic!("No uncovered entry left in step 6"),
        };
        // Only the net change is applied: +m on doubly covered cells, -m
        // on uncovered cells. Doubly covered entries may leave the range
        // of `W` and are clamped at its maximum.
        let n = self.size();
        let max = W::max_value();
        for i in 0..n {
            let row_covered = self.cover.is_row_covered(i);
            for j in 0..n {
                let c = &mut self.costs[(i, j)];
                match (row_covered, self.cover.is_column_covered(j)) {
                    (true, true) => *c = if *c > max - m { max } else { *c + m },
                    (false, false) => *c -= m,
                    _ => (),
                }
            }
        }
        Phase::Four
    }

    /// Return the smallest uncovered entry.
    fn min_uncovered(&self) -> Option<W> {
        let mut minimum = None;
        for i in self.cover.uncovered_rows() {
            for j in self.cover.uncovered_columns() {
                let c = self.costs[(i, j)];
                if minimum.map_or(true, |m| c < m) {
                    minimum = Some(c);
                }
            }
        }
        minimum
    }

    /// Return the first uncovered zero in row-major order.
    fn find_uncovered_zero(&self) -> Option<(usize, usize)> {
        for i in self.cover.uncovered_rows() {
            for j in self.cover.uncovered_columns() {
                if self.costs[(i, j)].is_zero() {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::assignment::{Phase, Problem};
    use crate::Matrix;

    fn example() -> Matrix<u32> {
        Matrix::from_rows(vec![vec![4, 1, 3], vec![2, 0, 5], vec![3, 2, 2]]).unwrap()
    }

    #[test]
    fn test_phase_sequence() {
        let mut p = Problem::new(example());
        let mut phases = vec![p.phase()];
        while !p.step() {
            phases.push(p.phase());
        }
        phases.push(p.phase());

        use Phase::*;
        assert_eq!(
            phases,
            vec![One, Two, Three, Four, Six, Four, Six, Four, Five, Three, Done]
        );
        assert_eq!(p.num_steps(), 10);
        assert_eq!(p.matrix().as_slice(), &[1, 0, 1, 0, 0, 4, 0, 1, 0]);
        assert_eq!(p.assignment(), Some(vec![1, 0, 2]));
    }

    #[test]
    fn test_intermediate_state() {
        let mut p = Problem::new(example());
        assert_eq!(p.assignment(), None);

        // reduce rows, star zeros, cover columns
        p.step();
        p.step();
        assert!(p.is_starred(0, 1));
        assert!(p.is_starred(2, 2));
        assert!(!p.is_starred(1, 1));
        p.step();
        assert_eq!(p.phase(), Phase::Four);
        assert_eq!(p.num_covered_columns(), 2);
        assert!(p.is_column_covered(1) && p.is_column_covered(2));

        // no uncovered zero, shift column 0
        p.step();
        p.step();
        assert_eq!(p.matrix().row(2), &[0, 0, 0]);

        // prime (2,0), cover row 2 and uncover column 2
        p.step();
        assert_eq!(p.phase(), Phase::Six);
        assert!(p.is_primed(2, 0));
        assert!(p.is_row_covered(2));
        assert!(!p.is_column_covered(2));
        assert_eq!(p.num_covered_columns(), 1);

        p.step();
        p.step();
        assert_eq!(p.phase(), Phase::Five);
        assert!(p.is_primed(1, 0));

        // augment clears primes and covers
        p.step();
        assert_eq!(p.phase(), Phase::Three);
        assert!(p.is_starred(1, 0));
        assert!(!p.is_primed(1, 0));
        assert!(!p.is_primed(2, 0));
        assert!(!p.is_row_covered(2));
        assert_eq!(p.num_covered_columns(), 0);
    }

    #[test]
    fn test_step_after_done() {
        let mut p = Problem::new(example());
        let mut assignment = vec![0; 3];
        p.solve(&mut assignment);
        let nsteps = p.num_steps();

        assert!(p.step());
        assert!(p.step());
        assert_eq!(p.num_steps(), nsteps);
        assert_eq!(p.phase(), Phase::Done);
        assert_eq!(p.assignment(), Some(assignment));
    }

    #[test]
    fn test_long_augmenting_path() {
        // The greedy matching stars (0,0) and (1,1), the optimum needs
        // to move both stars.
        let costs = Matrix::from_rows(vec![vec![0, 0, 9], vec![9, 0, 0], vec![0, 9, 9]]).unwrap();
        let mut p = Problem::new(costs.clone());
        let mut assignment = vec![0; 3];
        p.solve(&mut assignment);
        assert_eq!(assignment, vec![1, 2, 0]);
        assert_eq!(costs.cost_of(&assignment), 0);
    }

    #[test]
    fn test_single_worker() {
        let mut p = Problem::new(Matrix::from_fn(1, |_, _| 42u64));
        let mut assignment = vec![7];
        p.solve(&mut assignment);
        assert_eq!(assignment, vec![0]);
        assert_eq!(p.matrix().get(0, 0), 0);
    }

    #[test]
    fn test_signed_costs() {
        let costs = Matrix::from_rows(vec![vec![-3, 5, 0], vec![2, -8, 1], vec![0, 0, -1]]).unwrap();
        let mut p = Problem::new(costs.clone());
        let mut assignment = vec![0; 3];
        p.solve(&mut assignment);
        assert_eq!(assignment, vec![0, 1, 2]);
        assert_eq!(costs.cost_of(&assignment), -12);
    }

    #[test]
    fn test_stars_stay_matching() {
        let costs = Matrix::from_fn(6, |i, j| ((i * 7 + j * 3) % 5) as u32);
        let mut p = Problem::new(costs);
        loop {
            for i in 0..6 {
                assert!((0..6).filter(|&j| p.is_starred(i, j)).count() <= 1);
                assert!((0..6).filter(|&j| p.is_starred(j, i)).count() <= 1);
                for j in 0..6 {
                    if p.is_starred(i, j) {
                        assert_eq!(p.matrix().get(i, j), 0);
                    }
                }
            }
            if p.step() {
                break;
            }
        }
        assert!(p.assignment().is_some());
    }

    #[test]
    fn test_costs_near_max() {
        const M: u32 = u32::MAX;
        let costs = Matrix::from_vec(
            4,
            vec![1, M, 2, M - 5, 2, 1, M - 2, 1, M - 7, M - 2, 9, 1, M - 8, M, M - 9, 7],
        )
        .unwrap();
        let mut p = Problem::new(costs);
        let mut assignment = vec![0; 4];
        p.solve(&mut assignment);
        assert_eq!(assignment, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_doubly_covered_entry_is_clamped() {
        const M: u32 = u32::MAX;
        let costs = Matrix::from_rows(vec![vec![M, M - 1, 0], vec![M - 3, 3, 0], vec![2, 1, M - 1]]).unwrap();
        let mut p = Problem::new(costs);
        let mut assignment = vec![0; 3];
        p.solve(&mut assignment);
        assert_eq!(assignment, vec![2, 1, 0]);
        // (2,2) was raised from M - 1 by 3
        assert_eq!(p.matrix().as_slice(), &[M - 4, M - 4, 0, M - 7, 0, 0, 0, 0, M]);
    }

    #[test]
    #[should_panic(expected = "at least one worker")]
    fn test_empty_problem() {
        Problem::new(Matrix::<u32>::from_fn(0, |_, _| 0));
    }

    #[test]
    #[should_panic(expected = "one entry per worker")]
    fn test_wrong_buffer() {
        let mut p = Problem::new(example());
        let mut assignment = vec![0; 2];
        p.solve(&mut assignment);
    }
}
