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

//! The matrix `C(i, j) = (i + 1) * (j + 1)` has the anti-diagonal as
//! unique optimal assignment.

use rs_assignment::assignment::Problem;
use rs_assignment::{solve_minimum_cost_assignment_by, Matrix};

fn is_anti_diagonal(assignment: &[usize]) -> bool {
    let n = assignment.len();
    assignment.iter().enumerate().all(|(i, &j)| j == n - 1 - i)
}

fn solve(n: usize) -> Vec<usize> {
    solve_minimum_cost_assignment_by(n, |i, j| ((i + 1) * (j + 1)) as u32)
}

#[test]
fn test_worst_case_trivial() {
    assert!(solve(0).is_empty());
    assert_eq!(solve(1), vec![0]);
}

#[test]
fn test_worst_case() {
    for &n in &[2, 3, 4, 5, 10, 50] {
        let assignment = solve(n);
        assert_eq!(assignment.len(), n);
        assert!(is_anti_diagonal(&assignment), "n = {}: {:?}", n, assignment);
    }
}

#[test]
fn test_worst_case_stepping() {
    let n = 10;
    let costs = Matrix::from_fn(n, |i, j| ((i + 1) * (j + 1)) as u64);
    let mut problem = Problem::new(costs.clone());
    while !problem.step() {
        assert!(problem.num_covered_columns() < n);
        assert!(problem.assignment().is_none());
    }

    let assignment = problem.assignment().unwrap();
    assert!(is_anti_diagonal(&assignment));
    assert_eq!(costs.cost_of(&assignment), (1..=n as u64).map(|i| i * (n as u64 + 1 - i)).sum::<u64>());
}
