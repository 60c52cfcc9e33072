// Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

#![forbid(unsafe_code)]

//! A library for solving the linear assignment problem.
//!
//! The solver implements the Hungarian method in the formulation of
//! Munkres. It is exact, deterministic and runs in `O(n^3)` time.

mod num {
    pub use num_traits as traits;
}

// # Data structures

pub mod matrix;
pub use self::matrix::Matrix;

// # Algorithms

pub mod assignment;
pub use self::assignment::{
    solve_minimum_cost_assignment, solve_minimum_cost_assignment_between, solve_minimum_cost_assignment_by,
    try_solve_minimum_cost_assignment_by, Phase, Problem,
};

// # Input/Output

#[cfg(any(feature = "dimacs"))]
pub mod dimacs;
