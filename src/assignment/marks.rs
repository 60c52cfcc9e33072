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

//! Star, prime and cover markings of the Hungarian method.

/// Starred zeros.
///
/// There is at most one star in each row and in each column, so the
/// stars form a partial matching and are stored as two index maps.
#[derive(Clone, Debug)]
pub(super) struct Stars {
    in_row: Vec<Option<usize>>,
    in_column: Vec<Option<usize>>,
}

impl Stars {
    pub fn new(n: usize) -> Self {
        Stars {
            in_row: vec![None; n],
            in_column: vec![None; n],
        }
    }

    /// Return the column of the star in row `i`.
    pub fn in_row(&self, i: usize) -> Option<usize> {
        self.in_row[i]
    }

    /// Return the row of the star in column `j`.
    pub fn in_column(&self, j: usize) -> Option<usize> {
        self.in_column[j]
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.in_row[i] == Some(j)
    }

    /// Star `(i, j)`.
    ///
    /// Row `i` and column `j` must not contain a star.
    pub fn insert(&mut self, i: usize, j: usize) {
        debug_assert!(self.in_row[i].is_none(), "Row {} already has a star", i);
        debug_assert!(self.in_column[j].is_none(), "Column {} already has a star", j);
        self.in_row[i] = Some(j);
        self.in_column[j] = Some(i);
    }

    /// Unstar `(i, j)`.
    pub fn remove(&mut self, i: usize, j: usize) {
        debug_assert!(self.contains(i, j), "({},{}) is not starred", i, j);
        self.in_row[i] = None;
        self.in_column[j] = None;
    }

    /// Return the number of stars.
    pub fn len(&self) -> usize {
        self.in_row.iter().filter(|j| j.is_some()).count()
    }

    /// Return the starred column of each row.
    pub fn rows(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.in_row.iter().copied()
    }
}

/// Primed zeros.
///
/// A row is covered as soon as it receives a prime (or the augmenting
/// path search starts), so each row holds at most one prime.
#[derive(Clone, Debug)]
pub(super) struct Primes {
    in_row: Vec<Option<usize>>,
}

impl Primes {
    pub fn new(n: usize) -> Self {
        Primes { in_row: vec![None; n] }
    }

    /// Return the column of the prime in row `i`.
    pub fn in_row(&self, i: usize) -> Option<usize> {
        self.in_row[i]
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.in_row[i] == Some(j)
    }

    pub fn insert(&mut self, i: usize, j: usize) {
        debug_assert!(self.in_row[i].is_none(), "Row {} already has a prime", i);
        self.in_row[i] = Some(j);
    }

    pub fn clear(&mut self) {
        self.in_row.fill(None);
    }
}

/// Covered rows and columns.
#[derive(Clone, Debug)]
pub(super) struct Cover {
    rows: Vec<bool>,
    columns: Vec<bool>,
    num_columns: usize,
}

impl Cover {
    pub fn new(n: usize) -> Self {
        Cover {
            rows: vec![false; n],
            columns: vec![false; n],
            num_columns: 0,
        }
    }

    pub fn is_row_covered(&self, i: usize) -> bool {
        self.rows[i]
    }

    pub fn is_column_covered(&self, j: usize) -> bool {
        self.columns[j]
    }

    /// Return the number of covered columns.
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    pub fn cover_row(&mut self, i: usize) {
        self.rows[i] = true;
    }

    pub fn cover_column(&mut self, j: usize) {
        if !self.columns[j] {
            self.columns[j] = true;
            self.num_columns += 1;
        }
    }

    pub fn uncover_column(&mut self, j: usize) {
        if self.columns[j] {
            self.columns[j] = false;
            self.num_columns -= 1;
        }
    }

    /// Uncover all rows and columns.
    pub fn clear(&mut self) {
        self.rows.fill(false);
        self.columns.fill(false);
        self.num_columns = 0;
    }

    /// Return the uncovered rows.
    pub fn uncovered_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().enumerate().filter(|&(_, &c)| !c).map(|(i, _)| i)
    }

    /// Return the uncovered columns.
    pub fn uncovered_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().enumerate().filter(|&(_, &c)| !c).map(|(j, _)| j)
    }
}
