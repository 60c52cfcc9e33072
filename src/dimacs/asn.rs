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

//! This module implements read and write functions for the DIMACS
//! assignment format. A DIMACS file must look as follows.
//!
//! 1. empty lines are allowed and ignored
//! 2. a line starting with `c` is a comment line and is ignored
//! 3. the first non-comment line must have the form `p asn <n> <m>`,
//!    where `<n>` is the (even) number of nodes and `<m>` the number
//!    of arcs.
//! 4. node lines `n <node>` list the worker nodes, exactly half of
//!    the nodes. All other nodes are tasks.
//! 5. there must be exactly `m` arc lines `a <u> <v> <c>` denoting
//!    the worker node `<u>`, the task node `<v>` and the cost `<c>`
//!    of assigning `<u>` to `<v>`.
//!
//! Only complete instances are accepted, i.e. each pair of worker and
//! task must occur exactly once. Workers and tasks are numbered in
//! order of increasing node number.
//!
//! # Example
//!
//! ```
//! use rs_assignment::dimacs;
//! use std::io::Cursor;
//!
//! let costs = dimacs::asn::read::<_, u32>(Cursor::new("
//! p asn 4 4
//! n 1
//! n 3
//! a 1 2 7
//! a 1 4 1
//! a 3 2 2
//! a 3 4 5
//! ")).unwrap();
//!
//! assert_eq!(costs.as_slice(), &[7, 1, 2, 5]);
//! ```

use super::{Error, Lines, Result};
use crate::matrix::Matrix;

use log::debug;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;

#[derive(Clone, Copy)]
enum Node {
    Worker(usize),
    Task(usize),
}

/// Read a complete assignment instance.
pub fn read<R, T>(r: R) -> Result<Matrix<T>>
where
    R: Read,
    T: FromStr,
    T::Err: Display,
{
    let mut lines = Lines::new(r);

    let mut pline = match lines.next_line()? {
        Some(line) if line.kind == "p" => line,
        Some(line) => return Err(line.format_error(format!("expected 'p' line, got '{}'", line.kind))),
        None => {
            return Err(Error::Format {
                line: lines.number(),
                msg: "missing problem line".to_string(),
            })
        }
    };
    pline.keyword("asn")?;
    let nnodes: usize = pline.field("number of nodes")?;
    let narcs: usize = pline.field("number of arcs")?;
    let pline_number = pline.number;

    if nnodes % 2 != 0 {
        return Err(pline.data_error(format!("number of nodes must be even, got {}", nnodes)));
    }
    let n = nnodes / 2;
    if n.checked_mul(n) != Some(narcs) {
        return Err(pline.data_error(format!(
            "complete instance with {} workers must have {}^2 arcs, got {}",
            n, n, narcs
        )));
    }
    pline.finish()?;

    // Nothing is reserved from the header sizes, they are checked
    // against the lines actually read first.
    let mut workers = BTreeSet::new();
    let mut arcs = vec![];

    while let Some(mut line) = lines.next_line()? {
        match line.kind {
            "n" => {
                let u: usize = line.field("node")?;
                if u < 1 || u > nnodes {
                    return Err(line.data_error(format!("invalid node id {} (must be in 1..={})", u, nnodes)));
                }
                if workers.len() == n {
                    return Err(line.data_error(format!("too many worker nodes (expected exactly {})", n)));
                }
                if !workers.insert(u - 1) {
                    return Err(line.data_error(format!("duplicate worker node {}", u)));
                }
            }
            "a" => {
                let u: usize = line.field("source node")?;
                let v: usize = line.field("sink node")?;
                let c: T = line.field("cost")?;
                for &node in &[u, v] {
                    if node < 1 || node > nnodes {
                        return Err(line.data_error(format!("invalid node id {} (must be in 1..={})", node, nnodes)));
                    }
                }
                if arcs.len() == narcs {
                    return Err(line.data_error(format!("too many arcs (expected exactly {})", narcs)));
                }
                arcs.push((line.number, u - 1, v - 1, c));
            }
            _ => return Err(line.unexpected()),
        }
        line.finish()?;
    }

    if workers.len() != n {
        return Err(Error::Data {
            line: lines.number(),
            msg: format!("expected {} worker nodes, got {}", n, workers.len()),
        });
    }
    if arcs.len() != narcs {
        return Err(Error::Data {
            line: lines.number(),
            msg: format!("expected {} arcs, got {}", narcs, arcs.len()),
        });
    }

    // Workers and tasks are numbered separately by increasing node id.
    let (mut nworkers, mut ntasks) = (0, 0);
    let mut index = Vec::with_capacity(nnodes);
    for u in 0..nnodes {
        if workers.contains(&u) {
            index.push(Node::Worker(nworkers));
            nworkers += 1;
        } else {
            index.push(Node::Task(ntasks));
            ntasks += 1;
        }
    }

    let mut costs: Vec<Option<T>> = (0..narcs).map(|_| None).collect();
    for (line, u, v, c) in arcs {
        let (i, j) = match (index[u], index[v]) {
            (Node::Worker(i), Node::Task(j)) => (i, j),
            (Node::Task(_), _) => {
                return Err(Error::Data {
                    line,
                    msg: format!("source node {} is not a worker", u + 1),
                })
            }
            (_, Node::Worker(_)) => {
                return Err(Error::Data {
                    line,
                    msg: format!("sink node {} is not a task", v + 1),
                })
            }
        };
        let cost = &mut costs[i * n + j];
        if cost.is_some() {
            return Err(Error::Data {
                line,
                msg: format!("duplicate arc ({},{})", u + 1, v + 1),
            });
        }
        *cost = Some(c);
    }

    // n^2 distinct worker/task arcs fill every entry.
    let costs = costs.into_iter().collect::<Option<Vec<T>>>().ok_or_else(|| Error::Data {
        line: pline_number,
        msg: "incomplete instance".to_string(),
    })?;

    debug!("Read assignment instance with {} workers", n);

    Matrix::from_vec(n, costs).map_err(|err| Error::Data {
        line: pline_number,
        msg: format!("{}", err),
    })
}

/// Read a complete assignment instance from a named file.
pub fn read_from_file<T>(filename: &str) -> Result<Matrix<T>>
where
    T: FromStr,
    T::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write an assignment instance.
///
/// The workers are the nodes `1..=n`, the tasks the nodes `n+1..=2n`.
pub fn write<W, T>(mut w: W, costs: &Matrix<T>) -> std::io::Result<()>
where
    W: Write,
    T: Display,
{
    let n = costs.size();
    writeln!(w, "p asn {} {}", 2 * n, n * n)?;
    for i in 0..n {
        writeln!(w, "n {}", i + 1)?;
    }
    for (i, row) in costs.rows().enumerate() {
        for (j, c) in row.iter().enumerate() {
            writeln!(w, "a {} {} {}", i + 1, n + j + 1, c)?;
        }
    }

    Ok(())
}

/// Write an assignment instance to a named file.
pub fn write_to_file<T>(filename: &str, costs: &Matrix<T>) -> std::io::Result<()>
where
    T: Display,
{
    write(&mut std::fs::File::create(filename)?, costs)
}

/// Write a solution of an assignment problem.
///
/// Nodes are numbered as in [`write`].
pub fn write_solution<W, T>(mut w: W, assignment: &[usize], value: T) -> std::io::Result<()>
where
    W: Write,
    T: Display,
{
    let n = assignment.len();
    writeln!(w, "s {}", value)?;
    for (i, &j) in assignment.iter().enumerate() {
        writeln!(w, "f {} {} 1", i + 1, n + j + 1)?;
    }

    Ok(())
}

/// Write a solution of an assignment problem to a named file.
pub fn write_solution_to_file<T>(filename: &str, assignment: &[usize], value: T) -> std::io::Result<()>
where
    T: Display,
{
    write_solution(&mut std::fs::File::create(filename)?, assignment, value)
}

/// Read a solution of an assignment problem.
///
/// Returns the solution value and the assignment, where nodes are
/// expected to be numbered as in [`write`].
pub fn read_solution<R, T>(r: R) -> Result<(T, Vec<usize>)>
where
    R: Read,
    T: FromStr,
    T::Err: Display,
{
    let mut lines = Lines::new(r);
    let mut value = None;
    let mut flows = vec![];

    while let Some(mut line) = lines.next_line()? {
        match line.kind {
            "s" => {
                if value.is_some() {
                    return Err(line.format_error("solution value given twice".to_string()));
                }
                value = Some(line.field("solution value")?);
            }
            "f" => {
                let u: usize = line.field("worker node")?;
                let v: usize = line.field("task node")?;
                let flow: usize = line.field("flow")?;
                if flow != 1 {
                    return Err(line.data_error(format!("flow on ({},{}) must be 1, got {}", u, v, flow)));
                }
                flows.push((line.number, u, v));
            }
            _ => return Err(line.unexpected()),
        }
        line.finish()?;
    }

    let value = match value {
        Some(value) => value,
        None => {
            return Err(Error::Format {
                line: lines.number(),
                msg: "missing solution value".to_string(),
            })
        }
    };

    let n = flows.len();
    let mut assignment = vec![None; n];
    let mut assigned = vec![false; n];
    for (line, u, v) in flows {
        if u < 1 || u > n || v <= n || v > 2 * n {
            return Err(Error::Data {
                line,
                msg: format!("invalid assignment ({},{})", u, v),
            });
        }
        if assignment[u - 1].is_some() {
            return Err(Error::Data {
                line,
                msg: format!("worker {} assigned twice", u),
            });
        }
        if assigned[v - n - 1] {
            return Err(Error::Data {
                line,
                msg: format!("task {} assigned twice", v),
            });
        }
        assignment[u - 1] = Some(v - n - 1);
        assigned[v - n - 1] = true;
    }

    // n lines with distinct workers in 1..=n cover all workers
    Ok((value, assignment.into_iter().flatten().collect()))
}

/// Read a solution of an assignment problem from a named file.
pub fn read_solution_from_file<T>(filename: &str) -> Result<(T, Vec<usize>)>
where
    T: FromStr,
    T::Err: Display,
{
    read_solution(std::fs::File::open(filename)?)
}
