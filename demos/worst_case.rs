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

use time::OffsetDateTime;

use rustop::opts;

use rs_assignment::{solve_minimum_cost_assignment, Matrix, Problem};

fn main() {
    let (args, _) = opts! {
        synopsis "Solve the assignment problem C(i,j) = (i+1)*(j+1) with the Hungarian method.";
        opt num:usize=1, desc:"Number of times the algorithm is repeated.";
        opt steps:bool, desc:"Print the number of steps.";
        param size:usize, desc:"Number of workers";
    }
    .parse_or_exit();

    if args.num == 0 {
        eprintln!("The number of runs must be at least 1");
        std::process::exit(1);
    }

    env_logger::init();

    let n = args.size;
    let costs = Matrix::from_fn(n, |i, j| ((i + 1) * (j + 1)) as u64);

    let tstart = OffsetDateTime::now_utc();
    let mut assignment = vec![];
    for _ in 0..args.num {
        assignment = solve_minimum_cost_assignment(costs.clone());
    }
    let tend = OffsetDateTime::now_utc();

    println!("Time: {}", (tend - tstart).as_seconds_f64());
    println!("  per run: {}", (tend - tstart).as_seconds_f64() / args.num as f64);
    println!("Size: {}", n);
    println!("Value: {}", costs.cost_of(&assignment));

    assert!(assignment.iter().enumerate().all(|(i, &j)| j == n - 1 - i));

    if args.steps && n > 0 {
        let mut problem = Problem::new(costs);
        while !problem.step() {}
        println!("Steps: {}", problem.num_steps());
    }
}
