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

use rs_assignment::dimacs;
use rs_assignment::{solve_minimum_cost_assignment, Matrix};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = opts! {
        synopsis "Solve an assignment problem in DIMACS format.";
        opt solution:Option<String>, desc:"Write the solution to this file.";
        param file:String, desc:"Instance file name";
    }
    .parse_or_exit();

    env_logger::init();

    let tstart = OffsetDateTime::now_utc();
    let costs: Matrix<i64> = dimacs::asn::read_from_file(&args.file)?;
    let tend = OffsetDateTime::now_utc();
    println!("Time: {}", (tend - tstart).as_seconds_f64());
    println!("  number of workers: {}", costs.size());

    let tstart = OffsetDateTime::now_utc();
    let assignment = solve_minimum_cost_assignment(costs.clone());
    let tend = OffsetDateTime::now_utc();
    let value = costs.cost_of(&assignment);
    println!("Time: {}", (tend - tstart).as_seconds_f64());
    println!("Value: {}", value);

    if let Some(filename) = args.solution {
        dimacs::asn::write_solution_to_file(&filename, &assignment, value)?;
    }

    Ok(())
}
