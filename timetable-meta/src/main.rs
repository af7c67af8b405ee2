/*
 * Copyright (c) 2025 Clément GRENNERAT
 *
 * This program is free software: you can redistribute it and/or modify it under the terms of the
 * GNU General Public License as published by the Free Software Foundation, version 3.
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without
 * even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
 * See the GNU General Public License for more details.
 * You should have received a copy of the GNU General Public License along with this program.
 * If not, see https://www.gnu.org/licenses/.
 *
 */

#[cfg(test)]
mod test;

use clap::{Parser, Subcommand};
use log::{error, info, LevelFilter};
use std::process::ExitCode;
use timetable_core::{solve, Configuration, SolveOutcome};
use timetable_dao::{CatalogLoader, ScheduleWriter};
use timetable_db::{DbCatalogLoader, DbScheduleWriter};

#[derive(Parser)]
#[command(name = "timetable-meta")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Loads a tenant's catalog, runs the solver, and writes the resulting schedule back.
    Solve {
        #[arg(long)]
        tenant: i64,
        #[arg(long)]
        time_budget_seconds: Option<u64>,
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::new()
        .filter(None, LevelFilter::Info)
        .filter(Some("timetable_core::scheduler"), LevelFilter::Debug)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Solve { tenant, time_budget_seconds, database_url } => run_solve(tenant, time_budget_seconds, &database_url),
    }
}

fn run_solve(tenant: i64, time_budget_seconds: Option<u64>, database_url: &str) -> ExitCode {
    let mut config = Configuration::load();
    if let Some(seconds) = time_budget_seconds {
        config.time_budget_seconds = seconds;
    }

    let session = timetable_db::Session::new(database_url);
    let mut loader = DbCatalogLoader::new(session);
    let problem = match loader.load(tenant, config.room_unresolved_policy) {
        Ok(problem) => problem,
        Err(e) => {
            error!("failed to load tenant {tenant}: {e}");
            return ExitCode::from(3);
        }
    };
    info!("loaded tenant {tenant}: {} requirements", problem.requirements.len());

    match solve(&problem, &config) {
        SolveOutcome::Sat(entries) => {
            let session = timetable_db::Session::new(database_url);
            let mut writer = DbScheduleWriter::new(session);
            match writer.replace_schedule(tenant, entries) {
                Ok(()) => {
                    info!("schedule written for tenant {tenant}");
                    ExitCode::from(0)
                }
                Err(e) => {
                    error!("failed to write schedule for tenant {tenant}: {e}");
                    ExitCode::from(4)
                }
            }
        }
        SolveOutcome::DomainTooSmall(req) => {
            error!("tenant {tenant}: requirement {req} has too small a domain");
            ExitCode::from(1)
        }
        SolveOutcome::Unsat => {
            error!("tenant {tenant}: no feasible schedule exists");
            ExitCode::from(1)
        }
        SolveOutcome::Timeout(limit_ms) => {
            error!("tenant {tenant}: search exceeded the {limit_ms}ms budget");
            ExitCode::from(2)
        }
    }
}
