// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use crate::db;
use crate::error::SpendError;
use crate::export::DirectorySink;
use crate::ledger::Ledger;
use crate::utils::month_or_current;
use anyhow::Result;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => {
            let month = month_or_current(sub.get_one::<String>("month"))?;
            let sink = sink_for(sub)?;
            report_outcome(ledger.export_month(&month, &sink))
        }
        Some(("all", sub)) => {
            let sink = sink_for(sub)?;
            let today = chrono::Local::now().date_naive();
            report_outcome(ledger.export_all(today, &sink))
        }
        _ => Ok(()),
    }
}

fn sink_for(sub: &clap::ArgMatches) -> Result<DirectorySink> {
    let dir = match sub.get_one::<String>("out_dir") {
        Some(d) => PathBuf::from(d.trim()),
        None => db::export_dir()?,
    };
    Ok(DirectorySink::new(dir))
}

// An empty scope is a normal outcome, not a failure.
fn report_outcome(outcome: crate::error::Result<PathBuf>) -> Result<()> {
    match outcome {
        Ok(path) => println!("Exported report to {}", path.display()),
        Err(SpendError::EmptyExport { scope }) => {
            println!("No data available: there are no transactions to export for {}.", scope)
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
