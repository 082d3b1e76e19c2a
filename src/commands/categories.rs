// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::{maybe_print_json, pretty_table, required};
use anyhow::Result;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?.trim();
            if ledger.add_category(name)? {
                println!("Added category '{}'", name);
            } else {
                println!("Category '{}' already exists", name);
            }
        }
        Some(("list", sub)) => {
            let categories = ledger.categories()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &categories)? {
                let data = categories.into_iter().map(|c| vec![c.name]).collect();
                println!("{}", pretty_table(&["Category"], data));
            }
        }
        Some(("rm", sub)) => match sub.get_one::<i64>("id") {
            Some(&id) => {
                if ledger.remove_category_id(id)? {
                    println!("Removed category #{}", id);
                } else {
                    println!("No category #{}", id);
                }
            }
            None => {
                let name = required(sub, "name")?.trim();
                if ledger.remove_category(name)? {
                    println!("Removed category '{}'", name);
                } else {
                    println!("No category named '{}'", name);
                }
            }
        },
        _ => {}
    }
    Ok(())
}
