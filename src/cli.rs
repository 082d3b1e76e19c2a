// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, ArgGroup, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Month to report on (defaults to the current month)")
}

fn out_dir_arg() -> Arg {
    Arg::new("out_dir")
        .long("out-dir")
        .value_name("DIR")
        .help("Directory to write the report into")
}

pub fn build_cli() -> Command {
    Command::new("spendlog")
        .version(crate_version!())
        .about("Offline expense tracker: record income and expenses, view summaries, export CSV reports")
        .subcommand(Command::new("init").about("Create the database if missing"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("balance")
                        .about("All-time balance of one account")
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage expense categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("name").long("name"))
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .value_parser(value_parser!(i64)),
                        )
                        .group(ArgGroup::new("target").args(["name", "id"]).required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record, list and delete transactions")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"])
                                .default_value("expense"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("account").long("account").default_value("Cash"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("desc"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Defaults to today"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg())
                        .arg(Arg::new("account").long("account")),
                ))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("reset")
                        .about("Delete every transaction of a month, or all of them")
                        .arg(Arg::new("month").long("month").value_name("YYYY-MM"))
                        .arg(Arg::new("all").long("all").action(ArgAction::SetTrue))
                        .group(
                            ArgGroup::new("scope")
                                .args(["month", "all"])
                                .required(true),
                        ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries and breakdowns")
                .subcommand(json_flags(Command::new("summary").arg(month_arg())))
                .subcommand(json_flags(
                    Command::new("balances")
                        .arg(month_arg())
                        .arg(
                            Arg::new("all_time")
                                .long("all-time")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("month")
                                .help("Show all-time income/expense instead of one month"),
                        ),
                ))
                .subcommand(json_flags(Command::new("categories").arg(month_arg())))
                .subcommand(json_flags(
                    Command::new("trend").arg(
                        Arg::new("months")
                            .long("months")
                            .value_parser(value_parser!(u32).range(1..=1200))
                            .help("Number of months ending with the current one (default 6, at most 1200)"),
                    ),
                ))
                .subcommand(json_flags(Command::new("history")))
                .subcommand(json_flags(Command::new("dashboard").arg(month_arg()))),
        )
        .subcommand(
            Command::new("export")
                .about("Write CSV reports")
                .subcommand(
                    Command::new("month")
                        .arg(month_arg())
                        .arg(out_dir_arg()),
                )
                .subcommand(Command::new("all").arg(out_dir_arg())),
        )
        .subcommand(
            Command::new("config")
                .about("Display settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-currency")
                        .arg(Arg::new("symbol").long("symbol").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Report data-quality issues"))
}
