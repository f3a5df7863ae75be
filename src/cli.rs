// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

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
            .help("Print as JSON lines"),
    )
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .default_value("month")
        .help("month | 3months | year")
}

fn draft_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("date").long("date").help("YYYY-MM-DD (default: today)"))
        .arg(Arg::new("description").long("description").short('d'))
        .arg(Arg::new("amount").long("amount").short('a'))
        .arg(Arg::new("category").long("category").short('c'))
}

pub fn build_cli() -> Command {
    Command::new("finanscan")
        .version(clap::crate_version!())
        .about("Track income and expenses, scan receipts, and export reports")
        .subcommand(
            Command::new("init").about("Create the database").arg(
                Arg::new("with-samples")
                    .long("with-samples")
                    .action(ArgAction::SetTrue)
                    .help("Load the starter transactions into an empty database"),
            ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record, edit and browse transactions")
                .subcommand_required(true)
                .subcommand(
                    draft_args(Command::new("add").about("Record a transaction"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .short('t')
                                .default_value("expense")
                                .help("income | expense"),
                        )
                        .arg(
                            Arg::new("code")
                                .long("code")
                                .help("6-12 letters/digits (default: generated)"),
                        )
                        .mut_arg("description", |a| a.required(true))
                        .mut_arg("amount", |a| a.required(true)),
                )
                .subcommand(
                    draft_args(Command::new("edit").about("Replace fields of a transaction"))
                        .arg(Arg::new("code").long("code").required(true))
                        .arg(Arg::new("new-code").long("new-code"))
                        .arg(Arg::new("type").long("type").short('t')),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("code").long("code").required(true))
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .short('y')
                                .action(ArgAction::SetTrue)
                                .help("Confirm deletion; it cannot be undone"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("category").long("category").short('c'))
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("search").long("search").short('s'))
                        .arg(
                            Arg::new("description-only")
                                .long("description-only")
                                .action(ArgAction::SetTrue)
                                .help("Match the search term against descriptions only"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("months").about("Months that have transactions"),
                )),
        )
        .subcommand(
            Command::new("scan")
                .about("Extract a transaction draft from a receipt image")
                .arg(Arg::new("file").long("file").short('f').required(true))
                .arg(
                    Arg::new("save")
                        .long("save")
                        .action(ArgAction::SetTrue)
                        .help("Store the draft if it validates"),
                )
                .arg(Arg::new("category").long("category").short('c'))
                .arg(Arg::new("code").long("code")),
        )
        .subcommand(json_flags(
            Command::new("dashboard").about("This month's summary, charts data and recent entries"),
        ))
        .subcommand(
            Command::new("report")
                .about("Summaries, chart series and exports")
                .subcommand_required(true)
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Income, expenses and balance for a period")
                        .arg(period_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("trend").about("Last 12 calendar months"),
                ))
                .subcommand(json_flags(
                    Command::new("evolution").about("Last 6 months with activity"),
                ))
                .subcommand(json_flags(
                    Command::new("by-category")
                        .about("Expenses per category for a period")
                        .arg(period_arg()),
                ))
                .subcommand(
                    Command::new("export")
                        .about("Write a report for a date range")
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD (default: first day of this month)"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD (default: last day of this month)"))
                        .arg(Arg::new("code").long("code").help("Only codes containing this text"))
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("txt")
                                .help("txt | html | csv | json"),
                        )
                        .arg(Arg::new("out").long("out").short('o')),
                ),
        )
        .subcommand(
            Command::new("seed").about("Append random test transactions").arg(
                Arg::new("count")
                    .long("count")
                    .default_value("10")
                    .value_parser(value_parser!(usize)),
            ),
        )
        .subcommand(Command::new("categories").about("List categories"))
        .subcommand(
            Command::new("code")
                .about("Transaction code helpers")
                .subcommand_required(true)
                .subcommand(Command::new("new").about("Suggest an unused code"))
                .subcommand(
                    Command::new("check")
                        .about("Validate a code")
                        .arg(Arg::new("code").required(true))
                        .arg(
                            Arg::new("for")
                                .long("for")
                                .help("Code of the transaction being edited"),
                        ),
                ),
        )
}
