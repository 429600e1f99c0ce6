// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

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
            .help("Print as JSON lines"),
    )
}

fn account_cmd() -> Command {
    Command::new("account")
        .about("Manage accounts")
        .subcommand(
            Command::new("add")
                .about("Add an account")
                .arg(Arg::new("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("cash | bank | card"),
                ),
        )
        .subcommand(json_flags(Command::new("list").about("List accounts")))
        .subcommand(
            Command::new("rm")
                .about("Remove an account (transaction references are kept, unlinked)")
                .arg(Arg::new("name").required(true)),
        )
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage income/expense categories")
        .subcommand(
            Command::new("add")
                .about("Add a category")
                .arg(Arg::new("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("income | expense"),
                )
                .arg(
                    Arg::new("daily")
                        .long("daily")
                        .action(ArgAction::SetTrue)
                        .help("Usable by the daily expense tracker"),
                )
                .arg(Arg::new("icon").long("icon").default_value(""))
                .arg(Arg::new("color").long("color").default_value("")),
        )
        .subcommand(json_flags(Command::new("list").about("List categories")))
        .subcommand(
            Command::new("rm")
                .about("Remove a category (refused while referenced)")
                .arg(Arg::new("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("income | expense"),
                ),
        )
}

fn asset_category_cmd() -> Command {
    Command::new("asset-category")
        .about("Manage asset categories")
        .subcommand(
            Command::new("add")
                .about("Add an asset category")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("icon").long("icon").default_value(""))
                .arg(Arg::new("color").long("color").default_value("")),
        )
        .subcommand(json_flags(Command::new("list").about("List asset categories")))
        .subcommand(
            Command::new("rm")
                .about("Remove an asset category (refused while referenced)")
                .arg(Arg::new("name").required(true)),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Balance-sheet transactions")
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("income | expense"),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .help("Amount in the entry currency; free-form text is normalized"),
                )
                .arg(
                    Arg::new("currency")
                        .long("currency")
                        .help("Entry currency (defaults to the base currency)"),
                )
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("account").long("account"))
                .arg(Arg::new("note").long("note"))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD [HH:MM[:SS]]; defaults to now"),
                )
                .arg(
                    Arg::new("attach")
                        .long("attach")
                        .action(ArgAction::Append)
                        .help("Attachment URI; repeatable"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Edit fields of a transaction")
                .arg(
                    Arg::new("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("currency").long("currency"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("note").long("note"))
                .arg(Arg::new("date").long("date")),
        )
        .subcommand(
            Command::new("rm").about("Delete a transaction").arg(
                Arg::new("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
}

fn expense_cmd() -> Command {
    Command::new("expense")
        .about("Daily expense tracking")
        .subcommand(
            Command::new("add")
                .about("Record a daily expense (category must be a daily one)")
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .help("Amount in the entry currency; free-form text is normalized"),
                )
                .arg(Arg::new("currency").long("currency"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("note").long("note"))
                .arg(Arg::new("date").long("date")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List daily expenses, newest first")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                .arg(Arg::new("to").long("to").help("YYYY-MM-DD")),
        ))
        .subcommand(
            Command::new("rm").about("Delete a daily expense").arg(
                Arg::new("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
}

fn asset_cmd() -> Command {
    Command::new("asset")
        .about("Manage assets")
        .subcommand(
            Command::new("add")
                .about("Add an asset")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(json_flags(Command::new("list").about("List assets")))
        .subcommand(
            Command::new("set-amount")
                .about("Update an asset's value, rolling the snapshot metadata")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("amount").long("amount").required(true)),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove an asset")
                .arg(Arg::new("name").required(true)),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Monthly reports")
        .subcommand(json_flags(
            Command::new("summary")
                .about("Income/expense/balance for a month")
                .arg(Arg::new("month").long("month").help("YYYY-MM; defaults to the current month")),
        ))
        .subcommand(json_flags(
            Command::new("cashflow")
                .about("Per-month income and expense totals")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(usize))
                        .default_value("12"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("top-categories")
                .about("Largest spending categories for a month")
                .arg(Arg::new("month").long("month"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize))
                        .default_value("5"),
                )
                .arg(
                    Arg::new("daily")
                        .long("daily")
                        .action(ArgAction::SetTrue)
                        .help("Rank the daily-expense collection instead"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Assets, month summary, and recent spending at a glance")
                .arg(Arg::new("month").long("month")),
        ))
}

fn insight_cmd() -> Command {
    Command::new("insight")
        .about("Spending trend, financial health, and advice")
        .subcommand(json_flags(
            Command::new("trend")
                .about("Classify the spending trend over recent months")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(usize))
                        .default_value("6"),
                )
                .arg(
                    Arg::new("daily")
                        .long("daily")
                        .action(ArgAction::SetTrue)
                        .help("Analyze the daily-expense collection instead"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("health")
                .about("Four-factor financial health score")
                .arg(Arg::new("month").long("month")),
        ))
        .subcommand(json_flags(
            Command::new("advice")
                .about("Prioritized advice synthesized from the month's aggregates")
                .arg(Arg::new("month").long("month"))
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(usize))
                        .default_value("6")
                        .help("Trend window feeding the advice rules"),
                ),
        ))
}

fn fx_cmd() -> Command {
    Command::new("fx")
        .about("Base currency and FX rates")
        .subcommand(
            Command::new("set-base")
                .about("Set the base currency")
                .arg(Arg::new("currency").required(true)),
        )
        .subcommand(
            Command::new("fetch")
                .about("Fetch daily rates for currencies seen in records")
                .arg(
                    Arg::new("days")
                        .long("days")
                        .value_parser(value_parser!(usize))
                        .default_value("120"),
                ),
        )
        .subcommand(Command::new("list").about("Show recently stored rates"))
        .subcommand(
            Command::new("convert")
                .about("Preview a conversion into the base currency")
                .arg(Arg::new("date").long("date").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("from").long("from").required(true)),
        )
}

fn export_cmd() -> Command {
    let common = |c: Command| {
        c.arg(
            Arg::new("format")
                .long("format")
                .default_value("csv")
                .help("csv | json"),
        )
        .arg(Arg::new("out").long("out").required(true))
    };
    Command::new("export")
        .about("Export records to a file")
        .subcommand(common(
            Command::new("transactions").about("Export balance-sheet transactions"),
        ))
        .subcommand(common(
            Command::new("expenses").about("Export daily expenses"),
        ))
}

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .version(clap::crate_version!())
        .about("Personal balance sheet, daily expenses, assets, and spending insights")
        .arg_required_else_help(true)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(account_cmd())
        .subcommand(category_cmd())
        .subcommand(asset_category_cmd())
        .subcommand(tx_cmd())
        .subcommand(expense_cmd())
        .subcommand(asset_cmd())
        .subcommand(report_cmd())
        .subcommand(insight_cmd())
        .subcommand(fx_cmd())
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Check record integrity and FX coverage"))
}
