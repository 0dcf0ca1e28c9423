// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn all_arg() -> Arg {
    Arg::new("all")
        .long("all")
        .action(ArgAction::SetTrue)
        .help("Include suppressed rows and rows under suppressed orders")
}

fn id_arg(help: &'static str) -> Arg {
    Arg::new("id").long("id").required(true).help(help)
}

fn today_arg() -> Arg {
    Arg::new("today")
        .long("today")
        .help("Reference date YYYY-MM-DD (defaults to the local date)")
}

pub fn build_cli() -> Command {
    Command::new("repairledger")
        .about("Orders, income/expense ledger and profit stats for a repair business")
        .version(clap::crate_version!())
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Extra config file (TOML)"),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Path of the live data file"),
        )
        .arg(
            Arg::new("backup_dir")
                .long("backup-dir")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Directory holding backups"),
        )
        .subcommand(Command::new("init").about("Create the data file if missing"))
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("INCOME or EXPENSE"),
                        )
                        .arg(Arg::new("context").long("context")),
                )
                .subcommand(json_args(
                    Command::new("list").arg(
                        Arg::new("type")
                            .long("type")
                            .help("Only categories usable for this type"),
                    ),
                ))
                .subcommand(Command::new("rm").arg(id_arg("Category id"))),
        )
        .subcommand(
            Command::new("order")
                .about("Manage orders")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("customer").long("customer"))
                        .arg(Arg::new("status").long("status").help("OPEN, COMPLETED or CANCELLED"))
                        .arg(Arg::new("market").long("market"))
                        .arg(Arg::new("notes").long("notes"))
                        .arg(
                            Arg::new("job_lot")
                                .long("job-lot")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_args(Command::new("list").arg(all_arg())))
                .subcommand(json_args(
                    Command::new("show").arg(id_arg("Order id")).arg(all_arg()),
                ))
                .subcommand(
                    Command::new("update")
                        .arg(id_arg("Order id"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("customer").long("customer"))
                        .arg(Arg::new("status").long("status"))
                        .arg(Arg::new("market").long("market"))
                        .arg(Arg::new("notes").long("notes"))
                        .arg(Arg::new("job_lot").long("job-lot").help("true or false"))
                        .arg(Arg::new("suppressed").long("suppressed").help("true or false")),
                )
                .subcommand(Command::new("suppress").arg(id_arg("Order id")))
                .subcommand(Command::new("unsuppress").arg(id_arg("Order id"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("INCOME or EXPENSE"),
                        )
                        .arg(Arg::new("category_id").long("category-id"))
                        .arg(Arg::new("order_id").long("order-id"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("tags").long("tags")),
                )
                .subcommand(json_args(
                    Command::new("list").arg(all_arg()).arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(Command::new("suppress").arg(id_arg("Transaction id")))
                .subcommand(Command::new("unsuppress").arg(id_arg("Transaction id")))
                .subcommand(Command::new("rm").arg(id_arg("Transaction id"))),
        )
        .subcommand(json_args(
            Command::new("stats")
                .about("Lifetime, 30/60-day and current-month totals")
                .arg(today_arg()),
        ))
        .subcommand(json_args(
            Command::new("dashboard")
                .about("Headline figures and recent activity")
                .arg(today_arg()),
        ))
        .subcommand(json_args(
            Command::new("sidebar")
                .about("Lifetime, 60-day and 30-day profit summary")
                .arg(today_arg()),
        ))
        .subcommand(
            Command::new("backup")
                .about("Copy, list and restore the data file")
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("create").arg(Arg::new("label").long("label")))
                .subcommand(
                    Command::new("restore").arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Key/value settings")
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("get").arg(Arg::new("key").long("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true))
                        .arg(Arg::new("description").long("description")),
                ),
        )
        .subcommand(Command::new("doctor").about("Row counts and data consistency checks"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn global_db_flag_reaches_subcommands() {
        let m = build_cli().get_matches_from(["repairledger", "tx", "list", "--db", "/tmp/x.sqlite"]);
        assert_eq!(
            m.get_one::<std::path::PathBuf>("db").unwrap(),
            &std::path::PathBuf::from("/tmp/x.sqlite")
        );
    }
}
