// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn json_args(cmd: Command) -> Command {
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

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

pub fn build_cli() -> Command {
    Command::new("finpulse")
        .version(crate_version!())
        .about("Personal finance tracker with goals, spending alerts, and a rule-based assistant")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("Use this database file instead of the default data dir"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("deadline").long("deadline").help("YYYY-MM-DD")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("progress")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("notify")
                .about("Notifications raised by spending and goal rules")
                .subcommand(json_args(
                    Command::new("list").arg(
                        Arg::new("unread")
                            .long("unread")
                            .action(ArgAction::SetTrue),
                    ),
                ))
                .subcommand(
                    Command::new("read")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .value_parser(value_parser!(i64))
                                .required_unless_present("all"),
                        )
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("id"),
                        ),
                )
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(Command::new("clear"))
                .subcommand(Command::new("check").about("Evaluate notification rules now")),
        )
        .subcommand(
            Command::new("report")
                .about("Dashboards over all transactions")
                .subcommand(json_args(Command::new("summary")))
                .subcommand(json_args(Command::new("categories")))
                .subcommand(json_args(Command::new("health")))
                .subcommand(json_args(Command::new("plan"))),
        )
        .subcommand(
            Command::new("ask")
                .about("Ask the finance assistant a question")
                .arg(Arg::new("query").required(true).num_args(1..)),
        )
        .subcommand(json_args(
            Command::new("say")
                .about("Run a spoken-style command, e.g. \"spent 500 on groceries\"")
                .arg(Arg::new("utterance").required(true).num_args(1..))
                .arg(
                    Arg::new("dry_run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Show what would be recorded without saving"),
                ),
        ))
        .subcommand(
            Command::new("settings")
                .about("Preferences")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("currency").arg(Arg::new("code").long("code").required(true)),
                )
                .subcommand(
                    Command::new("notify")
                        .arg(Arg::new("budget_alerts").long("budget-alerts").help("on|off"))
                        .arg(Arg::new("goal_reminders").long("goal-reminders").help("on|off"))
                        .arg(Arg::new("weekly_report").long("weekly-report").help("on|off")),
                ),
        )
        .subcommand(
            Command::new("export")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(Command::new("backup").arg(Arg::new("out").long("out").required(true))),
        )
        .subcommand(
            Command::new("import")
                .subcommand(
                    Command::new("transactions").arg(Arg::new("path").long("path").required(true)),
                )
                .subcommand(
                    Command::new("backup").arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("reset").about("Delete all data").arg(
                Arg::new("yes")
                    .long("yes")
                    .action(ArgAction::SetTrue)
                    .help("Confirm deletion"),
            ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
