// Copyright (c) 2025 Caja contributors.
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
            .help("Print as a JSON array"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("caja")
        .about("Back-office bookkeeping: expenses, sales income, suppliers")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the database if missing"))
        .subcommand(
            Command::new("expense")
                .about("Expense records")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("type").long("type").required(true).help("Expense type code, e.g. MKT"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("obs").long("obs").help("Observations"))
                        .arg(
                            Arg::new("fixed")
                                .long("fixed")
                                .action(ArgAction::SetTrue)
                                .help("Mark as a fixed (recurring) expense"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("type").long("type").help("Expense type code"))
                        .arg(Arg::new("search").long("search").help("Substring of observations"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("expense-type")
                .about("Expense type lookup table")
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("code").long("code").required(true))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("rename")
                        .arg(Arg::new("code").long("code").required(true))
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("income")
                .about("Sales income records")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("order-number").long("order-number").required(true))
                        .arg(Arg::new("order-id").long("order-id").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("buyer").long("buyer").required(true))
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("subtotal").long("subtotal").required(true))
                        .arg(Arg::new("discount").long("discount"))
                        .arg(Arg::new("shipping-cost").long("shipping-cost"))
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("product").long("product"))
                        .arg(
                            Arg::new("quantity")
                                .long("quantity")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("seller").long("seller"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("status").long("status"))
                        .arg(Arg::new("payment-status").long("payment-status"))
                        .arg(Arg::new("shipping-status").long("shipping-status"))
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .help("Order number, buyer name or email substring"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("show")
                        .arg(Arg::new("order").required(true).help("Order number or order id")),
                ),
        )
        .subcommand(
            Command::new("supplier")
                .about("Supplier master data")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("business-name").long("business-name").required(true))
                        .arg(Arg::new("commercial-name").long("commercial-name"))
                        .arg(Arg::new("tax-id").long("tax-id").required(true))
                        .arg(Arg::new("contact").long("contact"))
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("phone").long("phone"))
                        .arg(Arg::new("address").long("address"))
                        .arg(Arg::new("city").long("city"))
                        .arg(Arg::new("country").long("country"))
                        .arg(Arg::new("bank").long("bank"))
                        .arg(Arg::new("cbu-alias").long("cbu-alias"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(
                            Arg::new("active")
                                .long("active")
                                .action(ArgAction::SetTrue)
                                .help("Only active suppliers"),
                        )
                        .arg(
                            Arg::new("inactive")
                                .long("inactive")
                                .action(ArgAction::SetTrue)
                                .help("Only inactive suppliers"),
                        )
                        .arg(Arg::new("country").long("country"))
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .help("Name, tax id, contact or email substring"),
                        ),
                ))
                .subcommand(
                    Command::new("activate")
                        .arg(Arg::new("tax-id").long("tax-id").required(true)),
                )
                .subcommand(
                    Command::new("deactivate")
                        .arg(Arg::new("tax-id").long("tax-id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report").about("Aggregate reports").subcommand(json_flags(
                Command::new("summary")
                    .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                    .arg(Arg::new("to").long("to").help("YYYY-MM-DD"))
                    .arg(Arg::new("type").long("type").help("Expense type code"))
                    .arg(Arg::new("search").long("search").help("Substring of observations")),
            )),
        )
        .subcommand(
            Command::new("import").about("File imports").subcommand(
                Command::new("sales")
                    .about("Import the store's sales CSV export (Windows-1252)")
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("sync")
                .about("Store API imports")
                .subcommand(
                    Command::new("orders")
                        .arg(
                            Arg::new("days")
                                .long("days")
                                .value_parser(value_parser!(i64))
                                .help("Import orders created in the last N days (default 30)"),
                        )
                        .arg(Arg::new("status").long("status").help("Vendor order status filter")),
                )
                .subcommand(
                    Command::new("products")
                        .arg(
                            Arg::new("page")
                                .long("page")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(
                            Arg::new("per-page")
                                .long("per-page")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("updated-since").long("updated-since").help("YYYY-MM-DD")),
                ),
        )
        .subcommand(
            Command::new("migrate")
                .about("One-off data migrations")
                .subcommand(
                    Command::new("expense-types")
                        .about("Normalize inline expense type codes into the lookup table"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Operator configuration")
                .subcommand(
                    Command::new("set-threshold")
                        .arg(Arg::new("amount").required(true).help("Red/green cutoff for expense amounts")),
                )
                .subcommand(
                    Command::new("set-store")
                        .arg(Arg::new("store-id").long("store-id").required(true))
                        .arg(Arg::new("token").long("token").required(true))
                        .arg(Arg::new("base-url").long("base-url")),
                )
                .subcommand(Command::new("show")),
        )
        .subcommand(
            Command::new("export")
                .about("Export records for the accountant")
                .subcommand(
                    Command::new("expenses")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("incomes")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Data integrity checks"))
}
