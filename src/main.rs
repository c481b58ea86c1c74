/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use anyhow::{bail, Error};
use clap::{Parser, ValueEnum};
use comedor::config::loader::get_config;
use comedor::config::settings::Settings;
use comedor::ledger::session::Session;
use comedor::parsing::loader::{load_roster, load_sales};
use comedor::reports::billing_reporter::BillingReporter;
use comedor::reports::commission_reporter::CommissionReporter;
use comedor::reports::consumption_reporter::ConsumptionReporter;
use comedor::reports::statement_reporter::StatementReporter;
use comedor::reports::txn_reporter::TxnReporter;

#[derive(Parser)]
#[command(
	name = "comedor",
	version,
	about = "Cafeteria sales and subsidy ledger tool"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The report to produce
	command: Directive,

	// -----------
	// -- FLAGS --
	// -----------
	/// Point-of-sale export (CSV)
	#[arg(short, long)]
	sales: String,

	/// Contact roster (CSV)
	#[arg(short, long)]
	roster: String,

	/// Flat tax rate percentage; overrides the config file
	#[arg(short, long)]
	tax: Option<f64>,

	/// Custom config file location (default: ~/.config/comedor/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Emit the report as JSON instead of a text table
	#[arg(long)]
	json: bool,
}

impl Cli {
	/// Nobody's sales tax is this high; above it, the value is almost
	/// certainly a fat-fingered absolute amount
	const MAX_TAX_RATE: f64 = 100.0;

	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if let Some(tax) = self.tax {
			if !tax.is_finite() || !(0.0..=Cli::MAX_TAX_RATE).contains(&tax) {
				bail!("Tax rate must be between 0 and {}", Cli::MAX_TAX_RATE);
			}
		}

		Ok(())
	}
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Txns,        // deduplicated rated-transaction table
	Billing,     // category billing breakdown + reconciliation
	Commissions, // non-subsidized commission ledger
	Statements,  // per-client statements
	Consumption, // row-labeled consumption report

	Check, // run the pipeline and report row counts only
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	args.validate()?;

	let config = get_config(args.config.as_ref())?;
	let settings = Settings::resolve(&config, args.tax)?;

	let sales = load_sales(&args.sales)?;
	let roster = load_roster(&args.roster)?;

	let mut session = Session::new();
	let ledger = session.ledger(&sales, &roster, &settings)?;

	match args.command {
		Directive::Txns => {
			if args.json {
				print_json(&ledger.transactions)?;
			} else {
				TxnReporter::new(ledger.transactions.clone()).print();
			}
		},
		Directive::Billing => {
			if args.json {
				print_json(&ledger)?;
			} else {
				BillingReporter::new(ledger).print();
			}
		},
		Directive::Commissions => {
			if args.json {
				print_json(&ledger.commissions)?;
			} else {
				CommissionReporter::new(ledger).print();
			}
		},
		Directive::Statements => {
			if args.json {
				print_json(&ledger.statements)?;
			} else {
				StatementReporter::new(ledger).print();
			}
		},
		Directive::Consumption => {
			if args.json {
				print_json(&ledger.consumption)?;
			} else {
				ConsumptionReporter::new(ledger).print();
			}
		},
		Directive::Check => {
			println!("{} rows read", sales.len());
			println!("{} rows rejected", ledger.rejected_rows);
			println!("{} duplicates collapsed", ledger.deduplicated_rows);
			println!("{} transactions rated", ledger.transactions.len());
		},
	}

	Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Error> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}
