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
use crate::config::settings::Settings;
use crate::parsing::tables::{RosterRow, SalesRow};
use crate::rating::classify::Classifier;
use crate::rating::engine::rate;
use crate::roster::directory::ContactDirectory;

pub mod aggregate;
pub mod session;

pub use aggregate::Ledger;

/// Runs the whole batch pipeline: build the contact directory, classify
/// and rate every sales row, then aggregate. Schema problems are caught
/// at CSV load, before this point; here every bad row has a fallback,
/// so the computation itself cannot fail.
pub fn compute(
	sales: &[SalesRow],
	roster: &[RosterRow],
	settings: &Settings,
) -> Ledger {
	let directory = ContactDirectory::build(roster);
	let classifier = Classifier::new(settings);

	let mut rated = Vec::with_capacity(sales.len());
	let mut rejected = 0usize;

	for row in sales {
		match classifier.classify(row, &directory) {
			Some(txn) => {
				rated.push(rate(txn, &settings.rules, settings.tax_rate))
			},
			None => rejected += 1,
		}
	}

	Ledger::build(rated, rejected, settings)
}
