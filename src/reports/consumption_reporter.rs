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
use crate::ledger::aggregate::RowKind;
use crate::ledger::Ledger;
use crate::reports::table::{money, quantity, Table};

/// Prints the row-labeled consumption report: category header rows,
/// one data row per (client, product) pair, and the grand total.
pub struct ConsumptionReporter<'a> {
	ledger: &'a Ledger,
}

impl<'a> ConsumptionReporter<'a> {
	pub fn new(ledger: &'a Ledger) -> Self {
		Self { ledger }
	}

	pub fn print(&self) {
		let mut table = Table::new(5);
		table.add_header(vec![
			"Client",
			"Product",
			"Qty",
			"Client Amt",
			"Subsidized Amt",
		]);
		table.right_align(vec![2, 3, 4]);
		table.add_separator();

		for row in &self.ledger.consumption {
			match row.kind {
				RowKind::Header => {
					table.add_row(vec![
						format!("[{}]", row.category),
						String::new(),
						String::new(),
						String::new(),
						String::new(),
					]);
				},
				RowKind::Placeholder => {
					table.add_row(vec![
						format!("[{}]", row.category),
						"-".to_string(),
						quantity(0.0),
						money(0.0),
						money(0.0),
					]);
				},
				RowKind::Data => {
					table.add_row(vec![
						format!("  {}", row.client),
						row.product.clone(),
						quantity(row.quantity),
						money(row.client_amount),
						money(row.subsidized_amount),
					]);
				},
				RowKind::GrandTotal => {
					table.add_separator();
					table.add_row(vec![
						row.category.clone(),
						String::new(),
						quantity(row.quantity),
						money(row.client_amount),
						money(row.subsidized_amount),
					]);
				},
			}
		}

		table.print();
	}
}
