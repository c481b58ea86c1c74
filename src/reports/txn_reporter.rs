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
use crate::rating::engine::RatedTransaction;
use crate::reports::table::{money, quantity, Table};

/// Prints the deduplicated rated-transaction table, the flat form every
/// other report is derived from.
pub struct TxnReporter {
	txns: Vec<RatedTransaction>,
}

impl TxnReporter {
	pub fn new(txns: Vec<RatedTransaction>) -> Self {
		Self { txns }
	}

	pub fn print(&self) {
		if self.txns.is_empty() {
			println!("No transactions");
			return;
		}

		let mut table = Table::new(11);
		table.add_header(vec![
			"Date",
			"Name",
			"Category",
			"Product",
			"Qty",
			"Total",
			"Subsidy",
			"Payment",
			"Tax",
			"Commission",
			"Cost Center",
		]);
		table.right_align(vec![4, 5, 6, 7, 8, 9]);
		table.add_separator();

		for t in &self.txns {
			let q = t.txn.quantity;
			table.add_row(vec![
				t.txn.ordered_at.format("%Y-%m-%d").to_string(),
				t.txn.display_name.clone(),
				t.txn.category.clone(),
				t.txn.product.clone(),
				quantity(q),
				money(t.total * q),
				money(t.subsidy * q),
				money(t.employee_payment * q),
				money(t.tax * q),
				money(t.commission * q),
				t.txn.cost_center.clone(),
			]);
		}

		table.print();
	}
}
