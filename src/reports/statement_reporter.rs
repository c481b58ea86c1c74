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
use crate::ledger::Ledger;
use crate::rating::engine::RatedTransaction;
use crate::reports::table::{money, quantity, Table};

/// Prints one statement per client: their subsidized and non-subsidized
/// activity, what they owe, and what their sponsor owes for them.
pub struct StatementReporter<'a> {
	ledger: &'a Ledger,
}

impl<'a> StatementReporter<'a> {
	pub fn new(ledger: &'a Ledger) -> Self {
		Self { ledger }
	}

	pub fn print(&self) {
		if self.ledger.statements.is_empty() {
			println!("No transactions");
			return;
		}

		for statement in self.ledger.statements.values() {
			println!();
			println!("{}", statement.client_label);

			let mut table = Table::new(6);
			table.add_header(vec![
				"Date",
				"Product",
				"Qty",
				"Credit",
				"Association",
				"",
			]);
			table.right_align(vec![2, 3, 4]);
			table.add_separator();

			for txn in &statement.subsidized {
				StatementReporter::add_line(&mut table, txn, "subsidized");
			}
			for txn in &statement.non_subsidized {
				StatementReporter::add_line(&mut table, txn, "");
			}

			table.print();

			println!(
				"  owes {}, sponsor owes {}",
				money(statement.total_credit),
				money(statement.total_association)
			);
		}
	}

	fn add_line(table: &mut Table, txn: &RatedTransaction, tag: &str) {
		let q = txn.txn.quantity;
		table.add_row(vec![
			txn.txn.ordered_at.format("%Y-%m-%d").to_string(),
			txn.txn.product.clone(),
			quantity(q),
			money(txn.client_credit * q),
			money(txn.association_account * q),
			tag.to_string(),
		]);
	}
}
