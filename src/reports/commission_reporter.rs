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
use crate::reports::table::{money, Table};

/// Prints the non-subsidized commission ledger: the 5% the association
/// takes on everything that isn't the subsidized lunch.
pub struct CommissionReporter<'a> {
	ledger: &'a Ledger,
}

impl<'a> CommissionReporter<'a> {
	pub fn new(ledger: &'a Ledger) -> Self {
		Self { ledger }
	}

	pub fn print(&self) {
		if self.ledger.commissions.is_empty() {
			println!("No non-subsidized transactions");
			return;
		}

		let mut table = Table::new(6);
		table.add_header(vec![
			"Name",
			"Product",
			"Total",
			"Base",
			"Commission",
			"Tax",
		]);
		table.right_align(vec![2, 3, 4, 5]);
		table.add_separator();

		for line in &self.ledger.commissions {
			table.add_row(vec![
				line.display_name.clone(),
				line.product.clone(),
				money(line.total),
				money(line.base_price),
				money(line.commission),
				money(line.tax),
			]);
		}

		table.add_separator();
		table.add_row(vec![
			"Total".to_string(),
			String::new(),
			String::new(),
			String::new(),
			money(self.ledger.non_subsidized_commission),
			String::new(),
		]);

		table.print();
	}
}
