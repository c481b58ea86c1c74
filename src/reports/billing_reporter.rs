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

/// Prints the category billing breakdown plus the reconciliation
/// figures the association actually invoices from.
pub struct BillingReporter<'a> {
	ledger: &'a Ledger,
}

impl<'a> BillingReporter<'a> {
	pub fn new(ledger: &'a Ledger) -> Self {
		Self { ledger }
	}

	pub fn print(&self) {
		let mut table = Table::new(7);
		table.add_header(vec![
			"Category",
			"Count",
			"Subsidy",
			"Employee",
			"Tax",
			"Commission",
			"Subsidy %",
		]);
		table.right_align(vec![1, 2, 3, 4, 5, 6]);
		table.add_separator();

		for bucket in &self.ledger.billing {
			table.add_row(vec![
				bucket.category.clone(),
				bucket.count.to_string(),
				money(bucket.subsidy),
				money(bucket.employee_payment),
				money(bucket.tax),
				money(bucket.commission),
				format!("{:.1}", bucket.subsidy_pct),
			]);
		}

		table.print();

		println!();
		println!(
			"Bill to AVNA:        {}",
			money(self.ledger.billable_to_avna)
		);
		println!(
			"Bill to association: {}",
			money(self.ledger.billable_to_association)
		);
		println!(
			"Total commission:    {}",
			money(self.ledger.total_commission)
		);

		println!();
		println!("Total revenue: {}", money(self.ledger.total_revenue));
		println!("Total subsidy: {}", money(self.ledger.total_subsidy));
		println!("Total tax:     {}", money(self.ledger.total_tax));
		println!(
			"Transactions:  {} ({} clients)",
			self.ledger.transactions.len(),
			self.ledger.unique_clients
		);

		if !self.ledger.revenue_by_day.is_empty() {
			println!();
			println!("Revenue by day:");
			for (day, revenue) in &self.ledger.revenue_by_day {
				println!("  {}  {}", day, money(*revenue));
			}
		}
	}
}
