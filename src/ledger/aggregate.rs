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
use crate::rating::engine::RatedTransaction;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Catch-all billing bucket for categories without a subsidy rule.
pub const OTHER_BUCKET: &str = "Otros";

/// Billing rollup for one category bucket. The subsidy, employee
/// payment and tax sums cover subsidized transactions only; commission
/// covers every transaction in the bucket. `count` is the number of
/// subsidized transactions.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CategoryBilling {
	pub category: String,
	pub count: u64,
	pub subsidy: f64,
	pub employee_payment: f64,
	pub tax: f64,
	pub commission: f64,

	/// subsidy / (subsidy + employee_payment), as a percentage;
	/// 0 when the bucket saw no subsidized money at all
	pub subsidy_pct: f64,
}

/// One line of the non-subsidized commission ledger. All amounts are
/// line totals (unit amounts scaled by quantity).
#[derive(Clone, Debug, Serialize)]
pub struct CommissionLine {
	pub client_label: String,
	pub display_name: String,
	pub product: String,
	pub total: f64,
	pub base_price: f64,
	pub commission: f64,
	pub tax: f64,
}

/// Everything one client did in the period, split by subsidy
/// eligibility, with the two running balances the association carries
/// per person.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ClientStatement {
	pub client_label: String,
	pub display_name: String,
	pub subsidized: Vec<RatedTransaction>,
	pub non_subsidized: Vec<RatedTransaction>,

	/// Sum of client credits (what the buyer owes)
	pub total_credit: f64,

	/// Sum of association-account amounts (what the sponsor owes)
	pub total_association: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RowKind {
	Header,
	Data,
	Placeholder,
	GrandTotal,
}

/// One row of the row-labeled consumption report. Header rows carry
/// only the category; placeholder rows stand in for expected categories
/// with no activity; the grand-total row sums all data rows.
#[derive(Clone, Debug, Serialize)]
pub struct ConsumptionRow {
	pub kind: RowKind,
	pub category: String,
	pub client: String,
	pub product: String,
	pub quantity: f64,
	pub client_amount: f64,
	pub subsidized_amount: f64,
}

/// The derived aggregate state of one computation run. Built in a
/// single pass over the rated transactions; never mutated after.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Ledger {
	/// Deduplicated rated transactions, input order preserved
	pub transactions: Vec<RatedTransaction>,

	/// Category billing buckets; rule categories first in sorted
	/// order, the catch-all bucket last
	pub billing: Vec<CategoryBilling>,

	/// Σ subsidy: what the sponsoring company is billed
	pub billable_to_avna: f64,

	/// Σ employee payments + Σ commissions: what flows through the
	/// association's account
	pub billable_to_association: f64,

	/// Σ commission across both partitions
	pub total_commission: f64,

	pub commissions: Vec<CommissionLine>,

	/// Grand total of the non-subsidized commission ledger
	pub non_subsidized_commission: f64,

	/// client label -> statement
	pub statements: BTreeMap<String, ClientStatement>,

	pub consumption: Vec<ConsumptionRow>,

	// summary metrics
	pub total_revenue: f64,
	pub total_subsidy: f64,
	pub total_tax: f64,
	pub unique_clients: usize,
	pub revenue_by_day: BTreeMap<String, f64>,
	pub quantity_by_product: BTreeMap<String, f64>,

	// audit counters
	pub rejected_rows: usize,
	pub deduplicated_rows: usize,
}

impl Ledger {
	/// Deduplicates, groups and totals a batch of rated transactions.
	/// An empty batch produces a well-formed empty ledger.
	pub fn build(
		rated: Vec<RatedTransaction>,
		rejected_rows: usize,
		settings: &Settings,
	) -> Self {
		let mut ledger = Ledger {
			rejected_rows,
			..Default::default()
		};

		ledger.transactions = ledger.deduplicate(rated);
		ledger.tabulate_billing(settings);
		ledger.tabulate_commissions();
		ledger.tabulate_statements();
		ledger.tabulate_consumption(settings);
		ledger.tabulate_summary();

		ledger
	}

	/// A transaction is uniquely identified by (order id, client label,
	/// product); the first occurrence of a key wins, regardless of any
	/// differing quantities on later duplicates.
	fn deduplicate(
		&mut self,
		rated: Vec<RatedTransaction>,
	) -> Vec<RatedTransaction> {
		let mut seen: HashSet<(String, String, String)> = HashSet::new();
		let mut kept = Vec::with_capacity(rated.len());

		for txn in rated {
			let key = (
				txn.txn.order_id.clone(),
				txn.txn.client_label.clone(),
				txn.txn.product.clone(),
			);

			if seen.insert(key) {
				kept.push(txn);
			} else {
				self.deduplicated_rows += 1;
			}
		}

		kept
	}

	fn tabulate_billing(&mut self, settings: &Settings) {
		let mut buckets: BTreeMap<String, CategoryBilling> = BTreeMap::new();

		// seed so expected categories report zeroes rather than vanish
		for category in &settings.expected_categories {
			buckets.insert(category.clone(), CategoryBilling {
				category: category.clone(),
				..Default::default()
			});
		}
		buckets.insert(OTHER_BUCKET.to_string(), CategoryBilling {
			category: OTHER_BUCKET.to_string(),
			..Default::default()
		});

		for txn in &self.transactions {
			let q = txn.txn.quantity;

			let name = if settings.rules.lookup(&txn.txn.category).is_some() {
				txn.txn.category.clone()
			} else {
				OTHER_BUCKET.to_string()
			};

			let bucket =
				buckets.entry(name.clone()).or_insert_with(|| CategoryBilling {
					category: name,
					..Default::default()
				});

			if txn.txn.is_subsidized {
				bucket.count += 1;
				bucket.subsidy += txn.subsidy * q;
				bucket.employee_payment += txn.employee_payment * q;
				bucket.tax += txn.tax * q;
			}
			bucket.commission += txn.commission * q;

			self.billable_to_avna += txn.subsidy * q;
			self.billable_to_association +=
				txn.employee_payment * q + txn.commission * q;
			self.total_commission += txn.commission * q;
		}

		for bucket in buckets.values_mut() {
			let denominator = bucket.subsidy + bucket.employee_payment;
			bucket.subsidy_pct = if denominator == 0.0 {
				0.0
			} else {
				bucket.subsidy / denominator * 100.0
			};
		}

		// catch-all goes last
		let other = buckets.remove(OTHER_BUCKET);
		self.billing = buckets.into_values().collect();
		if let Some(other) = other {
			self.billing.push(other);
		}
	}

	fn tabulate_commissions(&mut self) {
		for txn in &self.transactions {
			if txn.txn.is_subsidized {
				continue;
			}

			let q = txn.txn.quantity;
			self.commissions.push(CommissionLine {
				client_label: txn.txn.client_label.clone(),
				display_name: txn.txn.display_name.clone(),
				product: txn.txn.product.clone(),
				total: txn.total * q,
				base_price: txn.base_price * q,
				commission: txn.commission * q,
				tax: txn.tax * q,
			});
			self.non_subsidized_commission += txn.commission * q;
		}
	}

	fn tabulate_statements(&mut self) {
		for txn in &self.transactions {
			let q = txn.txn.quantity;

			let statement = self
				.statements
				.entry(txn.txn.client_label.clone())
				.or_insert_with(|| ClientStatement {
					client_label: txn.txn.client_label.clone(),
					display_name: txn.txn.display_name.clone(),
					..Default::default()
				});

			statement.total_credit += txn.client_credit * q;
			statement.total_association += txn.association_account * q;

			if txn.txn.is_subsidized {
				statement.subsidized.push(txn.clone());
			} else {
				statement.non_subsidized.push(txn.clone());
			}
		}
	}

	/// Emits the row-labeled report: a header row per category, one
	/// data row per (client, product) pair, zero placeholders for
	/// expected categories that saw nothing, and a grand-total row
	/// equal to the sum of the data rows.
	fn tabulate_consumption(&mut self, settings: &Settings) {
		type Totals = (f64, f64, f64); // quantity, client amt, subsidized amt

		let mut groups: BTreeMap<String, BTreeMap<(String, String), Totals>> =
			BTreeMap::new();

		for txn in &self.transactions {
			let q = txn.txn.quantity;
			let entry = groups
				.entry(txn.txn.category.clone())
				.or_default()
				.entry((
					txn.txn.client_label.clone(),
					txn.txn.product.clone(),
				))
				.or_insert((0.0, 0.0, 0.0));

			entry.0 += q;
			entry.1 += txn.client_credit * q;
			entry.2 += txn.association_account * q;
		}

		let mut grand = (0.0, 0.0, 0.0);

		for (category, clients) in &groups {
			self.consumption.push(ConsumptionRow {
				kind: RowKind::Header,
				category: category.clone(),
				client: String::new(),
				product: String::new(),
				quantity: 0.0,
				client_amount: 0.0,
				subsidized_amount: 0.0,
			});

			for ((client, product), totals) in clients {
				grand.0 += totals.0;
				grand.1 += totals.1;
				grand.2 += totals.2;

				self.consumption.push(ConsumptionRow {
					kind: RowKind::Data,
					category: category.clone(),
					client: client.clone(),
					product: product.clone(),
					quantity: totals.0,
					client_amount: totals.1,
					subsidized_amount: totals.2,
				});
			}
		}

		for category in &settings.expected_categories {
			if groups.contains_key(category) {
				continue;
			}

			self.consumption.push(ConsumptionRow {
				kind: RowKind::Placeholder,
				category: category.clone(),
				client: String::new(),
				product: String::new(),
				quantity: 0.0,
				client_amount: 0.0,
				subsidized_amount: 0.0,
			});
		}

		self.consumption.push(ConsumptionRow {
			kind: RowKind::GrandTotal,
			category: "Total".to_string(),
			client: String::new(),
			product: String::new(),
			quantity: grand.0,
			client_amount: grand.1,
			subsidized_amount: grand.2,
		});
	}

	fn tabulate_summary(&mut self) {
		let mut clients: HashSet<&str> = HashSet::new();

		for txn in &self.transactions {
			let q = txn.txn.quantity;

			self.total_revenue += txn.total * q;
			self.total_subsidy += txn.subsidy * q;
			self.total_tax += txn.tax * q;
			clients.insert(&txn.txn.client_label);

			*self
				.revenue_by_day
				.entry(txn.txn.ordered_at.date().to_string())
				.or_insert(0.0) += txn.total * q;
			*self
				.quantity_by_product
				.entry(txn.txn.product.clone())
				.or_insert(0.0) += q;
		}

		self.unique_clients = clients.len();
	}
}
