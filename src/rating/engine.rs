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
use crate::rating::classify::ClassifiedTransaction;
use crate::rating::rules::{
	Commission, RuleSet, NON_SUBSIDIZED_COMMISSION_RATE,
};
use serde::Serialize;

/// The terminal per-line state: a classified transaction with its full
/// monetary breakdown attached. All monetary fields are per-unit
/// amounts; the aggregator scales by quantity exactly once.
///
/// Per line: base_price + tax == total. Subsidized lines with a rule
/// additionally hold subsidy + employee_payment == total (the rule's
/// list price, which overrides whatever the POS recorded).
#[derive(Clone, Debug, Serialize)]
pub struct RatedTransaction {
	pub txn: ClassifiedTransaction,

	/// Unit total after any rule override
	pub total: f64,

	pub base_price: f64,
	pub tax: f64,
	pub subsidy: f64,
	pub employee_payment: f64,

	/// Pre-tax equivalent of the employee payment
	pub employee_payment_base: f64,

	pub commission: f64,

	/// What the buyer's ledger is debited: equal to employee_payment
	pub client_credit: f64,

	/// What the sponsoring association is credited: equal to subsidy
	pub association_account: f64,
}

/// Applies the subsidy/commission/tax rule for the transaction's
/// (category, product) pair. Total function: every branch produces a
/// fully populated record, and a category without a rule simply gets
/// the non-subsidized commission treatment.
pub fn rate(
	txn: ClassifiedTransaction,
	rules: &RuleSet,
	tax_rate_percent: f64,
) -> RatedTransaction {
	let f = tax_factor(tax_rate_percent);

	let rule = if txn.is_subsidized {
		rules.lookup(&txn.category)
	} else {
		None
	};

	let (total, subsidy, employee_payment, commission) = match rule {
		Some(rule) => {
			// The rule's list price overrides the recorded total
			let total = rule.list_price();
			(
				total,
				rule.subsidy,
				rule.employee_payment,
				rule.commission.on(total),
			)
		},
		None => (
			txn.unit_total,
			0.0,
			txn.unit_total,
			Commission::Percent(NON_SUBSIDIZED_COMMISSION_RATE)
				.on(txn.unit_total),
		),
	};

	let base_price = total / f;

	RatedTransaction {
		txn,
		total,
		base_price,
		tax: total - base_price,
		subsidy,
		employee_payment,
		employee_payment_base: employee_payment / f,
		commission,
		client_credit: employee_payment,
		association_account: subsidy,
	}
}

/// A missing or malformed tax rate means no tax.
fn tax_factor(tax_rate_percent: f64) -> f64 {
	if tax_rate_percent.is_finite() && tax_rate_percent > 0.0 {
		1.0 + tax_rate_percent / 100.0
	} else {
		1.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::settings::Settings;
	use crate::parsing::tables::{RosterRow, SalesRow};
	use crate::rating::classify::Classifier;
	use crate::roster::directory::ContactDirectory;

	const TOLERANCE: f64 = 1e-6;

	fn classified(
		client: &str,
		product: &str,
		total: &str,
	) -> ClassifiedTransaction {
		let settings = Settings::default_settings();
		let classifier = Classifier::new(&settings);
		let directory = ContactDirectory::build(&[RosterRow {
			name: "Juan Pérez".to_string(),
			national_id: "102340567".to_string(),
			position: "Analista".to_string(),
			category: "BEN1_70".to_string(),
		}]);

		classifier
			.classify(
				&SalesRow {
					client: client.to_string(),
					ordered_at: "2025-04-01 12:05:00".to_string(),
					order_id: "S0001".to_string(),
					quantity: "1".to_string(),
					total: total.to_string(),
					product: product.to_string(),
					..Default::default()
				},
				&directory,
			)
			.unwrap()
	}

	#[test]
	fn test_subsidized_ben1_with_tax() {
		let txn = classified(
			"ASEAVNA BEN1_70, Juan Pérez",
			"Almuerzo Ejecutivo Aseavna",
			"3100",
		);
		let rated = rate(txn, &RuleSet::builtin(), 13.0);

		assert_eq!(rated.total, 3100.0);
		assert_eq!(rated.subsidy, 2100.0);
		assert_eq!(rated.employee_payment, 1000.0);
		assert_eq!(rated.commission, 155.0);

		assert!((rated.base_price - 3100.0 / 1.13).abs() < TOLERANCE);
		assert!((rated.base_price + rated.tax - 3100.0).abs() < TOLERANCE);
		assert!(
			(rated.employee_payment_base - 1000.0 / 1.13).abs() < TOLERANCE
		);

		assert_eq!(rated.client_credit, rated.employee_payment);
		assert_eq!(rated.association_account, rated.subsidy);
	}

	#[test]
	fn test_rule_overrides_recorded_total() {
		// POS recorded 2800 but the BEN1 list price is 3100
		let txn = classified(
			"ASEAVNA BEN1_70, Juan Pérez",
			"Almuerzo Ejecutivo Aseavna",
			"2800",
		);
		let rated = rate(txn, &RuleSet::builtin(), 13.0);

		assert_eq!(rated.total, 3100.0);
		assert_eq!(rated.subsidy + rated.employee_payment, rated.total);
	}

	#[test]
	fn test_non_subsidized_product() {
		let txn = classified(
			"ASEAVNA BEN1_70, Juan Pérez",
			"Coca-Cola Regular 600mL",
			"600",
		);
		let rated = rate(txn, &RuleSet::builtin(), 0.0);

		assert_eq!(rated.subsidy, 0.0);
		assert_eq!(rated.employee_payment, 600.0);
		assert!((rated.commission - 30.0).abs() < TOLERANCE);
		assert_eq!(rated.tax, 0.0);
		assert_eq!(rated.base_price, 600.0);
	}

	#[test]
	fn test_subsidized_product_without_rule() {
		// beneficiary token the rule table doesn't know
		let txn = classified(
			"ASEAVNA BEN9_99, Carmen Rojas",
			"Almuerzo Ejecutivo Aseavna",
			"3100",
		);
		let rated = rate(txn, &RuleSet::builtin(), 13.0);

		assert_eq!(rated.subsidy, 0.0);
		assert_eq!(rated.employee_payment, 3100.0);
		assert!((rated.commission - 155.0).abs() < TOLERANCE); // 5% of 3100
		assert!((rated.base_price * 1.13 - 3100.0).abs() < TOLERANCE);
	}

	#[test]
	fn test_sponsored_category_full_subsidy() {
		let txn = classified(
			"ASEAVNA Practicante, Carmen Rojas",
			"Almuerzo Ejecutivo Aseavna",
			"3100",
		);
		let rated = rate(txn, &RuleSet::builtin(), 13.0);

		assert_eq!(rated.subsidy, 3100.0);
		assert_eq!(rated.employee_payment, 0.0);
		assert_eq!(rated.commission, 0.0);
		assert_eq!(rated.client_credit, 0.0);
		assert_eq!(rated.association_account, 3100.0);
	}

	#[test]
	fn test_malformed_tax_rate_means_no_tax() {
		for bad in [f64::NAN, f64::INFINITY, -13.0] {
			let txn = classified(
				"ASEAVNA BEN1_70, Juan Pérez",
				"Coca-Cola Regular 600mL",
				"600",
			);
			let rated = rate(txn, &RuleSet::builtin(), bad);
			assert_eq!(rated.tax, 0.0);
			assert_eq!(rated.base_price, 600.0);
		}
	}

	#[test]
	fn test_tax_split_reconstructs_total() {
		for rate_pct in [0.0, 1.0, 13.0] {
			let txn = classified(
				"ASEAVNA BEN2_62, Carmen Rojas",
				"Almuerzo Ejecutivo Aseavna",
				"3100",
			);
			let rated = rate(txn, &RuleSet::builtin(), rate_pct);
			assert!(
				(rated.base_price * (1.0 + rate_pct / 100.0) - rated.total)
					.abs() < TOLERANCE
			);
		}
	}
}
