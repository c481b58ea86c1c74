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
use crate::config::config_file::RuleEntry;
use anyhow::{bail, Error};
use serde::Serialize;
use std::collections::BTreeMap;

/// Commission rate applied to every purchase outside the subsidized
/// product, as a percentage of the transaction total.
pub const NON_SUBSIDIZED_COMMISSION_RATE: f64 = 5.0;

/// Fixed association fee on a subsidized lunch, in currency units.
const DEFAULT_LUNCH_FEE: f64 = 155.0;

/// A commission is either a fixed fee per transaction (how the
/// association charges on subsidized lunches) or a percentage of the
/// total (how it charges on everything else). The two are deliberately
/// kept as distinct kinds rather than converting one into the other.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Commission {
	Flat(f64),
	Percent(f64),
}

impl Commission {
	/// The commission owed on a transaction of the given total.
	pub fn on(&self, total: f64) -> f64 {
		match self {
			Commission::Flat(fee) => *fee,
			Commission::Percent(rate) => total * rate / 100.0,
		}
	}
}

/// The subsidy split for one beneficiary category buying the subsidized
/// product. The category's list price is implied: it is always
/// subsidy + employee_payment, and overrides whatever total the
/// point of sale recorded for the line.
#[derive(Clone, Debug, Serialize)]
pub struct CategoryRule {
	pub subsidy: f64,
	pub employee_payment: f64,
	pub commission: Commission,
}

impl CategoryRule {
	pub fn list_price(&self) -> f64 {
		self.subsidy + self.employee_payment
	}
}

/// category -> rule. Categories absent from the set fall through to the
/// non-subsidized commission treatment even on the subsidized product.
#[derive(Clone, Debug, Serialize)]
pub struct RuleSet {
	rules: BTreeMap<String, CategoryRule>,
}

impl RuleSet {
	/// The rules the association actually runs on, used whenever the
	/// config file does not supply a [rules] table. BEN1/BEN2 are the
	/// beneficiary tiers; the rest are fully sponsored lunches.
	pub fn builtin() -> Self {
		let fee = Commission::Flat(DEFAULT_LUNCH_FEE);
		let mut rules = BTreeMap::new();

		rules.insert("BEN1_70".to_string(), CategoryRule {
			subsidy: 2100.0,
			employee_payment: 1000.0,
			commission: fee,
		});
		rules.insert("BEN2_62".to_string(), CategoryRule {
			subsidy: 1800.0,
			employee_payment: 1300.0,
			commission: fee,
		});

		for sponsored in [
			"AVNA VISITAS",
			"Contratista/Visitante",
			"AVNA GB",
			"AVNA ONBOARDING",
			"Practicante",
		] {
			rules.insert(sponsored.to_string(), CategoryRule {
				subsidy: 3100.0,
				employee_payment: 0.0,
				commission: Commission::Flat(0.0),
			});
		}

		Self { rules }
	}

	/// Builds a rule set from config entries, replacing the builtin set
	/// entirely. An entry carrying both commission kinds is rejected.
	pub fn from_entries(
		entries: &BTreeMap<String, RuleEntry>,
	) -> Result<Self, Error> {
		let mut rules = BTreeMap::new();

		for (category, entry) in entries {
			let commission = match (entry.commission, entry.commission_rate) {
				(Some(_), Some(_)) => bail!(
					"Rule for {} sets both commission and commission_rate",
					category
				),
				(Some(fee), None) => Commission::Flat(fee),
				(None, Some(rate)) => Commission::Percent(rate),
				(None, None) => Commission::Flat(0.0),
			};

			rules.insert(category.clone(), CategoryRule {
				subsidy: entry.subsidy,
				employee_payment: entry.employee_payment,
				commission,
			});
		}

		Ok(Self { rules })
	}

	pub fn lookup(&self, category: &str) -> Option<&CategoryRule> {
		self.rules.get(category)
	}

	/// Categories with a rule, in sorted order.
	pub fn categories(&self) -> Vec<String> {
		self.rules.keys().cloned().collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builtin_tiers() {
		let rules = RuleSet::builtin();

		let ben1 = rules.lookup("BEN1_70").unwrap();
		assert_eq!(ben1.subsidy, 2100.0);
		assert_eq!(ben1.employee_payment, 1000.0);
		assert_eq!(ben1.list_price(), 3100.0);
		assert_eq!(ben1.commission, Commission::Flat(155.0));

		let ben2 = rules.lookup("BEN2_62").unwrap();
		assert_eq!(ben2.subsidy, 1800.0);
		assert_eq!(ben2.list_price(), 3100.0);

		assert!(rules.lookup("Desconocido").is_none());
	}

	#[test]
	fn test_builtin_sponsored_categories() {
		let rules = RuleSet::builtin();

		for category in ["AVNA VISITAS", "Practicante", "AVNA GB"] {
			let rule = rules.lookup(category).unwrap();
			assert_eq!(rule.employee_payment, 0.0);
			assert_eq!(rule.subsidy, 3100.0);
			assert_eq!(rule.commission.on(rule.list_price()), 0.0);
		}
	}

	#[test]
	fn test_commission_kinds() {
		assert_eq!(Commission::Flat(155.0).on(3100.0), 155.0);
		assert!(
			(Commission::Percent(5.0).on(600.0) - 30.0).abs() < 1e-9
		);
	}

	#[test]
	fn test_from_entries() {
		let mut entries = BTreeMap::new();
		entries.insert("BEN3_50".to_string(), RuleEntry {
			subsidy: 1550.0,
			employee_payment: 1550.0,
			commission: None,
			commission_rate: Some(5.0),
		});

		let rules = RuleSet::from_entries(&entries).unwrap();
		let rule = rules.lookup("BEN3_50").unwrap();
		assert_eq!(rule.list_price(), 3100.0);
		assert_eq!(rule.commission, Commission::Percent(5.0));

		// replaces, not merges
		assert!(rules.lookup("BEN1_70").is_none());
	}

	#[test]
	fn test_from_entries_rejects_double_commission() {
		let mut entries = BTreeMap::new();
		entries.insert("BEN1_70".to_string(), RuleEntry {
			subsidy: 2100.0,
			employee_payment: 1000.0,
			commission: Some(155.0),
			commission_rate: Some(5.0),
		});

		assert!(RuleSet::from_entries(&entries).is_err());
	}
}
