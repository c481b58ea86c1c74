/* Copyright © 2024-2025 Adam Train <adam@adamtrain.net>
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
use serde::Deserialize;
use std::collections::BTreeMap;

/// Raw deserialized form of the config file. Every section is optional;
/// anything absent falls back to the built-in defaults when resolved
/// into Settings.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
	pub engine: Option<Engine>,

	/// category -> subsidy rule override
	pub rules: Option<BTreeMap<String, RuleEntry>>,

	/// category -> cost center tag override
	pub cost_centers: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Engine {
	/// Flat tax rate, as a percentage (e.g. 13 for 13%)
	pub tax_rate: Option<f64>,

	/// The one product eligible for category subsidy rules
	pub subsidized_product: Option<String>,

	/// Organizational prefix stripped from the client label's first
	/// segment when no beneficiary token is found in it
	pub client_label_prefix: Option<String>,

	/// Categories that must appear in the consumption report even
	/// with no activity. Defaults to every category with a rule.
	pub expected_categories: Option<Vec<String>>,
}

/// One category's rule as written in the file. At most one of
/// `commission` (a fixed fee per transaction) and `commission_rate`
/// (a percentage of the list price) may be set; neither means no
/// commission on this category.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RuleEntry {
	pub subsidy: f64,
	pub employee_payment: f64,
	pub commission: Option<f64>,
	pub commission_rate: Option<f64>,
}
