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
use crate::config::config_file::Config;
use crate::rating::rules::RuleSet;
use anyhow::Error;
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_SUBSIDIZED_PRODUCT: &str = "Almuerzo Ejecutivo Aseavna";
pub const DEFAULT_CLIENT_LABEL_PREFIX: &str = "ASEAVNA ";

/// Bucket for any category without a cost center mapping.
pub const OTHER_COST_CENTER: &str = "CostCenter_Other";

/// Everything that affects rating, resolved from the config file plus
/// built-in defaults. Owned by the caller for the life of a computation
/// run; recomputation on changed settings is the Session's concern.
/// Serializable so the Session can fingerprint it whole.
#[derive(Clone, Debug, Serialize)]
pub struct Settings {
	/// Flat tax rate percentage. Non-finite or negative values from
	/// config resolve to 0 (no tax).
	pub tax_rate: f64,

	pub subsidized_product: String,
	pub client_label_prefix: String,

	/// Categories the consumption report must show even with no
	/// activity in the period.
	pub expected_categories: Vec<String>,

	pub rules: RuleSet,

	cost_centers: BTreeMap<String, String>,
}

impl Settings {
	/// Resolves a parsed config into usable settings. The tax override,
	/// if present, beats the config file (it is the one input operators
	/// change between runs).
	pub fn resolve(
		config: &Config,
		tax_override: Option<f64>,
	) -> Result<Self, Error> {
		let engine = config.engine.as_ref();

		let tax_rate = tax_override
			.or(engine.and_then(|e| e.tax_rate))
			.filter(|r| r.is_finite() && *r >= 0.0)
			.unwrap_or(0.0);

		let rules = match &config.rules {
			Some(entries) => RuleSet::from_entries(entries)?,
			None => RuleSet::builtin(),
		};

		let expected_categories = engine
			.and_then(|e| e.expected_categories.clone())
			.unwrap_or_else(|| rules.categories());

		let cost_centers = config
			.cost_centers
			.clone()
			.unwrap_or_else(Settings::builtin_cost_centers);

		Ok(Self {
			tax_rate,
			subsidized_product: engine
				.and_then(|e| e.subsidized_product.clone())
				.unwrap_or_else(|| DEFAULT_SUBSIDIZED_PRODUCT.to_string()),
			client_label_prefix: engine
				.and_then(|e| e.client_label_prefix.clone())
				.unwrap_or_else(|| DEFAULT_CLIENT_LABEL_PREFIX.to_string()),
			expected_categories,
			rules,
			cost_centers,
		})
	}

	pub fn default_settings() -> Self {
		Settings::resolve(&Config::default(), None)
			.expect("builtin settings are valid")
	}

	/// Cost center tag for a category; unmapped categories land in the
	/// catch-all bucket.
	pub fn cost_center(&self, category: &str) -> String {
		self.cost_centers
			.get(category)
			.cloned()
			.unwrap_or_else(|| OTHER_COST_CENTER.to_string())
	}

	fn builtin_cost_centers() -> BTreeMap<String, String> {
		[
			("BEN1_70", "CostCenter_BEN1"),
			("BEN2_62", "CostCenter_BEN2"),
			("AVNA VISITAS", "CostCenter_Visitante"),
			("Contratista/Visitante", "CostCenter_Visitante"),
			("AVNA GB", "CostCenter_AVNA"),
			("AVNA ONBOARDING", "CostCenter_AVNA"),
			("Practicante", "CostCenter_Practicante"),
		]
		.into_iter()
		.map(|(k, v)| (k.to_string(), v.to_string()))
		.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::config_file::Engine;

	#[test]
	fn test_defaults() {
		let settings = Settings::default_settings();
		assert_eq!(settings.tax_rate, 0.0);
		assert_eq!(settings.subsidized_product, DEFAULT_SUBSIDIZED_PRODUCT);
		assert_eq!(settings.cost_center("BEN1_70"), "CostCenter_BEN1");
		assert_eq!(settings.cost_center("Sindicato"), OTHER_COST_CENTER);
		assert!(settings
			.expected_categories
			.contains(&"BEN2_62".to_string()));
	}

	#[test]
	fn test_tax_override_beats_config() {
		let config = Config {
			engine: Some(Engine {
				tax_rate: Some(13.0),
				..Default::default()
			}),
			..Default::default()
		};

		let settings = Settings::resolve(&config, Some(0.0)).unwrap();
		assert_eq!(settings.tax_rate, 0.0);

		let settings = Settings::resolve(&config, None).unwrap();
		assert_eq!(settings.tax_rate, 13.0);
	}

	#[test]
	fn test_bad_tax_rate_resolves_to_zero() {
		let config = Config {
			engine: Some(Engine {
				tax_rate: Some(f64::NAN),
				..Default::default()
			}),
			..Default::default()
		};

		let settings = Settings::resolve(&config, None).unwrap();
		assert_eq!(settings.tax_rate, 0.0);

		let settings = Settings::resolve(&config, Some(-13.0)).unwrap();
		assert_eq!(settings.tax_rate, 0.0);
	}
}
