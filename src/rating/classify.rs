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
use crate::parsing::tables::SalesRow;
use crate::roster::contact::Contact;
use crate::roster::directory::ContactDirectory;
use crate::roster::normalize::normalize;
use chrono::NaiveDateTime;
use regex::Regex;
use serde::Serialize;

/// The POS emits exactly this; anything else on the date field means
/// the row is not a real sale (held orders, export artifacts).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A sale that survived rejection, tied to a contact and a category,
/// with every numeric field coerced exactly once. Monetary rating
/// happens on the unit total; quantity scaling is the aggregator's job.
#[derive(Clone, Debug, Serialize)]
pub struct ClassifiedTransaction {
	pub client_label: String,
	pub display_name: String,
	pub national_id: String,
	pub position: String,
	pub category: String,
	pub cost_center: String,
	pub company: String,
	pub ordered_at: NaiveDateTime,
	pub order_id: String,
	pub quantity: f64,
	pub unit_price: f64,

	/// Line total divided by quantity
	pub unit_total: f64,
	pub line_total: f64,

	pub product: String,
	pub seller: String,
	pub is_subsidized: bool,
}

/// Turns raw sales rows into classified transactions, or rejects them.
/// Rejection is silent per row; the caller counts the drops.
pub struct Classifier<'a> {
	settings: &'a Settings,
	ben_token: Regex,
}

impl<'a> Classifier<'a> {
	pub fn new(settings: &'a Settings) -> Self {
		Self {
			settings,
			ben_token: Regex::new(r"BEN\d+_\d+").unwrap(),
		}
	}

	/// Returns None when the order date does not parse in the exact POS
	/// format, or the line total is zero or absent. Everything else
	/// produces a transaction, with fallbacks for unknown buyers.
	pub fn classify(
		&self,
		row: &SalesRow,
		directory: &ContactDirectory,
	) -> Option<ClassifiedTransaction> {
		let ordered_at =
			NaiveDateTime::parse_from_str(row.ordered_at.trim(), TIMESTAMP_FORMAT)
				.ok()?;

		let line_total = coerce_number(&row.total);
		if line_total == 0.0 {
			return None;
		}

		let (label_category, label_name) = self.split_client_label(&row.client);

		let contact = match directory.lookup(&normalize(&label_name)) {
			Some(c) => c.clone(),
			None => Contact::placeholder(&label_name, &label_category),
		};

		// The roster's category wins over the label token, except when
		// the roster itself doesn't know it.
		let category = if contact.has_known_category() {
			contact.category
		} else {
			label_category
		};

		let quantity = match coerce_number(&row.quantity) {
			q if q > 0.0 => q,
			_ => 1.0,
		};

		Some(ClassifiedTransaction {
			client_label: row.client.clone(),
			display_name: contact.name,
			national_id: contact.national_id,
			position: contact.position,
			cost_center: self.settings.cost_center(&category),
			category,
			company: row.company.clone(),
			ordered_at,
			order_id: row.order_id.clone(),
			quantity,
			unit_price: coerce_number(&row.unit_price),
			unit_total: line_total / quantity,
			line_total,
			product: row.product.clone(),
			seller: row.seller.clone(),
			is_subsidized: row.product == self.settings.subsidized_product,
		})
	}

	/// The client label is "<category token>, <display name>"; a label
	/// with no separator is both at once. Only the second segment is the
	/// name; anything after a further separator is discarded. The token
	/// is either a beneficiary code (BENn_nn anywhere in the segment) or
	/// the segment itself with the organizational prefix stripped.
	fn split_client_label(&self, label: &str) -> (String, String) {
		let (head, name) = match label.split_once(", ") {
			Some((head, rest)) => {
				(head, rest.split(", ").next().unwrap_or(rest))
			},
			None => (label, label),
		};

		let category = match self.ben_token.find(head) {
			Some(m) => m.as_str().to_string(),
			None => head
				.strip_prefix(self.settings.client_label_prefix.as_str())
				.unwrap_or(head)
				.to_string(),
		};

		(category, name.to_string())
	}
}

fn coerce_number(value: &str) -> f64 {
	value.trim().parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parsing::tables::RosterRow;
	use crate::roster::contact::{UNKNOWN, UNSPECIFIED};

	fn settings() -> Settings {
		Settings::default_settings()
	}

	fn directory() -> ContactDirectory {
		ContactDirectory::build(&[RosterRow {
			name: "Juan Pérez".to_string(),
			national_id: "102340567".to_string(),
			position: "Analista".to_string(),
			category: "BEN1_70".to_string(),
		}])
	}

	fn sale(client: &str, product: &str, total: &str) -> SalesRow {
		SalesRow {
			client: client.to_string(),
			ordered_at: "2025-04-01 12:05:00".to_string(),
			order_id: "S0001".to_string(),
			quantity: "1".to_string(),
			unit_price: total.to_string(),
			total: total.to_string(),
			product: product.to_string(),
			..Default::default()
		}
	}

	#[test]
	fn test_roster_match_overrides_label() {
		let s = settings();
		let classifier = Classifier::new(&s);

		// label says BEN2_62, roster says BEN1_70; name differs in accents
		let txn = classifier
			.classify(
				&sale(
					"ASEAVNA BEN2_62, JUAN PEREZ",
					"Almuerzo Ejecutivo Aseavna",
					"3100",
				),
				&directory(),
			)
			.unwrap();

		assert_eq!(txn.category, "BEN1_70");
		assert_eq!(txn.display_name, "Juan Pérez");
		assert_eq!(txn.national_id, "102340567");
		assert_eq!(txn.cost_center, "CostCenter_BEN1");
		assert!(txn.is_subsidized);
	}

	#[test]
	fn test_unknown_buyer_falls_back_to_label() {
		let s = settings();
		let classifier = Classifier::new(&s);

		let txn = classifier
			.classify(
				&sale(
					"ASEAVNA BEN2_62, Carmen Rojas",
					"Almuerzo Ejecutivo Aseavna",
					"3100",
				),
				&directory(),
			)
			.unwrap();

		assert_eq!(txn.category, "BEN2_62");
		assert_eq!(txn.display_name, "Carmen Rojas");
		assert_eq!(txn.national_id, UNKNOWN);
		assert_eq!(txn.position, UNSPECIFIED);
	}

	#[test]
	fn test_label_without_separator() {
		let s = settings();
		let classifier = Classifier::new(&s);

		let txn = classifier
			.classify(
				&sale("ASEAVNA VISITAS GRECIA", "Coca-Cola", "600"),
				&directory(),
			)
			.unwrap();

		// prefix stripped, whole label is also the display name
		assert_eq!(txn.category, "VISITAS GRECIA");
		assert_eq!(txn.display_name, "ASEAVNA VISITAS GRECIA");
		assert_eq!(txn.cost_center, "CostCenter_Other");
		assert!(!txn.is_subsidized);
	}

	#[test]
	fn test_label_with_extra_separators() {
		let s = settings();
		let classifier = Classifier::new(&s);

		// only the second segment is the name; the trailing one is noise
		let txn = classifier
			.classify(
				&sale(
					"ASEAVNA BEN1_70, Juan, Pérez Jr",
					"Coca-Cola",
					"600",
				),
				&directory(),
			)
			.unwrap();

		assert_eq!(txn.category, "BEN1_70");
		assert_eq!(txn.display_name, "Juan");
	}

	#[test]
	fn test_rejects_bad_date() {
		let s = settings();
		let classifier = Classifier::new(&s);

		let mut row = sale("ASEAVNA BEN1_70, Juan Pérez", "Coca-Cola", "600");
		row.ordered_at = "01/04/2025".to_string();
		assert!(classifier.classify(&row, &directory()).is_none());

		row.ordered_at = "".to_string();
		assert!(classifier.classify(&row, &directory()).is_none());
	}

	#[test]
	fn test_rejects_zero_or_absent_total() {
		let s = settings();
		let classifier = Classifier::new(&s);

		let row = sale("ASEAVNA BEN1_70, Juan Pérez", "Coca-Cola", "0");
		assert!(classifier.classify(&row, &directory()).is_none());

		let row = sale("ASEAVNA BEN1_70, Juan Pérez", "Coca-Cola", "");
		assert!(classifier.classify(&row, &directory()).is_none());
	}

	#[test]
	fn test_quantity_normalization() {
		let s = settings();
		let classifier = Classifier::new(&s);

		let mut row = sale("ASEAVNA BEN1_70, Juan Pérez", "Coca-Cola", "1200");
		row.quantity = "2".to_string();
		let txn = classifier.classify(&row, &directory()).unwrap();
		assert_eq!(txn.quantity, 2.0);
		assert!((txn.unit_total - 600.0).abs() < 1e-9);

		// absent quantity treats the line as one unit
		row.quantity = "".to_string();
		let txn = classifier.classify(&row, &directory()).unwrap();
		assert_eq!(txn.quantity, 1.0);
		assert!((txn.unit_total - 1200.0).abs() < 1e-9);
	}

	#[test]
	fn test_subsidized_product_exact_match_only() {
		let s = settings();
		let classifier = Classifier::new(&s);

		let txn = classifier
			.classify(
				&sale(
					"ASEAVNA BEN1_70, Juan Pérez",
					"Almuerzo Ejecutivo",
					"3100",
				),
				&directory(),
			)
			.unwrap();
		assert!(!txn.is_subsidized);
	}
}
