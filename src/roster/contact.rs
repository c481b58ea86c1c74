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
use crate::parsing::tables::RosterRow;
use crate::roster::normalize::normalize;
use serde::Serialize;

/// Sentinel for a missing national id or beneficiary category. These
/// are the literal strings the association's spreadsheets use, so they
/// survive into reports verbatim.
pub const UNKNOWN: &str = "Desconocido";

/// Sentinel for a missing position/title.
pub const UNSPECIFIED: &str = "No especificado";

/// One roster entry. Missing fields are resolved to sentinels here, at
/// build time, and never re-checked downstream. Immutable once built.
#[derive(Clone, Debug, Serialize)]
pub struct Contact {
	pub name: String,
	pub national_id: String,
	pub position: String,
	pub category: String,

	/// Pure function of `name`; the directory key.
	pub normalized_name: String,
}

impl Contact {
	pub fn from_row(row: &RosterRow) -> Self {
		let name = row.name.trim().to_string();
		Self {
			normalized_name: normalize(&name),
			name,
			national_id: or_sentinel(&row.national_id, UNKNOWN),
			position: or_sentinel(&row.position, UNSPECIFIED),
			category: or_sentinel(&row.category, UNKNOWN),
		}
	}

	/// Stand-in for a buyer with no roster match, carrying whatever the
	/// client label itself told us.
	pub fn placeholder(name: &str, category: &str) -> Self {
		Self {
			name: name.to_string(),
			national_id: UNKNOWN.to_string(),
			position: UNSPECIFIED.to_string(),
			category: category.to_string(),
			normalized_name: normalize(name),
		}
	}

	/// False for placeholder contacts and roster rows with a blank
	/// category; those must not override a label-parsed category.
	pub fn has_known_category(&self) -> bool {
		self.category != UNKNOWN
	}
}

fn or_sentinel(value: &str, sentinel: &str) -> String {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		sentinel.to_string()
	} else {
		trimmed.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_from_row_full() {
		let contact = Contact::from_row(&RosterRow {
			name: "Juan Pérez".to_string(),
			national_id: "102340567".to_string(),
			position: "Analista".to_string(),
			category: "BEN1_70".to_string(),
		});

		assert_eq!(contact.name, "Juan Pérez");
		assert_eq!(contact.normalized_name, "juanperez");
		assert!(contact.has_known_category());
	}

	#[test]
	fn test_from_row_sentinels() {
		let contact = Contact::from_row(&RosterRow {
			name: "Ana Solís".to_string(),
			national_id: " ".to_string(),
			position: "".to_string(),
			category: "".to_string(),
		});

		assert_eq!(contact.national_id, UNKNOWN);
		assert_eq!(contact.position, UNSPECIFIED);
		assert_eq!(contact.category, UNKNOWN);
		assert!(!contact.has_known_category());
	}

	#[test]
	fn test_placeholder() {
		let contact = Contact::placeholder("Luis Mora", "BEN2_62");
		assert_eq!(contact.national_id, UNKNOWN);
		assert_eq!(contact.position, UNSPECIFIED);
		assert_eq!(contact.category, "BEN2_62");
		assert_eq!(contact.normalized_name, "luismora");
	}
}
