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
use crate::roster::contact::Contact;
use std::collections::BTreeMap;

/// normalized name -> contact, built once per roster load. Rows with a
/// blank name are skipped; when two rows normalize to the same key the
/// last one wins, silently, which is also what the association's
/// spreadsheet did on re-import.
#[derive(Debug, Default)]
pub struct ContactDirectory {
	contacts: BTreeMap<String, Contact>,
}

impl ContactDirectory {
	pub fn build(rows: &[RosterRow]) -> Self {
		let mut contacts = BTreeMap::new();

		for row in rows {
			if row.name.trim().is_empty() {
				continue;
			}

			let contact = Contact::from_row(row);
			contacts.insert(contact.normalized_name.clone(), contact);
		}

		Self { contacts }
	}

	pub fn lookup(&self, normalized_name: &str) -> Option<&Contact> {
		self.contacts.get(normalized_name)
	}

	pub fn len(&self) -> usize {
		self.contacts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.contacts.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::roster::contact::UNKNOWN;

	fn row(name: &str, category: &str) -> RosterRow {
		RosterRow {
			name: name.to_string(),
			national_id: "1".to_string(),
			position: "Analista".to_string(),
			category: category.to_string(),
		}
	}

	#[test]
	fn test_build_and_lookup() {
		let directory = ContactDirectory::build(&[
			row("Juan Pérez", "BEN1_70"),
			row("Ana Solís", "BEN2_62"),
		]);

		assert_eq!(directory.len(), 2);
		let juan = directory.lookup("juanperez").unwrap();
		assert_eq!(juan.category, "BEN1_70");
		assert!(directory.lookup("luismora").is_none());
	}

	#[test]
	fn test_blank_names_skipped() {
		let directory =
			ContactDirectory::build(&[row("  ", "BEN1_70"), row("", "")]);
		assert!(directory.is_empty());
	}

	#[test]
	fn test_last_seen_wins_on_collision() {
		// same person entered with and without the accent
		let directory = ContactDirectory::build(&[
			row("Juan Pérez", "BEN1_70"),
			row("Juan Perez", "BEN2_62"),
		]);

		assert_eq!(directory.len(), 1);
		assert_eq!(directory.lookup("juanperez").unwrap().category, "BEN2_62");
	}

	#[test]
	fn test_sentinels_applied() {
		let directory = ContactDirectory::build(&[RosterRow {
			name: "Luis Mora".to_string(),
			..Default::default()
		}]);

		assert_eq!(directory.lookup("luismora").unwrap().national_id, UNKNOWN);
	}
}
