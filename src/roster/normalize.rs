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
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalizes a display name into a lookup key so the same person
/// matches across the roster and the point-of-sale export, which are
/// typed by different people. Trims, lowercases, strips diacritics via
/// NFD decomposition, and removes all whitespace and hyphens.
///
/// Hyphens are stripped on purpose: "Pérez-Soto" and "Perez Soto" are
/// the same contact as far as matching is concerned. Idempotent.
pub fn normalize(name: &str) -> String {
	name.trim()
		.to_lowercase()
		.nfd()
		.filter(|c| !is_combining_mark(*c))
		.filter(|c| !c.is_whitespace() && *c != '-')
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_basic() {
		assert_eq!(normalize("Juan Pérez"), "juanperez");
		assert_eq!(normalize("  MARÍA  JOSÉ núñez "), "mariajosenunez");
	}

	#[test]
	fn test_hyphens_stripped() {
		assert_eq!(normalize("Pérez-Soto"), normalize("Perez Soto"));
	}

	#[test]
	fn test_empty() {
		assert_eq!(normalize(""), "");
		assert_eq!(normalize("   "), "");
	}

	#[test]
	fn test_idempotent() {
		for name in ["Juan Pérez", "Ñandú Ávila-Güell", "", "x"] {
			let once = normalize(name);
			assert_eq!(normalize(&once), once);
		}
	}
}
