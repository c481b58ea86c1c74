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
use thiserror::Error;

/// The only hard failure the engine produces. Every other bad input
/// (unparseable dates, zero totals, unmatched contacts, categories
/// without rules) is absorbed with a deterministic fallback so that a
/// full ledger can always be computed from best-effort data.
#[derive(Debug, Error)]
pub enum SchemaError {
	#[error("{} is missing required columns: {}", table, columns.join(", "))]
	MissingColumns {
		table: String,
		columns: Vec<String>,
	},
}
