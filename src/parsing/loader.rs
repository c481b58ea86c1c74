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
use crate::error::SchemaError;
use crate::parsing::tables::{
	RosterRow, SalesRow, ROSTER_COLUMNS, SALES_COLUMNS,
};
use anyhow::Error;
use csv::StringRecord;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;

/// Opens and reads the point-of-sale export. The header check runs
/// before any row is converted; a bad schema aborts the whole load.
pub fn load_sales(file_path: &str) -> Result<Vec<SalesRow>, Error> {
	read_sales(File::open(file_path)?)
}

pub fn load_roster(file_path: &str) -> Result<Vec<RosterRow>, Error> {
	read_roster(File::open(file_path)?)
}

pub fn read_sales<R: Read>(input: R) -> Result<Vec<SalesRow>, Error> {
	read_table(input, "sales table", &SALES_COLUMNS)
}

pub fn read_roster<R: Read>(input: R) -> Result<Vec<RosterRow>, Error> {
	read_table(input, "roster table", &ROSTER_COLUMNS)
}

fn read_table<R: Read, T: DeserializeOwned>(
	input: R,
	table: &str,
	required: &[&str],
) -> Result<Vec<T>, Error> {
	let mut reader = csv::Reader::from_reader(input);

	let headers = reader.headers()?.clone();
	check_columns(table, &headers, required)?;

	let mut rows = Vec::new();
	for row in reader.deserialize() {
		rows.push(row?);
	}

	Ok(rows)
}

/// The one hard failure of ingestion: every required column must be
/// present, by exact header name. Column order does not matter.
fn check_columns(
	table: &str,
	headers: &StringRecord,
	required: &[&str],
) -> Result<(), SchemaError> {
	let missing: Vec<String> = required
		.iter()
		.filter(|col| !headers.iter().any(|h| h == **col))
		.map(|col| col.to_string())
		.collect();

	if missing.is_empty() {
		Ok(())
	} else {
		Err(SchemaError::MissingColumns {
			table: table.to_string(),
			columns: missing,
		})
	}
}
