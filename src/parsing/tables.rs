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
use serde::{Deserialize, Serialize};

/// Required columns of the point-of-sale export. Header names are
/// whatever the POS emits; renaming them is out of our hands.
pub const SALES_COLUMNS: [&str; 9] = [
	"Cliente",
	"Empresa",
	"Fecha de la orden",
	"Orden",
	"Cant. ordenada",
	"Precio unitario",
	"Total",
	"Variante del producto",
	"Vendedor",
];

/// Required columns of the contact roster.
pub const ROSTER_COLUMNS: [&str; 4] = ["Nombre", "Cédula", "Puesto", "Tipo"];

/// One line of the point-of-sale export, untouched. Everything stays a
/// string here; all coercion and rejection happens in the classifier,
/// once, so nothing downstream ever re-checks a field.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SalesRow {
	/// Composite label: category token, comma, buyer display name
	#[serde(rename = "Cliente", default)]
	pub client: String,

	#[serde(rename = "Empresa", default)]
	pub company: String,

	#[serde(rename = "Fecha de la orden", default)]
	pub ordered_at: String,

	#[serde(rename = "Orden", default)]
	pub order_id: String,

	#[serde(rename = "Cant. ordenada", default)]
	pub quantity: String,

	#[serde(rename = "Precio unitario", default)]
	pub unit_price: String,

	#[serde(rename = "Total", default)]
	pub total: String,

	#[serde(rename = "Variante del producto", default)]
	pub product: String,

	#[serde(rename = "Vendedor", default)]
	pub seller: String,
}

/// One line of the roster table, untouched.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RosterRow {
	#[serde(rename = "Nombre", default)]
	pub name: String,

	#[serde(rename = "Cédula", default)]
	pub national_id: String,

	#[serde(rename = "Puesto", default)]
	pub position: String,

	#[serde(rename = "Tipo", default)]
	pub category: String,
}
