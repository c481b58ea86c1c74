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

//! Rating and aggregation engine for the cafeteria subsidy program. Takes
//! the point-of-sale export and the contact roster, classifies each sale
//! by beneficiary category, applies the category subsidy and commission
//! rules under a flat tax rate, and rolls everything up into reconciled
//! billing, commission, statement, and consumption reports.

pub mod config;
pub mod error;
pub mod ledger;
pub mod parsing;
pub mod rating;
pub mod reports;
pub mod roster;
