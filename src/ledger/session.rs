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
use crate::ledger::{compute, Ledger};
use crate::parsing::tables::{RosterRow, SalesRow};
use anyhow::Error;
use sha2::{Digest, Sha256};

/// Caches the last computed ledger against a fingerprint of every input
/// that affects rating: both tables and the resolved settings in full
/// (tax rate, rule set, label prefix, expected categories, cost
/// centers). A caller that re-renders on every interaction gets at most
/// one fresh computation per input combination; any change invalidates
/// the whole ledger at once. There is no partial re-rating.
#[derive(Default)]
pub struct Session {
	fingerprint: Option<String>,
	ledger: Option<Ledger>,
}

impl Session {
	pub fn new() -> Self {
		Default::default()
	}

	/// Returns the ledger for the given inputs, recomputing only if any
	/// of them changed since the last call.
	pub fn ledger(
		&mut self,
		sales: &[SalesRow],
		roster: &[RosterRow],
		settings: &Settings,
	) -> Result<&Ledger, Error> {
		let fingerprint = Session::fingerprint(sales, roster, settings)?;

		if self.fingerprint.as_deref() != Some(fingerprint.as_str()) {
			self.ledger = Some(compute(sales, roster, settings));
			self.fingerprint = Some(fingerprint);
		}

		Ok(self.ledger.as_ref().unwrap())
	}

	/// How many computations this session has performed is not tracked;
	/// the fingerprint is exposed for callers that want to key their
	/// own artifacts (exports, chart caches) off the same identity.
	pub fn current_fingerprint(&self) -> Option<&str> {
		self.fingerprint.as_deref()
	}

	fn fingerprint(
		sales: &[SalesRow],
		roster: &[RosterRow],
		settings: &Settings,
	) -> Result<String, Error> {
		let mut hasher = Sha256::new();

		hasher.update(serde_json::to_vec(sales)?);
		hasher.update(serde_json::to_vec(roster)?);
		hasher.update(serde_json::to_vec(settings)?);

		Ok(hex::encode(hasher.finalize()))
	}
}
