//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

//! Example payload for the shared handle: a small family of financial
//! products. The family is a closed set, so it is one enum dispatched by
//! `match` rather than a trait hierarchy. A portfolio is a stock leg plus a
//! bond leg in a single record, which is all that remains of the original
//! diamond once the data is flattened.

use std::fmt;

//--------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Product {
	Stock {
		name: String,
		price_per_share: f64,
		shares: u32,
	},
	Bond {
		name: String,
		face_value: f64,
		interest_rate: f64,
	},
	Portfolio {
		name: String,
		price_per_share: f64,
		shares: u32,
		face_value: f64,
		interest_rate: f64,
	},
}

fn stock_value(price_per_share: f64, shares: u32) -> f64 {
	price_per_share * f64::from(shares)
}

fn bond_value(face_value: f64, interest_rate: f64) -> f64 {
	face_value * (1.0 + interest_rate)
}

fn stock_description(name: &str, price_per_share: f64, shares: u32) -> String {
	format!("Stock: {name} | Price per Share: ${price_per_share:.2} | Shares: {shares}")
}

fn bond_description(name: &str, face_value: f64, interest_rate: f64) -> String {
	format!(
		"Bond: {name} | Face Value: ${face_value:.2} | Interest Rate: {:.2}%",
		interest_rate * 100.0
	)
}

impl Product {
	pub fn name(&self) -> &str {
		match self {
			Self::Stock { name, .. } | Self::Bond { name, .. } | Self::Portfolio { name, .. } => {
				name
			},
		}
	}

	/// Total value. A portfolio is worth the sum of both legs.
	pub fn value(&self) -> f64 {
		match self {
			Self::Stock { price_per_share, shares, .. } => stock_value(*price_per_share, *shares),
			Self::Bond { face_value, interest_rate, .. } => {
				bond_value(*face_value, *interest_rate)
			},
			Self::Portfolio { price_per_share, shares, face_value, interest_rate, .. } => {
				stock_value(*price_per_share, *shares) + bond_value(*face_value, *interest_rate)
			},
		}
	}

	pub fn description(&self) -> String {
		match self {
			Self::Stock { name, price_per_share, shares } => {
				stock_description(name, *price_per_share, *shares)
			},
			Self::Bond { name, face_value, interest_rate } => {
				bond_description(name, *face_value, *interest_rate)
			},
			Self::Portfolio { name, price_per_share, shares, face_value, interest_rate } => {
				format!(
					"Portfolio: {name}\n - {}\n - {}",
					stock_description(name, *price_per_share, *shares),
					bond_description(name, *face_value, *interest_rate)
				)
			},
		}
	}
}

impl fmt::Display for Product {
	/// The inventory line format: description plus total value.
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} | Total Value: ${:.2}", self.description(), self.value())
	}
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
	use super::*;
	use assert_approx_eq::assert_approx_eq;

	#[test]
	fn stock_value_is_price_times_quantity() {
		let stock = Product::Stock {
			name: "Tech Company".to_string(),
			price_per_share: 150.00,
			shares: 20,
		};
		assert_approx_eq!(stock.value(), 3000.0, 1e-9);
	}

	#[test]
	fn bond_value_includes_interest() {
		let bond = Product::Bond {
			name: "Government Bond".to_string(),
			face_value: 1000.00,
			interest_rate: 0.05,
		};
		assert_approx_eq!(bond.value(), 1050.0, 1e-9);
	}

	#[test]
	fn portfolio_value_sums_both_legs() {
		let portfolio = Product::Portfolio {
			name: "Balanced Portfolio".to_string(),
			price_per_share: 150.00,
			shares: 10,
			face_value: 5000.00,
			interest_rate: 0.03,
		};
		assert_approx_eq!(portfolio.value(), 6650.0, 1e-9);
	}

	#[test]
	fn descriptions_match_expected_format() {
		let stock = Product::Stock {
			name: "Tech Company".to_string(),
			price_per_share: 150.00,
			shares: 20,
		};
		assert_eq!(
			stock.description(),
			"Stock: Tech Company | Price per Share: $150.00 | Shares: 20"
		);

		let bond = Product::Bond {
			name: "Government Bond".to_string(),
			face_value: 1000.00,
			interest_rate: 0.05,
		};
		assert_eq!(
			bond.description(),
			"Bond: Government Bond | Face Value: $1000.00 | Interest Rate: 5.00%"
		);

		let portfolio = Product::Portfolio {
			name: "Balanced Portfolio".to_string(),
			price_per_share: 150.00,
			shares: 10,
			face_value: 5000.00,
			interest_rate: 0.03,
		};
		let expected = format!(
			"Portfolio: Balanced Portfolio\n - {}\n - {}",
			"Stock: Balanced Portfolio | Price per Share: $150.00 | Shares: 10",
			"Bond: Balanced Portfolio | Face Value: $5000.00 | Interest Rate: 3.00%"
		);
		assert_eq!(portfolio.description(), expected);
	}

	#[test]
	fn display_appends_total_value() {
		let stock = Product::Stock {
			name: "Tech Company".to_string(),
			price_per_share: 150.00,
			shares: 20,
		};
		assert_eq!(
			stock.to_string(),
			"Stock: Tech Company | Price per Share: $150.00 | Shares: 20 | Total Value: $3000.00"
		);
	}
}
