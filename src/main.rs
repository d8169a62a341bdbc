//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

//! Demo driver. Builds a small inventory of uniquely owned products, prints
//! it, then shares one product between two handles. Run with trace logging on
//! stderr to watch the handle lifecycle.

use x17rc::Shared;
use x17rc::products::Product;

fn main() {
	stderrlog::new()
		.verbosity(log::LevelFilter::Trace)
		.init()
		.ok();

	// Uniquely owned handles: a plain Box per product.
	let inventory: Vec<Box<Product>> = vec![
		Box::new(Product::Stock {
			name: "Tech Company".to_string(),
			price_per_share: 150.00,
			shares: 20,
		}),
		Box::new(Product::Bond {
			name: "Government Bond".to_string(),
			face_value: 1000.00,
			interest_rate: 0.05,
		}),
		Box::new(Product::Portfolio {
			name: "Balanced Portfolio".to_string(),
			price_per_share: 150.00,
			shares: 10,
			face_value: 5000.00,
			interest_rate: 0.03,
		}),
	];

	println!("Financial Product Inventory:\n");
	for product in &inventory {
		println!("{product}\n");
	}

	// Shared ownership: both handles see the same payload and counter, and
	// the payload is freed exactly once when the second one goes out of scope.
	let first = Shared::new(Product::Stock {
		name: "Tech Company".to_string(),
		price_per_share: 150.00,
		shares: 20,
	});
	let second = first.clone();

	println!("shared owners: {}", second.ref_count());
	println!("shared value: ${:.2}", second.value());
}
