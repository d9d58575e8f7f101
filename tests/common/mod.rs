//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

use std::path::Path;

/// Read the output CSV and split it into lines
pub fn read_csv_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("output file should exist")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}
