//! Common test utilities for integration tests
//!
//! This module provides:
//! - A simulated front end whose level and faults tests can change while the
//!   monitor owns it
//! - A shared manual clock, command keyboard and captured serial output
//! - A [`harness::Rig`] that wires them into a [`hvmon_core::Monitor`]

#![allow(dead_code)]

pub mod generators;
pub mod harness;

/// Absolute tolerance for voltages that went through the full chain
pub const VOLTAGE_TOLERANCE: f32 = 0.05;

/// Assert two voltages agree within [`VOLTAGE_TOLERANCE`]
#[track_caller]
pub fn assert_voltage(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= VOLTAGE_TOLERANCE,
        "expected {} V, got {} V",
        expected,
        actual
    );
}
