//! # Constants and type definitions for calikins
//!
//! This module centralizes the **machine limits**, **solver defaults**, and **common
//! type definitions** used throughout the `calikins` library.
//!
//! ## Overview
//!
//! - Machine limits (joint count, axis count, coordinate string length)
//! - Default Newton-Raphson solver settings
//! - Core type aliases used across the crate
//!
//! These definitions are used by all main modules, including the inverse solver,
//! the axis mapping, and the live tuning store.

use nalgebra::Vector3;

// -------------------------------------------------------------------------------------------------
// Machine limits
// -------------------------------------------------------------------------------------------------

/// Maximum number of joints a machine configuration may declare.
pub const MAX_JOINTS: usize = 16;

/// Number of machine axes: the three linear axes X, Y, Z plus the
/// auxiliary axes A, B, C, U, V, W.
pub const MAX_AXES: usize = 9;

/// Maximum length accepted for an operator-supplied coordinates string.
pub const MAX_COORDINATE_CHARS: usize = 32;

// -------------------------------------------------------------------------------------------------
// Solver defaults
// -------------------------------------------------------------------------------------------------

/// Default iteration budget for the Newton-Raphson inverse solver.
pub const DEFAULT_MAX_ITER: u32 = 10;

/// Default convergence tolerance on the Euclidean residual norm.
pub const DEFAULT_TOL: f64 = 1e-3;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Joint-space values of the three linear axes, in machine units.
pub type JointTriple = Vector3<f64>;

/// Cartesian machine position of the tool, in machine units.
pub type Pose3 = Vector3<f64>;
