//! # vital-core
//!
//! Core types for the Salud Vital clinic management system.
//!
//! This crate provides the foundational types shared across all crates:
//! - Entity structs for the seven clinical record types and their input
//!   (pre-persistence) counterparts
//! - Enum fields with fixed wire values and Spanish display labels
//! - Constraint validation producing field → message error maps
//! - HTML form metadata and flat string-map coercion

pub mod entities;
pub mod enums;
pub mod errors;
pub mod forms;
mod validate;
