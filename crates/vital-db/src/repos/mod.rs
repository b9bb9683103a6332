//! Per-entity repositories.
//!
//! Each file implements one entity's CRUD methods on
//! [`crate::ClinicService`], plus the row parser for its SELECT column
//! order. Inputs are validated before any write; store-backed checks
//! (unique rut, referenced-record existence) run after field validation so
//! writes never leave dangling references.

mod consultation;
mod doctor;
mod medication;
mod patient;
mod prescription;
mod specialty;
mod treatment;
