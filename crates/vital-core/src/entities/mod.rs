//! Entity structs for the seven clinical record types.
//!
//! Each entity maps to a table in the libSQL database and serializes to a
//! flat JSON object with every declared field; foreign keys are plain `i64`
//! ids. Each entity file also defines its input counterpart (`XxxInput`):
//! the same fields minus `id`, deserializable from JSON API bodies, with a
//! `validate()` pass enforcing the declared constraints.

mod consultation;
mod doctor;
mod medication;
mod patient;
mod prescription;
mod specialty;
mod treatment;

pub use consultation::{Consultation, ConsultationInput};
pub use doctor::{Doctor, DoctorInput};
pub use medication::{Medication, MedicationInput};
pub use patient::{Patient, PatientInput};
pub use prescription::{Prescription, PrescriptionInput};
pub use specialty::{Specialty, SpecialtyInput};
pub use treatment::{Treatment, TreatmentInput};
