//! Enum fields with fixed wire values and Spanish display labels.
//!
//! Wire values are the exact strings stored and exchanged over JSON
//! (`"A+"`, `"AGENDADA"`, `"8H"`, ...). Every variant also carries the human
//! label shown by HTML `<select>` widgets. `FromStr` accepts wire values
//! only; anything else is an [`InvalidChoice`].

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::InvalidChoice;

// ---------------------------------------------------------------------------
// BloodType
// ---------------------------------------------------------------------------

/// Patient blood type, one of the eight ABO/Rh groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    pub const ALL: [Self; 8] = [
        Self::APositive,
        Self::ANegative,
        Self::BPositive,
        Self::BNegative,
        Self::AbPositive,
        Self::AbNegative,
        Self::OPositive,
        Self::ONegative,
    ];

    /// Wire/storage value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        }
    }

    /// Display label for select widgets.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::APositive => "A positivo",
            Self::ANegative => "A negativo",
            Self::BPositive => "B positivo",
            Self::BNegative => "B negativo",
            Self::AbPositive => "AB positivo",
            Self::AbNegative => "AB negativo",
            Self::OPositive => "O positivo",
            Self::ONegative => "O negativo",
        }
    }
}

impl Default for BloodType {
    fn default() -> Self {
        Self::OPositive
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| InvalidChoice { value: s.to_string() })
    }
}

// ---------------------------------------------------------------------------
// ConsultationStatus
// ---------------------------------------------------------------------------

/// Status of a medical consultation.
///
/// New consultations default to `Scheduled`; there is no enforced transition
/// graph, the handlers accept any recognized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ConsultationStatus {
    #[serde(rename = "AGENDADA")]
    Scheduled,
    #[serde(rename = "EN_CURSO")]
    InProgress,
    #[serde(rename = "COMPLETADA")]
    Completed,
    #[serde(rename = "CANCELADA")]
    Cancelled,
    #[serde(rename = "NO_ASISTIO")]
    NoShow,
}

impl ConsultationStatus {
    pub const ALL: [Self; 5] = [
        Self::Scheduled,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
        Self::NoShow,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "AGENDADA",
            Self::InProgress => "EN_CURSO",
            Self::Completed => "COMPLETADA",
            Self::Cancelled => "CANCELADA",
            Self::NoShow => "NO_ASISTIO",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Agendada",
            Self::InProgress => "En Curso",
            Self::Completed => "Completada",
            Self::Cancelled => "Cancelada",
            Self::NoShow => "No Asistió",
        }
    }
}

impl Default for ConsultationStatus {
    fn default() -> Self {
        Self::Scheduled
    }
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsultationStatus {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| InvalidChoice { value: s.to_string() })
    }
}

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

/// Medication intake frequency on a prescription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Frequency {
    #[serde(rename = "8H")]
    Every8Hours,
    #[serde(rename = "12H")]
    Every12Hours,
    #[serde(rename = "24H")]
    Every24Hours,
    #[serde(rename = "48H")]
    Every48Hours,
    #[serde(rename = "SEMANAL")]
    Weekly,
    #[serde(rename = "UNICA")]
    SingleDose,
}

impl Frequency {
    pub const ALL: [Self; 6] = [
        Self::Every8Hours,
        Self::Every12Hours,
        Self::Every24Hours,
        Self::Every48Hours,
        Self::Weekly,
        Self::SingleDose,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Every8Hours => "8H",
            Self::Every12Hours => "12H",
            Self::Every24Hours => "24H",
            Self::Every48Hours => "48H",
            Self::Weekly => "SEMANAL",
            Self::SingleDose => "UNICA",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Every8Hours => "Cada 8 horas",
            Self::Every12Hours => "Cada 12 horas",
            Self::Every24Hours => "Cada 24 horas",
            Self::Every48Hours => "Cada 48 horas",
            Self::Weekly => "Una vez por semana",
            Self::SingleDose => "Dosis única",
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::Every24Hours
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| InvalidChoice { value: s.to_string() })
    }
}
