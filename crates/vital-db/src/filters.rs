//! Declarative list filters.
//!
//! One filter struct per filtered entity, deserializable straight from a
//! query string. Absent fields impose no constraint; present fields compose
//! conjunctively. Unknown query parameters are ignored by serde. Each filter
//! compiles to a complete SELECT whose column order the repo row parsers
//! rely on.

use chrono::NaiveDateTime;
use serde::Deserialize;

use vital_core::enums::{BloodType, ConsultationStatus, Frequency};

use crate::helpers::fmt_datetime;

/// Accumulates `AND`-joined conditions with positional parameters.
#[derive(Default)]
struct Conditions {
    conditions: Vec<String>,
    params: Vec<libsql::Value>,
}

impl Conditions {
    /// `expr` includes the comparison operator, e.g. `"m.activo ="`.
    fn push(&mut self, expr: &str, value: impl Into<libsql::Value>) {
        let idx = self.params.len() + 1;
        self.conditions.push(format!("{expr} ?{idx}"));
        self.params.push(value.into());
    }

    /// Substring match. `%`, `_`, and `\` in the needle are literals, not
    /// LIKE wildcards.
    fn push_contains(&mut self, column: &str, needle: &str) {
        let idx = self.params.len() + 1;
        self.conditions
            .push(format!("{column} LIKE ?{idx} ESCAPE '\\'"));
        self.params.push(contains_pattern(needle).into());
    }

    fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }
}

fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

// ---------------------------------------------------------------------------
// Doctor
// ---------------------------------------------------------------------------

/// Doctors by specialty id, specialty name substring, and active flag.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorFilter {
    pub especialidad: Option<i64>,
    pub especialidad_nombre: Option<String>,
    pub activo: Option<bool>,
}

impl DoctorFilter {
    pub(crate) fn select_sql(&self) -> (String, Vec<libsql::Value>) {
        let mut cond = Conditions::default();
        if let Some(id) = self.especialidad {
            cond.push("m.especialidad_id =", id);
        }
        if let Some(ref nombre) = self.especialidad_nombre {
            cond.push_contains("e.nombre", nombre);
        }
        if let Some(activo) = self.activo {
            cond.push("m.activo =", i64::from(activo));
        }
        let sql = format!(
            "SELECT m.id, m.nombre, m.apellido, m.rut, m.correo, m.telefono, m.activo, m.especialidad_id
             FROM medicos m
             JOIN especialidades e ON e.id = m.especialidad_id{}
             ORDER BY m.id",
            cond.where_clause()
        );
        (sql, cond.params)
    }
}

// ---------------------------------------------------------------------------
// Patient
// ---------------------------------------------------------------------------

/// Patients by treating doctor (via consultations, deduplicated), blood
/// type, and active flag.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientFilter {
    pub medico: Option<i64>,
    pub tipo_sangre: Option<BloodType>,
    pub activo: Option<bool>,
}

impl PatientFilter {
    pub(crate) fn select_sql(&self) -> (String, Vec<libsql::Value>) {
        let mut cond = Conditions::default();
        let join = if let Some(medico) = self.medico {
            cond.push("c.medico_id =", medico);
            " JOIN consultas c ON c.paciente_id = p.id"
        } else {
            ""
        };
        if let Some(tipo) = self.tipo_sangre {
            cond.push("p.tipo_sangre =", tipo.as_str());
        }
        if let Some(activo) = self.activo {
            cond.push("p.activo =", i64::from(activo));
        }
        // DISTINCT only matters under the consultation join, but is harmless
        // on the primary key otherwise.
        let sql = format!(
            "SELECT DISTINCT p.id, p.rut, p.nombre, p.apellido, p.fecha_nacimiento, p.tipo_sangre, \
                    p.correo, p.telefono, p.direccion, p.activo
             FROM pacientes p{join}{}
             ORDER BY p.id",
            cond.where_clause()
        );
        (sql, cond.params)
    }
}

// ---------------------------------------------------------------------------
// Consultation
// ---------------------------------------------------------------------------

/// Consultations by doctor, patient, status, and inclusive datetime range.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsultationFilter {
    pub medico: Option<i64>,
    pub paciente: Option<i64>,
    pub estado: Option<ConsultationStatus>,
    pub fecha_desde: Option<NaiveDateTime>,
    pub fecha_hasta: Option<NaiveDateTime>,
}

impl ConsultationFilter {
    pub(crate) fn select_sql(&self) -> (String, Vec<libsql::Value>) {
        let mut cond = Conditions::default();
        if let Some(medico) = self.medico {
            cond.push("c.medico_id =", medico);
        }
        if let Some(paciente) = self.paciente {
            cond.push("c.paciente_id =", paciente);
        }
        if let Some(estado) = self.estado {
            cond.push("c.estado =", estado.as_str());
        }
        if let Some(desde) = self.fecha_desde {
            cond.push("c.fecha_consulta >=", fmt_datetime(desde));
        }
        if let Some(hasta) = self.fecha_hasta {
            cond.push("c.fecha_consulta <=", fmt_datetime(hasta));
        }
        let sql = format!(
            "SELECT c.id, c.paciente_id, c.medico_id, c.fecha_consulta, c.motivo, c.diagnostico, c.estado
             FROM consultas c{}
             ORDER BY c.id",
            cond.where_clause()
        );
        (sql, cond.params)
    }
}

// ---------------------------------------------------------------------------
// Treatment
// ---------------------------------------------------------------------------

/// Treatments by consultation, or by the consultation's doctor or patient.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreatmentFilter {
    pub consulta: Option<i64>,
    pub medico: Option<i64>,
    pub paciente: Option<i64>,
}

impl TreatmentFilter {
    pub(crate) fn select_sql(&self) -> (String, Vec<libsql::Value>) {
        let mut cond = Conditions::default();
        if let Some(consulta) = self.consulta {
            cond.push("t.consulta_id =", consulta);
        }
        let join = if self.medico.is_some() || self.paciente.is_some() {
            if let Some(medico) = self.medico {
                cond.push("c.medico_id =", medico);
            }
            if let Some(paciente) = self.paciente {
                cond.push("c.paciente_id =", paciente);
            }
            " JOIN consultas c ON c.id = t.consulta_id"
        } else {
            ""
        };
        let sql = format!(
            "SELECT t.id, t.consulta_id, t.descripcion, t.duracion_dias, t.observaciones
             FROM tratamientos t{join}{}
             ORDER BY t.id",
            cond.where_clause()
        );
        (sql, cond.params)
    }
}

// ---------------------------------------------------------------------------
// Prescription
// ---------------------------------------------------------------------------

/// Prescriptions by treatment, medication, and frequency.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrescriptionFilter {
    pub tratamiento: Option<i64>,
    pub medicamento: Option<i64>,
    pub frecuencia: Option<Frequency>,
}

impl PrescriptionFilter {
    pub(crate) fn select_sql(&self) -> (String, Vec<libsql::Value>) {
        let mut cond = Conditions::default();
        if let Some(tratamiento) = self.tratamiento {
            cond.push("r.tratamiento_id =", tratamiento);
        }
        if let Some(medicamento) = self.medicamento {
            cond.push("r.medicamento_id =", medicamento);
        }
        if let Some(frecuencia) = self.frecuencia {
            cond.push("r.frecuencia =", frecuencia.as_str());
        }
        let sql = format!(
            "SELECT r.id, r.tratamiento_id, r.medicamento_id, r.dosis, r.frecuencia, r.duracion, r.motivo
             FROM recetas r{}
             ORDER BY r.id",
            cond.where_clause()
        );
        (sql, cond.params)
    }
}

// ---------------------------------------------------------------------------
// Medication
// ---------------------------------------------------------------------------

/// Medications by name substring, laboratory substring, and minimum stock.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedicationFilter {
    pub nombre: Option<String>,
    pub laboratorio: Option<String>,
    pub stock_minimo: Option<i64>,
}

impl MedicationFilter {
    pub(crate) fn select_sql(&self) -> (String, Vec<libsql::Value>) {
        let mut cond = Conditions::default();
        if let Some(ref nombre) = self.nombre {
            cond.push_contains("m.nombre", nombre);
        }
        if let Some(ref laboratorio) = self.laboratorio {
            cond.push_contains("m.laboratorio", laboratorio);
        }
        if let Some(stock_minimo) = self.stock_minimo {
            cond.push("m.stock >=", stock_minimo);
        }
        let sql = format!(
            "SELECT m.id, m.nombre, m.laboratorio, m.stock, m.precio_unitario
             FROM medicamentos m{}
             ORDER BY m.id",
            cond.where_clause()
        );
        (sql, cond.params)
    }
}
