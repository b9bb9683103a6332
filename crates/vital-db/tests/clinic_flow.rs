//! Cross-entity scenarios: cascade deletes down the whole chain, filters
//! that join across tables, and persistence across reopen.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::str::FromStr;

use vital_core::entities::{
    ConsultationInput, DoctorInput, MedicationInput, PatientInput, PrescriptionInput,
    SpecialtyInput, TreatmentInput,
};
use vital_core::enums::{BloodType, ConsultationStatus, Frequency};
use vital_db::ClinicService;
use vital_db::error::DatabaseError;
use vital_db::filters::{PatientFilter, TreatmentFilter};

struct Clinic {
    especialidad: i64,
    paciente: i64,
    medico: i64,
    consulta: i64,
    tratamiento: i64,
    medicamento: i64,
    receta: i64,
}

fn patient_input(rut: &str, nombre: &str) -> PatientInput {
    PatientInput {
        rut: rut.into(),
        nombre: nombre.into(),
        apellido: "Rojas".into(),
        fecha_nacimiento: NaiveDate::from_ymd_opt(1990, 5, 14).unwrap(),
        tipo_sangre: BloodType::APositive,
        correo: format!("{}@correo.cl", nombre.to_lowercase()),
        telefono: "+56 9 1234 5678".into(),
        direccion: "Av. Siempre Viva 742".into(),
        activo: true,
    }
}

fn consultation_input(paciente: i64, medico: i64, dt: &str) -> ConsultationInput {
    ConsultationInput {
        paciente,
        medico,
        fecha_consulta: chrono::NaiveDateTime::parse_from_str(dt, "%Y-%m-%d %H:%M:%S").unwrap(),
        motivo: "Control".into(),
        diagnostico: "Sin hallazgos".into(),
        estado: ConsultationStatus::Completed,
    }
}

/// Seeds one record of each entity, chained together.
async fn seed_clinic(service: &ClinicService) -> Clinic {
    let especialidad = service
        .create_specialty(SpecialtyInput {
            nombre: "Medicina General".into(),
            descripcion: "Atención primaria".into(),
        })
        .await
        .unwrap()
        .id;
    let paciente = service
        .create_patient(patient_input("12345678-9", "Ana"))
        .await
        .unwrap()
        .id;
    let medico = service
        .create_doctor(DoctorInput {
            nombre: "Carla".into(),
            apellido: "Soto".into(),
            rut: "11222333-4".into(),
            correo: "carla.soto@saludvital.cl".into(),
            telefono: "+56 9 5555 5555".into(),
            activo: true,
            especialidad,
        })
        .await
        .unwrap()
        .id;
    let consulta = service
        .create_consultation(consultation_input(paciente, medico, "2024-03-15 10:30:00"))
        .await
        .unwrap()
        .id;
    let tratamiento = service
        .create_treatment(TreatmentInput {
            consulta,
            descripcion: "Reposo e hidratación".into(),
            duracion_dias: 5,
            observaciones: None,
        })
        .await
        .unwrap()
        .id;
    let medicamento = service
        .create_medication(MedicationInput {
            nombre: "Paracetamol 500mg".into(),
            laboratorio: "Lab Chile".into(),
            stock: 120,
            precio_unitario: Decimal::from_str("1290.50").unwrap(),
        })
        .await
        .unwrap()
        .id;
    let receta = service
        .create_prescription(PrescriptionInput {
            tratamiento,
            medicamento,
            dosis: "1 comprimido".into(),
            frecuencia: Frequency::Every8Hours,
            duracion: "5 días".into(),
            motivo: "Fiebre".into(),
        })
        .await
        .unwrap()
        .id;
    Clinic {
        especialidad,
        paciente,
        medico,
        consulta,
        tratamiento,
        medicamento,
        receta,
    }
}

fn is_not_found(result: Result<impl std::fmt::Debug, DatabaseError>) -> bool {
    matches!(result, Err(DatabaseError::NotFound { .. }))
}

#[tokio::test]
async fn deleting_a_consultation_removes_treatments_and_prescriptions() {
    let service = ClinicService::open_local(":memory:").await.unwrap();
    let clinic = seed_clinic(&service).await;

    service.delete_consultation(clinic.consulta).await.unwrap();

    assert!(is_not_found(service.get_treatment(clinic.tratamiento).await));
    assert!(is_not_found(service.get_prescription(clinic.receta).await));
    // The medication inventory is untouched.
    service.get_medication(clinic.medicamento).await.unwrap();
}

#[tokio::test]
async fn deleting_a_specialty_removes_the_whole_chain() {
    let service = ClinicService::open_local(":memory:").await.unwrap();
    let clinic = seed_clinic(&service).await;

    service.delete_specialty(clinic.especialidad).await.unwrap();

    assert!(is_not_found(service.get_doctor(clinic.medico).await));
    assert!(is_not_found(service.get_consultation(clinic.consulta).await));
    assert!(is_not_found(service.get_treatment(clinic.tratamiento).await));
    assert!(is_not_found(service.get_prescription(clinic.receta).await));
    // Patients do not hang off specialties.
    service.get_patient(clinic.paciente).await.unwrap();
}

#[tokio::test]
async fn deleting_a_medication_removes_its_prescriptions_only() {
    let service = ClinicService::open_local(":memory:").await.unwrap();
    let clinic = seed_clinic(&service).await;

    service.delete_medication(clinic.medicamento).await.unwrap();

    assert!(is_not_found(service.get_prescription(clinic.receta).await));
    service.get_treatment(clinic.tratamiento).await.unwrap();
}

#[tokio::test]
async fn patient_filter_by_doctor_deduplicates_repeat_visits() {
    let service = ClinicService::open_local(":memory:").await.unwrap();
    let clinic = seed_clinic(&service).await;

    // A second visit by the same patient, plus a patient the doctor never saw.
    service
        .create_consultation(consultation_input(
            clinic.paciente,
            clinic.medico,
            "2024-04-02 09:00:00",
        ))
        .await
        .unwrap();
    service
        .create_patient(patient_input("9876543-2", "Luis"))
        .await
        .unwrap();

    let seen = service
        .list_patients(&PatientFilter {
            medico: Some(clinic.medico),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].id, clinic.paciente);
}

#[tokio::test]
async fn treatment_filter_by_patient_joins_through_consultations() {
    let service = ClinicService::open_local(":memory:").await.unwrap();
    let clinic = seed_clinic(&service).await;

    let found = service
        .list_treatments(&TreatmentFilter {
            paciente: Some(clinic.paciente),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, clinic.tratamiento);

    let none = service
        .list_treatments(&TreatmentFilter {
            medico: Some(clinic.medico + 1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn records_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clinica.db");
    let path = path.to_str().unwrap();

    let clinic = {
        let service = ClinicService::open_local(path).await.unwrap();
        seed_clinic(&service).await
    };

    let service = ClinicService::open_local(path).await.unwrap();
    let patient = service.get_patient(clinic.paciente).await.unwrap();
    assert_eq!(patient.rut, "12345678-9");
    let prescription = service.get_prescription(clinic.receta).await.unwrap();
    assert_eq!(prescription.frecuencia, Frequency::Every8Hours);
}
