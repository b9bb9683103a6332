//! Serde roundtrip and JsonSchema validation tests for all entity types.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use schemars::schema_for;
use vital_core::entities::*;
use vital_core::enums::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn sample_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    specialty_roundtrip,
    Specialty,
    Specialty {
        id: 1,
        nombre: "Cardiología".into(),
        descripcion: "Atención del corazón".into(),
    }
);

roundtrip_and_validate!(
    patient_roundtrip,
    Patient,
    Patient {
        id: 2,
        rut: "12345678-9".into(),
        nombre: "Ana".into(),
        apellido: "Rojas".into(),
        fecha_nacimiento: NaiveDate::from_ymd_opt(1990, 5, 14).unwrap(),
        tipo_sangre: BloodType::AbNegative,
        correo: "ana@correo.cl".into(),
        telefono: "+56 9 1234 5678".into(),
        direccion: "Av. Siempre Viva 742".into(),
        activo: true,
    }
);

roundtrip_and_validate!(
    doctor_roundtrip,
    Doctor,
    Doctor {
        id: 3,
        nombre: "Carla".into(),
        apellido: "Soto".into(),
        rut: "11222333-4".into(),
        correo: "carla@saludvital.cl".into(),
        telefono: "+56 9 5555 5555".into(),
        activo: false,
        especialidad: 1,
    }
);

roundtrip_and_validate!(
    consultation_roundtrip,
    Consultation,
    Consultation {
        id: 4,
        paciente: 2,
        medico: 3,
        fecha_consulta: sample_datetime(),
        motivo: "Control anual".into(),
        diagnostico: "Sin hallazgos".into(),
        estado: ConsultationStatus::Completed,
    }
);

roundtrip_and_validate!(
    treatment_roundtrip,
    Treatment,
    Treatment {
        id: 5,
        consulta: 4,
        descripcion: "Reposo y antiinflamatorios".into(),
        duracion_dias: 10,
        observaciones: None,
    }
);

roundtrip_and_validate!(
    medication_roundtrip,
    Medication,
    Medication {
        id: 6,
        nombre: "Paracetamol 500mg".into(),
        laboratorio: "Lab Chile".into(),
        stock: 120,
        precio_unitario: Decimal::new(129_050, 2),
    }
);

roundtrip_and_validate!(
    prescription_roundtrip,
    Prescription,
    Prescription {
        id: 7,
        tratamiento: 5,
        medicamento: 6,
        dosis: "500mg, 1 comprimido".into(),
        frecuencia: Frequency::SingleDose,
        duracion: "7 días".into(),
        motivo: "Dolor lumbar".into(),
    }
);

roundtrip_and_validate!(
    prescription_input_roundtrip,
    PrescriptionInput,
    PrescriptionInput {
        tratamiento: 5,
        medicamento: 6,
        dosis: "500mg, 1 comprimido".into(),
        frecuencia: Frequency::Weekly,
        duracion: "2 semanas".into(),
        motivo: "Dolor lumbar".into(),
    }
);
