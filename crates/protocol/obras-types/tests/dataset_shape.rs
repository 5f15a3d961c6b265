//! Dataset shape tests for obras-types.
//!
//! These tests pin the column names and tokens of the public-works dataset,
//! which are fixed business rules rather than configuration.

use obras_types::*;

// =============================================================================
// Field Catalogue
// =============================================================================

#[test]
fn required_fields_are_the_eighteen_source_columns() {
    let columns: Vec<_> = Field::ALL.iter().map(|f| f.column()).collect();
    assert_eq!(
        columns,
        vec![
            "nombre",
            "tipo",
            "area",
            "barrio",
            "comuna",
            "monto_contrato",
            "etapa",
            "contratacion_tipo",
            "nro_contratacion",
            "licitacion_oferta_empresa",
            "expediente_numero",
            "destacada",
            "fecha_inicio",
            "fecha_fin_inicial",
            "financiamiento",
            "porcentaje_avance",
            "plazo_meses",
            "mano_obra",
        ]
    );
}

#[test]
fn canonical_file_number_column_matches_field() {
    assert_eq!(Field::FileNumber.column(), FILE_NUMBER_COLUMN);
    assert_ne!(LEGACY_FILE_NUMBER_COLUMN, FILE_NUMBER_COLUMN);
    assert_eq!(Field::Featured.column(), FEATURED_COLUMN);
}

#[test]
fn field_serializes_snake_case() {
    let json = serde_json::to_string(&Field::ContractAmount).unwrap();
    assert_eq!(json, "\"contract_amount\"");
    let back: Field = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Field::ContractAmount);
}

// =============================================================================
// Indicator Filters
// =============================================================================

#[test]
fn indicator_filters() {
    assert_eq!(STAGE_FINISHED, "Finalizada");
    assert_eq!(INDICATOR_DISTRICTS, ["Comuna 1", "Comuna 2", "Comuna 3"]);
    assert_eq!(COMUNA_1, INDICATOR_DISTRICTS[0]);
    assert_eq!(MAX_TERM_MONTHS, 24);
    assert_eq!(SOURCE_DELIMITER, b';');
}

// =============================================================================
// Records
// =============================================================================

#[test]
fn manual_obra_new() {
    let obra = ManualObra::new("Plaza Norte", "Espacio Verde", "Ministerio", "Palermo", "14", 1500.0);
    assert_eq!(obra.name, "Plaza Norte");
    assert_eq!(obra.district, "14");
    assert_eq!(obra.contract_amount, 1500.0);
}
