//! The fixed field catalogue of an obra record.
//!
//! Each [`Field`] knows its canonical column name (shared by the source
//! header and the store schema) and its value kind.

use serde::{Deserialize, Serialize};

/// Value kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Decimal number (amounts, percentages).
    Decimal,
    /// Whole number.
    Integer,
    /// Boolean flag.
    Boolean,
    /// Calendar date.
    Date,
}

impl FieldKind {
    /// Returns true if values of this kind can be summed.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Decimal | FieldKind::Integer)
    }
}

/// A field of an obra record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    WorkType,
    ResponsibleArea,
    Neighborhood,
    District,
    ContractAmount,
    Stage,
    ContractingType,
    ContractingNumber,
    BiddingCompany,
    FileNumber,
    Featured,
    StartDate,
    InitialEndDate,
    FundingSource,
    ProgressPercentage,
    TermMonths,
    LaborCount,
}

impl Field {
    /// All fields, in column order. Every one of them is required.
    pub const ALL: [Field; 18] = [
        Field::Name,
        Field::WorkType,
        Field::ResponsibleArea,
        Field::Neighborhood,
        Field::District,
        Field::ContractAmount,
        Field::Stage,
        Field::ContractingType,
        Field::ContractingNumber,
        Field::BiddingCompany,
        Field::FileNumber,
        Field::Featured,
        Field::StartDate,
        Field::InitialEndDate,
        Field::FundingSource,
        Field::ProgressPercentage,
        Field::TermMonths,
        Field::LaborCount,
    ];

    /// Canonical column name, used in the source header and the store.
    pub fn column(&self) -> &'static str {
        match self {
            Field::Name => "nombre",
            Field::WorkType => "tipo",
            Field::ResponsibleArea => "area",
            Field::Neighborhood => "barrio",
            Field::District => "comuna",
            Field::ContractAmount => "monto_contrato",
            Field::Stage => "etapa",
            Field::ContractingType => "contratacion_tipo",
            Field::ContractingNumber => "nro_contratacion",
            Field::BiddingCompany => "licitacion_oferta_empresa",
            Field::FileNumber => "expediente_numero",
            Field::Featured => "destacada",
            Field::StartDate => "fecha_inicio",
            Field::InitialEndDate => "fecha_fin_inicial",
            Field::FundingSource => "financiamiento",
            Field::ProgressPercentage => "porcentaje_avance",
            Field::TermMonths => "plazo_meses",
            Field::LaborCount => "mano_obra",
        }
    }

    /// Value kind of this field.
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::ContractAmount | Field::ProgressPercentage => FieldKind::Decimal,
            Field::TermMonths | Field::LaborCount => FieldKind::Integer,
            Field::Featured => FieldKind::Boolean,
            Field::StartDate | Field::InitialEndDate => FieldKind::Date,
            _ => FieldKind::Text,
        }
    }

    /// Look a field up by its canonical column name.
    pub fn from_column(column: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.column() == column)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}
