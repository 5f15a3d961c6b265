//! Fixed business rules for the obras dataset.
//!
//! These constants pin down the one dataset shape the pipeline understands:
//! source column names, the featured token, and the filters used by the
//! indicator battery.

// =============================================================================
// Source Format
// =============================================================================

/// Field delimiter of the source file.
pub const SOURCE_DELIMITER: u8 = b';';

/// Historically inconsistent header for the file-number column.
pub const LEGACY_FILE_NUMBER_COLUMN: &str = "expediente-numero";

/// Canonical header for the file-number column.
pub const FILE_NUMBER_COLUMN: &str = "expediente_numero";

/// Header of the featured flag column.
pub const FEATURED_COLUMN: &str = "destacada";

/// The only source token that marks a work as featured.
pub const FEATURED_TOKEN: &str = "SI";

// =============================================================================
// Indicator Filters
// =============================================================================

/// Stage value of a completed work.
pub const STAGE_FINISHED: &str = "Finalizada";

/// Districts included in the neighborhoods indicator.
pub const INDICATOR_DISTRICTS: [&str; 3] = ["Comuna 1", "Comuna 2", "Comuna 3"];

/// Neighborhood value used by the finished-in-comuna-1 indicator.
pub const COMUNA_1: &str = "Comuna 1";

/// Upper bound (inclusive) of the finished-within-term indicator.
pub const MAX_TERM_MONTHS: i64 = 24;

/// Decimal places kept by percentage indicators.
pub const PERCENTAGE_DECIMALS: i32 = 2;
