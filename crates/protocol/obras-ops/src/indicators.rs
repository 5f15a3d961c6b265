//! The fixed indicator battery.
//!
//! Each indicator runs its own queries. A failing indicator is recorded as
//! failed and the battery moves on to the next one.

use std::collections::BTreeMap;
use std::fmt;

use obras_store::{CountSum, ObraStore, Predicate};
use obras_types::{
    Field, COMUNA_1, INDICATOR_DISTRICTS, MAX_TERM_MONTHS, PERCENTAGE_DECIMALS, STAGE_FINISHED,
};
use serde::Serialize;

/// The ten indicators, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    /// Distinct responsible areas.
    ResponsibleAreas,
    /// Distinct work types.
    WorkTypes,
    /// Record count per stage.
    CountByStage,
    /// Count and contract-amount sum per work type.
    AmountByWorkType,
    /// Distinct neighborhoods within the indicator districts.
    NeighborhoodsInDistricts,
    /// Count and contract-amount sum of finished works in Comuna 1.
    FinishedInComuna1,
    /// Finished works with a term of at most 24 months.
    FinishedWithinTerm,
    /// Share of finished works over all records.
    FinishedPercentage,
    /// Total labor count.
    TotalLabor,
    /// Total contract amount.
    TotalInvestment,
}

impl IndicatorKind {
    /// Every indicator in report order.
    pub const ALL: [IndicatorKind; 10] = [
        IndicatorKind::ResponsibleAreas,
        IndicatorKind::WorkTypes,
        IndicatorKind::CountByStage,
        IndicatorKind::AmountByWorkType,
        IndicatorKind::NeighborhoodsInDistricts,
        IndicatorKind::FinishedInComuna1,
        IndicatorKind::FinishedWithinTerm,
        IndicatorKind::FinishedPercentage,
        IndicatorKind::TotalLabor,
        IndicatorKind::TotalInvestment,
    ];

    /// 1-based position in the report.
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            IndicatorKind::ResponsibleAreas => "Responsible areas",
            IndicatorKind::WorkTypes => "Work types",
            IndicatorKind::CountByStage => "Works per stage",
            IndicatorKind::AmountByWorkType => "Works and investment per work type",
            IndicatorKind::NeighborhoodsInDistricts => "Neighborhoods in Comunas 1, 2 and 3",
            IndicatorKind::FinishedInComuna1 => "Finished works in Comuna 1",
            IndicatorKind::FinishedWithinTerm => "Finished works with term up to 24 months",
            IndicatorKind::FinishedPercentage => "Finished works (%)",
            IndicatorKind::TotalLabor => "Total labor",
            IndicatorKind::TotalInvestment => "Total investment",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Value of a successful indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum IndicatorValue {
    /// Ordered distinct values.
    Values(Vec<String>),
    /// Count per group.
    Counts(BTreeMap<String, u64>),
    /// Count and sum per group.
    CountSums(BTreeMap<String, CountSum>),
    /// A single count and sum.
    CountSum(CountSum),
    /// A single count.
    Count(u64),
    /// A percentage rounded to two decimals.
    Percentage(f64),
    /// An integral total.
    Total(i64),
    /// A decimal total.
    Sum(f64),
}

/// One indicator result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicator {
    pub kind: IndicatorKind,
    pub result: Result<IndicatorValue, String>,
}

impl Indicator {
    /// Returns true if the indicator computed.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// The value, if the indicator computed.
    pub fn value(&self) -> Option<&IndicatorValue> {
        self.result.as_ref().ok()
    }
}

/// The ordered results of the indicator battery.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndicatorReport {
    pub indicators: Vec<Indicator>,
}

impl IndicatorReport {
    /// Result for one indicator.
    pub fn get(&self, kind: IndicatorKind) -> Option<&Indicator> {
        self.indicators.iter().find(|i| i.kind == kind)
    }

    /// Value for one indicator, if it computed.
    pub fn value(&self, kind: IndicatorKind) -> Option<&IndicatorValue> {
        self.get(kind).and_then(Indicator::value)
    }

    /// Number of failed indicators.
    pub fn failed(&self) -> usize {
        self.indicators.iter().filter(|i| !i.is_ok()).count()
    }
}

/// Percentage of finished works, rounded. Zero when there are no records.
pub fn finished_percentage(finished: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(finished as f64 * 100.0 / total as f64, PERCENTAGE_DECIMALS)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn finished() -> Predicate {
    Predicate::eq(Field::Stage, STAGE_FINISHED)
}

/// Compute a single indicator.
pub fn compute_indicator<S>(store: &S, kind: IndicatorKind) -> obras_store::Result<IndicatorValue>
where
    S: ObraStore + ?Sized,
{
    let value = match kind {
        IndicatorKind::ResponsibleAreas => {
            IndicatorValue::Values(store.distinct_values(Field::ResponsibleArea)?)
        }
        IndicatorKind::WorkTypes => IndicatorValue::Values(store.distinct_values(Field::WorkType)?),
        IndicatorKind::CountByStage => IndicatorValue::Counts(store.count_grouped_by(Field::Stage)?),
        IndicatorKind::AmountByWorkType => IndicatorValue::CountSums(
            store.sum_grouped_by(Field::WorkType, Field::ContractAmount)?,
        ),
        IndicatorKind::NeighborhoodsInDistricts => {
            // Filters the comuna column, unlike FinishedInComuna1 below.
            let filter = Predicate::one_of(Field::District, INDICATOR_DISTRICTS);
            IndicatorValue::Values(store.distinct_values_where(Field::Neighborhood, &filter)?)
        }
        IndicatorKind::FinishedInComuna1 => {
            // Compares the barrio column against "Comuna 1" as written.
            let filter = Predicate::eq(Field::Neighborhood, COMUNA_1).and(finished());
            let count = store.count_where(&filter)?;
            let sum = store.sum_where(&filter, Field::ContractAmount)?;
            IndicatorValue::CountSum(CountSum::new(count, sum))
        }
        IndicatorKind::FinishedWithinTerm => {
            let filter = finished().and(Predicate::at_most(Field::TermMonths, MAX_TERM_MONTHS));
            IndicatorValue::Count(store.count_where(&filter)?)
        }
        IndicatorKind::FinishedPercentage => {
            let done = store.count_where(&finished())?;
            let total = store.count_all()?;
            IndicatorValue::Percentage(finished_percentage(done, total))
        }
        IndicatorKind::TotalLabor => {
            IndicatorValue::Total(store.scalar_sum(Field::LaborCount)?.round() as i64)
        }
        IndicatorKind::TotalInvestment => {
            IndicatorValue::Sum(store.scalar_sum(Field::ContractAmount)?)
        }
    };
    Ok(value)
}

/// Run the whole battery. Never fails as a whole.
pub fn compute_indicators<S>(store: &S) -> IndicatorReport
where
    S: ObraStore + ?Sized,
{
    let indicators = IndicatorKind::ALL
        .iter()
        .map(|&kind| {
            let result = compute_indicator(store, kind).map_err(|e| {
                tracing::warn!(indicator = kind.number(), error = %e, "Indicator failed");
                e.to_string()
            });
            Indicator { kind, result }
        })
        .collect();

    let report = IndicatorReport { indicators };
    tracing::info!(failed = report.failed(), "Computed indicators");
    report
}
