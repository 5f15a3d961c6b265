//! Fault-injecting `ObraStore` wrapper for testing.
//!
//! Delegates to a real store and fails selected operations on demand, so
//! tests can exercise the pipeline's failure boundaries.

use std::collections::{BTreeMap, HashSet};

use obras_store::{CountSum, ObraStore, Predicate, Result, StoreError};
use obras_types::{Field, ManualObra, Obra};

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultOp {
    EnsureSchema,
    ExistsByName,
    Insert,
    InsertManual,
    DistinctValues,
    CountGroupedBy,
    SumGroupedBy,
    CountWhere,
    SumWhere,
}

/// A store that fails selected operations.
pub struct FaultyStore<S: ObraStore = obras_store::SqliteObraStore> {
    inner: S,
    failing: HashSet<FaultOp>,
    /// Inserts allowed before `insert` starts failing.
    insert_budget: Option<usize>,
    inserts: usize,
}

impl<S: ObraStore> FaultyStore<S> {
    /// Wrap a store with no faults enabled.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            failing: HashSet::new(),
            insert_budget: None,
            inserts: 0,
        }
    }

    /// Make an operation fail from now on.
    pub fn fail(&mut self, op: FaultOp) {
        self.failing.insert(op);
    }

    /// Builder form of [`FaultyStore::fail`].
    pub fn failing(mut self, op: FaultOp) -> Self {
        self.fail(op);
        self
    }

    /// Let the next `count` inserts succeed, then fail every insert.
    pub fn with_insert_budget(mut self, count: usize) -> Self {
        self.insert_budget = Some(count);
        self
    }

    /// Stop failing an operation.
    pub fn heal(&mut self, op: FaultOp) {
        self.failing.remove(&op);
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn check(&self, op: FaultOp) -> Result<()> {
        if self.failing.contains(&op) {
            Err(StoreError::invalid_data(format!("injected {:?} failure", op)))
        } else {
            Ok(())
        }
    }
}

impl<S: ObraStore> ObraStore for FaultyStore<S> {
    fn ensure_schema(&mut self) -> Result<()> {
        self.check(FaultOp::EnsureSchema)?;
        self.inner.ensure_schema()
    }

    fn exists_by_name(&self, name: &str) -> Result<bool> {
        self.check(FaultOp::ExistsByName)?;
        self.inner.exists_by_name(name)
    }

    fn insert(&mut self, obra: &Obra) -> Result<()> {
        self.check(FaultOp::Insert)?;
        if let Some(budget) = self.insert_budget {
            if self.inserts >= budget {
                return Err(StoreError::invalid_data("injected insert budget exhausted"));
            }
        }
        self.inner.insert(obra)?;
        self.inserts += 1;
        Ok(())
    }

    fn insert_manual(&mut self, obra: &ManualObra) -> Result<()> {
        self.check(FaultOp::InsertManual)?;
        self.inner.insert_manual(obra)
    }

    fn distinct_values_where(&self, field: Field, filter: &Predicate) -> Result<Vec<String>> {
        self.check(FaultOp::DistinctValues)?;
        self.inner.distinct_values_where(field, filter)
    }

    fn count_grouped_by(&self, field: Field) -> Result<BTreeMap<String, u64>> {
        self.check(FaultOp::CountGroupedBy)?;
        self.inner.count_grouped_by(field)
    }

    fn sum_grouped_by(&self, group: Field, sum_field: Field) -> Result<BTreeMap<String, CountSum>> {
        self.check(FaultOp::SumGroupedBy)?;
        self.inner.sum_grouped_by(group, sum_field)
    }

    fn count_where(&self, filter: &Predicate) -> Result<u64> {
        self.check(FaultOp::CountWhere)?;
        self.inner.count_where(filter)
    }

    fn sum_where(&self, filter: &Predicate, field: Field) -> Result<f64> {
        self.check(FaultOp::SumWhere)?;
        self.inner.sum_where(filter, field)
    }
}
