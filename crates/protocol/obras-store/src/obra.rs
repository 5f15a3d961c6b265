//! SQLite-based obra storage.
//!
//! This module implements [`ObraStore`] on a single owned SQLite
//! connection. The handle is opened with [`SqliteObraStore::connect`] and
//! released with [`SqliteObraStore::close`].

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{params, params_from_iter, Connection};

use obras_types::{Field, ManualObra, Obra};

use crate::error::{Result, StoreError};
use crate::query::{CountSum, Predicate, Value};
use crate::schema::initialize_schema;
use crate::traits::ObraStore;

/// SQLite-based obra store.
#[derive(Debug)]
pub struct SqliteObraStore {
    conn: Connection,
}

impl SqliteObraStore {
    /// Wrap an already open connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open (or create) the database file at `path`.
    ///
    /// Creates the parent directory if needed. Does not create the schema;
    /// call [`ObraStore::ensure_schema`] next.
    pub fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::info!(db_path = %path.display(), "Opening obras database");
        let conn = Connection::open(path)?;
        Ok(Self::new(conn))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    /// Close the connection, surfacing any error from SQLite.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| StoreError::Database(e))?;
        tracing::debug!("Closed obras database");
        Ok(())
    }

    /// Reject sums over non-numeric fields.
    fn ensure_numeric(field: Field) -> Result<()> {
        if field.kind().is_numeric() {
            Ok(())
        } else {
            Err(StoreError::NotNumeric(field))
        }
    }
}

impl ObraStore for SqliteObraStore {
    fn ensure_schema(&mut self) -> Result<()> {
        initialize_schema(&self.conn)
    }

    fn exists_by_name(&self, name: &str) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM obras WHERE nombre = ?1)",
            [name],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn insert(&mut self, obra: &Obra) -> Result<()> {
        self.conn.execute(
            "INSERT INTO obras (
                nombre, tipo, area, barrio, comuna, monto_contrato, etapa,
                contratacion_tipo, nro_contratacion, licitacion_oferta_empresa,
                expediente_numero, destacada, fecha_inicio, fecha_fin_inicial,
                financiamiento, porcentaje_avance, plazo_meses, mano_obra
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            params![
                obra.name,
                obra.work_type,
                obra.responsible_area,
                obra.neighborhood,
                obra.district,
                obra.contract_amount,
                obra.stage,
                obra.contracting_type,
                obra.contracting_number,
                obra.bidding_company,
                obra.file_number,
                obra.featured,
                obra.start_date.to_string(),
                obra.initial_end_date.to_string(),
                obra.funding_source,
                obra.progress_percentage,
                obra.term_months,
                obra.labor_count,
            ],
        )?;

        tracing::debug!(name = %obra.name, "Inserted obra");
        Ok(())
    }

    fn insert_manual(&mut self, obra: &ManualObra) -> Result<()> {
        self.conn.execute(
            "INSERT INTO obras (nombre, tipo, area, barrio, comuna, monto_contrato)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                obra.name,
                obra.work_type,
                obra.responsible_area,
                obra.neighborhood,
                obra.district,
                obra.contract_amount,
            ],
        )?;

        tracing::debug!(name = %obra.name, "Inserted manual obra");
        Ok(())
    }

    fn distinct_values_where(&self, field: Field, filter: &Predicate) -> Result<Vec<String>> {
        let column = field.column();
        let mut values: Vec<Value> = Vec::new();
        let condition = filter.to_sql(&mut values);

        let sql = format!(
            "SELECT DISTINCT CAST({column} AS TEXT) FROM obras
             WHERE {column} IS NOT NULL AND ({condition})
             ORDER BY 1"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(rows)
    }

    fn count_grouped_by(&self, field: Field) -> Result<BTreeMap<String, u64>> {
        let sql = format!(
            "SELECT COALESCE(CAST({} AS TEXT), ''), COUNT(*) FROM obras GROUP BY 1",
            field.column()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let groups = stmt
            .query_map([], |row| {
                let key: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((key, count as u64))
            })?
            .collect::<rusqlite::Result<BTreeMap<String, u64>>>()?;

        Ok(groups)
    }

    fn sum_grouped_by(&self, group: Field, sum_field: Field) -> Result<BTreeMap<String, CountSum>> {
        Self::ensure_numeric(sum_field)?;

        let sql = format!(
            "SELECT COALESCE(CAST({} AS TEXT), ''), COUNT(*), COALESCE(SUM({}), 0)
             FROM obras GROUP BY 1",
            group.column(),
            sum_field.column()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let groups = stmt
            .query_map([], |row| {
                let key: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                let sum: f64 = row.get(2)?;
                Ok((key, CountSum::new(count as u64, sum)))
            })?
            .collect::<rusqlite::Result<BTreeMap<String, CountSum>>>()?;

        Ok(groups)
    }

    fn count_where(&self, filter: &Predicate) -> Result<u64> {
        let mut values: Vec<Value> = Vec::new();
        let condition = filter.to_sql(&mut values);

        let sql = format!("SELECT COUNT(*) FROM obras WHERE {condition}");
        let count: i64 =
            self.conn
                .query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;

        Ok(count as u64)
    }

    fn sum_where(&self, filter: &Predicate, field: Field) -> Result<f64> {
        Self::ensure_numeric(field)?;

        let mut values: Vec<Value> = Vec::new();
        let condition = filter.to_sql(&mut values);

        let sql = format!(
            "SELECT COALESCE(SUM({}), 0) FROM obras WHERE {condition}",
            field.column()
        );
        let sum: f64 = self
            .conn
            .query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;

        Ok(sum)
    }
}
