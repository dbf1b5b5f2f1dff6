// SPDX-License-Identifier: Apache-2.0

mod schema;

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use phonebook_model::{reference_countries, Country, PhoneRecord, ValidatedPhone};
use rusqlite::{params, params_from_iter, types::Value, Connection, OptionalExtension};
use tracing::info;

use crate::filters::PhoneFilter;
use crate::row_decode::{RawPhoneRow, PHONE_COLUMNS};
use crate::store::{PhoneStore, RecordQuery, StoreError};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed [`PhoneStore`]. One connection, serialized behind a mutex;
/// callers on async runtimes are expected to use a blocking pool.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Creates missing tables and indexes. Idempotent.
    pub fn migrate(&self) -> Result<(), StoreError> {
        self.lock().execute_batch(schema::SCHEMA_SQL)?;
        Ok(())
    }

    /// Drops all data and recreates the schema.
    pub fn reset(&self) -> Result<(), StoreError> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        tx.execute_batch(schema::DROP_SQL)?;
        tx.execute_batch(schema::SCHEMA_SQL)?;
        tx.commit()?;
        info!("phone tables reset");
        Ok(())
    }

    /// Inserts the reference countries that are not present yet.
    pub fn seed_countries(&self) -> Result<usize, StoreError> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare("INSERT OR IGNORE INTO countries(code, name) VALUES (?1, ?2)")?;
            for country in reference_countries() {
                inserted += stmt.execute(params![country.code, country.name])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(crate) fn build_where(filter: &PhoneFilter, before_id: Option<u64>) -> (String, Vec<Value>) {
    let mut where_parts: Vec<&str> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(number) = &filter.phone_number {
        where_parts.push("number = ?");
        params.push(Value::Text(number.clone()));
    }
    if let Some(code) = filter.country_code {
        where_parts.push("country_code = ?");
        params.push(Value::Integer(i64::from(code)));
    }
    if let Some(valid) = filter.validity.as_bool() {
        where_parts.push("phone_valid = ?");
        params.push(Value::Integer(i64::from(valid)));
    }
    if let Some(id) = before_id {
        where_parts.push("id < ?");
        params.push(Value::Integer(i64::try_from(id).unwrap_or(i64::MAX)));
    }

    if where_parts.is_empty() {
        (String::new(), params)
    } else {
        (format!(" WHERE {}", where_parts.join(" AND ")), params)
    }
}

fn decode_row(raw: RawPhoneRow) -> Result<PhoneRecord, StoreError> {
    raw.into_record().map_err(StoreError)
}

impl PhoneStore for SqliteStore {
    fn create(&self, phone: &ValidatedPhone) -> Result<PhoneRecord, StoreError> {
        let input = phone.input();
        let sql = format!(
            "INSERT INTO phones(country_code, country_name, number, cust_id, phone_valid, create_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING {PHONE_COLUMNS}"
        );
        let raw = self.lock().query_row(
            &sql,
            params![
                phone.country_code(),
                input.country_name(),
                input.number(),
                input.cust_id(),
                phone.phone_valid(),
                Utc::now(),
            ],
            RawPhoneRow::from_sql_row,
        )?;
        decode_row(raw)
    }

    fn find_by_id(&self, id: u64) -> Result<Option<PhoneRecord>, StoreError> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };
        let sql = format!("SELECT {PHONE_COLUMNS} FROM phones WHERE id = ?1");
        let raw = self
            .lock()
            .query_row(&sql, params![id], RawPhoneRow::from_sql_row)
            .optional()?;
        raw.map(decode_row).transpose()
    }

    fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(false);
        };
        let affected = self
            .lock()
            .execute("DELETE FROM phones WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn query(&self, query: &RecordQuery<'_>) -> Result<Vec<PhoneRecord>, StoreError> {
        let (where_sql, mut params) = build_where(query.filter, query.before_id);
        let sql = format!("SELECT {PHONE_COLUMNS} FROM phones{where_sql} ORDER BY id DESC LIMIT ?");
        params.push(Value::Integer(
            i64::try_from(query.limit).unwrap_or(i64::MAX),
        ));

        let conn = self.lock();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(params.iter()), RawPhoneRow::from_sql_row)?;
        let mut out = Vec::with_capacity(query.limit.min(64));
        for row in rows {
            out.push(decode_row(row?)?);
        }
        Ok(out)
    }

    fn count(&self, filter: &PhoneFilter) -> Result<u64, StoreError> {
        let (where_sql, params) = build_where(filter, None);
        let sql = format!("SELECT COUNT(*) FROM phones{where_sql}");
        let n: i64 = self
            .lock()
            .query_row(&sql, params_from_iter(params.iter()), |r| r.get(0))?;
        u64::try_from(n).map_err(|_| StoreError(format!("negative row count {n}")))
    }

    fn countries(&self) -> Result<Vec<Country>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT code, name FROM countries ORDER BY name")?;
        let rows = stmt.query_map([], |r| Ok(Country::new(r.get::<_, u16>(0)?, r.get::<_, String>(1)?)))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}
