// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use phonebook_model::PhoneRecord;

pub(crate) const PHONE_COLUMNS: &str =
    "id, country_code, country_name, number, cust_id, phone_valid, create_date";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawPhoneRow {
    pub id: i64,
    pub country_code: Option<i64>,
    pub country_name: String,
    pub number: String,
    pub cust_id: Option<String>,
    pub phone_valid: bool,
    pub create_date: DateTime<Utc>,
}

impl RawPhoneRow {
    pub fn from_sql_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get::<_, i64>(0)?,
            country_code: row.get::<_, Option<i64>>(1)?,
            country_name: row.get::<_, String>(2)?,
            number: row.get::<_, String>(3)?,
            cust_id: row.get::<_, Option<String>>(4)?,
            phone_valid: row.get::<_, bool>(5)?,
            create_date: row.get::<_, DateTime<Utc>>(6)?,
        })
    }

    /// Out-of-range integers (a hand-edited database) are reported rather
    /// than truncated.
    pub fn into_record(self) -> Result<PhoneRecord, String> {
        let id = u64::try_from(self.id).map_err(|_| format!("row id {} is negative", self.id))?;
        let country_code = self
            .country_code
            .map(u16::try_from)
            .transpose()
            .map_err(|_| format!("row {id} has an out-of-range country code"))?;
        Ok(PhoneRecord {
            id,
            country_code,
            country_name: self.country_name,
            number: self.number,
            cust_id: self.cust_id,
            phone_valid: self.phone_valid,
            create_date: self.create_date,
        })
    }
}
