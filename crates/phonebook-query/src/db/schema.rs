// SPDX-License-Identifier: Apache-2.0

pub(crate) const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS countries (
  code INTEGER PRIMARY KEY,
  name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS phones (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  country_code INTEGER,
  country_name TEXT NOT NULL,
  number TEXT NOT NULL,
  cust_id TEXT,
  phone_valid INTEGER NOT NULL,
  create_date TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_phones_number ON phones(number);
CREATE INDEX IF NOT EXISTS idx_phones_country_code ON phones(country_code, id);
CREATE INDEX IF NOT EXISTS idx_phones_valid ON phones(phone_valid, id);
CREATE INDEX IF NOT EXISTS idx_phones_create_date ON phones(create_date);
";

pub(crate) const DROP_SQL: &str = "
DROP TABLE IF EXISTS phones;
DROP TABLE IF EXISTS countries;
";
