// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Reference set seeded at startup and never mutated afterwards.
pub const REFERENCE_COUNTRIES: [(u16, &str); 5] = [
    (237, "Cameroon"),
    (251, "Ethiopia"),
    (212, "Morocco"),
    (258, "Mozambique"),
    (256, "Uganda"),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    pub code: u16,
    pub name: String,
}

impl Country {
    #[must_use]
    pub fn new(code: u16, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

#[must_use]
pub fn reference_countries() -> Vec<Country> {
    REFERENCE_COUNTRIES
        .iter()
        .map(|(code, name)| Country::new(*code, *name))
        .collect()
}

#[must_use]
pub fn country_code_for(name: &str) -> Option<u16> {
    REFERENCE_COUNTRIES
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(code, _)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_set_has_five_distinct_codes() {
        let countries = reference_countries();
        assert_eq!(countries.len(), 5);
        let mut codes: Vec<u16> = countries.iter().map(|c| c.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 5);
    }

    #[test]
    fn country_lookup_is_case_sensitive() {
        assert_eq!(country_code_for("Morocco"), Some(212));
        assert_eq!(country_code_for("morocco"), None);
    }
}
