// SPDX-License-Identifier: Apache-2.0

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Country name, assigned code and the suffix pattern a number must match.
///
/// Patterns are anchored at the end only. Digit classes are spelled `[0-9]`
/// so that non-ASCII digits never validate.
pub const COUNTRY_RULES: [(&str, u16, &str); 5] = [
    ("Cameroon", 237, r"\(237\) ?[2368][0-9]{7,8}$"),
    ("Ethiopia", 251, r"\(251\) ?[1-59][0-9]{8}$"),
    ("Morocco", 212, r"\(212\) ?[5-9][0-9]{8}$"),
    ("Mozambique", 258, r"\(258\) ?[28][0-9]{7,8}$"),
    ("Uganda", 256, r"\(256\) ?[0-9]{9}$"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    pub country_code: Option<u16>,
    pub valid: bool,
}

impl Validation {
    const UNKNOWN_COUNTRY: Self = Self {
        country_code: None,
        valid: false,
    };
}

#[derive(Debug, Clone)]
pub struct CountryRule {
    pub code: u16,
    pattern: Regex,
}

impl CountryRule {
    #[must_use]
    pub fn matches(&self, number: &str) -> bool {
        self.pattern.is_match(number)
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Lookup table from country name to its compiled rule.
#[derive(Debug, Clone)]
pub struct PhoneValidator {
    rules: HashMap<String, CountryRule>,
}

impl PhoneValidator {
    pub fn new<'a, I>(rules: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (&'a str, u16, &'a str)>,
    {
        let mut table = HashMap::new();
        for (name, code, pattern) in rules {
            table.insert(
                name.to_string(),
                CountryRule {
                    code,
                    pattern: Regex::new(pattern)?,
                },
            );
        }
        Ok(Self { rules: table })
    }

    /// Validator over [`COUNTRY_RULES`], compiled once per process.
    #[must_use]
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<PhoneValidator> = OnceLock::new();
        // COUNTRY_RULES is a constant table; `standard_table_covers_every_rule`
        // compiles every entry.
        STANDARD.get_or_init(|| Self::new(COUNTRY_RULES).expect("built-in country patterns compile"))
    }

    #[must_use]
    pub fn rule(&self, country_name: &str) -> Option<&CountryRule> {
        self.rules.get(country_name)
    }

    /// Unknown country names yield `valid = false` with no code; that is a
    /// normal outcome, not an error.
    #[must_use]
    pub fn validate(&self, country_name: &str, number: &str) -> Validation {
        match self.rule(country_name) {
            Some(rule) => Validation {
                country_code: Some(rule.code),
                valid: rule.matches(number),
            },
            None => Validation::UNKNOWN_COUNTRY,
        }
    }
}
