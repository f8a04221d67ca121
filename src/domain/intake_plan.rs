use std::collections::{BTreeMap, HashMap};

use crate::error::ConfigurationError;

/// Planned new students per department for years 1..=N.
///
/// Years are contiguous from 1. A department missing from a year has an
/// intake of 0 for that year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakePlan {
    rows: BTreeMap<u32, HashMap<String, u32>>,
}

impl IntakePlan {
    /// Builds a plan from `(year, intakes)` rows in any order. Each year may
    /// appear only once.
    pub fn new(rows: impl IntoIterator<Item = (u32, HashMap<String, u32>)>) -> Result<Self, ConfigurationError> {
        let mut plan_rows = BTreeMap::new();
        for (year, intakes) in rows {
            if plan_rows.insert(year, intakes).is_some() {
                return Err(ConfigurationError::DuplicatePlanRow { year });
            }
        }

        for (expected, year) in (1u32..).zip(plan_rows.keys()) {
            if *year != expected {
                return Err(ConfigurationError::NonContiguousPlan { expected, found: *year });
            }
        }

        Ok(Self { rows: plan_rows })
    }

    /// A plan with the same intake for every year.
    pub fn uniform(years: u32, intakes: &[(&str, u32)]) -> Self {
        let row: HashMap<String, u32> = intakes.iter().map(|(d, n)| (d.to_string(), *n)).collect();
        Self { rows: (1..=years).map(|y| (y, row.clone())).collect() }
    }

    pub fn years(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn row(&self, year: u32) -> Result<&HashMap<String, u32>, ConfigurationError> {
        self.rows.get(&year).ok_or(ConfigurationError::MissingPlanRow { year })
    }

    pub fn intake(&self, year: u32, department: &str) -> Result<u32, ConfigurationError> {
        Ok(self.row(year)?.get(department).copied().unwrap_or(0))
    }

    /// Fails with `MissingPlanRow` for the first year in 1..=years that has no row.
    pub fn ensure_covers(&self, years: u32) -> Result<(), ConfigurationError> {
        match (1..=years).find(|y| !self.rows.contains_key(y)) {
            Some(year) => Err(ConfigurationError::MissingPlanRow { year }),
            None => Ok(()),
        }
    }

    /// Fills `intake` for `department` in every year that does not list it.
    pub fn with_default_intake(mut self, department: &str, intake: u32) -> Self {
        for row in self.rows.values_mut() {
            row.entry(department.to_string()).or_insert(intake);
        }
        self
    }

    /// Department columns mentioned anywhere in the plan, sorted.
    pub fn departments(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rows.values().flat_map(|row| row.keys().map(String::as_str)).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
