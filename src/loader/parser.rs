use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::io::Read;

use crate::domain::intake_plan::IntakePlan;
use crate::error::{ConfigurationError, Result};

const YEAR_COLUMN: &str = "year";

/// Parses a JSON file into a given type `T`.
///
/// Errors are converted into `crate::error::Error` variants:
/// - `Error::IoError` if the file cannot be read.
/// - `Error::DeserializationError` if the JSON is malformed.
pub fn parse_json_file<T: DeserializeOwned>(file_path: &str) -> Result<T> {
    let data = fs::read_to_string(file_path)?;
    let parsed_data: T = serde_json::from_str(&data)?;

    Ok(parsed_data)
}

/// Reads an intake plan CSV file. See [`parse_intake_plan`] for the layout.
pub fn parse_intake_plan_file(file_path: &str) -> Result<IntakePlan> {
    let file = fs::File::open(file_path)?;
    parse_intake_plan(file)
}

/// Reads an intake plan in CSV form.
///
/// The header row holds a `Year` column (any case) and one column per
/// department. Every data row is one year; cells are non-negative integers,
/// empty cells count as 0.
pub fn parse_intake_plan<R: Read>(reader: R) -> Result<IntakePlan> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let year_index = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(YEAR_COLUMN))
        .ok_or(ConfigurationError::MissingYearColumn)?;

    let mut rows = Vec::new();
    for (row_index, record) in csv_reader.records().enumerate() {
        let record = record?;

        let year_cell = record.get(year_index).unwrap_or_default();
        let year: u32 = year_cell
            .parse()
            .map_err(|_| ConfigurationError::InvalidYearCell { row: row_index + 1, value: year_cell.to_string() })?;

        let mut intakes = HashMap::new();
        for (index, department) in headers.iter().enumerate() {
            if index == year_index {
                continue;
            }

            let cell = record.get(index).unwrap_or_default();
            if cell.is_empty() {
                continue;
            }

            let intake: u32 = cell.parse().map_err(|_| ConfigurationError::InvalidIntakeCell {
                year,
                department: department.to_string(),
                value: cell.to_string(),
            })?;
            intakes.insert(department.to_string(), intake);
        }

        rows.push((year, intakes));
    }

    log::info!("Parsed intake plan with {} year(s) and {} department column(s).", rows.len(), headers.len() - 1);

    Ok(IntakePlan::new(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_intake_plan() {
        let data = "Year,Computer,Food,Industrial\n1,60,30,30\n2,65,,30\n";
        let plan = parse_intake_plan(data.as_bytes()).unwrap();

        assert_eq!(plan.years(), 2);
        assert_eq!(plan.intake(1, "Computer").unwrap(), 60);
        assert_eq!(plan.intake(2, "Computer").unwrap(), 65);
        assert_eq!(plan.intake(2, "Food").unwrap(), 0);
    }

    #[test]
    fn test_year_column_may_be_anywhere() {
        let data = "Computer, YEAR\n12, 1\n";
        let plan = parse_intake_plan(data.as_bytes()).unwrap();
        assert_eq!(plan.intake(1, "Computer").unwrap(), 12);
    }

    #[test]
    fn test_negative_cell_is_rejected() {
        let data = "Year,Computer\n1,-5\n";
        let err = parse_intake_plan(data.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::InvalidIntakeCell { year: 1, ref department, .. }) if department == "Computer"
        ));
    }

    #[test]
    fn test_repeated_year_row_is_rejected() {
        let err = parse_intake_plan("Year,Computer\n1,60\n1,999\n2,60\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Configuration(ConfigurationError::DuplicatePlanRow { year: 1 })));
    }

    #[test]
    fn test_unreadable_year_reports_row() {
        let err = parse_intake_plan("Year,Computer\n1,60\nnext,60\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::InvalidYearCell { row: 2, ref value }) if value == "next"
        ));
    }

    #[test]
    fn test_missing_year_column() {
        let err = parse_intake_plan("Computer,Food\n1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Configuration(ConfigurationError::MissingYearColumn)));
    }

    #[test]
    fn test_gap_in_years() {
        let err = parse_intake_plan("Year,Computer\n1,5\n3,5\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Configuration(ConfigurationError::NonContiguousPlan { expected: 2, found: 3 })));
    }
}
