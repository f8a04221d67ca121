use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse scenario JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to read or write CSV data: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid planning configuration: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Caller misconfiguration. Never recovered from, the input has to be fixed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Intake plan has no row for year {year}")]
    MissingPlanRow { year: u32 },

    #[error("Intake plan lists year {year} more than once")]
    DuplicatePlanRow { year: u32 },

    #[error("Intake plan years must be contiguous from 1: expected year {expected}, found {found}")]
    NonContiguousPlan { expected: u32, found: u32 },

    #[error("Parameter '{parameter}' must lie within [0, 1], got {value}")]
    InvalidRate { parameter: &'static str, value: f64 },

    #[error("Parameter '{parameter}' must be greater than zero, got {value}")]
    InvalidSizeLimit { parameter: &'static str, value: u32 },

    #[error("Years to project must be at least 1, got {value}")]
    InvalidYears { value: u32 },

    #[error("Department '{name}' is registered more than once")]
    DuplicateDepartment { name: String },

    #[error("Default curriculum department '{name}' is not registered with a curriculum")]
    UnknownDefaultCurriculum { name: String },

    #[error("At most {max} new departments can be opened, {already_open} open and {requested} more requested")]
    TooManyNewDepartments { requested: u32, already_open: u32, max: u32 },

    #[error("Curriculum of department '{department}' lists semester {semester}; semesters run from 1 to 8")]
    InvalidSemester { department: String, semester: u8 },

    #[error("Curriculum of department '{department}' has 0 weekly hours for semester {semester}; weekly hours must be positive")]
    InvalidWeeklyHours { department: String, semester: u8 },

    #[error("Headcount of department '{department}' in year {year} exceeds the supported range")]
    HeadcountOverflow { year: u32, department: String },

    #[error("Room or slot demand in year {year} overflows while adding department '{department}'")]
    CapacityOverflow { year: u32, department: String },

    #[error("Intake for department '{department}' in year {year} is not a non-negative integer: '{value}'")]
    InvalidIntakeCell { year: u32, department: String, value: String },

    #[error("Year cell in data row {row} of the intake plan is not a year number: '{value}'")]
    InvalidYearCell { row: usize, value: String },

    #[error("Intake plan CSV has no 'Year' column")]
    MissingYearColumn,
}

pub type Result<T> = std::result::Result<T, Error>;
