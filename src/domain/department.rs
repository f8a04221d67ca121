use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::domain::cohort::Headcount;
use crate::error::ConfigurationError;

/// Weekly hours used when a curriculum does not list the requested semester.
pub const FALLBACK_WEEKLY_HOURS: u32 = 20;

/// Upper bound for new departments opened over the life of a registry.
pub const MAX_NEW_DEPARTMENTS: u32 = 5;

/// Weekly teaching hours per semester (1..=8) of one department.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Curriculum {
    weekly_hours: BTreeMap<u8, u32>,
}

impl Curriculum {
    /// Validated curriculum of `department`: semesters must lie in 1..=8 and
    /// weekly hours must be positive.
    pub fn try_new(department: &str, weekly_hours: BTreeMap<u8, u32>) -> Result<Self, ConfigurationError> {
        for (&semester, &hours) in &weekly_hours {
            if !(1..=8).contains(&semester) {
                return Err(ConfigurationError::InvalidSemester { department: department.to_string(), semester });
            }
            if hours == 0 {
                return Err(ConfigurationError::InvalidWeeklyHours { department: department.to_string(), semester });
            }
        }

        Ok(Self { weekly_hours })
    }

    pub fn from_pairs(pairs: &[(u8, u32)]) -> Self {
        Self { weekly_hours: pairs.iter().copied().collect() }
    }

    pub fn hours_for(&self, semester: u8) -> u32 {
        self.weekly_hours.get(&semester).copied().unwrap_or(FALLBACK_WEEKLY_HOURS)
    }
}

/// A department after registration: its curriculum is always resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Department {
    pub name: String,
    pub curriculum: Curriculum,
    pub current: Headcount,
    /// True when the curriculum was copied from the default department.
    pub uses_default_curriculum: bool,
}

/// Department name -> curriculum, with an explicitly named default for
/// departments that have no entry.
#[derive(Debug, Clone)]
pub struct CurriculumTable {
    entries: HashMap<String, Curriculum>,
    default_department: String,
    default_curriculum: Curriculum,
}

impl CurriculumTable {
    pub fn new(default_department: impl Into<String>, default_curriculum: Curriculum) -> Self {
        Self { entries: HashMap::new(), default_department: default_department.into(), default_curriculum }
    }

    pub fn insert(&mut self, department: impl Into<String>, curriculum: Curriculum) {
        self.entries.insert(department.into(), curriculum);
    }

    pub fn default_department(&self) -> &str {
        &self.default_department
    }

    pub fn curriculum_for(&self, department: &str) -> &Curriculum {
        self.entries.get(department).unwrap_or(&self.default_curriculum)
    }

    pub fn weekly_hours(&self, department: &str, semester: u8) -> u32 {
        self.curriculum_for(department).hours_for(semester)
    }
}

/// Ordered set of active departments.
///
/// Departments only enter the model through `register`, which resolves the
/// curriculum up front so nothing downstream has to guess.
#[derive(Debug, Clone)]
pub struct DepartmentRegistry {
    departments: Vec<Department>,
    default_department: String,
    default_curriculum: Curriculum,
    opened: u32,
}

impl DepartmentRegistry {
    pub fn new(default_department: impl Into<String>, default_curriculum: Curriculum) -> Self {
        Self { departments: Vec::new(), default_department: default_department.into(), default_curriculum, opened: 0 }
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        curriculum: Option<Curriculum>,
        current: Option<Headcount>,
    ) -> Result<&Department, ConfigurationError> {
        let name = name.into();

        if self.get(&name).is_some() {
            return Err(ConfigurationError::DuplicateDepartment { name });
        }

        let uses_default_curriculum = curriculum.is_none();
        let curriculum = match curriculum {
            Some(curriculum) => curriculum,
            None => {
                log::warn!(
                    "Department '{}' has no curriculum; using the curriculum of default department '{}'.",
                    name,
                    self.default_department
                );
                self.default_curriculum.clone()
            }
        };

        log::debug!("Registered department '{}'.", name);

        self.departments.push(Department { name, curriculum, current: current.unwrap_or_default(), uses_default_curriculum });
        Ok(&self.departments[self.departments.len() - 1])
    }

    /// Opens `count` new departments named `New Department <n>` with the default
    /// curriculum and no current students. Returns the names in order.
    ///
    /// The cap counts every department opened so far, not just this call.
    pub fn register_new_departments(&mut self, count: u32) -> Result<Vec<String>, ConfigurationError> {
        if self.opened.saturating_add(count) > MAX_NEW_DEPARTMENTS {
            return Err(ConfigurationError::TooManyNewDepartments {
                requested: count,
                already_open: self.opened,
                max: MAX_NEW_DEPARTMENTS,
            });
        }

        let mut names = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let name = format!("New Department {}", self.opened + 1);
            let curriculum = self.default_curriculum.clone();
            self.register(name.clone(), Some(curriculum), None)?;
            if let Some(department) = self.departments.last_mut() {
                department.uses_default_curriculum = true;
            }
            self.opened += 1;
            names.push(name);
        }

        if count > 0 {
            log::info!("Opened {} new department(s): {}", count, names.join(", "));
        }

        Ok(names)
    }

    pub fn get(&self, name: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.name == name)
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn names(&self) -> Vec<&str> {
        self.departments.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    pub fn curriculum_table(&self) -> CurriculumTable {
        let mut table = CurriculumTable::new(self.default_department.clone(), self.default_curriculum.clone());
        for department in &self.departments {
            table.insert(department.name.clone(), department.curriculum.clone());
        }
        table
    }
}
