use serde::Serialize;

use crate::domain::cohort::Headcount;
use crate::domain::department::DepartmentRegistry;
use crate::domain::intake_plan::IntakePlan;
use crate::error::ConfigurationError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentCohort {
    pub department: String,
    pub headcount: Headcount,
}

/// Headcounts of every registered department for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSnapshot {
    pub year: u32,
    pub cohorts: Vec<DepartmentCohort>,
}

impl YearSnapshot {
    pub fn headcount(&self, department: &str) -> Option<&Headcount> {
        self.cohorts.iter().find(|c| c.department == department).map(|c| &c.headcount)
    }

    pub fn total(&self) -> u64 {
        self.cohorts.iter().map(|c| c.headcount.total()).sum()
    }
}

/// Students of one department summed over all stages, for charting growth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentTotal {
    pub year: u32,
    pub department: String,
    pub total: u64,
}

/// Year 0 is the seed, every later year is derived from the one before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSnapshot {
    years: Vec<YearSnapshot>,
}

impl ProjectionSnapshot {
    /// Year-0 snapshot from the current enrollment of every registered department.
    pub fn seed(registry: &DepartmentRegistry) -> Self {
        let cohorts = registry
            .departments()
            .iter()
            .map(|d| DepartmentCohort { department: d.name.clone(), headcount: d.current })
            .collect();

        Self { years: vec![YearSnapshot { year: 0, cohorts }] }
    }

    pub fn years(&self) -> &[YearSnapshot] {
        &self.years
    }

    pub fn year(&self, year: u32) -> Option<&YearSnapshot> {
        self.years.get(year as usize)
    }

    pub fn last_year(&self) -> u32 {
        (self.years.len() - 1) as u32
    }

    pub fn headcount(&self, year: u32, department: &str) -> Option<&Headcount> {
        self.year(year)?.headcount(department)
    }

    pub fn department_totals(&self) -> Vec<DepartmentTotal> {
        self.years
            .iter()
            .flat_map(|snapshot| {
                snapshot.cohorts.iter().map(move |c| DepartmentTotal {
                    year: snapshot.year,
                    department: c.department.clone(),
                    total: c.headcount.total(),
                })
            })
            .collect()
    }

    fn push_next(&mut self, plan: &IntakePlan, prep_pass_rate: f64) -> Result<(), ConfigurationError> {
        let previous = &self.years[self.years.len() - 1];
        let year = previous.year + 1;

        let mut cohorts = Vec::with_capacity(previous.cohorts.len());
        for cohort in &previous.cohorts {
            let new_students = plan.intake(year, &cohort.department)? as f64;
            let direct_to_grade1 = new_students * prep_pass_rate;
            let stays_in_prep = new_students * (1.0 - prep_pass_rate);

            let headcount = cohort
                .headcount
                .advance(stays_in_prep, direct_to_grade1)
                .ok_or_else(|| ConfigurationError::HeadcountOverflow { year, department: cohort.department.clone() })?;

            cohorts.push(DepartmentCohort { department: cohort.department.clone(), headcount });
        }

        self.years.push(YearSnapshot { year, cohorts });
        Ok(())
    }
}

/// Rejects values outside [0, 1] (and NaN) instead of clamping them.
pub fn validate_rate(parameter: &'static str, value: f64) -> Result<f64, ConfigurationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigurationError::InvalidRate { parameter, value })
    }
}

/// Projects the registered departments `years` years ahead.
///
/// The returned snapshot holds years `0..=years`. With `years == 0` it is
/// exactly the seed.
pub fn project_students(
    registry: &DepartmentRegistry,
    plan: &IntakePlan,
    years: u32,
    prep_pass_rate: f64,
) -> Result<ProjectionSnapshot, ConfigurationError> {
    let prep_pass_rate = validate_rate("prep_pass_rate", prep_pass_rate)?;
    plan.ensure_covers(years)?;

    for department in plan.departments() {
        if registry.get(department).is_none() {
            log::warn!("Intake plan lists '{}', which is not a registered department; its intake is ignored.", department);
        }
    }

    let mut projection = ProjectionSnapshot::seed(registry);
    for _ in 0..years {
        projection.push_next(plan, prep_pass_rate)?;

        let snapshot = &projection.years[projection.years.len() - 1];
        log::debug!("Projected year {}: {} students in total.", snapshot.year, snapshot.total());
    }

    log::info!("Projected {} department(s) over {} year(s) with a prep pass rate of {}.", registry.len(), years, prep_pass_rate);

    Ok(projection)
}
