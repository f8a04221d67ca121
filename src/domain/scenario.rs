use crate::api::department_dto::HeadcountDto;
use crate::api::scenario_dto::ScenarioDto;
use crate::domain::capacity::{CapacityParameters, CapacityReport, calculate_capacity};
use crate::domain::cohort::Headcount;
use crate::domain::department::{Curriculum, DepartmentRegistry};
use crate::domain::intake_plan::IntakePlan;
use crate::domain::projection::{ProjectionSnapshot, project_students, validate_rate};
use crate::domain::room::{Room, RoomInventory};
use crate::error::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioParameters {
    pub years_to_project: u32,
    pub prep_pass_rate: f64,
    pub capacity: CapacityParameters,
}

impl ScenarioParameters {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.years_to_project == 0 {
            return Err(ConfigurationError::InvalidYears { value: self.years_to_project });
        }
        validate_rate("prep_pass_rate", self.prep_pass_rate)?;
        self.capacity.validate()
    }
}

/// Everything a single planning run needs.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub registry: DepartmentRegistry,
    pub rooms: RoomInventory,
    pub intake_plan: IntakePlan,
    pub parameters: ScenarioParameters,
    /// Intake planned for opened departments in years that do not list them.
    pub new_department_intake: u32,
    opened_departments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub projection: ProjectionSnapshot,
    pub report: CapacityReport,
}

impl Scenario {
    pub fn new(
        registry: DepartmentRegistry,
        rooms: RoomInventory,
        intake_plan: IntakePlan,
        parameters: ScenarioParameters,
    ) -> Self {
        Self {
            registry,
            rooms,
            intake_plan,
            parameters,
            new_department_intake: crate::api::scenario_dto::DEFAULT_NEW_DEPARTMENT_INTAKE,
            opened_departments: Vec::new(),
        }
    }

    /// Registers `count` new departments and plans `new_department_intake`
    /// students for them in every year.
    pub fn open_new_departments(&mut self, count: u32) -> Result<(), ConfigurationError> {
        let names = self.registry.register_new_departments(count)?;

        for name in &names {
            self.intake_plan = std::mem::take(&mut self.intake_plan).with_default_intake(name, self.new_department_intake);
        }
        self.opened_departments.extend(names);

        Ok(())
    }

    /// Replaces the intake plan, keeping the default intake of opened departments.
    pub fn replace_intake_plan(&mut self, plan: IntakePlan) {
        let mut plan = plan;
        for name in &self.opened_departments {
            plan = plan.with_default_intake(name, self.new_department_intake);
        }
        self.intake_plan = plan;
    }

    pub fn opened_departments(&self) -> &[String] {
        &self.opened_departments
    }

    /// Projects the cohorts and derives the capacity report.
    pub fn run(&self) -> Result<ScenarioOutcome, ConfigurationError> {
        self.parameters.validate()?;

        log::info!(
            "Running scenario: {} department(s), {} room(s), {} year(s).",
            self.registry.len(),
            self.rooms.count(),
            self.parameters.years_to_project
        );

        let projection = project_students(
            &self.registry,
            &self.intake_plan,
            self.parameters.years_to_project,
            self.parameters.prep_pass_rate,
        )?;

        let curriculum = self.registry.curriculum_table();
        let report = calculate_capacity(&projection, &curriculum, &self.rooms, &self.parameters.capacity)?;

        if report.has_shortfall() {
            log::warn!(
                "Slot demand exceeds effective capacity at {:.0}% utilization in year(s) {:?}.",
                report.utilization_target * 100.0,
                report.shortfall_years()
            );
        } else {
            log::info!("Effective capacity covers slot demand in every year.");
        }

        Ok(ScenarioOutcome { projection, report })
    }
}

fn map_headcount(dto: HeadcountDto) -> Headcount {
    Headcount {
        preparatory: dto.preparatory,
        grade1: dto.grade1,
        grade2: dto.grade2,
        grade3: dto.grade3,
        grade4: dto.grade4,
    }
}

impl TryFrom<ScenarioDto> for Scenario {
    type Error = ConfigurationError;

    fn try_from(dto: ScenarioDto) -> Result<Self, Self::Error> {
        let default_hours = dto
            .departments
            .iter()
            .find(|d| d.name == dto.default_curriculum)
            .and_then(|d| d.curriculum.clone())
            .ok_or_else(|| ConfigurationError::UnknownDefaultCurriculum { name: dto.default_curriculum.clone() })?;
        let default_curriculum = Curriculum::try_new(&dto.default_curriculum, default_hours)?;

        let mut registry = DepartmentRegistry::new(dto.default_curriculum.clone(), default_curriculum);
        for department in dto.departments {
            let curriculum = department.curriculum.map(|hours| Curriculum::try_new(&department.name, hours)).transpose()?;
            registry.register(department.name, curriculum, department.current_students.map(map_headcount))?;
        }

        let rooms = RoomInventory::new(dto.rooms.into_iter().map(|r| Room { name: r.name, capacity: r.capacity }).collect());

        let intake_plan = IntakePlan::new(dto.intake_plan.into_iter().map(|row| (row.year, row.intakes)))?;

        let parameters = ScenarioParameters {
            years_to_project: dto.years_to_project,
            prep_pass_rate: dto.parameters.prep_pass_rate,
            capacity: CapacityParameters {
                prep_max_size: dto.parameters.prep_max_size,
                dept_max_size: dto.parameters.dept_max_size,
                utilization_target: dto.parameters.utilization_target,
            },
        };

        let mut scenario = Scenario::new(registry, rooms, intake_plan, parameters);
        scenario.new_department_intake = dto.new_department_intake;
        scenario.open_new_departments(dto.new_departments)?;

        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::department_dto::DepartmentDto;
    use crate::api::intake_plan_dto::IntakeRowDto;
    use crate::api::room_dto::RoomDto;
    use crate::api::scenario_dto::ParametersDto;
    use std::collections::{BTreeMap, HashMap};

    fn mock_scenario_dto() -> ScenarioDto {
        let curriculum: BTreeMap<u8, u32> = [(1, 28), (3, 23), (5, 17), (7, 15)].into_iter().collect();

        ScenarioDto {
            years_to_project: 2,
            parameters: ParametersDto { prep_pass_rate: 0.1, utilization_target: 0.8, prep_max_size: 18, dept_max_size: 40 },
            default_curriculum: "Computer".to_string(),
            departments: vec![
                DepartmentDto {
                    name: "Computer".to_string(),
                    curriculum: Some(curriculum),
                    current_students: Some(HeadcountDto { preparatory: 46, grade1: 32, grade2: 7, ..Default::default() }),
                },
                DepartmentDto { name: "Food".to_string(), curriculum: None, current_students: None },
            ],
            new_departments: 1,
            new_department_intake: 30,
            rooms: vec![RoomDto { name: "208".to_string(), capacity: 30 }, RoomDto { name: "202".to_string(), capacity: 100 }],
            intake_plan: (1..=2)
                .map(|year| IntakeRowDto { year, intakes: HashMap::from([("Computer".to_string(), 60)]) })
                .collect(),
        }
    }

    #[test]
    fn test_try_from_builds_registry_and_plan() {
        let scenario = Scenario::try_from(mock_scenario_dto()).unwrap();

        assert_eq!(scenario.registry.names(), vec!["Computer", "Food", "New Department 1"]);
        assert!(scenario.registry.get("Food").unwrap().uses_default_curriculum);
        assert_eq!(scenario.rooms.count(), 2);
        assert_eq!(scenario.intake_plan.intake(2, "New Department 1").unwrap(), 30);
        assert_eq!(scenario.intake_plan.intake(2, "Food").unwrap(), 0);
        assert_eq!(scenario.opened_departments(), ["New Department 1".to_string()]);
    }

    #[test]
    fn test_unknown_default_curriculum() {
        let mut dto = mock_scenario_dto();
        dto.default_curriculum = "Physics".to_string();

        let err = Scenario::try_from(dto).unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownDefaultCurriculum { name: "Physics".to_string() });
    }

    #[test]
    fn test_invalid_curricula_are_rejected() {
        let mut dto = mock_scenario_dto();
        dto.departments[1].curriculum = Some(BTreeMap::from([(1, 27), (12, 20)]));
        assert_eq!(
            Scenario::try_from(dto).unwrap_err(),
            ConfigurationError::InvalidSemester { department: "Food".to_string(), semester: 12 }
        );

        let mut dto = mock_scenario_dto();
        dto.departments[0].curriculum = Some(BTreeMap::from([(1, 0)]));
        assert_eq!(
            Scenario::try_from(dto).unwrap_err(),
            ConfigurationError::InvalidWeeklyHours { department: "Computer".to_string(), semester: 1 }
        );
    }

    #[test]
    fn test_new_department_cap_counts_scenario_departments() {
        let mut scenario = Scenario::try_from(mock_scenario_dto()).unwrap();
        scenario.open_new_departments(4).unwrap();

        let err = scenario.open_new_departments(1).unwrap_err();
        assert_eq!(err, ConfigurationError::TooManyNewDepartments { requested: 1, already_open: 5, max: 5 });
        assert_eq!(scenario.opened_departments().len(), 5);
    }

    #[test]
    fn test_replaced_plan_keeps_new_department_intake() {
        let mut scenario = Scenario::try_from(mock_scenario_dto()).unwrap();
        scenario.replace_intake_plan(IntakePlan::uniform(3, &[("Computer", 10)]));

        assert_eq!(scenario.intake_plan.years(), 3);
        assert_eq!(scenario.intake_plan.intake(3, "New Department 1").unwrap(), 30);
    }

    #[test]
    fn test_run_is_idempotent() {
        let scenario = Scenario::try_from(mock_scenario_dto()).unwrap();

        let first = scenario.run().unwrap();
        let second = scenario.run().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.report.rows().len(), 3);
    }

    #[test]
    fn test_run_rejects_zero_years() {
        let mut scenario = Scenario::try_from(mock_scenario_dto()).unwrap();
        scenario.parameters.years_to_project = 0;

        assert_eq!(scenario.run().unwrap_err(), ConfigurationError::InvalidYears { value: 0 });
    }
}
