use serde::{Deserialize, Serialize};

use crate::api::department_dto::DepartmentDto;
use crate::api::intake_plan_dto::IntakeRowDto;
use crate::api::room_dto::RoomDto;

pub const DEFAULT_NEW_DEPARTMENT_INTAKE: u32 = 30;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDto {
    pub years_to_project: u32,
    pub parameters: ParametersDto,

    /// Name of the department whose curriculum is used by departments without one.
    pub default_curriculum: String,

    pub departments: Vec<DepartmentDto>,

    #[serde(default)]
    pub new_departments: u32,

    #[serde(default = "default_new_department_intake")]
    pub new_department_intake: u32,

    pub rooms: Vec<RoomDto>,

    #[serde(default)]
    pub intake_plan: Vec<IntakeRowDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct ParametersDto {
    pub prep_pass_rate: f64,
    pub utilization_target: f64,
    pub prep_max_size: u32,
    pub dept_max_size: u32,
}

fn default_new_department_intake() -> u32 {
    DEFAULT_NEW_DEPARTMENT_INTAKE
}
