pub mod department_dto;
pub mod intake_plan_dto;
pub mod room_dto;
pub mod scenario_dto;
