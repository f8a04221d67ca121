use crate::api::scenario_dto::ScenarioDto;
use crate::domain::scenario::Scenario;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;
pub mod report_writer;

/// Loads a planning scenario from a JSON file and validates it into the domain model.
pub fn load_scenario(file_path: &str) -> Result<Scenario> {
    let scenario_dto: ScenarioDto = parse_json_file::<ScenarioDto>(file_path)?;
    log::info!("Scenario file '{}' parsed successfully.", file_path);

    let scenario = Scenario::try_from(scenario_dto)?;
    log::info!("Scenario constructed with departments: {}.", scenario.registry.names().join(", "));

    Ok(scenario)
}
