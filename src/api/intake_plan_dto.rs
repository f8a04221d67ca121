use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRowDto {
    pub year: u32,

    /// Department name -> planned new students.
    #[serde(default)]
    pub intakes: HashMap<String, u32>,
}
