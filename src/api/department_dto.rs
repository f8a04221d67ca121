use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDto {
    pub name: String,

    /// Semester index (1..=8) -> weekly hours. Omitted means the default curriculum.
    #[serde(default)]
    pub curriculum: Option<BTreeMap<u8, u32>>,

    #[serde(default)]
    pub current_students: Option<HeadcountDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadcountDto {
    pub preparatory: u32,
    pub grade1: u32,
    pub grade2: u32,
    pub grade3: u32,
    pub grade4: u32,
}
