pub mod capacity;
pub mod cohort;
pub mod department;
pub mod intake_plan;
pub mod projection;
pub mod room;
pub mod scenario;
