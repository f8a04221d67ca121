use serde::Serialize;

use crate::domain::cohort::Stage;
use crate::domain::department::CurriculumTable;
use crate::domain::projection::{ProjectionSnapshot, YearSnapshot, validate_rate};
use crate::domain::room::RoomInventory;
use crate::error::ConfigurationError;

/// Teaching periods that make up one schedulable slot.
pub const PERIODS_PER_SLOT: u32 = 3;

/// Weekly slots one free room is assumed to absorb.
pub const SLOTS_PER_ROOM: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityParameters {
    pub prep_max_size: u32,
    pub dept_max_size: u32,
    /// Share of the theoretical slot capacity that is realistically schedulable.
    pub utilization_target: f64,
}

impl CapacityParameters {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.prep_max_size == 0 {
            return Err(ConfigurationError::InvalidSizeLimit { parameter: "prep_max_size", value: self.prep_max_size });
        }
        if self.dept_max_size == 0 {
            return Err(ConfigurationError::InvalidSizeLimit { parameter: "dept_max_size", value: self.dept_max_size });
        }
        validate_rate("utilization_target", self.utilization_target)?;
        Ok(())
    }
}

/// Room and slot demand of one year against the room inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityReportRow {
    pub year: u32,
    pub prep_room_need: u64,
    pub dept_slot_need: u64,
    /// Negative when preparatory sections alone need more rooms than exist.
    pub rooms_remaining: i64,
    pub max_slot_capacity: u64,
    pub effective_capacity: u64,
    pub rooms_overcommitted: bool,
    pub under_capacity: bool,
}

impl CapacityReportRow {
    /// Effective capacity minus demand; negative means a shortfall.
    pub fn slot_balance(&self) -> i128 {
        self.effective_capacity as i128 - self.dept_slot_need as i128
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityReport {
    pub utilization_target: f64,
    pub room_count: u32,
    pub total_seats: u64,
    rows: Vec<CapacityReportRow>,
}

impl CapacityReport {
    pub fn rows(&self) -> &[CapacityReportRow] {
        &self.rows
    }

    pub fn row(&self, year: u32) -> Option<&CapacityReportRow> {
        self.rows.iter().find(|r| r.year == year)
    }

    /// True if department demand exceeds effective capacity in any year.
    pub fn has_shortfall(&self) -> bool {
        self.rows.iter().any(|r| r.under_capacity)
    }

    pub fn has_overcommit(&self) -> bool {
        self.rows.iter().any(|r| r.rooms_overcommitted)
    }

    pub fn shortfall_years(&self) -> Vec<u32> {
        self.rows.iter().filter(|r| r.under_capacity).map(|r| r.year).collect()
    }
}

pub fn section_count(students: u32, max_size: u32) -> u32 {
    students.div_ceil(max_size)
}

/// Slots for `sections` class groups of `weekly_hours` each. The product of two
/// `u32` values always fits a `u64`.
pub fn slot_units(sections: u32, weekly_hours: u32) -> u64 {
    (sections as u64 * weekly_hours as u64).div_ceil(PERIODS_PER_SLOT as u64)
}

fn overflow(snapshot: &YearSnapshot, department: &str) -> ConfigurationError {
    ConfigurationError::CapacityOverflow { year: snapshot.year, department: department.to_string() }
}

fn prep_room_need(snapshot: &YearSnapshot, prep_max_size: u32) -> Result<u64, ConfigurationError> {
    let mut total: u64 = 0;

    for cohort in &snapshot.cohorts {
        let sections = section_count(cohort.headcount.preparatory, prep_max_size) as u64;
        total = total.checked_add(sections).ok_or_else(|| overflow(snapshot, &cohort.department))?;
    }

    Ok(total)
}

fn dept_slot_need(snapshot: &YearSnapshot, dept_max_size: u32, curriculum: &CurriculumTable) -> Result<u64, ConfigurationError> {
    let mut total: u64 = 0;

    for cohort in &snapshot.cohorts {
        for stage in Stage::GRADES {
            let count = cohort.headcount.get(stage);
            if count == 0 {
                continue;
            }
            let Some(semester) = stage.representative_semester() else {
                continue;
            };

            let weekly_hours = curriculum.weekly_hours(&cohort.department, semester);
            let sections = section_count(count, dept_max_size);
            total = total
                .checked_add(slot_units(sections, weekly_hours))
                .ok_or_else(|| overflow(snapshot, &cohort.department))?;
        }
    }

    Ok(total)
}

fn year_row(
    snapshot: &YearSnapshot,
    curriculum: &CurriculumTable,
    room_count: u32,
    params: &CapacityParameters,
) -> Result<CapacityReportRow, ConfigurationError> {
    let prep_room_need = prep_room_need(snapshot, params.prep_max_size)?;
    let dept_slot_need = dept_slot_need(snapshot, params.dept_max_size, curriculum)?;

    let prep_rooms = i64::try_from(prep_room_need).map_err(|_| ConfigurationError::CapacityOverflow {
        year: snapshot.year,
        department: "all departments".to_string(),
    })?;
    let rooms_remaining = room_count as i64 - prep_rooms;

    // rooms_remaining <= u32::MAX, so the product stays well inside i64.
    let max_slot_capacity = (rooms_remaining.max(0) * SLOTS_PER_ROOM as i64) as u64;
    let effective_capacity = (max_slot_capacity as f64 * params.utilization_target).round_ties_even() as u64;

    Ok(CapacityReportRow {
        year: snapshot.year,
        prep_room_need,
        dept_slot_need,
        rooms_remaining,
        max_slot_capacity,
        effective_capacity,
        rooms_overcommitted: rooms_remaining < 0,
        under_capacity: dept_slot_need > effective_capacity,
    })
}

/// Maps every projected year to room and slot demand.
///
/// Overcommitted rooms and slot shortfalls are reported on the rows and logged
/// as warnings; they are valid outcomes, not errors.
pub fn calculate_capacity(
    projection: &ProjectionSnapshot,
    curriculum: &CurriculumTable,
    rooms: &RoomInventory,
    params: &CapacityParameters,
) -> Result<CapacityReport, ConfigurationError> {
    params.validate()?;

    let room_count = rooms.count();
    let mut rows = Vec::with_capacity(projection.years().len());

    for snapshot in projection.years() {
        let row = year_row(snapshot, curriculum, room_count, params)?;

        log::debug!(
            "Year {}: {} prep rooms, {} dept slots, {} rooms left, {} max / {} effective slots.",
            row.year,
            row.prep_room_need,
            row.dept_slot_need,
            row.rooms_remaining,
            row.max_slot_capacity,
            row.effective_capacity
        );

        if row.rooms_overcommitted {
            log::warn!(
                "Year {}: preparatory sections need {} rooms but only {} exist.",
                row.year,
                row.prep_room_need,
                room_count
            );
        }
        if row.under_capacity {
            log::warn!(
                "Year {}: department demand of {} slots exceeds effective capacity of {} slots.",
                row.year,
                row.dept_slot_need,
                row.effective_capacity
            );
        }

        rows.push(row);
    }

    Ok(CapacityReport { utilization_target: params.utilization_target, room_count, total_seats: rooms.total_seats(), rows })
}
