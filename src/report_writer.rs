use colored::Colorize;
use std::fmt::Write as _;
use std::io::Write;

use crate::domain::capacity::CapacityReport;
use crate::domain::projection::ProjectionSnapshot;
use crate::error::Result;

/// Writes one CSV row per year, with a header row.
pub fn write_report_csv<W: Write>(report: &CapacityReport, writer: W) -> Result<()> {
    let mut csv_wtr = csv::Writer::from_writer(writer);
    for row in report.rows() {
        csv_wtr.serialize(row)?;
    }
    csv_wtr.flush()?;
    Ok(())
}

/// Writes per-department totals per year, the data behind the growth chart.
pub fn write_department_totals_csv<W: Write>(projection: &ProjectionSnapshot, writer: W) -> Result<()> {
    let mut csv_wtr = csv::Writer::from_writer(writer);
    for total in projection.department_totals() {
        csv_wtr.serialize(total)?;
    }
    csv_wtr.flush()?;
    Ok(())
}

pub fn write_report_json<W: Write>(report: &CapacityReport, projection: &ProjectionSnapshot, writer: W) -> Result<()> {
    let document = serde_json::json!({
        "report": report,
        "departmentTotals": projection.department_totals(),
    });
    serde_json::to_writer_pretty(writer, &document)?;
    Ok(())
}

/// Renders the report as a terminal table. Shortfalls and overcommitted rooms
/// are highlighted and summarised below the table.
pub fn render_table(report: &CapacityReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:>4}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}",
        "Year", "Prep rooms", "Slot need", "Rooms left", "Max slots", "Effective"
    );

    for row in report.rows() {
        let rooms_left = format!("{:>10}", row.rooms_remaining);
        let rooms_left = if row.rooms_overcommitted { rooms_left.red().bold() } else { rooms_left.normal() };

        let slot_need = format!("{:>10}", row.dept_slot_need);
        let slot_need = if row.under_capacity { slot_need.yellow().bold() } else { slot_need.normal() };

        let _ = writeln!(
            out,
            "{:>4}  {:>10}  {}  {}  {:>10}  {:>10}",
            row.year, row.prep_room_need, slot_need, rooms_left, row.max_slot_capacity, row.effective_capacity
        );
    }

    let _ = writeln!(
        out,
        "\n{} rooms ({} seats), target utilization {:.0}%",
        report.room_count,
        report.total_seats,
        report.utilization_target * 100.0
    );

    if report.has_overcommit() {
        let _ = writeln!(out, "{}", "Preparatory sections need more rooms than the inventory holds.".red().bold());
    }
    if report.has_shortfall() {
        let message = format!(
            "Capacity may be insufficient at the planned utilization in year(s) {:?}; scheduling will be difficult.",
            report.shortfall_years()
        );
        let _ = writeln!(out, "{}", message.yellow().bold());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capacity::{CapacityParameters, calculate_capacity};
    use crate::domain::cohort::Headcount;
    use crate::domain::department::{Curriculum, DepartmentRegistry};
    use crate::domain::room::{Room, RoomInventory};

    fn report_and_projection(utilization_target: f64) -> (CapacityReport, ProjectionSnapshot) {
        let mut registry = DepartmentRegistry::new("Computer", Curriculum::from_pairs(&[(1, 28)]));
        registry.register("Computer", None, Some(Headcount { preparatory: 20, grade1: 32, ..Headcount::zero() })).unwrap();

        let projection = ProjectionSnapshot::seed(&registry);
        let rooms = RoomInventory::new(vec![Room { name: "208".to_string(), capacity: 30 }; 3]);
        let params = CapacityParameters { prep_max_size: 18, dept_max_size: 40, utilization_target };
        let report = calculate_capacity(&projection, &registry.curriculum_table(), &rooms, &params).unwrap();

        (report, projection)
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_year() {
        let (report, _) = report_and_projection(0.8);
        let mut buffer = Vec::new();
        write_report_csv(&report, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "year,prep_room_need,dept_slot_need,rooms_remaining,max_slot_capacity,effective_capacity,rooms_overcommitted,under_capacity"
        );
        assert_eq!(lines[1], "0,2,10,1,15,12,false,false");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_department_totals_csv() {
        let (_, projection) = report_and_projection(0.8);
        let mut buffer = Vec::new();
        write_department_totals_csv(&projection, &mut buffer).unwrap();

        assert_eq!(String::from_utf8(buffer).unwrap(), "year,department,total\n0,Computer,52\n");
    }

    #[test]
    fn test_json_contains_rows() {
        let (report, projection) = report_and_projection(0.8);
        let mut buffer = Vec::new();
        write_report_json(&report, &projection, &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["report"]["rows"][0]["dept_slot_need"], 10);
        assert_eq!(value["departmentTotals"][0]["total"], 52);
    }

    #[test]
    fn test_table_mentions_shortfall() {
        colored::control::set_override(false);
        let (report, _) = report_and_projection(0.0);
        let table = render_table(&report);

        assert!(table.contains("Capacity may be insufficient"));
        assert!(table.contains("3 rooms (90 seats), target utilization 0%"));
        assert!(!table.contains("Preparatory sections need more rooms"));
    }
}
