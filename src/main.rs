use std::fs::File;
use std::io::{self, Write};

use anyhow::Context;
use clap::{Parser, ValueEnum};

use cohort_capacity_planner::loader::parser::parse_intake_plan_file;
use cohort_capacity_planner::{load_scenario, logger, report_writer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Projects student cohorts and compares classroom slot demand with the room inventory.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Scenario file (JSON) with departments, rooms, intake plan and parameters.
    #[arg(short, long, default_value = "data/default_scenario.json")]
    scenario: String,

    /// Intake plan CSV that replaces the plan in the scenario file.
    #[arg(short, long)]
    intake: Option<String>,

    #[arg(long)]
    years: Option<u32>,

    /// Share of preparatory intake that skips straight to grade 1, in [0, 1].
    #[arg(long)]
    prep_pass_rate: Option<f64>,

    /// Share of theoretical slot capacity that is realistically usable, in [0, 1].
    #[arg(long)]
    utilization: Option<f64>,

    #[arg(long)]
    prep_max_size: Option<u32>,

    #[arg(long)]
    dept_max_size: Option<u32>,

    /// Additional departments to open, each with the default curriculum.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=5))]
    new_departments: u32,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write the report to this file instead of stdout.
    #[arg(short, long)]
    output: Option<String>,

    /// Also write per-department yearly totals as CSV to this file.
    #[arg(long)]
    totals: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init();

    let mut scenario = load_scenario(&cli.scenario).with_context(|| format!("Could not load scenario '{}'", cli.scenario))?;

    if let Some(path) = &cli.intake {
        let plan = parse_intake_plan_file(path).with_context(|| format!("Could not load intake plan '{}'", path))?;
        scenario.replace_intake_plan(plan);
    }

    scenario.open_new_departments(cli.new_departments)?;

    if let Some(years) = cli.years {
        scenario.parameters.years_to_project = years;
    }
    if let Some(rate) = cli.prep_pass_rate {
        scenario.parameters.prep_pass_rate = rate;
    }
    if let Some(utilization) = cli.utilization {
        scenario.parameters.capacity.utilization_target = utilization;
    }
    if let Some(size) = cli.prep_max_size {
        scenario.parameters.capacity.prep_max_size = size;
    }
    if let Some(size) = cli.dept_max_size {
        scenario.parameters.capacity.dept_max_size = size;
    }

    let outcome = scenario.run().context("Capacity planning failed")?;

    let writer: Box<dyn io::Write> = match &cli.output {
        Some(path) => Box::new(File::create(path).with_context(|| format!("Could not create '{}'", path))?),
        None => Box::new(io::stdout()),
    };

    match cli.format {
        OutputFormat::Table => {
            let mut writer = writer;
            write!(writer, "{}", report_writer::render_table(&outcome.report))?;
        }
        OutputFormat::Csv => report_writer::write_report_csv(&outcome.report, writer)?,
        OutputFormat::Json => report_writer::write_report_json(&outcome.report, &outcome.projection, writer)?,
    }

    if let Some(path) = &cli.totals {
        let file = File::create(path).with_context(|| format!("Could not create '{}'", path))?;
        report_writer::write_department_totals_csv(&outcome.projection, file)?;
        log::info!("Department totals written to '{}'.", path);
    }

    Ok(())
}
