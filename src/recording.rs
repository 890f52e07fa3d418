//! Tab-separated reading log.
//!
//! Each "record" appends the current scene settings, parameters and results as
//! one row. The file is named after the moment the log was opened and gets a
//! header only when it is first created.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::config;
use crate::error::{WheelError, WheelResult};
use crate::parameters::ParameterSnapshot;
use crate::physics::PhysicsResult;

pub const TITLE_LINE: &str = "# The Wheel test";

const COLUMNS: [&str; 10] = [
    "Scale",
    "Thickness",
    "AngularVelocity (rps)",
    "Distance (um)",
    "Density (g/cm3)",
    "Particle diameter (um)",
    "Viscosity (mPa s)",
    "Linear velocity (um/s)",
    "DEP (pN)",
    "Centripetal force (pN)",
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReadingRecord {
    pub scale: f32,
    pub thickness: f32,
    pub parameters: ParameterSnapshot,
    pub result: PhysicsResult,
}

impl ReadingRecord {
    pub fn to_row(&self) -> String {
        let p = &self.parameters;
        let r = &self.result;
        [
            format_value(self.scale),
            format_value(self.thickness),
            format_value(p.angular_velocity_rps),
            format_value(p.distance_from_axis_um),
            format_value(p.particle_density_g_cm3),
            format_value(p.particle_diameter_um),
            format_value(p.fluid_viscosity_mpa_s),
            format_value(r.linear_velocity_um_s),
            format_value(r.drag_force_pn),
            format_value(r.centripetal_force_pn),
        ]
        .join("\t")
    }
}

/// Shortest round-trip form, with whole numbers kept as floats (`2.0`, not `2`).
fn format_value<T>(value: T) -> String
where
    T: Copy + Into<f64> + ToString,
{
    let wide: f64 = value.into();
    if wide.is_finite() && wide.fract() == 0.0 && wide.abs() < 1e16 {
        format!("{:.1}", wide)
    } else {
        value.to_string()
    }
}

pub fn header_line() -> String {
    format!("# {}", COLUMNS.join("\t"))
}

/// `<year>-<month>-<day>_<HHMMSS>`; date parts are not zero padded.
pub fn file_name_prefix(started: &NaiveDateTime) -> String {
    let date = format!("{}-{}-{}", started.year(), started.month(), started.day());
    let time = format!(
        "{:02}{:02}{:02}",
        started.hour(),
        started.minute(),
        started.second()
    );
    format!("{}_{}", date, time)
}

#[derive(Clone, Debug)]
pub struct ReadingLog {
    path: PathBuf,
}

impl ReadingLog {
    pub fn new<P: AsRef<Path>>(output_dir: P, started: NaiveDateTime) -> Self {
        let file_name = format!("{}{}", file_name_prefix(&started), config::READING_LOG_SUFFIX);
        Self {
            path: output_dir.as_ref().join(file_name),
        }
    }

    /// Log named after the current local time.
    pub fn start_now<P: AsRef<Path>>(output_dir: P) -> Self {
        Self::new(output_dir, chrono::Local::now().naive_local())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &ReadingRecord) -> WheelResult<()> {
        self.write_record(record).map_err(|source| WheelError::ReadingLog {
            path: self.path.clone(),
            source,
        })
    }

    fn write_record(&self, record: &ReadingRecord) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let is_new = !self.path.is_file();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if is_new {
            writeln!(file, "{}", TITLE_LINE)?;
            writeln!(file, "{}", header_line())?;
            writeln!(file)?;
        }
        writeln!(file, "{}", record.to_row())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::evaluate;
    use chrono::NaiveDate;

    fn started() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 7)
            .and_then(|d| d.and_hms_opt(9, 5, 2))
            .unwrap()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "spin_wheel_{}_{}_{}",
            name,
            std::process::id(),
            fastrand::u32(..)
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn record(rps: f64) -> ReadingRecord {
        let parameters =
            ParameterSnapshot::default().with(crate::parameters::Parameter::AngularVelocity, rps);
        ReadingRecord {
            scale: 1.5,
            thickness: 2.0,
            parameters,
            result: evaluate(&parameters),
        }
    }

    #[test]
    fn file_name_pads_time_but_not_date() {
        assert_eq!(file_name_prefix(&started()), "2026-3-7_090502");
        let log = ReadingLog::new("out", started());
        assert_eq!(log.path(), Path::new("out/2026-3-7_090502_WheelTest.dat"));
    }

    #[test]
    fn header_lists_ten_tab_separated_columns() {
        let header = header_line();
        assert!(header.starts_with("# Scale\tThickness\t"));
        assert_eq!(header.split('\t').count(), 10);
        assert!(header.ends_with("Centripetal force (pN)"));
    }

    #[test]
    fn row_follows_column_order() {
        let rec = record(2.0);
        let row = rec.to_row();
        let fields: Vec<&str> = row.split('\t').collect();
        assert_eq!(fields.len(), 10);
        assert_eq!(fields[0], "1.5");
        assert_eq!(fields[1], "2.0");
        assert_eq!(fields[2], "2.0");
        assert_eq!(fields[3], "50.0");
        assert_eq!(fields[4], "1.05");
        assert_eq!(fields[5], "10.0");
        assert_eq!(fields[8].parse::<f64>().unwrap(), rec.result.drag_force_pn);
    }

    #[test]
    fn whole_numbers_keep_a_decimal_point() {
        assert_eq!(format_value(0.0_f64), "0.0");
        assert_eq!(format_value(-3.0_f64), "-3.0");
        assert_eq!(format_value(1.5_f32), "1.5");
        assert_eq!(format_value(0.1_f32), "0.1");
        assert_eq!(format_value(59.2176_f64), "59.2176");
    }

    #[test]
    fn header_is_written_once() {
        let dir = scratch_dir("header_once");
        let log = ReadingLog::new(&dir, started());
        log.append(&record(1.0)).unwrap();
        log.append(&record(2.0)).unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], TITLE_LINE);
        assert_eq!(lines[1], header_line());
        assert_eq!(lines[2], "");
        assert_eq!(lines.len(), 5);
        assert_eq!(content.matches(TITLE_LINE).count(), 1);
        assert_eq!(lines[3], record(1.0).to_row());
        assert_eq!(lines[4], record(2.0).to_row());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn reopening_an_existing_log_appends() {
        let dir = scratch_dir("reopen");
        ReadingLog::new(&dir, started()).append(&record(1.0)).unwrap();
        ReadingLog::new(&dir, started()).append(&record(3.0)).unwrap();

        let content = fs::read_to_string(ReadingLog::new(&dir, started()).path()).unwrap();
        assert_eq!(content.matches(TITLE_LINE).count(), 1);
        assert_eq!(content.lines().count(), 5);

        let _ = fs::remove_dir_all(&dir);
    }
}
