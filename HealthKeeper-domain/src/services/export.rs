//! Spreadsheet export of a displayed record set
//!
//! One sheet, one header row with the stored column names in canonical
//! order, then one row per record in exactly the order given.

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;
use tracing::{debug, error};

use health_keeper_data::models::{blood_pressure, glucose, BloodPressureReading, GlucoseReading};

/// MIME type of the produced artifact
pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Export failure; fatal to that one export only
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write spreadsheet: {0}")]
    Xlsx(#[from] XlsxError),
}

/// One spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
}

/// A record that can be written as one sheet row
pub trait SheetRow {
    /// Sheet name, also the stem of the file name
    const SHEET_NAME: &'static str;

    /// Header cells in canonical column order
    const HEADERS: &'static [&'static str];

    /// Cells in the same order as `HEADERS`
    fn cells(&self) -> Vec<Cell>;
}

impl SheetRow for GlucoseReading {
    const SHEET_NAME: &'static str = "血糖记录";
    const HEADERS: &'static [&'static str] = &glucose::COLUMNS;

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Number(self.sequence as f64),
            Cell::Text(self.date.to_string()),
            Cell::Text(self.time.format("%H:%M").to_string()),
            Cell::Text(self.period.label().to_string()),
            Cell::Number(self.value),
            Cell::Text(self.note.clone()),
        ]
    }
}

impl SheetRow for BloodPressureReading {
    const SHEET_NAME: &'static str = "血压记录";
    const HEADERS: &'static [&'static str] = &blood_pressure::COLUMNS;

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Number(self.sequence as f64),
            Cell::Text(self.date.to_string()),
            Cell::Text(self.time.format("%H:%M").to_string()),
            Cell::Number(self.systolic as f64),
            Cell::Number(self.diastolic as f64),
            Cell::Text(self.arm.label().to_string()),
            Cell::Number(self.heart_rate as f64),
            Cell::Text(self.note.clone()),
        ]
    }
}

/// A finished download
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Write `records` to an in-memory workbook
pub fn export_records<T: SheetRow>(records: &[T]) -> Result<ExportArtifact, ExportError> {
    let bytes = write_workbook(records).map_err(|e| {
        error!("Spreadsheet export of {} failed: {}", T::SHEET_NAME, e);
        e
    })?;

    debug!(
        "Exported {} rows to {} ({} bytes)",
        records.len(),
        T::SHEET_NAME,
        bytes.len()
    );

    Ok(ExportArtifact {
        file_name: format!("{}.xlsx", T::SHEET_NAME),
        content_type: XLSX_CONTENT_TYPE,
        bytes,
    })
}

fn write_workbook<T: SheetRow>(records: &[T]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(T::SHEET_NAME)?;

        for (col, header) in T::HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (index, record) in records.iter().enumerate() {
            let row = index as u32 + 1;
            for (col, cell) in record.cells().into_iter().enumerate() {
                match cell {
                    Cell::Number(value) => worksheet.write_number(row, col as u16, value)?,
                    Cell::Text(text) => worksheet.write_string(row, col as u16, text)?,
                };
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx};
    use chrono::{NaiveDate, NaiveTime};
    use health_keeper_data::models::{Arm, MeasurementPeriod};
    use std::io::Cursor;

    fn read_back(artifact: &ExportArtifact, sheet: &str) -> Vec<Vec<Data>> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(artifact.bytes.clone())).unwrap();
        assert_eq!(workbook.sheet_names(), vec![sheet.to_string()]);
        let range = workbook.worksheet_range(sheet).unwrap();
        range.rows().map(|row| row.to_vec()).collect()
    }

    fn as_data(cell: Cell) -> Data {
        match cell {
            Cell::Number(value) => Data::Float(value),
            Cell::Text(text) => Data::String(text),
        }
    }

    fn glucose(sequence: i64, day: u32, value: f64) -> GlucoseReading {
        GlucoseReading {
            sequence,
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            time: NaiveTime::from_hms_opt(7, 45, 0).unwrap(),
            period: MeasurementPeriod::AfterBreakfast,
            value,
            note: format!("第{}条", sequence),
        }
    }

    #[test]
    fn test_glucose_export_keeps_rows_and_order() {
        let records = vec![glucose(9, 3, 8.4), glucose(4, 2, 6.1), glucose(7, 1, 7.2)];
        let artifact = export_records(&records).unwrap();

        assert_eq!(artifact.file_name, "血糖记录.xlsx");
        assert_eq!(artifact.content_type, XLSX_CONTENT_TYPE);

        let rows = read_back(&artifact, "血糖记录");
        let header: Vec<Data> = glucose::COLUMNS.iter().map(|h| Data::String(h.to_string())).collect();
        assert_eq!(rows[0], header);

        let expected: Vec<Vec<Data>> = records
            .iter()
            .map(|r| r.cells().into_iter().map(as_data).collect())
            .collect();
        assert_eq!(&rows[1..], expected.as_slice());
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let artifact = export_records::<BloodPressureReading>(&[]).unwrap();
        assert_eq!(artifact.file_name, "血压记录.xlsx");

        let rows = read_back(&artifact, "血压记录");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), blood_pressure::COLUMNS.len());
    }

    #[test]
    fn test_blood_pressure_cells_follow_column_order() {
        let reading = BloodPressureReading {
            sequence: 2,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            systolic: 160,
            diastolic: 95,
            arm: Arm::Right,
            heart_rate: 80,
            note: "状态良好".to_string(),
        };

        let artifact = export_records(&[reading]).unwrap();
        let rows = read_back(&artifact, "血压记录");
        assert_eq!(
            rows[1],
            vec![
                Data::Float(2.0),
                Data::String("2024-06-01".to_string()),
                Data::String("20:00".to_string()),
                Data::Float(160.0),
                Data::Float(95.0),
                Data::String("右臂".to_string()),
                Data::Float(80.0),
                Data::String("状态良好".to_string()),
            ]
        );
    }
}
