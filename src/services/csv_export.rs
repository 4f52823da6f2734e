//! CSV exports
//!
//! Builds the worker and document exports. Column headers are part of the
//! contract with the spreadsheets that consume these files.

use chrono::NaiveDate;

use crate::models::document::DocumentWithOwner;
use crate::models::worker::WorkerWithCompany;
use crate::utils::errors::AppError;
use crate::utils::validation::DATE_FORMAT;

pub const WORKER_HEADERS: [&str; 7] = [
    "Nama",
    "No Paspor",
    "Kewarganegaraan",
    "Tanggal Lahir",
    "Perusahaan",
    "Jabatan",
    "Tanggal Mulai",
];

pub const DOCUMENT_HEADERS: [&str; 7] = [
    "Pekerja",
    "Jenis",
    "No Dokumen",
    "Tanggal Terbit",
    "Tanggal Berakhir",
    "Status",
    "Sisa Hari",
];

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, AppError> {
    writer
        .into_inner()
        .map_err(|e| AppError::Csv(e.to_string()))
}

/// Workers export, one row per worker in the given order
pub fn workers_csv(rows: &[WorkerWithCompany]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(WORKER_HEADERS)
        .map_err(|e| AppError::Csv(e.to_string()))?;

    for row in rows {
        let worker = &row.worker;
        writer
            .write_record([
                worker.name.clone(),
                worker.passport_number.clone(),
                worker.nationality.clone(),
                format_date(worker.birth_date),
                row.company_name.clone(),
                worker.position.clone(),
                worker.start_date.map(format_date).unwrap_or_default(),
            ])
            .map_err(|e| AppError::Csv(e.to_string()))?;
    }

    finish(writer)
}

/// Documents export; "Sisa Hari" is counted from `today`
pub fn documents_csv(rows: &[DocumentWithOwner], today: NaiveDate) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(DOCUMENT_HEADERS)
        .map_err(|e| AppError::Csv(e.to_string()))?;

    for row in rows {
        let document = &row.document;
        writer
            .write_record([
                row.worker_name.clone(),
                document.doc_type.as_str().to_string(),
                document.document_number.clone(),
                format_date(document.issue_date),
                format_date(document.expiry_date),
                document.status.as_str().to_string(),
                document.days_until_expiry(today).to_string(),
            ])
            .map_err(|e| AppError::Csv(e.to_string()))?;
    }

    finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{Document, DocumentStatus, DocumentType};
    use crate::models::worker::Worker;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_workers_csv() {
        let rows = vec![WorkerWithCompany {
            worker: Worker {
                id: 1,
                name: "Li Wei".to_string(),
                passport_number: "E1234567".to_string(),
                nationality: "China".to_string(),
                birth_date: date(1988, 4, 2),
                company_id: 5,
                position: "Engineer, Senior".to_string(),
                photo: None,
                start_date: None,
            },
            company_name: "PT Maju".to_string(),
        }];

        let output = String::from_utf8(workers_csv(&rows).unwrap()).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("Nama,No Paspor,Kewarganegaraan,Tanggal Lahir,Perusahaan,Jabatan,Tanggal Mulai")
        );
        assert_eq!(
            lines.next(),
            Some("Li Wei,E1234567,China,1988-04-02,PT Maju,\"Engineer, Senior\",")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_documents_csv() {
        let rows = vec![DocumentWithOwner {
            document: Document {
                id: 3,
                worker_id: 1,
                doc_type: DocumentType::Kitas,
                document_number: "2C11AB".to_string(),
                issue_date: date(2023, 1, 10),
                expiry_date: date(2024, 1, 31),
                status: DocumentStatus::Active,
            },
            worker_name: "Li Wei".to_string(),
            company_id: 5,
            company_name: "PT Maju".to_string(),
        }];

        let output = String::from_utf8(documents_csv(&rows, date(2024, 1, 1)).unwrap()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "Pekerja,Jenis,No Dokumen,Tanggal Terbit,Tanggal Berakhir,Status,Sisa Hari"
        );
        assert_eq!(lines[1], "Li Wei,KITAS,2C11AB,2023-01-10,2024-01-31,ACTIVE,30");
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let output = String::from_utf8(documents_csv(&[], date(2024, 1, 1)).unwrap()).unwrap();
        assert_eq!(output.lines().count(), 1);
    }
}
