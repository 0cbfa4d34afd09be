//! CSV export of resolved contact tables.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::ExportError;
use crate::model::ContactRecord;

const HEADERS: [&str; 6] = ["Name", "Title", "Email", "LinkedIn", "Company", "Department"];

/// Write contacts as CSV to any writer, preserving order.
pub fn write_contacts<W: Write>(writer: W, contacts: &[ContactRecord]) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADERS)?;
    for contact in contacts {
        csv.write_record([
            contact.name.as_str(),
            contact.title.as_str(),
            contact.email.as_str(),
            contact.profile_link.as_str(),
            contact.organization.as_str(),
            contact.department.as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Export contacts to `hr_contacts_{organization}_{YYYYMMDD}.csv` under
/// `dir`, returning the written path.
pub fn export_contacts(
    dir: &Path,
    organization: &str,
    contacts: &[ContactRecord],
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let file_name = format!("hr_contacts_{}_{}.csv", organization, date.format("%Y%m%d"));
    let path = dir.join(file_name);
    let file = std::fs::File::create(&path)?;
    write_contacts(file, contacts)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::contacts::synthetic;

    #[test]
    fn writes_header_and_one_row_per_contact() {
        let contacts = synthetic::generate("Acme", "Engineer");
        let mut buf = Vec::new();
        write_contacts(&mut buf, &contacts).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Name,Title,Email,LinkedIn,Company,Department");
        assert!(lines[1].starts_with("Sarah Acmeski,Senior Engineer Recruiter,"));
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let contact = ContactRecord {
            name: "Doe, Jane".into(),
            title: "Recruiter".into(),
            email: "jane@acme.com".into(),
            profile_link: String::new(),
            organization: "Acme".into(),
            department: "HR".into(),
        };
        let mut buf = Vec::new();
        write_contacts(&mut buf, &[contact]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"Doe, Jane\""));
    }

    #[test]
    fn export_path_carries_organization_and_date() {
        let dir = tempfile::tempdir().unwrap();
        let contacts = synthetic::generate("Acme", "Engineer");
        let date = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();

        let path = export_contacts(dir.path(), "Acme", &contacts, date).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "hr_contacts_Acme_20260823.csv"
        );
        assert!(path.exists());
    }
}
