use crate::domain::model::{AcceptedRecord, FLAT_NO_FIELD};
use crate::utils::error::Result;
use csv::{QuoteStyle, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

const CSV_HEADER: &str = "Name,Mobile,Project Name,Flat No.";

/// Converts an accepted-records file into a four-column CSV next to the
/// input, returning the output path.
pub fn convert_file(input: &Path) -> Result<PathBuf> {
    let records: Vec<AcceptedRecord> = serde_json::from_reader(File::open(input)?)?;
    let output = input.with_extension("csv");
    write_csv(&records, File::create(&output)?)?;
    tracing::info!("Wrote {} rows to {}", records.len(), output.display());
    Ok(output)
}

/// Emits the header plus one row per record. Every field is quoted, with
/// embedded quotes doubled; missing detail fields become empty quoted
/// fields.
pub fn write_csv<W: Write>(records: &[AcceptedRecord], mut out: W) -> Result<()> {
    writeln!(out, "{}", CSV_HEADER)?;

    let mut rows = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .has_headers(false)
        .from_writer(out);
    for record in records {
        rows.write_record([
            detail(record, "Name"),
            detail(record, "Mobile"),
            record.project.as_str(),
            detail(record, FLAT_NO_FIELD),
        ])?;
    }
    rows.flush()?;
    Ok(())
}

fn detail<'a>(record: &'a AcceptedRecord, field: &str) -> &'a str {
    record.details.get(field).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FieldMap;

    fn record(name: &str, mobile: Option<&str>, flat_no: &str) -> AcceptedRecord {
        let mut details = FieldMap::new();
        details.insert("Name".to_string(), name.to_string());
        if let Some(mobile) = mobile {
            details.insert("Mobile".to_string(), mobile.to_string());
        }
        details.insert(FLAT_NO_FIELD.to_string(), flat_no.to_string());
        AcceptedRecord {
            project: "Silicon City".to_string(),
            tower: "Tower A".to_string(),
            unit: flat_no.to_string(),
            details,
        }
    }

    fn render(records: &[AcceptedRecord]) -> String {
        let mut buf = Vec::new();
        write_csv(records, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_and_quoted_row() {
        let csv = render(&[record("A. Sharma", Some("9999999999"), "C-101")]);
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "Name,Mobile,Project Name,Flat No.");
        assert_eq!(
            lines.next().unwrap(),
            r#""A. Sharma","9999999999","Silicon City","C-101""#
        );
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let csv = render(&[record(r#"A. "AJ" Sharma"#, Some("1"), "C-101")]);
        assert!(csv.contains(r#""A. ""AJ"" Sharma""#));
    }

    #[test]
    fn test_missing_field_is_empty_quoted() {
        let csv = render(&[record("A. Sharma", None, "C-101")]);
        assert!(csv
            .lines()
            .nth(1)
            .unwrap()
            .starts_with(r#""A. Sharma","","#));
    }

    #[test]
    fn test_convert_file_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("silicon_city_amrapali_data.json");
        let records = vec![record("A. Sharma", Some("9999999999"), "C-101")];
        std::fs::write(&input, serde_json::to_string_pretty(&records).unwrap()).unwrap();

        let output = convert_file(&input).unwrap();
        assert_eq!(output, dir.path().join("silicon_city_amrapali_data.csv"));

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("Name,Mobile,Project Name,Flat No.\n"));
        assert!(content.contains(r#""C-101""#));
    }
}
