use crate::domain::model::FieldMap;
use crate::utils::error::{Result, ScrapeError};
use scraper::{Html, Selector};

/// Parses the detail fragment into a field map.
///
/// The fragment is expected to carry one bordered table whose rows each pack
/// two label/value pairs into four cells. Rows with any other cell count are
/// skipped. Returns `ScrapeError::NoTableFound` when no bordered table is
/// present; an empty map when the table exists but yields no pairs.
pub fn extract_fields(html: &str) -> Result<FieldMap> {
    let document = Html::parse_fragment(html);
    let table_selector = Selector::parse(".table-bordered").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();

    let table = document
        .select(&table_selector)
        .next()
        .ok_or(ScrapeError::NoTableFound)?;

    let mut fields = FieldMap::new();
    for row in table.select(&row_selector) {
        let cells: Vec<_> = row.select(&cell_selector).collect();
        if cells.len() != 4 {
            continue;
        }
        for pair in cells.chunks(2) {
            let label = pair[0].text().collect::<String>().trim().to_string();
            let value = pair[1].text().collect::<String>().trim().to_string();
            fields.insert(label, value);
        }
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL_TABLE: &str = r#"
        <table class="table table-bordered">
          <tr>
            <td> Name </td><td> A. Sharma </td>
            <td>Flat No.</td><td>C-101</td>
          </tr>
          <tr>
            <td>Mobile</td><td>9999999999</td>
            <td>Booking Date</td><td>2014-03-18</td>
          </tr>
        </table>"#;

    #[test]
    fn test_extracts_two_pairs_per_row() {
        let fields = extract_fields(DETAIL_TABLE).unwrap();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields.get("Name").unwrap(), "A. Sharma");
        assert_eq!(fields.get("Flat No.").unwrap(), "C-101");
        assert_eq!(fields.get("Mobile").unwrap(), "9999999999");
        assert_eq!(fields.get("Booking Date").unwrap(), "2014-03-18");
    }

    #[test]
    fn test_labels_and_values_are_trimmed() {
        let html = r#"<table class="table-bordered">
            <tr><td>  Name  </td><td>
              A. Sharma
            </td><td> Mobile </td><td> 12345 </td></tr>
        </table>"#;
        let fields = extract_fields(html).unwrap();
        assert_eq!(fields.get("Name").unwrap(), "A. Sharma");
        assert_eq!(fields.get("Mobile").unwrap(), "12345");
    }

    #[test]
    fn test_rows_with_other_cell_counts_are_skipped() {
        let html = r#"<table class="table-bordered">
            <tr><td>Heading spans the row</td></tr>
            <tr><td>Name</td><td>A. Sharma</td><td>Mobile</td><td>12345</td></tr>
            <tr><td>a</td><td>b</td><td>c</td></tr>
        </table>"#;
        let fields = extract_fields(html).unwrap();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_missing_table_is_signalled() {
        let err = extract_fields("<div>No records found.</div>").unwrap_err();
        assert!(matches!(err, ScrapeError::NoTableFound));
    }

    #[test]
    fn test_table_without_data_rows_yields_empty_map() {
        let html = r#"<table class="table-bordered"><tr><th>Nothing</th></tr></table>"#;
        let fields = extract_fields(html).unwrap();
        assert!(fields.is_empty());
    }
}
