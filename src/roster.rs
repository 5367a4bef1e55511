use crate::error::BadgeError;
use crate::sheet::CARDS_PER_SHEET;
use log::info;
use polars::prelude::*;
use std::path::Path;

const NAME_COLUMN: &str = "Name";
const AFFILIATION_COLUMN: &str = "Affiliation";

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Zero-based data row in the roster, header excluded.
    pub row: usize,
    pub name: String,
    pub affiliation: String,
}

/// Reads the `Name` and `Affiliation` columns of a CSV roster. Every other
/// column is ignored; empty cells come back as empty strings.
pub fn read_roster(path: &Path) -> Result<Vec<Record>, BadgeError> {
    let df = CsvReader::from_path(path)?
        .has_header(true)
        .infer_schema(Some(0))
        .finish()?;

    let columns = df.get_column_names();
    for required in [NAME_COLUMN, AFFILIATION_COLUMN] {
        if !columns.contains(&required) {
            return Err(BadgeError::MissingColumn(required));
        }
    }

    let names = df.column(NAME_COLUMN)?.str()?;
    let affiliations = df.column(AFFILIATION_COLUMN)?.str()?;

    let records: Vec<Record> = names
        .into_iter()
        .zip(affiliations.into_iter())
        .enumerate()
        .map(|(row, (name, affiliation))| Record {
            row,
            name: name.unwrap_or_default().trim().to_string(),
            affiliation: affiliation.unwrap_or_default().trim().to_string(),
        })
        .collect();

    info!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Consecutive runs of up to one sheet's worth of records.
pub fn groups(records: &[Record]) -> impl Iterator<Item = &[Record]> {
    records.chunks(CARDS_PER_SHEET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn roster_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_names_and_affiliations_ignoring_other_columns() {
        let file = roster_file(
            "Email,Name,Affiliation,Track\n\
             a@x.org,Alice Johnson,MIT,PL\n\
             b@x.org,Bob Lee,IIT Bombay,Systems\n",
        );

        let records = read_roster(file.path()).unwrap();
        assert_eq!(
            records,
            vec![
                Record { row: 0, name: "Alice Johnson".into(), affiliation: "MIT".into() },
                Record { row: 1, name: "Bob Lee".into(), affiliation: "IIT Bombay".into() },
            ]
        );
    }

    #[test]
    fn numeric_looking_cells_stay_text() {
        let file = roster_file("Name,Affiliation\n007,42\n");
        let records = read_roster(file.path()).unwrap();
        assert_eq!(records[0].name, "007");
        assert_eq!(records[0].affiliation, "42");
    }

    #[test]
    fn empty_affiliation_is_empty_string() {
        let file = roster_file("Name,Affiliation\nCarol,\n");
        let records = read_roster(file.path()).unwrap();
        assert_eq!(records[0].affiliation, "");
    }

    #[test]
    fn missing_column_fails() {
        let file = roster_file("Name,Institute\nAlice,MIT\n");
        let err = read_roster(file.path()).unwrap_err();
        assert!(matches!(err, BadgeError::MissingColumn("Affiliation")));
    }

    #[test]
    fn missing_file_fails() {
        assert!(read_roster(Path::new("/no/such/roster.csv")).is_err());
    }

    #[test]
    fn thirteen_rows_make_three_groups() {
        let records: Vec<Record> = (0..13)
            .map(|row| Record { row, name: format!("N{row}"), affiliation: String::new() })
            .collect();

        let sizes: Vec<usize> = groups(&records).map(|g| g.len()).collect();
        assert_eq!(sizes, vec![6, 6, 1]);
        assert_eq!(groups(&records).last().unwrap()[0].row, 12);
    }
}
