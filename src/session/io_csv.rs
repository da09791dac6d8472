// Primitives for reading CSV files.

use std::fs::File;
use std::io;

use crate::session::{io_common::FirmColumns, *};

/// Reads the firm table of a CSV file.
///
/// Every row comes with its line number (the header is line 1).
pub fn read_csv_firms(path: &str) -> MapResult<Vec<(usize, RawRow)>> {
    let file = File::open(path).context(CsvOpenSnafu { path })?;
    read_csv_firms_from(file)
}

pub fn read_csv_firms_from<R: io::Read>(input: R) -> MapResult<Vec<(usize, RawRow)>> {
    // Short rows are accepted: the missing cells are treated as empty.
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);
    let header: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { lineno: 1usize })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_csv_firms: header: {:?}", header);
    let columns = FirmColumns::from_header(&header);

    let mut res: Vec<(usize, RawRow)> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        let line = line_r.context(CsvLineParseSnafu { lineno: idx + 2 })?;
        // Blank lines are skipped by the reader, the position keeps the real line number.
        let lineno = line
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        let cells: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        let row = columns.raw_row(&cells);
        debug!("read_csv_firms: lineno: {:?} row: {:?}", lineno, &row);
        res.push((lineno, row));
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_named_columns() {
        let data = "Firm,Offering_Nature,Value_Proposition,SME_Focus,Comment\n\
                    Alpha,9,8,7,big\n\
                    Beta,3.0,4,9\n";
        let rows = read_csv_firms_from(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, 2);
        assert_eq!(rows[1].0, 3);
        assert_eq!(rows[1].1.name, Some("Beta".to_string()));
        assert_eq!(rows[1].1.offering_nature, Some("3.0".to_string()));
    }

    #[test]
    fn missing_columns_stay_missing() {
        let data = "Firm,SME_Focus\nAlpha,7\n";
        let rows = read_csv_firms_from(data.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![(
                2,
                RawRow {
                    name: Some("Alpha".to_string()),
                    offering_nature: None,
                    value_proposition: None,
                    sme_focus: Some("7".to_string()),
                }
            )]
        );
    }

    #[test]
    fn short_rows_are_padded() {
        let data = "Firm,Offering_Nature,Value_Proposition,SME_Focus\nAlpha,9\n";
        let rows = read_csv_firms_from(data.as_bytes()).unwrap();
        assert_eq!(rows[0].1.value_proposition, Some("".to_string()));
    }

    #[test]
    fn missing_file() {
        let res = read_csv_firms("/nonexistent/compmap/firms.csv");
        assert!(matches!(res, Err(MapError::CsvOpen { .. })));
    }
}
