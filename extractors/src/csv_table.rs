/// Parses sheet exports into rows of string cells.
///
/// A single pass keeps an in-quotes flag: a doubled quote inside quotes is a
/// literal quote, any other quote toggles the flag wherever it appears in a
/// cell. Outside quotes the delimiter ends a cell and `\n`, `\r` or `\r\n` end
/// a row. Rows made only of blank cells are dropped so trailing blank lines
/// never produce records. An unterminated quote at the end of input is not an
/// error: the open cell is flushed as-is.
pub struct CsvTableParser {
    delimiter: char,
}

impl Default for CsvTableParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvTableParser {
    pub fn new() -> Self {
        Self { delimiter: ',' }
    }

    pub fn parse_rows(&self, content: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut row: Vec<String> = Vec::new();
        let mut cell = String::new();
        let mut in_quotes = false;
        let mut chars = content.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '"' if in_quotes && chars.peek() == Some(&'"') => {
                    cell.push('"');
                    chars.next();
                }
                '"' => in_quotes = !in_quotes,
                c if c == self.delimiter && !in_quotes => {
                    row.push(std::mem::take(&mut cell));
                }
                '\n' | '\r' if !in_quotes => {
                    if c == '\r' && chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    row.push(std::mem::take(&mut cell));
                    push_row(&mut rows, std::mem::take(&mut row));
                }
                c => cell.push(c),
            }
        }

        if in_quotes {
            tracing::debug!("CSV input ended inside a quoted cell");
        }
        row.push(cell);
        push_row(&mut rows, row);

        rows
    }

    /// Parses content whose first surviving row is the header row
    pub fn parse_table(&self, content: &str) -> CsvTable {
        let mut rows = self.parse_rows(content).into_iter();
        let headers = rows
            .next()
            .map(|header| header.iter().map(|h| h.to_lowercase()).collect())
            .unwrap_or_default();

        CsvTable {
            headers,
            rows: rows.collect(),
        }
    }
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if row.iter().any(|cell| !cell.trim().is_empty()) {
        rows.push(row);
    }
}

/// Parsed sheet with lower-cased headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.headers.iter().position(|h| *h == name)
    }

    /// Cell of `row` under the column `name`, or `""` when either the column
    /// or the cell is missing
    pub fn get<'a>(&self, row: &'a [String], name: &str) -> &'a str {
        self.column_index(name)
            .and_then(|i| row.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn records(&self) -> impl Iterator<Item = CsvRecord<'_>> {
        self.rows.iter().map(move |row| CsvRecord { table: self, row })
    }
}

/// One data row with header lookup
#[derive(Debug, Clone, Copy)]
pub struct CsvRecord<'a> {
    table: &'a CsvTable,
    row: &'a [String],
}

impl<'a> CsvRecord<'a> {
    pub fn get(&self, name: &str) -> &'a str {
        self.table.get(self.row, name)
    }

    pub fn cells(&self) -> &'a [String] {
        self.row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(content: &str) -> Vec<Vec<String>> {
        CsvTableParser::new().parse_rows(content)
    }

    #[test]
    fn test_quoted_comma() {
        assert_eq!(rows(r#"a,"b,c",d"#), vec![vec!["a", "b,c", "d"]]);
    }

    #[test]
    fn test_doubled_quote() {
        let parsed = rows(r#""He said ""hi""""#);
        assert_eq!(parsed, vec![vec![r#"He said "hi""#]]);
    }

    #[test]
    fn test_quote_inside_cell_toggles_quoting() {
        assert_eq!(rows(r#"ab"c,d"e,f"#), vec![vec!["abc,de", "f"]]);
        assert_eq!(rows(r#"a""b,c"#), vec![vec!["ab", "c"]]);
    }

    #[test]
    fn test_quote_after_leading_space() {
        assert_eq!(rows(r#"x, "y,z""#), vec![vec!["x", " y,z"]]);
    }

    #[test]
    fn test_row_count_and_trailing_blank_lines() {
        let parsed = rows("a,b\nc,d\ne,f\n\n\n");
        assert_eq!(parsed.len(), 3);

        let parsed = rows("a,b\r\nc,d\r\n\r\n");
        assert_eq!(parsed, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_lone_carriage_return_breaks_row() {
        assert_eq!(rows("a,b\rc,d"), vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_blank_cell_rows_are_dropped() {
        let parsed = rows("a,b\n , \n,,\nc,d");
        assert_eq!(parsed, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_newline_inside_quotes_stays_in_cell() {
        let parsed = rows("title,notes\nVilla,\"line one\nline two\"\n");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1][1], "line one\nline two");
    }

    #[test]
    fn test_unterminated_quote_is_flushed() {
        let parsed = rows("a,\"open cell");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0][0], "a");
        assert_eq!(parsed[0][1], "open cell");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let table = CsvTableParser::new().parse_table("Title,Status\nModern Villa,Approved\nGarden\n");
        assert_eq!(table.headers(), &["title".to_string(), "status".to_string()]);
        assert_eq!(table.len(), 2);

        let records: Vec<_> = table.records().collect();
        assert_eq!(records[0].get("TITLE"), "Modern Villa");
        assert_eq!(records[0].get("status"), "Approved");
        // Short row and unknown column both read as empty
        assert_eq!(records[1].get("status"), "");
        assert_eq!(records[0].get("location"), "");
    }

    #[test]
    fn test_empty_input() {
        let table = CsvTableParser::new().parse_table("\n\n");
        assert!(table.headers().is_empty());
        assert!(table.is_empty());
    }
}
