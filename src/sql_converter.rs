use crate::record_loader::VideoRecord;

pub const DEFAULT_TABLE: &str = "videos";
const COLUMNS: &str = "(id, path, correctSign)";

/// How field values are placed between the single quotes of a row literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// Substitute values verbatim. A `'` inside a value ends the literal early.
    #[default]
    Literal,
    /// Double embedded single quotes (`'` -> `''`).
    Escaped,
}

/// Render one record as `('<id>', '<path>', '<correctSign>')`
pub fn row_to_sql(record: &VideoRecord, style: QuoteStyle) -> String {
    format!(
        "({}, {}, {})",
        quote(&record.id, style),
        quote(&record.path, style),
        quote(&record.correct_sign, style)
    )
}

/// Wrap already-rendered rows into one INSERT statement.
///
/// Rows are joined with `",\n"` and the statement ends with `;` and no
/// trailing newline. With no rows the result is `... VALUES \n;`.
pub fn assemble_insert(table: &str, rows: &[String]) -> String {
    format!(
        "INSERT INTO {} {} VALUES \n{};",
        table,
        COLUMNS,
        rows.join(",\n")
    )
}

fn quote(value: &str, style: QuoteStyle) -> String {
    match style {
        QuoteStyle::Literal => format!("'{}'", value),
        QuoteStyle::Escaped => format!("'{}'", value.replace('\'', "''")),
    }
}
