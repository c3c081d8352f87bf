use crate::{ColumnKind, Table};

/// Conventional names of free-text columns, in order of preference
pub const TEXT_COLUMN_CANDIDATES: [&str; 6] = ["text", "tweet", "content", "review", "message", "post"];

/// Possible errors to occur while resolving the text column
#[derive(Debug, thiserror::Error)]
pub enum ColumnError {
    #[error("No text column found. Please ensure your CSV has a text column.")]
    NoTextColumnFound,
}

/// The column holding the free text to score
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextColumn {
    name: String,
    index: usize,
}

impl TextColumn {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The position of the column in the table's headers
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Picks the column to treat as text
///
/// Conventional names win in the order of [`TEXT_COLUMN_CANDIDATES`].
/// Otherwise the first text-typed column is used, even if a later one holds
/// the actual content (e.g. a `name` column in front of a `body` column).
pub fn resolve_text_column(table: &Table) -> Result<TextColumn, ColumnError> {
    let by_name = TEXT_COLUMN_CANDIDATES
        .iter()
        .find_map(|&name| table.column_index(name));
    let index = match by_name {
        Some(index) => index,
        None => (0..table.headers().len())
            .find(|&index| table.column_kind(index) == ColumnKind::Text)
            .ok_or(ColumnError::NoTextColumnFound)?,
    };

    Ok(TextColumn {
        name: table.headers()[index].to_owned(),
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! resolve_test {
        ($name:ident $csv:literal => $column:literal) => {
            #[test]
            fn $name() {
                let table = Table::from_reader($csv.as_bytes()).unwrap();
                let column = resolve_text_column(&table).unwrap();
                assert_eq!(column.name(), $column);
                assert_eq!(table.headers()[column.index()], *$column);
            }
        };
    }

    resolve_test!(conventional_name
        "id,text\n1,hello\n"
        => "text");
    resolve_test!(tweet_beats_other_strings
        "author,tweet\nalice,hello there\n"
        => "tweet");
    resolve_test!(priority_order
        "post,review,content\na,b,c\n"
        => "content");
    resolve_test!(conventional_name_even_if_numeric
        "id,message\n1,2\n"
        => "message");
    resolve_test!(first_string_column
        "id,name,body\n1,alice,long text\n"
        => "name");
    resolve_test!(skips_numeric_columns
        "id,score,comment\n1,0.5,nice\n"
        => "comment");
    resolve_test!(skips_all_missing_columns
        "id,empty,comment\n1,,nice\n2,NA,meh\n"
        => "comment");
    resolve_test!(names_are_case_sensitive
        "id,Text,body\n1,2,words\n"
        => "body");
    resolve_test!(boolean_column_with_gaps
        "flag,n\nTrue,1\n,2\n"
        => "flag");
    resolve_test!(header_only_table
        "id,score\n"
        => "id");

    #[test]
    fn numeric_only() {
        let table = Table::from_reader("id,score\n1,0.5\n2,0.7\n".as_bytes()).unwrap();
        assert!(matches!(
            resolve_text_column(&table),
            Err(ColumnError::NoTextColumnFound),
        ));
    }
}
