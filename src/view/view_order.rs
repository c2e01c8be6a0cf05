use super::error::ViewError;
use super::types::{SortDirection, SortSpec};

pub struct ViewOrder;

impl ViewOrder {
    /// Parse `"name"`, `"name desc"` or `"-name"` against the fields a
    /// screen allows sorting on. Field names match case-insensitively and
    /// come back in the screen's spelling.
    pub fn parse(input: &str, allowed: &[&str]) -> Result<SortSpec, ViewError> {
        let trimmed = input.trim();
        let mut it = trimmed.split_whitespace();
        let first = it
            .next()
            .ok_or_else(|| ViewError::InvalidSortField(input.to_string()))?;

        let (column, mut direction) = match first.strip_prefix('-') {
            Some(rest) => (rest, SortDirection::Desc),
            None => (first, SortDirection::Asc),
        };

        if let Some(dir) = it.next() {
            direction = if dir.eq_ignore_ascii_case("desc") {
                SortDirection::Desc
            } else if dir.eq_ignore_ascii_case("asc") {
                SortDirection::Asc
            } else {
                return Err(ViewError::InvalidSortField(input.to_string()));
            };
        }

        let field = Self::resolve(column, allowed)?;
        Ok(SortSpec {
            field: field.to_string(),
            direction,
        })
    }

    pub fn resolve<'a>(column: &str, allowed: &[&'a str]) -> Result<&'a str, ViewError> {
        allowed
            .iter()
            .find(|f| f.eq_ignore_ascii_case(column))
            .copied()
            .ok_or_else(|| ViewError::InvalidSortField(column.to_string()))
    }
}
