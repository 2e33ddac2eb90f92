//! Ordering for collection queries.

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Specifies the ordering of query results.
///
/// Multiple fields can be chained together for secondary, tertiary, etc. sorting.
///
/// # Example
///
/// ```
/// use molgenis_lib::api::query::Sort;
///
/// let sort = Sort::desc("size").then_asc("name");
/// assert_eq!(sort.to_param(), "size:desc,name:asc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    fields: Vec<(String, Direction)>,
}

impl Sort {
    /// Creates an ascending order on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Asc)],
        }
    }

    /// Creates a descending order on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Desc)],
        }
    }

    /// Adds a secondary ascending order on a field.
    pub fn then_asc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Asc));
        self
    }

    /// Adds a secondary descending order on a field.
    pub fn then_desc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Desc));
        self
    }

    /// Returns the ordered fields with their directions.
    pub fn fields(&self) -> &[(String, Direction)] {
        &self.fields
    }

    /// Renders the value of the `sort` query parameter.
    pub fn to_param(&self) -> String {
        self.fields
            .iter()
            .map(|(field, direction)| format!("{field}:{}", direction.as_str()))
            .collect::<Vec<_>>()
            .join(",")
    }
}
