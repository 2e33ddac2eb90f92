//! RSQL filter expressions for the `q` parameter.

/// A filter condition for querying rows.
///
/// Filters can be combined using logical operators (`And`, `Or`) to build
/// complex query conditions. They render to the RSQL syntax the collection
/// and aggregate resources accept in their `q` parameter.
///
/// # Example
///
/// ```
/// use molgenis_lib::api::query::Filter;
///
/// // Simple equality filter
/// let filter = Filter::eq("country", "NL");
/// assert_eq!(filter.to_rsql(), "country==NL");
///
/// // Combined filter
/// let filter = Filter::and([
///     Filter::eq("country", "NL"),
///     Filter::ge("size", 1000),
/// ]);
/// assert_eq!(filter.to_rsql(), "country==NL;size=ge=1000");
///
/// // Using combinators
/// let filter = Filter::eq("country", "NL")
///     .or_else(Filter::eq("country", "BE"));
/// assert_eq!(filter.to_rsql(), "country==NL,country==BE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Equality: `field==value`
    Eq(String, String),
    /// Not equal: `field!=value`
    Ne(String, String),
    /// Greater than: `field=gt=value`
    Gt(String, String),
    /// Greater than or equal: `field=ge=value`
    Ge(String, String),
    /// Less than: `field=lt=value`
    Lt(String, String),
    /// Less than or equal: `field=le=value`
    Le(String, String),
    /// Substring match: `field=like=value`
    Like(String, String),
    /// Full text search: `field=q=value` (use `*` as field for all attributes)
    Search(String, String),
    /// Membership: `field=in=(a,b,c)`
    In(String, Vec<String>),
    /// Logical AND of multiple filters.
    And(Vec<Filter>),
    /// Logical OR of multiple filters.
    Or(Vec<Filter>),
    /// Raw RSQL string (escape hatch).
    Raw(String),
}

impl Filter {
    /// Creates an equality filter: `field==value`.
    pub fn eq(field: impl Into<String>, value: impl ToString) -> Self {
        Filter::Eq(field.into(), value.to_string())
    }

    /// Creates a not-equal filter: `field!=value`.
    pub fn ne(field: impl Into<String>, value: impl ToString) -> Self {
        Filter::Ne(field.into(), value.to_string())
    }

    /// Creates a greater-than filter: `field=gt=value`.
    pub fn gt(field: impl Into<String>, value: impl ToString) -> Self {
        Filter::Gt(field.into(), value.to_string())
    }

    /// Creates a greater-than-or-equal filter: `field=ge=value`.
    pub fn ge(field: impl Into<String>, value: impl ToString) -> Self {
        Filter::Ge(field.into(), value.to_string())
    }

    /// Creates a less-than filter: `field=lt=value`.
    pub fn lt(field: impl Into<String>, value: impl ToString) -> Self {
        Filter::Lt(field.into(), value.to_string())
    }

    /// Creates a less-than-or-equal filter: `field=le=value`.
    pub fn le(field: impl Into<String>, value: impl ToString) -> Self {
        Filter::Le(field.into(), value.to_string())
    }

    /// Creates a substring filter: `field=like=value`.
    pub fn like(field: impl Into<String>, value: impl ToString) -> Self {
        Filter::Like(field.into(), value.to_string())
    }

    /// Creates a full text search filter: `field=q=value`.
    pub fn search(field: impl Into<String>, value: impl ToString) -> Self {
        Filter::Search(field.into(), value.to_string())
    }

    /// Creates a membership filter: `field=in=(a,b)`.
    pub fn is_in<V: ToString>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Filter::In(field.into(), values.into_iter().map(|v| v.to_string()).collect())
    }

    /// Creates a logical AND of multiple filters.
    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::And(filters.into_iter().collect())
    }

    /// Creates a logical OR of multiple filters.
    pub fn or(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Or(filters.into_iter().collect())
    }

    /// Creates a raw filter string (escape hatch).
    ///
    /// The string is passed through as-is.
    pub fn raw(filter: impl Into<String>) -> Self {
        Filter::Raw(filter.into())
    }

    /// Combines this filter with another using logical AND.
    pub fn and_also(self, other: Filter) -> Self {
        match self {
            Filter::And(mut filters) => {
                filters.push(other);
                Filter::And(filters)
            }
            _ => Filter::And(vec![self, other]),
        }
    }

    /// Combines this filter with another using logical OR.
    pub fn or_else(self, other: Filter) -> Self {
        match self {
            Filter::Or(mut filters) => {
                filters.push(other);
                Filter::Or(filters)
            }
            _ => Filter::Or(vec![self, other]),
        }
    }

    /// Renders this filter as an RSQL expression.
    pub fn to_rsql(&self) -> String {
        match self {
            Filter::Eq(field, value) => comparison(field, "==", value),
            Filter::Ne(field, value) => comparison(field, "!=", value),
            Filter::Gt(field, value) => comparison(field, "=gt=", value),
            Filter::Ge(field, value) => comparison(field, "=ge=", value),
            Filter::Lt(field, value) => comparison(field, "=lt=", value),
            Filter::Le(field, value) => comparison(field, "=le=", value),
            Filter::Like(field, value) => comparison(field, "=like=", value),
            Filter::Search(field, value) => comparison(field, "=q=", value),
            Filter::In(field, values) => {
                let values: Vec<String> = values.iter().map(|v| quote(v)).collect();
                format!("{field}=in=({})", values.join(","))
            }
            Filter::And(filters) => filters
                .iter()
                .map(|f| match f {
                    // `;` binds tighter than `,`
                    Filter::Or(inner) if inner.len() > 1 => format!("({})", f.to_rsql()),
                    _ => f.to_rsql(),
                })
                .collect::<Vec<_>>()
                .join(";"),
            Filter::Or(filters) => filters
                .iter()
                .map(Filter::to_rsql)
                .collect::<Vec<_>>()
                .join(","),
            Filter::Raw(raw) => raw.clone(),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_rsql())
    }
}

fn comparison(field: &str, operator: &str, value: &str) -> String {
    format!("{field}{operator}{}", quote(value))
}

/// Double-quotes a value when it would otherwise be read as RSQL syntax.
fn quote(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value.chars().any(|c| {
            c.is_whitespace() || matches!(c, '"' | '\'' | '(' | ')' | ';' | ',' | '=' | '!' | '<' | '>' | '~')
        });
    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
