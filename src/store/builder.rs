//! # Statement Builder
//!
//! Composes parameterized SQL from fragments. Every fragment that carries
//! `?` placeholders is appended together with its values, so the
//! placeholder order and the parameter order cannot drift apart.

use super::value::SqlValue;

/// A SQL template with its positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlValue>,
}

impl Statement {
    /// A statement without placeholders
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Number of `?` placeholders in the template
    pub fn placeholder_count(&self) -> usize {
        count_placeholders(&self.sql)
    }
}

/// Incremental statement builder
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    sql: String,
    params: Vec<SqlValue>,
}

impl QueryBuilder {
    /// Start from a base template without placeholders
    pub fn new(base: &str) -> Self {
        debug_assert_eq!(count_placeholders(base), 0, "base must not bind values");
        Self {
            sql: base.to_string(),
            params: Vec::new(),
        }
    }

    /// Append a fragment that binds nothing
    pub fn push(mut self, fragment: &str) -> Self {
        debug_assert_eq!(count_placeholders(fragment), 0, "use push_bind for '?'");
        self.sql.push_str(fragment);
        self
    }

    /// Append a fragment with exactly one placeholder and its value
    pub fn push_bind(self, fragment: &str, value: impl Into<SqlValue>) -> Self {
        self.push_binds(fragment, [value.into()])
    }

    /// Append a fragment together with one value per placeholder, in order
    pub fn push_binds<I>(mut self, fragment: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SqlValue>,
    {
        let before = self.params.len();
        self.params.extend(values.into_iter().map(Into::into));
        debug_assert_eq!(
            count_placeholders(fragment),
            self.params.len() - before,
            "placeholder/value mismatch in fragment {:?}",
            fragment
        );
        self.sql.push_str(fragment);
        self
    }

    pub fn build(self) -> Statement {
        Statement {
            sql: self.sql,
            params: self.params,
        }
    }
}

fn count_placeholders(sql: &str) -> usize {
    sql.matches('?').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragments_and_params_stay_aligned() {
        let stmt = QueryBuilder::new("SELECT * FROM t WHERE 1=1")
            .push_bind(" AND a = ?", 1)
            .push(" AND b IS NOT NULL")
            .push_binds(" AND (c LIKE ? OR d LIKE ?)", ["%x%", "%y%"])
            .push_bind(" LIMIT ?", 10)
            .build();

        assert_eq!(
            stmt.sql(),
            "SELECT * FROM t WHERE 1=1 AND a = ? AND b IS NOT NULL AND (c LIKE ? OR d LIKE ?) LIMIT ?"
        );
        assert_eq!(
            stmt.params(),
            &[
                SqlValue::Integer(1),
                SqlValue::Text("%x%".to_string()),
                SqlValue::Text("%y%".to_string()),
                SqlValue::Integer(10),
            ]
        );
        assert_eq!(stmt.placeholder_count(), stmt.params().len());
    }

    #[test]
    fn test_raw_statement_has_no_params() {
        let stmt = Statement::raw("SELECT 1");
        assert!(stmt.params().is_empty());
        assert_eq!(stmt.placeholder_count(), 0);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_mismatched_bind_panics_in_debug() {
        let _ = QueryBuilder::new("SELECT 1").push_bind(" WHERE a = ? AND b = ?", 1);
    }
}
