use super::Session;
use crate::query::Limit;

impl Session<'_> {
    /// `limit n`, or the dialect's maximum when only an offset was requested.
    pub(super) fn limit(&mut self, limit: Option<&Limit>, offset: Option<u64>) -> String {
        let resolved = match limit {
            None if offset.is_some_and(|offset| offset > 0) => {
                self.fmt.dialect().max_limit().to_string()
            }
            None => return String::new(),
            Some(Limit::Literal(limit)) => limit.to_string(),
            Some(Limit::Bind { bind }) => self.fmt.parameter(bind),
            Some(Limit::Raw(raw)) => self.fmt.unwrap_raw(raw),
        };
        format!("limit {resolved}")
    }
}

/// `offset n`, omitted for a zero offset.
pub(super) fn offset(offset: Option<u64>) -> String {
    match offset {
        Some(offset) if offset > 0 => format!("offset {offset}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use crate::clause::Raw;
    use crate::query::Limit;
    use crate::value::SqlValue;
    use crate::QueryCompiler;

    #[test]
    fn test_literal_limit() {
        let compiled = QueryCompiler::new().compile_limit(Some(&Limit::Literal(10)), None);
        assert_eq!(compiled.sql, "limit 10");
        assert!(compiled.bindings.is_empty());
    }

    #[test]
    fn test_zero_limit_is_kept() {
        let compiled = QueryCompiler::new().compile_limit(Some(&Limit::Literal(0)), None);
        assert_eq!(compiled.sql, "limit 0");
    }

    #[test]
    fn test_offset_without_limit() {
        let compiled = QueryCompiler::new().compile_limit(None, Some(5));
        assert_eq!(compiled.sql, "limit 18446744073709551615");
    }

    #[test]
    fn test_nothing_requested() {
        let compiler = QueryCompiler::new();
        assert!(compiler.compile_limit(None, None).is_empty());
        assert!(compiler.compile_limit(None, Some(0)).is_empty());
    }

    #[test]
    fn test_bound_limit() {
        let limit = Limit::Bind {
            bind: SqlValue::Int(25),
        };
        let compiled = QueryCompiler::new().compile_limit(Some(&limit), Some(3));
        assert_eq!(compiled.sql, "limit ?");
        assert_eq!(compiled.bindings, vec![SqlValue::Int(25)]);
    }

    #[test]
    fn test_raw_limit() {
        let limit = Limit::Raw(Raw::new("? by user_id").bind(3));
        let compiled = QueryCompiler::new().compile_limit(Some(&limit), None);
        assert_eq!(compiled.sql, "limit ? by user_id");
        assert_eq!(compiled.bindings, vec![SqlValue::Int(3)]);
    }
}
