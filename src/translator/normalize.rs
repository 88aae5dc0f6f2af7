//! Criteria normalization
//!
//! Fills in the defaults both backends rely on:
//! - limit 0 becomes the default limit
//! - a query with at most one filter is joined by `and`
//! - a filter with exactly one condition is joined by `and`
//!
//! Normalizing twice gives the same criteria as normalizing once.

use crate::model::{Criteria, Logical, DEFAULT_PAGINATION_LIMIT};

/// Normalizes a criteria with the standard default limit.
pub fn prepare_criteria(criteria: Criteria) -> Criteria {
    prepare_criteria_with_limit(criteria, DEFAULT_PAGINATION_LIMIT)
}

/// Normalizes a criteria, replacing a zero limit with `default_limit`.
pub fn prepare_criteria_with_limit(mut criteria: Criteria, default_limit: u32) -> Criteria {
    if criteria.pagination.limit == 0 {
        criteria.pagination.limit = default_limit;
    }

    let query = &mut criteria.query;
    if query.filters.len() <= 1 {
        query.logical = Some(Logical::And);
    }

    for filter in &mut query.filters {
        if filter.conditions.len() == 1 {
            filter.logical = Some(Logical::And);
        }
    }

    criteria
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, Filter, Operator, Pagination, Query};

    fn condition(field: &str) -> Condition {
        Condition::new(field, Operator::Equals, "x")
    }

    #[test]
    fn test_zero_limit_defaulted() {
        let prepared = prepare_criteria(Criteria::default());
        assert_eq!(prepared.pagination.limit, 50);
        assert_eq!(prepared.pagination.offset, 0);
    }

    #[test]
    fn test_explicit_limit_kept() {
        let criteria = Criteria::new(Pagination::new(10, 20), Query::new());
        let prepared = prepare_criteria(criteria);
        assert_eq!(prepared.pagination, Pagination::new(10, 20));
    }

    #[test]
    fn test_custom_default_limit() {
        let prepared = prepare_criteria_with_limit(Criteria::default(), 25);
        assert_eq!(prepared.pagination.limit, 25);
    }

    #[test]
    fn test_single_filter_forced_to_and() {
        let query = Query::new()
            .filter(Filter::single(condition("a")))
            .with_logical(Logical::Or);
        let prepared = prepare_criteria(Criteria::new(Pagination::default(), query));

        assert_eq!(prepared.query.logical, Some(Logical::And));
    }

    #[test]
    fn test_no_filters_gets_and() {
        let prepared = prepare_criteria(Criteria::default());
        assert_eq!(prepared.query.logical, Some(Logical::And));
    }

    #[test]
    fn test_multiple_filters_keep_logical() {
        let query = Query::new()
            .filter(Filter::single(condition("a")))
            .filter(Filter::single(condition("b")))
            .with_logical(Logical::Or);
        let prepared = prepare_criteria(Criteria::new(Pagination::default(), query));

        assert_eq!(prepared.query.logical, Some(Logical::Or));
    }

    #[test]
    fn test_single_condition_forced_to_and() {
        let filter = Filter::single(condition("a")).with_logical(Logical::Or);
        let multi = Filter::any(vec![condition("a"), condition("b")]);
        let query = Query::new()
            .filter(filter)
            .filter(multi)
            .with_logical(Logical::And);
        let prepared = prepare_criteria(Criteria::new(Pagination::default(), query));

        assert_eq!(prepared.query.filters[0].logical, Some(Logical::And));
        assert_eq!(prepared.query.filters[1].logical, Some(Logical::Or));
    }

    #[test]
    fn test_idempotent() {
        let query = Query::new()
            .filter(Filter::single(condition("a")).with_logical(Logical::Or))
            .filter(Filter::all(vec![condition("b"), condition("c")]))
            .with_logical(Logical::Or);
        let once = prepare_criteria(Criteria::new(Pagination::new(0, 5), query));
        let twice = prepare_criteria(once.clone());

        assert_eq!(once, twice);
    }
}
