//! Collection queries: predicates, ordering, and limits.
//!
//! Queries follow document-store semantics rather than SQL ones:
//! a document lacking a field never satisfies a predicate on it and is
//! dropped from results ordered by it.

use std::cmp::Ordering;

use fyp_core::enums::Collection;
use serde_json::Value;

use crate::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
}

/// A single predicate on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    /// Whether `doc` satisfies this predicate.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        let Some(actual) = doc.get(&self.field) else {
            return false;
        };
        match self.op {
            FilterOp::Eq => values_equal(actual, &self.value),
            FilterOp::NotEq => !actual.is_null() && !values_equal(actual, &self.value),
            FilterOp::Lt => same_kind_cmp(actual, &self.value) == Some(Ordering::Less),
            FilterOp::Le => matches!(
                same_kind_cmp(actual, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOp::Gt => same_kind_cmp(actual, &self.value) == Some(Ordering::Greater),
            FilterOp::Ge => matches!(
                same_kind_cmp(actual, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// A query against one collection, built fluently.
///
/// ```
/// use fyp_core::enums::Collection;
/// use fyp_store::query::{Direction, Query};
///
/// let q = Query::new(Collection::Supervisors)
///     .where_eq("departmentId", "dep-cs")
///     .where_eq("active", true)
///     .order_by("currentStudents", Direction::Asc);
/// assert_eq!(q.filters.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: Collection,
    pub filters: Vec<Filter>,
    pub order: Vec<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    #[must_use]
    pub const fn new(collection: Collection) -> Self {
        Self {
            collection,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            op,
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn where_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOp::Eq, value)
    }

    #[must_use]
    pub fn where_not_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOp::NotEq, value)
    }

    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order.push(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `doc` passes every filter and carries every ordered field.
    #[must_use]
    pub fn admits(&self, doc: &Document) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
            && self.order.iter().all(|o| doc.get(&o.field).is_some())
    }

    /// Filter, sort, and truncate `docs` the way a backend would.
    ///
    /// Ties on every ordered field fall back to document id.
    #[must_use]
    pub fn apply(&self, docs: impl IntoIterator<Item = Document>) -> Vec<Document> {
        let mut matched: Vec<Document> = docs.into_iter().filter(|d| self.admits(d)).collect();
        matched.sort_by(|a, b| self.compare(a, b));
        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }

    fn compare(&self, a: &Document, b: &Document) -> Ordering {
        for key in &self.order {
            let ord = match (a.get(&key.field), b.get(&key.field)) {
                (Some(x), Some(y)) => total_cmp(x, y),
                _ => Ordering::Equal,
            };
            let ord = match key.direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        a.id.cmp(&b.id)
    }
}

const fn kind_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn same_kind_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => same_kind_cmp(a, b) == Some(Ordering::Equal),
        _ => a == b,
    }
}

/// Cross-kind ordering: null < bool < number < string < array < object.
fn total_cmp(a: &Value, b: &Value) -> Ordering {
    same_kind_cmp(a, b).unwrap_or_else(|| kind_rank(a).cmp(&kind_rank(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::fields_from;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn sup(id: &str, dept: &str, current: u64, active: bool) -> Document {
        Document::new(
            id,
            fields_from([
                ("departmentId", json!(dept)),
                ("currentStudents", json!(current)),
                ("active", json!(active)),
            ]),
        )
    }

    fn ids(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn orders_ascending_with_id_tiebreak() {
        let q = Query::new(Collection::Supervisors).order_by("currentStudents", Direction::Asc);
        let out = q.apply(vec![
            sup("c", "d1", 3, true),
            sup("b", "d1", 1, true),
            sup("a", "d1", 1, true),
        ]);
        assert_eq!(ids(&out), vec!["a", "b", "c"]);
    }

    #[test]
    fn multi_key_order_groups_by_first_key() {
        let q = Query::new(Collection::Supervisors)
            .order_by("departmentId", Direction::Asc)
            .order_by("currentStudents", Direction::Asc);
        let out = q.apply(vec![
            sup("x", "d2", 0, true),
            sup("y", "d1", 4, true),
            sup("z", "d1", 2, true),
        ]);
        assert_eq!(ids(&out), vec!["z", "y", "x"]);
    }

    #[test]
    fn missing_order_field_excludes_document() {
        let mut bare = sup("bare", "d1", 0, true);
        bare.fields.remove("currentStudents");
        let q = Query::new(Collection::Supervisors).order_by("currentStudents", Direction::Asc);
        let out = q.apply(vec![bare, sup("full", "d1", 0, true)]);
        assert_eq!(ids(&out), vec!["full"]);
    }

    #[test]
    fn not_eq_skips_missing_and_matching() {
        let mut bare = sup("bare", "d1", 0, true);
        bare.fields.remove("departmentId");
        let q = Query::new(Collection::Supervisors).where_not_eq("departmentId", "d1");
        let out = q.apply(vec![bare, sup("same", "d1", 0, true), sup("other", "d2", 0, true)]);
        assert_eq!(ids(&out), vec!["other"]);
    }

    #[test]
    fn limit_truncates_after_sort() {
        let q = Query::new(Collection::Supervisors)
            .where_eq("active", true)
            .order_by("currentStudents", Direction::Desc)
            .limit(1);
        let out = q.apply(vec![
            sup("low", "d1", 1, true),
            sup("high", "d1", 9, true),
            sup("off", "d1", 20, false),
        ]);
        assert_eq!(ids(&out), vec!["high"]);
    }

    #[rstest]
    #[case(FilterOp::Lt, 3, vec!["a"])]
    #[case(FilterOp::Le, 3, vec!["a", "b"])]
    #[case(FilterOp::Gt, 3, vec!["c"])]
    #[case(FilterOp::Ge, 3, vec!["b", "c"])]
    #[case(FilterOp::Eq, 3, vec!["b"])]
    fn range_filters(#[case] op: FilterOp, #[case] bound: u64, #[case] expected: Vec<&str>) {
        let q = Query::new(Collection::Supervisors)
            .filter("currentStudents", op, bound)
            .order_by("currentStudents", Direction::Asc);
        let out = q.apply(vec![
            sup("a", "d", 1, true),
            sup("b", "d", 3, true),
            sup("c", "d", 5, true),
        ]);
        assert_eq!(ids(&out), expected);
    }

    #[test]
    fn integer_and_float_compare_equal() {
        let doc = Document::new("f", fields_from([("currentStudents", json!(2.0))]));
        let q = Query::new(Collection::Supervisors).where_eq("currentStudents", 2);
        assert!(q.admits(&doc));
    }

    #[test]
    fn range_filter_ignores_other_kinds() {
        let doc = Document::new("s", fields_from([("currentStudents", json!("2"))]));
        let q = Query::new(Collection::Supervisors).filter("currentStudents", FilterOp::Lt, 5);
        assert!(!q.admits(&doc));
    }
}
