//! Composable query options
//!
//! A [`QueryOption`] is plain data describing one predicate or modifier over
//! an entity's columns. Repositories receive a slice of options and fold them
//! onto a SeaORM [`Select`] left to right with [`apply`]. Because sea-query
//! renders WHERE, ORDER BY and LIMIT as separate clauses, predicates always
//! filter before the window is applied regardless of option order.
//!
//! Options never fail on their own. A column that does not exist in the
//! backing table surfaces as a database error when the statement runs.

use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select,
    Value,
};

use crate::shared::types::pagination::window_offset;

#[derive(Debug, Clone)]
pub enum QueryOption<C> {
    Equals(C, Value),
    In(C, Vec<Value>),
    /// Substring match, rendered as `LIKE '%value%'`.
    Like(C, String),
    Gte(C, Value),
    Lte(C, Value),
    Gt(C, Value),
    Lt(C, Value),
    IsNull(C),
    NotNull(C),
    OrderBy(C, Order),
    Paginate { offset: u64, limit: u64 },
    Limit(u64),
    Offset(u64),
    Distinct,
    GroupBy(Vec<C>),
    /// Predicate applied to groups rather than rows.
    Having(Box<QueryOption<C>>),
    /// Project only these columns.
    Select(Vec<C>),
    /// Project every column except these.
    Omit(Vec<C>),
    Combine(Vec<QueryOption<C>>),
    Noop,
}

impl<C: ColumnTrait> QueryOption<C> {
    pub fn equals(column: C, value: impl Into<Value>) -> Self {
        Self::Equals(column, value.into())
    }

    pub fn is_in<V: Into<Value>>(column: C, values: impl IntoIterator<Item = V>) -> Self {
        Self::In(column, values.into_iter().map(Into::into).collect())
    }

    /// An empty string means "no filter".
    pub fn like(column: C, value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Noop
        } else {
            Self::Like(column, value)
        }
    }

    /// Inclusive on both ends.
    pub fn between(column: C, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self::Combine(vec![Self::gte(column, low), Self::lte(column, high)])
    }

    pub fn gte(column: C, value: impl Into<Value>) -> Self {
        Self::Gte(column, value.into())
    }

    pub fn lte(column: C, value: impl Into<Value>) -> Self {
        Self::Lte(column, value.into())
    }

    pub fn gt(column: C, value: impl Into<Value>) -> Self {
        Self::Gt(column, value.into())
    }

    pub fn lt(column: C, value: impl Into<Value>) -> Self {
        Self::Lt(column, value.into())
    }

    pub fn is_null(column: C) -> Self {
        Self::IsNull(column)
    }

    pub fn not_null(column: C) -> Self {
        Self::NotNull(column)
    }

    // ── Conditional variants ───────────────────────────────────

    pub fn equals_if(condition: bool, column: C, value: impl Into<Value>) -> Self {
        if condition {
            Self::equals(column, value)
        } else {
            Self::Noop
        }
    }

    pub fn like_if(condition: bool, column: C, value: impl Into<String>) -> Self {
        if condition {
            Self::like(column, value)
        } else {
            Self::Noop
        }
    }

    /// Applied only for `Some`, so `Some(0)` still filters on zero.
    pub fn equals_if_present<V: Into<Value>>(column: C, value: Option<V>) -> Self {
        value.map_or(Self::Noop, |v| Self::equals(column, v))
    }

    pub fn gte_if_present<V: Into<Value>>(column: C, value: Option<V>) -> Self {
        value.map_or(Self::Noop, |v| Self::gte(column, v))
    }

    pub fn lte_if_present<V: Into<Value>>(column: C, value: Option<V>) -> Self {
        value.map_or(Self::Noop, |v| Self::lte(column, v))
    }

    // ── Ordering and windowing ─────────────────────────────────

    pub fn order_by_asc(column: C) -> Self {
        Self::OrderBy(column, Order::Asc)
    }

    pub fn order_by_desc(column: C) -> Self {
        Self::OrderBy(column, Order::Desc)
    }

    pub fn order_by_multi(orders: impl IntoIterator<Item = (C, Order)>) -> Self {
        Self::Combine(
            orders
                .into_iter()
                .map(|(column, order)| Self::OrderBy(column, order))
                .collect(),
        )
    }

    /// No-op unless both `page >= 1` and `page_size >= 1`. Offsets past
    /// `i64::MAX` saturate, so a huge page yields an empty window.
    pub fn paginate(page: i64, page_size: i64) -> Self {
        if page < 1 || page_size < 1 {
            return Self::Noop;
        }
        let limit = page_size as u64;
        Self::Paginate {
            offset: window_offset(page as u64, limit),
            limit,
        }
    }

    pub fn limit(limit: u64) -> Self {
        Self::Limit(limit)
    }

    pub fn offset(offset: u64) -> Self {
        Self::Offset(offset)
    }

    pub fn distinct() -> Self {
        Self::Distinct
    }

    pub fn group_by(columns: impl IntoIterator<Item = C>) -> Self {
        Self::GroupBy(columns.into_iter().collect())
    }

    /// Only predicates take effect; anything else renders nothing.
    pub fn having(predicate: QueryOption<C>) -> Self {
        Self::Having(Box::new(predicate))
    }

    pub fn select(columns: impl IntoIterator<Item = C>) -> Self {
        Self::Select(columns.into_iter().collect())
    }

    pub fn omit(columns: impl IntoIterator<Item = C>) -> Self {
        Self::Omit(columns.into_iter().collect())
    }

    pub fn combine(options: impl IntoIterator<Item = QueryOption<C>>) -> Self {
        Self::Combine(options.into_iter().collect())
    }

    // ── Interpretation ─────────────────────────────────────────

    /// The WHERE expression this option contributes, if it is a predicate.
    fn predicate(&self) -> Option<SimpleExpr> {
        let expr = match self {
            Self::Equals(c, v) => c.eq(v.clone()),
            Self::In(c, vs) => c.is_in(vs.iter().cloned()),
            Self::Like(c, s) => c.like(format!("%{s}%")),
            Self::Gte(c, v) => c.gte(v.clone()),
            Self::Lte(c, v) => c.lte(v.clone()),
            Self::Gt(c, v) => c.gt(v.clone()),
            Self::Lt(c, v) => c.lt(v.clone()),
            Self::IsNull(c) => c.is_null(),
            Self::NotNull(c) => c.is_not_null(),
            _ => return None,
        };
        Some(expr)
    }

    fn is_window(&self) -> bool {
        matches!(
            self,
            Self::OrderBy(..) | Self::Paginate { .. } | Self::Limit(_) | Self::Offset(_)
        )
    }

    fn apply_to<E>(&self, select: Select<E>, with_window: bool) -> Select<E>
    where
        E: EntityTrait<Column = C>,
    {
        if let Some(expr) = self.predicate() {
            return select.filter(expr);
        }
        if self.is_window() && !with_window {
            return select;
        }
        match self {
            Self::OrderBy(c, order) => select.order_by(*c, order.clone()),
            Self::Paginate { offset, limit } => select.offset(*offset).limit(*limit),
            Self::Limit(n) => select.limit(*n),
            Self::Offset(n) => select.offset(*n),
            Self::Distinct => select.distinct(),
            Self::GroupBy(cols) => cols.iter().fold(select, |s, c| s.group_by(*c)),
            Self::Having(inner) => match inner.predicate() {
                Some(expr) => select.having(expr),
                None => select,
            },
            Self::Select(cols) => select.select_only().columns(cols.iter().copied()),
            Self::Omit(cols) => {
                let keep = C::iter().filter(|c| !cols.iter().any(|o| o.as_str() == c.as_str()));
                select.select_only().columns(keep)
            }
            Self::Combine(options) => options
                .iter()
                .fold(select, |s, option| option.apply_to(s, with_window)),
            _ => select,
        }
    }
}

/// Folds `options` onto `select`, left to right.
pub fn apply<E: EntityTrait>(select: Select<E>, options: &[QueryOption<E::Column>]) -> Select<E> {
    options
        .iter()
        .fold(select, |s, option| option.apply_to(s, true))
}

/// Like [`apply`] but drops ordering and pagination, for counting.
pub fn apply_predicates<E: EntityTrait>(
    select: Select<E>,
    options: &[QueryOption<E::Column>],
) -> Select<E> {
    options
        .iter()
        .fold(select, |s, option| option.apply_to(s, false))
}

/// AND of every predicate in `options`; modifiers are ignored. Used for
/// bulk UPDATE and DELETE statements, which have no window.
pub fn condition<C: ColumnTrait>(options: &[QueryOption<C>]) -> Condition {
    options.iter().fold(Condition::all(), |cond, option| match option {
        QueryOption::Combine(inner) => cond.add(condition(inner)),
        other => match other.predicate() {
            Some(expr) => cond.add(expr),
            None => cond,
        },
    })
}

/// Whether `options` narrow the row set at all.
pub fn has_predicate<C: ColumnTrait>(options: &[QueryOption<C>]) -> bool {
    options.iter().any(|option| match option {
        QueryOption::Combine(inner) => has_predicate(inner),
        other => other.predicate().is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::entities::power_supply::{Column, Entity};
    use sea_orm::{DbBackend, QueryTrait};

    fn sql(options: &[QueryOption<Column>]) -> String {
        apply(Entity::find(), options)
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn empty_like_is_a_noop() {
        let option = QueryOption::like(Column::Name, "");
        assert!(matches!(option, QueryOption::Noop));
        assert!(!sql(&[option]).contains("WHERE"));
    }

    #[test]
    fn like_wraps_value_in_wildcards() {
        let rendered = sql(&[QueryOption::like(Column::Brand, "Seasonic")]);
        assert!(rendered.contains(r#""power_supplies"."brand" LIKE '%Seasonic%'"#));
    }

    #[test]
    fn present_bounds_render_an_inclusive_range() {
        let rendered = sql(&[
            QueryOption::gte_if_present(Column::Power, Some(600)),
            QueryOption::lte_if_present(Column::Power, Some(900)),
            QueryOption::gte_if_present::<i32>(Column::Stock, None),
        ]);
        let predicates = rendered.split("WHERE").nth(1).unwrap();
        assert!(predicates.contains(r#""power_supplies"."power" >= 600"#));
        assert!(predicates.contains(r#""power_supplies"."power" <= 900"#));
        assert!(!predicates.contains(r#""power_supplies"."stock""#));
    }

    #[test]
    fn zero_is_a_real_filter_value() {
        let rendered = sql(&[QueryOption::equals_if_present(Column::Status, Some(0))]);
        assert!(rendered.contains(r#""power_supplies"."status" = 0"#));
    }

    #[test]
    fn conditional_variants_respect_the_flag() {
        let skipped = sql(&[QueryOption::equals_if(false, Column::Efficiency, "80+ Gold")]);
        assert!(!skipped.contains("WHERE"));

        let applied = sql(&[QueryOption::like_if(true, Column::Name, "RM")]);
        assert!(applied.contains("LIKE '%RM%'"));
    }

    #[test]
    fn paginate_requires_positive_page_and_size() {
        assert!(matches!(QueryOption::<Column>::paginate(0, 10), QueryOption::Noop));
        assert!(matches!(QueryOption::<Column>::paginate(1, 0), QueryOption::Noop));
        assert!(matches!(QueryOption::<Column>::paginate(-1, -1), QueryOption::Noop));

        let rendered = sql(&[QueryOption::paginate(3, 20)]);
        assert!(rendered.contains("LIMIT 20"));
        assert!(rendered.contains("OFFSET 40"));
    }

    #[test]
    fn last_representable_page_saturates_the_offset() {
        let option = QueryOption::<Column>::paginate(i64::MAX, 100);
        assert!(matches!(
            option,
            QueryOption::Paginate { offset, limit: 100 } if offset == i64::MAX as u64
        ));
        assert!(sql(&[option]).contains(&format!("OFFSET {}", i64::MAX)));
    }

    #[test]
    fn window_after_predicates_regardless_of_option_order() {
        let rendered = sql(&[
            QueryOption::paginate(1, 5),
            QueryOption::order_by_desc(Column::Id),
            QueryOption::equals(Column::Modular, true),
        ]);
        let where_at = rendered.find("WHERE").unwrap();
        let order_at = rendered.find("ORDER BY").unwrap();
        let limit_at = rendered.find("LIMIT").unwrap();
        assert!(where_at < order_at && order_at < limit_at);
    }

    #[test]
    fn multi_ordering_keeps_sequence() {
        let rendered = sql(&[QueryOption::order_by_multi([
            (Column::Brand, Order::Asc),
            (Column::Price, Order::Desc),
        ])]);
        assert!(rendered.contains(
            r#"ORDER BY "power_supplies"."brand" ASC, "power_supplies"."price" DESC"#
        ));
    }

    #[test]
    fn count_form_drops_window_but_keeps_predicates() {
        let options = [
            QueryOption::combine([
                QueryOption::equals(Column::Status, 1),
                QueryOption::order_by_desc(Column::Id),
            ]),
            QueryOption::paginate(2, 10),
        ];
        let rendered = apply_predicates(Entity::find(), &options)
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(rendered.contains(r#""power_supplies"."status" = 1"#));
        assert!(!rendered.contains("ORDER BY"));
        assert!(!rendered.contains("LIMIT"));
    }

    #[test]
    fn in_and_null_predicates() {
        let rendered = sql(&[
            QueryOption::is_in(Column::Id, [1i64, 2, 3]),
            QueryOption::not_null(Column::Brand),
        ]);
        assert!(rendered.contains(r#""power_supplies"."id" IN (1, 2, 3)"#));
        assert!(rendered.contains(r#""power_supplies"."brand" IS NOT NULL"#));
    }

    #[test]
    fn projection_and_omission() {
        let only = sql(&[QueryOption::select([Column::Id, Column::Name])]);
        assert!(only.starts_with(r#"SELECT "power_supplies"."id", "power_supplies"."name" FROM"#));

        let omitted = sql(&[QueryOption::omit([Column::Description])]);
        assert!(!omitted.contains("description"));
        assert!(omitted.contains(r#""power_supplies"."name""#));
    }

    #[test]
    fn grouping_with_having() {
        let rendered = sql(&[
            QueryOption::having(QueryOption::gte(Column::Brand, "M")),
            QueryOption::group_by([Column::Brand]),
            QueryOption::having(QueryOption::limit(3)),
        ]);
        let group_at = rendered.find(r#"GROUP BY "power_supplies"."brand""#).unwrap();
        let having_at = rendered.find(r#"HAVING "power_supplies"."brand" >= 'M'"#).unwrap();
        assert!(group_at < having_at);
        assert!(!rendered.contains("LIMIT"));
    }

    #[test]
    fn distinct_is_rendered() {
        assert!(sql(&[QueryOption::distinct()]).starts_with("SELECT DISTINCT"));
    }

    #[test]
    fn condition_collects_nested_predicates_only() {
        let options = [
            QueryOption::combine([QueryOption::equals(Column::Brand, "Corsair")]),
            QueryOption::order_by_asc(Column::Id),
            QueryOption::Noop,
        ];
        assert!(has_predicate(&options));
        assert!(!has_predicate(&[QueryOption::<Column>::limit(5)]));

        let rendered = Entity::find()
            .filter(condition(&options))
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(rendered.contains(r#""power_supplies"."brand" = 'Corsair'"#));
        assert!(!rendered.contains("ORDER BY"));
    }
}
