use std::fmt;

use super::model::{Row, Table};

// ---------------------------------------------------------------------------
// Filter predicate: optional category equality + optional minimum count
// ---------------------------------------------------------------------------

/// Row selection criteria.
///
/// An absent or empty category keeps every category. A minimum count only
/// takes effect when it is strictly positive, so `Some(0)` keeps zero-count
/// rows and negative thresholds mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    pub category: Option<String>,
    pub min_count: Option<i64>,
}

impl RowFilter {
    /// A filter that keeps everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            min_count: None,
        }
    }

    pub fn by_min_count(min_count: i64) -> Self {
        Self {
            category: None,
            min_count: Some(min_count),
        }
    }

    /// The category predicate, if it constrains anything.
    pub fn active_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// The count threshold, if it constrains anything.
    pub fn active_threshold(&self) -> Option<u64> {
        self.min_count.filter(|&m| m > 0).map(|m| m as u64)
    }

    /// Both active predicates must hold.
    pub fn matches(&self, row: &Row) -> bool {
        if let Some(category) = self.active_category() {
            if row.category != category {
                return false;
            }
        }
        if let Some(threshold) = self.active_threshold() {
            if row.count < threshold {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for RowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.active_category(), self.active_threshold()) {
            (None, None) => write!(f, "all rows"),
            (Some(c), None) => write!(f, "category = {c}"),
            (None, Some(m)) => write!(f, "count >= {m}"),
            (Some(c), Some(m)) => write!(f, "category = {c} and count >= {m}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Applying filters
// ---------------------------------------------------------------------------

/// Build the table of rows passing `filter`. The input is left untouched.
pub fn apply(table: &Table, filter: &RowFilter) -> Table {
    let view: Table = table.iter().filter(|row| filter.matches(row)).cloned().collect();
    log::debug!("filter [{filter}] kept {} of {} rows", view.len(), table.len());
    view
}

/// Convenience form of [`apply`] taking the two predicates directly.
pub fn filter(table: &Table, category: Option<&str>, min_count: Option<i64>) -> Table {
    apply(
        table,
        &RowFilter {
            category: category.map(str::to_string),
            min_count,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn canonical() -> Table {
        Table::from_rows(vec![
            Row::new("Electronics", 100),
            Row::new("Batteries", 50),
            Row::new("Cables", 75),
            Row::new("Appliances", 30),
        ])
    }

    #[test]
    fn category_filter_keeps_exact_matches() {
        let view = filter(&canonical(), Some("Cables"), None);
        assert_eq!(view.rows(), &[Row::new("Cables", 75)]);
    }

    #[test]
    fn category_filter_is_case_sensitive() {
        assert!(filter(&canonical(), Some("cables"), None).is_empty());
    }

    #[test]
    fn min_count_keeps_rows_at_or_above_threshold_in_order() {
        let view = filter(&canonical(), None, Some(60));
        assert_eq!(
            view.rows(),
            &[Row::new("Electronics", 100), Row::new("Cables", 75)]
        );
        let view = filter(&canonical(), None, Some(75));
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn zero_and_negative_thresholds_do_not_filter() {
        let table = Table::from_rows(vec![Row::new("Cables", 0), Row::new("Batteries", 3)]);
        assert_eq!(filter(&table, None, Some(0)), table);
        assert_eq!(filter(&table, None, Some(-10)), table);
    }

    #[test]
    fn empty_category_keeps_all() {
        assert_eq!(filter(&canonical(), Some(""), None), canonical());
    }

    #[test]
    fn predicates_combine_with_and() {
        let table = Table::from_rows(vec![
            Row::new("Cables", 10),
            Row::new("Batteries", 40),
            Row::new("Cables", 40),
        ]);
        let view = filter(&table, Some("Cables"), Some(20));
        assert_eq!(view.rows(), &[Row::new("Cables", 40)]);
    }

    #[test]
    fn unmatched_filters_give_empty_table() {
        assert!(filter(&canonical(), Some("Monitors"), None).is_empty());
        assert!(filter(&canonical(), None, Some(1_000)).is_empty());
    }

    #[test]
    fn display_describes_active_predicates() {
        assert_eq!(RowFilter::all().to_string(), "all rows");
        assert_eq!(RowFilter::by_min_count(0).to_string(), "all rows");
        assert_eq!(
            RowFilter {
                category: Some("Cables".into()),
                min_count: Some(5)
            }
            .to_string(),
            "category = Cables and count >= 5"
        );
    }

    fn arb_table() -> impl Strategy<Value = Table> {
        prop::collection::vec(
            (prop::sample::select(vec!["Electronics", "Batteries", "Cables"]), 0u64..200),
            0..20,
        )
        .prop_map(|rows| rows.into_iter().map(|(c, n)| Row::new(c, n)).collect::<Table>())
    }

    proptest! {
        #[test]
        fn threshold_is_sound_and_complete(table in arb_table(), m in 1i64..250) {
            let view = filter(&table, None, Some(m));
            prop_assert!(view.iter().all(|r| r.count >= m as u64));
            let expected: Vec<Row> = table
                .iter()
                .filter(|r| r.count >= m as u64)
                .cloned()
                .collect();
            prop_assert_eq!(view.rows(), expected.as_slice());
        }

        #[test]
        fn no_predicates_is_identity(table in arb_table()) {
            prop_assert_eq!(filter(&table, None, None), table);
        }
    }
}
