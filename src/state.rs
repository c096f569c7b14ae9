use crate::classify::{classify, Classification};
use crate::config::Settings;
use crate::data::filter::{apply, RowFilter};
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Session state, independent of how it is presented.
pub struct AppState {
    /// The loaded dataset. Never modified after startup.
    pub dataset: Table,

    /// Output locations for reports and charts.
    pub settings: Settings,

    /// Filter behind the current view.
    pub filter: RowFilter,

    /// Rows passing `filter` (cached).
    pub view: Table,
}

impl AppState {
    pub fn new(dataset: Table, settings: Settings) -> Self {
        let view = dataset.clone();
        Self {
            dataset,
            settings,
            filter: RowFilter::all(),
            view,
        }
    }

    /// Replace the active filter and recompute the view.
    pub fn set_filter(&mut self, filter: RowFilter) -> &Table {
        self.view = apply(&self.dataset, &filter);
        log::info!(
            "filter [{filter}]: {} of {} rows",
            self.view.len(),
            self.dataset.len()
        );
        self.filter = filter;
        &self.view
    }

    /// Show the whole dataset again.
    pub fn show_all(&mut self) -> &Table {
        self.set_filter(RowFilter::all())
    }

    /// Names of the categories present in the dataset, first-seen order.
    pub fn known_categories(&self) -> Vec<&str> {
        self.dataset.categories()
    }

    /// Classify an uploaded file name.
    pub fn classify_upload(&self, file_name: &str) -> Classification {
        let result = classify(file_name);
        log::info!("upload {file_name:?}: {result}");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::WasteLabel;
    use crate::data::loader::load_embedded;

    fn state() -> AppState {
        AppState::new(load_embedded().unwrap(), Settings::default())
    }

    #[test]
    fn starts_showing_everything() {
        let s = state();
        assert_eq!(s.view, s.dataset);
        assert_eq!(s.filter, RowFilter::all());
    }

    #[test]
    fn filtering_leaves_dataset_untouched() {
        let mut s = state();
        assert_eq!(s.set_filter(RowFilter::by_min_count(60)).len(), 2);
        assert_eq!(s.dataset.len(), 4);
        assert_eq!(s.show_all().len(), 4);
    }

    #[test]
    fn classification_leaves_view_alone() {
        let s = state();
        let c = s.classify_upload("fridge.jpg");
        assert_eq!(c.label, Some(WasteLabel::Appliance));
        assert_eq!(s.view, s.dataset);
    }

    #[test]
    fn known_categories_follow_dataset_order() {
        assert_eq!(
            state().known_categories(),
            vec!["Electronics", "Batteries", "Cables", "Appliances"]
        );
    }
}
