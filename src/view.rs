use std::ops::RangeInclusive;

use tracing::debug;

use crate::filter::{apply_filters, FilterCriteria};
use crate::models::{AlumniRecord, Dataset};
use crate::pagination::{page_slice, total_pages, PageBounds, DEFAULT_PAGE_SIZE};
use crate::sort::{sort_records, SortKey};

/// A user interaction that produces the next [`ViewState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    SetCriteria(FilterCriteria),
    /// Clicking a state chapter: replace only the state constraint.
    FilterByState(String),
    SortBy(SortKey),
    Next,
    Prev,
    JumpTo(usize),
}

/// Session state of the table. Values are replaced on every interaction,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub criteria: FilterCriteria,
    pub sort: Option<SortKey>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Transition to the next state. `total_pages` is the page count of
    /// the current filtered view; page moves outside `1..=total_pages`
    /// leave the state unchanged.
    pub fn apply(&self, action: ViewAction, total_pages: usize) -> ViewState {
        let next = match action {
            ViewAction::SetCriteria(criteria) => Self {
                criteria,
                page: 1,
                ..self.clone()
            },
            ViewAction::FilterByState(state) => Self {
                criteria: self.criteria.clone().with_state(state),
                page: 1,
                ..self.clone()
            },
            ViewAction::SortBy(key) => Self {
                sort: Some(key),
                page: 1,
                ..self.clone()
            },
            ViewAction::Next => self.with_page(self.page + 1, total_pages),
            ViewAction::Prev => self.with_page(self.page.saturating_sub(1), total_pages),
            ViewAction::JumpTo(page) => self.with_page(page, total_pages),
        };

        if next.page != self.page {
            debug!(from = self.page, to = next.page, "page changed");
        }
        next
    }

    fn with_page(&self, page: usize, total_pages: usize) -> ViewState {
        if (1..=total_pages).contains(&page) {
            Self {
                page,
                ..self.clone()
            }
        } else {
            self.clone()
        }
    }
}

/// Filtered and sorted records, before pagination.
pub fn ordered_view<'a>(dataset: &'a Dataset, view: &ViewState) -> Vec<&'a AlumniRecord> {
    let mut records = apply_filters(&dataset.alumni_data, &view.criteria);
    if let Some(key) = view.sort {
        sort_records(&mut records, key);
    }
    records
}

/// Everything the table renderer needs for one page.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    pub rows: Vec<&'a AlumniRecord>,
    pub bounds: PageBounds,
}

impl TableView<'_> {
    pub fn page_window(&self) -> RangeInclusive<usize> {
        self.bounds.window()
    }
}

pub fn render<'a>(dataset: &'a Dataset, view: &ViewState) -> TableView<'a> {
    let records = ordered_view(dataset, view);
    let rows = page_slice(&records, view.page, view.page_size).to_vec();
    let bounds = PageBounds::new(view.page, view.page_size, records.len());

    debug!(
        matched = records.len(),
        page = view.page,
        pages = bounds.total_pages,
        "rendered table view"
    );

    TableView { rows, bounds }
}

/// Page count of the filtered view for `view`.
pub fn page_count(dataset: &Dataset, view: &ViewState) -> usize {
    let matched = apply_filters(&dataset.alumni_data, &view.criteria).len();
    total_pages(matched, view.page_size)
}

/// Applies a sequence of actions from the initial state, recomputing the
/// page count after each one.
pub fn replay(dataset: &Dataset, initial: ViewState, actions: Vec<ViewAction>) -> ViewState {
    actions.into_iter().fold(initial, |state, action| {
        let pages = page_count(dataset, &state);
        state.apply(action, pages)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SupportStatus;

    fn sample_dataset(len: u32) -> Dataset {
        let alumni_data = (1..=len)
            .map(|i| AlumniRecord {
                sr_no: i,
                name: format!("Alumnus {i}"),
                batch: format!("B-{}", i % 3 + 1),
                alumni_state_chapter: if i % 2 == 0 { "Bihar" } else { "Assam" }.to_string(),
                work_status: "Intrapreneur".to_string(),
                support_status: SupportStatus::Yes,
                ..Default::default()
            })
            .collect();
        Dataset {
            alumni_data,
            ..Default::default()
        }
    }

    #[test]
    fn initial_state_is_first_page_unsorted() {
        let state = ViewState::default();
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, 50);
        assert_eq!(state.sort, None);
        assert!(state.criteria.is_empty());
    }

    #[test]
    fn prev_at_first_page_is_a_no_op() {
        let state = ViewState::default();
        assert_eq!(state.apply(ViewAction::Prev, 37), state);
    }

    #[test]
    fn next_at_last_page_is_a_no_op() {
        let state = ViewState::default().apply(ViewAction::JumpTo(37), 37);
        assert_eq!(state.page, 37);
        assert_eq!(state.apply(ViewAction::Next, 37), state);
    }

    #[test]
    fn next_with_no_pages_is_a_no_op() {
        let state = ViewState::default();
        assert_eq!(state.apply(ViewAction::Next, 0).page, 1);
    }

    #[test]
    fn jump_outside_range_is_ignored() {
        let state = ViewState::default().apply(ViewAction::JumpTo(5), 10);
        assert_eq!(state.page, 5);
        assert_eq!(state.apply(ViewAction::JumpTo(0), 10).page, 5);
        assert_eq!(state.apply(ViewAction::JumpTo(11), 10).page, 5);
    }

    #[test]
    fn criteria_and_sort_changes_reset_page() {
        let state = ViewState::default().apply(ViewAction::JumpTo(4), 10);
        let filtered = state.apply(
            ViewAction::SetCriteria(FilterCriteria::default().with_batch("B-1")),
            10,
        );
        assert_eq!(filtered.page, 1);

        let sorted = state.apply(ViewAction::SortBy(SortKey::Name), 10);
        assert_eq!(sorted.page, 1);
        assert_eq!(sorted.sort, Some(SortKey::Name));
    }

    #[test]
    fn new_sort_key_replaces_previous() {
        let state = ViewState::default()
            .apply(ViewAction::SortBy(SortKey::Name), 1)
            .apply(ViewAction::SortBy(SortKey::SrNo), 1);
        assert_eq!(state.sort, Some(SortKey::SrNo));
    }

    #[test]
    fn filter_by_state_keeps_other_constraints() {
        let state = ViewState::default().apply(
            ViewAction::SetCriteria(FilterCriteria::default().with_batch("B-2")),
            1,
        );
        let state = state.apply(ViewAction::FilterByState("Bihar".to_string()), 1);
        assert_eq!(state.criteria.batch.as_deref(), Some("B-2"));
        assert_eq!(state.criteria.state.as_deref(), Some("Bihar"));
    }

    #[test]
    fn renders_last_page_of_full_dataset() {
        let dataset = sample_dataset(1803);
        let state = replay(
            &dataset,
            ViewState::default(),
            vec![ViewAction::JumpTo(37)],
        );
        let table = render(&dataset, &state);
        assert_eq!(table.bounds.total_pages, 37);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].sr_no, 1801);
        assert_eq!(table.page_window(), 35..=37);
    }

    #[test]
    fn pipeline_filters_then_sorts_then_paginates() {
        let dataset = sample_dataset(120);
        let state = ViewState::new(10)
            .apply(
                ViewAction::SetCriteria(FilterCriteria::default().with_state("Bihar")),
                12,
            )
            .apply(ViewAction::SortBy(SortKey::Name), 6);
        let table = render(&dataset, &state);

        assert_eq!(table.bounds.total_records, 60);
        assert_eq!(table.bounds.total_pages, 6);
        assert!(table
            .rows
            .iter()
            .all(|r| r.alumni_state_chapter == "Bihar"));
        let names: Vec<&str> = table.rows.iter().map(|r| r.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_by(|a, b| crate::sort::collate(a, b));
        assert_eq!(names, sorted);
    }

    #[test]
    fn replay_clamps_navigation_against_filtered_pages() {
        let dataset = sample_dataset(100);
        let state = replay(
            &dataset,
            ViewState::new(10),
            vec![
                ViewAction::SetCriteria(FilterCriteria::default().with_state("Assam")),
                ViewAction::JumpTo(5),
                ViewAction::Next,
                ViewAction::Next,
            ],
        );
        assert_eq!(state.page, 5);
    }

    #[test]
    fn empty_filter_result_yields_no_pages() {
        let dataset = sample_dataset(20);
        let state = ViewState::default().apply(
            ViewAction::SetCriteria(FilterCriteria::default().with_state("Goa")),
            1,
        );
        let table = render(&dataset, &state);
        assert!(table.rows.is_empty());
        assert_eq!(table.bounds.total_pages, 0);
        assert!(!table.bounds.has_next());
        assert!(table.page_window().is_empty());
    }
}
