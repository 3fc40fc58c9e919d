use crate::models::{AlumniRecord, SupportStatus};

/// Active table constraints. Every field is optional; `None` means the
/// dimension is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub batch: Option<String>,
    pub state: Option<String>,
    pub support_status: Option<SupportStatus>,
    pub work_status: Option<String>,
}

impl FilterCriteria {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = non_empty(term.into());
        self
    }

    pub fn with_batch(mut self, batch: impl Into<String>) -> Self {
        self.batch = non_empty(batch.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = non_empty(state.into());
        self
    }

    pub fn with_support_status(mut self, status: SupportStatus) -> Self {
        self.support_status = Some(status);
        self
    }

    pub fn with_work_status(mut self, status: impl Into<String>) -> Self {
        self.work_status = non_empty(status.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, record: &AlumniRecord) -> bool {
        self.matches_search(record)
            && exact(&self.batch, &record.batch)
            && exact(&self.state, &record.alumni_state_chapter)
            && self
                .support_status
                .map_or(true, |status| status == record.support_status)
            && exact(&self.work_status, &record.work_status)
    }

    fn matches_search(&self, record: &AlumniRecord) -> bool {
        let Some(term) = self.search.as_deref() else {
            return true;
        };
        let term = term.to_lowercase();

        [
            Some(record.name.as_str()),
            record.designation.as_deref(),
            record.org_name.as_deref(),
            record.college.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn exact(constraint: &Option<String>, value: &str) -> bool {
    constraint.as_deref().map_or(true, |wanted| wanted == value)
}

/// Returns the records satisfying every active constraint, in input order.
pub fn apply_filters<'a>(
    records: &'a [AlumniRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a AlumniRecord> {
    if criteria.is_empty() {
        return records.iter().collect();
    }

    records.iter().filter(|r| criteria.matches(r)).collect()
}
