use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::AlumniRecord;

/// Table column a view can be ordered by. Sorting is always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    SrNo,
    Name,
    Batch,
    State,
    OrgName,
    Designation,
    College,
    SupportStatus,
    WorkStatus,
}

impl SortKey {
    pub const ALL: [SortKey; 9] = [
        Self::SrNo,
        Self::Name,
        Self::Batch,
        Self::State,
        Self::OrgName,
        Self::Designation,
        Self::College,
        Self::SupportStatus,
        Self::WorkStatus,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            Self::SrNo => "sr_no",
            Self::Name => "name",
            Self::Batch => "batch",
            Self::State => "alumni_state_chapter",
            Self::OrgName => "org_name",
            Self::Designation => "designation",
            Self::College => "college",
            Self::SupportStatus => "support_status",
            Self::WorkStatus => "work_status",
        }
    }

    /// Text value of this column; missing values read as "".
    pub fn text<'a>(&self, record: &'a AlumniRecord) -> &'a str {
        match self {
            Self::SrNo => "",
            Self::Name => record.name.as_str(),
            Self::Batch => record.batch.as_str(),
            Self::State => record.alumni_state_chapter.as_str(),
            Self::OrgName => record.org_name.as_deref().unwrap_or_default(),
            Self::Designation => record.designation.as_deref().unwrap_or_default(),
            Self::College => record.college.as_deref().unwrap_or_default(),
            Self::SupportStatus => record.support_status.as_str(),
            Self::WorkStatus => record.work_status.as_str(),
        }
    }

    pub fn compare(&self, a: &AlumniRecord, b: &AlumniRecord) -> Ordering {
        match self {
            Self::SrNo => a.sr_no.cmp(&b.sr_no),
            _ => collate(self.text(a), self.text(b)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|key| key.column() == wanted)
            .or(match wanted.as_str() {
                "state" => Some(Self::State),
                _ => None,
            })
            .ok_or_else(|| format!("unknown sort column '{value}'"))
    }
}

/// Dictionary-style ordering: letters compare case-folded first, then
/// lowercase before uppercase, then by raw bytes.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
        .then_with(|| a.cmp(b))
}

fn case_rank(c: char) -> u8 {
    if c.is_uppercase() {
        1
    } else {
        0
    }
}

/// Stable ascending sort of a record view.
pub fn sort_records(records: &mut [&AlumniRecord], key: SortKey) {
    records.sort_by(|a, b| key.compare(a, b));
}
