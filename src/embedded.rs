use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{AlumniRecord, Dataset, DistributionEntry, SummaryStats, SupportStatus};

const SAMPLE_NAMES: [&str; 25] = [
    "Shreya Tiwari",
    "Stephney Steven",
    "Rajesh Kumar",
    "Priya Sharma",
    "Amit Singh",
    "Neha Gupta",
    "Rahul Verma",
    "Pooja Patel",
    "Vikash Yadav",
    "Anjali Mishra",
    "Suresh Chandra",
    "Kavita Joshi",
    "Manoj Kumar",
    "Ritu Singh",
    "Ashok Pandey",
    "Sunita Devi",
    "Ramesh Prasad",
    "Geeta Sharma",
    "Santosh Kumar",
    "Mamta Kumari",
    "Dinesh Singh",
    "Reeta Devi",
    "Bharat Kumar",
    "Suman Gupta",
    "Narayan Prasad",
];

pub fn batch_distribution() -> Vec<DistributionEntry> {
    let batches = vec![
        ("B-1", 8),
        ("B-2", 5),
        ("B-3", 28),
        ("B-4", 68),
        ("B-5", 27),
        ("B-6", 24),
        ("B-7", 66),
        ("B-8", 34),
        ("B-9", 49),
        ("B-10", 71),
        ("B-11", 142),
        ("B-12", 146),
        ("B-13", 0),
        ("B-14", 312),
        ("B-15", 244),
        ("B-16", 579),
    ];

    batches
        .into_iter()
        .map(|(batch, count)| DistributionEntry::new(batch, count, None))
        .collect()
}

pub fn state_distribution() -> Vec<DistributionEntry> {
    let states = vec![
        ("Rajasthan", 378, 20.97),
        ("Bihar", 311, 17.25),
        ("Jharkhand", 179, 9.93),
        ("Maharashtra", 172, 9.54),
        ("Madhya Pradesh", 145, 8.04),
        ("Odisha", 121, 6.71),
        ("Gujarat", 113, 6.27),
        ("Assam", 87, 4.83),
        ("Chhattisgarh", 86, 4.77),
        ("Uttar Pradesh", 59, 3.27),
        ("Haryana", 42, 2.33),
        ("Andhra Pradesh", 22, 1.22),
        ("Uttarakhand", 14, 0.78),
        ("Telangana", 13, 0.72),
        ("Tamil Nadu", 10, 0.55),
    ];

    states
        .into_iter()
        .map(|(state, count, pct)| DistributionEntry::new(state, count, Some(pct)))
        .collect()
}

pub fn work_status_distribution() -> Vec<DistributionEntry> {
    let statuses = vec![
        ("Intrapreneur", 1290, 71.55),
        ("Not working presently", 298, 16.53),
        ("Entrepreneur", 112, 6.21),
        ("Higher Studies", 64, 3.55),
        ("Freelancer/Consultant", 39, 2.16),
    ];

    statuses
        .into_iter()
        .map(|(status, count, pct)| DistributionEntry::new(status, count, Some(pct)))
        .collect()
}

pub fn summary_stats() -> SummaryStats {
    SummaryStats {
        total_alumni: 1803,
        total_batches: 16,
        support_yes: 1279,
        support_no: 426,
        support_unknown: 98,
        states_represented: 29,
        colleges_represented: 1305,
        work_status_categories: 5,
    }
}

/// Builds the fallback dataset. Distribution tables and stats are fixed;
/// the record list is synthesised from `rng`.
pub fn dataset<R: Rng + ?Sized>(rng: &mut R) -> Dataset {
    let mut dataset = Dataset {
        alumni_data: Vec::new(),
        batch_distribution: batch_distribution(),
        state_distribution: state_distribution(),
        work_status_distribution: work_status_distribution(),
        summary_stats: summary_stats(),
    };
    dataset.alumni_data = generate_sample_alumni(&dataset, rng);
    dataset
}

/// One synthetic record per `summary_stats.total_alumni`, with batch,
/// state, work status and support status drawn uniformly. Batches with a
/// zero count are never assigned. The result is not expected to agree
/// with the distribution tables.
pub fn generate_sample_alumni<R: Rng + ?Sized>(dataset: &Dataset, rng: &mut R) -> Vec<AlumniRecord> {
    let batches: Vec<&str> = dataset
        .batch_distribution
        .iter()
        .filter(|b| b.count > 0)
        .map(|b| b.label.as_str())
        .collect();
    let states: Vec<&str> = labels(&dataset.state_distribution);
    let work_statuses: Vec<&str> = labels(&dataset.work_status_distribution);

    (1..=dataset.summary_stats.total_alumni)
        .map(|sr_no| {
            let base = SAMPLE_NAMES.choose(rng).copied().unwrap_or("Alumnus");
            let name = format!("{base} {sr_no}");
            let slug = name.to_lowercase();
            let words: Vec<&str> = slug.split_whitespace().collect();

            AlumniRecord {
                sr_no,
                batch: pick(&batches, rng),
                alumni_state_chapter: pick(&states, rng),
                email: format!("{}@example.com", words.join(".")),
                big_bet: Some("SLDP".to_string()),
                work_status: pick(&work_statuses, rng),
                org_name: Some(format!("Organization {sr_no}")),
                designation: Some(format!("Position {sr_no}")),
                college: Some(format!("College {sr_no}")),
                university: Some(format!("University {sr_no}")),
                linkedin: format!("https://www.linkedin.com/in/{}-{sr_no}", words.join("-")),
                support_status: SupportStatus::ALL
                    .choose(rng)
                    .copied()
                    .unwrap_or_default(),
                name,
            }
        })
        .collect()
}

fn labels(entries: &[DistributionEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.label.as_str()).collect()
}

fn pick<R: Rng + ?Sized>(values: &[&str], rng: &mut R) -> String {
    values.choose(rng).map(|v| v.to_string()).unwrap_or_default()
}
