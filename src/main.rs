use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};

mod dataset;
mod embedded;
mod error;
mod filter;
mod logging;
mod models;
mod pagination;
mod report;
mod sort;
mod view;

use dataset::DataSource;
use filter::FilterCriteria;
use models::SupportStatus;
use pagination::DEFAULT_PAGE_SIZE;
use sort::SortKey;
use view::{ViewAction, ViewState};

#[derive(Parser)]
#[command(name = "alumni-dashboard")]
#[command(about = "Alumni population dashboard: summaries, state chapters and a searchable table", long_about = None)]
struct Cli {
    /// URL of the dashboard JSON document (takes precedence over --data-file)
    #[arg(long, global = true, env = "ALUMNI_DATA_URL")]
    data_url: Option<String>,

    /// Read the dashboard JSON document from a local file
    #[arg(long, global = true, env = "ALUMNI_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Seed for the synthetic records of the embedded dataset
    #[arg(long, global = true, env = "ALUMNI_SEED")]
    seed: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline counters, mentoring support and work status breakdown
    Summary,
    /// Alumni per batch, zero-intake batches annotated
    Batches,
    /// Alumni state chapters with their share of the population
    States {
        /// Open the table filtered to this state chapter
        #[arg(long)]
        open: Option<String>,
    },
    /// List the values available for each table filter
    Filters,
    /// Search, filter, sort and page through alumni records
    Table(TableArgs),
    /// Write the summary report
    Report {
        #[arg(long, default_value = "alumni-report.md")]
        out: PathBuf,
    },
}

#[derive(Args)]
struct TableArgs {
    /// Case-insensitive match on name, designation, organisation or college
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    batch: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long, value_enum)]
    support: Option<SupportArg>,
    #[arg(long)]
    work_status: Option<String>,
    /// Column to sort ascending by (sr_no, name, batch, state, org_name, ...)
    #[arg(long)]
    sort: Option<SortKey>,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum SupportArg {
    Yes,
    No,
    Unknown,
}

impl From<SupportArg> for SupportStatus {
    fn from(value: SupportArg) -> Self {
        match value {
            SupportArg::Yes => SupportStatus::Yes,
            SupportArg::No => SupportStatus::No,
            SupportArg::Unknown => SupportStatus::Unknown,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    /// Every matching record, sorted, ignoring pagination
    Csv,
}

impl TableArgs {
    fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::default();
        if let Some(term) = &self.search {
            criteria = criteria.with_search(term.as_str());
        }
        if let Some(batch) = &self.batch {
            criteria = criteria.with_batch(batch.as_str());
        }
        if let Some(state) = &self.state {
            criteria = criteria.with_state(state.as_str());
        }
        if let Some(support) = self.support {
            criteria = criteria.with_support_status(support.into());
        }
        if let Some(status) = &self.work_status {
            criteria = criteria.with_work_status(status.as_str());
        }
        criteria
    }

    fn actions(&self) -> Vec<ViewAction> {
        let mut actions = vec![ViewAction::SetCriteria(self.criteria())];
        if let Some(key) = self.sort {
            actions.push(ViewAction::SortBy(key));
        }
        actions.push(ViewAction::JumpTo(self.page));
        actions
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(logging::Verbosity::from_flags(cli.verbose, cli.quiet));

    let source = match (cli.data_url, cli.data_file) {
        (Some(url), _) => DataSource::Url(url),
        (None, Some(path)) => DataSource::File(path),
        (None, None) => DataSource::Embedded,
    };
    let loaded = dataset::load(&source, cli.seed).await;
    let data = &loaded.dataset;
    tracing::info!(origin = ?loaded.origin, "dataset ready");

    match cli.command {
        Commands::Summary => {
            print!(
                "{}",
                report::render_summary(&data.summary_stats, &data.work_status_distribution)
            );
        }
        Commands::Batches => {
            print!("{}", report::render_batch_distribution(&data.batch_distribution));
        }
        Commands::States { open } => {
            print!(
                "{}",
                report::render_state_list(
                    &data.state_distribution,
                    data.summary_stats.total_alumni
                )
            );

            if let Some(state_name) = open {
                let state = view::replay(
                    data,
                    ViewState::default(),
                    vec![ViewAction::FilterByState(state_name)],
                );
                println!();
                print!("{}", report::render_table(&view::render(data, &state)));
            }
        }
        Commands::Filters => {
            println!("Batches: {}", data.distinct_batches().join(", "));
            println!("States: {}", data.distinct_states().join(", "));
            println!("Work status: {}", data.distinct_work_statuses().join(", "));
            let support: Vec<&str> = SupportStatus::ALL.iter().map(|s| s.as_str()).collect();
            println!("Support: {}", support.join(", "));
        }
        Commands::Table(args) => {
            let state = view::replay(data, ViewState::new(args.page_size), args.actions());
            if state.page != args.page {
                tracing::warn!(requested = args.page, shown = state.page, "page out of range");
            }

            match args.format {
                Format::Text => {
                    print!("{}", report::render_table(&view::render(data, &state)));
                }
                Format::Csv => {
                    let records = view::ordered_view(data, &state);
                    report::write_csv(&records, std::io::stdout().lock())
                        .context("failed to write CSV")?;
                }
            }
        }
        Commands::Report { out } => {
            let document = report::build_report(
                &data.summary_stats,
                &data.batch_distribution,
                &data.state_distribution,
                Local::now().date_naive(),
            );
            match std::fs::write(&out, document) {
                Ok(()) => println!("Report written to {}.", out.display()),
                Err(err) => {
                    tracing::error!(error = %err, path = %out.display(), "report export failed");
                    eprintln!("Error exporting report. Please try again.");
                }
            }
        }
    }

    Ok(())
}
