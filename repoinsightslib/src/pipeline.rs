//! Pipeline orchestration: run every section and assemble the report.
//!
//! Sections run one at a time in [`Section::ALL`] order. Each one is isolated:
//! a failing section leaves its report field empty, is reported to the
//! [`ProgressObserver`] as [`ProgressStatus::Error`], and the run carries on.
//! A run as a whole never fails.
//!
//! ## Example
//!
//! ```rust,ignore
//! use repoinsightslib::{CollectOptions, Collector, ProgressStatus};
//!
//! let collector = Collector::discover(".", CollectOptions::new())?;
//! let report = collector.run(&mut |section, status: &ProgressStatus| {
//!     println!("{section}: {status:?}");
//! });
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::data::collect::{
    activity, attribution, churn, contributors, files, fun_facts, manifest, messages, milestones,
    overview, patterns, streaks, testinfo, Sources,
};
use crate::data::stats::{
    AttributionSummary, ChurnBucket, CodeGrowthPoint, ContributorRecord, DayCount,
    DependencySummary, DirectoryCount, FileChanges, FileSize, FileTypeCount, FunFacts, HourCount,
    MessagePattern, Milestone, MonthCount, OverviewSummary, StreakSummary, TestInventory,
    WeekCount, WorkPatterns,
};
use crate::options::CollectOptions;
use crate::source::{discover_root, FileReader, FsReader, GitCli, HistorySource};
use crate::Result;

/// One report section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Overview,
    CommitsByMonth,
    CommitsByWeek,
    CommitsByDayOfWeek,
    CommitsByHour,
    Contributors,
    FileTypes,
    DirectoryBreakdown,
    LargestFiles,
    HottestFiles,
    ChurnByMonth,
    CommitMessagePatterns,
    Streaks,
    AiContributions,
    Milestones,
    CodeGrowth,
    WorkPatterns,
    TestInfo,
    Dependencies,
    FunFacts,
}

impl Section {
    /// Every section in execution order.
    pub const ALL: [Section; 20] = [
        Section::Overview,
        Section::CommitsByMonth,
        Section::CommitsByWeek,
        Section::CommitsByDayOfWeek,
        Section::CommitsByHour,
        Section::Contributors,
        Section::FileTypes,
        Section::DirectoryBreakdown,
        Section::LargestFiles,
        Section::HottestFiles,
        Section::ChurnByMonth,
        Section::CommitMessagePatterns,
        Section::Streaks,
        Section::AiContributions,
        Section::Milestones,
        Section::CodeGrowth,
        Section::WorkPatterns,
        Section::TestInfo,
        Section::Dependencies,
        Section::FunFacts,
    ];

    /// Report field name of this section.
    pub fn name(self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::CommitsByMonth => "commitsByMonth",
            Section::CommitsByWeek => "commitsByWeek",
            Section::CommitsByDayOfWeek => "commitsByDayOfWeek",
            Section::CommitsByHour => "commitsByHour",
            Section::Contributors => "contributors",
            Section::FileTypes => "fileTypes",
            Section::DirectoryBreakdown => "directoryBreakdown",
            Section::LargestFiles => "largestFiles",
            Section::HottestFiles => "hottestFiles",
            Section::ChurnByMonth => "churnByMonth",
            Section::CommitMessagePatterns => "commitMessagePatterns",
            Section::Streaks => "streaks",
            Section::AiContributions => "aiContributions",
            Section::Milestones => "milestones",
            Section::CodeGrowth => "codeGrowth",
            Section::WorkPatterns => "workPatterns",
            Section::TestInfo => "testInfo",
            Section::Dependencies => "dependencies",
            Section::FunFacts => "funFacts",
        }
    }

    /// Section whose output this one reads. It always runs earlier.
    pub fn depends_on(self) -> Option<Section> {
        match self {
            Section::FunFacts => Some(Section::Overview),
            _ => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Progress of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressStatus {
    Start,
    Done,
    /// The section failed; the message describes why
    Error(String),
}

/// Receives progress notifications, synchronously, in section order.
pub trait ProgressObserver {
    fn on_progress(&mut self, section: Section, status: &ProgressStatus);
}

impl<F> ProgressObserver for F
where
    F: FnMut(Section, &ProgressStatus),
{
    fn on_progress(&mut self, section: Section, status: &ProgressStatus) {
        self(section, status)
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_progress(&mut self, _section: Section, _status: &ProgressStatus) {}
}

/// The full report. A section that failed is `None` and is left out of the
/// serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AggregateReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<OverviewSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits_by_month: Option<Vec<MonthCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits_by_week: Option<Vec<WeekCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits_by_day_of_week: Option<Vec<DayCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits_by_hour: Option<Vec<HourCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Vec<ContributorRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_types: Option<Vec<FileTypeCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_breakdown: Option<Vec<DirectoryCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_files: Option<Vec<FileSize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hottest_files: Option<Vec<FileChanges>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub churn_by_month: Option<Vec<ChurnBucket>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message_patterns: Option<Vec<MessagePattern>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaks: Option<StreakSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_contributions: Option<AttributionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestones: Option<Vec<Milestone>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_growth: Option<Vec<CodeGrowthPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_patterns: Option<WorkPatterns>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_info: Option<TestInventory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fun_facts: Option<FunFacts>,
}

impl AggregateReport {
    /// Whether `section` produced a value.
    pub fn has(&self, section: Section) -> bool {
        match section {
            Section::Overview => self.overview.is_some(),
            Section::CommitsByMonth => self.commits_by_month.is_some(),
            Section::CommitsByWeek => self.commits_by_week.is_some(),
            Section::CommitsByDayOfWeek => self.commits_by_day_of_week.is_some(),
            Section::CommitsByHour => self.commits_by_hour.is_some(),
            Section::Contributors => self.contributors.is_some(),
            Section::FileTypes => self.file_types.is_some(),
            Section::DirectoryBreakdown => self.directory_breakdown.is_some(),
            Section::LargestFiles => self.largest_files.is_some(),
            Section::HottestFiles => self.hottest_files.is_some(),
            Section::ChurnByMonth => self.churn_by_month.is_some(),
            Section::CommitMessagePatterns => self.commit_message_patterns.is_some(),
            Section::Streaks => self.streaks.is_some(),
            Section::AiContributions => self.ai_contributions.is_some(),
            Section::Milestones => self.milestones.is_some(),
            Section::CodeGrowth => self.code_growth.is_some(),
            Section::WorkPatterns => self.work_patterns.is_some(),
            Section::TestInfo => self.test_info.is_some(),
            Section::Dependencies => self.dependencies.is_some(),
            Section::FunFacts => self.fun_facts.is_some(),
        }
    }

    /// Sections without a value, in execution order.
    pub fn missing_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| !self.has(*s))
            .collect()
    }
}

/// Runs every collector against one repository.
#[derive(Debug)]
pub struct Collector<H, F> {
    history: H,
    files: F,
    root: PathBuf,
    options: CollectOptions,
}

impl Collector<GitCli, FsReader> {
    /// Collector for the git work tree containing `path`, using the `git`
    /// executable and the file system.
    pub fn discover(path: impl AsRef<Path>, options: CollectOptions) -> Result<Self> {
        let root = discover_root(path)?;
        let history = GitCli::new(&root).max_output(options.max_query_bytes);
        let files = FsReader::new(&root);
        Ok(Self::new(history, files, root, options))
    }
}

impl<H: HistorySource, F: FileReader> Collector<H, F> {
    pub fn new(history: H, files: F, root: impl Into<PathBuf>, options: CollectOptions) -> Self {
        Self {
            history,
            files,
            root: root.into(),
            options,
        }
    }

    /// Work tree root the collector reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &CollectOptions {
        &self.options
    }

    /// Run every section in order.
    pub fn run(&self, observer: &mut dyn ProgressObserver) -> AggregateReport {
        let sources = Sources::new(&self.history, &self.files, &self.root, &self.options);
        let s = &sources;
        let mut report = AggregateReport::default();

        debug!(root = %self.root.display(), "collecting repository insights");
        for section in Section::ALL {
            match section {
                Section::Overview => {
                    report.overview = step(section, observer, || overview::collect(s))
                }
                Section::CommitsByMonth => {
                    report.commits_by_month =
                        step(section, observer, || activity::collect_by_month(s))
                }
                Section::CommitsByWeek => {
                    report.commits_by_week =
                        step(section, observer, || activity::collect_by_week(s))
                }
                Section::CommitsByDayOfWeek => {
                    report.commits_by_day_of_week =
                        step(section, observer, || activity::collect_by_day_of_week(s))
                }
                Section::CommitsByHour => {
                    report.commits_by_hour =
                        step(section, observer, || activity::collect_by_hour(s))
                }
                Section::Contributors => {
                    report.contributors = step(section, observer, || contributors::collect(s))
                }
                Section::FileTypes => {
                    report.file_types = step(section, observer, || files::collect_file_types(s))
                }
                Section::DirectoryBreakdown => {
                    report.directory_breakdown =
                        step(section, observer, || files::collect_directories(s))
                }
                Section::LargestFiles => {
                    report.largest_files = step(section, observer, || files::collect_largest(s))
                }
                Section::HottestFiles => {
                    report.hottest_files = step(section, observer, || files::collect_hottest(s))
                }
                Section::ChurnByMonth => {
                    report.churn_by_month = step(section, observer, || churn::collect_churn(s))
                }
                Section::CommitMessagePatterns => {
                    report.commit_message_patterns =
                        step(section, observer, || messages::collect(s))
                }
                Section::Streaks => report.streaks = step(section, observer, || streaks::collect(s)),
                Section::AiContributions => {
                    report.ai_contributions = step(section, observer, || attribution::collect(s))
                }
                Section::Milestones => {
                    report.milestones = step(section, observer, || milestones::collect(s))
                }
                Section::CodeGrowth => {
                    report.code_growth = step(section, observer, || churn::collect_growth(s))
                }
                Section::WorkPatterns => {
                    report.work_patterns = step(section, observer, || patterns::collect(s))
                }
                Section::TestInfo => {
                    report.test_info = step(section, observer, || testinfo::collect(s))
                }
                Section::Dependencies => {
                    report.dependencies = step(section, observer, || manifest::collect(s))
                }
                Section::FunFacts => {
                    let overview = report.overview.as_ref();
                    report.fun_facts =
                        step(section, observer, || Ok(fun_facts::collect(overview)))
                }
            }
        }

        let missing = report.missing_sections();
        if !missing.is_empty() {
            debug!("{} of {} sections missing", missing.len(), Section::ALL.len());
        }
        report
    }
}

/// Run one section, reporting progress and swallowing its failure.
fn step<T>(
    section: Section,
    observer: &mut dyn ProgressObserver,
    collect: impl FnOnce() -> Result<T>,
) -> Option<T> {
    observer.on_progress(section, &ProgressStatus::Start);
    debug!(section = section.name(), "collecting section");

    match collect() {
        Ok(value) => {
            observer.on_progress(section, &ProgressStatus::Done);
            Some(value)
        }
        Err(e) => {
            warn!(section = section.name(), "section failed: {}", e);
            observer.on_progress(section, &ProgressStatus::Error(e.to_string()));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixture::{FixtureHistory, FixtureReader};

    fn sample_history() -> FixtureHistory {
        FixtureHistory::new()
            .with("log --reverse --format=%ad --date=short", "2024-01-01\n2024-01-02\n2024-01-04")
            .with("log -1 --format=%ad --date=short", "2024-01-04")
            .with("rev-list --count HEAD", "3")
            .with("branch -a", "* main")
            .with("tag", "")
            .with("ls-files", "src/lib.rs\nREADME.md")
            .with(
                "log --format=%ad --date=format:%Y-%m-%d",
                "2024-01-04\n2024-01-02\n2024-01-01",
            )
            .with(
                "log --format=%s",
                "Fix login bug\nAdd search feature\nMerge pull request #4",
            )
    }

    fn sample_files() -> FixtureReader {
        FixtureReader::new().with("src/lib.rs", "pub fn a() {}\n")
    }

    fn run_collecting_events(
        collector: &Collector<FixtureHistory, FixtureReader>,
    ) -> (AggregateReport, Vec<(Section, ProgressStatus)>) {
        let mut events = Vec::new();
        let report = collector.run(&mut |section: Section, status: &ProgressStatus| {
            events.push((section, status.clone()))
        });
        (report, events)
    }

    #[test]
    fn test_failures_are_isolated() {
        let collector = Collector::new(
            sample_history(),
            sample_files(),
            "/work/demo",
            CollectOptions::new(),
        );

        let report = collector.run(&mut NoopObserver);

        let overview = report.overview.as_ref().unwrap();
        assert_eq!(overview.project_name, "demo");
        assert_eq!(overview.total_commits, 3);
        assert_eq!(report.streaks.as_ref().unwrap().longest_streak.days, 2);
        assert_eq!(report.commit_message_patterns.as_ref().unwrap().len(), 3);
        assert_eq!(report.file_types.as_ref().unwrap().len(), 2);
        // no fixtures for these queries
        assert!(report.commits_by_month.is_none());
        assert!(report.contributors.is_none());
        assert!(report.ai_contributions.is_none());
        // no manifest means empty dependencies, not a failure
        assert_eq!(report.dependencies, Some(DependencySummary::default()));
        assert!(report.fun_facts.is_some());
    }

    #[test]
    fn test_observer_sees_every_section_in_order() {
        let collector = Collector::new(
            sample_history(),
            sample_files(),
            "/work/demo",
            CollectOptions::new(),
        );

        let (_, events) = run_collecting_events(&collector);

        assert_eq!(events.len(), Section::ALL.len() * 2);
        for (pair, section) in events.chunks(2).zip(Section::ALL) {
            assert_eq!(pair[0], (section, ProgressStatus::Start));
            assert_eq!(pair[1].0, section);
            assert_ne!(pair[1].1, ProgressStatus::Start);
        }
        assert_eq!(events.last().unwrap(), &(Section::FunFacts, ProgressStatus::Done));
    }

    #[test]
    fn test_failed_section_reports_error() {
        let history = sample_history().failing("log --format=%s", "fatal: bad revision");
        let collector = Collector::new(history, sample_files(), "/work/demo", CollectOptions::new());

        let (report, events) = run_collecting_events(&collector);

        assert!(report.commit_message_patterns.is_none());
        let statuses: Vec<&ProgressStatus> = events
            .iter()
            .filter(|(s, _)| *s == Section::CommitMessagePatterns)
            .map(|(_, status)| status)
            .collect();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0], &ProgressStatus::Start);
        assert!(
            matches!(statuses[1], ProgressStatus::Error(m) if m.contains("fatal: bad revision"))
        );
        // later sections still ran
        assert!(report.streaks.is_some());
    }

    #[test]
    fn test_fun_facts_follow_overview() {
        let history = FixtureHistory::new().failing("log --reverse --format=%ad --date=short", "boom");
        let collector = Collector::new(history, FixtureReader::new(), "/work/x", CollectOptions::new());

        let report = collector.run(&mut NoopObserver);

        assert!(report.overview.is_none());
        assert_eq!(report.fun_facts, Some(FunFacts::default()));
        assert_eq!(Section::FunFacts.depends_on(), Some(Section::Overview));
        let position = |s: Section| Section::ALL.iter().position(|x| *x == s).unwrap();
        assert!(position(Section::Overview) < position(Section::FunFacts));
    }

    #[test]
    fn test_missing_sections_are_not_serialized() {
        let collector = Collector::new(
            sample_history(),
            sample_files(),
            "/work/demo",
            CollectOptions::new(),
        );

        let report = collector.run(&mut NoopObserver);
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("overview").is_some());
        assert!(json.get("funFacts").is_some());
        assert!(json.get("commitsByMonth").is_none());
        assert!(json.get("aiContributions").is_none());
        assert!(report.missing_sections().contains(&Section::Contributors));
    }

    #[test]
    fn test_section_names_match_report_keys() {
        let report = AggregateReport {
            overview: Some(OverviewSummary::default()),
            commits_by_month: Some(vec![]),
            commits_by_week: Some(vec![]),
            commits_by_day_of_week: Some(vec![]),
            commits_by_hour: Some(vec![]),
            contributors: Some(vec![]),
            file_types: Some(vec![]),
            directory_breakdown: Some(vec![]),
            largest_files: Some(vec![]),
            hottest_files: Some(vec![]),
            churn_by_month: Some(vec![]),
            commit_message_patterns: Some(vec![]),
            streaks: Some(StreakSummary::default()),
            ai_contributions: Some(AttributionSummary::default()),
            milestones: Some(vec![]),
            code_growth: Some(vec![]),
            work_patterns: Some(WorkPatterns::default()),
            test_info: Some(TestInventory::default()),
            dependencies: Some(DependencySummary::default()),
            fun_facts: Some(FunFacts::default()),
        };
        let json = serde_json::to_value(&report).unwrap();

        for section in Section::ALL {
            assert!(json.get(section.name()).is_some(), "missing {}", section);
            assert!(report.has(section));
        }
        assert!(report.missing_sections().is_empty());
    }
}
