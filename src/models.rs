use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The four career tracks the product exposes site-wide. The variant
/// order here is the canonical enumeration order: score accumulators
/// are laid out in it and leaderboard ties resolve to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum Track {
    Frontend,
    Backend,
    Devops,
    DataScience,
}

impl Track {
    pub const ALL: [Track; 4] = [
        Track::Frontend,
        Track::Backend,
        Track::Devops,
        Track::DataScience,
    ];

    pub fn index(self) -> usize {
        match self {
            Track::Frontend => 0,
            Track::Backend => 1,
            Track::Devops => 2,
            Track::DataScience => 3,
        }
    }

    /// Full label used on quiz results.
    pub fn label(self) -> &'static str {
        match self {
            Track::Frontend => "Frontend Developer",
            Track::Backend => "Backend Developer",
            Track::Devops => "DevOps Engineer",
            Track::DataScience => "Data Scientist",
        }
    }

    /// Short title used in dashboard tables.
    pub fn title(self) -> &'static str {
        match self {
            Track::Frontend => "Frontend",
            Track::Backend => "Backend",
            Track::Devops => "DevOps",
            Track::DataScience => "Data Science",
        }
    }
}

/// Per-question lean toward each track, total over the closed track
/// set: a track the question does not lean toward holds 0.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackWeights([f64; 4]);

impl TrackWeights {
    pub const NONE: TrackWeights = TrackWeights([0.0; 4]);

    pub const fn new(frontend: f64, backend: f64, devops: f64, datascience: f64) -> Self {
        TrackWeights([frontend, backend, devops, datascience])
    }

    pub fn get(&self, track: Track) -> f64 {
        self.0[track.index()]
    }
}

#[derive(Debug, Clone)]
pub struct QuestionOption {
    pub value: &'static str,
    pub label: &'static str,
    /// Explicit raw score for this option; when absent the option's
    /// position in the list is its raw score.
    pub weight: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Question {
    pub id: &'static str,
    pub title: &'static str,
    pub help: Option<&'static str>,
    pub track_weights: TrackWeights,
    pub options: Vec<QuestionOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackScore {
    pub track: Track,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestions {
    pub projects: Vec<&'static str>,
    pub checkpoints: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillsReport {
    pub leaderboard: Vec<TrackScore>,
    pub top_track: Track,
    pub strengths: Vec<&'static str>,
    pub suggestions: Suggestions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentStatus {
    Employed,
    Seeking,
    #[serde(rename = "Further Study")]
    FurtherStudy,
}

impl EmploymentStatus {
    pub fn label(self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "Employed",
            EmploymentStatus::Seeking => "Seeking",
            EmploymentStatus::FurtherStudy => "Further Study",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub date: DateTime<Utc>,
    pub progress: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub course: String,
    pub graduation_year: i32,
    pub roadmap: Track,
    /// Current roadmap completion, 0-100.
    pub progress: u32,
    /// Ascending by date. Upstream data keeps progress non-decreasing
    /// but the aggregator never relies on that.
    #[serde(default)]
    pub progress_history: Vec<ProgressPoint>,
    pub employment_status: EmploymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer: Option<String>,
    #[serde(default)]
    pub completed_skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CohortFilter {
    pub track: Option<Track>,
    pub graduation_year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmploymentBreakdown {
    pub employed: usize,
    pub seeking: usize,
    pub further_study: usize,
}

impl EmploymentBreakdown {
    pub fn rows(&self) -> [(EmploymentStatus, usize); 3] {
        [
            (EmploymentStatus::Employed, self.employed),
            (EmploymentStatus::Seeking, self.seeking),
            (EmploymentStatus::FurtherStudy, self.further_study),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackCompletion {
    pub track: Track,
    pub label: &'static str,
    pub completed: u32,
    pub remaining: u32,
}

/// One calendar-day bucket of the cohort progress line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressBucket {
    pub date: NaiveDate,
    pub avg_progress: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiSnapshot {
    pub annual_benefit: i64,
    pub investment: i64,
    pub multiple: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CohortSummary {
    pub total: usize,
    pub employed: usize,
    /// Whole percent in 0-100; 0 when the filtered cohort is empty.
    pub employment_rate: i32,
    /// Employment rate minus the sector benchmark; may be negative.
    pub rate_delta: i32,
    pub avg_progress: u32,
    pub roi: RoiSnapshot,
    pub ranking_impact: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortView {
    pub students: Vec<Student>,
    pub employment: EmploymentBreakdown,
    pub completion: Vec<TrackCompletion>,
    pub time_series: Vec<ProgressBucket>,
    pub at_risk: Vec<Student>,
    pub stagnating: Vec<Student>,
    pub summary: CohortSummary,
}
