use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

use crate::models::{
    CohortFilter, CohortSummary, CohortView, EmploymentBreakdown, EmploymentStatus,
    ProgressBucket, RoiSnapshot, Student, Track, TrackCompletion,
};

/// A seeking student below this progress is flagged at-risk.
pub const AT_RISK_PROGRESS_FLOOR: u32 = 30;

/// Stagnation: the two most recent history points sit more than this
/// many days apart with a progress delta under [`STAGNATION_MAX_DELTA`].
pub const STAGNATION_GAP_DAYS: i64 = 10;
pub const STAGNATION_MAX_DELTA: i64 = 2;

/// Demo salary model behind the ROI snapshot: sector baseline starting
/// salary, assumed uplift per employed graduate, and the annual
/// Professional plan investment. Presentation heuristics only.
pub const SALARY_BASE: i64 = 32_000;
pub const SALARY_UPLIFT: i64 = 6_000;
pub const ROI_INVESTMENT: i64 = 5_000;

/// Sector employment benchmark the dashboard compares against by default.
pub const DEFAULT_BENCHMARK: i32 = 78;

/// Order-preserving filter; the source list is never mutated.
pub fn filter_students(students: &[Student], filter: CohortFilter) -> Vec<Student> {
    students
        .iter()
        .filter(|s| filter.track.map_or(true, |track| s.roadmap == track))
        .filter(|s| {
            filter
                .graduation_year
                .map_or(true, |year| s.graduation_year == year)
        })
        .cloned()
        .collect()
}

fn rounded_mean(values: impl Iterator<Item = u32>) -> u32 {
    let (sum, count) = values.fold((0u64, 0u64), |(sum, count), v| (sum + u64::from(v), count + 1));
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u32
}

pub fn employment_breakdown(students: &[Student]) -> EmploymentBreakdown {
    let mut breakdown = EmploymentBreakdown::default();
    for student in students {
        match student.employment_status {
            EmploymentStatus::Employed => breakdown.employed += 1,
            EmploymentStatus::Seeking => breakdown.seeking += 1,
            EmploymentStatus::FurtherStudy => breakdown.further_study += 1,
        }
    }
    breakdown
}

/// Mean progress per track present in the cohort, with its complement
/// to 100. Rows come out in `Track::ALL` order.
pub fn completion_by_track(students: &[Student]) -> Vec<TrackCompletion> {
    Track::ALL
        .iter()
        .filter_map(|&track| {
            let members: Vec<u32> = students
                .iter()
                .filter(|s| s.roadmap == track)
                .map(|s| s.progress)
                .collect();
            if members.is_empty() {
                return None;
            }
            let completed = rounded_mean(members.into_iter()).min(100);
            Some(TrackCompletion {
                track,
                label: track.title(),
                completed,
                remaining: 100 - completed,
            })
        })
        .collect()
}

/// Union of every progress-history point across the cohort, bucketed by
/// UTC calendar day and averaged. Ascending by date.
pub fn progress_time_series(students: &[Student]) -> Vec<ProgressBucket> {
    let mut buckets: BTreeMap<NaiveDate, Vec<u32>> = BTreeMap::new();
    for student in students {
        for point in &student.progress_history {
            buckets
                .entry(point.date.date_naive())
                .or_default()
                .push(point.progress);
        }
    }
    buckets
        .into_iter()
        .map(|(date, values)| ProgressBucket {
            date,
            avg_progress: rounded_mean(values.into_iter()),
        })
        .collect()
}

pub fn at_risk(students: &[Student]) -> Vec<Student> {
    students
        .iter()
        .filter(|s| {
            s.employment_status == EmploymentStatus::Seeking && s.progress < AT_RISK_PROGRESS_FLOOR
        })
        .cloned()
        .collect()
}

fn is_stagnating(student: &Student) -> bool {
    let history = &student.progress_history;
    let [.., prev, last] = history.as_slice() else {
        return false;
    };
    // Tolerates non-monotonic history: a negative delta still counts
    // as "under the threshold".
    let delta = i64::from(last.progress) - i64::from(prev.progress);
    last.date - prev.date > Duration::days(STAGNATION_GAP_DAYS) && delta < STAGNATION_MAX_DELTA
}

pub fn stagnating(students: &[Student]) -> Vec<Student> {
    students.iter().filter(|s| is_stagnating(s)).cloned().collect()
}

pub fn summarize(students: &[Student], benchmark: i32) -> CohortSummary {
    let total = students.len();
    let employed = students
        .iter()
        .filter(|s| s.employment_status == EmploymentStatus::Employed)
        .count();
    let employment_rate = if total == 0 {
        0
    } else {
        ((employed as f64 / total as f64) * 100.0).round() as i32
    };

    let annual_benefit = employed as i64 * SALARY_UPLIFT;
    let multiple = if ROI_INVESTMENT == 0 {
        0.0
    } else {
        annual_benefit as f64 / ROI_INVESTMENT as f64
    };

    CohortSummary {
        total,
        employed,
        employment_rate,
        rate_delta: employment_rate - benchmark,
        avg_progress: rounded_mean(students.iter().map(|s| s.progress)),
        roi: RoiSnapshot {
            annual_benefit,
            investment: ROI_INVESTMENT,
            multiple,
        },
        ranking_impact: (f64::from(employment_rate - benchmark) / 2.0).round().max(0.0) as i32,
    }
}

/// Derive the full dashboard view for one filter selection. Pure: the
/// same students, filter and benchmark always produce the same view.
pub fn aggregate(students: &[Student], filter: CohortFilter, benchmark: i32) -> CohortView {
    let filtered = filter_students(students, filter);
    CohortView {
        employment: employment_breakdown(&filtered),
        completion: completion_by_track(&filtered),
        time_series: progress_time_series(&filtered),
        at_risk: at_risk(&filtered),
        stagnating: stagnating(&filtered),
        summary: summarize(&filtered, benchmark),
        students: filtered,
    }
}
