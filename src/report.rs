use std::fmt::Write;

use crate::cohort::{SALARY_BASE, SALARY_UPLIFT, STAGNATION_GAP_DAYS, STAGNATION_MAX_DELTA};
use crate::models::{CohortFilter, CohortView};

fn thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        format!("-{out}")
    } else {
        out
    }
}

fn scope_label(filter: CohortFilter) -> String {
    let track = filter
        .track
        .map(|t| t.title().to_string())
        .unwrap_or_else(|| "all tracks".to_string());
    let year = filter
        .graduation_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "all years".to_string());
    format!("{track}, {year}")
}

pub fn build_report(view: &CohortView, filter: CohortFilter, benchmark: i32) -> String {
    let mut output = String::new();
    let summary = &view.summary;

    let _ = writeln!(output, "# CareerLaunch Cohort Report");
    let _ = writeln!(
        output,
        "Scope: {} ({} students, {}% sector benchmark)",
        scope_label(filter),
        summary.total,
        benchmark
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Key Metrics");
    let _ = writeln!(
        output,
        "- Employment rate (6-mo): {}% ({:+}% vs sector)",
        summary.employment_rate, summary.rate_delta
    );
    let _ = writeln!(output, "- Average progress: {}%", summary.avg_progress);
    let _ = writeln!(
        output,
        "- Ranking impact (est.): {:+}",
        summary.ranking_impact
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Employment Outcomes");
    if summary.total == 0 {
        let _ = writeln!(output, "No students match this scope.");
    } else {
        for (status, count) in view.employment.rows() {
            let _ = writeln!(output, "- {}: {}", status.label(), count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Completion by Career Path");
    if view.completion.is_empty() {
        let _ = writeln!(output, "No students match this scope.");
    } else {
        for row in &view.completion {
            let _ = writeln!(
                output,
                "- {}: {}% complete ({}% remaining)",
                row.label, row.completed, row.remaining
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Average Progress Over Time");
    if view.time_series.is_empty() {
        let _ = writeln!(output, "No progress history recorded for this scope.");
    } else {
        for bucket in &view.time_series {
            let _ = writeln!(output, "- {}: {}%", bucket.date, bucket.avg_progress);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Cohort Health");
    let _ = writeln!(
        output,
        "- At-risk (seeking, <30% progress): {}",
        view.at_risk.len()
    );
    for student in view.at_risk.iter().take(10) {
        let _ = writeln!(
            output,
            "  - {} ({}, {}% progress)",
            student.name,
            student.roadmap.title(),
            student.progress
        );
    }
    let _ = writeln!(
        output,
        "- Stagnating (>{STAGNATION_GAP_DAYS}d, <{STAGNATION_MAX_DELTA}% delta): {}",
        view.stagnating.len()
    );
    for student in view.stagnating.iter().take(10) {
        let _ = writeln!(
            output,
            "  - {} ({}, {}% progress)",
            student.name,
            student.roadmap.title(),
            student.progress
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## ROI Snapshot");
    let _ = writeln!(
        output,
        "- Annual salary uplift: £{} (£{} -> £{} per graduate)",
        thousands(summary.roi.annual_benefit),
        thousands(SALARY_BASE),
        thousands(SALARY_BASE + SALARY_UPLIFT)
    );
    let _ = writeln!(
        output,
        "- Annual investment: £{}",
        thousands(summary.roi.investment)
    );
    let _ = writeln!(output, "- ROI multiple: {:.1}x", summary.roi.multiple);

    output
}
