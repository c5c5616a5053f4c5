use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::models::{EmploymentStatus, ProgressPoint, Student, Track};
use crate::quiz::AnswerMap;

pub const DEMO_COHORT_SIZE: usize = 100;

/// Linear congruential generator with the demo dataset's fixed seed,
/// so the generated cohort is identical between runs.
struct DemoRng(u32);

impl DemoRng {
    fn new() -> Self {
        DemoRng(42)
    }

    fn next(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        f64::from(self.0) / 4_294_967_296.0
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next() * items.len() as f64) as usize]
    }
}

fn history(now: DateTime<Utc>, points: &[(i64, u32)]) -> Vec<ProgressPoint> {
    points
        .iter()
        .map(|&(days_ago, progress)| ProgressPoint {
            date: now - Duration::days(days_ago),
            progress,
        })
        .collect()
}

/// The four hand-written students the demo cohort always starts with.
fn seed_students(now: DateTime<Utc>) -> Vec<Student> {
    vec![
        Student {
            id: "s1".to_string(),
            name: "Alice Johnson".to_string(),
            course: "BSc Computer Science".to_string(),
            graduation_year: 2024,
            roadmap: Track::Frontend,
            progress: 82,
            progress_history: history(now, &[(28, 10), (21, 35), (14, 60), (7, 74), (1, 82)]),
            employment_status: EmploymentStatus::Employed,
            employer: Some("ACME Web".to_string()),
            completed_skills: [
                "html-semantics",
                "css-layouts",
                "responsive",
                "tailwind",
                "js-es6",
                "ts-basics",
                "react-core",
                "next-routing",
                "forms",
                "a11y",
                "testing",
                "perf",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        },
        Student {
            id: "s2".to_string(),
            name: "Brian Lee".to_string(),
            course: "MSc Data Science".to_string(),
            graduation_year: 2023,
            roadmap: Track::DataScience,
            progress: 20,
            progress_history: history(now, &[(28, 5), (20, 22), (12, 45), (5, 58), (1, 64)]),
            employment_status: EmploymentStatus::Seeking,
            employer: None,
            completed_skills: [
                "py-core",
                "viz",
                "stats",
                "ml-basics",
                "sklearn",
                "validation",
                "sql",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        },
        Student {
            id: "s3".to_string(),
            name: "Chloe Patel".to_string(),
            course: "BEng Software Engineering".to_string(),
            graduation_year: 2024,
            roadmap: Track::Backend,
            progress: 48,
            progress_history: history(now, &[(30, 0), (18, 18), (9, 34), (2, 48)]),
            employment_status: EmploymentStatus::FurtherStudy,
            employer: None,
            completed_skills: ["http-rest", "api-design", "node-express", "sql", "db-design"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
        Student {
            id: "s4".to_string(),
            name: "Daniel Green".to_string(),
            course: "BSc Computer Science".to_string(),
            graduation_year: 2025,
            roadmap: Track::Devops,
            progress: 26,
            progress_history: history(now, &[(25, 0), (14, 8), (6, 18), (1, 26)]),
            employment_status: EmploymentStatus::Seeking,
            employer: None,
            completed_skills: ["linux", "gitflow", "docker"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
    ]
}

fn generated_history(rng: &mut DemoRng, now: DateTime<Utc>, weeks: u32) -> Vec<ProgressPoint> {
    // Start near 0-15, then climb monotonically week over week.
    let mut progress = (rng.next() * 15.0) as u32;
    let mut points = Vec::with_capacity(weeks as usize);
    for week in (1..=weeks).rev() {
        progress = (progress + 10 + (rng.next() * 18.0) as u32).min(100);
        points.push(ProgressPoint {
            date: now - Duration::days(i64::from(week) * 7),
            progress,
        });
    }
    points
}

/// Deterministic demo cohort: the four seed students expanded to
/// [`DEMO_COHORT_SIZE`] with generated records.
pub fn demo_students_at(now: DateTime<Utc>) -> Vec<Student> {
    let first_names = [
        "Ella", "Frank", "Grace", "Hassan", "Ivy", "Jamal", "Keira", "Liam", "Maya", "Noah",
        "Omar", "Priya", "Quinn", "Rosa", "Sam", "Tariq", "Uma", "Victor", "Wen", "Yara", "Zane",
    ];
    let last_names = [
        "Smith", "Brown", "Wilson", "Ahmed", "Garcia", "Martin", "Taylor", "Khan", "Walker",
        "Nguyen", "Clark", "Hughes",
    ];
    let courses = [
        "BSc Computer Science",
        "MSc Data Science",
        "BEng Software Engineering",
        "BSc Artificial Intelligence",
        "MSc Cybersecurity",
    ];
    let roadmaps = [
        Track::Frontend,
        Track::Backend,
        Track::DataScience,
        Track::Devops,
    ];
    let employers = [
        "ACME Web",
        "DataNest",
        "ByteForge",
        "Skyview Labs",
        "NovaWorks",
        "CloudGrid",
        "DeepStream",
    ];
    let statuses = [
        EmploymentStatus::Employed,
        EmploymentStatus::Seeking,
        EmploymentStatus::FurtherStudy,
    ];

    let mut students = seed_students(now);
    let mut rng = DemoRng::new();
    let start_index = students.len() + 1;
    let need = DEMO_COHORT_SIZE.saturating_sub(students.len());

    for i in 0..need {
        let first = rng.pick(&first_names);
        let last = rng.pick(&last_names);
        let roadmap = *rng.pick(&roadmaps);
        let course = rng.pick(&courses);
        let graduation_year = 2023 + (rng.next() * 4.0) as i32;
        let progress_history = generated_history(&mut rng, now, 5);
        let progress = progress_history.last().map(|p| p.progress).unwrap_or(0);
        let employment_status = *rng.pick(&statuses);
        let employer = if employment_status == EmploymentStatus::Employed {
            Some(rng.pick(&employers).to_string())
        } else {
            None
        };
        students.push(Student {
            id: format!("s{}", start_index + i),
            name: format!("{first} {last}"),
            course: course.to_string(),
            graduation_year,
            roadmap,
            progress,
            progress_history,
            employment_status,
            employer,
            completed_skills: Vec::new(),
        });
    }

    students
}

pub fn demo_students() -> Vec<Student> {
    demo_students_at(Utc::now())
}

/// Read the student data file, falling back to the built-in demo
/// cohort when no file exists. A present but malformed file is an
/// error, not a silent fallback.
pub fn load_students(path: &Path) -> anyhow::Result<Vec<Student>> {
    if !path.exists() {
        debug!(path = %path.display(), "no data file, using built-in demo cohort");
        return Ok(demo_students());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("malformed student data in {}", path.display()))
}

pub fn save_students(path: &Path, students: &[Student]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(students)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), count = students.len(), "student data written");
    Ok(())
}

/// Answer map for the skills check: question-id -> option index.
pub fn load_answers(path: &Path) -> anyhow::Result<AnswerMap> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("malformed answer map in {}", path.display()))
}

#[derive(serde::Deserialize)]
struct CsvRow {
    name: String,
    course: String,
    graduation_year: i32,
    roadmap: Track,
    progress: u32,
    employment_status: EmploymentStatus,
    employer: Option<String>,
}

/// Import student rows, upserting by name. Existing students keep
/// their id, progress history and completed skills; new students start
/// with empty histories. Returns the number of rows applied.
pub fn import_csv(csv_path: &Path, students: &mut Vec<Student>) -> anyhow::Result<usize> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut applied = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result.with_context(|| format!("bad row in {}", csv_path.display()))?;
        match students.iter_mut().find(|s| s.name == row.name) {
            Some(existing) => {
                existing.course = row.course;
                existing.graduation_year = row.graduation_year;
                existing.roadmap = row.roadmap;
                existing.progress = row.progress;
                existing.employment_status = row.employment_status;
                existing.employer = row.employer;
            }
            None => students.push(Student {
                id: format!("import-{}", Uuid::new_v4()),
                name: row.name,
                course: row.course,
                graduation_year: row.graduation_year,
                roadmap: row.roadmap,
                progress: row.progress,
                progress_history: Vec::new(),
                employment_status: row.employment_status,
                employer: row.employer,
                completed_skills: Vec::new(),
            }),
        }
        applied += 1;
    }

    Ok(applied)
}
