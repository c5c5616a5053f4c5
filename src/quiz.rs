use std::collections::HashMap;

use crate::models::{
    Question, QuestionOption, SkillsReport, Suggestions, Track, TrackScore, TrackWeights,
};

/// question-id -> selected option index. Partial maps are fine;
/// unanswered questions contribute nothing.
pub type AnswerMap = HashMap<String, usize>;

/// Flat bonus added to the track a respondent declares interest in.
/// Calibration value from the shipped scoring curve; do not re-derive.
pub const INTEREST_BONUS: f64 = 0.6;

/// Final scores are divided by `question_count * NORMALISATION_FACTOR`
/// and clamped to 1.0. Calibration value from the shipped scoring
/// curve; do not re-derive.
pub const NORMALISATION_FACTOR: f64 = 0.35;

const INTEREST_QUESTION_ID: &str = "systems_interest";

/// Route-intent lookup for the single-choice interest question. The
/// "mix / still exploring" option maps to no track and earns no bonus.
fn interest_track(value: &str) -> Option<Track> {
    match value {
        "fe" => Some(Track::Frontend),
        "be" => Some(Track::Backend),
        "do" => Some(Track::Devops),
        "ds" => Some(Track::DataScience),
        _ => None,
    }
}

fn likert5() -> Vec<QuestionOption> {
    let labels = [
        "Not at all",
        "A little",
        "Somewhat",
        "Comfortable",
        "Very confident",
    ];
    let values = ["0", "1", "2", "3", "4"];
    labels
        .into_iter()
        .zip(values)
        .map(|(label, value)| QuestionOption {
            value,
            label,
            weight: None,
        })
        .collect()
}

/// The fixed ten-question bank behind the five-minute skills check.
pub fn question_bank() -> Vec<Question> {
    vec![
        Question {
            id: "html_css_ui",
            title: "How comfortable are you building responsive UIs with HTML/CSS?",
            help: Some("Layouts, components, accessibility basics"),
            track_weights: TrackWeights::new(1.0, 0.0, 0.0, 0.0),
            options: likert5(),
        },
        Question {
            id: "js_ts",
            title: "Your JavaScript/TypeScript comfort level",
            help: None,
            track_weights: TrackWeights::new(1.0, 0.5, 0.0, 0.0),
            options: likert5(),
        },
        Question {
            id: "react_state",
            title: "State management and React component patterns",
            help: None,
            track_weights: TrackWeights::new(1.0, 0.0, 0.0, 0.0),
            options: likert5(),
        },
        Question {
            id: "api_design",
            title: "Designing and implementing REST/GraphQL APIs",
            help: None,
            track_weights: TrackWeights::new(0.0, 1.0, 0.0, 0.0),
            options: likert5(),
        },
        Question {
            id: "db_models",
            title: "Working with databases (SQL/NoSQL) and schema design",
            help: None,
            track_weights: TrackWeights::new(0.0, 1.0, 0.0, 0.4),
            options: likert5(),
        },
        Question {
            id: "linux_cloud",
            title: "Linux basics and cloud deployment comfort",
            help: None,
            track_weights: TrackWeights::new(0.0, 0.4, 1.0, 0.0),
            options: likert5(),
        },
        Question {
            id: "containers",
            title: "Using Docker/containers and CI/CD pipelines",
            help: None,
            track_weights: TrackWeights::new(0.0, 0.5, 1.0, 0.0),
            options: likert5(),
        },
        Question {
            id: "python_ml",
            title: "Python for data analysis/ML (pandas, NumPy, scikit-learn)",
            help: None,
            track_weights: TrackWeights::new(0.0, 0.0, 0.0, 1.0),
            options: likert5(),
        },
        Question {
            id: "stats_ml",
            title: "Stats/ML intuition (evaluation, overfitting, baselines)",
            help: None,
            track_weights: TrackWeights::new(0.0, 0.0, 0.0, 1.0),
            options: likert5(),
        },
        Question {
            id: INTEREST_QUESTION_ID,
            title: "Which sounds most exciting right now?",
            help: Some("Pick how much each statement resonates"),
            track_weights: TrackWeights::NONE,
            options: vec![
                QuestionOption {
                    value: "fe",
                    label: "Crafting delightful UIs & interactions",
                    weight: Some(4),
                },
                QuestionOption {
                    value: "be",
                    label: "Designing robust APIs & data models",
                    weight: Some(4),
                },
                QuestionOption {
                    value: "do",
                    label: "Automating infra & deployments",
                    weight: Some(4),
                },
                QuestionOption {
                    value: "ds",
                    label: "Finding insights & predicting outcomes",
                    weight: Some(4),
                },
                QuestionOption {
                    value: "mix",
                    label: "A mix / still exploring",
                    weight: Some(2),
                },
            ],
        },
    ]
}

fn raw_score(option: &QuestionOption, index: usize) -> f64 {
    option.weight.map(f64::from).unwrap_or(index as f64)
}

fn max_for_question(question: &Question) -> f64 {
    question
        .options
        .iter()
        .enumerate()
        .map(|(i, o)| raw_score(o, i))
        .fold(0.0, f64::max)
}

/// Score an answer map against the question bank.
///
/// Each answered question contributes `(raw / max_for_question) *
/// track_weight` to every track it leans toward; the interest question
/// adds [`INTEREST_BONUS`] to the declared track. Totals are divided by
/// `question_count * NORMALISATION_FACTOR` and clamped to 1.0, so each
/// final score sits in [0, 1]. Unanswered questions and out-of-range
/// indices contribute nothing; this function cannot fail.
pub fn score(questions: &[Question], answers: &AnswerMap) -> SkillsReport {
    let mut totals = [0.0f64; 4];

    for question in questions {
        let selected = answers
            .get(question.id)
            .copied()
            .and_then(|i| question.options.get(i).map(|o| (i, o)));

        let Some((index, option)) = selected else {
            continue;
        };

        let raw = raw_score(option, index);
        let max = max_for_question(question);
        // A question whose options all score 0 cannot discriminate.
        if max > 0.0 {
            for track in Track::ALL {
                let weight = question.track_weights.get(track);
                if weight > 0.0 {
                    totals[track.index()] += raw / max * weight;
                }
            }
        }

        if question.id == INTEREST_QUESTION_ID {
            if let Some(track) = interest_track(option.value) {
                totals[track.index()] += INTEREST_BONUS;
            }
        }
    }

    let divisor = questions.len() as f64 * NORMALISATION_FACTOR;
    let mut leaderboard: Vec<TrackScore> = Track::ALL
        .iter()
        .map(|&track| TrackScore {
            track,
            score: if divisor > 0.0 {
                (totals[track.index()] / divisor).min(1.0)
            } else {
                0.0
            },
        })
        .collect();

    // Stable sort: exact ties keep the Track::ALL enumeration order.
    leaderboard.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let top_track = leaderboard[0].track;

    SkillsReport {
        leaderboard,
        top_track,
        strengths: strengths(top_track),
        suggestions: suggestions(top_track),
    }
}

pub fn strengths(track: Track) -> Vec<&'static str> {
    match track {
        Track::Frontend => vec![
            "Strong visual & interaction thinking",
            "Comfort with React state and components",
            "Attention to accessibility and UX polish",
        ],
        Track::Backend => vec![
            "System design and API thinking",
            "Data modeling instincts",
            "Reliability and test-first mindset",
        ],
        Track::Devops => vec![
            "Automation mindset & tooling curiosity",
            "Comfort with environments and deployments",
            "Observability and performance awareness",
        ],
        Track::DataScience => vec![
            "Analytical reasoning and statistics intuition",
            "Python data tooling comfort",
            "Outcome-driven experimentation",
        ],
    }
}

pub fn suggestions(track: Track) -> Suggestions {
    match track {
        Track::Frontend => Suggestions {
            projects: vec![
                "Build a responsive dashboard with auth & charts",
                "A11y-friendly component library (buttons, modals, toasts)",
                "Portfolio case study: performance budget & Lighthouse wins",
            ],
            checkpoints: vec![
                "Week 1: CSS layout drills (grid/flex) + semantic HTML",
                "Week 1: React state patterns (derived, lifted, context)",
                "Week 2: Router + protected routes + form validation",
                "Week 2: Write 8-10 component tests (RTL)",
            ],
        },
        Track::Backend => Suggestions {
            projects: vec![
                "RESTful To-Do API with JWT + Postgres",
                "File upload service with presigned URLs",
                "Rate-limited public API with OpenAPI docs",
            ],
            checkpoints: vec![
                "Week 1: ERD + migrations + seed data",
                "Week 1: AuthN/Z flows + refresh tokens",
                "Week 2: Unit + integration tests (coverage 80%+)",
                "Week 2: Observability (logs, metrics, tracing)",
            ],
        },
        Track::Devops => Suggestions {
            projects: vec![
                "Dockerise a full-stack app + multi-stage builds",
                "CI pipeline (lint, test, build, cache) on PRs",
                "IaC: provision a VM + reverse proxy + TLS",
            ],
            checkpoints: vec![
                "Week 1: Write a Dockerfile + docker-compose",
                "Week 1: GitHub Actions pipeline with caching",
                "Week 2: Terraform 101 + remote state",
                "Week 2: Nginx + certbot TLS + blue/green basics",
            ],
        },
        Track::DataScience => Suggestions {
            projects: vec![
                "EDA + baseline model (classification) with clear report",
                "Feature engineering notebook + cross-val",
                "Deploy a simple inference endpoint",
            ],
            checkpoints: vec![
                "Week 1: Clean, impute, encode; hold-out vs CV",
                "Week 1: Baselines + error analysis",
                "Week 2: Model comparison + calibration",
                "Week 2: Reproducible notebook + model card",
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, usize)]) -> AnswerMap {
        pairs
            .iter()
            .map(|&(id, index)| (id.to_string(), index))
            .collect()
    }

    #[test]
    fn per_question_contribution_is_normalised() {
        for question in question_bank() {
            let max = max_for_question(&question);
            assert!(max > 0.0, "question {} has no scoring range", question.id);
            for (index, option) in question.options.iter().enumerate() {
                let contribution = raw_score(option, index) / max;
                assert!(
                    (0.0..=1.0).contains(&contribution),
                    "question {} option {} contributes {}",
                    question.id,
                    index,
                    contribution
                );
            }
        }
    }

    #[test]
    fn zero_range_question_contributes_nothing() {
        let questions = vec![Question {
            id: "degenerate",
            title: "Single zero-weight option",
            help: None,
            track_weights: TrackWeights::new(1.0, 0.0, 0.0, 0.0),
            options: vec![QuestionOption {
                value: "0",
                label: "only",
                weight: Some(0),
            }],
        }];
        let report = score(&questions, &answers(&[("degenerate", 0)]));
        for row in &report.leaderboard {
            assert_eq!(row.score, 0.0);
        }
    }

    #[test]
    fn final_scores_stay_clamped() {
        let questions = question_bank();
        // Every question answered at its strongest option.
        let all_max: AnswerMap = questions
            .iter()
            .map(|q| (q.id.to_string(), q.options.len() - 1))
            .collect();
        let report = score(&questions, &all_max);
        for row in &report.leaderboard {
            assert!((0.0..=1.0).contains(&row.score), "score {}", row.score);
        }
    }

    #[test]
    fn empty_answers_keep_enumeration_order() {
        let report = score(&question_bank(), &AnswerMap::new());
        assert_eq!(report.leaderboard.len(), 4);
        for (row, track) in report.leaderboard.iter().zip(Track::ALL) {
            assert_eq!(row.track, track);
            assert_eq!(row.score, 0.0);
        }
        assert_eq!(report.top_track, Track::Frontend);
    }

    #[test]
    fn out_of_range_answer_counts_as_unanswered() {
        let questions = question_bank();
        let baseline = score(&questions, &AnswerMap::new());
        let report = score(&questions, &answers(&[("html_css_ui", 99)]));
        assert_eq!(report.leaderboard, baseline.leaderboard);
    }

    #[test]
    fn single_answer_weights_every_leaning_track() {
        let questions = question_bank();
        // js_ts leans frontend 1.0 and backend 0.5; index 2 of a
        // likert-5 scores 2/4.
        let report = score(&questions, &answers(&[("js_ts", 2)]));
        let divisor = questions.len() as f64 * NORMALISATION_FACTOR;
        let by_track = |track: Track| {
            report
                .leaderboard
                .iter()
                .find(|row| row.track == track)
                .map(|row| row.score)
                .unwrap()
        };
        assert!((by_track(Track::Frontend) - 0.5 / divisor).abs() < 1e-9);
        assert!((by_track(Track::Backend) - 0.25 / divisor).abs() < 1e-9);
        assert_eq!(by_track(Track::Devops), 0.0);
        assert_eq!(by_track(Track::DataScience), 0.0);
    }

    #[test]
    fn interest_answer_biases_declared_track() {
        let questions = question_bank();
        // Option index 2 of the interest question declares devops.
        let report = score(&questions, &answers(&[("systems_interest", 2)]));
        assert_eq!(report.top_track, Track::Devops);
        let divisor = questions.len() as f64 * NORMALISATION_FACTOR;
        let devops = report.leaderboard[0].score;
        assert!((devops - INTEREST_BONUS / divisor).abs() < 1e-9);
    }

    #[test]
    fn mixed_interest_earns_no_bonus() {
        let questions = question_bank();
        let report = score(&questions, &answers(&[("systems_interest", 4)]));
        for row in &report.leaderboard {
            assert_eq!(row.score, 0.0);
        }
    }

    #[test]
    fn leaderboard_is_sorted_descending() {
        let questions = question_bank();
        let mixed = answers(&[
            ("html_css_ui", 4),
            ("react_state", 3),
            ("api_design", 1),
            ("python_ml", 2),
        ]);
        let report = score(&questions, &mixed);
        for window in report.leaderboard.windows(2) {
            assert!(window[0].score >= window[1].score);
        }
        assert_eq!(report.top_track, Track::Frontend);
    }

    #[test]
    fn scoring_is_deterministic() {
        let questions = question_bank();
        let mixed = answers(&[
            ("js_ts", 3),
            ("containers", 4),
            ("stats_ml", 1),
            ("systems_interest", 0),
        ]);
        let first = score(&questions, &mixed);
        let second = score(&questions, &mixed);
        assert_eq!(first.leaderboard, second.leaderboard);
        assert_eq!(first.top_track, second.top_track);
    }

    #[test]
    fn recommendation_tables_cover_every_track() {
        for track in Track::ALL {
            assert_eq!(strengths(track).len(), 3);
            let suggested = suggestions(track);
            assert_eq!(suggested.projects.len(), 3);
            assert_eq!(suggested.checkpoints.len(), 4);
        }
    }
}
