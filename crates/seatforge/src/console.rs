//! Colorful console output for solver events.
//!
//! Provides a `tracing` layer that formats engine events with colors.
//! Initialized on the first solve when the `console` feature is enabled.

use std::io::{self, Write};
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output.
///
/// Safe to call multiple times; only the first call has effect. Respects
/// `RUST_LOG` and defaults to INFO. Does nothing if another global
/// subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SeatingConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats seating engine events with colors.
pub struct SeatingConsoleLayer;

impl<S: Subscriber> Layer<S> for SeatingConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("seatforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    phase_index: Option<u64>,
    duration_ms: Option<u64>,
    steps: Option<u64>,
    student_count: Option<u64>,
    desk_count: Option<u64>,
    seat_count: Option<u64>,
    students: Option<u64>,
    violations: Option<u64>,
    pair_score_sum: Option<f64>,
    soft_penalty: Option<f64>,
    partial: Option<bool>,
    score: Option<String>,
    violation: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "phase" => self.phase = Some(s),
            "score" => self.score = Some(s),
            "violation" => self.violation = Some(s),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "phase" => self.phase = Some(value.to_string()),
            "score" => self.score = Some(value.to_string()),
            "violation" => self.violation = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "phase_index" => self.phase_index = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "steps" => self.steps = Some(value),
            "student_count" => self.student_count = Some(value),
            "desk_count" => self.desk_count = Some(value),
            "seat_count" => self.seat_count = Some(value),
            "students" => self.students = Some(value),
            "violations" => self.violations = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "pair_score_sum" => self.pair_score_sum = Some(value),
            "soft_penalty" => self.soft_penalty = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "partial" {
            self.partial = Some(value);
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "solve_end" => format_solve_end(v),
        "pairing_degraded" => format_warning(
            "[Pairing]",
            &format!(
                "no legal pair among {} students",
                v.students.unwrap_or(0)
            ),
        ),
        "cancelled" => format_warning(
            &format!("[{}]", v.phase.as_deref().unwrap_or("Solver")),
            "cancelled, keeping the best complete seating",
        ),
        "violation" => format_warning("[Solver]", v.violation.as_deref().unwrap_or("violation")),
        _ => String::new(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} student count ({}), desk count ({}), seat count ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        v.student_count.unwrap_or(0).bright_yellow(),
        v.desk_count.unwrap_or(0).bright_yellow(),
        v.seat_count.unwrap_or(0).bright_yellow(),
    )
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    format!(
        "{} {} {} {} phase ({}) started",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", phase).bright_cyan(),
        phase.white().bold(),
        v.phase_index.unwrap_or(0).yellow()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    format!(
        "{} {} {} {} phase ({}) ended: time spent ({}), score ({}), step total ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", phase).bright_cyan(),
        phase.white().bold(),
        v.phase_index.unwrap_or(0).yellow(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_score(v.score.as_deref().unwrap_or("N/A")),
        v.steps.unwrap_or(0).white()
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");
    let violations = v.violations.unwrap_or(0);
    let partial = v.partial.unwrap_or(false);

    let mut output = format!(
        "{} {} {} Solving ended: score ({}), pair score ({:.1}), zone penalty ({:.1})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        format_score(score),
        v.pair_score_sum.unwrap_or(0.0),
        v.soft_penalty.unwrap_or(0.0),
    );

    let status = match (violations, partial) {
        (0, false) => "FEASIBLE SEATING FOUND".bright_green().bold().to_string(),
        (0, true) => "PARTIAL (cancelled)".yellow().bold().to_string(),
        (n, _) => format!("INFEASIBLE ({} violations)", n)
            .bright_red()
            .bold()
            .to_string(),
    };
    output.push_str("\n    ");
    output.push_str(&status);
    output
}

fn format_warning(tag: &str, text: &str) -> String {
    format!(
        "{} {} {} {}",
        timestamp().bright_black(),
        "WARN".yellow(),
        tag.bright_cyan(),
        text
    )
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| format!("{:5}.{:03}", d.as_secs() % 100_000, d.subsec_millis()))
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

/// Colors a `"<hard>hard/<soft>soft"` score: red hard part when negative.
pub fn format_score(score: &str) -> String {
    let Some((hard, soft)) = score.split_once('/') else {
        return score.white().to_string();
    };
    let hard = hard.trim_end_matches("hard");
    let soft = soft.trim_end_matches("soft");
    let hard_num: i64 = hard.parse().unwrap_or(0);

    let hard_str = if hard_num < 0 {
        format!("{}hard", hard).bright_red().to_string()
    } else {
        format!("{}hard", hard).bright_green().to_string()
    };
    format!("{}/{}", hard_str, format!("{}soft", soft).white())
}
