//! Output formatting for the CLI.
//!
//! The renderers here are stateless: they turn domain values and screen
//! states into text and never touch the network.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::view::{DetailScreen, HistoryScreen, VerifyScreen, ViewState};
use chrono::{DateTime, Local, NaiveDateTime};
use colored::*;
use credify_domain::{confidence, Assessment, Claim, ConfidenceTier, Source, Verdict, VerificationResult};
use credify_sdk::HealthStatus;
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use tracing::warn;
use url::Url;

/// Bar width on a result card.
pub const CARD_BAR_WIDTH: usize = 20;

/// Bar width in the history list.
pub const LIST_BAR_WIDTH: usize = 10;

/// Characters of claim text shown in the history list.
pub const CLAIM_PREVIEW_CHARS: usize = 150;

const TIMESTAMP_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// Visual token for a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictStyle {
    /// Text shown on the badge
    pub label: &'static str,
    /// Leading glyph
    pub symbol: &'static str,
    /// Color name understood by [`Formatter`]
    pub color: &'static str,
}

/// Map a verdict to its badge. Unknown labels get the UNVERIFIED badge.
pub fn verdict_style(verdict: &Verdict) -> VerdictStyle {
    match verdict {
        Verdict::True => VerdictStyle {
            label: "TRUE",
            symbol: "✓",
            color: "green",
        },
        Verdict::False => VerdictStyle {
            label: "FALSE",
            symbol: "✗",
            color: "red",
        },
        Verdict::PartiallyTrue => VerdictStyle {
            label: "PARTIALLY TRUE",
            symbol: "⚠",
            color: "yellow",
        },
        Verdict::Unverified | Verdict::Other(_) => VerdictStyle {
            label: "UNVERIFIED",
            symbol: "?",
            color: "white",
        },
    }
}

/// Color for a confidence tier.
pub fn tier_color(tier: ConfidenceTier) -> &'static str {
    match tier {
        ConfidenceTier::High => "green",
        ConfidenceTier::Moderate => "yellow",
        ConfidenceTier::Low => "orange",
        ConfidenceTier::VeryLow => "red",
    }
}

/// Host part of a source URL; the raw URL when it does not parse.
pub fn hostname(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

/// Render an ISO-8601 timestamp for humans; unparseable values pass through.
///
/// Offset-carrying values are shown in local time, naive ones as written.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.format(TIMESTAMP_FORMAT).to_string();
        }
    }
    raw.to_string()
}

/// Cut `text` to `max_chars` characters, appending `...` when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Confidence as written by the service (`92`, `92.5`).
pub fn format_confidence(value: f64) -> String {
    format!("{}%", value)
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Whether progress messages should be shown.
    pub fn shows_progress(&self) -> bool {
        matches!(self.format, OutputFormat::Table)
    }

    /// Verdict badge, e.g. `✗ FALSE`.
    pub fn verdict_badge(&self, verdict: &Verdict) -> String {
        let style = verdict_style(verdict);
        self.colorize(&format!("{} {}", style.symbol, style.label), style.color)
    }

    /// Proportional confidence bar `width` cells wide, followed by the value.
    ///
    /// The label shows the raw value; only the fill is clamped.
    pub fn confidence_bar(&self, value: f64, width: usize) -> String {
        if !confidence::in_range(value) {
            warn!(confidence = value, "Confidence outside [0, 100]");
        }
        let filled = confidence::filled_cells(value, width);
        let color = tier_color(ConfidenceTier::of(value));
        format!(
            "[{}{}] {}",
            self.colorize(&"█".repeat(filled), color),
            "░".repeat(width - filled),
            format_confidence(value)
        )
    }

    /// Full result card for a verification result or a stored claim.
    ///
    /// `claim` overrides the text carried by the record itself.
    pub fn result_card(&self, item: &dyn Assessment, claim: Option<&str>, show_timestamp: bool) -> String {
        let mut lines = Vec::new();

        let mut header = self.verdict_badge(item.verdict());
        if show_timestamp {
            if let Some(created_at) = item.created_at() {
                header.push_str("    ");
                header.push_str(&self.colorize(&format_timestamp(created_at), "dimmed"));
            }
        }
        lines.push(header);

        if let Some(text) = claim.or(item.claim_text()).filter(|t| !t.trim().is_empty()) {
            lines.push(String::new());
            lines.push(self.heading("CLAIM ANALYZED"));
            lines.push(format!("  \"{}\"", text));
        }

        lines.push(String::new());
        lines.push(self.heading("CONFIDENCE"));
        lines.push(format!("  {}", self.confidence_bar(item.confidence(), CARD_BAR_WIDTH)));

        if let Some(explanation) = item.explanation().filter(|e| !e.trim().is_empty()) {
            lines.push(String::new());
            lines.push(self.heading("EXPLANATION"));
            lines.push(format!("  {}", explanation));
        }

        let sources = item.sources();
        if !sources.is_empty() {
            lines.push(String::new());
            lines.push(self.heading(&format!("SOURCES ({})", sources.len())));
            for (index, source) in sources.iter().enumerate() {
                lines.extend(self.source_lines(index + 1, source));
            }
        }

        lines.join("\n")
    }

    fn source_lines(&self, position: usize, source: &Source) -> Vec<String> {
        let mut lines = vec![format!("  {}. {}", position, source.title)];
        if !source.snippet.trim().is_empty() {
            lines.push(format!("     {}", source.snippet));
        }
        lines.push(format!(
            "     {} {}",
            self.colorize(&hostname(&source.url), "cyan"),
            self.colorize(&format!("<{}>", source.url), "dimmed")
        ));
        lines
    }

    /// History list as a table, or the empty state.
    pub fn history_list(&self, claims: &[Claim]) -> String {
        if claims.is_empty() {
            return [
                self.warning("No History Yet"),
                "  Start verifying claims to see your history here".to_string(),
                self.info("Verify your first claim: verify <claim>"),
            ]
            .join("\n");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Verdict", "Date", "Claim", "Confidence"]);

        for (index, claim) in claims.iter().enumerate() {
            let style = verdict_style(&claim.verdict);
            let date = claim.created_at.as_deref().map(format_timestamp).unwrap_or_default();
            let filled = confidence::filled_cells(claim.confidence, LIST_BAR_WIDTH);
            let bar = format!(
                "{}{} {}",
                "█".repeat(filled),
                "░".repeat(LIST_BAR_WIDTH - filled),
                format_confidence(claim.confidence)
            );
            builder.push_record([
                (index + 1).to_string(),
                format!("{} {}", style.symbol, style.label),
                date,
                format!("\"{}\"", truncate_text(&claim.claim, CLAIM_PREVIEW_CHARS)),
                bar,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Render the verification screen.
    pub fn render_verify(&self, screen: &VerifyScreen) -> Result<String> {
        let state = screen.state();
        match self.format {
            OutputFormat::Json => {
                let value = match state {
                    ViewState::Success(result) => result_json(result, screen.submitted_claim()),
                    other => state_json(other),
                };
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(match state {
                ViewState::Success(result) => verdict_style(&result.verdict).label.to_string(),
                ViewState::Failure(message) => message.clone(),
                _ => String::new(),
            }),
            OutputFormat::Table => Ok(match state {
                ViewState::Idle => self.info("Enter a claim to verify, e.g. verify The Earth is flat"),
                ViewState::Loading => {
                    self.info("Analyzing your claim... This may take a few moments")
                }
                ViewState::Success(result) => format!(
                    "{}\n\n{}",
                    self.heading("VERIFICATION RESULTS"),
                    self.result_card(result, screen.submitted_claim(), false)
                ),
                ViewState::Failure(message) => self.failure("Error Verifying Claim", message),
            }),
        }
    }

    /// Render the history list screen.
    pub fn render_history(&self, screen: &HistoryScreen) -> Result<String> {
        let state = screen.state();
        match self.format {
            OutputFormat::Json => {
                let value = match state {
                    ViewState::Success(claims) => Value::Array(claims.iter().map(claim_json).collect()),
                    other => state_json(other),
                };
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(match state {
                ViewState::Success(claims) => claims
                    .iter()
                    .filter_map(|c| c.id.clone())
                    .collect::<Vec<_>>()
                    .join("\n"),
                ViewState::Failure(message) => message.clone(),
                _ => String::new(),
            }),
            OutputFormat::Table => Ok(match state {
                ViewState::Idle => String::new(),
                ViewState::Loading => self.info("Loading verification history..."),
                ViewState::Success(claims) => format!(
                    "{}\n\n{}",
                    self.heading("VERIFICATION HISTORY"),
                    self.history_list(claims)
                ),
                ViewState::Failure(message) => self.failure("Error Loading History", message),
            }),
        }
    }

    /// Render the history detail screen.
    pub fn render_detail(&self, screen: &DetailScreen) -> Result<String> {
        let state = screen.state();
        match self.format {
            OutputFormat::Json => {
                let value = match state {
                    ViewState::Success(Some(claim)) => claim_json(claim),
                    ViewState::Success(None) => json!({ "error": "Claim not found", "id": screen.id() }),
                    other => state_json(other),
                };
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(match state {
                ViewState::Success(Some(claim)) => verdict_style(&claim.verdict).label.to_string(),
                ViewState::Success(None) => "Claim not found".to_string(),
                ViewState::Failure(message) => message.clone(),
                _ => String::new(),
            }),
            OutputFormat::Table => Ok(match state {
                ViewState::Idle => String::new(),
                ViewState::Loading => self.info("Loading claim details..."),
                ViewState::Success(Some(claim)) => format!(
                    "{}\n\n{}",
                    self.heading("CLAIM DETAILS"),
                    self.result_card(claim, None, true)
                ),
                ViewState::Success(None) => self.warning("Claim not found"),
                ViewState::Failure(message) => self.failure("Error Loading Details", message),
            }),
        }
    }

    /// Render a health probe answer.
    pub fn health(&self, base_url: &str, health: &HealthStatus) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(
                &json!({ "api_url": base_url, "status": health.status }),
            )?),
            OutputFormat::Quiet => Ok(health.status.clone()),
            OutputFormat::Table => Ok(self.success(&format!("{} is {}", base_url, health.status))),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn failure(&self, title: &str, message: &str) -> String {
        format!("{}\n  {}", self.error(title), message)
    }

    fn heading(&self, text: &str) -> String {
        self.colorize(text, "bold")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "orange" => text.truecolor(255, 165, 0).to_string(),
            "white" => text.white().to_string(),
            "cyan" => text.cyan().to_string(),
            "dimmed" => text.dimmed().to_string(),
            "bold" => text.bold().to_string(),
            _ => text.to_string(),
        }
    }
}

fn sources_json(sources: &[Source]) -> Value {
    Value::Array(
        sources
            .iter()
            .map(|s| {
                json!({
                    "title": s.title,
                    "url": s.url,
                    "snippet": s.snippet,
                })
            })
            .collect(),
    )
}

/// Adds `raw_verdict` when the service label is outside the known set.
fn with_verdict(mut value: Value, verdict: &Verdict) -> Value {
    value["verdict"] = json!(verdict_style(verdict).label);
    if let Verdict::Other(raw) = verdict {
        value["raw_verdict"] = json!(raw);
    }
    value
}

fn result_json(result: &VerificationResult, claim: Option<&str>) -> Value {
    let value = json!({
        "claim": claim,
        "confidence": result.confidence,
        "explanation": result.explanation,
        "sources": sources_json(&result.sources),
    });
    with_verdict(value, &result.verdict)
}

fn claim_json(claim: &Claim) -> Value {
    let value = json!({
        "id": claim.id,
        "claim": claim.claim,
        "confidence": claim.confidence,
        "explanation": claim.explanation,
        "sources": sources_json(&claim.sources),
        "created_at": claim.created_at,
    });
    with_verdict(value, &claim.verdict)
}

fn state_json<T>(state: &ViewState<T>) -> Value {
    match state {
        ViewState::Idle => json!({ "state": "idle" }),
        ViewState::Loading => json!({ "state": "loading" }),
        ViewState::Success(_) => json!({ "state": "success" }),
        ViewState::Failure(message) => json!({ "error": message }),
    }
}
