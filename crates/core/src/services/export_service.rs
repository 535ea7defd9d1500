use chrono::{DateTime, FixedOffset};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::borrow::Borrow;

use crate::errors::CoreError;
use crate::models::journal::{BackupDocument, Journal, BACKUP_VERSION};
use crate::models::review::DailyReview;
use crate::models::trade::Trade;

pub const TRADE_CSV_HEADERS: [&str; 14] = [
    "Date",
    "Symbol",
    "Type",
    "Entry Price",
    "Exit Price",
    "Position Size",
    "P&L",
    "Strategy",
    "Timeframe",
    "Pre-Trade Emotion",
    "Post-Trade Emotion",
    "Discipline Score",
    "Followed Plan",
    "Lessons Learned",
];

pub const REVIEW_CSV_HEADERS: [&str; 10] = [
    "Date",
    "Morning Mindset",
    "Energy Level",
    "Focus Level",
    "Mood Score",
    "Overall Score",
    "Wins",
    "Improvements",
    "Gratitude",
    "Notes",
];

/// Separator for list fields flattened into one CSV cell.
pub const LIST_SEPARATOR: &str = "; ";

/// CSV exports and full JSON backups.
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// One row per trade in input order. Text cells are always quoted with
    /// embedded quotes doubled; the date is the local creation date.
    pub fn trades_csv<T: Borrow<Trade>>(&self, trades: &[T], offset: &FixedOffset) -> Result<String, CoreError> {
        let mut writer = csv_writer();
        writer.write_record(TRADE_CSV_HEADERS)?;
        for trade in trades.iter().map(Borrow::borrow) {
            writer.write_record([
                trade.created_at.with_timezone(offset).format("%Y-%m-%d").to_string(),
                trade.symbol.clone(),
                trade.trade_type.to_string(),
                number_cell(trade.entry_price),
                number_cell(trade.exit_price),
                number_cell(trade.position_size),
                number_cell(trade.profit_loss),
                text_cell(&trade.strategy),
                text_cell(&trade.timeframe),
                text_cell(&trade.pre_trade_emotion),
                text_cell(&trade.post_trade_emotion),
                trade.discipline_score.map(|s| s.to_string()).unwrap_or_default(),
                if trade.followed_plan { "Yes" } else { "No" }.to_string(),
                text_cell(&trade.lessons_learned),
            ])?;
        }
        tracing::debug!(rows = trades.len(), "exported trades CSV");
        finish(writer)
    }

    /// One row per review in input order; list fields are joined with `"; "`.
    pub fn reviews_csv<R: Borrow<DailyReview>>(&self, reviews: &[R]) -> Result<String, CoreError> {
        let mut writer = csv_writer();
        writer.write_record(REVIEW_CSV_HEADERS)?;
        for review in reviews.iter().map(Borrow::borrow) {
            writer.write_record([
                review.review_date.format("%Y-%m-%d").to_string(),
                text_cell(&review.morning_mindset),
                score_cell(review.energy_level),
                score_cell(review.focus_level),
                score_cell(review.mood_score),
                score_cell(review.overall_score),
                review.wins.join(LIST_SEPARATOR),
                review.improvements.join(LIST_SEPARATOR),
                review.gratitude.join(LIST_SEPARATOR),
                text_cell(&review.notes),
            ])?;
        }
        tracing::debug!(rows = reviews.len(), "exported reviews CSV");
        finish(writer)
    }

    /// Full backup of every collection plus settings.
    pub fn backup_json(&self, journal: &Journal, now: DateTime<FixedOffset>) -> Result<String, CoreError> {
        let doc = BackupDocument {
            export_date: now,
            version: BACKUP_VERSION.to_string(),
            journal: journal.clone(),
        };
        serde_json::to_string_pretty(&doc).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    /// Parse a backup. Collections missing from the document come back empty
    /// and missing settings come back as defaults.
    pub fn parse_backup(&self, json: &str) -> Result<BackupDocument, CoreError> {
        let doc: BackupDocument = serde_json::from_str(json)?;
        if doc.version != BACKUP_VERSION {
            tracing::warn!(version = %doc.version, "importing backup with unexpected version");
        }
        Ok(doc)
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

fn csv_writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, CoreError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Csv(e.error().to_string()))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Csv(e.to_string()))
}

fn number_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn score_cell(value: Option<u8>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn text_cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
