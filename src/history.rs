//! Move history.
//!
//! Every move attempt is recorded, accepted or not. The log is append-only
//! and is cleared only when the engine is reinitialised.

use std::borrow::Cow;
use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::board::{Position, TokenId};
use crate::rules::MoveRejection;

/// Header row of the CSV export.
pub const CSV_HEADER: &str = "Timestamp,CircleID,FromRow,FromCol,ToRow,ToCol,Success,Message";

/// One recorded move attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub token: TokenId,
    /// Source cell; None if the token was unknown.
    pub from: Option<Position>,
    /// Requested target; None if it could not be computed.
    pub to: Option<Position>,
    pub timestamp: DateTime<Utc>,
    pub rejection: Option<MoveRejection>,
}

impl MoveRecord {
    pub fn success(&self) -> bool {
        self.rejection.is_none()
    }

    /// Returns the rejection reason, or an empty string for accepted moves.
    pub fn message(&self) -> String {
        self.rejection.map(|r| r.to_string()).unwrap_or_default()
    }

    fn write_csv_row(&self, out: &mut String) {
        let (from_row, from_col) = coords(self.from);
        let (to_row, to_col) = coords(self.to);
        let _ = write!(
            out,
            "{},{},{},{},{},{},{},\"{}\"",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            csv_field(self.token.as_str()),
            from_row,
            from_col,
            to_row,
            to_col,
            self.success(),
            self.message().replace('"', "\"\""),
        );
    }
}

/// Quotes a field if it contains a delimiter, quote, or line break.
fn csv_field(raw: &str) -> Cow<'_, str> {
    if raw.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", raw.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(raw)
    }
}

fn coords(pos: Option<Position>) -> (String, String) {
    match pos {
        Some(p) => (p.row.to_string(), p.col.to_string()),
        None => (String::new(), String::new()),
    }
}

/// Append-only log of move attempts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    records: Vec<MoveRecord>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    /// Renders the log as CSV: the header line, then one line per record.
    ///
    /// The header always ends in a newline; the last record does not.
    pub fn to_csv(&self) -> String {
        let mut out = String::with_capacity(CSV_HEADER.len() + 1 + self.records.len() * 64);
        out.push_str(CSV_HEADER);
        out.push('\n');
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            record.write_csv_row(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, secs).unwrap()
    }

    fn record(id: &str, rejection: Option<MoveRejection>, secs: u32) -> MoveRecord {
        MoveRecord {
            token: TokenId::from(id),
            from: Some(Position::new(4, 0)),
            to: Some(Position::new(3, 0)),
            timestamp: at(secs),
            rejection,
        }
    }

    #[test]
    fn empty_history_exports_header_only() {
        assert_eq!(History::new().to_csv(), format!("{}\n", CSV_HEADER));
    }

    #[test]
    fn csv_rows_follow_header() {
        let mut history = History::new();
        history.push(record("c1", None, 1));
        history.push(record("c2", Some(MoveRejection::BlueBelow), 2));

        let csv = history.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "2026-10-17T12:00:01.000Z,c1,4,0,3,0,true,\"\"");
        assert_eq!(
            lines[2],
            "2026-10-17T12:00:02.000Z,c2,4,0,3,0,false,\"Only Red can be placed on Blue\""
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn unknown_token_row_has_empty_coordinates() {
        let mut history = History::new();
        history.push(MoveRecord {
            token: TokenId::from("ghost"),
            from: None,
            to: None,
            timestamp: at(0),
            rejection: Some(MoveRejection::TokenNotFound),
        });
        let csv = history.to_csv();
        assert!(csv.ends_with("ghost,,,,,false,\"Circle not found\""), "{}", csv);
    }

    #[test]
    fn negative_targets_are_recorded() {
        let mut history = History::new();
        history.push(MoveRecord {
            to: Some(Position::new(-1, 0)),
            ..record("c7", Some(MoveRejection::OutOfBounds), 0)
        });
        assert!(history.to_csv().contains(",4,0,-1,0,false,"));
    }

    #[test]
    fn ids_with_delimiters_are_quoted() {
        let mut history = History::new();
        history.push(MoveRecord {
            token: TokenId::from("x,y"),
            from: None,
            to: None,
            timestamp: at(0),
            rejection: Some(MoveRejection::TokenNotFound),
        });
        history.push(MoveRecord {
            token: TokenId::from("say\"hi\""),
            ..record("c1", None, 1)
        });

        let csv = history.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[1],
            "2026-10-17T12:00:00.000Z,\"x,y\",,,,,false,\"Circle not found\""
        );
        assert_eq!(
            lines[2],
            "2026-10-17T12:00:01.000Z,\"say\"\"hi\"\"\",4,0,3,0,true,\"\""
        );
    }

    #[test]
    fn success_column_survives_awkward_ids() {
        let mut engine = crate::engine::Engine::new();
        engine.move_token("x,y", crate::board::Direction::Up);
        let csv = engine.export_history_csv();
        let row = csv.lines().nth(1).unwrap();
        // Strip the quoted id, then count columns as usual.
        let rest = row.split_once("\"x,y\",").unwrap().1;
        assert_eq!(rest.split(',').nth(4), Some("false"));
    }

    #[test]
    fn clear_empties_log() {
        let mut history = History::new();
        history.push(record("c1", None, 0));
        assert_eq!(history.len(), 1);
        history.clear();
        assert!(history.is_empty());
    }
}
