//! Pure view-filtering and summary functions over journal entries.
//!
//! Nothing here caches state: callers re-evaluate on every render, and the
//! results are deterministic given the same entries and the same reference
//! instant.

use crate::entry::Entry;
use chrono::{DateTime, Duration, Local};
use std::str::FromStr;
use strum_macros::{AsRefStr, EnumString};

/// A named relative time range used to filter entries for display.
///
/// The canonical tokens are `today`, `yesterday` and `lastWeek`, matching
/// the persisted/UI vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum Window {
    Today,
    Yesterday,
    LastWeek,
}

/// Returns the entries falling inside `window`.
///
/// `reference` is the "now" the window is anchored to; `None` means the
/// current local time. Semantics per window:
/// - `Today`: all entries, unfiltered. This mirrors the journal screen's
///   long-standing behavior; see DESIGN.md for the open question around it.
/// - `Yesterday`: entries whose local calendar date is exactly one day
///   before the reference date.
/// - `LastWeek`: entries within the closed interval
///   `[reference - 7 days, reference]`. Future-dated entries are excluded.
///
/// Entries without a timestamp never match a date-bounded window.
pub fn filter_by_window(
    entries: &[Entry],
    window: Window,
    reference: Option<DateTime<Local>>,
) -> Vec<Entry> {
    let now = reference.unwrap_or_else(Local::now);
    match window {
        Window::Today => entries.to_vec(),
        Window::Yesterday => {
            let Some(yesterday) = now.date_naive().pred_opt() else {
                return Vec::new();
            };
            entries
                .iter()
                .filter(|e| e.local_date() == Some(yesterday))
                .cloned()
                .collect()
        }
        Window::LastWeek => {
            let start = now - Duration::days(7);
            entries
                .iter()
                .filter(|e| {
                    e.date_added
                        .map(|d| d >= start && d <= now)
                        .unwrap_or(false)
                })
                .cloned()
                .collect()
        }
    }
}

/// String-token variant of [`filter_by_window`].
///
/// Any token that isn't a known window yields the empty sequence.
pub fn filter_by_window_token(
    entries: &[Entry],
    token: &str,
    reference: Option<DateTime<Local>>,
) -> Vec<Entry> {
    match Window::from_str(token) {
        Ok(window) => filter_by_window(entries, window, reference),
        Err(_) => Vec::new(),
    }
}

/// Sums `kcal` over `entries` and formats the total with two decimals.
///
/// An empty sequence yields `"0.00"`.
pub fn total_calories(entries: &[Entry]) -> String {
    let total: f64 = entries.iter().fold(0.0_f64, |acc, e| acc + e.kcal);
    format!("{:.2}", (total * 100.0).round() / 100.0)
}
