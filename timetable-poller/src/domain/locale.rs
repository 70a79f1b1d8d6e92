//! Clock and relative-time formatting.
//!
//! The display layer upstream of this poller historically leaned on
//! moment.js for its `fromNow()` strings. This module carries the small
//! slice of that capability the poller needs: a 24-hour clock string and a
//! future-tense relative phrase, using moment's rounding thresholds
//! (45 seconds, 45 minutes, 22 hours).

use chrono::{DateTime, TimeZone, Timelike};

/// Output language for relative-time phrases.
///
/// Parsed once from the configuration and threaded explicitly into every
/// transformation; there is no process-global locale state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Finnish,
    English,
    Swedish,
}

/// Coarse bucket for a future time span, following moment's cutoffs.
enum Span {
    FewSeconds,
    OneMinute,
    Minutes(i64),
    OneHour,
    Hours(i64),
    OneDay,
    Days(i64),
}

impl Span {
    fn from_seconds(seconds: i64) -> Self {
        let minutes = (seconds + 30) / 60;
        let hours = (minutes + 30) / 60;
        let days = (hours + 12) / 24;

        if seconds < 45 {
            Span::FewSeconds
        } else if seconds < 90 {
            Span::OneMinute
        } else if minutes < 45 {
            Span::Minutes(minutes)
        } else if minutes < 90 {
            Span::OneHour
        } else if hours < 22 {
            Span::Hours(hours)
        } else if hours < 36 {
            Span::OneDay
        } else {
            Span::Days(days)
        }
    }
}

impl Locale {
    /// Parse a language tag such as `"fi"`, `"sv"`, or `"en-GB"`.
    ///
    /// Only the primary subtag is considered; unknown tags fall back to
    /// English.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_poller::domain::Locale;
    ///
    /// assert_eq!(Locale::parse("fi"), Locale::Finnish);
    /// assert_eq!(Locale::parse("sv-FI"), Locale::Swedish);
    /// assert_eq!(Locale::parse("pt"), Locale::English);
    /// ```
    pub fn parse(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or("");
        match primary.to_ascii_lowercase().as_str() {
            "fi" => Locale::Finnish,
            "sv" => Locale::Swedish,
            _ => Locale::English,
        }
    }

    /// Relative phrase for a departure `seconds` in the future.
    ///
    /// Negative inputs are clamped to zero; departures in the past are
    /// filtered out before formatting ever happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_poller::domain::Locale;
    ///
    /// assert_eq!(Locale::English.until(5 * 60), "in 5 minutes");
    /// assert_eq!(Locale::Finnish.until(5 * 60), "5 minuutin päästä");
    /// ```
    pub fn until(&self, seconds: i64) -> String {
        let span = Span::from_seconds(seconds.max(0));

        match self {
            Locale::Finnish => {
                let amount = match span {
                    Span::FewSeconds => "muutaman sekunnin".to_string(),
                    Span::OneMinute => "minuutin".to_string(),
                    Span::Minutes(n) => format!("{n} minuutin"),
                    Span::OneHour => "tunnin".to_string(),
                    Span::Hours(n) => format!("{n} tunnin"),
                    Span::OneDay => "päivän".to_string(),
                    Span::Days(n) => format!("{n} päivän"),
                };
                format!("{amount} päästä")
            }
            Locale::English => {
                let amount = match span {
                    Span::FewSeconds => "a few seconds".to_string(),
                    Span::OneMinute => "a minute".to_string(),
                    Span::Minutes(n) => format!("{n} minutes"),
                    Span::OneHour => "an hour".to_string(),
                    Span::Hours(n) => format!("{n} hours"),
                    Span::OneDay => "a day".to_string(),
                    Span::Days(n) => format!("{n} days"),
                };
                format!("in {amount}")
            }
            Locale::Swedish => {
                let amount = match span {
                    Span::FewSeconds => "några sekunder".to_string(),
                    Span::OneMinute => "en minut".to_string(),
                    Span::Minutes(n) => format!("{n} minuter"),
                    Span::OneHour => "en timme".to_string(),
                    Span::Hours(n) => format!("{n} timmar"),
                    Span::OneDay => "en dag".to_string(),
                    Span::Days(n) => format!("{n} dagar"),
                };
                format!("om {amount}")
            }
        }
    }
}

/// Format a departure instant as "H:mm": 24-hour clock, minutes padded,
/// hour unpadded.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use timetable_poller::domain::clock_time;
///
/// let helsinki = FixedOffset::east_opt(2 * 3600).unwrap();
/// let morning = helsinki.with_ymd_and_hms(2024, 1, 1, 7, 5, 0).unwrap();
/// assert_eq!(clock_time(&morning), "7:05");
/// ```
pub fn clock_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    format!("{}:{:02}", at.hour(), at.minute())
}
