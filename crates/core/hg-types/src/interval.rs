//! Hour-granular time intervals.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use hg_error::ConfigError;

const SECONDS_PER_HOUR: i64 = 3600;

/// An inclusive range of hours, both ends floored to the start of their hour.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use hg_types::HourInterval;
///
/// let interval = HourInterval::new(
///     Utc.with_ymd_and_hms(2021, 1, 2, 3, 59, 0).unwrap(),
///     Utc.with_ymd_and_hms(2021, 1, 2, 5, 10, 0).unwrap(),
/// ).unwrap();
///
/// assert_eq!(interval.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl HourInterval {
    /// Create an interval, flooring both ends to the hour.
    ///
    /// Returns an error if the floored end precedes the floored start.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ConfigError> {
        let start = floor_to_hour(start);
        let end = floor_to_hour(end);

        if end < start {
            return Err(ConfigError::Interval(format!(
                "end {} precedes start {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }

        Ok(Self { start, end })
    }

    /// Interval covering a single hour.
    pub fn single(hour: DateTime<Utc>) -> Self {
        let hour = floor_to_hour(hour);
        Self {
            start: hour,
            end: hour,
        }
    }

    /// First hour of the interval.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Last hour of the interval (inclusive).
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Number of hours covered, counting both ends.
    pub fn len(&self) -> usize {
        ((self.end - self.start).num_hours() + 1) as usize
    }

    /// Always false; an interval covers at least one hour.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `other` lies entirely within this interval.
    pub fn contains(&self, other: &HourInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Every hour boundary from start to end inclusive, ascending.
    pub fn hours(&self) -> impl Iterator<Item = DateTime<Utc>> + use<> {
        let start = self.start;
        (0..self.len() as i64).map(move |offset| start + Duration::hours(offset))
    }
}

/// Floor a timestamp to the start of its hour.
pub fn floor_to_hour(time: DateTime<Utc>) -> DateTime<Utc> {
    let secs = time.timestamp();
    let floored = secs - secs.rem_euclid(SECONDS_PER_HOUR);
    // Flooring an in-range timestamp stays in range
    DateTime::from_timestamp(floored, 0).unwrap_or(time)
}

/// Format an hour as the `YYYY/MM/DD/HH` directory suffix used for landed data.
pub fn hour_path(time: DateTime<Utc>) -> String {
    time.format("%Y/%m/%d/%H").to_string()
}

/// Parse a timestamp given on the command line.
///
/// Accepts RFC 3339 (`2021-01-02T03:00:00Z`), hour precision
/// (`2021-01-02T03`), date only (`2021-01-02`), or relative to now
/// (`-6h`, `-2d`, `-1w`).
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, String> {
    let input = input.trim();

    if input.starts_with('-') {
        return parse_relative(input);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(&format!("{input}:00:00"), "%Y-%m-%dT%H:%M:%S")
    {
        return Ok(DateTime::from_naive_utc_and_offset(dt, Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let dt = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| format!("Invalid date: {input}"))?;
        return Ok(DateTime::from_naive_utc_and_offset(dt, Utc));
    }

    Err(format!(
        "Invalid timestamp: {input}. Expected RFC 3339 (2021-01-02T03:00:00Z), \
         hour (2021-01-02T03), date (2021-01-02), or relative (-6h, -2d, -1w)"
    ))
}

fn parse_relative(input: &str) -> Result<DateTime<Utc>, String> {
    let body = input.trim_start_matches('-');
    let Some(unit) = body.chars().last() else {
        return Err("Empty relative timestamp".to_string());
    };

    let num: i64 = body[..body.len() - unit.len_utf8()]
        .parse()
        .map_err(|_| format!("Invalid number in relative timestamp: {input}"))?;

    let duration = match unit.to_ascii_lowercase() {
        'h' => Duration::try_hours(num),
        'd' => Duration::try_days(num),
        'w' => Duration::try_weeks(num),
        _ => {
            return Err(format!(
                "Invalid relative unit in {input}. Use 'h' (hours), 'd' (days), or 'w' (weeks)"
            ));
        }
    };

    duration
        .and_then(|duration| Utc::now().checked_sub_signed(duration))
        .ok_or_else(|| format!("Relative timestamp out of range: {input}"))
}
