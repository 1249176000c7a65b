use std::fmt;

use chrono::{
    DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};

use crate::error::{DashboardError, DashboardResult};

const NULL_MARKERS: &[&str] = &["", "nan", "null", "none", "nat"];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Urgent = 1,
    High = 2,
    Normal = 3,
    Low = 4,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Urgent,
        Priority::High,
        Priority::Normal,
        Priority::Low,
    ];

    pub fn from_num(num: i64) -> Option<Self> {
        match num {
            1 => Some(Priority::Urgent),
            2 => Some(Priority::High),
            3 => Some(Priority::Normal),
            4 => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn num(self) -> u8 {
        self as u8
    }

    /// The `priority_text` label paired with `priority_num`.
    pub fn text(self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Urgent => "Urgent",
            Priority::High => "High",
            Priority::Normal => "Normal",
            Priority::Low => "Low",
        }
    }

    /// Urgent and high tickets count as critical.
    pub fn is_critical(self) -> bool {
        self.num() < 3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Open,
    Closed,
}

impl Status {
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.eq_ignore_ascii_case("open") {
            Some(Status::Open)
        } else if value.eq_ignore_ascii_case("closed") {
            Some(Status::Closed)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Timeframe {
    Quarter,
    Month,
    Week,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Quarter, Timeframe::Month, Timeframe::Week];

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Quarter => "Quarter",
            Timeframe::Month => "Month",
            Timeframe::Week => "Week",
        }
    }

    /// Calendar bucket containing `ts`. Weeks follow ISO 8601 (Monday start,
    /// ISO week-year).
    pub fn bucket(self, ts: &DateTime<Utc>) -> Bucket {
        let (year, index) = match self {
            Timeframe::Quarter => (ts.year(), ts.month0() / 3 + 1),
            Timeframe::Month => (ts.year(), ts.month()),
            Timeframe::Week => {
                let week = ts.iso_week();
                (week.year(), week.week())
            }
        };

        Bucket {
            year,
            index,
            timeframe: self,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bucket {
    year: i32,
    index: u32,
    timeframe: Timeframe,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.timeframe {
            Timeframe::Quarter => write!(f, "{}-Q{}", self.year, self.index),
            Timeframe::Month => write!(f, "{}-{:02}", self.year, self.index),
            Timeframe::Week => write!(f, "{}-W{:02}", self.year, self.index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Buckets {
    quarter: Bucket,
    month: Bucket,
    week: Bucket,
}

impl Buckets {
    pub fn of(ts: &DateTime<Utc>) -> Self {
        Self {
            quarter: Timeframe::Quarter.bucket(ts),
            month: Timeframe::Month.bucket(ts),
            week: Timeframe::Week.bucket(ts),
        }
    }

    pub fn get(&self, timeframe: Timeframe) -> Bucket {
        match timeframe {
            Timeframe::Quarter => self.quarter,
            Timeframe::Month => self.month,
            Timeframe::Week => self.week,
        }
    }
}

/// Raw field values for one ticket before validation.
#[derive(Debug, Clone, Default)]
pub struct TicketDraft {
    pub name: String,
    pub date_created: Option<DateTime<Utc>>,
    pub date_progress: Option<DateTime<Utc>>,
    pub date_closed: Option<DateTime<Utc>>,
    pub priority_num: Option<i64>,
    pub integration: Option<String>,
    pub assigned_dev: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Ticket {
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub date_progress: Option<DateTime<Utc>>,
    pub date_closed: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub integration: String,
    pub assigned_dev: Option<String>,
    pub status: Status,
    created: Buckets,
    closed: Option<Buckets>,
}

impl Ticket {
    pub fn created_bucket(&self, timeframe: Timeframe) -> Bucket {
        self.created.get(timeframe)
    }

    pub fn closed_bucket(&self, timeframe: Timeframe) -> Option<Bucket> {
        self.closed.map(|buckets| buckets.get(timeframe))
    }

    pub fn is_closed(&self) -> bool {
        self.status == Status::Closed
    }

    /// Hours from creation until the ticket entered progress.
    pub fn waiting_hours(&self) -> Option<f64> {
        self.date_progress
            .map(|progress| hours_between(&self.date_created, &progress))
    }

    /// Hours from entering progress until close.
    pub fn cycle_hours(&self) -> Option<f64> {
        match (self.date_progress, self.date_closed) {
            (Some(progress), Some(closed)) => Some(hours_between(&progress, &closed)),
            _ => None,
        }
    }
}

impl TryFrom<TicketDraft> for Ticket {
    type Error = DashboardError;

    fn try_from(draft: TicketDraft) -> Result<Self, Self::Error> {
        let name = draft.name.trim().to_owned();
        if name.is_empty() {
            return Err(DashboardError::invalid_row("<unnamed>", "missing name"));
        }

        let date_created = draft
            .date_created
            .ok_or_else(|| DashboardError::invalid_row(&name, "missing date_created"))?;

        let priority = draft
            .priority_num
            .and_then(Priority::from_num)
            .ok_or_else(|| {
                DashboardError::invalid_row(
                    &name,
                    format!("priority_num {:?} outside 1-4", draft.priority_num),
                )
            })?;

        let integration = non_blank(draft.integration)
            .map(|value| value.to_lowercase())
            .ok_or_else(|| DashboardError::invalid_row(&name, "missing integration"))?;

        let status = draft
            .status
            .as_deref()
            .and_then(Status::parse)
            .ok_or_else(|| {
                DashboardError::invalid_row(
                    &name,
                    format!("open_closed {:?} is neither open nor closed", draft.status),
                )
            })?;

        if let Some(progress) = draft.date_progress {
            if progress < date_created {
                return Err(DashboardError::invalid_row(
                    &name,
                    "date_progress precedes date_created",
                ));
            }
        }

        if let Some(closed) = draft.date_closed {
            let floor = draft.date_progress.unwrap_or(date_created);
            if closed < floor {
                return Err(DashboardError::invalid_row(
                    &name,
                    "date_closed precedes an earlier lifecycle date",
                ));
            }
        }

        if status == Status::Closed && draft.date_closed.is_none() {
            return Err(DashboardError::invalid_row(
                &name,
                "closed ticket without date_closed",
            ));
        }

        Ok(Self {
            name,
            created: Buckets::of(&date_created),
            closed: draft.date_closed.as_ref().map(Buckets::of),
            date_created,
            date_progress: draft.date_progress,
            date_closed: draft.date_closed,
            priority,
            integration,
            assigned_dev: non_blank(draft.assigned_dev),
            status,
        })
    }
}

/// Parses a raw date cell. Null markers yield `Ok(None)`; naive values are
/// read as UTC.
pub fn parse_date(raw: &str) -> DashboardResult<Option<DateTime<Utc>>> {
    let value = raw.trim();

    if NULL_MARKERS
        .iter()
        .any(|marker| value.eq_ignore_ascii_case(marker))
    {
        return Ok(None);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(value, format) {
            return Ok(Some(ts.with_timezone(&Utc)));
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Some(ts.and_utc()));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(Some(start_of_day(date)));
        }
    }

    if value.len() >= 11 && value.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(ts) = value
            .parse::<i64>()
            .ok()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
        {
            return Ok(Some(ts));
        }
    }

    Err(DashboardError::DateParse {
        value: value.to_owned(),
    })
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

pub fn hours_between(from: &DateTime<Utc>, to: &DateTime<Utc>) -> f64 {
    (*to - *from).num_milliseconds() as f64 / 3_600_000.0
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty() && !NULL_MARKERS.contains(&value.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{draft, utc};

    #[test]
    fn parses_common_date_shapes() {
        let expected = utc("2024-01-05 10:30:00");

        assert_eq!(parse_date("2024-01-05T10:30:00Z").unwrap(), Some(expected));
        assert_eq!(
            parse_date("2024-01-05 10:30:00+00:00").unwrap(),
            Some(expected)
        );
        assert_eq!(
            parse_date("2024-01-05 11:30:00.000+01:00").unwrap(),
            Some(expected)
        );
        assert_eq!(
            parse_date("2024-01-05T10:30:00+0000").unwrap(),
            Some(expected)
        );
        assert_eq!(
            parse_date("2024-01-05T12:30:00.5+0200").unwrap(),
            Some(expected + chrono::Duration::milliseconds(500))
        );
        assert_eq!(parse_date("2024-01-05 10:30:00").unwrap(), Some(expected));
        assert_eq!(parse_date("1704450600000").unwrap(), Some(expected));
        assert_eq!(
            parse_date("2024-01-05").unwrap(),
            Some(utc("2024-01-05 00:00:00"))
        );
        assert_eq!(
            parse_date("01/05/2024").unwrap(),
            Some(utc("2024-01-05 00:00:00"))
        );
    }

    #[test]
    fn null_markers_are_not_errors() {
        for raw in ["", "  ", "nan", "NaN", "null", "None", "NaT"] {
            assert_eq!(parse_date(raw).unwrap(), None, "{raw:?}");
        }
    }

    #[test]
    fn garbage_dates_fail_with_date_parse() {
        let err = parse_date("next tuesday").unwrap_err();
        assert!(matches!(err, DashboardError::DateParse { ref value } if value == "next tuesday"));
        assert!(err.is_row_local());
    }

    #[test]
    fn bucket_labels_follow_calendar() {
        let ts = utc("2024-05-15 08:00:00");
        assert_eq!(Timeframe::Quarter.bucket(&ts).to_string(), "2024-Q2");
        assert_eq!(Timeframe::Month.bucket(&ts).to_string(), "2024-05");
        assert_eq!(Timeframe::Week.bucket(&ts).to_string(), "2024-W20");
    }

    #[test]
    fn week_buckets_use_iso_week_year() {
        // Sunday 2023-01-01 belongs to the last ISO week of 2022.
        let ts = utc("2023-01-01 12:00:00");
        assert_eq!(Timeframe::Week.bucket(&ts).to_string(), "2022-W52");

        // Monday 2024-12-30 opens ISO week 1 of 2025.
        let ts = utc("2024-12-30 00:00:00");
        assert_eq!(Timeframe::Week.bucket(&ts).to_string(), "2025-W01");
    }

    #[test]
    fn buckets_sort_chronologically() {
        let mut buckets = vec![
            Timeframe::Month.bucket(&utc("2024-11-01 00:00:00")),
            Timeframe::Month.bucket(&utc("2023-12-01 00:00:00")),
            Timeframe::Month.bucket(&utc("2024-02-01 00:00:00")),
        ];
        buckets.sort();
        let labels: Vec<String> = buckets.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["2023-12", "2024-02", "2024-11"]);
    }

    #[test]
    fn priority_mapping_is_bijective() {
        for priority in Priority::ALL {
            assert_eq!(Priority::from_num(priority.num() as i64), Some(priority));
        }
        assert_eq!(Priority::from_num(0), None);
        assert_eq!(Priority::from_num(5), None);
        assert!(Priority::High.is_critical());
        assert!(!Priority::Normal.is_critical());
    }

    #[test]
    fn ticket_derives_buckets_and_durations() {
        let mut raw = draft("T-1", 2, "Shopify", "2024-01-05 00:00:00", Some("2024-01-10 00:00:00"));
        raw.date_progress = Some(utc("2024-01-06 12:00:00"));
        let ticket = Ticket::try_from(raw).unwrap();

        assert_eq!(ticket.integration, "shopify");
        assert_eq!(ticket.created_bucket(Timeframe::Month).to_string(), "2024-01");
        assert_eq!(
            ticket.closed_bucket(Timeframe::Week).map(|b| b.to_string()),
            Some("2024-W02".to_owned())
        );
        assert_eq!(ticket.waiting_hours(), Some(36.0));
        assert_eq!(ticket.cycle_hours(), Some(84.0));
    }

    #[test]
    fn closed_ticket_needs_close_date() {
        let mut raw = draft("T-2", 1, "zendesk", "2024-01-05 00:00:00", None);
        raw.status = Some("closed".to_owned());
        let err = Ticket::try_from(raw).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRow { ref name, .. } if name == "T-2"));
    }

    #[test]
    fn out_of_order_lifecycle_is_rejected() {
        let raw = draft("T-3", 1, "zendesk", "2024-01-05 00:00:00", Some("2024-01-04 00:00:00"));
        assert!(Ticket::try_from(raw).is_err());

        let mut raw = draft("T-4", 1, "zendesk", "2024-01-05 00:00:00", None);
        raw.date_progress = Some(utc("2024-01-01 00:00:00"));
        assert!(Ticket::try_from(raw).is_err());
    }

    #[test]
    fn blank_integration_and_developer_are_treated_as_missing() {
        let mut raw = draft("T-5", 3, "  ", "2024-01-05 00:00:00", None);
        assert!(Ticket::try_from(raw.clone()).is_err());

        raw.integration = Some("xero".to_owned());
        raw.assigned_dev = Some("nan".to_owned());
        let ticket = Ticket::try_from(raw).unwrap();
        assert_eq!(ticket.assigned_dev, None);
    }
}
