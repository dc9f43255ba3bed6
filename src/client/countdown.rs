//! Countdown to the next birthday.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, TimeDelta};

/// A yearly date, e.g. 17 January
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Birthday {
    month: u32,
    day: u32,
}

impl Default for Birthday {
    fn default() -> Self {
        Self { month: 1, day: 17 }
    }
}

impl Birthday {
    /// `None` when the month/day never occurs. 29 February is allowed.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(2000, month, day).map(|_| Self { month, day })
    }

    /// Midnight of the birthday in `year`, if that year has the date
    fn in_year(&self, year: i32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }

    pub fn is_on(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }

    /// First birthday midnight strictly after `now`
    pub fn next_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        (now.year()..)
            .filter_map(|year| self.in_year(year))
            .find(|midnight| *midnight > now)
            .unwrap_or(now)
    }

    pub fn countdown(&self, now: NaiveDateTime) -> Countdown {
        if self.is_on(now.date()) {
            return Countdown::Celebrating;
        }
        Countdown::Remaining(TimeLeft::from_delta(self.next_after(now) - now))
    }

    pub fn countdown_now(&self) -> Countdown {
        self.countdown(Local::now().naive_local())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Remaining(TimeLeft),
    /// It is the birthday today
    Celebrating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    pub fn from_delta(delta: TimeDelta) -> Self {
        let total = delta.num_seconds().max(0);
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }

    /// Days, hours, minutes and seconds as two-digit strings
    pub fn padded(&self) -> [String; 4] {
        [self.days, self.hours, self.minutes, self.seconds].map(|v| format!("{:02}", v))
    }
}
