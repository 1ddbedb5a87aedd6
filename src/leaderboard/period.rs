//! Calendar dates and period buckets
//!
//! Dates are proleptic Gregorian and carry no time zone; the host decides what
//! "today" is (the browser's local day, or the UTC day on native).

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::PeriodKind;

/// A calendar day, rendered as `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

const MS_PER_DAY: i64 = 86_400_000;

impl CivilDate {
    pub const EPOCH: CivilDate = CivilDate {
        year: 1970,
        month: 1,
        day: 1,
    };

    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Days since 1970-01-01 (negative before)
    pub fn days_since_epoch(&self) -> i64 {
        let (m, d) = (self.month as i64, self.day as i64);
        let y = self.year as i64 - if m <= 2 { 1 } else { 0 };
        let era = (if y >= 0 { y } else { y - 399 }) / 400;
        let yoe = y - era * 400;
        let doy = (153 * (m + if m > 2 { -3 } else { 9 }) + 2) / 5 + d - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe - 719_468
    }

    pub fn from_days_since_epoch(days: i64) -> Self {
        let z = days + 719_468;
        let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
        let year = (yoe + era * 400 + if month <= 2 { 1 } else { 0 }) as i32;
        Self { year, month, day }
    }

    /// Day containing a Unix timestamp (ms), in UTC
    pub fn from_unix_ms(ms: i64) -> Self {
        Self::from_days_since_epoch(ms.div_euclid(MS_PER_DAY))
    }

    /// Today's UTC date from the system clock
    pub fn today_utc() -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        Self::from_unix_ms(ms)
    }

    /// 0 = Monday .. 6 = Sunday
    pub fn weekday_from_monday(&self) -> u32 {
        // 1970-01-01 was a Thursday
        (self.days_since_epoch() + 3).rem_euclid(7) as u32
    }

    pub fn add_days(&self, days: i64) -> Self {
        Self::from_days_since_epoch(self.days_since_epoch() + days)
    }

    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().splitn(3, '-');
        let year = parts.next()?.parse().ok()?;
        let month = parts.next()?.parse().ok()?;
        let day = parts.next()?.parse().ok()?;
        let date = Self::new(year, month, day);
        // reject 2023-02-30 and friends
        (Self::from_days_since_epoch(date.days_since_epoch()) == date).then_some(date)
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl From<CivilDate> for String {
    fn from(date: CivilDate) -> Self {
        date.to_string()
    }
}

impl TryFrom<String> for CivilDate {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        CivilDate::parse(&s).ok_or_else(|| format!("invalid date: {s}"))
    }
}

/// First day of the bucket containing `today`
pub fn period_start(period: PeriodKind, today: CivilDate) -> CivilDate {
    match period {
        PeriodKind::All => CivilDate::EPOCH,
        PeriodKind::Daily => today,
        PeriodKind::Weekly => today.add_days(-(today.weekday_from_monday() as i64)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_round_trip() {
        assert_eq!(CivilDate::EPOCH.days_since_epoch(), 0);
        assert_eq!(CivilDate::from_days_since_epoch(0), CivilDate::EPOCH);
        assert_eq!(CivilDate::new(2000, 3, 1).days_since_epoch(), 11_017);
        assert_eq!(CivilDate::from_days_since_epoch(-1), CivilDate::new(1969, 12, 31));
        for days in (-800_000..800_000).step_by(997) {
            let date = CivilDate::from_days_since_epoch(days);
            assert_eq!(date.days_since_epoch(), days);
        }
    }

    #[test]
    fn test_leap_days() {
        let feb_end = CivilDate::new(2024, 2, 28);
        assert_eq!(feb_end.add_days(1), CivilDate::new(2024, 2, 29));
        assert_eq!(CivilDate::new(2023, 2, 28).add_days(1), CivilDate::new(2023, 3, 1));
        assert_eq!(CivilDate::parse("2023-02-29"), None);
        assert_eq!(CivilDate::parse("2024-02-29"), Some(CivilDate::new(2024, 2, 29)));
    }

    #[test]
    fn test_unix_ms() {
        // 2024-05-17T23:59:59.999Z
        assert_eq!(
            CivilDate::from_unix_ms(1_715_990_399_999),
            CivilDate::new(2024, 5, 17)
        );
        assert_eq!(CivilDate::from_unix_ms(-1), CivilDate::new(1969, 12, 31));
    }

    #[test]
    fn test_weekday() {
        assert_eq!(CivilDate::EPOCH.weekday_from_monday(), 3);
        // 2024-05-13 was a Monday, 2024-05-19 a Sunday
        assert_eq!(CivilDate::new(2024, 5, 13).weekday_from_monday(), 0);
        assert_eq!(CivilDate::new(2024, 5, 19).weekday_from_monday(), 6);
    }

    #[test]
    fn test_period_start() {
        let sunday = CivilDate::new(2024, 5, 19);
        assert_eq!(period_start(PeriodKind::All, sunday).to_string(), "1970-01-01");
        assert_eq!(period_start(PeriodKind::Daily, sunday).to_string(), "2024-05-19");
        assert_eq!(period_start(PeriodKind::Weekly, sunday).to_string(), "2024-05-13");

        let monday = CivilDate::new(2024, 5, 13);
        assert_eq!(period_start(PeriodKind::Weekly, monday), monday);

        // weeks can start in the previous year
        let new_year = CivilDate::new(2025, 1, 1);
        assert_eq!(
            period_start(PeriodKind::Weekly, new_year),
            CivilDate::new(2024, 12, 30)
        );
    }

    #[test]
    fn test_serde_as_string() {
        let date = CivilDate::new(2024, 1, 5);
        assert_eq!(serde_json::to_string(&date).unwrap(), r#""2024-01-05""#);
        let back: CivilDate = serde_json::from_str(r#""2024-01-05""#).unwrap();
        assert_eq!(back, date);
        assert!(serde_json::from_str::<CivilDate>(r#""2024-13-01""#).is_err());
    }
}
