use crate::models::GameTime;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// `6:10 PM`, `6:10PM`, `6:10 pm`. The hour run is greedy so odds glued in front
/// of a clock (`-1086:10 PM`) can be told apart from the clock itself.
static RE_CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+):(\d{2})\s*([AP]M)").unwrap());

/// A 12-hour wall-clock time read from the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32, // 1..=12
    pub minute: u32,
    pub pm: bool,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32, pm: bool) -> Option<Self> {
        if !(1..=12).contains(&hour) || minute > 59 {
            return None;
        }
        Some(Self { hour, minute, pm })
    }

    pub fn hour24(&self) -> u32 {
        match (self.hour, self.pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        }
    }
}

/// One clock pattern found in text. `None` when the pattern was there but the
/// hour or minute is out of range.
pub type ClockMatch = Option<ClockTime>;

pub fn contains_clock(text: &str) -> bool {
    RE_CLOCK.is_match(text)
}

/// Every clock pattern in `text`, in order
pub fn find_clocks(text: &str) -> Vec<ClockMatch> {
    RE_CLOCK
        .captures_iter(text)
        .map(|caps| parse_clock(&caps[1], &caps[2], &caps[3]))
        .collect()
}

/// First clock pattern in `text`, if any
pub fn first_clock(text: &str) -> Option<ClockMatch> {
    RE_CLOCK
        .captures(text)
        .map(|caps| parse_clock(&caps[1], &caps[2], &caps[3]))
}

/// A run longer than two digits means odds were glued in front of the clock.
/// The trailing 10-12 is kept as the hour, otherwise the trailing digit.
///
/// The text alone cannot tell `-101` + `1:05` from `-10` + `11:05`, so a price
/// ending in 1 before a 1 o'clock start reads as 11 (`-1011:05 PM` is 11:05 PM).
fn parse_clock(hour: &str, minute: &str, period: &str) -> ClockMatch {
    let hour = if hour.len() > 2 {
        let tail = &hour[hour.len() - 2..];
        match tail.parse::<u32>() {
            Ok(h) if (10..=12).contains(&h) => tail,
            _ => &hour[hour.len() - 1..],
        }
    } else {
        hour
    };

    let hour = hour.parse::<u32>().ok()?;
    let minute = minute.parse::<u32>().ok()?;
    ClockTime::new(hour, minute, period.eq_ignore_ascii_case("PM"))
}

/// Absolute kickoff for `clock` as seen from `now`: today, or tomorrow when
/// that time of day has already passed.
pub fn resolve_kickoff<Tz: TimeZone>(clock: ClockTime, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let today = now.date_naive();
    let kickoff = at_clock(today, clock, &now.timezone())?;
    if kickoff > *now {
        return Some(kickoff);
    }
    at_clock(today.succ_opt()?, clock, &now.timezone())
}

fn at_clock<Tz: TimeZone>(date: NaiveDate, clock: ClockTime, tz: &Tz) -> Option<DateTime<Tz>> {
    let naive = date.and_hms_opt(clock.hour24(), clock.minute, 0)?;
    tz.from_local_datetime(&naive).earliest()
}

/// Resolves a kickoff for each section of one container element.
///
/// Priority: a clock inside the section, then the Nth clock of the whole
/// container, then the Nth clock of the page body (N = section index).
pub struct TimeResolver<Tz: TimeZone> {
    container_clocks: Vec<ClockMatch>,
    body_clocks: Vec<ClockMatch>,
    now: DateTime<Tz>,
}

impl<Tz: TimeZone> TimeResolver<Tz> {
    pub fn new(container_text: &str, body_text: &str, now: DateTime<Tz>) -> Self {
        Self {
            container_clocks: find_clocks(container_text),
            body_clocks: find_clocks(body_text),
            now,
        }
    }

    pub fn resolve(&self, section_text: &str, section_index: usize) -> GameTime {
        let found = first_clock(section_text)
            .or_else(|| self.container_clocks.get(section_index).copied())
            .or_else(|| self.body_clocks.get(section_index).copied());

        // A rejected hour does not fall through to the next source
        match found {
            Some(Some(clock)) => resolve_kickoff(clock, &self.now)
                .map(|kickoff| GameTime::At(kickoff.with_timezone(&Utc)))
                .unwrap_or(GameTime::Tbd),
            _ => GameTime::Tbd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, FixedOffset, Timelike};

    fn eastern() -> FixedOffset {
        FixedOffset::west_opt(4 * 3600).unwrap()
    }

    #[test]
    fn test_parse_clock_forms() {
        assert_eq!(first_clock("first pitch 6:10 PM"), Some(ClockTime::new(6, 10, true)));
        assert_eq!(first_clock("6:10PM"), Some(ClockTime::new(6, 10, true)));
        assert_eq!(first_clock("12:05 am"), Some(ClockTime::new(12, 5, false)));
        assert_eq!(first_clock("no clock here"), None);
    }

    #[test]
    fn test_out_of_range_hour_is_rejected() {
        assert_eq!(first_clock("13:05 PM"), Some(None));
        assert_eq!(first_clock("0:30 AM"), Some(None));
    }

    #[test]
    fn test_glued_odds_before_clock() {
        // "u9.5-108" followed by "6:10 PM"
        assert_eq!(first_clock("u9.5-1086:10 PM"), Some(ClockTime::new(6, 10, true)));
        assert_eq!(first_clock("+10010:05 PM"), Some(ClockTime::new(10, 5, true)));
    }

    #[test]
    fn test_glued_price_ending_in_one_reads_as_eleven() {
        assert_eq!(first_clock("u8.5-1011:05 PM"), Some(ClockTime::new(11, 5, true)));
        assert_eq!(first_clock("u8.5-1101:05 PM"), Some(ClockTime::new(1, 5, true)));
        assert_eq!(first_clock("u8.5-1151:05 PM"), Some(ClockTime::new(1, 5, true)));
    }

    #[test]
    fn test_hour24() {
        assert_eq!(ClockTime::new(12, 0, false).unwrap().hour24(), 0);
        assert_eq!(ClockTime::new(12, 0, true).unwrap().hour24(), 12);
        assert_eq!(ClockTime::new(6, 10, true).unwrap().hour24(), 18);
        assert_eq!(ClockTime::new(9, 0, false).unwrap().hour24(), 9);
    }

    #[test]
    fn test_resolve_before_kickoff_is_today() {
        let now = eastern().with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let clock = ClockTime::new(6, 10, true).unwrap();

        let kickoff = resolve_kickoff(clock, &now).unwrap();
        assert_eq!(kickoff.date_naive(), now.date_naive());
        assert_eq!((kickoff.hour(), kickoff.minute()), (18, 10));
    }

    #[test]
    fn test_resolve_after_kickoff_is_tomorrow() {
        let now = eastern().with_ymd_and_hms(2026, 10, 16, 19, 0, 0).unwrap();
        let clock = ClockTime::new(6, 10, true).unwrap();

        let kickoff = resolve_kickoff(clock, &now).unwrap();
        assert_eq!(kickoff.date_naive(), now.date_naive().succ_opt().unwrap());
        assert_eq!((kickoff.hour(), kickoff.minute()), (18, 10));
    }

    #[test]
    fn test_resolve_exactly_at_kickoff_rolls_forward() {
        let now = eastern().with_ymd_and_hms(2026, 10, 16, 18, 10, 0).unwrap();
        let kickoff = resolve_kickoff(ClockTime::new(6, 10, true).unwrap(), &now).unwrap();
        assert_eq!(kickoff.day(), 17);
    }

    #[test]
    fn test_resolver_priority() {
        let now = eastern().with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let resolver = TimeResolver::new("1:05 PM 7:10 PM", "2:00 PM 3:00 PM 4:00 PM", now);

        // Own clock wins
        let own = resolver.resolve("Chicago Cubs-120 Texas Rangers+100 6:10 PM", 0);
        assert_eq!(own.to_string(), "2026-10-16T22:10:00.000Z");

        // Nth container clock
        let from_container = resolver.resolve("Chicago Cubs-120 Texas Rangers+100", 1);
        assert_eq!(from_container.to_string(), "2026-10-16T23:10:00.000Z");

        // Nth body clock
        let from_body = resolver.resolve("Chicago Cubs-120 Texas Rangers+100", 2);
        assert_eq!(from_body.to_string(), "2026-10-16T20:00:00.000Z");

        assert!(resolver.resolve("Chicago Cubs-120", 5).is_tbd());
    }

    #[test]
    fn test_rejected_section_clock_is_tbd() {
        let now = eastern().with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let resolver = TimeResolver::new("7:10 PM", "7:10 PM", now);
        assert!(resolver.resolve("kickoff 13:05 PM", 0).is_tbd());
    }
}
