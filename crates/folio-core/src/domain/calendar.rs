use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// CalendarEvent entity - an editorial event, optionally tied to a blog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub color: Option<String>,
    pub blog_id: Option<String>,
}

impl CalendarEvent {
    /// Start and end of the event; untimed events span the whole day.
    pub fn span(&self) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.start_time.unwrap_or(NaiveTime::MIN);
        let end = self
            .end_time
            .or_else(|| NaiveTime::from_hms_opt(23, 59, 59))
            .unwrap_or(NaiveTime::MIN);
        (self.date.and_time(start), self.date.and_time(end))
    }
}

/// Events sharing one date.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEventGroup {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub events: Vec<CalendarEvent>,
}

/// Events on `date`, in input order.
pub fn events_on(events: &[CalendarEvent], date: NaiveDate) -> Vec<&CalendarEvent> {
    events.iter().filter(|event| event.date == date).collect()
}

/// Group events by date, oldest first. Within a day events are ordered by
/// start time, untimed events first.
pub fn group_by_date(events: &[CalendarEvent]) -> Vec<CalendarEventGroup> {
    let mut groups: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();
    for event in events {
        groups.entry(event.date).or_default().push(event.clone());
    }

    groups
        .into_iter()
        .map(|(date, mut events)| {
            events.sort_by_key(|event| event.start_time);
            CalendarEventGroup {
                date: date.format("%Y-%m-%d").to_string(),
                events,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalendarView {
    #[default]
    Month,
    Week,
    Day,
}

impl CalendarView {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "month" => Some(Self::Month),
            "week" => Some(Self::Week),
            "day" => Some(Self::Day),
            _ => None,
        }
    }
}

/// Navigation state of the calendar page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCursor {
    pub view: CalendarView,
    pub current: NaiveDate,
    pub selected: Option<NaiveDate>,
}

impl CalendarCursor {
    pub fn new(view: CalendarView, current: NaiveDate) -> Self {
        Self {
            view,
            current,
            selected: None,
        }
    }

    pub fn previous(&mut self) {
        self.current = match self.view {
            CalendarView::Month => shift_month(self.current, -1),
            CalendarView::Week => self.current - Duration::days(7),
            CalendarView::Day => self.current - Duration::days(1),
        };
    }

    pub fn next(&mut self) {
        self.current = match self.view {
            CalendarView::Month => shift_month(self.current, 1),
            CalendarView::Week => self.current + Duration::days(7),
            CalendarView::Day => self.current + Duration::days(1),
        };
    }

    pub fn today(&mut self, today: NaiveDate) {
        self.current = today;
        self.selected = Some(today);
    }

    pub fn select(&mut self, date: NaiveDate) {
        self.selected = Some(date);
    }
}

/// First day of the month `delta` months away from `date`.
fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = date.year() * 12 + date.month0() as i32 + delta;
    let (year, month0) = (months.div_euclid(12), months.rem_euclid(12));
    NaiveDate::from_ymd_opt(year, month0 as u32 + 1, 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, date: NaiveDate, start: Option<(u32, u32)>) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: format!("Event {id}"),
            description: None,
            date,
            start_time: start.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            end_time: None,
            color: None,
            blog_id: None,
        }
    }

    #[test]
    fn test_untimed_event_spans_whole_day() {
        let (start, end) = event("1", day(2026, 1, 15), None).span();
        assert_eq!(start, day(2026, 1, 15).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(end, day(2026, 1, 15).and_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn test_group_by_date_orders_days_and_times() {
        let events = vec![
            event("a", day(2026, 1, 20), Some((14, 30))),
            event("b", day(2026, 1, 15), None),
            event("c", day(2026, 1, 20), Some((9, 0))),
        ];

        let groups = group_by_date(&events);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, "2026-01-15");
        let ids: Vec<_> = groups[1].events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["c", "a"]);
        assert_eq!(events_on(&events, day(2026, 1, 20)).len(), 2);
    }

    #[test]
    fn test_cursor_navigation() {
        let mut cursor = CalendarCursor::new(CalendarView::Month, day(2026, 1, 31));
        cursor.previous();
        assert_eq!(cursor.current, day(2025, 12, 1));
        cursor.next();
        cursor.next();
        assert_eq!(cursor.current, day(2026, 2, 1));

        cursor.view = CalendarView::Week;
        cursor.next();
        assert_eq!(cursor.current, day(2026, 2, 8));

        cursor.view = CalendarView::Day;
        cursor.previous();
        assert_eq!(cursor.current, day(2026, 2, 7));

        cursor.today(day(2026, 3, 3));
        assert_eq!(cursor.selected, Some(day(2026, 3, 3)));
    }
}
