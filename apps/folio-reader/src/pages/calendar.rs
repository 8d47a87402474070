//! Editorial calendar.

use chrono::{Datelike, Duration, NaiveDate, Utc};

use folio_core::domain::{CalendarCursor, CalendarEvent, CalendarView, group_by_date};

use crate::routes::Route;
use crate::state::AppState;

#[derive(Debug, Clone, Default)]
pub struct CalendarQuery {
    pub view: CalendarView,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    /// Periods to move from `date`; negative goes back.
    pub shift: i32,
}

pub async fn render(state: &AppState, query: &CalendarQuery) -> String {
    let today = Utc::now().date_naive();
    let mut cursor = CalendarCursor::new(query.view, today);
    match query.date {
        Some(date) => {
            cursor.current = date;
            cursor.select(date);
        }
        None => cursor.today(today),
    }
    for _ in 0..query.shift.unsigned_abs() {
        if query.shift < 0 {
            cursor.previous();
        } else {
            cursor.next();
        }
    }

    let events = state.catalog.calendar_events().await;
    let (from, to) = window(&cursor);
    let visible: Vec<CalendarEvent> = events
        .into_iter()
        .filter(|e| e.date >= from && e.date <= to)
        .collect();

    let mut out = format!("{}\n\n", heading(&cursor, from, to));
    if visible.is_empty() {
        out.push_str("No events scheduled.\n");
        return out;
    }

    for group in group_by_date(&visible) {
        out.push_str(&format!("{}\n", group.date));
        for event in &group.events {
            out.push_str(&format!("  {}\n", event_line(event)));
        }
    }
    out
}

/// First and last visible day. Weeks start on Sunday.
fn window(cursor: &CalendarCursor) -> (NaiveDate, NaiveDate) {
    let current = cursor.current;
    match cursor.view {
        CalendarView::Month => {
            let first = current.with_day(1).unwrap_or(current);
            let next_month = if first.month() == 12 {
                NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
            };
            let last = next_month.map(|d| d - Duration::days(1)).unwrap_or(current);
            (first, last)
        }
        CalendarView::Week => {
            let start =
                current - Duration::days(i64::from(current.weekday().num_days_from_sunday()));
            (start, start + Duration::days(6))
        }
        CalendarView::Day => (current, current),
    }
}

fn heading(cursor: &CalendarCursor, from: NaiveDate, to: NaiveDate) -> String {
    match cursor.view {
        CalendarView::Month => cursor.current.format("%B %Y").to_string(),
        CalendarView::Week => format!("{} - {}", from.format("%b %-d"), to.format("%b %-d, %Y")),
        CalendarView::Day => cursor.current.format("%A, %B %-d, %Y").to_string(),
    }
}

fn event_line(event: &CalendarEvent) -> String {
    let time = match event.start_time {
        Some(_) => {
            let (start, end) = event.span();
            format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
        }
        None => "All day".to_string(),
    };

    let mut line = format!("{time}  {}", event.title);
    if let Some(description) = &event.description {
        line.push_str(&format!(" - {description}"));
    }
    if let Some(blog_id) = &event.blog_id {
        line.push_str(&format!(" ({})", Route::Blog(blog_id.clone()).path()));
    }
    line
}
