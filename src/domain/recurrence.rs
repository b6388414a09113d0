//! Recurrence expansion: deciding whether a VisitTemplate occurs on a day.
//!
//! Scoped down from a general-purpose periodicity engine to just the rule
//! this domain needs: a weekday filter plus an every-N-weeks-from-an-anchor
//! interval check.

use chrono::{DateTime, Utc};

use crate::domain::time::{utc_day, weekday_of, whole_weeks_between};
use crate::domain::visit_template::{RecurrenceKind, VisitTemplate};

/// Whether `template` occurs on UTC day `day`, given the care receiver's
/// `created_at` as the fallback anchor when the template has none of its own.
pub fn recurs_on(template: &VisitTemplate, day: DateTime<Utc>, receiver_created_at: DateTime<Utc>) -> bool {
    let day = utc_day(day);
    let weekday = weekday_of(day);
    if !template.days_of_week().contains(&weekday) {
        return false;
    }

    if matches!(template.recurrence(), RecurrenceKind::Weekly) {
        return true;
    }

    let anchor = utc_day(template.recurrence_start_date().unwrap_or(receiver_created_at));
    if day < anchor {
        return false;
    }

    let weeks = whole_weeks_between(anchor.date_naive(), day.date_naive());
    let interval = template.recurrence_interval() as i64;
    weeks >= 0 && weeks % interval == 0
}
