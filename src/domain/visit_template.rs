//! VisitTemplate: the recurring-visit definition embedded in a CareReceiver.

use std::collections::HashSet;
use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::skill::SkillSet;
use crate::domain::time::ClockTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceKind {
    Weekly,
    Biweekly,
    Monthly,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitTemplateError {
    InvalidDuration { minutes: u32 },
    InvalidPriority { priority: u8 },
    InvalidRecurrenceInterval { weeks: u8 },
}

impl std::fmt::Display for VisitTemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisitTemplateError::InvalidDuration { minutes } => {
                write!(f, "visit duration {} minutes must be between 15 and 240", minutes)
            }
            VisitTemplateError::InvalidPriority { priority } => {
                write!(f, "visit priority {} must be between 1 and 5", priority)
            }
            VisitTemplateError::InvalidRecurrenceInterval { weeks } => {
                write!(f, "recurrence interval {} weeks must be between 1 and 52", weeks)
            }
        }
    }
}

impl std::error::Error for VisitTemplateError {}

/// Note: this entity does not carry a persistence id of its own. It is
/// addressed within its owning `CareReceiver` by `visit_number`, which the
/// receiver enforces as a gap-free 1..=k sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitTemplate {
    visit_number: u32,
    preferred_time: ClockTime,
    duration_minutes: u32,
    requirements: SkillSet,
    double_handed: bool,
    priority: u8,
    days_of_week: HashSet<Weekday>,
    recurrence: RecurrenceKind,
    recurrence_interval: u8,
    recurrence_start_date: Option<DateTime<Utc>>,
}

impl VisitTemplate {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        visit_number: u32,
        preferred_time: ClockTime,
        duration_minutes: u32,
        requirements: SkillSet,
        double_handed: bool,
        priority: u8,
        days_of_week: HashSet<Weekday>,
        recurrence: RecurrenceKind,
        recurrence_interval: u8,
        recurrence_start_date: Option<DateTime<Utc>>,
    ) -> Result<Self, VisitTemplateError> {
        if !(15..=240).contains(&duration_minutes) {
            return Err(VisitTemplateError::InvalidDuration { minutes: duration_minutes });
        }
        if !(1..=5).contains(&priority) {
            return Err(VisitTemplateError::InvalidPriority { priority });
        }
        if !(1..=52).contains(&recurrence_interval) {
            return Err(VisitTemplateError::InvalidRecurrenceInterval { weeks: recurrence_interval });
        }
        let days_of_week = if days_of_week.is_empty() {
            all_weekdays()
        } else {
            days_of_week
        };

        Ok(Self {
            visit_number,
            preferred_time,
            duration_minutes,
            requirements,
            double_handed,
            priority,
            days_of_week,
            recurrence,
            recurrence_interval,
            recurrence_start_date,
        })
    }

    pub fn visit_number(&self) -> u32 {
        self.visit_number
    }

    pub fn preferred_time(&self) -> ClockTime {
        self.preferred_time
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn requirements(&self) -> &SkillSet {
        &self.requirements
    }

    pub fn double_handed(&self) -> bool {
        self.double_handed
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn days_of_week(&self) -> &HashSet<Weekday> {
        &self.days_of_week
    }

    pub fn recurrence(&self) -> RecurrenceKind {
        self.recurrence
    }

    pub fn recurrence_interval(&self) -> u8 {
        self.recurrence_interval
    }

    pub fn recurrence_start_date(&self) -> Option<DateTime<Utc>> {
        self.recurrence_start_date
    }

    pub(crate) fn set_visit_number(&mut self, visit_number: u32) {
        self.visit_number = visit_number;
    }
}

fn all_weekdays() -> HashSet<Weekday> {
    use Weekday::*;
    [Mon, Tue, Wed, Thu, Fri, Sat, Sun].into_iter().collect()
}
