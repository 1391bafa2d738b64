//! Client-side checks for event drafts, run before create/update.

use std::fmt;

use chrono::NaiveDateTime;

use crate::events::types::NewEvent;

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Accepted local date-time layouts (`datetime-local` style).
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// A single problem with a draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// JSON name of the field (e.g., "startTime").
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

pub fn parse_local_date_time(value: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value.trim(), fmt).ok())
}

impl NewEvent {
    /// Check the draft, reporting every problem found.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut push = |field: &'static str, message: &'static str| {
            errors.push(FieldError { field, message })
        };

        if self.name.trim().is_empty() {
            push("name", "Event name is required");
        } else if self.name.chars().count() > MAX_NAME_CHARS {
            push("name", "Event name must be less than 100 characters");
        }

        if self.description.chars().count() > MAX_DESCRIPTION_CHARS {
            push("description", "Description must be less than 500 characters");
        }

        let start = check_time(&self.start_time, &START_TIME, &mut push);
        let end = check_time(&self.end_time, &END_TIME, &mut push);
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                push("endTime", "End time must not be before start time");
            }
        }

        if self.location.trim().is_empty() {
            push("location", "Location is required");
        }

        if self.capacity < 1 {
            push("capacity", "Capacity must be at least 1");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

struct TimeField {
    name: &'static str,
    required: &'static str,
    invalid: &'static str,
}

const START_TIME: TimeField = TimeField {
    name: "startTime",
    required: "Start time is required",
    invalid: "Start time must be a valid date-time",
};

const END_TIME: TimeField = TimeField {
    name: "endTime",
    required: "End time is required",
    invalid: "End time must be a valid date-time",
};

fn check_time(
    value: &str,
    field: &TimeField,
    push: &mut impl FnMut(&'static str, &'static str),
) -> Option<NaiveDateTime> {
    if value.trim().is_empty() {
        push(field.name, field.required);
        return None;
    }
    let parsed = parse_local_date_time(value);
    if parsed.is_none() {
        push(field.name, field.invalid);
    }
    parsed
}
