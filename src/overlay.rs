//! Text shown over the preloader once the figure has formed.

use chrono::{DateTime, Local, TimeZone, Timelike};

pub const TITLE: &str = "NEXUS";
pub const SUBTITLE: &str = "INITIALIZING EXPERIENCE...";
/// Subtitle for the reduced-motion variant.
pub const SUBTITLE_STILL: &str = "INITIALIZING...";

/// Time-of-day greeting for an hour in 0..24.
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good Morning",
        12..=16 => "Good Afternoon",
        _ => "Good Evening",
    }
}

/// Hour of the day on the clock of `time`'s zone.
pub fn hour_at<Tz: TimeZone>(time: &DateTime<Tz>) -> u32 {
    time.hour()
}

/// Current hour of the day on the local clock.
pub fn current_hour() -> u32 {
    hour_at(&Local::now())
}

/// The three overlay lines, fixed at activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub greeting: String,
    pub title: &'static str,
    pub subtitle: &'static str,
}

impl Overlay {
    pub fn new(hour: u32, reduced_motion: bool) -> Self {
        Self {
            greeting: format!("{}, Visitor", greeting(hour)),
            title: TITLE,
            subtitle: if reduced_motion { SUBTITLE_STILL } else { SUBTITLE },
        }
    }
}
