use chrono::{Local, NaiveDate};
use std::sync::Arc;

use crate::domain::ports::Clock;
use crate::use_cases::dispatch::{IntentDispatcher, OverlayFeed};
use crate::use_cases::showcase::Showcase;

#[derive(Clone)]
pub struct AppState {
    // Calendar source for the past-date rule.
    pub clock: Arc<dyn Clock>,
    // Strategy chosen at startup: external redirect or in-page handler.
    pub dispatcher: IntentDispatcher,
    // Present only in overlay mode; in-page intents are streamed from here.
    pub overlay: Option<OverlayFeed>,
    // Featured destination and testimonial rotation for the landing page.
    pub showcase: Arc<Showcase>,
}

// System clock adapter; dates are taken in the server's local time zone.
#[derive(Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
