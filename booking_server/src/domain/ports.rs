use chrono::NaiveDate;
use std::sync::Arc;
use url::Url;

use crate::domain::intent::BookingIntent;

// Port for the current calendar date used by the validator.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

// What the environment should do after a search was handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    // Open the external reservation system at this address in a new context.
    Navigate(Url),
    // The embedding page took over; nothing left to open.
    Handled,
}

// Strategy invoked with every validated intent. Handlers run synchronously
// and have no error channel.
pub trait SearchHandler: Send + Sync {
    fn handle(&self, intent: &BookingIntent) -> Dispatch;
}
