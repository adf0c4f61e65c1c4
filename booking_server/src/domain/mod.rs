pub mod destination;
pub mod errors;
pub mod intent;
pub mod ports;

// Re-export the domain boundary types and ports.
pub use destination::{Destination, RoomType};
pub use errors::{BookingField, ValidationErrors};
pub use intent::{BookingIntent, FormValue, RawBookingForm};
pub use ports::{Clock, Dispatch, SearchHandler};
