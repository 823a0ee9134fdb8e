//! Data models for the DarConnect console

pub mod dashboard;
pub mod driver;
pub mod enums;
pub mod history;
pub mod insurance;
pub mod patient;
pub mod schedule;
pub mod trip;
pub mod user;

// Re-export commonly used types
pub use driver::Driver;
pub use enums::{Period, Role, TripState};
pub use insurance::InsuranceProvider;
pub use patient::Patient;
pub use schedule::Schedule;
pub use trip::{RecurringTrip, TripOccurrence, WeekdaySet, WireTime};
pub use user::{Session, User};
