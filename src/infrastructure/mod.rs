/// Infrastructure layer components

pub mod clock;
pub mod geocoding;
pub mod memory;
pub mod notify;
pub mod routing;

pub use clock::{Clock, SystemClock};
pub use geocoding::PinnedDefaultGeocodingService;
pub use memory::{
    InMemoryAppointmentRepository, InMemoryAvailabilityRepository, InMemoryCareGiverRepository,
    InMemoryCareReceiverRepository,
};
pub use notify::LoggingNotificationPublisher;
pub use routing::HttpRoutingService;
