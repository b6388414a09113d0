/// Port traits: the seams an infrastructure adapter implements.

pub mod appointment_repository;
pub mod availability_repository;
pub mod care_giver_repository;
pub mod care_receiver_repository;
pub mod geocoding_service;
pub mod notification_publisher;
pub mod routing_service;

pub use appointment_repository::AppointmentRepository;
pub use availability_repository::AvailabilityRepository;
pub use care_giver_repository::CareGiverRepository;
pub use care_receiver_repository::CareReceiverRepository;
pub use geocoding_service::GeocodingService;
pub use notification_publisher::{NotificationPublisher, RunSummary};
pub use routing_service::RoutingService;
