/// In-memory port implementations, used by tests and the demo binary.

pub mod appointment_repository;
pub mod availability_repository;
pub mod care_giver_repository;
pub mod care_receiver_repository;

pub use appointment_repository::InMemoryAppointmentRepository;
pub use availability_repository::InMemoryAvailabilityRepository;
pub use care_giver_repository::InMemoryCareGiverRepository;
pub use care_receiver_repository::InMemoryCareReceiverRepository;
