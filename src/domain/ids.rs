/// Type-safe identifier types for the domain layer

use std::fmt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($name:ident, $label:expr) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            pub fn value(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $label, self.0)
            }
        }
    };
}

uuid_id!(CareGiverId, "CareGiver");
uuid_id!(CareReceiverId, "CareReceiver");
uuid_id!(AppointmentId, "Appointment");
uuid_id!(AvailabilityVersionId, "AvailabilityVersion");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(CareGiverId::new(), CareGiverId::new());
    }

    #[test]
    fn id_display_includes_label() {
        let id = CareReceiverId::new();
        assert!(format!("{}", id).starts_with("CareReceiver("));
    }

    #[test]
    fn id_roundtrips_through_uuid() {
        let id = AppointmentId::new();
        let rebuilt = AppointmentId::from_uuid(id.value());
        assert_eq!(id, rebuilt);
    }
}
