//! User types - the roles a dashboard user can hold

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Role carried by the `userType` claim.
///
/// The set is open: the backend may introduce roles this client does not
/// know about, and those are kept verbatim in [`UserType::Other`]. An unknown
/// role never fails parsing, it only fails allow-list checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserType {
    Citizen,
    CityAuthority,
    Driver,
    WasteCollectionStaff,
    SensorManager,
    Other(String),
}

impl UserType {
    pub const KNOWN: [UserType; 5] = [
        UserType::Citizen,
        UserType::CityAuthority,
        UserType::Driver,
        UserType::WasteCollectionStaff,
        UserType::SensorManager,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            UserType::Citizen => "CITIZEN",
            UserType::CityAuthority => "CITY_AUTHORITY",
            UserType::Driver => "DRIVER",
            UserType::WasteCollectionStaff => "WASTE_COLLECTION_STAFF",
            UserType::SensorManager => "SENSOR_MANAGER",
            UserType::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, UserType::Other(_))
    }
}

impl From<&str> for UserType {
    fn from(value: &str) -> Self {
        match value {
            "CITIZEN" => UserType::Citizen,
            "CITY_AUTHORITY" => UserType::CityAuthority,
            "DRIVER" => UserType::Driver,
            "WASTE_COLLECTION_STAFF" => UserType::WasteCollectionStaff,
            "SENSOR_MANAGER" => UserType::SensorManager,
            other => UserType::Other(other.to_string()),
        }
    }
}

impl From<String> for UserType {
    fn from(value: String) -> Self {
        UserType::from(value.as_str())
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for UserType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(UserType::from(raw))
    }
}
