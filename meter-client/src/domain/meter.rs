use std::fmt;

/// One of the two fixed household meters. Stored as SMALLINT; every other
/// id is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[repr(i16)]
pub enum MeterId {
    Home = 1,
    Ac = 2,
}

#[derive(Debug, thiserror::Error)]
#[error("meter_id must be 1 or 2, got {0}")]
pub struct InvalidMeterId(pub i64);

impl MeterId {
    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i64> for MeterId {
    type Error = InvalidMeterId;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Home),
            2 => Ok(Self::Ac),
            other => Err(InvalidMeterId(other)),
        }
    }
}

impl fmt::Display for MeterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i16())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MeterId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i16(self.as_i16())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MeterId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        MeterId::try_from(raw).map_err(serde::de::Error::custom)
    }
}
