//! Serde codec writing [`Duration`] values as fractional minutes.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

use crate::{duration_as_minutes, duration_from_minutes};

pub(crate) fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration_as_minutes(*duration))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = f64::deserialize(deserializer)?;
    duration_from_minutes(minutes)
        .ok_or_else(|| D::Error::custom(format!("{minutes} is not a valid number of minutes")))
}
