use crate::application::app_error::AppError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

pub struct Id<T> {
    pub value: Uuid,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: Uuid) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Time-ordered id, used for persisted entities.
    pub fn generate() -> Id<T> {
        Id::new(Uuid::now_v7())
    }

    /// Fully random id, used where the value must not be guessable.
    pub fn random() -> Id<T> {
        Id::new(Uuid::new_v4())
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Id::new(self.value)
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Id::from_str(&value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(value).map_err(|e| AppError::InvalidId(format!("Invalid UUID: {}", e)))?;
        Ok(Id::new(uuid))
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Id::new)
    }
}
