//! Department domain model.
//!
//! # Responsibility
//! - Represent one organizational unit row in memory.
//! - Keep name/location non-blank through every constructor and setter.
//!
//! # Invariants
//! - `id` is `Some` exactly while the record is persisted; deletion resets
//!   it to `None`.

use super::{require_non_blank, ValidationError};
use serde::Serialize;

/// One organizational unit. Fields are private so the non-blank invariant
/// cannot be bypassed after construction.
///
/// `Deserialize` is deliberately not derived: it would sidestep setter
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    id: Option<i64>,
    name: String,
    location: String,
}

impl Department {
    /// Creates an unpersisted department after validating both fields.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let location = location.into();
        require_non_blank(&name, ValidationError::EmptyName)?;
        require_non_blank(&location, ValidationError::EmptyLocation)?;
        Ok(Self {
            id: None,
            name,
            location,
        })
    }

    /// Storage-assigned row id; `None` while unpersisted.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        require_non_blank(&name, ValidationError::EmptyName)?;
        self.name = name;
        Ok(())
    }

    pub fn set_location(&mut self, location: impl Into<String>) -> Result<(), ValidationError> {
        let location = location.into();
        require_non_blank(&location, ValidationError::EmptyLocation)?;
        self.location = location;
        Ok(())
    }

    pub(crate) fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }
}
