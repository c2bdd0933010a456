//! Guest roster and RSVP response stores.
//!
//! The invitation pipeline only reads the roster; responses are written by
//! whatever front end collects them. Both are consumed through these traits so
//! the storage backend stays outside the core.

use rsvpress_types::GuestId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,

    #[error("failed to parse roster: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Parse(err.to_string())
    }
}

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    /// Name of the party the invitation is addressed to.
    pub display_name: String,
    /// Phone number or other contact handle.
    #[serde(default)]
    pub contact: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodPreference {
    Vegetarian,
    #[serde(rename = "Non-Vegetarian")]
    NonVegetarian,
}

/// What a guest submitted through the RSVP form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub name: String,
    pub contact: String,
    pub additional_guests: u32,
    pub food_preference: FoodPreference,
    pub wants_to_speak: bool,
    pub group_activities: bool,
}

pub trait RosterStore: Send + Sync + Debug {
    fn lookup(&self, guest: &GuestId) -> Result<Option<GuestRecord>, StoreError>;
}

pub trait ResponseStore: Send + Sync + Debug {
    fn get_response(&self, guest: &GuestId) -> Result<Option<ResponseRecord>, StoreError>;

    fn put_response(&self, guest: &GuestId, record: ResponseRecord) -> Result<(), StoreError>;

    /// Atomically read, modify and write one guest's response.
    ///
    /// `f` receives the current record (if any) and returns the new one;
    /// returning `None` deletes the record. The updated value is returned.
    fn update_response(
        &self,
        guest: &GuestId,
        f: &mut dyn FnMut(Option<ResponseRecord>) -> Option<ResponseRecord>,
    ) -> Result<Option<ResponseRecord>, StoreError>;
}

/// Read-only roster held in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRoster {
    guests: HashMap<GuestId, GuestRecord>,
}

impl InMemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guest(mut self, guest: GuestId, record: GuestRecord) -> Self {
        self.guests.insert(guest, record);
        self
    }

    /// Parses a JSON object mapping guest ids to records, e.g.
    /// `{"g42": {"display_name": "The Smiths", "contact": "+1 555 0100"}}`.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let guests: HashMap<GuestId, GuestRecord> = serde_json::from_str(json)?;
        log::debug!("Loaded roster with {} guests", guests.len());
        Ok(Self { guests })
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }
}

impl RosterStore for InMemoryRoster {
    fn lookup(&self, guest: &GuestId) -> Result<Option<GuestRecord>, StoreError> {
        Ok(self.guests.get(guest).cloned())
    }
}

/// Response map guarded by a single lock, so concurrent updates to the same
/// guest never lose writes.
#[derive(Debug, Default)]
pub struct InMemoryResponseStore {
    responses: RwLock<HashMap<GuestId, ResponseRecord>>,
}

impl InMemoryResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.responses.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResponseStore for InMemoryResponseStore {
    fn get_response(&self, guest: &GuestId) -> Result<Option<ResponseRecord>, StoreError> {
        let responses = self.responses.read().map_err(|_| StoreError::Poisoned)?;
        Ok(responses.get(guest).cloned())
    }

    fn put_response(&self, guest: &GuestId, record: ResponseRecord) -> Result<(), StoreError> {
        let mut responses = self.responses.write().map_err(|_| StoreError::Poisoned)?;
        responses.insert(guest.clone(), record);
        Ok(())
    }

    fn update_response(
        &self,
        guest: &GuestId,
        f: &mut dyn FnMut(Option<ResponseRecord>) -> Option<ResponseRecord>,
    ) -> Result<Option<ResponseRecord>, StoreError> {
        let mut responses = self.responses.write().map_err(|_| StoreError::Poisoned)?;
        let current = responses.remove(guest);
        let updated = f(current);
        if let Some(record) = &updated {
            responses.insert(guest.clone(), record.clone());
        }
        Ok(updated)
    }
}
