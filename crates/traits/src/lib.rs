pub mod resource;
pub mod store;

pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
pub use store::{
    FoodPreference, GuestRecord, InMemoryResponseStore, InMemoryRoster, ResponseRecord,
    ResponseStore, RosterStore, StoreError,
};
