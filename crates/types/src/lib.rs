pub mod error;
pub mod geometry;
pub mod ids;
pub mod link;

pub use error::InvalidValue;
pub use geometry::{PageBox, PageSize, PlacementRect};
pub use ids::{GuestId, PersonalizationUrl, PublicDomain};
pub use link::{LinkAnnotation, LinkTarget};
