/// MISP event model and builders
///
/// - `model.rs`: serde shapes of MISP events, attributes and tags
/// - `attribute.rs`: field map → ordered attribute list
/// - `event.rs`: label + tags + attributes → event

pub mod model;
pub mod attribute;
pub mod event;

pub use model::{MispAttribute, MispEvent, MispTag};
pub use attribute::{event_datetime, AttributeBuilder};
pub use event::EventAssembler;
