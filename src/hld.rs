//! Sizing of the trailing edge high lift devices. The `model` evaluates the lift increment a
//! candidate flap configuration requires and delivers, using empirical design charts expressed as
//! closed forms in `empirical`, and the `search` drives the model through candidate hinge
//! locations to find the smallest flap that meets the target maximum lift coefficient.

pub mod empirical;
mod flap_type;
mod model;
mod search;

pub use self::flap_type::FlapType;
pub use self::model::{HldGeometry, HldInputs};
pub use self::search::{FlapRequirement, HingeSearch, HingeSearchResult};
