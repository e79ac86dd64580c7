//! Business-name normalization and the reference registry of known
//! express-tunnel operators.

pub mod csv_source;
pub mod error;
pub mod normalize;
pub mod registry;

mod reference_list;

pub use csv_source::RegistryCache;
pub use error::NamesError;
pub use normalize::normalize;
pub use registry::ReferenceRegistry;
