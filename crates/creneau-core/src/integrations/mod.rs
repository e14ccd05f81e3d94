//! External HTTP collaborators behind provider traits.

pub mod directory;
pub mod mapbox;
pub mod traits;

pub use directory::PlaceDirectory;
pub use mapbox::MapboxClient;
pub use traits::{AddressSuggestion, GeocodingProvider, RoutingProvider};
