//! Domain logic - release versions and how tags map onto them

pub mod prerelease;
pub mod release_type;
pub mod tag;
pub mod version;

pub use prerelease::{AlphaMarker, DEFAULT_ALPHA_MARKER};
pub use release_type::ReleaseType;
pub use tag::TagParser;
pub use version::{Release, ReleaseMeta, ReleaseOrigin};
