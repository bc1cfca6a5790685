mod claims;
pub mod extractors;
pub mod jwt;

pub use claims::{Audience, Claims, UserMetadata};
pub use extractors::{identity_from_headers, AuthUser, Identity};
pub use jwt::JwtKeys;
