//! Token validation for the identity layer.
//!
//! Session issuance (login, refresh) lives outside this service; callers
//! arrive with an access token minted by the identity provider and this
//! module only validates it.

pub mod jwt;
