//! Administrative services.
//!
//! Holds the one-time bootstrap code that lets the first registration on a fresh
//! installation claim the admin role.

pub mod code;
