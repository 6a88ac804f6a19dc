//! Request authentication.

pub mod auth;

#[cfg(test)]
mod test;
