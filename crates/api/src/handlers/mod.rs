//! Request handlers.
//!
//! [`resource`] holds one generic set of CRUD actions (index, details,
//! create, edit, delete) instantiated for every resource type by the route
//! generator.

pub mod home;
pub mod resource;
