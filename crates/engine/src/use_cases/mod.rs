//! Use cases - User story orchestration.
//!
//! Use cases drive the domain algorithms on behalf of the editor and own
//! the state the domain layer keeps immutable.

pub mod form_session;
