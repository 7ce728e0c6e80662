//! CRUD over the `AIPrompts` collection. A stored prompt named after a
//! use case ("AI Research", "Cold Calls", "Question Based Email") replaces
//! the built-in template for the next upload.

pub mod handlers;
