// In-memory library state shared by the HTTP handlers.

pub mod library;
