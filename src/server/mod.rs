// HTTP surface of the library service.

pub mod handler;
