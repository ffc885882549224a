//! Integration tests exercising the HTTP API over in-process backends.

mod helpers;

mod file_test;
mod health_test;
