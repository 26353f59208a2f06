//! Catalog integration tests: conditional writes, compare-and-swap, cascades.

mod support;
mod cascade;
mod conditional;
mod concurrency;

#[cfg(feature = "http")]
mod http;
