//! Async feeder adapters, behind the `tokio` feature.

mod asyncbufreader;

pub use asyncbufreader::AsyncBufReaderJsonFeeder;
