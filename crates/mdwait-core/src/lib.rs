pub mod config;
pub mod logging;

pub mod clock;
pub mod fetch;
pub mod poll;
pub mod transport;
pub mod url_clean;
pub mod version;

#[cfg(test)]
mod testutil;
