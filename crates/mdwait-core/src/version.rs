//! Product identifier used for the default `User-Agent` header.

/// Product name sent in the default `User-Agent`.
pub const PRODUCT: &str = "Mdwait";

/// Crate version, fixed at build time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version string as reported by `mdwait --version` and the user agent.
pub fn version_string() -> &'static str {
    VERSION
}

/// Default `User-Agent` value, e.g. `Mdwait/0.1.0`.
pub fn user_agent() -> String {
    format!("{}/{}", PRODUCT, version_string())
}
