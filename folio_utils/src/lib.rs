pub use folio_utils_derive::trace_instrument;

mod macros;

/// Returns the version string of the workspace, as reported by the CLI and
/// the HTTP user agent.
pub const fn folio_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
