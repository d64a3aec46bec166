//! CLI configuration

/// Connection settings shared by every command.
pub struct Config {
    /// Team Services account URL
    pub account: String,
    /// Personal access token, raw (not yet encoded)
    pub pat: String,
}
