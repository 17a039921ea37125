/// Configuration options for the eGadget API server.
///
/// The token secret is process configuration; it never enters computed
/// state or the database.
#[derive(Clone)]
pub struct ServerConfig {
    /// HMAC secret used to sign and verify session tokens.
    pub secret_key: String,
    /// Lifetime of issued tokens in seconds.
    pub token_ttl_secs: i64,
}
