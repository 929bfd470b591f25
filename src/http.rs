use crate::config::DEFAULT_UPLOAD_TIMEOUT_SECS;
use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

/// Global shared HTTP client singleton.
///
/// One analysis endpoint, one upload in flight per session, so the pool is
/// kept small. The timeout matches the default upload timeout; callers with
/// a configured `upload_timeout` override it per-request via `.timeout()`.
static SHARED_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .pool_max_idle_per_host(1)
        .timeout(Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS))
        .build()
        .expect("Failed to create shared HTTP client")
});

/// Returns a reference to the global shared HTTP client.
pub fn shared_client() -> &'static Client {
    &SHARED_CLIENT
}
