use std::time::Duration;

pub const DEFAULT_ACCRUAL_SYSTEM_ADDRESS: &str = "http://127.0.0.1:8081";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct AccrualConfig {
    /// Base URL of the accrual service, e.g. `http://localhost:8081`.
    pub base_url: String,
    /// Upper bound on a single request, so that a hung call can't stall a caller forever.
    pub request_timeout: Duration,
}

impl Default for AccrualConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_ACCRUAL_SYSTEM_ADDRESS.to_string(), request_timeout: DEFAULT_REQUEST_TIMEOUT }
    }
}

impl AccrualConfig {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: normalize_base_url(base_url), ..Default::default() }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Adds a scheme when one is missing (the service address is often given as `host:port`) and drops trailing
/// slashes.
pub fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}
