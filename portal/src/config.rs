/// Base URL of the REST API, set at build time with `PORTAL_API_URL`.
pub const API_URL: &str = match option_env!("PORTAL_API_URL") {
    Some(url) => url,
    None => "http://localhost:5000/api",
};

/// Marketing site linked from the header, set with `PORTAL_WEBSITE_URL`.
pub const WEBSITE_URL: &str = match option_env!("PORTAL_WEBSITE_URL") {
    Some(url) => url,
    None => "http://localhost:5180",
};

pub const NOTIFICATION_POLL_INTERVAL_MS: u32 = 60 * 1000;
pub const NOTIFICATION_POLL_MAX_INTERVAL_MS: u32 = 10 * 60 * 1000;
