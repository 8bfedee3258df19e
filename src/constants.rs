//! Application constants and configuration

pub const APP_NAME: &str = "Scholaria Books";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Remote table and its PostgREST mount point
pub const BOOKS_TABLE: &str = "books";
pub const REST_PATH: &str = "rest/v1";

/// Newest rows first, matching the created_at column on the remote table
pub const LIST_ORDER: &str = "created_at.desc";

/// Environment overrides, checked in order; the first non-empty value wins
pub const URL_ENV_VARS: &[&str] = &["SUPABASE_URL", "REACT_APP_SUPABASE_URL"];
pub const KEY_ENV_VARS: &[&str] = &[
    "SUPABASE_KEY",
    "SUPABASE_ANON_KEY",
    "REACT_APP_SUPABASE_ANON_KEY",
];

pub const CONNECT_TIMEOUT_SECS: u64 = 10;
