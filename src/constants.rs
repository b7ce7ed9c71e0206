// Storage keys, wire header names and timings - single source of truth.

/// localStorage key holding the serialized `AuthResponse`.
pub const TOKEN_STORAGE_KEY: &str = "token";
/// localStorage key holding `"true"`/`"false"` for the dark-mode preference.
pub const DARK_STORAGE_KEY: &str = "dark";

/// Response header carrying a rotated bearer token.
pub const REFRESH_TOKEN_HEADER: &str = "Refresh-Token";
/// Response header carrying the rotated token's expiry timestamp.
pub const REFRESH_TOKEN_EXPIRED_HEADER: &str = "Refresh-Token-Expired";

/// Default auto-dismiss delay for presentations (toasts).
pub const DEFAULT_FADE_OUT_MS: u32 = 5_000;
/// Grace delay between marking a dialog `out` and purging it, so the exit
/// animation can finish.
pub const DIALOG_PURGE_DELAY_MS: u32 = 225;

pub const LOGIN_ROUTE: &str = "/login";
