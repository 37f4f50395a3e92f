//! Wire-level constants shared by every command.

/// Header sent with every request so the server treats it as an XHR call.
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";
pub const CSRF_HEADER: &str = "X-CSRF-Token";

pub const HTTP_OK: u16 = 200;
pub const HTTP_CREATED: u16 = 201;
pub const HTTP_NOT_FOUND: u16 = 404;

pub const API_PREFIX: &str = "/api/v4";

pub const AUTH_TOKEN_COOKIE: &str = "MMAUTHTOKEN";
pub const USER_ID_COOKIE: &str = "MMUSERID";
pub const CSRF_COOKIE: &str = "MMCSRF";

/// Cookies removed by name on logout before the rest of the jar is cleared.
pub const SESSION_COOKIES: [&str; 3] = [AUTH_TOKEN_COOKIE, USER_ID_COOKIE, CSRF_COOKIE];

/// Upper bound (exclusive) of the numeric suffix appended to channel and team names.
pub const RANDOM_SUFFIX_MAX: u32 = 9999;

pub const DEFAULT_PASSWORD: &str = "password123";
pub const DEFAULT_EMAIL_DOMAIN: &str = "sample.mattermost.com";

pub const TUTORIAL_STEP_CATEGORY: &str = "tutorial_step";
/// Tutorial step value that marks onboarding as finished.
pub const TUTORIAL_COMPLETE_VALUE: &str = "999";

pub const GUEST_TEAM_NAME: &str = "guest-team";
pub const GUEST_TEAM_DISPLAY_NAME: &str = "Guest Team";
