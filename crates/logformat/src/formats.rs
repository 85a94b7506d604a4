//! Well-known log formats, ready to pass to [`parse`](crate::parse).

/// Common Log Format.
pub const COMMON: &str = "%h %l %u %t \"%r\" %>s %b";

/// Common Log Format prefixed with the virtual host.
pub const VHOST_COMMON: &str = "%v %h %l %u %t \"%r\" %>s %b";

/// NCSA extended/combined log format.
pub const NCSA_COMBINED: &str =
    "%h %l %u %t \"%r\" %>s %b \"%{Referer}i\" \"%{User-agent}i\"";

/// Referer log format.
pub const REFERER: &str = "%{Referer}i -> %U";

/// Agent (browser) log format.
pub const AGENT: &str = "%{User-agent}i";

/// Looks up a format by the nickname Apache configurations usually give it.
pub fn preset(nickname: &str) -> Option<&'static str> {
    match nickname {
        "common" => Some(COMMON),
        "vhost_common" => Some(VHOST_COMMON),
        "combined" => Some(NCSA_COMBINED),
        "referer" => Some(REFERER),
        "agent" => Some(AGENT),
        _ => None,
    }
}
