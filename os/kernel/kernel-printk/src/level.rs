//! # Log Levels
//!
//! Syslog-style severities. Raw levels outside `0..=7` are accepted
//! everywhere and rendered like [`Level::Info`].

use kernel_tty::{Color, ColorPair};

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

impl Level {
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            0 => Self::Emergency,
            1 => Self::Alert,
            2 => Self::Critical,
            3 => Self::Error,
            4 => Self::Warning,
            5 => Self::Notice,
            6 => Self::Info,
            7 => Self::Debug,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// Line prefix, trailing space included.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Emergency => "[EMERG] ",
            Self::Alert => "[ALERT] ",
            Self::Critical => "[CRIT] ",
            Self::Error => "[ERR] ",
            Self::Warning => "[WARN] ",
            Self::Notice => "[NOTICE] ",
            Self::Info => "[INFO] ",
            Self::Debug => "[DEBUG] ",
        }
    }

    #[must_use]
    pub const fn colors(self) -> ColorPair {
        let foreground = match self {
            Self::Emergency | Self::Alert | Self::Critical | Self::Error => Color::LightRed,
            Self::Warning => Color::Yellow,
            Self::Notice => Color::LightGreen,
            Self::Info => Color::LightGrey,
            Self::Debug => Color::LightCyan,
        };
        ColorPair::new(foreground, Color::Black)
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warning,
            log::Level::Info => Self::Info,
            log::Level::Debug | log::Level::Trace => Self::Debug,
        }
    }
}

/// Tag for a raw level; unknown levels use the INFO tag.
#[must_use]
pub const fn level_tag(raw: u32) -> &'static str {
    match Level::from_raw(raw) {
        Some(level) => level.tag(),
        None => Level::Info.tag(),
    }
}

/// Colors for a raw level; unknown levels use the INFO colors.
#[must_use]
pub const fn level_colors(raw: u32) -> ColorPair {
    match Level::from_raw(raw) {
        Some(level) => level.colors(),
        None => Level::Info.colors(),
    }
}

/// Split a leading `<N>` level marker off a format string.
///
/// `N` is one or more decimal digits; anything else leaves the string
/// untouched and returns `None`.
#[must_use]
pub fn split_level_prefix(fmt: &str) -> (Option<u32>, &str) {
    let bytes = fmt.as_bytes();
    if bytes.first() != Some(&b'<') {
        return (None, fmt);
    }

    let digits = bytes[1..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 || bytes.get(1 + digits) != Some(&b'>') {
        return (None, fmt);
    }

    let level = bytes[1..=digits].iter().fold(0u32, |acc, b| {
        acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
    });
    (Some(level), &fmt[digits + 2..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_follow_syslog_order() {
        assert_eq!(level_tag(0), "[EMERG] ");
        assert_eq!(level_tag(3), "[ERR] ");
        assert_eq!(level_tag(5), "[NOTICE] ");
        assert_eq!(level_tag(7), "[DEBUG] ");
    }

    #[test]
    fn unknown_levels_render_as_info() {
        assert_eq!(level_tag(8), "[INFO] ");
        assert_eq!(level_tag(u32::MAX), "[INFO] ");
        assert_eq!(level_colors(42), Level::Info.colors());
    }

    #[test]
    fn color_families() {
        for raw in 0..=3 {
            assert_eq!(level_colors(raw).foreground, Color::LightRed);
        }
        assert_eq!(level_colors(4).foreground, Color::Yellow);
        assert_eq!(level_colors(5).foreground, Color::LightGreen);
        assert_eq!(level_colors(6).foreground, Color::LightGrey);
        assert_eq!(level_colors(7).foreground, Color::LightCyan);
        assert_eq!(level_colors(7).background, Color::Black);
    }

    #[test]
    fn prefix_is_consumed() {
        assert_eq!(split_level_prefix("<3>disk failed"), (Some(3), "disk failed"));
        assert_eq!(split_level_prefix("<12>x"), (Some(12), "x"));
        assert_eq!(split_level_prefix("<7>"), (Some(7), ""));
    }

    #[test]
    fn malformed_prefix_is_kept() {
        assert_eq!(split_level_prefix("<>x"), (None, "<>x"));
        assert_eq!(split_level_prefix("<3x"), (None, "<3x"));
        assert_eq!(split_level_prefix("<a>x"), (None, "<a>x"));
        assert_eq!(split_level_prefix("x<3>"), (None, "x<3>"));
        assert_eq!(split_level_prefix(""), (None, ""));
    }

    #[test]
    fn huge_prefix_saturates() {
        assert_eq!(
            split_level_prefix("<99999999999999>x"),
            (Some(u32::MAX), "x")
        );
    }

    #[test]
    fn log_levels_map_to_syslog() {
        assert_eq!(Level::from(log::Level::Error), Level::Error);
        assert_eq!(Level::from(log::Level::Warn), Level::Warning);
        assert_eq!(Level::from(log::Level::Trace), Level::Debug);
    }
}
