//! Line classification for plain-text chat exports.
//!
//! Every physical line of an export is one of:
//!
//! - a system notification (group created, member left, encryption notice, ...)
//! - a message header: `date, time - Sender: body`
//! - a continuation of the previous message's body
//! - noise that cannot be attributed to any message
//!
//! Supported header shapes:
//! - Android: `1/2/23, 9:00 AM - Alice: hello`
//! - Android, no time: `02/01/2023 - Alice: hello`
//! - EU dash: `15.01.24, 20:40 – Alice: hello` (en-dash)
//! - iOS bracketed: `[1/15/24, 10:30:45 AM] Alice: hello`

use std::sync::LazyLock;

use regex::{Regex, RegexSet, RegexSetBuilder};

/// Numeric date token: `1/2/23`, `15.01.2024`, `2023-01-02`.
const DATE_TOKEN: &str = r"\d{1,4}[-/.]\d{1,2}[-/.]\d{1,4}";

/// Clock token with optional seconds and AM/PM marker.
const TIME_TOKEN: &str = r"\d{1,2}:\d{2}(?::\d{2})?(?:\s*[AaPp][Mm])?";

/// `date, time - Sender: body`, separator is a hyphen or an en-dash.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<date>{DATE_TOKEN}),?\s*(?P<time>{TIME_TOKEN})?\s*[-–]\s(?P<sender>.+?):\s?(?P<body>.*)$"
    ))
    .expect("header regex is valid")
});

/// `[date, time] Sender: body`
static BRACKETED_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\[(?P<date>{DATE_TOKEN}),?\s*(?P<time>{TIME_TOKEN})?\]\s*(?P<sender>.+?):\s?(?P<body>.*)$"
    ))
    .expect("bracketed header regex is valid")
});

/// Header prefix up to and including the separator: `date, time - ` or `[date, time] `.
static HEADER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:{DATE_TOKEN},?\s*(?:{TIME_TOKEN})?\s*[-–]\s|\[{DATE_TOKEN},?\s*(?:{TIME_TOKEN})?\]\s*)\S"
    ))
    .expect("header prefix regex is valid")
});

/// Phrases that mark group-management, call and encryption notices.
///
/// Matched case-insensitively anywhere in the line. Call notices must end
/// the line, and a missed call must also open the body.
pub const SYSTEM_PATTERNS: &[&str] = &[
    r"messages to this group are now secured with end-to-end encryption",
    r"messages and calls are end-to-end encrypted",
    r"created group",
    r"changed this group's",
    r"changed the subject (?:to|from)",
    r"changed the group (?:description|icon)",
    r"left the group",
    r"added .*to the group",
    r"removed .*from the group",
    r"joined using this group's invite link",
    r"(?:is|you're) now an admin",
    r"security code (?:with .*)?changed",
    r"changed (?:their|your) phone number",
    r"turned (?:on|off) disappearing messages",
    r"deleted this message",
    r"this message was deleted",
    r"started a (?:video |voice )?call\.?$",
    r"ended the call\.?$",
    r"(?:^|[-–:\]]\s)missed (?:video |voice )?call\.?$",
];

static SYSTEM_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSetBuilder::new(SYSTEM_PATTERNS)
        .case_insensitive(true)
        .build()
        .expect("system patterns are valid")
});

/// Result of classifying one line.
///
/// Borrowed slices point into the classified line; nothing is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Group-management or encryption notice; never becomes a message.
    SystemNotification,
    /// Start of a new message.
    MessageHeader {
        date: &'a str,
        time: Option<&'a str>,
        sender: &'a str,
        body: &'a str,
    },
    /// Extra body text for the message in progress.
    Continuation { text: &'a str },
    /// Empty or whitespace-only line.
    Blank,
    /// Neither a header nor attributable to any message.
    Unmatched,
}

impl LineKind<'_> {
    /// Returns `true` for [`LineKind::MessageHeader`].
    pub fn is_header(&self) -> bool {
        matches!(self, LineKind::MessageHeader { .. })
    }
}

/// Returns `true` if the line is a group-management, call or encryption notice.
///
/// A line is a notice when it contains one of [`SYSTEM_PATTERNS`], or when it
/// has the full header prefix, separator included, but no `Sender:` segment
/// (`1/2/23, 9:00 AM - Bob left`).
///
/// # Example
///
/// ```rust
/// use chatstat::parsing::is_system_notification;
///
/// assert!(is_system_notification("1/2/23, 9:00 AM - Bob left the group"));
/// assert!(is_system_notification("1/2/23, 9:00 AM - Bob left"));
/// assert!(!is_system_notification("1/2/23, 9:00 AM - Bob: see you tomorrow"));
/// assert!(!is_system_notification("2023-01-05 kickoff"));
/// ```
pub fn is_system_notification(line: &str) -> bool {
    SYSTEM_SET.is_match(line)
        || (HEADER_PREFIX_RE.is_match(line) && match_header(line).is_none())
}

/// Extracts header fields, or `None` if the line is not a message header.
///
/// The sender is captured non-greedily up to the first colon after the
/// separator and trimmed; an empty sender disqualifies the line.
pub fn match_header(line: &str) -> Option<LineKind<'_>> {
    let caps = HEADER_RE
        .captures(line)
        .or_else(|| BRACKETED_HEADER_RE.captures(line))?;

    let sender = caps.name("sender")?.as_str().trim();
    if sender.is_empty() {
        return None;
    }

    Some(LineKind::MessageHeader {
        date: caps.name("date")?.as_str(),
        time: caps.name("time").map(|m| m.as_str()),
        sender,
        body: caps.name("body").map_or("", |m| m.as_str()),
    })
}

/// Classifies one line, given whether a message is currently in progress.
///
/// With `skip_system` disabled, notices are not recognised and fall through to
/// header or continuation handling like any other line.
///
/// # Example
///
/// ```rust
/// use chatstat::parsing::{LineKind, classify_line};
///
/// let kind = classify_line("1/2/23, 9:00 AM - Alice: hello", false, true);
/// assert_eq!(
///     kind,
///     LineKind::MessageHeader { date: "1/2/23", time: Some("9:00 AM"), sender: "Alice", body: "hello" }
/// );
///
/// assert_eq!(classify_line("second line", true, true), LineKind::Continuation { text: "second line" });
/// assert_eq!(classify_line("second line", false, true), LineKind::Unmatched);
/// ```
pub fn classify_line(line: &str, in_progress: bool, skip_system: bool) -> LineKind<'_> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    if skip_system && SYSTEM_SET.is_match(line) {
        return LineKind::SystemNotification;
    }

    if let Some(header) = match_header(line) {
        return header;
    }

    if skip_system && HEADER_PREFIX_RE.is_match(line) {
        return LineKind::SystemNotification;
    }

    if in_progress {
        LineKind::Continuation { text: line }
    } else {
        LineKind::Unmatched
    }
}
