//! Expected answers and how typed input is compared against them.

use regex::Regex;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::OnceLock;

/// Text comparison strategy. Comparisons ignore case and collapse whitespace.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AnswerCheck {
    Exact(String),
    Contains(String),
    StartsWith(String),
}

impl AnswerCheck {
    pub fn is_satisfied_by(&self, input: &str) -> bool {
        let input = normalize(input);
        if input.is_empty() {
            return false;
        }
        match self {
            AnswerCheck::Exact(expected) => input == normalize(expected),
            AnswerCheck::Contains(expected) => input.contains(&normalize(expected)),
            AnswerCheck::StartsWith(expected) => input.starts_with(&normalize(expected)),
        }
    }

    pub fn expected(&self) -> &str {
        match self {
            AnswerCheck::Exact(s) | AnswerCheck::Contains(s) | AnswerCheck::StartsWith(s) => s,
        }
    }
}

/// What a prompt step expects back.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Answer {
    /// A dotted-quad address or mask.
    Address(Ipv4Addr),
    /// A prefix length, typed as `24` or `/24`.
    PrefixLen(u8),
    Number(u32),
    Text(AnswerCheck),
}

impl Answer {
    pub fn accepts(&self, input: &str) -> bool {
        match self {
            Answer::Address(expected) => parse_address(input) == Some(*expected),
            Answer::PrefixLen(expected) => parse_prefix_len(input) == Some(*expected),
            Answer::Number(expected) => input.trim().parse::<u32>().ok() == Some(*expected),
            Answer::Text(check) => check.is_satisfied_by(input),
        }
    }

    /// Whether `input` is even shaped like this kind of answer.
    pub fn is_well_formed(&self, input: &str) -> bool {
        match self {
            Answer::Address(_) => parse_address(input).is_some(),
            Answer::PrefixLen(_) => parse_prefix_len(input).is_some(),
            Answer::Number(_) => input.trim().parse::<u32>().is_ok(),
            Answer::Text(_) => !input.trim().is_empty(),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Address(ip) => write!(f, "{}", ip),
            Answer::PrefixLen(len) => write!(f, "/{}", len),
            Answer::Number(n) => write!(f, "{}", n),
            Answer::Text(check) => write!(f, "{}", check.expected()),
        }
    }
}

fn prefix_len_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^/?\s*(\d{1,2})$").unwrap())
}

/// Parse `24`, `/24` or `/ 24`. Anything above 32 is rejected.
pub fn parse_prefix_len(input: &str) -> Option<u8> {
    let caps = prefix_len_re().captures(input.trim())?;
    let len = caps[1].parse::<u8>().ok()?;
    (len <= 32).then_some(len)
}

/// Parse a dotted-quad, tolerating surrounding whitespace.
pub fn parse_address(input: &str) -> Option<Ipv4Addr> {
    Ipv4Addr::from_str(input.trim()).ok()
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_ignores_case_and_spacing() {
        let check = AnswerCheck::Exact("802.1Q".to_string());
        assert!(check.is_satisfied_by("802.1q"));
        assert!(check.is_satisfied_by("  802.1Q  "));
        assert!(!check.is_satisfied_by("802.1"));
        assert!(!check.is_satisfied_by(""));
    }

    #[test]
    fn test_contains_and_starts_with() {
        let contains = AnswerCheck::Contains("spanning tree".to_string());
        assert!(contains.is_satisfied_by("Rapid  Spanning Tree"));
        assert!(!contains.is_satisfied_by("spanning"));

        let prefix = AnswerCheck::StartsWith("wi-fi 6".to_string());
        assert!(prefix.is_satisfied_by("Wi-Fi 6E"));
        assert!(!prefix.is_satisfied_by("Wi-Fi 5"));
    }

    #[test]
    fn test_empty_input_never_matches() {
        assert!(!AnswerCheck::Contains(String::new()).is_satisfied_by("   "));
    }

    #[test]
    fn test_parse_prefix_len() {
        assert_eq!(parse_prefix_len("24"), Some(24));
        assert_eq!(parse_prefix_len("/24"), Some(24));
        assert_eq!(parse_prefix_len(" / 8 "), Some(8));
        assert_eq!(parse_prefix_len("0"), Some(0));
        assert_eq!(parse_prefix_len("33"), None);
        assert_eq!(parse_prefix_len("255.255.255.0"), None);
        assert_eq!(parse_prefix_len("abc"), None);
    }

    #[test]
    fn test_answer_accepts() {
        let network = Answer::Address(Ipv4Addr::new(192, 168, 32, 0));
        assert!(network.accepts("192.168.32.0"));
        assert!(network.accepts(" 192.168.32.0\n"));
        assert!(!network.accepts("192.168.32.1"));
        assert!(!network.accepts("192.168.32"));

        assert!(Answer::PrefixLen(20).accepts("/20"));
        assert!(Answer::Number(16).accepts("16"));
        assert!(!Answer::Number(16).accepts("sixteen"));
    }

    #[test]
    fn test_answer_well_formed() {
        assert!(Answer::Address(Ipv4Addr::LOCALHOST).is_well_formed("10.0.0.1"));
        assert!(!Answer::Address(Ipv4Addr::LOCALHOST).is_well_formed("10.0.0"));
        assert!(!Answer::Number(3).is_well_formed("x"));
    }

    #[test]
    fn test_answer_display() {
        assert_eq!(Answer::PrefixLen(26).to_string(), "/26");
        assert_eq!(Answer::Address(Ipv4Addr::new(255, 255, 255, 192)).to_string(), "255.255.255.192");
        assert_eq!(Answer::Text(AnswerCheck::Exact("eth0".into())).to_string(), "eth0");
    }
}
