use netdrill_core::Answer;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

pub const BASE_POINTS: u32 = 100;
pub const MAX_TIME_BONUS: u32 = 50;
pub const HINT_PENALTY: u32 = 50;
/// Every this many correct answers in a row raises the multiplier.
pub const STREAK_STEP: u32 = 5;
pub const STREAK_MULTIPLIER: f64 = 1.5;

const FULL_BONUS_SECS: f64 = 5.0;
const NO_BONUS_SECS: f64 = 20.0;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Difficulty {
    Casual,
    #[default]
    Standard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Casual, Difficulty::Standard, Difficulty::Expert];

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Casual => "casual",
            Difficulty::Standard => "standard",
            Difficulty::Expert => "expert",
        }
    }

    /// How long one prompt may take before the answer counts as too slow.
    pub fn step_time_limit(&self) -> Duration {
        match self {
            Difficulty::Casual => Duration::from_secs(10),
            Difficulty::Standard => Duration::from_secs(7),
            Difficulty::Expert => Duration::from_secs(5),
        }
    }

    /// Prefix lengths questions are drawn from.
    pub fn prefix_range(&self) -> RangeInclusive<u8> {
        match self {
            Difficulty::Casual => 16..=28,
            Difficulty::Standard => 12..=28,
            Difficulty::Expert => 8..=30,
        }
    }

    /// Size of a generated routing table, default route included.
    pub fn route_count(&self) -> RangeInclusive<usize> {
        match self {
            Difficulty::Casual => 4..=5,
            Difficulty::Standard => 6..=7,
            Difficulty::Expert => 8..=10,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "casual" => Ok(Difficulty::Casual),
            "2" | "standard" => Ok(Difficulty::Standard),
            "3" | "expert" => Ok(Difficulty::Expert),
            other => Err(format!(
                "Unknown difficulty '{}'. Expected one of: casual, standard, expert",
                other
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Mode {
    /// A fixed number of questions.
    #[default]
    Classic,
    /// As many questions as fit on the clock.
    Speedrun,
    /// Until the first miss.
    Streak,
    /// Unscored walk-through with hints up front.
    Practice,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Classic, Mode::Speedrun, Mode::Streak, Mode::Practice];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::Speedrun => "speedrun",
            Mode::Streak => "streak",
            Mode::Practice => "practice",
        }
    }

    pub fn is_scored(&self) -> bool {
        !matches!(self, Mode::Practice)
    }

    /// Speedrun runs on one global clock instead of per-prompt limits.
    pub fn enforces_step_limit(&self) -> bool {
        matches!(self, Mode::Classic | Mode::Streak)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(Mode::Classic),
            "speedrun" => Ok(Mode::Speedrun),
            "streak" => Ok(Mode::Streak),
            "practice" | "learn" => Ok(Mode::Practice),
            other => Err(format!(
                "Unknown mode '{}'. Expected one of: classic, speedrun, streak, practice",
                other
            )),
        }
    }
}

/// One prompt and the answer it expects.
#[derive(Clone, Debug)]
pub struct Step {
    pub prompt: String,
    pub answer: Answer,
    pub misses: Vec<Miss>,
}

impl Step {
    /// Reason text for a known wrong answer, if one was prepared.
    pub fn diagnose(&self, input: &str) -> Option<&str> {
        self.misses
            .iter()
            .find(|m| m.answer.accepts(input))
            .map(|m| m.reason.as_str())
    }
}

/// Feedback for a specific wrong answer.
#[derive(Clone, Debug)]
pub struct Miss {
    pub answer: Answer,
    pub reason: String,
}

/// A generated question: context lines, one or more prompts, and feedback.
#[derive(Clone, Debug, Default)]
pub struct Question {
    pub intro: Vec<String>,
    pub steps: Vec<Step>,
    pub hint: String,
    pub explanation: String,
}

impl Question {
    pub fn new(intro: impl Into<String>) -> Self {
        Self {
            intro: vec![intro.into()],
            ..Self::default()
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.intro.push(line.into());
        self
    }

    pub fn step(mut self, prompt: impl Into<String>, answer: Answer) -> Self {
        self.steps.push(Step {
            prompt: prompt.into(),
            answer,
            misses: Vec::new(),
        });
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    pub fn explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Attach feedback for a likely wrong answer to the most recent step.
    pub fn miss(mut self, answer: Answer, reason: impl Into<String>) -> Self {
        if let Some(step) = self.steps.last_mut() {
            step.misses.push(Miss {
                answer,
                reason: reason.into(),
            });
        }
        self
    }
}

/// 50 points at 5s or faster, nothing from 20s, linear in between.
pub fn time_bonus(elapsed: Duration) -> u32 {
    let secs = elapsed.as_secs_f64();
    if secs <= FULL_BONUS_SECS {
        MAX_TIME_BONUS
    } else if secs >= NO_BONUS_SECS {
        0
    } else {
        (f64::from(MAX_TIME_BONUS) * (NO_BONUS_SECS - secs) / (NO_BONUS_SECS - FULL_BONUS_SECS)).round() as u32
    }
}

pub fn step_points(elapsed: Duration, multiplier: f64) -> u32 {
    (f64::from(BASE_POINTS + time_bonus(elapsed)) * multiplier) as u32
}

pub fn is_quit(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "q" | "quit" | "exit")
}

pub fn is_hint(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "h" | "hint")
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use netdrill_core::AnswerCheck;

    #[test]
    fn test_time_bonus_curve() {
        assert_eq!(time_bonus(Duration::from_secs(1)), 50);
        assert_eq!(time_bonus(Duration::from_secs(5)), 50);
        assert_eq!(time_bonus(Duration::from_millis(12_500)), 25);
        assert_eq!(time_bonus(Duration::from_secs(20)), 0);
        assert_eq!(time_bonus(Duration::from_secs(90)), 0);
    }

    #[test]
    fn test_step_points_with_multiplier() {
        assert_eq!(step_points(Duration::from_secs(2), 1.0), 150);
        assert_eq!(step_points(Duration::from_secs(2), 1.5), 225);
        assert_eq!(step_points(Duration::from_secs(30), 1.0), 100);
    }

    #[test]
    fn test_parse_mode_and_difficulty() {
        assert_eq!("Speedrun".parse::<Mode>().unwrap(), Mode::Speedrun);
        assert_eq!("learn".parse::<Mode>().unwrap(), Mode::Practice);
        assert!("marathon".parse::<Mode>().is_err());

        assert_eq!("3".parse::<Difficulty>().unwrap(), Difficulty::Expert);
        assert_eq!(" casual ".parse::<Difficulty>().unwrap(), Difficulty::Casual);
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_prefix_ranges_stay_below_31() {
        for difficulty in Difficulty::ALL {
            assert!(*difficulty.prefix_range().end() <= 30);
        }
    }

    #[test]
    fn test_quit_and_hint_words() {
        assert!(is_quit("Q"));
        assert!(is_quit(" exit "));
        assert!(!is_quit("queue"));
        assert!(is_hint("HINT"));
        assert!(!is_hint("help"));
    }

    #[test]
    fn test_diagnose_finds_prepared_miss() {
        let question = Question::new("pick one")
            .step("Interface", Answer::Text(AnswerCheck::Exact("eth1".into())))
            .miss(Answer::Text(AnswerCheck::Exact("eth0".into())), "not the longest prefix");

        let step = &question.steps[0];
        assert_eq!(step.diagnose("ETH0"), Some("not the longest prefix"));
        assert_eq!(step.diagnose("wan0"), None);
    }

    #[test]
    fn test_miss_attaches_to_latest_step() {
        let question = Question::new("breakdown")
            .step("First host", Answer::Number(1))
            .miss(Answer::Number(0), "that's the network")
            .step("Last host", Answer::Number(254))
            .miss(Answer::Number(255), "that's the broadcast");

        assert_eq!(question.steps[0].diagnose("255"), None);
        assert_eq!(question.steps[1].diagnose("255"), Some("that's the broadcast"));
    }
}
