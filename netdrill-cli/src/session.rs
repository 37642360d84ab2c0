use crate::config::Config;
use crate::drills::Drill;
use crate::error::DrillResult;
use crate::quiz::{self, Difficulty, Mode, Question, Step, HINT_PENALTY, STREAK_MULTIPLIER, STREAK_STEP};
use rand::RngCore;
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

const ANONYMOUS: &str = "anonymous";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionOptions {
    pub mode: Mode,
    pub difficulty: Difficulty,
    /// Questions in classic and practice mode.
    pub questions: usize,
    /// Clock for speedrun mode.
    pub speedrun: Duration,
    /// Per-prompt limit in classic and streak mode.
    pub step_limit: Duration,
}

impl SessionOptions {
    pub fn from_config(config: &Config, mode: Mode, difficulty: Difficulty) -> Self {
        Self {
            mode,
            difficulty,
            questions: config.questions,
            speedrun: config.speedrun,
            step_limit: difficulty.step_time_limit(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub asked: usize,
    pub correct_steps: usize,
    pub total_steps: usize,
    pub score: u32,
    pub best_streak: u32,
    /// The player typed quit or input ran out.
    pub quit_early: bool,
}

enum StepOutcome {
    Correct,
    Wrong,
    Quit,
    /// The speedrun clock ran out while the player was answering.
    Expired,
}

/// Drives one run of a drill over a line-oriented terminal.
pub struct Session<R, W> {
    input: R,
    output: W,
    options: SessionOptions,
    score: u32,
    streak: u32,
    multiplier: f64,
    deadline: Option<Instant>,
    summary: SessionSummary,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, options: SessionOptions) -> Self {
        Self {
            input,
            output,
            options,
            score: 0,
            streak: 0,
            multiplier: 1.0,
            deadline: None,
            summary: SessionSummary::default(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prompt for a name for the high-score board.
    pub fn ask_player_name(&mut self) -> DrillResult<String> {
        write!(self.output, "Name for the high-score board: ")?;
        self.output.flush()?;
        let name = self.read_line()?.unwrap_or_default();
        let name = name.trim();
        Ok(if name.is_empty() { ANONYMOUS.to_string() } else { name.to_string() })
    }

    pub fn play(&mut self, drill: &mut dyn Drill, rng: &mut dyn RngCore) -> DrillResult<SessionSummary> {
        let mode = self.options.mode;
        writeln!(self.output, "== {} | {} | {} ==", drill.title(), mode, self.options.difficulty)?;
        writeln!(self.output, "Type 'h' for a hint, 'q' to quit.")?;

        if mode == Mode::Speedrun {
            writeln!(self.output, "You have {}s. Go!", self.options.speedrun.as_secs())?;
            self.deadline = Some(Instant::now() + self.options.speedrun);
        }

        loop {
            if self.finished() {
                break;
            }

            let question = drill.next_question(rng)?;
            self.summary.asked += 1;
            debug!(drill = drill.id(), n = self.summary.asked, steps = question.steps.len(), "asking question");

            match self.ask(&question)? {
                Some(true) => {}
                Some(false) if mode == Mode::Streak => {
                    writeln!(self.output, "Streak over.")?;
                    break;
                }
                Some(false) => {}
                None => break,
            }
        }

        self.summary.score = if mode.is_scored() { self.score } else { 0 };
        writeln!(
            self.output,
            "\nDone: {}/{} correct, best streak {}, score {}",
            self.summary.correct_steps, self.summary.total_steps, self.summary.best_streak, self.summary.score
        )?;
        info!(
            drill = drill.id(),
            %mode,
            difficulty = %self.options.difficulty,
            score = self.summary.score,
            asked = self.summary.asked,
            "session finished"
        );

        Ok(self.summary.clone())
    }

    fn finished(&self) -> bool {
        match self.options.mode {
            Mode::Classic | Mode::Practice => self.summary.asked >= self.options.questions,
            Mode::Speedrun => self.time_is_up(),
            Mode::Streak => false,
        }
    }

    fn time_is_up(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// `Some(all steps right)`, or `None` when the session should stop.
    fn ask(&mut self, question: &Question) -> DrillResult<Option<bool>> {
        let practice = self.options.mode == Mode::Practice;

        writeln!(self.output, "\nQ{} | score {} x{:.1}", self.summary.asked, self.score, self.multiplier)?;
        for line in &question.intro {
            writeln!(self.output, "{}", line)?;
        }
        if practice && !question.hint.is_empty() {
            writeln!(self.output, "Hint: {}", question.hint)?;
        }

        let mut all_right = true;
        for step in &question.steps {
            self.summary.total_steps += 1;
            match self.ask_step(question, step)? {
                StepOutcome::Correct => self.summary.correct_steps += 1,
                StepOutcome::Wrong => all_right = false,
                StepOutcome::Quit => {
                    self.summary.quit_early = true;
                    return Ok(None);
                }
                StepOutcome::Expired => {
                    writeln!(self.output, "Time's up!")?;
                    return Ok(None);
                }
            }
        }

        if (!all_right || practice) && !question.explanation.is_empty() {
            writeln!(self.output, "{}", question.explanation)?;
        }
        Ok(Some(all_right))
    }

    fn ask_step(&mut self, question: &Question, step: &Step) -> DrillResult<StepOutcome> {
        let limit = self.options.step_limit;
        let mut started = Instant::now();

        loop {
            write!(self.output, "{}: ", step.prompt)?;
            self.output.flush()?;

            let line = match self.read_line()? {
                Some(line) => line,
                None => return Ok(StepOutcome::Quit),
            };
            let input = line.trim();

            if quiz::is_quit(input) {
                return Ok(StepOutcome::Quit);
            }
            if quiz::is_hint(input) {
                self.show_hint(question)?;
                // Reading the hint is off the clock.
                started = Instant::now();
                continue;
            }
            if !step.answer.is_well_formed(input) {
                writeln!(self.output, "That doesn't look like an answer. Try again, or 'h' / 'q'.")?;
                continue;
            }
            if self.time_is_up() {
                return Ok(StepOutcome::Expired);
            }

            let elapsed = started.elapsed();
            if self.options.mode.enforces_step_limit() && elapsed >= limit {
                writeln!(
                    self.output,
                    "Too slow ({:.1}s, limit {}s). Answer: {}",
                    elapsed.as_secs_f64(),
                    limit.as_secs(),
                    step.answer
                )?;
                self.break_streak();
                return Ok(StepOutcome::Wrong);
            }

            if step.answer.accepts(input) {
                self.reward(elapsed)?;
                return Ok(StepOutcome::Correct);
            }

            writeln!(self.output, "Wrong. Answer: {}", step.answer)?;
            if let Some(reason) = step.diagnose(input) {
                writeln!(self.output, "  {}", reason)?;
            }
            self.break_streak();
            return Ok(StepOutcome::Wrong);
        }
    }

    fn show_hint(&mut self, question: &Question) -> DrillResult<()> {
        let hint = if question.hint.is_empty() { "No hint for this one." } else { question.hint.as_str() };
        writeln!(self.output, "Hint: {}", hint)?;
        if self.options.mode.is_scored() {
            self.score = self.score.saturating_sub(HINT_PENALTY);
            writeln!(self.output, "-{} pts (score {})", HINT_PENALTY, self.score)?;
        }
        Ok(())
    }

    fn reward(&mut self, elapsed: Duration) -> DrillResult<()> {
        self.streak += 1;
        self.summary.best_streak = self.summary.best_streak.max(self.streak);

        if !self.options.mode.is_scored() {
            writeln!(self.output, "Correct!")?;
            return Ok(());
        }

        let points = quiz::step_points(elapsed, self.multiplier);
        self.score = self.score.saturating_add(points);
        writeln!(self.output, "Correct! +{} pts (streak {})", points, self.streak)?;

        if self.streak % STREAK_STEP == 0 {
            self.multiplier *= STREAK_MULTIPLIER;
            writeln!(self.output, "{}-streak! Multiplier now x{:.1}", self.streak, self.multiplier)?;
        }
        Ok(())
    }

    fn break_streak(&mut self) {
        self.streak = 0;
        self.multiplier = 1.0;
    }

    fn read_line(&mut self) -> DrillResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
