//! Score validation: pure win-condition rules, no I/O.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

pub const DEFAULT_MIN_SCORE: i32 = 0;
pub const DEFAULT_MAX_SCORE: i32 = 99;
/// Upper bound a configured target or maximum score may take.
pub const SCORE_CEILING: i32 = 999;
pub const WIN_BY: i32 = 2;
/// Winning scores beyond target + this are flagged as likely typos.
pub const HIGH_SCORE_SLACK: i32 = 10;
/// Margins beyond this are flagged as likely typos.
pub const LARGE_MARGIN: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WinCondition {
    /// Higher score must reach the target; any margin.
    FirstToTarget,
    /// Higher score must reach the target with a margin of at least two.
    WinBy2,
}

impl WinCondition {
    pub const fn as_str(&self) -> &'static str {
        match self {
            WinCondition::FirstToTarget => "first_to_target",
            WinCondition::WinBy2 => "win_by_2",
        }
    }
}

impl fmt::Display for WinCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WinCondition {
    type Err = DomainError;

    /// Accepts `first_to_target`, `first-to-target`, `firstToTarget`,
    /// `win_by_2`, `win-by-2`, `winBy2`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "firsttotarget" => Ok(WinCondition::FirstToTarget),
            "winby2" => Ok(WinCondition::WinBy2),
            _ => Err(DomainError::configuration(format!(
                "unknown win condition '{s}' (expected first_to_target or win_by_2)"
            ))),
        }
    }
}

impl TryFrom<String> for WinCondition {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WinCondition> for String {
    fn from(value: WinCondition) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub win_condition: WinCondition,
    pub target_score: i32,
    pub min_score: i32,
    pub max_score: i32,
}

impl ScoringRules {
    pub fn new(win_condition: WinCondition, target_score: i32) -> Self {
        Self {
            win_condition,
            target_score,
            min_score: DEFAULT_MIN_SCORE,
            max_score: DEFAULT_MAX_SCORE,
        }
    }

    pub fn with_max_score(mut self, max_score: i32) -> Self {
        self.max_score = max_score;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    One,
    Two,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::One => f.write_str("Team 1"),
            Team::Two => f.write_str("Team 2"),
        }
    }
}

/// A violated rule. Validation reports all of them, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreIssue {
    NotAWholeNumber { team: Team, raw: String },
    OutOfRange { team: Team, score: i32, min: i32, max: i32 },
    Tie,
    TargetNotReached { target: i32 },
    MarginTooSmall { required: i32 },
}

impl fmt::Display for ScoreIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreIssue::NotAWholeNumber { team, raw } => {
                write!(f, "{team} score must be a whole number (got \"{raw}\")")
            }
            ScoreIssue::OutOfRange {
                team,
                score,
                min,
                max,
            } => write!(f, "{team} score {score} must be between {min} and {max}"),
            ScoreIssue::Tie => f.write_str("Match cannot end in a tie"),
            ScoreIssue::TargetNotReached { target } => {
                write!(f, "Winning team must reach {target} points")
            }
            ScoreIssue::MarginTooSmall { required } => {
                write!(f, "Winning team must win by at least {required} points")
            }
        }
    }
}

/// Non-blocking hint that a score is probably mistyped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreWarning {
    UnusuallyHighScore { score: i32, target: i32 },
    LargeMargin { margin: i32 },
}

impl fmt::Display for ScoreWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreWarning::UnusuallyHighScore { score, target } => write!(
                f,
                "Winning score {score} is more than {HIGH_SCORE_SLACK} above the target of {target}; check for a typo"
            ),
            ScoreWarning::LargeMargin { margin } => write!(
                f,
                "Margin of {margin} points is unusually large; check for a typo"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreValidation {
    pub issues: Vec<ScoreIssue>,
    pub warnings: Vec<ScoreWarning>,
}

impl ScoreValidation {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Warnings on success, `DomainError::InvalidScore` with every issue otherwise.
    pub fn into_result(self) -> Result<Vec<ScoreWarning>, DomainError> {
        if self.issues.is_empty() {
            Ok(self.warnings)
        } else {
            Err(DomainError::InvalidScore(self.issues))
        }
    }
}

pub fn determine_winner(team1: i32, team2: i32) -> Option<Team> {
    match team1.cmp(&team2) {
        std::cmp::Ordering::Greater => Some(Team::One),
        std::cmp::Ordering::Less => Some(Team::Two),
        std::cmp::Ordering::Equal => None,
    }
}

pub fn validate_score(team1: i32, team2: i32, rules: &ScoringRules) -> ScoreValidation {
    let mut out = ScoreValidation::default();

    for (team, score) in [(Team::One, team1), (Team::Two, team2)] {
        if score < rules.min_score || score > rules.max_score {
            out.issues.push(ScoreIssue::OutOfRange {
                team,
                score,
                min: rules.min_score,
                max: rules.max_score,
            });
        }
    }
    // Out-of-range input skips the win-condition checks.
    if !out.issues.is_empty() {
        return out;
    }

    let high = team1.max(team2);
    let margin = i32::try_from(team1.abs_diff(team2)).unwrap_or(i32::MAX);

    if determine_winner(team1, team2).is_none() {
        out.issues.push(ScoreIssue::Tie);
    }
    if high < rules.target_score {
        out.issues.push(ScoreIssue::TargetNotReached {
            target: rules.target_score,
        });
    }
    if rules.win_condition == WinCondition::WinBy2 && margin > 0 && margin < WIN_BY {
        out.issues
            .push(ScoreIssue::MarginTooSmall { required: WIN_BY });
    }

    if margin > 0 {
        if high > rules.target_score.saturating_add(HIGH_SCORE_SLACK) {
            out.warnings.push(ScoreWarning::UnusuallyHighScore {
                score: high,
                target: rules.target_score,
            });
        }
        if margin > LARGE_MARGIN {
            out.warnings.push(ScoreWarning::LargeMargin { margin });
        }
    }

    out
}

/// Parse raw text entry for both teams, reporting each non-integer field.
pub fn parse_score_input(raw1: &str, raw2: &str) -> Result<(i32, i32), Vec<ScoreIssue>> {
    let parse = |team: Team, raw: &str| {
        raw.trim()
            .parse::<i32>()
            .map_err(|_| ScoreIssue::NotAWholeNumber {
                team,
                raw: raw.to_string(),
            })
    };

    match (parse(Team::One, raw1), parse(Team::Two, raw2)) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (a, b) => Err([a.err(), b.err()].into_iter().flatten().collect()),
    }
}

/// Quick-pick score pairs for manual entry, winner first. Every suggestion
/// passes [`validate_score`] under `rules`.
pub fn common_scores(rules: &ScoringRules) -> Vec<(i32, i32)> {
    const CLOSE_LOSSES: usize = 5;

    let target = rules.target_score;
    if target > rules.max_score || target < rules.min_score {
        return Vec::new();
    }
    let mut candidates = vec![(target, 0)];
    candidates.extend(
        (1..target)
            .rev()
            .map(|loser| (target, loser))
            .filter(|(w, l)| validate_score(*w, *l, rules).is_valid())
            .take(CLOSE_LOSSES),
    );
    if rules.win_condition == WinCondition::WinBy2 && target >= 11 {
        candidates.push((target.saturating_add(1), target - 1));
        candidates.push((target.saturating_add(2), target));
    }

    let mut out = Vec::with_capacity(candidates.len());
    for pair in candidates {
        if validate_score(pair.0, pair.1, rules).is_valid() && !out.contains(&pair) {
            out.push(pair);
        }
    }
    out
}
