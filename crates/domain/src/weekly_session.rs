use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, Utc, Weekday};
use derive_more::{Display, Into};

use crate::{CreateError, Program, ReadError, UserID, weekday_name};

#[allow(async_fn_in_trait)]
pub trait WeeklySessionService {
    async fn get_weekly_sessions(
        &self,
        user_id: UserID,
        program: Program,
        week_start: NaiveDate,
    ) -> Result<Vec<WeeklySession>, ReadError>;
    async fn create_weekly_session(
        &self,
        session: WeeklySession,
    ) -> Result<WeeklySession, CreateError>;

    async fn get_weekly_status(
        &self,
        user_id: UserID,
        program: Program,
        today: NaiveDate,
    ) -> Result<WeeklyStatus, ReadError> {
        let week_start = week_start(today);
        Ok(WeeklyStatus::new(
            week_start,
            self.get_weekly_sessions(user_id, program, week_start)
                .await?,
        ))
    }

    /// Persist the completed exercises of a day as the session of the current week.
    ///
    /// A session that was already completed this week is reported as
    /// [`FinishSessionError::AlreadyCompletedThisWeek`], whether it is detected here or by the
    /// storage backend.
    async fn finish_session(
        &self,
        user_id: UserID,
        program: Program,
        day: Weekday,
        exercises: Vec<CompletedExercise>,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<WeeklySession, FinishSessionError> {
        if exercises.is_empty() {
            return Err(FinishSessionError::NoExercises);
        }
        let status = self.get_weekly_status(user_id, program, today).await?;
        if status.is_locked(day) {
            return Err(FinishSessionError::AlreadyCompletedThisWeek);
        }
        self.create_weekly_session(WeeklySession {
            user_id,
            program,
            day,
            week_start: status.week_start,
            exercises,
            completed_at: now,
        })
        .await
        .map_err(FinishSessionError::from)
    }
}

#[allow(async_fn_in_trait)]
pub trait WeeklySessionRepository {
    async fn read_weekly_sessions(
        &self,
        user_id: UserID,
        program: Program,
        week_start: NaiveDate,
    ) -> Result<Vec<WeeklySession>, ReadError>;
    async fn create_weekly_session(
        &self,
        session: WeeklySession,
    ) -> Result<WeeklySession, CreateError>;
}

/// A finished session of one program day, at most one per user, program, week and day.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySession {
    pub user_id: UserID,
    pub program: Program,
    pub day: Weekday,
    pub week_start: NaiveDate,
    pub exercises: Vec<CompletedExercise>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletedExercise {
    pub exercise_title: String,
    pub sets: Sets,
    pub weight: Load,
    pub completed_at: DateTime<Utc>,
}

#[derive(Display, Into, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sets(u32);

impl Sets {
    pub const DEFAULT: Sets = Sets(3);

    pub fn new(value: u32) -> Result<Self, SetsError> {
        if (1..=20).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SetsError::OutOfRange)
        }
    }
}

impl Default for Sets {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<&str> for Sets {
    type Error = SetsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(value) => Sets::new(value),
            Err(_) => Err(SetsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetsError {
    #[error("Sets must be in the range 1 to 20")]
    OutOfRange,
    #[error("Sets must be an integer")]
    ParseError,
}

/// Weight used for an exercise in kg, zero for bodyweight exercises.
#[derive(Display, Into, Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Load(f32);

impl Load {
    pub fn new(value: f32) -> Result<Self, LoadError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(LoadError::OutOfRange)
        }
    }
}

impl TryFrom<&str> for Load {
    type Error = LoadError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.replace(',', ".");
        let value = value.trim();
        if value.is_empty() {
            return Ok(Load::default());
        }
        match value.parse::<f32>() {
            Ok(value) => Load::new(value),
            Err(_) => Err(LoadError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    #[error("Weight must be zero or a positive decimal number")]
    OutOfRange,
    #[error("Weight must be a decimal number")]
    ParseError,
}

#[derive(thiserror::Error, Debug)]
pub enum FinishSessionError {
    #[error("This session has already been completed this week")]
    AlreadyCompletedThisWeek,
    #[error("No exercises completed")]
    NoExercises,
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Create(CreateError),
}

impl From<CreateError> for FinishSessionError {
    fn from(value: CreateError) -> Self {
        match value {
            CreateError::Conflict => FinishSessionError::AlreadyCompletedThisWeek,
            err => FinishSessionError::Create(err),
        }
    }
}

/// First day (Monday) of the calendar week containing `date`.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

/// Last day (Sunday) of the calendar week containing `date`.
#[must_use]
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date)
        .checked_add_days(Days::new(6))
        .unwrap_or(date)
}

/// Sessions of one program completed in one calendar week, by day.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeeklyStatus {
    pub week_start: NaiveDate,
    sessions: BTreeMap<u32, WeeklySession>,
}

impl WeeklyStatus {
    /// Sessions outside the week starting at `week_start` are ignored.
    #[must_use]
    pub fn new(week_start: NaiveDate, sessions: Vec<WeeklySession>) -> Self {
        Self {
            week_start,
            sessions: sessions
                .into_iter()
                .filter(|s| s.week_start == week_start)
                .map(|s| (s.day.num_days_from_monday(), s))
                .collect(),
        }
    }

    #[must_use]
    pub fn session(&self, day: Weekday) -> Option<&WeeklySession> {
        self.sessions.get(&day.num_days_from_monday())
    }

    #[must_use]
    pub fn is_locked(&self, day: Weekday) -> bool {
        self.session(day).is_some()
    }

    #[must_use]
    pub fn completed_exercises(&self, day: Weekday) -> &[CompletedExercise] {
        self.session(day).map_or(&[], |s| s.exercises.as_slice())
    }
}

/// Progress on one day of a program, as shown on the workout page.
#[derive(Debug, Clone, PartialEq)]
pub struct DayProgress {
    pub day: Weekday,
    pub total: usize,
    pub completed: Vec<CompletedExercise>,
    pub locked: bool,
    pub is_current_day: bool,
}

impl DayProgress {
    #[must_use]
    pub fn new(day: Weekday, total: usize, status: &WeeklyStatus, today: Weekday) -> Self {
        Self {
            day,
            total,
            completed: status.completed_exercises(day).to_vec(),
            locked: status.is_locked(day),
            is_current_day: day == today,
        }
    }

    #[must_use]
    pub fn is_completed(&self, exercise_title: &str) -> bool {
        self.completed
            .iter()
            .any(|e| e.exercise_title == exercise_title)
    }

    #[must_use]
    pub fn can_complete(&self, exercise_title: &str) -> bool {
        self.is_current_day && !self.locked && !self.is_completed(exercise_title)
    }

    /// Returns `false` and leaves the progress unchanged if the exercise cannot be completed.
    pub fn complete(&mut self, exercise: CompletedExercise) -> bool {
        if !self.can_complete(&exercise.exercise_title) {
            return false;
        }
        self.completed.push(exercise);
        true
    }

    #[must_use]
    pub fn finish_state(&self) -> FinishState {
        if self.locked {
            FinishState::Locked
        } else if self.completed.is_empty() {
            FinishState::NothingCompleted
        } else {
            FinishState::Ready {
                completed: self.completed.len(),
                total: self.total,
            }
        }
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishState {
    Locked,
    NothingCompleted,
    Ready { completed: usize, total: usize },
}

impl FinishState {
    #[must_use]
    pub fn is_enabled(self) -> bool {
        matches!(self, FinishState::Ready { .. })
    }

    #[must_use]
    pub fn label(self) -> String {
        match self {
            FinishState::Locked => "SESSION LOCKED UNTIL NEXT WEEK".to_string(),
            FinishState::NothingCompleted => "COMPLETE EXERCISES TO FINISH SESSION".to_string(),
            FinishState::Ready { completed, total } => {
                format!("FINISH SESSION ({completed}/{total})")
            }
        }
    }
}

#[must_use]
pub fn completion_message(program: Program, day: Weekday) -> String {
    format!(
        "Congrats! You completed your {} {} session.",
        weekday_name(day),
        program.name().to_lowercase()
    )
}
