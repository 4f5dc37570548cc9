use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{Program, ReadError, WorkoutTime, WorkoutTimeError};

#[allow(async_fn_in_trait)]
pub trait UserProfileService {
    async fn get_user_profile(&self, id: UserID) -> Result<UserProfile, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait UserProfileRepository {
    async fn read_user_profile(&self, id: UserID) -> Result<UserProfile, ReadError>;
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserID(Uuid);

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for UserID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Read-only copy of the profile row owned by the backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserProfile {
    pub id: UserID,
    pub height: Option<f32>,
    pub weight: Option<f32>,
    pub fitness_goal: Option<String>,
    pub profile_picture: Option<String>,
    pub workout_time: Option<String>,
    pub workout_reminders: bool,
    pub progress_updates: bool,
}

impl UserProfile {
    /// Program matching the fitness goal, if the goal names a known program.
    #[must_use]
    pub fn program(&self) -> Option<Program> {
        self.fitness_goal
            .as_deref()
            .and_then(|goal| Program::try_from(goal).ok())
    }

    /// The reminder time, if reminders are enabled and a time is configured.
    ///
    /// `None` means nothing has to be scheduled. A configured but malformed time is reported as
    /// an error.
    pub fn reminder_time(&self) -> Option<Result<WorkoutTime, WorkoutTimeError>> {
        if !self.workout_reminders {
            return None;
        }
        let workout_time = self.workout_time.as_deref()?;
        if workout_time.trim().is_empty() {
            return None;
        }
        Some(WorkoutTime::parse(workout_time))
    }
}
