#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod notification;
mod reminder;
mod service;
mod session;
mod user;
mod weekly_session;
mod workout;

pub use error::{CreateError, DeleteError, ReadError, StorageError, UpdateError};
pub use notification::{
    NewNotification, Notification, NotificationID, NotificationKind, NotificationRepository,
    NotificationService, prepend_notification, time_ago, unread_count,
};
pub use reminder::{WorkoutTime, WorkoutTimeError};
pub use service::Service;
pub use session::{SessionRepository, SessionService, User};
pub use user::{UserID, UserProfile, UserProfileRepository, UserProfileService};
pub use weekly_session::{
    CompletedExercise, DayProgress, FinishSessionError, FinishState, Load, LoadError, Sets,
    SetsError, WeeklySession, WeeklySessionRepository, WeeklySessionService, WeeklyStatus,
    completion_message, week_end, week_start,
};
pub use workout::{LoadTier, Program, WEEK, Workout, WorkoutPlan, weekday_name};
