use chrono::NaiveDate;
use log::{debug, error};

use crate::{
    CreateError, DeleteError, NewNotification, Notification, NotificationID,
    NotificationRepository, NotificationService, Program, ReadError, SessionRepository,
    SessionService, UpdateError, User, UserID, UserProfile, UserProfileRepository,
    UserProfileService, WeeklySession, WeeklySessionRepository, WeeklySessionService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: SessionRepository> SessionService for Service<R> {
    async fn request_session(&self, email: &str, password: &str) -> Result<User, ReadError> {
        log_on_error!(
            self.repository.request_session(email, password),
            ReadError,
            "request",
            "session"
        )
    }

    async fn get_session(&self) -> Result<User, ReadError> {
        log_on_error!(
            self.repository.initialize_session(),
            ReadError,
            "get",
            "session"
        )
    }

    async fn delete_session(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.delete_session(),
            DeleteError,
            "delete",
            "session"
        )
    }
}

impl<R: UserProfileRepository> UserProfileService for Service<R> {
    async fn get_user_profile(&self, id: UserID) -> Result<UserProfile, ReadError> {
        log_on_error!(
            self.repository.read_user_profile(id),
            ReadError,
            "get",
            "user profile"
        )
    }
}

impl<R: NotificationRepository> NotificationService for Service<R> {
    async fn get_notifications(&self, user_id: UserID) -> Result<Vec<Notification>, ReadError> {
        log_on_error!(
            self.repository.read_notifications(user_id),
            ReadError,
            "get",
            "notifications"
        )
    }

    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, CreateError> {
        log_on_error!(
            self.repository.create_notification(notification),
            CreateError,
            "create",
            "notification"
        )
    }

    async fn mark_all_read(&self, user_id: UserID) -> Result<(), UpdateError> {
        log_on_error!(
            self.repository.mark_all_read(user_id),
            UpdateError,
            "mark",
            "notifications as read"
        )
    }

    async fn delete_notification(
        &self,
        user_id: UserID,
        id: NotificationID,
    ) -> Result<NotificationID, DeleteError> {
        log_on_error!(
            self.repository.delete_notification(user_id, id),
            DeleteError,
            "delete",
            "notification"
        )
    }

    async fn clear_notifications(&self, user_id: UserID) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.delete_notifications(user_id),
            DeleteError,
            "clear",
            "notifications"
        )
    }
}

impl<R: WeeklySessionRepository> WeeklySessionService for Service<R> {
    async fn get_weekly_sessions(
        &self,
        user_id: UserID,
        program: Program,
        week_start: NaiveDate,
    ) -> Result<Vec<WeeklySession>, ReadError> {
        log_on_error!(
            self.repository
                .read_weekly_sessions(user_id, program, week_start),
            ReadError,
            "get",
            "weekly sessions"
        )
    }

    async fn create_weekly_session(
        &self,
        session: WeeklySession,
    ) -> Result<WeeklySession, CreateError> {
        log_on_error!(
            self.repository.create_weekly_session(session),
            CreateError,
            "create",
            "weekly session"
        )
    }
}
