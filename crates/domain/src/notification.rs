use chrono::{DateTime, Utc};
use derive_more::{Deref, Display};
use strum::{Display as StrumDisplay, EnumString};
use uuid::Uuid;

use crate::{CreateError, DeleteError, ReadError, UpdateError, UserID};

#[allow(async_fn_in_trait)]
pub trait NotificationService {
    async fn get_notifications(&self, user_id: UserID) -> Result<Vec<Notification>, ReadError>;
    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, CreateError>;
    async fn mark_all_read(&self, user_id: UserID) -> Result<(), UpdateError>;
    async fn delete_notification(
        &self,
        user_id: UserID,
        id: NotificationID,
    ) -> Result<NotificationID, DeleteError>;
    async fn clear_notifications(&self, user_id: UserID) -> Result<(), DeleteError>;

    /// Mark all notifications read if any is unread and return the refreshed list.
    ///
    /// Without unread notifications the given list is returned unchanged and no request is made.
    async fn open_notifications(
        &self,
        user_id: UserID,
        notifications: Vec<Notification>,
    ) -> Result<Vec<Notification>, ReadError> {
        if unread_count(&notifications) == 0 {
            return Ok(notifications);
        }
        match self.mark_all_read(user_id).await {
            Ok(()) => {}
            Err(UpdateError::Storage(storage)) => return Err(ReadError::Storage(storage)),
            Err(err) => return Err(ReadError::Other(err.into())),
        }
        self.get_notifications(user_id).await
    }
}

#[allow(async_fn_in_trait)]
pub trait NotificationRepository {
    async fn read_notifications(&self, user_id: UserID) -> Result<Vec<Notification>, ReadError>;
    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, CreateError>;
    async fn mark_all_read(&self, user_id: UserID) -> Result<(), UpdateError>;
    async fn delete_notification(
        &self,
        user_id: UserID,
        id: NotificationID,
    ) -> Result<NotificationID, DeleteError>;
    async fn delete_notifications(&self, user_id: UserID) -> Result<(), DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationID,
    pub user_id: UserID,
    pub kind: NotificationKind,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// A notification that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub user_id: UserID,
    pub kind: NotificationKind,
    pub message: String,
}

impl NewNotification {
    #[must_use]
    pub fn reminder(user_id: UserID, workout_time: &str) -> Self {
        Self {
            user_id,
            kind: NotificationKind::Reminder,
            message: format!("It's time for your workout! ({workout_time})"),
        }
    }

    #[must_use]
    pub fn progress(user_id: UserID, message: String) -> Self {
        Self {
            user_id,
            kind: NotificationKind::Progress,
            message,
        }
    }

    /// Title of the pop-up shown by the platform when this notification is raised locally.
    #[must_use]
    pub fn popup_title(&self) -> &'static str {
        match self.kind {
            NotificationKind::Reminder => "Workout Reminder",
            NotificationKind::Progress => "Workout Complete!",
            NotificationKind::Like | NotificationKind::Comment | NotificationKind::Other => {
                "New Notification"
            }
        }
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationID(Uuid);

impl From<Uuid> for NotificationID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for NotificationID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(StrumDisplay, EnumString, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Comment,
    Reminder,
    Progress,
    Other,
}

impl NotificationKind {
    /// Unknown kinds written by external triggers are shown as `Other`.
    #[must_use]
    pub fn from_lossy(value: &str) -> Self {
        value.parse().unwrap_or(NotificationKind::Other)
    }
}

#[must_use]
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

/// Insert a notification received from the realtime feed at the top of the list.
///
/// Returns `false` if a notification with the same id is already present.
pub fn prepend_notification(notifications: &mut Vec<Notification>, notification: Notification) -> bool {
    if notifications.iter().any(|n| n.id == notification.id) {
        return false;
    }
    notifications.insert(0, notification);
    true
}

/// Coarse age of a notification, e.g. `5m ago`.
#[must_use]
pub fn time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - created_at).num_seconds().max(0);
    if seconds < 60 {
        return format!("{seconds}s ago");
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use chrono::{Duration, TimeZone};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Service, StorageError};

    use super::*;

    #[rstest]
    #[case("like", NotificationKind::Like)]
    #[case("comment", NotificationKind::Comment)]
    #[case("reminder", NotificationKind::Reminder)]
    #[case("progress", NotificationKind::Progress)]
    #[case("other", NotificationKind::Other)]
    #[case("follow", NotificationKind::Other)]
    #[case("", NotificationKind::Other)]
    fn test_notification_kind_from_lossy(#[case] value: &str, #[case] expected: NotificationKind) {
        assert_eq!(NotificationKind::from_lossy(value), expected);
    }

    #[rstest]
    #[case(NotificationKind::Like, "like")]
    #[case(NotificationKind::Reminder, "reminder")]
    #[case(NotificationKind::Progress, "progress")]
    fn test_notification_kind_display(#[case] kind: NotificationKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }

    #[test]
    fn test_new_notification_reminder() {
        let notification = NewNotification::reminder(user_id(), "6:00 PM");
        assert_eq!(notification.kind, NotificationKind::Reminder);
        assert_eq!(notification.message, "It's time for your workout! (6:00 PM)");
        assert_eq!(notification.popup_title(), "Workout Reminder");
    }

    #[test]
    fn test_new_notification_progress() {
        let notification = NewNotification::progress(user_id(), "Congrats!".to_string());
        assert_eq!(notification.kind, NotificationKind::Progress);
        assert_eq!(notification.popup_title(), "Workout Complete!");
    }

    #[test]
    fn test_unread_count() {
        assert_eq!(unread_count(&[]), 0);
        assert_eq!(
            unread_count(&[notification(1, false), notification(2, true), notification(3, false)]),
            2
        );
        assert_eq!(unread_count(&[notification(1, true), notification(2, true)]), 0);
    }

    #[test]
    fn test_prepend_notification() {
        let mut notifications = vec![notification(1, true)];

        assert!(prepend_notification(&mut notifications, notification(2, false)));
        assert_eq!(notifications, vec![notification(2, false), notification(1, true)]);

        assert!(!prepend_notification(&mut notifications, notification(1, false)));
        assert_eq!(notifications, vec![notification(2, false), notification(1, true)]);
    }

    #[rstest]
    #[case(Duration::seconds(0), "0s ago")]
    #[case(Duration::seconds(59), "59s ago")]
    #[case(Duration::seconds(60), "1m ago")]
    #[case(Duration::minutes(59), "59m ago")]
    #[case(Duration::minutes(60), "1h ago")]
    #[case(Duration::hours(23) + Duration::minutes(59), "23h ago")]
    #[case(Duration::hours(24), "1d ago")]
    #[case(Duration::days(10), "10d ago")]
    #[case(-Duration::seconds(5), "0s ago")]
    fn test_time_ago(#[case] age: Duration, #[case] expected: &str) {
        let now = Utc.with_ymd_and_hms(2024, 5, 6, 12, 0, 0).unwrap();
        assert_eq!(time_ago(now - age, now), expected);
    }

    #[test]
    fn test_open_notifications_marks_unread_as_read() {
        let repository = FakeRepository::new(vec![notification(2, false), notification(1, true)]);
        let requests = repository.requests.clone();
        let service = Service::new(repository);

        let notifications = block_on(service.open_notifications(
            user_id(),
            vec![notification(2, false), notification(1, true)],
        ))
        .unwrap();

        assert_eq!(notifications, vec![notification(2, true), notification(1, true)]);
        assert_eq!(unread_count(&notifications), 0);
        assert_eq!(*requests.borrow(), vec!["mark_all_read", "read"]);
    }

    #[test]
    fn test_open_notifications_without_unread() {
        let repository = FakeRepository::new(vec![notification(1, true)]);
        let requests = repository.requests.clone();
        let service = Service::new(repository);

        assert_eq!(
            block_on(service.open_notifications(user_id(), vec![notification(1, true)])).unwrap(),
            vec![notification(1, true)]
        );
        assert_eq!(
            block_on(service.open_notifications(user_id(), vec![])).unwrap(),
            vec![]
        );
        assert!(requests.borrow().is_empty());
    }

    #[test]
    fn test_open_notifications_no_connection() {
        let mut repository = FakeRepository::new(vec![notification(1, false)]);
        repository.no_connection = true;
        let requests = repository.requests.clone();
        let service = Service::new(repository);

        assert!(matches!(
            block_on(service.open_notifications(user_id(), vec![notification(1, false)])),
            Err(ReadError::Storage(StorageError::NoConnection))
        ));
        assert_eq!(*requests.borrow(), vec!["mark_all_read"]);
    }

    fn user_id() -> UserID {
        UserID::from(1)
    }

    fn notification(id: u128, read: bool) -> Notification {
        Notification {
            id: id.into(),
            user_id: user_id(),
            kind: NotificationKind::Other,
            message: format!("notification {id}"),
            read,
            created_at: Utc.with_ymd_and_hms(2024, 5, 6, 12, 0, 0).unwrap(),
        }
    }

    struct FakeRepository {
        notifications: RefCell<Vec<Notification>>,
        requests: Rc<RefCell<Vec<&'static str>>>,
        no_connection: bool,
    }

    impl FakeRepository {
        fn new(notifications: Vec<Notification>) -> Self {
            Self {
                notifications: RefCell::new(notifications),
                requests: Rc::default(),
                no_connection: false,
            }
        }
    }

    impl NotificationRepository for FakeRepository {
        async fn read_notifications(&self, _: UserID) -> Result<Vec<Notification>, ReadError> {
            self.requests.borrow_mut().push("read");
            Ok(self.notifications.borrow().clone())
        }

        async fn create_notification(
            &self,
            _: NewNotification,
        ) -> Result<Notification, CreateError> {
            unimplemented!()
        }

        async fn mark_all_read(&self, _: UserID) -> Result<(), UpdateError> {
            self.requests.borrow_mut().push("mark_all_read");
            if self.no_connection {
                return Err(UpdateError::Storage(StorageError::NoConnection));
            }
            for notification in self.notifications.borrow_mut().iter_mut() {
                notification.read = true;
            }
            Ok(())
        }

        async fn delete_notification(
            &self,
            _: UserID,
            _: NotificationID,
        ) -> Result<NotificationID, DeleteError> {
            unimplemented!()
        }

        async fn delete_notifications(&self, _: UserID) -> Result<(), DeleteError> {
            unimplemented!()
        }
    }
}
