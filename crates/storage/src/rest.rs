//! REST
//!
//! Repositories backed by the PostgREST and auth endpoints of the hosted backend. Every data
//! request is authorized with the access token of the locally stored session.

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use uuid::Uuid;

use growmuscle_domain as domain;
use growmuscle_web_app::Config;

use crate::local_storage::{self, Session};

const USERS: &str = "users";
const NOTIFICATIONS: &str = "notifications";
const WEEKLY_WORKOUT_SESSIONS: &str = "weekly_workout_sessions";

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error>;
}

#[derive(Clone)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
        request.send().await
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    pub sender: S,
    pub config: Config,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            sender: GlooNetSendRequest,
            config,
        }
    }
}

impl Default for REST<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new(Config::BUILD)
    }
}

impl<S: SendRequest> REST<S> {
    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, FetchError> {
        let session = local_storage::read_session()?;
        Ok(builder
            .header("apikey", self.config.backend_key)
            .header(
                "Authorization",
                &format!("Bearer {}", session.access_token),
            ))
    }

    async fn fetch<T>(&self, request: Result<Request, gloo_net::Error>) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request).await?;
        response.json::<T>().await.map_err(FetchError::Deserialization)
    }

    async fn fetch_no_content(
        &self,
        request: Result<Request, gloo_net::Error>,
    ) -> Result<(), FetchError> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: Result<Request, gloo_net::Error>) -> Result<Response, FetchError> {
        let request = request.map_err(FetchError::Request)?;
        match self.sender.send_request(request).await {
            Ok(response) if response.ok() => Ok(response),
            Ok(response) => Err(FetchError::from_status(&response)),
            Err(_) => Err(domain::StorageError::NoConnection.into()),
        }
    }

    async fn fetch_first<T>(&self, request: Result<Request, gloo_net::Error>) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        self.fetch::<Vec<T>>(request)
            .await?
            .into_iter()
            .next()
            .ok_or(FetchError::NotFound)
    }
}

impl<S: SendRequest> domain::SessionRepository for REST<S> {
    async fn request_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<domain::User, domain::ReadError> {
        let response: AuthResponse = self
            .fetch(
                Request::post(&self.config.auth_url("token?grant_type=password"))
                    .header("apikey", self.config.backend_key)
                    .json(&json!({ "email": email, "password": password })),
            )
            .await
            .map_err(|err| match err {
                FetchError::Status(400, _)
                | FetchError::Storage(domain::StorageError::NoSession) => {
                    domain::ReadError::NotFound
                }
                err => err.into(),
            })?;
        let session = Session::from(response);
        local_storage::write_session(&session)?;
        Ok(session.into())
    }

    async fn initialize_session(&self) -> Result<domain::User, domain::ReadError> {
        Ok(local_storage::read_session()?.into())
    }

    async fn delete_session(&self) -> Result<(), domain::DeleteError> {
        local_storage::delete_session();
        Ok(())
    }
}

impl<S: SendRequest> domain::UserProfileRepository for REST<S> {
    async fn read_user_profile(
        &self,
        id: domain::UserID,
    ) -> Result<domain::UserProfile, domain::ReadError> {
        let profile: UserProfile = self
            .fetch_first(
                self.authorized(Request::get(&self.config.rest_url(USERS)))?
                    .query([("id", eq(*id)), ("select", "*".to_string())])
                    .build(),
            )
            .await?;
        Ok(profile.into())
    }
}

impl<S: SendRequest> domain::NotificationRepository for REST<S> {
    async fn read_notifications(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::Notification>, domain::ReadError> {
        let notifications: Vec<Notification> = self
            .fetch(
                self.authorized(Request::get(&self.config.rest_url(NOTIFICATIONS)))?
                    .query([
                        ("user_id", eq(*user_id)),
                        ("order", "created_at.desc".to_string()),
                        ("select", "*".to_string()),
                    ])
                    .build(),
            )
            .await?;
        Ok(notifications.into_iter().map(Into::into).collect())
    }

    async fn create_notification(
        &self,
        notification: domain::NewNotification,
    ) -> Result<domain::Notification, domain::CreateError> {
        let notification: Notification = self
            .fetch_first(
                self.authorized(Request::post(&self.config.rest_url(NOTIFICATIONS)))?
                    .header("Prefer", "return=representation")
                    .json(&[NewNotification::from(notification)]),
            )
            .await?;
        Ok(notification.into())
    }

    async fn mark_all_read(&self, user_id: domain::UserID) -> Result<(), domain::UpdateError> {
        Ok(self
            .fetch_no_content(
                self.authorized(Request::patch(&self.config.rest_url(NOTIFICATIONS)))?
                    .query([("user_id", eq(*user_id)), ("read", eq(false))])
                    .json(&json!({ "read": true })),
            )
            .await?)
    }

    async fn delete_notification(
        &self,
        user_id: domain::UserID,
        id: domain::NotificationID,
    ) -> Result<domain::NotificationID, domain::DeleteError> {
        self.fetch_no_content(
            self.authorized(Request::delete(&self.config.rest_url(NOTIFICATIONS)))?
                .query([("id", eq(*id)), ("user_id", eq(*user_id))])
                .build(),
        )
        .await?;
        Ok(id)
    }

    async fn delete_notifications(&self, user_id: domain::UserID) -> Result<(), domain::DeleteError> {
        Ok(self
            .fetch_no_content(
                self.authorized(Request::delete(&self.config.rest_url(NOTIFICATIONS)))?
                    .query([("user_id", eq(*user_id))])
                    .build(),
            )
            .await?)
    }
}

impl<S: SendRequest> domain::WeeklySessionRepository for REST<S> {
    async fn read_weekly_sessions(
        &self,
        user_id: domain::UserID,
        program: domain::Program,
        week_start: NaiveDate,
    ) -> Result<Vec<domain::WeeklySession>, domain::ReadError> {
        let sessions: Vec<WeeklySession> = self
            .fetch(
                self.authorized(Request::get(&self.config.rest_url(WEEKLY_WORKOUT_SESSIONS)))?
                    .query([
                        ("user_id", eq(*user_id)),
                        ("workout_type", eq(program)),
                        ("week_start", eq(week_start)),
                        ("select", "*".to_string()),
                    ])
                    .build(),
            )
            .await?;
        sessions
            .into_iter()
            .map(domain::WeeklySession::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| domain::ReadError::Other(err.into()))
    }

    async fn create_weekly_session(
        &self,
        session: domain::WeeklySession,
    ) -> Result<domain::WeeklySession, domain::CreateError> {
        let session: WeeklySession = self
            .fetch_first(
                self.authorized(Request::post(&self.config.rest_url(WEEKLY_WORKOUT_SESSIONS)))?
                    .header("Prefer", "return=representation")
                    .json(&[WeeklySession::from(session)]),
            )
            .await?;
        domain::WeeklySession::try_from(session).map_err(|err| domain::CreateError::Other(err.into()))
    }
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

#[derive(thiserror::Error, Debug)]
enum FetchError {
    #[error(transparent)]
    Storage(#[from] domain::StorageError),
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    #[error("{0} {1}")]
    Status(u16, String),
    #[error("invalid request: {0}")]
    Request(gloo_net::Error),
    #[error("deserialization failed: {0}")]
    Deserialization(gloo_net::Error),
}

impl FetchError {
    fn from_status(response: &Response) -> Self {
        match response.status() {
            401 => domain::StorageError::NoSession.into(),
            404 => FetchError::NotFound,
            409 => FetchError::Conflict,
            status => FetchError::Status(status, response.status_text()),
        }
    }

    fn into_storage_error(self) -> domain::StorageError {
        match self {
            FetchError::Storage(storage) => storage,
            err => domain::StorageError::Other(err.to_string().into()),
        }
    }
}

impl From<FetchError> for domain::ReadError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NotFound => domain::ReadError::NotFound,
            err => domain::ReadError::Storage(err.into_storage_error()),
        }
    }
}

impl From<FetchError> for domain::CreateError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::Conflict => domain::CreateError::Conflict,
            err => domain::CreateError::Storage(err.into_storage_error()),
        }
    }
}

impl From<FetchError> for domain::UpdateError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::Conflict => domain::UpdateError::Conflict,
            err => domain::UpdateError::Storage(err.into_storage_error()),
        }
    }
}

impl From<FetchError> for domain::DeleteError {
    fn from(value: FetchError) -> Self {
        domain::DeleteError::Storage(value.into_storage_error())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: AuthUser,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

impl From<AuthResponse> for Session {
    fn from(value: AuthResponse) -> Self {
        Session {
            user_id: value.user.id,
            email: value.user.email,
            access_token: value.access_token,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub weight: Option<f32>,
    #[serde(default)]
    pub fitness_goal: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub workout_time: Option<String>,
    #[serde(default)]
    pub workout_reminders: Option<bool>,
    #[serde(default)]
    pub progress_updates: Option<bool>,
}

impl From<UserProfile> for domain::UserProfile {
    fn from(value: UserProfile) -> Self {
        domain::UserProfile {
            id: value.id.into(),
            height: value.height,
            weight: value.weight,
            fitness_goal: value.fitness_goal,
            profile_picture: value.profile_picture,
            workout_time: value.workout_time,
            workout_reminders: value.workout_reminders.unwrap_or(false),
            progress_updates: value.progress_updates.unwrap_or(false),
        }
    }
}

impl From<domain::UserProfile> for UserProfile {
    fn from(value: domain::UserProfile) -> Self {
        UserProfile {
            id: *value.id,
            height: value.height,
            weight: value.weight,
            fitness_goal: value.fitness_goal,
            profile_picture: value.profile_picture,
            workout_time: value.workout_time,
            workout_reminders: Some(value.workout_reminders),
            progress_updates: Some(value.progress_updates),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for domain::Notification {
    fn from(value: Notification) -> Self {
        domain::Notification {
            id: value.id.into(),
            user_id: value.user_id.into(),
            kind: domain::NotificationKind::from_lossy(&value.kind),
            message: value.message,
            read: value.read,
            created_at: value.created_at,
        }
    }
}

impl From<domain::Notification> for Notification {
    fn from(value: domain::Notification) -> Self {
        Notification {
            id: *value.id,
            user_id: *value.user_id,
            kind: value.kind.to_string(),
            message: value.message,
            read: value.read,
            created_at: value.created_at,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl From<domain::NewNotification> for NewNotification {
    fn from(value: domain::NewNotification) -> Self {
        NewNotification {
            user_id: *value.user_id,
            kind: value.kind.to_string(),
            message: value.message,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WeeklySession {
    pub user_id: Uuid,
    pub workout_type: String,
    pub day_of_week: String,
    pub week_start: NaiveDate,
    pub exercises: Vec<CompletedExercise>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletedExercise {
    pub exercise_title: String,
    pub sets: u32,
    pub weight: f32,
    pub completed_at: DateTime<Utc>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidRow {
    #[error("unknown workout type: {0}")]
    WorkoutType(String),
    #[error("invalid day of week: {0}")]
    DayOfWeek(String),
    #[error(transparent)]
    Sets(#[from] domain::SetsError),
    #[error(transparent)]
    Load(#[from] domain::LoadError),
}

impl TryFrom<WeeklySession> for domain::WeeklySession {
    type Error = InvalidRow;

    fn try_from(value: WeeklySession) -> Result<Self, Self::Error> {
        Ok(domain::WeeklySession {
            user_id: value.user_id.into(),
            program: domain::Program::try_from(value.workout_type.as_str())
                .map_err(|_| InvalidRow::WorkoutType(value.workout_type.clone()))?,
            day: value
                .day_of_week
                .parse::<Weekday>()
                .map_err(|_| InvalidRow::DayOfWeek(value.day_of_week.clone()))?,
            week_start: value.week_start,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::CompletedExercise::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            completed_at: value.completed_at,
        })
    }
}

impl From<domain::WeeklySession> for WeeklySession {
    fn from(value: domain::WeeklySession) -> Self {
        WeeklySession {
            user_id: *value.user_id,
            workout_type: value.program.slug().to_string(),
            day_of_week: domain::weekday_name(value.day).to_string(),
            week_start: value.week_start,
            exercises: value.exercises.into_iter().map(Into::into).collect(),
            completed_at: value.completed_at,
        }
    }
}

impl TryFrom<CompletedExercise> for domain::CompletedExercise {
    type Error = InvalidRow;

    fn try_from(value: CompletedExercise) -> Result<Self, Self::Error> {
        Ok(domain::CompletedExercise {
            exercise_title: value.exercise_title,
            sets: domain::Sets::new(value.sets)?,
            weight: domain::Load::new(value.weight)?,
            completed_at: value.completed_at,
        })
    }
}

impl From<domain::CompletedExercise> for CompletedExercise {
    fn from(value: domain::CompletedExercise) -> Self {
        CompletedExercise {
            exercise_title: value.exercise_title,
            sets: value.sets.into(),
            weight: value.weight.into(),
            completed_at: value.completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use crate::tests::data::{COMPLETED_AT, NOTIFICATION, USER_PROFILE, WEEKLY_SESSION};

    use super::*;

    #[test]
    fn test_user_profile_from_json() {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "height": 180.0,
            "weight": 75.5,
            "fitness_goal": "active-lifestyle",
            "profile_picture": null,
            "workout_time": "6:00 PM",
            "workout_reminders": true,
            "progress_updates": true
        }))
        .unwrap();
        assert_eq!(domain::UserProfile::from(profile), USER_PROFILE.clone());
    }

    #[test]
    fn test_user_profile_from_json_missing_columns() {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "workout_reminders": null
        }))
        .unwrap();
        assert_eq!(
            domain::UserProfile::from(profile),
            domain::UserProfile {
                id: 1.into(),
                ..domain::UserProfile::default()
            }
        );
    }

    #[test]
    fn test_notification_from_json() {
        let notification: Notification = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000002",
            "user_id": "00000000-0000-0000-0000-000000000001",
            "type": "reminder",
            "message": "It's time for your workout! (6:00 PM)",
            "read": false,
            "created_at": "2024-03-04T18:00:00.000000+00:00"
        }))
        .unwrap();
        assert_eq!(domain::Notification::from(notification), NOTIFICATION.clone());
    }

    #[rstest]
    #[case("like", domain::NotificationKind::Like)]
    #[case("follow", domain::NotificationKind::Other)]
    fn test_notification_kind(#[case] kind: &str, #[case] expected: domain::NotificationKind) {
        let notification = Notification {
            kind: kind.to_string(),
            ..Notification::from(NOTIFICATION.clone())
        };
        assert_eq!(domain::Notification::from(notification).kind, expected);
    }

    #[test]
    fn test_new_notification_to_json() {
        assert_eq!(
            serde_json::to_value(NewNotification::from(domain::NewNotification::progress(
                1.into(),
                "Congrats!".to_string()
            )))
            .unwrap(),
            json!({
                "user_id": "00000000-0000-0000-0000-000000000001",
                "type": "progress",
                "message": "Congrats!"
            })
        );
    }

    #[test]
    fn test_weekly_session_to_json() {
        assert_eq!(
            serde_json::to_value(WeeklySession::from(WEEKLY_SESSION.clone())).unwrap(),
            json!({
                "user_id": "00000000-0000-0000-0000-000000000001",
                "workout_type": "active-lifestyle",
                "day_of_week": "Monday",
                "week_start": "2024-03-04",
                "exercises": [
                    {
                        "exerciseTitle": "Jogging",
                        "sets": 1,
                        "weight": 0.0,
                        "completedAt": "2024-03-04T18:00:00Z"
                    },
                    {
                        "exerciseTitle": "Lunges",
                        "sets": 3,
                        "weight": 7.5,
                        "completedAt": "2024-03-04T18:00:00Z"
                    }
                ],
                "completed_at": "2024-03-04T18:00:00Z"
            })
        );
    }

    #[test]
    fn test_weekly_session_try_from() {
        assert_eq!(
            domain::WeeklySession::try_from(WeeklySession::from(WEEKLY_SESSION.clone())),
            Ok(WEEKLY_SESSION.clone())
        );
    }

    #[rstest]
    #[case::workout_type(
        WeeklySession { workout_type: "powerlifting".to_string(), ..row() },
        InvalidRow::WorkoutType("powerlifting".to_string())
    )]
    #[case::day_of_week(
        WeeklySession { day_of_week: "Someday".to_string(), ..row() },
        InvalidRow::DayOfWeek("Someday".to_string())
    )]
    #[case::sets(
        WeeklySession { exercises: vec![CompletedExercise { sets: 0, ..exercise_row() }], ..row() },
        InvalidRow::Sets(domain::SetsError::OutOfRange)
    )]
    #[case::weight(
        WeeklySession { exercises: vec![CompletedExercise { weight: -1.0, ..exercise_row() }], ..row() },
        InvalidRow::Load(domain::LoadError::OutOfRange)
    )]
    fn test_weekly_session_try_from_invalid(#[case] row: WeeklySession, #[case] expected: InvalidRow) {
        assert_eq!(domain::WeeklySession::try_from(row), Err(expected));
    }

    #[test]
    fn test_session_from_auth_response() {
        let response: AuthResponse = serde_json::from_value(json!({
            "access_token": "token",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": {
                "id": "00000000-0000-0000-0000-000000000001",
                "email": "alice@example.com",
                "role": "authenticated"
            }
        }))
        .unwrap();
        assert_eq!(
            Session::from(response),
            Session {
                user_id: Uuid::from_u128(1),
                email: "alice@example.com".to_string(),
                access_token: "token".to_string(),
            }
        );
    }

    #[test]
    fn test_fetch_error_conversion() {
        assert!(matches!(
            domain::ReadError::from(FetchError::NotFound),
            domain::ReadError::NotFound
        ));
        assert!(matches!(
            domain::ReadError::from(FetchError::Storage(domain::StorageError::NoConnection)),
            domain::ReadError::Storage(domain::StorageError::NoConnection)
        ));
        assert!(matches!(
            domain::CreateError::from(FetchError::Conflict),
            domain::CreateError::Conflict
        ));
        assert!(matches!(
            domain::CreateError::from(FetchError::Status(500, "Internal Server Error".to_string())),
            domain::CreateError::Storage(domain::StorageError::Other(_))
        ));
        assert!(matches!(
            domain::DeleteError::from(FetchError::Storage(domain::StorageError::NoSession)),
            domain::DeleteError::Storage(domain::StorageError::NoSession)
        ));
    }

    fn row() -> WeeklySession {
        WeeklySession::from(WEEKLY_SESSION.clone())
    }

    fn exercise_row() -> CompletedExercise {
        CompletedExercise {
            exercise_title: "Jogging".to_string(),
            sets: 1,
            weight: 0.0,
            completed_at: *COMPLETED_AT,
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    mod wasm {
        use std::cell::RefCell;

        use growmuscle_domain::{
            NotificationRepository, SessionRepository, UserProfileRepository,
            WeeklySessionRepository,
        };
        use pretty_assertions::assert_eq;
        use wasm_bindgen_test::wasm_bindgen_test;

        use crate::tests::data::{CONFIG, SESSION, USER};

        use super::*;

        #[wasm_bindgen_test]
        async fn test_request_session() {
            local_storage::delete_session();

            assert!(matches!(
                rest_with_response(None)
                    .request_session("alice@example.com", "secret")
                    .await,
                Err(domain::ReadError::Storage(
                    domain::StorageError::NoConnection
                ))
            ));

            assert!(matches!(
                rest_with_response(Some(
                    Response::builder()
                        .status(400)
                        .body::<Option<&str>>(None)
                ))
                .request_session("alice@example.com", "wrong")
                .await,
                Err(domain::ReadError::NotFound)
            ));

            let rest = rest_with_response(Some(Response::builder().status(200).json(
                &AuthResponse {
                    access_token: SESSION.access_token.clone(),
                    user: AuthUser {
                        id: SESSION.user_id,
                        email: SESSION.email.clone(),
                    },
                },
            )));
            assert_eq!(
                rest.request_session("alice@example.com", "secret")
                    .await
                    .unwrap(),
                USER.clone()
            );
            let request = rest.sender.request.borrow_mut().take().unwrap();
            assert_eq!(
                request.url(),
                "https://example.supabase.co/auth/v1/token?grant_type=password"
            );
            assert_eq!(request.headers().get("apikey"), Some(CONFIG.backend_key.to_string()));
            assert_eq!(local_storage::read_session().unwrap(), SESSION.clone());

            assert_eq!(
                rest_with_response(None).initialize_session().await.unwrap(),
                USER.clone()
            );

            rest_with_response(None).delete_session().await.unwrap();
            assert!(matches!(
                rest_with_response(None).initialize_session().await,
                Err(domain::ReadError::Storage(domain::StorageError::NoSession))
            ));
        }

        #[wasm_bindgen_test]
        async fn test_read_user_profile() {
            init_session();

            let rest = rest_with_response(Some(
                Response::builder()
                    .status(200)
                    .json(&[UserProfile::from(USER_PROFILE.clone())]),
            ));
            assert_eq!(
                rest.read_user_profile(USER.id).await.unwrap(),
                USER_PROFILE.clone()
            );
            let request = rest.sender.request.borrow_mut().take().unwrap();
            assert_eq!(
                request.url(),
                "https://example.supabase.co/rest/v1/users?id=eq.00000000-0000-0000-0000-000000000001&select=*"
            );
            assert_eq!(
                request.headers().get("Authorization"),
                Some(format!("Bearer {}", SESSION.access_token))
            );

            assert!(matches!(
                rest_with_response(Some(
                    Response::builder().status(200).json(&Vec::<UserProfile>::new())
                ))
                .read_user_profile(USER.id)
                .await,
                Err(domain::ReadError::NotFound)
            ));
        }

        #[wasm_bindgen_test]
        async fn test_read_user_profile_no_session() {
            local_storage::delete_session();

            assert!(matches!(
                rest_with_response(None).read_user_profile(USER.id).await,
                Err(domain::ReadError::Storage(domain::StorageError::NoSession))
            ));
        }

        #[wasm_bindgen_test]
        async fn test_read_notifications() {
            init_session();

            let rest = rest_with_response(Some(
                Response::builder()
                    .status(200)
                    .json(&[Notification::from(NOTIFICATION.clone())]),
            ));
            assert_eq!(
                rest.read_notifications(USER.id).await.unwrap(),
                vec![NOTIFICATION.clone()]
            );
            let request = rest.sender.request.borrow_mut().take().unwrap();
            assert_eq!(
                request.url(),
                "https://example.supabase.co/rest/v1/notifications?user_id=eq.00000000-0000-0000-0000-000000000001&order=created_at.desc&select=*"
            );

            assert!(matches!(
                rest_with_response(None).read_notifications(USER.id).await,
                Err(domain::ReadError::Storage(
                    domain::StorageError::NoConnection
                ))
            ));
        }

        #[wasm_bindgen_test]
        async fn test_create_notification() {
            init_session();

            let rest = rest_with_response(Some(
                Response::builder()
                    .status(201)
                    .json(&[Notification::from(NOTIFICATION.clone())]),
            ));
            assert_eq!(
                rest.create_notification(domain::NewNotification::reminder(USER.id, "6:00 PM"))
                    .await
                    .unwrap(),
                NOTIFICATION.clone()
            );
            let request = rest.sender.request.borrow_mut().take().unwrap();
            assert_eq!(request.method(), gloo_net::http::Method::POST);
            assert_eq!(
                request.headers().get("Prefer"),
                Some("return=representation".to_string())
            );
        }

        #[wasm_bindgen_test]
        async fn test_mark_all_read() {
            init_session();

            let rest = rest_with_response(Some(
                Response::builder().status(204).body::<Option<&str>>(None),
            ));
            rest.mark_all_read(USER.id).await.unwrap();
            let request = rest.sender.request.borrow_mut().take().unwrap();
            assert_eq!(request.method(), gloo_net::http::Method::PATCH);
            assert_eq!(
                request.url(),
                "https://example.supabase.co/rest/v1/notifications?user_id=eq.00000000-0000-0000-0000-000000000001&read=eq.false"
            );
        }

        #[wasm_bindgen_test]
        async fn test_delete_notification() {
            init_session();

            let rest = rest_with_response(Some(
                Response::builder().status(204).body::<Option<&str>>(None),
            ));
            assert_eq!(
                rest.delete_notification(USER.id, NOTIFICATION.id)
                    .await
                    .unwrap(),
                NOTIFICATION.id
            );
            let request = rest.sender.request.borrow_mut().take().unwrap();
            assert_eq!(request.method(), gloo_net::http::Method::DELETE);
            assert_eq!(
                request.url(),
                "https://example.supabase.co/rest/v1/notifications?id=eq.00000000-0000-0000-0000-000000000002&user_id=eq.00000000-0000-0000-0000-000000000001"
            );

            assert!(matches!(
                rest_with_response(None)
                    .delete_notification(USER.id, NOTIFICATION.id)
                    .await,
                Err(domain::DeleteError::Storage(
                    domain::StorageError::NoConnection
                ))
            ));
        }

        #[wasm_bindgen_test]
        async fn test_delete_notifications() {
            init_session();

            let rest = rest_with_response(Some(
                Response::builder().status(204).body::<Option<&str>>(None),
            ));
            rest.delete_notifications(USER.id).await.unwrap();
            let request = rest.sender.request.borrow_mut().take().unwrap();
            assert_eq!(
                request.url(),
                "https://example.supabase.co/rest/v1/notifications?user_id=eq.00000000-0000-0000-0000-000000000001"
            );
        }

        #[wasm_bindgen_test]
        async fn test_read_weekly_sessions() {
            init_session();

            let rest = rest_with_response(Some(
                Response::builder()
                    .status(200)
                    .json(&[WeeklySession::from(WEEKLY_SESSION.clone())]),
            ));
            assert_eq!(
                rest.read_weekly_sessions(
                    USER.id,
                    domain::Program::ActiveLifestyle,
                    WEEKLY_SESSION.week_start
                )
                .await
                .unwrap(),
                vec![WEEKLY_SESSION.clone()]
            );
            let request = rest.sender.request.borrow_mut().take().unwrap();
            assert_eq!(
                request.url(),
                "https://example.supabase.co/rest/v1/weekly_workout_sessions?user_id=eq.00000000-0000-0000-0000-000000000001&workout_type=eq.active-lifestyle&week_start=eq.2024-03-04&select=*"
            );
        }

        #[wasm_bindgen_test]
        async fn test_create_weekly_session() {
            init_session();

            assert_eq!(
                rest_with_response(Some(
                    Response::builder()
                        .status(201)
                        .json(&[WeeklySession::from(WEEKLY_SESSION.clone())]),
                ))
                .create_weekly_session(WEEKLY_SESSION.clone())
                .await
                .unwrap(),
                WEEKLY_SESSION.clone()
            );

            assert!(matches!(
                rest_with_response(Some(
                    Response::builder().status(409).body::<Option<&str>>(None)
                ))
                .create_weekly_session(WEEKLY_SESSION.clone())
                .await,
                Err(domain::CreateError::Conflict)
            ));

            assert!(matches!(
                rest_with_response(None)
                    .create_weekly_session(WEEKLY_SESSION.clone())
                    .await,
                Err(domain::CreateError::Storage(
                    domain::StorageError::NoConnection
                ))
            ));
        }

        fn init_session() {
            local_storage::write_session(&SESSION).unwrap();
        }

        fn rest_with_response(
            response: Option<Result<Response, gloo_net::Error>>,
        ) -> REST<MockSendRequest> {
            REST {
                sender: MockSendRequest {
                    request: RefCell::new(None),
                    response: RefCell::new(response),
                },
                config: CONFIG,
            }
        }

        struct MockSendRequest {
            request: RefCell<Option<Request>>,
            response: RefCell<Option<Result<Response, gloo_net::Error>>>,
        }

        impl SendRequest for MockSendRequest {
            async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
                *self.request.borrow_mut() = Some(request);
                (*self.response.borrow_mut())
                    .take()
                    .unwrap_or(Err(gloo_net::Error::GlooError("no response".to_string())))
            }
        }
    }
}
