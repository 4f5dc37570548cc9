use dioxus::prelude::*;
use log::{debug, warn};

use growmuscle_domain::{self as domain, NotificationService, SessionService, UserProfileService};
use growmuscle_storage as storage;
use growmuscle_web_app as web_app;

use crate::{
    ALERTS, DATA_CHANGED, DOMAIN_SERVICE, NO_CONNECTION, Route, SESSION_CHANGED,
    component::{
        element::{ElementWithDescription, Icon},
        notification_panel::{NotificationPanel, show_popup},
    },
    signal_changed_session, signed_in_user, use_session,
};

#[component]
pub fn Navbar() -> Element {
    let mut menu_visible = use_signal(|| false);
    let mut panel_visible = use_signal(|| false);
    let mut notifications = use_signal(Vec::<domain::Notification>::new);
    let mut notifications_loading = use_signal(|| false);
    let session = use_session!();
    let user = use_memo(move || signed_in_user(session.read().as_ref()));
    let profile = use_resource(move || async move {
        let user = user()?;
        DOMAIN_SERVICE.read().get_user_profile(user.id).await.ok()
    });
    let reminder = use_memo(move || match &*profile.read() {
        Some(profile) => ReminderSchedule::new(profile.as_ref()),
        None => ReminderSchedule::Off,
    });
    let navigator = use_navigator();

    // Resources restart whenever a signal read in them changes, which cancels the running future.

    let _permission = use_resource(move || async move {
        if user().is_none() {
            return;
        }
        match web_app::notification::request_permission().await {
            Ok(permission) => debug!("notification permission: {permission:?}"),
            Err(err) => debug!("failed to request notification permission: {err}"),
        }
    });

    let _notifications = use_resource(move || async move {
        let open = panel_visible();
        let _ = DATA_CHANGED.read();
        let Some(user) = user() else {
            notifications.write().clear();
            return;
        };
        *notifications_loading.write() = true;
        let mut result = DOMAIN_SERVICE.read().get_notifications(user.id).await;
        if open {
            if let Ok(current) = result {
                result = DOMAIN_SERVICE
                    .read()
                    .open_notifications(user.id, current)
                    .await;
            }
        }
        if let Ok(result) = result {
            notifications.set(result);
        }
        *notifications_loading.write() = false;
    });

    let _subscription = use_resource(move || async move {
        let Some(user) = user() else {
            return;
        };
        let result = storage::realtime::subscribe_notifications(
            &web_app::Config::BUILD,
            user.id,
            move |notification: domain::Notification| {
                let message = notification.message.clone();
                if domain::prepend_notification(&mut notifications.write(), notification) {
                    show_popup("New Notification", &message);
                }
            },
        )
        .await;
        if let Err(err) = result {
            warn!("notification subscription ended: {err}");
        }
    });

    let _reminder = use_resource(move || async move {
        let schedule = reminder();
        let Some(user) = user() else {
            return;
        };
        match schedule {
            ReminderSchedule::Off => {}
            ReminderSchedule::Invalid(err) => warn!("workout reminder not scheduled: {err}"),
            ReminderSchedule::Daily {
                workout_time,
                raw_time,
            } => {
                web_app::reminder::run(workout_time, move || {
                    let raw_time = raw_time.clone();
                    async move { send_reminder(user.id, &raw_time).await }
                })
                .await;
            }
        }
    });

    let user = user();
    let unread = domain::unread_count(&notifications.read());
    let invalid_workout_time = matches!(reminder(), ReminderSchedule::Invalid(_));
    let workouts_target = workouts_route(match &*profile.read() {
        Some(Some(profile)) => Some(profile),
        _ => None,
    });

    rsx! {
        nav {
            class: "navbar is-fixed-top is-primary has-shadow has-text-weight-bold",
            div {
                class: "container",
                div {
                    class: "navbar-brand is-flex-grow-1",
                    a {
                        class: "navbar-item is-size-5",
                        onclick: move |_| {
                            *menu_visible.write() = false;
                            navigator.push(Route::Root {});
                        },
                        Icon { name: "dumbbell", px: 2 }
                        "Grow A Muscle"
                    }
                    div { class: "mx-auto" }
                    if NO_CONNECTION() {
                        a {
                            class: "navbar-item is-size-5 mx-1",
                            ElementWithDescription {
                                description: "No connection to server",
                                right_aligned: true,
                                Icon { name: "plug-circle-xmark" }
                            }
                        }
                    }
                    if invalid_workout_time {
                        a {
                            class: "navbar-item is-size-5 mx-1",
                            ElementWithDescription {
                                description: "Invalid workout time, no reminders scheduled",
                                right_aligned: true,
                                Icon { name: "clock-rotate-left" }
                            }
                        }
                    }
                    if let Some(user) = &user {
                        div {
                            class: "navbar-item is-relative",
                            a {
                                class: "is-size-5",
                                aria_label: "notifications",
                                onclick: move |_| panel_visible.set(!panel_visible()),
                                Icon { name: "bell" }
                                if unread > 0 {
                                    span {
                                        class: "notification-badge has-background-danger has-text-white",
                                        "{unread}"
                                    }
                                }
                            }
                            if panel_visible() {
                                NotificationPanel {
                                    user_id: user.id,
                                    notifications,
                                    is_loading: notifications_loading(),
                                }
                            }
                        }
                    }
                    a {
                        aria_expanded: menu_visible(),
                        aria_label: "menu",
                        class: "navbar-burger ml-0",
                        class: if menu_visible() { "is-active" },
                        role: "button",
                        onclick: move |_| { *menu_visible.write() = !menu_visible() },
                        span { aria_hidden: "true" }
                        span { aria_hidden: "true" }
                        span { aria_hidden: "true" }
                        span { aria_hidden: "true" }
                    }
                }
                div {
                    class: "navbar-menu is-flex-grow-0",
                    class: if menu_visible() { "is-active" },
                    div {
                        class: "navbar-end",
                        a {
                            class: "navbar-item",
                            onclick: move |_| {
                                *menu_visible.write() = false;
                                navigator.push(workouts_target.clone());
                            },
                            Icon { name: "person-running", px: 5 }
                            "Workouts"
                        }
                        if let Some(user) = user {
                            a {
                                class: "navbar-item",
                                onclick: move |_| async move {
                                    let result = DOMAIN_SERVICE.read().delete_session().await;
                                    match result {
                                        Ok(()) => {
                                            panel_visible.set(false);
                                            signal_changed_session();
                                            navigator.push(Route::Root {});
                                        }
                                        Err(err) => {
                                            ALERTS.write().push(format!("Failed to log out: {err}"));
                                        }
                                    }
                                    *menu_visible.write() = false;
                                },
                                Icon { name: "sign-out-alt", px: 5 }
                                "Log out ({user.email})"
                            }
                        } else {
                            a {
                                class: "navbar-item",
                                onclick: move |_| {
                                    *menu_visible.write() = false;
                                    navigator.push(Route::Login {});
                                },
                                Icon { name: "sign-in-alt", px: 5 }
                                "Log in"
                            }
                        }
                    }
                }
            }
        }

        Outlet::<Route> {}
    }
}

async fn send_reminder(user_id: domain::UserID, workout_time: &str) {
    let notification = domain::NewNotification::reminder(user_id, workout_time);
    let title = notification.popup_title();
    let message = notification.message.clone();
    // The stored row reaches the list through the realtime subscription.
    if DOMAIN_SERVICE
        .read()
        .create_notification(notification)
        .await
        .is_ok()
    {
        show_popup(title, &message);
    }
}

/// What the reminder timer has to do for a profile.
#[derive(Debug, Clone, PartialEq)]
enum ReminderSchedule {
    Off,
    Invalid(domain::WorkoutTimeError),
    Daily {
        workout_time: domain::WorkoutTime,
        raw_time: String,
    },
}

impl ReminderSchedule {
    fn new(profile: Option<&domain::UserProfile>) -> Self {
        let Some(profile) = profile else {
            return Self::Off;
        };
        match profile.reminder_time() {
            None => Self::Off,
            Some(Err(err)) => Self::Invalid(err),
            Some(Ok(workout_time)) => Self::Daily {
                workout_time,
                raw_time: profile.workout_time.clone().unwrap_or_default(),
            },
        }
    }
}

/// The program page of the user's fitness goal, or the program list.
fn workouts_route(profile: Option<&domain::UserProfile>) -> Route {
    profile
        .and_then(|profile| profile.fitness_goal.as_deref())
        .map(str::trim)
        .filter(|goal| !goal.is_empty())
        .map_or(Route::Workouts {}, |goal| Route::WorkoutProgram {
            program: goal.to_string(),
        })
}
