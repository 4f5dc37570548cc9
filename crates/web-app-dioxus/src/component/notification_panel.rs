use chrono::Utc;
use dioxus::prelude::*;
use log::debug;

use growmuscle_domain::{self as domain, NotificationService};
use growmuscle_web_app as web_app;

use crate::{
    DOMAIN_SERVICE,
    component::element::{Color, Icon},
};

#[component]
pub fn NotificationPanel(
    user_id: domain::UserID,
    notifications: Signal<Vec<domain::Notification>>,
    is_loading: bool,
) -> Element {
    let now = Utc::now();
    let is_empty = notifications.read().is_empty();

    rsx! {
        div {
            class: "notification-panel box p-0",
            div {
                class: "is-flex is-justify-content-space-between is-align-items-center px-4 py-3",
                span { class: "has-text-weight-bold", "Notifications" }
                button {
                    class: "button is-small is-danger is-light",
                    disabled: is_empty,
                    onclick: move |_| async move {
                        if DOMAIN_SERVICE.read().clear_notifications(user_id).await.is_ok() {
                            notifications.write().clear();
                        }
                    },
                    "Clear All"
                }
            }
            hr { class: "my-0" }
            if is_loading {
                div { class: "has-text-centered has-text-grey p-4", "Loading..." }
            } else if is_empty {
                div { class: "has-text-centered has-text-grey p-4", "No notifications." }
            } else {
                for notification in notifications.read().iter().cloned() {
                    NotificationRow {
                        key: "{notification.id}",
                        age: domain::time_ago(notification.created_at, now),
                        notification,
                        notifications,
                    }
                }
            }
        }
    }
}

#[component]
fn NotificationRow(
    notification: domain::Notification,
    age: String,
    notifications: Signal<Vec<domain::Notification>>,
) -> Element {
    let (icon, color) = kind_icon(notification.kind);
    let user_id = notification.user_id;
    let id = notification.id;

    rsx! {
        article {
            class: "media px-4 py-2 my-0",
            class: if !notification.read { "has-background-primary-light" },
            figure {
                class: "media-left",
                Icon { name: icon.to_string(), color }
            }
            div {
                class: "media-content",
                p { class: "is-size-6", "{notification.message}" }
                p { class: "is-size-7 has-text-grey", "{age}" }
            }
            div {
                class: "media-right",
                button {
                    aria_label: "delete",
                    class: "delete",
                    onclick: move |_| async move {
                        if DOMAIN_SERVICE
                            .read()
                            .delete_notification(user_id, id)
                            .await
                            .is_ok()
                        {
                            notifications.write().retain(|n| n.id != id);
                        }
                    },
                }
            }
        }
    }
}

fn kind_icon(kind: domain::NotificationKind) -> (&'static str, Color) {
    match kind {
        domain::NotificationKind::Like => ("heart", Color::Danger),
        domain::NotificationKind::Comment => ("comment", Color::Info),
        domain::NotificationKind::Reminder => ("clock", Color::Warning),
        domain::NotificationKind::Progress => ("trophy", Color::Success),
        domain::NotificationKind::Other => ("bell", Color::Text),
    }
}

/// Raise a platform pop-up, silently skipped without permission.
pub fn show_popup(title: &str, message: &str) {
    if let Err(err) = web_app::notification::show(title, message) {
        debug!("failed to show notification pop-up: {err}");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(domain::NotificationKind::Like, "heart")]
    #[case(domain::NotificationKind::Comment, "comment")]
    #[case(domain::NotificationKind::Reminder, "clock")]
    #[case(domain::NotificationKind::Progress, "trophy")]
    #[case(domain::NotificationKind::Other, "bell")]
    fn test_kind_icon(#[case] kind: domain::NotificationKind, #[case] expected: &str) {
        assert_eq!(kind_icon(kind).0, expected);
    }
}
