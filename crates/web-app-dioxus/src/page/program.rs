use chrono::{Datelike, Local, NaiveDate, Utc, Weekday};
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use growmuscle_domain::{
    self as domain, NotificationService, SessionService, UserProfileService, WeeklySessionService,
};

use crate::{
    ALERTS, DATA_CHANGED, DOMAIN_SERVICE, NO_CONNECTION, Route, SESSION_CHANGED, WORKOUT_PLANS,
    component::{
        element::{
            Color, Dialog, DialogButtons, ErrorMessage, Loading, Message, NoConnection, Title,
        },
        form::{FieldValue, FieldValueState, InputField},
        notification_panel::show_popup,
    },
    signal_changed_data, signed_in_user, use_session,
};

const SUCCESS_MESSAGE_MILLIS: u32 = 3_000;

#[component]
pub fn WorkoutProgram(program: String) -> Element {
    match domain::Program::try_from(program.as_str()) {
        Ok(program) => rsx! {
            ProgramSession { key: "{program}", program }
        },
        Err(_) => rsx! {
            ErrorMessage { message: "Unknown workout program: {program}" }
        },
    }
}

#[component]
fn ProgramSession(program: domain::Program) -> Element {
    let session = use_session!();
    let today = use_hook(|| Local::now().date_naive());
    let mut selected_day = use_signal(|| today.weekday());
    let weekly_status = use_resource(move || async move {
        let _ = DATA_CHANGED.read();
        let user = signed_in_user(session.read().as_ref())?;
        Some(
            DOMAIN_SERVICE
                .read()
                .get_weekly_status(user.id, program, today)
                .await,
        )
    });
    let mut progress = use_signal(|| {
        domain::DayProgress::new(
            today.weekday(),
            0,
            &domain::WeeklyStatus::default(),
            today.weekday(),
        )
    });
    let mut dialog = use_signal(|| SessionDialog::None);
    let mut is_loading = use_signal(|| false);
    let show_success = use_signal(|| false);

    use_effect(move || {
        let day = selected_day();
        let status = current_status(weekly_status, today);
        let total = WORKOUT_PLANS
            .read()
            .get(&program)
            .map_or(0, |plan| plan.workouts(day).len());
        progress.set(domain::DayProgress::new(
            day,
            total,
            &status,
            today.weekday(),
        ));
    });

    let signed_in = signed_in_user(session.read().as_ref()).is_some();
    let (is_status_loading, no_connection) = match &*weekly_status.read() {
        None => (true, false),
        Some(Some(Err(domain::ReadError::Storage(domain::StorageError::NoConnection)))) => {
            (false, true)
        }
        Some(_) => (false, false),
    };
    let status = current_status(weekly_status, today);
    let day = selected_day();
    let workouts = WORKOUT_PLANS
        .read()
        .get(&program)
        .map(|plan| plan.workouts(day).to_vec())
        .unwrap_or_default();
    let finish_state = progress.read().finish_state();
    let locked = progress.read().locked;

    macro_rules! is_loading {
        ($block:expr) => {
            *is_loading.write() = true;
            $block;
            *is_loading.write() = false;
        };
    }

    let mut close_dialog = move || *dialog.write() = SessionDialog::None;

    let complete_exercise = move |_| {
        if let SessionDialog::CompleteExercise {
            workout,
            sets,
            weight,
        } = &*dialog.read()
        {
            if let (Ok(sets), Ok(weight)) = (sets.validated.clone(), weight.validated.clone()) {
                progress.write().complete(domain::CompletedExercise {
                    exercise_title: workout.title.to_string(),
                    sets,
                    weight,
                    completed_at: Utc::now(),
                });
            }
        }
        close_dialog();
    };

    let finish_session = move |_| async move {
        let Some(user) = signed_in_user(session.read().as_ref()) else {
            *dialog.write() = SessionDialog::SignIn;
            return;
        };
        let (day, exercises) = {
            let progress = progress.read();
            (progress.day, progress.completed.clone())
        };
        is_loading! {
            match DOMAIN_SERVICE
                .read()
                .finish_session(user.id, program, day, exercises, Utc::now(), today)
                .await
            {
                Ok(_) => {
                    send_progress_update(user.id, program, day).await;
                    complete_session(progress, show_success);
                }
                Err(domain::FinishSessionError::AlreadyCompletedThisWeek) => {
                    complete_session(progress, show_success);
                }
                Err(err) => {
                    ALERTS
                        .write()
                        .push(format!("Error completing session: {err}"));
                }
            }
        }
        close_dialog();
    };

    rsx! {
        div {
            class: "container px-3",
            Title { title: program.name().to_string() }
            if no_connection {
                NoConnection {}
            }
            if is_status_loading {
                Loading {}
            }
            div {
                class: "buttons is-centered mb-5",
                for weekday in domain::WEEK {
                    DayButton {
                        key: "{weekday}",
                        day: weekday,
                        completed: status.completed_exercises(weekday).len(),
                        is_locked: status.is_locked(weekday),
                        is_selected: weekday == day,
                        is_today: weekday == today.weekday(),
                        onclick: move |_| selected_day.set(weekday),
                    }
                }
            }
            div {
                class: "box",
                h2 { class: "title is-4 has-text-primary", "{domain::weekday_name(day)}" }
                if workouts.is_empty() {
                    div {
                        class: "has-text-centered py-6 is-size-5 has-text-weight-semibold has-text-primary",
                        "Rest Day! Take time to recover and come back stronger."
                    }
                } else {
                    div {
                        class: "columns is-multiline",
                        for workout in workouts {
                            div {
                                key: "{day}-{workout.title}",
                                class: "column is-half",
                                WorkoutCard {
                                    is_completed: progress.read().is_completed(workout.title),
                                    can_complete: progress.read().can_complete(workout.title),
                                    onfinish: {
                                        let workout = workout.clone();
                                        move |_| {
                                            *dialog.write() = if signed_in {
                                                SessionDialog::CompleteExercise {
                                                    workout: workout.clone(),
                                                    sets: FieldValue::new(domain::Sets::DEFAULT),
                                                    weight: FieldValue::new(domain::Load::default()),
                                                }
                                            } else {
                                                SessionDialog::SignIn
                                            };
                                        }
                                    },
                                    workout,
                                }
                            }
                        }
                    }
                    div {
                        class: "has-text-centered mt-5",
                        button {
                            class: "button is-medium is-fullwidth has-text-weight-semibold",
                            class: if finish_state.is_enabled() { "is-success" },
                            disabled: !finish_state.is_enabled(),
                            onclick: move |_| {
                                *dialog.write() = if signed_in {
                                    SessionDialog::FinishSession
                                } else {
                                    SessionDialog::SignIn
                                };
                            },
                            "{finish_state.label()}"
                        }
                        if locked {
                            p {
                                class: "mt-2 is-size-7 has-text-danger has-text-weight-semibold",
                                "This session is locked until next week. You have already finished this session."
                            }
                        }
                        if show_success() {
                            Message {
                                color: Color::Success,
                                "Session completed! Great work."
                            }
                        }
                    }
                }
            }
        }

        match &*dialog.read() {
            SessionDialog::None => rsx! {},
            SessionDialog::SignIn => rsx! {
                Dialog {
                    title: rsx! { "Sign in required" },
                    close_event: move |_| close_dialog(),
                    div {
                        class: "block",
                        "Please log in to finish a workout exercise or session."
                    }
                    DialogButtons {
                        confirm_text: "Log in",
                        confirm_event: move |_| {
                            close_dialog();
                            navigator().push(Route::Login {});
                        },
                        cancel_event: move |_| close_dialog(),
                    }
                }
            },
            SessionDialog::CompleteExercise { workout, sets, weight } => rsx! {
                Dialog {
                    title: rsx! { "Complete Exercise" },
                    close_event: move |_| close_dialog(),
                    p { class: "block is-size-5", "{workout.title}" }
                    InputField {
                        label: "Number of Sets".to_string(),
                        r#type: "number".to_string(),
                        inputmode: "numeric".to_string(),
                        min: "1".to_string(),
                        max: "20".to_string(),
                        help: "Between 1 and 20".to_string(),
                        value: sets.input.clone(),
                        error: if let Err(err) = &sets.validated { err.clone() },
                        has_changed: sets.changed(),
                        oninput: move |event: FormEvent| {
                            if let SessionDialog::CompleteExercise { sets, .. } = &mut *dialog.write() {
                                sets.update(event.value(), |input| domain::Sets::try_from(input));
                            }
                        },
                    }
                    InputField {
                        label: "Weight Used".to_string(),
                        right_icon: rsx! { "kg" },
                        r#type: "number".to_string(),
                        inputmode: "decimal".to_string(),
                        min: "0".to_string(),
                        step: "0.5".to_string(),
                        placeholder: "0 for bodyweight exercises".to_string(),
                        value: weight.input.clone(),
                        error: if let Err(err) = &weight.validated { err.clone() },
                        has_changed: weight.changed(),
                        oninput: move |event: FormEvent| {
                            if let SessionDialog::CompleteExercise { weight, .. } = &mut *dialog.write() {
                                weight.update(event.value(), |input| domain::Load::try_from(input));
                            }
                        },
                    }
                    DialogButtons {
                        confirm_text: "Complete",
                        confirm_event: complete_exercise,
                        cancel_event: move |_| close_dialog(),
                        is_disabled: !FieldValue::all_valid(&[sets as &dyn FieldValueState, weight]),
                    }
                }
            },
            SessionDialog::FinishSession => rsx! {
                Dialog {
                    title: rsx! { "Complete Session" },
                    close_event: move |_| close_dialog(),
                    div {
                        class: "block",
                        "You have completed {progress.read().completed.len()} out of {progress.read().total} exercises."
                    }
                    DialogButtons {
                        confirm_text: "Complete",
                        confirm_event: finish_session,
                        cancel_event: move |_| close_dialog(),
                        is_loading: is_loading(),
                    }
                }
            },
        }
    }
}

#[component]
fn DayButton(
    day: Weekday,
    completed: usize,
    is_locked: bool,
    is_selected: bool,
    is_today: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        button {
            class: "button day-button",
            class: if is_selected { "is-primary" },
            class: if !is_selected && is_locked { "is-success is-light" },
            class: if is_today { "has-text-weight-bold" },
            onclick: move |evt| onclick.call(evt),
            "{domain::weekday_name(day)}"
            if completed > 0 {
                span { class: "tag is-success is-rounded", "{completed}" }
            }
        }
    }
}

#[component]
fn WorkoutCard(
    workout: domain::Workout,
    is_completed: bool,
    can_complete: bool,
    onfinish: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        div {
            class: "card",
            div {
                class: "card-image",
                video {
                    class: "workout-video",
                    controls: true,
                    source { src: workout.video, r#type: "video/mp4" }
                    "Your browser does not support the video tag."
                }
            }
            div {
                class: "card-content",
                p { class: "title is-5", "{workout.title}" }
                p { class: "is-size-7 has-text-grey is-pre-line", "{workout.subtitle}" }
                p {
                    class: "is-size-7 has-text-weight-semibold has-text-{load_color(workout.load)}",
                    "Recommended: {workout.load}"
                }
            }
            footer {
                class: "card-footer",
                button {
                    class: "button is-fullwidth card-footer-item",
                    class: if can_complete { "is-primary" },
                    disabled: !can_complete,
                    onclick: move |evt| onfinish.call(evt),
                    if is_completed { "✓ Completed" } else { "Finish Exercise" }
                }
            }
        }
    }
}

#[derive(Clone, PartialEq)]
enum SessionDialog {
    None,
    SignIn,
    CompleteExercise {
        workout: domain::Workout,
        sets: FieldValue<domain::Sets>,
        weight: FieldValue<domain::Load>,
    },
    FinishSession,
}

/// `None` while loading and for signed-out users.
type WeeklyStatusResource = Resource<Option<Result<domain::WeeklyStatus, domain::ReadError>>>;

fn current_status(weekly_status: WeeklyStatusResource, today: NaiveDate) -> domain::WeeklyStatus {
    match &*weekly_status.read() {
        Some(Some(Ok(status))) => status.clone(),
        _ => domain::WeeklyStatus::new(domain::week_start(today), vec![]),
    }
}

fn complete_session(mut progress: Signal<domain::DayProgress>, mut show_success: Signal<bool>) {
    progress.write().lock();
    show_success.set(true);
    signal_changed_data();
    spawn(async move {
        TimeoutFuture::new(SUCCESS_MESSAGE_MILLIS).await;
        show_success.set(false);
    });
}

async fn send_progress_update(user_id: domain::UserID, program: domain::Program, day: Weekday) {
    let Ok(profile) = DOMAIN_SERVICE.read().get_user_profile(user_id).await else {
        return;
    };
    if !profile.progress_updates {
        return;
    }
    let notification =
        domain::NewNotification::progress(user_id, domain::completion_message(program, day));
    let title = notification.popup_title();
    let message = notification.message.clone();
    if DOMAIN_SERVICE
        .read()
        .create_notification(notification)
        .await
        .is_ok()
    {
        show_popup(title, &message);
    }
}

fn load_color(load: domain::LoadTier) -> Color {
    match load {
        domain::LoadTier::Light => Color::Success,
        domain::LoadTier::Moderate => Color::Warning,
        domain::LoadTier::Heavy => Color::Danger,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(domain::LoadTier::Light, Color::Success)]
    #[case(domain::LoadTier::Moderate, Color::Warning)]
    #[case(domain::LoadTier::Heavy, Color::Danger)]
    fn test_load_color(#[case] load: domain::LoadTier, #[case] expected: Color) {
        assert_eq!(load_color(load), expected);
    }
}
