use dioxus::prelude::*;

use growmuscle_domain::{self as domain, SessionService};

use crate::{
    DOMAIN_SERVICE, NO_CONNECTION, Route, SESSION_CHANGED,
    component::element::{CenteredBlock, Icon, LoadingPage, Title},
    signed_in_user, use_session,
};

#[component]
pub fn Root() -> Element {
    let session = use_session!();
    let navigator = use_navigator();

    if session.read().is_none() {
        return rsx! { LoadingPage {} };
    }

    let user = signed_in_user(session.read().as_ref());

    rsx! {
        div {
            class: "container px-3",
            Title {
                title: "Grow A Muscle",
                subtitle: "Weekly workout programs with reminders and progress updates",
            }
            CenteredBlock {
                div {
                    class: "buttons is-centered",
                    button {
                        class: "button is-primary",
                        onclick: move |_| { navigator.push(Route::Workouts {}); },
                        Icon { name: "person-running" }
                        span { "Browse workouts" }
                    }
                    if user.is_none() {
                        button {
                            class: "button is-light",
                            onclick: move |_| { navigator.push(Route::Login {}); },
                            Icon { name: "sign-in-alt" }
                            span { "Log in" }
                        }
                    }
                }
            }
        }
    }
}
