#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use dioxus::prelude::*;
use log::error;
use strum::IntoEnumIterator;

use growmuscle_domain as domain;
use growmuscle_storage as storage;
use growmuscle_web_app as web_app;

use component::{
    element::{Color, Dialog},
    navbar::Navbar,
};
use page::{
    login::Login, not_found::NotFound, program::WorkoutProgram, root::Root, workouts::Workouts,
};

mod component;
mod page;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Navbar)]
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/workouts")]
    Workouts {},
    #[route("/workouts/:program")]
    WorkoutProgram { program: String },
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");
const BULMA_CSS: &str = "https://cdn.jsdelivr.net/npm/bulma@1.0.4/css/bulma.min.css";
const FONT_AWESOME_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.7.2/css/all.min.css";

static DOMAIN_SERVICE: GlobalSignal<
    domain::Service<storage::rest::REST<storage::rest::GlooNetSendRequest>>,
> = Signal::global(|| domain::Service::new(storage::rest::REST::default()));
static WORKOUT_PLANS: GlobalSignal<HashMap<domain::Program, domain::WorkoutPlan>> =
    Signal::global(|| {
        let mut rng = rand::thread_rng();
        domain::Program::iter()
            .map(|program| (program, domain::WorkoutPlan::generate(program, &mut rng)))
            .collect()
    });
static ALERTS: GlobalSignal<Vec<String>> = Signal::global(Vec::new);
static NO_CONNECTION: GlobalSignal<bool> = Signal::global(|| false);
static SESSION_CHANGED: GlobalSignal<usize> = Signal::global(|| 0);
static DATA_CHANGED: GlobalSignal<usize> = Signal::global(|| 0);

fn main() {
    init_logging();
    dioxus::launch(App);
}

fn init_logging() {
    let _ = web_app::log::init(Arc::new(Mutex::new(storage::local_storage::Log)));
}

#[component]
fn App() -> Element {
    std::panic::set_hook(Box::new(|info| {
        error!("{info}");
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("main"))
            .map(|el| {
                el.set_inner_html(&format!("
                    <section class=\"section\">
                        <div class=\"container\">
                            <div class=\"message is-danger\">
                                <div class=\"message-header\">
                                    <p>Something went wrong</p>
                                </div>
                                <div class=\"message-body\">
                                    <div class=\"block\">
                                        An unexpected error occurred and the application cannot continue.
                                    </div>
                                    <div class=\"block\">
                                        <pre>{info}</pre>
                                    </div>
                                    <div class=\"block field is-grouped is-grouped-centered\">
                                        <button class=\"button\" onclick=\"location.reload()\">
                                            <span class=\"icon\">
                                                <i class=\"fa fa-arrow-rotate-right\"></i>
                                            </span>
                                            <span>Reload page</span>
                                        </button>
                                    </div>
                                </div>
                            </div>
                        </div>
                    </section>
                "));
                Some(())
            });
    }));

    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: BULMA_CSS }
        document::Link { rel: "stylesheet", href: FONT_AWESOME_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div {
            class: "container is-max-desktop py-4",
            Router::<Route> {},
            Alert {}
        }
    }
}

#[component]
fn Alert() -> Element {
    let alert = ALERTS.read().last().cloned();

    rsx! {
        if let Some(message) = alert {
            Dialog {
                color: Color::Danger,
                title: rsx! { "Error" },
                close_event: move |_| { let _ = ALERTS.write().pop(); },
                div {
                    class: "block",
                    "{message}"
                }
                div {
                    class: "field is-grouped is-grouped-centered",
                    div {
                        class: "control",
                        button {
                            class: "button is-danger",
                            onclick: move |_| { let _ = ALERTS.write().pop(); },
                            "Close"
                        }
                    }
                }
            }
        }
    }
}

/// Session of the signed-in user, re-read whenever the user logs in or out.
#[macro_export]
macro_rules! use_session {
    () => {{
        let session = use_resource(|| async {
            let _ = SESSION_CHANGED.read();
            DOMAIN_SERVICE.read().get_session().await
        });
        if let Some(Err(domain::ReadError::Storage(domain::StorageError::NoConnection))) =
            *session.read()
        {
            *NO_CONNECTION.write() = true;
        }
        session
    }};
}

fn signal_changed_session() {
    *SESSION_CHANGED.write() += 1;
}

fn signal_changed_data() {
    *DATA_CHANGED.write() += 1;
}

fn signed_in_user(session: Option<&Result<domain::User, domain::ReadError>>) -> Option<domain::User> {
    session.and_then(|session| session.as_ref().ok()).cloned()
}
