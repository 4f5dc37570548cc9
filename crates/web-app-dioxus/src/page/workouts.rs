use dioxus::prelude::*;
use strum::IntoEnumIterator;

use growmuscle_domain as domain;

use crate::{
    Route,
    component::element::{Icon, Title},
};

#[component]
pub fn Workouts() -> Element {
    let navigator = use_navigator();

    rsx! {
        div {
            class: "container px-3",
            Title { title: "Workouts" }
            for program in domain::Program::iter() {
                div {
                    key: "{program}",
                    class: "box is-clickable",
                    onclick: move |_| {
                        navigator.push(Route::WorkoutProgram { program: program.slug().to_string() });
                    },
                    div {
                        class: "is-flex is-justify-content-space-between is-align-items-center",
                        div {
                            p { class: "title is-5 has-text-primary", "{program.name()}" }
                            p { class: "is-size-7 has-text-grey", {summary(program)} }
                        }
                        Icon { name: "chevron-right" }
                    }
                }
            }
        }
    }
}

fn summary(program: domain::Program) -> String {
    let rest_days = domain::WEEK
        .iter()
        .filter(|day| program.is_rest_day(**day))
        .map(|day| domain::weekday_name(*day))
        .collect::<Vec<_>>();
    let workouts = program.workouts_per_day();
    format!(
        "{}-{} of {} exercises per training day, rest on {}",
        workouts.start(),
        workouts.end(),
        program.pool().len(),
        rest_days.join(" and ")
    )
}
