use dioxus::prelude::*;

use growmuscle_domain::{self as domain, SessionService};

use crate::{
    DOMAIN_SERVICE, NO_CONNECTION, Route,
    component::{
        element::{Color, Message, Title},
        form::{FieldValue, FieldValueState, InputField},
    },
    signal_changed_session,
};

#[component]
pub fn Login() -> Element {
    let mut email = use_signal(FieldValue::<String>::default);
    let mut password = use_signal(FieldValue::<String>::default);
    let mut is_loading = use_signal(|| false);
    let mut failure = use_signal(|| Option::<String>::None);
    let navigator = use_navigator();

    let log_in = move |_| async move {
        let (Ok(email), Ok(password)) = (
            email.read().validated.clone(),
            password.read().validated.clone(),
        ) else {
            return;
        };
        *is_loading.write() = true;
        let result = DOMAIN_SERVICE.read().request_session(&email, &password).await;
        *is_loading.write() = false;
        match result {
            Ok(_) => {
                failure.set(None);
                signal_changed_session();
                navigator.push(Route::Root {});
            }
            Err(domain::ReadError::NotFound) => {
                failure.set(Some("Invalid email or password".to_string()));
            }
            Err(domain::ReadError::Storage(domain::StorageError::NoConnection)) => {
                *NO_CONNECTION.write() = true;
                failure.set(Some("No connection to server".to_string()));
            }
            Err(err) => failure.set(Some(format!("Failed to log in: {err}"))),
        }
    };

    rsx! {
        div {
            class: "container px-3",
            Title { title: "Log in" }
            if let Some(failure) = failure() {
                Message { color: Color::Danger, "{failure}" }
            }
            InputField {
                label: "Email".to_string(),
                r#type: "email".to_string(),
                autocomplete: "email".to_string(),
                value: email.read().input.clone(),
                error: if let Err(err) = &email.read().validated { err.clone() },
                has_changed: email.read().changed(),
                is_disabled: is_loading(),
                oninput: move |event: FormEvent| {
                    email.write().update(event.value(), validate_email);
                },
            }
            InputField {
                label: "Password".to_string(),
                r#type: "password".to_string(),
                autocomplete: "current-password".to_string(),
                value: password.read().input.clone(),
                has_changed: password.read().changed(),
                is_disabled: is_loading(),
                oninput: move |event: FormEvent| {
                    password.write().update(event.value(), validate_password);
                },
            }
            div {
                class: "field is-grouped is-grouped-centered",
                div {
                    class: "control",
                    button {
                        class: "button is-primary",
                        class: if is_loading() { "is-loading" },
                        disabled: !FieldValue::all_valid(&[&*email.read() as &dyn FieldValueState, &*password.read()]),
                        onclick: log_in,
                        "Log in"
                    }
                }
            }
        }
    }
}

fn validate_email(input: &str) -> Result<String, &'static str> {
    let email = input.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email.to_string()),
        _ if email.is_empty() => Err(""),
        _ => Err("Invalid email address"),
    }
}

fn validate_password(input: &str) -> Result<String, &'static str> {
    if input.is_empty() {
        Err("")
    } else {
        Ok(input.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("alice@example.com", Ok("alice@example.com".to_string()))]
    #[case(" alice@example.com ", Ok("alice@example.com".to_string()))]
    #[case("", Err(""))]
    #[case("alice", Err("Invalid email address"))]
    #[case("@example.com", Err("Invalid email address"))]
    #[case("alice@localhost", Err("Invalid email address"))]
    fn test_validate_email(#[case] input: &str, #[case] expected: Result<String, &'static str>) {
        assert_eq!(validate_email(input), expected);
    }

    #[test]
    fn test_validate_password() {
        assert_eq!(validate_password(""), Err(""));
        assert_eq!(validate_password(" secret "), Ok(" secret ".to_string()));
    }
}
