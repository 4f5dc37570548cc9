//! Pop-up notifications shown by the browser.

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{NotificationOptions, NotificationPermission};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// The user has not decided yet.
    Default,
    Unsupported,
}

impl Permission {
    fn from_js(value: NotificationPermission) -> Self {
        match value {
            NotificationPermission::Granted => Permission::Granted,
            NotificationPermission::Denied => Permission::Denied,
            _ => Permission::Default,
        }
    }

    fn from_answer(value: &str) -> Self {
        match value {
            "granted" => Permission::Granted,
            "denied" => Permission::Denied,
            _ => Permission::Default,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("notifications are not supported")]
    Unsupported,
    #[error("notifications are not permitted")]
    NotPermitted,
    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        Error::Js(format!("{value:?}"))
    }
}

fn is_supported() -> bool {
    web_sys::window().is_some_and(|window| window.get("Notification").is_some())
}

#[must_use]
pub fn permission() -> Permission {
    if !is_supported() {
        return Permission::Unsupported;
    }
    Permission::from_js(web_sys::Notification::permission())
}

/// Ask the user for permission unless it has already been granted or denied.
pub async fn request_permission() -> Result<Permission, Error> {
    match permission() {
        Permission::Default => {}
        permission => return Ok(permission),
    }
    let promise = web_sys::Notification::request_permission()?;
    let result = JsFuture::from(promise).await?;
    Ok(result
        .as_string()
        .map_or(Permission::Default, |value| Permission::from_answer(&value)))
}

/// Show a pop-up, if the user has granted the permission.
pub fn show(title: &str, body: &str) -> Result<(), Error> {
    match permission() {
        Permission::Granted => {}
        Permission::Unsupported => return Err(Error::Unsupported),
        Permission::Denied | Permission::Default => return Err(Error::NotPermitted),
    }
    let options = NotificationOptions::new();
    options.set_body(body);
    web_sys::Notification::new_with_options(title, &options)?;
    Ok(())
}
