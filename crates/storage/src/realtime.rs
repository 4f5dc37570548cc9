//! Realtime
//!
//! Subscription to inserted notification rows over the Phoenix channel websocket of the hosted
//! backend.

use futures_util::{
    SinkExt, StreamExt,
    future::{Either, select},
};
use gloo_net::websocket::{Message, futures::WebSocket};
use gloo_timers::future::IntervalStream;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

use growmuscle_domain as domain;
use growmuscle_web_app::Config;

use crate::{local_storage, rest};

const HEARTBEAT_INTERVAL_MILLIS: u32 = 30_000;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Storage(#[from] domain::StorageError),
    #[error("failed to open websocket: {0}")]
    Open(String),
    #[error("websocket failed: {0}")]
    Socket(String),
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
}

/// Call `on_insert` for every notification inserted for `user_id` until the connection closes.
pub async fn subscribe_notifications<F>(
    config: &Config,
    user_id: domain::UserID,
    mut on_insert: F,
) -> Result<(), Error>
where
    F: FnMut(domain::Notification),
{
    let session = local_storage::read_session()?;
    let origin = web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default();
    let socket =
        WebSocket::open(&config.realtime_url(&origin)).map_err(|err| Error::Open(err.to_string()))?;
    let (mut write, mut read) = socket.split();
    let mut reference = 0_u64;

    reference += 1;
    write
        .send(Message::Text(serde_json::to_string(&Frame::join(
            user_id,
            &session.access_token,
            reference,
        ))?))
        .await
        .map_err(|err| Error::Socket(err.to_string()))?;
    debug!("subscribed to notifications");

    let mut heartbeat = IntervalStream::new(HEARTBEAT_INTERVAL_MILLIS);
    loop {
        match select(read.next(), heartbeat.next()).await {
            Either::Left((Some(Ok(Message::Text(text))), _)) => {
                match decode_inserted_notification(&text) {
                    Ok(Some(notification)) => on_insert(notification),
                    Ok(None) => {}
                    Err(err) => warn!("failed to decode realtime message: {err}"),
                }
            }
            Either::Left((Some(Ok(Message::Bytes(_))), _)) => {}
            Either::Left((Some(Err(err)), _)) => return Err(Error::Socket(err.to_string())),
            Either::Left((None, _)) => {
                debug!("realtime connection closed");
                return Ok(());
            }
            Either::Right(_) => {
                reference += 1;
                write
                    .send(Message::Text(serde_json::to_string(&Frame::heartbeat(
                        reference,
                    ))?))
                    .await
                    .map_err(|err| Error::Socket(err.to_string()))?;
            }
        }
    }
}

/// Phoenix channel message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Frame {
    pub topic: String,
    pub event: String,
    pub payload: serde_json::Value,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

impl Frame {
    #[must_use]
    pub fn join(user_id: domain::UserID, access_token: &str, reference: u64) -> Self {
        Frame {
            topic: format!("realtime:notifications:{user_id}"),
            event: "phx_join".to_string(),
            payload: json!({
                "config": {
                    "broadcast": { "self": false },
                    "presence": { "key": "" },
                    "postgres_changes": [
                        {
                            "event": "INSERT",
                            "schema": "public",
                            "table": "notifications",
                            "filter": format!("user_id=eq.{user_id}"),
                        }
                    ],
                },
                "access_token": access_token,
            }),
            reference: Some(reference.to_string()),
        }
    }

    #[must_use]
    pub fn heartbeat(reference: u64) -> Self {
        Frame {
            topic: "phoenix".to_string(),
            event: "heartbeat".to_string(),
            payload: json!({}),
            reference: Some(reference.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct ChangePayload {
    data: Change,
}

#[derive(Deserialize)]
struct Change {
    #[serde(rename = "type")]
    kind: String,
    record: serde_json::Value,
}

/// The notification carried by a `postgres_changes` insert event, `None` for any other message.
pub fn decode_inserted_notification(
    text: &str,
) -> Result<Option<domain::Notification>, serde_json::Error> {
    let frame: Frame = serde_json::from_str(text)?;
    if frame.event != "postgres_changes" {
        return Ok(None);
    }
    let change = serde_json::from_value::<ChangePayload>(frame.payload)?.data;
    if change.kind != "INSERT" {
        return Ok(None);
    }
    let notification: rest::Notification = serde_json::from_value(change.record)?;
    Ok(Some(notification.into()))
}
