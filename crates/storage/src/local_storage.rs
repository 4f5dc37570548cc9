use std::collections::VecDeque;

use gloo_storage::{LocalStorage, Storage as GlooStorage, errors::StorageError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use growmuscle_domain as domain;
use growmuscle_web_app::log;

const KEY_SESSION: &str = "session";
const KEY_LOG: &str = "log";

/// Auth session returned by the hosted auth endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub access_token: String,
}

impl From<Session> for domain::User {
    fn from(value: Session) -> Self {
        domain::User {
            id: value.user_id.into(),
            email: value.email,
        }
    }
}

pub fn read_session() -> Result<Session, domain::StorageError> {
    LocalStorage::get(KEY_SESSION).map_err(|err| match err {
        StorageError::KeyNotFound(_) => domain::StorageError::NoSession,
        err => domain::StorageError::Other(err.into()),
    })
}

pub fn write_session(session: &Session) -> Result<(), domain::StorageError> {
    LocalStorage::set(KEY_SESSION, session).map_err(|err| domain::StorageError::Other(err.into()))
}

pub fn delete_session() {
    LocalStorage::delete(KEY_SESSION);
}

pub struct Log;

impl log::Repository for Log {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match LocalStorage::get(KEY_LOG) {
            Ok(entries) => Ok(entries),
            Err(err) => match err {
                StorageError::KeyNotFound(_) => Ok(VecDeque::new()),
                err => Err(err),
            },
        }
        .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        log::push_entry(&mut entries, entry);
        LocalStorage::set(KEY_LOG, entries).map_err(|err| log::Error::Unknown(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    mod wasm {
        use pretty_assertions::assert_eq;
        use wasm_bindgen_test::wasm_bindgen_test;

        use growmuscle_web_app::log::Repository;

        use crate::tests::data::SESSION;

        use super::*;

        #[wasm_bindgen_test]
        fn test_session() {
            delete_session();
            assert!(matches!(
                read_session(),
                Err(domain::StorageError::NoSession)
            ));

            write_session(&SESSION).unwrap();
            assert_eq!(read_session().unwrap(), SESSION.clone());

            delete_session();
            assert!(matches!(
                read_session(),
                Err(domain::StorageError::NoSession)
            ));
        }

        #[wasm_bindgen_test]
        fn test_log() {
            LocalStorage::delete(KEY_LOG);
            assert_eq!(Log.read_entries().unwrap(), VecDeque::new());

            let entry = log::Entry {
                time: "Mar 04 18:00:00".to_string(),
                level: ::log::Level::Info,
                message: "started".to_string(),
            };
            Log.write_entry(entry.clone()).unwrap();

            assert_eq!(Log.read_entries().unwrap(), VecDeque::from([entry]));
        }
    }
}
