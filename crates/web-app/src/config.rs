/// Location and public key of the hosted backend.
///
/// An empty URL addresses the origin the app is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub backend_url: &'static str,
    pub backend_key: &'static str,
}

impl Config {
    /// Values baked in from `GROWMUSCLE_BACKEND_URL` and `GROWMUSCLE_BACKEND_KEY` at build time.
    pub const BUILD: Config = Config {
        backend_url: env!("GROWMUSCLE_BACKEND_URL"),
        backend_key: env!("GROWMUSCLE_BACKEND_KEY"),
    };

    #[must_use]
    pub fn rest_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{collection}", self.base_url())
    }

    #[must_use]
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url())
    }

    /// Websocket endpoint of the realtime service.
    ///
    /// A relative backend URL is resolved against `origin`, the `http` scheme is replaced by `ws`.
    #[must_use]
    pub fn realtime_url(&self, origin: &str) -> String {
        let base = if self.backend_url.is_empty() {
            origin.trim_end_matches('/')
        } else {
            self.base_url()
        };
        let base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            base.to_string()
        };
        format!(
            "{base}/realtime/v1/websocket?apikey={}&vsn=1.0.0",
            self.backend_key
        )
    }

    fn base_url(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::BUILD
    }
}
