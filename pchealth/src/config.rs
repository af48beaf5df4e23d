//! Endpoint derivation from one server URL.

use thiserror::Error;
use url::Url;

pub const SOCKET_PATH: &str = "/socket.io/";
pub const CLEANUP_PATH: &str = "/api/clean_cache";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("invalid server URL: {0}")]
    Parse(#[from] url::ParseError),
    #[error("unsupported scheme {0:?} (expected http, https, ws or wss)")]
    Scheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub socket: Url,
    pub cleanup: Url,
}

impl Endpoints {
    /// `http(s)://host:port` gets the Socket.IO path appended; `ws(s)://...` is used as is.
    pub fn from_base(base: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(base.trim())?;
        let (ws_scheme, http_scheme, explicit_socket) = match url.scheme() {
            "http" => ("ws", "http", false),
            "https" => ("wss", "https", false),
            "ws" => ("ws", "http", true),
            "wss" => ("wss", "https", true),
            other => return Err(EndpointError::Scheme(other.to_string())),
        };

        let origin = origin_of(&url, http_scheme)?;
        let socket = if explicit_socket {
            url
        } else {
            let mut s = origin_of(&url, ws_scheme)?.join(SOCKET_PATH)?;
            s.set_query(Some("EIO=4&transport=websocket"));
            s
        };
        let cleanup = origin.join(CLEANUP_PATH)?;
        Ok(Self { socket, cleanup })
    }
}

fn origin_of(url: &Url, scheme: &str) -> Result<Url, EndpointError> {
    let host = url.host_str().ok_or(url::ParseError::EmptyHost)?;
    let text = match url.port() {
        Some(p) => format!("{scheme}://{host}:{p}/"),
        None => format!("{scheme}://{host}/"),
    };
    Ok(Url::parse(&text)?)
}
