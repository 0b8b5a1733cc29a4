use crate::domain::Coordinate;
use alloc::format;
use alloc::string::String;
#[cfg(feature = "std")]
use alloc::vec::Vec;
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// Every call the client makes against the game server.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    /// Map geometry.
    FetchGame,
    FetchUnits,
    FetchTargets,
    AddUnit(Coordinate),
    DeleteUnit(usize),
    SetDestination { index: usize, to: Coordinate },
    AddTarget(Coordinate),
    /// Removes every target at once.
    ClearTargets,
    /// Advance the game by one turn.
    RunTurn,
}

impl ApiRequest {
    pub fn method(&self) -> Method {
        match self {
            ApiRequest::FetchGame | ApiRequest::FetchUnits | ApiRequest::FetchTargets => {
                Method::Get
            }
            ApiRequest::AddUnit(_)
            | ApiRequest::SetDestination { .. }
            | ApiRequest::AddTarget(_)
            | ApiRequest::RunTurn => Method::Post,
            ApiRequest::DeleteUnit(_) | ApiRequest::ClearTargets => Method::Delete,
        }
    }

    /// Path relative to the server's base URL, with a leading slash.
    pub fn path(&self) -> String {
        match self {
            ApiRequest::FetchGame => String::from("/game"),
            ApiRequest::FetchUnits | ApiRequest::AddUnit(_) => String::from("/units"),
            ApiRequest::FetchTargets | ApiRequest::AddTarget(_) | ApiRequest::ClearTargets => {
                String::from("/targets")
            }
            ApiRequest::DeleteUnit(index) | ApiRequest::SetDestination { index, .. } => {
                format!("/units/{}", index)
            }
            ApiRequest::RunTurn => String::from("/game/run"),
        }
    }

    /// JSON body, `{"x": .., "y": ..}`, for the calls that carry one.
    pub fn body(&self) -> Option<Coordinate> {
        match self {
            ApiRequest::AddUnit(at) | ApiRequest::AddTarget(at) => Some(*at),
            ApiRequest::SetDestination { to, .. } => Some(*to),
            _ => None,
        }
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

/// Raw reply to a successful request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerResponse {
    pub status: u16,
    pub body: String,
}

impl ServerResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        ServerResponse { status, body: body.into() }
    }

    #[cfg(feature = "std")]
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Body split into display lines: pretty-printed when it is JSON, as-is
    /// otherwise.
    #[cfg(feature = "std")]
    pub fn pretty_lines(&self) -> Vec<String> {
        let text = match self.json() {
            Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| self.body.clone()),
            Err(_) => self.body.clone(),
        };
        text.lines().map(String::from).collect()
    }
}

/// What the last menu action produced, kept for the debug panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Response(ServerResponse),
    /// The form was submitted with unusable values; nothing was sent.
    Rejected(String),
}

impl Outcome {
    #[cfg(feature = "std")]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Outcome::Response(response) => {
                let mut lines = alloc::vec![format!("status {}", response.status)];
                lines.extend(response.pretty_lines());
                lines
            }
            Outcome::Rejected(reason) => alloc::vec![format!("not sent: {}", reason)],
        }
    }
}
