//! Pluggy wire types
//!
//! Request and response bodies for the handful of Pluggy endpoints we call.
//! Account and transaction records are kept as raw JSON: they are passed
//! back to callers untouched and only a couple of numeric fields are read.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A raw account or transaction record as returned by Pluggy
pub type Record = JsonValue;

/// Paginated listing endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Accounts,
    Transactions,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Resource::Accounts => "/accounts",
            Resource::Transactions => "/transactions",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Accounts => "accounts",
            Resource::Transactions => "transactions",
        }
    }

    pub(crate) fn operation(self) -> &'static str {
        match self {
            Resource::Accounts => "accounts listing",
            Resource::Transactions => "transactions listing",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// POST /auth body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthRequest<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

/// POST /auth response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthResponse {
    #[serde(default)]
    pub api_key: Option<String>,
}

/// POST /connect_token body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConnectTokenRequest<'a> {
    pub client_user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<&'a str>,
}

/// Widget token plus the full upstream payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectToken {
    pub token: String,
    pub raw: JsonValue,
}

impl ConnectToken {
    /// Extract the token from a POST /connect_token payload.
    ///
    /// Pluggy documents `accessToken`; `access_token` is accepted too.
    pub fn from_payload(raw: JsonValue) -> Option<Self> {
        let token = ["accessToken", "access_token"]
            .iter()
            .filter_map(|key| raw.get(*key).and_then(JsonValue::as_str))
            .find(|token| !token.is_empty())?
            .to_string();

        Some(Self { token, raw })
    }
}

/// One page of a cursor-paginated listing
#[derive(Debug, Deserialize)]
pub(crate) struct Page {
    /// Missing or null results mean an empty page
    #[serde(default)]
    results: Option<Vec<Record>>,
    #[serde(default, rename = "nextCursor", alias = "next_cursor")]
    pub next_cursor: Option<String>,
}

impl Page {
    pub fn into_results(self) -> Vec<Record> {
        self.results.unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.results.as_ref().map_or(0, Vec::len)
    }

    /// The cursor for the following page, if there is one
    pub fn continuation(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|cursor| !cursor.is_empty())
    }
}
