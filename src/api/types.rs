//! Wire types for the `/ask` endpoint.

use serde::{Deserialize, Serialize};

/// JSON body sent with `POST /ask`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AskRequest {
    pub prompt: String,
}

/// JSON body of a successful `/ask` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AskResponse {
    pub answer: String,
}
