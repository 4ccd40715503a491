use serde::{Deserialize, Serialize};

use crate::models::place::{Coordinate, PlaceRecord};
use crate::models::search_intent::SearchIntent;

/// Messages posted by the browser extension, tagged by `action`.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(tag = "action")]
pub enum ExtensionRequest {
    #[serde(rename = "aiSearch")]
    AiSearch {
        #[serde(default)]
        query: Option<String>,
        #[serde(default)]
        location: Option<Coordinate>,
    },
    #[serde(rename = "selectPlace", rename_all = "camelCase")]
    SelectPlace { place_id: String },
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(untagged)]
pub enum ExtensionResponse {
    Success {
        success: bool,
        results: Vec<PlaceRecord>,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl ExtensionResponse {
    pub fn success(results: Vec<PlaceRecord>) -> Self {
        Self::Success {
            success: true,
            results,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            success: false,
            error: error.into(),
        }
    }
}

/// Forwarded to the active tab when the user picks a result.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSelection {
    pub action: String,
    pub place_id: String,
}

impl PlaceSelection {
    pub fn new(place_id: impl Into<String>) -> Self {
        Self {
            action: "selectPlace".to_string(),
            place_id: place_id.into(),
        }
    }
}

/// What the presentation layer renders: the accepted result set of the
/// latest search plus the current selection.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultView {
    pub sequence: u64,
    pub intent: SearchIntent,
    pub places: Vec<PlaceRecord>,
    pub selected_place_id: Option<String>,
}
