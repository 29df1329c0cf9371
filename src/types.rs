use serde::{Deserialize, Serialize};

/// Location ids are the small sequential integers printed on the QR codes
pub type LocationId = u32;

/// A single stop on the hunt.
///
/// `clue` is shown after this location has been found and directs the player
/// to the *next* stop. The first record additionally carries `start_clue`
/// (shown when a fresh hunt begins), the final record is flagged `is_last`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub id: LocationId,
    pub name: String,
    pub clue: String,
    pub fun_fact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_clue: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_last: bool,
}
