/*
[INPUT]:  Session store contents
[OUTPUT]: Read-only view handed to the rendering layer
[POS]:    Data layer - presentation boundary
[UPDATE]: When the store gains fields the UI should see
*/

use serde::Serialize;

use super::enums::LifecycleStatus;
use super::models::WepinUser;

/// Copy of the session store taken after each action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub status: LifecycleStatus,
    pub profile: Option<WepinUser>,
    pub registration_needed: bool,
    pub current_address: Option<String>,
    pub accounts: Option<Vec<String>>,
    pub balance: Option<String>,
    pub chain_id: Option<u64>,
    pub network: String,
    pub provider_ready: bool,
}
