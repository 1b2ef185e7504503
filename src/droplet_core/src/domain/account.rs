//! The account aggregate: an account plus the devices and settings whose
//! lifecycle is bound to it.
//!
//! Children reference their parent by id only; the aggregate is hydrated on
//! read and flattened on write. Draft and change-set types keep identifier
//! assignment in the store and make update semantics explicit.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A per-user container of devices and settings.
///
/// An account belongs to exactly one user; a user may own several accounts.
/// Loading an account always yields the full aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,
    pub account_devices: Vec<AccountDevice>,
    pub account_settings: Option<AccountSettings>,
}

/// A device attached to an account. MAC addresses are not globally unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDevice {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub os: String,
    pub mac_address: String,
    pub active: bool,
}

/// Per-account settings; one-to-one with the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSettings {
    pub id: Uuid,
    pub account_id: Uuid,
    pub language: String,
}

/// A new aggregate as handed to the store; the store assigns every id.
#[derive(Debug, Clone)]
pub struct AccountDraft {
    pub user_id: Uuid,
    pub devices: Vec<DeviceDraft>,
    pub settings: Option<SettingsDraft>,
}

#[derive(Debug, Clone)]
pub struct DeviceDraft {
    pub name: String,
    pub os: String,
    pub mac_address: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct SettingsDraft {
    pub language: String,
}

/// Explicit change set for a full-aggregate update.
///
/// Every field listed here is written as-is, including default values: an
/// `active: false` or an empty string overwrites the stored value rather
/// than being skipped. `settings: None` means "leave settings untouched".
#[derive(Debug, Clone)]
pub struct AccountUpdate {
    pub id: Uuid,
    pub user_id: Uuid,
    pub devices: Vec<DeviceUpsert>,
    pub settings: Option<SettingsUpdate>,
}

/// A device row in a change set: update by id, or insert when id is absent.
#[derive(Debug, Clone)]
pub struct DeviceUpsert {
    pub id: Option<Uuid>,
    pub name: String,
    pub os: String,
    pub mac_address: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct SettingsUpdate {
    pub language: String,
}
