use std::sync::Arc;

use droplet_core::{
    Account, AccountDevice, AccountDraft, AccountSettings, AccountStore, AccountStoreError,
    AccountUpdate, GetAccountFilter,
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Account store backed by process memory. Device order follows insertion
/// order, matching what the Postgres store guarantees.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create_account(&self, draft: AccountDraft) -> Result<Account, AccountStoreError> {
        let account_id = Uuid::new_v4();
        let account = Account {
            id: account_id,
            user_id: draft.user_id,
            account_devices: draft
                .devices
                .into_iter()
                .map(|device| AccountDevice {
                    id: Uuid::new_v4(),
                    account_id,
                    name: device.name,
                    os: device.os,
                    mac_address: device.mac_address,
                    active: device.active,
                })
                .collect(),
            account_settings: draft.settings.map(|settings| AccountSettings {
                id: Uuid::new_v4(),
                account_id,
                language: settings.language,
            }),
        };
        self.accounts.write().await.push(account.clone());
        Ok(account)
    }

    async fn get_account(
        &self,
        filter: &GetAccountFilter,
    ) -> Result<Option<Account>, AccountStoreError> {
        if filter.is_empty() {
            return Err(AccountStoreError::Unexpected(
                "account filter has no selectors".to_string(),
            ));
        }
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|account| {
                filter.account_id.is_none_or(|id| account.id == id)
                    && filter.user_id.is_none_or(|id| account.user_id == id)
            })
            .cloned())
    }

    async fn update_account(
        &self,
        update: AccountUpdate,
    ) -> Result<Option<Account>, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts.iter_mut().find(|account| account.id == update.id) else {
            return Ok(None);
        };

        account.user_id = update.user_id;
        for device in update.devices {
            match device.id {
                Some(id) => {
                    // Every listed field is written, defaults included.
                    if let Some(existing) =
                        account.account_devices.iter_mut().find(|d| d.id == id)
                    {
                        existing.name = device.name;
                        existing.os = device.os;
                        existing.mac_address = device.mac_address;
                        existing.active = device.active;
                    }
                }
                None => account.account_devices.push(AccountDevice {
                    id: Uuid::new_v4(),
                    account_id: account.id,
                    name: device.name,
                    os: device.os,
                    mac_address: device.mac_address,
                    active: device.active,
                }),
            }
        }

        if let Some(settings) = update.settings {
            match &mut account.account_settings {
                Some(existing) => existing.language = settings.language,
                None => {
                    account.account_settings = Some(AccountSettings {
                        id: Uuid::new_v4(),
                        account_id: account.id,
                        language: settings.language,
                    })
                }
            }
        }

        Ok(Some(account.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droplet_core::{DeviceDraft, DeviceUpsert, SettingsDraft, SettingsUpdate};

    fn draft(user_id: Uuid) -> AccountDraft {
        AccountDraft {
            user_id,
            devices: vec![
                DeviceDraft {
                    name: "laptop".to_string(),
                    os: "linux".to_string(),
                    mac_address: "aa:bb".to_string(),
                    active: true,
                },
                DeviceDraft {
                    name: "phone".to_string(),
                    os: "android".to_string(),
                    mac_address: "cc:dd".to_string(),
                    active: false,
                },
            ],
            settings: Some(SettingsDraft {
                language: "en".to_string(),
            }),
        }
    }

    #[tokio::test]
    async fn create_assigns_ids_and_back_references() {
        let store = InMemoryAccountStore::new();
        let account = store.create_account(draft(Uuid::new_v4())).await.unwrap();

        assert!(!account.id.is_nil());
        for device in &account.account_devices {
            assert_eq!(device.account_id, account.id);
        }
        assert_eq!(
            account.account_settings.as_ref().unwrap().account_id,
            account.id
        );
    }

    #[tokio::test]
    async fn load_returns_the_full_aggregate_in_order() {
        let store = InMemoryAccountStore::new();
        let user_id = Uuid::new_v4();
        let created = store.create_account(draft(user_id)).await.unwrap();

        let loaded = store
            .get_account(&GetAccountFilter::owned_by(created.id, user_id))
            .await
            .unwrap()
            .unwrap();
        let names: Vec<_> = loaded
            .account_devices
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, ["laptop", "phone"]);
        assert_eq!(loaded.account_settings.unwrap().language, "en");
    }

    #[tokio::test]
    async fn update_upserts_devices_and_writes_defaults() {
        let store = InMemoryAccountStore::new();
        let user_id = Uuid::new_v4();
        let created = store.create_account(draft(user_id)).await.unwrap();
        let laptop_id = created.account_devices[0].id;

        let updated = store
            .update_account(AccountUpdate {
                id: created.id,
                user_id,
                devices: vec![
                    DeviceUpsert {
                        id: Some(laptop_id),
                        name: "laptop".to_string(),
                        os: "linux".to_string(),
                        mac_address: "aa:bb".to_string(),
                        active: false,
                    },
                    DeviceUpsert {
                        id: None,
                        name: "tablet".to_string(),
                        os: "ios".to_string(),
                        mac_address: "ee:ff".to_string(),
                        active: true,
                    },
                ],
                settings: Some(SettingsUpdate {
                    language: String::new(),
                }),
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.account_devices.len(), 3);
        assert!(!updated.account_devices[0].active);
        assert_eq!(updated.account_devices[2].name, "tablet");
        assert_eq!(updated.account_settings.unwrap().language, "");
    }

    #[tokio::test]
    async fn update_of_missing_account_returns_none() {
        let store = InMemoryAccountStore::new();
        let result = store
            .update_account(AccountUpdate {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                devices: Vec::new(),
                settings: None,
            })
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
