use droplet_core::{
    Account, AccountDevice, AccountDraft, AccountSettings, AccountStore, AccountStoreError,
    AccountUpdate, GetAccountFilter,
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Account store backed by PostgreSQL.
///
/// Aggregates are written inside one transaction and hydrated eagerly on
/// read. Device order is the insertion order (`seq`). Cascade rules live in
/// the schema, not here.
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn hydrate(&self, id: Uuid, user_id: Uuid) -> Result<Account, AccountStoreError> {
        let devices = sqlx::query_as::<_, DeviceRow>(
            r#"
                SELECT id, account_id, name, os, mac_address, active
                FROM account_devices
                WHERE account_id = $1
                ORDER BY seq
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        let settings = sqlx::query_as::<_, SettingsRow>(
            r#"
                SELECT id, account_id, language
                FROM account_settings
                WHERE account_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        Ok(Account {
            id,
            user_id,
            account_devices: devices.into_iter().map(AccountDevice::from).collect(),
            account_settings: settings.map(AccountSettings::from),
        })
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    user_id: Uuid,
}

#[derive(sqlx::FromRow)]
struct DeviceRow {
    id: Uuid,
    account_id: Uuid,
    name: String,
    os: String,
    mac_address: String,
    active: bool,
}

impl From<DeviceRow> for AccountDevice {
    fn from(row: DeviceRow) -> Self {
        AccountDevice {
            id: row.id,
            account_id: row.account_id,
            name: row.name,
            os: row.os,
            mac_address: row.mac_address,
            active: row.active,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SettingsRow {
    id: Uuid,
    account_id: Uuid,
    language: String,
}

impl From<SettingsRow> for AccountSettings {
    fn from(row: SettingsRow) -> Self {
        AccountSettings {
            id: row.id,
            account_id: row.account_id,
            language: row.language,
        }
    }
}

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Creating account in PostgreSQL", skip_all)]
    async fn create_account(&self, draft: AccountDraft) -> Result<Account, AccountStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        let account_id = Uuid::new_v4();
        sqlx::query("INSERT INTO accounts (id, user_id) VALUES ($1, $2)")
            .bind(account_id)
            .bind(draft.user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        for device in &draft.devices {
            sqlx::query(
                r#"
                    INSERT INTO account_devices (id, account_id, name, os, mac_address, active)
                    VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(account_id)
            .bind(&device.name)
            .bind(&device.os)
            .bind(&device.mac_address)
            .bind(device.active)
            .execute(&mut *tx)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;
        }

        if let Some(settings) = &draft.settings {
            sqlx::query(
                "INSERT INTO account_settings (id, account_id, language) VALUES ($1, $2, $3)",
            )
            .bind(Uuid::new_v4())
            .bind(account_id)
            .bind(&settings.language)
            .execute(&mut *tx)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        self.hydrate(account_id, draft.user_id).await
    }

    #[tracing::instrument(name = "Retrieving account from PostgreSQL", skip_all)]
    async fn get_account(
        &self,
        filter: &GetAccountFilter,
    ) -> Result<Option<Account>, AccountStoreError> {
        if filter.is_empty() {
            return Err(AccountStoreError::Unexpected(
                "account filter has no selectors".to_string(),
            ));
        }

        let mut query =
            QueryBuilder::<Postgres>::new("SELECT id, user_id FROM accounts WHERE 1 = 1");
        if let Some(account_id) = filter.account_id {
            query.push(" AND id = ");
            query.push_bind(account_id);
        }
        if let Some(user_id) = filter.user_id {
            query.push(" AND user_id = ");
            query.push_bind(user_id);
        }

        let row = query
            .build_query_as::<AccountRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row.id, row.user_id).await?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(name = "Updating account in PostgreSQL", skip_all)]
    async fn update_account(
        &self,
        update: AccountUpdate,
    ) -> Result<Option<Account>, AccountStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        let exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM accounts WHERE id = $1")
            .bind(update.id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;
        if exists.is_none() {
            return Ok(None);
        }

        sqlx::query("UPDATE accounts SET user_id = $1 WHERE id = $2")
            .bind(update.user_id)
            .bind(update.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        for device in &update.devices {
            match device.id {
                // Full-row write: default-valued fields overwrite too.
                Some(device_id) => {
                    sqlx::query(
                        r#"
                            UPDATE account_devices
                            SET name = $1, os = $2, mac_address = $3, active = $4
                            WHERE id = $5 AND account_id = $6
                        "#,
                    )
                    .bind(&device.name)
                    .bind(&device.os)
                    .bind(&device.mac_address)
                    .bind(device.active)
                    .bind(device_id)
                    .bind(update.id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;
                }
                None => {
                    sqlx::query(
                        r#"
                            INSERT INTO account_devices (id, account_id, name, os, mac_address, active)
                            VALUES ($1, $2, $3, $4, $5, $6)
                        "#,
                    )
                    .bind(Uuid::new_v4())
                    .bind(update.id)
                    .bind(&device.name)
                    .bind(&device.os)
                    .bind(&device.mac_address)
                    .bind(device.active)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;
                }
            }
        }

        if let Some(settings) = &update.settings {
            sqlx::query(
                r#"
                    INSERT INTO account_settings (id, account_id, language)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (account_id) DO UPDATE SET language = EXCLUDED.language
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(update.id)
            .bind(&settings.language)
            .execute(&mut *tx)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        Ok(Some(self.hydrate(update.id, update.user_id).await?))
    }
}
