use droplet_core::{
    Email, GetUserFilter, NewUser, PasswordDigest, User, UserStore, UserStoreError,
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// User store backed by PostgreSQL.
///
/// Queries are built at runtime because the selector set varies per call.
/// The `users.email` unique index is what resolves concurrent sign-ups.
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    mac_address: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            username: row.username,
            email: Email::parse(row.email)
                .map_err(|e| UserStoreError::Unexpected(e.to_string()))?,
            password_digest: PasswordDigest::new(row.password_hash),
            mac_address: row.mac_address,
        })
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, filter: &GetUserFilter) -> Result<Option<User>, UserStoreError> {
        if filter.is_empty() {
            return Err(UserStoreError::Unexpected(
                "user filter has no selectors".to_string(),
            ));
        }

        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT id, username, email, password_hash, mac_address FROM users WHERE 1 = 1",
        );
        if let Some(email) = &filter.email {
            query.push(" AND email = ");
            query.push_bind(email.as_str());
        }
        if let Some(user_id) = filter.user_id {
            query.push(" AND id = ");
            query.push_bind(user_id);
        }

        let row = query
            .build_query_as::<UserRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn create_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
                INSERT INTO users (id, username, email, password_hash, mac_address)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(&user.username)
        .bind(user.email.as_str())
        .bind(user.password_digest.expose_secret())
        .bind(&user.mac_address)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => UserStoreError::EmailTaken,
            _ => UserStoreError::Unexpected(e.to_string()),
        })?;

        Ok(User {
            id,
            username: user.username,
            email: user.email,
            password_digest: user.password_digest,
            mac_address: user.mac_address,
        })
    }
}
