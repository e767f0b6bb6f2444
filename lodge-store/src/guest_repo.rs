use async_trait::async_trait;
use lodge_core::repository::{GuestRepository, RepoError};
use lodge_shared::GuestProfileUpdate;
use sqlx::PgPool;

pub struct StoreGuestRepository {
    pool: PgPool,
}

impl StoreGuestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuestRepository for StoreGuestRepository {
    async fn update_profile(
        &self,
        guest_id: i64,
        update: &GuestProfileUpdate,
    ) -> Result<(), RepoError> {
        // A missing flag token leaves the stored flag untouched.
        sqlx::query(
            r#"
            UPDATE guests
            SET nationality = $1, "countryFlag" = COALESCE($2, "countryFlag"), "nationalID" = $3
            WHERE id = $4
            "#,
        )
        .bind(&update.nationality)
        .bind(update.country_flag.as_deref())
        .bind(&update.national_id)
        .bind(guest_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
