use async_trait::async_trait;
use lodge_core::repository::{CabinRepository, RepoError};
use lodge_shared::Cabin;
use sqlx::PgPool;

pub struct StoreCabinRepository {
    pool: PgPool,
}

impl StoreCabinRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CabinRow {
    id: i64,
    name: String,
    #[sqlx(rename = "maxCapacity")]
    max_capacity: i32,
    #[sqlx(rename = "regularPrice")]
    regular_price: f64,
    discount: Option<f64>,
    image: Option<String>,
}

#[async_trait]
impl CabinRepository for StoreCabinRepository {
    async fn get_cabin(
        &self,
        cabin_id: i64,
    ) -> Result<Option<Cabin>, RepoError> {
        let row = sqlx::query_as::<_, CabinRow>(
            r#"SELECT id, name, "maxCapacity", "regularPrice", discount, image FROM cabins WHERE id = $1"#,
        )
        .bind(cabin_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Cabin {
            id: r.id,
            name: r.name,
            max_capacity: r.max_capacity,
            regular_price: r.regular_price,
            discount: r.discount.unwrap_or(0.0),
            image: r.image,
        }))
    }
}
