use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lodge_core::repository::{BookingRepository, RepoError};
use lodge_shared::{Booking, BookingStatus, BookingUpdate, NewBooking};
use sqlx::PgPool;

pub struct StoreBookingRepository {
    pool: PgPool,
}

impl StoreBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i64,
    created_at: DateTime<Utc>,
    #[sqlx(rename = "startDate")]
    start_date: DateTime<Utc>,
    #[sqlx(rename = "endDate")]
    end_date: DateTime<Utc>,
    #[sqlx(rename = "numNights")]
    num_nights: i32,
    #[sqlx(rename = "numGuests")]
    num_guests: i32,
    #[sqlx(rename = "totalPrice")]
    total_price: f64,
    status: String,
    #[sqlx(rename = "guestId")]
    guest_id: i64,
    #[sqlx(rename = "cabinId")]
    cabin_id: i64,
    #[sqlx(rename = "cabinName")]
    cabin_name: Option<String>,
    #[sqlx(rename = "cabinImage")]
    cabin_image: Option<String>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = RepoError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            created_at: row.created_at,
            start_date: row.start_date,
            end_date: row.end_date,
            num_nights: row.num_nights,
            num_guests: row.num_guests,
            total_price: row.total_price,
            status: row.status.parse::<BookingStatus>()?,
            guest_id: row.guest_id,
            cabin_id: row.cabin_id,
            cabin_name: row.cabin_name,
            cabin_image: row.cabin_image,
        })
    }
}

#[async_trait]
impl BookingRepository for StoreBookingRepository {
    async fn list_for_guest(
        &self,
        guest_id: i64,
    ) -> Result<Vec<Booking>, RepoError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT b.id, b.created_at, b."startDate", b."endDate", b."numNights", b."numGuests",
                   b."totalPrice", b.status, b."guestId", b."cabinId",
                   c.name AS "cabinName", c.image AS "cabinImage"
            FROM bookings b
            LEFT JOIN cabins c ON c.id = b."cabinId"
            WHERE b."guestId" = $1
            ORDER BY b."startDate"
            "#,
        )
        .bind(guest_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn is_owned_by(
        &self,
        booking_id: i64,
        guest_id: i64,
    ) -> Result<bool, RepoError> {
        let owned = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM bookings WHERE id = $1 AND "guestId" = $2)"#,
        )
        .bind(booking_id)
        .bind(guest_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(owned)
    }

    async fn insert(
        &self,
        booking: &NewBooking,
    ) -> Result<i64, RepoError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO bookings ("cabinId", "guestId", "startDate", "endDate", "numNights", "numGuests",
                                  observations, "cabinPrice", "extrasPrice", "totalPrice", "isPaid",
                                  "hasBreakfast", status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
        )
        .bind(booking.cabin_id)
        .bind(booking.guest_id)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.num_nights)
        .bind(booking.num_guests)
        .bind(&booking.observations)
        .bind(booking.cabin_price)
        .bind(booking.extras_price)
        .bind(booking.total_price)
        .bind(booking.is_paid)
        .bind(booking.has_breakfast)
        .bind(booking.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update(
        &self,
        booking_id: i64,
        update: &BookingUpdate,
    ) -> Result<(), RepoError> {
        sqlx::query(r#"UPDATE bookings SET "numGuests" = $1, observations = $2 WHERE id = $3"#)
            .bind(update.num_guests)
            .bind(&update.observations)
            .bind(booking_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(
        &self,
        booking_id: i64,
    ) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(booking_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
