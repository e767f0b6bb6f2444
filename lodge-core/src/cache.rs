use async_trait::async_trait;

/// Marks rendered pages stale. Invalidation is fire-and-forget: implementations
/// log their own failures and never report back.
#[async_trait]
pub trait PageCache: Send + Sync {
    async fn invalidate(&self, path: &str);
}

pub mod paths {
    pub const ROOT: &str = "/";
    pub const ACCOUNT: &str = "/account";
    pub const PROFILE: &str = "/account/profile";
    pub const RESERVATIONS: &str = "/account/reservations";
    pub const THANK_YOU: &str = "/cabins/thanks";

    pub fn edit_reservation(booking_id: i64) -> String {
        format!("/account/reservations/edit/{}", booking_id)
    }

    pub fn cabin(cabin_id: i64) -> String {
        format!("/cabins/{}", cabin_id)
    }
}
