pub mod app_config;
pub mod booking_repo;
pub mod cabin_repo;
pub mod database;
pub mod guest_repo;
pub mod page_cache;

pub use booking_repo::StoreBookingRepository;
pub use cabin_repo::StoreCabinRepository;
pub use database::DbClient;
pub use guest_repo::StoreGuestRepository;
pub use page_cache::RedisPageCache;
