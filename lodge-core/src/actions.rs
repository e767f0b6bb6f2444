use lodge_shared::{Booking, BookingDraft, BookingUpdate, GuestProfileUpdate, Masked, NewBooking};
use tracing::{error, info, warn};

use crate::cache::{paths, PageCache};
use crate::draft;
use crate::forms::{self, EditReservationForm, ProfileForm, ReservationForm};
use crate::identity::{IdentityProvider, Session};
use crate::repository::{BookingRepository, CabinRepository, GuestRepository};
use crate::{CoreError, CoreResult};

const SIGN_IN_PROVIDER: &str = "google";

/// Where the browser goes once an action has committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Redirect(String),
}

/// The guest-facing form actions, bound to one request's collaborators.
///
/// Every action authenticates first, validates before touching the store, issues
/// at most one mutating store call, and only then invalidates pages and returns
/// a [`Navigation`].
pub struct ReservationActions<'a> {
    identity: &'a dyn IdentityProvider,
    guests: &'a dyn GuestRepository,
    bookings: &'a dyn BookingRepository,
    cabins: &'a dyn CabinRepository,
    cache: &'a dyn PageCache,
}

impl<'a> ReservationActions<'a> {
    pub fn new(
        identity: &'a dyn IdentityProvider,
        guests: &'a dyn GuestRepository,
        bookings: &'a dyn BookingRepository,
        cabins: &'a dyn CabinRepository,
        cache: &'a dyn PageCache,
    ) -> Self {
        Self {
            identity,
            guests,
            bookings,
            cabins,
            cache,
        }
    }

    async fn authenticate(&self) -> CoreResult<Session> {
        self.identity
            .current_session()
            .await
            .ok_or(CoreError::Unauthenticated)
    }

    pub async fn sign_in(&self) -> CoreResult<Navigation> {
        let url = self
            .identity
            .begin_sign_in(SIGN_IN_PROVIDER, paths::ACCOUNT)
            .await?;
        Ok(Navigation::Redirect(url))
    }

    pub async fn sign_out(&self) -> CoreResult<Navigation> {
        let url = self.identity.end_session(paths::ROOT).await?;
        Ok(Navigation::Redirect(url))
    }

    pub async fn update_profile(&self, form: ProfileForm) -> CoreResult<Navigation> {
        let session = self.authenticate().await?;

        if let Err(e) = forms::validate_national_id(&form.national_id) {
            warn!(guest_id = session.guest_id, national_id = %Masked(&form.national_id), "Rejected profile update");
            return Err(e);
        }
        let (nationality, country_flag) = forms::split_nationality(&form.nationality);

        let update = GuestProfileUpdate {
            nationality,
            country_flag,
            national_id: form.national_id,
        };

        self.guests
            .update_profile(session.guest_id, &update)
            .await
            .map_err(|e| {
                error!(guest_id = session.guest_id, "Failed to update guest: {}", e);
                CoreError::PersistenceError("Guest could not be updated".to_string())
            })?;

        self.cache.invalidate(paths::PROFILE).await;
        info!(guest_id = session.guest_id, national_id = %Masked(&update.national_id), "Guest profile updated");

        Ok(Navigation::Stay)
    }

    pub async fn delete_reservation(&self, booking_id: i64) -> CoreResult<Navigation> {
        let session = self.authenticate().await?;

        self.ensure_owned(&session, booking_id, "You are not allowed to delete this booking.")
            .await?;

        self.bookings.delete(booking_id).await.map_err(|e| {
            error!(booking_id, "Failed to delete booking: {}", e);
            CoreError::PersistenceError("Booking could not be deleted".to_string())
        })?;

        self.cache.invalidate(paths::RESERVATIONS).await;
        info!(guest_id = session.guest_id, booking_id, "Booking deleted");

        Ok(Navigation::Stay)
    }

    pub async fn update_reservation(&self, form: EditReservationForm) -> CoreResult<Navigation> {
        let session = self.authenticate().await?;

        // A non-numeric id can never be among the guest's bookings.
        let booking_id = match forms::coerce_int(&form.booking_id) {
            Some(id) => {
                self.ensure_owned(&session, id, "You are not allowed to edit this booking.")
                    .await?;
                id
            }
            None => {
                warn!(guest_id = session.guest_id, raw = %form.booking_id, "Rejected edit of malformed booking id");
                return Err(CoreError::Forbidden(
                    "You are not allowed to edit this booking.".to_string(),
                ));
            }
        };

        let update = BookingUpdate {
            num_guests: forms::parse_num_guests(&form.num_guests)?,
            observations: forms::truncate_observations(&form.observations),
        };
        self.bookings.update(booking_id, &update).await.map_err(|e| {
            error!(booking_id, "Failed to update booking: {}", e);
            CoreError::PersistenceError("Booking could not be updated".to_string())
        })?;

        self.cache.invalidate(&paths::edit_reservation(booking_id)).await;
        self.cache.invalidate(paths::RESERVATIONS).await;
        info!(guest_id = session.guest_id, booking_id, "Booking updated");

        Ok(Navigation::Redirect(paths::RESERVATIONS.to_string()))
    }

    pub async fn create_reservation(
        &self,
        draft: BookingDraft,
        form: ReservationForm,
    ) -> CoreResult<Navigation> {
        let session = self.authenticate().await?;

        let num_guests = forms::parse_num_guests(&form.num_guests)?;
        let observations = forms::truncate_observations(&form.observations);
        let cabin_id = draft.cabin_id;

        let booking = NewBooking::unconfirmed(draft, session.guest_id, num_guests, observations);

        let booking_id = self.bookings.insert(&booking).await.map_err(|e| {
            error!(guest_id = session.guest_id, cabin_id, "Failed to create booking: {}", e);
            CoreError::PersistenceError("Booking could not be created".to_string())
        })?;

        self.cache.invalidate(&paths::cabin(cabin_id)).await;
        info!(guest_id = session.guest_id, booking_id, cabin_id, "Booking created");

        Ok(Navigation::Redirect(paths::THANK_YOU.to_string()))
    }

    /// Builds the trusted booking data for a stay from the cabin's stored prices.
    pub async fn draft_booking(
        &self,
        cabin_id: i64,
        start_date: &str,
        end_date: &str,
    ) -> CoreResult<BookingDraft> {
        self.authenticate().await?;

        let cabin = self
            .cabins
            .get_cabin(cabin_id)
            .await
            .map_err(|e| {
                error!(cabin_id, "Failed to load cabin: {}", e);
                CoreError::PersistenceError("Cabin could not be loaded".to_string())
            })?
            .ok_or_else(|| CoreError::InvalidInput("Cabin not found".to_string()))?;

        let start = draft::parse_stay_date(start_date)?;
        let end = draft::parse_stay_date(end_date)?;
        draft::draft_booking(&cabin, start, end)
    }

    pub async fn list_reservations(&self) -> CoreResult<Vec<Booking>> {
        let session = self.authenticate().await?;

        self.bookings
            .list_for_guest(session.guest_id)
            .await
            .map_err(|e| {
                error!(guest_id = session.guest_id, "Failed to load bookings: {}", e);
                CoreError::PersistenceError("Bookings could not get loaded".to_string())
            })
    }

    async fn ensure_owned(&self, session: &Session, booking_id: i64, denial: &str) -> CoreResult<()> {
        let owned = self
            .bookings
            .is_owned_by(booking_id, session.guest_id)
            .await
            .map_err(|e| {
                error!(guest_id = session.guest_id, "Failed to load bookings: {}", e);
                CoreError::PersistenceError("Bookings could not get loaded".to_string())
            })?;

        if !owned {
            warn!(guest_id = session.guest_id, booking_id, "Booking ownership check failed");
            return Err(CoreError::Forbidden(denial.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{FixedIdentity, MemoryStore, RecordingPageCache};
    use chrono::{TimeZone, Utc};
    use lodge_shared::{BookingStatus, Cabin};

    const GUEST: i64 = 1;
    const OTHER_GUEST: i64 = 2;

    fn session() -> Session {
        Session {
            guest_id: GUEST,
            email: "guest@example.com".to_string(),
            name: Some("Jonas".to_string()),
        }
    }

    fn draft(cabin_id: i64, cabin_price: f64) -> BookingDraft {
        BookingDraft {
            cabin_id,
            cabin_price,
            start_date: Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2026, 12, 2, 0, 0, 0).unwrap(),
            num_nights: 1,
        }
    }

    fn seeded_store() -> MemoryStore {
        MemoryStore::new()
            .with_guest(GUEST, "guest@example.com")
            .with_guest(OTHER_GUEST, "other@example.com")
            .with_cabin(Cabin {
                id: 7,
                name: "001".to_string(),
                max_capacity: 2,
                regular_price: 250.0,
                discount: 0.0,
                image: None,
            })
            // id 1: ours, id 2: someone else's
            .with_booking(NewBooking::unconfirmed(draft(7, 250.0), GUEST, 2, String::new()))
            .with_booking(NewBooking::unconfirmed(draft(7, 250.0), OTHER_GUEST, 1, String::new()))
    }

    fn actions<'a>(
        identity: &'a FixedIdentity,
        store: &'a MemoryStore,
        cache: &'a RecordingPageCache,
    ) -> ReservationActions<'a> {
        ReservationActions::new(identity, store, store, store, cache)
    }

    #[tokio::test]
    async fn test_update_profile_persists_split_nationality() {
        let identity = FixedIdentity::signed_in(session());
        let store = seeded_store();
        let cache = RecordingPageCache::new();

        let nav = actions(&identity, &store, &cache)
            .update_profile(ProfileForm {
                national_id: "AB12CD34".to_string(),
                nationality: "France%fr".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(nav, Navigation::Stay);
        let guest = store.guest(GUEST).await.unwrap();
        assert_eq!(guest.nationality.as_deref(), Some("France"));
        assert_eq!(guest.country_flag.as_deref(), Some("fr"));
        assert_eq!(guest.national_id.as_deref(), Some("AB12CD34"));
        assert_eq!(cache.invalidated().await, vec!["/account/profile"]);
    }

    #[tokio::test]
    async fn test_update_profile_rejects_bad_ids_without_writing() {
        let identity = FixedIdentity::signed_in(session());
        let store = seeded_store();
        let cache = RecordingPageCache::new();
        let gateway = actions(&identity, &store, &cache);

        for bad in ["", "12345", "ABCDEFGHIJKLM", "AB12-CD34", "<script>"] {
            let result = gateway
                .update_profile(ProfileForm {
                    national_id: bad.to_string(),
                    nationality: "France%fr".to_string(),
                })
                .await;
            assert_eq!(result, Err(CoreError::InvalidInput("Provide a valid ID".to_string())));
        }

        assert_eq!(store.mutations().await, 0);
        assert!(cache.invalidated().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_profile_without_flag_token_keeps_stored_flag() {
        let identity = FixedIdentity::signed_in(session());
        let store = seeded_store();
        let cache = RecordingPageCache::new();
        let gateway = actions(&identity, &store, &cache);

        gateway
            .update_profile(ProfileForm {
                national_id: "AB12CD34".to_string(),
                nationality: "Portugal%pt".to_string(),
            })
            .await
            .unwrap();
        gateway
            .update_profile(ProfileForm {
                national_id: "AB12CD34".to_string(),
                nationality: "Portugal".to_string(),
            })
            .await
            .unwrap();

        let guest = store.guest(GUEST).await.unwrap();
        assert_eq!(guest.nationality.as_deref(), Some("Portugal"));
        assert_eq!(guest.country_flag.as_deref(), Some("pt"));
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_persistence_error() {
        let identity = FixedIdentity::signed_in(session());
        let store = seeded_store();
        let cache = RecordingPageCache::new();
        store.fail_writes(true);
        let gateway = actions(&identity, &store, &cache);

        let profile = gateway
            .update_profile(ProfileForm {
                national_id: "AB12CD34".to_string(),
                nationality: "France%fr".to_string(),
            })
            .await;
        assert_eq!(profile, Err(CoreError::PersistenceError("Guest could not be updated".to_string())));

        let deleted = gateway.delete_reservation(1).await;
        assert_eq!(deleted, Err(CoreError::PersistenceError("Booking could not be deleted".to_string())));

        let created = gateway
            .create_reservation(draft(7, 100.0), ReservationForm::default())
            .await;
        assert_eq!(created, Err(CoreError::PersistenceError("Booking could not be created".to_string())));

        assert!(cache.invalidated().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_neither_invalidates_nor_redirects() {
        let identity = FixedIdentity::signed_in(session());
        let store = seeded_store();
        let cache = RecordingPageCache::new();
        store.fail_writes(true);

        let result = actions(&identity, &store, &cache)
            .update_reservation(EditReservationForm {
                booking_id: "1".to_string(),
                num_guests: "3".to_string(),
                observations: "late check-in".to_string(),
            })
            .await;

        assert_eq!(result, Err(CoreError::PersistenceError("Booking could not be updated".to_string())));
        assert!(cache.invalidated().await.is_empty());
        assert_eq!(store.booking(1).await.unwrap().num_guests, 2);
    }

    #[tokio::test]
    async fn test_foreign_edit_is_forbidden_before_guest_count_is_checked() {
        let identity = FixedIdentity::signed_in(session());
        let store = seeded_store();
        let cache = RecordingPageCache::new();
        let gateway = actions(&identity, &store, &cache);

        let foreign = gateway
            .update_reservation(EditReservationForm {
                booking_id: "2".to_string(),
                num_guests: "two".to_string(),
                observations: String::new(),
            })
            .await;
        assert_eq!(
            foreign,
            Err(CoreError::Forbidden("You are not allowed to edit this booking.".to_string()))
        );

        let own = gateway
            .update_reservation(EditReservationForm {
                booking_id: "1".to_string(),
                num_guests: "two".to_string(),
                observations: String::new(),
            })
            .await;
        assert_eq!(
            own,
            Err(CoreError::InvalidInput("Provide a valid number of guests".to_string()))
        );
        assert_eq!(store.mutations().await, 0);
    }

    #[tokio::test]
    async fn test_delete_own_booking() {
        let identity = FixedIdentity::signed_in(session());
        let store = seeded_store();
        let cache = RecordingPageCache::new();

        let nav = actions(&identity, &store, &cache).delete_reservation(1).await.unwrap();

        assert_eq!(nav, Navigation::Stay);
        assert!(store.booking(1).await.is_none());
        assert_eq!(cache.invalidated().await, vec!["/account/reservations"]);
    }

    #[tokio::test]
    async fn test_foreign_booking_is_forbidden() {
        let identity = FixedIdentity::signed_in(session());
        let store = seeded_store();
        let cache = RecordingPageCache::new();
        let gateway = actions(&identity, &store, &cache);

        let deleted = gateway.delete_reservation(2).await;
        assert_eq!(
            deleted,
            Err(CoreError::Forbidden("You are not allowed to delete this booking.".to_string()))
        );

        for booking_id in ["2", "999", "abc"] {
            let edited = gateway
                .update_reservation(EditReservationForm {
                    booking_id: booking_id.to_string(),
                    num_guests: "1".to_string(),
                    observations: "hijack".to_string(),
                })
                .await;
            assert_eq!(
                edited,
                Err(CoreError::Forbidden("You are not allowed to edit this booking.".to_string()))
            );
        }

        assert_eq!(store.mutations().await, 0);
        assert_eq!(store.booking_ids().await, vec![1, 2]);
        assert_eq!(store.booking(2).await.unwrap().num_guests, 1);
    }

    #[tokio::test]
    async fn test_update_reservation_truncates_and_redirects() {
        let identity = FixedIdentity::signed_in(session());
        let store = seeded_store();
        let cache = RecordingPageCache::new();

        let nav = actions(&identity, &store, &cache)
            .update_reservation(EditReservationForm {
                booking_id: "1".to_string(),
                num_guests: "2".to_string(),
                observations: "x".repeat(650),
            })
            .await
            .unwrap();

        assert_eq!(nav, Navigation::Redirect("/account/reservations".to_string()));
        let booking = store.booking(1).await.unwrap();
        assert_eq!(booking.num_guests, 2);
        assert_eq!(booking.observations.chars().count(), 500);
        assert_eq!(
            cache.invalidated().await,
            vec!["/account/reservations/edit/1", "/account/reservations"]
        );
    }

    #[tokio::test]
    async fn test_create_reservation_applies_defaults() {
        let identity = FixedIdentity::signed_in(session());
        let store = seeded_store();
        let cache = RecordingPageCache::new();

        let nav = actions(&identity, &store, &cache)
            .create_reservation(
                draft(7, 100.0),
                ReservationForm {
                    num_guests: "2".to_string(),
                    observations: String::new(),
                },
            )
            .await
            .unwrap();

        assert_eq!(nav, Navigation::Redirect("/cabins/thanks".to_string()));
        let booking = store.booking(3).await.unwrap();
        assert_eq!(booking.guest_id, GUEST);
        assert_eq!(booking.cabin_id, 7);
        assert_eq!(booking.num_guests, 2);
        assert_eq!(booking.status, BookingStatus::Unconfirmed);
        assert!(!booking.is_paid);
        assert!(!booking.has_breakfast);
        assert_eq!(booking.total_price, 100.0);
        assert_eq!(booking.extras_price, 0.0);
        assert_eq!(cache.invalidated().await, vec!["/cabins/7"]);
    }

    #[tokio::test]
    async fn test_create_reservation_truncates_observations() {
        let identity = FixedIdentity::signed_in(session());
        let store = seeded_store();
        let cache = RecordingPageCache::new();

        actions(&identity, &store, &cache)
            .create_reservation(
                draft(7, 100.0),
                ReservationForm {
                    num_guests: "1".to_string(),
                    observations: "ü".repeat(501),
                },
            )
            .await
            .unwrap();

        let booking = store.booking(3).await.unwrap();
        assert_eq!(booking.observations, "ü".repeat(500));
    }

    #[tokio::test]
    async fn test_create_reservation_rejects_non_numeric_guests() {
        let identity = FixedIdentity::signed_in(session());
        let store = seeded_store();
        let cache = RecordingPageCache::new();

        let result = actions(&identity, &store, &cache)
            .create_reservation(
                draft(7, 100.0),
                ReservationForm {
                    num_guests: "two".to_string(),
                    observations: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
        assert_eq!(store.mutations().await, 0);
    }

    #[tokio::test]
    async fn test_anonymous_caller_is_rejected_first() {
        let identity = FixedIdentity::anonymous();
        let store = seeded_store();
        let cache = RecordingPageCache::new();
        store.fail_writes(true);
        let gateway = actions(&identity, &store, &cache);

        // Inputs that would otherwise fail validation or ownership.
        assert_eq!(
            gateway
                .update_profile(ProfileForm {
                    national_id: "bad".to_string(),
                    nationality: String::new(),
                })
                .await,
            Err(CoreError::Unauthenticated)
        );
        assert_eq!(gateway.delete_reservation(2).await, Err(CoreError::Unauthenticated));
        assert_eq!(
            gateway
                .update_reservation(EditReservationForm {
                    booking_id: "abc".to_string(),
                    num_guests: "two".to_string(),
                    observations: String::new(),
                })
                .await,
            Err(CoreError::Unauthenticated)
        );
        assert_eq!(
            gateway
                .create_reservation(draft(7, 100.0), ReservationForm::default())
                .await,
            Err(CoreError::Unauthenticated)
        );
        assert_eq!(gateway.draft_booking(999, "", "").await, Err(CoreError::Unauthenticated));
        assert_eq!(gateway.list_reservations().await, Err(CoreError::Unauthenticated));

        assert_eq!(store.mutations().await, 0);
        assert!(cache.invalidated().await.is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_and_out_redirect() {
        let identity = FixedIdentity::anonymous();
        let store = seeded_store();
        let cache = RecordingPageCache::new();
        let gateway = actions(&identity, &store, &cache);

        assert_eq!(
            gateway.sign_in().await.unwrap(),
            Navigation::Redirect("/auth/google?callbackUrl=/account".to_string())
        );
        assert_eq!(gateway.sign_out().await.unwrap(), Navigation::Redirect("/".to_string()));
    }

    #[tokio::test]
    async fn test_list_and_draft() {
        let identity = FixedIdentity::signed_in(session());
        let store = seeded_store();
        let cache = RecordingPageCache::new();
        let gateway = actions(&identity, &store, &cache);

        let bookings = gateway.list_reservations().await.unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].id, 1);
        assert_eq!(bookings[0].cabin_name.as_deref(), Some("001"));

        let draft = gateway.draft_booking(7, "2026-12-01", "2026-12-03").await.unwrap();
        assert_eq!(draft.num_nights, 2);
        assert_eq!(draft.cabin_price, 500.0);

        assert_eq!(
            gateway.draft_booking(8, "2026-12-01", "2026-12-03").await,
            Err(CoreError::InvalidInput("Cabin not found".to_string()))
        );
    }
}
