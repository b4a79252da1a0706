//! One service API per backend resource, each a thin typed layer over
//! [`ApiClient`](crate::ApiClient).

use async_trait::async_trait;

use purplepaw_core::ClientResult;
use purplepaw_table::{PageRequest, PageResult};

pub mod appointments;
pub mod auth;
pub mod clients;
pub mod inventory;
pub mod pets;
pub mod users;

pub use appointments::{AppointmentsApi, DailyAppointments, DailyQuery};
pub use auth::AuthApi;
pub use clients::{ClientsApi, MIN_SEARCH_LEN, SEARCH_KEY};
pub use inventory::InventoryApi;
pub use pets::{ClientPets, PetHistory, PetsApi};
pub use users::{UserFilter, UsersApi};

/// Something a list view can page through.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait PageSource {
    type Row: Send;

    async fn fetch_page(&self, request: &PageRequest) -> ClientResult<PageResult<Self::Row>>;
}
