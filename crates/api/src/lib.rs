//! Client for the clinic REST API: transport, envelope decoding, error
//! classification, and one typed service per resource.

pub mod client;
pub mod envelope;
pub mod forced_logout;
pub mod models;
pub mod services;

pub use client::{ApiClient, ClientOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, UnauthorizedHook};
pub use forced_logout::{ForcedLogout, Navigator};
pub use services::{
    AppointmentsApi, AuthApi, ClientPets, ClientsApi, DailyAppointments, DailyQuery,
    InventoryApi, MIN_SEARCH_LEN, PageSource, PetHistory, PetsApi, SEARCH_KEY, UserFilter,
    UsersApi,
};
