//! Native application shell: wires config, storage, session, API client and
//! router together the way the browser entry point does.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;

use purplepaw_api::{
    ApiClient, AppointmentsApi, AuthApi, ClientPets, ClientsApi, DailyAppointments, DailyQuery,
    ForcedLogout, InventoryApi, PetHistory, PetsApi, UsersApi,
};
use purplepaw_auth::{LOGIN_PATH, SessionStorage, SessionStore, StorageError};
use purplepaw_core::ApiError;

use crate::config::ClientConfig;
use crate::layout::Layout;
use crate::login::AuthFlow;
use crate::notify::{NotificationLog, Notifier};
use crate::routes::{Navigation, Router};
use crate::storage_fs::FileStorage;
use crate::views::ListController;
use crate::views::{appointments, clients, inventory, pets, users};

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Last path the app was sent to. Forced logout writes here.
#[derive(Debug)]
pub struct Location(Mutex<String>);

impl Location {
    fn new(path: &str) -> Self {
        Self(Mutex::new(path.to_string()))
    }

    pub fn current(&self) -> String {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set(&self, path: &str) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = path.to_string();
    }
}

pub struct Shell {
    config: ClientConfig,
    session: Arc<SessionStore>,
    client: ApiClient,
    notifications: Arc<NotificationLog>,
    router: Router,
    location: Arc<Location>,
}

impl Shell {
    /// Session persisted to `{data_dir}/purplepaw/session.json`.
    pub fn open(config: ClientConfig) -> Result<Self, ShellError> {
        let storage = FileStorage::open(config.data_dir.as_deref())?;
        tracing::debug!(path = %storage.path().display(), "session file");
        Self::with_storage(config, storage)
    }

    pub fn with_storage(
        config: ClientConfig,
        storage: Arc<dyn SessionStorage>,
    ) -> Result<Self, ShellError> {
        let session = SessionStore::arc(storage.clone());
        session.initialize();

        let location = Arc::new(Location::new(LOGIN_PATH));
        let navigator = {
            let location = location.clone();
            move |path: &str| location.set(path)
        };
        let client = ApiClient::new(config.client_options(), storage)?
            .with_unauthorized_hook(ForcedLogout::arc(session.clone(), Arc::new(navigator)));

        tracing::info!(api_url = %config.api_url, "shell ready");

        Ok(Self {
            config,
            session,
            client,
            notifications: Arc::new(NotificationLog::new()),
            router: Router::default(),
            location,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn notifications(&self) -> &Arc<NotificationLog> {
        &self.notifications
    }

    pub fn location(&self) -> String {
        self.location.current()
    }

    fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifications.clone()
    }

    /// Resolve `path` against the current session and move there.
    pub fn navigate(&self, path: &str) -> Navigation {
        let navigation = self.router.resolve(path, &self.session.snapshot());
        if let Navigation::Show { path, .. } = &navigation {
            self.location.set(path);
        }
        navigation
    }

    pub fn layout(&self) -> Option<Layout> {
        Layout::for_session(&self.session.snapshot(), &self.location())
    }

    pub fn auth(&self) -> AuthFlow {
        AuthFlow::new(
            AuthApi::new(self.client.clone()),
            self.session.clone(),
            self.notifier(),
        )
    }

    pub fn users(&self) -> ListController<UsersApi> {
        ListController::new(
            UsersApi::new(self.client.clone()),
            users::default_request(self.config.page_size),
            self.notifier(),
        )
    }

    pub fn clients(&self) -> ListController<ClientsApi> {
        ListController::new(
            ClientsApi::new(self.client.clone()),
            clients::default_request(self.config.page_size),
            self.notifier(),
        )
    }

    pub fn inventory(&self) -> ListController<InventoryApi> {
        ListController::new(
            InventoryApi::new(self.client.clone()),
            inventory::default_request(self.config.page_size),
            self.notifier(),
        )
    }

    /// The signed-in veterinarian's agenda for `date`. `None` when anonymous.
    pub fn appointments(&self, date: NaiveDate) -> Option<ListController<DailyAppointments>> {
        let veterinarian_id = self.session.snapshot().identity()?.id.clone();
        let source = AppointmentsApi::new(self.client.clone()).for_day(DailyQuery {
            date,
            veterinarian_id,
        });
        Some(ListController::new(
            source,
            appointments::default_request(self.config.page_size),
            self.notifier(),
        ))
    }

    /// Pets of the signed-in client. `None` when anonymous.
    pub fn pets(&self) -> Option<ListController<ClientPets>> {
        let client_id = self.session.snapshot().identity()?.id.clone();
        Some(ListController::new(
            PetsApi::new(self.client.clone()).owned_by(client_id),
            pets::default_request(self.config.page_size),
            self.notifier(),
        ))
    }

    pub fn pet_history(&self, pet_id: &str) -> ListController<PetHistory> {
        ListController::new(
            PetsApi::new(self.client.clone()).history_of(pet_id),
            pets::history_request(self.config.page_size),
            self.notifier(),
        )
    }
}
