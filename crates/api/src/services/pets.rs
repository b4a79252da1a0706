use async_trait::async_trait;

use purplepaw_core::{ClientResult, UserId};
use purplepaw_table::{PageRequest, PageResult};

use super::PageSource;
use crate::ApiClient;
use crate::models::{MedicalRecord, Pet, PetList};

/// A client's pets and each pet's clinical history. Neither endpoint pages,
/// so both lists are paged in memory.
#[derive(Debug, Clone)]
pub struct PetsApi {
    client: ApiClient,
}

impl PetsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn for_client(&self, client_id: &UserId) -> ClientResult<Vec<Pet>> {
        let list: PetList = self
            .client
            .get(&format!("/veterinary/clients/{client_id}/pets"), &[])
            .await?;
        tracing::debug!(client_id = %client_id, pets = list.mascotas.len(), "pets loaded");
        Ok(list.mascotas)
    }

    pub async fn history(&self, pet_id: &str) -> ClientResult<Vec<MedicalRecord>> {
        let records: Option<Vec<MedicalRecord>> = self
            .client
            .get(&format!("/veterinary/pets/{pet_id}/history"), &[])
            .await?;
        Ok(records.unwrap_or_default())
    }

    pub fn owned_by(&self, client_id: UserId) -> ClientPets {
        ClientPets {
            api: self.clone(),
            client_id,
        }
    }

    pub fn history_of(&self, pet_id: impl Into<String>) -> PetHistory {
        PetHistory {
            api: self.clone(),
            pet_id: pet_id.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientPets {
    api: PetsApi,
    client_id: UserId,
}

impl ClientPets {
    pub fn client_id(&self) -> &UserId {
        &self.client_id
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PageSource for ClientPets {
    type Row = Pet;

    async fn fetch_page(&self, request: &PageRequest) -> ClientResult<PageResult<Pet>> {
        let pets = self.api.for_client(&self.client_id).await?;
        Ok(PageResult::paginate(pets, request))
    }
}

#[derive(Debug, Clone)]
pub struct PetHistory {
    api: PetsApi,
    pet_id: String,
}

impl PetHistory {
    pub fn pet_id(&self) -> &str {
        &self.pet_id
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PageSource for PetHistory {
    type Row = MedicalRecord;

    async fn fetch_page(&self, request: &PageRequest) -> ClientResult<PageResult<MedicalRecord>> {
        let records = self.api.history(&self.pet_id).await?;
        Ok(PageResult::paginate(records, request))
    }
}
