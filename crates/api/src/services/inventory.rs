use async_trait::async_trait;

use purplepaw_core::ClientResult;
use purplepaw_table::{PageRequest, PageResult};

use super::PageSource;
use crate::ApiClient;
use crate::models::{InventoryInput, InventoryItem};

#[derive(Debug, Clone)]
pub struct InventoryApi {
    client: ApiClient,
}

impl InventoryApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, request: &PageRequest) -> ClientResult<PageResult<InventoryItem>> {
        self.client.get("/inventory", &request.query_pairs()).await
    }

    pub async fn create(&self, input: &InventoryInput) -> ClientResult<InventoryItem> {
        let item: InventoryItem = self.client.post("/inventory", input).await?;
        tracing::info!(item_id = %item.id, quantity = item.quantity, "inventory item created");
        Ok(item)
    }

    pub async fn update(&self, id: &str, input: &InventoryInput) -> ClientResult<InventoryItem> {
        let item: InventoryItem = self.client.put(&format!("/inventory/{id}"), input).await?;
        tracing::info!(item_id = %item.id, quantity = item.quantity, "inventory item updated");
        Ok(item)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PageSource for InventoryApi {
    type Row = InventoryItem;

    async fn fetch_page(&self, request: &PageRequest) -> ClientResult<PageResult<InventoryItem>> {
        self.list(request).await
    }
}
