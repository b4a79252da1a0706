use async_trait::async_trait;
use chrono::NaiveDate;

use purplepaw_core::{ClientResult, UserId};
use purplepaw_table::{PageRequest, PageResult};

use super::PageSource;
use crate::ApiClient;
use crate::models::Appointment;

/// Which day and whose agenda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyQuery {
    pub date: NaiveDate,
    pub veterinarian_id: UserId,
}

impl DailyQuery {
    /// Midnight UTC of `date`, the form the backend expects.
    pub fn date_param(&self) -> String {
        format!("{}T00:00:00.000Z", self.date.format("%Y-%m-%d"))
    }

    pub fn query_pairs(&self, request: &PageRequest) -> Vec<(String, String)> {
        let mut query = vec![
            ("date".to_string(), self.date_param()),
            ("veterinarianId".to_string(), self.veterinarian_id.to_string()),
        ];
        query.extend(request.query_pairs());
        query
    }
}

#[derive(Debug, Clone)]
pub struct AppointmentsApi {
    client: ApiClient,
}

impl AppointmentsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn daily(
        &self,
        query: &DailyQuery,
        request: &PageRequest,
    ) -> ClientResult<PageResult<Appointment>> {
        self.client
            .get("/appointments/daily", &query.query_pairs(request))
            .await
    }

    pub async fn cancel(&self, id: &str) -> ClientResult<()> {
        let _: serde_json::Value = self
            .client
            .post_empty(&format!("/appointments/{id}/cancel"))
            .await?;
        tracing::info!(appointment_id = id, "appointment cancelled");
        Ok(())
    }

    /// Bind a day so the agenda can be paged like any other list.
    pub fn for_day(&self, query: DailyQuery) -> DailyAppointments {
        DailyAppointments {
            api: self.clone(),
            query,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DailyAppointments {
    api: AppointmentsApi,
    query: DailyQuery,
}

impl DailyAppointments {
    pub fn query(&self) -> &DailyQuery {
        &self.query
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PageSource for DailyAppointments {
    type Row = Appointment;

    async fn fetch_page(&self, request: &PageRequest) -> ClientResult<PageResult<Appointment>> {
        self.api.daily(&self.query, request).await
    }
}
