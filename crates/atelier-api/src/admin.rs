// Admin collection endpoints
//
// Every managed collection lives under `api/admin/{PATH}/` with the same
// list / detail / create / patch / delete shape, so the verbs are generic
// over `AdminCollection`. Service reordering and dashboard stats are the
// only collection-specific calls.

use serde::Serialize;

use crate::attachment::{Attachment, form_with_attachment};
use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{AdminCollection, DashboardStats, EntityId, Service, ServiceOrder};

fn collection_path<T: AdminCollection>() -> String {
    format!("api/admin/{}/", T::PATH)
}

fn entity_path<T: AdminCollection>(id: EntityId) -> String {
    format!("api/admin/{}/{id}/", T::PATH)
}

impl ApiClient {
    /// Fetch a whole collection, optionally narrowed by query parameters.
    pub async fn list<T: AdminCollection>(
        &self,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        self.get_list(&collection_path::<T>(), params).await
    }

    pub async fn fetch<T: AdminCollection>(&self, id: EntityId) -> Result<T, Error> {
        self.get(&entity_path::<T>(id)).await
    }

    /// Create a record. Switches to multipart when a file rides along.
    pub async fn create<T, B>(&self, body: &B, attachment: Option<&Attachment>) -> Result<T, Error>
    where
        T: AdminCollection,
        B: Serialize + Sync,
    {
        let path = collection_path::<T>();
        match attachment {
            Some(file) => {
                let form = form_with_attachment(body, file)?;
                self.post_multipart(&path, form).await
            }
            None => self.post(&path, body).await,
        }
    }

    /// Partially update a record.
    pub async fn update<T, B>(
        &self,
        id: EntityId,
        patch: &B,
        attachment: Option<&Attachment>,
    ) -> Result<T, Error>
    where
        T: AdminCollection,
        B: Serialize + Sync,
    {
        let path = entity_path::<T>(id);
        match attachment {
            Some(file) => {
                let form = form_with_attachment(patch, file)?;
                self.patch_multipart(&path, form).await
            }
            None => self.patch(&path, patch).await,
        }
    }

    pub async fn remove<T: AdminCollection>(&self, id: EntityId) -> Result<(), Error> {
        self.delete(&entity_path::<T>(id)).await
    }

    /// Persist new `order` values for a set of services.
    pub async fn reorder_services(&self, orders: &[ServiceOrder]) -> Result<(), Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            service_orders: &'a [ServiceOrder],
        }

        self.post_no_response(
            &format!("api/admin/{}/reorder/", Service::PATH),
            &Body {
                service_orders: orders,
            },
        )
        .await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, Error> {
        self.get("api/admin/dashboard/stats/").await
    }
}
