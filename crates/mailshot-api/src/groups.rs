//! `/grupos/` endpoints

use serde::Serialize;

use crate::client::ApiClient;
use crate::models::{ActionStatus, Group, NewGroup};

const GROUPS: &str = "/grupos/";

fn group_path(id: u64) -> String {
    format!("{}{}/", GROUPS, id)
}

#[derive(Serialize)]
struct Membership<'a> {
    cliente_ids: &'a [u64],
}

/// Group and membership operations
#[derive(Debug, Clone, Copy)]
pub struct GroupsApi<'a> {
    api: &'a ApiClient,
}

impl ApiClient {
    pub fn groups(&self) -> GroupsApi<'_> {
        GroupsApi { api: self }
    }
}

impl GroupsApi<'_> {
    pub async fn list(&self) -> crate::Result<Vec<Group>> {
        self.api.get(GROUPS).await
    }

    pub async fn get(&self, id: u64) -> crate::Result<Group> {
        self.api.get(&group_path(id)).await
    }

    pub async fn create(&self, group: &NewGroup) -> crate::Result<Group> {
        self.api.post(GROUPS, group).await
    }

    pub async fn update(&self, id: u64, group: &NewGroup) -> crate::Result<Group> {
        self.api.put(&group_path(id), group).await
    }

    pub async fn delete(&self, id: u64) -> crate::Result<()> {
        self.api.delete(&group_path(id)).await
    }

    pub async fn add_clients(&self, id: u64, client_ids: &[u64]) -> crate::Result<ActionStatus> {
        self.api
            .post(
                &format!("{}adicionar_clientes/", group_path(id)),
                &Membership {
                    cliente_ids: client_ids,
                },
            )
            .await
    }

    pub async fn remove_clients(&self, id: u64, client_ids: &[u64]) -> crate::Result<ActionStatus> {
        self.api
            .post(
                &format!("{}remover_clientes/", group_path(id)),
                &Membership {
                    cliente_ids: client_ids,
                },
            )
            .await
    }
}
