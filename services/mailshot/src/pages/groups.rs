//! Group list with creation, deletion and membership edits

use mailshot_api::models::{Group, NewGroup};
use mailshot_api::ApiClient;

use super::{Confirm, PageStatus};
use crate::form::{FieldError, FieldKind, FieldSpec, Form, Validator};

pub const LOAD_ERROR: &str = "Erro ao carregar grupos. Tente novamente mais tarde.";
pub const CREATE_SUCCESS: &str = "Grupo criado com sucesso!";
pub const CREATE_ERROR: &str = "Erro ao criar grupo. Verifique os dados e tente novamente.";
pub const DELETE_ERROR: &str = "Erro ao excluir o grupo. Tente novamente mais tarde.";
pub const CONFIRM_DELETE: &str = "Tem certeza que deseja excluir este grupo?";
pub const MEMBERS_SUCCESS: &str = "Grupo atualizado com sucesso!";
pub const MEMBERS_ERROR: &str = "Erro ao atualizar os clientes do grupo. Tente novamente mais tarde.";

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "nome",
        label: "Nome",
        kind: FieldKind::Text,
        validators: &[Validator::Required],
    },
    FieldSpec {
        name: "descricao",
        label: "Descrição",
        kind: FieldKind::Text,
        validators: &[],
    },
    FieldSpec {
        name: "clientes",
        label: "Clientes",
        kind: FieldKind::Ids,
        validators: &[Validator::Required],
    },
];

/// Direction of a membership edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Add,
    Remove,
}

#[derive(Debug)]
pub struct GroupsPage {
    pub status: PageStatus,
    pub groups: Vec<Group>,
    pub form: Form,
}

impl Default for GroupsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupsPage {
    pub fn new() -> Self {
        Self {
            status: PageStatus::default(),
            groups: Vec::new(),
            form: Form::new(FIELDS),
        }
    }

    pub async fn mount(&mut self, api: &ApiClient) {
        self.status.start();
        if self.refresh(api).await {
            self.status.finish();
        }
    }

    async fn refresh(&mut self, api: &ApiClient) -> bool {
        match api.groups().list().await {
            Ok(groups) => {
                tracing::debug!("Loaded {} groups", groups.len());
                self.groups = groups;
                true
            }
            Err(e) => {
                tracing::error!("Failed to load groups: {}", e);
                self.status.fail_request(LOAD_ERROR, &e);
                false
            }
        }
    }

    pub fn set(&mut self, name: &str, raw: &str) -> Result<(), FieldError> {
        self.form.set(name, raw)
    }

    pub async fn create(&mut self, api: &ApiClient) -> Option<Group> {
        if let Some(message) = self.form.first_error() {
            self.status.fail(message);
            return None;
        }

        let draft = NewGroup {
            name: self.form.text("nome").to_string(),
            description: self.form.text("descricao").to_string(),
            client_ids: self.form.ids("clientes").to_vec(),
        };
        self.status.start();
        match api.groups().create(&draft).await {
            Ok(group) => {
                tracing::info!("Created group {} ({})", group.id, group.name);
                self.form.clear();
                if self.refresh(api).await {
                    self.status.succeed(CREATE_SUCCESS);
                }
                Some(group)
            }
            Err(e) => {
                tracing::error!("Failed to create group: {}", e);
                self.status.fail_request(CREATE_ERROR, &e);
                None
            }
        }
    }

    pub async fn delete(&mut self, api: &ApiClient, id: u64, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(CONFIRM_DELETE) {
            return false;
        }
        self.status.start();
        match api.groups().delete(id).await {
            Ok(()) => {
                tracing::info!("Deleted group {}", id);
                if self.refresh(api).await {
                    self.status.finish();
                }
                true
            }
            Err(e) => {
                tracing::error!("Failed to delete group {}: {}", id, e);
                self.status.fail_request(DELETE_ERROR, &e);
                false
            }
        }
    }

    /// Add or remove a set of clients, then re-fetch
    pub async fn edit_members(
        &mut self,
        api: &ApiClient,
        id: u64,
        change: Membership,
        client_ids: &[u64],
    ) -> bool {
        self.status.start();
        let result = match change {
            Membership::Add => api.groups().add_clients(id, client_ids).await,
            Membership::Remove => api.groups().remove_clients(id, client_ids).await,
        };
        match result {
            Ok(ack) => {
                tracing::info!("{:?} {:?} on group {}: {}", change, client_ids, id, ack.status);
                if self.refresh(api).await {
                    self.status.succeed(MEMBERS_SUCCESS);
                }
                true
            }
            Err(e) => {
                tracing::error!("Failed to {:?} clients on group {}: {}", change, id, e);
                self.status.fail_request(MEMBERS_ERROR, &e);
                false
            }
        }
    }
}
