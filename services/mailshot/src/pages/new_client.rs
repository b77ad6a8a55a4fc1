//! New client form

use std::time::Duration;

use mailshot_api::models::NewClient;
use mailshot_api::ApiClient;

use super::{PageStatus, Redirect};
use crate::form::{FieldError, FieldKind, FieldSpec, Form, Validator};
use crate::router::Route;

pub const SUCCESS: &str = "Cliente cadastrado com sucesso!";
pub const SUBMIT_ERROR: &str = "Erro ao cadastrar cliente. Verifique os dados e tente novamente.";

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "nome",
        label: "Nome",
        kind: FieldKind::Text,
        validators: &[Validator::Required],
    },
    FieldSpec {
        name: "sobrenome",
        label: "Sobrenome",
        kind: FieldKind::Text,
        validators: &[Validator::Required],
    },
    FieldSpec {
        name: "email",
        label: "Email",
        kind: FieldKind::Email,
        validators: &[Validator::Required, Validator::EmailFormat],
    },
    FieldSpec {
        name: "ativo",
        label: "Cliente ativo",
        kind: FieldKind::Checkbox,
        validators: &[],
    },
];

#[derive(Debug)]
pub struct NewClientPage {
    pub form: Form,
    pub status: PageStatus,
}

impl Default for NewClientPage {
    fn default() -> Self {
        Self::new()
    }
}

impl NewClientPage {
    pub fn new() -> Self {
        Self {
            form: blank_form(),
            status: PageStatus::default(),
        }
    }

    pub fn set(&mut self, name: &str, raw: &str) -> Result<(), FieldError> {
        self.form.set(name, raw)
    }

    pub fn draft(&self) -> NewClient {
        NewClient {
            first_name: self.form.text("nome").to_string(),
            last_name: self.form.text("sobrenome").to_string(),
            email: self.form.text("email").to_string(),
            active: self.form.flag("ativo"),
        }
    }

    /// Post the draft; on success reset the form and redirect to the list
    pub async fn submit(&mut self, api: &ApiClient, delay: Duration) -> Option<Redirect> {
        if let Some(message) = self.form.first_error() {
            self.status.fail(message);
            return None;
        }

        self.status.start();
        match api.clients().create(&self.draft()).await {
            Ok(client) => {
                tracing::info!("Created client {} ({})", client.id, client.email);
                self.form = blank_form();
                self.status.succeed(SUCCESS);
                Some(Redirect {
                    to: Route::Clients,
                    after: delay,
                })
            }
            Err(e) => {
                tracing::error!("Failed to create client: {}", e);
                self.status.fail_request(SUBMIT_ERROR, &e);
                None
            }
        }
    }
}

fn blank_form() -> Form {
    let mut form = Form::new(FIELDS);
    if let Err(e) = form.set("ativo", "true") {
        tracing::warn!("Could not default the active flag: {}", e);
    }
    form
}

#[cfg(test)]
mod tests {
    use mailshot_api::io::{HttpResponse, MockHttpClient, RequestBody};

    use super::super::testing::api;
    use super::*;

    #[test]
    fn new_clients_default_to_active() {
        assert!(NewClientPage::new().draft().active);
    }

    #[tokio::test]
    async fn invalid_draft_is_not_sent() {
        let mut page = NewClientPage::new();
        page.set("nome", "João").unwrap();
        page.set("sobrenome", "Silva").unwrap();
        page.set("email", "joao").unwrap();

        let redirect = page
            .submit(&api(MockHttpClient::new()), Duration::from_secs(2))
            .await;
        assert!(redirect.is_none());
        assert_eq!(page.status.error.as_deref(), Some("Email: Email inválido"));
    }

    #[tokio::test]
    async fn success_resets_and_redirects_to_list() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req| {
                req.url.ends_with("/clientes/")
                    && req.body
                        == RequestBody::Json(serde_json::json!({
                            "nome": "João", "sobrenome": "Silva", "email": "joao@x.com", "ativo": true
                        }))
            })
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(HttpResponse::json(
                        201,
                        r#"{"id": 9, "nome": "João", "sobrenome": "Silva", "email": "joao@x.com", "ativo": true}"#,
                    ))
                })
            });

        let mut page = NewClientPage::new();
        page.set("nome", "João").unwrap();
        page.set("sobrenome", "Silva").unwrap();
        page.set("email", "joao@x.com").unwrap();

        let redirect = page.submit(&api(mock), Duration::from_secs(2)).await;
        assert_eq!(
            redirect,
            Some(Redirect {
                to: Route::Clients,
                after: Duration::from_secs(2)
            })
        );
        assert_eq!(page.status.success.as_deref(), Some(SUCCESS));
        assert_eq!(page.form.text("nome"), "");
        assert!(page.form.flag("ativo"));
    }

    #[tokio::test]
    async fn backend_rejection_keeps_the_draft() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute().returning(|_| {
            Box::pin(async {
                Ok(HttpResponse::json(400, r#"{"email": ["cliente com este email já existe."]}"#))
            })
        });

        let mut page = NewClientPage::new();
        page.set("nome", "João").unwrap();
        page.set("sobrenome", "Silva").unwrap();
        page.set("email", "joao@x.com").unwrap();

        assert!(page.submit(&api(mock), Duration::ZERO).await.is_none());
        assert_eq!(page.status.error.as_deref(), Some(SUBMIT_ERROR));
        assert_eq!(page.form.text("email"), "joao@x.com");
    }
}
