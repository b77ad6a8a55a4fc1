//! Login and registration

use std::time::Duration;

use mailshot_api::models::{Registration, UserSummary};
use mailshot_api::ApiClient;

use super::{PageStatus, Redirect};
use crate::form::{FieldError, FieldKind, FieldSpec, Form, Validator};
use crate::router::Route;

pub const SUCCESS: &str = "Login realizado com sucesso!";
pub const LOGIN_ERROR: &str = "Usuário ou senha inválidos.";
pub const REGISTER_SUCCESS: &str = "Usuário cadastrado com sucesso!";
pub const REGISTER_ERROR: &str = "Erro ao cadastrar usuário. Verifique os dados e tente novamente.";

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "username",
        label: "Usuário",
        kind: FieldKind::Text,
        validators: &[Validator::Required],
    },
    FieldSpec {
        name: "password",
        label: "Senha",
        kind: FieldKind::Password,
        validators: &[Validator::Required],
    },
];

pub const REGISTER_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "username",
        label: "Usuário",
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
        name: "password",
        label: "Senha",
        kind: FieldKind::Password,
        validators: &[Validator::Required],
    },
    FieldSpec {
        name: "first_name",
        label: "Nome",
        kind: FieldKind::Text,
        validators: &[],
    },
    FieldSpec {
        name: "last_name",
        label: "Sobrenome",
        kind: FieldKind::Text,
        validators: &[],
    },
];

#[derive(Debug)]
pub struct LoginPage {
    pub form: Form,
    pub registration: Form,
    pub status: PageStatus,
}

impl Default for LoginPage {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginPage {
    pub fn new() -> Self {
        Self {
            form: Form::new(FIELDS),
            registration: Form::new(REGISTER_FIELDS),
            status: PageStatus::default(),
        }
    }

    pub fn set(&mut self, name: &str, raw: &str) -> Result<(), FieldError> {
        self.form.set(name, raw)
    }

    /// Obtain a token, start the session and go home
    pub async fn submit(&mut self, api: &ApiClient, delay: Duration) -> Option<Redirect> {
        if let Some(message) = self.form.first_error() {
            self.status.fail(message);
            return None;
        }

        self.status.start();
        let username = self.form.text("username").to_string();
        match api.auth().login(&username, self.form.text("password")).await {
            Ok(()) => {
                self.form.clear();
                self.status.succeed(SUCCESS);
                Some(Redirect {
                    to: Route::Home,
                    after: delay,
                })
            }
            Err(e) => {
                tracing::error!("Login failed for {}: {}", username, e);
                self.status.fail(LOGIN_ERROR);
                None
            }
        }
    }

    pub async fn register(&mut self, api: &ApiClient) -> Option<UserSummary> {
        if let Some(message) = self.registration.first_error() {
            self.status.fail(message);
            return None;
        }

        let registration = Registration {
            username: self.registration.text("username").to_string(),
            email: self.registration.text("email").to_string(),
            password: self.registration.text("password").to_string(),
            first_name: self.registration.text("first_name").to_string(),
            last_name: self.registration.text("last_name").to_string(),
        };
        self.status.start();
        match api.auth().register(&registration).await {
            Ok(user) => {
                tracing::info!("Registered user {}", user.username);
                self.registration.clear();
                self.status.succeed(REGISTER_SUCCESS);
                Some(user)
            }
            Err(e) => {
                tracing::error!("Registration of {} failed: {}", registration.username, e);
                self.status.fail(REGISTER_ERROR);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mailshot_api::io::{HttpResponse, MockHttpClient};

    use super::super::testing::api;
    use super::*;

    #[tokio::test]
    async fn login_starts_session_and_goes_home() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req| req.url.ends_with("/api-token-auth/"))
            .times(1)
            .returning(|_| Box::pin(async { Ok(HttpResponse::json(200, r#"{"token": "t0k"}"#)) }));
        let api = api(mock);

        let mut page = LoginPage::new();
        page.set("username", "ana").unwrap();
        page.set("password", "pw").unwrap();
        let redirect = page.submit(&api, Duration::from_millis(10)).await.unwrap();

        assert_eq!(redirect.to, Route::Home);
        assert!(api.session().is_authenticated());
        assert_eq!(page.form.text("password"), "");
    }

    #[tokio::test]
    async fn wrong_credentials_show_generic_message() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .returning(|_| Box::pin(async { Ok(HttpResponse::json(400, "{}")) }));
        let api = api(mock);

        let mut page = LoginPage::new();
        page.set("username", "ana").unwrap();
        page.set("password", "nope").unwrap();
        assert!(page.submit(&api, Duration::ZERO).await.is_none());
        assert_eq!(page.status.error.as_deref(), Some(LOGIN_ERROR));
        assert!(!api.session().is_authenticated());
    }

    #[tokio::test]
    async fn missing_password_is_caught_before_sending() {
        let mut page = LoginPage::new();
        page.set("username", "ana").unwrap();
        assert!(page
            .submit(&api(MockHttpClient::new()), Duration::ZERO)
            .await
            .is_none());
        assert_eq!(page.status.error.as_deref(), Some("Senha: Campo obrigatório"));
    }

    #[tokio::test]
    async fn registration_posts_new_user() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req| req.url.ends_with("/usuarios/"))
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(HttpResponse::json(201, r#"{"id": 5, "username": "bia", "email": "bia@x.com"}"#))
                })
            });

        let mut page = LoginPage::new();
        page.registration.set("username", "bia").unwrap();
        page.registration.set("email", "bia@x.com").unwrap();
        page.registration.set("password", "pw").unwrap();
        let user = page.register(&api(mock)).await.unwrap();
        assert_eq!(user.id, 5);
        assert_eq!(page.status.success.as_deref(), Some(REGISTER_SUCCESS));
    }
}
