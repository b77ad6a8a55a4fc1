//! In-memory stand-in for the REST backend

use std::sync::Mutex;

use async_trait::async_trait;
use mailshot_api::io::{HttpClient, HttpRequest, HttpResponse, Method, RequestBody};
use serde_json::{json, Value};

const PREFIX: &str = "http://backend.test/api";

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    clients: Vec<Value>,
    groups: Vec<Value>,
    campaigns: Vec<Value>,
    attachments: Vec<Value>,
    upload_calls: usize,
    fail_upload: Option<usize>,
    requests: Vec<(Method, String)>,
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

pub const BASE_URL: &str = PREFIX;
pub const USERNAME: &str = "ana";
pub const PASSWORD: &str = "segredo";
pub const TOKEN: &str = "fake-token";

fn not_found() -> HttpResponse {
    HttpResponse::json(404, r#"{"detail": "Não encontrado."}"#)
}

fn ok(status: u16, value: &Value) -> HttpResponse {
    HttpResponse::json(status, &value.to_string())
}

impl FakeBackend {
    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    pub fn add_client(&self, nome: &str, sobrenome: &str, email: &str) {
        self.with_state(|s| {
            s.next_id += 1;
            let id = s.next_id;
            s.clients.push(json!({
                "id": id, "nome": nome, "sobrenome": sobrenome, "email": email, "ativo": true
            }));
        });
    }

    pub fn add_group(&self, nome: &str) -> u64 {
        self.with_state(|s| {
            s.next_id += 1;
            let id = s.next_id;
            s.groups.push(json!({"id": id, "nome": nome, "descricao": "", "clientes": [], "clientes_count": 0}));
            id
        })
    }

    pub fn fail_upload_number(&self, n: usize) {
        self.with_state(|s| s.fail_upload = Some(n));
    }

    pub fn upload_calls(&self) -> usize {
        self.with_state(|s| s.upload_calls)
    }

    pub fn attachment_count(&self) -> usize {
        self.with_state(|s| s.attachments.len())
    }

    pub fn client_emails(&self) -> Vec<String> {
        self.with_state(|s| {
            s.clients
                .iter()
                .filter_map(|c| c["email"].as_str().map(str::to_string))
                .collect()
        })
    }

    pub fn requests_to(&self, method: Method, path: &str) -> usize {
        self.with_state(|s| {
            s.requests
                .iter()
                .filter(|(m, p)| *m == method && p == path)
                .count()
        })
    }

    pub fn requests_with(&self, method: Method) -> usize {
        self.with_state(|s| s.requests.iter().filter(|(m, _)| *m == method).count())
    }

    pub fn campaigns(&self) -> Vec<Value> {
        self.with_state(|s| s.campaigns.clone())
    }

    fn handle(&self, request: HttpRequest) -> HttpResponse {
        let path = request.url.trim_start_matches(PREFIX).to_string();
        let expected = format!("Token {}", TOKEN);
        let authorized = request.authorization.as_deref() == Some(expected.as_str());
        self.with_state(|s| {
            s.requests.push((request.method, path.clone()));
            let segments: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();

            if segments == ["api-token-auth"] {
                return match &request.body {
                    RequestBody::Json(body)
                        if body["username"] == USERNAME && body["password"] == PASSWORD =>
                    {
                        ok(200, &json!({"token": TOKEN}))
                    }
                    _ => HttpResponse::json(400, r#"{"non_field_errors": ["invalid"]}"#),
                };
            }
            if !authorized {
                return HttpResponse::json(401, r#"{"detail": "As credenciais não foram fornecidas."}"#);
            }

            match (request.method, segments.as_slice()) {
                (Method::Get, ["clientes"]) => ok(200, &Value::Array(s.clients.clone())),
                (Method::Post, ["clientes"]) => match &request.body {
                    RequestBody::Json(body) => {
                        s.next_id += 1;
                        let mut client = body.clone();
                        client["id"] = json!(s.next_id);
                        s.clients.push(client.clone());
                        ok(201, &client)
                    }
                    _ => HttpResponse::json(400, "{}"),
                },
                (Method::Delete, ["clientes", id]) => {
                    let before = s.clients.len();
                    s.clients.retain(|c| c["id"].to_string() != *id);
                    if s.clients.len() < before {
                        HttpResponse {
                            status: 204,
                            ..Default::default()
                        }
                    } else {
                        not_found()
                    }
                }
                (Method::Get, ["grupos"]) => ok(200, &Value::Array(s.groups.clone())),
                (Method::Get, ["campanhas"]) => ok(200, &Value::Array(s.campaigns.clone())),
                (Method::Post, ["campanhas"]) => match &request.body {
                    RequestBody::Json(body) => {
                        s.next_id += 1;
                        let mut campaign = body.clone();
                        campaign["id"] = json!(s.next_id);
                        s.campaigns.push(campaign.clone());
                        ok(201, &campaign)
                    }
                    _ => HttpResponse::json(400, "{}"),
                },
                (Method::Post, ["anexos"]) => {
                    s.upload_calls += 1;
                    if s.fail_upload == Some(s.upload_calls) {
                        return HttpResponse::json(500, r#"{"detail": "falha"}"#);
                    }
                    match &request.body {
                        RequestBody::Multipart(form) => {
                            s.next_id += 1;
                            let campaign: u64 = form
                                .text_value("campanha")
                                .and_then(|v| v.parse().ok())
                                .unwrap_or_default();
                            let name = form
                                .file_part("arquivo")
                                .map(|f| f.file_name.clone())
                                .unwrap_or_default();
                            let attachment =
                                json!({"id": s.next_id, "campanha": campaign, "nome": name, "tipo": ""});
                            s.attachments.push(attachment.clone());
                            ok(201, &attachment)
                        }
                        _ => HttpResponse::json(400, "{}"),
                    }
                }
                _ => not_found(),
            }
        })
    }
}

#[async_trait]
impl HttpClient for FakeBackend {
    async fn execute(&self, request: HttpRequest) -> mailshot_api::Result<HttpResponse> {
        Ok(self.handle(request))
    }
}
