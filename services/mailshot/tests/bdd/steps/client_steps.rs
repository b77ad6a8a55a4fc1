//! BDD step definitions for the client pages

use cucumber::{given, then, when};
use mailshot::pages::{ClientListPage, Confirm, NewClientPage, Page};
use mailshot_api::io::Method;

use crate::world::MailshotWorld;

/// A fixed answer to every confirmation
struct Answer(bool);

impl Confirm for Answer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

fn client_list(world: &mut MailshotWorld) -> &mut ClientListPage {
    match world.page.as_mut() {
        Some(Page::Clients(page)) => page,
        other => panic!("expected the client list, got {other:?}"),
    }
}

#[given("the backend has no clients")]
fn no_clients(world: &mut MailshotWorld) {
    assert!(world.backend.client_emails().is_empty());
}

#[given(expr = "the backend has client {string} {string} {string}")]
fn backend_client(world: &mut MailshotWorld, nome: String, sobrenome: String, email: String) {
    world.backend.add_client(&nome, &sobrenome, &email);
}

#[when("I open the new client form")]
fn open_new_client(world: &mut MailshotWorld) {
    world.new_client = Some(NewClientPage::new());
}

#[when(expr = "I fill in client {string} with {string}")]
fn fill_client(world: &mut MailshotWorld, field: String, value: String) {
    let page = world.new_client.as_mut().expect("new client form");
    page.set(&field, &value).unwrap();
}

#[when("I submit the new client form")]
async fn submit_client(world: &mut MailshotWorld) {
    let api = world.api();
    let delay = world.shell.redirect_delay();
    let page = world.new_client.as_mut().expect("new client form");
    world.redirect = page.submit(&api, delay).await;
    world.status = page.status.clone();
}

#[then("no client was posted")]
fn no_client_posted(world: &mut MailshotWorld) {
    assert_eq!(world.backend.requests_to(Method::Post, "/clientes/"), 0);
}

#[then(expr = "the client list includes {string}")]
fn list_includes(world: &mut MailshotWorld, email: String) {
    let page = client_list(world);
    assert!(page.clients.iter().any(|c| c.email == email));
}

#[when(expr = "I filter the client list by {string}")]
fn filter_list(world: &mut MailshotWorld, query: String) {
    client_list(world).set_query(query);
}

#[then(expr = "the visible clients are {string}")]
fn visible_clients(world: &mut MailshotWorld, emails: String) {
    let expected: Vec<&str> = emails.split(',').map(str::trim).collect();
    let page = client_list(world);
    let visible: Vec<&str> = page.visible().iter().map(|c| c.email.as_str()).collect();
    assert_eq!(visible, expected);
}

async fn delete_first(world: &mut MailshotWorld, answer: bool) {
    let api = world.api();
    let page = client_list(world);
    let id = page.clients.first().expect("a client").id;
    page.delete(&api, id, &Answer(answer)).await;
    world.status = client_list(world).status.clone();
}

#[when("I delete the first client and decline")]
async fn delete_decline(world: &mut MailshotWorld) {
    delete_first(world, false).await;
}

#[when("I delete the first client and confirm")]
async fn delete_confirm(world: &mut MailshotWorld) {
    delete_first(world, true).await;
}

#[then(expr = "the backend still has client {string}")]
fn backend_still_has(world: &mut MailshotWorld, email: String) {
    assert!(world.backend.client_emails().contains(&email));
}

#[then("no delete request was sent")]
fn no_delete(world: &mut MailshotWorld) {
    assert_eq!(world.backend.requests_with(Method::Delete), 0);
}

#[then("the client list is empty")]
fn list_empty(world: &mut MailshotWorld) {
    assert!(client_list(world).clients.is_empty());
    assert!(world.backend.client_emails().is_empty());
}
