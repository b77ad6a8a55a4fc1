//! BDD step definitions for login state and the header

use cucumber::{given, then, when};
use mailshot::pages::{LoginPage, Page};

use crate::backend::TOKEN;
use crate::world::MailshotWorld;

#[given("I am logged in")]
fn logged_in(world: &mut MailshotWorld) {
    world.session.login(TOKEN).unwrap();
}

#[given("I am logged out")]
fn logged_out(world: &mut MailshotWorld) {
    world.session.logout().unwrap();
}

#[when(expr = "I log in as {string} with password {string}")]
async fn log_in(world: &mut MailshotWorld, username: String, password: String) {
    let api = world.api();
    let mut page = LoginPage::new();
    page.set("username", &username).unwrap();
    page.set("password", &password).unwrap();
    world.redirect = page.submit(&api, world.shell.redirect_delay()).await;
    world.status = page.status.clone();
    world.page = Some(Page::Login(page));
}

#[when("I log out")]
async fn log_out(world: &mut MailshotWorld) {
    let page = world.shell.logout().await.unwrap();
    world.status = page.status().clone();
    world.page = Some(page);
}

#[then(expr = "the header offers {string}")]
fn header_offers(world: &mut MailshotWorld, action: String) {
    assert_eq!(world.shell.header().session_action(), action);
}

#[then(expr = "I see the message {string}")]
fn see_message(world: &mut MailshotWorld, message: String) {
    let shown = world
        .status
        .error
        .as_deref()
        .or(world.status.success.as_deref());
    assert_eq!(shown, Some(message.as_str()), "status: {:?}", world.status);
}

#[then(expr = "a redirect to {string} is scheduled")]
fn redirect_scheduled(world: &mut MailshotWorld, path: String) {
    let redirect = world.redirect.expect("a redirect");
    assert_eq!(redirect.to.path(), path);
    assert_eq!(redirect.after, world.shell.redirect_delay());
}

#[then("no redirect is scheduled")]
fn no_redirect(world: &mut MailshotWorld) {
    assert!(world.redirect.is_none());
}

#[when(expr = "I open {string}")]
async fn open_path(world: &mut MailshotWorld, path: String) {
    let page = world.shell.open_path(&path).await.unwrap();
    world.status = page.status().clone();
    world.page = Some(page);
}

#[when("I follow the redirect")]
async fn follow_redirect(world: &mut MailshotWorld) {
    let redirect = world.redirect.take().expect("a redirect");
    let page = world.shell.follow(redirect).await;
    world.status = page.status().clone();
    world.page = Some(page);
}

#[then(expr = "the current page is {string}")]
fn current_page(world: &mut MailshotWorld, path: String) {
    assert_eq!(world.shell.current().path(), path);
    let page = world.page.as_ref().expect("an open page");
    assert_eq!(page.route().path(), path);
}

#[then("I am asked to log in")]
fn asked_to_log_in(world: &mut MailshotWorld) {
    assert!(world.status.login_required, "status: {:?}", world.status);
}
