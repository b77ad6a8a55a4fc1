//! BDD step definitions for the campaign composer

use cucumber::{given, then, when};
use mailshot::pages::NewCampaignPage;
use mailshot_api::FileUpload;

use crate::world::MailshotWorld;

fn composer(world: &mut MailshotWorld) -> &mut NewCampaignPage {
    world.new_campaign.as_mut().expect("new campaign form")
}

fn group_id(page: &NewCampaignPage, name: &str) -> u64 {
    page.groups
        .iter()
        .find(|g| g.name == name)
        .map(|g| g.id)
        .expect("group loaded on mount")
}

#[given(expr = "the backend has group {string}")]
fn backend_group(world: &mut MailshotWorld, name: String) {
    world.backend.add_group(&name);
}

#[given(expr = "upload number {int} will fail")]
fn failing_upload(world: &mut MailshotWorld, n: usize) {
    world.backend.fail_upload_number(n);
}

#[when("I open the new campaign form")]
async fn open_composer(world: &mut MailshotWorld) {
    let api = world.api();
    let mut page = NewCampaignPage::new();
    page.mount(&api).await;
    assert!(page.status.error.is_none(), "{:?}", page.status);
    world.new_campaign = Some(page);
}

#[when(expr = "I fill in campaign {string} with {string}")]
fn fill_campaign(world: &mut MailshotWorld, field: String, value: String) {
    composer(world).set(&field, &value).unwrap();
}

#[when("I fill in a valid campaign")]
fn fill_valid(world: &mut MailshotWorld) {
    let page = composer(world);
    page.set("titulo", "Natal").unwrap();
    page.set("assunto", "Feliz Natal, {{nome}}").unwrap();
    page.set("corpo", "<p>Olá {{nome}}</p>").unwrap();
}

#[when(expr = "I select group {string}")]
fn select_group(world: &mut MailshotWorld, name: String) {
    let page = composer(world);
    let id = group_id(page, &name);
    assert!(page.toggle_group(id));
}

#[when(expr = "I attach {string}, {string} and {string}")]
fn attach_three(world: &mut MailshotWorld, a: String, b: String, c: String) {
    let page = composer(world);
    for name in [a, b, c] {
        page.attach(FileUpload::new(name, b"%PDF-1.4".to_vec()));
    }
}

#[when("I submit the new campaign form")]
async fn submit_campaign(world: &mut MailshotWorld) {
    let api = world.api();
    let delay = world.shell.redirect_delay();
    let page = world.new_campaign.as_mut().expect("new campaign form");
    world.redirect = page.submit(&api, delay).await;
    world.status = page.status.clone();
}

#[then(expr = "the preview subject is {string}")]
fn preview_subject(world: &mut MailshotWorld, expected: String) {
    assert_eq!(composer(world).preview().subject, expected);
}

#[then(expr = "the preview body is {string}")]
fn preview_body(world: &mut MailshotWorld, expected: String) {
    assert_eq!(composer(world).preview().body, expected);
}

#[then("the group selector is disabled")]
fn selector_disabled(world: &mut MailshotWorld) {
    assert!(!composer(world).group_selector_enabled());
}

#[then(expr = "selecting group {string} again is ignored")]
fn selection_ignored(world: &mut MailshotWorld, name: String) {
    let page = composer(world);
    let id = group_id(page, &name);
    assert!(!page.toggle_group(id));
    assert_eq!(page.selected_groups(), &[id]);
}

#[then("the draft targets all clients")]
fn draft_all_clients(world: &mut MailshotWorld) {
    assert!(composer(world).draft().all_clients);
}

#[then(expr = "the backend has {int} campaign with status {string}")]
fn backend_campaigns(world: &mut MailshotWorld, count: usize, status: String) {
    let campaigns = world.backend.campaigns();
    assert_eq!(campaigns.len(), count);
    assert!(campaigns.iter().all(|c| c["status"] == status.as_str()));
}

#[then(expr = "{int} attachments were stored")]
fn attachments_stored(world: &mut MailshotWorld, count: usize) {
    assert_eq!(world.backend.attachment_count(), count);
}

#[then(expr = "{int} uploads were attempted")]
fn uploads_attempted(world: &mut MailshotWorld, count: usize) {
    assert_eq!(world.backend.upload_calls(), count);
}
