//! Local placeholder preview using one sample client

use std::sync::LazyLock;

use mailshot_api::models::Client;
use regex::Regex;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("placeholder pattern compiles"));

/// Substitute `{{nome}}`, `{{sobrenome}}` and `{{email}}` from `sample`.
///
/// Unknown placeholders are left untouched; without a sample the text is
/// returned verbatim.
pub fn render_placeholders(text: &str, sample: Option<&Client>) -> String {
    let Some(sample) = sample else {
        return text.to_string();
    };
    PLACEHOLDER_RE
        .replace_all(text, |caps: &regex::Captures<'_>| match &caps[1] {
            "nome" => sample.first_name.clone(),
            "sobrenome" => sample.last_name.clone(),
            "email" => sample.email.clone(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}
