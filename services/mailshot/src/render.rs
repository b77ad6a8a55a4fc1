//! Plain-text rendering of the header and pages

use std::fmt::Write as _;

use mailshot_api::models::{format_rate, Campaign, Report, Timestamp};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::form::{FieldKind, FieldValue, Form};
use crate::pages::{
    CampaignDetailPage, ClientListPage, GroupsPage, HomePage, ImportCsvPage, LoginPage,
    NewCampaignPage, NewClientPage, Page, PageStatus, Redirect, ReportsPage,
};
use crate::shell::Header;

fn timestamp(at: &Timestamp) -> String {
    at.format("%d/%m/%Y %H:%M:%S").to_string()
}

fn table<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::modern()).to_string()
}

pub fn header(header: &Header) -> String {
    let links: Vec<String> = header
        .links
        .iter()
        .map(|(label, route)| format!("{} ({})", label, route))
        .collect();
    format!(
        "{} | {} | [{}]",
        header.brand,
        links.join(" | "),
        header.session_action()
    )
}

pub fn page(page: &Page) -> String {
    let mut out = format!("== {} ==\n", page.route().title());
    out.push_str(&status(page.status()));
    let body = match page {
        Page::Home(p) => home(p),
        Page::Login(p) => login(p),
        Page::Clients(p) => client_list(p),
        Page::NewClient(p) => new_client(p),
        Page::ImportClients(p) => import_csv(p),
        Page::Groups(p) => groups(p),
        Page::NewCampaign(p) => new_campaign(p),
        Page::CampaignDetail(p) => campaign_detail(p),
        Page::Reports(p) => reports(p),
    };
    out.push_str(&body);
    out
}

/// Notice printed while a redirect is pending
pub fn redirect(redirect: &Redirect) -> String {
    format!(
        "Redirecionando para {} em {}...",
        redirect.to.title(),
        humantime::format_duration(redirect.after)
    )
}

pub fn status(status: &PageStatus) -> String {
    let mut out = String::new();
    if status.loading {
        out.push_str("Carregando...\n");
    }
    if let Some(error) = &status.error {
        let _ = writeln!(out, "[erro] {}", error);
    }
    if status.login_required {
        out.push_str("Sessão ausente ou expirada. Entre com `mailshot login`.\n");
    }
    if let Some(success) = &status.success {
        let _ = writeln!(out, "[ok] {}", success);
    }
    out
}

fn form(form: &Form) -> String {
    let mut out = String::new();
    for spec in form.fields() {
        let value = match (spec.kind, form.value(spec.name)) {
            (FieldKind::Password, Some(FieldValue::Text(text))) => "*".repeat(text.chars().count()),
            (_, Some(FieldValue::Text(text))) => text.clone(),
            (_, Some(FieldValue::Flag(true))) => "[x]".to_string(),
            (_, Some(FieldValue::Flag(false))) => "[ ]".to_string(),
            (_, Some(FieldValue::Date(Some(at)))) => timestamp(at),
            (_, Some(FieldValue::Ids(ids))) => ids
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            _ => String::new(),
        };
        let marker = if spec.is_required() { " *" } else { "" };
        let _ = writeln!(out, "{}{}: {}", spec.label, marker, value);
    }
    out
}

fn home(page: &HomePage) -> String {
    format!(
        "Clientes: {}\nCampanhas Ativas: {}\nCampanhas Concluídas: {}\n\n\
         Ações Rápidas:\n  Cadastrar Novo Cliente (/clientes/novo)\n  \
         Importar Lista de Clientes (/clientes/importar)\n  Criar Nova Campanha (/campanhas/nova)\n",
        page.total_clients, page.tally.active, page.tally.completed
    )
}

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Nome")]
    first_name: String,
    #[tabled(rename = "Sobrenome")]
    last_name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Status")]
    active: &'static str,
}

fn client_list(page: &ClientListPage) -> String {
    let mut out = String::new();
    if !page.query().is_empty() {
        let _ = writeln!(out, "Filtro: {}", page.query());
    }
    let visible = page.visible();
    if visible.is_empty() {
        if !page.status.loading && page.status.error.is_none() {
            out.push_str("Nenhum cliente encontrado.\n");
        }
        return out;
    }
    let rows = visible
        .into_iter()
        .map(|c| ClientRow {
            id: c.id,
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            email: c.email.clone(),
            active: if c.active { "Ativo" } else { "Inativo" },
        })
        .collect();
    out.push_str(&table(rows));
    out.push('\n');
    out
}

fn new_client(page: &NewClientPage) -> String {
    form(&page.form)
}

fn import_csv(page: &ImportCsvPage) -> String {
    let mut out = format!(
        "Formato esperado: {}\nArquivo: {}\n",
        crate::pages::import_csv::EXPECTED_HEADER,
        page.selected().map_or("(nenhum)", |f| f.file_name.as_str())
    );
    if let Some(summary) = &page.summary {
        let _ = writeln!(out, "Clientes criados: {}", summary.created);
        let _ = writeln!(out, "Clientes atualizados: {}", summary.updated);
        if !summary.errors.is_empty() {
            let _ = writeln!(out, "Erros ({}):", summary.errors.len());
            for error in &summary.errors {
                let _ = writeln!(out, "  - {}", error);
            }
        }
    }
    out
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Nome")]
    name: String,
    #[tabled(rename = "Descrição")]
    description: String,
    #[tabled(rename = "Clientes")]
    members: u64,
}

fn groups(page: &GroupsPage) -> String {
    if page.groups.is_empty() {
        return "Nenhum grupo cadastrado.\n".to_string();
    }
    let rows = page
        .groups
        .iter()
        .map(|g| GroupRow {
            id: g.id,
            name: g.name.clone(),
            description: g.description.clone(),
            members: g.client_count.max(g.client_ids.len() as u64),
        })
        .collect();
    format!("{}\n", table(rows))
}

fn new_campaign(page: &NewCampaignPage) -> String {
    let mut out = form(&page.form);
    let disabled = if page.group_selector_enabled() {
        ""
    } else {
        " (desabilitado)"
    };
    let _ = writeln!(out, "Grupos{}:", disabled);
    for group in &page.groups {
        let mark = if page.selected_groups().contains(&group.id) {
            "x"
        } else {
            " "
        };
        let _ = writeln!(out, "  [{}] {} - {}", mark, group.id, group.name);
    }
    if !page.pending_attachments().is_empty() {
        out.push_str("Anexos:\n");
        for file in page.pending_attachments() {
            let _ = writeln!(out, "  {} ({} bytes)", file.file_name, file.bytes.len());
        }
    }
    let preview = page.preview();
    let _ = writeln!(out, "\n-- Pré-visualização --\nAssunto: {}\n{}", preview.subject, preview.body);
    out
}

fn report(report: &Report) -> String {
    format!(
        "Total de Envios: {}\nTotal de Aberturas: {}\nTotal de Cliques: {}\nTotal de Respostas: {}\n\
         Taxa de Abertura: {}\nTaxa de Clique: {}\nTaxa de Resposta: {}\n",
        report.sends,
        report.opens,
        report.clicks,
        report.replies,
        format_rate(report.open_rate),
        format_rate(report.click_rate),
        format_rate(report.reply_rate)
    )
}

fn recipients(campaign: &Campaign) -> String {
    if campaign.all_clients {
        return "Todos os clientes ativos".to_string();
    }
    let names: Vec<String> = campaign
        .groups
        .iter()
        .map(|g| g.name().map_or_else(|| format!("#{}", g.id()), str::to_string))
        .collect();
    if names.is_empty() {
        "Grupos específicos".to_string()
    } else {
        format!("Grupos específicos: {}", names.join(", "))
    }
}

#[derive(Tabled)]
struct DeliveryRow {
    #[tabled(rename = "Destinatário")]
    recipient: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Enviado em")]
    sent_at: String,
}

fn campaign_detail(page: &CampaignDetailPage) -> String {
    let Some(campaign) = &page.campaign else {
        return String::new();
    };
    let mut out = String::new();
    let _ = writeln!(out, "Título: {}", campaign.title);
    let _ = writeln!(out, "Assunto: {}", campaign.subject);
    let _ = writeln!(out, "Status: {}", campaign.status);
    let _ = writeln!(out, "Criado por: {}", campaign.creator_display().unwrap_or("-"));
    let dates = [
        ("Data de Criação", campaign.created_at),
        ("Agendado para", campaign.scheduled_at),
        ("Início do Envio", campaign.send_started_at),
        ("Fim do Envio", campaign.send_finished_at),
    ];
    for (label, at) in dates {
        if let Some(at) = at {
            let _ = writeln!(out, "{}: {}", label, timestamp(&at));
        }
    }
    let _ = writeln!(out, "Destinatários: {}", recipients(campaign));
    if campaign.attachments.is_empty() {
        out.push_str("Anexos: Nenhum anexo\n");
    } else {
        out.push_str("Anexos:\n");
        for attachment in &campaign.attachments {
            let _ = writeln!(out, "  {} - {}", attachment.id, attachment.name);
        }
    }
    if let Some(r) = &campaign.report {
        out.push_str("\n-- Relatório --\n");
        out.push_str(&report(r));
    }
    if !campaign.emails.is_empty() {
        let rows = campaign
            .emails
            .iter()
            .map(|e| DeliveryRow {
                recipient: e.recipient.clone(),
                status: e.status.label(),
                sent_at: e.sent_at.as_ref().map_or_else(String::new, timestamp),
            })
            .collect();
        let _ = writeln!(out, "\n{}", table(rows));
    }
    out.push_str("\n-- Conteúdo do Email --\n");
    out.push_str(&campaign.body);
    out.push('\n');
    if page.can_start_send() {
        let _ = writeln!(out, "\nAções: mailshot campaigns start {}", campaign.id);
    }
    out
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Campanha")]
    title: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Envios")]
    sends: u64,
    #[tabled(rename = "Aberturas")]
    opens: String,
    #[tabled(rename = "Cliques")]
    clicks: String,
    #[tabled(rename = "Respostas")]
    replies: String,
}

fn reports(page: &ReportsPage) -> String {
    if page.campaigns.is_empty() {
        return "Nenhuma campanha enviada ainda.\n".to_string();
    }
    let rows = page
        .campaigns
        .iter()
        .map(|c| {
            let r = c.report_or_default();
            ReportRow {
                id: c.id,
                title: c.title.clone(),
                status: c.status.label(),
                sends: r.sends,
                opens: format!("{} ({})", r.opens, format_rate(r.open_rate)),
                clicks: format!("{} ({})", r.clicks, format_rate(r.click_rate)),
                replies: format!("{} ({})", r.replies, format_rate(r.reply_rate)),
            }
        })
        .collect();
    format!("{}\n", table(rows))
}

fn login(page: &LoginPage) -> String {
    form(&page.form)
}
