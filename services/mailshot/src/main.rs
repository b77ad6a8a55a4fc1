//! Mailshot CLI
//!
//! Opens front-end pages by route path and drives their actions from
//! sub-commands.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mailshot::pages::groups::Membership;
use mailshot::pages::{
    AssumeYes, CampaignDetailPage, ClientListPage, Confirm, GroupsPage, ImportCsvPage, LoginPage,
    NewCampaignPage, NewClientPage, Page, Redirect, ReportsPage,
};
use mailshot::{connect, load_config, render, Config, ConsoleError, Shell};
use mailshot_api::FileUpload;
use tracing::Level;

#[derive(Parser)]
#[command(name = "mailshot")]
#[command(about = "Terminal front-end for the email-marketing backend")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the page at a route path, e.g. `/clientes`
    Open { path: String },
    /// Obtain a token; the password is prompted
    Login { username: String },
    Logout,
    /// Create a backend user; the password is prompted
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
    #[command(subcommand)]
    Clients(ClientsCommand),
    #[command(subcommand)]
    Groups(GroupsCommand),
    #[command(subcommand)]
    Campaigns(CampaignsCommand),
    #[command(subcommand)]
    Reports(ReportsCommand),
}

#[derive(Subcommand)]
enum ClientsCommand {
    List {
        #[arg(short, long)]
        filter: Option<String>,
    },
    Add {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        sobrenome: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        inactive: bool,
    },
    Delete {
        id: u64,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Import a CSV file with header `Nome,Sobrenome,Email`
    Import { file: PathBuf },
}

#[derive(Subcommand)]
enum GroupsCommand {
    List,
    Create {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Member client id, repeatable
        #[arg(long = "client", required = true)]
        clients: Vec<u64>,
    },
    Delete {
        id: u64,
        #[arg(short, long)]
        yes: bool,
    },
    /// Add clients to a group
    Add { id: u64, client_ids: Vec<u64> },
    /// Remove clients from a group
    Remove { id: u64, client_ids: Vec<u64> },
}

#[derive(Subcommand)]
enum CampaignsCommand {
    New {
        #[arg(long)]
        title: String,
        #[arg(long)]
        subject: String,
        /// File holding the HTML body
        #[arg(long)]
        body_file: PathBuf,
        #[arg(long = "group")]
        groups: Vec<u64>,
        #[arg(long)]
        all_clients: bool,
        #[arg(long = "attach")]
        attachments: Vec<PathBuf>,
        /// Only render the preview
        #[arg(long)]
        preview: bool,
        /// Send a test email instead of submitting
        #[arg(long)]
        test_email: Option<String>,
    },
    Show { id: u64 },
    Start { id: u64 },
    /// Schedule at an RFC 3339 date-time
    Schedule { id: u64, at: String },
    Export {
        id: u64,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ReportsCommand {
    List,
    Export {
        id: u64,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

/// Confirmation read from the terminal
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [s/N] ", prompt);
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes")
    }
}

fn confirmer(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm)
    }
}

fn field(result: Result<(), mailshot::form::FieldError>) -> mailshot::Result<()> {
    result.map_err(|e| ConsoleError::Input(e.to_string()))
}

/// Print the page, follow its redirect if any, and report failure
async fn show(shell: &mut Shell, page: Page, redirect: Option<Redirect>) -> ExitCode {
    println!("{}", render::header(&shell.header()));
    println!("{}", render::page(&page));
    let failed = page.status().error.is_some();
    if let Some(redirect) = redirect {
        println!("{}", render::redirect(&redirect));
        let next = shell.follow(redirect).await;
        println!("{}", render::page(&next));
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn run(shell: &mut Shell, command: Command) -> mailshot::Result<ExitCode> {
    let api = shell.api().clone();
    let delay = shell.redirect_delay();
    let download_dir = shell.download_dir().to_path_buf();
    let out_dir = |out: Option<PathBuf>| out.unwrap_or_else(|| download_dir.clone());

    let code = match command {
        Command::Open { path } => {
            let page = shell.open_path(&path).await?;
            show(shell, page, None).await
        }
        Command::Login { username } => {
            let password = rpassword::prompt_password("Senha: ")?;
            let mut page = LoginPage::new();
            field(page.set("username", &username))?;
            field(page.set("password", &password))?;
            let redirect = page.submit(&api, delay).await;
            show(shell, Page::Login(page), redirect).await
        }
        Command::Logout => {
            let page = shell.logout().await?;
            show(shell, page, None).await
        }
        Command::Register {
            username,
            email,
            first_name,
            last_name,
        } => {
            let password = rpassword::prompt_password("Senha: ")?;
            let mut page = LoginPage::new();
            for (name, value) in [
                ("username", username.as_str()),
                ("email", email.as_str()),
                ("password", password.as_str()),
                ("first_name", first_name.as_str()),
                ("last_name", last_name.as_str()),
            ] {
                field(page.registration.set(name, value))?;
            }
            page.register(&api).await;
            show(shell, Page::Login(page), None).await
        }
        Command::Clients(command) => match command {
            ClientsCommand::List { filter } => {
                let mut page = ClientListPage::default();
                page.mount(&api).await;
                if let Some(filter) = filter {
                    page.set_query(filter);
                }
                show(shell, Page::Clients(page), None).await
            }
            ClientsCommand::Add {
                nome,
                sobrenome,
                email,
                inactive,
            } => {
                let mut page = NewClientPage::new();
                field(page.set("nome", &nome))?;
                field(page.set("sobrenome", &sobrenome))?;
                field(page.set("email", &email))?;
                field(page.set("ativo", if inactive { "false" } else { "true" }))?;
                let redirect = page.submit(&api, delay).await;
                show(shell, Page::NewClient(page), redirect).await
            }
            ClientsCommand::Delete { id, yes } => {
                let mut page = ClientListPage::default();
                page.mount(&api).await;
                page.delete(&api, id, confirmer(yes).as_ref()).await;
                show(shell, Page::Clients(page), None).await
            }
            ClientsCommand::Import { file } => {
                let mut page = ImportCsvPage::default();
                if page.select(FileUpload::read(&file).await?) {
                    page.submit(&api).await;
                }
                show(shell, Page::ImportClients(page), None).await
            }
        },
        Command::Groups(command) => {
            let mut page = GroupsPage::new();
            match command {
                GroupsCommand::List => page.mount(&api).await,
                GroupsCommand::Create {
                    name,
                    description,
                    clients,
                } => {
                    let ids: Vec<String> = clients.iter().map(u64::to_string).collect();
                    field(page.set("nome", &name))?;
                    field(page.set("descricao", &description))?;
                    field(page.set("clientes", &ids.join(",")))?;
                    page.create(&api).await;
                }
                GroupsCommand::Delete { id, yes } => {
                    page.mount(&api).await;
                    page.delete(&api, id, confirmer(yes).as_ref()).await;
                }
                GroupsCommand::Add { id, client_ids } => {
                    page.edit_members(&api, id, Membership::Add, &client_ids).await;
                }
                GroupsCommand::Remove { id, client_ids } => {
                    page.edit_members(&api, id, Membership::Remove, &client_ids)
                        .await;
                }
            }
            show(shell, Page::Groups(page), None).await
        }
        Command::Campaigns(command) => match command {
            CampaignsCommand::New {
                title,
                subject,
                body_file,
                groups,
                all_clients,
                attachments,
                preview,
                test_email,
            } => {
                let body = tokio::fs::read_to_string(&body_file).await?;
                let mut page = NewCampaignPage::new();
                page.mount(&api).await;
                field(page.set("titulo", &title))?;
                field(page.set("assunto", &subject))?;
                field(page.set("corpo", &body))?;
                for id in groups {
                    page.toggle_group(id);
                }
                field(page.set("todos_clientes", if all_clients { "true" } else { "false" }))?;
                for path in &attachments {
                    page.attach(FileUpload::read(path).await?);
                }

                let redirect = if preview {
                    None
                } else if let Some(email) = test_email {
                    field(page.set("email_teste", &email))?;
                    page.send_test(&api).await;
                    None
                } else {
                    page.submit(&api, delay).await
                };
                show(shell, Page::NewCampaign(page), redirect).await
            }
            CampaignsCommand::Show { id } => {
                let page = shell.navigate(mailshot::Route::CampaignDetail(id)).await;
                show(shell, page, None).await
            }
            CampaignsCommand::Start { id } => {
                let mut page = CampaignDetailPage::new(id);
                page.mount(&api).await;
                if page.campaign.is_some() {
                    page.start_send(&api).await;
                }
                show(shell, Page::CampaignDetail(page), None).await
            }
            CampaignsCommand::Schedule { id, at } => {
                let mut page = CampaignDetailPage::new(id);
                field(page.set_schedule(&at))?;
                page.schedule(&api).await;
                show(shell, Page::CampaignDetail(page), None).await
            }
            CampaignsCommand::Export { id, out } => {
                let mut page = CampaignDetailPage::new(id);
                page.mount(&api).await;
                page.export(&api, &out_dir(out)).await;
                show(shell, Page::CampaignDetail(page), None).await
            }
        },
        Command::Reports(command) => {
            let mut page = ReportsPage::default();
            page.mount(&api).await;
            if let ReportsCommand::Export { id, out } = command {
                page.export(&api, id, &out_dir(out)).await;
            }
            show(shell, Page::Reports(page), None).await
        }
    };
    Ok(code)
}

fn load(path: Option<&Path>) -> mailshot::Result<Config> {
    match path {
        Some(path) => {
            tracing::debug!("Loading configuration from {:?}", path);
            load_config(path)
        }
        None => {
            tracing::debug!("Using default configuration");
            Ok(Config::default())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, api_url={:?}, log_level={:?}",
        args.config,
        args.api_url,
        args.log_level
    );

    let mut config = load(args.config.as_deref())?;
    if let Some(api_url) = args.api_url {
        config.api.base_url = api_url;
    }

    let api = connect(&config)?;
    let mut shell = Shell::new(api, config.ui.clone());
    Ok(run(&mut shell, args.command).await?)
}
