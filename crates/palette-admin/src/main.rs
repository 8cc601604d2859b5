//! palette-admin: command-line driver for the CSS export feature.
//!
//! This is the composition root. It wires the JSON settings store, the
//! companion probe, and the token service into one export handler with its
//! dependencies passed in explicitly, then drives the handler from
//! subcommands the way the admin surface would: render the tokened export
//! link, run an export request, render failure notices, evaluate the
//! companion gate.

mod cli;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use palette_common::{ExportError, NoticeLevel, Result};
use palette_export::{
    notice, plugin_screen_gate, section, AdminRequest, CompanionProbe, ExportDisposition,
    ExportHandler, Extensions, GateAction, JsonSettingsStore, SettingsStore, TokenService,
};

use crate::cli::{Args, Command};

fn main() {
    let args = cli::parse();

    let filter = match &args.log_level {
        Some(level) => tracing_subscriber::EnvFilter::new(format!("palette_admin={level}")),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "palette_admin=info".into()),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(args) {
        tracing::error!(error = %e, "Command failed");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let surface = Surface::wire(&args)?;

    match &args.command {
        Command::Link => surface.print_sections(SystemTime::now()),
        Command::Export { query, out } => surface.export(query, out.as_deref(), SystemTime::now())?,
        Command::Notices { query } => surface.print_notices(query),
        Command::Gate { screen } => surface.gate(screen),
        Command::Status => surface.status()?,
    }

    Ok(())
}

/// The wired-up admin surface: one handler plus the collaborators the
/// settings and plugin screens talk to.
struct Surface {
    handler: ExportHandler<JsonSettingsStore, JsonSettingsStore>,
    extensions: Arc<Extensions>,
    store: JsonSettingsStore,
}

impl Surface {
    fn wire(args: &Args) -> Result<Self> {
        let dir = state_dir(args)?;
        let store = JsonSettingsStore::new(dir.join("settings.json"));
        let tokens = Arc::new(TokenService::load_or_generate(&dir.join("token-key.json"))?);

        let mut extensions = Extensions::new();
        section::register_export_section(&mut extensions, tokens.clone(), args.settings_url.clone());
        let extensions = Arc::new(extensions);

        let handler = ExportHandler::new(
            store.clone(),
            store.clone(),
            tokens,
            extensions.clone(),
            args.settings_url.clone(),
        );

        tracing::debug!(store = %store.path().display(), "Admin surface wired");
        Ok(Self {
            handler,
            extensions,
            store,
        })
    }

    fn print_sections(&self, now: SystemTime) {
        for section in self.extensions.build_sections(now) {
            println!("{}: {}", section.title, section.text);
            for field in &section.fields {
                println!("  {} [{}]", field.label, field.button);
                println!("  {}", field.link);
            }
        }
    }

    fn export(&self, query: &str, out: Option<&std::path::Path>, now: SystemTime) -> Result<()> {
        let req = AdminRequest::from_query(query);
        match self.handler.handle(&req, now)? {
            // Not an export request: no output at all.
            ExportDisposition::Ignored => {}
            ExportDisposition::Redirect(url) => println!("redirect: {url}"),
            ExportDisposition::Deliver(attachment) => match out {
                Some(path) => {
                    std::fs::write(path, attachment.body())?;
                    println!(
                        "wrote {} ({} bytes)",
                        path.display(),
                        attachment.content_length()
                    );
                }
                None => {
                    for (name, value) in attachment.headers() {
                        println!("{name}: {value}");
                    }
                    println!();
                    std::io::stdout().write_all(attachment.body())?;
                }
            },
        }
        Ok(())
    }

    fn print_notices(&self, query: &str) {
        let req = AdminRequest::from_query(query);
        if let Some(notice) = notice::failure_notice(&req) {
            println!("[{}] {}", level_str(notice.level), notice.body);
        }
    }

    fn gate(&self, screen: &str) {
        match plugin_screen_gate(screen, &self.store) {
            GateAction::KeepActive => println!("active"),
            GateAction::Deactivate(notice) => println!("deactivated: {}", notice.body),
        }
    }

    fn status(&self) -> Result<()> {
        let snapshot = self.store.snapshot()?;
        println!("store: {}", self.store.path().display());
        println!("saved settings: {}", snapshot.has_saved_settings());
        println!("companion active: {}", self.store.companion_active());
        match snapshot.css_payload() {
            Some(css) => println!("stored css: {} bytes", css.len()),
            None => println!("stored css: none"),
        }
        Ok(())
    }
}

fn state_dir(args: &Args) -> Result<PathBuf> {
    if let Some(dir) = &args.state_dir {
        return Ok(dir.clone());
    }
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ExportError::Other("could not determine data directory".into()))?;
    Ok(data_dir.join("palette-pro"))
}

fn level_str(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    }
}
