// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{anyhow, bail, Context, Result};
use application::query_builder::build_search_query;
use application::{SearchResponse, SearchService};
use cli::args::{Args, Command};
use domain::{Profile, SearchRule};
use infrastructure::renderer::ContentRenderer;
use infrastructure::{AnkiConnectClient, Config};
use ports::{HtmlPresenter, TerminalPresenter};
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting ankifind with arguments");

    let config_path = match args.config {
        Some(path) => {
            debug!(?path, "Using provided config path");
            path
        }
        None => Config::default_path()?,
    };

    if let Command::Init { force } = args.command {
        return init_config(&config_path, force);
    }

    let mut config = Config::load_or_default(&config_path)?;
    if let Some(endpoint) = args.endpoint {
        debug!(%endpoint, "Overriding configured endpoint");
        config.settings.anki_connect_endpoint = endpoint;
    }

    let client = AnkiConnectClient::new(
        config.settings.anki_connect_endpoint.clone(),
        Duration::from_secs(config.settings.timeout_secs),
    )?;

    match args.command {
        Command::Search {
            text,
            profile,
            json,
            html,
        } => {
            let mut service = SearchService::new(client, config.settings, config.profiles);
            search(&mut service, &text, profile.as_deref(), json, html).await
        }
        Command::Query { text, profile } => {
            let profile_id = profile.unwrap_or(config.settings.active_profile_id);
            let profile = find_profile(&config.profiles, &profile_id)?;
            println!("{}", build_search_query(&text, &profile.search_rules));
            Ok(())
        }
        Command::Open { card_id } => {
            let service = SearchService::new(client, config.settings, config.profiles);
            info!(card_id, "Opening card in Anki");
            service.open_card(card_id).await?;
            Ok(())
        }
        Command::Decks => print_lines(client.deck_names().await?),
        Command::Models => print_lines(client.model_names().await?),
        Command::Fields { model } => print_lines(client.model_field_names(&model).await?),
        Command::Profiles => {
            print!(
                "{}",
                format_profiles(&config.profiles, &config.settings.active_profile_id)
            );
            Ok(())
        }
        Command::Status => {
            let version = client
                .version()
                .await
                .with_context(|| format!("AnkiConnect not reachable at {}", client.endpoint()))?;
            println!("AnkiConnect v{} at {}", version, client.endpoint());
            Ok(())
        }
        Command::Init { force } => init_config(&config_path, force),
    }
}

async fn search(
    service: &mut SearchService<AnkiConnectClient>,
    text: &str,
    profile: Option<&str>,
    json: bool,
    html: bool,
) -> Result<()> {
    if json {
        let response = service.search(text, profile).await;
        println!("{}", serde_json::to_string_pretty(&response)?);
        return match response {
            SearchResponse::Results { .. } => Ok(()),
            SearchResponse::Error { error } => Err(anyhow!(error)),
        };
    }

    let results = service
        .search_cards(text, profile)
        .await
        .with_context(|| format!("Search for '{}' failed", text))?;

    if html {
        let page = HtmlPresenter::new().render(text, &results);
        let mut renderer = ContentRenderer::new();
        let path = renderer.create_temp_file(&page)?;
        renderer.open_in_browser(&path)?;
    } else {
        let presenter = TerminalPresenter::new(std::io::stdout().is_terminal());
        print!("{}", presenter.render(&results));
    }
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {}\nUse --force to overwrite it.",
            path.display()
        );
    }
    Config::create_default(path)?;
    info!(path = %path.display(), "Wrote default config");
    println!("{}", path.display());
    Ok(())
}

fn find_profile<'a>(profiles: &'a [Profile], id: &str) -> Result<&'a Profile> {
    profiles
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| domain::DomainError::ProfileNotFound(id.to_string()).into())
}

fn print_lines(lines: Vec<String>) -> Result<()> {
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn describe_rule(rule: &SearchRule) -> String {
    let mut parts = Vec::new();
    if let Some(field) = rule.field() {
        parts.push(format!("field={}", field));
    }
    if let Some(deck) = rule.deck() {
        parts.push(format!("deck={}", deck));
    }
    if let Some(note_type) = rule.note_type() {
        parts.push(format!("note={}", note_type));
    }
    if parts.is_empty() {
        "any field".to_string()
    } else {
        parts.join(" ")
    }
}

pub fn format_profiles(profiles: &[Profile], active_id: &str) -> String {
    let mut out = String::new();
    for profile in profiles {
        let marker = if profile.id == active_id { "*" } else { " " };
        out.push_str(&format!("{} {}\t{}\n", marker, profile.id, profile.name));
        for (i, rule) in profile.search_rules.iter().enumerate() {
            out.push_str(&format!("    {}. {}\n", i + 1, describe_rule(rule)));
        }
    }
    out
}
