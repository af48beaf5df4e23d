//! Entry point for the pchealth TUI. Parses args, resolves the server and runs the App.

use std::env;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use pchealth::app::App;
use pchealth::config::Endpoints;
use pchealth::profiles::{
    config_dir, load_profiles, save_profiles, ProfileRequest, Resolved, ServerProfile,
};
use pchealth::render::Panel;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "[--profile NAME|-P NAME] [--save] [--hide PANEL,..] [--log-file PATH] \
                     [--dry-run] [http://HOST:PORT]";
const HELP_TAIL: &str = "Panels: cpu, memory, disk, network, processes, logs, cache\n\
                         Keys: q quit, 1-3/Tab switch view, c clean cache, b back, \
                         F2-F8 toggle panels";

#[derive(Debug, Default)]
struct ParsedArgs {
    url: Option<String>,
    profile: Option<String>,
    hide: Vec<String>,
    log_file: Option<PathBuf>,
    save: bool,
    dry_run: bool,
}

fn split_list(v: &str) -> Vec<String> {
    v.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "pchealth".into());
    let mut parsed = ParsedArgs::default();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Err(format!("Usage: {prog} {USAGE}\n\n{HELP_TAIL}"));
            }
            "--profile" | "-P" => parsed.profile = it.next(),
            "--hide" => {
                if let Some(v) = it.next() {
                    parsed.hide.extend(split_list(&v));
                }
            }
            "--log-file" => parsed.log_file = it.next().map(PathBuf::from),
            "--save" => parsed.save = true,
            "--dry-run" => parsed.dry_run = true,
            _ if arg.starts_with("--profile=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        parsed.profile = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--hide=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    parsed.hide.extend(split_list(v));
                }
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option {arg}. Usage: {prog} {USAGE}"));
            }
            _ => {
                if parsed.url.is_none() {
                    parsed.url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. Usage: {prog} {USAGE}"));
                }
            }
        }
    }
    Ok(parsed)
}

fn parse_panels(names: &[String]) -> anyhow::Result<Vec<Panel>> {
    names
        .iter()
        .map(|n| Panel::parse(n).with_context(|| format!("unknown panel {n:?}")))
        .collect()
}

// The TUI owns the terminal, so logs go to a file.
fn init_logging(path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(|| config_dir().join("pchealth.log"));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };
    if !parsed.dry_run {
        init_logging(parsed.log_file.clone())?;
    }

    let profiles_file = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        url: parsed.url.clone(),
        hide: parsed.hide.clone(),
    };

    let mut profiles_mut = profiles_file.clone();
    let server = match req.resolve(&profiles_file) {
        Resolved::Direct(p) => {
            // A named profile is saved on first use; an existing one only with --save or consent.
            if let Some(name) = parsed.profile.as_ref() {
                let write = match profiles_mut.profiles.get(name) {
                    None => true,
                    Some(entry) if *entry != p => {
                        parsed.save
                            || prompt_yes_no(&format!(
                                "Overwrite existing profile '{name}'? [y/N]: "
                            ))
                    }
                    Some(_) => false,
                };
                if write {
                    profiles_mut.profiles.insert(name.clone(), p.clone());
                    if let Err(e) = save_profiles(&profiles_mut) {
                        eprintln!("could not save profile '{name}': {e}");
                    }
                }
            }
            p
        }
        Resolved::Loaded(p) => p,
        Resolved::Choose(names) => {
            eprintln!("Select profile:");
            for (i, n) in names.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, n);
            }
            let line = prompt_string("Enter number (or blank to abort): ")?;
            let picked = line
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| names.get(i))
                .and_then(|name| profiles_mut.profiles.get(name));
            match picked {
                Some(entry) => {
                    let mut entry = entry.clone();
                    if !parsed.hide.is_empty() {
                        entry.hide = parsed.hide.clone();
                    }
                    entry
                }
                None => return Ok(()),
            }
        }
        Resolved::UnknownProfile(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let url = prompt_string("Enter server URL (http://HOST:PORT): ")?;
            let url = url.trim();
            if url.is_empty() {
                return Ok(());
            }
            let entry = ServerProfile {
                url: url.to_string(),
                hide: parsed.hide.clone(),
            };
            profiles_mut.profiles.insert(name.clone(), entry.clone());
            if let Err(e) = save_profiles(&profiles_mut) {
                eprintln!("could not save profile '{name}': {e}");
            }
            entry
        }
        Resolved::Nothing => {
            eprintln!("No URL provided and no profiles to select.");
            return Ok(());
        }
    };

    let hidden = parse_panels(&server.hide)?;
    let endpoints = Endpoints::from_base(&server.url)?;
    if parsed.dry_run {
        println!("socket: {}", endpoints.socket);
        println!("cleanup: {}", endpoints.cleanup);
        return Ok(());
    }

    tracing::info!(
        "starting against {} (hidden: {:?})",
        endpoints.socket,
        hidden
    );
    let mut app = App::new(endpoints, &hidden)?;
    app.run().await
}

fn prompt_yes_no(prompt: &str) -> bool {
    match prompt_string(prompt) {
        Ok(line) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        std::iter::once("pchealth")
            .chain(v.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn flags_and_positional_url() {
        let p = parse_args(args(&[
            "-P",
            "home",
            "--hide",
            "logs, cache",
            "--save",
            "http://box:5000",
        ]))
        .unwrap();
        assert_eq!(p.profile.as_deref(), Some("home"));
        assert_eq!(p.hide, vec!["logs".to_string(), "cache".to_string()]);
        assert!(p.save);
        assert_eq!(p.url.as_deref(), Some("http://box:5000"));
    }

    #[test]
    fn equals_forms() {
        let p = parse_args(args(&["--profile=lab", "--hide=net"])).unwrap();
        assert_eq!(p.profile.as_deref(), Some("lab"));
        assert_eq!(p.hide, vec!["net".to_string()]);
    }

    #[test]
    fn help_and_errors() {
        assert!(parse_args(args(&["--help"])).unwrap_err().starts_with("Usage:"));
        assert!(parse_args(args(&["a", "b"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }

    #[test]
    fn panel_names_are_checked() {
        assert!(parse_panels(&["memory".into(), "net".into()]).is_ok());
        assert!(parse_panels(&["gpu".into()]).is_err());
    }
}
