//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! The REPL keeps one instance of each screen alive and moves between them:
//! verify, the history list, and a history record.

use crate::cli::{Command, HistoryArgs, ProfileAction, ProfileArgs, VerifyArgs};
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::view::{DetailScreen, HistoryScreen, VerifyScreen, ViewState};
use credify_sdk::CredifyClient;
use rustyline::config::Config as EditorConfig;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::debug;

/// Which screen the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveScreen {
    Verify,
    History,
    Detail,
}

/// Screens and connection owned by one REPL run.
struct Session {
    client: CredifyClient,
    api_url_override: Option<String>,
    active: ActiveScreen,
    verify: VerifyScreen,
    history: Option<HistoryScreen>,
    history_limit: usize,
    detail: Option<DetailScreen>,
}

impl Session {
    fn new(config: &Config, api_url_override: Option<String>) -> Result<Self> {
        let client = CredifyClient::from_config(&config.client_config(api_url_override.as_deref())?)?;
        Ok(Self {
            client,
            api_url_override,
            active: ActiveScreen::Verify,
            verify: VerifyScreen::new(),
            history: None,
            history_limit: config.history_limit(),
            detail: None,
        })
    }

    /// Rebuild the client after the active profile changed.
    fn reconnect(&mut self, config: &Config) -> Result<()> {
        self.client = CredifyClient::from_config(&config.client_config(self.api_url_override.as_deref())?)?;
        self.history_limit = config.history_limit();
        debug!(api_url = self.client.base_url(), "Client rebuilt");
        Ok(())
    }
}

/// Run the interactive REPL.
pub async fn run_repl(config: &mut Config, api_url_override: Option<String>, formatter: &Formatter) -> Result<()> {
    let mut session = Session::new(config, api_url_override)?;

    println!("{}", formatter.info("Credify REPL - Type 'help' for commands, 'exit' to quit"));
    println!("{}", formatter.info(&format!("Service: {}", session.client.base_url())));
    println!();

    let editor_config = EditorConfig::builder()
        .max_history_size(config.settings.history_size)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = match session.active {
            ActiveScreen::Verify => "credify> ",
            ActiveScreen::History => "credify history> ",
            ActiveScreen::Detail => "credify detail> ",
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, &mut session, config, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug)]
enum ReplCommand {
    Exit,
    Help,
    Reset,
    Back,
    Open(String),
    Command(Command),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match head {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "reset" => Ok(ReplCommand::Reset),
        "back" => Ok(ReplCommand::Back),
        "health" => Ok(ReplCommand::Command(Command::Health)),
        "verify" | "check" => Ok(ReplCommand::Command(Command::Verify(VerifyArgs {
            claim: vec![rest.to_string()],
        }))),
        "history" => parse_history_command(&args),
        "open" | "show" => match args.first() {
            Some(target) => Ok(ReplCommand::Open(target.to_string())),
            None => Err(CliError::InvalidInput("Usage: open <number|id>".to_string())),
        },
        "profile" => parse_profile_command(&args),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            head
        ))),
    }
}

fn parse_history_command(args: &[&str]) -> Result<ReplCommand> {
    let limit = match args.first() {
        Some(raw) => Some(
            raw.parse::<usize>()
                .map_err(|_| CliError::InvalidInput(format!("Invalid limit: {}", raw)))?,
        ),
        None => None,
    };
    Ok(ReplCommand::Command(Command::History(HistoryArgs { limit })))
}

fn parse_profile_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Ok(ReplCommand::Command(Command::Profile(ProfileArgs {
            action: ProfileAction::Show,
        })));
    }

    let action = match args[0] {
        "list" => ProfileAction::List,
        "show" => ProfileAction::Show,
        "switch" => {
            if args.len() < 2 {
                return Err(CliError::InvalidInput("Usage: profile switch <name>".to_string()));
            }
            ProfileAction::Switch {
                name: args[1].to_string(),
            }
        }
        _ => return Err(CliError::InvalidInput(format!("Unknown profile action: {}", args[0]))),
    };

    Ok(ReplCommand::Command(Command::Profile(ProfileArgs { action })))
}

/// Execute a REPL command against the session's screens.
async fn execute_repl_command(
    cmd: ReplCommand,
    session: &mut Session,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Exit | ReplCommand::Help => {}
        ReplCommand::Reset => {
            session.active = ActiveScreen::Verify;
            if !session.verify.reset() {
                println!("{}", formatter.info("Nothing to reset"));
                return Ok(());
            }
            println!("{}", formatter.render_verify(&session.verify)?);
        }
        ReplCommand::Back => match session.active {
            ActiveScreen::Detail => show_history(session, None, formatter).await?,
            ActiveScreen::History | ActiveScreen::Verify => {
                session.active = ActiveScreen::Verify;
                println!("{}", formatter.render_verify(&session.verify)?);
            }
        },
        ReplCommand::Open(target) => open_record(session, &target, formatter).await?,
        ReplCommand::Command(Command::Verify(args)) => {
            session.active = ActiveScreen::Verify;
            if !commands::submit_claim(&mut session.verify, &args.text(), &session.client, formatter).await {
                return Err(CliError::InvalidInput("Usage: verify <claim>".to_string()));
            }
            println!("{}", formatter.render_verify(&session.verify)?);
            println!("{}", formatter.info("Type 'reset' to start over"));
        }
        ReplCommand::Command(Command::History(args)) => {
            show_history(session, args.limit, formatter).await?;
        }
        ReplCommand::Command(Command::Health) => {
            commands::execute_health(&session.client, formatter).await?;
        }
        ReplCommand::Command(Command::Profile(args)) => {
            let switching = matches!(args.action, ProfileAction::Switch { .. });
            commands::execute_profile(args, config, formatter)?;
            if switching {
                session.reconnect(config)?;
            }
        }
        ReplCommand::Command(Command::Show(args)) => open_record(session, &args.id, formatter).await?,
        ReplCommand::Command(Command::Repl) => {
            println!("{}", formatter.info("Already in REPL mode"));
        }
    }

    Ok(())
}

/// Open a record by list position or id on the detail screen.
async fn open_record(session: &mut Session, target: &str, formatter: &Formatter) -> Result<()> {
    let id = resolve_target(session, target)?;
    match session.detail.as_mut() {
        Some(detail) => commands::navigate_detail(detail, &id, &session.client, formatter).await,
        None => {
            session.detail = Some(commands::open_detail(&id, &session.client, formatter).await);
        }
    }
    session.active = ActiveScreen::Detail;
    if let Some(detail) = &session.detail {
        println!("{}", formatter.render_detail(detail)?);
        println!("{}", formatter.info("Type 'back' to return to history"));
    }
    Ok(())
}

/// Remount the history list (fetches again, like navigating to it).
async fn show_history(session: &mut Session, limit: Option<usize>, formatter: &Formatter) -> Result<()> {
    let limit = limit.unwrap_or(session.history_limit);
    if limit == 0 {
        return Err(CliError::InvalidInput("Limit must be at least 1".to_string()));
    }

    if let Some(old) = session.history.as_mut() {
        old.close();
    }
    if let Some(detail) = session.detail.as_mut() {
        detail.close();
    }
    session.detail = None;

    let screen = commands::load_history(&session.client, limit, formatter).await;
    println!("{}", formatter.render_history(&screen)?);
    if matches!(screen.state(), ViewState::Success(claims) if !claims.is_empty()) {
        println!("{}", formatter.info("Type 'open <number>' to see details"));
    }

    session.history = Some(screen);
    session.active = ActiveScreen::History;
    Ok(())
}

/// A list position from the current history screen, or a literal id.
///
/// Numbers are positions while a loaded list is shown; otherwise ids.
fn resolve_target(session: &Session, target: &str) -> Result<String> {
    let Ok(position) = target.parse::<usize>() else {
        return Ok(target.to_string());
    };
    let Some(history) = session.history.as_ref() else {
        return Ok(target.to_string());
    };
    let ViewState::Success(claims) = history.state() else {
        return Ok(target.to_string());
    };

    if position == 0 || position > claims.len() {
        return Err(CliError::InvalidInput(format!("No entry {} in the list", position)));
    }
    history
        .select(position)
        .ok_or_else(|| CliError::InvalidInput(format!("Entry {} has no id to open", position)))
}

fn get_history_path() -> Result<PathBuf> {
    let credify_dir = Config::home_dir()?;
    std::fs::create_dir_all(&credify_dir)?;
    Ok(credify_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  verify <claim>              - Verify a claim");
    println!("  reset                       - Clear the current result");
    println!("  history [limit]             - List past verifications");
    println!("  open <number|id>            - Show a past verification");
    println!("  back                        - Return to the previous screen");
    println!("  health                      - Check the service");
    println!("  profile [list|show|switch]  - Manage profiles");
    println!("  help, ?                     - Show this help");
    println!("  exit, quit, q               - Exit REPL");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use credify_domain::{Claim, Verdict};

    #[test]
    fn test_parse_verify_keeps_whole_claim() {
        match parse_repl_command("verify  The Earth   is flat ").unwrap() {
            ReplCommand::Command(Command::Verify(args)) => assert_eq!(args.text(), "The Earth   is flat"),
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_bare_verify_is_blank() {
        match parse_repl_command("verify").unwrap() {
            ReplCommand::Command(Command::Verify(args)) => assert!(args.text().trim().is_empty()),
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_navigation() {
        assert!(matches!(parse_repl_command("back").unwrap(), ReplCommand::Back));
        assert!(matches!(parse_repl_command("reset").unwrap(), ReplCommand::Reset));
        assert!(matches!(parse_repl_command("open 3").unwrap(), ReplCommand::Open(t) if t == "3"));
        assert!(parse_repl_command("open").is_err());
    }

    #[test]
    fn test_parse_history_limit() {
        match parse_repl_command("history 5").unwrap() {
            ReplCommand::Command(Command::History(args)) => assert_eq!(args.limit, Some(5)),
            other => panic!("Unexpected command: {:?}", other),
        }
        assert!(parse_repl_command("history many").is_err());
    }

    #[test]
    fn test_parse_unknown() {
        assert!(parse_repl_command("frobnicate").is_err());
    }

    #[test]
    fn test_resolve_target() {
        let config = Config::default();
        let mut session = Session::new(&config, Some("http://localhost:8000".to_string())).unwrap();
        assert_eq!(resolve_target(&session, "2").unwrap(), "2");

        let (mut history, ticket) = HistoryScreen::mount();
        let mut claim = Claim::new("a", Verdict::True, 90.0);
        claim.id = Some("rec-7".to_string());
        history.settle(ticket, Ok(vec![claim]));
        session.history = Some(history);

        assert_eq!(resolve_target(&session, "1").unwrap(), "rec-7");
        assert_eq!(resolve_target(&session, "rec-9").unwrap(), "rec-9");
    }

    #[test]
    fn test_resolve_target_outside_loaded_list() {
        let config = Config::default();
        let mut session = Session::new(&config, Some("http://localhost:8000".to_string())).unwrap();

        let (mut history, ticket) = HistoryScreen::mount();
        let mut listed: Vec<Claim> = ["rec-1", "rec-2", "rec-3"]
            .iter()
            .map(|id| {
                let mut claim = Claim::new("listed", Verdict::False, 20.0);
                claim.id = Some(id.to_string());
                claim
            })
            .collect();
        listed.push(Claim::new("no id", Verdict::True, 70.0));
        history.settle(ticket, Ok(listed));
        session.history = Some(history);

        let err = resolve_target(&session, "7").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: No entry 7 in the list");
        assert!(resolve_target(&session, "0").is_err());
        assert!(resolve_target(&session, "4").is_err());
        assert_eq!(resolve_target(&session, "3").unwrap(), "rec-3");
    }
}
