use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use chrono::Local;
use fetch_logging::{fetch_info, fetch_warn};
use records_core::{AppViewModel, Msg, Store};
use records_engine::EngineConfig;

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui;
use super::ui::constants::{FETCH_COMMANDS, HELP_TEXT, QUIT_COMMANDS, TIME_FORMAT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Dispatch(Msg),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::from_env());

    let config = EngineConfig::from_env().context("invalid configuration")?;
    let store = Store::new();
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config, event_tx.clone());
    spawn_input_reader(event_tx);

    let mut out = io::stdout().lock();
    let mut refreshed_at: Option<String> = None;
    write_view(&mut out, &store.view(), None)?;

    while let Ok(event) = event_rx.recv() {
        let msg = match event {
            AppEvent::Dispatch(msg) => msg,
            AppEvent::Quit => break,
        };

        let applied_before = store.stats().applied_count;
        let effects = store.dispatch(msg);
        runner.enqueue(effects);

        if store.stats().applied_count > applied_before && store.snapshot().error.is_none() {
            refreshed_at = Some(Local::now().format(TIME_FORMAT).to_string());
        }
        if let Some(view) = store.consume_dirty_view() {
            write_view(&mut out, &view, refreshed_at.as_deref())?;
        }
    }

    fetch_info!("Session ended stats={:?}", store.stats());
    Ok(())
}

fn write_view(out: &mut impl Write, view: &AppViewModel, refreshed_at: Option<&str>) -> io::Result<()> {
    for line in ui::render::render(view, refreshed_at) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let event = match parse_command(&line) {
                Some(event) => event,
                None => {
                    fetch_warn!("Unknown command {:?}", line.trim());
                    eprintln!("{HELP_TEXT}");
                    continue;
                }
            };
            let quit = event == AppEvent::Quit;
            if event_tx.send(event).is_err() || quit {
                return;
            }
        }
        // End of input ends the session.
        let _ = event_tx.send(AppEvent::Quit);
    });
}

fn parse_command(line: &str) -> Option<AppEvent> {
    let command = line.trim().to_ascii_lowercase();
    if FETCH_COMMANDS.contains(&command.as_str()) {
        Some(AppEvent::Dispatch(Msg::FetchRequested))
    } else if QUIT_COMMANDS.contains(&command.as_str()) {
        Some(AppEvent::Quit)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_and_aliases_request_a_fetch() {
        for line in ["", "  ", "f", "FETCH", " reload "] {
            assert_eq!(
                parse_command(line),
                Some(AppEvent::Dispatch(Msg::FetchRequested)),
                "line {line:?}"
            );
        }
    }

    #[test]
    fn quit_and_unknown_commands() {
        assert_eq!(parse_command("q"), Some(AppEvent::Quit));
        assert_eq!(parse_command("Exit"), Some(AppEvent::Quit));
        assert_eq!(parse_command("delete"), None);
    }
}
