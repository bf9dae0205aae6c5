use anyhow::{anyhow, bail};
use chrono::NaiveDate;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::calendar::build_grid;
use crate::cli::Invocation;
use crate::config::Config;
use crate::entry::{Category, Entry};
use crate::filter::Selection;
use crate::range::{Granularity, format_label, resolve_range};
use crate::render::Renderer;
use crate::timeline::{find_by_id, project};

pub fn known_command_names() -> Vec<&'static str> {
    vec![
        "timeline",
        "calendar",
        "info",
        "range",
        "categories",
        "help",
        "version",
    ]
}

pub fn expand_command_abbrev<'a>(token: &'a str, known: &[&'a str]) -> Option<&'a str> {
    if known.contains(&token) {
        return Some(token);
    }

    let mut matches = known.iter().copied().filter(|name| name.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

#[instrument(skip(cfg, renderer, entries, inv, today))]
pub fn dispatch(
    cfg: &Config,
    renderer: &mut Renderer,
    entries: &[Entry],
    inv: Invocation,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let command = inv.command.as_str();
    let selection = Selection::parse(&inv.selector_terms, today)?;

    debug!(
        command,
        selectors = ?inv.selector_terms,
        args = ?inv.command_args,
        "dispatching command"
    );

    match command {
        "timeline" => cmd_timeline(cfg, renderer, entries, &selection, today),
        "calendar" => cmd_calendar(cfg, renderer, &selection, today),
        "info" => cmd_info(renderer, entries, &inv.command_args),
        "range" => cmd_range(cfg, &selection, today),
        "categories" => cmd_categories(),
        "help" => cmd_help(),
        "version" => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => Err(anyhow!("unknown command: {other}")),
    }
}

#[instrument(skip(cfg, renderer, entries, selection, today))]
fn cmd_timeline(
    cfg: &Config,
    renderer: &mut Renderer,
    entries: &[Entry],
    selection: &Selection,
    today: NaiveDate,
) -> anyhow::Result<()> {
    info!("command timeline");

    let state = selection.resolve(cfg, today);
    let range = resolve_range(state.reference_date, state.granularity);
    let shown = project(entries, state.category, &range);

    debug!(
        total = entries.len(),
        shown = shown.len(),
        start = %range.start,
        end = %range.end,
        "projected timeline"
    );

    let label = format!(
        "{}  ({})",
        format_label(state.reference_date, state.granularity),
        state.category
    );
    renderer.print_timeline(&label, &shown)
}

#[instrument(skip(cfg, renderer, selection, today))]
fn cmd_calendar(
    cfg: &Config,
    renderer: &mut Renderer,
    selection: &Selection,
    today: NaiveDate,
) -> anyhow::Result<()> {
    info!("command calendar");

    let state = selection.resolve(cfg, today);
    let grid = build_grid(state.reference_date);
    let range = resolve_range(state.reference_date, state.granularity);
    let title = format_label(state.reference_date, Granularity::Month);

    renderer.print_calendar(&title, &grid, &range, today)
}

#[instrument(skip(renderer, entries, args))]
fn cmd_info(renderer: &mut Renderer, entries: &[Entry], args: &[String]) -> anyhow::Result<()> {
    info!("command info");

    let [token] = args else {
        bail!("info requires exactly one entry id");
    };

    // A stale or mistyped id is a normal outcome for a detail view, not
    // a failure.
    match resolve_entry(entries, token)? {
        Some(entry) => renderer.print_entry_info(entry),
        None => {
            println!("No entry found for {token}.");
            Ok(())
        }
    }
}

#[instrument(skip(cfg, selection, today))]
fn cmd_range(cfg: &Config, selection: &Selection, today: NaiveDate) -> anyhow::Result<()> {
    info!("command range");

    let state = selection.resolve(cfg, today);
    let range = resolve_range(state.reference_date, state.granularity);

    println!("view   {}", state.granularity);
    println!("start  {}", range.start);
    println!("end    {}", range.end);
    println!(
        "label  {}",
        format_label(state.reference_date, state.granularity)
    );
    Ok(())
}

fn cmd_categories() -> anyhow::Result<()> {
    println!("all");
    for category in Category::ALL {
        println!("{category}");
    }
    Ok(())
}

fn cmd_help() -> anyhow::Result<()> {
    println!("usage: vitalog [selectors] <command> [args]");
    println!();
    println!("selectors: category:<tag> | <tag> | view:<day|week|month> | <view>");
    println!("           date:<expr> | on:<expr> | <YYYY-MM-DD>");
    println!("           date exprs: today, yesterday, tomorrow, YYYY-MM-DD, +Nd/-Nw/+Nm");
    println!();
    println!("commands:");
    println!("  timeline     entries in the selected range, oldest first (default)");
    println!("  calendar     month grid for the selected date");
    println!("  info <id>    full detail for one entry (uuid or unique prefix)");
    println!("  range        resolved range boundaries and label");
    println!("  categories   the recognized category tags");
    println!("  help         this text");
    println!("  version      print the version");
    Ok(())
}

/// Looks an entry up by full uuid or an unambiguous id prefix.
fn resolve_entry<'a>(entries: &'a [Entry], token: &str) -> anyhow::Result<Option<&'a Entry>> {
    if let Ok(id) = Uuid::parse_str(token) {
        return Ok(find_by_id(entries, id));
    }

    let needle = token.to_ascii_lowercase();
    let mut matches = entries
        .iter()
        .filter(|entry| entry.id.to_string().starts_with(&needle));

    let Some(first) = matches.next() else {
        return Ok(None);
    };
    if matches.next().is_some() {
        return Err(anyhow!("entry id prefix is ambiguous: {token}"));
    }
    Ok(Some(first))
}
