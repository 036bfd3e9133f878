//! # profiledesk
//!
//! A CLI for browsing client profiles the way the admin dashboard does: one
//! filterable, sortable, paginated table.
//!
//! ## Overview
//!
//! profiledesk is built on top of profiledesklib. It loads a JSON export of
//! client profiles and renders the dashboard's client table, either sorting
//! and paging in memory (uncontrolled) or asking the list endpoint for one
//! page at a time (controlled, `--server`).
//!
//! ## Usage
//!
//! ```bash
//! # First page of the table
//! profiledesk list clients.json
//!
//! # Filter, then click the "DoB & Age" header twice (descending)
//! profiledesk list clients.json --filter tamil --sort dateOfBirth --sort dateOfBirth
//!
//! # Page 2 of 20 per page, served by the list endpoint
//! profiledesk list clients.json --server --page 2 --page-size 20
//!
//! # One profile as JSON
//! profiledesk show clients.json c-42 --output json
//! ```
//!
//! Pass `--verbose` (or set `RUST_LOG=profiledesklib=trace`) to log table
//! state changes on stderr.

mod render;

use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use profiledesklib::{
    find_client, list_clients, load_clients, Client, ClientQuery, ClientSort, RenderedTable,
    SortOrder, SortState, TableOptions,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::render::{dashboard_columns, render_profile_text, render_table_text};

/// Output format selected with `--output`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn from_matches(matches: &ArgMatches) -> Self {
        match matches.get_one::<String>("output").map(|s| s.as_str()) {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("profiledesk")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Browse, filter, sort and page client profiles")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .global(true)
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log table state changes to stderr"),
        )
        .arg(
            Arg::new("today")
                .long("today")
                .global(true)
                .help("Reference date for ages (YYYY-MM-DD, defaults to today)"),
        )
        .subcommand(
            Command::new("list")
                .about("Show one page of the client table")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .help("JSON file with an array of client profiles"),
                )
                .arg(
                    Arg::new("filter")
                        .short('f')
                        .long("filter")
                        .help("Text typed into the filter box"),
                )
                .arg(
                    Arg::new("sort")
                        .short('s')
                        .long("sort")
                        .action(ArgAction::Append)
                        .help("Click a column header by key (repeat to flip direction)"),
                )
                .arg(
                    Arg::new("page")
                        .short('p')
                        .long("page")
                        .value_parser(value_parser!(usize))
                        .default_value("1")
                        .help("Page to show (1-based)"),
                )
                .arg(
                    Arg::new("page-size")
                        .short('n')
                        .long("page-size")
                        .value_parser(value_parser!(usize))
                        .help("Rows per page (5, 10, 20 or 50)"),
                )
                .arg(
                    Arg::new("server")
                        .long("server")
                        .action(ArgAction::SetTrue)
                        .help("Fetch the page from the list endpoint (controlled table)"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show a single client profile")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .help("JSON file with an array of client profiles"),
                )
                .arg(Arg::new("id").required(true).help("Client profile id")),
        )
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` overrides the default level: `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Reference date from `--today`, or the local date
fn parse_today(matches: &ArgMatches) -> anyhow::Result<NaiveDate> {
    match matches.get_one::<String>("today") {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid --today date '{}', expected YYYY-MM-DD", s)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// User actions requested on the command line
#[derive(Debug)]
struct Interaction {
    filter: Option<String>,
    sort_clicks: Vec<String>,
    page: usize,
    page_size: Option<usize>,
}

impl Interaction {
    fn from_matches(matches: &ArgMatches) -> Self {
        Interaction {
            filter: matches.get_one::<String>("filter").cloned(),
            sort_clicks: matches
                .get_many::<String>("sort")
                .map(|v| v.cloned().collect())
                .unwrap_or_default(),
            page: matches.get_one::<usize>("page").copied().unwrap_or(1),
            page_size: matches.get_one::<usize>("page-size").copied(),
        }
    }
}

/// Handler for the list command, in-memory table
fn list_uncontrolled(
    clients: Vec<Client>,
    interaction: &Interaction,
    today: NaiveDate,
) -> anyhow::Result<RenderedTable> {
    let clients: Vec<Client> = clients.into_iter().map(|c| c.with_age(today)).collect();
    let mut table = TableOptions::new(dashboard_columns())
        .filterable(true)
        .build()?;

    if let Some(filter) = &interaction.filter {
        table.set_filter(filter.as_str());
    }
    for key in &interaction.sort_clicks {
        if !table.toggle_sort(key) {
            tracing::warn!(column = %key, "no sortable column with this key");
        }
    }
    if let Some(size) = interaction.page_size {
        table.set_page_size(size)?;
    }
    table.set_page(interaction.page)?;

    let view = table.view(&clients);
    Ok(RenderedTable::from_view(&table, &view))
}

/// Column the dashboard sorts by before any header click
const INITIAL_SORT_KEY: &str = "name";

/// What the controlled table asks its parent for
#[derive(Debug)]
struct Request {
    filter: String,
    sort: SortState,
    page: usize,
    page_size: Option<usize>,
}

impl Default for Request {
    fn default() -> Self {
        Request {
            filter: String::new(),
            sort: SortState::new(INITIAL_SORT_KEY, SortOrder::Ascending),
            page: 1,
            page_size: None,
        }
    }
}

/// Handler for the list command, served page by page by the list endpoint
fn list_controlled(
    clients: Vec<Client>,
    interaction: &Interaction,
    today: NaiveDate,
) -> anyhow::Result<RenderedTable> {
    let request = Rc::new(RefCell::new(Request::default()));
    let initial_sort = request.borrow().sort.clone();

    let mut table = TableOptions::new(dashboard_columns())
        .filterable(true)
        .external_filter("")
        .external_sort(initial_sort.by, initial_sort.order)
        .total_items(0)
        .on_filter_change({
            let request = Rc::clone(&request);
            move |text: &str| request.borrow_mut().filter = text.to_string()
        })
        .on_sort_change({
            let request = Rc::clone(&request);
            move |by: Option<&str>, order: SortOrder| {
                request.borrow_mut().sort = SortState {
                    by: by.map(str::to_string),
                    order,
                }
            }
        })
        .on_page_change({
            let request = Rc::clone(&request);
            move |page: usize| request.borrow_mut().page = page
        })
        .on_page_size_change({
            let request = Rc::clone(&request);
            move |size: usize| request.borrow_mut().page_size = Some(size)
        })
        .build()?;

    // The parent owns filter and sort: echo each requested value back
    if let Some(filter) = &interaction.filter {
        table.set_filter(filter.as_str());
        let filter = request.borrow().filter.clone();
        table.sync_filter(filter);
    }
    for key in &interaction.sort_clicks {
        if !table.toggle_sort(key) {
            tracing::warn!(column = %key, "no sortable column with this key");
            continue;
        }
        let sort = request.borrow().sort.clone();
        table.sync_sort(sort.by, sort.order);
    }
    if let Some(size) = interaction.page_size {
        table.set_page_size(size)?;
    }
    table.set_page(interaction.page)?;

    let query = build_query(&request.borrow(), table.page_size())?;
    let page = list_clients(&clients, &query, today);
    table.set_total_items(Some(page.pagination.total));

    let view = table.view(&page.clients);
    Ok(RenderedTable::from_view(&table, &view))
}

/// Translate the table's request into a list query
fn build_query(request: &Request, page_size: usize) -> anyhow::Result<ClientQuery> {
    let sort_by: ClientSort = match &request.sort.by {
        Some(by) => by.parse().map_err(|e: String| anyhow::anyhow!(e))?,
        None => ClientSort::Name,
    };
    let query = ClientQuery::new()
        .page(request.page.max(1))
        .page_size(request.page_size.unwrap_or(page_size))
        .search(request.filter.as_str())
        .sort(sort_by, request.sort.order);
    tracing::debug!(?query, "list query");
    Ok(query)
}

fn list_handler(matches: &ArgMatches, format: OutputFormat) -> anyhow::Result<String> {
    let file = matches
        .get_one::<String>("file")
        .context("missing client file")?;
    let today = parse_today(matches)?;
    let interaction = Interaction::from_matches(matches);
    let clients = load_clients(file)?;

    let rendered = if matches.get_flag("server") {
        list_controlled(clients, &interaction, today)?
    } else {
        list_uncontrolled(clients, &interaction, today)?
    };

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rendered)? + "\n"),
        OutputFormat::Text => render_table_text(&rendered),
    }
}

fn show_handler(matches: &ArgMatches, format: OutputFormat) -> anyhow::Result<String> {
    let file = matches
        .get_one::<String>("file")
        .context("missing client file")?;
    let id = matches.get_one::<String>("id").context("missing client id")?;
    let today = parse_today(matches)?;
    let clients = load_clients(file)?;
    let client = find_client(&clients, id)?.clone().with_age(today);

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&client)? + "\n"),
        OutputFormat::Text => render_profile_text(&client),
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    match matches.subcommand() {
        Some(("list", sub)) => list_handler(sub, OutputFormat::from_matches(sub)),
        Some(("show", sub)) => show_handler(sub, OutputFormat::from_matches(sub)),
        _ => Err(anyhow::anyhow!("unknown command")),
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
