//! Interactive prompt loop.
//!
//! Prompt lines and finished fetches are multiplexed on one task. Fetches
//! run in spawned tasks; starting a new one cancels the previous, and any
//! result that still arrives late is dropped by the browser's ticket check.

use artic_lib::api::Page;
use artic_lib::browser::Browser;
use artic_lib::browser::FetchTicket;
use artic_lib::browser::LoadOutcome;
use artic_lib::browser::Navigation;
use artic_lib::error::Error;
use artic_lib::error::ErrorKind;
use artic_lib::model::ArtworkRecord;
use crossterm::style::Stylize;
use log::debug;
use log::info;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::command::Command;
use crate::command::HELP;
use crate::table;

type FetchResult = (FetchTicket, Result<Page, Error>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App {
    browser: Browser,
    results: mpsc::UnboundedSender<FetchResult>,
    receiver: Option<mpsc::UnboundedReceiver<FetchResult>>,
    cancel: Option<CancellationToken>,
    /// An invalid-row notice is waiting to be acknowledged.
    blocked: bool,
}

impl App {
    pub fn new(browser: Browser) -> Self {
        let (results, receiver) = mpsc::unbounded_channel();
        Self {
            browser,
            results,
            receiver: Some(receiver),
            cancel: None,
            blocked: false,
        }
    }

    /// Runs until `quit` or end of input.
    pub async fn run(mut self, start_page: u32) -> std::io::Result<()> {
        let Some(mut receiver) = self.receiver.take() else {
            return Ok(());
        };
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("{}", "Art Institute of Chicago · artworks".bold());
        println!("{}", "Type `help` for commands.".dark_grey());
        self.navigate(start_page);

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if self.handle_line(&line) == Flow::Quit {
                        break;
                    }
                }
                Some((ticket, result)) = receiver.recv() => {
                    self.handle_result(ticket, result);
                }
            }
        }

        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        info!(
            "exiting with {} selected records",
            self.browser.selection().len()
        );
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        if self.blocked {
            self.blocked = false;
            self.render();
            return Flow::Continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                debug!("command: {:?}", command);
                self.execute(command)
            }
            Err(e) => {
                println!("{}", e.to_string().red());
                Flow::Continue
            }
        }
    }

    fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Next => {
                let navigation = self.browser.request_next();
                self.follow(navigation, "No next page.");
            }
            Command::Previous => {
                let navigation = self.browser.request_previous();
                self.follow(navigation, "No previous page.");
            }
            Command::First => self.navigate(1),
            Command::Last => match self.browser.page().map(Page::page_count) {
                Some(count) => self.navigate(count.max(1)),
                None => self.say("No page loaded yet."),
            },
            Command::Page(page) => self.navigate(page),
            Command::Refresh => self.navigate(self.browser.current_page().unwrap_or(1)),
            Command::Toggle(rows) => {
                self.change_selection(|page, visible| table::toggled(page, visible, &rows))
            }
            Command::Select(rows) => {
                self.change_selection(|page, _| table::records_at(page, &rows))
            }
            Command::All => {
                self.change_selection(|page, _| Ok::<_, Error>(page.records().to_vec()))
            }
            Command::None => self.change_selection(|_, _| Ok::<_, Error>(Vec::new())),
            Command::Row(row) => match self.browser.select_row(row) {
                Ok(record) => {
                    debug!("row {} selected record {}", row, record.id);
                    self.render();
                }
                Err(e) => self.block(&e),
            },
            Command::Selected => self.list_selection(),
            Command::Clear => {
                self.browser.clear_selection();
                self.render();
            }
            Command::Show => self.render(),
            Command::Help => println!("{HELP}"),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Emits a selection change computed from the current page and visible selection.
    fn change_selection<F, E>(&mut self, chosen: F)
    where
        F: FnOnce(&Page, &[ArtworkRecord]) -> Result<Vec<ArtworkRecord>, E>,
        E: Into<Error>,
    {
        let Some(page) = self.browser.page() else {
            self.say("No page loaded yet.");
            return;
        };

        match chosen(page, self.browser.visible()) {
            Ok(chosen) => {
                self.browser.change_selection(chosen);
                self.render();
            }
            Err(e) => self.block(&e.into()),
        }
    }

    fn navigate(&mut self, page: u32) {
        match self.browser.request(page) {
            Some(ticket) => self.spawn_fetch(ticket),
            None => self.say(&format!("Page {page} is already loading.")),
        }
    }

    fn follow(&mut self, navigation: Navigation, no_page: &str) {
        match navigation {
            Navigation::Issued(ticket) => self.spawn_fetch(ticket),
            Navigation::Loading(page) => self.say(&format!("Page {page} is already loading.")),
            Navigation::NoPage => self.say(no_page),
        }
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        let token = CancellationToken::new();
        if let Some(previous) = self.cancel.replace(token.clone()) {
            previous.cancel();
        }

        let fetcher = self.browser.fetcher();
        let results = self.results.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("fetch for page {} cancelled", ticket.page());
                }
                result = fetcher.fetch(ticket) => {
                    let _ = results.send((ticket, result));
                }
            }
        });

        println!("{}", format!("Loading page {}…", ticket.page()).dark_grey());
    }

    fn handle_result(&mut self, ticket: FetchTicket, result: Result<Page, Error>) {
        match self.browser.complete(ticket, result) {
            LoadOutcome::Applied => self.render(),
            LoadOutcome::Failed(e) => {
                let reason = match e.kind() {
                    ErrorKind::Format => "the response was not in the expected format",
                    _ => "the request failed",
                };
                println!(
                    "{}",
                    format!(
                        "Could not load page {}: {} ({}). Try again with `page {}`.",
                        ticket.page(),
                        reason,
                        e,
                        ticket.page()
                    )
                    .red()
                );
            }
            LoadOutcome::Stale | LoadOutcome::InFlight => {}
        }
    }

    /// Shows an error that must be acknowledged before anything else happens.
    fn block(&mut self, error: &Error) {
        debug!("blocking notice: {}", error);
        let message = match error.kind() {
            ErrorKind::InvalidRow => "Row number isn't valid for the current page".to_string(),
            _ => error.to_string(),
        };
        println!();
        println!("{}", format!("  {message}  ").white().on_red().bold());
        println!("{}", "Press Enter to continue.".dark_grey());
        self.blocked = true;
    }

    fn say(&self, message: &str) {
        println!("{}", message.dark_grey());
    }

    fn render(&self) {
        let Some(page) = self.browser.page() else {
            self.say("No page loaded yet.");
            return;
        };

        let table = table::render(page, self.browser.visible(), self.browser.selection().len());
        println!();
        println!("{}", table.header.bold());
        println!("{}", table.rule.as_str().dark_grey());
        for (checked, row) in table.rows {
            if checked {
                println!("{}", row.yellow());
            } else {
                println!("{row}");
            }
        }
        println!("{}", table.rule.as_str().dark_grey());
        println!("{}", table.footer);
    }

    fn list_selection(&self) {
        let selection = self.browser.selection();
        if selection.is_empty() {
            self.say("Nothing selected.");
            return;
        }

        println!("{}", format!("{} selected:", selection.len()).bold());
        for line in table::selection_lines(selection) {
            println!("{line}");
        }
    }
}
