use crate::api::SiteSource;
use crate::event::{Event, EventHandler};
use crate::picker::SitePicker;
use crate::token::TokenStore;
use crate::tui::Tui;
use crate::ui;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    pub picker: SitePicker,
    pub table_state: TableState,
}

impl App {
    pub fn new(picker: SitePicker) -> Self {
        Self {
            should_quit: false,
            picker,
            table_state: TableState::default(),
        }
    }

    /// Looks up the access token and, when there is one, builds the site
    /// source with it and starts the single fetch.
    pub fn activate<T, S, F>(&mut self, tokens: &T, connect: F, tx: UnboundedSender<Event>)
    where
        T: TokenStore + ?Sized,
        S: SiteSource,
        F: FnOnce(String) -> Result<S>,
    {
        let Some(token) = tokens.retrieve_access_token() else {
            info!("no access token available, skipping site fetch");
            self.picker.show_no_sites();
            self.sync_selection();
            return;
        };

        match connect(token) {
            Ok(source) => self.fetch_sites(source, tx),
            Err(e) => {
                warn!(error = %e, "could not create site client");
                self.picker.apply_fetch(Err(format!("{e:#}")));
                self.sync_selection();
            }
        }
    }

    pub async fn run(&mut self, tui: &mut Tui, events: &mut EventHandler) -> Result<()> {
        while !self.should_quit {
            tui.draw(|f| {
                ui::render(self, f);
            })?;

            let event = events.next().await?;
            self.handle_event(event);
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Tick | Event::Resize(_, _) => {}
            Event::Key(key) => self.handle_key_event(key),
            Event::SitesFetched(result) => {
                self.picker.apply_fetch(result);
                self.table_state.select(None);
                self.sync_selection();
            }
        }
    }

    fn fetch_sites<S: SiteSource>(&mut self, source: S, tx: UnboundedSender<Event>) {
        self.picker.begin_loading();
        debug!("spawning site fetch");
        tokio::spawn(async move {
            let result = source.fetch_sites().await.map_err(|e| format!("{e:#}"));
            // The receiver is gone only once the UI has exited.
            let _ = tx.send(Event::SitesFetched(result));
        });
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.cancel(),
            KeyCode::Char('c') if ctrl => self.cancel(),
            KeyCode::Char('n') if ctrl => self.next_row(),
            KeyCode::Char('p') if ctrl => self.previous_row(),
            KeyCode::Char('u') if ctrl => self.edit_keyword(SitePicker::clear_keyword),
            KeyCode::Down => self.next_row(),
            KeyCode::Up => self.previous_row(),
            KeyCode::Enter => self.select_highlighted(),
            KeyCode::Backspace => self.edit_keyword(SitePicker::pop_char),
            KeyCode::Char(c) if !ctrl => self.edit_keyword(|picker| picker.push_char(c)),
            _ => {}
        }
    }

    fn edit_keyword(&mut self, edit: impl FnOnce(&mut SitePicker)) {
        // The search field is hidden while there is nothing to search.
        if !self.picker.search_visible() {
            return;
        }
        edit(&mut self.picker);
        self.sync_selection();
    }

    /// Keeps the highlighted row inside the current filtered view.
    fn sync_selection(&mut self) {
        let rows = self.picker.row_count();
        if rows == 0 {
            self.table_state.select(None);
        } else {
            let current = self.table_state.selected().unwrap_or(0);
            self.table_state.select(Some(current.min(rows - 1)));
        }
    }

    fn next_row(&mut self) {
        let rows = self.picker.row_count();
        if rows == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < rows => i + 1,
            _ => 0, // Loop back to top
        };
        self.table_state.select(Some(i));
    }

    fn previous_row(&mut self) {
        let rows = self.picker.row_count();
        if rows == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => rows - 1, // Loop to bottom
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    fn select_highlighted(&mut self) {
        if let Some(i) = self.table_state.selected() {
            if self.picker.select(i) {
                self.should_quit = true;
            }
        }
    }

    fn cancel(&mut self) {
        info!("site picker dismissed without a selection");
        self.picker.dismiss();
        self.should_quit = true;
    }
}
