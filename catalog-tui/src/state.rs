//! Application state for the product table.
//!
//! Everything the screen shows lives here as plain data: the catalog pages,
//! the sentinel observation, the row editor, and the table's scroll position.
//! Methods that may start a fetch return the [`LoadTicket`] instead of
//! spawning anything; the event loop owns the runtime side.

use crate::config::TuiConfig;
use crate::keys::{self, Action};
use crate::notifications::{Notification, NotificationLevel};
use crate::theme::SynthBruteTheme;
use crate::widgets::TitleInput;
use catalog_core::{
    sentinel_visible, CatalogState, CommitOutcome, EditOutcome, EditState, FetchResult,
    LoadOutcome, LoadTicket, ObservationKey, Product, ProductPage, SentinelEvent,
    SentinelObserver, Viewport, PAGE_SIZE, SENTINEL_ROWS,
};
use chrono::{DateTime, Duration, Utc};
use crossterm::event::KeyEvent;

const NOTIFICATION_TTL_SECS: i64 = 4;

/// The last product and the sentinel below it must fit together, otherwise
/// the sentinel can never be fully visible.
pub const MIN_VIEWPORT_ROWS: usize = 1 + SENTINEL_ROWS;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableViewState {
    pub selected: Option<usize>,
    pub offset: usize,
    pub viewport_rows: usize,
}

#[derive(Clone)]
pub struct App {
    pub config: TuiConfig,
    pub theme: SynthBruteTheme,
    pub catalog: CatalogState,
    pub sentinel: SentinelObserver,
    pub editor: EditState,
    pub title_input: Option<TitleInput>,
    pub table: TableViewState,
    pub notifications: Vec<Notification>,
    pub help_visible: bool,
}

impl App {
    pub fn new(config: TuiConfig) -> Self {
        Self {
            config,
            theme: SynthBruteTheme::synthbrute(),
            catalog: CatalogState::new(PAGE_SIZE),
            sentinel: SentinelObserver::new(),
            editor: EditState::new(),
            title_input: None,
            table: TableViewState::default(),
            notifications: Vec::new(),
            help_visible: false,
        }
    }

    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    /// The sentinel row is on screen until the catalog runs out.
    pub fn sentinel_rendered(&self) -> bool {
        !self.catalog.is_exhausted() && self.sentinel.is_observing()
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.table.offset, self.table.viewport_rows)
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.table.selected.and_then(|i| self.products().get(i))
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    pub fn prune_notifications(&mut self, now: DateTime<Utc>) {
        let ttl = Duration::seconds(NOTIFICATION_TTL_SECS);
        self.notifications.retain(|n| !n.is_expired(now, ttl));
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// First activation: load page one regardless of the sentinel.
    pub fn start(&mut self) -> Option<LoadTicket> {
        let ticket = self.catalog.begin_load()?;
        self.reobserve();
        Some(ticket)
    }

    /// Evaluate the sentinel against the current viewport and claim a load if
    /// it just became fully visible.
    pub fn poll_sentinel(&mut self) -> Option<LoadTicket> {
        let visible = sentinel_visible(self.viewport(), self.catalog.len());
        let key = ObservationKey::of(&self.catalog);
        let ticket = match self.sentinel.observe(key, visible)? {
            SentinelEvent::FullyVisible => self.catalog.begin_load()?,
        };
        self.reobserve();
        Some(ticket)
    }

    /// The guard just changed, so observation is re-established under the
    /// new key. Any event this reports is suppressed by the guard.
    fn reobserve(&mut self) {
        let visible = sentinel_visible(self.viewport(), self.catalog.len());
        let _ = self
            .sentinel
            .observe(ObservationKey::of(&self.catalog), visible);
    }

    pub fn apply_page(
        &mut self,
        ticket: LoadTicket,
        result: FetchResult<ProductPage>,
    ) -> LoadOutcome {
        let outcome = self.catalog.complete_load(ticket, result);
        if self.editor.reconcile(self.catalog.products()) {
            self.title_input = None;
        }
        if self.table.selected.is_none() && !self.catalog.is_empty() {
            self.table.selected = Some(0);
        }
        if outcome == LoadOutcome::Exhausted {
            self.sentinel.release();
        }
        self.scroll_to_selection();
        outcome
    }

    /// Unmount: drop the outstanding load and stop observing.
    pub fn teardown(&mut self) {
        self.catalog.cancel_in_flight();
        self.sentinel.release();
        self.editor.cancel_edit();
        self.title_input = None;
    }

    // ------------------------------------------------------------------------
    // Table navigation
    // ------------------------------------------------------------------------

    pub fn set_viewport_rows(&mut self, rows: usize) {
        let rows = rows.max(MIN_VIEWPORT_ROWS);
        if self.table.viewport_rows != rows {
            self.table.viewport_rows = rows;
            self.scroll_to_selection();
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.catalog.len();
        if len == 0 {
            self.table.selected = None;
            return;
        }
        let current = self.table.selected.unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.table.selected = Some(next as usize);
        self.scroll_to_selection();
    }

    pub fn select_first(&mut self) {
        if !self.catalog.is_empty() {
            self.table.selected = Some(0);
            self.scroll_to_selection();
        }
    }

    pub fn select_last(&mut self) {
        if let Some(last) = self.catalog.len().checked_sub(1) {
            self.table.selected = Some(last);
            self.scroll_to_selection();
        }
    }

    /// Keep the selected row on screen. On the last product the sentinel row
    /// below it is pulled into view too, which is what scrolling to the end
    /// of the list means here.
    fn scroll_to_selection(&mut self) {
        let rows = self.table.viewport_rows.max(1);
        let Some(selected) = self.table.selected else {
            self.table.offset = 0;
            return;
        };
        let mut bottom = selected;
        if selected + 1 == self.catalog.len() && self.sentinel_rendered() {
            bottom += SENTINEL_ROWS;
        }
        if selected < self.table.offset {
            self.table.offset = selected;
        }
        if bottom >= self.table.offset + rows {
            self.table.offset = (bottom + 1 - rows).min(selected);
        }
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    pub fn begin_edit_selected(&mut self) {
        let Some((id, title)) = self.selected_product().map(|p| (p.id, p.title.clone())) else {
            return;
        };
        self.editor.begin_edit(id, title.clone());
        let mut input = TitleInput::new(title);
        if self.editor.take_focus_request() {
            input.focus_select_all();
        }
        self.title_input = Some(input);
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let edit_key = keys::edit_key(&key);
        if let Some(outcome) = self
            .editor
            .handle_key(edit_key, self.catalog.products_mut())
        {
            self.title_input = None;
            match outcome {
                EditOutcome::Committed(CommitOutcome::Applied { id, .. }) => {
                    self.notify(NotificationLevel::Success, format!("Saved title for #{}", id));
                }
                EditOutcome::Committed(_) => {}
                EditOutcome::Cancelled { .. } => {
                    self.notify(NotificationLevel::Info, "Edit cancelled");
                }
            }
            return;
        }
        if let Some(input) = self.title_input.as_mut() {
            if input.input(&key) {
                self.editor.update_staged(input.text());
            }
        }
    }

    /// Route a key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if keys::is_force_quit(&key) {
            return true;
        }
        if self.editor.is_active() {
            self.handle_edit_key(key);
            return false;
        }
        let Some(action) = keys::map_key(key) else {
            return false;
        };
        if self.help_visible {
            self.help_visible = false;
            return action == Action::Quit;
        }
        let page = self.table.viewport_rows.max(1) as isize;
        match action {
            Action::Quit => return true,
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-page),
            Action::PageDown => self.move_selection(page),
            Action::Top => self.select_first(),
            Action::Bottom => self.select_last(),
            Action::EditItem => self.begin_edit_selected(),
            Action::OpenHelp => self.help_visible = true,
            Action::Cancel => {}
        }
        false
    }
}
