use crate::api::Site;
use std::fmt;
use tracing::{info, warn};

/// Receives `(site_id, description)` for the chosen site.
pub type OnChange = Box<dyn FnOnce(i64, Option<String>) + Send>;

pub const LOADING_MESSAGE: &str = "Loading sites...";
pub const NO_SITES_MESSAGE: &str = "No sites";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    NoSites,
    List,
}

/// Sites whose name or URL host contains `keyword`, case-insensitively, in
/// their original order. An empty keyword keeps everything.
pub fn filter_sites<'a>(sites: &'a [Site], keyword: &str) -> Vec<&'a Site> {
    if keyword.is_empty() {
        return sites.iter().collect();
    }
    let needle = keyword.to_lowercase();
    sites
        .iter()
        .filter(|site| {
            site.name
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(&needle)
                || site
                    .host()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&needle)
        })
        .collect()
}

/// State behind the site picker screen: the fetched sites, the search
/// keyword and the caller's selection callback.
///
/// The filtered view is never stored; every query recomputes it from the
/// current sites and keyword.
pub struct SitePicker {
    sites: Vec<Site>,
    keyword: String,
    loading: bool,
    on_change: Option<OnChange>,
    dismissed: bool,
}

impl fmt::Debug for SitePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SitePicker")
            .field("sites", &self.sites.len())
            .field("keyword", &self.keyword)
            .field("loading", &self.loading)
            .field("dismissed", &self.dismissed)
            .finish_non_exhaustive()
    }
}

impl SitePicker {
    pub fn new(on_change: OnChange) -> Self {
        Self {
            sites: Vec::new(),
            keyword: String::new(),
            loading: false,
            on_change: Some(on_change),
            dismissed: false,
        }
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// No credentials: skip the fetch and show the empty state.
    pub fn show_no_sites(&mut self) {
        self.loading = false;
        self.sites.clear();
    }

    /// Applies the outcome of the fetch. A failure leaves the collection
    /// empty, exactly like an empty successful response.
    pub fn apply_fetch(&mut self, result: Result<Vec<Site>, String>) {
        self.loading = false;
        self.sites = match result {
            Ok(sites) => {
                info!(count = sites.len(), "sites loaded");
                sites
            }
            Err(e) => {
                warn!(error = %e, "site fetch failed");
                Vec::new()
            }
        };
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.keyword.push(c);
    }

    pub fn pop_char(&mut self) {
        self.keyword.pop();
    }

    pub fn clear_keyword(&mut self) {
        self.keyword.clear();
    }

    pub fn filtered(&self) -> Vec<&Site> {
        filter_sites(&self.sites, &self.keyword)
    }

    pub fn row_count(&self) -> usize {
        self.filtered().len()
    }

    pub fn display_state(&self) -> DisplayState {
        if self.loading {
            DisplayState::Loading
        } else if self.sites.is_empty() {
            DisplayState::NoSites
        } else {
            DisplayState::List
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self.display_state() {
            DisplayState::Loading => Some(LOADING_MESSAGE),
            DisplayState::NoSites => Some(NO_SITES_MESSAGE),
            DisplayState::List => None,
        }
    }

    pub fn search_visible(&self) -> bool {
        !self.sites.is_empty()
    }

    /// Hands the site at `index` of the filtered view to the callback and
    /// dismisses the picker. Returns false when nothing was selected.
    pub fn select(&mut self, index: usize) -> bool {
        if self.dismissed {
            return false;
        }
        let Some(site) = self.filtered().get(index).copied() else {
            return false;
        };
        let site_id = site.id;
        let description = site.display_label();

        info!(site_id, ?description, "site selected");
        if let Some(on_change) = self.on_change.take() {
            on_change(site_id, description);
        }
        self.dismissed = true;
        true
    }

    /// Closes the picker without a selection; the callback is dropped unused.
    pub fn dismiss(&mut self) {
        self.on_change = None;
        self.dismissed = true;
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }
}
