//! Dashboard state: view scope, app list query and card selection

use std::collections::HashSet;

use crate::scope::ScopeId;
use rbdash_core::App;

/// Observable state of the app list query
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState {
    /// In flight, or not yet eligible to run
    #[default]
    Pending,

    /// The last request failed
    Failed,

    /// Collection in backend order. `refreshing` is set while a refetch runs
    /// on top of cached data.
    Loaded { apps: Vec<App>, refreshing: bool },
}

impl QueryState {
    pub fn apps(&self) -> &[App] {
        match self {
            QueryState::Loaded { apps, .. } => apps,
            _ => &[],
        }
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(self, QueryState::Loaded { refreshing: true, .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Open scope while the dashboard is active
    scope: Option<ScopeId>,

    last_scope: Option<ScopeId>,

    pub apps: QueryState,

    /// Scope the latest list request was issued for
    fetched_in: Option<ScopeId>,

    /// A list request is outstanding
    pub fetch_in_flight: bool,

    /// Index into the loaded collection
    pub selected: usize,

    /// App ids whose logo failed to load
    pub logo_failures: HashSet<String>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(&self) -> Option<ScopeId> {
        self.scope
    }

    pub fn is_active(&self, scope: ScopeId) -> bool {
        self.scope == Some(scope)
    }

    /// Open a fresh scope, returning `(new, previously open)`
    pub fn open_scope(&mut self) -> (ScopeId, Option<ScopeId>) {
        let previous = self.close_scope();
        let next = self
            .last_scope
            .map(ScopeId::next)
            .unwrap_or_else(|| ScopeId::new(1));
        self.last_scope = Some(next);
        self.scope = Some(next);
        (next, previous)
    }

    /// Close the active scope. An outstanding request of that scope will
    /// never be answered, so it stops counting as in flight.
    pub fn close_scope(&mut self) -> Option<ScopeId> {
        let closed = self.scope.take();
        if closed.is_some() && self.fetch_in_flight {
            self.fetch_in_flight = false;
            if let QueryState::Loaded { refreshing, .. } = &mut self.apps {
                *refreshing = false;
            }
        }
        closed
    }

    /// Whether a list request was already issued for `scope`
    pub fn fetched_in(&self, scope: ScopeId) -> bool {
        self.fetched_in == Some(scope)
    }

    /// Mark a list request as issued for `scope`. Cached data stays visible
    /// while it runs.
    pub fn begin_fetch(&mut self, scope: ScopeId) {
        self.fetched_in = Some(scope);
        self.fetch_in_flight = true;
        match &mut self.apps {
            QueryState::Loaded { refreshing, .. } => *refreshing = true,
            other => *other = QueryState::Pending,
        }
    }

    pub fn finish_fetch(&mut self, result: Result<Vec<App>, String>) {
        self.fetch_in_flight = false;
        self.logo_failures.clear();
        self.apps = match result {
            Ok(apps) => QueryState::Loaded {
                apps,
                refreshing: false,
            },
            Err(_) => QueryState::Failed,
        };
        self.clamp_selection();
    }

    /// Drop cached data (signed out or a different user)
    pub fn clear_cache(&mut self) {
        self.apps = QueryState::Pending;
        self.fetched_in = None;
        self.fetch_in_flight = false;
        self.selected = 0;
        self.logo_failures.clear();
    }

    pub fn select_next(&mut self) {
        let len = self.apps.apps().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.apps.apps().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn selected_app(&self) -> Option<&App> {
        self.apps.apps().get(self.selected)
    }

    pub fn find_app(&self, app_id: &str) -> Option<&App> {
        self.apps.apps().iter().find(|app| app.id == app_id)
    }

    pub fn mark_logo_failed(&mut self, app_id: impl Into<String>) {
        self.logo_failures.insert(app_id.into());
    }

    fn clamp_selection(&mut self) {
        let len = self.apps.apps().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
