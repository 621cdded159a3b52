// ABOUTME: Debounced company search state
// Keystrokes replace a pending delayed lookup; the lookup fires only after
// the input has been quiet for the configured period

use std::time::{Duration, Instant};

use crate::api::CompanySearchResult;

/// Minimum query length before a lookup is issued.
pub const MIN_QUERY_LEN: usize = 2;

/// Default quiet period before a lookup fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A cancellable delayed task: at most one pending value, replaced on
/// every submit. The owner polls it from the tick loop.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `value`, replacing (cancelling) any pending one.
    pub fn submit(&mut self, value: String, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a value is waiting for its deadline.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self
            .pending
            .as_ref()
            .is_some_and(|(_, deadline)| *deadline <= now)
        {
            return self.pending.take().map(|(value, _)| value);
        }
        None
    }
}

/// State of the dashboard's company search box.
#[derive(Debug)]
pub struct CompanySearchState {
    /// Current input text.
    pub input: String,
    /// Results of the last completed lookup.
    pub results: Vec<CompanySearchResult>,
    /// Selected row in the results panel.
    pub selected: usize,
    /// Whether the results panel is visible.
    pub open: bool,
    /// Whether a lookup is in flight. In-flight lookups are not aborted
    /// when superseded; their results are simply replaced on arrival.
    pub searching: bool,
    debouncer: Debouncer,
}

impl CompanySearchState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            input: String::new(),
            results: Vec::new(),
            selected: 0,
            open: false,
            searching: false,
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Append a character and reschedule the lookup.
    pub fn input_char(&mut self, c: char, now: Instant) {
        self.input.push(c);
        self.schedule(now);
    }

    /// Delete the last character and reschedule the lookup.
    pub fn backspace(&mut self, now: Instant) {
        self.input.pop();
        self.schedule(now);
    }

    fn schedule(&mut self, now: Instant) {
        if self.input.trim().len() >= MIN_QUERY_LEN {
            self.debouncer.submit(self.input.trim().to_string(), now);
        } else {
            // Short queries hide the panel and cancel the pending lookup
            self.debouncer.cancel();
            self.open = false;
            self.results.clear();
        }
    }

    /// Term ready to query, once the quiet period has elapsed.
    pub fn poll_query(&mut self, now: Instant) -> Option<String> {
        self.debouncer.poll(now)
    }

    /// Store lookup results and open the panel.
    pub fn set_results(&mut self, results: Vec<CompanySearchResult>) {
        self.searching = false;
        self.results = results;
        self.selected = 0;
        self.open = true;
    }

    /// Move the selection down.
    pub fn select_next(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1) % self.results.len();
        }
    }

    /// Move the selection up.
    pub fn select_previous(&mut self) {
        if !self.results.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.results.len() - 1);
        }
    }

    /// The highlighted result, if any.
    pub fn selected_result(&self) -> Option<&CompanySearchResult> {
        self.results.get(self.selected)
    }

    /// Hide the panel and clear the input.
    pub fn close(&mut self) {
        self.open = false;
        self.results.clear();
        self.input.clear();
        self.debouncer.cancel();
    }
}

impl Default for CompanySearchState {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rapid_typing_issues_one_lookup_for_final_value() {
        let mut search = CompanySearchState::new(Duration::from_millis(300));
        let start = Instant::now();

        search.input_char('a', start);
        search.input_char('n', start + Duration::from_millis(100));
        search.input_char('d', start + Duration::from_millis(200));

        // Nothing fires before the quiet period of the LAST keystroke
        assert_eq!(search.poll_query(start + Duration::from_millis(450)), None);

        // One lookup, for the final value
        assert_eq!(
            search.poll_query(start + Duration::from_millis(500)),
            Some("and".to_string())
        );
        assert_eq!(search.poll_query(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn test_short_queries_never_fire() {
        let mut search = CompanySearchState::new(Duration::from_millis(300));
        let start = Instant::now();
        search.input_char('a', start);
        assert_eq!(search.poll_query(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_backspace_below_minimum_cancels_pending_lookup() {
        let mut search = CompanySearchState::new(Duration::from_millis(300));
        let start = Instant::now();
        search.input_char('a', start);
        search.input_char('n', start);
        search.backspace(start + Duration::from_millis(100));
        assert_eq!(search.poll_query(start + Duration::from_secs(1)), None);
        assert!(!search.open);
    }

    #[test]
    fn test_result_selection_wraps() {
        let mut search = CompanySearchState::default();
        search.set_results(vec![
            CompanySearchResult {
                id: 1,
                nombre: "Andina".into(),
                razon_social: None,
                nit: "900100200".into(),
                estado_cuenta: "Activa".into(),
            },
            CompanySearchResult {
                id: 2,
                nombre: "Del Café".into(),
                razon_social: None,
                nit: "900300400".into(),
                estado_cuenta: "Morosa".into(),
            },
        ]);
        assert_eq!(search.selected_result().unwrap().id, 1);
        search.select_next();
        assert_eq!(search.selected_result().unwrap().id, 2);
        search.select_next();
        assert_eq!(search.selected_result().unwrap().id, 1);
        search.select_previous();
        assert_eq!(search.selected_result().unwrap().id, 2);
    }
}
