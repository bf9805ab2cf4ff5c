//! Per-screen view state.
//!
//! Each screen moves through `Idle -> Loading -> Success | Failure`. Starting
//! a request hands out a [`RequestTicket`]; only the most recent ticket of a
//! live screen may settle it. Anything older, or anything arriving after
//! [`Screen::close`], is dropped. In-flight requests are never aborted, their
//! answers are simply ignored.

use credify_domain::{Claim, VerificationResult};
use credify_sdk::ApiError;
use tracing::debug;

/// What a screen currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// Nothing requested yet
    Idle,
    /// A request is in flight
    Loading,
    /// The latest request succeeded
    Success(T),
    /// The latest request failed, with a user-facing message
    Failure(String),
}

impl<T> ViewState<T> {
    /// Whether the state is `Loading`.
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Whether the state is `Failure`.
    pub fn is_failure(&self) -> bool {
        matches!(self, ViewState::Failure(_))
    }

    /// Whether a request has settled (success or failure).
    pub fn is_settled(&self) -> bool {
        matches!(self, ViewState::Success(_) | ViewState::Failure(_))
    }
}

/// Identifies one request issued by a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

/// State holder shared by all screens.
#[derive(Debug, Clone)]
pub struct Screen<T> {
    state: ViewState<T>,
    issued: u64,
    closed: bool,
}

impl<T> Screen<T> {
    /// A screen waiting for user input.
    pub fn idle() -> Self {
        Self {
            state: ViewState::Idle,
            issued: 0,
            closed: false,
        }
    }

    /// Current state.
    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    /// Enter `Loading` and issue a fresh ticket.
    ///
    /// Earlier tickets become stale.
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        self.state = ViewState::Loading;
        RequestTicket(self.issued)
    }

    /// Whether `ticket` may still settle this screen.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        !self.closed && ticket.0 == self.issued && self.state.is_loading()
    }

    /// `Loading -> Success(payload)`. Returns false when the ticket is stale.
    pub fn resolve(&mut self, ticket: RequestTicket, payload: T) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.state = ViewState::Success(payload);
        true
    }

    /// `Loading -> Failure(message)`. Returns false when the ticket is stale.
    pub fn reject(&mut self, ticket: RequestTicket, message: impl Into<String>) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.state = ViewState::Failure(message.into());
        true
    }

    /// Settle with a service result, using `fallback` for empty error messages.
    pub fn settle(&mut self, ticket: RequestTicket, result: Result<T, ApiError>, fallback: &str) -> bool {
        match result {
            Ok(payload) => self.resolve(ticket, payload),
            Err(e) => self.reject(ticket, failure_message(&e, fallback)),
        }
    }

    /// Fail without a request (local validation).
    pub fn fail(&mut self, message: impl Into<String>) {
        self.issued += 1;
        self.state = ViewState::Failure(message.into());
    }

    /// `Success | Failure -> Idle`. No effect otherwise.
    pub fn reset(&mut self) -> bool {
        if !self.state.is_settled() {
            return false;
        }
        self.state = ViewState::Idle;
        true
    }

    /// Tear the screen down; every later settlement is discarded.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Whether the screen has been torn down.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn accepts(&self, ticket: RequestTicket) -> bool {
        if self.is_current(ticket) {
            return true;
        }
        debug!(
            ticket = ticket.0,
            latest = self.issued,
            closed = self.closed,
            "Discarding stale response"
        );
        false
    }
}

impl<T> Default for Screen<T> {
    fn default() -> Self {
        Self::idle()
    }
}

fn failure_message(error: &ApiError, fallback: &str) -> String {
    if error.message.trim().is_empty() {
        fallback.to_string()
    } else {
        error.message.clone()
    }
}

/// Fallback shown when a verification fails without a message.
pub const VERIFY_FAILED: &str = "An error occurred while verifying the claim";

/// Fallback shown when the history list fails without a message.
pub const HISTORY_FAILED: &str = "Failed to load history";

/// Fallback shown when a history record fails without a message.
pub const DETAIL_FAILED: &str = "Failed to load claim details";

/// Message for a detail request with a blank id.
pub const INVALID_CLAIM_ID: &str = "Invalid claim ID";

/// The claim verification screen. Starts `Idle`.
#[derive(Debug, Clone, Default)]
pub struct VerifyScreen {
    screen: Screen<VerificationResult>,
    input: String,
    submitted: Option<String>,
}

impl VerifyScreen {
    /// A fresh screen with empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &ViewState<VerificationResult> {
        self.screen.state()
    }

    /// Raw input as last typed.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The trimmed claim text of the latest submission.
    pub fn submitted_claim(&self) -> Option<&str> {
        self.submitted.as_deref()
    }

    /// Submit `input` for verification.
    ///
    /// Blank input leaves the state untouched and returns `None`, so no
    /// request is made. Otherwise returns the ticket and the text to send.
    /// Submitting while `Loading` supersedes the in-flight request.
    pub fn submit(&mut self, input: &str) -> Option<(RequestTicket, String)> {
        self.input = input.to_string();
        let claim = input.trim();
        if claim.is_empty() {
            return None;
        }
        self.submitted = Some(claim.to_string());
        Some((self.screen.begin(), claim.to_string()))
    }

    /// Apply the outcome of a submission.
    pub fn settle(&mut self, ticket: RequestTicket, result: Result<VerificationResult, ApiError>) -> bool {
        self.screen.settle(ticket, result, VERIFY_FAILED)
    }

    /// Clear input and result. Only from `Success` or `Failure`.
    pub fn reset(&mut self) -> bool {
        if !self.screen.reset() {
            return false;
        }
        self.input.clear();
        self.submitted = None;
        true
    }

    /// Tear the screen down.
    pub fn close(&mut self) {
        self.screen.close();
    }
}

/// The history list screen. Starts `Loading`.
#[derive(Debug, Clone)]
pub struct HistoryScreen {
    screen: Screen<Vec<Claim>>,
}

impl HistoryScreen {
    /// Mount the screen; the returned ticket belongs to the initial fetch.
    pub fn mount() -> (Self, RequestTicket) {
        let mut screen = Screen::idle();
        let ticket = screen.begin();
        (Self { screen }, ticket)
    }

    /// Current state.
    pub fn state(&self) -> &ViewState<Vec<Claim>> {
        self.screen.state()
    }

    /// Apply the outcome of the fetch.
    pub fn settle(&mut self, ticket: RequestTicket, result: Result<Vec<Claim>, ApiError>) -> bool {
        self.screen.settle(ticket, result, HISTORY_FAILED)
    }

    /// Id of the `position`-th entry (1-based), if it can be opened.
    pub fn select(&self, position: usize) -> Option<String> {
        let ViewState::Success(claims) = self.screen.state() else {
            return None;
        };
        let claim = claims.get(position.checked_sub(1)?)?;
        if claim.is_addressable() {
            claim.id.clone()
        } else {
            None
        }
    }

    /// Tear the screen down.
    pub fn close(&mut self) {
        self.screen.close();
    }
}

/// One history record. `Success(None)` means the service has no such record.
#[derive(Debug, Clone)]
pub struct DetailScreen {
    screen: Screen<Option<Claim>>,
    id: String,
}

impl DetailScreen {
    /// Open the screen for `id`.
    ///
    /// A blank id fails immediately and yields no ticket.
    pub fn open(id: &str) -> (Self, Option<RequestTicket>) {
        let mut detail = Self {
            screen: Screen::idle(),
            id: String::new(),
        };
        let ticket = detail.navigate(id);
        (detail, ticket)
    }

    /// Current state.
    pub fn state(&self) -> &ViewState<Option<Claim>> {
        self.screen.state()
    }

    /// The id this screen is scoped to.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Re-enter `Loading` for another record.
    pub fn navigate(&mut self, id: &str) -> Option<RequestTicket> {
        let id = id.trim();
        self.id = id.to_string();
        if id.is_empty() {
            self.screen.fail(INVALID_CLAIM_ID);
            return None;
        }
        Some(self.screen.begin())
    }

    /// Apply the outcome of the fetch. A 404 becomes "not found", not a failure.
    pub fn settle(&mut self, ticket: RequestTicket, result: Result<Claim, ApiError>) -> bool {
        match result {
            Err(e) if e.is_not_found() => self.screen.resolve(ticket, None),
            other => self.screen.settle(ticket, other.map(Some), DETAIL_FAILED),
        }
    }

    /// Tear the screen down.
    pub fn close(&mut self) {
        self.screen.close();
    }
}
