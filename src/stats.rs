//! Profile statistics shown in the "Open Source Impact" section, plus the
//! loader that binds one remote fetch to a watchable view state.
//!
//! Lifecycle of a load:
//!     Idle -> Loading -> Loaded | Errored
//!
//! Every call to `StatsLoader::load` supersedes the previous one: its request
//! is cancelled and, should its response still arrive, it is discarded because
//! its sequence number is no longer current.

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::github::{GithubClient, ProfileResponse};

/// Added to the public gist count to produce the displayed "contributions"
/// figure. This is a placeholder, not a real contribution count.
pub const CONTRIBUTION_OFFSET: u64 = 124;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProfileStats {
    pub repository_count: u64,
    pub follower_count: u64,
    pub contribution_count: u64,
}

impl From<&ProfileResponse> for ProfileStats {
    fn from(profile: &ProfileResponse) -> Self {
        Self {
            repository_count: profile.public_repos,
            follower_count: profile.followers,
            contribution_count: profile.public_gists.saturating_add(CONTRIBUTION_OFFSET),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Snapshot published to views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsState {
    pub username: Option<String>,
    pub stats: ProfileStats,
    pub phase: FetchPhase,
    /// Time the last successful response was applied.
    pub fetched_at: Option<DateTime<Utc>>,
    request_seq: u64,
}

impl StatsState {
    fn idle() -> Self {
        Self {
            username: None,
            stats: ProfileStats::default(),
            phase: FetchPhase::Idle,
            fetched_at: None,
            request_seq: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }
}

struct InFlight {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owns the request lifecycle for one statistics view.
pub struct StatsLoader {
    client: GithubClient,
    state: watch::Sender<StatsState>,
    next_seq: u64,
    in_flight: Option<InFlight>,
}

impl StatsLoader {
    pub fn new(client: GithubClient) -> Self {
        let (state, _) = watch::channel(StatsState::idle());
        Self {
            client,
            state,
            next_seq: 0,
            in_flight: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<StatsState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> StatsState {
        self.state.borrow().clone()
    }

    /// Start fetching statistics for `username`, superseding any earlier load.
    ///
    /// Must be called from within a tokio runtime.
    pub fn load(&mut self, username: &str) {
        self.abort_in_flight();

        self.next_seq += 1;
        let seq = self.next_seq;
        let username = username.to_string();

        self.state.send_modify(|s| {
            s.username = Some(username.clone());
            s.phase = FetchPhase::Loading;
            s.request_seq = seq;
        });
        debug!(%username, seq, "profile stats load started");

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let client = self.client.clone();
        let state = self.state.clone();

        let handle = tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    debug!(%username, seq, "profile stats load cancelled");
                    return;
                }
                res = client.fetch_profile(&username) => res,
            };

            state.send_if_modified(|s| {
                if s.request_seq != seq {
                    debug!(%username, seq, current = s.request_seq, "discarding stale profile response");
                    return false;
                }
                match &outcome {
                    Ok(profile) => {
                        s.stats = ProfileStats::from(profile);
                        s.fetched_at = Some(Utc::now());
                        s.phase = FetchPhase::Loaded;
                    }
                    Err(e) => {
                        error!(%username, "Failed to fetch GitHub stats: {e:#}");
                        s.phase = FetchPhase::Errored;
                    }
                }
                true
            });
        });

        self.in_flight = Some(InFlight { cancel, handle });
    }

    /// Wait for the current load (if any) to settle and return the resulting state.
    pub async fn settled(&mut self) -> StatsState {
        if let Some(in_flight) = self.in_flight.take() {
            if let Err(e) = in_flight.handle.await {
                error!("profile stats task ended abnormally: {e}");
            }
        }
        self.snapshot()
    }

    /// Cancel the in-flight request, if any. Stats keep their last value and
    /// a pending `Loading` phase falls back to `Idle`.
    pub fn cancel(&mut self) {
        if self.abort_in_flight() {
            let seq = self.next_seq;
            self.state.send_if_modified(|s| {
                if s.request_seq == seq && s.phase == FetchPhase::Loading {
                    s.phase = FetchPhase::Idle;
                    return true;
                }
                false
            });
        }
    }

    fn abort_in_flight(&mut self) -> bool {
        match self.in_flight.take() {
            Some(in_flight) => {
                in_flight.cancel.cancel();
                true
            }
            None => false,
        }
    }
}

impl Drop for StatsLoader {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contributions_are_gists_plus_offset() {
        let profile = ProfileResponse {
            public_repos: 42,
            followers: 7,
            public_gists: 3,
        };
        assert_eq!(
            ProfileStats::from(&profile),
            ProfileStats {
                repository_count: 42,
                follower_count: 7,
                contribution_count: 127,
            }
        );
    }

    #[test]
    fn fresh_state_is_idle_and_zeroed() {
        let state = StatsState::idle();
        assert_eq!(state.phase, FetchPhase::Idle);
        assert!(!state.is_loading());
        assert_eq!(state.stats, ProfileStats::default());
    }
}
