use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// How long the "message sent" indicator stays up.
pub const SUCCESS_NOTICE_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoticeState {
    pub visible: bool,
    pub shown_at: Option<DateTime<Utc>>,
    /// Bumped on every `show`; a timer only hides the showing it was started for.
    showing: u64,
}

/// Transient success indicator that hides itself after a fixed window.
///
/// The hide timer belongs to this value: dropping it (or calling `dismiss`)
/// cancels the timer, so nothing fires after the owning view is gone.
pub struct SuccessNotice {
    state: watch::Sender<NoticeState>,
    duration: Duration,
    timer: Option<CancellationToken>,
}

impl Default for SuccessNotice {
    fn default() -> Self {
        Self::new(SUCCESS_NOTICE_DURATION)
    }
}

impl SuccessNotice {
    pub fn new(duration: Duration) -> Self {
        let (state, _) = watch::channel(NoticeState::default());
        Self {
            state,
            duration,
            timer: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<NoticeState> {
        self.state.subscribe()
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    pub fn shown_at(&self) -> Option<DateTime<Utc>> {
        self.state.borrow().shown_at
    }

    /// Show the notice and (re)start its hide timer. Needs a tokio runtime.
    pub fn show(&mut self) {
        self.cancel_timer();

        let mut showing = 0;
        self.state.send_modify(|s| {
            s.showing += 1;
            s.visible = true;
            s.shown_at = Some(Utc::now());
            showing = s.showing;
        });

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let state = self.state.clone();
        let duration = self.duration;

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(duration) => {
                    state.send_if_modified(|s| {
                        if s.showing != showing || !s.visible {
                            return false;
                        }
                        debug!("success notice expired");
                        s.visible = false;
                        true
                    });
                }
            }
        });

        self.timer = Some(token);
    }

    /// Hide immediately and cancel the pending timer.
    pub fn dismiss(&mut self) {
        self.cancel_timer();
        self.state.send_if_modified(|s| {
            let was_visible = s.visible;
            s.visible = false;
            was_visible
        });
    }

    fn cancel_timer(&mut self) {
        if let Some(token) = self.timer.take() {
            token.cancel();
        }
    }
}

impl Drop for SuccessNotice {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn hides_after_window() {
        let mut notice = SuccessNotice::default();
        notice.show();
        assert!(notice.is_visible());
        assert!(notice.shown_at().is_some());

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert!(notice.is_visible());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!notice.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn showing_again_restarts_window() {
        let mut notice = SuccessNotice::default();
        notice.show();
        tokio::time::sleep(Duration::from_secs(3)).await;
        notice.show();

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(notice.is_visible());

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(!notice.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_cancels_timer() {
        let notice = {
            let mut notice = SuccessNotice::default();
            notice.show();
            notice.subscribe()
        };
        // The sender is gone with the notice; the timer must not outlive it.
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(notice.borrow().visible);
        assert!(notice.has_changed().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn reshow_at_expiry_keeps_new_window() {
        for _ in 0..50 {
            let mut notice = SuccessNotice::default();
            notice.show();
            tokio::time::sleep(SUCCESS_NOTICE_DURATION).await;
            notice.show();
            for _ in 0..5 {
                tokio::task::yield_now().await;
            }
            assert!(notice.is_visible());

            tokio::time::sleep(SUCCESS_NOTICE_DURATION + Duration::from_millis(1)).await;
            assert!(!notice.is_visible());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_hides_immediately() {
        let mut notice = SuccessNotice::default();
        notice.show();
        notice.dismiss();
        assert!(!notice.is_visible());
    }
}
