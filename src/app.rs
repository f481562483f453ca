//! Application state management for nestlog.
//!
//! This module contains the core `App` struct that owns the selection state,
//! the toast notification, the in-flight save flag, and the channel draining
//! background task results back into the UI thread.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use reqwest::Url;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::api::WebhookClient;
use crate::cache::{AssetFetcher, AssetStore, HttpTransport};
use crate::config::Config;
use crate::models::{DiaperType, SelectionState, UiState};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// Saves and cache priming produce one message each; 32 leaves headroom.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for the custom amount input.
/// "20.125" is already more precision than any bottle needs.
const MAX_CUSTOM_INPUT_LENGTH: usize = 6;

/// How long a toast stays on screen before dismissing itself.
const TOAST_DURATION: Duration = Duration::from_secs(3);

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Transient notification, success or error styled.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
    shown_at: Instant,
}

impl Toast {
    fn new(message: String, is_error: bool) -> Self {
        Self {
            message,
            is_error,
            shown_at: Instant::now(),
        }
    }

    pub fn expired(&self) -> bool {
        self.shown_at.elapsed() >= TOAST_DURATION
    }
}

/// Offline mirror status shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Disabled,
    Priming,
    Ready { assets: usize },
    Failed,
}

impl CacheStatus {
    pub fn describe(&self) -> String {
        match self {
            CacheStatus::Disabled => "Offline mirror disabled".to_string(),
            CacheStatus::Priming => "Priming offline mirror...".to_string(),
            CacheStatus::Ready { assets } => {
                format!("Offline mirror ready ({} assets)", assets)
            }
            CacheStatus::Failed => "Offline mirror unavailable".to_string(),
        }
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent from background tasks back to the UI thread.
enum AppEvent {
    /// Entry submission finished; the error is already user-displayable.
    SaveFinished(Result<(), String>),
    /// Offline mirror population and activation finished.
    CachePrimed { assets: usize, pruned: usize },
    /// Offline mirror population failed.
    CachePrimeFailed(String),
}

// ============================================================================
// Main Application Struct
// ============================================================================

#[allow(dead_code)]
pub struct App {
    pub config: Config,
    fetcher: Arc<AssetFetcher>,
    webhook: Option<WebhookClient>,

    pub state: AppState,
    pub selection: SelectionState,
    pub custom_input: String,
    pub saving: bool,
    pub toast: Option<Toast>,
    pub cache_status: CacheStatus,

    events_tx: mpsc::Sender<AppEvent>,
    events_rx: mpsc::Receiver<AppEvent>,
}

impl App {
    /// Create a new application instance backed by the real HTTP transport.
    pub fn new(config: Config) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new()?);
        let store = AssetStore::new(Config::cache_dir()?)?;

        let origin = config.asset_origin.as_deref().and_then(|raw| {
            match Url::parse(raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!(origin = raw, error = %e, "Invalid asset origin, offline mirror disabled");
                    None
                }
            }
        });

        let fetcher = Arc::new(AssetFetcher::new(transport, store, origin));
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Assemble the app around an existing fetch boundary.
    pub(crate) fn with_fetcher(config: Config, fetcher: Arc<AssetFetcher>) -> Self {
        let webhook = config.webhook_url.as_deref().and_then(|raw| {
            match Url::parse(raw) {
                Ok(url) => Some(WebhookClient::new(fetcher.clone(), url)),
                Err(e) => {
                    warn!(url = raw, error = %e, "Invalid webhook URL");
                    None
                }
            }
        });

        let (events_tx, events_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            config,
            fetcher,
            webhook,

            state: AppState::Normal,
            selection: SelectionState::new(),
            custom_input: String::new(),
            saving: false,
            toast: None,
            cache_status: CacheStatus::Disabled,

            events_tx,
            events_rx,
        }
    }

    // =========================================================================
    // Offline mirror
    // =========================================================================

    /// Kick off install + activate of the offline asset mirror in the
    /// background. The app stays interactive; the outcome arrives as an
    /// `AppEvent`.
    pub fn start_cache_prime(&mut self) {
        if self.fetcher.origin().is_none() {
            self.cache_status = CacheStatus::Disabled;
            return;
        }

        self.cache_status = CacheStatus::Priming;
        let fetcher = self.fetcher.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match fetcher.install().await {
                Ok(assets) => {
                    let pruned = match fetcher.activate() {
                        Ok(n) => n,
                        Err(e) => {
                            warn!(error = %e, "Failed to prune stale cache generations");
                            0
                        }
                    };
                    AppEvent::CachePrimed { assets, pruned }
                }
                Err(e) => AppEvent::CachePrimeFailed(e.to_string()),
            };
            let _ = tx.send(event).await;
        });
    }

    // =========================================================================
    // Selection operations (called from the input layer)
    // =========================================================================

    pub fn on_amount_picked(&mut self, value: f64) {
        self.selection.select_amount(value);
        self.custom_input.clear();
    }

    pub fn on_custom_toggled(&mut self) {
        self.selection.toggle_custom_input();
        self.custom_input.clear();
    }

    pub fn on_custom_confirmed(&mut self) {
        match self.selection.confirm_custom_amount(&self.custom_input) {
            Ok(_) => self.custom_input.clear(),
            Err(e) => self.show_toast(e.to_string(), true),
        }
    }

    pub fn on_diaper_picked(&mut self, kind: DiaperType) {
        self.selection.select_diaper_type(kind);
    }

    pub fn push_custom_char(&mut self, c: char) {
        if (c.is_ascii_digit() || c == '.') && self.custom_input.len() < MAX_CUSTOM_INPUT_LENGTH {
            self.custom_input.push(c);
        }
    }

    pub fn pop_custom_char(&mut self) {
        self.custom_input.pop();
    }

    pub fn ui_state(&self) -> UiState {
        self.selection.ui_state()
    }

    // =========================================================================
    // Save flow
    // =========================================================================

    /// Submit the current selections. No-op without a selection or while a
    /// save is already in flight; the disabled save control is what
    /// serializes submissions.
    pub fn on_save_pressed(&mut self) {
        if self.saving || !self.selection.ui_state().save_enabled {
            return;
        }

        let Some(client) = self.webhook.clone() else {
            self.show_toast("No webhook configured - set webhook_url in config.json", true);
            return;
        };

        let Some(entry) = self.selection.entry_at(Utc::now()) else {
            return;
        };

        self.saving = true;
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.submit(&entry).await.map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::SaveFinished(result)).await;
        });
    }

    // =========================================================================
    // Toasts and background events
    // =========================================================================

    pub fn show_toast(&mut self, message: impl Into<String>, is_error: bool) {
        self.toast = Some(Toast::new(message.into(), is_error));
    }

    /// Dismiss the toast once it has been on screen long enough.
    pub fn tick(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::expired) {
            self.toast = None;
        }
    }

    /// Drain completed background tasks without blocking.
    pub fn check_background_tasks(&mut self) {
        loop {
            let event = match self.events_rx.try_recv() {
                Ok(event) => event,
                Err(_) => break,
            };
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SaveFinished(Ok(())) => {
                info!("Entry saved");
                self.saving = false;
                self.selection.clear();
                self.custom_input.clear();
                self.show_toast("Saved successfully! ✨", false);
            }
            AppEvent::SaveFinished(Err(message)) => {
                error!(error = %message, "Entry save failed");
                self.saving = false;
                self.show_toast(format!("Failed to save: {message}"), true);
            }
            AppEvent::CachePrimed { assets, pruned } => {
                info!(assets, pruned, "Offline mirror ready");
                self.cache_status = CacheStatus::Ready { assets };
            }
            AppEvent::CachePrimeFailed(message) => {
                warn!(error = %message, "Offline mirror priming failed");
                self.cache_status = CacheStatus::Failed;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
