//! Viewer session - core state machine
//!
//! Tracks the selected collection, current page, autoplay and music, and
//! derives the current view from them. All mutation happens through `&mut
//! self` on the owner's task. Background work (autoplay timer, pending
//! `play()` calls) reports back as [`SessionSignal`]s that the owner feeds to
//! [`ViewerSession::handle_signal`].

use crate::{
    autoplay::{AutoplayHandle, AutoplayTick},
    error::Result,
    events::{SessionSignal, ViewerEvent},
    navigation::{clamp_index, step_back, step_forward},
    player::MusicPlayer,
    types::{CurrentView, NavigationPolicy, ViewerConfig},
};
use comic_catalog::{Catalog, CollectionDescriptor};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Back,
}

/// Interactive viewer state
///
/// Owns:
/// - The current catalog (replaced wholesale on reload)
/// - Selection and page position
/// - The autoplay timer handle
/// - Music intent vs. acknowledged playback
pub struct ViewerSession {
    catalog: Arc<Catalog>,
    config: ViewerConfig,

    // Position
    selected: Option<String>,
    page_index: usize,

    // Autoplay
    autoplay: Option<AutoplayHandle>,
    timer_generation: u64,

    // Music
    player: Arc<dyn MusicPlayer>,
    current_track: Option<String>,
    music_wanted: bool,
    music_on: bool,
    music_request: u64,

    // Signals from background tasks
    signals: UnboundedSender<SessionSignal>,

    // Event queue for UI synchronization
    pending_events: Vec<ViewerEvent>,
}

impl ViewerSession {
    /// Create a session over `catalog`.
    ///
    /// The first collection in manifest order is selected. The returned
    /// receiver yields every [`SessionSignal`]; the owner passes each one to
    /// [`handle_signal`](Self::handle_signal).
    ///
    /// Fails with [`ViewerError::InvalidConfig`](crate::ViewerError::InvalidConfig) if `config` does not pass
    /// [`ViewerConfig::validate`].
    pub fn new(
        catalog: Arc<Catalog>,
        config: ViewerConfig,
        player: Arc<dyn MusicPlayer>,
    ) -> Result<(Self, UnboundedReceiver<SessionSignal>)> {
        config.validate()?;

        let (signals, receiver) = mpsc::unbounded_channel();

        let mut session = Self {
            catalog,
            config,
            selected: None,
            page_index: 0,
            autoplay: None,
            timer_generation: 0,
            player,
            current_track: None,
            music_wanted: false,
            music_on: false,
            music_request: 0,
            signals,
            pending_events: Vec::new(),
        };

        let first = session.catalog.first_id().map(str::to_string);
        session.switch_to(first);

        Ok((session, receiver))
    }

    // ===== Collection selection =====

    /// Select a collection by id.
    ///
    /// Resets to the first page and stops autoplay and music. Unknown ids are
    /// ignored and return `false`.
    pub fn select_collection(&mut self, id: &str) -> bool {
        if !self.catalog.contains(id) {
            debug!(collection = %id, "Ignoring selection of unknown collection");
            return false;
        }

        self.switch_to(Some(id.to_string()));
        true
    }

    /// Swap in a freshly loaded catalog.
    ///
    /// The current selection survives if the new catalog still has it (the
    /// page index is re-clamped); otherwise the first collection is selected.
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) {
        self.catalog = catalog;
        info!(collections = self.catalog.len(), "Catalog replaced");
        self.pending_events.push(ViewerEvent::CatalogReplaced {
            collections: self.catalog.len(),
        });

        let kept = self
            .selected
            .clone()
            .filter(|id| self.catalog.contains(id));

        match kept {
            Some(id) => {
                let page_count = self.page_count();
                self.page_index = clamp_index(self.page_index, page_count);

                if page_count == 0 {
                    self.stop_autoplay();
                }

                let track = self.catalog.music_url(&id);
                if track != self.current_track {
                    self.stop_music();
                    self.player.load(track.as_deref());
                    self.current_track = track;
                }

                self.push_view();
            }
            None => {
                let first = self.catalog.first_id().map(str::to_string);
                self.switch_to(first);
            }
        }
    }

    fn switch_to(&mut self, id: Option<String>) {
        self.stop_autoplay();
        self.stop_music();

        self.selected = id;
        self.page_index = 0;

        let track = self
            .selected
            .as_deref()
            .and_then(|id| self.catalog.music_url(id));
        self.player.load(track.as_deref());
        self.current_track = track;

        debug!(collection = ?self.selected, "Collection selected");
        self.pending_events.push(ViewerEvent::CollectionChanged {
            collection_id: self.selected.clone(),
        });
        self.push_view();
    }

    // ===== Navigation =====

    /// Move one page forward using the configured policy.
    ///
    /// Returns whether the page changed.
    pub fn next_page(&mut self) -> bool {
        self.step(Direction::Forward, self.config.navigation)
    }

    /// Move one page back using the configured policy.
    pub fn previous_page(&mut self) -> bool {
        self.step(Direction::Back, self.config.navigation)
    }

    fn step(&mut self, direction: Direction, policy: NavigationPolicy) -> bool {
        let page_count = self.page_count();
        if page_count == 0 {
            return false;
        }

        let next = match direction {
            Direction::Forward => step_forward(self.page_index, page_count, policy),
            Direction::Back => step_back(self.page_index, page_count, policy),
        };

        if next == self.page_index {
            return false;
        }

        self.page_index = next;
        self.push_view();
        true
    }

    // ===== Autoplay =====

    /// Turn autoplay on or off. Returns the new state.
    ///
    /// Turning it on needs a collection with pages and a running tokio
    /// runtime; otherwise the request is ignored.
    pub fn toggle_autoplay(&mut self) -> bool {
        if self.autoplay.is_some() {
            self.stop_autoplay();
            if self.config.music_follows_autoplay {
                self.stop_music();
            }
            self.push_view();
            return false;
        }

        let Some(collection_id) = self.selected.clone() else {
            return false;
        };
        if self.page_count() == 0 {
            debug!(collection = %collection_id, "Autoplay needs at least one page");
            return false;
        }
        let Ok(runtime) = Handle::try_current() else {
            warn!("Autoplay requested outside a tokio runtime");
            return false;
        };

        self.timer_generation += 1;
        let tick = AutoplayTick {
            generation: self.timer_generation,
            collection_id,
        };
        self.autoplay = Some(AutoplayHandle::start(
            &runtime,
            self.config.autoplay_interval(),
            tick,
            self.signals.clone(),
        ));

        debug!(generation = self.timer_generation, "Autoplay started");
        self.pending_events
            .push(ViewerEvent::AutoplayChanged { enabled: true });

        if self.config.music_follows_autoplay && !self.music_wanted {
            self.request_music();
        }

        self.push_view();
        true
    }

    fn stop_autoplay(&mut self) {
        if let Some(handle) = self.autoplay.take() {
            debug!(generation = handle.generation(), "Autoplay stopped");
            handle.cancel();
            self.pending_events
                .push(ViewerEvent::AutoplayChanged { enabled: false });
        }
    }

    fn on_tick(&mut self, tick: AutoplayTick) {
        let live = self.autoplay.is_some()
            && tick.generation == self.timer_generation
            && self.selected.as_deref() == Some(tick.collection_id.as_str());

        if !live {
            debug!(
                generation = tick.generation,
                collection = %tick.collection_id,
                "Ignoring stale autoplay tick"
            );
            return;
        }

        // Autoplay never stalls on the last page
        self.step(Direction::Forward, NavigationPolicy::Wrap);
    }

    // ===== Music =====

    /// Pause music if it is playing (or about to), otherwise start it.
    ///
    /// Returns the new intent. `is_music_on` only turns `true` once the
    /// player acknowledges the start.
    pub fn toggle_music(&mut self) -> bool {
        if self.music_wanted || self.player.is_playing() {
            self.stop_music();
            self.push_view();
            false
        } else {
            self.request_music()
        }
    }

    fn request_music(&mut self) -> bool {
        if self.current_track.is_none() {
            debug!(collection = ?self.selected, "Collection has no music");
            return false;
        }
        let Ok(runtime) = Handle::try_current() else {
            warn!("Music requested outside a tokio runtime");
            return false;
        };

        self.music_wanted = true;
        self.music_request += 1;

        let request = self.music_request;
        let player = Arc::clone(&self.player);
        let signals = self.signals.clone();
        debug!(request, track = ?self.current_track, "Requesting playback");

        runtime.spawn(async move {
            let signal = match player.play().await {
                Ok(()) => SessionSignal::PlaybackStarted { request },
                Err(e) => SessionSignal::PlaybackFailed {
                    request,
                    reason: e.to_string(),
                },
            };
            // A closed channel means the session was dropped
            let _ = signals.send(signal);
        });

        true
    }

    /// Pause and invalidate any pending start
    fn stop_music(&mut self) {
        self.music_wanted = false;
        self.music_request += 1;
        self.player.pause();
        self.set_music_on(false);
    }

    fn set_music_on(&mut self, on: bool) {
        if self.music_on != on {
            self.music_on = on;
            self.pending_events
                .push(ViewerEvent::MusicChanged { playing: on });
        }
    }

    fn on_playback_started(&mut self, request: u64) {
        if request == self.music_request && self.music_wanted {
            info!(track = ?self.current_track, "Music playing");
            self.set_music_on(true);
            self.push_view();
            return;
        }

        debug!(request, current = self.music_request, "Ignoring stale playback start");
        if !self.music_wanted {
            // The start raced a pause; silence it again
            self.player.pause();
        }
    }

    fn on_playback_failed(&mut self, request: u64, reason: String) {
        if request != self.music_request {
            debug!(request, reason = %reason, "Ignoring stale playback failure");
            return;
        }

        warn!(track = ?self.current_track, reason = %reason, "Music playback rejected");
        self.music_wanted = false;
        self.set_music_on(false);
        self.pending_events
            .push(ViewerEvent::MusicFailed { message: reason });
        self.push_view();
    }

    // ===== Signals =====

    /// Apply the completion of background work.
    pub fn handle_signal(&mut self, signal: SessionSignal) {
        match signal {
            SessionSignal::Tick(tick) => self.on_tick(tick),
            SessionSignal::PlaybackStarted { request } => self.on_playback_started(request),
            SessionSignal::PlaybackFailed { request, reason } => {
                self.on_playback_failed(request, reason)
            }
        }
    }

    /// Stop the timer and the music. The session stays usable.
    pub fn shutdown(&mut self) {
        self.stop_autoplay();
        self.stop_music();
    }

    // ===== Derived view =====

    fn descriptor(&self) -> Option<&CollectionDescriptor> {
        self.catalog.get(self.selected.as_deref()?)
    }

    fn page_count(&self) -> usize {
        self.descriptor().map_or(0, CollectionDescriptor::page_count)
    }

    /// What the presentation layer should show; `None` while loading/empty.
    pub fn current_view(&self) -> Option<CurrentView> {
        let descriptor = self.descriptor()?;
        let index = self.page_index;
        let page_count = descriptor.page_count();

        Some(CurrentView {
            collection_id: descriptor.id().to_string(),
            title: descriptor.display_name().to_string(),
            creator: descriptor.creator().map(str::to_string),
            image: descriptor.page(index).map(str::to_string),
            caption: descriptor
                .caption(index)
                .map(str::to_string)
                .unwrap_or_else(|| self.config.fallback_caption(index)),
            page: if page_count == 0 { 0 } else { index + 1 },
            page_count,
            autoplay: self.autoplay.is_some(),
            music_on: self.music_on,
        })
    }

    fn push_view(&mut self) {
        let view = self.current_view();
        self.pending_events.push(ViewerEvent::ViewChanged { view });
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Accessors =====

    /// Collections as `(id, display name)` in manifest order, for a selector
    pub fn collections(&self) -> Vec<(String, String)> {
        self.catalog
            .iter()
            .map(|c| (c.id().to_string(), c.display_name().to_string()))
            .collect()
    }

    pub fn get_selected_collection(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn get_page_index(&self) -> usize {
        self.page_index
    }

    pub fn is_autoplay(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Whether music is acknowledged as playing
    pub fn is_music_on(&self) -> bool {
        self.music_on
    }

    /// Resolved URL of the current collection's music track
    pub fn get_current_track(&self) -> Option<&str> {
        self.current_track.as_deref()
    }

    pub fn get_catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn get_config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Whether the session is waiting for a catalog with collections
    pub fn is_loading(&self) -> bool {
        self.selected.is_none()
    }
}

impl std::fmt::Debug for ViewerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewerSession")
            .field("selected", &self.selected)
            .field("page_index", &self.page_index)
            .field("autoplay", &self.autoplay.is_some())
            .field("music_on", &self.music_on)
            .field("music_wanted", &self.music_wanted)
            .finish_non_exhaustive()
    }
}
