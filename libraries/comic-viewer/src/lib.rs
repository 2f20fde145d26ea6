//! Comic Viewer - Session State Machine
//!
//! Platform-agnostic viewer state for stepping through comic collections.
//!
//! This crate provides:
//! - Collection selection (resets page and autoplay)
//! - Manual navigation with a single wrap-or-clamp policy
//! - Timer-driven autoplay that always wraps
//! - Background music with acknowledged start and stale-completion guards
//! - A derived `CurrentView` recomputed after every transition
//!
//! # Architecture
//!
//! `comic-viewer` does not render anything and owns no audio device:
//! - The catalog comes from `comic-catalog` as an `Arc<Catalog>`
//! - Playback is injected through the [`MusicPlayer`] trait
//! - Background completions arrive as [`SessionSignal`]s on a channel the
//!   owner drains
//!
//! # Example
//!
//! ```rust
//! use comic_catalog::{AssetPaths, Catalog};
//! use comic_viewer::{SilentPlayer, ViewerConfig, ViewerSession};
//! use std::sync::Arc;
//!
//! let json = r#"{ "demo": { "name": "Demo", "pages": 3, "captions": { "1": "middle" } } }"#;
//! let catalog = Arc::new(Catalog::from_json(json, AssetPaths::default()).unwrap());
//!
//! let (mut session, _signals) =
//!     ViewerSession::new(catalog, ViewerConfig::default(), Arc::new(SilentPlayer::new()))?;
//!
//! session.next_page();
//! let view = session.current_view().unwrap();
//! assert_eq!(view.image.as_deref(), Some("/images/demo/01.jpg"));
//! assert_eq!(view.caption, "middle");
//! assert_eq!(view.page_counter(), (2, 3));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example: Driving the session
//!
//! ```rust,no_run
//! # use comic_catalog::Catalog;
//! # use comic_viewer::{SilentPlayer, ViewerConfig, ViewerSession};
//! # use std::sync::Arc;
//! # async fn run(catalog: Arc<Catalog>) -> comic_viewer::Result<()> {
//! let (mut session, mut signals) =
//!     ViewerSession::new(catalog, ViewerConfig::default(), Arc::new(SilentPlayer::new()))?;
//!
//! session.toggle_autoplay();
//! while let Some(signal) = signals.recv().await {
//!     session.handle_signal(signal);
//!     for event in session.drain_events() {
//!         println!("{:?}", event);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod autoplay;
mod error;
mod events;
pub mod navigation;
mod player;
mod session;
pub mod types;

// Public exports
pub use autoplay::{AutoplayHandle, AutoplayTick};
pub use error::{PlayerError, Result, ViewerError};
pub use events::{SessionSignal, ViewerEvent};
pub use player::{MusicPlayer, SilentPlayer};
pub use session::ViewerSession;
pub use types::{CurrentView, NavigationPolicy, ViewerConfig};
