//! surface-input library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the probe binary in `main.rs` share the same module tree.

pub mod application;
pub mod infrastructure;

pub use application::click_synthesis::ClickSynthesizer;
pub use application::surface_input::{AttachError, SurfaceInput, SurfaceInputOptions};
pub use infrastructure::event_bus::{local::LocalEventBus, EventBus, EventHandler, SubscriptionId};
pub use infrastructure::event_source::{
    local::LocalEventSource, DeviceEventSource, ListenerHandle, RawEventHandler, SourceError,
};
