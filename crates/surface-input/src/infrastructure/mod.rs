//! Infrastructure layer for the surface input component.
//!
//! Contains the collaborator seams and their in-process adapters: device event
//! sources, the publish/subscribe bus, configuration storage, and the decoder
//! for the probe binary's line protocol.
//!
//! **Dependency rule**: the `application` layer may use the traits declared
//! here (`DeviceEventSource`, `EventBus`) but never a concrete adapter.

pub mod event_bus;
pub mod event_source;
pub mod probe;
pub mod storage;
