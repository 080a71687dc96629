//! Bot Logic
//!
//! Platform-neutral event classification, fixed reply texts, and the
//! dispatcher that ties the conversation store, completion client, and
//! payment check together.

mod dispatcher;
pub mod event;
pub mod messages;

pub use dispatcher::Dispatcher;
pub use event::{Command, EventKind, InboundEvent};
