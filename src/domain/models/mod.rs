mod action;
mod backend;
mod endpoint;
mod event;
mod loading;
mod message;
mod role;
mod slash_commands;
mod textarea;

pub use action::*;
pub use backend::*;
pub use endpoint::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use role::*;
pub use slash_commands::*;
pub use textarea::*;
