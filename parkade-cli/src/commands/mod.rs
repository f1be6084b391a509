//! CLI command implementations.

mod allocate;
mod block;
mod cancel;
mod confirm;
mod init;
mod list;
mod validate;
mod weather;

pub use allocate::AllocateCommand;
pub use block::{BlockCommand, UnblockCommand};
pub use cancel::CancelCommand;
pub use confirm::ConfirmCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use validate::ValidateCommand;
pub use weather::WeatherCommand;
