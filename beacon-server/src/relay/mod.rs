mod command;
mod relay;
mod router;

pub use command::RelayCommand;
pub use relay::Relay;
pub use router::route;
