pub mod assume;
pub mod completions;
pub mod configure;
pub mod whoami;

pub use assume::AssumeCommand;
pub use completions::CompletionsCommand;
pub use configure::ConfigureCommand;
pub use whoami::WhoamiCommand;
