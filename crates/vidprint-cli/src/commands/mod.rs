//! CLI subcommand implementations.

pub mod index;
pub mod matching;
pub mod shots;
pub mod show;

pub use index::CmdIndex;
pub use matching::CmdMatch;
pub use shots::CmdShots;
pub use show::CmdShow;
