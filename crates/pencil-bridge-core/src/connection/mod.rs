//! Connection lifecycle for the Pencil MCP server
//!
//! `ConnectionManager` owns the server session and its status. The
//! transport is behind the `ServerLauncher` / `ServerSession` traits:
//! `RmcpLauncher` in production, `MockLauncher` in tests.

mod session;
mod manager;
mod mock;

pub use session::{ServerLauncher, ServerSession, CloseHandler};
pub use manager::{ConnectionManager, ConnectResult, StatusObserver, CONNECTION_LOST};
pub use mock::{MockLauncher, MockSession};
