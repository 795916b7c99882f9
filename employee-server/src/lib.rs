//! Employee Server - employee records over HTTP
//!
//! # Architecture
//!
//! - **HTTP API** (`api`): REST endpoints under `/api/employees` plus `/health`
//! - **Services** (`services`): CRUD rules and query pass-through
//! - **Database** (`db`): SQLite pool, migrations, repository and bootstrap seed
//! - **Middleware** (`middleware`): request logging, error body enrichment
//!
//! # Module layout
//!
//! ```text
//! employee-server/src/
//! ├── core/          # config, state, server, errors
//! ├── api/           # routes, handlers, extractors
//! ├── services/      # employee service
//! ├── db/            # pool, repository, seed
//! ├── middleware/    # logging, error path
//! └── utils/         # logger, result alias
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod services;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};
pub use utils::{ErrorCategory, ErrorCode};
pub use utils::logger::init_logger_with_file;

