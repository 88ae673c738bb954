//! Runtime configuration.
//!
//! Layers, lowest priority first: built-in defaults, `config/default.toml`,
//! `config/{RUN_ENV}.toml`, `APP__SECTION__KEY` variables, then the plain
//! `SERVER_HOST`, `SERVER_PORT`, `DATABASE_URL` and `JWT_SECRET` variables.
//! A `.env` file is read first when present.
//!
//! ```rust,ignore
//! let settings = chat_manager::config::Settings::load()?;
//! let addr = settings.server.socket_addr()?;
//! ```

mod settings;

pub use settings::*;
