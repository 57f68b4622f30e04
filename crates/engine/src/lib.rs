//! SheetSmith Engine library.
//!
//! Runtime side of the character sheet editor: a form session that owns the
//! values document of one open sheet, plus environment configuration.
//!
//! ## Structure
//!
//! - `use_cases/` - Form session orchestration over the domain algorithms
//! - `config` - Environment-driven settings

pub mod config;
pub mod use_cases;

pub use config::{load_dotenv_from, EngineConfig};
pub use use_cases::form_session::{FormSession, SessionError};
