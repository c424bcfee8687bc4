#![forbid(unsafe_code)]

pub mod config;
pub mod entities;
pub mod errors;
pub mod flash;
pub mod middleware;
pub mod routers;
pub mod state;
pub mod uploads;

pub use state::AppState;

use lazy_static::lazy_static;
use tera::Tera;

lazy_static! {
    pub static ref TEMPLATES: Tera = match Tera::new("templates/*") {
        Ok(template) => template,
        Err(err) => {
            log::error!("Parsing error(s): {}", err);
            ::std::process::exit(1);
        }
    };
}
