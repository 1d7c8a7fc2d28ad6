#![cfg_attr(windows, windows_subsystem = "windows")]
#![cfg_attr(not(windows), allow(dead_code))]

pub mod app;
pub mod compositor;
pub mod control;
pub mod error;
pub mod events;
pub mod layout;
pub mod logger;
pub mod options;
pub mod scan;
pub mod stats;
pub mod sync;
#[cfg(windows)]
pub mod platform;

use app::App;
use options::Options;

fn main() {
    let opts = Options::parse();
    let app = App::new(&opts);
    let code = match app.proceed() {
        Ok(code) => code,
        Err(e) => {
            app.report(&e);
            e.code() as i32
        }
    };
    std::process::exit(code);
}
