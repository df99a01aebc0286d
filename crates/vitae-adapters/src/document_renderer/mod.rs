//! Document renderer adapters.

mod chromium;
mod memory;
mod print;

pub use chromium::ChromiumRenderer;
pub use memory::InMemoryRenderer;
pub use print::{PrintSetup, Stamp, stamp_id};
