mod common;
mod dns;
mod lead;
mod report;

pub use common::*;
pub use dns::*;
pub use lead::*;
pub use report::*;
