pub(crate) mod date;
pub(crate) mod debug;

pub(crate) use date::today_string;
pub(crate) use debug::{debug_enabled, set_debug};
