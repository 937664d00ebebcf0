pub mod logging;
pub mod title_case;
