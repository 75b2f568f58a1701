// HTTP front end for the tournament draw.

pub mod api;
pub mod logging;
