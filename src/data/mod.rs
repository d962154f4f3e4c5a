pub mod channels;
pub mod export;
pub mod log_parser;
pub mod series_view;
pub mod x_formatter;
