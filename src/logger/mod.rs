pub mod progress_spinner;
pub mod report_printer;
