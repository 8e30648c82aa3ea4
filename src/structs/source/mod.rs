pub mod source_location;
pub mod source_token;
pub mod scan_report;
