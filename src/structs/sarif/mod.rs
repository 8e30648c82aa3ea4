pub mod sarif_log;
