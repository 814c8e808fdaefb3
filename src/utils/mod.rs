pub mod code_cache;
pub mod code_filter;
pub mod db_utils;
