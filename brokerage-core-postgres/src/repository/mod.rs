pub mod db_init;
pub mod record;
pub mod tracking;
