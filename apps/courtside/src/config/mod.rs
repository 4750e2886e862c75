pub mod db;
pub mod tournament;
