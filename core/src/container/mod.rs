pub mod pbi;
