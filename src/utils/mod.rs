pub mod country_flags;
