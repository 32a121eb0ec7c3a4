pub mod exchange_rate_api;
pub mod rest_countries;
pub mod util;
