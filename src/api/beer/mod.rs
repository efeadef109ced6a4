pub mod beer_api;
