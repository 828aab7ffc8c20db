mod caching;
mod common;
mod configuration;
mod exact_probability;
