pub mod movie_service;
pub mod movie_store;
pub mod review_client;
