pub mod api;
pub mod config;
pub mod data_models;
pub mod forms;
pub mod labels;
pub mod openapi_catalog;
pub mod pagination;
pub mod routes;
pub mod search_page;
pub mod search_service;
pub mod url_state;
