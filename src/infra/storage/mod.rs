pub mod http_storage_service;
