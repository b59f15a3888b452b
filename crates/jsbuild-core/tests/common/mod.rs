pub mod module_server;
