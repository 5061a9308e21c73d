pub mod overlay_server;
