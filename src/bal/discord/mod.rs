pub mod command_registrar;
