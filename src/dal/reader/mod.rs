pub mod secrets_reader;
