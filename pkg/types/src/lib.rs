pub mod config;
pub mod credential;
pub mod exec_credential;
pub mod kubeconfig;
pub mod record;
pub mod slug;
pub mod validate;
