//! Synchronization of 1Password cluster credentials into kubeconfig, and the
//! exec credential responder kubectl calls back into.

pub mod command;
pub mod kubeconfig;
pub mod responder;
pub mod store;
pub mod synchronizer;

#[cfg(test)]
pub(crate) mod testing;

pub use kubeconfig::{KubeConfigWriter, Kubectl};
pub use store::{OpCli, SecretStore};
pub use synchronizer::{ConfigSynchronizer, SyncReport};
