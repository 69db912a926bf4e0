use crate::config::Cluster;

const EXPLORER_BASE: &str = "https://explorer.solana.com";

/// What an explorer link points at
#[derive(Debug, Clone, Copy)]
pub enum ExplorerTarget<'a> {
    Address(&'a str),
    Tx(&'a str),
}

pub fn explorer_url(target: ExplorerTarget<'_>, cluster: Cluster) -> String {
    let (kind, id) = match target {
        ExplorerTarget::Address(id) => ("address", id),
        ExplorerTarget::Tx(id) => ("tx", id),
    };
    match cluster_query(cluster) {
        Some(query) => format!("{}/{}/{}?{}", EXPLORER_BASE, kind, id, query),
        None => format!("{}/{}/{}", EXPLORER_BASE, kind, id),
    }
}

fn cluster_query(cluster: Cluster) -> Option<&'static str> {
    match cluster {
        Cluster::Devnet => Some("cluster=devnet"),
        Cluster::Testnet => Some("cluster=testnet"),
        Cluster::Localnet => Some("cluster=custom&customUrl=http%3A%2F%2Flocalhost%3A8899"),
        Cluster::MainnetBeta => None,
    }
}

pub fn print_separator(label: &str) {
    tracing::info!("==== {} ====", label);
}
