//! Prints the CRD manifests as YAML.
//!
//! Usage: `cargo run -p crds --bin crdgen > config/crd/elasticache.yaml`

use crds::ElastiCache;
use kube::CustomResourceExt;

fn main() -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(&ElastiCache::crd())?);
    Ok(())
}
