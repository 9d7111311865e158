//! Namenode failover on startup.

use hg_error::{HgError, Result};
use hg_traits::DirectoryLister;
use tracing::{info, warn};

use super::client::{WebHdfsConfig, WebHdfsLister};

/// Path listed to check that a namenode is serving requests.
pub const PROBE_PATH: &str = "/";

/// Picks the first responsive namenode from an ordered candidate list.
///
/// Each candidate is probed once with a listing of [`PROBE_PATH`]; there is
/// no second pass. A standby namenode typically rejects the probe with a
/// `StandbyException` and is skipped.
pub struct NamenodeSelector;

impl NamenodeSelector {
    /// Connect to the first responsive WebHDFS namenode among `hosts`.
    ///
    /// # Errors
    ///
    /// Returns [`HgError::NoNamenodeAvailable`] when no host answers.
    pub async fn connect(hosts: &[String], config: &WebHdfsConfig) -> Result<WebHdfsLister> {
        let mut candidates = Vec::with_capacity(hosts.len());
        let mut tried = Vec::new();

        for host in hosts {
            match WebHdfsLister::new(host, config) {
                Ok(lister) => candidates.push(lister),
                Err(e) => {
                    warn!(namenode = %host, error = %e, "Failed to use namenode");
                    tried.push(host.clone());
                }
            }
        }

        match Self::select(candidates).await {
            Ok(lister) => Ok(lister),
            Err(HgError::NoNamenodeAvailable { tried: probed }) => {
                tried.extend(probed);
                Err(HgError::NoNamenodeAvailable { tried })
            }
            Err(e) => Err(e),
        }
    }

    /// Return the first candidate whose probe listing succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`HgError::NoNamenodeAvailable`] naming every candidate tried.
    pub async fn select<L: DirectoryLister>(candidates: Vec<L>) -> Result<L> {
        let mut tried = Vec::with_capacity(candidates.len());

        for lister in candidates {
            let endpoint = lister.endpoint();
            info!(namenode = %endpoint, "Connecting to namenode");

            match lister.list(PROBE_PATH).await {
                Ok(_) => {
                    info!(namenode = %endpoint, "Using namenode");
                    return Ok(lister);
                }
                Err(e) => {
                    warn!(namenode = %endpoint, error = %e, "Failed to use namenode");
                    tried.push(endpoint);
                }
            }
        }

        Err(HgError::NoNamenodeAvailable { tried })
    }
}
