use std::collections::HashSet;

use url::Url;

/// The set of peer nodes this node reconciles its chain against.
/// Addresses are normalized to `host[:port]` and deduplicated; entries
/// never expire (no liveness tracking).
#[derive(Debug, Default)]
pub struct PeerRegistry {
    peers: HashSet<String>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a batch of addresses atomically: every address is
    /// normalized before any is inserted, so a malformed entry leaves the
    /// set untouched. Accepts full URLs (`http://host:port/...`) as well
    /// as bare `host:port` pairs.
    pub fn register_all<S: AsRef<str>>(&mut self, addrs: &[S]) -> Result<(), &'static str> {
        let normalized = addrs
            .iter()
            .map(|addr| normalize(addr.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.peers.extend(normalized);
        Ok(())
    }

    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.peers.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

fn normalize(addr: &str) -> Result<String, &'static str> {
    let addr = addr.trim();
    if addr.is_empty() {
        return Err("empty node address");
    }

    // Url::parse refuses scheme-less input, so default to http.
    let parsed = if addr.contains("://") {
        Url::parse(addr)
    } else {
        Url::parse(&format!("http://{addr}"))
    }
    .map_err(|_| "invalid node address")?;

    let host = parsed.host_str().ok_or("node address has no host")?;
    Ok(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
