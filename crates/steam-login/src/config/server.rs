use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroUsize;

#[derive(Debug, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ServerConfig {
    pub ip_addr: IpAddr,

    /// Steam redirects users back to the port they logged in on, so this should be stable.
    pub port: u16,

    /// Number of Tokio worker threads. Defaults to the number of CPU cores.
    #[serde(deserialize_with = "deserialize_worker_threads")]
    pub worker_threads: Option<NonZeroUsize>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip_addr, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            worker_threads: None,
        }
    }
}

/// `0` means "use the default".
fn deserialize_worker_threads<'de, D>(deserializer: D) -> Result<Option<NonZeroUsize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    <usize as serde::Deserialize<'de>>::deserialize(deserializer).map(NonZeroUsize::new)
}
