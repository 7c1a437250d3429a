// Process parameters: sysmon-https <address> <port> <cert_file> <key_file>

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "sysmon-https",
    version,
    about = "Serve host telemetry at /stats and static files over HTTPS"
)]
pub struct Args {
    /// Address to bind, e.g. 0.0.0.0
    pub address: IpAddr,
    /// Port to bind
    pub port: u16,
    /// PEM certificate chain
    pub cert_file: PathBuf,
    /// PEM private key
    pub key_file: PathBuf,
}

impl Args {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}
