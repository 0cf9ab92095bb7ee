#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io::Write;
use std::path::PathBuf;

use dustguard_agent::cli::{Args, Mode};
use dustguard_agent::config::Network;

#[test]
fn no_flags_runs_acceptor_with_defaults() {
    let args = Args::parse_from_iter(["dustguard"]).unwrap();
    assert_eq!(args.mode(), Mode::Acceptor);

    let cfg = args.resolve().unwrap();
    assert_eq!(cfg.node.host, "localhost:10009");
    assert_eq!(cfg.node.network, Network::Mainnet);
    assert_eq!(cfg.audit.dust_exposure_threshold_sat, 500000);
}

#[test]
fn audit_flags() {
    let args = Args::parse_from_iter([
        "dustguard",
        "--check-chans",
        "--dustexposure",
        "20000",
        "--host",
        "node:10009",
        "--tlspath",
        "/tmp/tls.cert",
        "--macdir",
        "/tmp/admin.macaroon",
        "--network",
        "signet",
    ])
    .unwrap();
    assert_eq!(args.mode(), Mode::Audit);

    let cfg = args.resolve().unwrap();
    assert_eq!(cfg.audit.dust_exposure_threshold_sat, 20000);
    assert_eq!(cfg.node.host, "node:10009");
    assert_eq!(cfg.node.tls_cert_path, PathBuf::from("/tmp/tls.cert"));
    assert_eq!(cfg.node.macaroon_path(), PathBuf::from("/tmp/admin.macaroon"));
    assert_eq!(cfg.node.network, Network::Signet);
}

#[test]
fn flags_override_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "version: 1\nnode:\n  host: \"file:10009\"\n  network: testnet\naudit:\n  dust_exposure_threshold_sat: 1000\nacceptor:\n  timeout_ms: 3000\n"
    )
    .unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let args = Args::parse_from_iter(["dustguard", "--config", &path, "--dustexposure", "7"]).unwrap();
    let cfg = args.resolve().unwrap();

    assert_eq!(cfg.node.host, "file:10009");
    assert_eq!(cfg.node.network, Network::Testnet);
    assert_eq!(cfg.acceptor.timeout_ms, 3000);
    assert_eq!(cfg.audit.dust_exposure_threshold_sat, 7);
}

#[test]
fn missing_config_file_is_config_error() {
    let args = Args::parse_from_iter(["dustguard", "--config", "/nonexistent/dustguard.yaml"]).unwrap();
    let err = args.resolve().expect_err("must fail");
    assert_eq!(err.class().as_str(), "CONFIG");
}

#[test]
fn bad_flag_values_rejected() {
    assert!(Args::parse_from_iter(["dustguard", "--dustexposure", "-5"]).is_err());
    assert!(Args::parse_from_iter(["dustguard", "--network", "dogecoin"]).is_err());
    assert!(Args::parse_from_iter(["dustguard", "--bogus"]).is_err());
}

#[test]
fn empty_host_flag_rejected() {
    let args = Args::parse_from_iter(["dustguard", "--host", ""]).unwrap();
    assert!(args.resolve().is_err());
}
