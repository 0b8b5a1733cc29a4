#![cfg(feature = "std")]

use artillery_client::Cli;
use clap::Parser;
use std::time::Duration;

#[test]
fn defaults() {
    let cli = Cli::try_parse_from(["artillery-client", "--url", "http://127.0.0.1:8000/"]).unwrap();
    let config = cli.into_config().unwrap();
    assert_eq!(config.base_url, "http://127.0.0.1:8000");
    assert_eq!(config.refresh_interval, Duration::from_secs(4));
    assert_eq!(config.request_timeout, None);
    assert_eq!(config.map_scale, 0.2);
    assert!(config.debug_panel);
}

#[test]
fn all_options() {
    let cli = Cli::try_parse_from([
        "artillery-client",
        "--url",
        "http://game:9000",
        "--refresh-secs",
        "0.5",
        "--timeout-secs",
        "3",
        "--scale",
        "1",
        "--hide-debug",
        "--log-file",
        "client.log",
    ])
    .unwrap();
    assert_eq!(cli.log_file.as_deref(), Some(std::path::Path::new("client.log")));
    let config = cli.into_config().unwrap();
    assert_eq!(config.refresh_interval, Duration::from_millis(500));
    assert_eq!(config.request_timeout, Some(Duration::from_secs(3)));
    assert_eq!(config.map_scale, 1.0);
    assert!(!config.debug_panel);
}

#[test]
fn url_is_required() {
    assert!(Cli::try_parse_from(["artillery-client"]).is_err());
}

#[test]
fn bad_numbers_are_rejected() {
    for args in [
        ["artillery-client", "--url", "http://x", "--scale=0"],
        ["artillery-client", "--url", "http://x", "--scale=-1"],
        ["artillery-client", "--url", "http://x", "--refresh-secs=-4"],
        ["artillery-client", "--url", "http://x", "--timeout-secs=-1"],
    ] {
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.into_config().is_err(), "{:?}", args);
    }
}
